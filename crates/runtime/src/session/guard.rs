use aerial_core::Tick;

/// Ignores a trigger that follows an admitted one within `window` ticks.
///
/// Lobby blocks are often hit twice by one physical click; only the first
/// trigger of such a burst goes through.
#[derive(Clone, Debug)]
pub struct TriggerGuard {
    window: u64,
    last: Option<Tick>,
}

impl TriggerGuard {
    pub fn new(window: u64) -> Self {
        Self { window, last: None }
    }

    /// Returns true and starts a new window if `now` is outside the current
    /// one.
    pub fn admit(&mut self, now: Tick) -> bool {
        if let Some(last) = self.last
            && now.0.saturating_sub(last.0) < self.window
        {
            return false;
        }
        self.last = Some(now);
        true
    }

    pub fn window(&self) -> u64 {
        self.window
    }
}
