/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Fixed rate of the tick loop (ticks per second).
    pub tick_rate_hz: u32,
    /// Window (in ticks) during which repeated triggers from the same player
    /// are ignored.
    pub debounce_ticks: u64,
    /// Money granted to a player when their session starts.
    pub starting_money: i64,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICK_RATE_HZ: u32 = 20;
    pub const DEFAULT_DEBOUNCE_TICKS: u64 = 5;
    pub const DEFAULT_STARTING_MONEY: i64 = 0;

    pub fn new() -> Self {
        Self {
            tick_rate_hz: Self::DEFAULT_TICK_RATE_HZ,
            debounce_ticks: Self::DEFAULT_DEBOUNCE_TICKS,
            starting_money: Self::DEFAULT_STARTING_MONEY,
        }
    }

    /// Duration of a single tick in milliseconds (0 when ticking is manual).
    pub fn tick_millis(&self) -> u64 {
        if self.tick_rate_hz == 0 {
            0
        } else {
            1000 / u64::from(self.tick_rate_hz)
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
