use super::{ApplyOutcome, Loadout, LoadoutBundle, TransactionConflict, apply};

/// Named loadout of one player with its stored and default variants.
///
/// - `current` is what the player flies with right now.
/// - `stored` is what the player respawns with.
/// - `default` is what a reset restores.
///
/// Persisting bundles update `stored` and copy it into `current`; other
/// bundles only touch `current`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerClass {
    name: String,
    default_name: String,
    current: Loadout,
    stored: Loadout,
    default: Loadout,
}

impl PlayerClass {
    pub fn new(name: impl Into<String>, default: Loadout) -> Self {
        let name = name.into();
        Self {
            default_name: name.clone(),
            name,
            current: default.clone(),
            stored: default.clone(),
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current(&self) -> &Loadout {
        &self.current
    }

    pub fn stored(&self) -> &Loadout {
        &self.stored
    }

    pub fn default_loadout(&self) -> &Loadout {
        &self.default
    }

    /// Applies `bundle` atomically.
    ///
    /// On conflict neither loadout nor the name changes.
    pub fn apply_bundle(
        &mut self,
        bundle: &LoadoutBundle,
    ) -> Result<ApplyOutcome, TransactionConflict> {
        let (loadout, outcome) = self.stage(bundle)?;
        self.commit(bundle, loadout, outcome);
        Ok(outcome)
    }

    /// Like [`apply_bundle`](Self::apply_bundle), but commits only when
    /// `accept` approves the outcome.
    ///
    /// Returns `Ok(None)` and leaves the class untouched when the outcome is
    /// refused.
    pub fn apply_bundle_if(
        &mut self,
        bundle: &LoadoutBundle,
        accept: impl FnOnce(ApplyOutcome) -> bool,
    ) -> Result<Option<ApplyOutcome>, TransactionConflict> {
        let (loadout, outcome) = self.stage(bundle)?;
        if !accept(outcome) {
            return Ok(None);
        }
        self.commit(bundle, loadout, outcome);
        Ok(Some(outcome))
    }

    fn stage(
        &self,
        bundle: &LoadoutBundle,
    ) -> Result<(Loadout, ApplyOutcome), TransactionConflict> {
        let base = if bundle.persisting {
            &self.stored
        } else {
            &self.current
        };
        apply(bundle, base, &self.default)
    }

    fn commit(&mut self, bundle: &LoadoutBundle, loadout: Loadout, outcome: ApplyOutcome) {
        if bundle.persisting {
            self.stored = loadout;
            self.current = self.stored.clone();
        } else {
            self.current = loadout;
        }

        if outcome == ApplyOutcome::Reset {
            self.name = self.default_name.clone();
        } else if let Some(name) = &bundle.rename {
            self.name = name.clone();
        }
    }

    /// Restores the current loadout from the stored one (respawn).
    pub fn respawn(&mut self) {
        self.current = self.stored.clone();
    }
}
