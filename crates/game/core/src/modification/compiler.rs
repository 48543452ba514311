use std::collections::HashMap;

use super::{EnumRegistry, Modification, ValueExpr};

/// Resolved override for one property, derived from all active modifications.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledEntry {
    /// Literal text override (last processed literal wins).
    pub text: Option<String>,
    /// Numeric interpretation of the literal, if it parsed as a number.
    pub number: Option<f64>,
    /// Boolean interpretation of the literal (`true` / `false` only).
    pub boolean: Option<bool>,
    /// Cumulative multiplicative factor.
    pub multiplier: f64,
    /// Cumulative additive bonus.
    pub bonus: f64,
}

impl CompiledEntry {
    /// Entry that leaves every base value untouched.
    pub const NEUTRAL: Self = Self {
        text: None,
        number: None,
        boolean: None,
        multiplier: 1.0,
        bonus: 0.0,
    };
}

impl Default for CompiledEntry {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Owns the active modification set of one game object and its compiled cache.
///
/// # Precedence
///
/// The active set keeps insertion order. Multipliers and bonuses are sums and
/// therefore independent of that order. Literal overrides are applied in
/// order, so the most recently added modification wins when two of them set
/// a literal for the same property.
#[derive(Clone, Debug, Default)]
pub struct ModificationCompiler {
    active: Vec<Modification>,
    compiled: HashMap<String, CompiledEntry>,
}

impl ModificationCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a modification to the active set.
    ///
    /// Returns false (and skips recompilation) if it was already active.
    pub fn add_modification(&mut self, modification: Modification) -> bool {
        if self.active.contains(&modification) {
            return false;
        }
        self.active.push(modification);
        self.compile();
        true
    }

    /// Removes a modification from the active set.
    ///
    /// Returns false (and skips recompilation) if it was not active.
    pub fn remove_modification(&mut self, modification: &Modification) -> bool {
        let Some(index) = self.active.iter().position(|m| m == modification) else {
            return false;
        };
        self.active.remove(index);
        self.compile();
        true
    }

    /// Drops every active modification and the compiled cache.
    pub fn clear(&mut self) {
        self.active.clear();
        self.compiled.clear();
    }

    pub fn contains(&self, modification: &Modification) -> bool {
        self.active.contains(modification)
    }

    /// Active modifications in insertion order.
    pub fn active(&self) -> &[Modification] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Compiled entry for `property`, if any active modifier touches it.
    pub fn compiled(&self, property: &str) -> Option<&CompiledEntry> {
        self.compiled.get(property)
    }

    /// Rebuilds the whole cache from the active set.
    ///
    /// Adjustment terms are summed in sorted order so that the result depends
    /// only on the set, not on the order it was built in.
    fn compile(&mut self) {
        let mut compiled: HashMap<String, CompiledEntry> = HashMap::new();
        let mut terms: HashMap<String, (Vec<f64>, Vec<f64>)> = HashMap::new();

        for modification in &self.active {
            for modifier in &modification.modifiers {
                let entry = compiled.entry(modifier.property.clone()).or_default();
                match modifier.parse() {
                    ValueExpr::Adjustment {
                        multiplier_delta,
                        bonus,
                    } => {
                        let (deltas, bonuses) =
                            terms.entry(modifier.property.clone()).or_default();
                        deltas.push(multiplier_delta);
                        bonuses.push(bonus);
                    }
                    ValueExpr::Literal {
                        text,
                        number,
                        boolean,
                    } => {
                        entry.text = Some(text.to_owned());
                        // A later literal that is not numeric keeps an earlier
                        // numeric interpretation, same for booleans.
                        if number.is_some() {
                            entry.number = number;
                        }
                        if boolean.is_some() {
                            entry.boolean = boolean;
                        }
                    }
                }
            }
        }

        for (property, (deltas, bonuses)) in terms {
            if let Some(entry) = compiled.get_mut(&property) {
                entry.multiplier += sorted_sum(deltas);
                entry.bonus += sorted_sum(bonuses);
            }
        }

        self.compiled = compiled;
    }

    /// `start * multiplier + bonus`, where `start` is the literal number
    /// override if present, else `base`.
    pub fn modify_number(&self, property: &str, base: f64) -> f64 {
        match self.compiled.get(property) {
            Some(entry) => entry.number.unwrap_or(base) * entry.multiplier + entry.bonus,
            None => base,
        }
    }

    /// Literal text override, else `base`.
    pub fn modify_string<'a>(&'a self, property: &str, base: &'a str) -> &'a str {
        self.compiled
            .get(property)
            .and_then(|entry| entry.text.as_deref())
            .unwrap_or(base)
    }

    /// Literal boolean override, else `base`.
    pub fn modify_boolean(&self, property: &str, base: bool) -> bool {
        self.compiled
            .get(property)
            .and_then(|entry| entry.boolean)
            .unwrap_or(base)
    }

    /// Literal override resolved through `registry`, else `base`.
    ///
    /// Names that match no constant (or types that were never registered)
    /// silently fall back to `base`.
    pub fn modify_enum<E: 'static>(&self, registry: &EnumRegistry, property: &str, base: E) -> E {
        self.compiled
            .get(property)
            .and_then(|entry| entry.text.as_deref())
            .and_then(|name| registry.lookup::<E>(name))
            .unwrap_or(base)
    }
}

fn sorted_sum(mut terms: Vec<f64>) -> f64 {
    terms.sort_by(f64::total_cmp);
    terms.into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ProjectileKind;
    use crate::modification::{ModificationTarget, Modifier};
    use crate::state::EquipmentId;

    fn modification(name: &str, modifiers: &[(&str, &str)]) -> Modification {
        Modification::new(
            name,
            ModificationTarget::UsableItem,
            [EquipmentId::from("gun")],
            modifiers.iter().map(|(p, v)| Modifier::new(*p, *v)),
        )
    }

    #[test]
    fn untouched_property_returns_base() {
        let mut compiler = ModificationCompiler::new();
        compiler.add_modification(modification("m", &[("damage", "*(2)")]));

        assert_eq!(compiler.modify_number("speed", 7.5), 7.5);
        assert_eq!(compiler.modify_string("speed", "fast"), "fast");
        assert!(compiler.modify_boolean("speed", true));
        assert!(compiler.compiled("speed").is_none());
    }

    #[test]
    fn multiply_then_add() {
        let mut compiler = ModificationCompiler::new();
        compiler.add_modification(modification("double", &[("dmg", "*(2)")]));
        assert_eq!(compiler.modify_number("dmg", 10.0), 20.0);

        compiler.add_modification(modification("plus", &[("dmg", "+(5)")]));
        assert_eq!(compiler.modify_number("dmg", 10.0), 25.0);
    }

    #[test]
    fn numeric_literal_replaces_base_before_adjustments() {
        let mut compiler = ModificationCompiler::new();
        compiler.add_modification(modification("fixed", &[("dmg", "4")]));
        compiler.add_modification(modification("boost", &[("dmg", "*(3),+(1)")]));

        // 4 * 3 + 1
        assert_eq!(compiler.modify_number("dmg", 10.0), 13.0);
        assert_eq!(compiler.modify_string("dmg", "base"), "4");
    }

    #[test]
    fn duplicate_add_and_absent_remove_are_noops() {
        let mut compiler = ModificationCompiler::new();
        let m = modification("double", &[("dmg", "*(2)")]);

        assert!(compiler.add_modification(m.clone()));
        assert!(!compiler.add_modification(m.clone()));
        assert_eq!(compiler.active().len(), 1);
        assert_eq!(compiler.modify_number("dmg", 10.0), 20.0);

        assert!(compiler.remove_modification(&m));
        assert!(!compiler.remove_modification(&m));
        assert!(compiler.is_empty());
        assert_eq!(compiler.modify_number("dmg", 10.0), 10.0);
    }

    #[test]
    fn removal_rebuilds_cache_from_remaining_set() {
        let mut compiler = ModificationCompiler::new();
        let a = modification("a", &[("dmg", "+(5)"), ("name", "Blaster")]);
        let b = modification("b", &[("dmg", "*(2)")]);
        compiler.add_modification(a.clone());
        compiler.add_modification(b.clone());

        compiler.remove_modification(&a);

        assert_eq!(compiler.modify_number("dmg", 10.0), 20.0);
        assert_eq!(compiler.modify_string("name", "Gun"), "Gun");
    }

    #[test]
    fn most_recent_literal_wins() {
        let mut compiler = ModificationCompiler::new();
        let first = modification("first", &[("friendly_fire", "true")]);
        let second = modification("second", &[("friendly_fire", "false")]);

        compiler.add_modification(first.clone());
        compiler.add_modification(second.clone());
        assert!(!compiler.modify_boolean("friendly_fire", true));

        // Re-adding moves `first` to the end of the active set.
        compiler.remove_modification(&first);
        compiler.add_modification(first);
        assert!(compiler.modify_boolean("friendly_fire", false));
    }

    #[test]
    fn enum_override_falls_back_on_unknown_name() {
        let registry = EnumRegistry::with_defaults();
        let mut compiler = ModificationCompiler::new();

        compiler.add_modification(modification("m", &[("entity", "submarine")]));
        assert_eq!(
            compiler.modify_enum(&registry, "entity", ProjectileKind::Arrow),
            ProjectileKind::Arrow
        );

        compiler.clear();
        compiler.add_modification(modification("m", &[("entity", "fireball")]));
        assert_eq!(
            compiler.modify_enum(&registry, "entity", ProjectileKind::Arrow),
            ProjectileKind::Fireball
        );
    }

    #[test]
    fn malformed_adjustment_becomes_text_override() {
        let mut compiler = ModificationCompiler::new();
        compiler.add_modification(modification("m", &[("dmg", "*(lots)")]));

        assert_eq!(compiler.modify_number("dmg", 10.0), 10.0);
        assert_eq!(compiler.modify_string("dmg", "10"), "*(lots)");
    }

    #[test]
    fn equal_sets_compile_equally() {
        let a = modification("a", &[("dmg", "*(2)"), ("speed", "+(1)")]);
        let b = modification("b", &[("dmg", "+(3)"), ("speed", "*(0.5)")]);

        let mut forward = ModificationCompiler::new();
        forward.add_modification(a.clone());
        forward.add_modification(b.clone());

        let mut backward = ModificationCompiler::new();
        backward.add_modification(b);
        backward.add_modification(a);

        for property in ["dmg", "speed"] {
            assert_eq!(forward.compiled(property), backward.compiled(property));
        }
    }

    #[test]
    fn fractional_terms_compile_equally_in_any_order() {
        let parts = [
            modification("a", &[("dmg", "+(0.1)"), ("rate", "*(1.1)")]),
            modification("b", &[("dmg", "+(0.2)"), ("rate", "*(1.2)")]),
            modification("c", &[("dmg", "+(0.3)"), ("rate", "*(1.3)")]),
        ];

        let mut forward = ModificationCompiler::new();
        for m in parts.iter().cloned() {
            forward.add_modification(m);
        }
        let mut backward = ModificationCompiler::new();
        for m in parts.iter().rev().cloned() {
            backward.add_modification(m);
        }

        for property in ["dmg", "rate"] {
            assert_eq!(forward.compiled(property), backward.compiled(property));
        }
        assert_eq!(
            forward.modify_number("dmg", 1.0),
            backward.modify_number("dmg", 1.0)
        );
    }
}
