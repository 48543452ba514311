use aerial_core::{EquipmentId, Modification, ModificationCompiler, ModificationTarget, Modifier};
use proptest::prelude::*;

const PROPERTIES: [&str; 3] = ["damage", "cooldown", "speed"];

fn modification(index: usize, terms: &[(usize, bool, i32)]) -> Modification {
    Modification::new(
        format!("m{index}"),
        ModificationTarget::UsableItem,
        [EquipmentId::from("gun")],
        terms.iter().map(|&(property, multiply, n)| {
            let value = if multiply {
                format!("*({n})")
            } else {
                format!("+({n})")
            };
            Modifier::new(PROPERTIES[property], value)
        }),
    )
}

fn modifications() -> impl Strategy<Value = Vec<Modification>> {
    prop::collection::vec(
        prop::collection::vec((0..PROPERTIES.len(), any::<bool>(), -8..8i32), 1..4),
        1..6,
    )
    .prop_map(|sets| {
        sets.iter()
            .enumerate()
            .map(|(index, terms)| modification(index, terms))
            .collect()
    })
}

fn compile(set: &[Modification]) -> ModificationCompiler {
    let mut compiler = ModificationCompiler::new();
    for m in set {
        compiler.add_modification(m.clone());
    }
    compiler
}

proptest! {
    #[test]
    fn prop_adjustments_are_order_independent(set in modifications(), base in -100..100i32) {
        let forward = compile(&set);
        let mut reversed_set = set.clone();
        reversed_set.reverse();
        let backward = compile(&reversed_set);

        for property in PROPERTIES {
            prop_assert_eq!(forward.compiled(property), backward.compiled(property));
            prop_assert_eq!(
                forward.modify_number(property, f64::from(base)),
                backward.modify_number(property, f64::from(base))
            );
        }
    }

    #[test]
    fn prop_removal_matches_fresh_compile(set in modifications(), drop_mask in any::<u8>()) {
        let mut compiler = compile(&set);
        let mut kept = Vec::new();
        for (index, m) in set.iter().enumerate() {
            if drop_mask & (1 << index) != 0 {
                prop_assert!(compiler.remove_modification(m));
            } else {
                kept.push(m.clone());
            }
        }

        let fresh = compile(&kept);
        prop_assert_eq!(compiler.active(), fresh.active());
        for property in PROPERTIES {
            prop_assert_eq!(compiler.compiled(property), fresh.compiled(property));
        }
    }
}
