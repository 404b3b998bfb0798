//! Property-based tests for inventory bookkeeping.
//!
//! Random add/remove sequences over a small pool of materials, checked
//! against a simple per-id model.

use std::collections::HashMap;

use craftsim_common::{Material, MaterialId};
use craftsim_gameplay::Inventory;
use proptest::prelude::*;

// Ids and names line up one to one, so id and name matching agree.
const NAMES: [&str; 4] = ["Wood", "Stone", "Iron", "Gold"];

fn material(index: usize, shout: bool) -> Material {
    let name = if shout {
        NAMES[index].to_uppercase()
    } else {
        NAMES[index].to_string()
    };
    Material::new(MaterialId::new(index as i32), name).expect("valid material")
}

#[derive(Debug, Clone)]
enum Op {
    Add(usize, bool, u32),
    Remove(usize, bool, u32),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..NAMES.len(), any::<bool>(), 0..20u32).prop_map(|(i, s, q)| Op::Add(i, s, q)),
        (0..NAMES.len(), any::<bool>(), 0..20u32).prop_map(|(i, s, q)| Op::Remove(i, s, q)),
    ]
}

proptest! {
    #[test]
    fn two_adds_sum(index in 0..NAMES.len(), a in 1..1000u32, b in 1..1000u32) {
        let mut inv = Inventory::new();
        inv.add_material(&material(index, false), a);
        inv.add_material(&material(index, true), b);

        prop_assert_eq!(inv.quantity(&material(index, false)), a + b);
        prop_assert_eq!(inv.len(), 1);
    }

    #[test]
    fn matches_model(ops in proptest::collection::vec(arb_op(), 0..64)) {
        let mut inv = Inventory::new();
        let mut model: HashMap<usize, u32> = HashMap::new();

        for op in ops {
            match op {
                Op::Add(i, shout, q) => {
                    inv.add_material(&material(i, shout), q);
                    if q > 0 {
                        *model.entry(i).or_insert(0) += q;
                    }
                },
                Op::Remove(i, shout, q) => {
                    let have = model.get(&i).copied().unwrap_or(0);
                    let removed = inv.remove_material(&material(i, shout), q);
                    prop_assert_eq!(removed, q > 0 && have >= q);
                    if removed {
                        let left = have - q;
                        if left == 0 {
                            model.remove(&i);
                        } else {
                            model.insert(i, left);
                        }
                    }
                },
            }
        }

        prop_assert_eq!(inv.len(), model.len());
        for (material, quantity) in inv.iter() {
            prop_assert!(quantity > 0);
            let index = material.id().raw() as usize;
            prop_assert_eq!(model.get(&index).copied(), Some(quantity));
        }
    }

    #[test]
    fn failed_batch_changes_nothing(stock in 0..10u32, extra in 1..10u32) {
        let wood = material(0, false);
        let iron = material(2, false);
        let mut inv = Inventory::new();
        inv.add_material(&wood, 10);
        inv.add_material(&iron, stock);

        let result = inv.remove_batch(&[(&wood, 5), (&iron, stock + extra)]);

        prop_assert!(result.is_err());
        prop_assert_eq!(inv.quantity(&wood), 10);
        prop_assert_eq!(inv.quantity(&iron), stock);
    }
}
