//! Invariant tests for ember_inventory
//!
//! These tests verify the container invariants that MUST NEVER be violated

use std::cell::RefCell;
use std::rc::Rc;

use ember_inventory::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct Loot {
    definition: ItemDefinition,
    droppable: bool,
}

impl Loot {
    fn new(id: &str) -> Self {
        Self {
            definition: ItemDefinition::new(id, id),
            droppable: true,
        }
    }

    fn bound(id: &str) -> Self {
        Self {
            definition: ItemDefinition::new(id, id),
            droppable: false,
        }
    }
}

impl Containable for Loot {
    fn can_be_removed_from(&self, _container: &dyn ContainerView) -> bool {
        self.droppable
    }
}

/// Policy that only admits items tagged "loot"
struct LootOnly;

impl ContainerPolicy<Loot> for LootOnly {
    fn can_add_entry(&self, _container: &dyn ContainerView, item: &Loot) -> bool {
        item.definition.has_tag("loot")
    }
}

/// INVARIANT: Count never exceeds max_items when max_items >= 0, even under
/// interleaved add/remove batches
#[test]
fn invariant_capacity_never_exceeded() {
    let mut chest: Container<Loot> = Container::new(8);

    for round in 0..20 {
        let batch: Vec<Loot> = (0..5).map(|i| Loot::new(&format!("r{round}i{i}"))).collect();
        chest.add_batch(batch.clone());
        assert!(chest.len() <= 8);

        if round % 3 == 0 {
            chest.remove_batch(batch);
            assert!(chest.len() <= 8);
        }

        chest.add_copies(&Loot::new("filler"), 4);
        assert!(chest.len() <= 8);
    }
}

/// INVARIANT: A single add succeeds iff not-full AND the policy admits AND
/// the item accepts (the corrected admission semantics)
#[test]
fn invariant_admission_requires_room_and_policy() {
    let tagged = Loot {
        definition: ItemDefinition::new("coin", "Coin").with_tag("loot"),
        droppable: true,
    };
    let untagged = Loot::new("brick");

    let mut chest = Container::with_policy(1, LootOnly);

    // Policy refusal
    assert!(!chest.add_item(untagged));
    // All gates pass
    assert!(chest.add_item(tagged.clone()));
    // Capacity refusal, policy would admit
    assert!(chest.is_full());
    assert!(!chest.add_item(tagged));
    assert_eq!(chest.len(), 1);
}

/// INVARIANT: Counted add stops at the first failure and reports the number
/// actually stored
#[test]
fn invariant_counted_add_stops_at_capacity() {
    let mut chest: Container<Loot> = Container::new(3);
    let coin = Loot::new("coin");

    assert_eq!(chest.add_copies(&coin, 5), 3);
    assert_eq!(chest.quantity_of(&coin), 3);
    assert!(chest.is_full());
}

/// INVARIANT: Flush retains entries that refuse removal; the removed
/// notification names only what actually left
#[test]
fn invariant_flush_retains_protected_entries() {
    let mut chest: Container<Loot> = Container::unbounded();
    chest.add_item(Loot::new("coin"));
    chest.add_item(Loot::bound("crown"));
    chest.add_item(Loot::new("gem"));

    let removed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&removed);
    chest
        .on_removed
        .subscribe(move |batch: &[Loot]| sink.borrow_mut().extend_from_slice(batch));

    chest.flush();

    assert_eq!(chest.entries(), &[Loot::bound("crown")]);
    assert_eq!(*removed.borrow(), vec![Loot::new("coin"), Loot::new("gem")]);
}

/// INVARIANT: Clear empties the container unconditionally and reports through
/// the modified channel, never the removed channel
#[test]
fn invariant_clear_bypasses_gating() {
    let mut chest: Container<Loot> = Container::unbounded();
    chest.add_item(Loot::bound("crown"));
    chest.add_item(Loot::new("coin"));

    let modified = Rc::new(RefCell::new(Vec::new()));
    let removed_fired = Rc::new(RefCell::new(false));

    let sink = Rc::clone(&modified);
    chest
        .on_modified
        .subscribe(move |batch: &[Loot]| sink.borrow_mut().extend_from_slice(batch));
    let flag = Rc::clone(&removed_fired);
    chest.on_removed.subscribe(move |_: &[Loot]| *flag.borrow_mut() = true);

    chest.clear();

    assert!(chest.is_empty());
    assert_eq!(
        *modified.borrow(),
        vec![Loot::bound("crown"), Loot::new("coin")]
    );
    assert!(!*removed_fired.borrow());
}

/// INVARIANT: Batch operations partition per item with no rollback, and each
/// call delivers exactly one notification carrying the passed batch in
/// processing order
#[test]
fn invariant_batch_partition_and_single_notification() {
    let mut chest = Container::with_policy(10, LootOnly);

    let coin = Loot {
        definition: ItemDefinition::new("coin", "Coin").with_tag("loot"),
        droppable: true,
    };
    let gem = Loot {
        definition: ItemDefinition::new("gem", "Gem").with_tag("loot"),
        droppable: true,
    };
    let brick = Loot::new("brick");

    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    chest
        .on_added
        .subscribe(move |batch: &[Loot]| sink.borrow_mut().push(batch.to_vec()));

    let (passed, failed) = chest.add_batch(vec![coin.clone(), brick.clone(), gem.clone()]);

    assert_eq!(passed, vec![coin.clone(), gem.clone()]);
    assert_eq!(failed, vec![brick]);
    // One call, carrying the passed batch in processing order
    assert_eq!(*calls.borrow(), vec![vec![coin, gem]]);
}

/// INVARIANT: Removal takes the first matching entry and leaves the rest of
/// the sequence in order
#[test]
fn invariant_remove_is_first_match() {
    let mut chest: Container<Loot> = Container::unbounded();
    let coin = Loot::new("coin");
    chest.add_item(coin.clone());
    chest.add_item(coin.clone());
    chest.add_item(Loot::new("gem"));

    assert!(chest.remove_item(&coin));
    assert_eq!(chest.entries(), &[Loot::new("coin"), Loot::new("gem")]);
}

/// Quantity-typed items ride through containers like any other entry
#[test]
fn quantity_items_in_containers() {
    let mut barrel: Container<FluidItem> = Container::new(2);
    let water = FluidItem::new(ItemDefinition::new("water", "Water")).with_capacity(10.0);

    assert_eq!(barrel.add_copies(&water, 3), 2);
    assert_eq!(barrel.quantity_of(&water), 2);
    assert!(!water.is_capacity_infinite());
}
