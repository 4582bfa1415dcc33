//! Typed per-stack capacity for items
//!
//! Countable items are measured in integer quantities, fluid items in real
//! quantities. Both are the same generic item over a numeric domain; only
//! the domain differs.

use serde::{Deserialize, Serialize};

use crate::container::Containable;
use crate::item::{Item, ItemDefinition};

/// Numeric domain in which a per-stack capacity is measured
pub trait Quantity: Copy + PartialOrd {
    /// Sentinel meaning "no per-stack limit"
    const UNLIMITED: Self;

    /// Largest integer at or below this value
    fn floor(self) -> i64;
}

impl Quantity for i32 {
    const UNLIMITED: Self = -1;

    fn floor(self) -> i64 {
        i64::from(self)
    }
}

impl Quantity for f32 {
    const UNLIMITED: Self = -1.0;

    fn floor(self) -> i64 {
        f32::floor(self) as i64
    }
}

/// An item definition with a per-stack capacity in domain `Q`
///
/// Capacity writes clamp to the `UNLIMITED` sentinel, so any negative
/// capacity reads back as exactly `-1` in the domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityItem<Q: Quantity> {
    /// The underlying definition
    pub definition: ItemDefinition,
    /// Quantity that fits into a single listing (negative = unlimited)
    capacity: Q,
}

/// Countable items are measured in integer quantities
pub type CountableItem = QuantityItem<i32>;

/// Fluid items are measured in real quantities
pub type FluidItem = QuantityItem<f32>;

impl<Q: Quantity> QuantityItem<Q> {
    /// Create an item with unlimited per-stack capacity
    pub fn new(definition: ItemDefinition) -> Self {
        Self {
            definition,
            capacity: Q::UNLIMITED,
        }
    }

    /// Set per-stack capacity (builder form)
    pub fn with_capacity(mut self, capacity: Q) -> Self {
        self.set_capacity(capacity);
        self
    }

    /// Per-stack capacity
    pub fn capacity(&self) -> Q {
        self.capacity
    }

    /// Set per-stack capacity, clamped to the unlimited sentinel
    pub fn set_capacity(&mut self, capacity: Q) {
        self.capacity = if capacity < Q::UNLIMITED {
            Q::UNLIMITED
        } else {
            capacity
        };
    }

    /// Check if a single listing can hold any quantity of this item
    pub fn is_capacity_infinite(&self) -> bool {
        self.capacity.floor() < 0
    }
}

/// Equality follows the definition's identity, as containers expect
impl<Q: Quantity> PartialEq for QuantityItem<Q> {
    fn eq(&self, other: &Self) -> bool {
        self.definition == other.definition
    }
}

impl<Q: Quantity> Containable for QuantityItem<Q> {}

impl<Q: Quantity> Item for QuantityItem<Q> {
    fn definition(&self) -> &ItemDefinition {
        &self.definition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countable_capacity_clamp() {
        let mut item = CountableItem::new(ItemDefinition::new("coin", "Coin"));
        item.set_capacity(-5);

        assert_eq!(item.capacity(), -1);
        assert!(item.is_capacity_infinite());
    }

    #[test]
    fn test_countable_finite_capacity() {
        let item = CountableItem::new(ItemDefinition::new("coin", "Coin")).with_capacity(64);

        assert_eq!(item.capacity(), 64);
        assert!(!item.is_capacity_infinite());
    }

    #[test]
    fn test_fluid_capacity_clamp() {
        let mut item = FluidItem::new(ItemDefinition::new("water", "Water"));
        item.set_capacity(-3.5);

        assert_eq!(item.capacity(), -1.0);
        assert!(item.is_capacity_infinite());
    }

    #[test]
    fn test_fluid_fractional_negative_is_infinite() {
        // -0.5 survives the clamp but still floors below zero
        let item = FluidItem::new(ItemDefinition::new("oil", "Oil")).with_capacity(-0.5);

        assert_eq!(item.capacity(), -0.5);
        assert!(item.is_capacity_infinite());
    }

    #[test]
    fn test_fluid_finite_capacity() {
        let item = FluidItem::new(ItemDefinition::new("water", "Water")).with_capacity(2.5);

        assert_eq!(item.capacity(), 2.5);
        assert!(!item.is_capacity_infinite());
    }

    #[test]
    fn test_equality_by_definition() {
        let a = CountableItem::new(ItemDefinition::new("coin", "Coin")).with_capacity(10);
        let b = CountableItem::new(ItemDefinition::new("coin", "Gold Coin")).with_capacity(99);
        let c = CountableItem::new(ItemDefinition::new("gem", "Gem"));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
