//! Ember Inventory - Container and Item System
//!
//! This crate provides inventory management for the Ember Engine.
//!
//! # Features
//!
//! - Capacity-bounded containers with gated add/remove
//! - Container-side admission policies and item-side containable predicates
//! - Batched added/removed/modified notifications
//! - Item definitions with display metadata, usability flags, and tags
//! - Countable (integer) and fluid (real) per-stack capacities
//!
//! # Example
//!
//! ```ignore
//! use ember_inventory::prelude::*;
//!
//! // Define an item
//! let potion = ItemDefinition::new("health_potion", "Health Potion")
//!     .with_usable(true)
//!     .with_tag("consumable");
//!
//! // Create a container holding up to 20 entries
//! let mut bag: Container<ItemDefinition> = Container::new(20);
//! bag.on_added.subscribe(|batch| println!("picked up {} items", batch.len()));
//!
//! bag.add_item(potion);
//! ```

pub mod container;
pub mod events;
pub mod item;
pub mod quantity;

pub mod prelude {
    pub use crate::container::{Containable, Container, ContainerPolicy, ContainerView, OpenPolicy};
    pub use crate::events::{ObserverList, SubscriberId};
    pub use crate::item::{Item, ItemDefinition, ItemUseError, ItemUser};
    pub use crate::quantity::{CountableItem, FluidItem, Quantity, QuantityItem};
}

pub use prelude::*;
