//! Item definitions and usability

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::container::Containable;

/// Error returned when an item fails its usability gate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{item} couldn't be used with {user}")]
pub struct ItemUseError {
    /// Display name of the item
    pub item: String,
    /// Description of the user that attempted the use
    pub user: String,
}

/// Capability trait for anything that can use items
pub trait ItemUser<I> {
    /// Called when `item` has been successfully used
    fn use_item(&mut self, item: &I);

    /// Check whether this user may use `item`
    fn can_use(&self, _item: &I) -> bool {
        true
    }

    /// Label shown in item-use failure messages
    fn description(&self) -> String {
        String::from("an unnamed user")
    }
}

/// Definition of a kind of item
///
/// Definitions are long-lived, shared, immutable-by-convention data
/// referenced by containers and pickups alike; no container owns one.
/// Equality compares the identity key only, which is what containers use
/// when counting and removing entries.
///
/// The tag set is derived from the raw tag list. After editing `tags`
/// directly or deserializing a definition, call [`validate`](Self::validate)
/// to rebuild it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Identity key, used for comparing item equality
    pub id: String,
    /// Default order in which this item should be listed
    pub list_order: i32,
    /// Name used for a singular quantity
    pub display_name: String,
    /// Plural form of the name; empty falls back to `display_name`
    pub plural_name: String,
    /// Display description
    pub description: String,
    /// Custom value, typically monetary
    pub base_value: f32,
    /// Whether this item can be used directly
    pub is_usable: bool,
    /// Whether this item is consumed when used
    pub is_consumable: bool,
    /// Whether this item can be destroyed (or sold) directly from a container
    pub is_destructible: bool,
    /// Raw tag list for ordering and filtering
    pub tags: Vec<String>,
    /// Tag set derived from `tags`
    #[serde(skip)]
    tag_set: HashSet<String>,
}

impl ItemDefinition {
    /// Create a new item definition
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            list_order: 0,
            display_name: display_name.into(),
            plural_name: String::new(),
            description: String::new(),
            base_value: 0.0,
            is_usable: false,
            is_consumable: false,
            is_destructible: false,
            tags: Vec::new(),
            tag_set: HashSet::new(),
        }
    }

    /// Set list order
    pub fn with_list_order(mut self, order: i32) -> Self {
        self.list_order = order;
        self
    }

    /// Set plural name
    pub fn with_plural_name(mut self, name: impl Into<String>) -> Self {
        self.plural_name = name.into();
        self
    }

    /// Set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set base value
    pub fn with_base_value(mut self, value: f32) -> Self {
        self.base_value = value;
        self
    }

    /// Set usable
    pub fn with_usable(mut self, usable: bool) -> Self {
        self.is_usable = usable;
        self
    }

    /// Set consumable
    pub fn with_consumable(mut self, consumable: bool) -> Self {
        self.is_consumable = consumable;
        self
    }

    /// Set destructible
    pub fn with_destructible(mut self, destructible: bool) -> Self {
        self.is_destructible = destructible;
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.tag_set.insert(tag.clone());
        self.tags.push(tag);
        self
    }

    /// Plural name, falling back to the display name when unset
    pub fn plural_name(&self) -> &str {
        if self.plural_name.is_empty() {
            &self.display_name
        } else {
            &self.plural_name
        }
    }

    /// Rebuild the derived tag set from the raw tag list
    ///
    /// Call after mutating `tags` in place or after deserializing.
    pub fn validate(&mut self) {
        self.tag_set = self.tags.iter().cloned().collect();
    }

    /// Tag set derived from the raw tag list
    pub fn tag_set(&self) -> &HashSet<String> {
        &self.tag_set
    }

    /// Check if this item carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag_set.contains(tag)
    }

    /// Ordering by list order, ascending
    pub fn cmp_list_order(&self, other: &Self) -> std::cmp::Ordering {
        self.list_order.cmp(&other.list_order)
    }
}

impl PartialEq for ItemDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ItemDefinition {}

impl Default for ItemDefinition {
    fn default() -> Self {
        Self::new("unknown", "Unknown Item")
    }
}

impl Containable for ItemDefinition {}

/// Capability surface shared by all item types
///
/// Required method is [`definition`](Self::definition); usability flows
/// through the provided methods, with [`usable_condition`](Self::usable_condition)
/// and [`on_use`](Self::on_use) as the overridable hooks.
pub trait Item {
    /// The definition describing this kind of item
    fn definition(&self) -> &ItemDefinition;

    /// Hook for custom usability conditions
    fn usable_condition(&self, _user: Option<&dyn ItemUser<Self>>) -> bool
    where
        Self: Sized,
    {
        true
    }

    /// Hook called when the item is officially used
    fn on_use(&self, _user: Option<&dyn ItemUser<Self>>)
    where
        Self: Sized,
    {
    }

    /// Check whether the item is currently usable, optionally for a specific user
    fn is_usable_with(&self, user: Option<&dyn ItemUser<Self>>) -> bool
    where
        Self: Sized,
    {
        self.definition().is_usable
            && self.usable_condition(user)
            && user.map_or(true, |u| u.can_use(self))
    }

    /// Attempt to use the item
    ///
    /// On success runs [`on_use`](Self::on_use) and then notifies the user.
    /// Refusal is the one error condition in this crate; it carries the item
    /// and user names for host UI code.
    fn try_use(&self, mut user: Option<&mut dyn ItemUser<Self>>) -> Result<(), ItemUseError>
    where
        Self: Sized,
    {
        if self.is_usable_with(user.as_deref()) {
            self.on_use(user.as_deref());
            if let Some(u) = user.as_deref_mut() {
                u.use_item(self);
            }
            Ok(())
        } else {
            log::trace!("use refused for item '{}'", self.definition().id);
            Err(ItemUseError {
                item: self.definition().display_name.clone(),
                user: user.map_or_else(|| String::from("no user"), |u| u.description()),
            })
        }
    }
}

impl Item for ItemDefinition {
    fn definition(&self) -> &ItemDefinition {
        self
    }
}
