//! Capacity-bounded, policy-gated containers
//!
//! A [`Container`] is an ordered multiset that accepts an item only when the
//! container has room, the container's [`ContainerPolicy`] admits it, and the
//! item's own [`Containable`] predicates agree. Removal is gated the same way.
//! Every gated call reports the batch of affected items through the
//! container's notification channels.

use crate::events::ObserverList;

/// Read-only view of a container, handed to admission and removal predicates
pub trait ContainerView {
    /// Number of entries currently held
    fn len(&self) -> usize;
    /// Maximum number of entries (negative = unlimited)
    fn max_items(&self) -> i32;
    /// Check if the container can hold an unlimited number of entries
    fn is_infinite(&self) -> bool;
    /// Check if no further entries may be added
    fn is_full(&self) -> bool;
    /// Check if the container holds no entries
    fn is_empty(&self) -> bool;
}

/// Capability trait for anything that can be placed into a [`Container`]
///
/// Both predicates default to unconditional acceptance; item types opt in to
/// stricter behavior (quest items that refuse removal, keyed items that only
/// enter matching containers, and so on). Predicates are consulted on every
/// gated call and never cached.
pub trait Containable {
    /// Check whether this instance may be added to `container`
    fn can_be_added_to(&self, _container: &dyn ContainerView) -> bool {
        true
    }

    /// Check whether this instance may be removed from `container`
    fn can_be_removed_from(&self, _container: &dyn ContainerView) -> bool {
        true
    }
}

/// Container-side admission and eviction policy
///
/// Supplied at construction; both hooks default to accept-all. Override to
/// build filtered containers (type whitelists, keyed chests, etc.) without
/// touching the item types themselves.
pub trait ContainerPolicy<T> {
    /// Check whether the container should admit `item`
    fn can_add_entry(&self, _container: &dyn ContainerView, _item: &T) -> bool {
        true
    }

    /// Check whether the container should release `item`
    fn can_remove_item(&self, _container: &dyn ContainerView, _item: &T) -> bool {
        true
    }
}

/// The accept-all policy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpenPolicy;

impl<T> ContainerPolicy<T> for OpenPolicy {}

/// A capacity-bounded, policy-gated ordered multiset of items
///
/// Duplicates are permitted; insertion order is preserved and is the
/// iteration order. Gated mutation never panics or returns errors for
/// ordinary refusal: single forms return `bool`, counted forms return the
/// number of items actually applied, batch forms partition into
/// `(passed, failed)`. There is no rollback across a batch; each item is
/// evaluated and applied independently.
///
/// Notification handlers run synchronously after the mutation, before the
/// triggering call returns. They receive only the affected batch, so they
/// cannot re-enter the container.
#[derive(Debug)]
pub struct Container<T, P = OpenPolicy> {
    /// Entries in insertion order
    entries: Vec<T>,
    /// Maximum number of entries (negative = unlimited)
    max_items: i32,
    /// Admission/eviction policy
    policy: P,
    /// Fired after a gated add; carries the successfully added batch
    pub on_added: ObserverList<T>,
    /// Fired after a gated remove; carries the successfully removed batch
    pub on_removed: ObserverList<T>,
    /// Fired when contents change outside the gated paths (see [`clear`](Self::clear))
    pub on_modified: ObserverList<T>,
}

impl<T> Container<T> {
    /// Create a container with the given capacity and the accept-all policy
    pub fn new(max_items: i32) -> Self {
        Self::with_policy(max_items, OpenPolicy)
    }

    /// Create a container with no capacity limit
    pub fn unbounded() -> Self {
        Self::new(-1)
    }
}

impl<T, P> Container<T, P> {
    /// Create a container with the given capacity and policy
    pub fn with_policy(max_items: i32, policy: P) -> Self {
        Self {
            entries: Vec::new(),
            max_items,
            policy,
            on_added: ObserverList::new(),
            on_removed: ObserverList::new(),
            on_modified: ObserverList::new(),
        }
    }

    /// Maximum number of entries (negative = unlimited)
    pub fn max_items(&self) -> i32 {
        self.max_items
    }

    /// Change the capacity limit
    ///
    /// Shrinking below the current entry count keeps the existing entries;
    /// the container simply reports full and refuses further adds.
    pub fn set_max_items(&mut self, max_items: i32) {
        self.max_items = max_items;
    }

    /// Check if the container can hold an unlimited number of entries
    pub fn is_infinite(&self) -> bool {
        self.max_items < 0
    }

    /// Check if no further entries may be added
    pub fn is_full(&self) -> bool {
        !self.is_infinite() && self.entries.len() as i32 >= self.max_items
    }

    /// Check if the container holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Append an entry directly, bypassing capacity, policy, and notifications
    ///
    /// Low-level building block used by the gated paths; prefer
    /// [`add_item`](Self::add_item) unless composing custom behavior.
    pub fn push(&mut self, item: T) {
        self.entries.push(item);
    }
}

impl<T, P> ContainerView for Container<T, P> {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn max_items(&self) -> i32 {
        self.max_items
    }

    fn is_infinite(&self) -> bool {
        Container::is_infinite(self)
    }

    fn is_full(&self) -> bool {
        Container::is_full(self)
    }

    fn is_empty(&self) -> bool {
        Container::is_empty(self)
    }
}

impl<T, P> Container<T, P>
where
    T: Containable + Clone + PartialEq,
    P: ContainerPolicy<T>,
{
    /// Count the entries equal to `item`
    pub fn quantity_of(&self, item: &T) -> usize {
        self.entries.iter().filter(|entry| *entry == item).count()
    }

    /// Check if at least one entry equals `item`
    pub fn contains(&self, item: &T) -> bool {
        self.entries.iter().any(|entry| entry == item)
    }

    /// Remove the first entry equal to `item`, bypassing policy and notifications
    ///
    /// Returns false when no entry matches. Low-level counterpart of
    /// [`remove_item`](Self::remove_item).
    pub fn remove_first(&mut self, item: &T) -> bool {
        match self.entries.iter().position(|entry| entry == item) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Admission gate: capacity, then container policy, then the item itself
    fn admit(&self, item: &T) -> bool {
        if self.is_full() {
            log::trace!("add refused: container full ({}/{})", self.len(), self.max_items);
            return false;
        }
        self.policy.can_add_entry(self, item) && item.can_be_added_to(self)
    }

    /// Removal gate; the final word is the underlying first-match removal,
    /// so a missing entry reads as an ordinary refusal
    fn release(&mut self, item: &T) -> bool {
        if self.is_empty() {
            return false;
        }
        if !self.policy.can_remove_item(&*self, item) || !item.can_be_removed_from(&*self) {
            return false;
        }
        self.remove_first(item)
    }

    /// Attempt to add a single item
    ///
    /// Succeeds iff the container is not full, the policy admits the item,
    /// and the item accepts the container. Fires `on_added` with a
    /// single-element batch on success.
    pub fn add_item(&mut self, item: T) -> bool {
        if !self.admit(&item) {
            return false;
        }
        self.entries.push(item.clone());
        let batch = [item];
        self.on_added.emit(&batch);
        true
    }

    /// Attempt to add `count` copies of `item`, stopping at the first failure
    ///
    /// Returns the number actually added. Fires `on_added` once with exactly
    /// the added copies (possibly none).
    pub fn add_copies(&mut self, item: &T, count: usize) -> usize {
        let mut passed = Vec::new();
        for _ in 0..count {
            if !self.admit(item) {
                break;
            }
            self.entries.push(item.clone());
            passed.push(item.clone());
        }
        self.on_added.emit(&passed);
        passed.len()
    }

    /// Attempt to add each item independently
    ///
    /// Returns `(passed, failed)`, each preserving the input's relative
    /// order. Fires `on_added` once with the passed batch; failed items
    /// produce no notification.
    pub fn add_batch<I>(&mut self, items: I) -> (Vec<T>, Vec<T>)
    where
        I: IntoIterator<Item = T>,
    {
        let mut passed = Vec::new();
        let mut failed = Vec::new();
        for item in items {
            if self.admit(&item) {
                self.entries.push(item.clone());
                passed.push(item);
            } else {
                failed.push(item);
            }
        }
        self.on_added.emit(&passed);
        (passed, failed)
    }

    /// Attempt to remove the first entry equal to `item`
    ///
    /// Gated by the container policy and the item's own removal predicate.
    /// Fires `on_removed` with a single-element batch on success.
    pub fn remove_item(&mut self, item: &T) -> bool {
        if !self.release(item) {
            return false;
        }
        let batch = [item.clone()];
        self.on_removed.emit(&batch);
        true
    }

    /// Attempt up to `count` single removals of `item`, stopping at the first failure
    ///
    /// Returns the number actually removed. Fires `on_removed` once with the
    /// removed copies (possibly none).
    pub fn remove_copies(&mut self, item: &T, count: usize) -> usize {
        let mut passed = Vec::new();
        for _ in 0..count {
            if !self.release(item) {
                break;
            }
            passed.push(item.clone());
        }
        self.on_removed.emit(&passed);
        passed.len()
    }

    /// Attempt to remove each item independently
    ///
    /// Returns `(passed, failed)`, each preserving the input's relative
    /// order. Fires `on_removed` once with the passed batch.
    pub fn remove_batch<I>(&mut self, items: I) -> (Vec<T>, Vec<T>)
    where
        I: IntoIterator<Item = T>,
    {
        let mut passed = Vec::new();
        let mut failed = Vec::new();
        for item in items {
            if self.release(&item) {
                passed.push(item);
            } else {
                failed.push(item);
            }
        }
        self.on_removed.emit(&passed);
        (passed, failed)
    }

    /// Remove every entry through the gated removal path
    ///
    /// Entries whose policy or removal predicate refuses are retained. To
    /// dispose of everything unconditionally, use [`clear`](Self::clear).
    pub fn flush(&mut self) {
        log::debug!("flushing container ({} entries)", self.len());
        let snapshot = self.entries.clone();
        self.remove_batch(snapshot);
    }

    /// Unconditionally wipe the container, bypassing all gating
    ///
    /// Fires `on_modified` (not `on_removed`) with the full prior entry set,
    /// signalling that contents changed outside the gated paths.
    pub fn clear(&mut self) {
        log::debug!("clearing container ({} entries)", self.len());
        let prior = core::mem::take(&mut self.entries);
        self.on_modified.emit(&prior);
    }
}

impl<T> Default for Container<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<'a, T, P> IntoIterator for &'a Container<T, P> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
