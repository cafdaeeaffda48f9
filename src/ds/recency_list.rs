//! Doubly linked recency list backed by [`SlotArena`].
//!
//! Nodes live in the arena and link by [`SlotId`], giving stable handles
//! and O(1) move-to-front without raw pointers. The front is the most
//! recently touched position, the back the least recently touched.
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                 │
//!   ├────────┼────────────────────────────────────────────┤
//!   │ id_0   │ { value: A, prev: None,  next: Some(id_1) }│
//!   │ id_1   │ { value: B, prev: id_0,  next: Some(id_2) }│
//!   │ id_2   │ { value: C, prev: id_1,  next: None }      │
//!   └────────┴────────────────────────────────────────────┘
//!
//!   head ─► [id_0] ◄──► [id_1] ◄──► [id_2] ◄── tail
//!           (MRU)                   (LRU)
//! ```
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Arena-backed doubly linked list ordered by recency.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` is a live node of this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Returns the value at the front (most recent), if any.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Returns the value at the back (least recent), if any.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Returns the `SlotId` of the back node, if any.
    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Returns the value for `id`, if present.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value for `id`, if present.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Inserts a new node at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old_head) => {
                if let Some(node) = self.arena.get_mut(old_head) {
                    node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Removes and returns the back (least recent) value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Removes the node `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.unlink(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves an existing node to the front; returns `false` if `id` is
    /// not a live node.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.unlink(id);
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        if let Some(old_head) = old_head {
            if let Some(node) = self.arena.get_mut(old_head) {
                node.prev = Some(id);
            }
        } else {
            self.tail = Some(id);
        }
        self.head = Some(id);
        true
    }

    /// Removes all nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates values from front (most recent) to back (least recent).
    pub fn iter(&self) -> RecencyIter<'_, T> {
        RecencyIter {
            list: self,
            current: self.head,
        }
    }

    /// Detaches `id` from its neighbours without freeing the node.
    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(node) = self.arena.get_mut(prev_id) {
                    node.next = next;
                }
            },
            None => self.head = next,
        }
        match next {
            Some(next_id) => {
                if let Some(node) = self.arena.get_mut(next_id) {
                    node.prev = prev;
                }
            },
            None => self.tail = prev,
        }
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
        Some(())
    }

    /// Checks the link structure against the arena contents.
    pub fn validate(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() {
                return Err(InvariantError::new("head and tail must be set together"));
            }
            if self.len() != 0 {
                return Err(InvariantError::new("empty links but arena holds nodes"));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new("linked node missing from arena"))?;
            if node.prev != prev {
                return Err(InvariantError::new("node prev link disagrees with walk"));
            }
            if node.next.is_none() && self.tail != Some(id) {
                return Err(InvariantError::new("last node is not the tail"));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
        }
        if count != self.len() {
            return Err(InvariantError::new("walk length disagrees with arena len"));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    /// Panics if the link structure disagrees with the arena contents.
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.validate() {
            panic!("recency list invariant violated: {err}");
        }
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over values from most recent to least recent.
pub struct RecencyIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for RecencyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_front_orders_most_recent_first() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);
        let values: Vec<_> = list.iter().copied().collect();
        assert_eq!(values, vec![3, 2, 1]);
        assert_eq!(list.front(), Some(&3));
        assert_eq!(list.back(), Some(&1));
        list.debug_validate_invariants();
    }

    #[test]
    fn pop_back_removes_least_recent() {
        let mut list = RecencyList::new();
        list.push_front("a");
        list.push_front("b");
        assert_eq!(list.pop_back(), Some("a"));
        assert_eq!(list.pop_back(), Some("b"));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_front_from_every_position() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c"); // order: c b a

        assert!(list.move_to_front(a)); // a c b
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["a", "c", "b"]);

        assert!(list.move_to_front(c)); // c a b
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["c", "a", "b"]);

        assert!(list.move_to_front(c)); // already at front
        assert_eq!(list.front(), Some(&"c"));
        assert_eq!(list.back(), Some(&"b"));
        assert!(list.contains(b));
        list.debug_validate_invariants();
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c"); // c b a

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["c", "a"]);

        assert_eq!(list.remove(c), Some("c"));
        assert_eq!(list.front(), Some(&"a"));
        assert_eq!(list.back(), Some(&"a"));

        assert_eq!(list.remove(a), Some("a"));
        assert!(list.is_empty());
        assert_eq!(list.remove(a), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_front_rejects_dead_handle() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        list.remove(a);
        assert!(!list.move_to_front(a));
    }

    #[test]
    fn get_mut_updates_value() {
        let mut list = RecencyList::new();
        let id = list.push_front(10);
        *list.get_mut(id).unwrap() = 20;
        assert_eq!(list.get(id), Some(&20));
    }

    #[test]
    fn clear_resets_state() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.back_id(), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn node_slots_are_recycled_after_removal() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        list.push_front(2);
        list.remove(a);
        let c = list.push_front(3);
        assert_eq!(a.index(), c.index());
        assert_eq!(list.len(), 2);
        list.debug_validate_invariants();
    }
}
