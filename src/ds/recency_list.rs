//! Sentinel-bounded doubly linked list backed by [`SlotArena`].
//!
//! Entries are linked by [`SlotId`] rather than by reference. Two slots are
//! reserved at construction for the `HEAD` and `TAIL` sentinels; they carry no
//! payload, are never freed, and let every live node have both a predecessor
//! and a successor, so linking and unlinking never branch on the empty or
//! single-element cases.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬──────────────────────────────────────────────┐
//!   │ SlotId │ Node { prev, next, value }                   │
//!   ├────────┼──────────────────────────────────────────────┤
//!   │ 0 HEAD │ { prev: HEAD, next: id_2, value: None }      │
//!   │ 1 TAIL │ { prev: id_3, next: TAIL, value: None }      │
//!   │ id_2   │ { prev: HEAD, next: id_3, value: Some(A) }   │
//!   │ id_3   │ { prev: id_2, next: TAIL, value: Some(B) }   │
//!   └────────┴──────────────────────────────────────────────┘
//!
//!   HEAD ─► [A] ◄──► [B] ◄── TAIL
//!           MRU       LRU
//! ```
//!
//! ## Operations
//! - `push_front(value)`: allocate + link after `HEAD`
//! - `move_to_front(id)`: detach + link after `HEAD`
//! - `pop_back()`: detach the node before `TAIL` + free its slot
//! - `remove(id)`: detach + free slot
//!
//! All of the above are O(1); iteration is O(n) in either direction.

use std::iter::FusedIterator;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Handle of the front sentinel. `HEAD.next` is the most recently used entry.
pub(crate) const HEAD: SlotId = SlotId(0);
/// Handle of the back sentinel. `TAIL.prev` is the least recently used entry.
pub(crate) const TAIL: SlotId = SlotId(1);

const SENTINELS: usize = 2;

#[derive(Debug)]
struct Node<T> {
    prev: SlotId,
    next: SlotId,
    value: Option<T>,
}

/// Recency-ordered list with stable [`SlotId`] handles.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list: the two sentinels linked directly to each other.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with storage reserved for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut arena = SlotArena::with_capacity(capacity.saturating_add(SENTINELS));
        Self::install_sentinels(&mut arena);
        Self { arena }
    }

    fn install_sentinels(arena: &mut SlotArena<Node<T>>) {
        let head = arena.insert(Node {
            prev: HEAD,
            next: TAIL,
            value: None,
        });
        let tail = arena.insert(Node {
            prev: HEAD,
            next: TAIL,
            value: None,
        });
        debug_assert_eq!((head, tail), (HEAD, TAIL));
    }

    /// Number of live entries (sentinels excluded).
    pub fn len(&self) -> usize {
        self.arena.len() - SENTINELS
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `id` refers to a live entry of this list.
    pub fn contains(&self, id: SlotId) -> bool {
        !is_sentinel(id) && self.arena.contains(id)
    }

    /// Handle of the most recently used entry.
    pub fn front_id(&self) -> Option<SlotId> {
        let id = self.arena.get(HEAD)?.next;
        (id != TAIL).then_some(id)
    }

    /// Handle of the least recently used entry.
    pub fn back_id(&self) -> Option<SlotId> {
        let id = self.arena.get(TAIL)?.prev;
        (id != HEAD).then_some(id)
    }

    pub fn front(&self) -> Option<&T> {
        self.front_id().and_then(|id| self.get(id))
    }

    pub fn back(&self) -> Option<&T> {
        self.back_id().and_then(|id| self.get(id))
    }

    /// Returns the payload for `id`. Sentinel handles have none.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id)?.value.as_ref()
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id)?.value.as_mut()
    }

    /// Stores `value` as the new front entry and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            prev: HEAD,
            next: TAIL,
            value: Some(value),
        });
        self.insert_front(id);
        id
    }

    /// Relinks an existing entry right after `HEAD`; `false` if `id` is not live.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.front_id() == Some(id) {
            return true;
        }
        self.detach(id);
        self.insert_front(id);
        true
    }

    /// Unlinks the entry before `TAIL`, frees its slot and returns its value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.back_id()?;
        self.remove(id)
    }

    /// Unlinks `id`, frees its slot and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        self.detach(id);
        self.arena.remove(id)?.value
    }

    /// Drops every entry and relinks the sentinels to each other.
    pub fn clear(&mut self) {
        self.arena.clear();
        Self::install_sentinels(&mut self.arena);
    }

    /// Iterates `(SlotId, &T)` from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            front: self.arena.get(HEAD).map_or(TAIL, |node| node.next),
            back: self.arena.get(TAIL).map_or(HEAD, |node| node.prev),
            remaining: self.len(),
        }
    }

    // Neighbors are relinked to each other; the detached node keeps stale
    // links until `insert_front` overwrites them.
    fn detach(&mut self, id: SlotId) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        let (prev, next) = (node.prev, node.next);
        if let Some(prev_node) = self.arena.get_mut(prev) {
            prev_node.next = next;
        }
        if let Some(next_node) = self.arena.get_mut(next) {
            next_node.prev = prev;
        }
    }

    fn insert_front(&mut self, id: SlotId) {
        let Some(first) = self.arena.get(HEAD).map(|head| head.next) else {
            return;
        };
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = HEAD;
            node.next = first;
        }
        if let Some(first_node) = self.arena.get_mut(first) {
            first_node.prev = id;
        }
        if let Some(head) = self.arena.get_mut(HEAD) {
            head.next = id;
        }
    }

    /// Walks the chain from `HEAD` to `TAIL` and verifies link symmetry,
    /// sentinel layout and that every live slot is reachable exactly once.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let head = self
            .arena
            .get(HEAD)
            .ok_or_else(|| InvariantError::new("head sentinel slot is vacant"))?;
        let tail = self
            .arena
            .get(TAIL)
            .ok_or_else(|| InvariantError::new("tail sentinel slot is vacant"))?;
        if head.value.is_some() || tail.value.is_some() {
            return Err(InvariantError::new("sentinel carries a payload"));
        }
        if head.prev != HEAD || tail.next != TAIL {
            return Err(InvariantError::new("sentinel points outside the chain"));
        }

        let mut count = 0usize;
        let mut prev = HEAD;
        let mut current = head.next;
        while current != TAIL {
            if is_sentinel(current) {
                return Err(InvariantError::new(format!(
                    "head sentinel reached again after {} entries",
                    count
                )));
            }
            let node = self.arena.get(current).ok_or_else(|| {
                InvariantError::new(format!("chain references vacant slot {}", current.index()))
            })?;
            if node.value.is_none() {
                return Err(InvariantError::new(format!(
                    "slot {} is linked but holds no payload",
                    current.index()
                )));
            }
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {} back-link points to {}, expected {}",
                    current.index(),
                    node.prev.index(),
                    prev.index()
                )));
            }
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
            prev = current;
            current = node.next;
        }

        if tail.prev != prev {
            return Err(InvariantError::new(format!(
                "tail back-link points to {}, expected {}",
                tail.prev.index(),
                prev.index()
            )));
        }
        if count != self.len() {
            return Err(InvariantError::new(format!(
                "chain has {} entries but arena holds {}",
                count,
                self.len()
            )));
        }
        Ok(())
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn is_sentinel(id: SlotId) -> bool {
    id == HEAD || id == TAIL
}

/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, T> {
    arena: &'a SlotArena<Node<T>>,
    front: SlotId,
    back: SlotId,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front;
        let node = self.arena.get(id)?;
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref().map(|value| (id, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back;
        let node = self.arena.get(id)?;
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_ref().map(|value| (id, value))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
