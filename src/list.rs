//! Arena-backed doubly linked lists with generation-checked handles.
//!
//! Every frequency bucket of the LFU cache is a [`List`] threaded through one
//! shared [`Arena`]. A list only stores its head, tail and length; the links
//! live in the arena nodes. Moving an entry between buckets is therefore an
//! unlink from one list and a `push_front` onto another, with no allocation
//! and no change to the entry's [`Handle`].
//!
//! ```text
//! Arena slots:   [0: a]  [1: b]  [2: c]  [3: free]  [4: d]
//!
//! List(freq=1):  head ─▶ d ◀─▶ b ◀─ tail
//! List(freq=3):  head ─▶ a ◀─▶ c ◀─ tail
//! ```
//!
//! A handle is an `(index, generation)` pair. Freeing a slot bumps its
//! generation, so a handle that outlived its entry never resolves to whatever
//! entry later reuses the slot.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};

/// Stable reference to a node stored in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Handle {
    index: usize,
    generation: u32,
}

/// A node in a linked list: the stored value and its neighbours.
struct Node<T> {
    value: T,
    prev: Option<Handle>,
    next: Option<Handle>,
}

struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// Slot storage shared by any number of [`List`]s.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> Arena<T> {
    /// Creates an arena with room for `capacity` nodes before reallocating.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live nodes.
    #[cfg(any(test, debug_assertions))]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Stores `value` in a detached node and returns its handle.
    ///
    /// Freed slots are reused before the arena grows.
    pub(crate) fn insert(&mut self, value: T) -> Handle {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        };
        self.len += 1;
        Handle {
            index,
            generation: self.slots[index].generation,
        }
    }

    /// Frees the node behind `handle` and returns its value.
    ///
    /// The node must already be unlinked from its list. Returns `None` for a
    /// stale handle.
    pub(crate) fn remove(&mut self, handle: Handle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        let node = slot.node.take()?;
        debug_assert!(
            node.prev.is_none() && node.next.is_none(),
            "removed a node that is still linked"
        );
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(node.value)
    }

    /// Returns the value behind `handle`, or `None` if the handle is stale.
    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> Option<&T> {
        self.node(handle).map(|node| &node.value)
    }

    /// Returns the value behind `handle` mutably, or `None` if the handle is stale.
    #[cfg(test)]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.node_mut(handle).map(|node| &mut node.value)
    }

    /// Drops every node. Outstanding handles become stale; slot memory is kept.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
        self.len = 0;
    }

    #[inline]
    fn node(&self, handle: Handle) -> Option<&Node<T>> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> Option<&mut Node<T>> {
        self.slots
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    #[track_caller]
    fn live(&self, handle: Handle) -> &Node<T> {
        match self.node(handle) {
            Some(node) => node,
            None => panic!("stale arena handle {:?}", handle),
        }
    }

    #[track_caller]
    fn live_mut(&mut self, handle: Handle) -> &mut Node<T> {
        match self.node_mut(handle) {
            Some(node) => node,
            None => panic!("stale arena handle {:?}", handle),
        }
    }
}

/// Panics if `handle` is stale, like indexing a slice out of bounds.
impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, handle: Handle) -> &T {
        &self.live(handle).value
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    #[track_caller]
    fn index_mut(&mut self, handle: Handle) -> &mut T {
        &mut self.live_mut(handle).value
    }
}

impl<T> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .finish()
    }
}

/// A doubly linked list whose nodes live in an [`Arena`].
///
/// The front is the most recently linked node; the back is the oldest.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct List {
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl List {
    /// Number of nodes in the list.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no nodes.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the most recently linked node.
    #[cfg(test)]
    pub(crate) fn front(&self) -> Option<Handle> {
        self.head
    }

    /// Handle of the least recently linked node.
    #[inline]
    pub(crate) fn back(&self) -> Option<Handle> {
        self.tail
    }

    /// Links a detached node at the front of the list.
    pub(crate) fn push_front<T>(&mut self, arena: &mut Arena<T>, handle: Handle) {
        let old_head = self.head;
        {
            let node = arena.live_mut(handle);
            debug_assert!(
                node.prev.is_none() && node.next.is_none(),
                "pushed a node that is already linked"
            );
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head) => arena.live_mut(head).prev = Some(handle),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
        self.len += 1;
    }

    /// Unlinks `handle`, which must belong to this list, leaving it detached in
    /// the arena.
    pub(crate) fn unlink<T>(&mut self, arena: &mut Arena<T>, handle: Handle) {
        let (prev, next) = {
            let node = arena.live_mut(handle);
            (node.prev.take(), node.next.take())
        };
        match prev {
            Some(prev) => arena.live_mut(prev).next = next,
            None => {
                debug_assert_eq!(self.head, Some(handle), "node is not in this list");
                self.head = next;
            }
        }
        match next {
            Some(next) => arena.live_mut(next).prev = prev,
            None => {
                debug_assert_eq!(self.tail, Some(handle), "node is not in this list");
                self.tail = prev;
            }
        }
        self.len -= 1;
    }

    /// Iterates the list from front to back.
    #[cfg(any(test, debug_assertions))]
    pub(crate) fn iter<'a, T>(&self, arena: &'a Arena<T>) -> Iter<'a, T> {
        Iter {
            arena,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Checks that the links agree in both directions and match `len`.
    #[cfg(any(test, debug_assertions))]
    pub(crate) fn debug_validate<T>(&self, arena: &Arena<T>) {
        let mut prev = None;
        let mut current = self.head;
        let mut count = 0usize;
        while let Some(handle) = current {
            let node = arena.live(handle);
            assert_eq!(node.prev, prev, "broken back link");
            prev = Some(handle);
            current = node.next;
            count += 1;
            assert!(count <= self.len, "list is longer than its length");
        }
        assert_eq!(self.tail, prev, "tail does not match last node");
        assert_eq!(count, self.len, "list length mismatch");
    }
}

/// Front-to-back iterator over a [`List`], yielding handles and values.
#[cfg(any(test, debug_assertions))]
pub(crate) struct Iter<'a, T> {
    arena: &'a Arena<T>,
    next: Option<Handle>,
    remaining: usize,
}

#[cfg(any(test, debug_assertions))]
impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next?;
        let node = self.arena.node(handle)?;
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((handle, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
