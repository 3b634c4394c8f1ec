//! # Ordered Sequence
//!
//! A doubly linked, index-addressable list. Nodes live in a slot arena (`Vec<Option<Node<T>>>`)
//! and refer to their neighbours by slot index, so successor and predecessor links are plain
//! numbers instead of owning pointers. Vacated slots are recycled through a free list.
//!
//! ## Invariants
//! - `size` equals the number of nodes reachable from `front`
//! - `front`/`back` are `None` iff `size == 0`
//! - for linked slots `a`, `b`: `a.next == Some(b)` iff `b.prev == Some(a)`
//!
//! Locating a node by index walks from whichever end is nearer, so interior access costs
//! at most `size / 2` hops.
use super::container_errors::ContainerError;
use std::fmt;

#[derive(Clone)]
struct Node<T> {
    data: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly linked ordered sequence of `T`
#[derive(Clone)]
pub struct OrderedSequence<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    front: Option<usize>,
    back: Option<usize>,
    size: usize,
}

impl<T> Default for OrderedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedSequence<T> {
    /// creates an empty sequence
    pub fn new() -> Self {
        OrderedSequence {
            slots: Vec::new(),
            free: Vec::new(),
            front: None,
            back: None,
            size: 0,
        }
    }

    /// number of elements in the sequence
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn node(&self, slot: usize) -> &Node<T> {
        match &self.slots[slot] {
            Some(node) => node,
            None => unreachable!("slot {} is linked but vacant", slot),
        }
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node<T> {
        match &mut self.slots[slot] {
            Some(node) => node,
            None => unreachable!("slot {} is linked but vacant", slot),
        }
    }

    fn allocate(&mut self, data: T, prev: Option<usize>, next: Option<usize>) -> usize {
        let node = Node { data, prev, next };
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, slot: usize) -> Node<T> {
        match self.slots[slot].take() {
            Some(node) => {
                self.free.push(slot);
                node
            }
            None => unreachable!("slot {} released twice", slot),
        }
    }

    /// slot holding the element at `index`; caller guarantees `index < size`
    fn find_slot(&self, index: usize) -> usize {
        let (mut slot, hops, forward) = if index > self.size / 2 {
            (self.back, self.size - index - 1, false)
        } else {
            (self.front, index, true)
        };
        for _ in 0..hops {
            let node = self.node(slot.unwrap_or_else(|| unreachable!("chain shorter than size")));
            slot = if forward { node.next } else { node.prev };
        }
        slot.unwrap_or_else(|| unreachable!("chain shorter than size"))
    }

    fn check_index(&self, index: usize) -> Result<(), ContainerError> {
        if index >= self.size {
            return Err(ContainerError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }
        Ok(())
    }

    /// appends `item` at the end
    pub fn add(&mut self, item: T) {
        match self.back {
            Some(old_back) => {
                let slot = self.allocate(item, Some(old_back), None);
                self.node_mut(old_back).next = Some(slot);
                self.back = Some(slot);
            }
            None => {
                let slot = self.allocate(item, None, None);
                self.front = Some(slot);
                self.back = Some(slot);
            }
        }
        self.size += 1;
    }

    /// inserts `item` so that it ends up at `index`, shifting later elements one position up.
    /// Valid for `0 <= index <= size`.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), ContainerError> {
        if index > self.size {
            return Err(ContainerError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }
        match (self.front, self.back) {
            (Some(front), Some(_)) if index == 0 => {
                let slot = self.allocate(item, None, Some(front));
                self.node_mut(front).prev = Some(slot);
                self.front = Some(slot);
                self.size += 1;
            }
            (Some(_), Some(_)) if index < self.size => {
                let at = self.find_slot(index);
                let prev = self.node(at).prev;
                let slot = self.allocate(item, prev, Some(at));
                if let Some(prev) = prev {
                    self.node_mut(prev).next = Some(slot);
                }
                self.node_mut(at).prev = Some(slot);
                self.size += 1;
            }
            // empty sequence or index == size
            _ => self.add(item),
        }
        Ok(())
    }

    /// removes and returns the element at `index`, shifting later elements one position down
    pub fn delete(&mut self, index: usize) -> Result<T, ContainerError> {
        self.check_index(index)?;
        let slot = self.find_slot(index);
        if self.size == 1 {
            let node = self.release(slot);
            self.clear();
            return Ok(node.data);
        }
        let Node { data, prev, next } = self.release(slot);
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.front = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.back = prev,
        }
        self.size -= 1;
        Ok(data)
    }

    /// removes and returns the last element
    pub fn remove(&mut self) -> Result<T, ContainerError> {
        if self.size == 0 {
            return Err(ContainerError::EmptyContainer);
        }
        self.delete(self.size - 1)
    }

    pub fn get(&self, index: usize) -> Result<&T, ContainerError> {
        self.check_index(index)?;
        Ok(&self.node(self.find_slot(index)).data)
    }

    /// replaces the element at `index` with a fresh node holding `item` and returns the old one
    pub fn set(&mut self, index: usize, item: T) -> Result<T, ContainerError> {
        self.check_index(index)?;
        let old = self.find_slot(index);
        let (prev, next) = {
            let node = self.node(old);
            (node.prev, node.next)
        };
        let slot = self.allocate(item, prev, next);
        match prev {
            Some(prev) => self.node_mut(prev).next = Some(slot),
            None => self.front = Some(slot),
        }
        match next {
            Some(next) => self.node_mut(next).prev = Some(slot),
            None => self.back = Some(slot),
        }
        Ok(self.release(old).data)
    }

    /// drops every node
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.front = None;
        self.back = None;
        self.size = 0;
    }

    pub fn front(&self) -> Option<&T> {
        self.front.map(|slot| &self.node(slot).data)
    }

    pub fn back(&self) -> Option<&T> {
        self.back.map(|slot| &self.node(slot).data)
    }

    /// front-to-back iterator; the borrow forbids structural mutation while it is alive
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            sequence: self,
            head: self.front,
            tail: self.back,
            remaining: self.size,
        }
    }
}

impl<T: PartialEq> OrderedSequence<T> {
    /// position of the first element equal to `item`, scanning from the front.
    /// `OrderedSequence<Option<U>>` gives the null-equals-null behaviour for free.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|current| current == item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }
}

/// Borrowing iterator over an [`OrderedSequence`]
pub struct Iter<'a, T> {
    sequence: &'a OrderedSequence<T>,
    head: Option<usize>,
    tail: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.sequence.node(self.head?);
        self.head = node.next;
        self.remaining -= 1;
        Some(&node.data)
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
        let node = self.sequence.node(self.tail?);
        self.tail = node.prev;
        self.remaining -= 1;
        Some(&node.data)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Owning iterator, unlinks from the front
pub struct IntoIter<T> {
    sequence: OrderedSequence<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.sequence.is_empty() {
            return None;
        }
        self.sequence.delete(0).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.sequence.size(), Some(self.sequence.size()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.sequence.remove().ok()
    }
}

impl<T> IntoIterator for OrderedSequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { sequence: self }
    }
}

impl<'a, T> IntoIterator for &'a OrderedSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for OrderedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sequence = OrderedSequence::new();
        sequence.extend(iter);
        sequence
    }
}

impl<T> Extend<T> for OrderedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

/// equality by content, independent of slot layout
impl<T: PartialEq> PartialEq for OrderedSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for OrderedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}
