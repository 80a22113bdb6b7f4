//! Persistent (immutable) FIFO queue built from two stacks.
//!
//! This module provides [`PersistentQueue`], the classic "banker's" queue:
//! new elements are pushed onto an *inbox* stack, and elements leave from
//! an *outbox* stack. When the outbox runs dry the inbox is reversed into
//! it in one go.
//!
//! The queue never touches list nodes itself; everything is expressed with
//! [`PersistentStack`] operations.
//!
//! # Amortization
//!
//! Each element is moved from the inbox to the outbox at most once, so a
//! sequence of operations that always continues from the *latest* returned
//! queue costs O(1) per operation on average.
//!
//! That bound belongs to a linear history of handles, not to a single
//! handle. Old handles are never updated, so calling [`dequeue`] or
//! [`peek`] repeatedly on the same stale handle redoes the O(k) transfer of
//! that handle's k inbox elements every time.
//!
//! ```rust
//! use persistent_linear::persistent::PersistentQueue;
//!
//! let queue: PersistentQueue<i32> = (1..=3).collect();
//!
//! // Linear history: the transfer happens once, on the first dequeue.
//! let (queue, first) = queue.dequeue();
//! let (queue, second) = queue.dequeue();
//! assert_eq!((first, second), (Some(1), Some(2)));
//! assert_eq!(queue.peek(), Some(3));
//! ```
//!
//! [`dequeue`]: PersistentQueue::dequeue
//! [`peek`]: PersistentQueue::peek

use std::fmt;
use std::hash::{Hash, Hasher};

use super::PersistentStack;

/// A persistent (immutable) FIFO queue.
///
/// The logical order is the outbox from its top down, followed by the
/// inbox from its bottom up. The queue is empty exactly when both stacks
/// are. Nothing forces the outbox to be non-empty while the inbox has
/// elements; the transfer is lazy.
///
/// # Time Complexity
///
/// | Operation  | Complexity                                   |
/// |------------|----------------------------------------------|
/// | `new`      | O(1)                                         |
/// | `enqueue`  | O(1)                                         |
/// | `dequeue`  | O(1) amortized over a linear history, O(k) worst |
/// | `peek`     | O(1) if the outbox is non-empty, O(k) otherwise |
/// | `is_empty` | O(1)                                         |
/// | `len`      | O(1)                                         |
///
/// where k is the number of elements in the inbox.
///
/// # Examples
///
/// ```rust
/// use persistent_linear::persistent::PersistentQueue;
///
/// let queue = PersistentQueue::new().enqueue(1).enqueue(2);
/// let (rest, front) = queue.dequeue();
/// assert_eq!(front, Some(1));
/// assert_eq!(rest.peek(), Some(2));
///
/// // The original is preserved
/// assert_eq!(queue.len(), 2);
/// assert_eq!(queue.peek(), Some(1));
/// ```
pub struct PersistentQueue<T> {
    /// Newest elements, most recent on top.
    inbox: PersistentStack<T>,
    /// Oldest elements, next to leave on top.
    outbox: PersistentStack<T>,
}

impl<T> PersistentQueue<T> {
    /// Creates a new empty queue.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_linear::persistent::PersistentQueue;
    ///
    /// let queue: PersistentQueue<i32> = PersistentQueue::new();
    /// assert!(queue.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inbox: PersistentStack::new(),
            outbox: PersistentStack::new(),
        }
    }

    /// Creates a queue containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(value: T) -> Self {
        Self::new().enqueue(value)
    }

    /// Returns a new queue with `value` at the back.
    ///
    /// Only the inbox grows; the outbox is shared as is and no transfer
    /// takes place.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_linear::persistent::PersistentQueue;
    ///
    /// let empty = PersistentQueue::new();
    /// let one = empty.enqueue(42);
    /// assert!(empty.is_empty());
    /// assert_eq!(one.peek(), Some(42));
    /// ```
    #[inline]
    #[must_use]
    pub fn enqueue(&self, value: T) -> Self {
        Self {
            inbox: self.inbox.push(value),
            outbox: self.outbox.clone(),
        }
    }

    /// Returns `true` if the queue contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inbox.is_empty() && self.outbox.is_empty()
    }

    /// Returns the number of elements in the queue.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.inbox.len() + self.outbox.len()
    }

    /// Walks the elements from front to back.
    fn values(&self) -> impl Iterator<Item = &T> {
        let mut newest_first: Vec<&T> = self.inbox.values().collect();
        newest_first.reverse();
        self.outbox.values().chain(newest_first)
    }
}

impl<T: Clone> PersistentQueue<T> {
    /// Removes the front element.
    ///
    /// Returns the queue without its front together with the removed
    /// element. Dequeuing an empty queue is not an error: it yields an
    /// empty queue and `None`.
    ///
    /// If the outbox is empty the inbox is first reversed into a fresh
    /// outbox. The returned queue keeps that balanced form, so the next
    /// dequeue on it pops straight from the outbox.
    ///
    /// # Complexity
    ///
    /// O(1) amortized along a linear history of handles, O(k) for a handle
    /// whose outbox is empty and whose inbox holds k elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_linear::persistent::PersistentQueue;
    ///
    /// let queue = PersistentQueue::new().enqueue("A").enqueue("B");
    ///
    /// let (queue, value) = queue.dequeue();
    /// assert_eq!(value, Some("A"));
    /// let (queue, value) = queue.dequeue();
    /// assert_eq!(value, Some("B"));
    /// let (queue, value) = queue.dequeue();
    /// assert_eq!(value, None);
    /// assert!(queue.is_empty());
    /// ```
    #[must_use]
    pub fn dequeue(&self) -> (Self, Option<T>) {
        let Self { inbox, outbox } = self.balance();
        match outbox.pop() {
            (_, None) => (Self::new(), None),
            (outbox, value) => (Self { inbox, outbox }, value),
        }
    }

    /// Returns a clone of the front element, or `None` if the queue is empty.
    ///
    /// The balanced form computed to find the front is thrown away, so
    /// `self` stays exactly as it was. Peeking a handle whose outbox is
    /// empty therefore pays for the transfer on every call.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_linear::persistent::PersistentQueue;
    ///
    /// let queue = PersistentQueue::new().enqueue(10).enqueue(20);
    /// assert_eq!(queue.peek(), Some(10));
    /// assert_eq!(queue.peek(), Some(10));
    /// assert_eq!(queue.len(), 2);
    /// ```
    #[must_use]
    pub fn peek(&self) -> Option<T> {
        self.balance().outbox.peek().cloned()
    }

    /// Moves the whole inbox into the outbox when the outbox is empty.
    ///
    /// Popping the inbox and pushing onto a fresh stack reverses the
    /// elements, so the oldest one ends up on top. A non-empty outbox is
    /// left alone.
    fn balance(&self) -> Self {
        if !self.outbox.is_empty() {
            return self.clone();
        }

        let mut inbox = self.inbox.clone();
        let mut outbox = PersistentStack::new();
        while let (rest, Some(value)) = inbox.pop() {
            outbox = outbox.push(value);
            inbox = rest;
        }

        Self {
            inbox: PersistentStack::new(),
            outbox,
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for PersistentQueue<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            inbox: self.inbox.clone(),
            outbox: self.outbox.clone(),
        }
    }
}

impl<T> Default for PersistentQueue<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Enqueues the elements in iteration order, so the first one is at the front.
impl<T> FromIterator<T> for PersistentQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inbox: iter.into_iter().collect(),
            outbox: PersistentStack::new(),
        }
    }
}

/// Queues are equal when they hold the same elements in the same order,
/// regardless of how those elements are split between inbox and outbox.
impl<T: PartialEq> PartialEq for PersistentQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.values().eq(other.values())
    }
}

impl<T: Eq> Eq for PersistentQueue<T> {}

impl<T: Hash> Hash for PersistentQueue<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self.values() {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentQueue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.values()).finish()
    }
}

/// Formats the elements from front to back, e.g. `[1, 2, 3]`.
impl<T: fmt::Display> fmt::Display for PersistentQueue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for value in self.values() {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{value}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Thread Safety
// =============================================================================

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentQueue<i32>: Send, Sync);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentQueue<i32>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    /// An element that counts how many times it has been cloned.
    #[derive(Debug)]
    struct Tracked {
        value: i32,
        clones: Rc<Cell<usize>>,
    }

    impl Clone for Tracked {
        fn clone(&self) -> Self {
            self.clones.set(self.clones.get() + 1);
            Self {
                value: self.value,
                clones: Rc::clone(&self.clones),
            }
        }
    }

    fn tracked_queue(size: i32, clones: &Rc<Cell<usize>>) -> PersistentQueue<Tracked> {
        (0..size)
            .map(|value| Tracked {
                value,
                clones: Rc::clone(clones),
            })
            .collect()
    }

    // =========================================================================
    // Inbox / Outbox Layout
    // =========================================================================

    #[rstest]
    fn test_enqueue_only_touches_inbox() {
        let queue = PersistentQueue::new().enqueue(1).enqueue(2);
        assert_eq!(queue.inbox.len(), 2);
        assert!(queue.outbox.is_empty());
        assert_eq!(queue.inbox.peek(), Some(&2));
    }

    #[rstest]
    fn test_enqueue_shares_outbox() {
        let (queue, _) = PersistentQueue::new().enqueue(1).enqueue(2).dequeue();
        let grown = queue.enqueue(3);
        assert!(grown.outbox.ptr_eq(&queue.outbox));
    }

    #[rstest]
    fn test_balance_reverses_inbox_into_outbox() {
        let queue: PersistentQueue<i32> = (1..=3).collect();
        let balanced = queue.balance();
        assert!(balanced.inbox.is_empty());
        assert_eq!(format!("{}", balanced.outbox), "[1, 2, 3]");
    }

    #[rstest]
    fn test_balance_is_noop_with_non_empty_outbox() {
        let (queue, _) = (1..=3).collect::<PersistentQueue<i32>>().dequeue();
        let queue = queue.enqueue(4);
        let balanced = queue.balance();
        assert!(balanced.outbox.ptr_eq(&queue.outbox));
        assert!(balanced.inbox.ptr_eq(&queue.inbox));
    }

    #[rstest]
    fn test_dequeue_keeps_balanced_form() {
        let queue: PersistentQueue<i32> = (1..=3).collect();
        let (after_first, _) = queue.dequeue();
        assert!(after_first.inbox.is_empty());
        assert_eq!(after_first.outbox.len(), 2);

        let (after_second, _) = after_first.dequeue();
        let (expected, _) = after_first.outbox.pop();
        assert!(after_second.outbox.ptr_eq(&expected));
    }

    #[rstest]
    fn test_peek_does_not_persist_balance() {
        let queue: PersistentQueue<i32> = (1..=3).collect();
        assert_eq!(queue.peek(), Some(1));
        assert_eq!(queue.inbox.len(), 3);
        assert!(queue.outbox.is_empty());
    }

    #[rstest]
    fn test_stale_handle_rebuilds_outbox_each_time() {
        let queue: PersistentQueue<i32> = (1..=3).collect();
        let (first, _) = queue.dequeue();
        let (second, _) = queue.dequeue();
        assert_eq!(first, second);
        assert!(!first.outbox.ptr_eq(&second.outbox));
    }

    // =========================================================================
    // Amortization
    // =========================================================================

    #[rstest]
    fn test_linear_history_moves_each_element_once() {
        let clones = Rc::new(Cell::new(0));
        let mut queue = tracked_queue(100, &clones);

        let mut dequeued = Vec::new();
        while let (next, Some(element)) = queue.dequeue() {
            dequeued.push(element.value);
            queue = next;
        }

        assert_eq!(dequeued, (0..100).collect::<Vec<_>>());
        // One clone when moved into the outbox, one when handed out.
        assert_eq!(clones.get(), 200);
    }

    #[rstest]
    fn test_stale_handle_repeats_transfer() {
        let clones = Rc::new(Cell::new(0));
        let queue = tracked_queue(100, &clones);

        for _ in 0..5 {
            let (_, element) = queue.dequeue();
            assert_eq!(element.map(|element| element.value), Some(0));
        }

        assert_eq!(clones.get(), 5 * (100 + 1));
    }

    #[rstest]
    fn test_repeated_peek_repeats_transfer() {
        let clones = Rc::new(Cell::new(0));
        let queue = tracked_queue(10, &clones);

        for _ in 0..3 {
            assert_eq!(queue.peek().map(|element| element.value), Some(0));
        }

        assert_eq!(clones.get(), 3 * (10 + 1));
    }

    #[rstest]
    fn test_peek_on_balanced_handle_is_constant() {
        let clones = Rc::new(Cell::new(0));
        let (queue, _) = tracked_queue(10, &clones).dequeue();
        clones.set(0);

        for _ in 0..3 {
            assert_eq!(queue.peek().map(|element| element.value), Some(1));
        }

        assert_eq!(clones.get(), 3);
    }

    // =========================================================================
    // Display / Equality
    // =========================================================================

    #[rstest]
    fn test_display_lists_front_first_across_both_stacks() {
        let (queue, _) = (1..=3).collect::<PersistentQueue<i32>>().dequeue();
        let queue = queue.enqueue(4).enqueue(5);
        assert_eq!(format!("{queue}"), "[2, 3, 4, 5]");
        assert_eq!(format!("{queue:?}"), "[2, 3, 4, 5]");
    }

    #[rstest]
    fn test_eq_ignores_inbox_outbox_split() {
        let (balanced, _) = (0..=3).collect::<PersistentQueue<i32>>().dequeue();
        let unbalanced: PersistentQueue<i32> = (1..=3).collect();
        assert!(balanced.inbox.is_empty());
        assert!(unbalanced.outbox.is_empty());
        assert_eq!(balanced, unbalanced);
    }

    #[rstest]
    fn test_drop_long_queue_does_not_overflow() {
        let queue: PersistentQueue<u32> = (0..200_000).collect();
        let (balanced, front) = queue.dequeue();
        assert_eq!(front, Some(0));
        drop(queue);
        drop(balanced);
    }
}
