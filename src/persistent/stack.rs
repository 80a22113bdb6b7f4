//! Persistent (immutable) singly-linked stack.
//!
//! This module provides [`PersistentStack`], an immutable LIFO stack
//! that shares every node below its top with the versions it was derived from.
//!
//! # Overview
//!
//! - O(1) `push` (one new node)
//! - O(1) `pop` (no new nodes, the remainder is shared)
//! - O(1) `peek`, `is_empty` and `len`
//!
//! Every operation takes `&self` and returns a new stack; the receiver is
//! never altered, so any handle kept around stays valid forever.
//!
//! # Examples
//!
//! ```rust
//! use persistent_linear::persistent::PersistentStack;
//!
//! let stack = PersistentStack::new().push(1).push(2).push(3);
//! assert_eq!(stack.peek(), Some(&3));
//!
//! let (rest, top) = stack.pop();
//! assert_eq!(top, Some(3));
//! assert_eq!(rest.peek(), Some(&2));
//!
//! // The original is preserved
//! assert_eq!(stack.len(), 3);
//! ```
//!
//! # Structural Sharing
//!
//! ```text
//! stack1: 2 -> 1 -> nil
//! stack2 = stack1.push(3): 3 -> [2 -> 1 -> nil]  // shares [2, 1] with stack1
//! (stack3, _) = stack2.pop():    [2 -> 1 -> nil]  // the very same nodes as stack1
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use super::ReferenceCounter;

/// A single link of the stack.
///
/// Nodes are never mutated after construction. Several stacks may point
/// at the same node, which lives as long as any of them does.
struct Node<T> {
    value: T,
    previous: Option<ReferenceCounter<Self>>,
}

/// A persistent (immutable) stack.
///
/// # Time Complexity
///
/// | Operation  | Complexity |
/// |------------|------------|
/// | `new`      | O(1)       |
/// | `push`     | O(1)       |
/// | `pop`      | O(1)       |
/// | `peek`     | O(1)       |
/// | `is_empty` | O(1)       |
/// | `len`      | O(1)       |
/// | `clone`    | O(1)       |
///
/// # Absent values
///
/// An empty stack reports absence through [`Option::None`], which lives
/// outside the element type's own value space. A stack of `Option<U>`
/// holding `None` therefore peeks as `Some(&None)`, never as `None`.
///
/// ```rust
/// use persistent_linear::persistent::PersistentStack;
///
/// let stack: PersistentStack<Option<i32>> = PersistentStack::new().push(None);
/// assert_eq!(stack.peek(), Some(&None));
/// assert_eq!(PersistentStack::<Option<i32>>::new().peek(), None);
/// ```
pub struct PersistentStack<T> {
    top: Option<ReferenceCounter<Node<T>>>,
    /// Cached length for O(1) access.
    length: usize,
}

impl<T> PersistentStack<T> {
    /// Creates a new empty stack.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_linear::persistent::PersistentStack;
    ///
    /// let stack: PersistentStack<i32> = PersistentStack::new();
    /// assert!(stack.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            top: None,
            length: 0,
        }
    }

    /// Creates a stack containing a single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_linear::persistent::PersistentStack;
    ///
    /// let stack = PersistentStack::singleton(42);
    /// assert_eq!(stack.peek(), Some(&42));
    /// assert_eq!(stack.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(value: T) -> Self {
        Self::new().push(value)
    }

    /// Returns a new stack with `value` on top.
    ///
    /// Exactly one node is allocated; everything below it is shared with
    /// `self`, which is left untouched.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_linear::persistent::PersistentStack;
    ///
    /// let empty = PersistentStack::new();
    /// let one = empty.push(1);
    /// assert!(empty.is_empty());
    /// assert_eq!(one.peek(), Some(&1));
    /// ```
    #[inline]
    #[must_use]
    pub fn push(&self, value: T) -> Self {
        Self {
            top: Some(ReferenceCounter::new(Node {
                value,
                previous: self.top.clone(),
            })),
            length: self.length + 1,
        }
    }

    /// Returns a reference to the top element, or `None` if the stack is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_linear::persistent::PersistentStack;
    ///
    /// let stack = PersistentStack::new().push(1).push(2);
    /// assert_eq!(stack.peek(), Some(&2));
    ///
    /// let empty: PersistentStack<i32> = PersistentStack::new();
    /// assert_eq!(empty.peek(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.top.as_ref().map(|node| &node.value)
    }

    /// Returns `true` if the stack contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Returns the number of elements in the stack.
    ///
    /// # Complexity
    ///
    /// O(1) - the length is cached
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if both stacks start at the very same node.
    ///
    /// Two empty stacks are considered identical. Unlike `==`, this does
    /// not compare elements: it tells whether the two handles alias one
    /// shared chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_linear::persistent::PersistentStack;
    ///
    /// let base = PersistentStack::new().push(1);
    /// let (back, _) = base.push(2).pop();
    /// assert!(back.ptr_eq(&base));
    ///
    /// let rebuilt = PersistentStack::new().push(1);
    /// assert_eq!(rebuilt, base);
    /// assert!(!rebuilt.ptr_eq(&base));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.top, &other.top) {
            (Some(left), Some(right)) => ReferenceCounter::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        }
    }

    /// Walks the elements from the top down.
    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        std::iter::successors(self.top.as_deref(), |node| node.previous.as_deref())
            .map(|node| &node.value)
    }
}

impl<T: Clone> PersistentStack<T> {
    /// Removes the top element.
    ///
    /// Returns the stack below the top together with the removed element.
    /// Popping an empty stack is not an error: it yields an empty stack and
    /// `None`.
    ///
    /// No node is allocated. The returned stack points at the node that
    /// was already below the top, so it shares its whole chain with `self`.
    /// The element is cloned out of the shared node.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_linear::persistent::PersistentStack;
    ///
    /// let stack = PersistentStack::new().push("hello");
    /// let (rest, value) = stack.pop();
    /// assert_eq!(value, Some("hello"));
    /// assert!(rest.is_empty());
    ///
    /// let (still_empty, nothing) = rest.pop();
    /// assert!(still_empty.is_empty());
    /// assert_eq!(nothing, None);
    /// ```
    #[must_use]
    pub fn pop(&self) -> (Self, Option<T>) {
        self.top.as_ref().map_or_else(
            || (Self::new(), None),
            |node| {
                let rest = Self {
                    top: node.previous.clone(),
                    length: self.length.saturating_sub(1),
                };
                (rest, Some(node.value.clone()))
            },
        )
    }
}

// =============================================================================
// Drop
// =============================================================================

impl<T> Drop for PersistentStack<T> {
    /// Releases uniquely owned nodes in a loop instead of recursively.
    ///
    /// Unlinking stops at the first node that is still referenced by
    /// another stack.
    fn drop(&mut self) {
        let mut current = self.top.take();
        while let Some(node) = current {
            current = match ReferenceCounter::try_unwrap(node) {
                Ok(mut node) => node.previous.take(),
                Err(_) => None,
            };
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for PersistentStack<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            top: self.top.clone(),
            length: self.length,
        }
    }
}

impl<T> Default for PersistentStack<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Pushes the elements in iteration order, so the last one ends up on top.
///
/// ```rust
/// use persistent_linear::persistent::PersistentStack;
///
/// let stack: PersistentStack<i32> = (1..=3).collect();
/// assert_eq!(stack.peek(), Some(&3));
/// ```
impl<T> FromIterator<T> for PersistentStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |stack, value| stack.push(value))
    }
}

impl<T: PartialEq> PartialEq for PersistentStack<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        // Shared chains are equal without looking at the elements.
        self.ptr_eq(other) || self.values().eq(other.values())
    }
}

impl<T: Eq> Eq for PersistentStack<T> {}

impl<T: Hash> Hash for PersistentStack<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for value in self.values() {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentStack<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.values()).finish()
    }
}

/// Formats the elements from the top down, e.g. `[3, 2, 1]`.
impl<T: fmt::Display> fmt::Display for PersistentStack<T> {
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
static_assertions::assert_not_impl_any!(PersistentStack<i32>: Send, Sync);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentStack<i32>: Send, Sync);
