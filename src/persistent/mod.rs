//! Persistent (immutable) linear data structures.
//!
//! This module provides two immutable structures that use structural
//! sharing instead of copying:
//!
//! - [`PersistentStack`]: Persistent singly-linked LIFO stack
//! - [`PersistentQueue`]: Persistent FIFO queue made of two stacks
//!
//! # Structural Sharing
//!
//! Every operation returns a new version and leaves the receiver intact.
//! New versions reuse the nodes of the versions they came from, so keeping
//! old handles around is cheap.
//!
//! # Examples
//!
//! ## `PersistentStack`
//!
//! ```rust
//! use persistent_linear::persistent::PersistentStack;
//!
//! let stack = PersistentStack::new().push(1).push(2);
//! let (rest, top) = stack.pop();
//! assert_eq!(top, Some(2));
//! assert_eq!(rest.peek(), Some(&1));
//! assert_eq!(stack.peek(), Some(&2)); // Original unchanged
//! ```
//!
//! ## `PersistentQueue`
//!
//! ```rust
//! use persistent_linear::persistent::PersistentQueue;
//!
//! let queue = PersistentQueue::new().enqueue(1).enqueue(2);
//! let (rest, front) = queue.dequeue();
//! assert_eq!(front, Some(1));
//! assert_eq!(rest.peek(), Some(2));
//! assert_eq!(queue.peek(), Some(1)); // Original unchanged
//! ```
//!
//! # Sharing Across Threads
//!
//! Published versions are never written to, so reading them needs no
//! synchronization. With the `arc` feature the nodes are held by
//! [`std::sync::Arc`] and both structures are `Send + Sync` whenever their
//! elements are, which lets threads read and derive from one snapshot at
//! the same time.

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod queue;
mod stack;

pub use queue::PersistentQueue;
pub use stack::PersistentStack;

// =============================================================================
// Tests
// =============================================================================
