//! # persistent-linear
//!
//! Immutable (persistent) linear data structures for Rust.
//!
//! ## Overview
//!
//! - **`PersistentStack`**: a singly-linked stack with O(1) push, pop and peek
//! - **`PersistentQueue`**: a two-stack FIFO queue with amortized O(1)
//!   enqueue and dequeue
//!
//! Every operation returns a new handle and leaves the old one valid and
//! unchanged. Versions share their common nodes instead of copying them.
//! Popping or dequeuing an empty structure is not an error; the missing
//! element is reported as `None`.
//!
//! ## Feature Flags
//!
//! - `arc`: Use `Arc` instead of `Rc` for the shared nodes, making the
//!   structures `Send + Sync`
//!
//! ## Example
//!
//! ```rust
//! use persistent_linear::prelude::*;
//!
//! let queue = PersistentQueue::new().enqueue("first").enqueue("second");
//! let (rest, front) = queue.dequeue();
//! assert_eq!(front, Some("first"));
//! assert_eq!(rest.len(), 1);
//! assert_eq!(queue.len(), 2);
//!
//! let stack: PersistentStack<i32> = (1..=3).collect();
//! assert_eq!(stack.peek(), Some(&3));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use persistent_linear::prelude::*;
/// ```
pub mod prelude {
    pub use crate::persistent::*;
}

pub mod persistent;
