//! Common traits for the heap structures in this crate
//!
//! Two tiers, following the split between plain priority-queue use and
//! handle-based use:
//!
//! - [`Heap`]: base trait for heaps used purely through push/peek/pop
//! - [`DecreaseKeyHeap`]: extension adding handle-returning insertion,
//!   `decrease_key`, and handle-targeted `delete`
//!
//! The base [`Heap`] trait mirrors the familiar `BinaryHeap`-style API
//! (min-heap variant), while [`DecreaseKeyHeap`] adds the operations needed
//! by algorithms such as Dijkstra's shortest path that update priorities of
//! elements already in the heap.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The new priority is greater than the current priority
    PriorityNotDecreased,
    /// The handle belongs to another heap or its element was already removed
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::PriorityNotDecreased => {
                write!(f, "new priority is greater than current priority")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle does not refer to a live element of this heap")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in a heap, used for `decrease_key` and `delete`
///
/// Opaque to callers; obtained at insertion time and passed back to the heap
/// that issued it. A handle never dangles in the unsafe sense: using one
/// after its element was removed, or against a different heap, is reported
/// as [`HeapError::InvalidHandle`].
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for min-heap priority queues
///
/// Stores `(priority, item)` pairs so the ordering key stays separate from
/// the payload. For handle-based operations see [`DecreaseKeyHeap`].
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::Heap;
/// use mergeable_heaps::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    ///
    /// # Time Complexity
    /// O(1) amortized for the heaps in this crate.
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    ///
    /// Returns `None` on an empty heap.
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    ///
    /// Returns `None` on an empty heap.
    ///
    /// # Time Complexity
    /// O(log n) amortized.
    fn pop(&mut self) -> Option<(P, T)>;

    /// Merges another heap into this one, consuming the other heap
    ///
    /// Handles issued by `self` remain valid; handles issued by `other` are
    /// invalidated.
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with `decrease_key` and handle-targeted `delete`
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::{DecreaseKeyHeap, Heap};
/// use mergeable_heaps::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// The handle type for this heap
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    ///
    /// The handle can be passed to `decrease_key` or `delete` later.
    ///
    /// # Time Complexity
    /// O(1) amortized.
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Decreases the priority of the element identified by the handle
    ///
    /// An equal priority is accepted; the operation only forbids raising one.
    ///
    /// # Errors
    /// [`HeapError::PriorityNotDecreased`] if the new priority is greater
    /// than the current one; [`HeapError::InvalidHandle`] if the handle does
    /// not refer to a live element of this heap. Nothing is mutated on
    /// either error path.
    ///
    /// # Time Complexity
    /// O(1) amortized.
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;

    /// Removes the element identified by the handle, wherever it sits in the
    /// structure, returning its priority and item
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if the handle does not refer to a live
    /// element of this heap.
    ///
    /// # Time Complexity
    /// O(log n) amortized.
    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError>;
}
