//! Mergeable heap structures for Rust
//!
//! The core of this crate is a [Fibonacci heap](fibonacci::FibonacciHeap)
//! with full `decrease_key` and handle-targeted `delete` support:
//!
//! - O(1) amortized insert, find-min, merge, and decrease-key
//! - O(log n) amortized remove-min and delete
//!
//! Around it sit a [priority queue façade](priority_queue::PriorityQueue)
//! that hides node handles behind a plain insert/top/pop surface, and a
//! [bidirectional map](bimap::BiMap) keeping two one-to-one mappings in
//! lockstep.
//!
//! Heap nodes live in a generational arena; handles stay valid across every
//! operation on other elements, and using a stale or foreign handle is a
//! reported error rather than undefined behavior.
//!
//! # Example
//!
//! ```rust
//! use mergeable_heaps::fibonacci::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.insert(5, "item1");
//! let _handle2 = heap.insert(3, "item2");
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.find_min(), Some((&1, &"item1")));
//! ```

pub mod bimap;
pub mod fibonacci;
pub mod priority_queue;
pub mod traits;

// Re-export the traits for convenience
pub use traits::{DecreaseKeyHeap, Heap};
