//! Behavioral tests for the Fibonacci heap and the priority queue façade
//!
//! These exercise the public surface end to end: ordering, handle-based
//! operations and their error paths, merge/union contracts, and façade
//! behavior.

use mergeable_heaps::fibonacci::FibonacciHeap;
use mergeable_heaps::priority_queue::PriorityQueue;
use mergeable_heaps::traits::HeapError;
use mergeable_heaps::{DecreaseKeyHeap, Heap};

#[test]
fn empty_heap_behavior() {
    let mut heap: FibonacciHeap<String, i32> = FibonacciHeap::new();
    assert!(heap.is_empty());
    assert_eq!(heap.len(), 0);
    assert_eq!(heap.find_min(), None);
    assert_eq!(heap.remove_min(), None);
}

#[test]
fn pops_ascending_with_duplicates() {
    let mut heap = FibonacciHeap::new();
    for &priority in &[4, 1, 4, 2, 2, 9, 0, 4] {
        heap.insert(priority, priority);
    }

    let mut popped = Vec::new();
    while let Some((priority, _)) = heap.remove_min() {
        popped.push(priority);
    }
    assert_eq!(popped, vec![0, 1, 2, 2, 4, 4, 4, 9]);
}

#[test]
fn remove_min_returns_what_find_min_reported() {
    let mut heap = FibonacciHeap::new();
    for i in [7, 2, 9, 4] {
        heap.insert(i, i * 10);
    }
    while !heap.is_empty() {
        let reported = heap.find_min().map(|(p, t)| (*p, *t));
        let len_before = heap.len();
        assert_eq!(heap.remove_min(), reported);
        assert_eq!(heap.len(), len_before - 1);
    }
}

#[test]
fn decrease_key_never_raises_reported_minimum() {
    let mut heap = FibonacciHeap::new();
    let mut handles = Vec::new();
    for i in 0..30 {
        handles.push(heap.insert(100 + i, i));
    }

    let mut reported_min = *heap.find_min().map(|(p, _)| p).unwrap();
    for (i, handle) in handles.iter().enumerate() {
        heap.decrease_key(handle, 50 - i as i32).unwrap();
        let now = *heap.find_min().map(|(p, _)| p).unwrap();
        assert!(now <= reported_min);
        reported_min = now;
    }
}

#[test]
fn decrease_key_error_leaves_heap_unchanged() {
    let mut heap = FibonacciHeap::new();
    let handle = heap.insert(10, "a");
    heap.insert(5, "b");

    assert_eq!(
        heap.decrease_key(&handle, 11),
        Err(HeapError::PriorityNotDecreased)
    );
    assert_eq!(heap.len(), 2);
    assert_eq!(heap.get(&handle), Some((&10, &"a")));
    assert_eq!(heap.find_min(), Some((&5, &"b")));
}

#[test]
fn delete_reduces_len_anywhere_in_structure() {
    let mut heap = FibonacciHeap::new();
    let mut handles = Vec::new();
    for i in 0..32 {
        handles.push(heap.insert(i, i));
    }
    // Consolidate so later deletes hit nodes buried inside trees.
    heap.remove_min();

    for (expected_len, idx) in [(30, 17), (29, 31), (28, 1)] {
        let (priority, item) = heap.delete(&handles[idx]).unwrap();
        assert_eq!(priority, idx as i32);
        assert_eq!(item, idx as i32);
        assert_eq!(heap.len(), expected_len);
    }

    // The deleted elements must not reappear.
    let mut remaining = Vec::new();
    while let Some((priority, _)) = heap.remove_min() {
        remaining.push(priority);
    }
    for gone in [0, 17, 31, 1] {
        assert!(!remaining.contains(&gone));
    }
    assert_eq!(remaining.len(), 28);
}

#[test]
fn delete_then_reuse_of_handle_fails() {
    let mut heap = FibonacciHeap::new();
    let handle = heap.insert(3, "x");
    heap.insert(1, "y");

    assert_eq!(heap.delete(&handle), Ok((3, "x")));
    assert_eq!(heap.delete(&handle), Err(HeapError::InvalidHandle));
    assert_eq!(heap.decrease_key(&handle, 0), Err(HeapError::InvalidHandle));
    assert_eq!(heap.len(), 1);
}

#[test]
fn handles_survive_operations_on_other_elements() {
    let mut heap = FibonacciHeap::new();
    let keep = heap.insert(50, "keep");
    for i in 0..20 {
        heap.insert(i, "filler");
    }
    for _ in 0..10 {
        heap.remove_min();
    }
    heap.insert(7, "late");

    assert_eq!(heap.get(&keep), Some((&50, &"keep")));
    heap.decrease_key(&keep, 0).unwrap();
    assert_eq!(heap.find_min(), Some((&0, &"keep")));
}

#[test]
fn merge_via_trait() {
    let mut heap1 = FibonacciHeap::new();
    heap1.push(5, "a");
    heap1.push(10, "b");

    let mut heap2 = FibonacciHeap::new();
    heap2.push(3, "c");
    heap2.push(7, "d");

    heap1.merge(heap2);
    assert_eq!(heap1.len(), 4);
    assert_eq!(heap1.peek(), Some((&3, &"c")));

    assert_eq!(heap1.pop(), Some((3, "c")));
    assert_eq!(heap1.pop(), Some((5, "a")));
    assert_eq!(heap1.pop(), Some((7, "d")));
    assert_eq!(heap1.pop(), Some((10, "b")));
    assert_eq!(heap1.pop(), None);
}

#[test]
fn union_size_and_minimum() {
    let mut first = FibonacciHeap::new();
    for i in [8, 4, 6] {
        first.insert(i, i);
    }
    let mut second = FibonacciHeap::new();
    for i in [5, 3, 9, 7] {
        second.insert(i, i);
    }

    let mut merged = FibonacciHeap::union(first, second);
    assert_eq!(merged.len(), 7);
    assert_eq!(merged.find_min(), Some((&3, &3)));

    let mut popped = Vec::new();
    while let Some((priority, _)) = merged.remove_min() {
        popped.push(priority);
    }
    assert_eq!(popped, vec![3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn push_with_handle_matches_insert() {
    let mut heap = FibonacciHeap::new();
    let handle = heap.push_with_handle(9, "nine");
    heap.decrease_key(&handle, 2).unwrap();
    assert_eq!(heap.peek(), Some((&2, &"nine")));
}

#[test]
fn queue_end_to_end_ordering() {
    let mut queue: PriorityQueue<i32, i32> = PriorityQueue::new();
    for priority in [5, 3, 8, 1, 4] {
        queue.insert(priority, priority);
    }

    let mut popped = Vec::new();
    while let Some(item) = queue.pop() {
        popped.push(item);
    }
    assert_eq!(popped, vec![1, 3, 4, 5, 8]);
}

#[test]
fn queue_empty_access_is_none() {
    let mut queue: PriorityQueue<&str, u8> = PriorityQueue::new();
    assert_eq!(queue.top(), None);
    assert_eq!(queue.pop(), None);
    queue.insert("x", 1);
    assert_eq!(queue.pop(), Some("x"));
    assert_eq!(queue.pop(), None);
}

#[test]
fn queue_distinguishes_item_from_priority() {
    let mut queue: PriorityQueue<&str, i32> = PriorityQueue::new();
    queue.insert("low urgency", 9);
    queue.insert("high urgency", 1);
    assert_eq!(queue.top(), Some(&"high urgency"));
    assert_eq!(queue.pop(), Some("high urgency"));
    assert_eq!(queue.pop(), Some("low urgency"));
}
