//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert, decrease_key, and merge
//! - O(log n) amortized remove_min and delete
//!
//! The structure is a collection of heap-ordered trees. Roots are linked in
//! a circular doubly linked list, and each node's children form another such
//! ring. The heap keeps a pointer to the minimum root.
//!
//! Nodes live in a generational arena ([`slotmap::SlotMap`]); every link in
//! the pointer web (parent, child, left, right) is a non-owning arena key.
//! This keeps the whole implementation in safe code, and makes stale handles
//! detectable instead of undefined behavior: removal frees a slot, and the
//! key generation changes if the slot is ever reused.

use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError};

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::{smallvec, SmallVec};
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

new_key_type! {
    /// Arena key for heap nodes.
    struct NodeKey;
}

/// Source of process-unique heap identities, used to tie handles to the heap
/// that issued them.
static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

// 1 / ln(phi), phi = (1 + sqrt(5)) / 2
const ONE_OVER_LOG_PHI: f64 = 2.078_086_921_235_027_3;

/// Handle to an element in a Fibonacci heap
///
/// Tied to the heap instance that issued it: `decrease_key` and `delete`
/// reject handles from other heaps, and handles whose element was already
/// removed, with [`HeapError::InvalidHandle`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    node: NodeKey,
    heap: u64,
}

impl Handle for FibonacciHandle {}

struct Node<T, P> {
    item: T,
    priority: P,
    parent: Option<NodeKey>,
    child: Option<NodeKey>,
    left: NodeKey,
    right: NodeKey,
    degree: usize,
    marked: bool,
}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5, "item");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.find_min(), Some((&1, &"item")));
/// ```
pub struct FibonacciHeap<T, P: Ord> {
    nodes: SlotMap<NodeKey, Node<T, P>>,
    min: Option<NodeKey>,
    id: u64,
}

impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            min: None,
            id: NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Returns true if the heap contains no elements
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Removes every element, keeping the heap usable
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.min = None;
    }

    /// Inserts an element with the given priority, returning a handle for
    /// later `decrease_key`/`delete` calls
    ///
    /// O(1): the new node is spliced into the root ring next to the minimum.
    pub fn insert(&mut self, priority: P, item: T) -> FibonacciHandle {
        let node = self.nodes.insert_with_key(|key| Node {
            item,
            priority,
            parent: None,
            child: None,
            left: key,
            right: key,
            degree: 0,
            marked: false,
        });

        match self.min {
            Some(min) => {
                let min_left = self.nodes[min].left;
                self.nodes[node].right = min;
                self.nodes[node].left = min_left;
                self.nodes[min_left].right = node;
                self.nodes[min].left = node;

                if self.nodes[node].priority < self.nodes[min].priority {
                    self.min = Some(node);
                }
            }
            None => self.min = Some(node),
        }

        FibonacciHandle {
            node,
            heap: self.id,
        }
    }

    /// Returns the minimum priority and associated item without removing it
    ///
    /// O(1). Returns `None` on an empty heap.
    pub fn find_min(&self) -> Option<(&P, &T)> {
        self.min.map(|min| {
            let node = &self.nodes[min];
            (&node.priority, &node.item)
        })
    }

    /// Reads the priority and item behind a handle
    ///
    /// Returns `None` if the handle is stale or belongs to another heap.
    pub fn get(&self, handle: &FibonacciHandle) -> Option<(&P, &T)> {
        if handle.heap != self.id {
            return None;
        }
        self.nodes
            .get(handle.node)
            .map(|node| (&node.priority, &node.item))
    }

    /// Removes and returns the minimum priority and associated item
    ///
    /// O(log n) amortized: the minimum's children are promoted into the root
    /// ring and the roots are consolidated. Returns `None` on an empty heap.
    pub fn remove_min(&mut self) -> Option<(P, T)> {
        let min = self.min?;

        // Promote the children of the outgoing minimum into the root ring.
        // The child ring is captured first; splicing rewires it.
        if let Some(child) = self.nodes[min].child {
            let mut children: SmallVec<[NodeKey; 8]> = SmallVec::new();
            let mut current = child;
            loop {
                children.push(current);
                current = self.nodes[current].right;
                if current == child {
                    break;
                }
            }
            for key in children {
                self.nodes[key].parent = None;
                self.nodes[key].marked = false;

                let min_left = self.nodes[min].left;
                self.nodes[key].right = min;
                self.nodes[key].left = min_left;
                self.nodes[min_left].right = key;
                self.nodes[min].left = key;
            }
            self.nodes[min].child = None;
        }

        let left = self.nodes[min].left;
        let right = self.nodes[min].right;

        if right == min {
            // The minimum was the only root and had no children.
            self.min = None;
        } else {
            self.nodes[left].right = right;
            self.nodes[right].left = left;
            self.min = Some(right);
            self.consolidate();
        }

        let node = self.nodes.remove(min)?;
        Some((node.priority, node.item))
    }

    /// Decreases the priority of the element identified by the handle
    ///
    /// O(1) amortized. An equal priority is accepted; a greater one is
    /// rejected with [`HeapError::PriorityNotDecreased`] before any
    /// mutation. If the new priority undercuts the parent's, the node is cut
    /// into the root ring and a cascading cut runs from the former parent.
    pub fn decrease_key(
        &mut self,
        handle: &FibonacciHandle,
        new_priority: P,
    ) -> Result<(), HeapError> {
        let node = self.resolve(handle)?;
        if new_priority > self.nodes[node].priority {
            return Err(HeapError::PriorityNotDecreased);
        }
        self.nodes[node].priority = new_priority;

        if let Some(parent) = self.nodes[node].parent {
            if self.nodes[node].priority < self.nodes[parent].priority {
                self.cut(node, parent);
                self.cascading_cut(parent);
            }
        }

        if let Some(min) = self.min {
            if self.nodes[node].priority < self.nodes[min].priority {
                self.min = Some(node);
            }
        }
        Ok(())
    }

    /// Removes the element identified by the handle, wherever it sits in the
    /// structure, returning its priority and item
    ///
    /// O(log n) amortized. The node is cut into the root ring and promoted
    /// to the minimum position regardless of its key, then removed through
    /// the extract-min machinery; no absolute-minimum sentinel is involved.
    pub fn delete(&mut self, handle: &FibonacciHandle) -> Result<(P, T), HeapError> {
        let node = self.resolve(handle)?;
        if let Some(parent) = self.nodes[node].parent {
            self.cut(node, parent);
            self.cascading_cut(parent);
        }
        self.min = Some(node);
        self.remove_min().ok_or(HeapError::InvalidHandle)
    }

    /// Joins two heaps, consuming both
    ///
    /// The result keeps `first`'s identity: handles issued by `first` remain
    /// valid against it, handles issued by `second` are invalidated. The
    /// root rings are spliced in O(1); unifying the two arenas moves
    /// `second`'s nodes, costing O(len(second)).
    ///
    /// # Example
    ///
    /// ```rust
    /// use mergeable_heaps::fibonacci::FibonacciHeap;
    ///
    /// let mut first = FibonacciHeap::new();
    /// first.insert(3, "x");
    /// let mut second = FibonacciHeap::new();
    /// second.insert(1, "y");
    ///
    /// let merged = FibonacciHeap::union(first, second);
    /// assert_eq!(merged.len(), 2);
    /// assert_eq!(merged.find_min(), Some((&1, &"y")));
    /// ```
    pub fn union(first: Self, second: Self) -> Self {
        let mut merged = first;
        merged.absorb(second);
        merged
    }

    /// Merges `other` into `self`. See [`FibonacciHeap::union`] for the
    /// handle contract.
    fn absorb(&mut self, other: Self) {
        if other.nodes.is_empty() {
            return;
        }
        if self.nodes.is_empty() {
            // Adopt the other arena wholesale; keys stay stable but the heap
            // identity does not travel, so the other heap's handles die.
            self.nodes = other.nodes;
            self.min = other.min;
            return;
        }

        let other_min = match other.min {
            Some(min) => min,
            None => return,
        };

        // Move the other arena's nodes into ours and rewrite every link
        // through the old-key -> new-key table.
        let mut other_nodes = other.nodes;
        let mut remap: FxHashMap<NodeKey, NodeKey> = FxHashMap::default();
        for (old, node) in other_nodes.drain() {
            remap.insert(old, self.nodes.insert(node));
        }
        for &new in remap.values() {
            let node = &mut self.nodes[new];
            node.left = remap[&node.left];
            node.right = remap[&node.right];
            node.parent = node.parent.map(|p| remap[&p]);
            node.child = node.child.map(|c| remap[&c]);
        }

        // Splice the two root rings and keep the smaller minimum.
        let ours = match self.min {
            Some(min) => min,
            None => return,
        };
        let theirs = remap[&other_min];
        let ours_left = self.nodes[ours].left;
        let theirs_left = self.nodes[theirs].left;
        self.nodes[ours_left].right = theirs;
        self.nodes[theirs].left = ours_left;
        self.nodes[theirs_left].right = ours;
        self.nodes[ours].left = theirs_left;

        if self.nodes[theirs].priority < self.nodes[ours].priority {
            self.min = Some(theirs);
        }
    }

    /// Checks that a handle was issued by this heap and still refers to a
    /// live node.
    fn resolve(&self, handle: &FibonacciHandle) -> Result<NodeKey, HeapError> {
        if handle.heap == self.id && self.nodes.contains_key(handle.node) {
            Ok(handle.node)
        } else {
            Err(HeapError::InvalidHandle)
        }
    }

    /// Splices a node into the root ring next to the minimum.
    fn splice_root(&mut self, node: NodeKey) {
        match self.min {
            Some(min) => {
                let min_left = self.nodes[min].left;
                self.nodes[node].right = min;
                self.nodes[node].left = min_left;
                self.nodes[min_left].right = node;
                self.nodes[min].left = node;
            }
            None => {
                self.nodes[node].left = node;
                self.nodes[node].right = node;
                self.min = Some(node);
            }
        }
    }

    /// Makes `child` a child of `parent`. `child` must be a root.
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        // Unlink from the root ring.
        let left = self.nodes[child].left;
        let right = self.nodes[child].right;
        self.nodes[left].right = right;
        self.nodes[right].left = left;

        self.nodes[child].parent = Some(parent);
        self.nodes[child].marked = false;

        match self.nodes[parent].child {
            Some(first) => {
                let first_left = self.nodes[first].left;
                self.nodes[child].right = first;
                self.nodes[child].left = first_left;
                self.nodes[first_left].right = child;
                self.nodes[first].left = child;
            }
            None => {
                self.nodes[parent].child = Some(child);
                self.nodes[child].left = child;
                self.nodes[child].right = child;
            }
        }

        self.nodes[parent].degree += 1;
    }

    /// Cuts `child` out of `parent`'s child ring and returns it to the root
    /// ring, unmarked.
    fn cut(&mut self, child: NodeKey, parent: NodeKey) {
        let left = self.nodes[child].left;
        let right = self.nodes[child].right;
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        self.nodes[parent].degree -= 1;

        if self.nodes[parent].child == Some(child) {
            self.nodes[parent].child = if right == child { None } else { Some(right) };
        }

        self.splice_root(child);
        self.nodes[child].parent = None;
        self.nodes[child].marked = false;
    }

    /// Walks up from a node that just lost a child: an unmarked node is
    /// marked and the walk stops; a marked node is cut and the walk
    /// continues from its parent.
    fn cascading_cut(&mut self, start: NodeKey) {
        let mut node = start;
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                break;
            }
            self.cut(node, parent);
            node = parent;
        }
    }

    /// Merges roots of equal degree until all root degrees are distinct,
    /// then rebuilds the root ring and the minimum pointer.
    fn consolidate(&mut self) {
        let min = match self.min {
            Some(min) => min,
            None => return,
        };

        // Degree bound floor(log_phi(n)) + 1; n still counts the node being
        // removed, which only widens the table.
        let max_degree = ((self.len() as f64).ln() * ONE_OVER_LOG_PHI).floor() as usize + 1;
        let mut by_degree: SmallVec<[Option<NodeKey>; 16]> = smallvec![None; max_degree + 1];

        // Capture the root ring before any links rewire it.
        let mut roots = Vec::new();
        let mut current = min;
        loop {
            roots.push(current);
            current = self.nodes[current].right;
            if current == min {
                break;
            }
        }

        for root in roots {
            let mut x = root;
            let mut degree = self.nodes[x].degree;
            while let Some(mut y) = by_degree[degree] {
                // The smaller priority becomes the parent.
                if self.nodes[y].priority < self.nodes[x].priority {
                    mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                by_degree[degree] = None;
                degree += 1;
            }
            by_degree[degree] = Some(x);
        }

        // Rebuild the root ring from the surviving trees.
        self.min = None;
        for root in by_degree.into_iter().flatten() {
            match self.min {
                Some(min) => {
                    let min_left = self.nodes[min].left;
                    self.nodes[root].right = min;
                    self.nodes[root].left = min_left;
                    self.nodes[min_left].right = root;
                    self.nodes[min].left = root;

                    if self.nodes[root].priority < self.nodes[min].priority {
                        self.min = Some(root);
                    }
                }
                None => {
                    self.nodes[root].left = root;
                    self.nodes[root].right = root;
                    self.min = Some(root);
                }
            }
        }
    }
}

impl<T, P: Ord> Default for FibonacciHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> Heap<T, P> for FibonacciHeap<T, P> {
    fn new() -> Self {
        FibonacciHeap::new()
    }

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn push(&mut self, priority: P, item: T) {
        self.insert(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.find_min()
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.remove_min()
    }

    fn merge(&mut self, other: Self) {
        self.absorb(other);
    }
}

impl<T, P: Ord> DecreaseKeyHeap<T, P> for FibonacciHeap<T, P> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        self.insert(priority, item)
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, new_priority)
    }

    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError> {
        FibonacciHeap::delete(self, handle)
    }
}

#[cfg(test)]
impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Collects a sibling ring, asserting both link directions along the way.
    fn ring(&self, start: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut current = start;
        loop {
            assert_eq!(self.nodes[self.nodes[current].left].right, current);
            assert_eq!(self.nodes[self.nodes[current].right].left, current);
            out.push(current);
            current = self.nodes[current].right;
            if current == start {
                break;
            }
        }
        out
    }

    fn check_tree(&self, node: NodeKey) -> usize {
        let mut count = 1;
        match self.nodes[node].child {
            Some(child) => {
                let children = self.ring(child);
                assert_eq!(children.len(), self.nodes[node].degree);
                for &key in &children {
                    assert_eq!(self.nodes[key].parent, Some(node));
                    assert!(self.nodes[node].priority <= self.nodes[key].priority);
                    count += self.check_tree(key);
                }
            }
            None => assert_eq!(self.nodes[node].degree, 0),
        }
        count
    }

    /// Walks the entire structure checking ring validity, heap order, degree
    /// counts, root marks, and arena-count agreement.
    fn assert_invariants(&self) {
        let min = match self.min {
            Some(min) => min,
            None => {
                assert!(self.nodes.is_empty());
                return;
            }
        };
        let mut reachable = 0;
        for &root in &self.ring(min) {
            assert!(self.nodes[root].parent.is_none());
            assert!(!self.nodes[root].marked);
            assert!(self.nodes[min].priority <= self.nodes[root].priority);
            reachable += self.check_tree(root);
        }
        assert_eq!(reachable, self.nodes.len());
    }

    fn root_degrees(&self) -> Vec<usize> {
        match self.min {
            Some(min) => self
                .ring(min)
                .iter()
                .map(|&root| self.nodes[root].degree)
                .collect(),
            None => Vec::new(),
        }
    }
}
