/*!
# Fibonacci Heap

General-purpose min-priority queue used where keys may keep decreasing after
other items have been deleted, so the monotone radix discipline does not
apply. Trees are kept one-per-rank in a rank-indexed root table; a bitmask
over occupied ranks locates the maximum-rank root during `delete_min`.
`decrease_key` cuts the node from its parent and melds it back as a root,
cascading through marked ancestors.

Nodes live in a capacity-sized slab indexed by item, so item lookup is free
and sibling rings are threaded through slab indices instead of pointers.
*/

use crate::core::heap::Heap;

#[derive(Debug, Clone, Copy)]
struct FibNode {
    key: f64,
    rank: usize,
    marked: bool,
    in_heap: bool,
    parent: Option<usize>,
    child: Option<usize>,
    left: usize,
    right: usize,
}

/// Fibonacci heap over dense integer items with `f64` keys.
///
/// # Examples
///
/// ```rust
/// use hyperstar::core::heap::{FibonacciHeap, Heap};
///
/// let mut heap = FibonacciHeap::new(4);
/// heap.insert(0, 5.0);
/// heap.insert(1, 2.0);
/// heap.insert(2, 8.0);
///
/// assert_eq!(heap.delete_min(), Some(1));
/// // Keys may drop below previously deleted minima.
/// heap.decrease_key(2, 1.0);
/// assert_eq!(heap.delete_min(), Some(2));
/// assert_eq!(heap.delete_min(), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct FibonacciHeap {
    nodes: Vec<FibNode>,
    /// Root of the unique tree of each rank, if any.
    trees: Vec<Option<usize>>,
    /// Bitmask over occupied ranks; bit `r` set iff `trees[r]` is occupied.
    tree_sum: u64,
    len: usize,
}

impl FibonacciHeap {
    /// Creates a heap for items in `[0, capacity)`.
    pub fn new(capacity: usize) -> Self {
        // Tree ranks are bounded by log_phi of the item count.
        let max_trees = 3 + (1.44 * (capacity.max(2) as f64).log2()).ceil() as usize;
        Self {
            nodes: vec![
                FibNode {
                    key: 0.0,
                    rank: 0,
                    marked: false,
                    in_heap: false,
                    parent: None,
                    child: None,
                    left: 0,
                    right: 0,
                };
                capacity
            ],
            trees: vec![None; max_trees],
            tree_sum: 0,
            len: 0,
        }
    }

    /// Returns true when `item` is currently held by the heap.
    pub fn contains(&self, item: usize) -> bool {
        self.nodes[item].in_heap
    }

    /// Returns the current key of `item`, if it is in the heap.
    pub fn key(&self, item: usize) -> Option<f64> {
        self.nodes[item].in_heap.then(|| self.nodes[item].key)
    }

    /// Melds a circular sibling ring of tree roots into the root table,
    /// linking like-ranked trees (smaller key becomes the parent) until at
    /// most one tree per rank remains.
    fn meld(&mut self, list: usize) {
        let first = list;
        let mut node = list;
        loop {
            let next = self.nodes[node].right;
            self.nodes[node].right = node;
            self.nodes[node].left = node;
            self.nodes[node].parent = None;

            let mut new_root = node;
            let mut r = self.nodes[node].rank;
            loop {
                if let Some(occupant) = self.trees[r] {
                    self.trees[r] = None;
                    self.tree_sum -= 1u64 << r;

                    let mut temp = occupant;
                    if self.nodes[temp].key < self.nodes[new_root].key {
                        std::mem::swap(&mut new_root, &mut temp);
                    }
                    if r > 0 {
                        let rc = self.nodes[new_root]
                            .child
                            .expect("a tree of positive rank has a child");
                        let lc = self.nodes[rc].left;
                        self.nodes[temp].left = lc;
                        self.nodes[temp].right = rc;
                        self.nodes[lc].right = temp;
                        self.nodes[rc].left = temp;
                    }
                    r += 1;
                    self.nodes[new_root].child = Some(temp);
                    self.nodes[new_root].rank = r;
                    self.nodes[temp].parent = Some(new_root);
                    self.nodes[temp].marked = false;
                } else {
                    self.trees[r] = Some(new_root);
                    self.tree_sum += 1u64 << r;
                    // Roots stay marked so that losing a child relocates
                    // them out of the rank table.
                    self.nodes[new_root].marked = true;
                    break;
                }
            }

            node = next;
            if node == first {
                break;
            }
        }
    }

    /// Detaches `node` from its sibling ring and returns its old right
    /// neighbour.
    fn unlink(&mut self, node: usize) -> usize {
        let (l, r) = (self.nodes[node].left, self.nodes[node].right);
        self.nodes[l].right = r;
        self.nodes[r].left = l;
        self.nodes[node].left = node;
        self.nodes[node].right = node;
        r
    }

    /// Drops `parent`'s rank after a cut and repairs its child pointer.
    fn drop_child(&mut self, parent: usize, cut: usize, right_sib: usize) {
        self.nodes[parent].rank -= 1;
        if self.nodes[parent].rank > 0 {
            if self.nodes[parent].child == Some(cut) {
                self.nodes[parent].child = Some(right_sib);
            }
        } else {
            self.nodes[parent].child = None;
        }
    }
}

impl Heap for FibonacciHeap {
    fn insert(&mut self, item: usize, key: f64) {
        debug_assert!(!self.nodes[item].in_heap, "item already in heap");
        self.nodes[item] = FibNode {
            key,
            rank: 0,
            marked: false,
            in_heap: true,
            parent: None,
            child: None,
            left: item,
            right: item,
        };
        self.meld(item);
        self.len += 1;
    }

    fn decrease_key(&mut self, item: usize, key: f64) {
        debug_assert!(self.nodes[item].in_heap, "item not in heap");
        debug_assert!(key <= self.nodes[item].key, "key may only decrease");
        self.nodes[item].key = key;

        // Roots need no restructuring.
        if self.nodes[item].parent.is_none() {
            return;
        }

        let mut cut = item;
        let mut right_sib = self.unlink(cut);
        let mut parent = self.nodes[cut].parent;
        let mut new_roots = cut;

        // Cascade: every marked ancestor is cut in turn and joins the list
        // of roots to meld.
        loop {
            let Some(p) = parent else { break };
            if !self.nodes[p].marked {
                break;
            }
            self.drop_child(p, cut, right_sib);
            cut = p;
            parent = self.nodes[cut].parent;
            right_sib = self.unlink(cut);

            let tail = self.nodes[new_roots].left;
            self.nodes[new_roots].left = cut;
            self.nodes[tail].right = cut;
            self.nodes[cut].left = tail;
            self.nodes[cut].right = new_roots;
            new_roots = cut;
        }

        match parent {
            None => {
                // The cascade consumed a root: clear its old rank slot
                // before remelding (its rank was decremented in the loop).
                let prev_rank = self.nodes[cut].rank + 1;
                self.trees[prev_rank] = None;
                self.tree_sum -= 1u64 << prev_rank;
            }
            Some(p) => {
                self.drop_child(p, cut, right_sib);
                self.nodes[p].marked = true;
            }
        }

        self.meld(new_roots);
    }

    fn delete_min(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        debug_assert!(self.tree_sum != 0);

        // The bitmask's highest set bit is the maximum occupied rank; scan
        // downward from there for the minimum root.
        let mut r = (u64::BITS - 1 - self.tree_sum.leading_zeros()) as usize;
        let mut min_node = self.trees[r].expect("tree bitmask tracks occupied ranks");
        let mut min_key = self.nodes[min_node].key;
        while r > 0 {
            r -= 1;
            if let Some(root) = self.trees[r] {
                if self.nodes[root].key < min_key {
                    min_key = self.nodes[root].key;
                    min_node = root;
                }
            }
        }

        let rank = self.nodes[min_node].rank;
        self.trees[rank] = None;
        self.tree_sum -= 1u64 << rank;

        if let Some(child) = self.nodes[min_node].child {
            self.meld(child);
        }

        self.nodes[min_node].in_heap = false;
        self.nodes[min_node].child = None;
        self.len -= 1;
        Some(min_node)
    }

    fn len(&self) -> usize {
        self.len
    }
}
