//! Disjoint-set forest over fragment indices.

use std::sync::{Mutex, PoisonError};

/// Union-Find (Disjoint-Set Union) data structure.
///
/// Path compression and union by rank give near-constant time operations.
#[derive(Debug, Clone)]
pub struct UnionFind {
    /// Parent pointers (index of parent, or self if root).
    parent: Vec<usize>,
    /// Rank for union by rank optimization.
    rank: Vec<u8>,
}

impl UnionFind {
    /// Create a new union-find with `n` singleton sets.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if the forest has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Find the root of the set containing `x`, with path compression.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Union the sets containing `x` and `y`, using union by rank.
    ///
    /// Returns `true` if two distinct sets were merged.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false;
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Less => {
                self.parent[root_x] = root_y;
            }
            std::cmp::Ordering::Greater => {
                self.parent[root_y] = root_x;
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] = self.rank[root_x].saturating_add(1);
            }
        }
        true
    }

    /// Dense set labels, numbered in order of each set's first element.
    ///
    /// Returns one label per element and the number of sets.
    pub fn dense_labels(&mut self) -> (Vec<usize>, usize) {
        let n = self.len();
        let mut label_of_root = vec![usize::MAX; n];
        let mut labels = Vec::with_capacity(n);
        let mut count = 0;
        for x in 0..n {
            let root = self.find(x);
            if label_of_root[root] == usize::MAX {
                label_of_root[root] = count;
                count += 1;
            }
            labels.push(label_of_root[root]);
        }
        (labels, count)
    }
}

/// A union-find shared between worker threads.
///
/// Only [`union`](Self::union) takes the lock; everything else happens after
/// the parallel phase through [`into_inner`](Self::into_inner).
#[derive(Debug)]
pub struct SharedUnionFind {
    inner: Mutex<UnionFind>,
}

impl SharedUnionFind {
    /// Create a shared forest with `n` singleton sets.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            inner: Mutex::new(UnionFind::new(n)),
        }
    }

    /// Union the sets containing `x` and `y` under the lock.
    pub fn union(&self, x: usize, y: usize) -> bool {
        // Every write leaves the forest valid, so poisoning is ignored.
        let mut forest = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        forest.union(x, y)
    }

    /// The forest after all workers are done.
    #[must_use]
    pub fn into_inner(self) -> UnionFind {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn union_and_find() {
        let mut uf = UnionFind::new(6);
        assert!(uf.union(0, 1));
        assert!(uf.union(4, 5));
        assert!(uf.union(1, 5));
        assert!(!uf.union(0, 4));
        assert_eq!(uf.find(0), uf.find(5));
        assert_ne!(uf.find(2), uf.find(3));
    }

    #[test]
    fn dense_labels_follow_first_element() {
        let mut uf = UnionFind::new(5);
        uf.union(3, 1);
        uf.union(4, 2);
        let (labels, count) = uf.dense_labels();
        assert_eq!(count, 3);
        assert_eq!(labels, vec![0, 1, 2, 1, 2]);
    }

    #[test]
    fn shared_forest_from_many_threads() {
        let shared = SharedUnionFind::new(1000);
        (1..1000).into_par_iter().for_each(|i| {
            shared.union(i - 1, i);
        });
        let (_, count) = shared.into_inner().dense_labels();
        assert_eq!(count, 1);
    }
}
