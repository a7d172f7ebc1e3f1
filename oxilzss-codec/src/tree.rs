//! Binary search tree match finder.
//!
//! The encoder keeps one unbalanced binary search tree per leading byte
//! value. Every dictionary position lives in the tree of its first byte,
//! ordered by the `MAX_MATCH` bytes that start there. Inserting the current
//! lookahead position walks that tree and reports the longest match seen on
//! the way down.
//!
//! Nodes are ring positions. The links are three parallel index arrays;
//! [`NIL`] marks an absent link, and indices `NIL + 1 ..= NIL + 256` are the
//! root sentinels whose `right` link holds the root of each tree.

use oxilzss_core::WindowBuffer;
use oxilzss_core::params::{MAX_MATCH, NIL, WINDOW_SIZE};

/// Number of link slots: ring positions, `NIL`, and 256 root sentinels.
const LINK_SLOTS: usize = WINDOW_SIZE + 1 + 256;

/// Longest match found while inserting a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Match {
    /// Ring position where the match starts.
    pub position: usize,
    /// Number of matching bytes (0 when nothing was compared).
    pub length: usize,
}

/// The forest of 256 binary search trees over ring positions.
#[derive(Debug, Clone)]
pub struct MatchTree {
    left: Vec<usize>,
    right: Vec<usize>,
    parent: Vec<usize>,
}

impl MatchTree {
    /// Create an empty forest.
    pub fn new() -> Self {
        Self {
            left: vec![NIL; LINK_SLOTS],
            right: vec![NIL; LINK_SLOTS],
            parent: vec![NIL; LINK_SLOTS],
        }
    }

    /// Root sentinel index for a leading byte.
    #[inline]
    fn root(byte: u8) -> usize {
        NIL + 1 + byte as usize
    }

    /// Check whether a position is currently indexed.
    pub fn contains(&self, pos: usize) -> bool {
        pos < WINDOW_SIZE && self.parent[pos] != NIL
    }

    /// Insert the string starting at `r` and return the longest match found.
    ///
    /// If an existing node matches all `MAX_MATCH` bytes, `r` takes over its
    /// place in the tree and the old node is unlinked. The reported match is
    /// that first full-length node on the probe path.
    pub fn insert(&mut self, window: &WindowBuffer, r: usize) -> Match {
        let key = window.key(r);
        let mut p = Self::root(key[0]);
        let mut go_right = true;
        let mut best = Match::default();

        self.left[r] = NIL;
        self.right[r] = NIL;

        loop {
            let child = if go_right { self.right[p] } else { self.left[p] };
            if child == NIL {
                if go_right {
                    self.right[p] = r;
                } else {
                    self.left[p] = r;
                }
                self.parent[r] = p;
                return best;
            }
            p = child;

            let node = window.key(p);
            let mut i = 1;
            while i < MAX_MATCH && key[i] == node[i] {
                i += 1;
            }
            if i < MAX_MATCH {
                go_right = key[i] > node[i];
            }

            if i > best.length {
                best = Match {
                    position: p,
                    length: i,
                };
                if i >= MAX_MATCH {
                    break;
                }
            }
        }

        // Full-length match: r replaces p.
        self.parent[r] = self.parent[p];
        self.left[r] = self.left[p];
        self.right[r] = self.right[p];
        self.parent[self.left[p]] = r;
        self.parent[self.right[p]] = r;
        self.replace_child(self.parent[p], p, r);
        self.parent[p] = NIL;

        best
    }

    /// Remove position `p` from whichever tree holds it.
    pub fn delete(&mut self, p: usize) {
        if self.parent[p] == NIL {
            return;
        }

        let q = if self.right[p] == NIL {
            self.left[p]
        } else if self.left[p] == NIL {
            self.right[p]
        } else {
            let mut q = self.left[p];
            if self.right[q] != NIL {
                while self.right[q] != NIL {
                    q = self.right[q];
                }
                // Detach the predecessor, its left subtree takes its place.
                self.right[self.parent[q]] = self.left[q];
                self.parent[self.left[q]] = self.parent[q];
                self.left[q] = self.left[p];
                self.parent[self.left[p]] = q;
            }
            self.right[q] = self.right[p];
            self.parent[self.right[p]] = q;
            q
        };

        self.parent[q] = self.parent[p];
        self.replace_child(self.parent[p], p, q);
        self.parent[p] = NIL;
    }

    /// Point whichever child slot of `parent` holds `old` at `new`.
    #[inline]
    fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if self.right[parent] == old {
            self.right[parent] = new;
        } else {
            self.left[parent] = new;
        }
    }
}

impl Default for MatchTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxilzss_core::params::INITIAL_POSITION;

    fn window_with(text: &[u8], at: usize) -> WindowBuffer {
        let mut window = WindowBuffer::standard();
        for (i, &b) in text.iter().enumerate() {
            window.set(at + i, b);
        }
        window
    }

    /// Walk a tree in order and collect its positions.
    fn in_order(tree: &MatchTree, node: usize, out: &mut Vec<usize>) {
        if node == NIL {
            return;
        }
        in_order(tree, tree.left[node], out);
        out.push(node);
        in_order(tree, tree.right[node], out);
    }

    fn assert_links_consistent(tree: &MatchTree, root: usize) {
        let mut nodes = Vec::new();
        in_order(tree, tree.right[root], &mut nodes);
        for &n in &nodes {
            let parent = tree.parent[n];
            assert!(tree.left[parent] == n || tree.right[parent] == n);
        }
    }

    #[test]
    fn test_first_insert_has_no_match() {
        let window = window_with(b"hello world", 0);
        let mut tree = MatchTree::new();

        let m = tree.insert(&window, 0);
        assert_eq!(m.length, 0);
        assert!(tree.contains(0));
    }

    #[test]
    fn test_finds_longest_prefix() {
        let window = window_with(b"abcdXabcdY", 100);
        let mut tree = MatchTree::new();

        tree.insert(&window, 100);
        let m = tree.insert(&window, 105);

        assert_eq!(m.position, 100);
        assert_eq!(m.length, 4);
    }

    #[test]
    fn test_full_match_replaces_node() {
        let text = [b'Q'; 64];
        let window = window_with(&text, 200);
        let mut tree = MatchTree::new();

        tree.insert(&window, 200);
        let m = tree.insert(&window, 201);

        assert_eq!(m.position, 200);
        assert_eq!(m.length, MAX_MATCH);
        assert!(!tree.contains(200));
        assert!(tree.contains(201));
        assert_eq!(tree.right[MatchTree::root(b'Q')], 201);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let window = window_with(b"abc", 0);
        let mut tree = MatchTree::new();

        tree.insert(&window, 0);
        tree.delete(1);
        assert!(tree.contains(0));
    }

    #[test]
    fn test_delete_node_with_two_children() {
        // Keys sharing the leading byte 'm' so they land in one tree.
        let words: [&[u8]; 7] = [b"mm", b"md", b"mt", b"mb", b"mf", b"me", b"mg"];
        let mut window = WindowBuffer::standard();
        let positions: Vec<usize> = (0..words.len()).map(|i| 300 + i * 40).collect();
        for (&pos, word) in positions.iter().zip(words.iter()) {
            for (i, &b) in word.iter().enumerate() {
                window.set(pos + i, b);
            }
        }

        let mut tree = MatchTree::new();
        for &pos in &positions {
            tree.insert(&window, pos);
        }
        let root = MatchTree::root(b'm');

        // "md" has children "mb" and "mf"; "mf" has children "me" and "mg".
        tree.delete(positions[1]);
        assert!(!tree.contains(positions[1]));
        assert_links_consistent(&tree, root);

        let mut nodes = Vec::new();
        in_order(&tree, tree.right[root], &mut nodes);
        let keys: Vec<&[u8]> = nodes.iter().map(|&n| &window.key(n)[..2]).collect();
        let expected: Vec<&[u8]> = vec![b"mb", b"me", b"mf", b"mg", b"mm", b"mt"];
        assert_eq!(keys, expected);

        // Deleting the root keeps the remaining order intact.
        tree.delete(positions[0]);
        assert_links_consistent(&tree, root);
        let mut nodes = Vec::new();
        in_order(&tree, tree.right[root], &mut nodes);
        assert_eq!(nodes.len(), 5);
    }

    #[test]
    fn test_filler_prefixed_strings() {
        let window = window_with(b"  xyz", INITIAL_POSITION);
        let mut tree = MatchTree::new();

        for i in 1..=MAX_MATCH {
            tree.insert(&window, INITIAL_POSITION - i);
        }
        let m = tree.insert(&window, INITIAL_POSITION);

        // Two spaces of the key match the filler run before it.
        assert_eq!(m.length, 2);
    }
}
