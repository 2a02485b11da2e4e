//! Module provide ordered-set implemented by [RedBlackTree] type.
//!
//! RedBlackTree is a classic [red-black][wiki-rbt] tree, nodes carry a
//! back-reference to their parent and insertion is a plain binary-search
//! placement followed by a bottom-up fix-up using recoloring and rotations.
//!
//! Nodes live in an arena owned by the tree and link to each other by
//! index. Ownership flows from the root towards the leaves, the parent
//! index is only used to walk upwards during fix-up and rotation.
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use log::{debug, trace};

use std::{cmp::Ordering, fmt, iter::FromIterator};

use crate::{node::Node, Error, Result};

/// RedBlackTree manage a single instance of in-memory ordered-set of
/// `i64` keys. Duplicate keys are allowed.
pub struct RedBlackTree {
    nodes: Vec<Node>,
    root: Option<usize>,
    n_count: usize, // number of keys in the tree.
}

impl RedBlackTree {
    /// Create an empty instance of RedBlackTree.
    pub fn new() -> RedBlackTree {
        RedBlackTree {
            nodes: Vec::default(),
            root: None,
            n_count: Default::default(),
        }
    }

    /// Create an instance holding a single, black, root key.
    pub fn with_key(key: i64) -> RedBlackTree {
        let mut tree = RedBlackTree::new();
        tree.insert(key);
        tree
    }
}

impl Default for RedBlackTree {
    fn default() -> RedBlackTree {
        RedBlackTree::new()
    }
}

impl From<i64> for RedBlackTree {
    fn from(key: i64) -> RedBlackTree {
        RedBlackTree::with_key(key)
    }
}

impl Clone for RedBlackTree {
    /// Deep copy of the tree. The clone gets its own node arena with
    /// identical shape, keys and colors.
    fn clone(&self) -> RedBlackTree {
        let mut nodes = Vec::with_capacity(self.n_count);
        let root = self.clone_subtree(self.root, None, &mut nodes);
        debug!("cloned tree with {} nodes", nodes.len());

        RedBlackTree {
            nodes,
            root,
            n_count: self.n_count,
        }
    }
}

impl Extend<i64> for RedBlackTree {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = i64>,
    {
        iter.into_iter().for_each(|key| self.insert(key));
    }
}

impl FromIterator<i64> for RedBlackTree {
    fn from_iter<I>(iter: I) -> RedBlackTree
    where
        I: IntoIterator<Item = i64>,
    {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl fmt::Debug for RedBlackTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.root() {
            Some(root) => write!(f, "RedBlackTree<{}>[root:{}]", self.n_count, root),
            None => write!(f, "RedBlackTree<{}>[]", self.n_count),
        }
    }
}

/// Maintenance API.
impl RedBlackTree {
    /// Return number of keys in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this tree is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return the root node, if tree is not empty.
    pub fn root(&self) -> Option<&Node> {
        self.root.map(|idx| &self.nodes[idx])
    }

    /// Validate red-black tree with following rules:
    ///
    /// * Root node is black and has no parent.
    /// * Every child points back to its parent.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Keys are in non-decreasing order, left to right.
    /// * Reachable nodes add up to [RedBlackTree::len].
    /// * Height is within `2 * log2(n+1)`.
    pub fn validate(&self) -> Result<()> {
        let root = match self.root {
            Some(root) => root,
            None if self.n_count == 0 => return Ok(()),
            None => return err_at!(Fatal, msg: "empty tree with n_count {}", self.n_count),
        };

        if !self.nodes[root].is_black() {
            err_at!(Fatal, msg: "root node must be black")?;
        }
        if let Some(parent) = self.nodes[root].parent {
            err_at!(Fatal, msg: "root node has parent {}", parent)?;
        }

        let mut stats = Stats::default();
        self.validate_tree(Some(root), false, 0, 1, &mut stats)?;

        if stats.n_nodes != self.n_count {
            err_at!(Fatal, msg: "n_count {} != reachable {}", self.n_count, stats.n_nodes)?;
        }
        let max_depth = 2 * ((usize::BITS - (self.n_count + 1).leading_zeros()) as usize);
        if stats.depth > max_depth {
            err_at!(Fatal, msg: "tree depth {} exceeds {}", stats.depth, max_depth)?;
        }

        Ok(())
    }
}

/// Write API.
impl RedBlackTree {
    /// Insert key into this tree. Never fails, duplicate keys are placed
    /// to the right of their equals.
    pub fn insert(&mut self, key: i64) {
        let node = self.nodes.len();
        self.nodes.push(Node::new(key));
        self.basic_insert(node);
        self.insert_fixup(node);
        self.n_count += 1;
    }

    // plain binary-search-tree placement, new leaf stays red unless it
    // becomes the root.
    fn basic_insert(&mut self, node: usize) {
        let mut parent = match self.root {
            Some(root) => root,
            None => {
                self.nodes[node].set_black();
                self.root = Some(node);
                return;
            }
        };

        let key = self.nodes[node].key;
        loop {
            let next = if key < self.nodes[parent].key {
                self.nodes[parent].left
            } else {
                self.nodes[parent].right
            };
            match next {
                Some(next) => parent = next,
                None => break,
            }
        }

        self.nodes[node].parent = Some(parent);
        if key < self.nodes[parent].key {
            self.nodes[parent].left = Some(node);
        } else {
            self.nodes[parent].right = Some(node);
        }
    }

    fn insert_fixup(&mut self, mut node: usize) {
        while let Some(parent) = self.nodes[node].parent {
            if self.nodes[parent].is_black() {
                break;
            }
            // a red parent is never the root.
            let grandparent = match self.nodes[parent].parent {
                Some(grandparent) => grandparent,
                None => break,
            };
            let uncle = self.uncle_of(node);

            if self.is_red(uncle) {
                trace!("fixup recolor at {}", self.nodes[grandparent].key);
                self.nodes[parent].set_black();
                if let Some(uncle) = uncle {
                    self.nodes[uncle].set_black();
                }
                self.nodes[grandparent].set_red();
                node = grandparent;
            } else if self.is_left_child(parent) {
                if self.is_right_child(node) {
                    node = parent;
                    self.rotate_left(node);
                }
                trace!("fixup rotate right at {}", self.nodes[grandparent].key);
                self.set_parent_black(node);
                self.nodes[grandparent].set_red();
                self.rotate_right(grandparent);
            } else {
                if self.is_left_child(node) {
                    node = parent;
                    self.rotate_right(node);
                }
                trace!("fixup rotate left at {}", self.nodes[grandparent].key);
                self.set_parent_black(node);
                self.nodes[grandparent].set_red();
                self.rotate_left(grandparent);
            }
        }

        if let Some(root) = self.root {
            self.nodes[root].set_black();
        }
    }

    fn set_parent_black(&mut self, node: usize) {
        if let Some(parent) = self.nodes[node].parent {
            self.nodes[parent].set_black();
        }
    }
}

/// Read API.
impl RedBlackTree {
    /// Get the first node matching key along the search path.
    pub fn get(&self, key: &i64) -> Option<&Node> {
        let mut node = self.root;
        while let Some(idx) = node {
            let nref = &self.nodes[idx];
            node = match key.cmp(&nref.key) {
                Ordering::Less => nref.left,
                Ordering::Greater => nref.right,
                Ordering::Equal => return Some(nref),
            };
        }
        None
    }

    /// Check whether key is present in this tree.
    pub fn contains(&self, key: &i64) -> bool {
        self.get(key).is_some()
    }

    /// Return the smallest key, fail with [Error::EmptyTree] on an
    /// empty tree.
    pub fn get_min(&self) -> Result<i64> {
        let mut idx = match self.root {
            Some(root) => root,
            None => return err_at!(EmptyTree, msg: "get_min on empty tree"),
        };
        while let Some(left) = self.nodes[idx].left {
            idx = left;
        }
        Ok(self.nodes[idx].key)
    }

    /// Return the largest key, fail with [Error::EmptyTree] on an
    /// empty tree.
    pub fn get_max(&self) -> Result<i64> {
        let mut idx = match self.root {
            Some(root) => root,
            None => return err_at!(EmptyTree, msg: "get_max on empty tree"),
        };
        while let Some(right) = self.nodes[idx].right {
            idx = right;
        }
        Ok(self.nodes[idx].key)
    }

    /// Return an iterator over all keys in sort order.
    pub fn iter(&self) -> Iter<'_> {
        let mut paths = Vec::default();
        build_iter(&self.nodes, self.root, &mut paths);

        Iter {
            nodes: &self.nodes,
            paths,
        }
    }
}

/// Serialization API.
///
/// Each node contributes the token `" " + color + key + " "`, color being
/// `R` or `B`. An empty tree serializes to an empty string.
impl RedBlackTree {
    /// Serialize in left, node, right order.
    pub fn to_infix_string(&self) -> String {
        let mut buf = String::default();
        self.infix(self.root, &mut buf);
        buf
    }

    /// Serialize in node, left, right order.
    pub fn to_prefix_string(&self) -> String {
        let mut buf = String::default();
        self.prefix(self.root, &mut buf);
        buf
    }

    /// Serialize in left, right, node order.
    pub fn to_postfix_string(&self) -> String {
        let mut buf = String::default();
        self.postfix(self.root, &mut buf);
        buf
    }

    fn infix(&self, node: Option<usize>, buf: &mut String) {
        if let Some(idx) = node {
            let nref = &self.nodes[idx];
            self.infix(nref.left, buf);
            push_token(nref, buf);
            self.infix(nref.right, buf);
        }
    }

    fn prefix(&self, node: Option<usize>, buf: &mut String) {
        if let Some(idx) = node {
            let nref = &self.nodes[idx];
            push_token(nref, buf);
            self.prefix(nref.left, buf);
            self.prefix(nref.right, buf);
        }
    }

    fn postfix(&self, node: Option<usize>, buf: &mut String) {
        if let Some(idx) = node {
            let nref = &self.nodes[idx];
            self.postfix(nref.left, buf);
            self.postfix(nref.right, buf);
            push_token(nref, buf);
        }
    }
}

fn push_token(node: &Node, buf: &mut String) {
    buf.push(' ');
    buf.push_str(&node.to_string());
    buf.push(' ');
}

impl RedBlackTree {
    // copy `from` and its subtrees into `nodes`, children of the copy
    // point back to the copy.
    fn clone_subtree(
        &self,
        from: Option<usize>,
        parent: Option<usize>,
        nodes: &mut Vec<Node>,
    ) -> Option<usize> {
        let src = &self.nodes[from?];

        let idx = nodes.len();
        nodes.push(Node {
            key: src.key,
            black: src.black,
            parent,
            left: None,
            right: None,
        });

        nodes[idx].left = self.clone_subtree(src.left, Some(idx), nodes);
        nodes[idx].right = self.clone_subtree(src.right, Some(idx), nodes);
        Some(idx)
    }

    fn validate_tree(
        &self,
        node: Option<usize>,
        fromred: bool,
        mut n_blacks: usize,
        depth: usize,
        stats: &mut Stats,
    ) -> Result<usize> {
        let idx = match node {
            Some(idx) => idx,
            None => return Ok(n_blacks),
        };
        let nref = &self.nodes[idx];

        stats.n_nodes += 1;
        stats.depth = stats.depth.max(depth);
        if stats.n_nodes > self.n_count {
            err_at!(Fatal, msg: "more than {} nodes reachable", self.n_count)?;
        }

        let red = nref.is_red();
        if fromred && red {
            return err_at!(Fatal, msg: "consecutive reds at {}", nref.key)?;
        }
        if !red {
            n_blacks += 1;
        }

        for child in [nref.left, nref.right].iter().flatten() {
            if self.nodes[*child].parent != Some(idx) {
                err_at!(Fatal, msg: "broken parent link under {}", nref.key)?;
            }
        }

        let lblacks = self.validate_tree(nref.left, red, n_blacks, depth + 1, stats)?;
        if let Some(prev) = stats.prev_key {
            if prev > nref.key {
                err_at!(Fatal, msg: "sort prev:{} key:{}", prev, nref.key)?;
            }
        }
        stats.prev_key = Some(nref.key);
        let rblacks = self.validate_tree(nref.right, red, n_blacks, depth + 1, stats)?;

        if lblacks != rblacks {
            err_at!(Fatal, msg: "unbalanced blacks {} {}", lblacks, rblacks)?;
        }

        Ok(lblacks)
    }
}

#[derive(Default)]
struct Stats {
    n_nodes: usize,
    depth: usize,
    prev_key: Option<i64>,
}

//--------- structural queries and rotations ----------------

impl RedBlackTree {
    // absent nodes are black nil leaves.
    fn is_red(&self, node: Option<usize>) -> bool {
        node.map_or(false, |idx| self.nodes[idx].is_red())
    }

    fn is_left_child(&self, node: usize) -> bool {
        match self.nodes[node].parent {
            Some(parent) => self.nodes[parent].left == Some(node),
            None => false,
        }
    }

    fn is_right_child(&self, node: usize) -> bool {
        match self.nodes[node].parent {
            Some(parent) => self.nodes[parent].right == Some(node),
            None => false,
        }
    }

    fn uncle_of(&self, node: usize) -> Option<usize> {
        let parent = self.nodes[node].parent?;
        let grandparent = self.nodes[parent].parent?;
        if self.is_left_child(parent) {
            self.nodes[grandparent].right
        } else {
            self.nodes[grandparent].left
        }
    }

    // replace `old` with `new` under old's parent, or as root.
    fn replace_child(&mut self, old: usize, new: usize) {
        let parent = self.nodes[old].parent;
        self.nodes[new].parent = parent;
        match parent {
            None => self.root = Some(new),
            Some(p) if self.nodes[p].left == Some(old) => self.nodes[p].left = Some(new),
            Some(p) => self.nodes[p].right = Some(new),
        }
    }

    //              (p)                       (p)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             /   \                     /   \
    //            /     \                   /     \
    //          xl       y                 x       yr
    //                  / \               / \
    //                yl   yr           xl   yl
    //
    fn rotate_left(&mut self, x: usize) {
        let y = match self.nodes[x].right {
            Some(y) => y,
            None => panic!("rotate_left(): no right child ? Call the programmer"),
        };

        let yl = self.nodes[y].left;
        self.nodes[x].right = yl;
        if let Some(yl) = yl {
            self.nodes[yl].parent = Some(x);
        }

        self.replace_child(x, y);
        self.nodes[y].left = Some(x);
        self.nodes[x].parent = Some(y);
    }

    //              (p)                       (p)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             /   \                     /   \
    //            /     \                   /     \
    //           y       xr               yl       x
    //          / \                               / \
    //        yl   yr                           yr   xr
    //
    fn rotate_right(&mut self, x: usize) {
        let y = match self.nodes[x].left {
            Some(y) => y,
            None => panic!("rotate_right(): no left child ? Call the programmer"),
        };

        let yr = self.nodes[y].right;
        self.nodes[x].left = yr;
        if let Some(yr) = yr {
            self.nodes[yr].parent = Some(x);
        }

        self.replace_child(x, y);
        self.nodes[y].right = Some(x);
        self.nodes[x].parent = Some(y);
    }
}

/// In-order iterator over keys, refer to [RedBlackTree::iter].
pub struct Iter<'a> {
    nodes: &'a [Node],
    paths: Vec<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.paths.pop()?;
        let node = &self.nodes[idx];
        build_iter(self.nodes, node.right, &mut self.paths);
        Some(node.key)
    }
}

// push node and its chain of left descendants.
fn build_iter(nodes: &[Node], mut node: Option<usize>, paths: &mut Vec<usize>) {
    while let Some(idx) = node {
        paths.push(idx);
        node = nodes[idx].left;
    }
}

#[cfg(test)]
#[path = "rbtree_test.rs"]
mod rbtree_test;
