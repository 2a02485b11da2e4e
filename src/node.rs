use std::fmt;

// Node corresponds to a single key in RedBlackTree instance. Links are
// indices into the tree's node arena, children are owned by this node
// while parent is only a back-reference for walking up the tree.
#[derive(Clone)]
pub struct Node {
    pub(crate) key: i64,
    pub(crate) black: bool,                // store: black or red
    pub(crate) parent: Option<usize>,      // link: parent, non-owning
    pub(crate) left: Option<usize>,        // store: left child
    pub(crate) right: Option<usize>,       // store: right child
}

impl Node {
    /// New nodes start out red and detached.
    pub(crate) fn new(key: i64) -> Node {
        Node {
            key,
            black: false,
            parent: None,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.black = true
    }
}

impl Node {
    /// Return the key stored in this node.
    #[inline]
    pub fn to_key(&self) -> i64 {
        self.key
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.black
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        !self.black
    }

    /// Return `'B'` for a black node and `'R'` for a red node.
    pub fn to_color(&self) -> char {
        if self.black {
            'B'
        } else {
            'R'
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.to_color(), self.key)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
