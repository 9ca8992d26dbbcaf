//! The two shape-changing primitives. Every rebalancing case is a sequence of
//! at most two of these plus recoloring.

use super::handle::Handle;
use super::raw_rb_tree::RawRbTree;

impl<T> RawRbTree<T> {
    /// ```text
    ///       p                         p
    ///      / \                       / \
    ///     x   d    rotate left      y   d
    ///    / \       ===========>    / \
    ///   a   y                     x   c
    ///      / \                   / \
    ///     b   c                 a   b
    /// ```
    ///
    /// `x` must have a right child. Updates the header if `x` was the root.
    pub(super) fn rotate_left(&mut self, x: Handle) {
        let y = self.right(x).expect("`RawRbTree::rotate_left()` - `x` has no right child!");
        let b = self.left(y);
        let p = self.parent(x);

        self.node_mut(x).right = b;
        if let Some(b) = b {
            self.node_mut(b).parent = Some(x);
        }

        self.node_mut(y).parent = p;
        self.replace_child(p, x, Some(y));

        self.node_mut(y).left = Some(x);
        self.node_mut(x).parent = Some(y);
    }

    /// ```text
    ///       p                         p
    ///      / \                       / \
    ///     d   x    rotate right     d   y
    ///        / \   ============>       / \
    ///       y   a                     b   x
    ///      / \                           / \
    ///     b   c                         c   a
    /// ```
    ///
    /// `x` must have a left child. Updates the header if `x` was the root.
    pub(super) fn rotate_right(&mut self, x: Handle) {
        let y = self.left(x).expect("`RawRbTree::rotate_right()` - `x` has no left child!");
        let c = self.right(y);
        let p = self.parent(x);

        self.node_mut(x).left = c;
        if let Some(c) = c {
            self.node_mut(c).parent = Some(x);
        }

        self.node_mut(y).parent = p;
        self.replace_child(p, x, Some(y));

        self.node_mut(y).right = Some(x);
        self.node_mut(x).parent = Some(y);
    }
}
