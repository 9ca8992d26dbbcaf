use super::handle::Handle;
use super::raw_rb_tree::RawRbTree;

impl<T> RawRbTree<T> {
    /// Leftmost node of the subtree rooted at `x`.
    pub(crate) fn minimum(&self, mut x: Handle) -> Handle {
        while let Some(left) = self.left(x) {
            x = left;
        }
        x
    }

    /// Rightmost node of the subtree rooted at `x`.
    pub(crate) fn maximum(&self, mut x: Handle) -> Handle {
        while let Some(right) = self.right(x) {
            x = right;
        }
        x
    }

    /// The next node in order, or `None` (the header) after the maximum.
    pub(crate) fn successor(&self, x: Handle) -> Option<Handle> {
        if let Some(right) = self.right(x) {
            return Some(self.minimum(right));
        }
        let mut x = x;
        let mut parent = self.parent(x);
        while let Some(p) = parent
            && self.right(p) == Some(x)
        {
            x = p;
            parent = self.parent(p);
        }
        parent
    }

    /// The previous node in order, or `None` before the minimum.
    pub(crate) fn predecessor(&self, x: Handle) -> Option<Handle> {
        if let Some(left) = self.left(x) {
            return Some(self.maximum(left));
        }
        let mut x = x;
        let mut parent = self.parent(x);
        while let Some(p) = parent
            && self.left(p) == Some(x)
        {
            x = p;
            parent = self.parent(p);
        }
        parent
    }

    /// First node whose value is not below the key.
    ///
    /// `value_below` reports whether a stored value orders strictly before the
    /// key being searched; it is the only comparison made.
    pub(crate) fn lower_bound_by(&self, mut value_below: impl FnMut(&T) -> bool) -> Option<Handle> {
        let mut bound = None;
        let mut x = self.header.root;
        while let Some(h) = x {
            if value_below(self.value(h)) {
                x = self.right(h);
            } else {
                bound = Some(h);
                x = self.left(h);
            }
        }
        bound
    }

    /// First node whose value orders strictly after the key.
    ///
    /// `key_below` reports whether the key orders strictly before a stored value.
    pub(crate) fn upper_bound_by(&self, mut key_below: impl FnMut(&T) -> bool) -> Option<Handle> {
        let mut bound = None;
        let mut x = self.header.root;
        while let Some(h) = x {
            if key_below(self.value(h)) {
                bound = Some(h);
                x = self.left(h);
            } else {
                x = self.right(h);
            }
        }
        bound
    }

    /// A node holding a key equal to the searched one, if any.
    ///
    /// Descends like [`lower_bound_by`](Self::lower_bound_by), then confirms
    /// equality with a single `key_below` test.
    pub(crate) fn find_by(
        &self,
        value_below: impl FnMut(&T) -> bool,
        mut key_below: impl FnMut(&T) -> bool,
    ) -> Option<Handle> {
        self.lower_bound_by(value_below).filter(|&h| !key_below(self.value(h)))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn build(values: &[i32]) -> RawRbTree<i32> {
        let mut tree = RawRbTree::new();
        for &v in values {
            tree.insert_ord(v);
        }
        tree
    }

    fn lower(tree: &RawRbTree<i32>, key: i32) -> Option<i32> {
        tree.lower_bound_by(|v| *v < key).map(|h| *tree.value(h))
    }

    fn upper(tree: &RawRbTree<i32>, key: i32) -> Option<i32> {
        tree.upper_bound_by(|v| key < *v).map(|h| *tree.value(h))
    }

    #[test]
    fn walk_forward_and_backward() {
        let tree = build(&[50, 30, 70, 20, 40, 60, 80, 35, 45]);

        let mut forward = Vec::new();
        let mut current = tree.leftmost();
        while let Some(h) = current {
            forward.push(*tree.value(h));
            current = tree.successor(h);
        }
        assert_eq!(forward, [20, 30, 35, 40, 45, 50, 60, 70, 80]);

        let mut backward = Vec::new();
        let mut current = tree.rightmost();
        while let Some(h) = current {
            backward.push(*tree.value(h));
            current = tree.predecessor(h);
        }
        forward.reverse();
        assert_eq!(backward, forward);
    }

    #[test]
    fn bounds_on_unique_keys() {
        let tree = build(&[10, 20, 30]);
        assert_eq!(lower(&tree, 5), Some(10));
        assert_eq!(lower(&tree, 20), Some(20));
        assert_eq!(lower(&tree, 25), Some(30));
        assert_eq!(lower(&tree, 31), None);
        assert_eq!(upper(&tree, 20), Some(30));
        assert_eq!(upper(&tree, 30), None);
        assert_eq!(upper(&tree, 0), Some(10));
    }

    #[test]
    fn bounds_bracket_equal_runs() {
        let tree = build(&[7, 3, 7, 9, 7, 1]);
        let first = tree.lower_bound_by(|v| *v < 7).unwrap();
        let past = tree.upper_bound_by(|v| 7 < *v).unwrap();

        let mut run = 0;
        let mut current = Some(first);
        while current != Some(past) {
            let h = current.unwrap();
            assert_eq!(*tree.value(h), 7);
            run += 1;
            current = tree.successor(h);
        }
        assert_eq!(run, 3);
        assert_eq!(*tree.value(past), 9);
    }

    #[test]
    fn find_confirms_equality() {
        let tree = build(&[10, 20, 30]);
        assert!(tree.find_by(|v| *v < 20, |v| 20 < *v).is_some());
        assert!(tree.find_by(|v| *v < 25, |v| 25 < *v).is_none());
        assert!(tree.find_by(|v| *v < 99, |v| 99 < *v).is_none());

        let empty: RawRbTree<i32> = RawRbTree::new();
        assert!(empty.find_by(|v| *v < 1, |v| 1 < *v).is_none());
    }
}
