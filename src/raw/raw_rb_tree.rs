use alloc::vec::Vec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Header, Node};

/// The red-black tree core backing every collection in this crate.
///
/// The raw tree knows nothing about keys or comparators. Every operation that
/// needs ordering takes a predicate over the stored values, so one
/// implementation serves set and map, unique and multi flavors alike.
pub(crate) struct RawRbTree<T> {
    /// Arena owning every node's links.
    pub(super) nodes: Arena<Node>,
    /// Arena owning every element, addressed by `Node::value`.
    pub(super) values: Arena<T>,
    /// Anchor caching the root, minimum and maximum.
    pub(super) header: Header,
    /// Number of elements in the tree.
    pub(super) len: usize,
}

impl<T> RawRbTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            values: Arena::new(),
            header: Header::EMPTY,
            len: 0,
        }
    }

    /// Returns the number of elements in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The largest number of elements a tree can hold.
    pub(crate) const fn max_size() -> usize {
        Handle::MAX
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.header.root
    }

    /// Handle of the minimum node, if any.
    pub(crate) fn leftmost(&self) -> Option<Handle> {
        self.header.leftmost
    }

    /// Handle of the maximum node, if any.
    pub(crate) fn rightmost(&self) -> Option<Handle> {
        self.header.rightmost
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    #[inline]
    pub(super) fn node_mut(&mut self, handle: Handle) -> &mut Node {
        self.nodes.get_mut(handle)
    }

    #[inline]
    pub(crate) fn value(&self, handle: Handle) -> &T {
        self.values.get(self.nodes.get(handle).value)
    }

    /// Returns the element at `handle` mutably.
    ///
    /// Callers must not change anything that takes part in ordering.
    #[inline]
    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut T {
        self.values.get_mut(self.nodes.get(handle).value)
    }

    /// Returns the element at `handle` mutably from a raw pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawRbTree<T>`.
    /// - The caller must have logical exclusive access to the element at `handle`.
    #[inline]
    pub(crate) unsafe fn value_mut_ptr<'a>(ptr: *mut Self, handle: Handle) -> &'a mut T {
        // SAFETY: `nodes` is only read and holds no elements. Of `values`, only the one
        // slot the caller has exclusive access to is borrowed.
        unsafe {
            let value = (*core::ptr::addr_of!((*ptr).nodes)).get(handle).value;
            Arena::get_mut_ptr(core::ptr::addr_of_mut!((*ptr).values), value)
        }
    }

    #[inline]
    pub(crate) fn parent(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).parent
    }

    #[inline]
    pub(crate) fn left(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).left
    }

    #[inline]
    pub(crate) fn right(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).right
    }

    /// A missing child counts as a black leaf.
    #[inline]
    pub(super) fn is_red(&self, link: Option<Handle>) -> bool {
        link.is_some_and(|h| self.nodes.get(h).is_red())
    }

    #[inline]
    pub(super) fn is_black(&self, link: Option<Handle>) -> bool {
        !self.is_red(link)
    }

    #[inline]
    pub(super) fn set_color(&mut self, handle: Handle, color: Color) {
        self.nodes.get_mut(handle).color = color;
    }

    /// Points whatever referenced `old` (its parent, or the header if `old`
    /// was the root) at `new` instead. Does not touch `new.parent`.
    pub(super) fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.header.root = new,
            Some(p) => {
                let parent = self.nodes.get_mut(p);
                if parent.left == Some(old) {
                    parent.left = new;
                } else {
                    parent.right = new;
                }
            }
        }
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        if let Some(root) = self.header.root {
            log::trace!("clearing red-black tree of {} elements", self.len);
            self.erase_subtree(root);
        }
        self.nodes.clear();
        self.values.clear();
        self.header = Header::EMPTY;
        self.len = 0;
    }

    /// Frees `x` and all of its descendants, children before parents.
    ///
    /// Leaves the links into the subtree dangling; callers reset them.
    fn erase_subtree(&mut self, x: Handle) {
        let (left, right) = (self.left(x), self.right(x));
        if let Some(left) = left {
            self.erase_subtree(left);
        }
        if let Some(right) = right {
            self.erase_subtree(right);
        }
        drop(self.free_node(x));
    }

    /// Releases the node `x` and hands back its element. Does not touch links.
    pub(super) fn free_node(&mut self, x: Handle) -> T {
        let node = self.nodes.take(x);
        self.values.take(node.value)
    }

    /// Exchanges the contents of two trees in O(1).
    pub(crate) fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// Removes every element, in order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut handles = Vec::with_capacity(self.len);
        let mut current = self.header.leftmost;
        while let Some(h) = current {
            handles.push(h);
            current = self.successor(h);
        }

        let result = handles.into_iter().map(|h| self.free_node(h)).collect();

        self.nodes.clear();
        self.values.clear();
        self.header = Header::EMPTY;
        self.len = 0;

        result
    }
}

impl<T: Clone> RawRbTree<T> {
    /// Copies `x` and its subtree below `parent`, keeping shape and colors.
    ///
    /// Recurses on right children and loops on left ones.
    fn copy_subtree(&mut self, src: &Self, x: Handle, parent: Option<Handle>) -> Handle {
        let top = self.clone_node(src, x, parent);
        if let Some(right) = src.right(x) {
            let copied = self.copy_subtree(src, right, Some(top));
            self.node_mut(top).right = Some(copied);
        }

        let mut p = top;
        let mut x = src.left(x);
        while let Some(source) = x {
            let y = self.clone_node(src, source, Some(p));
            self.node_mut(p).left = Some(y);
            if let Some(right) = src.right(source) {
                let copied = self.copy_subtree(src, right, Some(y));
                self.node_mut(y).right = Some(copied);
            }
            p = y;
            x = src.left(source);
        }

        top
    }

    fn clone_node(&mut self, src: &Self, x: Handle, parent: Option<Handle>) -> Handle {
        let value = crate::error::unwrap_insert(self.values.try_alloc(src.value(x).clone()));
        let node = Node {
            color: src.node(x).color,
            parent,
            left: None,
            right: None,
            value,
        };
        crate::error::unwrap_insert(self.nodes.try_alloc(node))
    }
}

impl<T: Clone> Clone for RawRbTree<T> {
    /// Deep-copies the tree without consulting any comparator: the copy has
    /// exactly the source's shape and colors.
    fn clone(&self) -> Self {
        let mut copy = Self {
            nodes: Arena::with_capacity(self.len),
            values: Arena::with_capacity(self.len),
            header: Header::EMPTY,
            len: 0,
        };

        if let Some(root) = self.header.root {
            log::trace!("copying red-black tree of {} elements", self.len);
            let root = copy.copy_subtree(self, root, None);
            copy.header = Header {
                root: Some(root),
                leftmost: Some(copy.minimum(root)),
                rightmost: Some(copy.maximum(root)),
            };
            copy.len = self.len;
        }

        copy
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::manual_assert, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;
    use core::fmt::Debug;
    use proptest::prelude::*;

    impl<T: Debug> RawRbTree<T> {
        /// Validates every red-black and header invariant, using `less` as the
        /// strict weak order. Panics with a descriptive message on violation.
        /// Returns the black height of the tree.
        pub(crate) fn validate_invariants_by(&self, mut less: impl FnMut(&T, &T) -> bool) -> usize {
            let Some(root) = self.header.root else {
                assert_eq!(self.len, 0, "empty tree should have len 0");
                assert!(self.header.leftmost.is_none(), "empty tree should have no leftmost");
                assert!(self.header.rightmost.is_none(), "empty tree should have no rightmost");
                assert_eq!(self.nodes.len(), 0, "empty tree should own no nodes");
                assert_eq!(self.values.len(), 0, "empty tree should own no elements");
                return 0;
            };

            let mut errors: Vec<String> = Vec::new();

            if self.node(root).parent.is_some() {
                errors.push(format!("root {:?} has a parent", root));
            }
            if self.node(root).is_red() {
                errors.push(String::from("root is red"));
            }

            let black_height = self.validate_node(root, &mut errors);

            // In-order walk through successor links must see every node, sorted.
            let mut count = 0;
            let mut previous: Option<Handle> = None;
            let mut current = self.header.leftmost;
            while let Some(h) = current {
                if let Some(p) = previous {
                    if less(self.value(h), self.value(p)) {
                        errors.push(format!("order violated: {:?} after {:?}", self.value(h), self.value(p)));
                    }
                    if self.predecessor(h) != Some(p) {
                        errors.push(format!("predecessor of {:?} is not {:?}", h, p));
                    }
                }
                count += 1;
                previous = current;
                current = self.successor(h);
            }

            if self.len != count {
                errors.push(format!("len mismatch: self.len={}, in-order count={}", self.len, count));
            }
            if self.nodes.len() != count {
                errors.push(format!("arena holds {} nodes, tree links {}", self.nodes.len(), count));
            }
            if self.values.len() != count {
                errors.push(format!("arena holds {} elements, tree links {}", self.values.len(), count));
            }
            if self.header.leftmost != Some(self.minimum(root)) {
                errors.push(String::from("header.leftmost is not the minimum"));
            }
            if self.header.rightmost != Some(self.maximum(root)) {
                errors.push(String::from("header.rightmost is not the maximum"));
            }
            if previous != self.header.rightmost {
                errors.push(String::from("in-order walk did not end at header.rightmost"));
            }

            assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
            black_height
        }

        /// Checks links and colors below `h`; returns the subtree's black height.
        fn validate_node(&self, h: Handle, errors: &mut Vec<String>) -> usize {
            let node = self.node(h);
            let mut heights = [0usize; 2];

            for (slot, child) in [node.left, node.right].into_iter().enumerate() {
                let Some(c) = child else {
                    heights[slot] = 1;
                    continue;
                };
                if self.node(c).parent != Some(h) {
                    errors.push(format!("child {:?} of {:?} has parent {:?}", c, h, self.node(c).parent));
                }
                if node.is_red() && self.node(c).is_red() {
                    errors.push(format!("red node {:?} has red child {:?}", h, c));
                }
                heights[slot] = self.validate_node(c, errors);
            }

            if heights[0] != heights[1] {
                errors.push(format!("black height mismatch at {:?}: left={}, right={}", h, heights[0], heights[1]));
            }

            heights[0] + usize::from(!node.is_red())
        }
    }

    impl<T: Ord + Debug> RawRbTree<T> {
        pub(crate) fn validate_invariants(&self) -> usize {
            self.validate_invariants_by(|a, b| a < b)
        }

        /// Inserts keeping equal values adjacent, in arrival order.
        pub(crate) fn insert_ord(&mut self, value: T) -> Handle {
            let (parent, add_to_left) = self.multi_position(|v| value < *v);
            self.insert_at(parent, add_to_left, value).unwrap()
        }

        pub(crate) fn find_ord(&self, value: &T) -> Option<Handle> {
            self.lower_bound_by(|v| v < value).filter(|&h| self.value(h) == value)
        }

        pub(crate) fn in_order(&self) -> Vec<&T> {
            let mut out = Vec::with_capacity(self.len);
            let mut current = self.header.leftmost;
            while let Some(h) = current {
                out.push(self.value(h));
                current = self.successor(h);
            }
            out
        }

        /// Colors and child presence in pre-order: a shape fingerprint.
        fn shape(&self) -> Vec<(bool, bool, bool)> {
            let mut out = Vec::new();
            let mut stack: Vec<Handle> = self.header.root.into_iter().collect();
            while let Some(h) = stack.pop() {
                let node = self.node(h);
                out.push((node.is_red(), node.left.is_some(), node.right.is_some()));
                stack.extend(node.right);
                stack.extend(node.left);
            }
            out
        }
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Remove(i32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0i32..200).prop_map(Op::Insert),
            2 => (0i32..200).prop_map(Op::Remove),
        ]
    }

    #[test]
    fn empty_tree_is_valid() {
        let tree: RawRbTree<i32> = RawRbTree::new();
        assert_eq!(tree.validate_invariants(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.leftmost(), None);
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut tree = RawRbTree::new();
        for i in 0..1000 {
            tree.insert_ord(i);
            tree.validate_invariants();
        }
        // 2 * log2(1001) bounds the height; black height bounds half of it.
        assert!(tree.validate_invariants() <= 11);
    }

    #[test]
    fn clear_resets_header() {
        let mut tree = RawRbTree::new();
        for i in [5, 1, 9, 3, 7] {
            tree.insert_ord(i);
        }
        tree.clear();
        tree.validate_invariants();
        assert_eq!(tree.header, Header::EMPTY);

        tree.insert_ord(4);
        assert_eq!(tree.in_order(), [&4]);
    }

    #[test]
    fn clone_preserves_shape_and_colors() {
        let mut tree = RawRbTree::new();
        for i in [50, 20, 80, 10, 30, 70, 90, 25, 27, 26] {
            tree.insert_ord(i);
        }
        let copy = tree.clone();
        copy.validate_invariants();
        assert_eq!(copy.in_order(), tree.in_order());
        assert_eq!(copy.shape(), tree.shape());
    }

    #[test]
    fn drain_yields_in_order() {
        let mut tree = RawRbTree::new();
        for i in [3, 1, 2, 1] {
            tree.insert_ord(i);
        }
        assert_eq!(tree.drain_to_vec(), [1, 1, 2, 3]);
        tree.validate_invariants();
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn invariants_hold_after_every_mutation(ops in prop::collection::vec(op_strategy(), 0..400)) {
            let mut tree: RawRbTree<i32> = RawRbTree::new();
            let mut model: Vec<i32> = Vec::new();

            for op in ops {
                match op {
                    Op::Insert(v) => {
                        tree.insert_ord(v);
                        let at = model.partition_point(|&m| m <= v);
                        model.insert(at, v);
                    }
                    Op::Remove(v) => {
                        let removed = tree.find_ord(&v).map(|h| tree.remove(h));
                        let expected = model.binary_search(&v).ok().map(|i| model.remove(i));
                        prop_assert_eq!(removed, expected);
                    }
                }
                tree.validate_invariants();
                prop_assert_eq!(tree.in_order().into_iter().copied().collect::<Vec<_>>(), model.clone());
            }
        }

        #[test]
        fn copy_is_independent(values in prop::collection::vec(0i32..100, 1..100)) {
            let mut tree = RawRbTree::new();
            for &v in &values {
                tree.insert_ord(v);
            }
            let before: Vec<i32> = tree.in_order().into_iter().copied().collect();

            let mut copy = tree.clone();
            while let Some(first) = copy.leftmost() {
                copy.remove(first);
                copy.validate_invariants();
            }

            tree.validate_invariants();
            prop_assert_eq!(tree.in_order().into_iter().copied().collect::<Vec<_>>(), before);
        }
    }
}
