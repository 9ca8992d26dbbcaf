use super::handle::Handle;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A tree node: color and three structural links.
///
/// `parent` is a non-owning back reference used only for traversal and
/// rebalancing. The element itself lives in the tree's value arena at
/// `value`, so walking links never touches element storage.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    pub(crate) color: Color,
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    pub(crate) value: Handle,
}

impl Node {
    /// Creates an unlinked red node for the element at `value`.
    pub(crate) const fn new(value: Handle) -> Self {
        Self {
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
            value,
        }
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

/// The tree's anchor. Holds no element.
///
/// `root` is the real root, `leftmost`/`rightmost` cache the minimum and
/// maximum nodes. All three are `None` exactly when the tree is empty. A
/// position that refers to no node is the "end" position, one past the
/// maximum and, walking backwards, the node before the minimum.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Header {
    pub(crate) root: Option<Handle>,
    pub(crate) leftmost: Option<Handle>,
    pub(crate) rightmost: Option<Handle>,
}

impl Header {
    pub(crate) const EMPTY: Self = Self {
        root: None,
        leftmost: None,
        rightmost: None,
    };
}
