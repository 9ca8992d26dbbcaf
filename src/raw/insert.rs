use super::handle::Handle;
use super::node::{Color, Node};
use super::raw_rb_tree::RawRbTree;
use crate::error::Error;

/// Where a new node goes: below `parent` (the header when `None`), on the
/// left when `add_to_left` is set.
pub(crate) type Slot = (Option<Handle>, bool);

impl<T> RawRbTree<T> {
    /// Finds the slot for a key that may equal existing keys.
    ///
    /// `key_below` reports whether the new key orders strictly before a stored
    /// value. Equal keys descend right, so they land after their equals.
    pub(crate) fn multi_position(&self, mut key_below: impl FnMut(&T) -> bool) -> Slot {
        let mut parent = None;
        let mut add_to_left = true;
        let mut x = self.header.root;
        while let Some(h) = x {
            parent = Some(h);
            add_to_left = key_below(self.value(h));
            x = if add_to_left { self.left(h) } else { self.right(h) };
        }
        (parent, add_to_left)
    }

    /// Finds the slot for a key that must not equal any existing key.
    ///
    /// `key_below` is as for [`multi_position`](Self::multi_position);
    /// `value_below` reports whether a stored value orders strictly before the
    /// new key. Returns `Err` with the node holding an equal key.
    pub(crate) fn unique_position(
        &self,
        key_below: impl FnMut(&T) -> bool,
        mut value_below: impl FnMut(&T) -> bool,
    ) -> Result<Slot, Handle> {
        let (parent, add_to_left) = self.multi_position(key_below);
        let Some(p) = parent else {
            return Ok((None, true));
        };

        // The only possible equal key is the in-order predecessor of the slot.
        let candidate = if add_to_left {
            if self.header.leftmost == Some(p) {
                return Ok((parent, true));
            }
            self.predecessor(p).expect("`RawRbTree::unique_position()` - non-minimum node has no predecessor!")
        } else {
            p
        };

        if value_below(self.value(candidate)) {
            Ok((parent, add_to_left))
        } else {
            Err(candidate)
        }
    }

    /// Finds a slot for a key expected to belong just before `hint`.
    ///
    /// Checks the hint against its neighbors in O(1); `None` means the hint
    /// was wrong and the caller should fall back to a full descent. The new
    /// key must order after every key at or before the slot and strictly
    /// before the hint, so it still lands after all of its equals.
    pub(crate) fn multi_hint_position(
        &self,
        hint: Option<Handle>,
        mut key_below: impl FnMut(&T) -> bool,
    ) -> Option<Slot> {
        let before = self.before_hint(hint);
        let fits_after = before.is_none_or(|b| !key_below(self.value(b)));
        let fits_before = hint.is_none_or(|h| key_below(self.value(h)));
        if fits_after && fits_before { self.slot_between(before, hint) } else { None }
    }

    /// Unique-key counterpart of [`multi_hint_position`](Self::multi_hint_position).
    ///
    /// `Ok(None)` asks for a full descent; `Err` carries a neighbor of the
    /// hint holding an equal key.
    pub(crate) fn unique_hint_position(
        &self,
        hint: Option<Handle>,
        mut key_below: impl FnMut(&T) -> bool,
        mut value_below: impl FnMut(&T) -> bool,
    ) -> Result<Option<Slot>, Handle> {
        let before = self.before_hint(hint);

        if let Some(b) = before
            && !value_below(self.value(b))
        {
            return if key_below(self.value(b)) { Ok(None) } else { Err(b) };
        }
        if let Some(h) = hint
            && !key_below(self.value(h))
        {
            return if value_below(self.value(h)) { Ok(None) } else { Err(h) };
        }

        Ok(self.slot_between(before, hint))
    }

    /// The node before position `hint`, or `None` if `hint` is the first position.
    fn before_hint(&self, hint: Option<Handle>) -> Option<Handle> {
        match hint {
            Some(h) if self.header.leftmost == Some(h) => None,
            Some(h) => self.predecessor(h),
            None => self.header.rightmost,
        }
    }

    /// A free child slot between two in-order neighbors.
    fn slot_between(&self, before: Option<Handle>, after: Option<Handle>) -> Option<Slot> {
        match (before, after) {
            (None, None) => Some((None, true)),
            (Some(b), _) if self.right(b).is_none() => Some((Some(b), false)),
            (_, Some(a)) if self.left(a).is_none() => Some((Some(a), true)),
            _ => None,
        }
    }

    /// Allocates a node for `value`, links it into `slot` and rebalances.
    ///
    /// Allocation is the only fallible step and happens before any link is
    /// touched, so on error the tree is unchanged.
    pub(crate) fn insert_at(&mut self, parent: Option<Handle>, add_to_left: bool, value: T) -> Result<Handle, Error> {
        if self.len >= Self::max_size() {
            return Err(Error::CapacityOverflow { max: Self::max_size() });
        }
        let v = self.values.try_alloc(value)?;
        let x = match self.nodes.try_alloc(Node::new(v)) {
            Ok(x) => x,
            Err(err) => {
                drop(self.values.take(v));
                return Err(err);
            }
        };

        self.node_mut(x).parent = parent;
        match parent {
            None => {
                self.header.root = Some(x);
                self.header.leftmost = Some(x);
                self.header.rightmost = Some(x);
            }
            Some(p) if add_to_left => {
                self.node_mut(p).left = Some(x);
                if self.header.leftmost == Some(p) {
                    self.header.leftmost = Some(x);
                }
            }
            Some(p) => {
                self.node_mut(p).right = Some(x);
                if self.header.rightmost == Some(p) {
                    self.header.rightmost = Some(x);
                }
            }
        }
        self.len += 1;

        self.insert_fixup(x);
        Ok(x)
    }

    /// Restores the red-black invariants after linking the red node `x`.
    fn insert_fixup(&mut self, mut x: Handle) {
        while let Some(p) = self.parent(x)
            && self.is_red(Some(p))
        {
            let g = self.parent(p).expect("`RawRbTree::insert_fixup()` - red node is the root!");

            if self.left(g) == Some(p) {
                let uncle = self.right(g);
                if let Some(u) = uncle
                    && self.is_red(uncle)
                {
                    self.set_color(p, Color::Black);
                    self.set_color(u, Color::Black);
                    self.set_color(g, Color::Red);
                    x = g;
                } else {
                    let mut p = p;
                    if self.right(p) == Some(x) {
                        // Inner side: straighten the zig-zag first.
                        self.rotate_left(p);
                        p = x;
                    }
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_right(g);
                    break;
                }
            } else {
                let uncle = self.left(g);
                if let Some(u) = uncle
                    && self.is_red(uncle)
                {
                    self.set_color(p, Color::Black);
                    self.set_color(u, Color::Black);
                    self.set_color(g, Color::Red);
                    x = g;
                } else {
                    let mut p = p;
                    if self.left(p) == Some(x) {
                        self.rotate_right(p);
                        p = x;
                    }
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_left(g);
                    break;
                }
            }
        }

        if let Some(root) = self.header.root {
            self.set_color(root, Color::Black);
        }
    }
}
