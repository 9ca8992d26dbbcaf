use super::handle::Handle;
use super::node::Color;
use super::raw_rb_tree::RawRbTree;

impl<T> RawRbTree<T> {
    /// Unlinks the node `z`, rebalances, and returns its element.
    ///
    /// Only `z`'s handle is invalidated; every other node keeps its handle.
    pub(crate) fn remove(&mut self, z: Handle) -> T {
        self.unlink(z);
        self.len -= 1;
        self.free_node(z)
    }

    /// Splices `z` out of the tree.
    ///
    /// When `z` has two children its in-order successor `y` is moved into
    /// `z`'s structural position and the two exchange colors, so the node
    /// actually leaving its slot has at most one child.
    fn unlink(&mut self, z: Handle) {
        let z_left = self.left(z);
        let z_right = self.right(z);
        let z_parent = self.parent(z);

        let x;
        let x_parent;
        let removed_color;

        if let (Some(zl), Some(zr)) = (z_left, z_right) {
            let y = self.minimum(zr);
            x = self.right(y);

            self.node_mut(zl).parent = Some(y);
            self.node_mut(y).left = Some(zl);

            if y == zr {
                x_parent = Some(y);
            } else {
                let yp = self.parent(y);
                x_parent = yp;
                if let Some(x) = x {
                    self.node_mut(x).parent = yp;
                }
                // `y` is the minimum of `zr`, hence a left child.
                let yp = yp.expect("`RawRbTree::unlink()` - successor has no parent!");
                self.node_mut(yp).left = x;
                self.node_mut(y).right = Some(zr);
                self.node_mut(zr).parent = Some(y);
            }

            self.replace_child(z_parent, z, Some(y));
            self.node_mut(y).parent = z_parent;

            let y_color = self.node(y).color;
            let z_color = self.node(z).color;
            self.set_color(y, z_color);
            removed_color = y_color;
        } else {
            x = z_left.or(z_right);
            x_parent = z_parent;
            if let Some(x) = x {
                self.node_mut(x).parent = z_parent;
            }
            self.replace_child(z_parent, z, x);

            if self.header.leftmost == Some(z) {
                self.header.leftmost = match x {
                    Some(x) => Some(self.minimum(x)),
                    None => z_parent,
                };
            }
            if self.header.rightmost == Some(z) {
                self.header.rightmost = match x {
                    Some(x) => Some(self.maximum(x)),
                    None => z_parent,
                };
            }
            removed_color = self.node(z).color;
        }

        if removed_color == Color::Black {
            self.remove_fixup(x, x_parent);
        }
    }

    /// Restores the red-black invariants after a black node left the slot now
    /// held by `x` (possibly empty) below `x_parent`.
    fn remove_fixup(&mut self, mut x: Option<Handle>, mut x_parent: Option<Handle>) {
        while x != self.header.root && self.is_black(x) {
            let Some(p) = x_parent else {
                break;
            };

            if self.left(p) == x {
                let mut w = self.right(p).expect("`RawRbTree::remove_fixup()` - missing sibling!");
                if self.is_red(Some(w)) {
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_left(p);
                    w = self.right(p).expect("`RawRbTree::remove_fixup()` - missing sibling!");
                }

                if self.is_black(self.left(w)) && self.is_black(self.right(w)) {
                    self.set_color(w, Color::Red);
                    x = Some(p);
                    x_parent = self.parent(p);
                } else {
                    if self.is_black(self.right(w)) {
                        if let Some(near) = self.left(w) {
                            self.set_color(near, Color::Black);
                        }
                        self.set_color(w, Color::Red);
                        self.rotate_right(w);
                        w = self.right(p).expect("`RawRbTree::remove_fixup()` - missing sibling!");
                    }
                    let p_color = self.node(p).color;
                    self.set_color(w, p_color);
                    self.set_color(p, Color::Black);
                    if let Some(far) = self.right(w) {
                        self.set_color(far, Color::Black);
                    }
                    self.rotate_left(p);
                    x = self.header.root;
                    break;
                }
            } else {
                let mut w = self.left(p).expect("`RawRbTree::remove_fixup()` - missing sibling!");
                if self.is_red(Some(w)) {
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_right(p);
                    w = self.left(p).expect("`RawRbTree::remove_fixup()` - missing sibling!");
                }

                if self.is_black(self.left(w)) && self.is_black(self.right(w)) {
                    self.set_color(w, Color::Red);
                    x = Some(p);
                    x_parent = self.parent(p);
                } else {
                    if self.is_black(self.left(w)) {
                        if let Some(near) = self.right(w) {
                            self.set_color(near, Color::Black);
                        }
                        self.set_color(w, Color::Red);
                        self.rotate_left(w);
                        w = self.left(p).expect("`RawRbTree::remove_fixup()` - missing sibling!");
                    }
                    let p_color = self.node(p).color;
                    self.set_color(w, p_color);
                    self.set_color(p, Color::Black);
                    if let Some(far) = self.left(w) {
                        self.set_color(far, Color::Black);
                    }
                    self.rotate_right(p);
                    x = self.header.root;
                    break;
                }
            }
        }

        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }
}
