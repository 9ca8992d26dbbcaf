mod arena;
mod handle;
mod insert;
mod navigate;
mod node;
mod raw_rb_tree;
mod remove;
mod rotate;

pub(crate) use handle::Handle;
pub(crate) use raw_rb_tree::RawRbTree;
