//! This crate provides [`Chain`], an editable sequence that supports cheap
//! positional insertion and removal by representing its contents as a tree
//! of small segments instead of one contiguous buffer.
//!
//! A chain is made of three kinds of nodes:
//! - segments, which own up to `N` elements inline;
//! - slices, which expose a sub-range of another node without copying it;
//! - joins, which concatenate two nodes.
//!
//! Nodes are reference-counted and can be shared between chains (for example
//! after [`Chain::slice`] or a [`Clone`]). Shared nodes are copied on write,
//! so edits through one chain are never observable through another.
//!
//! [`ByteChain`] is a thin wrapper for items of a fixed byte size, for callers
//! that don't have a Rust element type at hand.

pub mod bytes;
pub mod chain;
pub mod error;
pub mod iter;
mod node;

/// [`Chain`] takes a "segment capacity" parameter, which must be a
/// reasonably-sized power of two. We use this trait to enforce that.
pub trait ValidSegmentCapacity {}
pub struct Const<const N: usize> {}

impl ValidSegmentCapacity for Const<4> {}
impl ValidSegmentCapacity for Const<8> {}
impl ValidSegmentCapacity for Const<16> {}
impl ValidSegmentCapacity for Const<32> {}
impl ValidSegmentCapacity for Const<64> {}
impl ValidSegmentCapacity for Const<128> {}

pub use bytes::ByteChain;
pub use chain::Chain;
pub use error::{ChainError, InvalidArgument};
pub use iter::Iter;
