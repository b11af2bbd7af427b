//! Basic blocks, successor edges and predecessor chains of a mid-level IR.
//!
//! The graph lives in [`mir`]; [`storage`] holds the arena and intrusive
//! list plumbing it is built on.

pub use mir::*;
pub use storage;
