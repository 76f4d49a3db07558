//! Data models for b2bridge.
//!
//! Defines the core types used throughout the system including
//! asset-tree nodes, flattened export entries, transfer outcomes,
//! and the interactive-form wire types.

mod asset;
mod forms;
mod transfer;

pub use asset::*;
pub use forms::*;
pub use transfer::*;
