//! Service layer for b2bridge.
//!
//! Contains the core logic and external service integrations:
//! - Signature (custom-action callback verification)
//! - Dialogue (interactive-form decision tree)
//! - Flatten (asset-tree expansion into transferable files)
//! - Transfer (export fan-out and import orchestration)
//! - FrameIo/B2 (thin collaborator API clients)

mod b2;
pub mod dialogue;
pub mod flatten;
mod frameio;
pub mod signature;
mod transfer;

pub use b2::{B2Client, B2Connection};
pub use dialogue::DialogueStep;
pub use frameio::FrameIoClient;
pub use transfer::TransferService;
