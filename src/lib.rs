//! b2bridge - Frame.io ⇄ Backblaze B2 bridge
//!
//! A webhook-driven service behind Frame.io custom actions. It walks
//! users through a small form dialogue, then either exports a flattened
//! asset tree to a B2 bucket or imports a B2 object back into Frame.io.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;

pub use config::config;
pub use error::{Error, Result};
pub use state::AppState;
