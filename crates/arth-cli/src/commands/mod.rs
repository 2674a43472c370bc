//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (ledger source, advisor wiring)
//! - `serve` - Web server command
//! - `summary` - Dashboard and analytics views
//! - `advice` - Prompt preview, one-shot questions, interactive chat
//! - `config` - Provider configuration display

pub mod advice;
pub mod config;
pub mod core;
pub mod serve;
pub mod summary;

// Re-export command functions for main.rs
pub use advice::*;
pub use config::*;
pub use core::*;
pub use serve::*;
pub use summary::*;
