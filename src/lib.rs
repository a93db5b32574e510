#![doc(test(attr(deny(warnings))))]

//! Spendwise tracks income and categorized expenses against a wallet
//! balance, persists the wallet per profile, and renders summaries in a
//! terminal shell.

pub mod cli;
pub mod core;
pub mod errors;
pub mod utils;

pub use crate::core::{Outcome, PrefixMatch, WalletManager};
pub use errors::{AppError, CliError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Spendwise tracing initialized.");
    });
}
