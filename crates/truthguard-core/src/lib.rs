//! TruthGuard Core
//!
//! Types and errors shared across the TruthGuard components.
//!
//! This crate provides:
//! - The fixed-shape model input (`TokenizedInput`)
//! - The calibrated output (`InferenceResult`)
//! - The error taxonomy used by the tokenizer, runtime and service

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{InferenceResult, TokenizedInput, MAX_LEN};
