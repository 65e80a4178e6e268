//! Domain types shared by the Lumen crates
//!
//! Holds the prompt newtype, the immutable generation result, the
//! user-facing error classification and the download filename rule.

#![allow(clippy::must_use_candidate)]

mod error;
mod filename;
mod image;
mod prompt;

pub use error::{ErrorCategory, ErrorInfo};
pub use filename::derive_filename;
pub use image::{GenerationResult, Image};
pub use prompt::{EmptyPrompt, Prompt};
