//! One-shot file-system helpers behind the `assets` binary.
//!
//! - [`dir_clear`] - Clearing a generated-output directory
//! - [`fingerprint`] - Content-hash filename renaming for cache busting

pub mod dir_clear;
pub mod fingerprint;
