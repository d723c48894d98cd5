//! # Treepack Core Library
//!
//! This crate provides directory-tree utilities built around a single
//! recursive-walk primitive.
//!
//! Every higher-level operation (recursive copy, recursive move, packing a
//! directory into a zip archive, unpacking one) is driven by the same
//! walker, so ordering, skip semantics, and error propagation behave
//! identically everywhere.
//!
//! ## Key Modules
//!
//! - [`walk`]: Ordered directory listing and the skip-aware recursive walker.
//! - [`transfer`]: Single-file copy and move (rename with copy fallback).
//! - [`tree`]: Recursive copy and move of whole directory trees.
//! - [`pack`]: Packing a directory into a zip stream and unpacking one.
//!
//! ## Examples
//!
//! ```no_run
//! use treepack::walk::{walk, WalkOutcome};
//! # fn main() -> Result<(), treepack::TreeError> {
//! walk("/some/dir".as_ref(), |dir, entry| {
//!     println!("{} / {}", dir.display(), entry.name.to_string_lossy());
//!     WalkOutcome::Continue
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::TreeError;

pub mod walk;

pub mod transfer;
pub mod tree;
pub mod pack;

// Cross-platform filesystem wrapper
pub mod fsx;
