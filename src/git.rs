//! Git commit model and repository access.

pub mod commit;
pub mod repository;

pub use commit::{Author, Commit};
pub use repository::GitRepository;

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 7;
