pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Config;
pub use core::git::{GitRepository, RepositoryOps};
pub use utils::{CleanerError, Result};
