pub mod error;

pub use error::{CleanerError, RemoteRefError, Result};
