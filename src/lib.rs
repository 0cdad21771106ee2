//! Korean spell checking by dictionary substitution, with an advisory
//! confidence from a remote ML4K text classifier.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod spell_check;

pub use error::{AppError, Result};
