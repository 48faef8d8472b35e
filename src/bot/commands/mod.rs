//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Employee record commands
pub mod employee;

/// General utility commands
pub mod general;

/// Language switching
pub mod language;

/// Canned query commands
pub mod shortcut;

// Export commands
pub use employee::*;
pub use general::*;
pub use language::*;
pub use shortcut::*;
