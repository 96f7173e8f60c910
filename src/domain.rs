//! Domain models for requirement rewriting.
//!
//! This module contains the authentication context, the URL rewrite rules,
//! the line classifier and the configuration file format.

mod auth;
pub use auth::{AuthContext, ProjectNames};

/// Local checkout substitution for selected projects.
pub mod checkout;

mod config;
pub use config::Config;

/// Classification of requirement lines.
pub mod line;
pub use line::{Classified, TokenSet};

/// Source-control URL rewriting.
pub mod rewrite;
pub use rewrite::{Forge, RewriteRule, Rewriter, Rewritten, Transport};
