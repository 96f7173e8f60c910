//! Private-repository requirement rewriting for pip
//!
//! Requirements files are flattened into a pip argument list. Source-control
//! URLs that would normally need an SSH agent are rewritten to token
//! authenticated HTTPS so they can be installed non-interactively.

pub mod domain;
pub use domain::{AuthContext, Classified, Config, Forge, ProjectNames, Rewriter, Rewritten};

/// Reading requirements files and expanding `-r` includes.
pub mod storage;
pub use storage::{CollectError, ReadError, collect_requirements};
