//! Client for editing assembly designs over the configuration-management API.
//!
//! A design is a tree of platforms, each holding components (with optional
//! attachments) and variables. [`design::Design`] turns operations such as
//! "add component" or "set variable" into read-merge-submit cycles against the
//! service, through an injected [`transport::Transport`].

pub mod config;
pub mod design;
pub mod error;
pub mod models;
pub mod transport;
pub mod wire;

pub use config::ClientConfig;
pub use design::Design;
pub use error::{DesignError, ErrorKind, Result};
