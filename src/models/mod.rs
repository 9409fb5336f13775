//! Domain models for assembly designs.
//!
//! # Core Concepts
//!
//! - [`CiSnapshot`]: The server's current view of a configuration item (platform,
//!   component, attachment or variable), decoded tolerantly from a response body.
//! - [`CiRecord`]: What the client submits back: merged attributes, owner
//!   properties and CI-level properties.
//! - [`Release`]: A batch of pending design changes that must be committed.
//! - [`VariableScope`]: Where a variable lives, on a platform or design-wide.
//!
//! Nothing here is cached between calls. Every snapshot is rebuilt from the
//! service for the operation that needs it.

mod ci;
mod release;
mod variable;

pub use ci::*;
pub use release::*;
pub use variable::*;
