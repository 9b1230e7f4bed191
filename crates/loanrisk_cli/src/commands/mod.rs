//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod run;
pub mod validate;
