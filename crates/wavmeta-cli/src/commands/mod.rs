//! CLI command implementations

pub mod inspect;
pub mod json_output;
pub mod loops;
pub mod rewrite;

mod reporting;
