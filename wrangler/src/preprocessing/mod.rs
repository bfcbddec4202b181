//! The listings wrangling pipeline and the audit of its output.

pub mod pipeline;
pub mod validator;

pub use pipeline::{wrangle, CleanTable, WrangleOutcome, WranglePipeline, WrangleReport};
pub use validator::{TableValidator, ValidationResult, ValidationStats};
