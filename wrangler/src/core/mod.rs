//! Core domain definitions for apartment listings.
//!
//! [`schema`] fixes the column layout and calendar constants, [`domain`]
//! holds the typed row structures and the build-date encoding.

pub mod domain;
pub mod schema;
