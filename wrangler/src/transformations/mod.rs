//! Row filters and column transforms over listing DataFrames.
//!
//! # Modules
//!
//! - [`filtering`]: Column access and row predicates as polars expressions
//! - [`cleaning`]: The ordered cleaning and feature-derivation steps
//!
//! # Example
//!
//! ```no_run
//! use seoul_wrangler::transformations::{drop_missing_sales, retain_physically_valid};
//! use polars::prelude::*;
//!
//! # fn example(df: DataFrame) -> seoul_wrangler::WrangleResult<()> {
//! let priced = drop_missing_sales(&df)?;
//! let plausible = retain_physically_valid(&priced)?;
//! # Ok(())
//! # }
//! ```

pub mod cleaning;
pub mod filtering;

pub use cleaning::{
    derive_build_calendar, derive_building_age, drop_leakage_columns, drop_missing_sales,
    missing_columns, require_columns, reset_index, retain_non_negative_age,
    retain_physically_valid, retain_valid_calendar,
};
pub use filtering::{
    all_present, float_column, has_column, int_column, is_positive, retain_where, within,
};
