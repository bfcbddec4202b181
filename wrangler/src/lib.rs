//! Seoul apartment listing wrangler.
//!
//! Loads a delimited listings file, drops rows that cannot be used to train a
//! sale-price model, derives calendar features from the encoded build date and
//! returns a clean, densely indexed [`polars`] table.
//!
//! ```no_run
//! let table = seoul_wrangler::wrangle("data/seoul_apartments.csv")?;
//! println!("{} training rows", table.height());
//! # Ok::<(), seoul_wrangler::WrangleError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod transformations;

pub use crate::config::{PipelineSettings, ReaderConfig, WranglerConfig};
pub use crate::core::domain::{ApartmentListing, BuildDate, CleanListing};
pub use crate::core::schema::{MAX_BUILD_YEAR, MIN_BUILD_YEAR, REFERENCE_YEAR};
pub use crate::error::{WrangleError, WrangleResult};
pub use crate::preprocessing::{
    wrangle, CleanTable, TableValidator, ValidationResult, WrangleOutcome, WranglePipeline,
    WrangleReport,
};
