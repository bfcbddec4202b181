//! File loading and writing for listing tables.
//!
//! # Example
//!
//! ```no_run
//! use seoul_wrangler::io::ListingLoader;
//! use seoul_wrangler::ReaderConfig;
//! use std::path::Path;
//!
//! let loaded = ListingLoader::load_from_file(Path::new("listings.csv"), &ReaderConfig::default())
//!     .expect("Failed to load");
//! println!("Loaded {} rows", loaded.num_rows);
//! ```

pub mod checksum;
pub mod loaders;


pub use checksum::calculate_checksum;
pub use loaders::{ListingLoadResult, ListingLoader, SourceFormat};
