//! Parsers for listing data.
//!
//! [`csv_parser`] reads delimited files into a DataFrame and converts between
//! DataFrames and the typed rows in [`crate::core::domain`].

pub mod csv_parser;

pub use csv_parser::{dataframe_to_clean_listings, listings_to_dataframe, parse_listings_csv};
