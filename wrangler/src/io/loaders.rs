use log::debug;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

use crate::config::ReaderConfig;
use crate::error::{WrangleError, WrangleResult};
use crate::io::checksum::calculate_checksum;
use crate::parsing::csv_parser;

/// Delimited format of a listings file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Tsv,
    /// Separator supplied by configuration
    Custom(u8),
}

impl SourceFormat {
    pub fn separator(self) -> u8 {
        match self {
            SourceFormat::Csv => b',',
            SourceFormat::Tsv => b'\t',
            SourceFormat::Custom(separator) => separator,
        }
    }

    /// Pick the format for `path`.
    ///
    /// A configured separator wins. Otherwise `.tsv`/`.tab` files are
    /// tab-separated and everything else, extension-less paths included, is
    /// read as comma-separated.
    pub fn resolve(path: &Path, reader: &ReaderConfig) -> WrangleResult<Self> {
        if let Some(separator) = reader.separator_byte()? {
            return Ok(match separator {
                b',' => SourceFormat::Csv,
                b'\t' => SourceFormat::Tsv,
                other => SourceFormat::Custom(other),
            });
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        Ok(match extension.as_deref() {
            Some("tsv") | Some("tab") => SourceFormat::Tsv,
            _ => SourceFormat::Csv,
        })
    }
}

/// Result of loading a listings file
#[derive(Debug)]
pub struct ListingLoadResult {
    pub dataframe: DataFrame,
    pub format: SourceFormat,
    pub num_rows: usize,
    /// SHA-256 of the raw file bytes
    pub checksum: String,
}

impl ListingLoadResult {
    pub fn new(dataframe: DataFrame, format: SourceFormat, checksum: String) -> Self {
        let num_rows = dataframe.height();
        Self {
            dataframe,
            format,
            num_rows,
            checksum,
        }
    }
}

/// Reads listing files into DataFrames and writes cleaned tables back out
pub struct ListingLoader;

impl ListingLoader {
    /// Load a delimited listings file.
    ///
    /// The file is read once; the checksum and the DataFrame are both built
    /// from the same bytes.
    ///
    /// # Errors
    /// * `WrangleError::Access` if the file cannot be read
    /// * `WrangleError::Config` if the configured separator is not ASCII
    /// * `WrangleError::Polars` if the content cannot be parsed
    pub fn load_from_file(path: &Path, reader: &ReaderConfig) -> WrangleResult<ListingLoadResult> {
        let content = fs::read(path).map_err(|e| WrangleError::access(path, e))?;
        let format = SourceFormat::resolve(path, reader)?;
        let checksum = calculate_checksum(&content);

        let dataframe = csv_parser::parse_listings_csv(content, format.separator(), reader)?;
        debug!(
            "Loaded {} rows x {} columns from {}",
            dataframe.height(),
            dataframe.width(),
            path.display()
        );

        Ok(ListingLoadResult::new(dataframe, format, checksum))
    }

    /// Load listings from in-memory CSV text.
    pub fn load_from_csv_str(csv: &str, reader: &ReaderConfig) -> WrangleResult<DataFrame> {
        let separator = reader.separator_byte()?.unwrap_or(b',');
        csv_parser::parse_listings_csv(csv.as_bytes().to_vec(), separator, reader)
    }

    /// Write a table as comma-separated text with a header row.
    pub fn write_csv(df: &mut DataFrame, path: &Path) -> WrangleResult<()> {
        let mut file = File::create(path).map_err(|e| WrangleError::access(path, e))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(df)?;
        debug!("Wrote {} rows to {}", df.height(), path.display());
        Ok(())
    }
}
