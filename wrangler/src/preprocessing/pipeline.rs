use log::{debug, info, warn};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;

use crate::config::WranglerConfig;
use crate::core::domain::CleanListing;
use crate::core::schema::REQUIRED_COLUMNS;
use crate::error::WrangleResult;
use crate::io::loaders::ListingLoader;
use crate::parsing::csv_parser;
use crate::preprocessing::validator::{TableValidator, ValidationResult};
use crate::transformations::cleaning;

/// A cleaned, densely indexed listings table.
///
/// Row position is the index: rows are numbered `0..height()` in the relative
/// order they had in the input, and no identifier from the input survives.
#[derive(Debug, Clone)]
pub struct CleanTable {
    dataframe: DataFrame,
}

impl CleanTable {
    fn new(dataframe: DataFrame) -> Self {
        Self { dataframe }
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.dataframe
    }

    pub fn into_dataframe(self) -> DataFrame {
        self.dataframe
    }

    pub fn height(&self) -> usize {
        self.dataframe.height()
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    /// The dense zero-based row index.
    pub fn row_index(&self) -> Range<usize> {
        0..self.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.dataframe
            .get_column_names()
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    /// The table as typed rows.
    pub fn to_listings(&self) -> WrangleResult<Vec<CleanListing>> {
        csv_parser::dataframe_to_clean_listings(&self.dataframe)
    }
}

/// Row counts after each filtering stage.
///
/// Counts only; individual dropped rows are not recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrangleReport {
    pub loaded_rows: usize,
    pub after_sales_completeness: usize,
    pub after_physical_validity: usize,
    pub after_calendar_validity: usize,
    pub after_age_validity: usize,
    pub output_columns: Vec<String>,
    /// SHA-256 of the input file, when the table was loaded from disk
    pub source_checksum: Option<String>,
}

impl WrangleReport {
    pub fn retained_rows(&self) -> usize {
        self.after_age_validity
    }

    pub fn dropped_rows(&self) -> usize {
        self.loaded_rows - self.after_age_validity
    }

    /// Rows removed by each filter, in pipeline order.
    pub fn stage_drops(&self) -> [(&'static str, usize); 4] {
        [
            (
                "sales completeness",
                self.loaded_rows - self.after_sales_completeness,
            ),
            (
                "physical validity",
                self.after_sales_completeness - self.after_physical_validity,
            ),
            (
                "calendar validity",
                self.after_physical_validity - self.after_calendar_validity,
            ),
            (
                "age validity",
                self.after_calendar_validity - self.after_age_validity,
            ),
        ]
    }
}

/// Everything produced by one pipeline run
#[derive(Debug, Clone)]
pub struct WrangleOutcome {
    pub table: CleanTable,
    pub report: WrangleReport,
    pub validation: ValidationResult,
}

/// Listings cleaning pipeline
pub struct WranglePipeline {
    config: WranglerConfig,
}

impl WranglePipeline {
    /// Create a new pipeline with default configuration
    pub fn new() -> Self {
        Self {
            config: WranglerConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: WranglerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WranglerConfig {
        &self.config
    }

    /// Load a listings file and clean it.
    ///
    /// # Arguments
    /// * `path` - Delimited listings file; `.tsv` is tab-separated, anything else comma-separated
    ///
    /// # Errors
    /// Fails on unreadable input or a missing required column. Invalid rows
    /// are never an error.
    pub fn process<P: AsRef<Path>>(&self, path: P) -> WrangleResult<WrangleOutcome> {
        let path = path.as_ref();

        // Step 1: Load
        let loaded = ListingLoader::load_from_file(path, &self.config.reader)?;

        // Steps 2-9
        let mut outcome = self.process_dataframe(loaded.dataframe)?;
        outcome.report.source_checksum = Some(loaded.checksum);

        info!(
            "Wrangled {}: kept {} of {} rows",
            path.display(),
            outcome.report.retained_rows(),
            outcome.report.loaded_rows
        );

        Ok(outcome)
    }

    /// Clean a table that is already in memory.
    ///
    /// Every step runs on the output of the previous one, in this order:
    /// sales completeness, physical validity, calendar decomposition, calendar
    /// validity, age derivation, age validity, column removal, re-indexing.
    pub fn process_dataframe(&self, df: DataFrame) -> WrangleResult<WrangleOutcome> {
        cleaning::require_columns(&df, &REQUIRED_COLUMNS)?;

        let mut report = WrangleReport {
            loaded_rows: df.height(),
            ..WrangleReport::default()
        };

        let df = cleaning::drop_missing_sales(&df)?;
        report.after_sales_completeness = stage_rows("sales completeness", &df);

        let df = cleaning::retain_physically_valid(&df)?;
        report.after_physical_validity = stage_rows("physical validity", &df);

        let df = cleaning::derive_build_calendar(df)?;
        let df = cleaning::retain_valid_calendar(&df)?;
        report.after_calendar_validity = stage_rows("calendar validity", &df);

        let df = cleaning::derive_building_age(df)?;
        let df = cleaning::retain_non_negative_age(&df)?;
        report.after_age_validity = stage_rows("age validity", &df);

        let df = cleaning::drop_leakage_columns(df)?;
        let table = CleanTable::new(cleaning::reset_index(df));
        report.output_columns = table.column_names();

        let validation = if self.config.pipeline.validate {
            let validation = TableValidator::validate_clean(table.dataframe());
            if !validation.is_valid {
                warn!(
                    "Clean table failed its audit with {} errors",
                    validation.errors.len()
                );
            }
            validation
        } else {
            ValidationResult::new()
        };

        Ok(WrangleOutcome {
            table,
            report,
            validation,
        })
    }
}

impl Default for WranglePipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn stage_rows(stage: &str, df: &DataFrame) -> usize {
    debug!("{}: {} rows remain", stage, df.height());
    df.height()
}

/// Load and clean a listings file with the default configuration.
///
/// Reads the file once, drops rows that are unusable for training, derives
/// `build_year`, `build_month` and `building_age`, removes `id`, `min_sales`,
/// `max_sales` and `buildDate`, and returns the densely indexed result.
///
/// # Errors
/// * [`crate::WrangleError::Access`] if the file cannot be read
/// * [`crate::WrangleError::MissingColumn`] if a required column is absent
pub fn wrangle<P: AsRef<Path>>(filepath: P) -> WrangleResult<CleanTable> {
    let outcome = WranglePipeline::new().process(filepath)?;
    Ok(outcome.table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::ApartmentListing;
    use crate::error::WrangleError;

    fn listings() -> Vec<ApartmentListing> {
        vec![
            ApartmentListing::new(1, 201501, 84.5, 15.0, (3e8, 5e8, 4e8)),
            ApartmentListing {
                min_sales: None,
                ..ApartmentListing::new(2, 200812, 59.2, 8.0, (0.0, 3.5e8, 3e8))
            },
            ApartmentListing::new(3, 199506, 0.0, 22.0, (4e8, 6e8, 5e8)),
            ApartmentListing::new(4, 203001, 73.8, 5.0, (2.8e8, 3.2e8, 3e8)),
            ApartmentListing::new(5, 200812, 102.3, 22.0, (4e8, 6e8, 5e8)),
        ]
    }

    fn process(listings: &[ApartmentListing]) -> WrangleOutcome {
        let df = csv_parser::listings_to_dataframe(listings).unwrap();
        WranglePipeline::new().process_dataframe(df).unwrap()
    }

    #[test]
    fn test_process_dataframe_report() {
        let outcome = process(&listings());
        let report = &outcome.report;

        assert_eq!(report.loaded_rows, 5);
        assert_eq!(report.after_sales_completeness, 4);
        assert_eq!(report.after_physical_validity, 3);
        assert_eq!(report.after_calendar_validity, 2);
        assert_eq!(report.after_age_validity, 2);
        assert_eq!(report.dropped_rows(), 3);
        assert_eq!(report.source_checksum, None);
        assert_eq!(
            report.stage_drops(),
            [
                ("sales completeness", 1),
                ("physical validity", 1),
                ("calendar validity", 1),
                ("age validity", 0),
            ]
        );
        assert!(outcome.validation.is_valid);
    }

    #[test]
    fn test_process_dataframe_output() {
        let outcome = process(&listings());
        let table = &outcome.table;

        assert_eq!(table.row_index(), 0..2);
        assert_eq!(
            table.column_names(),
            vec![
                "lat", "lng", "households", "score", "m2", "p", "avg_sales", "build_year",
                "build_month", "building_age"
            ]
        );
        assert_eq!(outcome.report.output_columns, table.column_names());

        let rows = table.to_listings().unwrap();
        assert_eq!(rows[0].build_year, 2015);
        assert_eq!(rows[0].building_age, 11);
        assert_eq!(rows[1].build_year, 2008);
        assert_eq!(rows[1].build_month, 12);
        assert_eq!(rows[1].avg_sales, 5e8);
    }

    #[test]
    fn test_missing_column_fails() {
        let df = csv_parser::listings_to_dataframe(&listings())
            .unwrap()
            .drop("avg_sales")
            .unwrap();

        let err = WranglePipeline::new().process_dataframe(df).unwrap_err();
        assert!(matches!(err, WrangleError::MissingColumn(ref name) if name == "avg_sales"));
    }

    #[test]
    fn test_validation_can_be_disabled() {
        let mut config = WranglerConfig::default();
        config.pipeline.validate = false;

        let df = csv_parser::listings_to_dataframe(&listings()).unwrap();
        let outcome = WranglePipeline::with_config(config)
            .process_dataframe(df)
            .unwrap();

        assert!(outcome.validation.is_valid);
        assert_eq!(outcome.validation.stats.total_rows, 0);
    }

    #[test]
    fn test_everything_filtered_yields_empty_table() {
        let outcome = process(&[ApartmentListing::new(1, 200800, 84.5, 15.0, (1.0, 2.0, 1.5))]);

        assert!(outcome.table.is_empty());
        assert_eq!(outcome.table.row_index(), 0..0);
        assert!(outcome.validation.is_valid);
        assert_eq!(outcome.validation.warnings.len(), 1);
    }
}
