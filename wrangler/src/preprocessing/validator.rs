//! Audit of cleaned listing tables.
//!
//! The pipeline guarantees a set of output invariants by construction. This
//! module re-checks them on a finished table so callers (and tests) can
//! confirm a table is fit for training without trusting how it was built.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::core::schema::{
    AREA_M2, AVG_SALES, BUILDING_AGE, BUILD_MONTH, BUILD_YEAR, DERIVED_COLUMNS, DROPPED_COLUMNS,
    FLOORS, MAX_BUILD_MONTH, MAX_BUILD_YEAR, MIN_BUILD_MONTH, MIN_BUILD_YEAR,
};
use crate::transformations::filtering::{float_column, has_column, int_column};

/// Number of offending rows listed per rule before only the total is reported.
const MAX_LISTED_ROWS: usize = 5;

/// Validation outcome with categorized issues and statistics.
///
/// Errors make `is_valid` false, warnings are informational.
///
/// # Examples
///
/// ```
/// use seoul_wrangler::preprocessing::validator::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid);
///
/// result.add_error("Column 'id' must not be present".to_string());
/// assert!(!result.is_valid);
/// assert_eq!(result.errors.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Per-rule counts of offending rows or columns.
///
/// # Fields
///
/// * `total_rows` - Rows in the audited table
/// * `forbidden_columns` - Identifier or leakage columns still present
/// * `missing_derived_columns` - Derived feature columns that are absent
/// * `missing_value_columns` - Absent `m2`, `p` or `avg_sales` columns
/// * `non_integer_derived_columns` - Derived columns not typed `Int64`
/// * `invalid_areas` - Rows with `m2 <= 0` or null
/// * `invalid_floors` - Rows with `p <= 0` or null
/// * `invalid_months` - Rows with `build_month` outside `1..=12`
/// * `invalid_years` - Rows with `build_year` outside `1900..=2026`
/// * `negative_ages` - Rows with `building_age < 0`
/// * `missing_targets` - Rows with a null or NaN `avg_sales`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_rows: usize,
    pub forbidden_columns: usize,
    pub missing_derived_columns: usize,
    pub missing_value_columns: usize,
    pub non_integer_derived_columns: usize,
    pub invalid_areas: usize,
    pub invalid_floors: usize,
    pub invalid_months: usize,
    pub invalid_years: usize,
    pub negative_ages: usize,
    pub missing_targets: usize,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    /// Creates a valid result with no errors or warnings.
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Adds an error and marks the result as invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Adds a warning without invalidating the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use seoul_wrangler::preprocessing::validator::ValidationResult;
    ///
    /// let mut result = ValidationResult::new();
    /// result.add_warning("Table is empty".to_string());
    /// assert!(result.is_valid);
    /// ```
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

/// Validator for cleaned listing tables.
///
/// # Examples
///
/// ```no_run
/// use seoul_wrangler::preprocessing::validator::TableValidator;
/// use polars::prelude::*;
///
/// # fn example(df: &DataFrame) {
/// let result = TableValidator::validate_clean(df);
/// if !result.is_valid {
///     for error in &result.errors {
///         eprintln!("Error: {}", error);
///     }
/// }
/// # }
/// ```
pub struct TableValidator;

impl TableValidator {
    /// Checks a cleaned table against every output invariant.
    ///
    /// # Error Conditions
    ///
    /// - `id`, `min_sales`, `max_sales` or `buildDate` still present
    /// - `build_year`, `build_month` or `building_age` absent or not `Int64`
    /// - Non-positive area or floor count
    /// - Month outside `1..=12`, year outside `1900..=2026`
    /// - Negative building age
    /// - `m2`, `p` or `avg_sales` absent
    /// - Missing `avg_sales`
    pub fn validate_clean(df: &DataFrame) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.stats.total_rows = df.height();
        if df.height() == 0 {
            result.add_warning("Table has no rows".to_string());
        }

        for name in DROPPED_COLUMNS {
            if has_column(df, name) {
                result.stats.forbidden_columns += 1;
                result.add_error(format!("Column '{}' must not be present", name));
            }
        }

        for name in DERIVED_COLUMNS {
            match df.column(name) {
                Err(_) => {
                    result.stats.missing_derived_columns += 1;
                    result.add_error(format!("Missing required column: {}", name));
                }
                Ok(column) if column.dtype() != &DataType::Int64 => {
                    result.stats.non_integer_derived_columns += 1;
                    result.add_error(format!(
                        "Column '{}' has incorrect type: expected {:?}, got {:?}",
                        name,
                        DataType::Int64,
                        column.dtype()
                    ));
                }
                Ok(_) => {}
            }
        }

        for name in [AREA_M2, FLOORS, AVG_SALES] {
            if !has_column(df, name) {
                result.stats.missing_value_columns += 1;
                result.add_error(format!("Missing required column: {}", name));
            }
        }

        if let Ok(areas) = float_column(df, AREA_M2) {
            result.stats.invalid_areas =
                Self::audit_rows(&areas, "m2 must be > 0", &mut result, |v| v > 0.0);
        }

        if let Ok(floors) = float_column(df, FLOORS) {
            result.stats.invalid_floors =
                Self::audit_rows(&floors, "p must be > 0", &mut result, |v| v > 0.0);
        }

        if let Ok(targets) = float_column(df, AVG_SALES) {
            result.stats.missing_targets =
                Self::audit_rows(&targets, "avg_sales must be present", &mut result, |v| {
                    !v.is_nan()
                });
        }

        if let Ok(months) = int_column(df, BUILD_MONTH) {
            result.stats.invalid_months = Self::audit_rows(
                &months,
                "build_month must be within 1..=12",
                &mut result,
                |v| (MIN_BUILD_MONTH..=MAX_BUILD_MONTH).contains(&v),
            );
        }

        if let Ok(years) = int_column(df, BUILD_YEAR) {
            result.stats.invalid_years = Self::audit_rows(
                &years,
                "build_year must be within 1900..=2026",
                &mut result,
                |v| (MIN_BUILD_YEAR..=MAX_BUILD_YEAR).contains(&v),
            );
        }

        if let Ok(ages) = int_column(df, BUILDING_AGE) {
            result.stats.negative_ages = Self::audit_rows(
                &ages,
                "building_age must be >= 0",
                &mut result,
                |v| v >= 0,
            );
        }

        result
    }

    /// Count rows whose value is null or fails `is_valid`, listing the first few.
    fn audit_rows<T, F>(
        values: &ChunkedArray<T>,
        rule: &str,
        result: &mut ValidationResult,
        is_valid: F,
    ) -> usize
    where
        T: PolarsNumericType,
        T::Native: Debug,
        F: Fn(T::Native) -> bool,
    {
        let mut violations = 0;

        for (row, value) in values.into_iter().enumerate() {
            if value.is_some_and(&is_valid) {
                continue;
            }
            violations += 1;
            if violations <= MAX_LISTED_ROWS {
                result.add_error(format!("Row {}: {} (got {:?})", row, rule, value));
            }
        }

        if violations > MAX_LISTED_ROWS {
            result.add_error(format!(
                "Total rows violating '{}': {} (showing first {})",
                rule, violations, MAX_LISTED_ROWS
            ));
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_frame() -> DataFrame {
        df!(
            "lat" => [37.58, 37.6],
            "m2" => [84.5, 59.2],
            "p" => [15i64, 8],
            "avg_sales" => [4e8, 3e8],
            "build_year" => [2015i64, 2008],
            "build_month" => [1i64, 12],
            "building_age" => [11i64, 18],
        )
        .unwrap()
    }

    #[test]
    fn test_valid_table() {
        let result = TableValidator::validate_clean(&clean_frame());
        assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
        assert_eq!(result.stats.total_rows, 2);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_table_warns() {
        let df = clean_frame().head(Some(0));
        let result = TableValidator::validate_clean(&df);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_forbidden_column_detected() {
        let mut df = clean_frame();
        df.with_column(Series::new("id".into(), &[1i64, 2])).unwrap();

        let result = TableValidator::validate_clean(&df);
        assert!(!result.is_valid);
        assert_eq!(result.stats.forbidden_columns, 1);
    }

    #[test]
    fn test_derived_column_type_checked() {
        let mut df = clean_frame();
        df.with_column(Series::new("build_year".into(), &[2015.0, 2008.0]))
            .unwrap();

        let result = TableValidator::validate_clean(&df);
        assert!(!result.is_valid);
        assert_eq!(result.stats.non_integer_derived_columns, 1);
    }

    #[test]
    fn test_missing_derived_column_detected() {
        let df = clean_frame().drop("building_age").unwrap();
        let result = TableValidator::validate_clean(&df);
        assert_eq!(result.stats.missing_derived_columns, 1);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_missing_value_columns_detected() {
        for name in ["m2", "p", "avg_sales"] {
            let df = clean_frame().drop(name).unwrap();
            let result = TableValidator::validate_clean(&df);

            assert!(!result.is_valid, "absent {} should be reported", name);
            assert_eq!(result.stats.missing_value_columns, 1);
            assert_eq!(
                result.errors,
                vec![format!("Missing required column: {}", name)]
            );
        }
    }

    #[test]
    fn test_default_matches_new() {
        let result = ValidationResult::default();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.stats, ValidationStats::default());
    }

    #[test]
    fn test_row_violations_counted() {
        let df = df!(
            "m2" => [84.5, 0.0, -10.0],
            "p" => [15i64, 0, 3],
            "avg_sales" => [Some(4e8), None, Some(f64::NAN)],
            "build_year" => [2015i64, 1899, 2030],
            "build_month" => [1i64, 0, 13],
            "building_age" => [11i64, 127, -4],
        )
        .unwrap();

        let result = TableValidator::validate_clean(&df);
        assert!(!result.is_valid);
        assert_eq!(result.stats.invalid_areas, 2);
        assert_eq!(result.stats.invalid_floors, 1);
        assert_eq!(result.stats.missing_targets, 2);
        assert_eq!(result.stats.invalid_years, 2);
        assert_eq!(result.stats.invalid_months, 2);
        assert_eq!(result.stats.negative_ages, 1);
    }

    #[test]
    fn test_listed_rows_are_capped() {
        let df = df!(
            "m2" => [0.0; 8],
            "p" => [1i64; 8],
            "avg_sales" => [1.0; 8],
            "build_year" => [2015i64; 8],
            "build_month" => [1i64; 8],
            "building_age" => [11i64; 8],
        )
        .unwrap();

        let result = TableValidator::validate_clean(&df);
        assert_eq!(result.stats.invalid_areas, 8);
        // five listed rows plus the total line
        assert_eq!(result.errors.len(), MAX_LISTED_ROWS + 1);
    }
}
