//! Column layout of the listings dataset and the calendar bounds the
//! cleaning steps are anchored to.
//!
//! Everything here is a compile-time constant: the dataset has a fixed set of
//! columns and the reference year is fixed.

/// Per-listing identifier. Dropped from the output.
pub const ID: &str = "id";
pub const LAT: &str = "lat";
pub const LNG: &str = "lng";
pub const HOUSEHOLDS: &str = "households";
/// Construction date encoded as `YYYYMM`.
pub const BUILD_DATE: &str = "buildDate";
pub const SCORE: &str = "score";
/// Floor area in square metres.
pub const AREA_M2: &str = "m2";
/// Floor count.
pub const FLOORS: &str = "p";
pub const MIN_SALES: &str = "min_sales";
pub const MAX_SALES: &str = "max_sales";
/// Training target.
pub const AVG_SALES: &str = "avg_sales";

pub const BUILD_YEAR: &str = "build_year";
pub const BUILD_MONTH: &str = "build_month";
pub const BUILDING_AGE: &str = "building_age";

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    ID, AREA_M2, FLOORS, BUILD_DATE, MIN_SALES, MAX_SALES, AVG_SALES,
];

/// Sale-price columns that must all be present for a row to be kept.
pub const SALES_COLUMNS: [&str; 3] = [MIN_SALES, MAX_SALES, AVG_SALES];

/// Numeric columns read as `Float64` whatever the sampled rows suggest.
pub const FLOAT_COLUMNS: [&str; 5] = [AREA_M2, FLOORS, MIN_SALES, MAX_SALES, AVG_SALES];

/// Identifier, target-bounding and redundant columns removed before output.
pub const DROPPED_COLUMNS: [&str; 4] = [ID, MIN_SALES, MAX_SALES, BUILD_DATE];

/// Integer features appended by the pipeline, in output order.
pub const DERIVED_COLUMNS: [&str; 3] = [BUILD_YEAR, BUILD_MONTH, BUILDING_AGE];

/// Year building ages are measured from.
pub const REFERENCE_YEAR: i64 = 2026;

pub const MIN_BUILD_YEAR: i64 = 1900;

/// Latest accepted construction year. Independent of [`REFERENCE_YEAR`] even
/// though both currently hold the same value.
pub const MAX_BUILD_YEAR: i64 = 2026;

pub const MIN_BUILD_MONTH: i64 = 1;
pub const MAX_BUILD_MONTH: i64 = 12;

/// Separates year and month in the `YYYYMM` encoding.
pub const BUILD_DATE_FACTOR: i64 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropped_columns_are_required() {
        for column in DROPPED_COLUMNS {
            assert!(REQUIRED_COLUMNS.contains(&column), "{column} must be required");
        }
    }

    #[test]
    fn test_derived_columns_do_not_collide_with_input() {
        for column in DERIVED_COLUMNS {
            assert!(!REQUIRED_COLUMNS.contains(&column));
        }
    }
}
