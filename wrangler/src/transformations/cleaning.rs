//! The individual cleaning and feature steps of the listings pipeline.
//!
//! Each step takes the table produced by the previous one. Filters drop rows
//! silently; only schema problems are reported as errors.

use log::debug;
use polars::prelude::*;

use crate::core::domain::BuildDate;
use crate::core::schema::{
    AREA_M2, BUILDING_AGE, BUILD_DATE, BUILD_MONTH, BUILD_YEAR, DROPPED_COLUMNS, FLOORS,
    MAX_BUILD_MONTH, MAX_BUILD_YEAR, MIN_BUILD_MONTH, MIN_BUILD_YEAR, REFERENCE_YEAR,
    SALES_COLUMNS,
};
use crate::error::{WrangleError, WrangleResult};
use crate::transformations::filtering::{
    all_present, has_column, int_column, is_positive, retain_where, within,
};

/// Names from `required` that the frame does not carry, in the given order.
pub fn missing_columns(df: &DataFrame, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !has_column(df, name))
        .map(|name| name.to_string())
        .collect()
}

/// Fail with [`WrangleError::MissingColumn`] on the first absent column.
pub fn require_columns(df: &DataFrame, required: &[&str]) -> WrangleResult<()> {
    match missing_columns(df, required).into_iter().next() {
        Some(name) => Err(WrangleError::MissingColumn(name)),
        None => Ok(()),
    }
}

/// Drop rows missing any of `min_sales`, `max_sales` or `avg_sales`.
pub fn drop_missing_sales(df: &DataFrame) -> WrangleResult<DataFrame> {
    retain_where(df, &SALES_COLUMNS, all_present(&SALES_COLUMNS))
}

/// Keep rows with a positive floor area and floor count.
pub fn retain_physically_valid(df: &DataFrame) -> WrangleResult<DataFrame> {
    retain_where(
        df,
        &[AREA_M2, FLOORS],
        is_positive(AREA_M2).and(is_positive(FLOORS)),
    )
}

/// Split `buildDate` into integer `build_year` and `build_month` columns.
pub fn derive_build_calendar(mut df: DataFrame) -> WrangleResult<DataFrame> {
    let dates = int_column(&df, BUILD_DATE)?;

    let years = dates
        .apply_values(|d| BuildDate::new(d).year())
        .with_name(BUILD_YEAR.into());
    let months = dates
        .apply_values(|d| BuildDate::new(d).month())
        .with_name(BUILD_MONTH.into());

    df.with_column(years.into_series())?;
    df.with_column(months.into_series())?;
    Ok(df)
}

/// Keep rows whose month is in `1..=12` and year in `1900..=2026`.
pub fn retain_valid_calendar(df: &DataFrame) -> WrangleResult<DataFrame> {
    let months = within(BUILD_MONTH, MIN_BUILD_MONTH, MAX_BUILD_MONTH);
    let years = within(BUILD_YEAR, MIN_BUILD_YEAR, MAX_BUILD_YEAR);
    retain_where(df, &[BUILD_MONTH, BUILD_YEAR], months.and(years))
}

/// Add `building_age` measured from [`REFERENCE_YEAR`].
pub fn derive_building_age(mut df: DataFrame) -> WrangleResult<DataFrame> {
    let ages = int_column(&df, BUILD_YEAR)?
        .apply_values(|year| REFERENCE_YEAR - year)
        .with_name(BUILDING_AGE.into());

    df.with_column(ages.into_series())?;
    Ok(df)
}

/// Keep rows with a non-negative building age.
///
/// Only removes rows when `MAX_BUILD_YEAR` exceeds `REFERENCE_YEAR`.
pub fn retain_non_negative_age(df: &DataFrame) -> WrangleResult<DataFrame> {
    retain_where(
        df,
        &[BUILDING_AGE],
        col(BUILDING_AGE).cast(DataType::Int64).gt_eq(lit(0i64)),
    )
}

/// Remove the identifier, the target-bounding sale columns and the raw build date.
pub fn drop_leakage_columns(df: DataFrame) -> WrangleResult<DataFrame> {
    let mut df = df;
    for name in DROPPED_COLUMNS {
        df = df
            .drop(name)
            .map_err(|_| WrangleError::missing_column(name))?;
    }
    Ok(df)
}

/// Lay the surviving rows out contiguously so row position `0..n` is the index.
pub fn reset_index(mut df: DataFrame) -> DataFrame {
    df.as_single_chunk_par();
    debug!("Re-indexed {} rows", df.height());
    df
}
