use polars::prelude::*;
use std::io::Cursor;
use std::sync::Arc;

use crate::config::ReaderConfig;
use crate::core::domain::{ApartmentListing, CleanListing};
use crate::core::schema;
use crate::error::WrangleResult;
use crate::transformations::filtering::{
    float_column, has_column, int_column, optional_float_column, optional_int_column,
};

/// Parse delimited listing data into a Polars DataFrame.
///
/// Column types are inferred from the first `infer_schema_length` rows; the
/// configured null tokens become nulls in every column. Area, floor count and
/// sale columns are always read as `Float64`, so a fractional value past the
/// inference window still parses.
pub fn parse_listings_csv(
    content: Vec<u8>,
    separator: u8,
    reader: &ReaderConfig,
) -> WrangleResult<DataFrame> {
    let float_overrides = float_schema_overrides(&content, separator, reader)?;

    let df = csv_options(separator, reader)
        .with_infer_schema_length(Some(reader.infer_schema_length))
        .with_schema_overwrite(Some(Arc::new(float_overrides)))
        .into_reader_with_file_handle(Cursor::new(content))
        .finish()?;

    Ok(df)
}

fn csv_options(separator: u8, reader: &ReaderConfig) -> CsvReadOptions {
    let null_values = if reader.null_values.is_empty() {
        None
    } else {
        Some(NullValues::AllColumns(
            reader
                .null_values
                .iter()
                .map(|v| PlSmallStr::from(v.as_str()))
                .collect(),
        ))
    };

    CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|opts| {
            opts.with_separator(separator)
                .with_null_values(null_values.clone())
        })
}

/// `Float64` overrides for the float columns present in the header.
///
/// Columns absent from the file are left out: polars matches a complete
/// override schema by position.
fn float_schema_overrides(
    content: &[u8],
    separator: u8,
    reader: &ReaderConfig,
) -> WrangleResult<Schema> {
    let header_end = content
        .iter()
        .position(|&b| b == b'\n')
        .map_or(content.len(), |i| i + 1);

    let header = csv_options(separator, reader)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(&content[..header_end]))
        .finish()?;

    let overrides = schema::FLOAT_COLUMNS
        .iter()
        .filter(|name| has_column(&header, name))
        .map(|name| (PlSmallStr::from(*name), DataType::Float64))
        .collect();

    Ok(overrides)
}

/// Convert listings to a Polars DataFrame with the input file's column names.
pub fn listings_to_dataframe(listings: &[ApartmentListing]) -> WrangleResult<DataFrame> {
    let n = listings.len();

    let mut ids = Vec::with_capacity(n);
    let mut lats = Vec::with_capacity(n);
    let mut lngs = Vec::with_capacity(n);
    let mut households = Vec::with_capacity(n);
    let mut build_dates = Vec::with_capacity(n);
    let mut scores = Vec::with_capacity(n);
    let mut areas = Vec::with_capacity(n);
    let mut floors = Vec::with_capacity(n);
    let mut min_sales = Vec::with_capacity(n);
    let mut max_sales = Vec::with_capacity(n);
    let mut avg_sales = Vec::with_capacity(n);

    for listing in listings {
        ids.push(listing.id);
        lats.push(listing.lat);
        lngs.push(listing.lng);
        households.push(listing.households);
        build_dates.push(listing.build_date);
        scores.push(listing.score);
        areas.push(listing.area_m2);
        floors.push(listing.floors);
        min_sales.push(listing.min_sales);
        max_sales.push(listing.max_sales);
        avg_sales.push(listing.avg_sales);
    }

    let df = df!(
        schema::ID => ids,
        schema::LAT => lats,
        schema::LNG => lngs,
        schema::HOUSEHOLDS => households,
        schema::BUILD_DATE => build_dates,
        schema::SCORE => scores,
        schema::AREA_M2 => areas,
        schema::FLOORS => floors,
        schema::MIN_SALES => min_sales,
        schema::MAX_SALES => max_sales,
        schema::AVG_SALES => avg_sales,
    )?;

    Ok(df)
}

/// Convert a cleaned DataFrame into [`CleanListing`] rows.
///
/// Rows still holding a null in a required column are skipped, which cannot
/// happen for a table produced by the pipeline.
pub fn dataframe_to_clean_listings(df: &DataFrame) -> WrangleResult<Vec<CleanListing>> {
    let areas = float_column(df, schema::AREA_M2)?;
    let floors = float_column(df, schema::FLOORS)?;
    let avg_sales = float_column(df, schema::AVG_SALES)?;
    let build_years = int_column(df, schema::BUILD_YEAR)?;
    let build_months = int_column(df, schema::BUILD_MONTH)?;
    let ages = int_column(df, schema::BUILDING_AGE)?;

    let lats = optional_float_column(df, schema::LAT)?;
    let lngs = optional_float_column(df, schema::LNG)?;
    let households = optional_int_column(df, schema::HOUSEHOLDS)?;
    let scores = optional_float_column(df, schema::SCORE)?;

    let mut listings = Vec::with_capacity(df.height());

    for i in 0..df.height() {
        let (Some(area_m2), Some(floor_count), Some(avg), Some(year), Some(month), Some(age)) = (
            areas.get(i),
            floors.get(i),
            avg_sales.get(i),
            build_years.get(i),
            build_months.get(i),
            ages.get(i),
        ) else {
            continue;
        };

        listings.push(CleanListing {
            lat: lats.as_ref().and_then(|col| col.get(i)),
            lng: lngs.as_ref().and_then(|col| col.get(i)),
            households: households.as_ref().and_then(|col| col.get(i)),
            score: scores.as_ref().and_then(|col| col.get(i)),
            area_m2,
            floors: floor_count,
            avg_sales: avg,
            build_year: year,
            build_month: month,
            building_age: age,
        });
    }

    Ok(listings)
}
