//! Domain models for apartment listings and their encoded build dates.
//!
//! The cleaning pipeline itself works column-wise on a polars `DataFrame`;
//! these types are the row-level view of the same data, used to build frames
//! programmatically and to hand clean rows to callers that prefer structs.

use serde::{Deserialize, Serialize};

use crate::core::schema::{
    BUILD_DATE_FACTOR, MAX_BUILD_MONTH, MAX_BUILD_YEAR, MIN_BUILD_MONTH, MIN_BUILD_YEAR,
    REFERENCE_YEAR,
};

/// Construction date encoded as a single `YYYYMM` integer.
///
/// Decomposition uses truncating integer arithmetic, so the month is whatever
/// the last two digits hold; no rounding or calendar normalisation happens.
///
/// # Examples
///
/// ```
/// use seoul_wrangler::core::domain::BuildDate;
///
/// let date = BuildDate::new(201501);
/// assert_eq!(date.year(), 2015);
/// assert_eq!(date.month(), 1);
/// assert_eq!(date.building_age(), 11);
///
/// // Month 0 is representable but not a valid calendar date
/// assert!(!BuildDate::new(200800).has_valid_calendar());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildDate(i64);

impl BuildDate {
    pub const fn new(encoded: i64) -> Self {
        Self(encoded)
    }

    /// Encodes a year and month as `year * 100 + month`.
    ///
    /// # Examples
    ///
    /// ```
    /// use seoul_wrangler::core::domain::BuildDate;
    ///
    /// assert_eq!(BuildDate::from_parts(2008, 12).value(), 200812);
    /// ```
    pub const fn from_parts(year: i64, month: i64) -> Self {
        Self(year * BUILD_DATE_FACTOR + month)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    pub const fn year(self) -> i64 {
        self.0 / BUILD_DATE_FACTOR
    }

    pub const fn month(self) -> i64 {
        self.0 % BUILD_DATE_FACTOR
    }

    /// Returns `true` when the month lies in `1..=12` and the year in
    /// `1900..=2026`.
    pub fn has_valid_calendar(self) -> bool {
        (MIN_BUILD_MONTH..=MAX_BUILD_MONTH).contains(&self.month())
            && (MIN_BUILD_YEAR..=MAX_BUILD_YEAR).contains(&self.year())
    }

    /// Age of the building in whole years at `reference_year`.
    pub const fn age_at(self, reference_year: i64) -> i64 {
        reference_year - self.year()
    }

    /// Age of the building at [`REFERENCE_YEAR`].
    pub const fn building_age(self) -> i64 {
        self.age_at(REFERENCE_YEAR)
    }
}

impl From<i64> for BuildDate {
    fn from(encoded: i64) -> Self {
        Self::new(encoded)
    }
}

/// One raw listing as it appears in the input file.
///
/// Every field is optional because the raw dataset has gaps; the pipeline
/// decides which gaps disqualify a row. Serde names follow the file header.
///
/// # Fields
///
/// * `id` - Listing identifier, never part of the training table
/// * `lat`, `lng` - Coordinates of the complex
/// * `households` - Number of households in the complex
/// * `build_date` - Construction date as `YYYYMM` (`buildDate`)
/// * `score` - Listing rating
/// * `area_m2` - Floor area in square metres (`m2`)
/// * `floors` - Floor count (`p`)
/// * `min_sales`, `max_sales` - Observed sale-price bounds
/// * `avg_sales` - Average sale price, the training target
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApartmentListing {
    pub id: Option<i64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub households: Option<i64>,
    #[serde(rename = "buildDate")]
    pub build_date: Option<i64>,
    pub score: Option<f64>,
    #[serde(rename = "m2")]
    pub area_m2: Option<f64>,
    #[serde(rename = "p")]
    pub floors: Option<f64>,
    pub min_sales: Option<f64>,
    pub max_sales: Option<f64>,
    pub avg_sales: Option<f64>,
}

impl ApartmentListing {
    /// Creates a listing with the columns the pipeline inspects and no
    /// pass-through attributes.
    pub fn new(
        id: i64,
        build_date: i64,
        area_m2: f64,
        floors: f64,
        sales: (f64, f64, f64),
    ) -> Self {
        let (min_sales, max_sales, avg_sales) = sales;
        Self {
            id: Some(id),
            build_date: Some(build_date),
            area_m2: Some(area_m2),
            floors: Some(floors),
            min_sales: Some(min_sales),
            max_sales: Some(max_sales),
            avg_sales: Some(avg_sales),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    pub fn with_households(mut self, households: i64) -> Self {
        self.households = Some(households);
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn build_date(&self) -> Option<BuildDate> {
        self.build_date.map(BuildDate::new)
    }
}

/// One row of the cleaned training table.
///
/// Pass-through attributes stay optional since the input only guarantees
/// the columns the pipeline inspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanListing {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub households: Option<i64>,
    pub score: Option<f64>,
    #[serde(rename = "m2")]
    pub area_m2: f64,
    #[serde(rename = "p")]
    pub floors: f64,
    pub avg_sales: f64,
    pub build_year: i64,
    pub build_month: i64,
    pub building_age: i64,
}
