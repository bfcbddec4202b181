use polars::prelude::*;

use crate::error::{WrangleError, WrangleResult};

/// Returns `true` if the frame has a column called `name`.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Fetch a column as `Float64`, casting integer columns.
pub fn float_column(df: &DataFrame, name: &str) -> WrangleResult<Float64Chunked> {
    let column = df
        .column(name)
        .map_err(|_| WrangleError::missing_column(name))?;
    Ok(column.cast(&DataType::Float64)?.f64()?.clone())
}

/// Fetch a column as `Int64`. Fractional values truncate, unparsable ones become null.
pub fn int_column(df: &DataFrame, name: &str) -> WrangleResult<Int64Chunked> {
    let column = df
        .column(name)
        .map_err(|_| WrangleError::missing_column(name))?;
    Ok(column.cast(&DataType::Int64)?.i64()?.clone())
}

/// Like [`float_column`] but yields `None` for an absent column.
pub fn optional_float_column(df: &DataFrame, name: &str) -> WrangleResult<Option<Float64Chunked>> {
    if has_column(df, name) {
        float_column(df, name).map(Some)
    } else {
        Ok(None)
    }
}

/// Like [`int_column`] but yields `None` for an absent column.
pub fn optional_int_column(df: &DataFrame, name: &str) -> WrangleResult<Option<Int64Chunked>> {
    if has_column(df, name) {
        int_column(df, name).map(Some)
    } else {
        Ok(None)
    }
}

/// Cells of `name` that hold a value. NaN counts as missing.
pub fn is_present(name: &str) -> Expr {
    col(name)
        .is_not_null()
        .and(col(name).cast(DataType::Float64).is_not_nan())
}

/// Rows where every listed column holds a value.
pub fn all_present(columns: &[&str]) -> Expr {
    columns
        .iter()
        .map(|name| is_present(name))
        .reduce(|acc, present| acc.and(present))
        .unwrap_or_else(|| lit(true))
}

/// Rows where `name` is strictly greater than zero. Nulls never match.
pub fn is_positive(name: &str) -> Expr {
    col(name).cast(DataType::Float64).gt(lit(0.0))
}

/// Rows where the integer column `name` lies in `min..=max`.
pub fn within(name: &str, min: i64, max: i64) -> Expr {
    let value = col(name).cast(DataType::Int64);
    value.clone().gt_eq(lit(min)).and(value.lt_eq(lit(max)))
}

/// Keep the rows matching `predicate`, preserving their relative order.
///
/// `columns` lists what the predicate reads; an absent one fails with
/// [`WrangleError::MissingColumn`] before anything is evaluated.
pub fn retain_where(
    df: &DataFrame,
    columns: &[&str],
    predicate: Expr,
) -> WrangleResult<DataFrame> {
    if let Some(name) = columns.iter().find(|name| !has_column(df, name)) {
        return Err(WrangleError::missing_column(*name));
    }

    let filtered = df.clone().lazy().filter(predicate).collect()?;
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df!(
            "row" => [0i64, 1, 2, 3, 4],
            "area" => [Some(84.5), Some(0.0), None, Some(-3.0), Some(12.0)],
            "floors" => [Some(15i64), Some(3), Some(2), Some(0), None],
            "price" => [Some(1.0), Some(f64::NAN), Some(2.0), None, Some(4.0)],
        )
        .unwrap()
    }

    fn kept(columns: &[&str], predicate: Expr) -> Vec<Option<i64>> {
        let df = retain_where(&sample_frame(), columns, predicate).unwrap();
        df.column("row").unwrap().i64().unwrap().into_iter().collect()
    }

    #[test]
    fn test_has_column() {
        let df = sample_frame();
        assert!(has_column(&df, "area"));
        assert!(!has_column(&df, "missing"));
    }

    #[test]
    fn test_float_column_casts_integers() {
        let df = sample_frame();
        let floors = float_column(&df, "floors").unwrap();
        assert_eq!(floors.get(0), Some(15.0));
        assert_eq!(floors.get(4), None);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let df = sample_frame();
        let err = float_column(&df, "avg_sales").unwrap_err();
        assert!(matches!(err, WrangleError::MissingColumn(ref name) if name == "avg_sales"));
        assert!(optional_float_column(&df, "avg_sales").unwrap().is_none());
        assert!(optional_int_column(&df, "floors").unwrap().is_some());
    }

    #[test]
    fn test_is_positive_rejects_zero_negative_and_null() {
        assert_eq!(
            kept(&["area"], is_positive("area")),
            vec![Some(0), Some(4)]
        );
        assert_eq!(
            kept(&["floors"], is_positive("floors")),
            vec![Some(0), Some(1), Some(2)]
        );
    }

    #[test]
    fn test_all_present_treats_nan_as_missing() {
        assert_eq!(
            kept(&["price"], all_present(&["price"])),
            vec![Some(0), Some(2), Some(4)]
        );
        assert_eq!(
            kept(&["price", "floors"], all_present(&["price", "floors"])),
            vec![Some(0), Some(2)]
        );
    }

    #[test]
    fn test_within_is_inclusive() {
        assert_eq!(
            kept(&["floors"], within("floors", 2, 15)),
            vec![Some(0), Some(1), Some(2)]
        );
    }

    #[test]
    fn test_retain_where_preserves_order() {
        let df = retain_where(&sample_frame(), &["area"], is_positive("area")).unwrap();

        assert_eq!(df.height(), 2);
        let area = df.column("area").unwrap().f64().unwrap();
        assert_eq!(area.get(0), Some(84.5));
        assert_eq!(area.get(1), Some(12.0));
    }

    #[test]
    fn test_retain_where_requires_columns() {
        let err = retain_where(&sample_frame(), &["area", "m2"], is_positive("m2")).unwrap_err();
        assert!(matches!(err, WrangleError::MissingColumn(ref name) if name == "m2"));
    }
}
