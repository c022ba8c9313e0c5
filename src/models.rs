use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date of the pink morsel price increase. Business constant, never derived
/// from the loaded data.
pub const PRICE_INCREASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2021, 1, 15) {
    Some(date) => date,
    None => panic!("invalid price increase date"),
};

/// One day of sales for one region. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub sales: f64,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// An ordered (date, value) sequence, labeled with its region when the
/// aggregation was grouped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedSeries {
    pub region: Option<String>,
    pub points: Vec<SeriesPoint>,
}

/// Before/after comparison around the price increase, recomputed from the
/// records on every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub mean_before: f64,
    pub mean_after: f64,
    pub percent_change_first_to_last: f64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub series: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub series: Vec<AggregatedSeries>,
    pub conclusion: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub mean_before: f64,
    pub mean_after: f64,
    pub percent_change_first_to_last: f64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub conclusion: String,
}

#[derive(Debug, Serialize)]
pub struct RegionsResponse {
    pub regions: Vec<String>,
}
