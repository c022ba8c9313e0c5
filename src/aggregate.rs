use crate::errors::AggregateError;
use crate::models::{AggregatedSeries, SalesRecord, SeriesPoint, SummaryStatistics};
use chrono::NaiveDate;

/// Region selection for a series request. `All` keeps every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionFilter {
    All,
    One(String),
}

impl RegionFilter {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("all") {
            RegionFilter::All
        } else {
            RegionFilter::One(raw.to_string())
        }
    }

    fn label(&self) -> Option<String> {
        match self {
            RegionFilter::All => None,
            RegionFilter::One(name) => Some(name.clone()),
        }
    }
}

/// Records in date order, one value per record. Equal dates keep their
/// input order.
pub fn daily_series(
    records: &[SalesRecord],
    filter: &RegionFilter,
) -> Result<AggregatedSeries, AggregateError> {
    let selected = select(records, filter)?;
    let mut points: Vec<SeriesPoint> = selected
        .iter()
        .map(|record| SeriesPoint {
            date: record.date,
            value: record.sales,
        })
        .collect();
    points.sort_by_key(|point| point.date);
    Ok(AggregatedSeries {
        region: filter.label(),
        points,
    })
}

/// Running sum per region group, each group ordered by date ascending.
/// Records without a region label form a single unlabeled group, as does an
/// explicit single-region selection.
pub fn cumulative_series(
    records: &[SalesRecord],
    filter: &RegionFilter,
) -> Result<Vec<AggregatedSeries>, AggregateError> {
    let selected = select(records, filter)?;

    let mut groups: Vec<(Option<String>, Vec<&SalesRecord>)> = Vec::new();
    for record in selected {
        let key = match filter {
            RegionFilter::One(name) => Some(name.clone()),
            RegionFilter::All => record.region.clone(),
        };
        match groups.iter_mut().find(|(group, _)| *group == key) {
            Some((_, members)) => members.push(record),
            None => groups.push((key, vec![record])),
        }
    }

    let mut series = Vec::with_capacity(groups.len());
    for (region, mut members) in groups {
        members.sort_by_key(|record| record.date);
        let mut running = 0.0;
        let points = members
            .iter()
            .map(|record| {
                running += record.sales;
                SeriesPoint {
                    date: record.date,
                    value: running,
                }
            })
            .collect();
        series.push(AggregatedSeries { region, points });
    }
    series.sort_by(|a, b| a.region.cmp(&b.region));
    Ok(series)
}

/// Means split at `cutoff` (strictly before vs on-or-after), percent change
/// between the first and last record in input order. Note the endpoints are
/// input-order while the means are date-partitioned; reordering the records
/// changes the percent change but not the means.
pub fn summary(
    records: &[SalesRecord],
    cutoff: NaiveDate,
) -> Result<SummaryStatistics, AggregateError> {
    if records.is_empty() {
        return Err(AggregateError::EmptyDataset);
    }

    let before: Vec<f64> = records
        .iter()
        .filter(|record| record.date < cutoff)
        .map(|record| record.sales)
        .collect();
    let after: Vec<f64> = records
        .iter()
        .filter(|record| record.date >= cutoff)
        .map(|record| record.sales)
        .collect();

    let mean_before = mean(&before).ok_or(AggregateError::NoDataInRange { side: "before" })?;
    let mean_after = mean(&after).ok_or(AggregateError::NoDataInRange { side: "on or after" })?;

    let first = &records[0];
    let last = &records[records.len() - 1];
    if first.sales == 0.0 {
        return Err(AggregateError::DivisionByZero);
    }

    Ok(SummaryStatistics {
        mean_before,
        mean_after,
        percent_change_first_to_last: (last.sales - first.sales) / first.sales * 100.0,
        first_date: first.date,
        last_date: last.date,
    })
}

/// The sentence shown under the chart. Pure formatting.
pub fn conclusion(summary: &SummaryStatistics) -> String {
    format!(
        "Sales increased by {:.2}% from {} to {}. \
         Average sales before the price increase were ${:.2}, and after were ${:.2}.",
        summary.percent_change_first_to_last,
        summary.first_date,
        summary.last_date,
        summary.mean_before,
        summary.mean_after,
    )
}

fn select<'a>(
    records: &'a [SalesRecord],
    filter: &RegionFilter,
) -> Result<Vec<&'a SalesRecord>, AggregateError> {
    if records.is_empty() {
        return Err(AggregateError::EmptyDataset);
    }
    match filter {
        RegionFilter::All => Ok(records.iter().collect()),
        RegionFilter::One(name) => {
            let matched: Vec<&SalesRecord> = records
                .iter()
                .filter(|record| record.region.as_deref() == Some(name.as_str()))
                .collect();
            if matched.is_empty() {
                return Err(AggregateError::InvalidRegion(name.clone()));
            }
            Ok(matched)
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
