use crate::errors::CombineError;
use crate::models::SalesRecord;
use crate::money::parse_money;
use chrono::NaiveDate;
use std::{
    env,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> PathBuf {
    env::var("SALES_DATA_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/combined_sales.csv"))
}

/// Loads the combined sales CSV. A missing, unreadable, or empty file falls
/// back to the built-in sample rows so the dashboard still renders.
pub async fn load_dataset(path: &Path) -> Vec<SalesRecord> {
    match fs::read(path).await {
        Ok(bytes) => match parse_records(&bytes) {
            Ok(records) if !records.is_empty() => records,
            Ok(_) => {
                error!("data file {} has no rows, using sample data", path.display());
                sample_records()
            }
            Err(err) => {
                error!("failed to parse data file {}: {err}", path.display());
                sample_records()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => sample_records(),
        Err(err) => {
            error!("failed to read data file {}: {err}", path.display());
            sample_records()
        }
    }
}

/// Parses `sales,date,region` rows. `sales` accepts both money strings and
/// plain numbers; the `region` column is optional.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<SalesRecord>, CombineError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader.headers()?.clone();

    let sales = column(&headers, "sales")?;
    let date = column(&headers, "date")?;
    let region = headers.iter().position(|header| header == "region");

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        records.push(SalesRecord {
            date: row.get(date).unwrap_or_default().parse::<NaiveDate>()?,
            sales: parse_money(row.get(sales).unwrap_or_default())?,
            region: region
                .and_then(|index| row.get(index))
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        });
    }
    Ok(records)
}

fn column(headers: &csv::StringRecord, name: &str) -> Result<usize, CombineError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| CombineError::MissingColumn(name.to_string()))
}

/// The example table the dashboard started from, used when no data file is
/// available yet.
fn sample_records() -> Vec<SalesRecord> {
    const SAMPLE: [(u32, f64); 6] = [
        (10, 100.0),
        (11, 150.0),
        (12, 200.0),
        (13, 130.0),
        (14, 170.0),
        (15, 180.0),
    ];
    SAMPLE
        .iter()
        .filter_map(|&(day, sales)| {
            Some(SalesRecord {
                date: NaiveDate::from_ymd_opt(2021, 1, day)?,
                sales,
                region: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_money_sales_and_regions() {
        let csv = b"sales,date,region\n$15.0,2021-01-10,north\n$32.7,2021-01-16,east\n";
        let records = parse_records(csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sales, 15.0);
        assert_eq!(records[0].region.as_deref(), Some("north"));
        assert_eq!(
            records[1].date,
            NaiveDate::from_ymd_opt(2021, 1, 16).unwrap()
        );
    }

    #[test]
    fn region_column_is_optional() {
        let csv = b"date,sales\n2021-01-10,100\n";
        let records = parse_records(csv).unwrap();
        assert_eq!(records[0].region, None);
        assert_eq!(records[0].sales, 100.0);
    }

    #[test]
    fn missing_sales_column_is_an_error() {
        let csv = b"date,region\n2021-01-10,north\n";
        let err = parse_records(csv).unwrap_err();
        assert!(matches!(err, CombineError::MissingColumn(name) if name == "sales"));
    }
}
