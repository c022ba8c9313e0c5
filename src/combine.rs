use crate::errors::CombineError;
use crate::money::{format_money, parse_money};
use std::path::Path;

/// In-memory CSV table: a header row plus string cells. Rows are only ever
/// filtered or extended, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column(&self, name: &str) -> Result<usize, CombineError> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| CombineError::MissingColumn(name.to_string()))
    }
}

/// Reads every input CSV and concatenates the rows in file order. Later
/// files may order their columns differently; cells are realigned to the
/// first file's header. A differing column set is a `SchemaMismatch`.
pub fn load_and_concatenate<P: AsRef<Path>>(paths: &[P]) -> Result<Table, CombineError> {
    let mut combined: Option<Table> = None;

    for path in paths {
        let mut reader = csv::Reader::from_path(path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        match &mut combined {
            None => {
                let mut rows = Vec::new();
                for result in reader.records() {
                    let record = result?;
                    rows.push(record.iter().map(str::to_string).collect());
                }
                combined = Some(Table { headers, rows });
            }
            Some(table) => {
                let mapping: Option<Vec<usize>> = table
                    .headers
                    .iter()
                    .map(|header| headers.iter().position(|other| other == header))
                    .collect();
                let mapping = match mapping {
                    Some(mapping) if headers.len() == table.headers.len() => mapping,
                    _ => {
                        return Err(CombineError::SchemaMismatch(
                            path.as_ref().display().to_string(),
                        ));
                    }
                };
                for result in reader.records() {
                    let record = result?;
                    let row = mapping
                        .iter()
                        .map(|&index| record.get(index).unwrap_or_default().to_string())
                        .collect();
                    table.rows.push(row);
                }
            }
        }
    }

    combined.ok_or(CombineError::NoInput)
}

/// Exact, case-sensitive match on the `product` column. An empty result is
/// not an error.
pub fn filter_by_product(table: &Table, product: &str) -> Result<Table, CombineError> {
    let column = table.column("product")?;
    let rows = table
        .rows
        .iter()
        .filter(|row| row[column] == product)
        .cloned()
        .collect();
    Ok(Table {
        headers: table.headers.clone(),
        rows,
    })
}

/// Appends a `sales` column: `price * quantity`, money-formatted with the
/// source precision kept.
pub fn derive_sales_column(table: &Table) -> Result<Table, CombineError> {
    let price = table.column("price")?;
    let quantity = table.column("quantity")?;

    let mut headers = table.headers.clone();
    headers.push("sales".to_string());

    let mut rows = Vec::with_capacity(table.rows.len());
    for (index, row) in table.rows.iter().enumerate() {
        let unit_price = parse_money(&row[price])?;
        let count: i64 = row[quantity]
            .trim()
            .parse()
            .map_err(|_| CombineError::MalformedQuantity {
                row: index + 1,
                value: row[quantity].clone(),
            })?;
        let mut cells = row.clone();
        cells.push(format_money(unit_price * count as f64));
        rows.push(cells);
    }

    Ok(Table { headers, rows })
}

/// Selects and reorders columns by name.
pub fn project_columns(table: &Table, columns: &[&str]) -> Result<Table, CombineError> {
    let indices: Vec<usize> = columns
        .iter()
        .map(|name| table.column(name))
        .collect::<Result<_, _>>()?;
    let headers = columns.iter().map(|name| name.to_string()).collect();
    let rows = table
        .rows
        .iter()
        .map(|row| indices.iter().map(|&index| row[index].clone()).collect())
        .collect();
    Ok(Table { headers, rows })
}

/// Serializes the table, overwriting any existing file at `path`.
pub fn write_csv(table: &Table, path: impl AsRef<Path>) -> Result<(), CombineError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// The whole pipeline: concatenate, filter to one product, derive `sales`,
/// project `sales,date,region`, write. The output file is only created once
/// every transformation has succeeded. Returns the number of rows written.
pub fn run<P: AsRef<Path>>(
    inputs: &[P],
    output: &Path,
    product: &str,
) -> Result<usize, CombineError> {
    let combined = load_and_concatenate(inputs)?;
    let filtered = filter_by_product(&combined, product)?;
    let derived = derive_sales_column(&filtered)?;
    let projected = project_columns(&derived, &["sales", "date", "region"])?;
    write_csv(&projected, output)?;
    Ok(projected.rows.len())
}
