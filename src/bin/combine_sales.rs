//! One-off combiner: concatenates the raw daily transaction CSVs, keeps the
//! pink morsel rows, derives the money-formatted `sales` column, and writes
//! `sales,date,region`.

use sales_viz::combine;
use std::path::PathBuf;
use std::process;

const PRODUCT: &str = "pink morsel";
const DEFAULT_OUTPUT: &str = "combined_sales.csv";
const DEFAULT_INPUTS: [&str; 3] = [
    "daily_sales_data_0.csv",
    "daily_sales_data_1.csv",
    "daily_sales_data_2.csv",
];

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (output, inputs) = match args.split_first() {
        None => (
            PathBuf::from(DEFAULT_OUTPUT),
            DEFAULT_INPUTS.iter().map(PathBuf::from).collect(),
        ),
        Some((output, inputs)) if !inputs.is_empty() => (
            PathBuf::from(output),
            inputs.iter().map(PathBuf::from).collect::<Vec<_>>(),
        ),
        Some(_) => {
            eprintln!("Usage: combine_sales [<output.csv> <input.csv>...]");
            process::exit(1);
        }
    };

    match combine::run(&inputs, &output, PRODUCT) {
        Ok(rows) => println!("wrote {rows} rows to {}", output.display()),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}
