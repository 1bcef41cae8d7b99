use chrono::DateTime;
use comfy_table::{presets, ContentArrangement, Table};

/// Types that can be rendered as one row of a results table.
pub trait TableRow {
    /// Column headers, shared by every value of the type.
    fn columns() -> Vec<&'static str>;
    /// Cell values for this row, in column order.
    fn row(&self) -> Vec<String>;
}

/// Renders results in a human-readable table format on standard output.
#[derive(Clone, Copy, Debug, Default)]
pub struct TablePrinter;

impl TablePrinter {
    pub fn new() -> Self {
        TablePrinter
    }

    /// Returns the table representation of `results`.
    pub fn render<R: TableRow>(&self, results: &[R]) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(R::columns());
        for result in results {
            table.add_row(result.row());
        }
        table.to_string()
    }

    /// Prints `results` as a table.
    pub fn print<R: TableRow>(&self, results: &[R]) {
        println!("{}", self.render(results));
    }

    /// Prints the results on success or the error otherwise.
    pub fn print_result_or_error<R: TableRow>(&self, result: &anyhow::Result<Vec<R>>) {
        match result {
            Ok(rows) => self.print(rows),
            Err(error) => print_error(error),
        }
    }
}

/// Prints an error on the standard error stream.
pub fn print_error(error: &anyhow::Error) {
    eprintln!("Error: {error:#}");
}

/// Returns the UTC string representation of a unix timestamp in seconds.
pub fn format_timestamp(seconds: i64) -> String {
    match DateTime::from_timestamp(seconds, 0) {
        Some(time) => time.to_string(),
        None => seconds.to_string(),
    }
}

/// Returns the `YYYY-MM-DD` date of a unix timestamp in seconds.
pub fn format_date(seconds: i64) -> String {
    match DateTime::from_timestamp(seconds, 0) {
        Some(time) => time.format("%Y-%m-%d").to_string(),
        None => seconds.to_string(),
    }
}

/// Sets as upper case the first letter of a word.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
