pub mod artifact;
pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// A sensitivity grid carried as row labels, column labels and a 2-D body.
pub(crate) struct Grid<'a> {
    pub rows: &'a [Value],
    pub cols: &'a [Value],
    pub cells: &'a [Value],
}

pub(crate) fn as_grid(result: &Value) -> Option<Grid<'_>> {
    let rows = result.get("sale_price_changes")?.as_array()?;
    let cols = result.get("reno_budget_changes")?.as_array()?;
    let cells = result.get("net_profit")?.as_array()?;
    Some(Grid { rows, cols, cells })
}

pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
