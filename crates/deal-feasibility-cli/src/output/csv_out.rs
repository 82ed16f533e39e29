use serde_json::Value;
use std::io;

use super::{as_grid, scalar_text};

/// Write output as CSV to stdout.
///
/// Nested sections flatten to `section.field` rows; a sensitivity grid is
/// written as a matrix.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(grid) = as_grid(result) {
        let mut header = vec!["sale_price_change_pct \\ reno_budget_change_pct".to_string()];
        header.extend(grid.cols.iter().map(scalar_text));
        let _ = wtr.write_record(&header);
        for (label, row) in grid.rows.iter().zip(grid.cells) {
            let mut record = vec![scalar_text(label)];
            if let Value::Array(values) = row {
                record.extend(values.iter().map(scalar_text));
            }
            let _ = wtr.write_record(&record);
        }
    } else {
        let _ = wtr.write_record(["field", "value"]);
        for (field, val) in flatten(result) {
            let _ = wtr.write_record([field.as_str(), &scalar_text(val)]);
        }
    }

    let _ = wtr.flush();
}

fn flatten(value: &Value) -> Vec<(String, &Value)> {
    let mut rows = Vec::new();
    collect(String::new(), value, &mut rows);
    rows
}

fn collect<'a>(prefix: String, value: &'a Value, rows: &mut Vec<(String, &'a Value)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect(path, val, rows);
            }
        }
        other => rows.push((prefix, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_dots_section_names() {
        let result = json!({
            "profitability": { "net_profit": 89600, "roi_pct": 14.1 },
            "go_no_go": "GO"
        });
        let rows: Vec<(String, String)> = flatten(&result)
            .into_iter()
            .map(|(k, v)| (k, scalar_text(v)))
            .collect();

        assert!(rows.contains(&("profitability.net_profit".into(), "89600".into())));
        assert!(rows.contains(&("profitability.roi_pct".into(), "14.1".into())));
        assert!(rows.contains(&("go_no_go".into(), "GO".into())));
    }
}
