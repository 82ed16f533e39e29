use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{as_grid, scalar_text, Grid};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result);
                print_envelope_notes(map);
            } else {
                print_section(None, map);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value) {
    if let Some(grid) = as_grid(result) {
        print_grid(&grid);
        if let Value::Object(map) = result {
            let summary: Map<String, Value> = map
                .iter()
                .filter(|(_, v)| !v.is_array())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            print_section(Some("Summary"), &summary);
        }
        return;
    }

    match result {
        Value::Object(map) => {
            // Scalars first, then one table per nested section
            let scalars: Map<String, Value> = map
                .iter()
                .filter(|(_, v)| !v.is_object() && !is_object_list(v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            if !scalars.is_empty() {
                print_section(None, &scalars);
            }
            for (key, val) in map {
                match val {
                    Value::Object(section) => print_section(Some(key), section),
                    Value::Array(items) if is_object_list(val) => {
                        println!("\n{}", heading(key));
                        print_array_table(items);
                    }
                    _ => {}
                }
            }
        }
        other => println!("{}", scalar_text(other)),
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_section(title: Option<&str>, map: &Map<String, Value>) {
    if let Some(title) = title {
        println!("\n{}", heading(title));
    }
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_grid(grid: &Grid<'_>) {
    println!("Net profit (rows: sale price change %, columns: reno budget change %)");
    let mut builder = Builder::default();
    let mut header = vec![String::new()];
    header.extend(grid.cols.iter().map(scalar_text));
    builder.push_record(header);

    for (label, row) in grid.rows.iter().zip(grid.cells) {
        let mut record = vec![scalar_text(label)];
        if let Value::Array(values) = row {
            record.extend(values.iter().map(scalar_text));
        }
        builder.push_record(record);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn is_object_list(value: &Value) -> bool {
    matches!(value, Value::Array(items) if items.first().is_some_and(Value::is_object))
}

/// `holding_costs` -> `Holding Costs`
fn heading(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        other => scalar_text(other),
    }
}
