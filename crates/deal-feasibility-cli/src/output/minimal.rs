use serde_json::Value;

use super::scalar_text;

/// Headline figures in priority order.
const PRIORITY_KEYS: [&str; 3] = ["base_case_net_profit", "net_profit", "max_purchase_to_hit_target"];

/// Print just the key answer value from the output.
///
/// Sections are searched level by level so a headline at the top of the
/// result beats one nested inside a section.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(found) = find_headline(result_obj) {
        println!("{}", scalar_text(found));
        return;
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val));
            return;
        }
    }

    println!("{}", scalar_text(result_obj));
}

fn find_headline(root: &Value) -> Option<&Value> {
    let mut level: Vec<&Value> = vec![root];
    while !level.is_empty() {
        for key in PRIORITY_KEYS {
            let hit = level
                .iter()
                .filter_map(|&obj| obj.get(key))
                .find(|v| v.is_number() || v.is_string());
            if hit.is_some() {
                return hit;
            }
        }
        level = level
            .iter()
            .filter_map(|&v| v.as_object())
            .flat_map(|m| m.values())
            .filter(|v| v.is_object())
            .collect();
    }
    None
}
