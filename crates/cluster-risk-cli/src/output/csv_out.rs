use serde_json::Value;
use std::io;

/// Write the result as two-column `field,value` CSV to stdout.
///
/// List fields (entities, patterns) repeat the field name once per element,
/// so the output stays rectangular.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let _ = wtr.write_record(["field", "value"]);
    match result {
        Value::Object(map) => {
            for (key, val) in map {
                match val {
                    Value::Array(items) => {
                        for item in items {
                            let _ = wtr.write_record([key.as_str(), &format_csv_value(item)]);
                        }
                    }
                    _ => {
                        let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                    }
                }
            }
        }
        other => {
            let _ = wtr.write_record(["value", &format_csv_value(other)]);
        }
    }

    let _ = wtr.flush();
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
