use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Format output as tables: scalar result fields first, then one row per
/// detected pattern.
pub fn print_table(value: &Value) {
    let Value::Object(envelope) = value else {
        println!("{}", value);
        return;
    };
    let result = match envelope.get("result") {
        Some(Value::Object(result)) => result,
        _ => envelope,
    };

    print_fields(result);

    if let Some(Value::Array(patterns)) = result.get("detected_patterns") {
        print_patterns(patterns);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if key == "detected_patterns" {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_patterns(patterns: &[Value]) {
    if patterns.is_empty() {
        println!("\nPatterns: (none)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Pattern", "Detail"]);
    for (i, p) in patterns.iter().enumerate() {
        let (kind, detail) = match p {
            // Wire response: tag strings such as `density_spike:A→B`
            Value::String(tag) => match tag.split_once(':') {
                Some((kind, rest)) => (kind.to_string(), rest.to_string()),
                None => (tag.clone(), String::new()),
            },
            // Full analysis: tagged objects
            Value::Object(obj) => {
                let kind = obj
                    .get("kind")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let detail: Vec<String> = obj
                    .iter()
                    .filter(|(k, _)| k.as_str() != "kind")
                    .map(|(k, v)| format!("{}={}", k, format_value(v)))
                    .collect();
                (kind, detail.join(" "))
            }
            other => (format_value(other), String::new()),
        };
        builder.push_record([(i + 1).to_string(), kind, detail]);
    }
    println!("\nPatterns:\n{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(map) => {
            // pairs render as A→B
            match (map.get("sender"), map.get("receiver")) {
                (Some(Value::String(s)), Some(Value::String(r))) => format!("{s}→{r}"),
                _ => serde_json::to_string(value).unwrap_or_default(),
            }
        }
    }
}
