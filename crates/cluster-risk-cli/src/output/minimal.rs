use serde_json::Value;

const SCORE_KEYS: [&str; 2] = ["cluster_risk_score", "risk_score"];

/// Print just the score and its classification, e.g. `90 Critical`.
///
/// Falls back to the first field of the result object when neither score
/// key is present.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        let score = SCORE_KEYS
            .iter()
            .find_map(|k| map.get(*k).filter(|v| !v.is_null()));
        let classification = map.get("classification").filter(|v| !v.is_null());

        match (score, classification) {
            (Some(s), Some(c)) => println!("{} {}", format_minimal(s), format_minimal(c)),
            (Some(s), None) => println!("{}", format_minimal(s)),
            (None, Some(c)) => println!("{}", format_minimal(c)),
            (None, None) => {
                if let Some((key, val)) = map.iter().next() {
                    println!("{}: {}", key, format_minimal(val));
                }
            }
        }
        return;
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
