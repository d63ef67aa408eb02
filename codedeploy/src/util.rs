use serde_json::{Map, Value};

/// Splits a comma separated parameter value, dropping blanks.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Renders one page of a CodeDeploy list response the way the API names it:
/// `{ "<list_key>": [...], "nextToken": "..." }`. `nextToken` is only present
/// when the service returned one.
pub fn page_output(list_key: &str, items: &[String], next_token: Option<&str>) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert(
        list_key.to_string(),
        Value::Array(items.iter().cloned().map(Value::String).collect()),
    );

    if let Some(next_token) = next_token {
        out.insert(String::from("nextToken"), Value::String(next_token.to_string()));
    }

    out
}
