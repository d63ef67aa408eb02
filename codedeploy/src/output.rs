use std::io::Write;

use serde_json::{Map, Value, json};

/// Wraps a successful result for the orchestration tool. Queries never change
/// anything, so `changed` is always false.
pub fn success(result: Value) -> Value {
    let mut out = match result {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert(String::from("result"), other);
            map
        }
    };
    out.insert(String::from("changed"), Value::Bool(false));
    Value::Object(out)
}

pub fn failure(msg: &str) -> Value {
    json!({
        "failed": true,
        "changed": false,
        "msg": msg,
    })
}

pub fn emit(out: &mut impl Write, value: &Value, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
