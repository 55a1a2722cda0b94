//! Locate structured data inside free-form model output.
//!
//! Models are asked for a bare JSON object but routinely wrap it in prose or
//! markdown code fences. These helpers find the object and hand back the map.

use serde_json::{Map, Value};

/// Extract the outermost JSON object from a response.
///
/// Tries the whole text first, then the span between the first `{` and the
/// last `}`. Returns `None` when no JSON object can be parsed.
pub fn extract_json_object(response: &str) -> Option<Map<String, Value>> {
    let trimmed = response.trim();
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        return Some(map);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }

    match serde_json::from_str::<Value>(&trimmed[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Look up the first present key among camelCase/snake_case aliases
pub fn field<'a>(map: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| map.get(*name).filter(|v| !v.is_null()))
}
