use crate::ipc::error::HandlerErr;

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn get_optional_str(params: &serde_json::Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

pub fn get_required_usize(params: &serde_json::Value, key: &str) -> Result<usize, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_u64())
        .map(|n| n as usize)
        .ok_or_else(|| HandlerErr::bad_params(format!("missing or non-integer {}", key)))
}

/// Parses `key` with `parse`, naming the key in the error.
pub fn get_parsed<T>(
    params: &serde_json::Value,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, HandlerErr> {
    let raw = get_required_str(params, key)?;
    parse(&raw).ok_or_else(|| HandlerErr::bad_params(format!("unknown {}: {}", key, raw)))
}
