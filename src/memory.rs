use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const KEY_SELECTED_ROLE: &str = "selectedRole";
pub const KEY_USER_DATA: &str = "userData";
pub const KEY_ATTENDANCE_LOG: &str = "attendanceLog";

/// Session-lifetime key/value store. Last write wins; every write is
/// visible to the next read, but writes to different keys are independent.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save<T: Serialize>(&mut self, key: &str, data: &T) -> serde_json::Result<()> {
        let v = serde_json::to_value(data)?;
        self.entries.insert(key.to_string(), v);
        log::debug!("memory: wrote {}", key);
        Ok(())
    }

    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Typed read. A value that no longer matches `T` reads as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let v = self.entries.get(key)?;
        match serde_json::from_value(v.clone()) {
            Ok(t) => Some(t),
            Err(e) => {
                log::warn!("memory: {} has unexpected shape: {}", key, e);
                None
            }
        }
    }

    /// Appends to a JSON array under `key`, creating it if needed.
    pub fn push<T: Serialize>(&mut self, key: &str, item: &T) -> serde_json::Result<usize> {
        let v = serde_json::to_value(item)?;
        let slot = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }
        let arr = slot.as_array_mut().map(|a| {
            a.push(v);
            a.len()
        });
        Ok(arr.unwrap_or(0))
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
