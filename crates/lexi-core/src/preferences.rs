use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use lexi_types::DictionaryId;
use serde_json::{Map, Value};

use crate::error::PreferenceError;

pub const SUGGESTIONS_ENABLED_KEY: &str = "suggestionsEnabled";
pub const ENABLED_DICTIONARIES_KEY: &str = "enabledDictionaries";

/// Durable key-value storage for user preferences
pub trait PreferenceStore: Send + Sync {
    fn get_bool(&self, key: &str) -> Option<bool>;

    fn set_bool(&self, key: &str, value: bool) -> Result<(), PreferenceError>;

    fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>>;

    fn set_string_set(&self, key: &str, value: BTreeSet<String>) -> Result<(), PreferenceError>;
}

fn bool_value(values: &Map<String, Value>, key: &str) -> Option<bool> {
    values.get(key).and_then(Value::as_bool)
}

fn string_set_value(values: &Map<String, Value>, key: &str) -> Option<BTreeSet<String>> {
    let items = values.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
    )
}

fn string_set_to_value(value: BTreeSet<String>) -> Value {
    Value::Array(value.into_iter().map(Value::String).collect())
}

/// Process-local store, mainly for tests
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<Map<String, Value>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_bool(&self, key: &str) -> Option<bool> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        bool_value(&values, key)
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), PreferenceError> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), Value::Bool(value));
        Ok(())
    }

    fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        string_set_value(&values, key)
    }

    fn set_string_set(&self, key: &str, value: BTreeSet<String>) -> Result<(), PreferenceError> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), string_set_to_value(value));
        Ok(())
    }
}

/// Store backed by a JSON object on disk, rewritten on every change
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    values: RwLock<Map<String, Value>>,
}

impl JsonFilePreferenceStore {
    /// Open the store at `path`.
    ///
    /// A missing file starts empty. An unreadable or corrupt file is reported.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();

        let values = if path.exists() {
            let data = fs::read_to_string(&path)?;
            if data.trim().is_empty() {
                Map::new()
            } else {
                serde_json::from_str(&data)?
            }
        } else {
            tracing::info!("No preferences at {}, starting with defaults", path.display());
            Map::new()
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &Map<String, Value>) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write then rename so a crash never leaves a truncated file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(values)?)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }

    fn update(&self, key: &str, value: Value) -> Result<(), PreferenceError> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value);
        self.persist(&values)
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get_bool(&self, key: &str) -> Option<bool> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        bool_value(&values, key)
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), PreferenceError> {
        self.update(key, Value::Bool(value))
    }

    fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        string_set_value(&values, key)
    }

    fn set_string_set(&self, key: &str, value: BTreeSet<String>) -> Result<(), PreferenceError> {
        self.update(key, string_set_to_value(value))
    }
}

/// Typed view over a [`PreferenceStore`]
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn PreferenceStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Ephemeral preferences starting from first-run defaults
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryPreferenceStore::new()))
    }

    pub fn suggestions_enabled(&self) -> bool {
        self.store.get_bool(SUGGESTIONS_ENABLED_KEY).unwrap_or(true)
    }

    pub fn set_suggestions_enabled(&self, enabled: bool) -> Result<(), PreferenceError> {
        self.store.set_bool(SUGGESTIONS_ENABLED_KEY, enabled)
    }

    /// Stored dictionaries, or the default subset if nothing was ever stored
    pub fn enabled_dictionaries(&self) -> BTreeSet<DictionaryId> {
        let Some(stored) = self.store.get_string_set(ENABLED_DICTIONARIES_KEY) else {
            return DictionaryId::default_enabled();
        };

        stored
            .iter()
            .filter_map(|value| {
                let id = DictionaryId::from_persisted(value);
                if id.is_none() {
                    tracing::warn!("Ignoring unknown dictionary in preferences: {value}");
                }
                id
            })
            .collect()
    }

    pub fn set_enabled_dictionaries(
        &self,
        ids: &BTreeSet<DictionaryId>,
    ) -> Result<(), PreferenceError> {
        let codes = ids.iter().map(|id| id.code().to_string()).collect();
        self.store.set_string_set(ENABLED_DICTIONARIES_KEY, codes)
    }
}
