//! Namespaced parameter/preset persistence with controlled randomization.
//!
//! Presets are keyed by name within a (tool, algorithm) namespace; saving an
//! existing name overwrites it, with no versioning. Storage read failures
//! are recovered as missing data; save and import failures always surface.
use std::collections::BTreeMap;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::export::filename::unix_millis;
use crate::field::rand01;
use crate::store::storage::KvStorage;

pub mod storage;

/// A single parameter value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// A named set of algorithm parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub algorithm_id: String,
    pub values: BTreeMap<String, ParamValue>,
    /// Unix milliseconds at creation.
    pub timestamp: u64,
}

impl ParameterSet {
    pub fn new(algorithm_id: impl Into<String>) -> Self {
        Self {
            algorithm_id: algorithm_id.into(),
            values: BTreeMap::new(),
            timestamp: unix_millis() as u64,
        }
    }

    /// Sets a numeric parameter.
    pub fn with_number(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), ParamValue::Number(value));
        self
    }

    /// Sets a boolean parameter.
    pub fn with_bool(mut self, name: impl Into<String>, value: bool) -> Self {
        self.values.insert(name.into(), ParamValue::Bool(value));
        self
    }

    /// Sets a text parameter.
    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), ParamValue::Text(value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }
}

/// A stored preset: a named, timestamped parameter set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub timestamp: u64,
    pub parameters: ParameterSet,
}

/// Storage scope: one record per (tool, algorithm) pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Namespace {
    pub tool: String,
    pub algorithm_id: String,
}

impl Namespace {
    pub fn new(tool: impl Into<String>, algorithm_id: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            algorithm_id: algorithm_id.into(),
        }
    }

    fn key(&self) -> String {
        format!("{}:{}", self.tool, self.algorithm_id)
    }
}

type NamespaceRecord = BTreeMap<String, Preset>;

/// Preset persistence over an injected [`KvStorage`].
///
/// Not safe for concurrent writers: there is no isolation between
/// save/load calls.
pub struct ParameterStore {
    storage: Box<dyn KvStorage>,
}

impl ParameterStore {
    pub fn new(storage: Box<dyn KvStorage>) -> Self {
        Self { storage }
    }

    /// Persists a preset; a same-name save silently overwrites.
    pub fn save(&mut self, ns: &Namespace, name: &str, params: &ParameterSet) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("preset name is required".into()));
        }

        let mut record = self.read_namespace(ns);
        record.insert(
            name.to_owned(),
            Preset {
                name: name.to_owned(),
                timestamp: unix_millis() as u64,
                parameters: params.clone(),
            },
        );
        self.write_namespace(ns, &record)?;
        info!(namespace = %ns.key(), name, "preset saved");
        Ok(())
    }

    /// Returns a copy of the stored preset, or [`Error::NotFound`].
    pub fn load(&self, ns: &Namespace, name: &str) -> Result<Preset> {
        self.read_namespace(ns)
            .remove(name)
            .ok_or_else(|| Error::NotFound {
                name: name.to_owned(),
            })
    }

    /// Removes a preset; missing names are not an error.
    pub fn delete(&mut self, ns: &Namespace, name: &str) -> Result<()> {
        let mut record = self.read_namespace(ns);
        if record.remove(name).is_some() {
            self.write_namespace(ns, &record)?;
        }
        Ok(())
    }

    /// Lists preset names in the namespace, sorted.
    pub fn list(&self, ns: &Namespace) -> Vec<String> {
        self.read_namespace(ns).into_keys().collect()
    }

    /// Serializes the whole namespace as pretty JSON.
    pub fn export_all(&self, ns: &Namespace) -> Result<String> {
        serde_json::to_string_pretty(&self.read_namespace(ns))
            .map_err(|e| Error::Parse(e.to_string()))
    }

    /// Merges a serialized namespace into the existing one, last write wins
    /// per name. Malformed input fails with [`Error::Parse`] before anything
    /// is merged.
    pub fn import_all(&mut self, ns: &Namespace, text: &str) -> Result<usize> {
        let incoming: NamespaceRecord =
            serde_json::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;

        let mut record = self.read_namespace(ns);
        let count = incoming.len();
        record.extend(incoming);
        self.write_namespace(ns, &record)?;
        info!(namespace = %ns.key(), count, "presets imported");
        Ok(count)
    }

    fn read_namespace(&self, ns: &Namespace) -> NamespaceRecord {
        // Unreadable or corrupt records degrade to an empty namespace;
        // lookups then report NotFound instead of crashing.
        match self.storage.get(&ns.key()) {
            Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(namespace = %ns.key(), error = %e, "corrupt namespace record ignored");
                NamespaceRecord::new()
            }),
            Ok(None) => NamespaceRecord::new(),
            Err(e) => {
                warn!(namespace = %ns.key(), error = %e, "storage read failed");
                NamespaceRecord::new()
            }
        }
    }

    fn write_namespace(&mut self, ns: &Namespace, record: &NamespaceRecord) -> Result<()> {
        let text = serde_json::to_string(record).map_err(|e| Error::Parse(e.to_string()))?;
        self.storage.set(&ns.key(), &text)
    }
}

/// Perturbs parameters in place for controlled local exploration.
///
/// Numeric values get a uniform offset in +-(variation * value); booleans
/// flip with probability `variation`; other types are untouched. When `keys`
/// is given, only those parameters are considered.
pub fn randomize(
    params: &mut ParameterSet,
    keys: Option<&[&str]>,
    variation: f64,
    rng: &mut dyn RngCore,
) {
    let variation = variation.clamp(0.0, 1.0);
    for (name, value) in params.values.iter_mut() {
        if let Some(keys) = keys {
            if !keys.contains(&name.as_str()) {
                continue;
            }
        }
        match value {
            ParamValue::Number(v) => {
                let roll = rand01(rng) as f64 * 2.0 - 1.0;
                *v += roll * variation * *v;
            }
            ParamValue::Bool(v) => {
                if (rand01(rng) as f64) < variation {
                    *v = !*v;
                }
            }
            ParamValue::Text(_) => {}
        }
    }
}
