use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Method, MethodStatus, PartialParameterSet};

/// What the store keeps for one input method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodEntry {
    #[serde(default)]
    pub used: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<PartialParameterSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Free-text label of what the run consumed (file names, URL, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Latest partial parameter set per input method, plus the `used` history flag.
///
/// A method with no entry is simply unused; absence is never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterStore {
    entries: BTreeMap<Method, MethodEntry>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever `method` stored before and mark it used.
    pub fn set(&mut self, method: Method, params: PartialParameterSet) {
        self.set_with_source(method, params, None);
    }

    /// Like [`set`](Self::set), also recording a source label.
    pub fn set_with_source(
        &mut self,
        method: Method,
        params: PartialParameterSet,
        source: Option<String>,
    ) {
        self.entries.insert(
            method,
            MethodEntry {
                used: true,
                params: Some(params),
                updated_at: Some(Utc::now()),
                source,
            },
        );
    }

    pub fn get(&self, method: Method) -> Option<&PartialParameterSet> {
        self.entries.get(&method).and_then(|e| e.params.as_ref())
    }

    pub fn entry(&self, method: Method) -> Option<&MethodEntry> {
        self.entries.get(&method)
    }

    /// Used methods that still hold a partial set, in registry order.
    pub fn get_all_used(&self) -> Vec<(Method, &PartialParameterSet)> {
        Method::ALL
            .iter()
            .filter_map(|m| {
                let entry = self.entries.get(m)?;
                if !entry.used {
                    return None;
                }
                entry.params.as_ref().map(|p| (*m, p))
            })
            .collect()
    }

    /// True if any method ever ran, even if its parameters were discarded since.
    pub fn any_used(&self) -> bool {
        self.entries.values().any(|e| e.used)
    }

    pub fn is_used(&self, method: Method) -> bool {
        self.entries.get(&method).is_some_and(|e| e.used)
    }

    /// Drop the stored partial set of `method` but keep its `used` flag.
    /// Returns whether a partial set was present.
    pub fn discard(&mut self, method: Method) -> bool {
        match self.entries.get_mut(&method) {
            Some(entry) => {
                entry.updated_at = Some(Utc::now());
                entry.params.take().is_some()
            }
            None => false,
        }
    }

    /// Forget everything, including the `used` history.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Status of every registered method, in registry order.
    pub fn status(&self) -> BTreeMap<Method, MethodStatus> {
        Method::ALL
            .iter()
            .map(|m| {
                let status = self
                    .entries
                    .get(m)
                    .map(|e| MethodStatus {
                        used: e.used,
                        updated_at: e.updated_at,
                        source: e.source.clone(),
                    })
                    .unwrap_or_default();
                (*m, status)
            })
            .collect()
    }
}
