//! Multi-source merge of partial parameter sets into the canonical profile.
//!
//! The merge is a pure function of the store: nothing from a previous
//! profile survives a recomputation. [`explain`] runs the same steps as
//! [`recompute`] and keeps the intermediate tallies for inspection.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::model::{
    CanonicalProfile, FieldValue, ListField, Method, NumericField, PartialParameterSet,
    DEFAULT_LEVEL,
};
use crate::store::ParameterStore;

const MIN_LEVEL: f64 = 1.0;
const MAX_LEVEL: f64 = 10.0;

/// One distinct value seen for a list field across all sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub value: String,
    pub count: usize,
    /// Position of the first occurrence in the registry-order concatenation.
    pub first_seen: usize,
    pub methods: Vec<Method>,
}

/// Slot-0 replacement made so a priority method is represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityOverride {
    pub method: Method,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListOutcome {
    pub field: ListField,
    /// Ranked by descending count, then first occurrence.
    pub tallies: Vec<Tally>,
    pub selected: Vec<String>,
    pub used_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_override: Option<PriorityOverride>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub method: Method,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericOutcome {
    pub field: NumericField,
    pub contributions: Vec<Contribution>,
    /// True when only priority-method values entered the mean.
    pub priority_only: bool,
    pub defaulted: bool,
    pub value: u8,
}

/// A contribution that was ignored because its shape did not fit the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedContribution {
    pub method: Method,
    pub field: &'static str,
}

/// Everything the merge decided, plus the resulting profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeReport {
    pub sources: Vec<Method>,
    pub lists: Vec<ListOutcome>,
    pub numbers: Vec<NumericOutcome>,
    pub skipped: Vec<SkippedContribution>,
    /// Field paths overridden by hand edits after the merge.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub adjusted: Vec<String>,
    pub profile: CanonicalProfile,
}

impl MergeReport {
    /// Human-readable account of every merge decision.
    pub fn to_markdown(&self) -> String {
        let mut md = String::from("# Merge Report\n\n");

        if self.sources.is_empty() {
            md.push_str("No input method has contributed parameters; every field uses its default.\n");
        } else {
            let names: Vec<&str> = self.sources.iter().map(|m| m.as_str()).collect();
            md.push_str(&format!("Sources (registry order): {}\n", names.join(", ")));
        }

        md.push_str("\n## Lists\n");
        for outcome in &self.lists {
            md.push_str(&format!("\n### {}\n\n", outcome.field.path()));
            for tally in &outcome.tallies {
                let methods: Vec<&str> = tally.methods.iter().map(|m| m.as_str()).collect();
                md.push_str(&format!(
                    "- {} x{} ({})\n",
                    tally.value,
                    tally.count,
                    methods.join(", ")
                ));
            }
            md.push_str(&format!("- **selected:** [{}]", outcome.selected.join(", ")));
            if outcome.used_fallback {
                md.push_str(" (default)");
            }
            md.push('\n');
            if let Some(o) = &outcome.priority_override {
                match &o.replaced {
                    Some(replaced) => md.push_str(&format!(
                        "- **priority override:** {} from {} replaced {}\n",
                        o.value, o.method, replaced
                    )),
                    None => md.push_str(&format!(
                        "- **priority override:** {} from {}\n",
                        o.value, o.method
                    )),
                }
            }
        }

        md.push_str("\n## Levels\n\n");
        for outcome in &self.numbers {
            let inputs: Vec<String> = outcome
                .contributions
                .iter()
                .map(|c| format!("{}={}", c.method, c.value))
                .collect();
            let note = if outcome.defaulted {
                " (default)"
            } else if outcome.priority_only {
                " (priority sources only)"
            } else {
                ""
            };
            md.push_str(&format!(
                "- {}: **{}**{} [{}]\n",
                outcome.field.path(),
                outcome.value,
                note,
                inputs.join(", ")
            ));
        }

        if !self.skipped.is_empty() {
            md.push_str("\n## Skipped\n\n");
            for s in &self.skipped {
                md.push_str(&format!("- {} from {} (malformed)\n", s.field, s.method));
            }
        }

        if !self.adjusted.is_empty() {
            md.push_str("\n## Manual adjustments\n\n");
            for path in &self.adjusted {
                md.push_str(&format!("- {path} (set by hand, overrides the merge)\n"));
            }
        }

        md
    }
}

/// Compute a fresh canonical profile from the store contents.
pub fn recompute(store: &ParameterStore) -> CanonicalProfile {
    explain(store).profile
}

/// Compute the canonical profile and keep every intermediate decision.
pub fn explain(store: &ParameterStore) -> MergeReport {
    let sources = store.get_all_used();
    let mut profile = CanonicalProfile::default();
    let mut skipped = Vec::new();

    let lists: Vec<ListOutcome> = ListField::ALL
        .iter()
        .map(|field| {
            let outcome = merge_list(*field, &sources, &mut skipped);
            field.set(&mut profile, outcome.selected.clone());
            outcome
        })
        .collect();

    let numbers: Vec<NumericOutcome> = NumericField::ALL
        .iter()
        .map(|field| {
            let outcome = merge_numeric(*field, &sources, &mut skipped);
            field.set(&mut profile, outcome.value);
            outcome
        })
        .collect();

    debug!(
        sources = sources.len(),
        skipped = skipped.len(),
        "Recomputed canonical profile"
    );

    MergeReport {
        sources: sources.iter().map(|(m, _)| *m).collect(),
        lists,
        numbers,
        skipped,
        adjusted: Vec::new(),
        profile,
    }
}

fn merge_list(
    field: ListField,
    sources: &[(Method, &PartialParameterSet)],
    skipped: &mut Vec<SkippedContribution>,
) -> ListOutcome {
    let mut contributions: Vec<(Method, &[String])> = Vec::new();
    for (method, set) in sources {
        match field.read(set) {
            FieldValue::List(items) => contributions.push((*method, items.as_slice())),
            FieldValue::Missing => {}
            other => {
                debug!(%method, field = field.path(), value = ?other, "Skipping malformed list contribution");
                skipped.push(SkippedContribution {
                    method: *method,
                    field: field.path(),
                });
            }
        }
    }

    let mut tallies: Vec<Tally> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut position = 0;
    for (method, items) in &contributions {
        for value in items.iter() {
            match index.get(value.as_str()) {
                Some(&i) => {
                    let tally = &mut tallies[i];
                    tally.count += 1;
                    if !tally.methods.contains(method) {
                        tally.methods.push(*method);
                    }
                }
                None => {
                    index.insert(value.as_str(), tallies.len());
                    tallies.push(Tally {
                        value: value.clone(),
                        count: 1,
                        first_seen: position,
                        methods: vec![*method],
                    });
                }
            }
            position += 1;
        }
    }

    tallies.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.first_seen.cmp(&b.first_seen))
    });

    let mut selected: Vec<String> = tallies
        .iter()
        .take(field.cap())
        .map(|t| t.value.clone())
        .collect();

    let used_fallback = selected.is_empty() && !field.fallback().is_empty();
    if used_fallback {
        selected = field.fallback().iter().map(|v| v.to_string()).collect();
    }

    let priority_override = if field.has_priority_override() {
        apply_priority_override(field, &contributions, &mut selected)
    } else {
        None
    };

    ListOutcome {
        field,
        tallies,
        selected,
        used_fallback,
        priority_override,
    }
}

/// Put the first priority-method value missing from `selected` into slot 0.
fn apply_priority_override(
    field: ListField,
    contributions: &[(Method, &[String])],
    selected: &mut Vec<String>,
) -> Option<PriorityOverride> {
    let (method, value) = Method::PRIORITY.iter().find_map(|priority| {
        contributions
            .iter()
            .filter(|(m, _)| m == priority)
            .flat_map(|(m, items)| items.iter().map(move |v| (*m, v)))
            .find(|(_, v)| !selected.contains(*v))
    })?;

    let value = value.clone();
    let replaced = match selected.first_mut() {
        Some(slot) => Some(std::mem::replace(slot, value.clone())),
        None => {
            selected.push(value.clone());
            None
        }
    };

    debug!(
        %method,
        field = field.path(),
        value = %value,
        replaced = ?replaced,
        "Priority source override"
    );

    Some(PriorityOverride {
        method,
        value,
        replaced,
    })
}

fn merge_numeric(
    field: NumericField,
    sources: &[(Method, &PartialParameterSet)],
    skipped: &mut Vec<SkippedContribution>,
) -> NumericOutcome {
    let mut contributions = Vec::new();
    for (method, set) in sources {
        match field.read(set) {
            FieldValue::Scalar(value) => contributions.push(Contribution {
                method: *method,
                value: *value,
            }),
            FieldValue::Missing => {}
            other => {
                debug!(%method, field = field.path(), value = ?other, "Skipping malformed numeric contribution");
                skipped.push(SkippedContribution {
                    method: *method,
                    field: field.path(),
                });
            }
        }
    }

    if contributions.is_empty() {
        return NumericOutcome {
            field,
            contributions,
            priority_only: false,
            defaulted: true,
            value: DEFAULT_LEVEL,
        };
    }

    let priority_only = field.prefers_priority_sources()
        && contributions.iter().any(|c| c.method.is_priority());

    let considered: Vec<f64> = contributions
        .iter()
        .filter(|c| !priority_only || c.method.is_priority())
        .map(|c| c.value)
        .collect();

    NumericOutcome {
        field,
        contributions,
        priority_only,
        defaulted: false,
        value: rounded_mean(&considered),
    }
}

/// Round-half-up mean, clamped to the 1-10 scale. `values` must be non-empty.
fn rounded_mean(values: &[f64]) -> u8 {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    (mean + 0.5).floor().clamp(MIN_LEVEL, MAX_LEVEL) as u8
}
