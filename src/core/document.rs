/// Template document — types, parsing, loading, and validation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::core::choice::Weighted;
use crate::core::template::{Template, TemplateError};
use crate::schema::outcome::TEMPLATE_SUFFIX;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{location} has weight {weight}, expected a non-negative finite number")]
    InvalidWeight { weight: f64, location: String },
    #[error("dynamic variable '{0}' has no options")]
    EmptyDynamic(String),
    #[error("{location} has zero total weight")]
    ZeroTotalWeight { location: String },
    #[error("field '{field}' of outcome type '{outcome_type}' must be a string")]
    TemplateFieldNotString { outcome_type: String, field: String },
    #[error("template error in field '{field}' of outcome type '{outcome_type}': {source}")]
    Template {
        outcome_type: String,
        field: String,
        #[source]
        source: TemplateError,
    },
}

/// One weighted alternative for a dynamic variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedOption {
    pub weight: f64,
    pub value: Value,
}

impl Weighted for WeightedOption {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// One outcome the document can produce: a type tag, a selection
/// weight, and arbitrary further fields. Fields ending in `Template`
/// hold prompt templates and are rendered during generation; all other
/// fields pass through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeDef {
    #[serde(rename = "type")]
    pub outcome_type: String,
    pub weight: f64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Weighted for OutcomeDef {
    fn weight(&self) -> f64 {
        self.weight
    }
}

impl OutcomeDef {
    /// The template-bearing fields of this outcome, in key order.
    pub fn template_fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields
            .iter()
            .filter(|(key, _)| key.ends_with(TEMPLATE_SUFFIX))
    }
}

/// A template path that no document binding can satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnboundPath {
    pub outcome_type: String,
    pub field: String,
    pub path: String,
}

/// The root configuration for a generator: static fields, dynamic
/// weighted option sets, and the outcome list.
///
/// Dynamic variables live in a `BTreeMap` so sampling visits them in a
/// stable order — seeded generation must not depend on JSON key order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateDocument {
    #[serde(rename = "static", default)]
    pub statics: Map<String, Value>,
    #[serde(rename = "dynamic", default)]
    pub dynamics: BTreeMap<String, Vec<WeightedOption>>,
    #[serde(default)]
    pub outcomes: Vec<OutcomeDef>,
}

impl TemplateDocument {
    /// Load a template document from a JSON file and validate it.
    pub fn load_from_json(path: &Path) -> Result<TemplateDocument, DocumentError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_json(&contents)
    }

    /// Parse a template document from a JSON string and validate it.
    pub fn parse_json(input: &str) -> Result<TemplateDocument, DocumentError> {
        let document: TemplateDocument = serde_json::from_str(input)?;
        document.validate()?;
        Ok(document)
    }

    /// Build a template document from an in-memory JSON value and
    /// validate it.
    pub fn from_value(value: Value) -> Result<TemplateDocument, DocumentError> {
        let document: TemplateDocument = serde_json::from_value(value)?;
        document.validate()?;
        Ok(document)
    }

    /// Check everything that can be checked without sampling: weight
    /// domains, dynamic option lists and their totals, and template
    /// field syntax.
    ///
    /// An empty outcome list passes — generation reports it when asked
    /// to select from it. Zero-total subsets of outcomes and path
    /// bindings are also left to the point of use (see `unbound_paths`
    /// for the static approximation of the latter).
    pub fn validate(&self) -> Result<(), DocumentError> {
        for (name, options) in &self.dynamics {
            if options.is_empty() {
                return Err(DocumentError::EmptyDynamic(name.clone()));
            }
            for (index, option) in options.iter().enumerate() {
                check_weight(
                    option.weight,
                    || format!("option {} of dynamic variable '{}'", index, name),
                )?;
            }
            let total: f64 = options.iter().map(|option| option.weight).sum();
            if total <= 0.0 {
                return Err(DocumentError::ZeroTotalWeight {
                    location: format!("dynamic variable '{}'", name),
                });
            }
        }

        for (index, outcome) in self.outcomes.iter().enumerate() {
            check_weight(
                outcome.weight,
                || format!("outcome {} (type '{}')", index, outcome.outcome_type),
            )?;
            for (key, value) in outcome.template_fields() {
                let text = match value.as_str() {
                    Some(text) => text,
                    None => {
                        return Err(DocumentError::TemplateFieldNotString {
                            outcome_type: outcome.outcome_type.clone(),
                            field: key.clone(),
                        });
                    }
                };
                Template::parse(text).map_err(|source| DocumentError::Template {
                    outcome_type: outcome.outcome_type.clone(),
                    field: key.clone(),
                    source,
                })?;
            }
        }

        Ok(())
    }

    /// Report template paths whose namespace or variable name has no
    /// binding in the document.
    ///
    /// Only the first two path segments are checked — deeper segments
    /// depend on which option gets sampled, so they surface as render
    /// errors instead. Fields `validate` would reject are skipped here.
    pub fn unbound_paths(&self) -> Vec<UnboundPath> {
        let mut unbound = Vec::new();
        for outcome in &self.outcomes {
            for (key, value) in outcome.template_fields() {
                let text = match value.as_str() {
                    Some(text) => text,
                    None => continue,
                };
                let template = match Template::parse(text) {
                    Ok(template) => template,
                    Err(_) => continue,
                };
                for path in template.variables() {
                    let mut parts = path.split('.');
                    let bound = match (parts.next(), parts.next()) {
                        (Some("static"), Some(name)) => self.statics.contains_key(name),
                        (Some("dynamic"), Some(name)) => self.dynamics.contains_key(name),
                        _ => false,
                    };
                    if !bound {
                        unbound.push(UnboundPath {
                            outcome_type: outcome.outcome_type.clone(),
                            field: key.clone(),
                            path: path.to_string(),
                        });
                    }
                }
            }
        }
        unbound
    }

    /// The distinct outcome types in the document, in first-seen order.
    pub fn types(&self) -> Vec<&str> {
        let mut types = Vec::new();
        for outcome in &self.outcomes {
            let name = outcome.outcome_type.as_str();
            if !types.contains(&name) {
                types.push(name);
            }
        }
        types
    }
}

fn check_weight(weight: f64, location: impl Fn() -> String) -> Result<(), DocumentError> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(DocumentError::InvalidWeight {
            weight,
            location: location(),
        });
    }
    Ok(())
}
