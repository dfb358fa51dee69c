/// Render context — static document fields plus sampled dynamic variables.

use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::choice::{self, ChoiceError};
use crate::core::document::TemplateDocument;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("failed to sample dynamic variable '{name}'")]
    DynamicChoice {
        name: String,
        #[source]
        source: ChoiceError,
    },
}

/// The values a template renders against: the document's static fields
/// (borrowed, shared by every generation) and one sampled value per
/// dynamic variable (owned, fresh per generation).
pub struct RenderContext<'a> {
    statics: &'a Map<String, Value>,
    dynamics: FxHashMap<String, Value>,
}

impl<'a> RenderContext<'a> {
    pub fn new(statics: &'a Map<String, Value>, dynamics: FxHashMap<String, Value>) -> Self {
        RenderContext { statics, dynamics }
    }

    /// Sample one value for every dynamic variable in the document.
    ///
    /// Variables are visited in key order, so a seeded RNG produces the
    /// same assignment on every run regardless of how the document was
    /// built.
    pub fn sample(document: &'a TemplateDocument, rng: &mut StdRng) -> Result<Self, ContextError> {
        let mut dynamics = FxHashMap::default();
        for (name, options) in &document.dynamics {
            let option = choice::weighted_choice(options, rng).map_err(|source| {
                ContextError::DynamicChoice {
                    name: name.clone(),
                    source,
                }
            })?;
            dynamics.insert(name.clone(), option.value.clone());
        }
        Ok(RenderContext::new(&document.statics, dynamics))
    }

    pub fn statics(&self) -> &Map<String, Value> {
        self.statics
    }

    pub fn dynamics(&self) -> &FxHashMap<String, Value> {
        &self.dynamics
    }

    /// Resolve a dotted path against the context.
    ///
    /// The first segment names the namespace (`static` or `dynamic`),
    /// the second a variable within it, and any remaining segments walk
    /// nested objects. Returns `None` when any step has no binding.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let root = parts.next()?;
        let key = parts.next()?;
        let mut value = match root {
            "static" => self.statics.get(key)?,
            "dynamic" => self.dynamics.get(key)?,
            _ => return None,
        };
        for part in parts {
            value = value.as_object()?.get(part)?;
        }
        Some(value)
    }
}
