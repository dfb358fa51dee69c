/// Outcome generation — selection, dynamic sampling, and rendering.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use thiserror::Error;

use crate::core::choice::{self, ChoiceError};
use crate::core::context::{ContextError, RenderContext};
use crate::core::document::{OutcomeDef, TemplateDocument};
use crate::core::template::{Template, TemplateError};
use crate::schema::outcome::{Outcome, RENDERED_SUFFIX, TEMPLATE_SUFFIX};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("document has no outcomes")]
    EmptyOutcomes,
    #[error("no outcome has type '{0}'")]
    UnknownType(String),
    #[error("failed to select an outcome")]
    Selection(#[source] ChoiceError),
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("field '{field}' holds a non-string template")]
    TemplateFieldNotString { field: String },
    #[error("failed to render field '{field}'")]
    Render {
        field: String,
        #[source]
        source: TemplateError,
    },
}

/// Generates outcome records from a template document.
///
/// The generator owns an immutable document and takes `&self` for every
/// operation, so a single instance can serve concurrent callers. Each
/// call draws the outcome first and the dynamic variables second, so a
/// seeded RNG reproduces the full record.
#[derive(Debug, Clone)]
pub struct OutcomeGenerator {
    document: TemplateDocument,
}

impl OutcomeGenerator {
    pub fn new(document: TemplateDocument) -> Self {
        OutcomeGenerator { document }
    }

    pub fn document(&self) -> &TemplateDocument {
        &self.document
    }

    /// Generate one outcome from the full outcome list.
    pub fn generate(&self) -> Result<Outcome, GenerateError> {
        self.generate_with(None, &mut StdRng::from_entropy())
    }

    /// Generate one outcome restricted to definitions of the given type.
    pub fn generate_typed(&self, outcome_type: &str) -> Result<Outcome, GenerateError> {
        self.generate_with(Some(outcome_type), &mut StdRng::from_entropy())
    }

    /// Generate one outcome with an injected RNG, optionally restricted
    /// to one outcome type.
    ///
    /// An empty candidate set is an error, never a silent default:
    /// `EmptyOutcomes` when the document defines no outcomes,
    /// `UnknownType` when a filter matches none of them.
    pub fn generate_with(
        &self,
        type_filter: Option<&str>,
        rng: &mut StdRng,
    ) -> Result<Outcome, GenerateError> {
        let candidates: Vec<&OutcomeDef> = match type_filter {
            Some(wanted) => self
                .document
                .outcomes
                .iter()
                .filter(|outcome| outcome.outcome_type == wanted)
                .collect(),
            None => self.document.outcomes.iter().collect(),
        };
        if candidates.is_empty() {
            return Err(match type_filter {
                Some(wanted) => GenerateError::UnknownType(wanted.to_string()),
                None => GenerateError::EmptyOutcomes,
            });
        }

        let chosen = *choice::weighted_choice(&candidates, rng)
            .map_err(GenerateError::Selection)?;
        let ctx = RenderContext::sample(&self.document, rng)?;
        render_outcome(chosen, &ctx)
    }
}

/// Render every `*Template` field of the chosen definition and assemble
/// the outcome record.
///
/// The record keeps the original template fields and gains one
/// `*Rendered` string per template field; an existing field under a
/// rendered key is overwritten. All other fields pass through untouched.
fn render_outcome(
    chosen: &OutcomeDef,
    ctx: &RenderContext<'_>,
) -> Result<Outcome, GenerateError> {
    let mut fields = chosen.fields.clone();
    for (field, value) in &chosen.fields {
        let stem = match field.strip_suffix(TEMPLATE_SUFFIX) {
            Some(stem) => stem,
            None => continue,
        };
        let text = value.as_str().ok_or_else(|| {
            GenerateError::TemplateFieldNotString {
                field: field.clone(),
            }
        })?;
        let template = Template::parse(text).map_err(|source| GenerateError::Render {
            field: field.clone(),
            source,
        })?;
        let rendered = template.render(ctx).map_err(|source| GenerateError::Render {
            field: field.clone(),
            source,
        })?;
        fields.insert(
            format!("{}{}", stem, RENDERED_SUFFIX),
            Value::String(rendered),
        );
    }

    Ok(Outcome {
        outcome_type: chosen.outcome_type.clone(),
        weight: chosen.weight,
        fields,
    })
}
