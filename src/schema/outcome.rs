use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key suffix marking a prompt template field in an outcome definition.
pub const TEMPLATE_SUFFIX: &str = "Template";
/// Key suffix of the rendered counterpart written at generation time.
pub const RENDERED_SUFFIX: &str = "Rendered";

/// A fully resolved outcome record: the chosen definition's type, weight,
/// and fields, plus one `*Rendered` string per `*Template` field.
///
/// Records are deep, independent copies. Callers may mutate them freely
/// without affecting the source document or other records. The serde
/// shape is flat, so a record round-trips as a single JSON object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    #[serde(rename = "type")]
    pub outcome_type: String,
    pub weight: f64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Outcome {
    /// The rendered string for a template stem: `rendered("prompt")`
    /// returns the `promptRendered` field.
    pub fn rendered(&self, stem: &str) -> Option<&str> {
        self.field(&format!("{}{}", stem, RENDERED_SUFFIX))?.as_str()
    }

    /// The source template string for a stem, retained unchanged.
    pub fn template(&self, stem: &str) -> Option<&str> {
        self.field(&format!("{}{}", stem, TEMPLATE_SUFFIX))?.as_str()
    }

    /// A passthrough field by exact key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
