//! Flat JSON rendering of error trees
//!
//! A [`Report`] walks a [`ValidationErrors`] tree depth-first and emits one
//! [`ReportEntry`] per leaf error, carrying the path that led to it:
//!
//! ```rust,ignore
//! let errors = user_rule.check(&user).unwrap_err().into_invalid().unwrap();
//! let json = Report::new(&errors).to_json()?;
//! // [{"path": ".address.country", "error": "country is required"}, ...]
//! ```
//!
//! How a leaf is turned into JSON is decided by a [`Formatter`]; how path
//! segments are joined is decided by a [`Joiner`]. Both are pluggable.

use crate::foundation::{ErrorNode, ValidationError, ValidationErrors};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::{Map, Value};

// ============================================================================
// FORMATTERS
// ============================================================================

/// Converts a leaf error into the `error` member of a report entry.
pub trait Formatter {
    fn format(&self, error: &ValidationError) -> Value;
}

impl<F> Formatter for F
where
    F: Fn(&ValidationError) -> Value,
{
    fn format(&self, error: &ValidationError) -> Value {
        self(error)
    }
}

/// The default formatter: the message with `{param}` placeholders filled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderedMessage;

impl Formatter for RenderedMessage {
    fn format(&self, error: &ValidationError) -> Value {
        Value::String(error.rendered_message().into_owned())
    }
}

/// Emits `{code, message, params}` objects, for clients that localize
/// messages themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detailed;

impl Formatter for Detailed {
    fn format(&self, error: &ValidationError) -> Value {
        let params: Map<String, Value> = error
            .params
            .iter()
            .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
            .collect();

        let mut object = Map::new();
        object.insert("code".into(), Value::String(error.code.to_string()));
        object.insert(
            "message".into(),
            Value::String(error.rendered_message().into_owned()),
        );
        if !params.is_empty() {
            object.insert("params".into(), Value::Object(params));
        }
        Value::Object(object)
    }
}

// ============================================================================
// JOINERS
// ============================================================================

/// Appends one path segment to the path built so far.
pub trait Joiner {
    fn field(&self, path: &str, name: &str) -> String;
    fn index(&self, path: &str, index: usize) -> String;
    fn key(&self, path: &str, key: &str) -> String;
}

/// `.field`, `[index]`, `.key`
#[derive(Debug, Clone, Copy, Default)]
pub struct DotJoiner;

impl Joiner for DotJoiner {
    fn field(&self, path: &str, name: &str) -> String {
        format!("{path}.{name}")
    }

    fn index(&self, path: &str, index: usize) -> String {
        format!("{path}[{index}]")
    }

    fn key(&self, path: &str, key: &str) -> String {
        format!("{path}.{key}")
    }
}

/// JSON Pointer paths (RFC 6901): `/field`, `/index`, `/key`.
///
/// `~` and `/` inside names are escaped as `~0` and `~1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerJoiner;

impl PointerJoiner {
    fn escape(segment: &str) -> String {
        segment.replace('~', "~0").replace('/', "~1")
    }
}

impl Joiner for PointerJoiner {
    fn field(&self, path: &str, name: &str) -> String {
        format!("{path}/{}", Self::escape(name))
    }

    fn index(&self, path: &str, index: usize) -> String {
        format!("{path}/{index}")
    }

    fn key(&self, path: &str, key: &str) -> String {
        format!("{path}/{}", Self::escape(key))
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// One leaf error and the path leading to it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ReportEntry {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    pub error: Value,
}

/// A flat view over an error tree.
///
/// Entries come out in collection order, so the same tree always renders
/// the same way.
#[derive(Debug, Clone)]
pub struct Report<'a, F = RenderedMessage, J = DotJoiner> {
    errors: &'a ValidationErrors,
    formatter: F,
    joiner: J,
}

impl<'a> Report<'a> {
    pub fn new(errors: &'a ValidationErrors) -> Self {
        Self {
            errors,
            formatter: RenderedMessage,
            joiner: DotJoiner,
        }
    }
}

impl<'a, F: Formatter, J: Joiner> Report<'a, F, J> {
    pub fn with_formatter<G: Formatter>(self, formatter: G) -> Report<'a, G, J> {
        Report {
            errors: self.errors,
            formatter,
            joiner: self.joiner,
        }
    }

    pub fn with_joiner<K: Joiner>(self, joiner: K) -> Report<'a, F, K> {
        Report {
            errors: self.errors,
            formatter: self.formatter,
            joiner,
        }
    }

    /// Flattens the tree into leaf entries, depth-first.
    pub fn entries(&self) -> Vec<ReportEntry> {
        let mut entries = Vec::new();
        self.walk(self.errors, "", &mut entries);
        entries
    }

    /// Renders the report as a JSON array, exactly as [`Serialize`] writes it.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    fn walk(&self, errors: &ValidationErrors, path: &str, out: &mut Vec<ReportEntry>) {
        for node in errors {
            match node {
                ErrorNode::Leaf(error) => out.push(ReportEntry {
                    path: path.to_owned(),
                    error: self.formatter.format(error),
                }),
                // whole-struct errors sit at their parent's path
                ErrorNode::Field(field) if field.field().is_empty() => {
                    self.walk(field.errors(), path, out);
                }
                ErrorNode::Field(field) => {
                    let path = self.joiner.field(path, field.field());
                    self.walk(field.errors(), &path, out);
                }
                ErrorNode::Index(index) => {
                    let path = self.joiner.index(path, index.index());
                    self.walk(index.errors(), &path, out);
                }
                ErrorNode::Key(key) => {
                    let path = self.joiner.key(path, key.key());
                    self.walk(key.errors(), &path, out);
                }
            }
        }
    }
}

impl<F: Formatter, J: Joiner> Serialize for Report<'_, F, J> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut seq = serializer.serialize_seq(Some(entries.len()))?;
        for entry in &entries {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}
