//! Field specifications and schema descriptions.
//!
//! A [`FieldSpec`] is one (name, type, constraints, default, hint) tuple;
//! an [`EntitySchema`] is an ordered list of them. The spec structs here
//! are the single source of truth for both validation
//! ([`EntitySchema::validate`](crate::schema::validate)) and the
//! introspection payload ([`EntitySchema::describe`]).

use serde::Serialize;
use serde_json::Value;

/// The declared type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// A JSON string.
    Text,
    /// A JSON number (integers accepted).
    Real,
    /// A JSON integer.
    Integer,
    /// A JSON boolean.
    Boolean,
    /// An ordered JSON array of strings.
    TextList,
    /// A JSON object mapping string keys to string values.
    TextMap,
    /// An ordered JSON array of embedded records of another entity.
    NestedList(&'static str),
}

impl FieldType {
    /// Human/tool-readable label used in schema descriptions.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Text => "text".to_owned(),
            Self::Real => "real".to_owned(),
            Self::Integer => "integer".to_owned(),
            Self::Boolean => "boolean".to_owned(),
            Self::TextList => "list[text]".to_owned(),
            Self::TextMap => "map[text,text]".to_owned(),
            Self::NestedList(entity) => format!("list[{entity}]"),
        }
    }
}

/// Declarative specification of one entity field.
///
/// Built with the named constructors plus chained modifiers:
///
/// ```
/// use vitrine_core::schema::FieldSpec;
///
/// let price = FieldSpec::real("price")
///     .required()
///     .minimum(0.0)
///     .hint("Price in dollars");
/// assert_eq!(price.name(), "price");
/// ```
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub(crate) name: &'static str,
    pub(crate) ty: FieldType,
    pub(crate) required: bool,
    pub(crate) non_empty: bool,
    pub(crate) minimum: Option<f64>,
    pub(crate) maximum: Option<f64>,
    pub(crate) default: Option<Value>,
    pub(crate) hint: &'static str,
}

impl FieldSpec {
    fn new(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
            non_empty: false,
            minimum: None,
            maximum: None,
            default: None,
            hint: "",
        }
    }

    /// A text field.
    #[must_use]
    pub fn text(name: &'static str) -> Self {
        Self::new(name, FieldType::Text)
    }

    /// A real-number field.
    #[must_use]
    pub fn real(name: &'static str) -> Self {
        Self::new(name, FieldType::Real)
    }

    /// An integer field.
    #[must_use]
    pub fn integer(name: &'static str) -> Self {
        Self::new(name, FieldType::Integer)
    }

    /// A boolean field.
    #[must_use]
    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    /// An ordered list of text values.
    #[must_use]
    pub fn text_list(name: &'static str) -> Self {
        Self::new(name, FieldType::TextList)
    }

    /// A map from text keys to text values.
    #[must_use]
    pub fn text_map(name: &'static str) -> Self {
        Self::new(name, FieldType::TextMap)
    }

    /// An ordered list of embedded records of the named entity.
    #[must_use]
    pub fn nested_list(name: &'static str, entity: &'static str) -> Self {
        Self::new(name, FieldType::NestedList(entity))
    }

    /// Mark the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Reject empty strings (text fields only).
    #[must_use]
    pub const fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    /// Inclusive lower bound for numeric fields.
    #[must_use]
    pub const fn minimum(mut self, min: f64) -> Self {
        self.minimum = Some(min);
        self
    }

    /// Inclusive upper bound for numeric fields.
    #[must_use]
    pub const fn maximum(mut self, max: f64) -> Self {
        self.maximum = Some(max);
        self
    }

    /// Default value filled in when the field is absent from the input.
    #[must_use]
    pub fn default_value(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Human-readable hint shown in the schema description.
    #[must_use]
    pub const fn hint(mut self, hint: &'static str) -> Self {
        self.hint = hint;
        self
    }

    /// Field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared field type.
    #[must_use]
    pub const fn ty(&self) -> FieldType {
        self.ty
    }

    /// Whether the field must be present in the input.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    fn describe(&self) -> FieldDescription {
        FieldDescription {
            name: self.name.to_owned(),
            ty: self.ty.label(),
            required: self.required,
            non_empty: self.non_empty,
            minimum: self.minimum,
            maximum: self.maximum,
            default: self.default.clone(),
            hint: self.hint.to_owned(),
        }
    }
}

/// The canonical shape of one entity: an ordered list of field specs.
#[derive(Debug, Clone)]
pub struct EntitySchema {
    pub(crate) name: &'static str,
    pub(crate) fields: Vec<FieldSpec>,
}

impl EntitySchema {
    /// Build a schema from an ordered field list.
    #[must_use]
    pub const fn new(name: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self { name, fields }
    }

    /// Entity name (`"product"`, `"variant"`, `"user"`).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The declared fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Render the machine-readable description served by `/schema`.
    ///
    /// Derived purely from the declared field constraints; no storage
    /// access, no side effects.
    #[must_use]
    pub fn describe(&self) -> SchemaDescription {
        SchemaDescription {
            entity: self.name.to_owned(),
            fields: self.fields.iter().map(FieldSpec::describe).collect(),
        }
    }
}

/// Machine-readable description of one entity schema.
///
/// Serialised as the value under `models.<entity>` in the `/schema`
/// response. Sufficient for an external tool to render a creation form or
/// validate a document without consulting source code.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDescription {
    /// Entity name.
    pub entity: String,
    /// Field descriptions, in declaration order.
    pub fields: Vec<FieldDescription>,
}

/// Description of a single field within a [`SchemaDescription`].
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescription {
    /// Field name.
    pub name: String,
    /// Type label, e.g. `"text"`, `"real"`, `"list[variant]"`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Whether the field must be present when creating a record.
    pub required: bool,
    /// Whether empty text is rejected.
    #[serde(skip_serializing_if = "core::ops::Not::not")]
    pub non_empty: bool,
    /// Inclusive lower bound, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive upper bound, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Default applied when the field is absent, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Human-readable hint.
    pub hint: String,
}
