//! Language-agnostic structural type description.

use std::collections::{BTreeMap, BTreeSet};

use accord_core::errors::SchemaError;
use serde::{Deserialize, Serialize};

/// The kind of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
    Any,
    Unknown,
}

impl SchemaKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Any => "any",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Integer)
    }

    /// Equal kinds are compatible, and `number`/`integer` widen into each other.
    /// `any` is handled by the comparison itself, not here.
    pub fn is_compatible_with(&self, other: SchemaKind) -> bool {
        *self == other || (self.is_numeric() && other.is_numeric())
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A recursive type schema.
///
/// Trees are treated as immutable once built: fields are private, the
/// object constructor enforces `required ⊆ properties`, and every
/// deserialized node is checked the same way. `Clone` produces a fully
/// independent deep copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTypeSchema")]
pub struct TypeSchema {
    kind: SchemaKind,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, TypeSchema>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    required: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<TypeSchema>>,
    nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

/// Wire form of a schema node before its invariants are checked.
///
/// Children are `TypeSchema`, so each one has already passed its own check
/// by the time its parent is converted.
#[derive(Deserialize)]
struct RawTypeSchema {
    kind: SchemaKind,
    #[serde(default)]
    properties: BTreeMap<String, TypeSchema>,
    #[serde(default)]
    required: BTreeSet<String>,
    #[serde(default)]
    items: Option<Box<TypeSchema>>,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    format: Option<String>,
}

impl TryFrom<RawTypeSchema> for TypeSchema {
    type Error = SchemaError;

    fn try_from(raw: RawTypeSchema) -> Result<Self, Self::Error> {
        let schema = Self {
            kind: raw.kind,
            properties: raw.properties,
            required: raw.required,
            items: raw.items,
            nullable: raw.nullable,
            format: raw.format,
        };
        schema.check_node()?;
        Ok(schema)
    }
}

impl TypeSchema {
    /// A bare node of the given kind: an object has no properties, an array
    /// has no item schema.
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            properties: BTreeMap::new(),
            required: BTreeSet::new(),
            items: None,
            nullable: false,
            format: None,
        }
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    pub fn number() -> Self {
        Self::new(SchemaKind::Number)
    }

    pub fn integer() -> Self {
        Self::new(SchemaKind::Integer)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn null() -> Self {
        Self::new(SchemaKind::Null)
    }

    pub fn any() -> Self {
        Self::new(SchemaKind::Any)
    }

    pub fn unknown() -> Self {
        Self::new(SchemaKind::Unknown)
    }

    pub fn array(items: TypeSchema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::new(SchemaKind::Array)
        }
    }

    /// Build an object schema.
    ///
    /// Fails with `SchemaError::UnknownRequiredProperty` if a required name
    /// has no corresponding property.
    pub fn object<P, K, R, S>(properties: P, required: R) -> Result<Self, SchemaError>
    where
        P: IntoIterator<Item = (K, TypeSchema)>,
        K: Into<String>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let properties: BTreeMap<String, TypeSchema> = properties
            .into_iter()
            .map(|(name, schema)| (name.into(), schema))
            .collect();
        let required: BTreeSet<String> = required.into_iter().map(Into::into).collect();

        if let Some(missing) = required.iter().find(|name| !properties.contains_key(*name)) {
            return Err(SchemaError::UnknownRequiredProperty {
                property: missing.clone(),
            });
        }

        Ok(Self {
            properties,
            required,
            ..Self::new(SchemaKind::Object)
        })
    }

    /// Start an object schema whose required set is consistent by construction.
    pub fn object_builder() -> ObjectBuilder {
        ObjectBuilder::default()
    }

    /// Parse a schema from JSON. Invariant violations anywhere in the tree
    /// surface as `SchemaError::Json` carrying the violation message.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| SchemaError::Json {
            message: e.to_string(),
        })
    }

    pub fn into_nullable(self) -> Self {
        self.with_nullable(true)
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn properties(&self) -> &BTreeMap<String, TypeSchema> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&TypeSchema> {
        self.properties.get(name)
    }

    pub fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    pub fn items(&self) -> Option<&TypeSchema> {
        self.items.as_deref()
    }

    /// Human-readable type string, e.g. `array<string>` or `string | null`.
    pub fn type_name(&self) -> String {
        let base = match (self.kind, self.items()) {
            (SchemaKind::Array, Some(items)) => format!("array<{}>", items.type_name()),
            (kind, _) => kind.name().to_string(),
        };
        if self.nullable && self.kind != SchemaKind::Null {
            format!("{base} | null")
        } else {
            base
        }
    }

    /// Check structural invariants over the whole tree.
    ///
    /// Constructed and deserialized schemas always pass.
    pub fn validate(&self) -> Result<(), SchemaError> {
        self.check_node()?;
        for child in self.properties.values() {
            child.validate()?;
        }
        if let Some(items) = self.items() {
            items.validate()?;
        }
        Ok(())
    }

    /// Invariants of this node alone.
    fn check_node(&self) -> Result<(), SchemaError> {
        if self.kind != SchemaKind::Object
            && (!self.properties.is_empty() || !self.required.is_empty())
        {
            return Err(SchemaError::PropertiesOnNonObject {
                kind: self.kind.name().to_string(),
            });
        }
        if self.kind != SchemaKind::Array && self.items.is_some() {
            return Err(SchemaError::ItemsOnNonArray {
                kind: self.kind.name().to_string(),
            });
        }
        if let Some(missing) = self
            .required
            .iter()
            .find(|name| !self.properties.contains_key(*name))
        {
            return Err(SchemaError::UnknownRequiredProperty {
                property: missing.clone(),
            });
        }
        Ok(())
    }
}

/// Incremental object schema construction.
#[derive(Debug, Default)]
pub struct ObjectBuilder {
    properties: BTreeMap<String, TypeSchema>,
    required: BTreeSet<String>,
}

impl ObjectBuilder {
    /// Add a property that must be present.
    pub fn required(mut self, name: impl Into<String>, schema: TypeSchema) -> Self {
        let name = name.into();
        self.required.insert(name.clone());
        self.properties.insert(name, schema);
        self
    }

    /// Add a property that may be absent.
    pub fn optional(mut self, name: impl Into<String>, schema: TypeSchema) -> Self {
        let name = name.into();
        self.required.remove(&name);
        self.properties.insert(name, schema);
        self
    }

    pub fn build(self) -> TypeSchema {
        TypeSchema {
            properties: self.properties,
            required: self.required,
            ..TypeSchema::new(SchemaKind::Object)
        }
    }
}
