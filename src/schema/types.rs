//! Schema types

use mongodb::bson::Document;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Run-time shape of a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Null,
    Array,
    Date,
    Object,
    String,
    Number,
    Boolean,
    Undefined,
}

impl TypeTag {
    /// Lowercase tag name
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Array => "array",
            TypeTag::Date => "date",
            TypeTag::Object => "object",
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Undefined => "undefined",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(TypeTag::Null),
            "array" => Ok(TypeTag::Array),
            "date" => Ok(TypeTag::Date),
            "object" => Ok(TypeTag::Object),
            "string" => Ok(TypeTag::String),
            "number" => Ok(TypeTag::Number),
            "boolean" => Ok(TypeTag::Boolean),
            "undefined" => Ok(TypeTag::Undefined),
            other => Err(format!("unknown type tag '{other}'")),
        }
    }
}

/// Observed type(s) of a field
///
/// A single record always yields `Single`. Merging a sample that disagrees
/// about a path yields `Union`, which keeps every tag in first-seen order.
/// Serialized as text: `"string"` or `"number|string"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Single(TypeTag),
    Union(Vec<TypeTag>),
}

impl FieldType {
    /// Build from an ordered, deduplicated tag list
    ///
    /// Returns `None` for an empty list.
    pub fn from_tags(tags: &[TypeTag]) -> Option<Self> {
        match tags {
            [] => None,
            [tag] => Some(FieldType::Single(*tag)),
            _ => Some(FieldType::Union(tags.to_vec())),
        }
    }

    /// All tags, in first-seen order
    pub fn tags(&self) -> &[TypeTag] {
        match self {
            FieldType::Single(tag) => std::slice::from_ref(tag),
            FieldType::Union(tags) => tags,
        }
    }

    /// Check whether more than one tag was observed
    pub fn is_union(&self) -> bool {
        matches!(self, FieldType::Union(_))
    }
}

impl From<TypeTag> for FieldType {
    fn from(tag: TypeTag) -> Self {
        FieldType::Single(tag)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.tags().iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(tag.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tags: Vec<TypeTag> = Vec::new();
        for part in s.split('|') {
            let tag = part.trim().parse::<TypeTag>()?;
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        FieldType::from_tags(&tags).ok_or_else(|| "empty field type".to_string())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Structural description of one field path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Dotted path from the record root (`items[].sku` for array elements)
    pub path: String,

    /// Observed type(s)
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Present (by root key) in every sampled record
    pub required: bool,

    /// Nested fields of an object, or of the first element of an array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FieldDescriptor>>,
}

impl FieldDescriptor {
    /// Create a descriptor with no children
    pub fn new(path: impl Into<String>, field_type: impl Into<FieldType>, required: bool) -> Self {
        Self {
            path: path.into(),
            field_type: field_type.into(),
            required,
            children: None,
        }
    }

    /// Attach children
    #[must_use]
    pub fn with_children(mut self, children: Vec<FieldDescriptor>) -> Self {
        self.children = Some(children);
        self
    }

    /// Children, or an empty slice
    pub fn children(&self) -> &[FieldDescriptor] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Nesting depth of the path (0 for top-level fields)
    pub fn depth(&self) -> usize {
        self.path.matches('.').count()
    }

}

/// Root segment of a field path: everything before the first `.`
///
/// `address.city` → `address`, `items[].sku` → `items[]`.
pub(crate) fn root_key(path: &str) -> &str {
    path.split('.').next().unwrap_or(path)
}

/// Inferred schema of one collection
///
/// A snapshot: built fresh per call and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    /// Collection name
    pub name: String,

    /// Field descriptors in first-seen order
    pub fields: Vec<FieldDescriptor>,

    /// Size of the whole population, not of the sample
    pub total_count: u64,

    /// Number of records actually sampled
    pub sampled: usize,

    /// Index definitions, passed through from the source
    #[serde(default)]
    pub indexes: Vec<Document>,
}

impl CollectionSchema {
    /// Look up a field by path
    pub fn field(&self, path: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.path == path)
    }

    /// Paths of required fields, in schema order
    pub fn required_paths(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.path.as_str())
            .collect()
    }

    /// Check whether nothing was sampled
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
