//! Value type classification

use super::types::TypeTag;
use mongodb::bson::Bson;

/// Classify a single value
///
/// Total over every BSON kind. Driver object kinds with no keys of their own
/// (`ObjectId`, `Binary`, regular expressions, code, min/max keys) count as
/// `object`; timestamps count as `date`.
pub fn classify(value: &Bson) -> TypeTag {
    match value {
        Bson::Null => TypeTag::Null,
        Bson::Array(_) => TypeTag::Array,
        Bson::DateTime(_) | Bson::Timestamp(_) => TypeTag::Date,
        Bson::Document(_)
        | Bson::ObjectId(_)
        | Bson::Binary(_)
        | Bson::RegularExpression(_)
        | Bson::JavaScriptCode(_)
        | Bson::JavaScriptCodeWithScope(_)
        | Bson::DbPointer(_)
        | Bson::MinKey
        | Bson::MaxKey => TypeTag::Object,
        Bson::String(_) | Bson::Symbol(_) => TypeTag::String,
        Bson::Double(_) | Bson::Int32(_) | Bson::Int64(_) | Bson::Decimal128(_) => {
            TypeTag::Number
        }
        Bson::Boolean(_) => TypeTag::Boolean,
        Bson::Undefined => TypeTag::Undefined,
    }
}

/// Classify an optional value, treating an absent one as `undefined`
pub fn classify_opt(value: Option<&Bson>) -> TypeTag {
    value.map_or(TypeTag::Undefined, classify)
}
