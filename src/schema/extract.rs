//! Per-record shape extraction

use super::classify::classify;
use super::types::{FieldDescriptor, TypeTag};
use mongodb::bson::{Bson, Document};

/// Extract the field descriptors of one record
///
/// A record that is not a document has no fields.
pub fn extract_shape(record: &Bson, parent_path: &str) -> Vec<FieldDescriptor> {
    match record {
        Bson::Document(doc) => extract_document(doc, parent_path),
        _ => Vec::new(),
    }
}

/// Extract the field descriptors of one document, in key order
///
/// Objects recurse under `path`; arrays recurse into their first element
/// under `path[]` when that element is a document.
pub fn extract_document(doc: &Document, parent_path: &str) -> Vec<FieldDescriptor> {
    let mut fields = Vec::with_capacity(doc.len());

    for (key, value) in doc {
        let path = if parent_path.is_empty() {
            key.clone()
        } else {
            format!("{parent_path}.{key}")
        };
        let tag = classify(value);
        let mut field = FieldDescriptor::new(path, tag, true);

        match (tag, value) {
            (TypeTag::Object, Bson::Document(nested)) => {
                field.children = Some(extract_document(nested, &field.path));
            }
            (TypeTag::Array, Bson::Array(items)) => {
                if let Some(Bson::Document(first)) = items.first() {
                    let element_path = format!("{}[]", field.path);
                    field.children = Some(extract_document(first, &element_path));
                }
            }
            _ => {}
        }

        fields.push(field);
    }

    fields
}

/// Depth-first pre-order walk: each descriptor, then its children
pub fn flatten(fields: &[FieldDescriptor]) -> Vec<&FieldDescriptor> {
    let mut out = Vec::new();
    push_flat(fields, &mut out);
    out
}

fn push_flat<'a>(fields: &'a [FieldDescriptor], out: &mut Vec<&'a FieldDescriptor>) {
    for field in fields {
        out.push(field);
        push_flat(field.children(), out);
    }
}
