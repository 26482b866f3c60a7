//! Human-readable schema report

use crate::schema::CollectionSchema;
use std::fmt::Write as _;

/// Render a schema as an aligned text report
///
/// One line per field, indented by nesting depth, followed by the indexes.
pub fn render_report(schema: &CollectionSchema) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}: {} of {} documents sampled",
        schema.name, schema.sampled, schema.total_count
    );

    if schema.fields.is_empty() {
        out.push_str("  (no fields)\n");
    } else {
        let rows: Vec<(String, String, &str)> = schema
            .fields
            .iter()
            .map(|f| {
                let label = format!("{}{}", "  ".repeat(f.depth()), f.path);
                let required = if f.required { "required" } else { "optional" };
                (label, f.field_type.to_string(), required)
            })
            .collect();

        let path_width = rows.iter().map(|(p, _, _)| p.len()).max().unwrap_or(0);
        let type_width = rows.iter().map(|(_, t, _)| t.len()).max().unwrap_or(0);

        for (path, field_type, required) in rows {
            let _ = writeln!(out, "  {path:<path_width$}  {field_type:<type_width$}  {required}");
        }
    }

    if !schema.indexes.is_empty() {
        out.push_str("indexes:\n");
        for index in &schema.indexes {
            let name = index
                .get_str("name")
                .map(str::to_string)
                .unwrap_or_else(|_| "(unnamed)".to_string());
            match index.get_document("key") {
                Ok(key) => {
                    let _ = writeln!(out, "  {name} {key}");
                }
                Err(_) => {
                    let _ = writeln!(out, "  {name}");
                }
            }
        }
    }

    out
}
