//! Recursive structural diff between a backend schema (truth) and a
//! frontend schema (expectation).

use super::mismatch::{FieldMismatch, MismatchKind};
use super::types::{SchemaKind, TypeSchema};

/// Type string recorded for a side that has no schema at a path.
const ABSENT: &str = "undefined";

/// Compare `backend` against `frontend` starting at `path`.
///
/// An incompatible node yields a single `type_mismatch` and its subtree is
/// not visited. `any` on either side absorbs its own node only.
pub fn compare(
    backend: Option<&TypeSchema>,
    frontend: Option<&TypeSchema>,
    path: &str,
) -> Vec<FieldMismatch> {
    let mut mismatches = Vec::new();
    compare_into(backend, frontend, path, &mut mismatches);
    mismatches
}

fn compare_into(
    backend: Option<&TypeSchema>,
    frontend: Option<&TypeSchema>,
    path: &str,
    out: &mut Vec<FieldMismatch>,
) {
    let (backend, frontend) = match (backend, frontend) {
        (None, None) => return,
        (None, Some(fe)) => {
            out.push(FieldMismatch::new(
                MismatchKind::MissingInBackend,
                path,
                format!("Frontend expects '{path}' but the backend does not provide it"),
                ABSENT,
                fe.type_name(),
            ));
            return;
        }
        (Some(be), None) => {
            out.push(FieldMismatch::new(
                MismatchKind::MissingInFrontend,
                path,
                format!("Backend provides '{path}' but the frontend does not use it"),
                be.type_name(),
                ABSENT,
            ));
            return;
        }
        (Some(be), Some(fe)) => (be, fe),
    };

    if backend.kind() == SchemaKind::Any || frontend.kind() == SchemaKind::Any {
        return;
    }

    if !backend.kind().is_compatible_with(frontend.kind()) {
        out.push(FieldMismatch::new(
            MismatchKind::TypeMismatch,
            path,
            format!(
                "Backend returns {} at '{path}' but the frontend expects {}",
                backend.kind(),
                frontend.kind()
            ),
            backend.type_name(),
            frontend.type_name(),
        ));
        return;
    }

    if backend.is_nullable() && !frontend.is_nullable() {
        out.push(FieldMismatch::new(
            MismatchKind::NullabilityMismatch,
            path,
            format!("Backend may return null at '{path}' but the frontend does not handle null"),
            backend.type_name(),
            frontend.type_name(),
        ));
    }

    match backend.kind() {
        SchemaKind::Object => compare_objects(backend, frontend, path, out),
        SchemaKind::Array => {
            let item_path = format!("{path}[]");
            compare_into(backend.items(), frontend.items(), &item_path, out);
        }
        _ => {}
    }
}

fn compare_objects(
    backend: &TypeSchema,
    frontend: &TypeSchema,
    path: &str,
    out: &mut Vec<FieldMismatch>,
) {
    for (name, be_prop) in backend.properties() {
        let field_path = format!("{path}.{name}");
        match frontend.property(name) {
            None => compare_into(Some(be_prop), None, &field_path, out),
            Some(fe_prop) => {
                if !backend.is_required(name) && frontend.is_required(name) {
                    out.push(FieldMismatch::new(
                        MismatchKind::OptionalityMismatch,
                        &field_path,
                        format!(
                            "'{field_path}' is optional in the backend but required by the frontend"
                        ),
                        be_prop.type_name(),
                        fe_prop.type_name(),
                    ));
                }
                compare_into(Some(be_prop), Some(fe_prop), &field_path, out);
            }
        }
    }

    for (name, fe_prop) in frontend.properties() {
        if backend.property(name).is_none() {
            let field_path = format!("{path}.{name}");
            compare_into(None, Some(fe_prop), &field_path, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_paths_are_dot_joined() {
        let be = TypeSchema::object_builder()
            .required(
                "user",
                TypeSchema::object_builder()
                    .required("email", TypeSchema::string())
                    .build(),
            )
            .build();
        let fe = TypeSchema::object_builder()
            .required(
                "user",
                TypeSchema::object_builder()
                    .required("email", TypeSchema::boolean())
                    .build(),
            )
            .build();

        let mismatches = compare(Some(&be), Some(&fe), "$");
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].field_path, "$.user.email");
        assert_eq!(mismatches[0].backend_type, "string");
        assert_eq!(mismatches[0].frontend_type, "boolean");
    }

    #[test]
    fn test_array_items_use_bracket_segment() {
        let be = TypeSchema::array(
            TypeSchema::object_builder()
                .required("id", TypeSchema::string())
                .build(),
        );
        let fe = TypeSchema::array(
            TypeSchema::object_builder()
                .required("id", TypeSchema::string())
                .required("slug", TypeSchema::string())
                .build(),
        );

        let mismatches = compare(Some(&be), Some(&fe), "$.items");
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].field_path, "$.items[].slug");
        assert_eq!(mismatches[0].kind, MismatchKind::MissingInBackend);
    }

    #[test]
    fn test_array_without_item_schema_on_one_side() {
        let be = TypeSchema::array(TypeSchema::string());
        let fe = TypeSchema::new(SchemaKind::Array);
        let mismatches = compare(Some(&be), Some(&fe), "$");
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].kind, MismatchKind::MissingInFrontend);
        assert_eq!(mismatches[0].field_path, "$[]");
    }
}
