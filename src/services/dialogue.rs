//! Form dialogue controller.
//!
//! A stateless decision tree over the submitted answers. Each callback
//! either gets the next question to render or a resolved instruction to
//! execute. The full conversation state is reconstructed from the
//! submitted `FormState` every time; nothing persists between calls.
//!
//! Explicit answers (`depth`, `b2path`) are authoritative over the
//! declared request type, so a conflicting `type` on a later callback
//! cannot reroute a conversation that has already chosen a direction.

use crate::models::{FormDescriptor, FormField, FormState, SelectOption};
use crate::{Error, Result};

/// Entry type for the combined export/import action.
pub const TYPE_IMPORT_EXPORT: &str = "import-export";
/// Entry type for a dedicated export action.
pub const TYPE_EXPORT: &str = "export";
/// Entry type for a dedicated import action.
pub const TYPE_IMPORT: &str = "import";

/// What the caller should do next.
#[derive(Debug)]
pub enum DialogueStep {
    /// Render this form and wait for the next callback.
    Question(FormDescriptor),
    /// Run an export at the submitted depth (`"asset"` or `"project"`).
    Export { depth: String },
    /// Run an import of this storage path.
    Import { b2path: String },
}

/// Decide the next step for a submission.
///
/// `bucket_name` is interpolated into the import question's description.
pub fn next_step(
    data: Option<&FormState>,
    request_type: &str,
    bucket_name: &str,
) -> Result<DialogueStep> {
    let empty = FormState::default();
    let data = data.unwrap_or(&empty);

    // Terminal states first: a submitted depth or path means the
    // conversation is complete regardless of the declared type.
    if let Some(depth) = &data.depth {
        return Ok(DialogueStep::Export {
            depth: depth.clone(),
        });
    }
    if let Some(b2path) = &data.b2path {
        return Ok(DialogueStep::Import {
            b2path: b2path.clone(),
        });
    }

    let fresh = data.is_empty();

    if fresh && request_type == TYPE_IMPORT_EXPORT {
        return Ok(DialogueStep::Question(copytype_question()));
    }

    if data.copytype.as_deref() == Some("export") || (fresh && request_type == TYPE_EXPORT) {
        return Ok(DialogueStep::Question(depth_question()));
    }

    if data.copytype.as_deref() == Some("import") || (fresh && request_type == TYPE_IMPORT) {
        return Ok(DialogueStep::Question(b2path_question(bucket_name)));
    }

    tracing::error!(
        request_type = %request_type,
        copytype = ?data.copytype,
        "Unexpected form submission"
    );
    Err(Error::Dialogue(format!(
        "unexpected submission for request type '{}'",
        request_type
    )))
}

fn copytype_question() -> FormDescriptor {
    FormDescriptor {
        title: "Import or Export?".to_string(),
        description: "Choose whether to export assets to B2 or import a file from B2."
            .to_string(),
        fields: vec![FormField::select(
            "Copy type",
            "copytype",
            vec![
                SelectOption::new("Export to B2", "export"),
                SelectOption::new("Import from B2", "import"),
            ],
        )],
    }
}

fn depth_question() -> FormDescriptor {
    FormDescriptor {
        title: "Export to B2".to_string(),
        description: "Export the selected asset(s) or the entire project?".to_string(),
        fields: vec![FormField::select(
            "Depth",
            "depth",
            vec![
                SelectOption::new("Specific asset(s)", "asset"),
                SelectOption::new("Entire project", "project"),
            ],
        )],
    }
}

fn b2path_question(bucket_name: &str) -> FormDescriptor {
    FormDescriptor {
        title: "Import from B2".to_string(),
        description: format!(
            "Path of the file to import from the '{}' bucket.",
            bucket_name
        ),
        fields: vec![FormField::text("B2 path", "b2path")],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(copytype: Option<&str>, depth: Option<&str>, b2path: Option<&str>) -> FormState {
        FormState {
            copytype: copytype.map(String::from),
            depth: depth.map(String::from),
            b2path: b2path.map(String::from),
        }
    }

    fn field_names(form: &FormDescriptor) -> Vec<&str> {
        form.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn fresh_generic_submission_asks_copytype() {
        let step = next_step(None, TYPE_IMPORT_EXPORT, "bucket").unwrap();
        match step {
            DialogueStep::Question(form) => assert_eq!(field_names(&form), ["copytype"]),
            other => panic!("expected question, got {:?}", other),
        }
    }

    #[test]
    fn export_answer_asks_depth() {
        let data = state(Some("export"), None, None);
        let step = next_step(Some(&data), TYPE_IMPORT_EXPORT, "bucket").unwrap();
        match step {
            DialogueStep::Question(form) => assert_eq!(field_names(&form), ["depth"]),
            other => panic!("expected question, got {:?}", other),
        }
    }

    #[test]
    fn depth_answer_proceeds_to_export() {
        let data = state(Some("export"), Some("asset"), None);
        let step = next_step(Some(&data), TYPE_IMPORT_EXPORT, "bucket").unwrap();
        match step {
            DialogueStep::Export { depth } => assert_eq!(depth, "asset"),
            other => panic!("expected export, got {:?}", other),
        }
    }

    #[test]
    fn fresh_export_type_skips_copytype() {
        let step = next_step(None, TYPE_EXPORT, "bucket").unwrap();
        match step {
            DialogueStep::Question(form) => assert_eq!(field_names(&form), ["depth"]),
            other => panic!("expected question, got {:?}", other),
        }
    }

    #[test]
    fn import_answer_asks_b2path_with_bucket_name() {
        let data = state(Some("import"), None, None);
        let step = next_step(Some(&data), TYPE_IMPORT_EXPORT, "prod-media").unwrap();
        match step {
            DialogueStep::Question(form) => {
                assert_eq!(field_names(&form), ["b2path"]);
                assert!(form.description.contains("prod-media"));
            }
            other => panic!("expected question, got {:?}", other),
        }
    }

    #[test]
    fn b2path_answer_proceeds_to_import() {
        let data = state(Some("import"), None, Some("exports/foo.mov"));
        let step = next_step(Some(&data), TYPE_IMPORT_EXPORT, "bucket").unwrap();
        match step {
            DialogueStep::Import { b2path } => assert_eq!(b2path, "exports/foo.mov"),
            other => panic!("expected import, got {:?}", other),
        }
    }

    #[test]
    fn explicit_answers_win_over_declared_type() {
        // A declared import type cannot reroute an export in progress.
        let data = state(Some("export"), Some("project"), None);
        let step = next_step(Some(&data), TYPE_IMPORT, "bucket").unwrap();
        assert!(matches!(step, DialogueStep::Export { .. }));
    }

    #[test]
    fn unexpected_submission_is_a_dialogue_error() {
        let data = state(Some("sideways"), None, None);
        let err = next_step(Some(&data), TYPE_IMPORT_EXPORT, "bucket").unwrap_err();
        assert!(matches!(err, Error::Dialogue(_)));
    }
}
