//! Post composition form.
//!
//! Orchestrates title, category, tag selection, status, and the editing
//! surface; validates and assembles the submission payload; drives the
//! two-phase markdown import. Validation failures are field-keyed and
//! block submission - no partial submission is ever sent.

use quill_common::{BlogApi, Post, PostPayload, PostStatus, Session, TransportError};
use quill_editor_core::{
    ConversionError, Editor, EMPTY_DOCUMENT_HTML, RichDocument, document_from_html,
    import_markdown,
};
use smol_str::SmolStr;

use crate::error::{Field, SubmitError, ValidationErrors};

const TITLE_REQUIRED: &str = "Title is required";
const CONTENT_REQUIRED: &str = "Content is required";
const CATEGORY_REQUIRED: &str = "Category is required";

/// Composition form state for creating or editing one post.
///
/// The live document plus its history is owned exclusively by this form
/// instance; discarding the form discards unsaved edits without side
/// effects.
pub struct PostForm {
    title: String,
    category_id: Option<SmolStr>,
    tag_ids: Vec<SmolStr>,
    status: PostStatus,
    editor: Editor,
    errors: ValidationErrors,
    post_id: Option<SmolStr>,
}

impl Default for PostForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PostForm {
    /// A blank form for a new post. Status defaults to draft.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            category_id: None,
            tag_ids: Vec::new(),
            status: PostStatus::Draft,
            editor: Editor::new(),
            errors: ValidationErrors::default(),
            post_id: None,
        }
    }

    /// A form seeded from an existing post for editing. The stored
    /// content is sanitized on ingestion.
    pub fn edit(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            category_id: post.category_id.clone(),
            tag_ids: post.tag_ids.clone(),
            status: post.status,
            editor: Editor::with_document(document_from_html(&post.content)),
            errors: ValidationErrors::default(),
            post_id: Some(post.id.clone()),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn category_id(&self) -> Option<&SmolStr> {
        self.category_id.as_ref()
    }

    pub fn set_category(&mut self, id: Option<SmolStr>) {
        self.category_id = id;
    }

    pub fn status(&self) -> PostStatus {
        self.status
    }

    pub fn set_status(&mut self, status: PostStatus) {
        self.status = status;
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    // === Tag selection ===

    /// Selected tag ids, in selection order.
    pub fn selected_tags(&self) -> &[SmolStr] {
        &self.tag_ids
    }

    pub fn is_tag_selected(&self, id: &str) -> bool {
        self.tag_ids.iter().any(|t| t == id)
    }

    /// Toggle a tag: selecting an already-selected tag removes it.
    /// Identity is by id, not name.
    pub fn toggle_tag(&mut self, id: &str) {
        if let Some(index) = self.tag_ids.iter().position(|t| t == id) {
            self.tag_ids.remove(index);
        } else {
            self.tag_ids.push(SmolStr::new(id));
        }
    }

    // === Validation & submission ===

    /// Validate the form, refreshing the field-keyed error set.
    pub fn validate(&mut self) -> bool {
        let mut errors = ValidationErrors::default();
        if self.title.trim().is_empty() {
            errors.insert(Field::Title, TITLE_REQUIRED);
        }
        if self.editor.serialize() == EMPTY_DOCUMENT_HTML {
            errors.insert(Field::Content, CONTENT_REQUIRED);
        }
        if self.category_id.is_none() {
            errors.insert(Field::Category, CATEGORY_REQUIRED);
        }
        let ok = errors.is_empty();
        self.errors = errors;
        ok
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    fn validated_payload(&mut self) -> Result<PostPayload, ValidationErrors> {
        if !self.validate() {
            return Err(self.errors.clone());
        }
        let Some(category_id) = self.category_id.clone() else {
            // validate() guarantees a category; keep the error path total.
            return Err(self.errors.clone());
        };
        Ok(PostPayload {
            title: self.title.trim().to_string(),
            content: self.editor.serialize(),
            category_id,
            tag_ids: self.tag_ids.clone(),
            status: self.status,
        })
    }

    /// Validate, assemble the payload, and hand it to the transport
    /// collaborator - create for a new post, update when editing.
    ///
    /// Validation failures never reach the transport. Requires an
    /// authenticated session capability.
    pub async fn submit<C: BlogApi>(
        &mut self,
        client: &C,
        session: &Session,
    ) -> Result<Post, SubmitError> {
        let payload = self.validated_payload().map_err(SubmitError::Validation)?;
        if !session.is_authenticated() {
            return Err(TransportError::Unauthenticated.into());
        }
        let saved = match &self.post_id {
            Some(id) => client.update_post(id, &payload).await?,
            None => client.create_post(&payload).await?,
        };
        tracing::debug!(id = %saved.id, status = ?saved.status, "post saved");
        Ok(saved)
    }

    // === Markdown import (two-phase) ===

    /// Phase one: pure conversion. On failure the live document is
    /// untouched; the input can be edited and the conversion retried.
    pub fn convert_markdown(&self, source: &str) -> Result<RichDocument, ConversionError> {
        import_markdown(source)
    }

    /// Phase two: explicit destructive replacement of the live document,
    /// performed only after conversion succeeded (and after the user
    /// confirmed the replacement). Recorded in history, so undo can
    /// still restore the prior document.
    pub fn replace_content(&mut self, document: RichDocument) {
        self.editor.load_document(document);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockApi, authed_session};
    use quill_editor_core::{EditorCommand, Mark, Position, Selection};

    fn filled_form() -> PostForm {
        let mut form = PostForm::new();
        form.set_title("  My Post  ");
        form.set_category(Some("c1".into()));
        form.editor_mut().insert_text("Hello world");
        form
    }

    #[tokio::test]
    async fn test_empty_title_blocks_submission_without_transport() {
        let api = MockApi::new();
        let mut form = PostForm::new();
        form.set_category(Some("c1".into()));
        form.editor_mut().insert_text("content");

        let err = form.submit(&api, &authed_session()).await.unwrap_err();
        let SubmitError::Validation(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.get(Field::Title), Some("Title is required"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_document_blocks_submission() {
        let api = MockApi::new();
        let mut form = PostForm::new();
        form.set_title("Title");
        form.set_category(Some("c1".into()));

        let err = form.submit(&api, &authed_session()).await.unwrap_err();
        let SubmitError::Validation(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.get(Field::Content), Some("Content is required"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_valid_draft_submits_trimmed_payload_with_one_tag() {
        let api = MockApi::new();
        let mut form = filled_form();
        form.toggle_tag("t1");

        let saved = form.submit(&api, &authed_session()).await.unwrap();
        assert_eq!(saved.title, "My Post");
        assert_eq!(saved.status, quill_common::PostStatus::Draft);
        assert_eq!(saved.tag_ids, vec![smol_str::SmolStr::new("t1")]);
        assert_eq!(saved.content, "<p>Hello world</p>");
    }

    #[tokio::test]
    async fn test_unauthenticated_submit_never_reaches_transport() {
        let api = MockApi::new();
        let mut form = filled_form();

        let err = form.submit(&api, &Session::new()).await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Transport(TransportError::Unauthenticated)
        ));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_editing_existing_post_updates() {
        let api = MockApi::new();
        let mut form = filled_form();
        let saved = form.submit(&api, &authed_session()).await.unwrap();

        let mut edit = PostForm::edit(&saved);
        assert_eq!(edit.title(), "My Post");
        assert_eq!(edit.status(), saved.status);
        edit.set_title("Renamed");
        let updated = edit.submit(&api, &authed_session()).await.unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.title, "Renamed");
    }

    #[test]
    fn test_tag_toggle_is_a_set_by_id() {
        let mut form = PostForm::new();
        form.toggle_tag("t1");
        form.toggle_tag("t2");
        form.toggle_tag("t1");
        assert_eq!(form.selected_tags(), &[smol_str::SmolStr::new("t2")]);
        assert!(form.is_tag_selected("t2"));
        assert!(!form.is_tag_selected("t1"));
    }

    #[test]
    fn test_failed_markdown_import_leaves_document_untouched() {
        let mut form = filled_form();
        let before = form.editor().serialize();

        assert!(form.convert_markdown("bad <b>html</b> inside").is_err());
        assert_eq!(form.editor().serialize(), before);
    }

    #[test]
    fn test_markdown_import_replaces_and_is_undoable() {
        let mut form = filled_form();
        let before = form.editor().serialize();

        let doc = form.convert_markdown("# Imported\n\nBody").unwrap();
        form.replace_content(doc);
        assert_eq!(form.editor().serialize(), "<h1>Imported</h1><p>Body</p>");

        assert!(form.editor_mut().undo());
        assert_eq!(form.editor().serialize(), before);
    }

    #[test]
    fn test_status_defaults_to_draft_for_new_posts() {
        assert_eq!(PostForm::new().status(), quill_common::PostStatus::Draft);
    }

    #[tokio::test]
    async fn test_formatting_commands_flow_into_payload() {
        let api = MockApi::new();
        let mut form = PostForm::new();
        form.set_title("T");
        form.set_category(Some("c1".into()));
        form.editor_mut().insert_text("bold me");
        form.editor_mut().set_selection(Selection::new(
            Position::new(0, 0),
            Position::new(0, 4),
        ));
        assert!(form.editor_mut().execute(&EditorCommand::ToggleBold));
        assert!(form.editor_mut().is_mark_active(Mark::Bold));

        let saved = form.submit(&api, &authed_session()).await.unwrap();
        assert_eq!(saved.content, "<p><strong>bold</strong> me</p>");
    }
}
