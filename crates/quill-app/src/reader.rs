//! Single-post reader.
//!
//! Load-one state machine plus the safe render path. Rendering always
//! routes through the sanitizer choke-point regardless of where the
//! content came from.

use quill_common::{BlogApi, Post, Session, TransportError};
use quill_renderer::{SafeFragment, plain_excerpt, render_content};

use crate::Confirmation;

/// Reader page state.
#[derive(Debug, Default)]
pub enum ReaderState {
    #[default]
    Loading,
    Loaded(Post),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct Reader {
    state: ReaderState,
}

impl Reader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch one post. Transport failures surface as a user-visible
    /// message and the operation is abandoned; call again to retry.
    pub async fn load<C: BlogApi>(&mut self, client: &C, id: &str) {
        self.state = ReaderState::Loading;
        self.state = match client.get_post(id).await {
            Ok(post) => ReaderState::Loaded(post),
            Err(err) => {
                tracing::warn!(%err, id, "failed to load post");
                ReaderState::Failed(err.to_string())
            }
        };
    }

    pub fn post(&self) -> Option<&Post> {
        match &self.state {
            ReaderState::Loaded(post) => Some(post),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ReaderState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ReaderState::Loading)
    }

    /// Safe render tree for the loaded post's content.
    pub fn content(&self) -> Option<SafeFragment> {
        self.post().map(|post| render_content(&post.content))
    }

    /// Title plus a short plain-text snippet, for the share action.
    pub fn share_text(&self) -> Option<String> {
        self.post()
            .map(|post| format!("{}\n{}", post.title, plain_excerpt(&post.content, 100)))
    }
}

/// Delete a post. Destructive: requires the explicit [`Confirmation`]
/// token and an authenticated session.
pub async fn delete_post<C: BlogApi>(
    client: &C,
    session: &Session,
    id: &str,
    _confirmed: Confirmation,
) -> Result<(), TransportError> {
    if !session.is_authenticated() {
        return Err(TransportError::Unauthenticated);
    }
    client.delete_post(id).await?;
    tracing::debug!(id, "post deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockApi, authed_session, sample_post};
    use quill_common::Session;

    #[tokio::test]
    async fn test_load_and_render_sanitizes_stored_content() {
        let api = MockApi::new();
        let stored = sample_post(
            "p1",
            r#"<p>fine</p><img src="x" onerror="alert(1)"><script>boom()</script>"#,
        );
        api.posts.lock().unwrap().push(stored);

        let mut reader = Reader::new();
        reader.load(&api, "p1").await;

        let fragment = reader.content().unwrap();
        let tags: Vec<_> = fragment
            .nodes
            .iter()
            .filter_map(|node| node.tag())
            .collect();
        assert_eq!(tags, vec!["p"]);
        assert!(!fragment.text().contains("boom"));
    }

    #[tokio::test]
    async fn test_missing_post_surfaces_error() {
        let api = MockApi::new();
        let mut reader = Reader::new();
        reader.load(&api, "nope").await;
        assert!(reader.post().is_none());
        assert!(reader.error().unwrap().contains("nope"));
    }

    #[tokio::test]
    async fn test_share_text_uses_plain_snippet() {
        let api = MockApi::new();
        api.posts
            .lock()
            .unwrap()
            .push(sample_post("p1", "<p><strong>Rich</strong> body</p>"));

        let mut reader = Reader::new();
        reader.load(&api, "p1").await;
        assert_eq!(reader.share_text().unwrap(), "post p1\nRich body");
    }

    #[tokio::test]
    async fn test_delete_requires_authentication() {
        let api = MockApi::new();
        api.posts.lock().unwrap().push(sample_post("p1", "<p>x</p>"));

        let err = delete_post(&api, &Session::new(), "p1", Confirmation::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Unauthenticated));
        assert!(api.calls().is_empty());

        delete_post(&api, &authed_session(), "p1", Confirmation::Confirmed)
            .await
            .unwrap();
        assert!(api.posts.lock().unwrap().is_empty());
    }
}
