//! Category and tag directory management.
//!
//! List/create/delete state machines for the taxonomy pages. Creation
//! trims the entered name and rejects empties locally without a
//! transport call; deletion is gated on the explicit [`Confirmation`]
//! token. After a successful mutation the listing is re-fetched.

use quill_common::{BlogApi, Category, Session, Tag, TransportError};

use crate::Confirmation;

#[derive(Debug, Default)]
pub struct CategoryDirectory {
    categories: Vec<Category>,
    error: Option<String>,
}

impl CategoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn load<C: BlogApi>(&mut self, client: &C) {
        match client.list_categories().await {
            Ok(categories) => {
                self.categories = categories;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(%err, "failed to load categories");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Create a category from user input. An empty name (after trimming)
    /// is a local no-op; no transport call is made.
    pub async fn create<C: BlogApi>(
        &mut self,
        client: &C,
        session: &Session,
        name: &str,
    ) -> Result<(), TransportError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }
        if !session.is_authenticated() {
            return Err(TransportError::Unauthenticated);
        }
        client.create_category(name).await?;
        self.load(client).await;
        Ok(())
    }

    /// Delete a category. Destructive: requires explicit confirmation.
    pub async fn delete<C: BlogApi>(
        &mut self,
        client: &C,
        session: &Session,
        id: &str,
        _confirmed: Confirmation,
    ) -> Result<(), TransportError> {
        if !session.is_authenticated() {
            return Err(TransportError::Unauthenticated);
        }
        client.delete_category(id).await?;
        self.load(client).await;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct TagDirectory {
    tags: Vec<Tag>,
    error: Option<String>,
}

impl TagDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn load<C: BlogApi>(&mut self, client: &C) {
        match client.list_tags().await {
            Ok(tags) => {
                self.tags = tags;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(%err, "failed to load tags");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Create a tag from user input via the batch collaborator call. An
    /// empty name (after trimming) is a local no-op.
    pub async fn create<C: BlogApi>(
        &mut self,
        client: &C,
        session: &Session,
        name: &str,
    ) -> Result<(), TransportError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }
        if !session.is_authenticated() {
            return Err(TransportError::Unauthenticated);
        }
        client.create_tags(&[name.to_string()]).await?;
        self.load(client).await;
        Ok(())
    }

    /// Delete a tag. Destructive: requires explicit confirmation.
    pub async fn delete<C: BlogApi>(
        &mut self,
        client: &C,
        session: &Session,
        id: &str,
        _confirmed: Confirmation,
    ) -> Result<(), TransportError> {
        if !session.is_authenticated() {
            return Err(TransportError::Unauthenticated);
        }
        client.delete_tag(id).await?;
        self.load(client).await;
        Ok(())
    }
}
