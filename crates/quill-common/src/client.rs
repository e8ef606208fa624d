//! Transport collaborator interfaces.
//!
//! Signatures only: storage semantics, name uniqueness, retries, and
//! timeouts are owned by the implementor. These calls are the only
//! suspension points in the core.

use crate::error::Result;
use crate::models::{Category, Page, Post, PostPayload, PostQuery, Tag};
use crate::session::AuthSession;

/// Post, category, and tag operations against the backing store.
#[trait_variant::make(BlogApi: Send)]
pub trait LocalBlogApi {
    async fn list_posts(&self, query: &PostQuery) -> Result<Page<Post>>;
    async fn get_post(&self, id: &str) -> Result<Post>;
    async fn create_post(&self, payload: &PostPayload) -> Result<Post>;
    async fn update_post(&self, id: &str, payload: &PostPayload) -> Result<Post>;
    async fn delete_post(&self, id: &str) -> Result<()>;

    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn create_category(&self, name: &str) -> Result<Category>;
    async fn delete_category(&self, id: &str) -> Result<()>;

    async fn list_tags(&self) -> Result<Vec<Tag>>;
    async fn create_tags(&self, names: &[String]) -> Result<Vec<Tag>>;
    async fn delete_tag(&self, id: &str) -> Result<()>;
}

/// Credential exchange. `login` fails with
/// [`TransportError::BadCredentials`](crate::TransportError::BadCredentials)
/// on a rejected email/password pair.
#[trait_variant::make(AuthApi: Send)]
pub trait LocalAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession>;
    async fn logout(&self) -> Result<()>;
}
