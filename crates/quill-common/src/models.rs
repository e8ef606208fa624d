//! Wire-facing data model.
//!
//! These types mirror what the external storage collaborator exchanges.
//! The core reads and writes `title`/`content`/`category_id`/`tag_ids`/
//! `status`; everything else is owned elsewhere and passed through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Publication state of a post.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostStatus {
    #[default]
    #[serde(rename = "DRAFT")]
    Draft,
    #[serde(rename = "PUBLISHED")]
    Published,
}

/// Post author, as exposed by the transport collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: SmolStr,
    pub name: String,
}

/// A blog post as stored by the external collaborator.
///
/// `content` is an HTML fragment. It is treated as untrusted on every
/// read path regardless of origin; see `quill-renderer`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: SmolStr,
    pub title: String,
    pub content: String,
    pub category_id: Option<SmolStr>,
    #[serde(default)]
    pub tag_ids: Vec<SmolStr>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
}

/// Category identity is by `id`; `name` uniqueness, if any, is enforced
/// by the collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: SmolStr,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_count: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: SmolStr,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_count: Option<u64>,
}

/// One page of a listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// An empty first page.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            total_pages: 0,
            total_elements: 0,
        }
    }
}

/// Query parameters for a post listing fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<SmolStr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<SmolStr>,
    pub page: usize,
    pub size: usize,
}

/// The assembled submission payload for create/update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    pub title: String,
    pub content: String,
    pub category_id: SmolStr,
    pub tag_ids: Vec<SmolStr>,
    pub status: PostStatus,
}
