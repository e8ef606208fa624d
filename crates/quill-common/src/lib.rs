//! quill-common: shared data model, collaborator interfaces, and session
//! state for the blog client.
//!
//! This crate owns:
//! - the wire-facing models (`Post`, `Category`, `Tag`, paging types)
//! - the transport collaborator traits (`BlogApi`, `AuthApi`)
//! - the authenticated `Session` lifecycle
//! - environment configuration and the transport error taxonomy

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

pub use client::{AuthApi, BlogApi, LocalAuthApi, LocalBlogApi};
pub use config::{Config, ConfigError};
pub use error::{Result, TransportError};
pub use models::{
    Author, Category, Page, Post, PostPayload, PostQuery, PostStatus, Tag,
};
pub use session::{AuthSession, Session};
