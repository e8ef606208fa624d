//! In-memory transport double used by the tests.
//!
//! Records every call so tests can assert that validation failures issue
//! zero transport calls, and stores just enough state to round-trip
//! create -> fetch -> render flows.

use std::sync::Mutex;

use chrono::Utc;
use quill_common::{
    AuthApi, AuthSession, Author, BlogApi, Category, Page, Post, PostPayload, PostQuery, Result,
    Session, Tag, TransportError,
};
use smol_str::SmolStr;

/// A recorded transport call.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    ListPosts(PostQuery),
    GetPost(SmolStr),
    CreatePost,
    UpdatePost(SmolStr),
    DeletePost(SmolStr),
    ListCategories,
    CreateCategory(String),
    DeleteCategory(SmolStr),
    ListTags,
    CreateTags(Vec<String>),
    DeleteTag(SmolStr),
    Login(String),
    Logout,
}

#[derive(Default)]
pub struct MockApi {
    pub calls: Mutex<Vec<Call>>,
    pub posts: Mutex<Vec<Post>>,
    pub categories: Mutex<Vec<Category>>,
    pub tags: Mutex<Vec<Tag>>,
    pub fail_login: bool,
    pub next_id: Mutex<u64>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn fresh_id(&self, prefix: &str) -> SmolStr {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        SmolStr::new(format!("{prefix}{next}"))
    }
}

/// A session that already holds credentials.
pub fn authed_session() -> Session {
    let mut session = Session::new();
    session.init(AuthSession {
        user: Author {
            id: "u1".into(),
            name: "Ada".into(),
        },
        token: "tok".into(),
    });
    session
}

/// A published post with the given id and stored content.
pub fn sample_post(id: &str, content: &str) -> Post {
    Post {
        id: SmolStr::new(id),
        title: format!("post {id}"),
        content: content.to_string(),
        category_id: Some("c1".into()),
        tag_ids: Vec::new(),
        status: quill_common::PostStatus::Published,
        created_at: Utc::now(),
        author: None,
        reading_time: None,
    }
}

impl BlogApi for MockApi {
    async fn list_posts(&self, query: &PostQuery) -> Result<Page<Post>> {
        self.record(Call::ListPosts(query.clone()));
        let posts = self.posts.lock().unwrap();
        let matching: Vec<Post> = posts
            .iter()
            .filter(|post| {
                query
                    .category_id
                    .as_ref()
                    .is_none_or(|c| post.category_id.as_ref() == Some(c))
            })
            .filter(|post| {
                query
                    .tag_id
                    .as_ref()
                    .is_none_or(|t| post.tag_ids.contains(t))
            })
            .cloned()
            .collect();
        let total = matching.len();
        let items: Vec<Post> = matching
            .into_iter()
            .skip(query.page * query.size)
            .take(query.size)
            .collect();
        Ok(Page {
            items,
            page: query.page,
            total_pages: total.div_ceil(query.size),
            total_elements: total as u64,
        })
    }

    async fn get_post(&self, id: &str) -> Result<Post> {
        self.record(Call::GetPost(SmolStr::new(id)));
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|post| post.id == id)
            .cloned()
            .ok_or_else(|| TransportError::NotFound { id: id.to_string() })
    }

    async fn create_post(&self, payload: &PostPayload) -> Result<Post> {
        self.record(Call::CreatePost);
        let post = Post {
            id: self.fresh_id("p"),
            title: payload.title.clone(),
            content: payload.content.clone(),
            category_id: Some(payload.category_id.clone()),
            tag_ids: payload.tag_ids.clone(),
            status: payload.status,
            created_at: Utc::now(),
            author: None,
            reading_time: None,
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: &str, payload: &PostPayload) -> Result<Post> {
        self.record(Call::UpdatePost(SmolStr::new(id)));
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or_else(|| TransportError::NotFound { id: id.to_string() })?;
        post.title = payload.title.clone();
        post.content = payload.content.clone();
        post.category_id = Some(payload.category_id.clone());
        post.tag_ids = payload.tag_ids.clone();
        post.status = payload.status;
        Ok(post.clone())
    }

    async fn delete_post(&self, id: &str) -> Result<()> {
        self.record(Call::DeletePost(SmolStr::new(id)));
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|post| post.id != id);
        if posts.len() == before {
            return Err(TransportError::NotFound { id: id.to_string() });
        }
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.record(Call::ListCategories);
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn create_category(&self, name: &str) -> Result<Category> {
        self.record(Call::CreateCategory(name.to_string()));
        let category = Category {
            id: self.fresh_id("c"),
            name: name.to_string(),
            post_count: None,
        };
        self.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn delete_category(&self, id: &str) -> Result<()> {
        self.record(Call::DeleteCategory(SmolStr::new(id)));
        self.categories.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        self.record(Call::ListTags);
        Ok(self.tags.lock().unwrap().clone())
    }

    async fn create_tags(&self, names: &[String]) -> Result<Vec<Tag>> {
        self.record(Call::CreateTags(names.to_vec()));
        let mut created = Vec::with_capacity(names.len());
        for name in names {
            created.push(Tag {
                id: self.fresh_id("t"),
                name: name.clone(),
                post_count: None,
            });
        }
        self.tags.lock().unwrap().extend(created.iter().cloned());
        Ok(created)
    }

    async fn delete_tag(&self, id: &str) -> Result<()> {
        self.record(Call::DeleteTag(SmolStr::new(id)));
        self.tags.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }
}

impl AuthApi for MockApi {
    async fn login(&self, email: &str, _password: &str) -> Result<AuthSession> {
        self.record(Call::Login(email.to_string()));
        if self.fail_login {
            return Err(TransportError::BadCredentials);
        }
        Ok(AuthSession {
            user: Author {
                id: "u1".into(),
                name: "Ada".into(),
            },
            token: "tok".into(),
        })
    }

    async fn logout(&self) -> Result<()> {
        self.record(Call::Logout);
        Ok(())
    }
}
