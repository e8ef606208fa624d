//! Filter/pagination feed composer.
//!
//! Holds the selected category, selected tag, and zero-based page index,
//! and issues exactly one fetch effect per transition. Changing either
//! filter resets the page to 0 before the query is built; changing the
//! page leaves the filters alone.
//!
//! Results are applied in state order, not completion order: each
//! [`FetchTicket`] carries the sequence number of the state it was
//! issued for, and a completion whose sequence is no longer current is
//! discarded. A stale, slower response can therefore never overwrite a
//! newer state's display.

use quill_common::{BlogApi, Page, Post, PostQuery, TransportError};
use smol_str::SmolStr;

/// The filter tuple owned by the post-list page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category_id: Option<SmolStr>,
    pub tag_id: Option<SmolStr>,
    pub page: usize,
}

/// One issued fetch effect. The host performs the transport call for
/// `query()` and offers the completion back via [`Feed::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: PostQuery,
}

impl FetchTicket {
    pub fn query(&self) -> &PostQuery {
        &self.query
    }
}

/// Outcome of offering a fetch completion to the feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The completion matched the current state and was displayed.
    Applied,
    /// The completion was issued for a superseded state and discarded.
    Stale,
}

/// Feed composer state.
pub struct Feed {
    filter: FilterState,
    page_size: usize,
    seq: u64,
    posts: Option<Page<Post>>,
    error: Option<TransportError>,
    loading: bool,
}

impl Feed {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: FilterState::default(),
            page_size,
            seq: 0,
            posts: None,
            error: None,
            loading: false,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The currently displayed page, if any completion has been applied.
    pub fn posts(&self) -> Option<&Page<Post>> {
        self.posts.as_ref()
    }

    /// The last transport failure for the current state, if any.
    pub fn error(&self) -> Option<&TransportError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn issue(&mut self) -> FetchTicket {
        self.seq += 1;
        self.loading = true;
        tracing::debug!(
            seq = self.seq,
            category = ?self.filter.category_id,
            tag = ?self.filter.tag_id,
            page = self.filter.page,
            "issuing feed fetch"
        );
        FetchTicket {
            seq: self.seq,
            query: PostQuery {
                category_id: self.filter.category_id.clone(),
                tag_id: self.filter.tag_id.clone(),
                page: self.filter.page,
                size: self.page_size,
            },
        }
    }

    /// Select a category (`None` clears it). Resets the page to 0.
    pub fn set_category(&mut self, id: Option<SmolStr>) -> FetchTicket {
        self.filter.category_id = id;
        self.filter.page = 0;
        self.issue()
    }

    /// Select a tag (`None` clears it). Resets the page to 0.
    pub fn set_tag(&mut self, id: Option<SmolStr>) -> FetchTicket {
        self.filter.tag_id = id;
        self.filter.page = 0;
        self.issue()
    }

    /// Click-to-toggle: selecting the already-selected category clears
    /// it.
    pub fn toggle_category(&mut self, id: &str) -> FetchTicket {
        let next = if self.filter.category_id.as_deref() == Some(id) {
            None
        } else {
            Some(SmolStr::new(id))
        };
        self.set_category(next)
    }

    /// Click-to-toggle: selecting the already-selected tag clears it.
    pub fn toggle_tag(&mut self, id: &str) -> FetchTicket {
        let next = if self.filter.tag_id.as_deref() == Some(id) {
            None
        } else {
            Some(SmolStr::new(id))
        };
        self.set_tag(next)
    }

    /// Change only the page index; filters are untouched.
    pub fn set_page(&mut self, page: usize) -> FetchTicket {
        self.filter.page = page;
        self.issue()
    }

    /// Clear both filters and return to the first page.
    pub fn clear(&mut self) -> FetchTicket {
        self.filter = FilterState::default();
        self.issue()
    }

    /// Re-fetch the current state (also used for the initial load).
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    /// Offer a fetch completion. Only the completion for the newest
    /// issued ticket is displayed; everything else is discarded.
    pub fn apply(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Page<Post>, TransportError>,
    ) -> ApplyOutcome {
        if ticket.seq != self.seq {
            tracing::debug!(
                stale = ticket.seq,
                current = self.seq,
                "discarding stale feed completion"
            );
            return ApplyOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.posts = Some(page);
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(%err, "feed fetch failed");
                self.error = Some(err);
            }
        }
        ApplyOutcome::Applied
    }

    /// Drive a ticket against the transport and apply the completion.
    pub async fn run<C: BlogApi>(&mut self, client: &C, ticket: FetchTicket) -> ApplyOutcome {
        let result = client.list_posts(ticket.query()).await;
        self.apply(&ticket, result)
    }

    // === Pagination helpers ===

    pub fn has_prev(&self) -> bool {
        self.filter.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.posts
            .as_ref()
            .is_some_and(|page| self.filter.page + 1 < page.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(ids: &[&str], total_pages: usize) -> Page<Post> {
        use chrono::Utc;
        Page {
            items: ids
                .iter()
                .map(|id| Post {
                    id: SmolStr::new(id),
                    title: format!("post {id}"),
                    content: "<p>x</p>".into(),
                    category_id: None,
                    tag_ids: Vec::new(),
                    status: quill_common::PostStatus::Published,
                    created_at: Utc::now(),
                    author: None,
                    reading_time: None,
                })
                .collect(),
            page: 0,
            total_pages,
            total_elements: ids.len() as u64,
        }
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut feed = Feed::new(6);
        feed.set_page(3);
        assert_eq!(feed.filter().page, 3);

        let ticket = feed.set_category(Some("c1".into()));
        assert_eq!(feed.filter().page, 0);
        assert_eq!(ticket.query().page, 0);
        assert_eq!(ticket.query().category_id.as_deref(), Some("c1"));

        feed.set_page(2);
        let ticket = feed.set_tag(Some("t1".into()));
        assert_eq!(ticket.query().page, 0);
        // The category filter survives a tag change.
        assert_eq!(ticket.query().category_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_page_change_keeps_filters() {
        let mut feed = Feed::new(6);
        feed.set_category(Some("c1".into()));
        let ticket = feed.set_page(4);
        assert_eq!(ticket.query().page, 4);
        assert_eq!(ticket.query().category_id.as_deref(), Some("c1"));
        assert_eq!(ticket.query().size, 6);
    }

    #[test]
    fn test_toggle_clears_selected_filter() {
        let mut feed = Feed::new(6);
        let ticket = feed.toggle_category("c1");
        assert_eq!(ticket.query().category_id.as_deref(), Some("c1"));

        let ticket = feed.toggle_category("c1");
        assert_eq!(ticket.query().category_id, None);

        let ticket = feed.toggle_category("c2");
        assert_eq!(ticket.query().category_id.as_deref(), Some("c2"));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut feed = Feed::new(6);
        feed.set_category(Some("c1".into()));
        feed.set_tag(Some("t1".into()));
        feed.set_page(2);

        let ticket = feed.clear();
        assert_eq!(ticket.query().category_id, None);
        assert_eq!(ticket.query().tag_id, None);
        assert_eq!(ticket.query().page, 0);
    }

    #[test]
    fn test_stale_completion_never_overwrites_newer_state() {
        let mut feed = Feed::new(6);

        let t1 = feed.set_category(Some("c1".into()));
        let t2 = feed.set_page(2);
        let t3 = feed.set_category(Some("c2".into()));
        assert_eq!(t3.query().page, 0);
        assert_eq!(t3.query().category_id.as_deref(), Some("c2"));

        // The newest state's completion lands first...
        assert_eq!(
            feed.apply(&t3, Ok(page_of(&["newest"], 1))),
            ApplyOutcome::Applied
        );
        // ...then the slower, stale ones complete and are discarded.
        assert_eq!(
            feed.apply(&t2, Ok(page_of(&["stale-page"], 5))),
            ApplyOutcome::Stale
        );
        assert_eq!(
            feed.apply(&t1, Ok(page_of(&["stale-cat"], 1))),
            ApplyOutcome::Stale
        );

        let shown = feed.posts().unwrap();
        assert_eq!(shown.items[0].id, "newest");
    }

    #[test]
    fn test_stale_error_is_discarded_too() {
        let mut feed = Feed::new(6);
        let old = feed.refresh();
        let new = feed.refresh();

        assert_eq!(
            feed.apply(&new, Ok(page_of(&["a"], 1))),
            ApplyOutcome::Applied
        );
        assert_eq!(
            feed.apply(
                &old,
                Err(TransportError::Network {
                    message: "slow link died".into()
                })
            ),
            ApplyOutcome::Stale
        );
        assert!(feed.error().is_none());
    }

    #[test]
    fn test_error_surfaces_for_current_state() {
        let mut feed = Feed::new(6);
        let ticket = feed.refresh();
        feed.apply(
            &ticket,
            Err(TransportError::Network {
                message: "down".into(),
            }),
        );
        assert!(feed.error().is_some());
        assert!(!feed.is_loading());
    }

    #[test]
    fn test_pagination_bounds() {
        let mut feed = Feed::new(6);
        assert!(!feed.has_prev());
        assert!(!feed.has_next());

        let ticket = feed.refresh();
        feed.apply(&ticket, Ok(page_of(&["a"], 3)));
        assert!(!feed.has_prev());
        assert!(feed.has_next());

        let ticket = feed.set_page(2);
        feed.apply(&ticket, Ok(page_of(&["b"], 3)));
        assert!(feed.has_prev());
        assert!(!feed.has_next());
    }

    #[test]
    fn test_loading_flag_follows_issue_and_apply() {
        let mut feed = Feed::new(6);
        assert!(!feed.is_loading());
        let ticket = feed.refresh();
        assert!(feed.is_loading());
        feed.apply(&ticket, Ok(page_of(&[], 0)));
        assert!(!feed.is_loading());
    }
}
