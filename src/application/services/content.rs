//! Platform content service: news and calendar events

use std::sync::Arc;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::application::services::{cached_list, encode, fetch, matches_search};
use crate::application::ApplicationResult;
use crate::domain::{CalendarEvent, DomainError, NewsPost};
use crate::infrastructure::cache::QueryCache;
use crate::infrastructure::traits::{RecordStore, ResourceKind};

#[derive(Debug, Clone)]
pub struct NewNewsPost {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: String,
    pub company_id: Option<String>,
    pub cover_image: Option<String>,
    pub featured: bool,
    pub tags: Vec<String>,
    pub author: String,
}

#[derive(Debug, Clone, Default)]
pub struct NewsPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub cover_image: Option<String>,
    pub featured: Option<bool>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct NewsFilter {
    /// Substring match on the title, case-insensitive
    pub search: Option<String>,
    pub category: Option<String>,
    pub company_id: Option<String>,
    pub featured: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub user_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Events are kept when their span overlaps the `[from, to]` window.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub category: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Service for news posts and calendar events.
pub struct ContentService {
    store: Arc<dyn RecordStore>,
    cache: Arc<QueryCache>,
}

impl ContentService {
    pub fn new(store: Arc<dyn RecordStore>, cache: Arc<QueryCache>) -> Self {
        Self { store, cache }
    }

    // ---- news ----

    /// News posts matching the filter, newest first.
    pub fn list_news(&self, filter: &NewsFilter) -> ApplicationResult<Vec<NewsPost>> {
        let posts: Vec<NewsPost> =
            cached_list(self.store.as_ref(), &self.cache, ResourceKind::News)?;
        Ok(posts
            .into_iter()
            .filter(|p| {
                filter
                    .search
                    .as_deref()
                    .map(|s| matches_search(&p.title, s))
                    .unwrap_or(true)
                    && filter
                        .category
                        .as_deref()
                        .map(|c| p.category == c)
                        .unwrap_or(true)
                    && filter
                        .company_id
                        .as_deref()
                        .map(|c| p.company_id.as_deref() == Some(c))
                        .unwrap_or(true)
                    && filter.featured.map(|f| p.featured == f).unwrap_or(true)
            })
            .sorted_by(|a, b| b.published_at.cmp(&a.published_at))
            .collect())
    }

    #[instrument(level = "debug", skip(self, input))]
    pub fn create_news(&self, input: NewNewsPost) -> ApplicationResult<NewsPost> {
        if input.title.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "title" }.into());
        }
        let post = NewsPost {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            content: input.content,
            excerpt: input.excerpt,
            category: input.category,
            company_id: input.company_id,
            cover_image: input.cover_image,
            featured: input.featured,
            tags: input.tags,
            author: input.author,
            published_at: Utc::now(),
        };
        let row = encode(ResourceKind::News, &post)?;
        self.store.insert(ResourceKind::News, row)?;
        self.cache.invalidate_kind(ResourceKind::News);
        debug!(id = %post.id, "news post created");
        Ok(post)
    }

    #[instrument(level = "debug", skip(self, patch))]
    pub fn update_news(&self, id: &str, patch: NewsPatch) -> ApplicationResult<NewsPost> {
        let mut post: NewsPost = fetch(self.store.as_ref(), ResourceKind::News, id)?;

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(excerpt) = patch.excerpt {
            post.excerpt = Some(excerpt);
        }
        if let Some(category) = patch.category {
            post.category = category;
        }
        if let Some(cover_image) = patch.cover_image {
            post.cover_image = Some(cover_image);
        }
        if let Some(featured) = patch.featured {
            post.featured = featured;
        }
        if let Some(tags) = patch.tags {
            post.tags = tags;
        }

        let row = encode(ResourceKind::News, &post)?;
        self.store.update(ResourceKind::News, id, row)?;
        self.cache.invalidate_kind(ResourceKind::News);
        Ok(post)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete_news(&self, id: &str) -> ApplicationResult<()> {
        self.store.delete(ResourceKind::News, id)?;
        self.cache.invalidate_kind(ResourceKind::News);
        Ok(())
    }

    // ---- calendar events ----

    /// Events matching the filter, ordered by start date.
    pub fn list_events(&self, filter: &EventFilter) -> ApplicationResult<Vec<CalendarEvent>> {
        let events: Vec<CalendarEvent> =
            cached_list(self.store.as_ref(), &self.cache, ResourceKind::Events)?;
        Ok(events
            .into_iter()
            .filter(|e| {
                filter
                    .category
                    .as_deref()
                    .map(|c| e.category == c)
                    .unwrap_or(true)
                    && filter.to.map(|to| e.start_date <= to).unwrap_or(true)
                    && filter.from.map(|from| e.end_date >= from).unwrap_or(true)
            })
            .sorted_by_key(|e| e.start_date)
            .collect())
    }

    #[instrument(level = "debug", skip(self, input))]
    pub fn create_event(&self, input: NewEvent) -> ApplicationResult<CalendarEvent> {
        if input.title.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "title" }.into());
        }
        if input.end_date < input.start_date {
            return Err(DomainError::InvertedDateRange {
                start: input.start_date.to_rfc3339(),
                end: input.end_date.to_rfc3339(),
            }
            .into());
        }
        let event = CalendarEvent {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            category: input.category,
            location: input.location,
            start_date: input.start_date,
            end_date: input.end_date,
            user_id: input.user_id,
        };
        let row = encode(ResourceKind::Events, &event)?;
        self.store.insert(ResourceKind::Events, row)?;
        self.cache.invalidate_kind(ResourceKind::Events);
        debug!(id = %event.id, "event created");
        Ok(event)
    }

    #[instrument(level = "debug", skip(self, patch))]
    pub fn update_event(&self, id: &str, patch: EventPatch) -> ApplicationResult<CalendarEvent> {
        let mut event: CalendarEvent = fetch(self.store.as_ref(), ResourceKind::Events, id)?;

        if let Some(title) = patch.title {
            event.title = title;
        }
        if let Some(description) = patch.description {
            event.description = Some(description);
        }
        if let Some(category) = patch.category {
            event.category = category;
        }
        if let Some(location) = patch.location {
            event.location = Some(location);
        }
        if let Some(start_date) = patch.start_date {
            event.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            event.end_date = end_date;
        }
        if event.end_date < event.start_date {
            return Err(DomainError::InvertedDateRange {
                start: event.start_date.to_rfc3339(),
                end: event.end_date.to_rfc3339(),
            }
            .into());
        }

        let row = encode(ResourceKind::Events, &event)?;
        self.store.update(ResourceKind::Events, id, row)?;
        self.cache.invalidate_kind(ResourceKind::Events);
        Ok(event)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete_event(&self, id: &str) -> ApplicationResult<()> {
        self.store.delete(ResourceKind::Events, id)?;
        self.cache.invalidate_kind(ResourceKind::Events);
        Ok(())
    }
}
