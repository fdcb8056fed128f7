//! Content store boundary: where article bodies come from.
//!
//! The engine never talks to a database. A [`ContentStore`] hands it article
//! text, and [`analyse_article`] runs an [`Analyser`] over the body.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::core::{Analyser, AnalysisResult, OperationConfig};
use crate::error::{AnalyserError, Result};

/// A stored article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// `None` for drafts.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn draft(slug: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            body: body.into(),
            tags: Vec::new(),
            published_at: None,
        }
    }

    pub fn published(mut self, at: DateTime<Utc>) -> Self {
        self.published_at = Some(at);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }
}

/// Read access to articles.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Published articles, newest first.
    async fn list_published(&self) -> Result<Vec<Article>>;

    /// The article with `slug`, published or not.
    async fn fetch_by_slug(&self, slug: &str) -> Result<Option<Article>>;
}

/// Keeps articles in memory, keyed by slug.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    articles: Arc<RwLock<IndexMap<String, Article>>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an article.
    pub async fn insert(&self, article: Article) {
        let mut articles = self.articles.write().await;
        articles.insert(article.slug.clone(), article);
    }

    pub async fn remove(&self, slug: &str) -> Option<Article> {
        self.articles.write().await.shift_remove(slug)
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn list_published(&self) -> Result<Vec<Article>> {
        let articles = self.articles.read().await;
        let mut published: Vec<Article> = articles
            .values()
            .filter(|a| a.is_published())
            .cloned()
            .collect();
        published.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(published)
    }

    async fn fetch_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        Ok(self.articles.read().await.get(slug).cloned())
    }
}

/// Fetches an article and analyses its body.
#[instrument(skip(store, config))]
pub async fn analyse_article(
    store: &dyn ContentStore,
    slug: &str,
    config: OperationConfig,
) -> Result<AnalysisResult> {
    let article = store
        .fetch_by_slug(slug)
        .await?
        .ok_or_else(|| AnalyserError::invalid_input(format!("no article with slug '{slug}'")))?;

    info!(slug, title = %article.title, "Analysing article");
    let mut analyser = Analyser::new(article.body, config);
    analyser.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    async fn seeded() -> InMemoryContentStore {
        let store = InMemoryContentStore::new();
        store
            .insert(
                Article::draft("old", "Old news", "Yesterday was fine.")
                    .published(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            )
            .await;
        store
            .insert(Article::draft("wip", "Draft", "Not ready yet."))
            .await;
        store
            .insert(
                Article::draft("new", "Fresh", "Read more at https://blog.example.com today.")
                    .published(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
                    .with_tags(["rust"]),
            )
            .await;
        store
    }

    #[tokio::test]
    async fn test_list_published_newest_first() {
        let store = seeded().await;
        let slugs: Vec<String> = store
            .list_published()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.slug)
            .collect();
        assert_eq!(slugs, vec!["new", "old"]);
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_fetch_by_slug_includes_drafts() {
        let store = seeded().await;
        let draft = store.fetch_by_slug("wip").await.unwrap().unwrap();
        assert!(!draft.is_published());
        assert!(store.fetch_by_slug("missing").await.unwrap().is_none());

        assert!(store.remove("wip").await.is_some());
        assert!(store.fetch_by_slug("wip").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_analyse_article() {
        let store = seeded().await;
        let config = OperationConfig::new().enable("extract-urls").enable("count-words");

        let result = analyse_article(&store, "new", config.clone()).await.unwrap();
        assert_eq!(result.metadata.urls, vec!["https://blog.example.com"]);
        assert_eq!(result.metadata.counts.word_count, 5);

        let err = analyse_article(&store, "missing", config).await.unwrap_err();
        assert!(matches!(err, AnalyserError::InvalidInput(_)));
    }
}
