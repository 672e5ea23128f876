use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use serde::Serialize;

use crate::{
    cleaner::{FeedTextCleaner, TextCleaner},
    filter_config::{DiscardRule, FilterConfig},
    news_item::{CleanedNewsItem, NewsItem},
    ConfigError,
};

/// A builder for the `NewsFilter` struct
/// that allows for configuring the rules and
/// the cleaner before building it
pub struct NewsFilterBuilder {
    config: Option<String>,
    filter_config: Option<FilterConfig>,
    cleaner: Option<Arc<dyn TextCleaner>>,
}

impl NewsFilterBuilder {
    pub fn new() -> Self {
        NewsFilterBuilder {
            config: None,
            filter_config: None,
            cleaner: None,
        }
    }

    /// A config file path or inline JSON/TOML, see [`FilterConfig::from_config`].
    pub fn with_config(mut self, config: &str) -> Self {
        self.config = Some(config.to_string());
        self
    }

    pub fn with_filter_config(mut self, config: FilterConfig) -> Self {
        self.filter_config = Some(config);
        self
    }

    pub fn with_cleaner<T: TextCleaner + 'static>(mut self, cleaner: T) -> Self {
        self.cleaner = Some(Arc::new(cleaner));
        self
    }

    pub fn build(self) -> Result<NewsFilter, ConfigError> {
        let config = match (self.filter_config, self.config) {
            (Some(config), _) => {
                config.validate()?;
                config
            }
            (None, Some(config_str)) => FilterConfig::from_config(&config_str)?,
            (None, None) => FilterConfig::default(),
        };

        Ok(NewsFilter {
            config: Arc::new(config),
            cleaner: self.cleaner.unwrap_or_else(|| Arc::new(FeedTextCleaner)),
        })
    }
}

impl Default for NewsFilterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one filtering pass.
///
/// `Items` is never empty; a pass with nothing left to show is `Empty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "items", rename_all = "snake_case")]
pub enum FilterOutcome {
    Items(Vec<CleanedNewsItem>),
    Empty,
}

impl FilterOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterOutcome::Empty)
    }

    pub fn items(&self) -> &[CleanedNewsItem] {
        match self {
            FilterOutcome::Items(items) => items,
            FilterOutcome::Empty => &[],
        }
    }

    pub fn into_items(self) -> Vec<CleanedNewsItem> {
        match self {
            FilterOutcome::Items(items) => items,
            FilterOutcome::Empty => Vec::new(),
        }
    }
}

impl From<Vec<CleanedNewsItem>> for FilterOutcome {
    fn from(items: Vec<CleanedNewsItem>) -> Self {
        if items.is_empty() {
            FilterOutcome::Empty
        } else {
            FilterOutcome::Items(items)
        }
    }
}

/// Drops feed artifacts and near-empty entries from a news list and
/// cleans the text of what remains.
///
/// # Example
///
/// ```
/// use news_filter::{NewsFilter, NewsItem};
///
/// let filter = NewsFilter::default();
/// let items = vec![NewsItem {
///     title: Some("Cement makers lead PSX rally".to_string()),
///     summary: Some("<p>Shares of cement makers rose &amp; led the index.</p>".to_string()),
///     ..NewsItem::default()
/// }];
///
/// let cleaned = filter.clean_items(&items);
/// assert_eq!(cleaned[0].summary, "Shares of cement makers rose & led the index.");
/// ```
#[derive(Clone)]
pub struct NewsFilter {
    config: Arc<FilterConfig>,
    cleaner: Arc<dyn TextCleaner>,
}

impl Debug for NewsFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsFilter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NewsFilter {
    pub fn builder() -> NewsFilterBuilder {
        NewsFilterBuilder::new()
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Absent input, empty input and input where every item is discarded
    /// all give [`FilterOutcome::Empty`].
    pub fn filter_and_clean(&self, items: Option<&[NewsItem]>) -> FilterOutcome {
        FilterOutcome::from(self.clean_items(items.unwrap_or_default()))
    }

    pub fn clean_items(&self, items: &[NewsItem]) -> Vec<CleanedNewsItem> {
        let cleaned: Vec<CleanedNewsItem> =
            items.iter().filter_map(|item| self.clean_item(item)).collect();
        tracing::debug!(kept = cleaned.len(), total = items.len(), "filtered news items");
        cleaned
    }

    #[cfg(feature = "multi_thread")]
    pub fn par_filter_and_clean(&self, items: Option<&[NewsItem]>) -> FilterOutcome {
        use rayon::prelude::*;

        let items = items.unwrap_or_default();
        let cleaned: Vec<CleanedNewsItem> = items
            .par_iter()
            .filter_map(|item| self.clean_item(item))
            .collect();
        tracing::debug!(kept = cleaned.len(), total = items.len(), "filtered news items");
        FilterOutcome::from(cleaned)
    }

    /// Returns the rule that discards `item` before cleaning, if any.
    pub fn discard_rule(&self, item: &NewsItem) -> Option<&DiscardRule> {
        let title = item.title.as_deref().unwrap_or_default().to_lowercase();
        let summary = item.summary.as_deref().unwrap_or_default().to_lowercase();
        self.config
            .rules
            .iter()
            .find(|rule| rule.matches(&title, &summary))
    }

    /// Cleans one item, or returns `None` when it should not be shown.
    pub fn clean_item(&self, item: &NewsItem) -> Option<CleanedNewsItem> {
        if let Some(rule) = self.discard_rule(item) {
            tracing::debug!(link = %item.link, %rule, "discarding news item");
            return None;
        }

        let title = item.title.as_deref().unwrap_or_default();
        let summary = match item.summary.as_deref() {
            Some(summary) if !summary.is_empty() => summary,
            _ => title,
        };

        let clean_summary = self.cleaner.clean(summary);
        let summary_chars = clean_summary.chars().count();
        if summary_chars < self.config.min_summary_chars {
            tracing::debug!(
                link = %item.link,
                summary_chars,
                "discarding news item with short summary"
            );
            return None;
        }

        Some(CleanedNewsItem {
            title: self.cleaner.clean(title),
            summary: self.truncate(clean_summary),
            published: item.published.clone(),
            link: item.link.clone(),
            source: item
                .source
                .clone()
                .unwrap_or_else(|| self.config.default_source.clone()),
        })
    }

    fn truncate(&self, text: String) -> String {
        let max = self.config.max_summary_chars;
        match text.char_indices().nth(max) {
            Some((cut, _)) => {
                let mut truncated = String::with_capacity(cut + self.config.ellipsis.len());
                truncated.push_str(&text[..cut]);
                truncated.push_str(&self.config.ellipsis);
                truncated
            }
            None => text,
        }
    }
}

impl Default for NewsFilter {
    fn default() -> Self {
        NewsFilter {
            config: Arc::new(FilterConfig::default()),
            cleaner: Arc::new(FeedTextCleaner),
        }
    }
}
