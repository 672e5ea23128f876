use serde::{Deserialize, Serialize};

use crate::PayloadError;

/// Source label the aggregator puts on general market news.
pub const MARKET_NEWS_SOURCE: &str = "PSX Market News";

/// A news entry as the feed aggregator delivers it.
///
/// Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub source: Option<String>,
}

/// A news entry ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedNewsItem {
    pub title: String,
    pub summary: String,
    pub published: String,
    pub link: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceBadge<'a> {
    Market,
    Named(&'a str),
}

impl CleanedNewsItem {
    pub fn source_badge(&self) -> SourceBadge<'_> {
        if self.source == MARKET_NEWS_SOURCE {
            SourceBadge::Market
        } else {
            SourceBadge::Named(&self.source)
        }
    }
}

/// Response body of the backend's news endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsPayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub news: Option<Vec<NewsItem>>,
}

impl NewsPayload {
    pub fn from_json(json: &str) -> Result<NewsPayload, PayloadError> {
        Ok(sonic_rs::from_str(json)?)
    }

    pub fn news(&self) -> Option<&[NewsItem]> {
        self.news.as_deref()
    }
}
