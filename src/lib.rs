mod cleaner;
mod entities;
mod error;
mod filter_config;
mod news_filter;
mod news_item;
mod panel;

pub use cleaner::{DefaultCleaner, FeedTextCleaner, HtmlTextCleaner, TextCleaner};
pub use entities::decode_entities;
pub use error::{ConfigError, PayloadError};
pub use filter_config::{DiscardRule, FilterConfig, ARTIFACT_PATTERNS};
pub use news_filter::{FilterOutcome, NewsFilter, NewsFilterBuilder};
pub use news_item::{CleanedNewsItem, NewsItem, NewsPayload, SourceBadge, MARKET_NEWS_SOURCE};
pub use panel::{NewsPanel, NewsPanelState};
