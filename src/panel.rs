use crate::{
    news_filter::{FilterOutcome, NewsFilter},
    news_item::{CleanedNewsItem, NewsItem},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NewsPanelState {
    /// Nothing has been fetched for the ticker yet.
    #[default]
    NotFetched,
    /// A fetch completed but left nothing to show.
    Empty,
    Ready(Vec<CleanedNewsItem>),
}

/// News area for the currently selected ticker.
///
/// Each [`NewsPanel::apply`] replaces the whole state, so nothing from an
/// earlier render carries over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsPanel {
    ticker: String,
    state: NewsPanelState,
}

impl NewsPanel {
    pub fn new(ticker: impl Into<String>) -> Self {
        NewsPanel {
            ticker: ticker.into(),
            state: NewsPanelState::NotFetched,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn state(&self) -> &NewsPanelState {
        &self.state
    }

    pub fn apply(&mut self, filter: &NewsFilter, news: Option<&[NewsItem]>) {
        self.state = match filter.filter_and_clean(news) {
            FilterOutcome::Items(items) => NewsPanelState::Ready(items),
            FilterOutcome::Empty => NewsPanelState::Empty,
        };
        tracing::debug!(ticker = %self.ticker, shown = self.items().len(), "news panel updated");
    }

    pub fn items(&self) -> &[CleanedNewsItem] {
        match &self.state {
            NewsPanelState::Ready(items) => items,
            _ => &[],
        }
    }

    /// Message to show in place of the item list, only once a fetch came
    /// back with nothing to show.
    pub fn placeholder(&self) -> Option<String> {
        match self.state {
            NewsPanelState::Empty => Some(format!(
                "No news available for {} at the moment. Check back later!",
                self.ticker
            )),
            _ => None,
        }
    }
}
