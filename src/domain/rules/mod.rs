// Domain rules - Pagination and query policies

use std::collections::HashSet;

use crate::domain::errors::*;
use crate::domain::model::*;


/// Business rules for assembling a fetch query from raw inputs
pub struct QueryRules;

impl QueryRules {
    /// Validate raw inputs and build a query
    pub fn build(
        channel_id: &str,
        window: TimeWindow,
        max_duration: &str,
        page_size: u32,
    ) -> Result<FetchQuery, DomainError> {
        let channel_id = ChannelId::new(channel_id)?;
        let max_duration = MaxDuration::parse(max_duration)?;
        let page_size = PageSize::new(page_size)?;
        Ok(FetchQuery::new(channel_id, window, max_duration, page_size))
    }
}

/// What the fetch loop should do after a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Request the page behind this token
    Continue(String),
    /// No further pages
    Exhausted,
    /// The token was already requested during this run
    Repeated(String),
}

/// Tracks page tokens so each is requested at most once per run
#[derive(Debug, Default)]
pub struct PaginationGuard {
    seen: HashSet<String>,
}

impl PaginationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide how to continue given the token returned with the last page
    pub fn advance(&mut self, next_page_token: Option<String>) -> NextPage {
        match next_page_token {
            None => NextPage::Exhausted,
            Some(token) if token.is_empty() => NextPage::Exhausted,
            Some(token) => {
                if self.seen.insert(token.clone()) {
                    NextPage::Continue(token)
                } else {
                    NextPage::Repeated(token)
                }
            }
        }
    }
}
