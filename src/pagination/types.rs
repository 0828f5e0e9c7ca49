//! Pagination types and traits

use crate::error::{Error, Result};
use std::collections::HashSet;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available behind this token
    Continue {
        /// Token to send as `pageToken`
        page_token: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Responses that may point at a further page
pub trait PageToken {
    /// Continuation token for the next page, if any
    fn next_page_token(&self) -> Option<&str>;
}

/// State carried between page requests
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Token for the page about to be requested
    page_token: Option<String>,
    /// Number of pages fetched so far
    pages_fetched: u32,
    /// Tokens already followed
    seen_tokens: HashSet<String>,
    /// Whether the listing is complete
    done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Token to send with the next request (`None` for the first page)
    pub fn page_token(&self) -> Option<&str> {
        self.page_token.as_deref()
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Check if pagination is complete
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Record a fetched page and compute what comes next
    ///
    /// An absent or empty token ends the listing. A token that was already
    /// followed is an error.
    pub fn advance<P: PageToken + ?Sized>(&mut self, page: &P) -> Result<NextPage> {
        self.pages_fetched += 1;

        match page.next_page_token().filter(|t| !t.is_empty()) {
            None => {
                self.done = true;
                self.page_token = None;
                Ok(NextPage::Done)
            }
            Some(token) => {
                if !self.seen_tokens.insert(token.to_string()) {
                    self.done = true;
                    return Err(Error::pagination(format!(
                        "page token '{token}' was returned twice after {} pages",
                        self.pages_fetched
                    )));
                }
                self.page_token = Some(token.to_string());
                Ok(NextPage::Continue {
                    page_token: token.to_string(),
                })
            }
        }
    }
}
