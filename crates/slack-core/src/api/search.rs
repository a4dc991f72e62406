use crate::api::client::SlackClient;
use crate::api::models::{SearchMatch, SearchResults};
use crate::api::params::Params;
use crate::api::transport::Transport;
use crate::error::ApiError;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct Paging {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    pages: u32,
}

#[derive(Debug, Default, Deserialize)]
struct MessageMatches {
    #[serde(default)]
    total: u32,
    #[serde(default)]
    matches: Vec<SearchMatch>,
    #[serde(default)]
    paging: Paging,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: String,
    #[serde(default)]
    messages: MessageMatches,
}

impl<T: Transport> SlackClient<T> {
    /// One page of message search results. Search uses page numbers, not cursors.
    pub async fn search_messages(
        &self,
        query: &str,
        count: u32,
        page: u32,
    ) -> Result<SearchResults, ApiError> {
        let params = Params::new()
            .with("query", query)
            .with("count", count)
            .with("page", page);

        let response: SearchResponse = self.get("search.messages", params).await?;
        let messages = response.messages;
        Ok(SearchResults {
            query: if response.query.is_empty() {
                query.to_string()
            } else {
                response.query
            },
            total: messages.total,
            page: messages.paging.page,
            page_count: messages.paging.pages,
            matches: messages.matches,
        })
    }
}
