//! Search operations.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::resources::Configurable;
use crate::types::{Envelope, SearchResult, SearchType};

/// Optional refinements for [`SearchClient::search`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOptions {
    /// Restricts the search to one namespace, e.g. a group login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Restricts hits to content created by this login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

// The query-string serializer cannot represent flattened non-string
// values, so the options are spelled out instead of `#[serde(flatten)]`.
#[derive(Debug, Serialize)]
struct SearchParams<'a> {
    q: &'a str,
    #[serde(rename = "type")]
    kind: SearchType,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    creator: Option<&'a str>,
}

/// Client for the search endpoint.
#[derive(Debug)]
pub struct SearchClient {
    transport: ApiClient,
}

impl SearchClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            transport: ApiClient::new(token)?,
        })
    }

    pub fn with_base_url(token: impl Into<String>, base_url: &str) -> Result<Self> {
        Ok(Self {
            transport: ApiClient::with_base_url(token, base_url)?,
        })
    }

    /// Searches documents or repositories matching `q`.
    pub async fn search(
        &self,
        q: &str,
        kind: SearchType,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>> {
        let params = SearchParams {
            q,
            kind,
            scope: options.scope.as_deref(),
            page: options.page,
            creator: options.creator.as_deref(),
        };
        Ok(self
            .transport
            .get_query::<Envelope<Vec<SearchResult>>, _>("/search", &params)
            .await?
            .data)
    }
}

impl Configurable for SearchClient {
    fn transport(&self) -> &ApiClient {
        &self.transport
    }
}
