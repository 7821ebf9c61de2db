//! Group statistics operations.
//!
//! The statistics endpoints make no shape-stability promise, so every method
//! here returns [`serde_json::Value`] instead of forcing a schema that would
//! break on harmless server-side additions.

use serde::Serialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::Result;
use crate::resources::Configurable;
use crate::types::{Envelope, SortOrder};

/// Optional filters and paging for the member/book statistics listings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsQuery {
    /// Substring filter on the entity name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Reporting window in days, e.g. `30`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(rename = "sortField", skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(rename = "sortOrder", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Filters for the document statistics listing; adds a repository filter.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocStatsQuery {
    #[serde(rename = "bookId", skip_serializing_if = "Option::is_none")]
    pub book_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(rename = "sortField", skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(rename = "sortOrder", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Client for the group statistics family.
#[derive(Debug)]
pub struct StatisticsClient {
    transport: ApiClient,
}

impl StatisticsClient {
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

    /// Summary statistics for a group.
    pub async fn group_statistics(&self, login: &str) -> Result<Value> {
        Ok(self
            .transport
            .get::<Envelope<Value>>(&format!("/groups/{login}/statistics"))
            .await?
            .data)
    }

    /// Per-member contribution statistics.
    pub async fn group_member_statistics(&self, login: &str, query: &StatsQuery) -> Result<Value> {
        Ok(self
            .transport
            .get_query::<Envelope<Value>, _>(
                &format!("/groups/{login}/statistics/members"),
                query,
            )
            .await?
            .data)
    }

    /// Per-repository statistics.
    pub async fn group_book_statistics(&self, login: &str, query: &StatsQuery) -> Result<Value> {
        Ok(self
            .transport
            .get_query::<Envelope<Value>, _>(&format!("/groups/{login}/statistics/books"), query)
            .await?
            .data)
    }

    /// Per-document statistics, optionally narrowed to one repository.
    pub async fn group_doc_statistics(&self, login: &str, query: &DocStatsQuery) -> Result<Value> {
        Ok(self
            .transport
            .get_query::<Envelope<Value>, _>(&format!("/groups/{login}/statistics/docs"), query)
            .await?
            .data)
    }
}

impl Configurable for StatisticsClient {
    fn transport(&self) -> &ApiClient {
        &self.transport
    }
}
