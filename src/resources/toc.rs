//! Table-of-contents operations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::client::ApiClient;
use crate::error::Result;
use crate::resources::Configurable;
use crate::types::{Envelope, TocItem, TocNodeType};

/// Mutation applied to a repository's table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TocAction {
    AppendNode,
    PrependNode,
    EditNode,
    RemoveNode,
}

/// Where a node lands relative to the target: next to it or under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TocActionMode {
    Sibling,
    Child,
}

/// Body for [`TocClient::update_repo_toc`].
///
/// Which optional fields apply depends on the action: node placement uses
/// `target_uuid`/`doc_ids`, edits and removals address `node_uuid`, link
/// nodes carry `url`/`open_window`. Unset fields are omitted from the wire.
#[derive(Debug, Clone, Serialize)]
pub struct TocUpdate {
    pub action: TocAction,
    pub action_mode: TocActionMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_ids: Option<Vec<u64>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<TocNodeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_window: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<u8>,
}

impl TocUpdate {
    pub fn new(action: TocAction, action_mode: TocActionMode) -> Self {
        Self {
            action,
            action_mode,
            target_uuid: None,
            node_uuid: None,
            doc_ids: None,
            node_type: None,
            title: None,
            url: None,
            open_window: None,
            visible: None,
        }
    }
}

/// Client for the table-of-contents resource family.
#[derive(Debug)]
pub struct TocClient {
    transport: ApiClient,
}

impl TocClient {
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

    /// Fetches a repository's table of contents as a flat node list.
    pub async fn repo_toc(&self, namespace: &str) -> Result<Vec<TocItem>> {
        Ok(self
            .transport
            .get::<Envelope<Vec<TocItem>>>(&format!("/repos/{namespace}/toc"))
            .await?
            .data)
    }

    /// Applies one mutation to the table of contents; returns the new list.
    pub async fn update_repo_toc(&self, namespace: &str, update: &TocUpdate) -> Result<Vec<TocItem>> {
        Ok(self
            .transport
            .put::<Envelope<Vec<TocItem>>, _>(&format!("/repos/{namespace}/toc"), update)
            .await?
            .data)
    }
}

impl Configurable for TocClient {
    fn transport(&self) -> &ApiClient {
        &self.transport
    }
}
