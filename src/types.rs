//! Yuque API data shapes.
//!
//! Response payloads are passed through as the server sends them: timestamps
//! stay strings, counters stay numbers, and unknown fields are ignored. The
//! only place the crate edits a payload is the single-document fetch, which
//! drops the heavy raw-content fields (see [`DocClient::doc`]).
//!
//! [`DocClient::doc`]: crate::resources::DocClient::doc

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The uniform response wrapper used by every Yuque endpoint.
///
/// Endpoints answer `{ "data": ... }` with occasional extra siblings
/// (ability maps, pagination meta); everything but `data` is ignored.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Payload of the `/hello` health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hello {
    pub message: String,
}

/// A Yuque user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Login name, unique across the platform.
    pub login: String,
    pub name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_books_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<u8>,
    pub created_at: String,
    pub updated_at: String,
}

/// A Yuque group (team).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub login: String,
    pub name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_books_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<u8>,
    pub created_at: String,
    pub updated_at: String,
}

/// A group membership record, linking a user to a group with a role.
///
/// `role` is `0` for administrators and `1` for ordinary members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupUser {
    pub id: u64,
    pub group_id: u64,
    pub user_id: u64,
    pub role: u8,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// A repository (knowledge base) of documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repo {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub slug: String,
    pub name: String,
    pub user_id: u64,
    pub description: Option<String>,
    /// Visibility level: `0` private, `1` public, `2` space members.
    pub public: u8,
    pub items_count: u32,
    pub likes_count: u32,
    pub watches_count: u32,
    pub content_updated_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    /// `owner_login/repo_slug`, the handle used in document routes.
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toc_yml: Option<String>,
}

/// A document with content and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub user_id: u64,
    pub book_id: u64,
    pub format: String,
    pub public: u8,
    pub status: u8,
    pub likes_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_count: Option<u32>,
    pub comments_count: u32,
    pub content_updated_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_published_at: Option<String>,
    pub word_count: u32,
    /// Source body in the document's own format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Rendered HTML. Cleared by the single-document fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    /// Raw Lake-format content. Cleared by the single-document fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_lake: Option<String>,
    /// Unsaved draft content. Cleared by the single-document fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_draft: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<Repo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_editor: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<User>,
}

/// A saved revision of a document, without content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocVersion {
    pub id: u64,
    pub doc_id: u64,
    pub slug: String,
    pub title: String,
    pub user_id: u64,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// A single document revision with its content and diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocVersionDetail {
    pub id: u64,
    pub doc_id: u64,
    pub slug: String,
    pub title: String,
    pub user_id: u64,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub format: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_asl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

/// Node kind in a repository table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum TocNodeType {
    /// Points at a document in the repository.
    Doc,
    /// External link.
    Link,
    /// Grouping headline with no target.
    Title,
}

/// A node in a repository's table of contents.
///
/// The tree is linked through UUIDs rather than nesting: each node names
/// its predecessor, next sibling, first child, and parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocItem {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: TocNodeType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<u64>,
    /// Depth in the tree, starting at 0.
    pub level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_window: Option<u8>,
    pub visible: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sibling_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_uuid: Option<String>,
}

/// What a search query matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SearchType {
    Doc,
    Repo,
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: SearchType,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub info: Option<String>,
    /// The matched entity. A doc or a repo depending on `kind`, so the
    /// shape is left open rather than forced into one of the two.
    pub target: serde_json::Value,
}

/// A tag attached to a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub title: String,
    pub doc_id: u64,
    pub book_id: u64,
    pub user_id: u64,
    pub created_at: String,
    pub updated_at: String,
}

/// Sort direction for statistics queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Desc,
    Asc,
}

/// Source format of a document body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DocFormat {
    #[default]
    Markdown,
    Html,
    Lake,
}
