//! Typed async client for the [Yuque](https://www.yuque.com) REST API.
//!
//! The crate is organized as one transport client plus one resource client
//! per API family (users, groups, repositories, documents, tables of
//! contents, search, statistics), aggregated by the [`Yuque`] facade.
//!
//! # Quick Start
//!
//! ```no_run
//! use yuque::{SearchOptions, SearchType, Yuque};
//!
//! #[tokio::main]
//! async fn main() -> yuque::Result<()> {
//!     // Token from YUQUE_TOKEN, base URL from YUQUE_BASE_URL if set
//!     let yuque = Yuque::from_env()?;
//!
//!     let me = yuque.current_user().await?;
//!     println!("signed in as {}", me.login);
//!
//!     let hits = yuque
//!         .search("release notes", SearchType::Doc, &SearchOptions::default())
//!         .await?;
//!     println!("{} matching docs", hits.len());
//!
//!     // Rotate the token on every owned client at once
//!     yuque.update_token("fresh-token")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`ApiClient`] — owns the `{token, base_url}` configuration and the
//!   primitive verbs. The underlying connection is rebuilt whole on every
//!   reconfiguration.
//! - Resource clients ([`UserClient`], [`RepoClient`], …) — one typed method
//!   per API operation, each delegating to exactly one transport call and
//!   unwrapping the `{ "data": … }` response envelope. Every resource client
//!   owns its own transport; the shared configuration surface is the
//!   [`Configurable`] trait.
//! - [`Yuque`] — the facade. Owns one of everything, forwards every
//!   operation, and is the only place that reconfigures all owned clients
//!   in lockstep.
//!
//! # Configuration
//!
//! - `YUQUE_TOKEN` — API token for [`Yuque::from_env`]. An empty token is
//!   legal and means unauthenticated calls (no `X-Auth-Token` header sent).
//! - `YUQUE_BASE_URL` — optional endpoint override, defaults to
//!   [`DEFAULT_BASE_URL`].
//!
//! # Errors
//!
//! Every operation returns [`ApiError`]. Errors are raised by the transport
//! and propagate unmodified — there is no retry, fallback, or remapping at
//! any layer.

pub mod client;
pub mod error;
pub mod resources;
pub mod service;
pub mod types;

pub use client::{ApiClient, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
pub use service::{Yuque, BASE_URL_VAR, TOKEN_VAR};

pub use resources::{
    Configurable, CreateDoc, CreateRepo, DocClient, DocListQuery, DocQuery, DocStatsQuery,
    GroupClient, GroupMembersQuery, RemovedMember, RepoClient, RepoListQuery, SearchClient,
    SearchOptions, StatisticsClient, StatsQuery, TocAction, TocActionMode, TocClient, TocUpdate,
    UpdateDoc, UpdateRepo, UserClient, UserGroupsQuery,
};

pub use types::{
    Doc, DocFormat, DocVersion, DocVersionDetail, Envelope, Group, GroupUser, Hello, Repo,
    SearchResult, SearchType, SortOrder, Tag, TocItem, TocNodeType, User,
};
