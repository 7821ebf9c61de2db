//! The aggregate Yuque client.
//!
//! [`Yuque`] owns one transport of its own plus one client per resource
//! family and re-exposes every operation under a single object. The resource
//! clients are deliberately independent — each has its own transport — so
//! the facade is the one place that can change the configuration of all of
//! them in lockstep.

use serde_json::Value;

use crate::client::{ApiClient, DEFAULT_BASE_URL};
use crate::error::{ApiError, Result};
use crate::resources::{
    Configurable, CreateDoc, CreateRepo, DocClient, DocListQuery, DocQuery, DocStatsQuery,
    GroupClient, GroupMembersQuery, RemovedMember, RepoClient, RepoListQuery, SearchClient,
    SearchOptions, StatisticsClient, StatsQuery, TocClient, TocUpdate, UpdateDoc, UpdateRepo,
    UserClient, UserGroupsQuery,
};
use crate::types::{
    Doc, DocVersion, DocVersionDetail, Group, GroupUser, Hello, Repo, SearchResult, SearchType,
    TocItem, User,
};

/// Environment variable holding the API token for [`Yuque::from_env`].
pub const TOKEN_VAR: &str = "YUQUE_TOKEN";

/// Environment variable overriding the base URL for [`Yuque::from_env`].
pub const BASE_URL_VAR: &str = "YUQUE_BASE_URL";

/// One object for the whole Yuque API.
///
/// Every method forwards to the matching resource client unchanged; results
/// and errors surface exactly as the resource client produced them.
#[derive(Debug)]
pub struct Yuque {
    client: ApiClient,
    user: UserClient,
    group: GroupClient,
    repo: RepoClient,
    doc: DocClient,
    toc: TocClient,
    search: SearchClient,
    stats: StatisticsClient,
}

impl Yuque {
    /// Creates a service against the default Yuque endpoint.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Creates a service against a custom endpoint.
    ///
    /// All eight owned clients start from the identical configuration.
    pub fn with_base_url(token: impl Into<String>, base_url: &str) -> Result<Self> {
        let token = token.into();
        Ok(Self {
            client: ApiClient::with_base_url(token.clone(), base_url)?,
            user: UserClient::with_base_url(token.clone(), base_url)?,
            group: GroupClient::with_base_url(token.clone(), base_url)?,
            repo: RepoClient::with_base_url(token.clone(), base_url)?,
            doc: DocClient::with_base_url(token.clone(), base_url)?,
            toc: TocClient::with_base_url(token.clone(), base_url)?,
            search: SearchClient::with_base_url(token.clone(), base_url)?,
            stats: StatisticsClient::with_base_url(token, base_url)?,
        })
    }

    /// Creates a service from `YUQUE_TOKEN` and, if set, `YUQUE_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_VAR).map_err(|_| ApiError::MissingEnv(TOKEN_VAR))?;
        match std::env::var(BASE_URL_VAR) {
            Ok(base_url) => Self::with_base_url(token, &base_url),
            Err(_) => Self::new(token),
        }
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// The configured API token. Empty for unauthenticated services.
    pub fn api_token(&self) -> String {
        self.client.api_token()
    }

    /// The configured base URL, without trailing slash.
    pub fn base_url(&self) -> String {
        self.client.base_url()
    }

    /// Replaces the API token on all owned clients.
    pub fn update_token(&self, token: &str) -> Result<()> {
        self.update_config(Some(token), None)
    }

    /// Replaces the base URL on all owned clients.
    pub fn update_base_url(&self, base_url: &str) -> Result<()> {
        self.update_config(None, Some(base_url))
    }

    /// Partial reconfiguration of all owned clients; a `None` field keeps
    /// its previous value on every one of them.
    ///
    /// All eight clients receive identical arguments, and validation happens
    /// before any state changes, so an error here means nothing was updated.
    pub fn update_config(&self, token: Option<&str>, base_url: Option<&str>) -> Result<()> {
        self.client.update_config(token, base_url)?;
        self.user.update_config(token, base_url)?;
        self.group.update_config(token, base_url)?;
        self.repo.update_config(token, base_url)?;
        self.doc.update_config(token, base_url)?;
        self.toc.update_config(token, base_url)?;
        self.search.update_config(token, base_url)?;
        self.stats.update_config(token, base_url)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Owned resource clients
    // ------------------------------------------------------------------

    pub fn user_client(&self) -> &UserClient {
        &self.user
    }

    pub fn group_client(&self) -> &GroupClient {
        &self.group
    }

    pub fn repo_client(&self) -> &RepoClient {
        &self.repo
    }

    pub fn doc_client(&self) -> &DocClient {
        &self.doc
    }

    pub fn toc_client(&self) -> &TocClient {
        &self.toc
    }

    pub fn search_client(&self) -> &SearchClient {
        &self.search
    }

    pub fn statistics_client(&self) -> &StatisticsClient {
        &self.stats
    }

    // ------------------------------------------------------------------
    // Health
    // ------------------------------------------------------------------

    /// Health check against `/hello`.
    pub async fn hello(&self) -> Result<Hello> {
        self.client.hello().await
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Fetches the authenticated user.
    pub async fn current_user(&self) -> Result<User> {
        self.user.current_user().await
    }

    /// Lists the authenticated user's documents.
    pub async fn user_docs(&self) -> Result<Vec<Doc>> {
        self.user.user_docs().await
    }

    /// Lists the groups a user belongs to.
    pub async fn user_groups(&self, id: &str, query: &UserGroupsQuery) -> Result<Vec<Group>> {
        self.user.user_groups(id, query).await
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    /// Lists the members of a group.
    pub async fn group_members(
        &self,
        login: &str,
        query: &GroupMembersQuery,
    ) -> Result<Vec<GroupUser>> {
        self.group.group_members(login, query).await
    }

    /// Sets a member's role: `0` admin, `1` member.
    pub async fn update_group_member(&self, login: &str, id: &str, role: u8) -> Result<GroupUser> {
        self.group.update_group_member(login, id, role).await
    }

    /// Removes a member from a group.
    pub async fn delete_group_member(&self, login: &str, id: &str) -> Result<RemovedMember> {
        self.group.delete_group_member(login, id).await
    }

    // ------------------------------------------------------------------
    // Repositories
    // ------------------------------------------------------------------

    /// Lists the repositories owned by a user.
    pub async fn user_repos(&self, login: &str, query: &RepoListQuery) -> Result<Vec<Repo>> {
        self.repo.user_repos(login, query).await
    }

    /// Lists the repositories owned by a group.
    pub async fn group_repos(&self, login: &str, query: &RepoListQuery) -> Result<Vec<Repo>> {
        self.repo.group_repos(login, query).await
    }

    /// Fetches a repository by its `owner/slug` namespace.
    pub async fn repo(&self, namespace: &str) -> Result<Repo> {
        self.repo.repo(namespace).await
    }

    /// Creates a repository under a user.
    pub async fn create_repo(&self, login: &str, repo: &CreateRepo) -> Result<Repo> {
        self.repo.create_repo(login, repo).await
    }

    /// Creates a repository under a group.
    pub async fn create_group_repo(&self, login: &str, repo: &CreateRepo) -> Result<Repo> {
        self.repo.create_group_repo(login, repo).await
    }

    /// Updates a repository in place.
    pub async fn update_repo(&self, namespace: &str, update: &UpdateRepo) -> Result<Repo> {
        self.repo.update_repo(namespace, update).await
    }

    /// Deletes a repository. Returns the deleted record.
    pub async fn delete_repo(&self, namespace: &str) -> Result<Repo> {
        self.repo.delete_repo(namespace).await
    }

    // ------------------------------------------------------------------
    // Documents
    // ------------------------------------------------------------------

    /// Lists the documents in a repository.
    pub async fn repo_docs(&self, namespace: &str, query: &DocListQuery) -> Result<Vec<Doc>> {
        self.doc.repo_docs(namespace, query).await
    }

    /// Fetches a single document by slug, without the raw-content fields.
    pub async fn doc(&self, namespace: &str, slug: &str, query: &DocQuery) -> Result<Doc> {
        self.doc.doc(namespace, slug, query).await
    }

    /// Creates a document in a repository.
    pub async fn create_doc(&self, namespace: &str, doc: &CreateDoc) -> Result<Doc> {
        self.doc.create_doc(namespace, doc).await
    }

    /// Updates a document by numeric id.
    pub async fn update_doc(&self, namespace: &str, id: u64, update: &UpdateDoc) -> Result<Doc> {
        self.doc.update_doc(namespace, id, update).await
    }

    /// Deletes a document by numeric id. Returns the deleted record.
    pub async fn delete_doc(&self, namespace: &str, id: u64) -> Result<Doc> {
        self.doc.delete_doc(namespace, id).await
    }

    /// Lists the saved versions of a document.
    pub async fn doc_versions(&self, doc_id: u64) -> Result<Vec<DocVersion>> {
        self.doc.doc_versions(doc_id).await
    }

    /// Fetches one document version with its content.
    pub async fn doc_version(&self, id: u64) -> Result<DocVersionDetail> {
        self.doc.doc_version(id).await
    }

    // ------------------------------------------------------------------
    // Table of contents
    // ------------------------------------------------------------------

    /// Fetches a repository's table of contents as a flat node list.
    pub async fn repo_toc(&self, namespace: &str) -> Result<Vec<TocItem>> {
        self.toc.repo_toc(namespace).await
    }

    /// Applies one mutation to the table of contents; returns the new list.
    pub async fn update_repo_toc(&self, namespace: &str, update: &TocUpdate) -> Result<Vec<TocItem>> {
        self.toc.update_repo_toc(namespace, update).await
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Searches documents or repositories matching `q`.
    pub async fn search(
        &self,
        q: &str,
        kind: SearchType,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>> {
        self.search.search(q, kind, options).await
    }

    // ------------------------------------------------------------------
    // Statistics
    // ------------------------------------------------------------------

    /// Summary statistics for a group.
    pub async fn group_statistics(&self, login: &str) -> Result<Value> {
        self.stats.group_statistics(login).await
    }

    /// Per-member contribution statistics.
    pub async fn group_member_statistics(&self, login: &str, query: &StatsQuery) -> Result<Value> {
        self.stats.group_member_statistics(login, query).await
    }

    /// Per-repository statistics.
    pub async fn group_book_statistics(&self, login: &str, query: &StatsQuery) -> Result<Value> {
        self.stats.group_book_statistics(login, query).await
    }

    /// Per-document statistics, optionally narrowed to one repository.
    pub async fn group_doc_statistics(&self, login: &str, query: &DocStatsQuery) -> Result<Value> {
        self.stats.group_doc_statistics(login, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment manipulation shares process state, so the from_env cases
    // run in one test.
    #[test]
    fn from_env_reads_token_and_optional_base_url() {
        std::env::remove_var(TOKEN_VAR);
        std::env::remove_var(BASE_URL_VAR);
        let err = Yuque::from_env().unwrap_err();
        assert!(matches!(err, ApiError::MissingEnv(var) if var == TOKEN_VAR));

        std::env::set_var(TOKEN_VAR, "env-token");
        let service = Yuque::from_env().unwrap();
        assert_eq!(service.api_token(), "env-token");
        assert_eq!(service.base_url(), DEFAULT_BASE_URL);

        std::env::set_var(BASE_URL_VAR, "https://yuque.internal/api/v2");
        let service = Yuque::from_env().unwrap();
        assert_eq!(service.base_url(), "https://yuque.internal/api/v2");

        std::env::remove_var(TOKEN_VAR);
        std::env::remove_var(BASE_URL_VAR);
    }

    #[test]
    fn construction_seeds_every_client_identically() {
        let service = Yuque::with_base_url("tok", "https://yuque.internal/api/v2").unwrap();
        assert_eq!(service.api_token(), "tok");
        assert_eq!(service.user_client().api_token(), "tok");
        assert_eq!(service.statistics_client().base_url(), "https://yuque.internal/api/v2");
    }
}
