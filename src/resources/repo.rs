//! Repository (knowledge base) operations.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::resources::Configurable;
use crate::types::{Envelope, Repo};

/// Optional filters for the repository listings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepoListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Repository kind filter, e.g. `Book`. Passed through as-is.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Body for creating a repository under a user or group.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepo {
    pub name: String,
    pub slug: String,
    /// Visibility level: `0` private, `1` public, `2` space members.
    pub public: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enhancedPrivacy", skip_serializing_if = "Option::is_none")]
    pub enhanced_privacy: Option<bool>,
}

impl CreateRepo {
    /// A private repository with the given name and slug.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            public: 0,
            description: None,
            enhanced_privacy: None,
        }
    }
}

/// Partial update for an existing repository; unset fields are untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRepo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<u8>,
    /// Replacement table of contents in YAML form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toc: Option<String>,
}

/// Client for the repository resource family.
#[derive(Debug)]
pub struct RepoClient {
    transport: ApiClient,
}

impl RepoClient {
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

    /// Lists the repositories owned by a user.
    pub async fn user_repos(&self, login: &str, query: &RepoListQuery) -> Result<Vec<Repo>> {
        self.repos(&format!("/users/{login}/repos"), query).await
    }

    /// Lists the repositories owned by a group.
    pub async fn group_repos(&self, login: &str, query: &RepoListQuery) -> Result<Vec<Repo>> {
        self.repos(&format!("/groups/{login}/repos"), query).await
    }

    async fn repos(&self, route: &str, query: &RepoListQuery) -> Result<Vec<Repo>> {
        Ok(self
            .transport
            .get_query::<Envelope<Vec<Repo>>, _>(route, query)
            .await?
            .data)
    }

    /// Fetches a repository by its `owner/slug` namespace.
    pub async fn repo(&self, namespace: &str) -> Result<Repo> {
        Ok(self
            .transport
            .get::<Envelope<Repo>>(&format!("/repos/{namespace}"))
            .await?
            .data)
    }

    /// Creates a repository under a user.
    pub async fn create_repo(&self, login: &str, repo: &CreateRepo) -> Result<Repo> {
        Ok(self
            .transport
            .post::<Envelope<Repo>, _>(&format!("/users/{login}/repos"), repo)
            .await?
            .data)
    }

    /// Creates a repository under a group.
    pub async fn create_group_repo(&self, login: &str, repo: &CreateRepo) -> Result<Repo> {
        Ok(self
            .transport
            .post::<Envelope<Repo>, _>(&format!("/groups/{login}/repos"), repo)
            .await?
            .data)
    }

    /// Updates a repository in place.
    pub async fn update_repo(&self, namespace: &str, update: &UpdateRepo) -> Result<Repo> {
        Ok(self
            .transport
            .put::<Envelope<Repo>, _>(&format!("/repos/{namespace}"), update)
            .await?
            .data)
    }

    /// Deletes a repository. Returns the deleted record.
    pub async fn delete_repo(&self, namespace: &str) -> Result<Repo> {
        Ok(self
            .transport
            .delete::<Envelope<Repo>>(&format!("/repos/{namespace}"))
            .await?
            .data)
    }
}

impl Configurable for RepoClient {
    fn transport(&self) -> &ApiClient {
        &self.transport
    }
}
