//! Document operations.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::resources::Configurable;
use crate::types::{Doc, DocFormat, DocVersion, DocVersionDetail, Envelope};

/// Optional filters for [`DocClient::repo_docs`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Comma-separated extra fields to include, e.g. `hits,tags`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_properties: Option<String>,
}

/// Optional paging for [`DocClient::doc`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Body for creating a document.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDoc {
    pub title: String,
    pub slug: String,
    /// Visibility level: `0` private, `1` public.
    pub public: u8,
    pub format: DocFormat,
    pub body: String,
}

impl CreateDoc {
    /// A public markdown document with the given title, slug, and body.
    pub fn new(title: impl Into<String>, slug: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            public: 1,
            format: DocFormat::default(),
            body: body.into(),
        }
    }
}

/// Partial update for an existing document; unset fields are untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DocFormat>,
}

#[derive(Debug, Serialize)]
struct VersionsQuery {
    doc_id: u64,
}

/// Client for the document resource family.
#[derive(Debug)]
pub struct DocClient {
    transport: ApiClient,
}

impl DocClient {
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

    /// Lists the documents in a repository.
    pub async fn repo_docs(&self, namespace: &str, query: &DocListQuery) -> Result<Vec<Doc>> {
        Ok(self
            .transport
            .get_query::<Envelope<Vec<Doc>>, _>(&format!("/repos/{namespace}/docs"), query)
            .await?
            .data)
    }

    /// Fetches a single document by slug.
    ///
    /// The raw-content fields (`body_lake`, `body_draft`, `body_html`) are
    /// dropped from the result; they multiply the payload size and callers
    /// wanting rendered output re-render from `body`.
    pub async fn doc(&self, namespace: &str, slug: &str, query: &DocQuery) -> Result<Doc> {
        let mut doc = self
            .transport
            .get_query::<Envelope<Doc>, _>(&format!("/repos/{namespace}/docs/{slug}"), query)
            .await?
            .data;
        doc.body_lake = None;
        doc.body_draft = None;
        doc.body_html = None;
        Ok(doc)
    }

    /// Creates a document in a repository.
    pub async fn create_doc(&self, namespace: &str, doc: &CreateDoc) -> Result<Doc> {
        Ok(self
            .transport
            .post::<Envelope<Doc>, _>(&format!("/repos/{namespace}/docs"), doc)
            .await?
            .data)
    }

    /// Updates a document by numeric id.
    pub async fn update_doc(&self, namespace: &str, id: u64, update: &UpdateDoc) -> Result<Doc> {
        Ok(self
            .transport
            .put::<Envelope<Doc>, _>(&format!("/repos/{namespace}/docs/{id}"), update)
            .await?
            .data)
    }

    /// Deletes a document by numeric id. Returns the deleted record.
    pub async fn delete_doc(&self, namespace: &str, id: u64) -> Result<Doc> {
        Ok(self
            .transport
            .delete::<Envelope<Doc>>(&format!("/repos/{namespace}/docs/{id}"))
            .await?
            .data)
    }

    /// Lists the saved versions of a document.
    pub async fn doc_versions(&self, doc_id: u64) -> Result<Vec<DocVersion>> {
        Ok(self
            .transport
            .get_query::<Envelope<Vec<DocVersion>>, _>("/doc_versions", &VersionsQuery { doc_id })
            .await?
            .data)
    }

    /// Fetches one document version with its content.
    pub async fn doc_version(&self, id: u64) -> Result<DocVersionDetail> {
        Ok(self
            .transport
            .get::<Envelope<DocVersionDetail>>(&format!("/doc_versions/{id}"))
            .await?
            .data)
    }
}

impl Configurable for DocClient {
    fn transport(&self) -> &ApiClient {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn doc_json() -> serde_json::Value {
        json!({
            "id": 99,
            "slug": "release-notes",
            "title": "Release notes",
            "description": "",
            "user_id": 1,
            "book_id": 3,
            "format": "markdown",
            "public": 1,
            "status": 1,
            "likes_count": 0,
            "comments_count": 0,
            "content_updated_at": "2024-03-01T00:00:00.000Z",
            "created_at": "2024-01-01T00:00:00.000Z",
            "updated_at": "2024-03-01T00:00:00.000Z",
            "word_count": 120
        })
    }

    #[tokio::test]
    async fn doc_strips_raw_content_fields() {
        let server = MockServer::start().await;
        let mut body = doc_json();
        body["body"] = json!("# Release notes");
        body["body_html"] = json!("<h1>Release notes</h1>");
        body["body_lake"] = json!("<!doctype lake>…");
        body["body_draft"] = json!("# Release notes (draft)");
        Mock::given(method("GET"))
            .and(path("/repos/me/handbook/docs/release-notes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": body })))
            .mount(&server)
            .await;

        let client = DocClient::with_base_url("t", &server.uri()).unwrap();
        let doc = client
            .doc("me/handbook", "release-notes", &DocQuery::default())
            .await
            .unwrap();
        assert_eq!(doc.body.as_deref(), Some("# Release notes"));
        assert!(doc.body_html.is_none());
        assert!(doc.body_lake.is_none());
        assert!(doc.body_draft.is_none());
    }

    #[tokio::test]
    async fn doc_without_raw_content_fields_is_fine() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/me/handbook/docs/release-notes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": doc_json() })))
            .mount(&server)
            .await;

        let client = DocClient::with_base_url("t", &server.uri()).unwrap();
        let doc = client
            .doc("me/handbook", "release-notes", &DocQuery::default())
            .await
            .unwrap();
        assert!(doc.body.is_none());
        assert!(doc.body_html.is_none());
    }

    #[tokio::test]
    async fn create_doc_defaults_to_public_markdown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/me/handbook/docs"))
            .and(body_json(json!({
                "title": "Notes",
                "slug": "notes",
                "public": 1,
                "format": "markdown",
                "body": "hello"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": doc_json() })))
            .mount(&server)
            .await;

        let client = DocClient::with_base_url("t", &server.uri()).unwrap();
        client
            .create_doc("me/handbook", &CreateDoc::new("Notes", "notes", "hello"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn doc_versions_pass_the_id_as_a_query_parameter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc_versions"))
            .and(query_param("doc_id", "99"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let client = DocClient::with_base_url("t", &server.uri()).unwrap();
        let versions = client.doc_versions(99).await.unwrap();
        assert!(versions.is_empty());
    }
}
