//! User operations.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::resources::Configurable;
use crate::types::{Doc, Envelope, Group, User};

/// Optional filters for [`UserClient::user_groups`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserGroupsQuery {
    /// Membership role to filter by: `0` admin, `1` member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Client for the user resource family.
#[derive(Debug)]
pub struct UserClient {
    transport: ApiClient,
}

impl UserClient {
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

    /// Fetches the authenticated user.
    pub async fn current_user(&self) -> Result<User> {
        Ok(self.transport.get::<Envelope<User>>("/user").await?.data)
    }

    /// Lists the authenticated user's documents.
    pub async fn user_docs(&self) -> Result<Vec<Doc>> {
        Ok(self
            .transport
            .get::<Envelope<Vec<Doc>>>("/user/docs")
            .await?
            .data)
    }

    /// Lists the groups a user belongs to.
    pub async fn user_groups(&self, id: &str, query: &UserGroupsQuery) -> Result<Vec<Group>> {
        Ok(self
            .transport
            .get_query::<Envelope<Vec<Group>>, _>(&format!("/users/{id}/groups"), query)
            .await?
            .data)
    }
}

impl Configurable for UserClient {
    fn transport(&self) -> &ApiClient {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user_json(login: &str) -> serde_json::Value {
        json!({
            "id": 1,
            "login": login,
            "name": "Tester",
            "description": "",
            "avatar_url": "https://cdn.example.com/a.png",
            "created_at": "2024-01-01T00:00:00.000Z",
            "updated_at": "2024-01-02T00:00:00.000Z"
        })
    }

    #[tokio::test]
    async fn current_user_unwraps_the_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": user_json("tester") })),
            )
            .mount(&server)
            .await;

        let client = UserClient::with_base_url("t", &server.uri()).unwrap();
        let user = client.current_user().await.unwrap();
        assert_eq!(user.login, "tester");
    }

    #[tokio::test]
    async fn default_query_sends_no_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/42/groups"))
            .and(query_param_is_missing("role"))
            .and(query_param_is_missing("offset"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let client = UserClient::with_base_url("t", &server.uri()).unwrap();
        let groups = client
            .user_groups("42", &UserGroupsQuery::default())
            .await
            .unwrap();
        assert!(groups.is_empty());
    }

    #[tokio::test]
    async fn set_filters_appear_in_the_query_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/42/groups"))
            .and(query_param("role", "1"))
            .and(query_param("offset", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let client = UserClient::with_base_url("t", &server.uri()).unwrap();
        let query = UserGroupsQuery {
            role: Some(1),
            offset: Some(20),
        };
        client.user_groups("42", &query).await.unwrap();
    }
}
