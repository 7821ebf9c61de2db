//! Group (team) operations.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;
use crate::resources::Configurable;
use crate::types::{Envelope, GroupUser};

/// Optional filters for [`GroupClient::group_members`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupMembersQuery {
    /// Membership role to filter by: `0` admin, `1` member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

#[derive(Debug, Serialize)]
struct MemberRole {
    role: u8,
}

/// Payload returned when a member is removed from a group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemovedMember {
    pub user_id: u64,
}

/// Client for the group resource family.
#[derive(Debug)]
pub struct GroupClient {
    transport: ApiClient,
}

impl GroupClient {
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

    /// Lists the members of a group.
    pub async fn group_members(
        &self,
        login: &str,
        query: &GroupMembersQuery,
    ) -> Result<Vec<GroupUser>> {
        Ok(self
            .transport
            .get_query::<Envelope<Vec<GroupUser>>, _>(&format!("/groups/{login}/users"), query)
            .await?
            .data)
    }

    /// Sets a member's role: `0` admin, `1` member.
    pub async fn update_group_member(&self, login: &str, id: &str, role: u8) -> Result<GroupUser> {
        Ok(self
            .transport
            .put::<Envelope<GroupUser>, _>(
                &format!("/groups/{login}/users/{id}"),
                &MemberRole { role },
            )
            .await?
            .data)
    }

    /// Removes a member from a group.
    pub async fn delete_group_member(&self, login: &str, id: &str) -> Result<RemovedMember> {
        Ok(self
            .transport
            .delete::<Envelope<RemovedMember>>(&format!("/groups/{login}/users/{id}"))
            .await?
            .data)
    }
}

impl Configurable for GroupClient {
    fn transport(&self) -> &ApiClient {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn membership_json(role: u8) -> serde_json::Value {
        json!({
            "id": 10,
            "group_id": 5,
            "user_id": 42,
            "role": role,
            "created_at": "2024-01-01T00:00:00.000Z",
            "updated_at": "2024-01-02T00:00:00.000Z"
        })
    }

    #[tokio::test]
    async fn update_member_sends_only_the_role() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/groups/team/users/42"))
            .and(body_json(json!({ "role": 0 })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": membership_json(0) })),
            )
            .mount(&server)
            .await;

        let client = GroupClient::with_base_url("t", &server.uri()).unwrap();
        let member = client.update_group_member("team", "42", 0).await.unwrap();
        assert_eq!(member.role, 0);
    }

    #[tokio::test]
    async fn delete_member_returns_the_removed_id() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/groups/team/users/42"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "user_id": 42 } })),
            )
            .mount(&server)
            .await;

        let client = GroupClient::with_base_url("t", &server.uri()).unwrap();
        let removed = client.delete_group_member("team", "42").await.unwrap();
        assert_eq!(removed.user_id, 42);
    }
}
