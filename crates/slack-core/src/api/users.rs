use crate::api::client::SlackClient;
use crate::api::models::User;
use crate::api::pagination::{Page, Paged, ResponseMetadata};
use crate::api::params::Params;
use crate::api::transport::Transport;
use crate::error::ApiError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct UserResponse {
    user: User,
}

#[derive(Debug, Deserialize)]
struct UserListPage {
    #[serde(default)]
    members: Vec<User>,
    response_metadata: Option<ResponseMetadata>,
}

impl Paged for UserListPage {
    type Item = User;

    fn into_page(self) -> Page<User> {
        Page::new(self.members, self.response_metadata)
    }
}

impl<T: Transport> SlackClient<T> {
    pub async fn get_user_info(&self, user: &str) -> Result<User, ApiError> {
        let response: UserResponse = self
            .get("users.info", Params::new().with("user", user))
            .await?;
        Ok(response.user)
    }

    pub async fn list_users(&self, limit: u32) -> Result<Vec<User>, ApiError> {
        self.paginate::<UserListPage>("users.list", Params::new().with("limit", limit))
            .await
    }
}
