use crate::api::client::SlackClient;
use crate::api::models::{AuthInfo, Team};
use crate::api::params::Params;
use crate::api::transport::Transport;
use crate::error::ApiError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TeamResponse {
    team: Team,
}

impl<T: Transport> SlackClient<T> {
    pub async fn get_team_info(&self) -> Result<Team, ApiError> {
        let response: TeamResponse = self.get("team.info", Params::new()).await?;
        Ok(response.team)
    }

    /// Checks the token and reports who it belongs to.
    pub async fn auth_test(&self) -> Result<AuthInfo, ApiError> {
        self.post("auth.test", Params::new()).await
    }
}
