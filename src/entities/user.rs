use log::info;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::utils::{Client, NetResult};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedInUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_link: Option<String>,
}

impl LoggedInUser {
    /// Returns `None` for anonymous sessions.
    pub async fn load(client: &Client) -> NetResult<Option<Self>> {
        info!("Fetching current user...");
        let rsp = client.get(client.endpoint(&["me"])).send().await?;
        if matches!(rsp.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        {
            info!("No user logged in.");
            return Ok(None);
        }
        rsp.error_for_status()?.json().await.map(Some)
    }
}
