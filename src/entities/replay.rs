use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::entities::Tag;
use crate::utils::{nullable_vec, Client, NetResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Replay {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub game_mode: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub tags: Vec<Tag>,
}

impl Replay {
    /// Page of this replay on the site that serves `api_base`.
    ///
    /// The site lives one level above the API, so a trailing `/api` segment
    /// is dropped.
    pub fn web_url(&self, api_base: &str) -> String {
        let base = api_base.trim_end_matches('/');
        let site = base.strip_suffix("/api").unwrap_or(base);
        format!("{site}/replays/{}", self.id)
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub async fn load(id: &str, client: &Client) -> NetResult<Self> {
        info!("Fetching replay {id}...");
        client
            .get(client.endpoint(&["replay", id]))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn add_tag(
        replay_id: &str,
        tag_name: &str,
        client: &Client,
    ) -> NetResult<()> {
        info!("Tagging replay {replay_id} with {tag_name:?}...");
        client
            .put(client.endpoint(&["replay", replay_id, "tag", tag_name]))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn remove_tag(
        replay_id: &str,
        tag_name: &str,
        client: &Client,
    ) -> NetResult<()> {
        info!("Removing tag {tag_name:?} from replay {replay_id}...");
        client
            .delete(client.endpoint(&["replay", replay_id, "tag", tag_name]))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_null_tags() {
        let replay: Replay = serde_json::from_str(
            r#"{"id": "abc", "name": "Ranked 3s", "gameMode": "3's", "tags": null}"#,
        )
        .expect("valid replay");
        assert!(replay.tags.is_empty());
        assert_eq!(replay.game_mode.as_deref(), Some("3's"));
        assert_eq!(replay.date, None);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let replay: Replay =
            serde_json::from_str(r#"{"id": "abc"}"#).expect("valid replay");
        assert_eq!(replay.display_name(), "abc");
    }

    #[test]
    fn test_web_url_follows_api_base() {
        let replay: Replay =
            serde_json::from_str(r#"{"id": "abc"}"#).expect("valid replay");
        assert_eq!(
            replay.web_url(Client::DEFAULT_BASE_URL),
            "https://calculated.gg/replays/abc"
        );
        assert_eq!(
            replay.web_url("http://localhost:5000/api/"),
            "http://localhost:5000/replays/abc"
        );
        assert_eq!(
            replay.web_url("https://staging.example.org"),
            "https://staging.example.org/replays/abc"
        );
    }
}
