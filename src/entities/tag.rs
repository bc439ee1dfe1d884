use log::info;
use serde::{Deserialize, Serialize};

use crate::utils::{Client, NetResult};

/// A user-defined label. Tags are identified by name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: None,
        }
    }

    pub async fn load_all(client: &Client) -> NetResult<Vec<Self>> {
        info!("Fetching user tags...");
        client
            .get(client.endpoint(&["tag"]))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn create(name: &str, client: &Client) -> NetResult<Self> {
        info!("Creating tag {name:?}...");
        client
            .put(client.endpoint(&["tag", name]))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn delete(name: &str, client: &Client) -> NetResult<()> {
        info!("Deleting tag {name:?}...");
        client
            .delete(client.endpoint(&["tag", name]))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

pub trait TagList {
    fn has_tag(&self, name: &str) -> bool;
}

impl TagList for [Tag] {
    fn has_tag(&self, name: &str) -> bool {
        self.iter().any(|t| t.name == name)
    }
}
