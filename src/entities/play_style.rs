use lazy_static::lazy_static;
use log::{debug, info};
use reqwest::Request;
use serde::{Deserialize, Serialize};

use crate::utils::{Client, NetResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataPoint {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub average: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayStyleChartData {
    pub title: String,
    pub spoke_data: Vec<ChartDataPoint>,
}

/// Aggregated play style of a player, grouped into radar charts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayStyleResponse {
    pub chart_datas: Vec<PlayStyleChartData>,
    #[serde(default)]
    pub show_warning: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub name: String,
    pub average: f64,
}

/// Per-stat averages without grouping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayStyleRawResponse {
    pub name: String,
    pub data_points: Vec<DataPoint>,
}

#[derive(Serialize)]
struct PlayStyleQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    playlist: Option<u32>,
}

fn spoke(name: &str, value: f64, average: f64) -> ChartDataPoint {
    ChartDataPoint {
        name: name.to_owned(),
        value,
        average: Some(average),
    }
}

lazy_static! {
    static ref MOCK_PLAY_STYLE: PlayStyleResponse = PlayStyleResponse {
        chart_datas: vec![
            PlayStyleChartData {
                title: "Aggressiveness".to_owned(),
                spoke_data: vec![
                    spoke("Shots", 0.62, 0.5),
                    spoke("Time in attacking half", 0.55, 0.5),
                    spoke("Time behind ball", 0.41, 0.5),
                ],
            },
            PlayStyleChartData {
                title: "Possession".to_owned(),
                spoke_data: vec![
                    spoke("Possession time", 0.48, 0.5),
                    spoke("Turnovers", 0.37, 0.5),
                    spoke("Dribbles", 0.58, 0.5),
                ],
            },
        ],
        show_warning: false,
    };
    static ref MOCK_PLAY_STYLE_RAW: PlayStyleRawResponse =
        PlayStyleRawResponse {
            name: "Mock player".to_owned(),
            data_points: vec![
                DataPoint {
                    name: "score".to_owned(),
                    average: 412.3,
                },
                DataPoint {
                    name: "goals".to_owned(),
                    average: 0.84,
                },
                DataPoint {
                    name: "boost usage".to_owned(),
                    average: 1208.0,
                },
            ],
        };
}

impl PlayStyleResponse {
    pub fn request(
        client: &Client,
        player_id: &str,
        rank: Option<u32>,
        playlist: Option<u32>,
    ) -> NetResult<Request> {
        client
            .get(client.endpoint(&["player", player_id, "play_style"]))
            .query(&PlayStyleQuery { rank, playlist })
            .build()
    }

    pub async fn load(
        client: &Client,
        player_id: &str,
        rank: Option<u32>,
        playlist: Option<u32>,
    ) -> NetResult<Self> {
        if client.use_mock_data() {
            debug!("Serving mock play style for {player_id}.");
            return Ok(MOCK_PLAY_STYLE.clone());
        }
        info!("Fetching play style for {player_id}...");
        let request = Self::request(client, player_id, rank, playlist)?;
        client.execute(request).await?.error_for_status()?.json().await
    }
}

impl PlayStyleRawResponse {
    pub fn request(
        client: &Client,
        player_id: &str,
        playlist: Option<u32>,
    ) -> NetResult<Request> {
        client
            .get(client.endpoint(&["player", player_id, "play_style", "all"]))
            .query(&PlayStyleQuery {
                rank: None,
                playlist,
            })
            .build()
    }

    pub async fn load(
        client: &Client,
        player_id: &str,
        playlist: Option<u32>,
    ) -> NetResult<Self> {
        if client.use_mock_data() {
            debug!("Serving mock raw play style for {player_id}.");
            return Ok(MOCK_PLAY_STYLE_RAW.clone());
        }
        info!("Fetching raw play style for {player_id}...");
        let request = Self::request(client, player_id, playlist)?;
        client.execute(request).await?.error_for_status()?.json().await
    }
}
