use crate::{null_as_default, Extra, Side};

/// Player snapshots of one side. `players` is `None` when the parser saw no
/// team entity for that side in this frame.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamState {
    pub team_name: Option<String>,
    pub alive_players: Option<u32>,
    pub players: Option<Vec<serde_json::Value>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl TeamState {
    pub fn player_count(&self) -> Option<usize> {
        self.players.as_ref().map(|p| p.len())
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Frame {
    pub tick: i64,
    pub seconds: f64,
    pub bomb_planted: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub ct: TeamState,
    #[serde(deserialize_with = "null_as_default")]
    pub t: TeamState,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Frame {
    pub fn side(&self, side: Side) -> &TeamState {
        match side {
            Side::Ct => &self.ct,
            Side::T => &self.t,
        }
    }
}
