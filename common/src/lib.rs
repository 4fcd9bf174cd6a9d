//! Records produced by the demo parser, one struct per JSON object.
//!
//! Every record keeps the keys it does not model in `extra`, so a match that is
//! read and written again keeps its shape.

use std::collections::BTreeMap;

mod events;
mod frame;
mod round;

pub use events::{BombEvent, Damage, Flash, Grenade, Kill, WeaponFire};
pub use frame::{Frame, TeamState};
pub use round::{Round, RoundEndReason, RoundType, Side, ROUND_END_REASON};

pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Name of the phase entry listing warmup rounds.
pub const WARMUP_PHASE: &str = "warmup";

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Match {
    #[serde(rename = "matchID")]
    pub match_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub client_name: String,
    pub server_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub map_name: String,
    pub tick_rate: u32,
    pub playback_ticks: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub parser_parameters: ParserParameters,
    #[serde(deserialize_with = "null_as_default")]
    pub game_rounds: Vec<Round>,
    #[serde(deserialize_with = "deserialize_phases")]
    pub match_phases: BTreeMap<String, Vec<u32>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// The parser writes empty lists and objects as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    let value: Option<T> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Phases that never happened are `null` and read as an empty round list.
fn deserialize_phases<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<u32>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<Vec<u32>>>> =
        serde::Deserialize::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(phase, rounds)| (phase, rounds.unwrap_or_default()))
        .collect())
}

impl Match {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn is_warmup(&self, round: &Round) -> bool {
        round.is_warmup
            || self
                .match_phases
                .get(WARMUP_PHASE)
                .map(|rounds| rounds.contains(&round.round_num))
                .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuyStyle {
    #[default]
    Hltv,
    Csgo,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserParameters {
    pub parse_rate: u32,
    pub parse_frames: bool,
    pub parse_kill_frames: bool,
    pub trade_time: u32,
    pub round_buy_style: BuyStyle,
    pub damages_rolled_up: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for ParserParameters {
    fn default() -> Self {
        Self {
            parse_rate: 128,
            parse_frames: true,
            parse_kill_frames: false,
            trade_time: 5,
            round_buy_style: BuyStyle::Hltv,
            damages_rolled_up: false,
            extra: Extra::new(),
        }
    }
}
