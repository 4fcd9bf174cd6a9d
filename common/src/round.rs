use crate::{null_as_default, BombEvent, Damage, Extra, Flash, Frame, Grenade, Kill, WeaponFire};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Ct,
    T,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ct => "CT",
            Self::T => "T",
        }
    }

    pub fn opponent(&self) -> Self {
        match self {
            Self::Ct => Self::T,
            Self::T => Self::Ct,
        }
    }
}

impl serde::Serialize for Side {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

// The parser writes "CT"/"T", older outputs and hand written fixtures use
// lowercase, and an unfinished round carries an empty string.
fn deserialize_side<'de, D>(deserializer: D) -> Result<Option<Side>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("ct") => Ok(Some(Side::Ct)),
        Some(s) if s.eq_ignore_ascii_case("t") => Ok(Some(Side::T)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "unknown side {:?}, expected \"CT\" or \"T\"",
            other
        ))),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundType {
    #[default]
    Regular,
    Knife,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoundEndReason {
    #[default]
    Unset,
    TargetBombed,
    BombDefused,
    CTWin,
    TerroristsWin,
    TargetSaved,
    CTSurrender,
    TerroristsSurrender,
    HostagesRescued,
    HostagesNotRescued,
    Draw,
    Unknown,
    Other(String),
}

pub static ROUND_END_REASON: phf::Map<&'static str, RoundEndReason> = phf::phf_map! {
    "" => RoundEndReason::Unset,
    "TargetBombed" => RoundEndReason::TargetBombed,
    "BombDefused" => RoundEndReason::BombDefused,
    "CTWin" => RoundEndReason::CTWin,
    "TerroristsWin" => RoundEndReason::TerroristsWin,
    "TargetSaved" => RoundEndReason::TargetSaved,
    "CTSurrender" => RoundEndReason::CTSurrender,
    "TerroristsSurrender" => RoundEndReason::TerroristsSurrender,
    "HostagesRescued" => RoundEndReason::HostagesRescued,
    "HostagesNotRescued" => RoundEndReason::HostagesNotRescued,
    "Draw" => RoundEndReason::Draw,
    "Unknown" => RoundEndReason::Unknown,
};

impl RoundEndReason {
    pub fn parse(raw: &str) -> Self {
        ROUND_END_REASON
            .get(raw)
            .cloned()
            .unwrap_or_else(|| Self::Other(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unset => "",
            Self::TargetBombed => "TargetBombed",
            Self::BombDefused => "BombDefused",
            Self::CTWin => "CTWin",
            Self::TerroristsWin => "TerroristsWin",
            Self::TargetSaved => "TargetSaved",
            Self::CTSurrender => "CTSurrender",
            Self::TerroristsSurrender => "TerroristsSurrender",
            Self::HostagesRescued => "HostagesRescued",
            Self::HostagesNotRescued => "HostagesNotRescued",
            Self::Draw => "Draw",
            Self::Unknown => "Unknown",
            Self::Other(s) => s.as_str(),
        }
    }

    /// The side that wins a round ending this way.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Self::TargetBombed | Self::TerroristsWin | Self::CTSurrender | Self::HostagesNotRescued => {
                Some(Side::T)
            }
            Self::BombDefused
            | Self::CTWin
            | Self::TargetSaved
            | Self::TerroristsSurrender
            | Self::HostagesRescued => Some(Side::Ct),
            Self::Unset | Self::Draw | Self::Unknown | Self::Other(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Unset | Self::Draw | Self::Unknown)
    }
}

impl serde::Serialize for RoundEndReason {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for RoundEndReason {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Option<String> = serde::Deserialize::deserialize(deserializer)?;
        Ok(raw.map(|r| Self::parse(&r)).unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Round {
    pub round_num: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_round_num: Option<u32>,
    pub is_warmup: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_type: Option<RoundType>,
    pub start_tick: i64,
    pub freeze_time_end_tick: i64,
    pub end_tick: i64,
    pub end_official_tick: i64,
    pub ct_score: u32,
    pub t_score: u32,
    #[serde(rename = "endCTScore", skip_serializing_if = "Option::is_none")]
    pub end_ct_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_t_score: Option<u32>,
    pub ct_team: Option<String>,
    pub t_team: Option<String>,
    #[serde(deserialize_with = "deserialize_side")]
    pub winning_side: Option<Side>,
    pub round_end_reason: RoundEndReason,
    #[serde(deserialize_with = "null_as_default")]
    pub kills: Vec<Kill>,
    #[serde(deserialize_with = "null_as_default")]
    pub damages: Vec<Damage>,
    #[serde(deserialize_with = "null_as_default")]
    pub grenades: Vec<Grenade>,
    #[serde(deserialize_with = "null_as_default")]
    pub flashes: Vec<Flash>,
    #[serde(deserialize_with = "null_as_default")]
    pub weapon_fires: Vec<WeaponFire>,
    #[serde(deserialize_with = "null_as_default")]
    pub bomb_events: Vec<BombEvent>,
    #[serde(deserialize_with = "null_as_default")]
    pub frames: Vec<Frame>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Round {
    pub fn winner(&self) -> Option<Side> {
        self.winning_side.or_else(|| self.round_end_reason.winner())
    }

    /// A round that stopped before it was decided, usually because the
    /// recording was cut.
    pub fn is_incomplete(&self) -> bool {
        self.winner().is_none() || !self.round_end_reason.is_terminal()
    }

    pub fn is_knife(&self) -> bool {
        match self.round_type {
            Some(RoundType::Knife) => true,
            Some(RoundType::Regular) => false,
            None => !self.kills.is_empty() && self.kills.iter().all(Kill::is_knife),
        }
    }

    pub fn score(&self) -> (u32, u32) {
        (self.ct_score, self.t_score)
    }

    /// Score the following round should start with.
    pub fn next_score(&self) -> (u32, u32) {
        match self.winner() {
            Some(Side::Ct) => (self.ct_score.saturating_add(1), self.t_score),
            Some(Side::T) => (self.ct_score, self.t_score.saturating_add(1)),
            None => self.score(),
        }
    }
}
