use crate::error::{CleanError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
    #[default]
    #[serde(alias = "json")]
    Structured,
    #[serde(alias = "df")]
    Tabular,
}

impl std::str::FromStr for ReturnType {
    type Err = CleanError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "structured" | "json" => Ok(Self::Structured),
            "tabular" | "df" => Ok(Self::Tabular),
            other => Err(CleanError::InvalidReturnType(other.to_owned())),
        }
    }
}

/// Round counts of the competitive format, used to find side switches and to
/// split rounds into phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchFormat {
    pub max_rounds: u32,
    pub overtime_rounds: u32,
}

impl Default for MatchFormat {
    fn default() -> Self {
        Self {
            max_rounds: 30,
            overtime_rounds: 6,
        }
    }
}

impl MatchFormat {
    /// Whether teams switch sides before the round played after `rounds_played`
    /// decided rounds. Overtime starts on the sides regulation ended with and
    /// switches only at the half of each overtime.
    pub fn is_side_switch(&self, rounds_played: u32) -> bool {
        if rounds_played == 0 {
            return false;
        }
        if rounds_played == self.max_rounds / 2 {
            return true;
        }
        if rounds_played <= self.max_rounds || self.overtime_rounds < 2 {
            return false;
        }
        (rounds_played - self.max_rounds) % self.overtime_rounds == self.overtime_rounds / 2
    }

    /// Overtime number of the round played after `rounds_played` rounds, 0 for
    /// regulation.
    pub fn overtime(&self, rounds_played: u32) -> u32 {
        if rounds_played < self.max_rounds || self.overtime_rounds == 0 {
            return 0;
        }
        (rounds_played - self.max_rounds) / self.overtime_rounds + 1
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanOptions {
    pub remove_bad_scoring: bool,
    pub remove_no_frames: bool,
    pub remove_excess_players: bool,
    pub remove_end_round: bool,
    pub remove_warmups: bool,
    pub remove_knife_rounds: bool,
    pub remove_excess_kills: bool,
    pub remove_time_rounds: bool,
    pub return_type: ReturnType,
    pub min_round_seconds: f64,
    pub format: MatchFormat,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            remove_bad_scoring: true,
            remove_no_frames: true,
            remove_excess_players: true,
            remove_end_round: true,
            remove_warmups: true,
            remove_knife_rounds: true,
            remove_excess_kills: true,
            remove_time_rounds: true,
            return_type: ReturnType::Structured,
            min_round_seconds: 1.0,
            format: MatchFormat::default(),
        }
    }
}

impl CleanOptions {
    /// Options with every stage switched off.
    pub fn none() -> Self {
        Self {
            remove_bad_scoring: false,
            remove_no_frames: false,
            remove_excess_players: false,
            remove_end_round: false,
            remove_warmups: false,
            remove_knife_rounds: false,
            remove_excess_kills: false,
            remove_time_rounds: false,
            ..Self::default()
        }
    }

    pub fn from_json(input: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(input)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_round_seconds.is_finite() || self.min_round_seconds < 0.0 {
            return Err(CleanError::InvalidOption {
                name: "min_round_seconds",
                reason: format!("must be a non-negative number, got {}", self.min_round_seconds),
            });
        }
        if self.format.max_rounds == 0 || self.format.max_rounds % 2 != 0 {
            return Err(CleanError::InvalidOption {
                name: "format.max_rounds",
                reason: format!("must be a positive even number, got {}", self.format.max_rounds),
            });
        }
        if self.format.overtime_rounds % 2 != 0 {
            return Err(CleanError::InvalidOption {
                name: "format.overtime_rounds",
                reason: format!("must be an even number, got {}", self.format.overtime_rounds),
            });
        }
        Ok(())
    }

    pub fn stages(&self) -> Vec<crate::clean::Stage> {
        use crate::clean::Stage;

        Stage::ORDER
            .into_iter()
            .filter(|stage| match stage {
                Stage::BadScoring => self.remove_bad_scoring,
                Stage::NoFrames => self.remove_no_frames,
                Stage::ExcessPlayers => self.remove_excess_players,
                Stage::EndRound => self.remove_end_round,
                Stage::Warmups => self.remove_warmups,
                Stage::KnifeRounds => self.remove_knife_rounds,
                Stage::ExcessKills => self.remove_excess_kills,
                Stage::TimeRounds => self.remove_time_rounds,
            })
            .collect()
    }
}
