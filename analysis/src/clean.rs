//! The individual cleaning stages.
//!
//! Every stage takes the match by value and returns it with rounds removed or
//! frames filtered. No stage creates data, and running a stage on its own
//! output removes nothing.

use common::{Match, Round};

use crate::diagnostics::{Anomaly, Diagnostics};
use crate::options::{CleanOptions, MatchFormat};
use crate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    BadScoring,
    NoFrames,
    ExcessPlayers,
    EndRound,
    Warmups,
    KnifeRounds,
    ExcessKills,
    TimeRounds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageContext {
    pub format: MatchFormat,
    pub min_round_seconds: f64,
}

impl From<&CleanOptions> for StageContext {
    fn from(options: &CleanOptions) -> Self {
        Self {
            format: options.format,
            min_round_seconds: options.min_round_seconds,
        }
    }
}

impl Default for StageContext {
    fn default() -> Self {
        Self::from(&CleanOptions::default())
    }
}

impl Stage {
    /// The only order stages run in.
    pub const ORDER: [Stage; 8] = [
        Stage::BadScoring,
        Stage::NoFrames,
        Stage::ExcessPlayers,
        Stage::EndRound,
        Stage::Warmups,
        Stage::KnifeRounds,
        Stage::ExcessKills,
        Stage::TimeRounds,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::BadScoring => "remove_bad_scoring",
            Self::NoFrames => "remove_rounds_with_no_frames",
            Self::ExcessPlayers => "remove_excess_players",
            Self::EndRound => "remove_end_round",
            Self::Warmups => "remove_warmups",
            Self::KnifeRounds => "remove_knife_rounds",
            Self::ExcessKills => "remove_excess_kill_rounds",
            Self::TimeRounds => "remove_time_rounds",
        }
    }

    pub fn apply(&self, data: Match, ctx: &StageContext, diagnostics: &mut dyn Diagnostics) -> Match {
        let _guard = tracing::debug_span!("Stage", stage = self.name()).entered();
        let before = data.game_rounds.len();

        let data = match self {
            Self::BadScoring => remove_bad_scoring(data, &ctx.format, diagnostics),
            Self::NoFrames => drop_rounds(data, diagnostics, |_, round| {
                round
                    .frames
                    .is_empty()
                    .then_some(Anomaly::NoFrames { round: round.round_num })
            }),
            Self::ExcessPlayers => remove_excess_players(data, diagnostics),
            Self::EndRound => remove_end_round(data, diagnostics),
            Self::Warmups => drop_rounds(data, diagnostics, |data, round| {
                data.is_warmup(round)
                    .then_some(Anomaly::Warmup { round: round.round_num })
            }),
            Self::KnifeRounds => drop_rounds(data, diagnostics, |_, round| {
                round
                    .is_knife()
                    .then_some(Anomaly::KnifeRound { round: round.round_num })
            }),
            Self::ExcessKills => drop_rounds(data, diagnostics, |_, round| {
                validate::has_excess_kills(round).then(|| Anomaly::ExcessKills {
                    round: round.round_num,
                    kills: round.kills.len(),
                    limit: validate::kill_limit(round),
                })
            }),
            Self::TimeRounds => {
                let min_ticks = validate::min_round_ticks(data.tick_rate, ctx.min_round_seconds);
                drop_rounds(data, diagnostics, move |_, round| {
                    (!validate::duration_valid(round, min_ticks)).then_some(Anomaly::BadTiming {
                        round: round.round_num,
                        start_tick: round.start_tick,
                        end_tick: round.end_tick,
                    })
                })
            }
        };

        tracing::debug!(
            "Removed {} of {} rounds",
            before - data.game_rounds.len(),
            before
        );

        data
    }
}

fn drop_rounds<F>(mut data: Match, diagnostics: &mut dyn Diagnostics, mut reject: F) -> Match
where
    F: FnMut(&Match, &Round) -> Option<Anomaly>,
{
    let rounds = std::mem::take(&mut data.game_rounds);

    let mut kept = Vec::with_capacity(rounds.len());
    for round in rounds {
        match reject(&data, &round) {
            Some(anomaly) => diagnostics.record(anomaly),
            None => kept.push(round),
        }
    }

    data.game_rounds = kept;
    data
}

// Each round is checked against the last round that was kept, so a dropped
// round never serves as the predecessor of the next check. Until a scored
// round is kept the expected score is 0-0.
fn remove_bad_scoring(mut data: Match, format: &MatchFormat, diagnostics: &mut dyn Diagnostics) -> Match {
    let rounds = std::mem::take(&mut data.game_rounds);

    let mut kept: Vec<Round> = Vec::with_capacity(rounds.len());
    let mut previous: Option<usize> = None;
    for round in rounds {
        if !validate::is_scored(&data, &round) {
            kept.push(round);
            continue;
        }

        let follows = match previous.map(|idx| &kept[idx]) {
            Some(prev) => validate::score_follows(prev, &round, format),
            None => round.score() == (0, 0),
        };
        if !follows {
            diagnostics.record(Anomaly::BadScoring {
                round: round.round_num,
                expected: previous.map(|idx| kept[idx].next_score()).unwrap_or((0, 0)),
                found: round.score(),
            });
            continue;
        }

        previous = Some(kept.len());
        kept.push(round);
    }

    data.game_rounds = kept;
    data
}

fn remove_excess_players(mut data: Match, diagnostics: &mut dyn Diagnostics) -> Match {
    let rounds = std::mem::take(&mut data.game_rounds);

    data.game_rounds = rounds
        .into_iter()
        .filter_map(|mut round| {
            let before = round.frames.len();
            if before == 0 {
                diagnostics.record(Anomaly::NoFrames { round: round.round_num });
                return None;
            }

            round.frames.retain(validate::frame_is_valid);

            let kept = round.frames.len();
            if kept < before {
                diagnostics.record(Anomaly::InvalidFrames {
                    round: round.round_num,
                    dropped: before - kept,
                    kept,
                });
            }

            (kept > 0).then_some(round)
        })
        .collect();

    data
}

fn remove_end_round(mut data: Match, diagnostics: &mut dyn Diagnostics) -> Match {
    while let Some(last) = data.game_rounds.last() {
        if !last.is_incomplete() {
            break;
        }

        diagnostics.record(Anomaly::IncompleteEnd { round: last.round_num });
        data.game_rounds.pop();
    }

    data
}
