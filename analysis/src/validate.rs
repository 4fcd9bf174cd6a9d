//! Read-only consistency checks over the rounds of a match.

use common::{Frame, Match, Round, TeamState};

use crate::options::{CleanOptions, MatchFormat};

pub const MAX_PLAYERS_PER_SIDE: usize = 5;

/// Kill limit for rounds without any player snapshot.
pub const DEFAULT_KILL_LIMIT: usize = 2 * MAX_PLAYERS_PER_SIDE;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundAnnotation {
    pub round_num: u32,
    pub has_frames: bool,
    pub player_count_valid: bool,
    pub valid_frames: usize,
    pub score_consistent: bool,
    pub duration_valid: bool,
    pub incomplete: bool,
    pub warmup: bool,
    pub knife: bool,
    pub excess_kills: bool,
}

fn side_in_bounds(team: &TeamState) -> bool {
    matches!(team.player_count(), Some(1..=MAX_PLAYERS_PER_SIDE))
}

fn side_overfull(team: &TeamState) -> bool {
    team.player_count().map(|c| c > MAX_PLAYERS_PER_SIDE).unwrap_or(false)
}

/// A frame is kept when no side is overfull and at least one side has a
/// playable number of players.
pub fn frame_is_valid(frame: &Frame) -> bool {
    if side_overfull(&frame.ct) || side_overfull(&frame.t) {
        return false;
    }
    side_in_bounds(&frame.ct) || side_in_bounds(&frame.t)
}

pub fn kill_limit(round: &Round) -> usize {
    let seen = round
        .frames
        .iter()
        .map(|f| f.ct.player_count().unwrap_or(0) + f.t.player_count().unwrap_or(0))
        .max()
        .unwrap_or(0);

    if seen == 0 {
        DEFAULT_KILL_LIMIT
    } else {
        seen
    }
}

pub fn has_excess_kills(round: &Round) -> bool {
    round.kills.len() > kill_limit(round)
}

pub fn min_round_ticks(tick_rate: u32, min_round_seconds: f64) -> i64 {
    (min_round_seconds * tick_rate as f64).ceil() as i64
}

pub fn duration_valid(round: &Round, min_ticks: i64) -> bool {
    let freeze_end = round.freeze_time_end_tick;
    let official_end = round.end_official_tick;

    if freeze_end != 0 && (round.start_tick > freeze_end || freeze_end > round.end_tick) {
        return false;
    }
    if official_end != 0 && round.end_tick > official_end {
        return false;
    }

    round.end_tick.saturating_sub(round.start_tick) > min_ticks
}

/// Warmup and knife rounds are never scored, so they neither get checked nor
/// serve as the previous round of a check.
pub fn is_scored(data: &Match, round: &Round) -> bool {
    !data.is_warmup(round) && !round.is_knife()
}

/// Whether `round` starts with the score `previous` should leave behind.
/// Teams switching sides swap the two scores.
pub fn score_follows(previous: &Round, round: &Round, format: &MatchFormat) -> bool {
    let (ct, t) = previous.next_score();
    if round.score() == (ct, t) {
        return true;
    }

    format.is_side_switch(ct.saturating_add(t)) && round.score() == (t, ct)
}

/// Annotates every round against its raw predecessor. Nothing is removed, so
/// a single bad round also marks its successor.
#[tracing::instrument(skip_all, fields(rounds = data.game_rounds.len()))]
pub fn annotate(data: &Match, options: &CleanOptions) -> Vec<RoundAnnotation> {
    let min_ticks = min_round_ticks(data.tick_rate, options.min_round_seconds);

    let mut previous: Option<&Round> = None;
    let mut annotations = Vec::with_capacity(data.game_rounds.len());
    for round in data.game_rounds.iter() {
        let scored = is_scored(data, round);
        let score_consistent = match (scored, previous) {
            (false, _) => true,
            (true, None) => round.score() == (0, 0),
            (true, Some(prev)) => score_follows(prev, round, &options.format),
        };
        if scored {
            previous = Some(round);
        }

        let valid_frames = round.frames.iter().filter(|f| frame_is_valid(f)).count();

        annotations.push(RoundAnnotation {
            round_num: round.round_num,
            has_frames: !round.frames.is_empty(),
            player_count_valid: valid_frames == round.frames.len(),
            valid_frames,
            score_consistent,
            duration_valid: duration_valid(round, min_ticks),
            incomplete: round.is_incomplete(),
            warmup: data.is_warmup(round),
            knife: round.is_knife(),
            excess_kills: has_excess_kills(round),
        });
    }

    tracing::trace!(?annotations, "Annotated rounds");

    annotations
}
