use std::collections::BTreeMap;

use common::{Match, Round, WARMUP_PHASE};

use crate::options::MatchFormat;

pub const REGULATION_PHASE: &str = "regulation";

pub fn overtime_phase(overtime: u32) -> String {
    format!("overtime-{}", overtime)
}

/// Phase a round belongs to, judged by the score it started with.
pub fn phase_of(data: &Match, round: &Round, format: &MatchFormat) -> String {
    if data.is_warmup(round) || round.is_knife() {
        return WARMUP_PHASE.to_owned();
    }

    match format.overtime(round.ct_score + round.t_score) {
        0 => REGULATION_PHASE.to_owned(),
        n => overtime_phase(n),
    }
}

/// Numbers the rounds 1..=n in their current order and rebuilds the phase
/// index. The number a round had before its first renumbering is kept in
/// `original_round_num`.
#[tracing::instrument(skip_all, fields(rounds = data.game_rounds.len()))]
pub fn renumber(mut data: Match, format: &MatchFormat) -> Match {
    // Classify first, the old phase index refers to the old numbers.
    let phases: Vec<String> = data
        .game_rounds
        .iter()
        .map(|round| phase_of(&data, round, format))
        .collect();

    let mut index: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for (idx, (round, phase)) in data.game_rounds.iter_mut().zip(phases).enumerate() {
        round.original_round_num.get_or_insert(round.round_num);
        round.round_num = idx as u32 + 1;

        index.entry(phase).or_default().push(round.round_num);
    }

    tracing::debug!(phases = ?index.keys().collect::<Vec<_>>(), "Rebuilt phase index");

    data.match_phases = index;
    data
}
