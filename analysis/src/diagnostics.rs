//! Sinks for the data problems the cleaning stages find.
//!
//! Anomalies are expected in parser output and never fail a stage, they are
//! handed to whichever sink the caller passed in.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    BadScoring {
        round: u32,
        expected: (u32, u32),
        found: (u32, u32),
    },
    NoFrames {
        round: u32,
    },
    InvalidFrames {
        round: u32,
        dropped: usize,
        kept: usize,
    },
    IncompleteEnd {
        round: u32,
    },
    Warmup {
        round: u32,
    },
    KnifeRound {
        round: u32,
    },
    ExcessKills {
        round: u32,
        kills: usize,
        limit: usize,
    },
    BadTiming {
        round: u32,
        start_tick: i64,
        end_tick: i64,
    },
}

impl Anomaly {
    pub fn round(&self) -> u32 {
        match self {
            Self::BadScoring { round, .. }
            | Self::NoFrames { round }
            | Self::InvalidFrames { round, .. }
            | Self::IncompleteEnd { round }
            | Self::Warmup { round }
            | Self::KnifeRound { round }
            | Self::ExcessKills { round, .. }
            | Self::BadTiming { round, .. } => *round,
        }
    }

    /// Whether the whole round was dropped, as opposed to some of its frames.
    pub fn drops_round(&self) -> bool {
        match self {
            Self::InvalidFrames { kept, .. } => *kept == 0,
            _ => true,
        }
    }
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadScoring { round, expected, found } => write!(
                f,
                "round {}: bad scoring, expected {}-{} but found {}-{}",
                round, expected.0, expected.1, found.0, found.1
            ),
            Self::NoFrames { round } => write!(f, "round {}: no frames", round),
            Self::InvalidFrames { round, dropped, kept } => write!(
                f,
                "round {}: {} frames with invalid player counts, {} kept",
                round, dropped, kept
            ),
            Self::IncompleteEnd { round } => write!(f, "round {}: incomplete final round", round),
            Self::Warmup { round } => write!(f, "round {}: warmup", round),
            Self::KnifeRound { round } => write!(f, "round {}: knife round", round),
            Self::ExcessKills { round, kills, limit } => write!(
                f,
                "round {}: {} kills exceed the limit of {}",
                round, kills, limit
            ),
            Self::BadTiming { round, start_tick, end_tick } => write!(
                f,
                "round {}: bad timing, ticks {}..{}",
                round, start_tick, end_tick
            ),
        }
    }
}

pub trait Diagnostics {
    fn record(&mut self, anomaly: Anomaly);
}

impl Diagnostics for Vec<Anomaly> {
    fn record(&mut self, anomaly: Anomaly) {
        self.push(anomaly);
    }
}

/// Reports every anomaly as a tracing event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&mut self, anomaly: Anomaly) {
        if anomaly.drops_round() {
            tracing::info!(round = anomaly.round(), "Dropping {}", anomaly);
        } else {
            tracing::debug!(round = anomaly.round(), "Filtering {}", anomaly);
        }
    }
}
