//! The cleaning state machine.
//!
//! A match moves `Validated -> Filtered -> Cleaned`. Each transition consumes
//! the previous state, so renumbering can only follow filtering and happens
//! exactly once.

use common::Match;

use crate::clean::{Stage, StageContext};
use crate::diagnostics::Diagnostics;
use crate::options::{CleanOptions, MatchFormat};
use crate::validate::{self, RoundAnnotation};

#[derive(Debug, Clone)]
pub struct Validated {
    data: Match,
    annotations: Vec<RoundAnnotation>,
}

impl Validated {
    pub fn new(data: Match, options: &CleanOptions) -> Self {
        let annotations = validate::annotate(&data, options);
        Self { data, annotations }
    }

    pub fn data(&self) -> &Match {
        &self.data
    }

    pub fn annotations(&self) -> &[RoundAnnotation] {
        &self.annotations
    }

    /// Runs the selected stages in [`Stage::ORDER`], whatever order they were
    /// given in. A round removed by one stage is not seen by the later ones.
    pub fn filter(self, stages: &[Stage], ctx: &StageContext, diagnostics: &mut dyn Diagnostics) -> Filtered {
        let mut data = self.data;
        for stage in Stage::ORDER.iter().filter(|s| stages.contains(s)) {
            data = stage.apply(data, ctx, diagnostics);
        }

        Filtered { data }
    }
}

#[derive(Debug, Clone)]
pub struct Filtered {
    data: Match,
}

impl Filtered {
    pub fn renumber(self, format: &MatchFormat) -> Cleaned {
        Cleaned {
            data: crate::renumber::renumber(self.data, format),
        }
    }
}

/// A match ready for projection. It can be read but not changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Cleaned {
    data: Match,
}

impl Cleaned {
    pub fn data(&self) -> &Match {
        &self.data
    }

    pub fn into_inner(self) -> Match {
        self.data
    }

    pub fn tables(&self) -> crate::Result<crate::tabular::Tables> {
        crate::tabular::project(&self.data)
    }
}

#[tracing::instrument(name = "CleanRounds", skip_all, fields(rounds = data.game_rounds.len()))]
pub fn clean(data: Match, options: &CleanOptions, diagnostics: &mut dyn Diagnostics) -> Cleaned {
    let stages = options.stages();
    tracing::info!(
        "Cleaning with {:?}",
        stages.iter().map(Stage::name).collect::<Vec<_>>()
    );

    let cleaned = Validated::new(data, options)
        .filter(&stages, &StageContext::from(options), diagnostics)
        .renumber(&options.format);

    tracing::info!("Kept {} rounds", cleaned.data().game_rounds.len());

    cleaned
}
