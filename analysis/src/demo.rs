use common::Match;

use crate::clean::{Stage, StageContext};
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::{CleanError, Result};
use crate::options::{CleanOptions, ReturnType};
use crate::tabular::{Row, Tables};
use crate::validate::RoundAnnotation;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum CleanOutput {
    Structured(Match),
    Tabular(Tables),
}

/// Holds the parser output of one demo and runs the cleaning operations on it.
///
/// Every operation fails with [`CleanError::NotParsed`] while no match is
/// loaded.
pub struct Demo {
    data: Option<Match>,
    context: StageContext,
    diagnostics: Box<dyn Diagnostics + Send>,
}

impl Default for Demo {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Demo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Demo")
            .field("data", &self.data.as_ref().map(|d| d.game_rounds.len()))
            .field("context", &self.context)
            .finish()
    }
}

impl Demo {
    pub fn new() -> Self {
        Self {
            data: None,
            context: StageContext::default(),
            diagnostics: Box::new(TracingDiagnostics),
        }
    }

    pub fn with_diagnostics<D>(mut self, diagnostics: D) -> Self
    where
        D: Diagnostics + Send + 'static,
    {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    /// Format and timing used when stages are run one at a time.
    pub fn with_context(mut self, context: StageContext) -> Self {
        self.context = context;
        self
    }

    pub fn from_json(input: &str) -> Result<Self> {
        let mut demo = Self::new();
        demo.read_json(input)?;
        Ok(demo)
    }

    pub fn read_json(&mut self, input: &str) -> Result<()> {
        self.data = Some(Match::from_json(input)?);
        Ok(())
    }

    pub fn load(&mut self, data: Match) {
        self.data = Some(data);
    }

    pub fn clear(&mut self) -> Option<Match> {
        self.data.take()
    }

    pub fn is_parsed(&self) -> bool {
        self.data.is_some()
    }

    fn require(&self, operation: &'static str) -> Result<&Match> {
        self.data.as_ref().ok_or(CleanError::NotParsed { operation })
    }

    pub fn data(&self) -> Result<&Match> {
        self.require("data")
    }

    fn run_stage(&mut self, stage: Stage) -> Result<()> {
        let data = self
            .data
            .take()
            .ok_or(CleanError::NotParsed { operation: stage.name() })?;

        self.data = Some(stage.apply(data, &self.context, self.diagnostics.as_mut()));
        Ok(())
    }

    pub fn remove_bad_scoring(&mut self) -> Result<()> {
        self.run_stage(Stage::BadScoring)
    }

    pub fn remove_rounds_with_no_frames(&mut self) -> Result<()> {
        self.run_stage(Stage::NoFrames)
    }

    pub fn remove_excess_players(&mut self) -> Result<()> {
        self.run_stage(Stage::ExcessPlayers)
    }

    pub fn remove_end_round(&mut self) -> Result<()> {
        self.run_stage(Stage::EndRound)
    }

    pub fn remove_warmups(&mut self) -> Result<()> {
        self.run_stage(Stage::Warmups)
    }

    pub fn remove_knife_rounds(&mut self) -> Result<()> {
        self.run_stage(Stage::KnifeRounds)
    }

    pub fn remove_excess_kill_rounds(&mut self) -> Result<()> {
        self.run_stage(Stage::ExcessKills)
    }

    pub fn remove_time_rounds(&mut self) -> Result<()> {
        self.run_stage(Stage::TimeRounds)
    }

    pub fn validate(&self, options: &CleanOptions) -> Result<Vec<RoundAnnotation>> {
        let data = self.require("validate")?;
        Ok(crate::validate::annotate(data, options))
    }

    /// Runs the enabled stages, renumbers the remaining rounds and returns
    /// them in the requested shape. The cleaned match replaces the loaded one.
    pub fn clean_rounds(&mut self, options: &CleanOptions) -> Result<CleanOutput> {
        options.validate()?;
        let data = self
            .data
            .take()
            .ok_or(CleanError::NotParsed { operation: "clean_rounds" })?;

        let cleaned = crate::pipeline::clean(data, options, self.diagnostics.as_mut());
        let output = match options.return_type {
            ReturnType::Structured => Ok(CleanOutput::Structured(cleaned.data().clone())),
            ReturnType::Tabular => cleaned.tables().map(CleanOutput::Tabular),
        };

        self.data = Some(cleaned.into_inner());
        output
    }

    /// Like [`Demo::clean_rounds`] with the return type given by name.
    pub fn clean_rounds_as(&mut self, options: &CleanOptions, return_type: &str) -> Result<CleanOutput> {
        let options = CleanOptions {
            return_type: return_type.parse()?,
            ..options.clone()
        };
        self.clean_rounds(&options)
    }

    pub fn rounds(&self) -> Result<Vec<Row>> {
        crate::tabular::rounds(self.require("rounds")?)
    }

    pub fn kills(&self) -> Result<Vec<Row>> {
        crate::tabular::kills(self.require("kills")?)
    }

    pub fn damages(&self) -> Result<Vec<Row>> {
        crate::tabular::damages(self.require("damages")?)
    }

    pub fn grenades(&self) -> Result<Vec<Row>> {
        crate::tabular::grenades(self.require("grenades")?)
    }

    pub fn flashes(&self) -> Result<Vec<Row>> {
        crate::tabular::flashes(self.require("flashes")?)
    }

    pub fn weapon_fires(&self) -> Result<Vec<Row>> {
        crate::tabular::weapon_fires(self.require("weapon_fires")?)
    }

    pub fn bomb_events(&self) -> Result<Vec<Row>> {
        crate::tabular::bomb_events(self.require("bomb_events")?)
    }

    pub fn frames(&self) -> Result<Vec<Row>> {
        crate::tabular::frames(self.require("frames")?)
    }

    pub fn player_frames(&self) -> Result<Vec<Row>> {
        crate::tabular::player_frames(self.require("player_frames")?)
    }

    pub fn tables(&self) -> Result<Tables> {
        crate::tabular::project(self.require("tables")?)
    }
}
