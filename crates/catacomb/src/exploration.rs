//! # Exploration Run
//!
//! Headless driver that plays the part of the game loop: each tick the
//! player walks through one portal of the chamber they occupy.
//!
//! ## Tick
//!
//! ```text
//! pick a portal in the occupied chamber (seeded walker)
//!   -> request_transition()
//!   -> record the chamber and the depth reached
//! ```
//!
//! Graph errors end the run. A catalog that cannot satisfy a reachable
//! portal (`NoEligibleBlueprint`) is a content bug, not a dead end.
//!
//! Depth is the path score of the start chamber: how many portals separate
//! the player from the way in.

use std::collections::BTreeSet;
use std::path::Path;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use catacomb_graph::{
    Actor, ChamberGraph, ChamberId, DungeonSeed, FixedStyle, GraphConfig, GraphError, PortalRef,
    TemplateCatalog, TransitionOutcome, TransitionRequest,
};

use crate::error::RunResult;

/// Purpose tag for the walker's portal choices.
pub const WALKER_STREAM: u64 = 0x7761_6C6B;

/// Distance from an actor's top edge to its feet used for the walker.
pub const WALKER_FLOOR_OFFSET: i32 = 24;

/// End-of-run statistics handed to the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Root seed of the run.
    pub seed: u64,
    /// Ticks played.
    pub ticks: u64,
    /// Chambers in the graph at the end.
    pub chambers: usize,
    /// Distinct chambers the player stood in, start included.
    pub rooms_explored: usize,
    /// Chambers generated by walking.
    pub generated: u64,
    /// Furthest the player got from the start chamber.
    pub deepest_score: u32,
    /// Chamber the player ended in.
    pub occupied: ChamberId,
    /// Preferred portal style at the end.
    pub preferred_style: FixedStyle,
}

impl RunSummary {
    /// Serialises the summary as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns `Json` if serialisation fails.
    pub fn to_json(&self) -> RunResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A seeded walk through a lazily generated dungeon.
pub struct ExplorationRun {
    graph: ChamberGraph,
    player: Actor,
    walker: ChaCha8Rng,
    seed: u64,
    preferred: FixedStyle,
    explored: BTreeSet<ChamberId>,
    start: ChamberId,
    ticks: u64,
    deepest_score: u32,
}

impl ExplorationRun {
    /// Starts a run in the configured start chamber.
    ///
    /// # Errors
    ///
    /// Returns `Graph` if the configuration or catalog is invalid.
    pub fn new(catalog: TemplateCatalog, config: &GraphConfig) -> RunResult<Self> {
        let graph = ChamberGraph::new(catalog, config)?;
        let start = graph.occupied();
        tracing::info!(seed = config.seed, start = %start, "exploration run started");

        Ok(Self {
            graph,
            player: Actor::player(0, 0, WALKER_FLOOR_OFFSET),
            walker: DungeonSeed::new(config.seed).derive(WALKER_STREAM).rng(),
            seed: config.seed,
            preferred: config.initial_style,
            explored: BTreeSet::from([start]),
            start,
            ticks: 0,
            deepest_score: 0,
        })
    }

    /// Loads the catalog and configuration from TOML files.
    ///
    /// # Errors
    ///
    /// Returns `Graph` if either file is unreadable or invalid.
    pub fn from_files(catalog: impl AsRef<Path>, config: impl AsRef<Path>) -> RunResult<Self> {
        let catalog = TemplateCatalog::from_toml_file(catalog)?;
        let config = GraphConfig::from_toml_file(config)?;
        Self::new(catalog, &config)
    }

    /// Walks through one portal of the occupied chamber.
    ///
    /// # Errors
    ///
    /// Returns `Graph` for any level graph error, `NoEligibleBlueprint`
    /// included.
    pub fn tick(&mut self) -> RunResult<TransitionOutcome> {
        let here = self.graph.chamber(self.graph.occupied()).ok_or(
            GraphError::UnknownChamber(self.graph.occupied()),
        )?;
        let doors = here.portals().len();
        if doors == 0 {
            return Err(GraphError::MissingLink {
                portal: PortalRef::new(here.id(), 0),
            }
            .into());
        }
        let door = PortalRef::new(here.id(), self.walker.gen_range(0..doors));

        let request = TransitionRequest::new(door, self.preferred);
        let outcome = self.graph.request_transition(request, &mut self.player)?;
        self.ticks += 1;
        self.preferred = outcome.preferred_style;
        self.explored.insert(outcome.chamber);
        if let Some(depth) = self.graph.path_score_of(self.start) {
            self.deepest_score = self.deepest_score.max(depth);
        }
        Ok(outcome)
    }

    /// Plays `ticks` ticks and summarises the run.
    ///
    /// # Errors
    ///
    /// Stops at the first error [`ExplorationRun::tick`] returns.
    pub fn run(&mut self, ticks: u64) -> RunResult<RunSummary> {
        for _ in 0..ticks {
            self.tick()?;
        }
        let summary = self.summary();
        tracing::info!(
            ticks = summary.ticks,
            chambers = summary.chambers,
            explored = summary.rooms_explored,
            deepest = summary.deepest_score,
            "exploration run finished"
        );
        Ok(summary)
    }

    /// Statistics so far.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.seed,
            ticks: self.ticks,
            chambers: self.graph.chambers().count(),
            rooms_explored: self.explored.len(),
            generated: self.graph.stats().generated,
            deepest_score: self.deepest_score,
            occupied: self.graph.occupied(),
            preferred_style: self.preferred,
        }
    }

    /// The graph being explored.
    #[must_use]
    pub const fn graph(&self) -> &ChamberGraph {
        &self.graph
    }

    /// The walking player.
    #[must_use]
    pub const fn player(&self) -> &Actor {
        &self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RunError;
    use catacomb_graph::{ChamberTemplate, PortalBlueprint, ThemeRule};

    fn hall(name: &str) -> ChamberTemplate {
        ChamberTemplate::new(name)
            .with_theme(ThemeRule::Any)
            .with_portal(PortalBlueprint::new(0, 0, &["hall"]))
            .with_portal(PortalBlueprint::new(90, 0, &["hall", "vault"]))
    }

    fn catalog() -> TemplateCatalog {
        TemplateCatalog::new(vec![
            ChamberTemplate::new("entrance")
                .with_portal(PortalBlueprint::new(0, 0, &["hall"]))
                .with_portal(PortalBlueprint::new(90, 0, &["vault"])),
            hall("hall-a"),
            hall("hall-b"),
            ChamberTemplate::new("vault-gold")
                .with_theme(ThemeRule::Any)
                .with_portal(PortalBlueprint::new(0, 0, &["hall"])),
        ])
        .unwrap()
    }

    #[test]
    fn test_fresh_run_summary() {
        let run = ExplorationRun::new(catalog(), &GraphConfig::with_seed(3)).unwrap();
        let summary = run.summary();
        assert_eq!(summary.ticks, 0);
        assert_eq!(summary.chambers, 1);
        assert_eq!(summary.rooms_explored, 1);
        assert_eq!(summary.deepest_score, 0);
        assert_eq!(summary.occupied, ChamberId::new(0));
    }

    #[test]
    fn test_run_grows_consistent_graph() {
        let mut run = ExplorationRun::new(catalog(), &GraphConfig::with_seed(3)).unwrap();
        let summary = run.run(60).unwrap();

        assert_eq!(summary.ticks, 60);
        assert!(summary.chambers > 1);
        assert!(summary.rooms_explored <= summary.chambers);
        assert_eq!(summary.chambers as u64, summary.generated + 1);
        assert!(run.graph().registry().verify_links().is_ok());
    }

    #[test]
    fn test_unsatisfiable_portal_ends_the_run() {
        let catalog = TemplateCatalog::new(vec![
            ChamberTemplate::new("entrance").with_portal(PortalBlueprint::new(0, 0, &["vault"])),
            hall("hall-a"),
        ])
        .unwrap();
        let mut run = ExplorationRun::new(catalog, &GraphConfig::with_seed(3)).unwrap();

        let result = run.run(10);
        assert!(matches!(
            result,
            Err(RunError::Graph(GraphError::NoEligibleBlueprint { .. }))
        ));
        let summary = run.summary();
        assert_eq!(summary.ticks, 0);
        assert_eq!(summary.chambers, 1);
        assert_eq!(summary.occupied, ChamberId::new(0));
    }

    #[test]
    fn test_summary_json_round_trip() {
        let mut run = ExplorationRun::new(catalog(), &GraphConfig::with_seed(11)).unwrap();
        let summary = run.run(25).unwrap();

        let json = summary.to_json().unwrap();
        let back: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }

    #[test]
    fn test_player_stands_on_arrival_portal() {
        let mut run = ExplorationRun::new(catalog(), &GraphConfig::with_seed(8)).unwrap();
        for _ in 0..10 {
            let outcome = run.tick().unwrap();
            let portal = run.graph().registry().portal(outcome.arrival).unwrap();
            assert_eq!(run.player().x, portal.x);
            assert_eq!(run.player().y, portal.floor() - WALKER_FLOOR_OFFSET);
        }
    }
}
