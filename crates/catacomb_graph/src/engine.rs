//! # Chamber Graph
//!
//! The single entry point the rest of the game talks to.
//!
//! ## The Transition Pipeline
//!
//! ```text
//! "enter portal" event -> request_transition() ->
//!   1. Reject actors that cannot transition
//!   2. Unresolved portal? run the generator
//!   3. Find the reciprocal portal
//!   4. Relocate (player) or clone (mobile) the actor
//!   5. Player moved? update the occupied chamber
//!   6. Refresh path scores
//! ```
//!
//! Rendering and bookkeeping only get read access: [`ChamberGraph::chambers`],
//! [`ChamberGraph::chamber`] and [`ChamberGraph::path_score_of`].

use crate::catalog::BlueprintCatalog;
use crate::chamber::{Chamber, ChamberId};
use crate::config::GraphConfig;
use crate::distance::{PathDistancePropagator, PropagationReport};
use crate::error::{GraphError, GraphResult};
use crate::generator::ChamberGenerator;
use crate::portal::{FixedStyle, PortalRef};
use crate::registry::ChamberRegistry;
use crate::seed::DungeonSeed;
use crate::transition::{place_actor, Actor, ActorKind, TransitionOutcome, TransitionRequest};

/// Running counters for the level graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
    /// Chambers committed so far.
    pub chambers: usize,
    /// Chambers created by walking through unresolved portals.
    pub generated: u64,
    /// Completed transitions, any actor.
    pub transitions: u64,
    /// Outcome of the most recent distance refresh.
    pub last_propagation: PropagationReport,
}

/// The level graph: registry, generator and distances behind one API.
pub struct ChamberGraph {
    registry: ChamberRegistry,
    catalog: Box<dyn BlueprintCatalog>,
    generator: ChamberGenerator,
    propagator: PathDistancePropagator,
    occupied: ChamberId,
    stats: GraphStats,
}

impl ChamberGraph {
    /// Builds a graph whose chamber 0 is the configured start blueprint.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration is invalid or the start
    /// blueprint is not in the catalog.
    pub fn new(catalog: impl BlueprintCatalog + 'static, config: &GraphConfig) -> GraphResult<Self> {
        config.validate()?;
        let start = catalog
            .find(&config.start_blueprint)
            .ok_or_else(|| {
                GraphError::InvalidConfig(format!(
                    "start blueprint `{}` is not in the catalog",
                    config.start_blueprint
                ))
            })?
            .instantiate();

        let mut registry = ChamberRegistry::new();
        registry.stage(start);
        let occupied = registry.commit_pending()[0];

        let mut graph = Self {
            registry,
            catalog: Box::new(catalog),
            generator: ChamberGenerator::new(DungeonSeed::new(config.seed)),
            propagator: PathDistancePropagator::new(config.max_propagation_rounds),
            occupied,
            stats: GraphStats::default(),
        };
        graph.propagate()?;
        Ok(graph)
    }

    /// Sends an actor through a portal, generating the far side if needed.
    ///
    /// Entering an already resolved portal never runs the generator.
    ///
    /// # Errors
    ///
    /// - `UnsupportedActor` for actors that cannot transition (checked first)
    /// - `UnknownPortal` if the portal does not exist
    /// - any generator error, with the registry left unchanged
    /// - `MissingLink` / `AmbiguousLink` if the link invariant is broken
    pub fn request_transition(
        &mut self,
        request: TransitionRequest,
        actor: &mut Actor,
    ) -> GraphResult<TransitionOutcome> {
        if !actor.kind.can_transition() {
            return Err(GraphError::UnsupportedActor(actor.kind));
        }

        let generated = if self.registry.portal(request.portal)?.is_resolved() {
            false
        } else {
            self.generator.generate(
                &mut self.registry,
                self.catalog.as_ref(),
                request.portal,
                request.preferred_style,
            )?;
            self.stats.generated += 1;
            true
        };

        let arrival = self.registry.reciprocal_of(request.portal)?;
        let arrival_portal = self.registry.portal(arrival)?;
        let spawned = place_actor(actor, arrival_portal)?;

        let mut preferred_style = request.preferred_style;
        if actor.kind == ActorKind::Player {
            preferred_style = arrival_portal.style().resolve(request.preferred_style);
            self.occupied = arrival.chamber;
            tracing::info!(
                from = %request.portal.chamber,
                to = %arrival.chamber,
                generated,
                "player changed chamber"
            );
        }
        self.stats.transitions += 1;
        self.propagate()?;

        Ok(TransitionOutcome {
            chamber: arrival.chamber,
            arrival,
            generated,
            preferred_style,
            spawned,
        })
    }

    /// Instantiates a blueprint as a new, unlinked chamber.
    ///
    /// Together with [`ChamberGraph::link`] this builds fixed layouts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the blueprint is not in the catalog.
    pub fn add_chamber(&mut self, blueprint: &str) -> GraphResult<ChamberId> {
        let detached = self
            .catalog
            .find(blueprint)
            .ok_or_else(|| {
                GraphError::InvalidConfig(format!("blueprint `{blueprint}` is not in the catalog"))
            })?
            .instantiate();
        self.registry.stage(detached);
        let id = self.registry.commit_pending()[0];
        self.propagate()?;
        Ok(id)
    }

    /// Links two unresolved portals in different chambers.
    ///
    /// # Errors
    ///
    /// See [`ChamberRegistry::link`].
    pub fn link(&mut self, a: PortalRef, b: PortalRef) -> GraphResult<()> {
        self.registry.link(a, b)?;
        self.propagate()?;
        Ok(())
    }

    /// Recomputes every path score from the occupied chamber.
    ///
    /// # Errors
    ///
    /// Returns `UnknownChamber` if the occupied chamber is missing, which
    /// would mean the registry lost a committed chamber.
    pub fn propagate(&mut self) -> GraphResult<PropagationReport> {
        let report = self.propagator.propagate(&mut self.registry, self.occupied)?;
        self.stats.chambers = self.registry.len();
        self.stats.last_propagation = report;
        Ok(report)
    }

    /// Minimum portal hops from `chamber` to the occupied chamber.
    ///
    /// `None` means unknown: treat it as very far, never as zero.
    #[must_use]
    pub fn path_score_of(&self, chamber: ChamberId) -> Option<u32> {
        self.registry.get(chamber).and_then(Chamber::path_score)
    }

    /// The chamber the player is in.
    #[inline]
    #[must_use]
    pub const fn occupied(&self) -> ChamberId {
        self.occupied
    }

    /// Gets a committed chamber.
    #[must_use]
    pub fn chamber(&self, id: ChamberId) -> Option<&Chamber> {
        self.registry.get(id)
    }

    /// Iterates over committed chambers in identity order.
    pub fn chambers(&self) -> impl Iterator<Item = &Chamber> {
        self.registry.iter()
    }

    /// Read access to the registry.
    #[must_use]
    pub const fn registry(&self) -> &ChamberRegistry {
        &self.registry
    }

    /// Running counters.
    #[must_use]
    pub const fn stats(&self) -> &GraphStats {
        &self.stats
    }

    /// Displayed style of every portal in the occupied chamber.
    #[must_use]
    pub fn active_styles(&self, preferred: FixedStyle) -> Vec<(PortalRef, FixedStyle)> {
        self.registry
            .get(self.occupied)
            .map(|chamber| {
                chamber
                    .portals()
                    .iter()
                    .enumerate()
                    .map(|(index, portal)| {
                        (
                            PortalRef::new(chamber.id(), index),
                            portal.style().resolve(preferred),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
