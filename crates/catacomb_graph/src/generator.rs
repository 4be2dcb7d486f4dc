//! # Chamber Generator
//!
//! Grows the graph when the player walks through an unresolved portal.
//!
//! ## Pipeline
//!
//! ```text
//! catalog -> theme filter -> kind-prefix filter -> no self-repeat
//!         -> pick blueprint -> stage -> commit
//!         -> pick arrival portal -> restyle siblings -> link both ends
//!         -> inherit theme
//! ```
//!
//! Every check that can fail runs before anything is staged, so an error
//! leaves the registry exactly as it was.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::{Blueprint, BlueprintCatalog};
use crate::chamber::ChamberId;
use crate::error::{GraphError, GraphResult};
use crate::portal::{Destination, FixedStyle, PortalRef, PortalStyle};
use crate::registry::ChamberRegistry;
use crate::seed::{DungeonSeed, GENERATOR_STREAM};
use crate::theme::{ChamberTheme, Theme};

/// A freshly generated and linked chamber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generated {
    /// The new chamber.
    pub chamber: ChamberId,
    /// Its portal leading back to the entry portal's chamber.
    pub reciprocal: PortalRef,
}

/// Picks blueprints and links new chambers into the graph.
#[derive(Clone, Debug)]
pub struct ChamberGenerator {
    rng: ChaCha8Rng,
}

impl ChamberGenerator {
    /// Creates a generator on the seed's generator stream.
    #[must_use]
    pub fn new(seed: DungeonSeed) -> Self {
        Self {
            rng: seed.derive(GENERATOR_STREAM).rng(),
        }
    }

    /// Generates the chamber behind `entry` and links it back.
    ///
    /// `preferred` is the current preferred portal style, used when the
    /// arrival portal restyles its siblings.
    ///
    /// # Errors
    ///
    /// - `UnknownPortal` if `entry` does not exist
    /// - `PortalAlreadyLinked` if `entry` is already resolved
    /// - `NoEligibleBlueprint` if no blueprint passes the filters
    /// - `MissingLink` if the chosen blueprint has no portals to arrive at
    pub fn generate(
        &mut self,
        registry: &mut ChamberRegistry,
        catalog: &dyn BlueprintCatalog,
        entry: PortalRef,
        preferred: FixedStyle,
    ) -> GraphResult<Generated> {
        let entry_portal = registry.portal(entry)?;
        let Destination::Unresolved(accepted) = entry_portal.destination().clone() else {
            return Err(GraphError::PortalAlreadyLinked(entry));
        };
        let invert = entry_portal.invert_entries;
        let current = registry.chamber(entry.chamber)?;
        let (current_id, current_theme) = (current.id(), current.theme());

        let candidates = Self::candidates(catalog, current.kind(), current_theme, &accepted);
        if candidates.is_empty() {
            return Err(GraphError::NoEligibleBlueprint {
                from_kind: current.kind().to_string(),
                accepted,
            });
        }
        let blueprint = candidates[self.rng.gen_range(0..candidates.len())];
        let detached = blueprint.instantiate();
        if detached.portals.is_empty() {
            return Err(GraphError::MissingLink { portal: entry });
        }

        registry.stage(detached);
        let new_id = registry
            .commit_pending()
            .last()
            .copied()
            .ok_or_else(|| GraphError::UnknownChamber(ChamberId::new(registry.len() as u32)))?;

        let reciprocal = self.pick_arrival(registry, new_id, invert)?;
        let chamber = registry.chamber_mut(new_id)?;
        if chamber.portals[reciprocal.index].style == PortalStyle::ToggleFromSibling {
            let sibling_style = PortalStyle::Fixed(preferred.opposite());
            for (index, portal) in chamber.portals.iter_mut().enumerate() {
                if index != reciprocal.index {
                    portal.style = sibling_style;
                }
            }
        }

        registry.set_destination(entry, Destination::Resolved(new_id))?;
        registry.set_destination(reciprocal, Destination::Resolved(current_id))?;
        self.inherit_theme(registry, new_id, current_theme)?;

        tracing::info!(
            %entry,
            %reciprocal,
            kind = %blueprint.name(),
            "linked new chamber"
        );
        Ok(Generated {
            chamber: new_id,
            reciprocal,
        })
    }

    /// Blueprints that may follow a `current_kind` chamber through a portal
    /// accepting `accepted`.
    fn candidates<'a>(
        catalog: &'a dyn BlueprintCatalog,
        current_kind: &str,
        current_theme: ChamberTheme,
        accepted: &[String],
    ) -> Vec<&'a dyn Blueprint> {
        let themed: Vec<&dyn Blueprint> = catalog
            .blueprints()
            .filter(|b| b.theme_rule().admits(current_theme))
            .collect();
        let entered: Vec<&dyn Blueprint> = themed
            .iter()
            .copied()
            .filter(|b| accepted.iter().any(|p| b.name().starts_with(p.as_str())))
            .collect();
        let fresh: Vec<&dyn Blueprint> = entered
            .iter()
            .copied()
            .filter(|b| b.name() != current_kind)
            .collect();

        tracing::debug!(
            themed = themed.len(),
            entered = entered.len(),
            fresh = fresh.len(),
            "blueprint candidates"
        );
        fresh
    }

    /// Chooses the portal in `chamber` the traveller arrives at.
    ///
    /// Falls back to every portal when none has the right polarity.
    fn pick_arrival(
        &mut self,
        registry: &ChamberRegistry,
        chamber: ChamberId,
        invert: bool,
    ) -> GraphResult<PortalRef> {
        let portals = registry.chamber(chamber)?.portals();
        let mut options: Vec<usize> = portals
            .iter()
            .enumerate()
            .filter(|(_, p)| p.accepts_arrival(invert))
            .map(|(index, _)| index)
            .collect();
        if options.is_empty() {
            tracing::warn!(%chamber, invert, "no arrival portal with matching polarity, using any");
            options = (0..portals.len()).collect();
        }
        let index = options[self.rng.gen_range(0..options.len())];
        Ok(PortalRef::new(chamber, index))
    }

    /// Carries the previous chamber's theme into the new one.
    fn inherit_theme(
        &mut self,
        registry: &mut ChamberRegistry,
        chamber: ChamberId,
        previous: ChamberTheme,
    ) -> GraphResult<()> {
        let chamber = registry.chamber_mut(chamber)?;
        if chamber.theme_exempt() {
            return Ok(());
        }
        chamber.theme = match previous {
            ChamberTheme::None if chamber.has_theme_decor() => {
                ChamberTheme::Tag(Theme::random(&mut self.rng))
            }
            ChamberTheme::None => ChamberTheme::None,
            inherited => inherited,
        };
        Ok(())
    }
}
