//! # Chamber Registry
//!
//! Append-only arena of committed chambers indexed by [`ChamberId`], plus a
//! staging list of detached chambers waiting for an identity.
//!
//! ## Identity Guarantee
//!
//! Identities are assigned by [`ChamberRegistry::commit_pending`] in staging
//! order, starting at 0, with no gaps. A committed chamber is never removed,
//! so every identity ever handed out stays addressable.

use crate::chamber::{Chamber, ChamberId, DetachedChamber};
use crate::error::{GraphError, GraphResult};
use crate::portal::{Destination, Portal, PortalRef};

/// Owner of every chamber in the dungeon.
#[derive(Debug, Default)]
pub struct ChamberRegistry {
    /// Committed chambers; `chambers[i].id() == ChamberId::new(i)`.
    chambers: Vec<Chamber>,
    /// Detached chambers waiting for commit.
    pending: Vec<DetachedChamber>,
}

impl ChamberRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed chambers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chambers.len()
    }

    /// Returns true if nothing has been committed yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chambers.is_empty()
    }

    /// Number of staged, uncommitted chambers.
    #[inline]
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Stages a detached chamber for the next commit.
    pub fn stage(&mut self, chamber: DetachedChamber) {
        self.pending.push(chamber);
    }

    /// Commits every staged chamber, in staging order.
    ///
    /// Returns the identities that were assigned.
    pub fn commit_pending(&mut self) -> Vec<ChamberId> {
        let mut committed = Vec::with_capacity(self.pending.len());
        for detached in self.pending.drain(..) {
            let id = ChamberId::new(self.chambers.len() as u32);
            tracing::info!(%id, kind = %detached.kind, "chamber committed");
            self.chambers.push(detached.commit(id));
            committed.push(id);
        }
        committed
    }

    /// Gets a chamber by identity.
    #[inline]
    #[must_use]
    pub fn get(&self, id: ChamberId) -> Option<&Chamber> {
        self.chambers.get(id.index())
    }

    /// Gets a chamber by identity, failing if it is unknown.
    ///
    /// # Errors
    ///
    /// Returns `UnknownChamber` if `id` was never committed.
    pub fn chamber(&self, id: ChamberId) -> GraphResult<&Chamber> {
        self.get(id).ok_or(GraphError::UnknownChamber(id))
    }

    pub(crate) fn chamber_mut(&mut self, id: ChamberId) -> GraphResult<&mut Chamber> {
        self.chambers
            .get_mut(id.index())
            .ok_or(GraphError::UnknownChamber(id))
    }

    /// Gets a portal by reference.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPortal` if the chamber or the index does not exist.
    pub fn portal(&self, portal: PortalRef) -> GraphResult<&Portal> {
        self.get(portal.chamber)
            .and_then(|c| c.portals().get(portal.index))
            .ok_or(GraphError::UnknownPortal(portal))
    }

    pub(crate) fn portal_mut(&mut self, portal: PortalRef) -> GraphResult<&mut Portal> {
        self.chambers
            .get_mut(portal.chamber.index())
            .and_then(|c| c.portals.get_mut(portal.index))
            .ok_or(GraphError::UnknownPortal(portal))
    }

    /// Iterates over committed chambers in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &Chamber> {
        self.chambers.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Chamber> {
        self.chambers.iter_mut()
    }

    /// Every portal in the registry, with its reference.
    pub fn portals(&self) -> impl Iterator<Item = (PortalRef, &Portal)> {
        self.chambers.iter().flat_map(|chamber| {
            chamber
                .portals()
                .iter()
                .enumerate()
                .map(move |(index, portal)| (PortalRef::new(chamber.id(), index), portal))
        })
    }

    /// Overwrites a portal's destination. No reciprocity checks.
    pub(crate) fn set_destination(
        &mut self,
        portal: PortalRef,
        destination: Destination,
    ) -> GraphResult<()> {
        self.portal_mut(portal)?.destination = destination;
        Ok(())
    }

    /// Links two unresolved portals in different chambers to each other.
    ///
    /// Used to author fixed layouts (hub rooms, tutorials) without running
    /// the generator.
    ///
    /// # Errors
    ///
    /// - `UnknownPortal` if either reference is invalid
    /// - `PortalAlreadyLinked` if either portal is resolved
    /// - `InvalidConfig` if both portals live in the same chamber
    /// - `AmbiguousLink` if the two chambers are already linked
    pub fn link(&mut self, a: PortalRef, b: PortalRef) -> GraphResult<()> {
        for portal in [a, b] {
            if self.portal(portal)?.is_resolved() {
                return Err(GraphError::PortalAlreadyLinked(portal));
            }
        }
        if a.chamber == b.chamber {
            return Err(GraphError::InvalidConfig(format!(
                "cannot link {a} and {b}: same chamber"
            )));
        }
        let existing = self
            .chamber(a.chamber)?
            .neighbours()
            .filter(|&n| n == b.chamber)
            .count();
        if existing > 0 {
            return Err(GraphError::AmbiguousLink {
                portal: a,
                matches: existing + 1,
            });
        }

        self.set_destination(a, Destination::Resolved(b.chamber))?;
        self.set_destination(b, Destination::Resolved(a.chamber))?;
        Ok(())
    }

    /// Finds the portal in `portal`'s destination that leads back to it.
    ///
    /// # Errors
    ///
    /// - `UnknownPortal` / `UnknownChamber` for dangling references
    /// - `MissingLink` if the portal is unresolved or has no reciprocal
    /// - `AmbiguousLink` if more than one portal leads back
    pub fn reciprocal_of(&self, portal: PortalRef) -> GraphResult<PortalRef> {
        let source = self.portal(portal)?;
        let Some(target) = source.destination().chamber() else {
            return Err(GraphError::MissingLink { portal });
        };
        let index = source.reciprocal_in(portal, self.chamber(target)?)?;
        Ok(PortalRef::new(target, index))
    }

    /// Checks the round-trip property for every resolved portal.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn verify_links(&self) -> GraphResult<()> {
        for (portal, _) in self.portals().filter(|(_, p)| p.is_resolved()) {
            self.reciprocal_of(portal)?;
        }
        Ok(())
    }
}
