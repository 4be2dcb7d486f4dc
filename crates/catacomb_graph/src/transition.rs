//! # Transitions
//!
//! Moving actors through a portal pair.
//!
//! Players are relocated to the reciprocal portal. Mobiles are never moved
//! in place: a copy is spawned at the reciprocal portal and the original is
//! flagged for removal from its chamber.

use serde::{Deserialize, Serialize};

use crate::chamber::ChamberId;
use crate::error::{GraphError, GraphResult};
use crate::portal::{FixedStyle, Portal, PortalRef};

/// What kind of actor asked to go through a portal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// The player character. Moving it moves the occupied chamber.
    Player,
    /// A monster or companion that can follow through portals.
    Mobile,
    /// Anything else (projectiles, props). Cannot transition.
    Other,
}

impl ActorKind {
    /// Whether this kind can go through a portal at all.
    #[inline]
    #[must_use]
    pub const fn can_transition(self) -> bool {
        matches!(self, Self::Player | Self::Mobile)
    }
}

/// The parts of an actor the level graph needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Actor kind.
    pub kind: ActorKind,
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Distance from the top edge down to the actor's feet.
    pub floor_offset: i32,
    removed: bool,
}

impl Actor {
    /// Creates an actor at a position.
    #[must_use]
    pub const fn new(kind: ActorKind, x: i32, y: i32, floor_offset: i32) -> Self {
        Self {
            kind,
            x,
            y,
            floor_offset,
            removed: false,
        }
    }

    /// Creates a player actor.
    #[must_use]
    pub const fn player(x: i32, y: i32, floor_offset: i32) -> Self {
        Self::new(ActorKind::Player, x, y, floor_offset)
    }

    /// Whether the actor should be removed from its current chamber.
    #[inline]
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        self.removed
    }

    /// Stands the actor on `portal`'s floor line.
    fn stand_on(&mut self, portal: &Portal) {
        self.x = portal.x;
        self.y = portal.floor() - self.floor_offset;
    }
}

/// A request to go through a portal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionRequest {
    /// Portal being entered.
    pub portal: PortalRef,
    /// Preferred portal style at the time of the request.
    pub preferred_style: FixedStyle,
}

impl TransitionRequest {
    /// Creates a request.
    #[inline]
    #[must_use]
    pub const fn new(portal: PortalRef, preferred_style: FixedStyle) -> Self {
        Self {
            portal,
            preferred_style,
        }
    }
}

/// What a transition did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// Chamber on the far side.
    pub chamber: ChamberId,
    /// Portal the actor arrived at.
    pub arrival: PortalRef,
    /// Whether a new chamber had to be generated.
    pub generated: bool,
    /// Preferred style after the transition.
    pub preferred_style: FixedStyle,
    /// Copy of a mobile actor, placed in the destination chamber.
    pub spawned: Option<Actor>,
}

/// Moves (or clones) `actor` onto the arrival portal.
///
/// # Errors
///
/// Returns `UnsupportedActor` for kinds that cannot transition.
pub(crate) fn place_actor(actor: &mut Actor, arrival: &Portal) -> GraphResult<Option<Actor>> {
    match actor.kind {
        ActorKind::Player => {
            actor.stand_on(arrival);
            Ok(None)
        }
        ActorKind::Mobile => {
            let mut copy = actor.clone();
            copy.stand_on(arrival);
            actor.removed = true;
            Ok(Some(copy))
        }
        ActorKind::Other => Err(GraphError::UnsupportedActor(actor.kind)),
    }
}
