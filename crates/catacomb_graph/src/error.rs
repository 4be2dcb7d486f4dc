//! # Graph Error Types
//!
//! All errors that can occur while growing or walking the chamber graph.
//!
//! Configuration errors, invariant violations and misuse are returned to the
//! caller as-is. Nothing in this crate retries them. Distance propagation
//! never fails: chambers it cannot reach keep an unknown score instead.

use thiserror::Error;

use crate::chamber::ChamberId;
use crate::portal::PortalRef;
use crate::transition::ActorKind;

/// Errors that can occur in the level graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The catalog has no blueprint satisfying the active constraints.
    #[error("no eligible blueprint leaving a `{from_kind}` chamber for kinds {accepted:?}")]
    NoEligibleBlueprint {
        /// Kind of the chamber the entry portal lives in.
        from_kind: String,
        /// Destination prefixes the entry portal accepts.
        accepted: Vec<String>,
    },

    /// More than one portal in the destination points back at the owner.
    #[error("ambiguous link for portal {portal}: {matches} reciprocal candidates")]
    AmbiguousLink {
        /// The portal whose reciprocal was searched for.
        portal: PortalRef,
        /// How many portals matched.
        matches: usize,
    },

    /// No portal in the destination points back at the owner.
    #[error("missing link for portal {portal}: no reciprocal in destination")]
    MissingLink {
        /// The portal whose reciprocal was searched for.
        portal: PortalRef,
    },

    /// The actor kind cannot be moved between chambers.
    #[error("unsupported actor kind for transition: {0:?}")]
    UnsupportedActor(ActorKind),

    /// Chamber identity not present in the registry.
    #[error("chamber not found: {0}")]
    UnknownChamber(ChamberId),

    /// Portal reference not present in the registry.
    #[error("portal not found: {0}")]
    UnknownPortal(PortalRef),

    /// Tried to link a portal that already has a destination.
    #[error("portal {0} is already linked")]
    PortalAlreadyLinked(PortalRef),

    /// Invalid configuration or catalog content.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
