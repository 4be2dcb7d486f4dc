//! # CATACOMB Level Graph
//!
//! Lazily grown graph of chambers linked by portal pairs.
//!
//! ## Design Principles
//!
//! 1. **Lazy**: A chamber exists only once someone walks into it
//! 2. **Append-only**: Committed chambers are never removed, so the way back
//!    always exists
//! 3. **Consistent**: Every resolved portal has exactly one reciprocal
//! 4. **Deterministic**: Same seed + same catalog = same dungeon
//!
//! ## Core Components
//!
//! - `ChamberRegistry`: Arena of committed chambers plus a staging list
//! - `ChamberGenerator`: Blueprint selection and bidirectional linking
//! - `PathDistancePropagator`: Hop counts to the occupied chamber
//! - `ChamberGraph`: The facade driven by "enter portal" events
//! - `TemplateCatalog`: Data-driven blueprints loaded from TOML
//!
//! ## Example
//!
//! ```rust,ignore
//! use catacomb_graph::{ChamberGraph, GraphConfig, TemplateCatalog, TransitionRequest};
//!
//! let catalog = TemplateCatalog::from_toml_file("data/catalog/chambers.toml")?;
//! let config = GraphConfig::from_toml_file("data/config/graph.toml")?;
//! let mut graph = ChamberGraph::new(catalog, &config)?;
//!
//! // Player walks through the first portal of the start chamber
//! let door = PortalRef::new(graph.occupied(), 0);
//! let outcome = graph.request_transition(
//!     TransitionRequest::new(door, config.initial_style),
//!     &mut player,
//! )?;
//! assert_eq!(graph.path_score_of(outcome.chamber), Some(0));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod chamber;
pub mod config;
pub mod distance;
pub mod engine;
pub mod error;
pub mod generator;
pub mod portal;
pub mod registry;
pub mod seed;
pub mod theme;
pub mod transition;

pub use catalog::{Blueprint, BlueprintCatalog, ChamberTemplate, TemplateCatalog};
pub use chamber::{Chamber, ChamberId, Decoration, DetachedChamber};
pub use config::{GraphConfig, DEFAULT_MAX_PROPAGATION_ROUNDS};
pub use distance::{PathDistancePropagator, PropagationReport};
pub use engine::{ChamberGraph, GraphStats};
pub use error::{GraphError, GraphResult};
pub use generator::{ChamberGenerator, Generated};
pub use portal::{
    find_unique, Destination, FixedStyle, LinkSearch, Portal, PortalBlueprint, PortalRef,
    PortalStyle,
};
pub use registry::ChamberRegistry;
pub use seed::DungeonSeed;
pub use theme::{ChamberTheme, Theme, ThemeRule};
pub use transition::{Actor, ActorKind, TransitionOutcome, TransitionRequest};
