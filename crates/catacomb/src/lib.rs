//! # CATACOMB
//!
//! The game-facing crate on top of the level graph.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        CATACOMB                          │
//! ├──────────────────────────────────────────────────────────┤
//! │                                                          │
//! │  ┌──────────────────┐        ┌──────────────────────┐    │
//! │  │  ExplorationRun  │───────>│   catacomb_graph     │    │
//! │  │                  │ enter  │                      │    │
//! │  │  • seeded walker │ portal │  • registry          │    │
//! │  │  • run summary   │<───────│  • generator         │    │
//! │  └────────┬─────────┘ scores │  • path distances    │    │
//! │           │                  └──────────────────────┘    │
//! │           v                                              │
//! │     RunSummary (JSON) -> persistence                     │
//! │                                                          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `exploration`: Headless exploration driver
//! - `error`: Run errors

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod exploration;

// Re-export the level graph
pub use catacomb_graph as graph;

pub use error::{RunError, RunResult};
pub use exploration::{ExplorationRun, RunSummary};
