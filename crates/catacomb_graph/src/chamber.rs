//! # Chambers
//!
//! A chamber is one node of the level graph.
//!
//! Blueprints produce a [`DetachedChamber`] with no identity. The registry
//! commits it into a [`Chamber`] and hands out the next [`ChamberId`]. Only
//! committed chambers can be occupied, linked, or scored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::portal::{Portal, PortalBlueprint};
use crate::theme::ChamberTheme;

/// Stable identity of a committed chamber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChamberId(u32);

impl ChamberId {
    /// Creates a chamber identity from its raw index.
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw identity value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the identity as an arena index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ChamberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chamber:{}", self.0)
    }
}

/// A piece of placed content. Only theme-bearing decorations matter to the graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    /// Content name (torch, banner, moss...).
    pub name: String,
    /// Whether the decoration is drawn per theme.
    #[serde(default)]
    pub theme_bearing: bool,
}

impl Decoration {
    /// Creates a decoration.
    #[must_use]
    pub fn new(name: impl Into<String>, theme_bearing: bool) -> Self {
        Self {
            name: name.into(),
            theme_bearing,
        }
    }
}

/// A chamber fresh out of a blueprint, not yet part of the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetachedChamber {
    /// Blueprint name.
    pub kind: String,
    /// Starting theme.
    pub theme: ChamberTheme,
    /// Skips automatic theme assignment when generated.
    pub theme_exempt: bool,
    /// Placed content.
    pub decorations: Vec<Decoration>,
    /// Portals, in placement order.
    pub portals: Vec<PortalBlueprint>,
}

impl DetachedChamber {
    /// Creates an empty, themeless chamber of the given kind.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            theme: ChamberTheme::None,
            theme_exempt: false,
            decorations: Vec::new(),
            portals: Vec::new(),
        }
    }

    /// Adds a portal.
    #[must_use]
    pub fn with_portal(mut self, portal: PortalBlueprint) -> Self {
        self.portals.push(portal);
        self
    }

    /// Adds a decoration.
    #[must_use]
    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decorations.push(decoration);
        self
    }

    /// Sets the starting theme.
    #[must_use]
    pub const fn with_theme(mut self, theme: ChamberTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Commits the chamber under `id`.
    pub(crate) fn commit(self, id: ChamberId) -> Chamber {
        Chamber {
            id,
            kind: self.kind,
            theme: self.theme,
            theme_exempt: self.theme_exempt,
            decorations: self.decorations,
            portals: self.portals.into_iter().map(|p| p.commit(id)).collect(),
            path_score: None,
        }
    }
}

/// A committed chamber.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chamber {
    id: ChamberId,
    kind: String,
    pub(crate) theme: ChamberTheme,
    theme_exempt: bool,
    decorations: Vec<Decoration>,
    pub(crate) portals: Vec<Portal>,
    pub(crate) path_score: Option<u32>,
}

impl Chamber {
    /// Identity assigned at commit.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ChamberId {
        self.id
    }

    /// Blueprint the chamber was instantiated from.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Current theme.
    #[inline]
    #[must_use]
    pub const fn theme(&self) -> ChamberTheme {
        self.theme
    }

    /// Whether automatic theme assignment skips this chamber.
    #[inline]
    #[must_use]
    pub const fn theme_exempt(&self) -> bool {
        self.theme_exempt
    }

    /// Placed content.
    #[must_use]
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// Returns true if any decoration is drawn per theme.
    #[must_use]
    pub fn has_theme_decor(&self) -> bool {
        self.decorations.iter().any(|d| d.theme_bearing)
    }

    /// Portals, in placement order.
    #[must_use]
    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    /// Minimum portal hops to the occupied chamber, if known.
    #[inline]
    #[must_use]
    pub const fn path_score(&self) -> Option<u32> {
        self.path_score
    }

    /// Identities of chambers reachable through one resolved portal.
    pub fn neighbours(&self) -> impl Iterator<Item = ChamberId> + '_ {
        self.portals.iter().filter_map(|p| p.destination().chamber())
    }
}
