//! # Portals
//!
//! A portal is a link endpoint living inside exactly one chamber.
//!
//! ## Lifecycle
//!
//! ```text
//! PortalBlueprint (detached, no owner)
//!     -> commit -> Portal { owner, Unresolved([...]) }
//!     -> generator/link -> Portal { owner, Resolved(id) }
//! ```
//!
//! Once resolved, a portal has exactly one reciprocal in its destination
//! chamber pointing back at its owner. [`Portal::reciprocal_in`] enforces that.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chamber::{Chamber, ChamberId};
use crate::error::{GraphError, GraphResult};

/// Address of a committed portal: owner chamber plus position in its portal list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortalRef {
    /// Chamber the portal lives in.
    pub chamber: ChamberId,
    /// Index into the chamber's portal list.
    pub index: usize,
}

impl PortalRef {
    /// Creates a new portal reference.
    #[inline]
    #[must_use]
    pub const fn new(chamber: ChamberId, index: usize) -> Self {
        Self { chamber, index }
    }
}

impl fmt::Display for PortalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.chamber, self.index)
    }
}

/// Where a portal leads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    /// Linked to a committed chamber.
    Resolved(ChamberId),
    /// Not generated yet: acceptable destination-kind prefixes.
    Unresolved(Vec<String>),
}

impl Destination {
    /// Returns the destination chamber if resolved.
    #[inline]
    #[must_use]
    pub fn chamber(&self) -> Option<ChamberId> {
        match self {
            Self::Resolved(id) => Some(*id),
            Self::Unresolved(_) => None,
        }
    }

    /// Whether `kind` starts with one of the accepted prefixes.
    ///
    /// Always false for resolved destinations.
    #[must_use]
    pub fn accepts_kind(&self, kind: &str) -> bool {
        match self {
            Self::Resolved(_) => false,
            Self::Unresolved(prefixes) => prefixes.iter().any(|p| kind.starts_with(p.as_str())),
        }
    }
}

/// A concrete portal colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedStyle {
    /// Warm amber frame.
    #[default]
    Amber,
    /// Cold violet frame.
    Violet,
}

impl FixedStyle {
    /// The other fixed style.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Amber => Self::Violet,
            Self::Violet => Self::Amber,
        }
    }
}

/// Cosmetic portal style. Never consulted by the graph algorithms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalStyle {
    /// Always drawn with this style.
    Fixed(FixedStyle),
    /// Takes the preferred style when the chamber becomes active.
    #[default]
    InheritCurrent,
    /// Takes the preferred style; its siblings get the opposite one.
    ToggleFromSibling,
}

impl PortalStyle {
    /// Resolves the displayed style against the current preferred style.
    #[inline]
    #[must_use]
    pub const fn resolve(self, preferred: FixedStyle) -> FixedStyle {
        match self {
            Self::Fixed(style) => style,
            Self::InheritCurrent | Self::ToggleFromSibling => preferred,
        }
    }
}

/// Detached portal description, as produced by a blueprint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalBlueprint {
    /// Left edge of the portal.
    pub x: i32,
    /// Top edge of the portal.
    pub y: i32,
    /// Height of the portal frame; its floor is at `y + height`.
    #[serde(default = "default_portal_height")]
    pub height: i32,
    /// Acceptable destination-kind prefixes.
    pub accepts: Vec<String>,
    /// Not an arrival point (unless the entry portal inverts entries).
    #[serde(default)]
    pub no_entry: bool,
    /// When used as an entry, flips which portals count as arrival points.
    #[serde(default)]
    pub invert_entries: bool,
    /// Cosmetic style.
    #[serde(default)]
    pub style: PortalStyle,
}

const fn default_portal_height() -> i32 {
    32
}

impl PortalBlueprint {
    /// Creates a plain portal accepting the given kinds.
    #[must_use]
    pub fn new(x: i32, y: i32, accepts: &[&str]) -> Self {
        Self {
            x,
            y,
            height: default_portal_height(),
            accepts: accepts.iter().map(|s| (*s).to_string()).collect(),
            no_entry: false,
            invert_entries: false,
            style: PortalStyle::default(),
        }
    }

    /// Marks the portal as not an arrival point.
    #[must_use]
    pub const fn with_no_entry(mut self, no_entry: bool) -> Self {
        self.no_entry = no_entry;
        self
    }

    /// Sets the invert-entries flag.
    #[must_use]
    pub const fn with_invert_entries(mut self, invert: bool) -> Self {
        self.invert_entries = invert;
        self
    }

    /// Sets the cosmetic style.
    #[must_use]
    pub const fn with_style(mut self, style: PortalStyle) -> Self {
        self.style = style;
        self
    }

    /// Attaches the blueprint to its committed owner.
    pub(crate) fn commit(self, owner: ChamberId) -> Portal {
        Portal {
            owner,
            destination: Destination::Unresolved(self.accepts),
            x: self.x,
            y: self.y,
            height: self.height,
            no_entry: self.no_entry,
            invert_entries: self.invert_entries,
            style: self.style,
        }
    }
}

/// A committed portal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Portal {
    owner: ChamberId,
    pub(crate) destination: Destination,
    /// Left edge of the portal.
    pub x: i32,
    /// Top edge of the portal.
    pub y: i32,
    /// Height of the portal frame.
    pub height: i32,
    /// Not an arrival point (unless the entry portal inverts entries).
    pub no_entry: bool,
    /// When used as an entry, flips which portals count as arrival points.
    pub invert_entries: bool,
    pub(crate) style: PortalStyle,
}

impl Portal {
    /// The chamber this portal lives in.
    #[inline]
    #[must_use]
    pub const fn owner(&self) -> ChamberId {
        self.owner
    }

    /// Where this portal leads.
    #[inline]
    #[must_use]
    pub const fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Cosmetic style.
    #[inline]
    #[must_use]
    pub const fn style(&self) -> PortalStyle {
        self.style
    }

    /// Returns true if the destination is a chamber identity.
    #[inline]
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self.destination, Destination::Resolved(_))
    }

    /// Y coordinate of the portal's floor line.
    #[inline]
    #[must_use]
    pub const fn floor(&self) -> i32 {
        self.y + self.height
    }

    /// Whether this portal may be chosen as the arrival end of a new link.
    ///
    /// `invert` is the entry portal's `invert_entries` flag.
    #[inline]
    #[must_use]
    pub const fn accepts_arrival(&self, invert: bool) -> bool {
        self.no_entry == invert
    }

    /// Finds the unique portal in `chamber` leading back to this portal's owner.
    ///
    /// `this` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// - `MissingLink` if no portal points back
    /// - `AmbiguousLink` if more than one does
    pub fn reciprocal_in(&self, this: PortalRef, chamber: &Chamber) -> GraphResult<usize> {
        let back = Destination::Resolved(self.owner);
        let search = find_unique(
            chamber.portals().iter().enumerate(),
            |(_, portal)| portal.destination == back,
        );
        match search {
            LinkSearch::Found((index, _)) => Ok(index),
            LinkSearch::NotFound => Err(GraphError::MissingLink { portal: this }),
            LinkSearch::Ambiguous(matches) => Err(GraphError::AmbiguousLink {
                portal: this,
                matches,
            }),
        }
    }
}

/// Outcome of an "exactly one" search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkSearch<T> {
    /// Exactly one item matched.
    Found(T),
    /// Nothing matched.
    NotFound,
    /// This many items matched.
    Ambiguous(usize),
}

/// Returns the single item satisfying `pred`, or says why there isn't one.
pub fn find_unique<I, F>(items: I, mut pred: F) -> LinkSearch<I::Item>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> bool,
{
    let mut found = None;
    let mut matches = 0usize;
    for item in items {
        if pred(&item) {
            matches += 1;
            if found.is_none() {
                found = Some(item);
            }
        }
    }
    match (found, matches) {
        (Some(item), 1) => LinkSearch::Found(item),
        (None, _) => LinkSearch::NotFound,
        (Some(_), n) => LinkSearch::Ambiguous(n),
    }
}
