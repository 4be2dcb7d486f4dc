//! # Chamber Themes
//!
//! A theme constrains which blueprints may be generated next to a chamber.
//!
//! Blueprints declare a [`ThemeRule`] (which neighbours they tolerate), while
//! committed chambers carry a single [`ChamberTheme`].

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The fixed theme set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Bone-lined burial halls.
    Crypt,
    /// Overgrown, spore-filled caverns.
    Fungal,
    /// Ice-bound chambers.
    Frost,
    /// Smouldering forges and lava cracks.
    Ember,
}

impl Theme {
    /// Every theme, in declaration order.
    pub const ALL: [Self; 4] = [Self::Crypt, Self::Fungal, Self::Frost, Self::Ember];

    /// Picks a theme uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Theme compatibility declared by a blueprint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeRule {
    /// Only generated next to themeless chambers.
    #[default]
    None,
    /// Compatible with every theme.
    Any,
    /// Compatible with the listed themes.
    Tags(Vec<Theme>),
}

impl ThemeRule {
    /// Whether a blueprint with this rule may follow a chamber themed `current`.
    ///
    /// Themeless and any-themed chambers admit everything.
    #[must_use]
    pub fn admits(&self, current: ChamberTheme) -> bool {
        match current {
            ChamberTheme::None | ChamberTheme::Any => true,
            ChamberTheme::Tag(theme) => match self {
                Self::Any => true,
                Self::Tags(tags) => tags.contains(&theme),
                Self::None => false,
            },
        }
    }

    /// Theme a freshly instantiated chamber starts with.
    #[must_use]
    pub fn initial_theme(&self) -> ChamberTheme {
        match self {
            Self::Any => ChamberTheme::Any,
            Self::Tags(tags) if tags.len() == 1 => ChamberTheme::Tag(tags[0]),
            Self::Tags(_) | Self::None => ChamberTheme::None,
        }
    }
}

/// Theme carried by a chamber.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChamberTheme {
    /// No theme.
    #[default]
    None,
    /// Accepts any theme next to it.
    Any,
    /// A concrete theme.
    Tag(Theme),
}

impl ChamberTheme {
    /// Returns true if this is a concrete theme tag.
    #[inline]
    #[must_use]
    pub const fn is_tagged(self) -> bool {
        matches!(self, Self::Tag(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_themeless_admits_everything() {
        assert!(ThemeRule::None.admits(ChamberTheme::None));
        assert!(ThemeRule::Tags(vec![Theme::Frost]).admits(ChamberTheme::None));
        assert!(ThemeRule::None.admits(ChamberTheme::Any));
    }

    #[test]
    fn test_tagged_chamber_filters() {
        let crypt = ChamberTheme::Tag(Theme::Crypt);
        assert!(ThemeRule::Any.admits(crypt));
        assert!(ThemeRule::Tags(vec![Theme::Ember, Theme::Crypt]).admits(crypt));
        assert!(!ThemeRule::Tags(vec![Theme::Ember]).admits(crypt));
        assert!(!ThemeRule::None.admits(crypt));
    }

    #[test]
    fn test_initial_theme() {
        assert_eq!(ThemeRule::Any.initial_theme(), ChamberTheme::Any);
        assert_eq!(
            ThemeRule::Tags(vec![Theme::Fungal]).initial_theme(),
            ChamberTheme::Tag(Theme::Fungal)
        );
        assert_eq!(
            ThemeRule::Tags(vec![Theme::Fungal, Theme::Frost]).initial_theme(),
            ChamberTheme::None
        );
    }
}
