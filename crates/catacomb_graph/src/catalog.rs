//! # Blueprint Catalog
//!
//! The generator only needs three things from a blueprint: its name, its
//! theme rule, and a way to instantiate it. [`Blueprint`] and
//! [`BlueprintCatalog`] are that seam. Content authoring lives elsewhere.
//!
//! [`TemplateCatalog`] is the data-driven implementation: a list of
//! [`ChamberTemplate`]s loaded from TOML.
//!
//! ## Format
//!
//! ```toml
//! [[template]]
//! name = "crypt-hall"
//! theme = { tags = ["crypt"] }
//!
//! [[template.decoration]]
//! name = "skull-pile"
//! theme_bearing = true
//!
//! [[template.portal]]
//! x = 0
//! y = 64
//! accepts = ["crypt", "cave"]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chamber::{Decoration, DetachedChamber};
use crate::error::{GraphError, GraphResult};
use crate::portal::PortalBlueprint;
use crate::theme::ThemeRule;

/// A named chamber template.
pub trait Blueprint {
    /// Globally unique name, matched by prefix against portal destinations.
    fn name(&self) -> &str;

    /// Which neighbouring themes this blueprint tolerates.
    fn theme_rule(&self) -> &ThemeRule;

    /// Produces a detached chamber with its content already placed.
    fn instantiate(&self) -> DetachedChamber;
}

/// Source of blueprints for the generator.
pub trait BlueprintCatalog {
    /// Every blueprint, in catalog order.
    fn blueprints(&self) -> Box<dyn Iterator<Item = &dyn Blueprint> + '_>;

    /// Looks a blueprint up by exact name.
    fn find(&self, name: &str) -> Option<&dyn Blueprint> {
        self.blueprints().find(|b| b.name() == name)
    }
}

/// A blueprint described as data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChamberTemplate {
    /// Unique name.
    pub name: String,
    /// Theme compatibility.
    #[serde(default)]
    pub theme: ThemeRule,
    /// Skips automatic theme assignment.
    #[serde(default)]
    pub theme_exempt: bool,
    /// Content placed on instantiation.
    #[serde(default, rename = "decoration")]
    pub decorations: Vec<Decoration>,
    /// Portals placed on instantiation.
    #[serde(default, rename = "portal")]
    pub portals: Vec<PortalBlueprint>,
}

impl ChamberTemplate {
    /// Creates an empty template with no theme.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            theme: ThemeRule::None,
            theme_exempt: false,
            decorations: Vec::new(),
            portals: Vec::new(),
        }
    }

    /// Sets the theme rule.
    #[must_use]
    pub fn with_theme(mut self, theme: ThemeRule) -> Self {
        self.theme = theme;
        self
    }

    /// Exempts the template from automatic theme assignment.
    #[must_use]
    pub fn theme_exempt(mut self) -> Self {
        self.theme_exempt = true;
        self
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
}

impl Blueprint for ChamberTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn theme_rule(&self) -> &ThemeRule {
        &self.theme
    }

    fn instantiate(&self) -> DetachedChamber {
        DetachedChamber {
            kind: self.name.clone(),
            theme: self.theme.initial_theme(),
            theme_exempt: self.theme_exempt,
            decorations: self.decorations.clone(),
            portals: self.portals.clone(),
        }
    }
}

/// A catalog of data-driven templates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCatalog {
    #[serde(default, rename = "template")]
    templates: Vec<ChamberTemplate>,
}

impl TemplateCatalog {
    /// Builds a catalog from templates.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a name is empty or used twice.
    pub fn new(templates: Vec<ChamberTemplate>) -> GraphResult<Self> {
        let catalog = Self { templates };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on malformed TOML or invalid templates.
    pub fn from_toml_str(text: &str) -> GraphResult<Self> {
        let catalog: Self =
            toml::from_str(text).map_err(|e| GraphError::InvalidConfig(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            GraphError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if the catalog has no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// All templates, in catalog order.
    #[must_use]
    pub fn templates(&self) -> &[ChamberTemplate] {
        &self.templates
    }

    fn validate(&self) -> GraphResult<()> {
        let mut seen = HashSet::new();
        for template in &self.templates {
            if template.name.is_empty() {
                return Err(GraphError::InvalidConfig(
                    "template name must not be empty".to_string(),
                ));
            }
            if !seen.insert(template.name.as_str()) {
                return Err(GraphError::InvalidConfig(format!(
                    "duplicate template name `{}`",
                    template.name
                )));
            }
        }
        Ok(())
    }
}

impl BlueprintCatalog for TemplateCatalog {
    fn blueprints(&self) -> Box<dyn Iterator<Item = &dyn Blueprint> + '_> {
        Box::new(self.templates.iter().map(|t| t as &dyn Blueprint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ChamberTheme, Theme};

    const SAMPLE: &str = r#"
        [[template]]
        name = "crypt-hall"
        theme = { tags = ["crypt"] }

        [[template.decoration]]
        name = "skull-pile"
        theme_bearing = true

        [[template.portal]]
        x = 0
        y = 64
        accepts = ["crypt", "cave"]

        [[template.portal]]
        x = 300
        y = 64
        accepts = ["cave"]
        no_entry = true
        style = { fixed = "violet" }

        [[template]]
        name = "cave-mouth"
        theme = "any"
        theme_exempt = true

        [[template.portal]]
        x = 10
        y = 0
        accepts = ["crypt"]
        style = "toggle_from_sibling"
    "#;

    #[test]
    fn test_parse_sample_catalog() {
        let catalog = TemplateCatalog::from_toml_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);

        let hall = catalog.find("crypt-hall").unwrap();
        assert_eq!(hall.theme_rule(), &ThemeRule::Tags(vec![Theme::Crypt]));

        let detached = hall.instantiate();
        assert_eq!(detached.kind, "crypt-hall");
        assert_eq!(detached.theme, ChamberTheme::Tag(Theme::Crypt));
        assert_eq!(detached.portals.len(), 2);
        assert_eq!(detached.portals[0].height, 32);
        assert!(detached.portals[1].no_entry);
        assert!(detached.decorations[0].theme_bearing);

        let cave = catalog.find("cave-mouth").unwrap().instantiate();
        assert!(cave.theme_exempt);
        assert_eq!(cave.theme, ChamberTheme::Any);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = TemplateCatalog::new(vec![
            ChamberTemplate::new("cave"),
            ChamberTemplate::new("cave"),
        ]);
        assert!(matches!(result, Err(GraphError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = TemplateCatalog::from_toml_str("[[template]]\nname = 5");
        assert!(matches!(result, Err(GraphError::InvalidConfig(_))));
    }
}
