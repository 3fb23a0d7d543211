use crate::config::env_file::EnvVars;
use crate::domain::model::{SeedCategory, SeedCustomization, SeedMenuItem};
use crate::utils::error::{Result, SeedError};
use crate::utils::validation::{
    find_duplicate, validate_non_empty_string, validate_non_negative, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../../data/seed_catalog.toml");

/// Records the seed run writes, in dependency order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedCatalog {
    pub categories: Vec<SeedCategory>,
    pub customizations: Vec<SeedCustomization>,
    pub menu: Vec<SeedMenuItem>,
}

impl SeedCatalog {
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG, |_| None)
    }

    /// Loads a catalog file, substituting `${VAR}` from the merged env files.
    pub fn from_file<P: AsRef<Path>>(path: P, env: &EnvVars) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SeedError::IoError)?;
        Self::from_toml_str(&content, |name| env.lookup(name))
    }

    pub fn from_toml_str<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let processed = substitute_env_vars(content, lookup);
        let catalog: SeedCatalog =
            toml::from_str(&processed).map_err(|e| SeedError::CatalogError {
                message: format!("TOML parsing error: {}", e),
            })?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Number of documents a full run creates, join records included.
    pub fn document_count(&self) -> usize {
        self.categories.len()
            + self.customizations.len()
            + self.menu.len()
            + self.link_count()
    }

    pub fn link_count(&self) -> usize {
        self.menu.iter().map(|item| item.customizations.len()).sum()
    }
}

impl Validate for SeedCatalog {
    /// Every name must be unique within its section and every reference
    /// must resolve, so a run never writes a dangling relationship.
    fn validate(&self) -> Result<()> {
        if let Some(name) = find_duplicate(self.categories.iter().map(|c| c.name.as_str())) {
            return Err(catalog_error(format!("duplicate category '{}'", name)));
        }
        if let Some(name) = find_duplicate(self.customizations.iter().map(|c| c.name.as_str())) {
            return Err(catalog_error(format!("duplicate customization '{}'", name)));
        }

        for category in &self.categories {
            validate_non_empty_string("categories.name", &category.name)?;
        }
        for customization in &self.customizations {
            validate_non_empty_string("customizations.name", &customization.name)?;
            validate_non_negative("customizations.price", customization.price)?;
        }

        let categories: HashSet<&str> = self.categories.iter().map(|c| c.name.as_str()).collect();
        let customizations: HashSet<&str> =
            self.customizations.iter().map(|c| c.name.as_str()).collect();

        for item in &self.menu {
            validate_non_empty_string("menu.name", &item.name)?;
            validate_non_negative("menu.price", item.price)?;
            validate_non_negative("menu.rating", item.rating)?;

            if !categories.contains(item.category_name.as_str()) {
                return Err(catalog_error(format!(
                    "menu item '{}' references unknown category '{}'",
                    item.name, item.category_name
                )));
            }
            if let Some(unknown) = item
                .customizations
                .iter()
                .find(|name| !customizations.contains(name.as_str()))
            {
                return Err(catalog_error(format!(
                    "menu item '{}' references unknown customization '{}'",
                    item.name, unknown
                )));
            }
        }

        Ok(())
    }
}

fn catalog_error(message: String) -> SeedError {
    SeedError::CatalogError { message }
}

/// Replaces `${VAR}`; unknown variables are left as written.
fn substitute_env_vars<F>(content: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CustomizationKind;
    use std::io::Write;

    const SMALL: &str = r#"
[[categories]]
name = "Burgers"
description = "Juicy grilled burgers"

[[customizations]]
name = "Extra Cheese"
price = 25
type = "topping"

[[customizations]]
name = "Coke"
price = 30
type = "side"

[[menu]]
name = "Classic Cheeseburger"
description = "Beef patty, cheese, lettuce, tomato"
image_url = "${CDN}/burger.png"
price = 25.99
rating = 4.5
calories = 550
protein = 25
category_name = "Burgers"
customizations = ["Extra Cheese", "Coke"]
"#;

    #[test]
    fn test_builtin_catalog() {
        let catalog = SeedCatalog::builtin().unwrap();
        assert_eq!(catalog.categories.len(), 6);
        assert_eq!(catalog.customizations.len(), 18);
        assert_eq!(catalog.menu.len(), 14);
        assert_eq!(catalog.link_count(), 62);
        assert_eq!(catalog.document_count(), 6 + 18 + 14 + 62);
        assert_eq!(catalog.customizations[0].kind, CustomizationKind::Topping);
    }

    #[test]
    fn test_env_substitution() {
        let catalog = SeedCatalog::from_toml_str(SMALL, |name| {
            (name == "CDN").then(|| "https://cdn.example".to_string())
        })
        .unwrap();
        assert_eq!(catalog.menu[0].image_url, "https://cdn.example/burger.png");
        assert_eq!(catalog.customizations[0].price, 25.0);

        let untouched = SeedCatalog::from_toml_str(SMALL, |_| None).unwrap();
        assert_eq!(untouched.menu[0].image_url, "${CDN}/burger.png");
    }

    #[test]
    fn test_from_file_reads_vars_from_env_files() {
        let mut catalog_file = tempfile::NamedTempFile::new().unwrap();
        catalog_file.write_all(SMALL.as_bytes()).unwrap();
        let mut env_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(env_file, "CDN=https://cdn.from-env-file.example").unwrap();

        let mut env = EnvVars::new();
        env.load_file(env_file.path(), true).unwrap();
        let catalog = SeedCatalog::from_file(catalog_file.path(), &env).unwrap();

        assert_eq!(
            catalog.menu[0].image_url,
            "https://cdn.from-env-file.example/burger.png"
        );
    }

    #[test]
    fn test_unknown_category_rejected() {
        let content = SMALL.replace("category_name = \"Burgers\"", "category_name = \"Tacos\"");
        let err = SeedCatalog::from_toml_str(&content, |_| None).unwrap_err();
        assert!(err.to_string().contains("unknown category 'Tacos'"));
    }

    #[test]
    fn test_unknown_customization_rejected() {
        let content = SMALL.replace("\"Coke\"]", "\"Sprite\"]");
        let err = SeedCatalog::from_toml_str(&content, |_| None).unwrap_err();
        assert!(err.to_string().contains("unknown customization 'Sprite'"));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let mut catalog = SeedCatalog::from_toml_str(SMALL, |_| None).unwrap();
        let duplicate = catalog.categories[0].clone();
        catalog.categories.push(duplicate);

        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate category 'Burgers'"));
    }
}
