use crate::config::env_file::EnvVars;
use crate::utils::error::{Result, SeedError};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};

pub const ENDPOINT_VAR: &str = "EXPO_PUBLIC_APPWRITE_ENDPOINT";
pub const PROJECT_ID_VAR: &str = "EXPO_PUBLIC_APPWRITE_PROJECT_ID";
pub const API_KEY_VAR: &str = "APPWRITE_API_KEY";
pub const DATABASE_ID_VAR: &str = "EXPO_PUBLIC_APPWRITE_DATABASE_ID";
pub const CATEGORIES_COLLECTION_VAR: &str = "EXPO_PUBLIC_APPWRITE_CATEGORIES_COLLECTION_ID";
pub const MENU_COLLECTION_VAR: &str = "EXPO_PUBLIC_APPWRITE_MENU_COLLECTION_ID";
pub const CUSTOMIZATIONS_COLLECTION_VAR: &str =
    "EXPO_PUBLIC_APPWRITE_CUSTOMIZATIONS_COLLECTION_ID";
pub const MENU_CUSTOMIZATIONS_COLLECTION_VAR: &str =
    "EXPO_PUBLIC_APPWRITE_MENU_CUSTOMIZATIONS_COLLECTION_ID";

/// Every variable the seed run needs, in the order they are reported.
pub const REQUIRED_VARS: [&str; 8] = [
    ENDPOINT_VAR,
    PROJECT_ID_VAR,
    API_KEY_VAR,
    DATABASE_ID_VAR,
    CATEGORIES_COLLECTION_VAR,
    MENU_COLLECTION_VAR,
    CUSTOMIZATIONS_COLLECTION_VAR,
    MENU_CUSTOMIZATIONS_COLLECTION_VAR,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionIds {
    pub categories: String,
    pub menu: String,
    pub customizations: String,
    pub menu_customizations: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub endpoint: String,
    pub project_id: String,
    /// Server key; client-side readers run without one.
    pub api_key: Option<String>,
    pub database_id: String,
    pub collections: CollectionIds,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("database_id", &self.database_id)
            .field("collections", &self.collections)
            .finish()
    }
}

impl BackendConfig {
    /// Builds the seed configuration, reporting every missing variable at once.
    pub fn from_env(env: &EnvVars) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|name| env.get(name).is_none())
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(SeedError::MissingEnvVars { names: missing });
        }

        let var = |name: &str| env.lookup(name).unwrap_or_default();
        let config = Self {
            endpoint: var(ENDPOINT_VAR),
            project_id: var(PROJECT_ID_VAR),
            api_key: env.lookup(API_KEY_VAR),
            database_id: var(DATABASE_ID_VAR),
            collections: CollectionIds {
                categories: var(CATEGORIES_COLLECTION_VAR),
                menu: var(MENU_COLLECTION_VAR),
                customizations: var(CUSTOMIZATIONS_COLLECTION_VAR),
                menu_customizations: var(MENU_CUSTOMIZATIONS_COLLECTION_VAR),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn collections_url(&self) -> String {
        format!(
            "{}/databases/{}/collections",
            self.endpoint.trim_end_matches('/'),
            self.database_id
        )
    }
}

impl Validate for BackendConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_non_empty_string("project_id", &self.project_id)?;
        validate_non_empty_string("database_id", &self.database_id)?;
        validate_non_empty_string("collections.categories", &self.collections.categories)?;
        validate_non_empty_string("collections.menu", &self.collections.menu)?;
        validate_non_empty_string(
            "collections.customizations",
            &self.collections.customizations,
        )?;
        validate_non_empty_string(
            "collections.menu_customizations",
            &self.collections.menu_customizations,
        )?;
        Ok(())
    }
}
