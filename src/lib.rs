pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::AppwriteClient;
pub use config::{backend::BackendConfig, catalog::SeedCatalog, env_file::EnvVars};
pub use crate::core::{menu::MenuService, seeder::SeedReport, seeder::Seeder};
pub use domain::cart::{Cart, PaymentSummary, PricingPolicy};
pub use domain::model::{CartCustomization, CartItemInput, CartLineItem, MenuItem, Money};
pub use utils::error::{Result, SeedError};
