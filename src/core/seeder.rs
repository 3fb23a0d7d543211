use crate::config::backend::CollectionIds;
use crate::config::catalog::SeedCatalog;
use crate::domain::ports::DocumentStore;
use crate::utils::error::{Result, SeedError};
use crate::utils::monitor::StageMonitor;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub categories: usize,
    pub customizations: usize,
    pub menu_items: usize,
    pub links: usize,
    /// Category name to created document id.
    pub category_ids: BTreeMap<String, String>,
    /// Customization name to created document id.
    pub customization_ids: BTreeMap<String, String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SeedReport {
    pub fn total_documents(&self) -> usize {
        self.categories + self.customizations + self.menu_items + self.links
    }
}

/// Writes a catalog into the backend: categories, then customizations, then
/// menu items with their customization links.
///
/// Writes are sequential and the run stops at the first failure. Nothing is
/// rolled back and a second run creates a second copy of every record.
pub struct Seeder<S: DocumentStore> {
    store: S,
    collections: CollectionIds,
    monitoring: bool,
}

impl<S: DocumentStore> Seeder<S> {
    pub fn new(store: S, collections: CollectionIds) -> Self {
        Self {
            store,
            collections,
            monitoring: false,
        }
    }

    pub fn new_with_monitoring(store: S, collections: CollectionIds, monitoring: bool) -> Self {
        Self {
            store,
            collections,
            monitoring,
        }
    }

    pub async fn run(&self, catalog: &SeedCatalog) -> Result<SeedReport> {
        let started_at = Utc::now();
        let mut monitor = StageMonitor::new(self.monitoring);
        println!("🌱  Starting seed...\n");
        tracing::info!("Seeding {} documents", catalog.document_count());

        println!("📂  Creating categories...");
        monitor.begin_stage();
        let mut category_ids = BTreeMap::new();
        for category in &catalog.categories {
            let doc = self
                .store
                .create_document(
                    &self.collections.categories,
                    json!({ "name": category.name, "description": category.description }),
                )
                .await?;
            tracing::debug!("category {} -> {}", category.name, doc.id);
            category_ids.insert(category.name.clone(), doc.id);
            println!("   ✔ {}", category.name);
        }
        monitor.end_stage("categories", category_ids.len());

        println!("\n🧂  Creating customizations...");
        let mut customization_ids = BTreeMap::new();
        for customization in &catalog.customizations {
            let doc = self
                .store
                .create_document(
                    &self.collections.customizations,
                    json!({
                        "name": customization.name,
                        "price": customization.price,
                        "type": customization.kind,
                    }),
                )
                .await?;
            tracing::debug!("customization {} -> {}", customization.name, doc.id);
            customization_ids.insert(customization.name.clone(), doc.id);
            println!("   ✔ {}", customization.name);
        }
        monitor.end_stage("customizations", customization_ids.len());

        println!("\n🍔  Creating menu items...");
        let mut links = 0;
        for item in &catalog.menu {
            let category_id = resolve(&category_ids, "category", &item.category_name)?;
            let doc = self
                .store
                .create_document(
                    &self.collections.menu,
                    json!({
                        "name": item.name,
                        "description": item.description,
                        "image_url": item.image_url,
                        "price": item.price,
                        "rating": item.rating,
                        "calories": item.calories,
                        "protein": item.protein,
                        "categories": category_id,
                    }),
                )
                .await?;

            for name in &item.customizations {
                let customization_id = resolve(&customization_ids, "customization", name)?;
                self.store
                    .create_document(
                        &self.collections.menu_customizations,
                        json!({ "menu": doc.id, "customizations": customization_id }),
                    )
                    .await?;
                links += 1;
            }

            tracing::debug!(
                "menu item {} -> {} ({} customizations)",
                item.name,
                doc.id,
                item.customizations.len()
            );
            println!("   ✔ {}", item.name);
        }
        monitor.end_stage("menu items", catalog.menu.len() + links);
        monitor.log_final_stats();

        println!("\n✅  Seed complete!");
        let report = SeedReport {
            categories: category_ids.len(),
            customizations: customization_ids.len(),
            menu_items: catalog.menu.len(),
            links,
            category_ids,
            customization_ids,
            started_at,
            finished_at: Utc::now(),
        };
        tracing::info!(
            "Created {} documents in {}ms",
            report.total_documents(),
            (report.finished_at - report.started_at).num_milliseconds()
        );
        Ok(report)
    }
}

fn resolve<'a>(ids: &'a BTreeMap<String, String>, kind: &str, name: &str) -> Result<&'a str> {
    ids.get(name)
        .map(String::as_str)
        .ok_or_else(|| SeedError::CatalogError {
            message: format!("no {} named '{}' was created", kind, name),
        })
}
