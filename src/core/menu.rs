use crate::domain::model::MenuItem;
use crate::domain::ports::{DocumentStore, Query};
use crate::utils::error::{Result, SeedError};

/// Read side of the menu collection, as the home and item detail screens use it.
pub struct MenuService<S: DocumentStore> {
    store: S,
    menu_collection: String,
    project_id: String,
}

impl<S: DocumentStore> MenuService<S> {
    pub fn new(store: S, menu_collection: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            store,
            menu_collection: menu_collection.into(),
            project_id: project_id.into(),
        }
    }

    pub async fn get_menu_item(&self, id: &str) -> Result<MenuItem> {
        let document = self.store.get_document(&self.menu_collection, id).await?;
        Ok(serde_json::from_value(document)?)
    }

    /// Highest rated items first.
    pub async fn popular_menu(&self, limit: usize) -> Result<Vec<MenuItem>> {
        let queries = [Query::order_desc("rating"), Query::limit(limit)];
        self.fetch(&queries).await
    }

    /// Items in one category, optionally narrowed by a name search.
    pub async fn menu_by_category(
        &self,
        category_id: &str,
        search: Option<&str>,
    ) -> Result<Vec<MenuItem>> {
        let mut queries = vec![Query::equal("categories", category_id)];
        if let Some(text) = search.filter(|text| !text.trim().is_empty()) {
            queries.push(Query::search("name", text));
        }
        self.fetch(&queries).await
    }

    /// Image URL with the project id attached, which the storage service requires.
    pub fn image_url(&self, item: &MenuItem) -> String {
        let separator = if item.image_url.contains('?') { '&' } else { '?' };
        format!("{}{}project={}", item.image_url, separator, self.project_id)
    }

    async fn fetch(&self, queries: &[Query]) -> Result<Vec<MenuItem>> {
        let documents = self
            .store
            .list_documents(&self.menu_collection, queries)
            .await?;
        tracing::debug!("Fetched {} menu documents", documents.len());

        documents
            .into_iter()
            .map(|document| serde_json::from_value(document).map_err(SeedError::from))
            .collect()
    }
}
