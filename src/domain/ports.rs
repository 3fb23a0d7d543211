use crate::domain::model::CreatedDocument;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Filter/ordering clause understood by the document store.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Limit(usize),
    Equal(String, Value),
    OrderDesc(String),
    Search(String, String),
}

impl Query {
    pub fn limit(n: usize) -> Self {
        Query::Limit(n)
    }

    pub fn equal(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Query::Equal(attribute.into(), value.into())
    }

    pub fn order_desc(attribute: impl Into<String>) -> Self {
        Query::OrderDesc(attribute.into())
    }

    pub fn search(attribute: impl Into<String>, text: impl Into<String>) -> Self {
        Query::Search(attribute.into(), text.into())
    }

    /// JSON query string, e.g. `{"method":"limit","values":[6]}`.
    pub fn to_query_string(&self) -> String {
        let value = match self {
            Query::Limit(n) => json!({"method": "limit", "values": [n]}),
            Query::Equal(attribute, value) => {
                let values = match value {
                    Value::Array(items) => Value::Array(items.clone()),
                    other => Value::Array(vec![other.clone()]),
                };
                json!({"method": "equal", "attribute": attribute, "values": values})
            }
            Query::OrderDesc(attribute) => json!({"method": "orderDesc", "attribute": attribute}),
            Query::Search(attribute, text) => {
                json!({"method": "search", "attribute": attribute, "values": [text]})
            }
        };
        value.to_string()
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create_document(&self, collection_id: &str, data: Value) -> Result<CreatedDocument>;

    async fn get_document(&self, collection_id: &str, document_id: &str) -> Result<Value>;

    async fn list_documents(&self, collection_id: &str, queries: &[Query]) -> Result<Vec<Value>>;
}
