//! Remote implementation of the category repository.

use crate::remote::{Query, RemoteStore};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tandem_core::category::CategoryRepository;
use tandem_core::error::Result;

const CATEGORIES_TABLE: &str = "categories";

#[derive(Deserialize)]
struct CategoryRow {
    name: String,
}

/// Category labels backed by the remote store.
pub struct RemoteCategoryRepository {
    store: Arc<RemoteStore>,
}

impl RemoteCategoryRepository {
    pub fn new(store: Arc<RemoteStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CategoryRepository for RemoteCategoryRepository {
    async fn labels(&self) -> Result<Vec<String>> {
        let rows: Vec<CategoryRow> = self
            .store
            .select(
                Query::table(CATEGORIES_TABLE)
                    .columns("name")
                    .order_asc("name"),
            )
            .await?;
        Ok(rows.into_iter().map(|row| row.name).collect())
    }
}
