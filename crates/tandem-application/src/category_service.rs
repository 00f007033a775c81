//! Category access service.

use crate::notify::Notifier;
use std::collections::BTreeSet;
use std::sync::Arc;
use tandem_core::category::{CategoryRepository, DEFAULT_CATEGORIES};
use tandem_core::error::Result;

/// Read access to the usable category labels.
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    notifier: Arc<dyn Notifier>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            categories,
            notifier,
        }
    }

    /// The default labels merged with the remotely stored ones,
    /// deduplicated and sorted.
    pub async fn list(&self) -> Result<Vec<String>> {
        let stored = match self.categories.labels().await {
            Ok(labels) => labels,
            Err(err) => {
                self.notifier
                    .error(&format!("Could not load categories: {err}"));
                return Err(err);
            }
        };

        let mut labels: BTreeSet<String> = DEFAULT_CATEGORIES
            .iter()
            .map(|label| label.to_string())
            .collect();
        labels.extend(stored.into_iter().filter(|label| !label.is_empty()));
        Ok(labels.into_iter().collect())
    }
}
