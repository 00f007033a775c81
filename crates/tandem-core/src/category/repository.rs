//! Category repository trait.

use crate::error::Result;
use async_trait::async_trait;

/// Read access to the remote category labels.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Returns the labels currently stored remotely, in collection order.
    async fn labels(&self) -> Result<Vec<String>>;
}
