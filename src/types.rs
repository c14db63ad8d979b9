use crate::error::Result;

/// Raw group entry as returned by the directory service
pub type RawGroupData = serde_json::Value;

/// Anything that can answer "which groups are near this location".
#[async_trait::async_trait]
pub trait GroupSource: Send + Sync {
    /// Unique identifier for this source
    fn source_name(&self) -> &'static str;

    /// Fetch the raw group entries within `radius` miles of `location`.
    async fn search_groups(&self, location: &str, radius: u32) -> Result<Vec<RawGroupData>>;
}
