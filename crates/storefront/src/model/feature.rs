use super::timestamp::{self, Timestamp};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Identifies a promotional banner.
    FeatureId,
    "feature"
);

/// A promotional banner image shown on the storefront home page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureImage {
    pub id: FeatureId,
    pub image: String,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCreate {
    pub image: String,
}
