use crate::feature_actor::FeatureError;
use crate::model::{FeatureCreate, FeatureImage};
use entity_actor::{impl_resource_client, ActorClient, Filter, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct FeatureClient {
    inner: ResourceClient<FeatureImage>,
}

impl_resource_client!(FeatureClient, FeatureImage, FeatureError, feature);

impl FeatureClient {
    #[instrument(skip(self))]
    pub async fn add_feature(&self, params: FeatureCreate) -> Result<FeatureImage, FeatureError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        self.fetch_feature(id).await
    }

    /// Banners in the order they were added.
    #[instrument(skip(self))]
    pub async fn list_features(&self) -> Result<Vec<FeatureImage>, FeatureError> {
        self.list(Filter::all()).await
    }
}
