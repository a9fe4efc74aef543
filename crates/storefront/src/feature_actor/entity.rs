use super::error::FeatureError;
use crate::model::timestamp;
use crate::model::{FeatureCreate, FeatureId, FeatureImage};
use async_trait::async_trait;
use entity_actor::ActorEntity;

#[async_trait]
impl ActorEntity for FeatureImage {
    type Id = FeatureId;
    type Create = FeatureCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = FeatureError;

    fn from_create_params(id: FeatureId, params: FeatureCreate) -> Result<Self, Self::Error> {
        let image = params.image.trim();
        if image.is_empty() {
            return Err(FeatureError::MissingImage);
        }
        Ok(Self {
            id,
            image: image.to_string(),
            created_at: timestamp::now(),
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
