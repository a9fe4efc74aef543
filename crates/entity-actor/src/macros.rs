//! Client boilerplate generation.

/// Implements the plumbing shared by every resource client.
///
/// Given a client struct with an `inner: ResourceClient<Entity>` field, this
/// generates `new`, the [`ActorClient`](crate::ActorClient) impl, and a
/// `fetch_<name>` accessor that turns a missing entity into the error's
/// `NotFound(String)` variant.
///
/// ```rust,ignore
/// #[derive(Clone)]
/// pub struct CartClient {
///     inner: ResourceClient<Cart>,
/// }
///
/// impl_resource_client!(CartClient, Cart, CartError, cart);
/// // CartClient::new(inner), CartClient::fetch_cart(id)
/// ```
#[macro_export]
macro_rules! impl_resource_client {
    ($client:ident, $entity:ty, $error:ty, $name:ident) => {
        impl $client {
            pub fn new(inner: $crate::ResourceClient<$entity>) -> Self {
                Self { inner }
            }

            $crate::__paste! {
                #[tracing::instrument(skip(self))]
                pub async fn [<fetch_ $name>](
                    &self,
                    id: <$entity as $crate::ActorEntity>::Id,
                ) -> Result<$entity, $error> {
                    let key = id.to_string();
                    <Self as $crate::ActorClient<$entity>>::get(self, id)
                        .await?
                        .ok_or(<$error>::NotFound(key))
                }
            }
        }

        #[async_trait::async_trait]
        impl $crate::ActorClient<$entity> for $client {
            type Error = $error;

            fn inner(&self) -> &$crate::ResourceClient<$entity> {
                &self.inner
            }
        }
    };
}
