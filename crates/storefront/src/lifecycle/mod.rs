//! # System Lifecycle
//!
//! [`StorefrontSystem`] creates every actor, injects its dependencies, and
//! shuts the whole set down again.
//!
//! ## Wiring
//!
//! Actors are created first and started second, so a context can hold the
//! client of an actor that is not running yet:
//!
//! ```text
//! products  <- carts, wishlists, reviews, orders
//! carts     <- orders
//! users, addresses, features: no dependencies
//! ```
//!
//! The graph is acyclic. An actor's loop ends once every client of it is
//! gone, and the clients held in contexts are dropped when the dependent
//! actor's loop ends, so dropping the system's own clients shuts everything
//! down from the leaves inwards.

use crate::cart_actor::CartContext;
use crate::clients::{
    AddressClient, CartClient, FeatureClient, OrderClient, ProductClient, ReviewClient,
    UserClient, WishlistClient,
};
use crate::config::{AdminSeed, StorefrontConfig};
use crate::model::{Role, User, UserCreate, UserUpdate};
use crate::order_actor::OrderContext;
use crate::review_actor::ReviewContext;
use crate::user_actor::UserError;
use crate::wishlist_actor::WishlistContext;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Every running actor of the storefront, reachable through its client.
pub struct StorefrontSystem {
    pub users: UserClient,
    pub products: ProductClient,
    pub carts: CartClient,
    pub wishlists: WishlistClient,
    pub addresses: AddressClient,
    pub orders: OrderClient,
    pub reviews: ReviewClient,
    pub features: FeatureClient,
    /// Actor tasks, dependents before their dependencies.
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl StorefrontSystem {
    /// Spawns all actors. Must be called inside a Tokio runtime.
    pub fn new(config: &StorefrontConfig) -> Self {
        let buffer = config.channel_buffer;

        // 1. Create actors (no dependencies yet)
        let (user_actor, users) = crate::user_actor::new(buffer);
        let (product_actor, products) = crate::product_actor::new(buffer);
        let (cart_actor, carts) = crate::cart_actor::new(buffer);
        let (wishlist_actor, wishlists) = crate::wishlist_actor::new(buffer);
        let (address_actor, addresses) = crate::address_actor::new(buffer);
        let (order_actor, orders) = crate::order_actor::new(buffer);
        let (review_actor, reviews) = crate::review_actor::new(buffer);
        let (feature_actor, features) = crate::feature_actor::new(buffer);

        // 2. Start actors with injected context
        let handles = vec![
            (
                "order",
                tokio::spawn(order_actor.run(OrderContext {
                    products: products.clone(),
                    carts: carts.clone(),
                    policy: config.order_policy,
                })),
            ),
            (
                "review",
                tokio::spawn(review_actor.run(ReviewContext {
                    products: products.clone(),
                    policy: config.review_policy,
                })),
            ),
            (
                "wishlist",
                tokio::spawn(wishlist_actor.run(WishlistContext {
                    products: products.clone(),
                })),
            ),
            (
                "cart",
                tokio::spawn(cart_actor.run(CartContext {
                    products: products.clone(),
                })),
            ),
            ("product", tokio::spawn(product_actor.run(()))),
            ("user", tokio::spawn(user_actor.run(()))),
            ("address", tokio::spawn(address_actor.run(()))),
            ("feature", tokio::spawn(feature_actor.run(()))),
        ];

        info!(actors = handles.len(), buffer, "Storefront actors started");

        Self {
            users,
            products,
            carts,
            wishlists,
            addresses,
            orders,
            reviews,
            features,
            handles,
        }
    }

    /// Makes sure the configured administrator exists and holds the admin
    /// role. Safe to call on every start.
    pub async fn bootstrap_admin(&self, seed: &AdminSeed) -> Result<User, UserError> {
        match self.users.find_by_email(&seed.email).await? {
            Some(user) if user.role == Role::Admin => Ok(user),
            Some(user) => {
                info!(user_id = %user.id, "Promoting configured administrator");
                self.users
                    .update_user(
                        user.id,
                        UserUpdate {
                            role: Some(Role::Admin),
                            ..UserUpdate::default()
                        },
                    )
                    .await
            }
            None => {
                let admin = self
                    .users
                    .register(UserCreate {
                        user_name: seed.user_name.clone(),
                        email: seed.email.clone(),
                        role: Role::Admin,
                    })
                    .await?;
                info!(user_id = %admin.id, "Administrator account created");
                Ok(admin)
            }
        }
    }

    /// Drops every client and waits for all actors to finish.
    ///
    /// Clones handed out earlier (for example to the HTTP router) must be
    /// dropped first, or the corresponding actor keeps running.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        let StorefrontSystem {
            users,
            products,
            carts,
            wishlists,
            addresses,
            orders,
            reviews,
            features,
            handles,
        } = self;
        drop((users, products, carts, wishlists, addresses, orders, reviews, features));

        for (name, handle) in handles {
            if let Err(e) = handle.await {
                error!(actor = name, "Actor task failed: {:?}", e);
                return Err(format!("{name} actor task failed: {e:?}"));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
