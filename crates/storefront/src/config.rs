//! Runtime configuration, read from `STOREFRONT_*` environment variables.

use crate::model::StatusFlow;
use std::net::SocketAddr;

/// Order lifecycle switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderPolicy {
    /// Include the `on-the-way` stage between `shipped` and `delivered`.
    pub on_the_way_stage: bool,
    /// Return reserved units to stock when an order is cancelled or rejected.
    pub restock_on_cancel: bool,
}

impl Default for OrderPolicy {
    fn default() -> Self {
        Self {
            on_the_way_stage: true,
            restock_on_cancel: false,
        }
    }
}

impl OrderPolicy {
    pub fn flow(&self) -> StatusFlow {
        StatusFlow {
            on_the_way: self.on_the_way_stage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewPolicy {
    /// Reject a second review of the same product by the same user.
    pub one_review_per_user: bool,
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            one_review_per_user: true,
        }
    }
}

/// Administrator account created at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub user_name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub bind_addr: SocketAddr,
    /// Request queue capacity of each actor.
    pub channel_buffer: usize,
    /// Tracing directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub order_policy: OrderPolicy,
    pub review_policy: ReviewPolicy,
    pub admin: Option<AdminSeed>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            channel_buffer: 64,
            log_filter: "info".to_string(),
            order_policy: OrderPolicy::default(),
            review_policy: ReviewPolicy::default(),
            admin: None,
        }
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl StorefrontConfig {
    /// Defaults overridden by whatever `STOREFRONT_*` variables are set.
    /// Unparsable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let bind_addr = env_string("STOREFRONT_BIND")
            .and_then(|v| v.parse::<SocketAddr>().ok())
            .unwrap_or(defaults.bind_addr);
        let admin = env_string("STOREFRONT_ADMIN_EMAIL").map(|email| AdminSeed {
            user_name: env_string("STOREFRONT_ADMIN_NAME").unwrap_or_else(|| "admin".to_string()),
            email,
        });

        Self {
            bind_addr,
            channel_buffer: env_usize("STOREFRONT_CHANNEL_BUFFER", defaults.channel_buffer),
            log_filter: env_string("STOREFRONT_LOG").unwrap_or(defaults.log_filter),
            order_policy: OrderPolicy {
                on_the_way_stage: env_bool(
                    "STOREFRONT_ON_THE_WAY_STAGE",
                    defaults.order_policy.on_the_way_stage,
                ),
                restock_on_cancel: env_bool(
                    "STOREFRONT_RESTOCK_ON_CANCEL",
                    defaults.order_policy.restock_on_cancel,
                ),
            },
            review_policy: ReviewPolicy {
                one_review_per_user: env_bool(
                    "STOREFRONT_ONE_REVIEW_PER_USER",
                    defaults.review_policy.one_review_per_user,
                ),
            },
            admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_source_behaviour() {
        let config = StorefrontConfig::default();
        assert!(!config.order_policy.restock_on_cancel);
        assert!(config.order_policy.flow().on_the_way);
        assert!(config.review_policy.one_review_per_user);
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn missing_variables_use_defaults() {
        assert!(env_bool("STOREFRONT_TEST_SURELY_UNSET_FLAG", true));
        assert_eq!(env_usize("STOREFRONT_TEST_SURELY_UNSET_SIZE", 7), 7);
    }
}
