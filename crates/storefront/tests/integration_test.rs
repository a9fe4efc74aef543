use entity_actor::ActorClient;
use storefront::cart_actor::CartError;
use storefront::config::{AdminSeed, OrderPolicy, StorefrontConfig};
use storefront::lifecycle::StorefrontSystem;
use storefront::feature_actor::FeatureError;
use storefront::model::{
    AddressFields, AddressInfo, CartLine, CheckoutSource, FeatureCreate, Money, NewReview,
    OrderCreate, OrderStatus, PaymentMethod, PaymentStatus, Principal, Product, ProductCreate,
    ProductId, ProductQuery, ProductSort, ProductUpdate, Role, User, UserCreate, UserId,
};
use storefront::order_actor::OrderError;
use storefront::product_actor::ProductError;
use storefront::review_actor::ReviewError;
use storefront::user_actor::UserError;

fn money(minor: u64) -> Money {
    Money::from_minor(minor)
}

fn address() -> AddressInfo {
    AddressInfo {
        address_id: None,
        fields: AddressFields {
            address: "12 Market Street".into(),
            city: "Springfield".into(),
            pincode: "12345".into(),
            phone: "555-0100".into(),
            notes: String::new(),
        },
    }
}

fn cart_checkout(user_id: UserId) -> OrderCreate {
    OrderCreate {
        user_id,
        source: CheckoutSource::Cart,
        address: address(),
        payment_method: PaymentMethod::Direct,
        expected_total: None,
    }
}

fn buy_now(user_id: UserId, product_id: ProductId, quantity: u32) -> OrderCreate {
    OrderCreate {
        source: CheckoutSource::BuyNow {
            items: vec![CartLine {
                product_id,
                quantity,
            }],
        },
        ..cart_checkout(user_id)
    }
}

async fn customer(system: &StorefrontSystem, name: &str) -> User {
    system
        .users
        .register(UserCreate {
            user_name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: Role::Customer,
        })
        .await
        .expect("Failed to register customer")
}

async fn admin(system: &StorefrontSystem) -> Principal {
    system
        .bootstrap_admin(&AdminSeed {
            user_name: "admin".into(),
            email: "admin@example.com".into(),
        })
        .await
        .expect("Failed to bootstrap admin")
        .principal()
}

async fn product(
    system: &StorefrontSystem,
    title: &str,
    price: u64,
    sale_price: Option<u64>,
    stock: u32,
) -> Product {
    system
        .products
        .create_product(ProductCreate {
            title: title.into(),
            description: format!("{title} description"),
            category: "footwear".into(),
            brand: "nike".into(),
            sku: String::new(),
            image: None,
            price: money(price),
            sale_price: sale_price.map(money),
            total_stock: stock,
        })
        .await
        .expect("Failed to create product")
}

async fn stock(system: &StorefrontSystem, id: ProductId) -> u32 {
    system
        .products
        .check_stock(id)
        .await
        .expect("Failed to check stock")
}

/// Cart [P1 x2 @100], valid address: total 200, P1 stock -2, cart emptied.
#[tokio::test]
async fn test_cart_checkout_reserves_stock_and_empties_cart() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;

    system.carts.add_to_cart(alice.id, p1.id, 2).await.unwrap();
    let order = system
        .orders
        .create_order(cart_checkout(alice.id))
        .await
        .expect("Order should be placed");

    assert_eq!(order.total_amount, money(200));
    assert_eq!(Some(order.total_amount), order.computed_total());
    assert_eq!(order.line_items.len(), 1);
    assert_eq!(order.line_items[0].unit_price, money(100));
    assert_eq!(order.line_items[0].title, "Runner");
    assert_eq!(order.order_status, OrderStatus::Confirmed);
    assert_eq!(order.payment_status, PaymentStatus::Paid);
    assert_eq!(stock(&system, p1.id).await, 8);
    assert!(system.carts.get_cart(alice.id).await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_repeated_add_merges_into_one_line() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;

    system.carts.add_to_cart(alice.id, p1.id, 2).await.unwrap();
    let cart = system.carts.add_to_cart(alice.id, p1.id, 3).await.unwrap();

    assert_eq!(
        cart.items,
        vec![CartLine {
            product_id: p1.id,
            quantity: 5
        }]
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_adding_unknown_product_fails() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;

    let result = system.carts.add_to_cart(alice.id, ProductId(99), 1).await;

    assert!(result.is_err());
    assert!(system.carts.get_cart(alice.id).await.unwrap().is_empty());
    system.shutdown().await.unwrap();
}

/// salePrice 80 / price 100 charges 80 in the cart and in the order.
#[tokio::test]
async fn test_sale_price_is_charged_in_cart_and_order() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, Some(80), 10).await;

    system.carts.add_to_cart(alice.id, p1.id, 1).await.unwrap();
    let summary = system
        .carts
        .summary(alice.id, &system.products)
        .await
        .unwrap();
    assert_eq!(summary.total, money(80));

    let order = system
        .orders
        .create_order(cart_checkout(alice.id))
        .await
        .unwrap();
    assert_eq!(order.total_amount, money(80));

    system.shutdown().await.unwrap();
}

/// P2 has one unit; two simultaneous single-unit orders: exactly one wins.
#[tokio::test]
async fn test_last_unit_goes_to_exactly_one_order() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let bob = customer(&system, "Bob").await;
    let p2 = product(&system, "Last Pair", 100, None, 1).await;

    let (a, b) = tokio::join!(
        system.orders.create_order(buy_now(alice.id, p2.id, 1)),
        system.orders.create_order(buy_now(bob.id, p2.id, 1)),
    );

    let results = [a, b];
    let placed = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(placed, 1);
    let loser = results.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert!(matches!(
        loser,
        OrderError::StockInsufficient {
            requested: 1,
            available: 0,
            ..
        }
    ));
    assert_eq!(stock(&system, p2.id).await, 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_orders_conserve_stock() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let p1 = product(&system, "Runner", 100, None, 5).await;

    let mut tasks = Vec::new();
    for i in 0..12 {
        let buyer = customer(&system, &format!("Buyer{i}")).await;
        let orders = system.orders.clone();
        tasks.push(tokio::spawn(async move {
            orders.create_order(buy_now(buyer.id, p1.id, 1)).await
        }));
    }

    let mut sold = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(order) => sold += order.line_items[0].quantity,
            Err(e) => assert!(matches!(e, OrderError::StockInsufficient { .. }), "{e}"),
        }
    }

    assert_eq!(sold, 5);
    assert_eq!(stock(&system, p1.id).await, 0);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_insufficient_stock_leaves_cart_intact() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, None, 2).await;

    system.carts.add_to_cart(alice.id, p1.id, 3).await.unwrap();
    let result = system.orders.create_order(cart_checkout(alice.id)).await;

    match result {
        Err(OrderError::StockInsufficient {
            product_id,
            title,
            requested,
            available,
        }) => {
            assert_eq!(product_id, p1.id);
            assert_eq!(title, "Runner");
            assert_eq!((requested, available), (3, 2));
        }
        other => panic!("Expected StockInsufficient, got {other:?}"),
    }
    assert_eq!(system.carts.get_cart(alice.id).await.unwrap().quantity_of(p1.id), 3);
    assert_eq!(stock(&system, p1.id).await, 2);
    assert!(system
        .orders
        .list_for_user(alice.id, alice.principal())
        .await
        .unwrap()
        .is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_multi_line_order_is_all_or_nothing() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let plenty = product(&system, "Runner", 100, None, 5).await;
    let scarce = product(&system, "Trail", 150, None, 1).await;

    system.carts.add_to_cart(alice.id, plenty.id, 2).await.unwrap();
    system.carts.add_to_cart(alice.id, scarce.id, 2).await.unwrap();
    let result = system.orders.create_order(cart_checkout(alice.id)).await;

    assert!(matches!(result, Err(OrderError::StockInsufficient { product_id, .. }) if product_id == scarce.id));
    assert_eq!(stock(&system, plenty.id).await, 5);
    assert_eq!(stock(&system, scarce.id).await, 1);
    assert_eq!(system.carts.get_cart(alice.id).await.unwrap().items.len(), 2);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_price_edit_does_not_change_placed_order() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;

    let placed = system
        .orders
        .create_order(buy_now(alice.id, p1.id, 2))
        .await
        .unwrap();
    system
        .products
        .update_product(
            p1.id,
            ProductUpdate {
                price: Some(money(500)),
                title: Some("Runner v2".into()),
                ..ProductUpdate::default()
            },
        )
        .await
        .unwrap();

    let order = system
        .orders
        .order_details(placed.id, alice.principal())
        .await
        .unwrap();
    assert_eq!(order.total_amount, money(200));
    assert_eq!(order.line_items[0].unit_price, money(100));
    assert_eq!(order.line_items[0].title, "Runner");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_stale_expected_total_is_rejected_and_released() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;

    system.carts.add_to_cart(alice.id, p1.id, 2).await.unwrap();
    let result = system
        .orders
        .create_order(OrderCreate {
            expected_total: Some(money(150)),
            ..cart_checkout(alice.id)
        })
        .await;

    assert_eq!(
        result.err(),
        Some(OrderError::PriceChanged {
            expected: money(150),
            actual: money(200),
        })
    );
    assert_eq!(stock(&system, p1.id).await, 10);
    assert_eq!(system.carts.get_cart(alice.id).await.unwrap().quantity_of(p1.id), 2);

    let order = system
        .orders
        .create_order(OrderCreate {
            expected_total: Some(money(200)),
            ..cart_checkout(alice.id)
        })
        .await
        .unwrap();
    assert_eq!(order.total_amount, money(200));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_cart_and_bad_address_are_rejected() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;

    let empty = system.orders.create_order(cart_checkout(alice.id)).await;
    assert_eq!(empty.err(), Some(OrderError::EmptyCart));

    system.carts.add_to_cart(alice.id, p1.id, 1).await.unwrap();
    let mut incomplete = cart_checkout(alice.id);
    incomplete.address.fields.city.clear();
    incomplete.address.fields.phone = "  ".into();
    let result = system.orders.create_order(incomplete).await;

    assert_eq!(
        result.err(),
        Some(OrderError::InvalidAddress(vec!["city", "phone"]))
    );
    assert_eq!(stock(&system, p1.id).await, 10);
    assert_eq!(system.carts.get_cart(alice.id).await.unwrap().quantity_of(p1.id), 1);

    let zero = system.orders.create_order(buy_now(alice.id, p1.id, 0)).await;
    assert_eq!(zero.err(), Some(OrderError::InvalidQuantity(p1.id)));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_buy_now_leaves_cart_alone() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;
    let p2 = product(&system, "Trail", 150, None, 10).await;

    system.carts.add_to_cart(alice.id, p1.id, 1).await.unwrap();
    let order = system
        .orders
        .create_order(buy_now(alice.id, p2.id, 2))
        .await
        .unwrap();

    assert_eq!(order.total_amount, money(300));
    assert_eq!(system.carts.get_cart(alice.id).await.unwrap().quantity_of(p1.id), 1);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cart_keeps_lines_added_during_checkout() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;

    system.carts.add_to_cart(alice.id, p1.id, 3).await.unwrap();
    system
        .orders
        .create_order(cart_checkout(alice.id))
        .await
        .unwrap();
    system.carts.add_to_cart(alice.id, p1.id, 1).await.unwrap();

    assert_eq!(system.carts.get_cart(alice.id).await.unwrap().quantity_of(p1.id), 1);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_admin_moves_order_through_every_stage() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let admin = admin(&system).await;
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;
    let order = system
        .orders
        .create_order(buy_now(alice.id, p1.id, 1))
        .await
        .unwrap();

    let skip = system
        .orders
        .update_status(order.id, OrderStatus::Shipped, admin)
        .await;
    assert_eq!(
        skip.err(),
        Some(OrderError::InvalidTransition {
            from: OrderStatus::Confirmed,
            to: OrderStatus::Shipped,
        })
    );

    for next in [
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::OnTheWay,
        OrderStatus::Delivered,
    ] {
        let updated = system
            .orders
            .update_status(order.id, next, admin)
            .await
            .unwrap();
        assert_eq!(updated.order_status, next);
        assert!(updated.order_update_date >= updated.order_date);
    }

    for to in OrderStatus::ALL {
        let result = system.orders.update_status(order.id, to, admin).await;
        assert!(
            matches!(result, Err(OrderError::InvalidTransition { from: OrderStatus::Delivered, .. })),
            "delivered -> {to} must fail"
        );
    }

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_customer_may_only_cancel_own_order_before_shipping() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let admin = admin(&system).await;
    let alice = customer(&system, "Alice").await;
    let mallory = customer(&system, "Mallory").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;

    let first = system
        .orders
        .create_order(buy_now(alice.id, p1.id, 1))
        .await
        .unwrap();

    let advance = system
        .orders
        .update_status(first.id, OrderStatus::Processing, alice.principal())
        .await;
    assert!(matches!(advance, Err(OrderError::Unauthorized(_))));

    let foreign = system
        .orders
        .update_status(first.id, OrderStatus::Cancelled, mallory.principal())
        .await;
    assert!(matches!(foreign, Err(OrderError::Unauthorized(_))));

    let cancelled = system
        .orders
        .update_status(first.id, OrderStatus::Cancelled, alice.principal())
        .await
        .unwrap();
    assert_eq!(cancelled.order_status, OrderStatus::Cancelled);
    assert_eq!(cancelled.payment_status, PaymentStatus::Refunded);

    let second = system
        .orders
        .create_order(buy_now(alice.id, p1.id, 1))
        .await
        .unwrap();
    for stage in [OrderStatus::Processing, OrderStatus::Shipped] {
        system
            .orders
            .update_status(second.id, stage, admin)
            .await
            .unwrap();
    }
    let too_late = system
        .orders
        .update_status(second.id, OrderStatus::Cancelled, alice.principal())
        .await;
    assert_eq!(
        too_late.err(),
        Some(OrderError::InvalidTransition {
            from: OrderStatus::Shipped,
            to: OrderStatus::Cancelled,
        })
    );

    let rejected = system
        .orders
        .update_status(second.id, OrderStatus::Rejected, admin)
        .await
        .unwrap();
    assert_eq!(rejected.order_status, OrderStatus::Rejected);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancel_keeps_stock_by_default() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;

    let order = system
        .orders
        .create_order(buy_now(alice.id, p1.id, 4))
        .await
        .unwrap();
    system
        .orders
        .update_status(order.id, OrderStatus::Cancelled, alice.principal())
        .await
        .unwrap();

    assert_eq!(stock(&system, p1.id).await, 6);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancel_restocks_when_enabled() {
    let config = StorefrontConfig {
        order_policy: OrderPolicy {
            restock_on_cancel: true,
            ..OrderPolicy::default()
        },
        ..StorefrontConfig::default()
    };
    let system = StorefrontSystem::new(&config);
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;

    let order = system
        .orders
        .create_order(buy_now(alice.id, p1.id, 4))
        .await
        .unwrap();
    assert_eq!(stock(&system, p1.id).await, 6);
    system
        .orders
        .update_status(order.id, OrderStatus::Cancelled, alice.principal())
        .await
        .unwrap();

    assert_eq!(stock(&system, p1.id).await, 10);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_on_the_way_stage_can_be_disabled() {
    let config = StorefrontConfig {
        order_policy: OrderPolicy {
            on_the_way_stage: false,
            ..OrderPolicy::default()
        },
        ..StorefrontConfig::default()
    };
    let system = StorefrontSystem::new(&config);
    let admin = admin(&system).await;
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;
    let order = system
        .orders
        .create_order(buy_now(alice.id, p1.id, 1))
        .await
        .unwrap();

    for stage in [OrderStatus::Processing, OrderStatus::Shipped] {
        system.orders.update_status(order.id, stage, admin).await.unwrap();
    }
    let detour = system
        .orders
        .update_status(order.id, OrderStatus::OnTheWay, admin)
        .await;
    assert!(matches!(detour, Err(OrderError::InvalidTransition { .. })));
    let delivered = system
        .orders
        .update_status(order.id, OrderStatus::Delivered, admin)
        .await
        .unwrap();
    assert_eq!(delivered.order_status, OrderStatus::Delivered);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_external_payment_starts_pending_until_confirmed() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;

    let order = system
        .orders
        .create_order(OrderCreate {
            payment_method: PaymentMethod::External,
            ..buy_now(alice.id, p1.id, 1)
        })
        .await
        .unwrap();
    assert_eq!(order.order_status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert_eq!(stock(&system, p1.id).await, 9);

    let self_settled = system
        .orders
        .confirm_payment(order.id, "anything".into(), alice.principal())
        .await;
    assert!(matches!(self_settled, Err(OrderError::Unauthorized(_))));
    let still_pending = system.orders.fetch_order(order.id).await.unwrap();
    assert_eq!(still_pending.payment_status, PaymentStatus::Pending);

    let admin = admin(&system).await;
    let paid = system
        .orders
        .confirm_payment(order.id, "PAY-123".into(), admin)
        .await
        .unwrap();
    assert_eq!(paid.order_status, OrderStatus::Confirmed);
    assert_eq!(paid.payment_status, PaymentStatus::Paid);
    assert_eq!(paid.payment_id.as_deref(), Some("PAY-123"));

    let twice = system
        .orders
        .confirm_payment(order.id, "PAY-124".into(), admin)
        .await;
    assert!(matches!(twice, Err(OrderError::InvalidTransition { .. })));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancelling_unpaid_order_voids_payment() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;

    let order = system
        .orders
        .create_order(OrderCreate {
            payment_method: PaymentMethod::External,
            ..buy_now(alice.id, p1.id, 1)
        })
        .await
        .unwrap();
    let cancelled = system
        .orders
        .update_status(order.id, OrderStatus::Cancelled, alice.principal())
        .await
        .unwrap();

    assert_eq!(cancelled.payment_status, PaymentStatus::Voided);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_orders_are_scoped_to_owner() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let admin = admin(&system).await;
    let alice = customer(&system, "Alice").await;
    let bob = customer(&system, "Bob").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;

    assert!(system
        .orders
        .list_for_user(alice.id, alice.principal())
        .await
        .unwrap()
        .is_empty());

    let first = system
        .orders
        .create_order(buy_now(alice.id, p1.id, 1))
        .await
        .unwrap();
    let second = system
        .orders
        .create_order(buy_now(alice.id, p1.id, 2))
        .await
        .unwrap();
    system
        .orders
        .create_order(buy_now(bob.id, p1.id, 1))
        .await
        .unwrap();

    let mine = system
        .orders
        .list_for_user(alice.id, alice.principal())
        .await
        .unwrap();
    let ids: Vec<_> = mine.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    assert!(matches!(
        system.orders.order_details(first.id, bob.principal()).await,
        Err(OrderError::Unauthorized(_))
    ));
    assert!(matches!(
        system.orders.list_for_user(alice.id, bob.principal()).await,
        Err(OrderError::Unauthorized(_))
    ));
    assert!(matches!(
        system.orders.list_all(bob.principal()).await,
        Err(OrderError::Unauthorized(_))
    ));
    assert_eq!(system.orders.list_all(admin).await.unwrap().len(), 3);
    assert!(system.orders.order_details(first.id, admin).await.is_ok());

    system.shutdown().await.unwrap();
}

/// Ratings 5 and 1 on P1 average to 3.0.
#[tokio::test]
async fn test_review_average_and_duplicates() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let bob = customer(&system, "Bob").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;

    let review = |user: &User, value: u8| NewReview {
        user_id: user.id,
        user_name: user.user_name.clone(),
        review_message: "Comfortable".into(),
        review_value: value,
    };

    system.reviews.add_review(p1.id, review(&alice, 5)).await.unwrap();
    system.reviews.add_review(p1.id, review(&bob, 1)).await.unwrap();
    let summary = system.reviews.rating_summary(p1.id).await.unwrap();
    assert_eq!(summary.average_rating, 3.0);
    assert_eq!(summary.review_count, 2);

    let again = system.reviews.add_review(p1.id, review(&alice, 4)).await;
    assert_eq!(again.err(), Some(ReviewError::AlreadyReviewed));

    let out_of_range = system.reviews.add_review(p1.id, review(&alice, 6)).await;
    assert_eq!(out_of_range.err(), Some(ReviewError::InvalidRating(6)));

    let unknown = system.reviews.add_review(ProductId(77), review(&bob, 4)).await;
    assert_eq!(unknown.err(), Some(ReviewError::UnknownProduct(ProductId(77))));

    let empty = system.reviews.rating_summary(ProductId(77)).await.unwrap();
    assert_eq!(empty.average_rating, 0.0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_sold_products_cannot_be_deleted() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let sold = product(&system, "Runner", 100, None, 10).await;
    let unsold = product(&system, "Trail", 100, None, 10).await;

    system
        .orders
        .create_order(buy_now(alice.id, sold.id, 1))
        .await
        .unwrap();

    let refused = system.products.delete_product(sold.id, &system.orders).await;
    assert_eq!(
        refused.err(),
        Some(ProductError::ReferencedByOrders("Runner".into()))
    );
    // A refused delete leaves the product on sale
    system
        .orders
        .create_order(buy_now(alice.id, sold.id, 1))
        .await
        .unwrap();
    assert_eq!(stock(&system, sold.id).await, 8);

    system
        .products
        .delete_product(unsold.id, &system.orders)
        .await
        .unwrap();
    assert!(system.products.get(unsold.id).await.unwrap().is_none());

    system.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_delete_racing_checkout_never_orphans_an_order() {
    let config = StorefrontConfig {
        order_policy: OrderPolicy {
            restock_on_cancel: true,
            ..OrderPolicy::default()
        },
        ..StorefrontConfig::default()
    };
    let system = StorefrontSystem::new(&config);
    let alice = customer(&system, "Alice").await;

    for round in 0..100 {
        let p = product(&system, &format!("Runner {round}"), 100, None, 5).await;

        let (products, orders) = (system.products.clone(), system.orders.clone());
        let delete = tokio::spawn(async move { products.delete_product(p.id, &orders).await });
        let orders = system.orders.clone();
        let checkout =
            tokio::spawn(async move { orders.create_order(buy_now(alice.id, p.id, 1)).await });

        match (delete.await.unwrap(), checkout.await.unwrap()) {
            (Ok(()), Err(lost)) => {
                assert_eq!(lost, OrderError::ProductUnavailable(p.id.to_string()));
            }
            (Err(refused), Ok(order)) => {
                assert_eq!(refused, ProductError::ReferencedByOrders(p.title.clone()));
                let cancelled = system
                    .orders
                    .update_status(order.id, OrderStatus::Cancelled, alice.principal())
                    .await
                    .expect("Order for a kept product must stay cancellable");
                assert_eq!(cancelled.order_status, OrderStatus::Cancelled);
                assert_eq!(stock(&system, p.id).await, 5);
            }
            (deleted, placed) => panic!("round {round}: delete {deleted:?}, checkout {placed:?}"),
        }
    }

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_order_total_that_overflows_is_rejected() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let gold = product(&system, "Gold Boot", u64::MAX / 2, None, 5).await;

    let result = system
        .orders
        .create_order(buy_now(alice.id, gold.id, 3))
        .await;
    assert_eq!(result.err(), Some(OrderError::TotalTooLarge));
    assert_eq!(stock(&system, gold.id).await, 5);

    system.carts.add_to_cart(alice.id, gold.id, 3).await.unwrap();
    let summary = system.carts.summary(alice.id, &system.products).await;
    assert_eq!(summary.err(), Some(CartError::TotalTooLarge));

    let two = system
        .orders
        .create_order(buy_now(alice.id, gold.id, 2))
        .await
        .unwrap();
    assert_eq!(two.total_amount, money(u64::MAX - 1));
    assert_eq!(Some(two.total_amount), two.computed_total());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_email_must_be_unique() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    customer(&system, "Alice").await;

    let duplicate = system
        .users
        .register(UserCreate {
            user_name: "Other Alice".into(),
            email: "ALICE@example.com".into(),
            role: Role::Customer,
        })
        .await;

    assert_eq!(
        duplicate.err(),
        Some(UserError::EmailTaken("alice@example.com".into()))
    );
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_admin_bootstrap_is_idempotent() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());

    let first = admin(&system).await;
    let second = admin(&system).await;

    assert_eq!(first, second);
    assert!(first.is_admin());
    assert_eq!(system.users.list_users().await.unwrap().len(), 1);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_wishlist_and_address_book() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let p1 = product(&system, "Runner", 100, None, 10).await;

    system.wishlists.add(alice.id, p1.id).await.unwrap();
    let wishlist = system.wishlists.add(alice.id, p1.id).await.unwrap();
    assert_eq!(wishlist.product_ids.len(), 1);
    assert!(system.wishlists.contains(alice.id, p1.id).await.unwrap());
    system.wishlists.remove(alice.id, p1.id).await.unwrap();
    assert!(!system.wishlists.contains(alice.id, p1.id).await.unwrap());

    let saved = system
        .addresses
        .add_address(alice.id, address().fields)
        .await
        .unwrap();
    let mut moved = address().fields;
    moved.city = "Shelbyville".into();
    let edited = system
        .addresses
        .edit_address(alice.id, saved.id, moved)
        .await
        .unwrap();
    assert_eq!(edited.fields.city, "Shelbyville");

    let order = system
        .orders
        .create_order(OrderCreate {
            address: AddressInfo::from(&edited),
            ..buy_now(alice.id, p1.id, 1)
        })
        .await
        .unwrap();
    assert_eq!(order.address_info.address_id, Some(saved.id));

    system.addresses.remove_address(alice.id, saved.id).await.unwrap();
    assert!(system.addresses.list_addresses(alice.id).await.unwrap().is_empty());
    let order = system
        .orders
        .order_details(order.id, alice.principal())
        .await
        .unwrap();
    assert_eq!(order.address_info.fields.city, "Shelbyville");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_catalog_search_and_cart_edits() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());
    let alice = customer(&system, "Alice").await;
    let runner = product(&system, "Runner", 300, None, 10).await;
    let trail = product(&system, "Trail", 500, Some(200), 10).await;

    let cheapest_first = system
        .products
        .list_products(ProductQuery {
            keyword: Some("r".into()),
            sort: Some(ProductSort::PriceLowToHigh),
            ..ProductQuery::default()
        })
        .await
        .unwrap();
    let ids: Vec<_> = cheapest_first.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![trail.id, runner.id]);

    let only_runner = system
        .products
        .list_products(ProductQuery {
            keyword: Some("runner".into()),
            ..ProductQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(only_runner.len(), 1);

    system.carts.add_to_cart(alice.id, runner.id, 1).await.unwrap();
    system.carts.add_to_cart(alice.id, trail.id, 1).await.unwrap();
    let cart = system.carts.update_quantity(alice.id, runner.id, 4).await.unwrap();
    assert_eq!(cart.quantity_of(runner.id), 4);
    let cart = system.carts.update_quantity(alice.id, trail.id, 0).await.unwrap();
    assert_eq!(cart.items.len(), 1);
    let cart = system.carts.remove_from_cart(alice.id, runner.id).await.unwrap();
    assert!(cart.is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_feature_banners() {
    let system = StorefrontSystem::new(&StorefrontConfig::default());

    let first = system
        .features
        .add_feature(FeatureCreate {
            image: "https://cdn.example.com/sale.png".into(),
        })
        .await
        .unwrap();
    system
        .features
        .add_feature(FeatureCreate {
            image: "https://cdn.example.com/new.png".into(),
        })
        .await
        .unwrap();
    let blank = system
        .features
        .add_feature(FeatureCreate { image: "  ".into() })
        .await;
    assert_eq!(blank.err(), Some(FeatureError::MissingImage));

    system.features.delete(first.id).await.unwrap();
    let remaining = system.features.list_features().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].image, "https://cdn.example.com/new.png");

    system.shutdown().await.unwrap();
}
