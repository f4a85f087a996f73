//! Integration tests for the cart → order → promo code workflow

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{print_test_header, price, TestShop};
use shop_service::contract::model::{
    CartEntryDraft, DiscountDraft, OrderDraft, OrderLineDraft, ProductDraft, PromoCodeDraft,
    PromoValidation,
};
use shop_service::contract::{AuthContext, PageRequest, ShopError};
use shop_service::domain::pricing::{amount_saved, order_subtotal};

fn line(product_id: i64, quantity: i32) -> OrderLineDraft {
    OrderLineDraft {
        product_id,
        article_id: None,
        quantity,
    }
}

fn cart(product_id: i64, quantity: i32) -> CartEntryDraft {
    CartEntryDraft {
        customer_id: None,
        product_id,
        quantity,
    }
}

fn own_order(lines: Vec<OrderLineDraft>) -> OrderDraft {
    OrderDraft {
        customer_id: None,
        address: Some("12 rue des Lilas".to_string()),
        region: Some("Occitanie".to_string()),
        status_id: None,
        lines,
    }
}

#[tokio::test]
async fn test_cart_conversion_creates_one_order_per_customer() {
    print_test_header(
        "test_cart_conversion_creates_one_order_per_customer",
        &[
            "Verify selected cart entries become one pending order per customer",
            "Lines are priced at conversion time and the entries are consumed",
        ],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let bob = shop.customer("bob").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;
    let sneakers = shop.product("Canvas sneakers", price(12000)).await;

    println!("📝 Stage 1: Fill both carts");
    let a1 = shop
        .service
        .create_cart_entry(&alice.ctx, cart(boots.id, 2))
        .await
        .expect("Alice adds boots");
    let a2 = shop
        .service
        .create_cart_entry(&alice.ctx, cart(sneakers.id, 1))
        .await
        .expect("Alice adds sneakers");
    let b1 = shop
        .service
        .create_cart_entry(&bob.ctx, cart(boots.id, 1))
        .await
        .expect("Bob adds boots");
    assert_eq!(a1.unit_price, price(39900));

    println!("📝 Stage 2: Reprice the boots before conversion");
    shop.service
        .update_product(
            &shop.staff,
            boots.id,
            ProductDraft {
                name: boots.name.clone(),
                price: price(34900),
                description: boots.description.clone(),
                sole_type: boots.sole_type.clone(),
                raw_materials: boots.raw_materials.clone(),
                origin: boots.origin.clone(),
                category_ids: Vec::new(),
            },
        )
        .await
        .expect("Staff reprices boots");
    let repriced = shop
        .service
        .get_cart_entry(&alice.ctx, a1.id)
        .await
        .expect("Cart entry still visible");
    assert_eq!(repriced.unit_price, price(34900), "cart follows the live price");

    println!("📝 Stage 3: Convert, including an id that does not exist");
    let created = shop
        .service
        .convert_carts_to_orders(&shop.staff, &[a1.id, a2.id, b1.id, 9_999])
        .await
        .expect("Conversion should succeed");
    assert_eq!(created, 2);

    println!("📝 Stage 4: Carts are empty, each customer has one order");
    let page = PageRequest::default();
    assert!(shop.service.my_cart(&alice.ctx, page).await.unwrap().items.is_empty());
    assert!(shop.service.my_cart(&bob.ctx, page).await.unwrap().items.is_empty());

    let alice_orders = shop.service.my_orders(&alice.ctx, page).await.unwrap();
    assert_eq!(alice_orders.total, 1);
    let detail = shop
        .service
        .get_order(&alice.ctx, alice_orders.items[0].id)
        .await
        .expect("Alice sees her order");
    assert_eq!(detail.status.map(|s| s.label).as_deref(), Some("pending"));
    assert_eq!(detail.lines.len(), 2);
    let boots_line = detail
        .lines
        .iter()
        .find(|l| l.product_id == boots.id)
        .expect("boots line");
    assert_eq!(boots_line.quantity, 2);
    assert_eq!(boots_line.unit_price, price(34900));
    assert_eq!(order_subtotal(&detail.lines), price(81800));

    let bob_orders = shop.service.my_orders(&bob.ctx, page).await.unwrap();
    assert_eq!(bob_orders.total, 1);
    assert_ne!(bob_orders.items[0].id, alice_orders.items[0].id);

    let gone = shop.service.get_cart_entry(&shop.staff, a1.id).await;
    assert!(matches!(gone, Err(ShopError::NotFound { .. })));

    println!("✅ Conversion grouped by customer and consumed the entries");
}

#[tokio::test]
async fn test_cart_conversion_is_staff_only() {
    print_test_header(
        "test_cart_conversion_is_staff_only",
        &["Verify customers cannot trigger conversion and empty selections are a no-op"],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;
    let entry = shop
        .service
        .create_cart_entry(&alice.ctx, cart(boots.id, 1))
        .await
        .unwrap();

    let denied = shop
        .service
        .convert_carts_to_orders(&alice.ctx, &[entry.id])
        .await;
    assert!(matches!(denied, Err(ShopError::Forbidden { .. })));

    let anonymous = shop
        .service
        .convert_carts_to_orders(&AuthContext::anonymous(), &[entry.id])
        .await;
    assert!(matches!(anonymous, Err(ShopError::Unauthorized { .. })));

    let none = shop
        .service
        .convert_carts_to_orders(&shop.staff, &[])
        .await
        .expect("Empty selection is fine");
    assert_eq!(none, 0);

    let still_there = shop.service.get_cart_entry(&alice.ctx, entry.id).await;
    assert!(still_there.is_ok());
    println!("✅ Only staff convert carts");
}

#[tokio::test]
async fn test_overlapping_conversions_create_one_order() {
    print_test_header(
        "test_overlapping_conversions_create_one_order",
        &[
            "Verify two staff converting the same selection yield a single order",
            "The slower conversion finds nothing left and writes nothing",
        ],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;
    let entry = shop
        .service
        .create_cart_entry(&alice.ctx, cart(boots.id, 1))
        .await
        .unwrap();
    let selection = [entry.id];

    println!("📝 Stage 1: Run both conversions at once");
    let (first, second) = tokio::join!(
        shop.service.convert_carts_to_orders(&shop.staff, &selection),
        shop.service.convert_carts_to_orders(&shop.staff, &selection),
    );
    let created: usize = [first, second]
        .into_iter()
        .map(|result| match result {
            Ok(count) => count,
            Err(ShopError::Conflict { .. }) => 0,
            Err(other) => panic!("unexpected conversion error: {other:?}"),
        })
        .sum();
    assert_eq!(created, 1);

    println!("📝 Stage 2: Exactly one order holds the entry");
    let orders = shop
        .service
        .my_orders(&alice.ctx, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(orders.total, 1);

    println!("📝 Stage 3: Converting again is a no-op");
    let again = shop
        .service
        .convert_carts_to_orders(&shop.staff, &selection)
        .await
        .unwrap();
    assert_eq!(again, 0);
    let orders = shop
        .service
        .my_orders(&alice.ctx, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(orders.total, 1);
    println!("✅ Cart entries are consumed exactly once");
}

#[tokio::test]
async fn test_cart_rejects_duplicates_and_bad_quantities() {
    print_test_header(
        "test_cart_rejects_duplicates_and_bad_quantities",
        &["Verify a product appears once per cart and quantities are positive"],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;

    shop.service
        .create_cart_entry(&alice.ctx, cart(boots.id, 1))
        .await
        .unwrap();
    let duplicate = shop
        .service
        .create_cart_entry(&alice.ctx, cart(boots.id, 3))
        .await;
    assert!(matches!(duplicate, Err(ShopError::Conflict { .. })));

    let zero = shop
        .service
        .create_cart_entry(&alice.ctx, cart(boots.id, 0))
        .await;
    let Err(ShopError::Validation { fields }) = zero else {
        panic!("expected validation error, got {zero:?}");
    };
    assert!(fields.contains_key("quantity"));
    println!("✅ Cart invariants enforced");
}

#[tokio::test]
async fn test_promo_code_validate_and_redeem() {
    print_test_header(
        "test_promo_code_validate_and_redeem",
        &[
            "Verify a promo code is valid until redeemed and can only be redeemed once",
            "Scenario: BIENVENUE10 on Alice's first order",
        ],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;
    let code = shop.promo_code("BIENVENUE10", price(1000)).await;

    let order = shop
        .service
        .create_order(&alice.ctx, own_order(vec![line(boots.id, 2)]))
        .await
        .expect("Alice places an order");

    println!("📝 Stage 1: Fresh code is valid");
    let check = shop
        .service
        .validate_promo_code(&alice.ctx, code.id)
        .await
        .unwrap();
    assert_eq!(check, PromoValidation::Valid { rate: price(1000) });

    println!("📝 Stage 2: Redeem against Alice's order");
    shop.service
        .redeem_promo_code(&alice.ctx, code.id, order.id)
        .await
        .expect("First redemption succeeds");

    let detail = shop.service.get_order(&alice.ctx, order.id).await.unwrap();
    assert_eq!(detail.promo_codes.len(), 1);
    assert_eq!(detail.promo_codes[0].code, "BIENVENUE10");

    println!("📝 Stage 3: Redeemed code is no longer valid");
    let check = shop
        .service
        .validate_promo_code(&alice.ctx, code.id)
        .await
        .unwrap();
    assert_eq!(
        check,
        PromoValidation::Invalid {
            message: "promo code has already been used".to_string()
        }
    );

    let again = shop
        .service
        .redeem_promo_code(&alice.ctx, code.id, order.id)
        .await;
    assert!(matches!(again, Err(ShopError::Conflict { .. })));
    println!("✅ Promo code consumed exactly once");
}

#[tokio::test]
async fn test_inactive_promo_code_cannot_be_redeemed() {
    print_test_header(
        "test_inactive_promo_code_cannot_be_redeemed",
        &["Verify inactive codes validate as invalid and refuse redemption"],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;
    let code = shop
        .service
        .create_promo_code(
            &shop.staff,
            PromoCodeDraft {
                code: "ETE2024".to_string(),
                rate: price(1500),
                order_id: None,
                start_date: None,
                end_date: None,
                active: false,
            },
        )
        .await
        .unwrap();
    let order = shop
        .service
        .create_order(&alice.ctx, own_order(vec![line(boots.id, 1)]))
        .await
        .unwrap();

    let check = shop
        .service
        .validate_promo_code(&alice.ctx, code.id)
        .await
        .unwrap();
    assert_eq!(
        check,
        PromoValidation::Invalid {
            message: "promo code is inactive".to_string()
        }
    );

    let redeem = shop
        .service
        .redeem_promo_code(&alice.ctx, code.id, order.id)
        .await;
    assert!(matches!(redeem, Err(ShopError::Conflict { .. })));

    let unchanged = shop.service.get_promo_code(&shop.staff, code.id).await.unwrap();
    assert_eq!(unchanged.order_id, None);
    println!("✅ Inactive code left untouched");
}

#[tokio::test]
async fn test_redeem_on_foreign_order_reads_as_missing() {
    print_test_header(
        "test_redeem_on_foreign_order_reads_as_missing",
        &["Verify a customer cannot attach a code to someone else's order"],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let bob = shop.customer("bob").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;
    let code = shop.promo_code("BIENVENUE10", price(1000)).await;
    let order = shop
        .service
        .create_order(&alice.ctx, own_order(vec![line(boots.id, 1)]))
        .await
        .unwrap();

    let result = shop
        .service
        .redeem_promo_code(&bob.ctx, code.id, order.id)
        .await;
    assert!(matches!(result, Err(ShopError::NotFound { .. })));

    let check = shop
        .service
        .validate_promo_code(&bob.ctx, code.id)
        .await
        .unwrap();
    assert!(check.is_valid(), "code must still be available");
    println!("✅ Foreign order hidden from Bob");
}

#[tokio::test]
async fn test_order_detail_totals_and_frozen_prices() {
    print_test_header(
        "test_order_detail_totals_and_frozen_prices",
        &[
            "Verify line prices are frozen at creation and totals add up",
            "Scenario: 2 × 399.00 with a 10% discount",
        ],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;

    println!("📝 Stage 1: Staff places an order on Alice's behalf");
    let missing_owner = shop
        .service
        .create_order(&shop.staff, own_order(vec![line(boots.id, 2)]))
        .await;
    let Err(ShopError::Validation { fields }) = missing_owner else {
        panic!("staff must name the customer");
    };
    assert!(fields.contains_key("customer_id"));

    let order = shop
        .service
        .create_order(
            &shop.staff,
            OrderDraft {
                customer_id: Some(alice.profile.id),
                ..own_order(vec![line(boots.id, 2)])
            },
        )
        .await
        .expect("Staff order succeeds");
    shop.service
        .create_discount(
            &shop.staff,
            DiscountDraft {
                order_id: order.id,
                rate: price(1000),
            },
        )
        .await
        .expect("Discount recorded");

    println!("📝 Stage 2: Reprice, then add another line");
    shop.service
        .update_product(
            &shop.staff,
            boots.id,
            ProductDraft {
                name: boots.name.clone(),
                price: price(45000),
                description: None,
                sole_type: None,
                raw_materials: None,
                origin: None,
                category_ids: Vec::new(),
            },
        )
        .await
        .unwrap();

    let detail = shop.service.get_order(&alice.ctx, order.id).await.unwrap();
    assert_eq!(detail.lines.len(), 1);
    assert_eq!(detail.lines[0].unit_price, price(39900), "existing line keeps its price");
    assert_eq!(order_subtotal(&detail.lines), price(79800));
    assert_eq!(detail.discounts.len(), 1);
    assert_eq!(
        amount_saved(&detail.lines, detail.discounts[0].rate),
        price(7980)
    );

    let added = shop
        .service
        .create_line(&shop.staff, order.id, line(boots.id, 1))
        .await
        .expect("Staff adds a line");
    assert_eq!(added.unit_price, price(45000), "new line takes the current price");
    println!("✅ Totals computed from frozen line prices");
}

#[tokio::test]
async fn test_native_client_drives_the_workflow() {
    print_test_header(
        "test_native_client_drives_the_workflow",
        &["Verify the in-process client exposes cart, conversion and promo operations"],
    );

    let shop = TestShop::new().await;
    let client = shop.module.client().expect("Client should be initialized");
    let alice = shop.customer("alice").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;
    let code = shop.promo_code("BIENVENUE10", price(1000)).await;

    let entry = shop
        .service
        .create_cart_entry(&alice.ctx, cart(boots.id, 1))
        .await
        .unwrap();
    assert_eq!(client.my_cart(&alice.ctx).await.unwrap().len(), 1);

    let created = client
        .convert_carts_to_orders(&shop.staff, &[entry.id])
        .await
        .unwrap();
    assert_eq!(created, 1);
    assert!(client.my_cart(&alice.ctx).await.unwrap().is_empty());

    let orders = client.my_orders(&alice.ctx).await.unwrap();
    assert_eq!(orders.len(), 1);

    client
        .redeem_promo_code(&alice.ctx, code.id, orders[0].id)
        .await
        .unwrap();
    let detail = client.order_detail(&alice.ctx, orders[0].id).await.unwrap();
    assert_eq!(detail.promo_codes[0].id, code.id);
    assert!(!client
        .validate_promo_code(&alice.ctx, code.id)
        .await
        .unwrap()
        .is_valid());
    println!("✅ Native client matches the service");
}
