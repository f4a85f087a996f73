//! Integration tests for the catalog store and its effect on orders

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{print_test_header, price, TestShop};
use shop_service::contract::model::{
    ArticleDraft, CategoryDraft, OrderDraft, OrderLineDraft, ProductDraft, ProductFilter,
    ProductSortField, Sort,
};
use shop_service::contract::{AuthContext, PageRequest, ShopError};

fn order_for(customer_id: i64, lines: Vec<OrderLineDraft>) -> OrderDraft {
    OrderDraft {
        customer_id: Some(customer_id),
        address: None,
        region: None,
        status_id: None,
        lines,
    }
}

fn article(product_id: i64, barcode: &str) -> ArticleDraft {
    ArticleDraft {
        product_id,
        color: Some("black".to_string()),
        size: Some("42".to_string()),
        barcode: barcode.to_string(),
        purchase_date: None,
    }
}

#[tokio::test]
async fn test_product_delete_cascades_to_order_lines() {
    print_test_header(
        "test_product_delete_cascades_to_order_lines",
        &["Verify deleting a product removes its order lines but keeps the order"],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;
    let sandals = shop.product("Sandals", price(5900)).await;

    let order = shop
        .service
        .create_order(
            &shop.staff,
            order_for(
                alice.profile.id,
                vec![
                    OrderLineDraft {
                        product_id: boots.id,
                        article_id: None,
                        quantity: 1,
                    },
                    OrderLineDraft {
                        product_id: sandals.id,
                        article_id: None,
                        quantity: 2,
                    },
                ],
            ),
        )
        .await
        .unwrap();
    let before = shop.service.get_order(&shop.staff, order.id).await.unwrap();
    let boots_line = before
        .lines
        .iter()
        .find(|l| l.product_id == boots.id)
        .unwrap()
        .id;

    println!("📝 Stage 1: Delete the boots");
    shop.service
        .delete_product(&shop.staff, boots.id)
        .await
        .expect("Delete should succeed");

    println!("📝 Stage 2: Boots line is gone, order and other line remain");
    let missing = shop.service.get_line(&shop.staff, boots_line).await;
    assert!(matches!(missing, Err(ShopError::NotFound { .. })));

    let after = shop.service.get_order(&shop.staff, order.id).await.unwrap();
    assert_eq!(after.lines.len(), 1);
    assert_eq!(after.lines[0].product_id, sandals.id);

    let product = shop.service.get_product(boots.id).await;
    assert!(matches!(product, Err(ShopError::NotFound { .. })));
    println!("✅ Cascade removed only the product's lines");
}

#[tokio::test]
async fn test_article_delete_keeps_line_and_price() {
    print_test_header(
        "test_article_delete_keeps_line_and_price",
        &["Verify deleting an article clears the line's article but keeps the line"],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;
    let variant = shop
        .service
        .create_article(&shop.staff, article(boots.id, "3700000000017"))
        .await
        .unwrap();

    let order = shop
        .service
        .create_order(
            &shop.staff,
            order_for(
                alice.profile.id,
                vec![OrderLineDraft {
                    product_id: boots.id,
                    article_id: Some(variant.id),
                    quantity: 1,
                }],
            ),
        )
        .await
        .unwrap();

    shop.service
        .delete_article(&shop.staff, variant.id)
        .await
        .unwrap();

    let detail = shop.service.get_order(&shop.staff, order.id).await.unwrap();
    assert_eq!(detail.lines.len(), 1);
    assert_eq!(detail.lines[0].article_id, None);
    assert_eq!(detail.lines[0].unit_price, price(39900));
    println!("✅ Line survives without its article");
}

#[tokio::test]
async fn test_order_line_article_must_match_product() {
    print_test_header(
        "test_order_line_article_must_match_product",
        &["Verify a line cannot pair a product with another product's article"],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;
    let sandals = shop.product("Sandals", price(5900)).await;
    let sandal_variant = shop
        .service
        .create_article(&shop.staff, article(sandals.id, "3700000000024"))
        .await
        .unwrap();

    let result = shop
        .service
        .create_order(
            &shop.staff,
            order_for(
                alice.profile.id,
                vec![OrderLineDraft {
                    product_id: boots.id,
                    article_id: Some(sandal_variant.id),
                    quantity: 1,
                }],
            ),
        )
        .await;
    let Err(ShopError::Validation { fields }) = result else {
        panic!("expected validation error, got {result:?}");
    };
    assert!(fields.contains_key("lines[0].article_id"));

    let orders = shop
        .service
        .my_orders(&alice.ctx, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(orders.total, 0, "nothing is written on a rejected order");
    println!("✅ Mismatched article rejected");
}

#[tokio::test]
async fn test_product_listing_filters_and_ordering() {
    print_test_header(
        "test_product_listing_filters_and_ordering",
        &["Verify category, search and price ordering on the public product list"],
    );

    let shop = TestShop::new().await;
    let men = shop
        .service
        .create_category(
            &shop.staff,
            CategoryDraft {
                name: "Men".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

    let draft = |name: &str, cents: i64, categories: Vec<i64>| ProductDraft {
        name: name.to_string(),
        price: price(cents),
        description: None,
        sole_type: None,
        raw_materials: None,
        origin: Some("Italy".to_string()),
        category_ids: categories,
    };
    shop.service
        .create_product(&shop.staff, draft("Derby shoes", 18900, vec![men.id]))
        .await
        .unwrap();
    shop.service
        .create_product(&shop.staff, draft("Hiking boots", 24900, vec![men.id]))
        .await
        .unwrap();
    shop.service
        .create_product(&shop.staff, draft("Ballet flats", 7900, Vec::new()))
        .await
        .unwrap();

    let page = PageRequest::default();

    println!("📝 Stage 1: Category filter");
    let in_men = shop
        .service
        .list_products(
            ProductFilter {
                category: Some(men.id),
                ..ProductFilter::default()
            },
            page,
        )
        .await
        .unwrap();
    assert_eq!(in_men.total, 2);
    assert!(in_men.items.iter().all(|p| p.category_ids == vec![men.id]));

    println!("📝 Stage 2: Most expensive first");
    let by_price = shop
        .service
        .list_products(
            ProductFilter {
                sort: Some(Sort {
                    field: ProductSortField::Price,
                    descending: true,
                }),
                ..ProductFilter::default()
            },
            page,
        )
        .await
        .unwrap();
    let names: Vec<_> = by_price.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Hiking boots", "Derby shoes", "Ballet flats"]);

    println!("📝 Stage 3: Search by name");
    let boots = shop
        .service
        .list_products(
            ProductFilter {
                search: Some("boots".to_string()),
                ..ProductFilter::default()
            },
            page,
        )
        .await
        .unwrap();
    assert_eq!(boots.total, 1);
    assert_eq!(boots.items[0].name, "Hiking boots");
    println!("✅ Product list filters applied");
}

#[tokio::test]
async fn test_catalog_writes_need_an_account() {
    print_test_header(
        "test_catalog_writes_need_an_account",
        &["Verify catalog reads are public and writes are rejected for anonymous callers"],
    );

    let shop = TestShop::new().await;
    let boots = shop.product("Chelsea boots", price(39900)).await;

    let detail = shop.service.get_product(boots.id).await.unwrap();
    assert_eq!(detail.product.name, "Chelsea boots");
    assert!(detail.articles.is_empty());

    let denied = shop
        .service
        .delete_product(&AuthContext::anonymous(), boots.id)
        .await;
    assert!(matches!(denied, Err(ShopError::Unauthorized { .. })));

    let bad_materials = shop
        .service
        .create_product(
            &shop.staff,
            ProductDraft {
                name: "Mystery shoes".to_string(),
                price: price(4900),
                description: None,
                sole_type: None,
                raw_materials: Some(serde_json::json!(["leather", "rubber"])),
                origin: None,
                category_ids: Vec::new(),
            },
        )
        .await;
    let Err(ShopError::Validation { fields }) = bad_materials else {
        panic!("expected validation error, got {bad_materials:?}");
    };
    assert!(fields.contains_key("raw_materials"));

    let duplicate_barcode = async {
        shop.service
            .create_article(&shop.staff, article(boots.id, "3700000000031"))
            .await
            .unwrap();
        shop.service
            .create_article(&shop.staff, article(boots.id, "3700000000031"))
            .await
    }
    .await;
    assert!(matches!(duplicate_barcode, Err(ShopError::Conflict { .. })));
    println!("✅ Catalog access rules hold");
}
