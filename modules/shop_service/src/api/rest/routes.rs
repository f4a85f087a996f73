//! Route registration for the `/api` surface

use super::handlers::{auth, catalog, customers, orders, organization};
use crate::domain::Service;
use axum::{
    routing::{delete, get, post},
    Extension, Router,
};
use std::sync::Arc;

/// Register all REST routes under `/api`
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let api = Router::new()
        // Tokens and accounts
        .route("/token", post(auth::obtain_token))
        .route("/token/refresh", post(auth::refresh_token))
        .route("/token/verify", post(auth::verify_token))
        .route("/users/current", get(auth::current_account))
        .route(
            "/users",
            get(auth::list_accounts).post(auth::create_account),
        )
        .route(
            "/users/{id}",
            get(auth::get_account)
                .put(auth::update_account)
                .delete(auth::delete_account),
        )
        // Catalog
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/categories/{id}",
            get(catalog::get_category)
                .put(catalog::update_category)
                .delete(catalog::delete_category),
        )
        .route(
            "/sub-categories",
            get(catalog::list_sub_categories).post(catalog::create_sub_category),
        )
        .route(
            "/sub-categories/{id}",
            get(catalog::get_sub_category)
                .put(catalog::update_sub_category)
                .delete(catalog::delete_sub_category),
        )
        .route(
            "/products",
            get(catalog::list_products).post(catalog::create_product),
        )
        .route(
            "/products/{id}",
            get(catalog::get_product)
                .put(catalog::update_product)
                .delete(catalog::delete_product),
        )
        .route(
            "/articles",
            get(catalog::list_articles).post(catalog::create_article),
        )
        .route(
            "/articles/{id}",
            get(catalog::get_article)
                .put(catalog::update_article)
                .delete(catalog::delete_article),
        )
        .route("/media", get(catalog::list_media).post(catalog::create_media))
        .route(
            "/media/{id}",
            get(catalog::get_media)
                .put(catalog::update_media)
                .delete(catalog::delete_media),
        )
        .route(
            "/promotions",
            get(catalog::list_promotions).post(catalog::create_promotion),
        )
        .route(
            "/promotions/{id}",
            get(catalog::get_promotion)
                .put(catalog::update_promotion)
                .delete(catalog::delete_promotion),
        )
        .route(
            "/catalogues",
            get(catalog::list_catalogues).post(catalog::create_catalogue),
        )
        .route(
            "/catalogues/{id}",
            get(catalog::get_catalogue)
                .put(catalog::update_catalogue)
                .delete(catalog::delete_catalogue),
        )
        // Customers
        .route(
            "/customers",
            get(customers::list_customers).post(customers::register_customer),
        )
        .route("/customers/me", get(customers::my_profile))
        .route(
            "/customers/{id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route(
            "/favorites",
            get(customers::list_favorites).post(customers::create_favorite),
        )
        .route("/favorites/mine", get(customers::my_favorites))
        .route(
            "/favorites/{id}",
            get(customers::get_favorite)
                .put(customers::update_favorite)
                .delete(customers::delete_favorite),
        )
        .route(
            "/reviews",
            get(customers::list_reviews).post(customers::create_review),
        )
        .route("/reviews/mine", get(customers::my_reviews))
        .route(
            "/reviews/{id}",
            get(customers::get_review)
                .put(customers::update_review)
                .delete(customers::delete_review),
        )
        // Order workflow
        .route(
            "/order-statuses",
            get(orders::list_statuses).post(orders::create_status),
        )
        .route(
            "/order-statuses/{id}",
            get(orders::get_status)
                .put(orders::update_status)
                .delete(orders::delete_status),
        )
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route("/orders/mine", get(orders::my_orders))
        .route(
            "/orders/{id}",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .route(
            "/order-lines",
            get(orders::list_lines).post(orders::create_line),
        )
        .route(
            "/order-lines/{id}",
            get(orders::get_line)
                .put(orders::update_line)
                .delete(orders::delete_line),
        )
        .route(
            "/carts",
            get(orders::list_cart).post(orders::create_cart_entry),
        )
        .route("/carts/mine", get(orders::my_cart))
        .route("/carts/convert", post(orders::convert_carts))
        .route(
            "/carts/{id}",
            get(orders::get_cart_entry)
                .put(orders::update_cart_entry)
                .delete(orders::delete_cart_entry),
        )
        .route(
            "/discounts",
            get(orders::list_discounts).post(orders::create_discount),
        )
        .route(
            "/discounts/{id}",
            get(orders::get_discount)
                .put(orders::update_discount)
                .delete(orders::delete_discount),
        )
        .route(
            "/promo-codes",
            get(orders::list_promo_codes).post(orders::create_promo_code),
        )
        .route(
            "/promo-codes/{id}",
            get(orders::get_promo_code)
                .put(orders::update_promo_code)
                .delete(orders::delete_promo_code),
        )
        .route(
            "/promo-codes/{id}/validate",
            post(orders::validate_promo_code),
        )
        .route("/promo-codes/{id}/redeem", post(orders::redeem_promo_code))
        .route(
            "/returns",
            get(orders::list_returns).post(orders::create_return),
        )
        .route(
            "/returns/{id}",
            get(orders::get_return)
                .put(orders::update_return)
                .delete(orders::delete_return),
        )
        // Organization
        .route(
            "/poles",
            get(organization::list_poles).post(organization::create_pole),
        )
        .route(
            "/poles/{id}",
            get(organization::get_pole)
                .put(organization::update_pole)
                .delete(organization::delete_pole),
        )
        .route(
            "/services",
            get(organization::list_services).post(organization::create_service),
        )
        .route(
            "/services/{id}",
            get(organization::get_service)
                .put(organization::update_service)
                .delete(organization::delete_service),
        )
        .route(
            "/services/{id}/members",
            get(organization::list_service_members).post(organization::add_service_member),
        )
        .route(
            "/services/{id}/members/{account_id}",
            delete(organization::remove_service_member),
        )
        .route(
            "/teams",
            get(organization::list_teams).post(organization::create_team),
        )
        .route(
            "/teams/{id}",
            get(organization::get_team)
                .put(organization::update_team)
                .delete(organization::delete_team),
        )
        .route(
            "/teams/{id}/members",
            get(organization::list_team_members).post(organization::add_team_member),
        )
        .route(
            "/teams/{id}/members/{account_id}",
            delete(organization::remove_team_member),
        )
        .route(
            "/roles",
            get(organization::list_roles).post(organization::assign_role),
        )
        .route(
            "/roles/{id}",
            get(organization::get_role)
                .put(organization::update_role)
                .delete(organization::delete_role),
        )
        // Add service as extension for handlers and the bearer extractor
        .layer(Extension(service));

    Ok(router.nest("/api", api))
}
