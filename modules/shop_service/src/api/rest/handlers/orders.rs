//! Order workflow handlers: statuses, orders, lines, carts, discounts,
//! promo codes and returns

use super::super::{
    auth::Caller,
    dto::*,
    error::{map_domain_error, Problem},
};
use super::ordering;
use crate::contract::{OrderFilter, OrderLineDraft, OrderSortField, OwnedFilter};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

// ===== Statuses =====

pub async fn list_statuses(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageDto<OrderStatusDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let statuses = service
        .list_statuses(&ctx, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(statuses.into()))
}

pub async fn get_status(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<OrderStatusDto>, Problem> {
    let status = service
        .get_status(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(status.into()))
}

pub async fn create_status(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<OrderStatusRequest>,
) -> Result<(StatusCode, Json<OrderStatusDto>), Problem> {
    let status = service
        .create_status(&ctx, &req.label)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(status.into())))
}

pub async fn update_status(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<OrderStatusRequest>,
) -> Result<Json<OrderStatusDto>, Problem> {
    let status = service
        .update_status(&ctx, id, &req.label)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(status.into()))
}

pub async fn delete_status(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_status(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Orders =====

/// Staff see every order, customers only their own
pub async fn list_orders(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<OrderQuery>,
) -> Result<Json<PageDto<OrderDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let filter = OrderFilter {
        sort: ordering(query.ordering.as_deref(), OrderSortField::parse)?,
        customer: query.customer,
        status: query.status,
        order_date: query.order_date,
    };
    let orders = service
        .list_orders(&ctx, filter, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(orders.into()))
}

pub async fn my_orders(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageDto<OrderDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let orders = service
        .my_orders(&ctx, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(orders.into()))
}

/// Order with lines, discounts, redeemed codes, returns and totals
pub async fn get_order(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<OrderDetailDto>, Problem> {
    let detail = service.get_order(&ctx, id).await.map_err(map_domain_error)?;
    Ok(Json(detail.into()))
}

pub async fn create_order(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderDto>), Problem> {
    let order = service
        .create_order(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

pub async fn update_order(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<UpdateOrderRequest>,
) -> Result<Json<OrderDto>, Problem> {
    let order = service
        .update_order(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(order.into()))
}

pub async fn delete_order(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_order(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Order lines =====

pub async fn list_lines(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<OrderChildQuery>,
) -> Result<Json<PageDto<OrderLineDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let lines = service
        .list_lines(&ctx, query.into(), page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(lines.into()))
}

pub async fn get_line(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<OrderLineDto>, Problem> {
    let line = service.get_line(&ctx, id).await.map_err(map_domain_error)?;
    Ok(Json(line.into()))
}

pub async fn create_line(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<CreateOrderLineRequest>,
) -> Result<(StatusCode, Json<OrderLineDto>), Problem> {
    let draft = OrderLineDraft {
        product_id: req.product_id,
        article_id: req.article_id,
        quantity: req.quantity,
    };
    let line = service
        .create_line(&ctx, req.order_id, draft)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(line.into())))
}

pub async fn update_line(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<UpdateOrderLineRequest>,
) -> Result<Json<OrderLineDto>, Problem> {
    let line = service
        .update_line(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(line.into()))
}

pub async fn delete_line(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_line(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Carts =====

pub async fn list_cart(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<OwnedQuery>,
) -> Result<Json<PageDto<CartEntryDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let filter = OwnedFilter {
        customer: query.customer,
        product: query.product,
    };
    let entries = service
        .list_cart(&ctx, filter, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(entries.into()))
}

pub async fn my_cart(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageDto<CartEntryDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let entries = service
        .my_cart(&ctx, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(entries.into()))
}

pub async fn get_cart_entry(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<CartEntryDto>, Problem> {
    let entry = service
        .get_cart_entry(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(entry.into()))
}

pub async fn create_cart_entry(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<CartEntryRequest>,
) -> Result<(StatusCode, Json<CartEntryDto>), Problem> {
    let entry = service
        .create_cart_entry(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(entry.into())))
}

pub async fn update_cart_entry(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<CartEntryRequest>,
) -> Result<Json<CartEntryDto>, Problem> {
    let entry = service
        .update_cart_entry(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(entry.into()))
}

pub async fn delete_cart_entry(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_cart_entry(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Staff action: one order per customer among the selected entries
pub async fn convert_carts(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<ConvertCartRequest>,
) -> Result<Json<ConvertCartResponse>, Problem> {
    let orders_created = service
        .convert_carts_to_orders(&ctx, &req.entry_ids)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ConvertCartResponse { orders_created }))
}

// ===== Discounts =====

pub async fn list_discounts(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<OrderChildQuery>,
) -> Result<Json<PageDto<DiscountDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let discounts = service
        .list_discounts(&ctx, query.into(), page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(discounts.into()))
}

pub async fn get_discount(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<DiscountDto>, Problem> {
    let discount = service
        .get_discount(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(discount.into()))
}

pub async fn create_discount(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<DiscountRequest>,
) -> Result<(StatusCode, Json<DiscountDto>), Problem> {
    let discount = service
        .create_discount(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(discount.into())))
}

pub async fn update_discount(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<DiscountRequest>,
) -> Result<Json<DiscountDto>, Problem> {
    let discount = service
        .update_discount(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(discount.into()))
}

pub async fn delete_discount(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_discount(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Promo codes =====

pub async fn list_promo_codes(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<PromoCodeQuery>,
) -> Result<Json<PageDto<PromoCodeDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let codes = service
        .list_promo_codes(&ctx, query.into(), page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(codes.into()))
}

pub async fn get_promo_code(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<PromoCodeDto>, Problem> {
    let code = service
        .get_promo_code(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(code.into()))
}

pub async fn create_promo_code(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<PromoCodeRequest>,
) -> Result<(StatusCode, Json<PromoCodeDto>), Problem> {
    let code = service
        .create_promo_code(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(code.into())))
}

pub async fn update_promo_code(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<PromoCodeRequest>,
) -> Result<Json<PromoCodeDto>, Problem> {
    let code = service
        .update_promo_code(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(code.into()))
}

pub async fn delete_promo_code(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_promo_code(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// 200 `{"valid": true, "rate": ...}` or 400 `{"valid": false, "message": ...}`
pub async fn validate_promo_code(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<PromoValidationDto>), Problem> {
    let validation = service
        .validate_promo_code(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    let status = if validation.is_valid() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, Json(validation.into())))
}

/// Consume a promo code on an order; 409 when it is no longer usable
pub async fn redeem_promo_code(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<RedeemRequest>,
) -> Result<Json<PromoCodeDto>, Problem> {
    service
        .redeem_promo_code(&ctx, id, req.order_id)
        .await
        .map_err(map_domain_error)?;
    let code = service
        .get_promo_code(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(code.into()))
}

// ===== Returns =====

pub async fn list_returns(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<OrderChildQuery>,
) -> Result<Json<PageDto<ReturnDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let returns = service
        .list_returns(&ctx, query.into(), page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(returns.into()))
}

pub async fn get_return(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<ReturnDto>, Problem> {
    let ret = service.get_return(&ctx, id).await.map_err(map_domain_error)?;
    Ok(Json(ret.into()))
}

pub async fn create_return(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<ReturnRequest>,
) -> Result<(StatusCode, Json<ReturnDto>), Problem> {
    let ret = service
        .create_return(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(ret.into())))
}

pub async fn update_return(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<ReturnRequest>,
) -> Result<Json<ReturnDto>, Problem> {
    let ret = service
        .update_return(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ret.into()))
}

pub async fn delete_return(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_return(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}
