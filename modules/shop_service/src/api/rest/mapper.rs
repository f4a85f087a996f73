//! Mapper implementations for converting between DTOs and contract models
//!
//! This module contains all From/Into implementations for bidirectional
//! conversion between REST DTOs and transport-agnostic contract models.

use super::dto::*;
use crate::contract::{self, ShopError};
use crate::domain::pricing::{amount_saved, line_total, order_subtotal};

impl<T, U: From<T>> From<contract::Page<T>> for PageDto<U> {
    fn from(page: contract::Page<T>) -> Self {
        Self {
            items: page.items.into_iter().map(U::from).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
        }
    }
}

// ===== Account conversions =====

impl From<contract::Account> for AccountDto {
    fn from(account: contract::Account) -> Self {
        Self {
            full_name: account.full_name(),
            id: account.id,
            username: account.username,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            is_staff: account.is_staff,
            is_superuser: account.is_superuser,
            is_active: account.is_active,
            date_joined: account.date_joined,
            last_login: account.last_login,
        }
    }
}

impl From<contract::StaffProfile> for StaffProfileDto {
    fn from(profile: contract::StaffProfile) -> Self {
        Self {
            matricule: profile.matricule,
            photo: profile.photo,
            phone: profile.phone,
            address: profile.address,
            hire_date: profile.hire_date,
            job_title: profile.job_title,
            bio: profile.bio,
            skills: profile.skills,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl From<contract::AccountDetail> for AccountDetailDto {
    fn from(detail: contract::AccountDetail) -> Self {
        Self {
            account: detail.account.into(),
            profile: detail.profile.map(Into::into),
        }
    }
}

impl From<StaffProfileRequest> for contract::StaffProfileChanges {
    fn from(req: StaffProfileRequest) -> Self {
        Self {
            matricule: req.matricule,
            photo: req.photo,
            phone: req.phone,
            address: req.address,
            hire_date: req.hire_date,
            job_title: req.job_title,
            bio: req.bio,
            skills: req.skills,
        }
    }
}

impl From<contract::TokenPair> for TokenPairDto {
    fn from(pair: contract::TokenPair) -> Self {
        Self {
            access: pair.access,
            refresh: pair.refresh,
        }
    }
}

impl From<CreateAccountRequest> for contract::NewAccount {
    fn from(req: CreateAccountRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
            is_staff: req.is_staff,
            is_superuser: req.is_superuser,
            profile: req.profile.map(Into::into).unwrap_or_default(),
        }
    }
}

impl From<UpdateAccountRequest> for contract::AccountUpdate {
    fn from(req: UpdateAccountRequest) -> Self {
        Self {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
            is_staff: req.is_staff,
            is_superuser: req.is_superuser,
            is_active: req.is_active,
            profile: req.profile.map(Into::into),
        }
    }
}

// ===== Catalog conversions =====

impl From<contract::Category> for CategoryDto {
    fn from(category: contract::Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}

impl From<CategoryRequest> for contract::CategoryDraft {
    fn from(req: CategoryRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

impl From<contract::SubCategory> for SubCategoryDto {
    fn from(sub: contract::SubCategory) -> Self {
        Self {
            id: sub.id,
            name: sub.name,
            description: sub.description,
            category_id: sub.category_id,
        }
    }
}

impl From<SubCategoryRequest> for contract::SubCategoryDraft {
    fn from(req: SubCategoryRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            category_id: req.category_id,
        }
    }
}

impl From<contract::Product> for ProductDto {
    fn from(product: contract::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            description: product.description,
            sole_type: product.sole_type,
            raw_materials: product.raw_materials,
            origin: product.origin,
            category_ids: product.category_ids,
        }
    }
}

impl From<contract::ProductDetail> for ProductDetailDto {
    fn from(detail: contract::ProductDetail) -> Self {
        Self {
            product: detail.product.into(),
            articles: detail.articles.into_iter().map(Into::into).collect(),
            media: detail.media.into_iter().map(Into::into).collect(),
            promotions: detail.promotions.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ProductRequest> for contract::ProductDraft {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: req.name,
            price: req.price,
            description: req.description,
            sole_type: req.sole_type,
            raw_materials: req.raw_materials,
            origin: req.origin,
            category_ids: req.category_ids,
        }
    }
}

impl From<contract::Article> for ArticleDto {
    fn from(article: contract::Article) -> Self {
        Self {
            id: article.id,
            product_id: article.product_id,
            color: article.color,
            size: article.size,
            barcode: article.barcode,
            purchase_date: article.purchase_date,
        }
    }
}

impl From<ArticleRequest> for contract::ArticleDraft {
    fn from(req: ArticleRequest) -> Self {
        Self {
            product_id: req.product_id,
            color: req.color,
            size: req.size,
            barcode: req.barcode,
            purchase_date: req.purchase_date,
        }
    }
}

impl From<contract::Media> for MediaDto {
    fn from(media: contract::Media) -> Self {
        Self {
            id: media.id,
            product_id: media.product_id,
            media_type: media.media_type,
            url: media.url,
        }
    }
}

impl From<MediaRequest> for contract::MediaDraft {
    fn from(req: MediaRequest) -> Self {
        Self {
            product_id: req.product_id,
            media_type: req.media_type,
            url: req.url,
        }
    }
}

impl From<contract::Promotion> for PromotionDto {
    fn from(promotion: contract::Promotion) -> Self {
        Self {
            id: promotion.id,
            product_id: promotion.product_id,
            promo_type: promotion.promo_type,
            reduction: promotion.reduction,
            start_date: promotion.start_date,
            end_date: promotion.end_date,
        }
    }
}

impl From<PromotionRequest> for contract::PromotionDraft {
    fn from(req: PromotionRequest) -> Self {
        Self {
            product_id: req.product_id,
            promo_type: req.promo_type,
            reduction: req.reduction,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

impl From<contract::Catalogue> for CatalogueDto {
    fn from(catalogue: contract::Catalogue) -> Self {
        Self {
            id: catalogue.id,
            name: catalogue.name,
            description: catalogue.description,
            created_on: catalogue.created_on,
            product_ids: catalogue.product_ids,
        }
    }
}

impl From<CatalogueRequest> for contract::CatalogueDraft {
    fn from(req: CatalogueRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            product_ids: req.product_ids,
        }
    }
}

// ===== Customer conversions =====

impl From<contract::Customer> for CustomerDto {
    fn from(customer: contract::Customer) -> Self {
        Self {
            id: customer.id,
            user: AccountSummaryDto {
                id: customer.account.id,
                username: customer.account.username,
                email: customer.account.email,
                first_name: customer.account.first_name,
                last_name: customer.account.last_name,
            },
            last_name: customer.last_name,
            first_name: customer.first_name,
            phone: customer.phone,
            gender: customer.gender,
            loyalty_points: customer.loyalty_points,
        }
    }
}

impl From<RegisterCustomerRequest> for contract::NewCustomer {
    fn from(req: RegisterCustomerRequest) -> Self {
        Self {
            last_name: req.last_name,
            first_name: req.first_name,
            email: req.email,
            username: req.username,
            password: req.password,
            phone: req.phone,
            gender: req.gender,
        }
    }
}

impl From<UpdateCustomerRequest> for contract::CustomerUpdate {
    fn from(req: UpdateCustomerRequest) -> Self {
        Self {
            last_name: req.last_name,
            first_name: req.first_name,
            phone: req.phone,
            gender: req.gender,
        }
    }
}

impl From<contract::Favorite> for FavoriteDto {
    fn from(favorite: contract::Favorite) -> Self {
        Self {
            id: favorite.id,
            customer_id: favorite.customer_id,
            product_id: favorite.product_id,
            added_at: favorite.added_at,
        }
    }
}

impl From<FavoriteRequest> for contract::FavoriteDraft {
    fn from(req: FavoriteRequest) -> Self {
        Self {
            customer_id: req.customer_id,
            product_id: req.product_id,
        }
    }
}

impl From<contract::Review> for ReviewDto {
    fn from(review: contract::Review) -> Self {
        Self {
            id: review.id,
            customer_id: review.customer_id,
            product_id: review.product_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

impl From<ReviewRequest> for contract::ReviewDraft {
    fn from(req: ReviewRequest) -> Self {
        Self {
            customer_id: req.customer_id,
            product_id: req.product_id,
            rating: req.rating,
            comment: req.comment,
        }
    }
}

// ===== Order conversions =====

impl From<contract::OrderStatus> for OrderStatusDto {
    fn from(status: contract::OrderStatus) -> Self {
        Self {
            id: status.id,
            label: status.label,
        }
    }
}

impl From<contract::Order> for OrderDto {
    fn from(order: contract::Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            order_date: order.order_date,
            address: order.address,
            region: order.region,
            status_id: order.status_id,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl From<contract::OrderLine> for OrderLineDto {
    fn from(line: contract::OrderLine) -> Self {
        Self {
            line_total: line_total(line.unit_price, line.quantity),
            id: line.id,
            order_id: line.order_id,
            product_id: line.product_id,
            article_id: line.article_id,
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

impl From<contract::Discount> for DiscountDto {
    fn from(discount: contract::Discount) -> Self {
        Self {
            id: discount.id,
            order_id: discount.order_id,
            rate: discount.rate,
            created_at: discount.created_at,
        }
    }
}

impl From<contract::OrderDetail> for OrderDetailDto {
    fn from(detail: contract::OrderDetail) -> Self {
        let subtotal = order_subtotal(&detail.lines);
        let discounts = detail
            .discounts
            .into_iter()
            .map(|discount| AppliedDiscountDto {
                amount_saved: amount_saved(&detail.lines, discount.rate),
                discount: discount.into(),
            })
            .collect();

        Self {
            order: detail.order.into(),
            status: detail.status.map(Into::into),
            lines: detail.lines.into_iter().map(Into::into).collect(),
            discounts,
            promo_codes: detail.promo_codes.into_iter().map(Into::into).collect(),
            returns: detail.returns.into_iter().map(Into::into).collect(),
            subtotal,
        }
    }
}

impl From<OrderLineRequest> for contract::OrderLineDraft {
    fn from(req: OrderLineRequest) -> Self {
        Self {
            product_id: req.product_id,
            article_id: req.article_id,
            quantity: req.quantity,
        }
    }
}

impl From<CreateOrderRequest> for contract::OrderDraft {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            customer_id: req.customer_id,
            address: req.address,
            region: req.region,
            status_id: req.status_id,
            lines: req.lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<UpdateOrderRequest> for contract::OrderUpdate {
    fn from(req: UpdateOrderRequest) -> Self {
        Self {
            address: req.address,
            region: req.region,
            status_id: req.status_id,
        }
    }
}

impl From<UpdateOrderLineRequest> for contract::OrderLineUpdate {
    fn from(req: UpdateOrderLineRequest) -> Self {
        Self {
            article_id: req.article_id,
            quantity: req.quantity,
        }
    }
}

impl From<OrderChildQuery> for contract::OrderChildFilter {
    fn from(query: OrderChildQuery) -> Self {
        Self {
            order: query.order,
            customer: query.customer,
        }
    }
}

impl From<contract::CartEntry> for CartEntryDto {
    fn from(entry: contract::CartEntry) -> Self {
        Self {
            line_total: line_total(entry.unit_price, entry.quantity),
            id: entry.id,
            customer_id: entry.customer_id,
            product_id: entry.product_id,
            quantity: entry.quantity,
            added_at: entry.added_at,
            unit_price: entry.unit_price,
        }
    }
}

impl From<CartEntryRequest> for contract::CartEntryDraft {
    fn from(req: CartEntryRequest) -> Self {
        Self {
            customer_id: req.customer_id,
            product_id: req.product_id,
            quantity: req.quantity,
        }
    }
}

impl From<DiscountRequest> for contract::DiscountDraft {
    fn from(req: DiscountRequest) -> Self {
        Self {
            order_id: req.order_id,
            rate: req.rate,
        }
    }
}

impl From<contract::PromoCode> for PromoCodeDto {
    fn from(code: contract::PromoCode) -> Self {
        Self {
            id: code.id,
            code: code.code,
            rate: code.rate,
            order_id: code.order_id,
            start_date: code.start_date,
            end_date: code.end_date,
            active: code.active,
        }
    }
}

impl From<PromoCodeRequest> for contract::PromoCodeDraft {
    fn from(req: PromoCodeRequest) -> Self {
        Self {
            code: req.code,
            rate: req.rate,
            order_id: req.order_id,
            start_date: req.start_date,
            end_date: req.end_date,
            active: req.active,
        }
    }
}

impl From<PromoCodeQuery> for contract::PromoCodeFilter {
    fn from(query: PromoCodeQuery) -> Self {
        Self {
            active: query.active,
            order: query.order,
            search: query.search,
        }
    }
}

impl From<contract::PromoValidation> for PromoValidationDto {
    fn from(validation: contract::PromoValidation) -> Self {
        match validation {
            contract::PromoValidation::Valid { rate } => Self {
                valid: true,
                rate: Some(rate),
                message: None,
            },
            contract::PromoValidation::Invalid { message } => Self {
                valid: false,
                rate: None,
                message: Some(message),
            },
        }
    }
}

impl From<contract::Return> for ReturnDto {
    fn from(ret: contract::Return) -> Self {
        Self {
            id: ret.id,
            order_id: ret.order_id,
            reason: ret.reason,
            return_date: ret.return_date,
            created_at: ret.created_at,
        }
    }
}

impl From<ReturnRequest> for contract::ReturnDraft {
    fn from(req: ReturnRequest) -> Self {
        Self {
            order_id: req.order_id,
            reason: req.reason,
        }
    }
}

// ===== Organization conversions =====

impl From<contract::Pole> for PoleDto {
    fn from(pole: contract::Pole) -> Self {
        Self {
            id: pole.id,
            name: pole.name,
            code: pole.code.to_string(),
            description: pole.description,
            responsible_id: pole.responsible_id,
            active: pole.active,
            created_at: pole.created_at,
            updated_at: pole.updated_at,
        }
    }
}

impl TryFrom<PoleRequest> for contract::PoleDraft {
    type Error = ShopError;

    fn try_from(req: PoleRequest) -> Result<Self, Self::Error> {
        let code = req
            .code
            .parse()
            .map_err(|message: String| ShopError::invalid("code", message))?;
        Ok(Self {
            name: req.name,
            code,
            description: req.description,
            responsible_id: req.responsible_id,
            active: req.active,
        })
    }
}

impl From<contract::ServiceUnit> for ServiceUnitDto {
    fn from(unit: contract::ServiceUnit) -> Self {
        Self {
            id: unit.id,
            name: unit.name,
            description: unit.description,
            pole_id: unit.pole_id,
            responsible_id: unit.responsible_id,
            active: unit.active,
            created_at: unit.created_at,
            updated_at: unit.updated_at,
        }
    }
}

impl From<ServiceUnitRequest> for contract::ServiceUnitDraft {
    fn from(req: ServiceUnitRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            pole_id: req.pole_id,
            responsible_id: req.responsible_id,
            active: req.active,
        }
    }
}

impl From<contract::Team> for TeamDto {
    fn from(team: contract::Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            description: team.description,
            service_id: team.service_id,
            responsible_id: team.responsible_id,
            active: team.active,
            created_at: team.created_at,
            updated_at: team.updated_at,
        }
    }
}

impl From<TeamRequest> for contract::TeamDraft {
    fn from(req: TeamRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            service_id: req.service_id,
            responsible_id: req.responsible_id,
            active: req.active,
        }
    }
}

impl From<contract::Membership> for MembershipDto {
    fn from(membership: contract::Membership) -> Self {
        let (service_id, team_id) = match membership.unit {
            contract::UnitRef::Service(id) => (Some(id), None),
            contract::UnitRef::Team(id) => (None, Some(id)),
        };
        Self {
            id: membership.id,
            service_id,
            team_id,
            account_id: membership.account_id,
            assigned_at: membership.assigned_at,
            active: membership.active,
        }
    }
}

impl From<contract::RoleAssignment> for RoleAssignmentDto {
    fn from(assignment: contract::RoleAssignment) -> Self {
        Self {
            id: assignment.id,
            account_id: assignment.account_id,
            role: assignment.role.to_string(),
            pole_id: assignment.pole_id,
            service_id: assignment.service_id,
            team_id: assignment.team_id,
            assigned_at: assignment.assigned_at,
            active: assignment.active,
        }
    }
}

fn parse_role(raw: &str) -> Result<contract::Role, ShopError> {
    raw.parse()
        .map_err(|message: String| ShopError::invalid("role", message))
}

impl TryFrom<RoleAssignmentRequest> for contract::RoleAssignmentDraft {
    type Error = ShopError;

    fn try_from(req: RoleAssignmentRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            account_id: req.account_id,
            role: parse_role(&req.role)?,
            pole_id: req.pole_id,
            service_id: req.service_id,
            team_id: req.team_id,
            active: req.active,
        })
    }
}

impl TryFrom<RoleQuery> for contract::RoleFilter {
    type Error = ShopError;

    fn try_from(query: RoleQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            account: query.account,
            role: query.role.as_deref().map(parse_role).transpose()?,
            pole: query.pole,
            active: query.active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn line(id: i64, unit_price: &str, quantity: i32) -> contract::OrderLine {
        contract::OrderLine {
            id,
            order_id: 1,
            product_id: 1,
            article_id: None,
            quantity,
            unit_price: unit_price.parse().unwrap(),
        }
    }

    #[test]
    fn order_detail_carries_totals() {
        let now = Utc::now();
        let detail = contract::OrderDetail {
            order: contract::Order {
                id: 1,
                customer_id: 7,
                order_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                address: None,
                region: None,
                status_id: None,
                created_at: now,
                updated_at: now,
            },
            status: None,
            lines: vec![line(1, "349.00", 2), line(2, "100.00", 1)],
            discounts: vec![contract::Discount {
                id: 3,
                order_id: 1,
                rate: "10".parse().unwrap(),
                created_at: now,
            }],
            promo_codes: vec![],
            returns: vec![],
        };

        let dto = OrderDetailDto::from(detail);
        assert_eq!(dto.subtotal, "798.00".parse::<Decimal>().unwrap());
        assert_eq!(dto.lines[0].line_total, "698.00".parse::<Decimal>().unwrap());
        assert_eq!(
            dto.discounts[0].amount_saved,
            "79.80".parse::<Decimal>().unwrap()
        );
    }

    #[test]
    fn invalid_validation_serializes_message_only() {
        let dto = PromoValidationDto::from(contract::PromoValidation::Invalid {
            message: "already used".into(),
        });
        let json = serde_json::to_value(dto).unwrap();
        assert_eq!(json, serde_json::json!({"valid": false, "message": "already used"}));
    }

    #[test]
    fn unknown_pole_code_is_a_field_error() {
        let req = PoleRequest {
            name: "Logistics".into(),
            code: "LOGISTICS".into(),
            description: String::new(),
            responsible_id: None,
            active: true,
        };
        let err = contract::PoleDraft::try_from(req).unwrap_err();
        assert!(matches!(err, ShopError::Validation { fields } if fields.contains_key("code")));
    }
}
