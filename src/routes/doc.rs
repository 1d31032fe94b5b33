use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        orders::{CheckoutItem, CheckoutRequest, ConfirmOrderRequest, OrderPasscodeQuery},
        products::{CreateProductRequest, UpdateProductRequest},
    },
    error::ErrorBody,
    models::{Order, OrderDetail, OrderWithDetails, Product},
    routes::{admin, health, orders, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "admin_secret",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("Authorization"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        orders::checkout,
        orders::confirm_order,
        orders::get_order,
        admin::create_product,
        admin::update_product,
        admin::delete_product
    ),
    components(
        schemas(
            Product,
            Order,
            OrderDetail,
            OrderWithDetails,
            CheckoutRequest,
            CheckoutItem,
            ConfirmOrderRequest,
            OrderPasscodeQuery,
            CreateProductRequest,
            UpdateProductRequest,
            ErrorBody,
            health::HealthData
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalog"),
        (name = "Orders", description = "Checkout, confirmation and passcode-gated reads"),
        (name = "Admin", description = "Catalog management behind the admin secret"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
