//! HTTP handlers for the product catalog

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    AppError, IdPath, ValidatedJson,
};
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::models::ProductView;
use crate::repository::ProductStore;
use crate::service::ProductService;

/// OpenAPI documentation for the product endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(ProductView),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<S: ProductStore + 'static>(service: ProductService<S>) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(service)
}

/// List all products
///
/// An empty catalog answers 404 with an empty array body.
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "List of products", body = Vec<ProductView>),
        (status = 404, description = "No products stored", body = Vec<ProductView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<S: ProductStore>(
    State(service): State<ProductService<S>>,
) -> ProductResult<impl IntoResponse> {
    let products = service.list_products().await?;
    let status = if products.is_empty() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    Ok((status, Json(products)))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductView,
    responses(
        (status = 201, description = "Product created", body = ProductView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<S: ProductStore>(
    State(service): State<ProductService<S>>,
    ValidatedJson(input): ValidatedJson<ProductView>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductView),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<S: ProductStore>(
    State(service): State<ProductService<S>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<ProductView>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace the name and price of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = ProductView,
    responses(
        (status = 200, description = "Product updated", body = ProductView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<S: ProductStore>(
    State(service): State<ProductService<S>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ProductView>,
) -> ProductResult<Json<ProductView>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product and return it
///
/// Every service failure, an unknown id included, answers 500.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ProductView),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<S: ProductStore>(
    State(service): State<ProductService<S>>,
    IdPath(id): IdPath,
) -> Result<Json<ProductView>, AppError> {
    service
        .delete_product(id)
        .await
        .map(Json)
        .map_err(|e| match e {
            ProductError::Infrastructure(_) => AppError::from(e),
            other => AppError::InternalServerError(other.to_string()),
        })
}
