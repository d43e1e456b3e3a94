use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, MethodRouter},
    Json, Router,
};
use bookstore_http::{IdPath, ValidatedJson};
use bookstore_kernel::resource_path;

use crate::modules::books::repository::BookRepository;
use crate::modules::sellers::error::SellerResult;
use crate::modules::sellers::models::{
    CreateSeller, SellerDetail, SellerList, SellerView, UpdateSeller,
};
use crate::modules::sellers::repository::SellerRepository;
use crate::modules::sellers::service::SellerService;
use crate::modules::sellers::MODULE_NAME;
use crate::utils;

type SharedService<S, B> = SellerService<S, B>;

/// Seller routes: `/api/v1/sellers/` and `/api/v1/sellers/{id}`.
///
/// The collection is reachable with and without the trailing slash.
pub fn router<S, B>(service: SellerService<S, B>) -> Router
where
    S: SellerRepository + 'static,
    B: BookRepository + 'static,
{
    let base = resource_path(MODULE_NAME);
    let collection = || -> MethodRouter<SharedService<S, B>> {
        get(list_sellers::<S, B>).post(create_seller::<S, B>)
    };

    let prefix = utils::log_prefix(MODULE_NAME);
    tracing::debug!(target: "bookstore.routes", %prefix, %base, "building seller routes");

    Router::new()
        .route(&format!("{base}/"), collection())
        .route(&base, collection())
        .route(
            &format!("{base}/{{id}}"),
            get(get_seller::<S, B>)
                .put(update_seller::<S, B>)
                .delete(delete_seller::<S, B>),
        )
        .with_state(service)
}

async fn create_seller<S: SellerRepository, B: BookRepository>(
    State(service): State<SharedService<S, B>>,
    ValidatedJson(input): ValidatedJson<CreateSeller>,
) -> SellerResult<impl IntoResponse> {
    let seller = service.create_seller(input).await?;
    Ok((StatusCode::CREATED, Json(seller)))
}

async fn list_sellers<S: SellerRepository, B: BookRepository>(
    State(service): State<SharedService<S, B>>,
) -> SellerResult<Json<SellerList>> {
    Ok(Json(service.list_sellers().await?))
}

async fn get_seller<S: SellerRepository, B: BookRepository>(
    State(service): State<SharedService<S, B>>,
    IdPath(id): IdPath,
) -> SellerResult<Json<SellerDetail>> {
    Ok(Json(service.get_seller(id).await?))
}

async fn update_seller<S: SellerRepository, B: BookRepository>(
    State(service): State<SharedService<S, B>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateSeller>,
) -> SellerResult<Json<SellerView>> {
    Ok(Json(service.update_seller(id, input).await?))
}

async fn delete_seller<S: SellerRepository, B: BookRepository>(
    State(service): State<SharedService<S, B>>,
    IdPath(id): IdPath,
) -> SellerResult<StatusCode> {
    service.delete_seller(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
