use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, MethodRouter},
    Json, Router,
};
use bookstore_http::{IdPath, ValidatedJson};
use bookstore_kernel::resource_path;

use crate::modules::books::error::BookResult;
use crate::modules::books::models::{Book, BookList, CreateBook, UpdateBook};
use crate::modules::books::repository::BookRepository;
use crate::modules::books::service::BookService;
use crate::modules::books::MODULE_NAME;
use crate::modules::sellers::repository::SellerRepository;

type SharedService<B, S> = BookService<B, S>;

/// Book routes: `/api/v1/books/` and `/api/v1/books/{id}`.
pub fn router<B, S>(service: BookService<B, S>) -> Router
where
    B: BookRepository + 'static,
    S: SellerRepository + 'static,
{
    let base = resource_path(MODULE_NAME);
    let collection = || -> MethodRouter<SharedService<B, S>> {
        get(list_books::<B, S>).post(create_book::<B, S>)
    };

    Router::new()
        .route(&format!("{base}/"), collection())
        .route(&base, collection())
        .route(
            &format!("{base}/{{id}}"),
            get(get_book::<B, S>)
                .put(update_book::<B, S>)
                .delete(delete_book::<B, S>),
        )
        .with_state(service)
}

async fn create_book<B: BookRepository, S: SellerRepository>(
    State(service): State<SharedService<B, S>>,
    ValidatedJson(input): ValidatedJson<CreateBook>,
) -> BookResult<impl IntoResponse> {
    let book = service.create_book(input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn list_books<B: BookRepository, S: SellerRepository>(
    State(service): State<SharedService<B, S>>,
) -> BookResult<Json<BookList>> {
    Ok(Json(service.list_books().await?))
}

async fn get_book<B: BookRepository, S: SellerRepository>(
    State(service): State<SharedService<B, S>>,
    IdPath(id): IdPath,
) -> BookResult<Json<Book>> {
    Ok(Json(service.get_book(id).await?))
}

async fn update_book<B: BookRepository, S: SellerRepository>(
    State(service): State<SharedService<B, S>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateBook>,
) -> BookResult<Json<Book>> {
    Ok(Json(service.update_book(id, input).await?))
}

async fn delete_book<B: BookRepository, S: SellerRepository>(
    State(service): State<SharedService<B, S>>,
    IdPath(id): IdPath,
) -> BookResult<StatusCode> {
    service.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
