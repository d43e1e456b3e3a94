//! Request extractors that reject with the standard error envelope.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Json, Path, Request,
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// Flatten validator errors into `[{field, code, message}]`, sorted by field.
pub fn validation_details(errors: &ValidationErrors) -> Vec<serde_json::Value> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |err| {
                json!({
                    "field": field,
                    "code": err.code,
                    "message": err.message,
                })
            })
        })
        .collect()
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(
            vec![json!({ "field": "body", "message": rejection.body_text() })],
            "request body is not valid JSON for this resource",
        )
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::validation(
            vec![json!({ "field": "id", "message": rejection.body_text() })],
            "path parameter `id` must be an integer",
        )
    }
}

/// JSON body that is deserialized and then checked with `validator`.
///
/// Both malformed JSON and failed validation produce a 422.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;

        data.validate().map_err(|errors| {
            AppError::validation(validation_details(&errors), "request validation failed")
        })?;

        Ok(ValidatedJson(data))
    }
}

/// Integer resource id taken from the `{id}` path segment.
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state).await?;
        Ok(IdPath(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::IntoResponse,
        routing::{get, post},
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1))]
        name: String,
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/things",
                post(|ValidatedJson(payload): ValidatedJson<Payload>| async move { payload.name }),
            )
            .route(
                "/things/{id}",
                get(|IdPath(id): IdPath| async move { id.to_string().into_response() }),
            )
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/things")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let response = app().oneshot(post_json(r#"{"name":"ok"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_field_is_unprocessable() {
        let response = app().oneshot(post_json(r#"{"name":""}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn missing_field_is_unprocessable() {
        let response = app().oneshot(post_json("{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn non_integer_id_is_unprocessable() {
        let request = Request::builder()
            .uri("/things/abc")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn integer_id_is_extracted() {
        let request = Request::builder()
            .uri("/things/42")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn details_are_sorted_by_field() {
        #[derive(Validate)]
        struct Two {
            #[validate(length(min = 1))]
            zed: String,
            #[validate(length(min = 1))]
            alpha: String,
        }

        let errors = Two {
            zed: String::new(),
            alpha: String::new(),
        }
        .validate()
        .unwrap_err();

        let details = validation_details(&errors);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["field"], "alpha");
        assert_eq!(details[1]["field"], "zed");
    }
}
