//! 路由与处理器

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use fieldguard_validator::Verdict;

use crate::extractors::ValidatedJson;
use crate::models::{NewProductResponse, Product, User, UserForm};
use crate::response::EndpointResponse;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/user", post(create_user))
        .route("/user/:id", get(get_user))
        .route("/product", post(create_product))
}

async fn index() -> &'static str {
    "Server up"
}

async fn get_user(Path(id): Path<String>) -> String {
    format!("User ID: {}", id)
}

/// 表单提交的用户注册，错误以纯文本返回
///
/// 字段取自请求体和 URL 查询参数，请求体优先。
/// 非表单类型的请求体按空表单处理。
async fn create_user(
    State(state): State<AppState>,
    query: Result<Query<UserForm>, QueryRejection>,
    body: Result<Form<UserForm>, FormRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Query decoding error");
            return (StatusCode::BAD_REQUEST, "Error parsing form").into_response();
        }
    };

    let body = match body {
        Ok(Form(body)) => body,
        Err(FormRejection::InvalidFormContentType(_)) => UserForm::default(),
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Form decoding error");
            return (StatusCode::BAD_REQUEST, "Error parsing form").into_response();
        }
    };

    let form = body.or(query);
    tracing::debug!(name = %form.name, "Received user registration");
    let user = User::from(form);

    match state.registry.validate(&user) {
        Ok(Verdict::Valid) => "User created successfully".into_response(),
        Ok(Verdict::Invalid(violation)) => {
            tracing::warn!(field = %violation.field, error = %violation, "Validation error");
            (StatusCode::BAD_REQUEST, violation.to_string()).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Record schema is misconfigured");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

async fn create_product(
    ValidatedJson(product): ValidatedJson<Product>,
) -> EndpointResponse<NewProductResponse> {
    tracing::info!(name = %product.name, price = product.price, "Product created");
    EndpointResponse::ok("Product created successfully", NewProductResponse::from(&product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_registry;
    use axum::body::Body;
    use axum::http::Request;
    use fieldguard_validator::{ConstraintSet, RecordSchema, SchemaRegistry};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        routes().with_state(AppState::new(default_registry().unwrap()))
    }

    async fn body_text(resp: Response) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = test_app().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "Server up");
    }

    #[tokio::test]
    async fn test_get_user() {
        let req = Request::builder().uri("/user/42").body(Body::empty()).unwrap();
        let resp = test_app().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "User ID: 42");
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let req = post_form(
            "/user",
            "name=alice&age=30&email=alice%40example.com&password=secret",
        );
        let resp = test_app().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "User created successfully");
    }

    #[tokio::test]
    async fn test_create_user_name_too_short() {
        let req = post_form("/user", "name=ab&age=30&email=alice%40example.com&password=secret");
        let resp = test_app().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "name must be at least 3 characters long");
    }

    #[tokio::test]
    async fn test_create_user_bad_age_is_required_error() {
        let req = post_form("/user", "name=alice&age=old&email=alice%40example.com&password=secret");
        let resp = test_app().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "age is required");
    }

    #[tokio::test]
    async fn test_create_user_missing_fields() {
        let req = post_form("/user", "");
        let resp = test_app().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "name is required");
    }

    #[tokio::test]
    async fn test_create_user_json_body_is_empty_form() {
        let req = post_json("/user", r#"{"name":"alice"}"#);
        let resp = test_app().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "name is required");
    }

    #[tokio::test]
    async fn test_create_user_from_query() {
        let req = Request::builder()
            .method("POST")
            .uri("/user?name=alice&age=30&email=alice%40example.com&password=secret")
            .body(Body::empty())
            .unwrap();
        let resp = test_app().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "User created successfully");
    }

    #[tokio::test]
    async fn test_create_user_body_overrides_query() {
        let req = post_form(
            "/user?name=alice",
            "name=ab&age=30&email=alice%40example.com&password=secret",
        );
        let resp = test_app().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "name must be at least 3 characters long");
    }

    #[tokio::test]
    async fn test_create_product_success() {
        let req = post_json("/product", r#"{"name":"lamp","price":2000000,"stock":5}"#);
        let resp = test_app().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            json!({
                "code": 200,
                "msg": "Product created successfully",
                "data": { "name": "lamp", "price": 2000000 }
            })
        );
    }

    #[tokio::test]
    async fn test_create_product_price_below_minimum() {
        let req = post_json("/product", r#"{"name":"lamp","price":500,"stock":5}"#);
        let resp = test_app().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await,
            json!({ "code": 400, "msg": "price must be at least 1000000", "data": null })
        );
    }

    #[tokio::test]
    async fn test_create_product_invalid_json() {
        let req = post_json("/product", r#"{"name":"lamp","price":"#);
        let resp = test_app().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await,
            json!({ "code": 400, "msg": "Invalid JSON", "data": null })
        );
    }

    #[tokio::test]
    async fn test_create_product_wrong_field_type() {
        let req = post_json("/product", r#"{"name":"lamp","price":"cheap","stock":5}"#);
        let resp = test_app().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["msg"], "Invalid JSON");
    }

    #[tokio::test]
    async fn test_create_product_unregistered_schema_is_500() {
        let mut registry = SchemaRegistry::new();
        registry
            .register_schema(
                RecordSchema::builder("User")
                    .string("name", ConstraintSet::new().required())
                    .build()
                    .unwrap(),
            )
            .unwrap();
        let app = routes().with_state(AppState::new(registry));

        let req = post_json("/product", r#"{"name":"lamp","price":2000000,"stock":5}"#);
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await["code"], 500);
    }
}
