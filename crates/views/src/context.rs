//! axum integration: the request-context extractor and the JSON
//! partial-update response type.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderValue, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use std::convert::Infallible;

use menukit_core::{CommandResponse, RequestContext};

/// Extracts a [`RequestContext`] from request parts.
///
/// Infallible: a missing header simply means a non-partial request.
/// `user` and permission flags are left for the host app's auth layer to
/// fill in.
#[derive(Debug, Clone)]
pub struct ExtractContext(pub RequestContext);

impl<S> FromRequestParts<S> for ExtractContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let is_ajax = parts
            .headers
            .get("x-requested-with")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));

        let mut ctx = RequestContext::new(parts.uri.path()).with_ajax(is_ajax);
        ctx.query = parts.uri.query().map(str::to_string);
        Ok(Self(ctx))
    }
}

/// A [`CommandResponse`] as an HTTP response: JSON body, never cached.
#[derive(Debug, Clone)]
pub struct AjaxResponse(pub CommandResponse);

impl IntoResponse for AjaxResponse {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::OK, Json(self.0)).into_response();
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store"),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use http_body_util::BodyExt;
    use menukit_core::AjaxCommand;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/probe",
            get(|ExtractContext(ctx): ExtractContext| async move {
                format!("{}|{}|{}", ctx.path, ctx.is_ajax, ctx.full_path())
            }),
        )
    }

    #[tokio::test]
    async fn extracts_path_and_query() {
        let req = Request::builder()
            .uri("/probe?page=2")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(req).await.unwrap();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"/probe|false|/probe?page=2");
    }

    #[tokio::test]
    async fn detects_partial_requests() {
        let req = Request::builder()
            .uri("/probe")
            .header("X-Requested-With", "XMLHttpRequest")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(req).await.unwrap();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"/probe|true|/probe");
    }

    #[tokio::test]
    async fn ajax_response_is_uncacheable_json() {
        let response =
            AjaxResponse(CommandResponse::of(AjaxCommand::message("hi"))).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("cache-control").unwrap(),
            "no-cache, no-store"
        );

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json[0]["function"], "message");
    }
}
