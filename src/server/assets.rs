//! Browser client, compiled into the binary.

use axum::http::{header, Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};

const INDEX_HTML: &str = include_str!("../../static/index.html");
const APP_JS: &str = include_str!("../../static/app.js");

pub async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
}

/// Every other GET gets the single page.
pub async fn index(method: Method) -> Response {
    if method == Method::GET || method == Method::HEAD {
        Html(INDEX_HTML).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}
