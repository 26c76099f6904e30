use axum::{
    body::Bytes,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use payload_core::{json_body, parse_json};
use tokio::net::TcpListener;
use tracing::{debug, warn};
use url::form_urlencoded;

pub fn app() -> Router {
    Router::new()
        .route("/json", post(echo_json))
        .route("/form", post(echo_form))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Decode the body as JSON and send the same value back.
async fn echo_json(body: Bytes) -> Response {
    let value = match parse_json(&body[..]) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "rejecting json body");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };
    match json_body(&value) {
        Ok(out) => {
            debug!(len = out.len(), "echoing json body");
            ([(header::CONTENT_TYPE, out.content_type())], out.into_bytes()).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// Decode the body as form pairs and send them back as `[[key, value], ...]`.
async fn echo_form(body: Bytes) -> Json<Vec<(String, String)>> {
    let pairs: Vec<(String, String)> = form_urlencoded::parse(&body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    debug!(fields = pairs.len(), "echoing form body");
    Json(pairs)
}
