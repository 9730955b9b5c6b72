use crate::telemetry::RequestId;
use axum::{
    extract::Request,
    http::{header::HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied request id that is propagated as-is
const MAX_REQUEST_ID_LEN: usize = 128;

/// Reuses a sane caller-supplied `x-request-id` or mints one, then echoes it on the response
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let (request_id, header_value) = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .and_then(|v| v.to_str().ok().map(|s| (RequestId::new(s), v.clone())))
        .unwrap_or_else(generated_request_id);

    request.headers_mut().insert(
        HeaderName::from_static(REQUEST_ID_HEADER),
        header_value.clone(),
    );

    request.extensions_mut().insert(request_id.clone());

    // the trace layer below picks the id up from the extension for its span
    let mut response =
        crate::telemetry::scope_request_id(request_id, next.run(request)).await;

    response
        .headers_mut()
        .insert(HeaderName::from_static(REQUEST_ID_HEADER), header_value);

    response
}

fn generated_request_id() -> (RequestId, HeaderValue) {
    let request_id = RequestId::default();
    // uuid text is always a valid header value
    let value = HeaderValue::from_str(request_id.as_str())
        .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
    (request_id, value)
}
