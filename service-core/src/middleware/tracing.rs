use axum::http::{HeaderMap, HeaderValue};
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Caller-supplied id if it is short printable ASCII, otherwise `None`.
fn incoming_request_id(headers: &HeaderMap) -> Option<HeaderValue> {
    let value = headers.get(REQUEST_ID_HEADER)?;
    let bytes = value.as_bytes();
    let acceptable = !bytes.is_empty()
        && bytes.len() <= MAX_REQUEST_ID_LEN
        && bytes.iter().all(u8::is_ascii_graphic);
    acceptable.then(|| value.clone())
}

/// Tag the request and its response with an `x-request-id`, minting a UUID
/// when the caller sent none or an unusable one. Must run outside the
/// tracing layer so the request span sees the final id.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let request_id = match incoming_request_id(req.headers()) {
        Some(value) => value,
        None => match HeaderValue::from_str(&Uuid::new_v4().to_string()) {
            Ok(value) => value,
            Err(_) => return next.run(req).await,
        },
    };

    req.headers_mut().insert(REQUEST_ID_HEADER, request_id.clone());
    let mut response = next.run(req).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, request_id);
    response
}
