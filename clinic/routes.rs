use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn respond_with(status: u16, content_type: &[u8], body: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    let len = body.len();
    let headers = Header::from_bytes(&b"Content-Type"[..], content_type)
        .into_iter()
        .collect();
    Response::new(StatusCode(status), headers, Cursor::new(body), Some(len), None)
}

pub fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    respond_with(200, b"text/html; charset=utf-8", body.into_bytes())
}

pub fn json_response(status: u16, body: String) -> Response<Cursor<Vec<u8>>> {
    respond_with(status, b"application/json", body.into_bytes())
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    respond_with(404, b"text/plain", b"404 Not Found".to_vec())
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Routes a request to its handler and sends the response.
pub fn dispatch(mut request: Request, state: SharedState) {
    let url = request.url().to_owned();
    let response = route(&mut request, state);
    if let Err(e) = request.respond(response) {
        log::warn!("failed to send response for {}: {}", url, e);
    }
}

/// Builds the response for a request without sending it.
pub fn route(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let method = request.method().clone();
    let path   = request.url().split('?').next().unwrap_or("").to_owned();
    log::debug!("{} {}", method, path);

    match (method, path.as_str()) {
        (Method::Get,  "/")            => handlers::index::handle_get(),
        (Method::Post, "/analyze")     => handlers::analyze::handle_form(request, state),
        (Method::Post, "/api/analyze") => handlers::analyze::handle_api(request, state),
        _ => not_found(),
    }
}
