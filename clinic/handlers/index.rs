use std::io::Cursor;
use tiny_http::Response;

use crate::render::render_page;

/// `GET /`: the upload form on its own.
pub fn handle_get() -> Response<Cursor<Vec<u8>>> {
    crate::routes::html_response(render_page("", None))
}
