//! Embedded page assets
//!
//! Falls back to serving from `ui/dist` on disk when a file is not embedded.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;
use std::path::PathBuf;

#[derive(Embed)]
#[folder = "ui/dist"]
struct Assets;

/// Serve embedded static files, with filesystem fallback for development
pub async fn serve_static(req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');

    if let Some(content) = Assets::get(path) {
        return asset_response(path, content.data.into_owned());
    }

    // Never escape the asset directory
    if path.split('/').any(|segment| segment == "..") {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    }

    let fs_path = PathBuf::from("ui/dist").join(path);
    match std::fs::read(&fs_path) {
        Ok(content) => asset_response(path, content),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

fn asset_response(path: &str, body: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime.as_ref().to_string())],
        body,
    )
        .into_response()
}

/// Get the index.html content (embedded or from filesystem)
pub fn get_index_html() -> Option<String> {
    if let Some(content) = Assets::get("index.html") {
        return String::from_utf8(content.data.into_owned()).ok();
    }

    std::fs::read_to_string("ui/dist/index.html").ok()
}
