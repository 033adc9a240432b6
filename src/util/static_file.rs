use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use rust_embed::{EmbeddedFile, RustEmbed};

/// Contents of `static/`, with `.js` and `.css` stored gzip-compressed by the build script.
#[derive(RustEmbed)]
#[folder = "$PROCESSED_STATIC_PATH/"]
pub struct Asset;

pub struct StaticFile<T>(pub T);

/// Looks up `path`, falling back to its precompressed `.gz` sibling.
/// The flag tells whether the returned data is gzip encoded.
fn lookup(path: &str) -> Option<(EmbeddedFile, bool)> {
    if let Some(file) = Asset::get(path) {
        return Some((file, path.ends_with(".gz")));
    }
    Asset::get(&format!("{}.gz", path)).map(|file| (file, true))
}

impl<T> IntoResponse for StaticFile<T>
where
    T: Into<String>,
{
    fn into_response(self) -> Response {
        let path: String = self.0.into();

        let Some((content, gzipped)) = lookup(&path) else {
            return (StatusCode::NOT_FOUND, "404 Not Found").into_response();
        };

        let mime = mime_guess::from_path(path.strip_suffix(".gz").unwrap_or(&path))
            .first_or_octet_stream();
        let mut response = ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response();

        if gzipped {
            response
                .headers_mut()
                .insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_index_as_html() {
        let response = StaticFile("index.html").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
    }

    #[test]
    fn scripts_are_served_precompressed() {
        let response = StaticFile("app.js").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "gzip");
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.ends_with("javascript"));
    }

    #[test]
    fn unknown_files_are_not_found() {
        let response = StaticFile("missing.txt").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
