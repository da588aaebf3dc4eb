use axum::http::{header, StatusCode};

pub type TextResponse = (StatusCode, [(header::HeaderName, &'static str); 1], String);

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

pub fn success(body: String) -> TextResponse {
    text(StatusCode::OK, body)
}

pub fn error(status: StatusCode, message: String) -> TextResponse {
    text(status, message)
}

fn text(status: StatusCode, body: String) -> TextResponse {
    (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], body)
}
