use actix_cors::Cors;
use actix_web::http::header;

/// Explicit-origin CORS policy.
///
/// `allowed_raw` is the comma-separated `CORS_ALLOWED_ORIGINS` value. Entries
/// that are empty, `null`, or not http(s) URLs are ignored; with nothing
/// valid left, only the local dev frontend is allowed.
pub fn cors_middleware(allowed_raw: &str) -> Cors {
    let mut origins: Vec<&str> = allowed_raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .collect();

    if origins.is_empty() {
        origins = vec!["http://localhost:3000", "http://127.0.0.1:3000"];
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
