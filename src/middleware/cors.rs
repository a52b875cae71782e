use http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS policy for the browser client. Origins come from configuration;
/// without any configured origin the layer stays permissive (the admin
/// surface is still token-guarded).
pub fn cors_layer() -> CorsLayer {
    let config = crate::config::get_config();
    match &config.cors_allowed_origins {
        Some(raw) => {
            let origins: Vec<HeaderValue> = raw
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                tracing::warn!("CORS_ALLOWED_ORIGINS set but no origin parsed; staying permissive");
                return CorsLayer::permissive();
            }
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        }
        None => CorsLayer::permissive(),
    }
}
