use http::{Method, header::HeaderName};
use posecast_config::{AnyOrArray, CorsConfig};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
///
/// Credentials cannot be combined with wildcards, so a wildcard is turned
/// into "mirror the request" when credentials are on.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    layer = match (&config.origins, config.credentials) {
        (AnyOrArray::Any, false) => layer.allow_origin(AllowOrigin::any()),
        (AnyOrArray::Any, true) => layer.allow_origin(AllowOrigin::mirror_request()),
        (AnyOrArray::List(origins), _) => {
            let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            layer.allow_origin(origins)
        }
    };

    layer = match (&config.methods, config.credentials) {
        (AnyOrArray::Any, false) => layer.allow_methods(AllowMethods::any()),
        (AnyOrArray::Any, true) => layer.allow_methods(AllowMethods::mirror_request()),
        (AnyOrArray::List(methods), _) => {
            let methods: Vec<Method> = methods.iter().filter_map(|m| m.parse().ok()).collect();
            layer.allow_methods(methods)
        }
    };

    layer = match (&config.headers, config.credentials) {
        (AnyOrArray::Any, false) => layer.allow_headers(AllowHeaders::any()),
        (AnyOrArray::Any, true) => layer.allow_headers(AllowHeaders::mirror_request()),
        (AnyOrArray::List(headers), _) => {
            let headers: Vec<HeaderName> = headers.iter().filter_map(|h| h.parse().ok()).collect();
            layer.allow_headers(headers)
        }
    };

    if config.credentials {
        layer = layer.allow_credentials(true);
    }

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    layer
}
