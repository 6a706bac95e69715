//! Security-related HTTP response headers setup

use axum::{
	http::header::{HeaderName, HeaderValue},
	Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Headers applied to every response unless a handler set them already.
/// `cache-control: no-cache` matters here: offer prices go stale fast, so
/// intermediaries must revalidate even though the aggregator memoizes
/// rounds server-side.
const SECURITY_HEADERS: &[(&str, &str)] = &[
	(
		"strict-transport-security",
		"max-age=31536000; includeSubDomains; preload",
	),
	("x-content-type-options", "nosniff"),
	("x-frame-options", "DENY"),
	("referrer-policy", "strict-origin-when-cross-origin"),
	("content-security-policy", "default-src 'self'"),
	("cache-control", "no-cache"),
];

/// Apply the default security headers to the provided router.
pub fn add_security_headers<S>(router: Router<S>) -> Router<S>
where
	S: Clone + Send + Sync + 'static,
{
	SECURITY_HEADERS.iter().fold(router, |router, &(name, value)| {
		router.layer(SetResponseHeaderLayer::if_not_present(
			HeaderName::from_static(name),
			HeaderValue::from_static(value),
		))
	})
}
