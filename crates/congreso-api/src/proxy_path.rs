//! Rewriting of backend URLs onto the same-origin proxy route.
//!
//! Browser-side callers cannot reach the CMS directly (CORS), so backend
//! URLs are mapped onto `/api/strapi/...`, which the reverse proxy forwards.

/// Mount point of the reverse proxy.
pub const PROXY_PREFIX: &str = "/api/strapi/";

/// Map a backend URL or `/api/...` path onto the proxy route.
///
/// - already proxied paths are returned unchanged
/// - `{backend}/api/x?q` becomes `/api/strapi/x?q`
/// - bare `/api/x?q` becomes `/api/strapi/x?q`
/// - anything else is returned unchanged
pub fn to_proxy_path(url: &str, backend_origin: &str) -> String {
    if url.starts_with(PROXY_PREFIX) {
        return url.to_owned();
    }

    let origin = backend_origin.trim_end_matches('/');
    if !origin.is_empty() {
        if let Some(rest) = url.strip_prefix(origin) {
            let api_path = rest.strip_prefix("/api/").unwrap_or(rest.trim_start_matches('/'));
            return format!("{PROXY_PREFIX}{api_path}");
        }
    }

    if let Some(api_path) = url.strip_prefix("/api/") {
        return format!("{PROXY_PREFIX}{api_path}");
    }

    url.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "http://127.0.0.1:1337";

    #[test]
    fn proxied_paths_pass_through() {
        assert_eq!(
            to_proxy_path("/api/strapi/talleres?populate=*", ORIGIN),
            "/api/strapi/talleres?populate=*"
        );
    }

    #[test]
    fn backend_urls_are_rewritten() {
        assert_eq!(
            to_proxy_path("http://127.0.0.1:1337/api/turismos?populate=*", ORIGIN),
            "/api/strapi/turismos?populate=*"
        );
        assert_eq!(
            to_proxy_path("http://127.0.0.1:1337/api/x", "http://127.0.0.1:1337/"),
            "/api/strapi/x"
        );
    }

    #[test]
    fn bare_api_paths_are_rewritten() {
        assert_eq!(
            to_proxy_path("/api/seo-setting?populate=*", ORIGIN),
            "/api/strapi/seo-setting?populate=*"
        );
    }

    #[test]
    fn unrelated_urls_are_untouched() {
        assert_eq!(to_proxy_path("/sede", ORIGIN), "/sede");
        assert_eq!(to_proxy_path("https://other.org/api/x", ORIGIN), "https://other.org/api/x");
    }
}
