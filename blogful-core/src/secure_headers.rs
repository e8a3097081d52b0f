//! Response hardening headers.
//!
//! | Header | Default |
//! |--------|---------|
//! | `X-Content-Type-Options` | `nosniff` |
//! | `X-Frame-Options` | `SAMEORIGIN` |
//! | `Strict-Transport-Security` | `max-age=15552000; includeSubDomains` |
//! | `X-XSS-Protection` | `0` |
//! | `Referrer-Policy` | `no-referrer` |
//! | `X-DNS-Prefetch-Control` | `off` |

use std::sync::Arc;

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

use crate::builder::AppBuilder;
use crate::plugin::Plugin;

/// Security headers plugin.
///
/// Headers already set by a handler are left alone.
pub struct SecureHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl SecureHeaders {
    pub fn builder() -> SecureHeadersBuilder {
        SecureHeadersBuilder::new()
    }

    pub fn headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.headers
    }
}

impl Default for SecureHeaders {
    fn default() -> Self {
        SecureHeadersBuilder::new().build()
    }
}

impl Plugin for SecureHeaders {
    fn install<T: Clone + Send + Sync + 'static>(self, app: AppBuilder<T>) -> AppBuilder<T> {
        let headers = Arc::new(self.headers);
        app.with_layer_fn(move |router| {
            router.layer(axum::middleware::from_fn(move |req: Request, next: Next| {
                let headers = headers.clone();
                async move {
                    let mut response: Response = next.run(req).await;
                    for (name, value) in headers.iter() {
                        if !response.headers().contains_key(name) {
                            response.headers_mut().insert(name.clone(), value.clone());
                        }
                    }
                    response
                }
            }))
        })
    }
}

/// Builder for [`SecureHeaders`].
pub struct SecureHeadersBuilder {
    frame_options: Option<String>,
    hsts_max_age: Option<u64>,
    referrer_policy: Option<String>,
    content_security_policy: Option<String>,
}

impl SecureHeadersBuilder {
    fn new() -> Self {
        Self {
            frame_options: Some("SAMEORIGIN".to_string()),
            hsts_max_age: Some(15_552_000),
            referrer_policy: Some("no-referrer".to_string()),
            content_security_policy: None,
        }
    }

    /// Set the `X-Frame-Options` value (e.g. `"DENY"`, `"SAMEORIGIN"`).
    pub fn frame_options(mut self, value: impl Into<String>) -> Self {
        self.frame_options = Some(value.into());
        self
    }

    /// Set the HSTS `max-age` in seconds, or disable HSTS with `None`.
    pub fn hsts_max_age(mut self, seconds: Option<u64>) -> Self {
        self.hsts_max_age = seconds;
        self
    }

    pub fn referrer_policy(mut self, value: impl Into<String>) -> Self {
        self.referrer_policy = Some(value.into());
        self
    }

    pub fn content_security_policy(mut self, value: impl Into<String>) -> Self {
        self.content_security_policy = Some(value.into());
        self
    }

    pub fn build(self) -> SecureHeaders {
        let mut headers = vec![
            (
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            ),
            (
                HeaderName::from_static("x-xss-protection"),
                HeaderValue::from_static("0"),
            ),
            (
                HeaderName::from_static("x-dns-prefetch-control"),
                HeaderValue::from_static("off"),
            ),
        ];

        let optional = [
            ("x-frame-options", self.frame_options),
            (
                "strict-transport-security",
                self.hsts_max_age
                    .map(|age| format!("max-age={age}; includeSubDomains")),
            ),
            ("referrer-policy", self.referrer_policy),
            ("content-security-policy", self.content_security_policy),
        ];
        for (name, value) in optional {
            let Some(value) = value else { continue };
            match HeaderValue::from_str(&value) {
                Ok(val) => headers.push((HeaderName::from_static(name), val)),
                Err(_) => tracing::warn!(header = name, %value, "ignoring invalid header value"),
            }
        }

        SecureHeaders { headers }
    }
}
