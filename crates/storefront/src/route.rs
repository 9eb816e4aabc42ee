//! # Product Route
//!
//! The read-only route product pages are served under: `GET /products/{id}`.
//!
//! | Outcome | Status | Title |
//! |---------|--------|-------|
//! | page ready | 200 | `{name} \| Storefront` |
//! | page still building | 200 | `Loading...` |
//! | not in catalog | 404 | `Not found` |
//! | other path | 404 | `Not found` |
//! | method other than GET/HEAD | 405 | `Method not allowed` |

use crate::clients::PageService;
use crate::model::ProductId;
use crate::page::PageError;
use crate::view;
use page_framework::RenderState;
use thiserror::Error;
use tracing::{debug, instrument};

pub const PREFIX: &str = "/products/";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("method {0} not allowed")]
    MethodNotAllowed(String),

    #[error("no route for {0}")]
    NotFound(String),
}

impl RouteError {
    pub fn status(&self) -> u16 {
        match self {
            RouteError::MethodNotAllowed(_) => 405,
            RouteError::NotFound(_) => 404,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub title: String,
    pub body: String,
}

impl Response {
    fn new(status: u16, title: impl Into<String>, body: String) -> Self {
        Self {
            status,
            title: title.into(),
            body,
        }
    }

    fn not_found(path: &str) -> Self {
        Self::new(404, "Not found", view::render_not_found(path))
    }

    fn from_route_error(e: &RouteError, path: &str) -> Self {
        match e {
            RouteError::NotFound(_) => Self::not_found(path),
            RouteError::MethodNotAllowed(_) => {
                Self::new(e.status(), "Method not allowed", String::new())
            }
        }
    }
}

/// Extracts the product id from a request. Only GET and HEAD are routed.
pub fn parse(method: &str, path: &str) -> Result<ProductId, RouteError> {
    if !matches!(method, "GET" | "HEAD") {
        return Err(RouteError::MethodNotAllowed(method.to_string()));
    }

    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.strip_prefix(PREFIX) {
        Some(id) if !id.is_empty() && !id.contains('/') => Ok(ProductId::from(id)),
        _ => Err(RouteError::NotFound(path.to_string())),
    }
}

/// Serves one request through the page service.
///
/// Only actor communication failures are returned as errors; every page outcome,
/// including a catalog miss, becomes a [`Response`].
#[instrument(skip(pages))]
pub async fn handle(pages: &PageService, method: &str, path: &str) -> Result<Response, PageError> {
    let id = match parse(method, path) {
        Ok(id) => id,
        Err(e) => {
            debug!(error = %e, "Request not routed");
            return Ok(Response::from_route_error(&e, path));
        }
    };

    let mut response = match pages.page(id).await? {
        RenderState::Ready(page) => Response::new(200, view::page_title(&page), view::render_page(&page)),
        RenderState::Fallback => Response::new(200, "Loading...", view::render_fallback()),
        RenderState::NotFound => Response::not_found(path),
    };

    if method == "HEAD" {
        response.body.clear();
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(parse("GET", "/products/sku-1"), Ok(ProductId::from("sku-1")));
        assert_eq!(parse("HEAD", "/products/sku-1?ref=home"), Ok(ProductId::from("sku-1")));
        assert_eq!(
            parse("POST", "/products/sku-1"),
            Err(RouteError::MethodNotAllowed("POST".into()))
        );
        for path in ["/products/", "/products/a/b", "/cart", "/"] {
            assert!(matches!(parse("GET", path), Err(RouteError::NotFound(_))), "{path}");
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(RouteError::MethodNotAllowed("PUT".into()).status(), 405);
        assert_eq!(RouteError::NotFound("/x".into()).status(), 404);
    }
}
