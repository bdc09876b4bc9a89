use crate::view::{Site, pages};
use axum::{
    Router,
    extract::{
        FromRef, Request, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use html::Html;
use obblog_cms::repository::{PostRepository, PostRetrievalError};
use obblog_common::month_range::MonthRangeError;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

mod html;
mod query;
mod routes;

pub type ServerRouter = Router<ServerState>;

#[derive(Clone, Debug, FromRef)]
pub struct ServerState {
    pub posts: PostRepository,
    pub site: Arc<Site>,
}

pub fn routes() -> ServerRouter {
    routes::routes().fallback(fallback)
}

pub async fn fallback(State(site): State<Arc<Site>>, request: Request) -> ErrorPage {
    ServerError::UnknownRoute(request.into_parts().0.uri).page(site)
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Query string rejected: {0}")]
    QueryRejection(#[from] QueryRejection),
    #[error("Archive month rejected: {0}")]
    InvalidArchiveMonth(#[from] MonthRangeError),
    #[error(transparent)]
    PostRetrieval(#[from] PostRetrievalError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_)
            | ServerError::PathRejection(_)
            | ServerError::InvalidArchiveMonth(_)
            | ServerError::PostRetrieval(_) => StatusCode::NOT_FOUND,
            ServerError::QueryRejection(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn heading(&self) -> &'static str {
        match self.status() {
            StatusCode::NOT_FOUND => "Page not found",
            StatusCode::BAD_REQUEST => "Bad request",
            _ => "An error occurred",
        }
    }

    pub fn page(self, site: Arc<Site>) -> ErrorPage {
        ErrorPage { site, error: self }
    }

    fn log(&self) -> StatusCode {
        let status = self.status();
        error!(error = %self, %status, "Replying with error");
        status
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.log();
        (status, Html(pages::bare_error(self.heading()))).into_response()
    }
}

#[derive(Debug)]
pub struct ErrorPage {
    site: Arc<Site>,
    error: ServerError,
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        let status = self.error.log();
        let page = match self.error {
            ServerError::PostRetrieval(_) => pages::post_error(&self.site),
            error => pages::error(&self.site, error.heading()),
        };
        (status, Html(page)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use crate::server::routes::test_support::{FakeSource, get, router};
    use axum::http::StatusCode;
    use std::sync::Arc;

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (status, content_type, body) =
            get(router(Arc::new(FakeSource::default())), "/nowhere").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(content_type.starts_with("text/html"));
        assert!(body.contains("Page not found"));
        assert!(body.contains("Test Blog"));
    }
}
