use crate::{
    server::{ErrorPage, ServerError, ServerRouter, html::Html, routes::sidebar},
    view::{Site, pages},
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use obblog_cms::repository::PostRepository;
use obblog_common::{archive::merge_buckets, month_range::ArchiveMonth};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(month_posts)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/archive/{year}/{month}", rejection(ServerError))]
struct ArchivePath {
    year: String,
    month: String,
}

async fn month_posts(
    ArchivePath { year, month }: ArchivePath,
    State(posts): State<PostRepository>,
    State(site): State<Arc<Site>>,
) -> Result<Html, ErrorPage> {
    let (archive_month, range) = ArchiveMonth::parse(&year, &month)
        .and_then(|archive_month| Ok((archive_month, archive_month.range()?)))
        .map_err(|err| ServerError::from(err).page(Arc::clone(&site)))?;

    let month_posts = posts.list_by_month(range).await;
    let mut sidebar = sidebar(&posts, None).await;
    sidebar.archives = merge_buckets(sidebar.archives);

    Ok(Html(pages::archive(
        &site,
        archive_month.year,
        i64::from(archive_month.month),
        &month_posts,
        &sidebar,
    )))
}

#[cfg(test)]
mod tests {
    use crate::server::routes::test_support::{FakeSource, get, post, router};
    use axum::http::StatusCode;
    use std::sync::Arc;

    fn source() -> Arc<FakeSource> {
        Arc::new(FakeSource::with_posts(vec![
            post("a", "A", "2024-01-10T00:00:00Z"),
            post("b", "B", "2024-01-20T00:00:00Z"),
            post("c", "C", "2023-12-05T00:00:00Z"),
        ]))
    }

    #[tokio::test]
    async fn month_page_queries_the_whole_month() {
        let source = source();

        let (status, _, body) = get(router(source.clone()), "/archive/2024/12").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Posts from December 2024"));
        assert!(body.contains("<a href=\"/archive/2024/01\">January 2024 (2)</a>"));
        assert!(body.contains("<a href=\"/archive/2023/12\">December 2023 (1)</a>"));
        assert!(source.requests().iter().any(|(_, _, params)| {
            params.contains(&(
                "filters",
                "publishedAt[greater_than]2024-11-30T23:59:59.999Z\
                 [and]publishedAt[less_than]2025-01-01T00:00:00.000Z"
                    .to_owned(),
            ))
        }));
    }

    #[tokio::test]
    async fn out_of_range_month_is_unknown() {
        let (status, _, body) = get(router(source()), "/archive/2024/13").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Posts from Unknown month 2024"));
    }

    #[tokio::test]
    async fn non_numeric_month_is_not_found() {
        let (status, _, body) = get(router(source()), "/archive/2024/jan").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found"));
        assert!(body.contains("Test Blog"));
    }

    #[tokio::test]
    async fn months_at_the_calendar_edges_are_not_found() {
        let source = source();

        for uri in ["/archive/-9999/1", "/archive/9999/12"] {
            let (status, _, body) = get(router(source.clone()), uri).await;

            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(body.contains("Page not found"));
        }
        assert!(
            !source
                .requests()
                .iter()
                .any(|(_, _, params)| params.iter().any(|(key, _)| *key == "filters"))
        );
    }
}
