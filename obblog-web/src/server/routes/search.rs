use crate::{
    server::{ServerRouter, html::Html, query::Query, routes::sidebar},
    view::{Site, pages},
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use obblog_cms::repository::PostRepository;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(search)
}

#[derive(TypedPath)]
#[typed_path("/search")]
struct SearchPath;

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn search(
    _: SearchPath,
    Query(SearchQuery { q }): Query<SearchQuery>,
    State(posts): State<PostRepository>,
    State(site): State<Arc<Site>>,
) -> Html {
    let results = posts.search_by_keyword(&q).await;
    let sidebar = sidebar(&posts, None).await;

    Html(pages::search(&site, &q, &results, &sidebar))
}

#[cfg(test)]
mod tests {
    use crate::server::routes::test_support::{FakeSource, get, post, router};
    use axum::http::StatusCode;
    use std::sync::Arc;

    #[tokio::test]
    async fn search_passes_keyword_through() {
        let source = Arc::new(FakeSource::with_posts(vec![post(
            "hello",
            "Hello",
            "2024-01-15T00:00:00Z",
        )]));

        let (status, _, body) = get(router(source.clone()), "/search?q=hello%20world").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Search results for \"hello world\": 1"));
        assert!(source.requests().iter().any(|(_, _, params)| {
            params.contains(&("q", "hello world".to_owned()))
                && params.contains(&("limit", "50".to_owned()))
        }));
    }

    #[tokio::test]
    async fn blank_keyword_sends_no_search() {
        let source = Arc::new(FakeSource::with_posts(Vec::new()));

        let (status, _, body) = get(router(source.clone()), "/search?q=%20%20").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(": 0</h1>"));
        assert!(body.contains("No posts matched the search keyword."));
        assert!(
            !source
                .requests()
                .iter()
                .any(|(_, _, params)| params.iter().any(|(key, _)| *key == "q"))
        );

        let (status, _, _) = get(router(source), "/search").await;
        assert_eq!(status, StatusCode::OK);
    }
}
