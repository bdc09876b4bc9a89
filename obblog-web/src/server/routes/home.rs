use crate::{
    server::{ServerRouter, html::Html, routes::sidebar},
    view::{Site, pages},
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use obblog_cms::repository::{LATEST_LIMIT, PostRepository};
use obblog_common::model::post::PostLink;
use std::sync::Arc;

pub const HOME_POST_LIMIT: u32 = 10;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(home)
}

#[derive(TypedPath)]
#[typed_path("/")]
struct HomePath;

async fn home(
    _: HomePath,
    State(posts): State<PostRepository>,
    State(site): State<Arc<Site>>,
) -> Html {
    let recent = posts.list_recent(HOME_POST_LIMIT).await;
    // The feed is newest first, so its head doubles as the sidebar list.
    let latest = recent
        .iter()
        .take(LATEST_LIMIT as usize)
        .map(PostLink::from)
        .collect();
    let sidebar = sidebar(&posts, Some(latest)).await;

    Html(pages::home(&site, &recent, &sidebar))
}

#[cfg(test)]
mod tests {
    use crate::server::routes::test_support::{FakeSource, get, post, router};
    use axum::http::StatusCode;
    use obblog_cms::query::Collection;
    use std::sync::Arc;

    #[tokio::test]
    async fn home_lists_recent_posts_without_extra_latest_fetch() {
        let posts = (1..=7)
            .map(|day| {
                post(
                    &format!("post-{day}"),
                    &format!("Post {day}"),
                    &format!("2024-01-{:02}T00:00:00Z", 8 - day),
                )
            })
            .collect();
        let source = Arc::new(FakeSource::with_posts(posts));

        let (status, content_type, body) = get(router(source.clone()), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/html"));
        assert!(body.contains("href=\"/blog/post-7\""));
        assert!(body.contains("View all posts"));
        assert!(body.contains("<a href=\"/category/tech\">Tech</a>"));
        assert!(body.contains("January 2024 (7)"));

        let blog_requests: Vec<_> = source
            .requests()
            .into_iter()
            .filter(|(collection, _, params)| {
                *collection == Collection::Blog
                    && !params.iter().any(|(key, value)| *key == "fields" && value == "publishedAt")
            })
            .collect();
        assert_eq!(blog_requests.len(), 1);
        assert!(blog_requests[0].2.contains(&("limit", "10".to_owned())));
    }

    #[tokio::test]
    async fn home_survives_an_unavailable_cms() {
        let (status, _, body) = get(router(Arc::new(FakeSource::failing())), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No posts."));
        assert!(body.contains("No recent posts"));
        assert!(body.contains("No categories"));
        assert!(body.contains("No archives"));
    }
}
