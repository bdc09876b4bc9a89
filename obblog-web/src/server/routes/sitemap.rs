use crate::{
    server::{ServerRouter, html::Xml},
    view::{Site, pages},
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use obblog_cms::repository::PostRepository;
use obblog_common::model::Id;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(sitemap)
}

#[derive(TypedPath)]
#[typed_path("/sitemap.xml")]
struct SitemapPath;

async fn sitemap(
    _: SitemapPath,
    State(posts): State<PostRepository>,
    State(site): State<Arc<Site>>,
) -> Xml {
    let ids = posts.all_post_ids().await;

    Xml(pages::sitemap(&site.public_url, ids.iter().map(Id::get)))
}

#[cfg(test)]
mod tests {
    use crate::server::routes::test_support::{FakeSource, get, post, router};
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn sitemap_lists_every_post() {
        let posts = (1..=150)
            .map(|n| post(&format!("post-{n}"), "Post", "2024-01-01T00:00:00Z"))
            .collect();

        let (status, content_type, body) =
            get(router(Arc::new(FakeSource::with_posts(posts))), "/sitemap.xml").await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.contains("xml"));
        assert!(body.contains("<loc>https://blog.example/blog/post-1</loc>"));
        assert!(body.contains("<loc>https://blog.example/blog/post-150</loc>"));
        assert_eq!(body.matches("<url>").count(), 150);
    }

    #[tokio::test]
    async fn records_without_an_id_are_skipped() {
        let mut posts: Vec<_> = (1..=5)
            .map(|n| post(&format!("post-{n}"), "Post", "2024-01-01T00:00:00Z"))
            .collect();
        posts.insert(2, json!({ "title": "no id" }));

        let (status, _, body) =
            get(router(Arc::new(FakeSource::with_posts(posts))), "/sitemap.xml").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("<url>").count(), 5);
        assert!(body.contains("<loc>https://blog.example/blog/post-5</loc>"));
    }
}
