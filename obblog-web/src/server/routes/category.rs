use crate::{
    server::{ServerError, ServerRouter, html::Html, routes::sidebar},
    view::{Site, pages},
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use obblog_cms::repository::PostRepository;
use obblog_common::model::{Id, category::CategoryMarker};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(category_posts)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/category/{id}", rejection(ServerError))]
struct CategoryPath {
    id: Id<CategoryMarker>,
}

async fn category_posts(
    CategoryPath { id }: CategoryPath,
    State(posts): State<PostRepository>,
    State(site): State<Arc<Site>>,
) -> Html {
    let name = posts.category_name(&id).await;
    let category_posts = posts.list_by_category(&id).await;
    let sidebar = sidebar(&posts, None).await;

    Html(pages::category(&site, &name, &category_posts, &sidebar))
}

#[cfg(test)]
mod tests {
    use crate::server::routes::test_support::{FakeSource, get, post, router};
    use axum::http::StatusCode;
    use std::sync::Arc;

    #[tokio::test]
    async fn category_page_filters_by_category() {
        let source = Arc::new(FakeSource::with_posts(vec![post(
            "hello",
            "Hello",
            "2024-01-15T00:00:00Z",
        )]));

        let (status, _, body) = get(router(source.clone()), "/category/tech").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Category: Tech"));
        assert!(body.contains("href=\"/blog/hello\""));
        assert!(source.requests().iter().any(|(_, _, params)| {
            params.contains(&("filters", "category[contains]tech".to_owned()))
        }));
    }

    #[tokio::test]
    async fn unknown_category_uses_fallback_name() {
        let (status, _, body) = get(
            router(Arc::new(FakeSource::with_posts(Vec::new()))),
            "/category/missing",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Category: Category"));
        assert!(body.contains("There are no posts in this category."));
    }
}
