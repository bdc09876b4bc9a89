use crate::{
    server::{ErrorPage, ServerError, ServerRouter, html::Html, query::Query, routes::sidebar},
    view::{Site, pages},
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use obblog_cms::repository::PostRepository;
use obblog_common::{
    model::{Id, post::PostMarker},
    pagination::Pagination,
};
use serde::Deserialize;
use std::sync::Arc;

pub const POSTS_PER_PAGE: u32 = 12;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(list_posts).typed_get(get_post)
}

#[derive(TypedPath)]
#[typed_path("/blogs")]
struct ListPostsPath;

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize)]
struct ListPostsQuery {
    page: Option<String>,
}

/// The requested page number. Anything unparsable is page 1.
fn requested_page(page: Option<&str>) -> u32 {
    page.and_then(|page| page.trim().parse::<i64>().ok())
        .map_or(1, |page| u32::try_from(page.max(1)).unwrap_or(u32::MAX))
}

async fn list_posts(
    _: ListPostsPath,
    Query(query): Query<ListPostsQuery>,
    State(posts): State<PostRepository>,
    State(site): State<Arc<Site>>,
) -> Html {
    let page = requested_page(query.page.as_deref());
    let listing = posts.list_page(page, POSTS_PER_PAGE).await;
    let sidebar = sidebar(&posts, None).await;

    Html(pages::blogs(
        &site,
        &listing.posts,
        Pagination::new(listing.total_count, POSTS_PER_PAGE, page),
        &sidebar,
    ))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/blog/{id}", rejection(ServerError))]
struct GetPostPath {
    id: Id<PostMarker>,
}

async fn get_post(
    GetPostPath { id }: GetPostPath,
    State(posts): State<PostRepository>,
    State(site): State<Arc<Site>>,
) -> Result<Html, ErrorPage> {
    let post = posts
        .get_by_id(&id)
        .await
        .map_err(|err| ServerError::from(err).page(Arc::clone(&site)))?;
    let sidebar = sidebar(&posts, None).await;

    Ok(Html(pages::post(&site, &post, &sidebar)))
}
