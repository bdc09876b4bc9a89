use crate::{server::ServerRouter, view::Sidebar};
use obblog_cms::repository::{LATEST_LIMIT, PostRepository};
use obblog_common::model::post::PostLink;

mod archive;
mod blog;
mod category;
mod home;
mod search;
mod sitemap;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .merge(home::routes())
        .merge(blog::routes())
        .merge(category::routes())
        .merge(archive::routes())
        .merge(search::routes())
        .merge(sitemap::routes())
}

async fn sidebar(posts: &PostRepository, latest_posts: Option<Vec<PostLink>>) -> Sidebar {
    let latest_posts = match latest_posts {
        Some(latest_posts) => latest_posts,
        None => posts.latest_links(LATEST_LIMIT).await,
    };
    let categories = posts.list_categories().await;
    let archives = posts.archives().await;

    Sidebar {
        latest_posts,
        categories,
        archives,
    }
}
