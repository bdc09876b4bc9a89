use crate::view::{
    Document, Sidebar, Site,
    components::{category_href, pagination, post_cards},
    escape::{EscapeHref, EscapeHtml},
    format_date, format_datetime,
};
use obblog_common::{
    archive::month_name,
    model::post::{Post, PostSummary},
    pagination::Pagination,
};

pub const UNKNOWN_MONTH: &str = "Unknown month";

#[must_use]
pub fn home(site: &Site, posts: &[PostSummary], sidebar: &Sidebar) -> String {
    let main = format!(
        "<h1 class=\"page-title\">Latest posts</h1>\n\
         {cards}\n\
         <div class=\"view-all\"><a href=\"/blogs\" class=\"view-all-button\">View all posts</a></div>",
        cards = post_cards(posts, "No posts."),
    );

    Document {
        site,
        title: "",
        main,
        sidebar: Some(sidebar),
    }
    .render()
}

#[must_use]
pub fn blogs(
    site: &Site,
    posts: &[PostSummary],
    page: Pagination,
    sidebar: &Sidebar,
) -> String {
    let nav = if posts.is_empty() {
        String::new()
    } else {
        pagination(page)
    };
    let main = format!(
        "<h1 class=\"page-title\">All posts</h1>\n{cards}\n{nav}",
        cards = post_cards(posts, "No posts."),
    );

    Document {
        site,
        title: "All posts",
        main,
        sidebar: Some(sidebar),
    }
    .render()
}

#[must_use]
pub fn post(site: &Site, post: &Post, sidebar: &Sidebar) -> String {
    let updated = post
        .updated_at()
        .map(|revised_at| {
            format!(
                "<time datetime=\"{}\">Updated: {}</time>",
                format_datetime(revised_at),
                format_date(revised_at)
            )
        })
        .unwrap_or_default();

    let categories = if post.categories.is_empty() {
        String::new()
    } else {
        let links: String = post
            .categories
            .iter()
            .map(|category| {
                format!(
                    "<a href=\"{}\" class=\"category-tag\">{}</a>",
                    category_href(category.id.get()),
                    EscapeHtml(&category.name)
                )
            })
            .collect();
        format!(
            "<div class=\"category-section\">\
             <span class=\"category-label\">Categories:</span>\
             <div class=\"category-tags\">{links}</div>\
             </div>"
        )
    };

    // Bodies are rich text authored in the CMS and rendered as-is.
    let main = format!(
        "<article>\n\
         <header>\n\
         <h1 class=\"title\">{title}</h1>\n\
         <div class=\"date\"><time datetime=\"{datetime}\">Published: {date}</time>{updated}</div>\n\
         {categories}\n\
         </header>\n\
         <div class=\"post\">{body}</div>\n\
         </article>",
        title = EscapeHtml(&post.title),
        datetime = format_datetime(post.published_at),
        date = format_date(post.published_at),
        body = post.body.as_deref().unwrap_or_default(),
    );

    Document {
        site,
        title: &post.title,
        main,
        sidebar: Some(sidebar),
    }
    .render()
}

#[must_use]
pub fn post_error(site: &Site) -> String {
    Document {
        site,
        title: "Error",
        main: "<h1>An error occurred</h1>\n\
               <p>The post could not be retrieved.</p>\n\
               <a href=\"/\">Back to home</a>"
            .to_owned(),
        sidebar: None,
    }
    .render()
}

#[must_use]
pub fn category(site: &Site, name: &str, posts: &[PostSummary], sidebar: &Sidebar) -> String {
    let title = format!("Category: {name}");
    let main = format!(
        "<h1 class=\"page-title\">{heading}</h1>\n{cards}",
        heading = EscapeHtml(&title),
        cards = post_cards(posts, "There are no posts in this category."),
    );

    Document {
        site,
        title: &title,
        main,
        sidebar: Some(sidebar),
    }
    .render()
}

#[must_use]
pub fn archive(
    site: &Site,
    year: i32,
    month: i64,
    posts: &[PostSummary],
    sidebar: &Sidebar,
) -> String {
    let title = format!(
        "Posts from {} {year}",
        month_name(month).unwrap_or(UNKNOWN_MONTH)
    );
    let main = format!(
        "<h1 class=\"page-title\">{heading}</h1>\n{cards}",
        heading = EscapeHtml(&title),
        cards = post_cards(posts, "There are no posts for this period."),
    );

    Document {
        site,
        title: &title,
        main,
        sidebar: Some(sidebar),
    }
    .render()
}

#[must_use]
pub fn search(site: &Site, keyword: &str, posts: &[PostSummary], sidebar: &Sidebar) -> String {
    let main = format!(
        "<h1 class=\"page-title\">Search results for \"{keyword}\": {count}</h1>\n{cards}",
        keyword = EscapeHtml(keyword),
        count = posts.len(),
        cards = post_cards(posts, "No posts matched the search keyword."),
    );

    Document {
        site,
        title: "Search",
        main,
        sidebar: Some(sidebar),
    }
    .render()
}

#[must_use]
pub fn error(site: &Site, heading: &str) -> String {
    Document {
        site,
        title: heading,
        main: format!(
            "<h1>{}</h1>\n<a href=\"/\">Back to home</a>",
            EscapeHtml(heading)
        ),
        sidebar: None,
    }
    .render()
}

#[must_use]
pub fn bare_error(heading: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>{heading}</title></head>\n\
         <body>\n<h1>{heading}</h1>\n<a href=\"/\">Back to home</a>\n</body>\n\
         </html>\n",
        heading = EscapeHtml(heading),
    )
}

#[must_use]
pub fn sitemap<'a>(public_url: &str, ids: impl IntoIterator<Item = &'a str>) -> String {
    let base = public_url.trim_end_matches('/');
    let urls: String = ids
        .into_iter()
        .map(|id| {
            format!(
                "<url><loc>{}/blog/{}</loc></url>\n",
                EscapeHtml(base),
                EscapeHref(id)
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
         {urls}</urlset>\n"
    )
}
