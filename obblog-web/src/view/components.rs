use crate::view::{
    Sidebar, Site,
    escape::{EscapeHref, EscapeHtml},
    format_date, format_datetime,
};
use obblog_common::{
    model::{category::Category, post::PostSummary},
    pagination::Pagination,
};

pub const THUMBNAIL_WIDTH: u32 = 320;
pub const THUMBNAIL_HEIGHT: u32 = 180;

#[must_use]
pub fn site_header(site: &Site) -> String {
    format!(
        "<header class=\"header\">\n\
         <div class=\"logo\"><a href=\"/\">{title}</a></div>\n\
         <nav class=\"nav\">\n\
         <ul>\n\
         <li><a href=\"/\">Home</a></li>\n\
         <li><a href=\"/blogs\">Blog</a></li>\n\
         </ul>\n\
         </nav>\n\
         </header>",
        title = EscapeHtml(&site.title),
    )
}

#[must_use]
pub fn post_href(id: &str) -> String {
    format!("/blog/{}", EscapeHref(id))
}

#[must_use]
pub fn category_href(id: &str) -> String {
    format!("/category/{}", EscapeHref(id))
}

#[must_use]
pub fn sidebar(sidebar: &Sidebar) -> String {
    let latest = if sidebar.latest_posts.is_empty() {
        "<li>No recent posts</li>".to_owned()
    } else {
        sidebar
            .latest_posts
            .iter()
            .map(|post| {
                format!(
                    "<li><a href=\"{}\">{}</a></li>",
                    post_href(post.id.get()),
                    EscapeHtml(&post.title)
                )
            })
            .collect()
    };

    let categories = if sidebar.categories.is_empty() {
        "<li>No categories</li>".to_owned()
    } else {
        sidebar
            .categories
            .iter()
            .map(|category| {
                format!(
                    "<li><a href=\"{}\">{}</a></li>",
                    category_href(category.id.get()),
                    EscapeHtml(&category.name)
                )
            })
            .collect()
    };

    let archives = if sidebar.archives.is_empty() {
        "<p>No archives</p>".to_owned()
    } else {
        let items: String = sidebar
            .archives
            .iter()
            .map(|bucket| {
                let year = bucket.year_label();
                let month = bucket.month_label();
                format!(
                    "<li><a href=\"/archive/{year}/{month}\">{name} {year} ({count})</a></li>",
                    name = bucket.month_name().unwrap_or(&month),
                    count = bucket.count,
                )
            })
            .collect();
        format!("<ul>{items}</ul>")
    };

    format!(
        "<aside class=\"sidebar\">\n\
         <section class=\"sidebar-section\">\n\
         <h3>Search</h3>\n\
         <form action=\"/search\" method=\"get\">\n\
         <input type=\"text\" name=\"q\" placeholder=\"Enter a keyword\">\n\
         <button type=\"submit\">Search</button>\n\
         </form>\n\
         </section>\n\
         <section class=\"sidebar-section\">\n\
         <h3>Recent posts</h3>\n\
         <ul>{latest}</ul>\n\
         </section>\n\
         <section class=\"sidebar-section\">\n\
         <h3>Categories</h3>\n\
         <ul>{categories}</ul>\n\
         </section>\n\
         <section class=\"sidebar-section\">\n\
         <h3>Archives</h3>\n\
         {archives}\n\
         </section>\n\
         </aside>"
    )
}

fn category_tags(categories: &[Category]) -> String {
    if categories.is_empty() {
        return String::new();
    }

    let tags: String = categories
        .iter()
        .map(|category| {
            format!(
                "<span class=\"category-tag\">{}</span>",
                EscapeHtml(&category.name)
            )
        })
        .collect();
    format!("<div class=\"post-categories\">{tags}</div>")
}

#[must_use]
pub fn post_card(post: &PostSummary) -> String {
    let thumbnail = match &post.thumbnail {
        Some(thumbnail) => format!(
            "<img src=\"{src}\" alt=\"{alt}\" width=\"{THUMBNAIL_WIDTH}\" height=\"{THUMBNAIL_HEIGHT}\" class=\"thumbnail\">",
            src = EscapeHref(&thumbnail.url),
            alt = EscapeHtml(&post.title),
        ),
        None => "<div class=\"no-thumbnail\">No Image</div>".to_owned(),
    };

    format!(
        "<div class=\"post-card\">\
         <a href=\"{href}\" class=\"post-link\">\
         <div class=\"thumbnail-container\">{thumbnail}</div>\
         <div class=\"post-info\">\
         <h2 class=\"post-title\">{title}</h2>\
         {categories}\
         <time class=\"post-date\" datetime=\"{datetime}\">{date}</time>\
         </div>\
         </a>\
         </div>",
        href = post_href(post.id.get()),
        title = EscapeHtml(&post.title),
        categories = category_tags(&post.categories),
        datetime = format_datetime(post.published_at),
        date = format_date(post.published_at),
    )
}

#[must_use]
pub fn post_cards(posts: &[PostSummary], empty: &str) -> String {
    if posts.is_empty() {
        return format!("<p>{}</p>", EscapeHtml(empty));
    }

    let cards: String = posts.iter().map(post_card).collect();
    format!("<div class=\"posts\">{cards}</div>")
}

#[must_use]
pub fn pagination(pagination: Pagination) -> String {
    let prev = pagination
        .prev_page()
        .map(|page| {
            format!("<a href=\"/blogs?page={page}\" class=\"pagination-link\" rel=\"prev\">Previous</a>")
        })
        .unwrap_or_default();
    let next = pagination
        .next_page()
        .map(|page| {
            format!("<a href=\"/blogs?page={page}\" class=\"pagination-link\" rel=\"next\">Next</a>")
        })
        .unwrap_or_default();

    format!(
        "<nav class=\"pagination\">{prev}\
         <span class=\"pagination-info\">Page {current} of {total}</span>\
         {next}</nav>",
        current = pagination.current_page,
        total = pagination.total_pages(),
    )
}
