pub mod components;
pub mod escape;
pub mod pages;

use crate::view::escape::EscapeHtml;
use components::{sidebar, site_header};
use obblog_common::{
    archive::ArchiveBucket,
    model::{category::Category, post::PostLink},
};
use time::UtcDateTime;

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Site {
    pub title: String,
    pub public_url: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Sidebar {
    pub latest_posts: Vec<PostLink>,
    pub categories: Vec<Category>,
    pub archives: Vec<ArchiveBucket>,
}

pub struct Document<'a> {
    pub site: &'a Site,
    pub title: &'a str,
    pub main: String,
    pub sidebar: Option<&'a Sidebar>,
}

impl Document<'_> {
    #[must_use]
    pub fn render(&self) -> String {
        let title = if self.title.is_empty() {
            EscapeHtml(&self.site.title).to_string()
        } else {
            format!(
                "{} | {}",
                EscapeHtml(self.title),
                EscapeHtml(&self.site.title)
            )
        };
        let aside = self.sidebar.map(sidebar).unwrap_or_default();

        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{title}</title>\n\
             </head>\n\
             <body>\n\
             {header}\n\
             <div class=\"container\">\n\
             <main class=\"main\">\n{main}\n</main>\n\
             {aside}\n\
             </div>\n\
             </body>\n\
             </html>\n",
            header = site_header(self.site),
            main = self.main,
        )
    }
}

#[must_use]
pub fn format_date(instant: UtcDateTime) -> String {
    format!(
        "{}/{}/{}",
        instant.year(),
        u8::from(instant.month()),
        instant.day()
    )
}

#[must_use]
pub fn format_datetime(instant: UtcDateTime) -> String {
    obblog_common::util::format_instant_millis(instant).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use crate::view::{Document, Site, format_date};
    use time::macros::utc_datetime;

    fn site() -> Site {
        Site {
            title: "Test <Blog>".to_owned(),
            public_url: "http://localhost:3000".to_owned(),
        }
    }

    #[test]
    fn dates_are_not_padded() {
        assert_eq!(format_date(utc_datetime!(2024-01-05 23:00)), "2024/1/5");
        assert_eq!(format_date(utc_datetime!(2023-12-31 00:00)), "2023/12/31");
    }

    #[test]
    fn document_escapes_titles() {
        let site = site();
        let html = Document {
            site: &site,
            title: "Tom & Jerry",
            main: "<p>main</p>".to_owned(),
            sidebar: None,
        }
        .render();

        assert!(html.contains("<title>Tom &amp; Jerry | Test &lt;Blog&gt;</title>"));
        assert!(html.contains("<p>main</p>"));
        assert!(!html.contains("<aside"));
    }
}
