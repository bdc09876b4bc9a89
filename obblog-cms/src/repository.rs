//! Listings fail soft: a failed request or a malformed response is logged and
//! turned into an empty result, so a page can still render. Fetching a single
//! post fails hard with [`PostRetrievalError`].

use crate::{
    client::{CmsError, ContentSource},
    query::{Collection, ContentQuery, Filter, MAX_PAGE_SIZE},
    record::{
        CategoryRecord, PostLinkRecord, PostRecord, decode, decode_all, decode_published_at,
    },
};
use obblog_common::{
    archive::{ArchiveBucket, ArchiveCounter},
    model::{
        Id,
        category::{Category, CategoryMarker},
        post::{Post, PostLink, PostMarker, PostSummary},
    },
    month_range::MonthRange,
    pagination::page_offset,
};
use serde::{Deserialize, de::DeserializeOwned};
use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};
use thiserror::Error;
use tracing::{error, warn};

pub const LATEST_LIMIT: u32 = 5;
pub const CATEGORY_LIMIT: u32 = 100;
pub const FILTERED_LIMIT: u32 = 100;
pub const SEARCH_LIMIT: u32 = 50;
pub const DEFAULT_ARCHIVE_SCAN_LIMIT: u64 = 1000;

pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown category";
pub const FALLBACK_CATEGORY_NAME: &str = "Category";

const SUMMARY_FIELDS: &[&str] = &["id", "title", "thumbnail", "category", "publishedAt"];
const MONTH_FIELDS: &[&str] = &["id", "title", "thumbnail", "category", "tag", "publishedAt"];
const LINK_FIELDS: &[&str] = &["id", "title"];

#[derive(Debug, Error)]
#[error("Post retrieval failed for {id}: {source}")]
pub struct PostRetrievalError {
    pub id: Id<PostMarker>,
    #[source]
    pub source: CmsError,
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct PostPage {
    pub posts: Vec<PostSummary>,
    pub total_count: u64,
}

#[derive(Deserialize)]
struct CategoryNameRecord {
    name: Option<String>,
}

#[derive(Clone)]
pub struct PostRepository {
    source: Arc<dyn ContentSource>,
    archive_scan_limit: u64,
}

impl Debug for PostRepository {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostRepository")
            .field("archive_scan_limit", &self.archive_scan_limit)
            .finish_non_exhaustive()
    }
}

impl PostRepository {
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            archive_scan_limit: DEFAULT_ARCHIVE_SCAN_LIMIT,
        }
    }

    #[must_use]
    pub fn with_archive_scan_limit(mut self, limit: u64) -> Self {
        self.archive_scan_limit = limit.max(1);
        self
    }

    async fn list_soft<R, T>(
        &self,
        operation: &'static str,
        collection: Collection,
        query: ContentQuery,
    ) -> (Vec<T>, u64)
    where
        R: DeserializeOwned,
        T: TryFrom<R, Error = obblog_common::model::ModelValidationError>,
    {
        match self.source.list(collection, &query).await {
            Ok(list) => (decode_all::<R, T>(list.contents, operation), list.total_count),
            Err(err) => {
                error!(error = %err, operation, "Content listing failed, continuing without it");
                (Vec::new(), 0)
            }
        }
    }

    pub async fn list_recent(&self, limit: u32) -> Vec<PostSummary> {
        let query = ContentQuery::new().fields(SUMMARY_FIELDS).limit(limit);
        self.list_soft::<PostRecord, _>("list_recent", Collection::Blog, query)
            .await
            .0
    }

    pub async fn latest_links(&self, limit: u32) -> Vec<PostLink> {
        let query = ContentQuery::new().fields(LINK_FIELDS).limit(limit);
        self.list_soft::<PostLinkRecord, _>("latest_links", Collection::Blog, query)
            .await
            .0
    }

    pub async fn get_by_id(&self, id: &Id<PostMarker>) -> Result<Post, PostRetrievalError> {
        let post = async {
            let content = self
                .source
                .get(Collection::Blog, id.get(), &ContentQuery::new())
                .await?;
            decode::<PostRecord, Post>(content)
        }
        .await;

        post.map_err(|source| {
            error!(error = %source, %id, "Post retrieval failed");
            PostRetrievalError {
                id: id.clone(),
                source,
            }
        })
    }

    pub async fn list_categories(&self) -> Vec<Category> {
        let query = ContentQuery::new().limit(CATEGORY_LIMIT);
        self.list_soft::<CategoryRecord, _>("list_categories", Collection::Categories, query)
            .await
            .0
    }

    pub async fn category_name(&self, id: &Id<CategoryMarker>) -> String {
        let record = async {
            let content = self
                .source
                .get(Collection::Categories, id.get(), &ContentQuery::new())
                .await?;
            Ok::<_, CmsError>(serde_json::from_value::<CategoryNameRecord>(content)?)
        }
        .await;

        match record {
            Ok(CategoryNameRecord { name: Some(name) }) if !name.trim().is_empty() => name,
            Ok(_) => UNKNOWN_CATEGORY_NAME.to_owned(),
            Err(err) => {
                error!(error = %err, %id, "Category lookup failed");
                FALLBACK_CATEGORY_NAME.to_owned()
            }
        }
    }

    pub async fn list_by_category(&self, id: &Id<CategoryMarker>) -> Vec<PostSummary> {
        let query = ContentQuery::new()
            .filters(Filter::contains("category", id.get()))
            .fields(SUMMARY_FIELDS)
            .limit(FILTERED_LIMIT);
        self.list_soft::<PostRecord, _>("list_by_category", Collection::Blog, query)
            .await
            .0
    }

    pub async fn list_by_month(&self, range: MonthRange) -> Vec<PostSummary> {
        let filter = match Filter::within_month("publishedAt", range) {
            Ok(filter) => filter,
            Err(err) => {
                error!(error = %err, ?range, "Could not build month filter");
                return Vec::new();
            }
        };
        let query = ContentQuery::new()
            .filters(filter)
            .fields(MONTH_FIELDS)
            .limit(FILTERED_LIMIT);
        self.list_soft::<PostRecord, _>("list_by_month", Collection::Blog, query)
            .await
            .0
    }

    pub async fn search_by_keyword(&self, keyword: &str) -> Vec<PostSummary> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Vec::new();
        }

        let query = ContentQuery::new()
            .q(keyword)
            .fields(SUMMARY_FIELDS)
            .limit(SEARCH_LIMIT);
        self.list_soft::<PostRecord, _>("search_by_keyword", Collection::Blog, query)
            .await
            .0
    }

    pub async fn list_page(&self, page: u32, per_page: u32) -> PostPage {
        let query = ContentQuery::new()
            .fields(SUMMARY_FIELDS)
            .limit(per_page)
            .offset(page_offset(page, per_page));
        let (posts, total_count) = self
            .list_soft::<PostRecord, _>("list_page", Collection::Blog, query)
            .await;

        PostPage { posts, total_count }
    }

    pub async fn archives(&self) -> Vec<ArchiveBucket> {
        let mut counter = ArchiveCounter::new();
        let mut scanned = 0_u64;

        loop {
            let remaining = self.archive_scan_limit.saturating_sub(scanned);
            let limit = u32::try_from(remaining.min(u64::from(MAX_PAGE_SIZE)))
                .unwrap_or(MAX_PAGE_SIZE);
            let query = ContentQuery::new()
                .fields(&["publishedAt"])
                .limit(limit)
                .offset(scanned);

            let list = match self.source.list(Collection::Blog, &query).await {
                Ok(list) => list,
                Err(err) if scanned == 0 => {
                    error!(error = %err, "Archive listing failed, continuing without archives");
                    return Vec::new();
                }
                Err(err) => {
                    error!(error = %err, scanned, "Archive scan stopped early");
                    break;
                }
            };

            let fetched = list.contents.len() as u64;
            counter.extend(list.contents.into_iter().filter_map(decode_published_at));
            scanned += fetched;

            if fetched == 0 || scanned >= list.total_count {
                break;
            }
            if scanned >= self.archive_scan_limit {
                warn!(
                    scanned,
                    total_count = list.total_count,
                    "Archive scan limit reached, older months are incomplete"
                );
                break;
            }
        }

        counter.into_buckets()
    }

    pub async fn all_post_ids(&self) -> Vec<Id<PostMarker>> {
        match self.source.list_all_ids(Collection::Blog).await {
            Ok(ids) => ids.into_iter().filter_map(|id| Id::new(id).ok()).collect(),
            Err(err) => {
                error!(error = %err, "Listing post ids failed");
                Vec::new()
            }
        }
    }
}
