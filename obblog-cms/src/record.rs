use crate::client::CmsError;
use obblog_common::{
    model::{
        Id, ModelValidationError,
        category::Category,
        post::{Post, PostLink, PostSummary, Tag, Thumbnail},
    },
    util::parse_instant,
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use time::UtcDateTime;
use tracing::{debug, warn};

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
pub(crate) struct ThumbnailRecord {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
pub(crate) struct CategoryRecord {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
pub(crate) struct TagRecord {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostRecord {
    pub id: String,
    pub title: Option<String>,
    pub thumbnail: Option<ThumbnailRecord>,
    pub category: Option<Vec<CategoryRecord>>,
    pub tag: Option<Vec<TagRecord>>,
    pub published_at: Option<String>,
    pub revised_at: Option<String>,
    pub body: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
pub(crate) struct PostLinkRecord {
    pub id: String,
    pub title: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PublishedAtRecord {
    pub published_at: Option<String>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ModelValidationError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or(ModelValidationError::MissingField(field))
}

fn published_at(value: Option<String>) -> Result<UtcDateTime, ModelValidationError> {
    Ok(parse_instant(&required(value, "publishedAt")?)?)
}

impl TryFrom<ThumbnailRecord> for Thumbnail {
    type Error = ModelValidationError;

    fn try_from(value: ThumbnailRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            url: required(Some(value.url), "thumbnail.url")?,
            width: value.width,
            height: value.height,
        })
    }
}

impl TryFrom<CategoryRecord> for Category {
    type Error = ModelValidationError;

    fn try_from(value: CategoryRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Id::new(value.id)?,
            name: required(value.name, "name")?,
        })
    }
}

impl TryFrom<TagRecord> for Tag {
    type Error = ModelValidationError;

    fn try_from(value: TagRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Id::new(value.id)?,
            name: required(value.name, "name")?,
        })
    }
}

fn convert_all<R, T>(records: Option<Vec<R>>) -> Result<Vec<T>, ModelValidationError>
where
    T: TryFrom<R, Error = ModelValidationError>,
{
    records
        .unwrap_or_default()
        .into_iter()
        .map(T::try_from)
        .collect()
}

impl TryFrom<PostRecord> for Post {
    type Error = ModelValidationError;

    fn try_from(value: PostRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Id::new(value.id)?,
            title: required(value.title, "title")?,
            thumbnail: value.thumbnail.map(Thumbnail::try_from).transpose()?,
            categories: convert_all(value.category)?,
            tags: convert_all(value.tag)?,
            published_at: published_at(value.published_at)?,
            revised_at: value
                .revised_at
                .as_deref()
                .map(parse_instant)
                .transpose()?,
            body: value.body,
        })
    }
}

impl TryFrom<PostRecord> for PostSummary {
    type Error = ModelValidationError;

    fn try_from(value: PostRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Id::new(value.id)?,
            title: required(value.title, "title")?,
            thumbnail: value.thumbnail.map(Thumbnail::try_from).transpose()?,
            categories: convert_all(value.category)?,
            tags: convert_all(value.tag)?,
            published_at: published_at(value.published_at)?,
        })
    }
}

impl TryFrom<PostLinkRecord> for PostLink {
    type Error = ModelValidationError;

    fn try_from(value: PostLinkRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Id::new(value.id)?,
            title: required(value.title, "title")?,
        })
    }
}

pub(crate) fn decode<R, T>(content: Value) -> Result<T, CmsError>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = ModelValidationError>,
{
    let record: R = serde_json::from_value(content)?;
    Ok(T::try_from(record)?)
}

pub(crate) fn decode_all<R, T>(contents: Vec<Value>, operation: &'static str) -> Vec<T>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = ModelValidationError>,
{
    contents
        .into_iter()
        .filter_map(|content| match decode::<R, T>(content) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!(error = %err, operation, "Skipping invalid content record");
                None
            }
        })
        .collect()
}

pub(crate) fn decode_published_at(content: Value) -> Option<UtcDateTime> {
    let record: PublishedAtRecord = serde_json::from_value(content).ok()?;
    match parse_instant(record.published_at.as_deref()?) {
        Ok(instant) => Some(instant),
        Err(err) => {
            debug!(error = %err, "Skipping post with unparseable publication time");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::record::{PostLinkRecord, PostRecord, decode, decode_all, decode_published_at};
    use obblog_common::model::{
        ModelValidationError,
        post::{Post, PostLink, PostSummary},
    };
    use serde_json::json;
    use time::macros::utc_datetime;

    #[test]
    fn full_post() {
        let post: Post = decode::<PostRecord, _>(json!({
            "id": "hello",
            "title": "Hello",
            "thumbnail": {"url": "https://images.example/a.png", "width": 640, "height": 360},
            "category": [{"id": "tech", "name": "Tech", "createdAt": "2023-01-01T00:00:00.000Z"}],
            "tag": [{"id": "rust", "name": "Rust"}],
            "publishedAt": "2024-01-15T00:00:00.000Z",
            "revisedAt": "2024-02-01T00:00:00.000Z",
            "body": "<p>Hi</p>",
        }))
        .unwrap();

        assert_eq!(post.id.get(), "hello");
        assert_eq!(post.thumbnail.as_ref().map(|t| t.width), Some(640));
        assert_eq!(post.categories[0].name, "Tech");
        assert_eq!(post.tags[0].id.get(), "rust");
        assert_eq!(post.published_at, utc_datetime!(2024-01-15 00:00));
        assert_eq!(post.revised_at, Some(utc_datetime!(2024-02-01 00:00)));
        assert_eq!(post.body.as_deref(), Some("<p>Hi</p>"));
    }

    #[test]
    fn projected_summary_without_optional_fields() {
        let summary: PostSummary = decode::<PostRecord, _>(json!({
            "id": "hello",
            "title": "Hello",
            "publishedAt": "2024-01-15T00:00:00.000Z",
        }))
        .unwrap();

        assert!(summary.thumbnail.is_none());
        assert!(summary.categories.is_empty());
        assert!(summary.tags.is_empty());
    }

    #[test]
    fn invalid_records_are_rejected() {
        let missing_published_at = decode::<PostRecord, PostSummary>(json!({
            "id": "a",
            "title": "A",
        }));
        assert!(matches!(
            missing_published_at,
            Err(crate::client::CmsError::Record(
                ModelValidationError::MissingField("publishedAt")
            ))
        ));

        let bad_timestamp = decode::<PostRecord, PostSummary>(json!({
            "id": "a",
            "title": "A",
            "publishedAt": "not a date",
        }));
        assert!(bad_timestamp.is_err());

        let not_an_object = decode::<PostLinkRecord, PostLink>(json!(["a"]));
        assert!(not_an_object.is_err());
    }

    #[test]
    fn listing_skips_invalid_records() {
        let links: Vec<PostLink> = decode_all::<PostLinkRecord, _>(
            vec![
                json!({"id": "a", "title": "A"}),
                json!({"id": "", "title": "Empty id"}),
                json!({"id": "c"}),
                json!({"id": "d", "title": "D"}),
            ],
            "test",
        );

        let ids: Vec<&str> = links.iter().map(|link| link.id.get()).collect();
        assert_eq!(ids, ["a", "d"]);
    }

    #[test]
    fn published_at_is_optional_per_record() {
        assert_eq!(
            decode_published_at(json!({"publishedAt": "2023-12-01T00:00:00Z"})),
            Some(utc_datetime!(2023-12-01 00:00))
        );
        assert_eq!(decode_published_at(json!({})), None);
        assert_eq!(decode_published_at(json!({"publishedAt": "garbage"})), None);
        assert_eq!(decode_published_at(json!({"publishedAt": 12})), None);
        assert_eq!(decode_published_at(json!(null)), None);
    }
}
