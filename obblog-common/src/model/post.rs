use crate::model::{
    Id,
    category::{Category, CategoryMarker},
};
use time::UtcDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct TagMarker;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Tag {
    pub id: Id<TagMarker>,
    pub name: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub title: String,
    pub thumbnail: Option<Thumbnail>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub published_at: UtcDateTime,
    pub revised_at: Option<UtcDateTime>,
    pub body: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct PostSummary {
    pub id: Id<PostMarker>,
    pub title: String,
    pub thumbnail: Option<Thumbnail>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub published_at: UtcDateTime,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct PostLink {
    pub id: Id<PostMarker>,
    pub title: String,
}

impl Post {
    /// The revision time, if the post was edited after it was published.
    #[must_use]
    pub fn updated_at(&self) -> Option<UtcDateTime> {
        self.revised_at
            .filter(|revised_at| *revised_at != self.published_at)
    }

    #[must_use]
    pub fn category_ids(&self) -> impl Iterator<Item = &Id<CategoryMarker>> {
        self.categories.iter().map(|category| &category.id)
    }
}

impl From<&PostSummary> for PostLink {
    fn from(value: &PostSummary) -> Self {
        Self {
            id: value.id.clone(),
            title: value.title.clone(),
        }
    }
}
