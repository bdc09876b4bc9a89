pub mod category;
pub mod post;

use crate::util::InvalidTimestampError;
use derive_where::derive_where;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, marker::PhantomData};
use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ModelValidationError {
    #[error(transparent)]
    Timestamp(#[from] InvalidTimestampError),
    #[error("The content id is empty")]
    EmptyId,
    #[error("The required field {0} is missing or empty")]
    MissingField(&'static str),
}

#[derive_where(
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Debug,
    Default,
    Hash,
    Serialize,
    Deserialize
)]
#[serde(transparent)]
pub struct Id<Marker>(String, #[serde(skip)] PhantomData<Marker>);

impl<Marker> Id<Marker> {
    pub fn new(id: String) -> Result<Self, ModelValidationError> {
        if id.is_empty() {
            Err(ModelValidationError::EmptyId)
        } else {
            Ok(Self(id, PhantomData))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> TryFrom<String> for Id<Marker> {
    type Error = ModelValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<Marker> From<Id<Marker>> for String {
    fn from(value: Id<Marker>) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Id, ModelValidationError, post::PostMarker};

    #[test]
    fn empty_id_is_rejected() {
        assert_eq!(
            Id::<PostMarker>::new(String::new()),
            Err(ModelValidationError::EmptyId)
        );
        assert_eq!(Id::<PostMarker>::new("abc".into()).unwrap().get(), "abc");
    }

    #[test]
    fn id_deserializes_from_plain_string() {
        let id: Id<PostMarker> = serde_json::from_str("\"x7k2-post\"").unwrap();
        assert_eq!(id.to_string(), "x7k2-post");
    }
}
