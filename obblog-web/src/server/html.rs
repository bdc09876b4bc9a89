use axum::response::{IntoResponse, Response};
use axum_extra::TypedHeader;
use headers::ContentType;

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Html(pub String);

impl IntoResponse for Html {
    fn into_response(self) -> Response {
        (TypedHeader(ContentType::html()), self.0).into_response()
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Xml(pub String);

impl IntoResponse for Xml {
    fn into_response(self) -> Response {
        (TypedHeader(ContentType::xml()), self.0).into_response()
    }
}
