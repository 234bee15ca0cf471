use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use std::convert::Infallible;

pub struct Template {
    path: String,
}

impl Template {
    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        match template.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(path = self.path, err = %err, "Failed to render template");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template. Error: {err}"),
                )
                    .into_response()
            }
        }
    }

    /// Renders with `status` unless rendering itself failed.
    pub fn render_with_status<T: askama::Template>(
        &self,
        status: StatusCode,
        template: T,
    ) -> Response {
        let mut response = self.render(template);
        if response.status().is_success() {
            *response.status_mut() = status;
        }

        response
    }

    pub fn not_found(&self) -> Response {
        self.render_with_status(StatusCode::NOT_FOUND, NotFoundTemplate::default())
    }

    /// Interaction post that does not match the page it came from.
    pub fn bad_request(&self) -> Response {
        tracing::warn!(path = self.path, "Rejected malformed form submission");

        self.render_with_status(StatusCode::BAD_REQUEST, BadRequestTemplate::default())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Template {
            path: parts.uri.path().to_owned(),
        })
    }
}

#[derive(askama::Template, Default)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub current_path: String,
}

#[derive(askama::Template, Default)]
#[template(path = "400.html")]
pub struct BadRequestTemplate {
    pub current_path: String,
}
