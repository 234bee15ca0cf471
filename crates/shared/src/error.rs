#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(String),

    #[error("{}", status_message(.status, .detail))]
    Status { status: u16, detail: Option<String> },

    #[error("{0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("{0}")]
    InvalidState(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Text shown to the user, the server-provided detail when there is one.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn status_message(status: &u16, detail: &Option<String>) -> String {
    if let Some(detail) = detail {
        return detail.to_owned();
    }

    match reqwest::StatusCode::from_u16(*status)
        .ok()
        .and_then(|s| s.canonical_reason())
    {
        Some(reason) => format!("{status} {reason}"),
        None => status.to_string(),
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            return Self::Decode(value.to_string());
        }

        Self::Transport(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

/// Keeps the first message attached to a failed rule.
impl From<validator::ValidationErrors> for Error {
    fn from(value: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = value.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .into_iter()
            .flat_map(|(_, errors)| errors.iter())
            .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| value.to_string());

        Self::Validate(message)
    }
}

impl From<url::ParseError> for Error {
    fn from(value: url::ParseError) -> Self {
        Self::Transport(format!("invalid url: {value}"))
    }
}

#[macro_export]
macro_rules! not_found {
    ($kind:literal) => {
        return Err($crate::Error::Status {
            status: 404,
            detail: Some(format!("{} not found", $kind)),
        })
    };
}
