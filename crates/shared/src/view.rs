use crate::Result;

/// State of a view's fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Load<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> Default for Load<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> Load<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Error(err.message()),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Load<U> {
        match self {
            Self::Loading => Load::Loading,
            Self::Error(message) => Load::Error(message),
            Self::Ready(value) => Load::Ready(f(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_from_result() {
        let ready = Load::from_result(Ok(3));
        assert_eq!(ready.ready(), Some(&3));
        assert_eq!(ready.map(|v| v * 2), Load::Ready(6));

        let failed: Load<u8> = Load::from_result(Err(Error::Transport("connection refused".to_owned())));
        assert_eq!(failed.error(), Some("connection refused"));
        assert!(failed.ready().is_none());

        assert!(Load::<u8>::default().is_loading());
    }
}
