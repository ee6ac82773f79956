use crate::error::ActionError;

/// State of data that is fetched from the server.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Remote<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(ActionError),
}

impl<T> Remote<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Remote::Loaded(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Remote::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Remote::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ActionError> {
        match self {
            Remote::Failed(error) => Some(error),
            _ => None,
        }
    }
}
