//! The error type.

/// An error in the page shell.
///
/// Most of these errors are swallowed at the component or dictionary boundary,
/// since a page should always render in its default language.
#[derive(Debug)]
pub enum Error {
    /// The backend failed to do an operation.
    BackendError {
        /// The message.
        msg: String,
        /// The underlying error.
        err: Option<Box<dyn std::error::Error>>,
    },
    /// A network request failed or returned a non-success status.
    FetchError {
        /// The requested URL.
        url: String,
        /// The HTTP status, if a response was received.
        status: Option<u16>,
        /// The message.
        msg: String,
    },
    /// A resource cannot be parsed.
    ParseError {
        /// The message.
        msg: String,
    },
    /// The component name is not in the component table.
    UnknownComponent {
        /// The component name.
        name: String,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::BackendError { msg, err } => {
                write!(f, "{}", msg)?;
                if let Some(err) = err {
                    write!(f, ": {}", err)?;
                }
            }
            Error::FetchError { url, status, msg } => {
                write!(f, "Failed to fetch {:?}", url)?;
                if let Some(status) = status {
                    write!(f, " (HTTP {})", status)?;
                }
                if !msg.is_empty() {
                    write!(f, ": {}", msg)?;
                }
            }
            Error::ParseError { msg } => {
                write!(f, "Parse error: {}", msg)?;
            }
            Error::UnknownComponent { name } => {
                write!(f, "No component named {:?}", name)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl From<pageshell_tree::TreeError> for Error {
    fn from(err: pageshell_tree::TreeError) -> Self {
        Error::BackendError {
            msg: "Tree operation failed".into(),
            err: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ParseError {
            msg: err.to_string(),
        }
    }
}
