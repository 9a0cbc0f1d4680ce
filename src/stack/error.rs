use std::fmt;

use super::context::FactoryError;

/// Errors surfaced by navigation. All of them are programmer errors: a
/// malformed transform, a broken factory or misuse of the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The transform produced an empty configuration list.
    EmptyStack,
    /// The transform produced the same configuration twice (debug rendering).
    DuplicateConfiguration(String),
    /// The component factory failed; the previous stack is untouched.
    Factory(FactoryError),
    /// `navigate` was called while another navigation was still running.
    Reentrant,
    /// The router has already been destroyed.
    Destroyed,
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::EmptyStack => write!(f, "configuration stack can not be empty"),
            NavigationError::DuplicateConfiguration(c) => {
                write!(f, "configurations in the stack must be unique, found {c} twice")
            }
            NavigationError::Factory(e) => write!(f, "{e}"),
            NavigationError::Reentrant => write!(f, "navigation is already in progress"),
            NavigationError::Destroyed => write!(f, "stack router has been destroyed"),
        }
    }
}

impl std::error::Error for NavigationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavigationError::Factory(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FactoryError> for NavigationError {
    fn from(e: FactoryError) -> Self {
        NavigationError::Factory(e)
    }
}
