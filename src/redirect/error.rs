use thiserror::Error;

/// Errors raised while setting up a redirection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedirectError {
    /// A logger the redirector forwards into has not been registered.
    #[error("logger '{0}' is not registered; register it before redirecting a stream")]
    MissingSink(&'static str),
}
