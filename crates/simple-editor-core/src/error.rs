//! Error types for the editor session.
//!
//! Every error is raised synchronously at the point of violation. Nothing here
//! is retried; callers are expected to satisfy the preconditions.

use miette::Diagnostic;

/// Main error type for editor operations.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum EditorError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Attachment(#[from] AttachmentError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Host(#[from] HostError),
}

/// Failure reported by the host document.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[error("host error: {0}")]
#[diagnostic(code(simple_editor::host))]
pub struct HostError(pub String);

impl From<&str> for HostError {
    fn from(s: &str) -> Self {
        HostError(s.to_string())
    }
}

impl From<String> for HostError {
    fn from(s: String) -> Self {
        HostError(s)
    }
}

/// Errors from `EditorSession::attach`.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum AttachmentError {
    #[error("cannot attach the editor more than once")]
    #[diagnostic(code(simple_editor::attach::twice))]
    AlreadyAttached,

    #[error("cannot attach the editor to `{0}`: no such element")]
    #[diagnostic(
        code(simple_editor::attach::container),
        help("the container must exist in the document before attaching")
    )]
    ContainerNotFound(String),

    #[error("failed to build the editor DOM")]
    #[diagnostic(code(simple_editor::attach::host))]
    Host(#[from] HostError),
}

/// Which kind of change subscription a registration error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionKind {
    Immediate,
    Interval,
    Idle,
}

impl SubscriptionKind {
    fn with_article(&self) -> &'static str {
        match self {
            SubscriptionKind::Immediate => "a change",
            SubscriptionKind::Interval => "an interval",
            SubscriptionKind::Idle => "an idle",
        }
    }
}

impl std::fmt::Display for SubscriptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionKind::Immediate => write!(f, "change"),
            SubscriptionKind::Interval => write!(f, "interval"),
            SubscriptionKind::Idle => write!(f, "idle"),
        }
    }
}

/// Errors from registering change subscribers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum RegistrationError {
    #[error("cannot register {} handler after the editor is attached", .0.with_article())]
    #[diagnostic(
        code(simple_editor::register::attached),
        help("register all change handlers before calling attach")
    )]
    AfterAttach(SubscriptionKind),

    #[error("{0} handlers need a positive duration in milliseconds")]
    #[diagnostic(code(simple_editor::register::duration))]
    InvalidDuration(SubscriptionKind),
}

/// Errors from touching the content before the editable surface exists.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum StateError {
    #[error("cannot {0} before the editor is attached")]
    #[diagnostic(code(simple_editor::state::detached))]
    NotAttached(&'static str),
}
