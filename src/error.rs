use thiserror::Error;

pub type Result<T> = std::result::Result<T, PulseError>;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("git {command} failed ({status}): {stderr}")]
    GitCommand {
        command: String,
        status: String,
        stderr: String,
    },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::discover::Error> for PulseError {
    fn from(err: gix::discover::Error) -> Self {
        PulseError::GitDiscover(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for PulseError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        PulseError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for PulseError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        PulseError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for PulseError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        PulseError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for PulseError {
    fn from(err: gix::objs::decode::Error) -> Self {
        PulseError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for PulseError {
    fn from(err: gix::object::commit::Error) -> Self {
        PulseError::Commit(Box::new(err))
    }
}
