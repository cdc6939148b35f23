use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepostatsError>;

#[derive(Error, Debug)]
pub enum RepostatsError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Cache error: {0}")]
    Cache(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid commit record: {0}")]
    InvalidRecord(String),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Reference iteration error: {0}")]
    RefIter(#[from] Box<gix::reference::iter::Error>),
    #[error("Reference iteration error: {0}")]
    RefIterInit(#[from] Box<gix::reference::iter::init::Error>),
    #[error("Signature time error: {0}")]
    SignatureTime(#[from] Box<gix::date::parse::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
}

// gix errors are large; keep them boxed so `Result<T>` stays small.
impl From<gix::object::commit::Error> for RepostatsError {
    fn from(err: gix::object::commit::Error) -> Self {
        RepostatsError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for RepostatsError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        RepostatsError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for RepostatsError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        RepostatsError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for RepostatsError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        RepostatsError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for RepostatsError {
    fn from(err: gix::objs::decode::Error) -> Self {
        RepostatsError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for RepostatsError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        RepostatsError::DiffTreeToTree(Box::new(err))
    }
}

impl From<gix::discover::Error> for RepostatsError {
    fn from(err: gix::discover::Error) -> Self {
        RepostatsError::GitDiscover(Box::new(err))
    }
}

impl From<gix::reference::iter::Error> for RepostatsError {
    fn from(err: gix::reference::iter::Error) -> Self {
        RepostatsError::RefIter(Box::new(err))
    }
}

impl From<gix::reference::iter::init::Error> for RepostatsError {
    fn from(err: gix::reference::iter::init::Error) -> Self {
        RepostatsError::RefIterInit(Box::new(err))
    }
}

impl From<gix::date::parse::Error> for RepostatsError {
    fn from(err: gix::date::parse::Error) -> Self {
        RepostatsError::SignatureTime(Box::new(err))
    }
}
