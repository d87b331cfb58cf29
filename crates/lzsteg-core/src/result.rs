use crate::error::LzStegError;

pub type Result<T> = std::result::Result<T, LzStegError>;
