use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid window size {window_size}: a rolling window must hold at least 1 byte")]
    InvalidConfiguration { window_size: u32 },
}
