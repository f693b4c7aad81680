use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("qr error: {0}")]
    Qr(#[from] qr_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
