use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropError {
    #[error("Invalid offsets: {0}")]
    InvalidOffsets(String),

    #[error("CropBox at byte {position} holds {numbers} numbers but only 4 offsets are configured")]
    OffsetsExhausted { position: usize, numbers: usize },

    #[error("Malformed number at byte {position}: {token:?}")]
    MalformedNumber { position: usize, token: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CropError>;
