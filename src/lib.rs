pub mod document;
pub mod error;
pub mod parser;
pub mod rewrite;
pub mod types;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm;

pub use document::Document;
pub use error::{CropError, Result};
pub use rewrite::{LengthPolicy, RewriteReport, Rewriter, rewrite};
pub use types::{CropBoxMatch, Offsets};
