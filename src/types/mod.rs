mod crop_box;
mod offsets;

pub use crop_box::CropBoxMatch;
pub use offsets::{Offsets, EDGE_COUNT};
