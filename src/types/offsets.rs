use std::fmt;
use std::str::FromStr;

use crate::error::{CropError, Result};

/// Number of edges in a CropBox: left, bottom, right, top
pub const EDGE_COUNT: usize = 4;

/// Per-edge adjustment added to each CropBox, in left/bottom/right/top order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offsets([i64; EDGE_COUNT]);

impl Offsets {
    /// Trims 60 units from the sides, 50 from the bottom and 70 from the top
    pub const DEFAULT: Offsets = Offsets([60, 50, -60, -70]);

    pub fn new(left: i64, bottom: i64, right: i64, top: i64) -> Self {
        Self([left, bottom, right, top])
    }

    pub fn left(&self) -> i64 {
        self.0[0]
    }

    pub fn bottom(&self) -> i64 {
        self.0[1]
    }

    pub fn right(&self) -> i64 {
        self.0[2]
    }

    pub fn top(&self) -> i64 {
        self.0[3]
    }

    pub fn as_array(&self) -> [i64; EDGE_COUNT] {
        self.0
    }

    /// Fresh left-to-right cursor over the offsets, one per CropBox
    pub fn iter(&self) -> std::array::IntoIter<i64, EDGE_COUNT> {
        self.0.into_iter()
    }
}

impl Default for Offsets {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<[i64; EDGE_COUNT]> for Offsets {
    fn from(values: [i64; EDGE_COUNT]) -> Self {
        Self(values)
    }
}

impl fmt::Display for Offsets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [left, bottom, right, top] = self.0;
        write!(f, "{},{},{},{}", left, bottom, right, top)
    }
}

impl FromStr for Offsets {
    type Err = CropError;

    /// Accepts four integers separated by commas and/or whitespace
    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();

        if fields.len() != EDGE_COUNT {
            return Err(CropError::InvalidOffsets(format!(
                "expected {} values (left,bottom,right,top), got {} in {:?}",
                EDGE_COUNT,
                fields.len(),
                s
            )));
        }

        let mut values = [0i64; EDGE_COUNT];
        for (slot, field) in values.iter_mut().zip(&fields) {
            *slot = field.parse().map_err(|_| {
                CropError::InvalidOffsets(format!("{:?} is not an integer", field))
            })?;
        }

        Ok(Self(values))
    }
}
