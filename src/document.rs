use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::types::CropBoxMatch;

/// `/CropBox`, optional whitespace, `[`, then the shortest run without `[` up to `]`.
/// ASCII mode: `\s` is space, \t, \n, \v, \f or \r, and the interior may span lines.
static CROP_BOX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)/CropBox\s*\[\s*([^\[]+?)\]").expect("CropBox pattern is valid")
});

/// Raw PDF bytes, scanned without building an object model
pub struct Document<'a> {
    data: &'a [u8],
}

impl<'a> Document<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Every non-overlapping CropBox directive, in document order.
    ///
    /// Matches are located on the original bytes only.
    pub fn crop_boxes(&self) -> impl Iterator<Item = CropBoxMatch<'a>> + use<'a> {
        let data = self.data;
        CROP_BOX_RE.captures_iter(data).filter_map(move |caps| {
            let whole = caps.get(0)?;
            let interior = caps.get(1)?;
            Some(CropBoxMatch {
                span: whole.range(),
                original: &data[whole.range()],
                interior: &data[interior.range()],
                interior_start: interior.start(),
            })
        })
    }

    #[tracing::instrument(skip(self), fields(data_len = self.data.len()))]
    pub fn crop_box_count(&self) -> usize {
        self.crop_boxes().count()
    }
}
