use std::ops::Range;

use crate::parser::Lexer;

/// One `/CropBox[...]` directive located in the raw document bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropBoxMatch<'a> {
    /// Byte range of the whole directive in the document
    pub span: Range<usize>,
    /// The matched bytes, from `/CropBox` up to and including `]`
    pub original: &'a [u8],
    /// Bytes between the brackets, leading whitespace excluded
    pub interior: &'a [u8],
    /// Absolute offset of `interior` in the document
    pub interior_start: usize,
}

impl<'a> CropBoxMatch<'a> {
    pub fn position(&self) -> usize {
        self.span.start
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Whitespace-separated tokens of the bracket interior
    pub fn tokens(&self) -> Lexer<'a> {
        Lexer::with_base(self.interior, self.interior_start)
    }
}
