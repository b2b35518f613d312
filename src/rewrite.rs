use std::borrow::Cow;
use std::io::{Read, Write};

use tracing::{debug, warn};

use crate::document::Document;
use crate::error::{CropError, Result};
use crate::parser::{Token, coerce_int};
use crate::types::{CropBoxMatch, EDGE_COUNT, Offsets};

/// What to do with a CropBox whose rewritten form is not shorter than the original
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthPolicy {
    /// Emit the longer replacement; byte offsets after it shift
    #[default]
    Grow,
    /// Leave the original bytes untouched so no offset ever moves
    KeepOriginal,
}

/// Counts gathered over one rewrite pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteReport {
    pub matches: usize,
    /// Replacements padded with trailing spaces to the original length
    pub padded: usize,
    /// Replacements written longer than the original
    pub grown: usize,
    /// Matches left as they were because of `LengthPolicy::KeepOriginal`
    pub kept: usize,
    /// Tokens that were not plain integers
    pub malformed: usize,
}

impl RewriteReport {
    /// True when every byte offset after each match is unchanged
    pub fn offsets_preserved(&self) -> bool {
        self.grown == 0
    }
}

/// Rewrites every CropBox in a document with a fixed set of offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rewriter {
    offsets: Offsets,
    strict: bool,
    length_policy: LengthPolicy,
}

impl Rewriter {
    pub fn new(offsets: Offsets) -> Self {
        Self {
            offsets,
            ..Self::default()
        }
    }

    /// Reject tokens that are not plain integers instead of reading them as 0
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn length_policy(mut self, policy: LengthPolicy) -> Self {
        self.length_policy = policy;
        self
    }

    pub fn offsets(&self) -> Offsets {
        self.offsets
    }

    /// Rewrite all CropBox directives, returning the new bytes and a report.
    ///
    /// Bytes outside matched directives are copied through untouched.
    #[tracing::instrument(skip(self, data), fields(data_len = data.len(), offsets = %self.offsets))]
    pub fn rewrite(&self, data: &[u8]) -> Result<(Vec<u8>, RewriteReport)> {
        let mut output = Vec::with_capacity(data.len());
        let mut report = RewriteReport::default();
        let mut last = 0;

        for crop_box in Document::new(data).crop_boxes() {
            output.extend_from_slice(&data[last..crop_box.span.start]);
            let replacement = self.replace(&crop_box, &mut report)?;
            output.extend_from_slice(&replacement);
            last = crop_box.span.end;
            report.matches += 1;
        }
        output.extend_from_slice(&data[last..]);

        debug!(?report, "rewrite finished");
        Ok((output, report))
    }

    /// Read all of `input`, rewrite it, and write the result to `output`
    pub fn rewrite_stream<R: Read, W: Write>(
        &self,
        mut input: R,
        mut output: W,
    ) -> Result<RewriteReport> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;

        let (rewritten, report) = self.rewrite(&data)?;

        output.write_all(&rewritten)?;
        output.flush()?;
        Ok(report)
    }

    /// Replacement bytes for one CropBox
    fn replace<'a>(
        &self,
        crop_box: &CropBoxMatch<'a>,
        report: &mut RewriteReport,
    ) -> Result<Cow<'a, [u8]>> {
        let tokens: Vec<Token> = crop_box.tokens().collect();
        if tokens.len() > EDGE_COUNT {
            return Err(CropError::OffsetsExhausted {
                position: crop_box.position(),
                numbers: tokens.len(),
            });
        }

        // Each CropBox consumes its own copy of the offsets
        let mut offsets = self.offsets.iter();
        let mut fields = Vec::with_capacity(tokens.len());
        for (token, offset) in tokens.iter().zip(&mut offsets) {
            let number = coerce_int(token.text);
            if !number.clean {
                report.malformed += 1;
                let text = String::from_utf8_lossy(token.text).into_owned();
                if self.strict {
                    return Err(CropError::MalformedNumber {
                        position: token.position,
                        token: text,
                    });
                }
                warn!(position = token.position, token = %text, value = number.value, "Non-integer CropBox value");
            }
            fields.push(number.value.saturating_add(offset).to_string());
        }

        let mut replacement = format!("/CropBox[{}]", fields.join(" ")).into_bytes();
        let original_len = crop_box.len();

        if replacement.len() < original_len {
            replacement.resize(original_len, b' ');
            report.padded += 1;
        } else {
            match self.length_policy {
                LengthPolicy::KeepOriginal => {
                    debug!(position = crop_box.position(), "CropBox kept, replacement not shorter");
                    report.kept += 1;
                    return Ok(Cow::Borrowed(crop_box.original));
                }
                LengthPolicy::Grow if replacement.len() > original_len => {
                    warn!(
                        position = crop_box.position(),
                        grew_by = replacement.len() - original_len,
                        "CropBox replacement is longer than the original, later byte offsets shift"
                    );
                    report.grown += 1;
                }
                LengthPolicy::Grow => {}
            }
        }

        debug!(
            position = crop_box.position(),
            original = %String::from_utf8_lossy(crop_box.original),
            replacement = %String::from_utf8_lossy(&replacement),
            "CropBox rewritten"
        );
        Ok(Cow::Owned(replacement))
    }
}

/// Rewrite every CropBox in `data` with `offsets`, using default options
pub fn rewrite(data: &[u8], offsets: &Offsets) -> Result<Vec<u8>> {
    Rewriter::new(*offsets).rewrite(data).map(|(output, _)| output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_rewrite(data: &[u8]) -> Vec<u8> {
        rewrite(data, &Offsets::default()).unwrap()
    }

    #[test]
    fn test_no_crop_box_is_unchanged() {
        let data = b"%PDF-1.4\n1 0 obj << /MediaBox[0 0 612 792] >> endobj\n%%EOF";
        assert_eq!(default_rewrite(data), data);
    }

    #[test]
    fn test_basic_offsets() {
        let output = default_rewrite(b"/CropBox[0 0 600 800]");
        assert_eq!(output, b"/CropBox[60 50 540 730]");
    }

    #[test]
    fn test_shorter_replacement_is_padded() {
        let data = b"/CropBox[100 100 1000 1000]/Rotate 0";
        let output = default_rewrite(data);
        assert_eq!(output, b"/CropBox[160 150 940 930]  /Rotate 0");
        assert_eq!(output.len(), data.len());
    }

    #[test]
    fn test_irregular_whitespace_collapses() {
        let data = b"/CropBox[ 0   0  600  800 ]";
        let (output, report) = Rewriter::new(Offsets::default()).rewrite(data).unwrap();

        assert_eq!(output, b"/CropBox[60 50 540 730]    ");
        assert_eq!(output.len(), data.len());
        assert_eq!(report.padded, 1);
    }

    #[test]
    fn test_each_match_uses_fresh_offsets() {
        let output = default_rewrite(b"/CropBox[0 0 600 800] /CropBox[10 20 300 400]");
        assert_eq!(output, b"/CropBox[60 50 540 730] /CropBox[70 70 240 330]");
    }

    #[test]
    fn test_non_numeric_token_is_zero() {
        let (output, report) = Rewriter::new(Offsets::default())
            .rewrite(b"/CropBox[0 abc 600 800]")
            .unwrap();

        assert_eq!(output, b"/CropBox[60 50 540 730]");
        assert_eq!(report.malformed, 1);
    }

    #[test]
    fn test_strict_rejects_non_numeric_token() {
        let result = Rewriter::new(Offsets::default())
            .strict(true)
            .rewrite(b"/CropBox[0 abc 600 800]");

        match result {
            Err(CropError::MalformedNumber { position, token }) => {
                assert_eq!(position, 11);
                assert_eq!(token, "abc");
            }
            other => panic!("expected MalformedNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_fewer_numbers_consume_fewer_offsets() {
        let output = default_rewrite(b"/CropBox[0 0 600]");
        assert_eq!(output, b"/CropBox[60 50 540]");
    }

    #[test]
    fn test_too_many_numbers_fails() {
        let result = rewrite(b"xx/CropBox[0 0 600 800 5]", &Offsets::default());
        assert!(matches!(
            result,
            Err(CropError::OffsetsExhausted { position: 2, numbers: 5 })
        ));
    }

    #[test]
    fn test_empty_interior() {
        let output = default_rewrite(b"/CropBox[ ]");
        assert_eq!(output, b"/CropBox[] ");
    }

    #[test]
    fn test_multi_line_interior() {
        let data = b"/CropBox [\n 0\n0\r\n600 800\n]";
        let output = default_rewrite(data);
        assert_eq!(output, b"/CropBox[60 50 540 730]   ");
        assert_eq!(output.len(), data.len());
    }

    #[test]
    fn test_not_idempotent() {
        let once = default_rewrite(b"/CropBox[0 0 600 800]");
        let twice = default_rewrite(&once);
        assert_eq!(twice, b"/CropBox[120 100 480 660]");
    }

    #[test]
    fn test_grow_shifts_following_bytes() {
        let data = b"/CropBox[0 0 600 800]\nxref";
        let (output, report) = Rewriter::new(Offsets::default()).rewrite(data).unwrap();

        assert_eq!(output, b"/CropBox[60 50 540 730]\nxref");
        assert_eq!(report.grown, 1);
        assert!(!report.offsets_preserved());
    }

    #[test]
    fn test_keep_original_leaves_longer_match() {
        let data = b"/CropBox[0 0 600 800] /CropBox[100 100 1000 1000]";
        let (output, report) = Rewriter::new(Offsets::default())
            .length_policy(LengthPolicy::KeepOriginal)
            .rewrite(data)
            .unwrap();

        assert_eq!(output, b"/CropBox[0 0 600 800] /CropBox[160 150 940 930]  ");
        assert_eq!(report.kept, 1);
        assert_eq!(report.padded, 1);
        assert!(report.offsets_preserved());
    }

    #[test]
    fn test_keep_original_on_equal_length() {
        let data = b"/CropBox[10 10 600 800]";
        let (output, report) = Rewriter::new(Offsets::default())
            .length_policy(LengthPolicy::KeepOriginal)
            .rewrite(data)
            .unwrap();

        assert_eq!(output, data);
        assert_eq!(report.kept, 1);
    }

    #[test]
    fn test_binary_content_preserved() {
        let mut data = b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n".to_vec();
        data.extend_from_slice(b"/CropBox[ 100 100 1000 1000 ]");
        data.extend_from_slice(b"\nstream\n\x00\xFF\x80[\nendstream");

        let output = default_rewrite(&data);

        assert_eq!(output.len(), data.len());
        assert_eq!(&output[..15], &data[..15]);
        assert_eq!(&output[15..44], b"/CropBox[160 150 940 930]    ");
        assert_eq!(&output[44..], &data[44..]);
    }

    #[test]
    fn test_rewrite_stream() {
        let mut output = Vec::new();
        let report = Rewriter::new(Offsets::new(1, 2, 3, 4))
            .rewrite_stream(&b"a /CropBox[0 0 10 10] b"[..], &mut output)
            .unwrap();

        assert_eq!(output, b"a /CropBox[1 2 13 14] b");
        assert_eq!(report.matches, 1);
    }
}
