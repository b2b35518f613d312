/// A whitespace-delimited piece of a CropBox interior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a [u8],
    /// Absolute byte offset of the token in the document
    pub position: usize,
}

/// Result of coercing a token to an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coerced {
    pub value: i64,
    /// True when the whole token was a plain integer
    pub clean: bool,
}

pub struct Lexer<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_base(data, 0)
    }

    /// Lexer whose token positions are reported relative to `base`
    pub fn with_base(data: &'a [u8], base: usize) -> Self {
        Self { data, pos: 0, base }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn position(&self) -> usize {
        self.base + self.pos
    }

    /// Peek at current byte without consuming
    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Skip ASCII whitespace (space, \t, \n, \v, \f, \r)
    pub fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if is_whitespace(b)) {
            self.pos += 1;
        }
    }

    /// Main entry point - get next token
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        self.skip_whitespace();

        let start = self.pos;
        while matches!(self.peek(), Some(b) if !is_whitespace(b)) {
            self.pos += 1;
        }

        if start == self.pos {
            return None; // EOF
        }

        Some(Token {
            text: &self.data[start..self.pos],
            position: self.base + start,
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.next_token()
    }
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Read the leading integer of a token, 0 when there is none.
///
/// An optional sign followed by the longest run of digits; anything after
/// is ignored, so `600.5` reads as 600 and `abc` as 0. Overflow saturates.
pub fn coerce_int(token: &[u8]) -> Coerced {
    let (negative, sign_len) = match token.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };

    let digits = &token[sign_len..];
    let digit_count = digits.iter().take_while(|b| b.is_ascii_digit()).count();

    let mut value: i64 = 0;
    for &d in &digits[..digit_count] {
        let d = i64::from(d - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }

    Coerced {
        value,
        clean: digit_count > 0 && sign_len + digit_count == token.len(),
    }
}
