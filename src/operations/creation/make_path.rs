use crate::math::{Path64, PathD, Point64, PointD};

/// Builds an integer path from whitespace and/or comma separated pairs,
/// such as `"0,0 10,0 10,10"`.
///
/// Parsing is best effort: scanning stops at the first token that is not a
/// number and the points read up to that position are returned. Malformed
/// text never produces an error.
#[must_use]
pub fn make_path(text: &str) -> Path64 {
    make_path_with_skip(text, "")
}

/// Builds an integer path, additionally skipping the characters in
/// `skip_chars` between points.
///
/// Each listed character is skipped at most once per separator run, while
/// whitespace is always skipped. An empty set or a lone space selects the
/// default separators (whitespace and at most one comma).
#[must_use]
pub fn make_path_with_skip(text: &str, skip_chars: &str) -> Path64 {
    let user_skip = !skip_chars.is_empty() && skip_chars != " ";
    let mut cursor = Cursor::new(text);
    let separate = |cursor: &mut Cursor<'_>| {
        if user_skip {
            cursor.skip_user_defined(skip_chars.as_bytes());
        } else {
            cursor.skip_spaces_with_optional_comma();
        }
    };

    let mut path = Vec::new();
    if user_skip {
        cursor.skip_user_defined(skip_chars.as_bytes());
    } else {
        cursor.skip_whitespace();
    }
    while !cursor.at_end() {
        let Some(x) = cursor.read_int() else { break };
        cursor.skip_spaces_with_optional_comma();
        let Some(y) = cursor.read_int() else { break };
        path.push(Point64::new(x, y));
        separate(&mut cursor);
    }
    path
}

/// Builds a floating path from whitespace and/or comma separated pairs.
#[must_use]
pub fn make_path_d(text: &str) -> PathD {
    let mut cursor = Cursor::new(text);
    let mut path = Vec::new();
    cursor.skip_whitespace();
    while !cursor.at_end() {
        let Some(x) = cursor.read_float() else { break };
        cursor.skip_spaces_with_optional_comma();
        let Some(y) = cursor.read_float() else { break };
        path.push(PointD::new(x, y));
        cursor.skip_spaces_with_optional_comma();
    }
    path
}

/// Byte cursor over the literal. Number tokens only ever span ASCII bytes.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c <= b' ') {
            self.pos += 1;
        }
    }

    /// Skips whitespace and at most one comma.
    fn skip_spaces_with_optional_comma(&mut self) {
        let mut comma_seen = false;
        while let Some(c) = self.peek() {
            if c <= b' ' {
                self.pos += 1;
            } else if c == b',' && !comma_seen {
                comma_seen = true;
                self.pos += 1;
            } else {
                return;
            }
        }
    }

    /// Skips whitespace and each character of `skip` at most once.
    fn skip_user_defined(&mut self, skip: &[u8]) {
        let mut unused = skip.to_vec();
        while let Some(c) = self.peek() {
            if c <= b' ' {
                self.pos += 1;
            } else if let Some(i) = unused.iter().position(|&s| s == c) {
                unused.swap_remove(i);
                self.pos += 1;
            } else {
                return;
            }
        }
    }

    /// Consumes an optional `-` and the following run of bytes accepted by
    /// `accept`, returning the token.
    fn take_number(&mut self, mut accept: impl FnMut(u8) -> bool) -> &'a str {
        let bytes = self.bytes;
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        while self.peek().is_some_and(&mut accept) {
            self.pos += 1;
        }
        std::str::from_utf8(&bytes[start..self.pos]).unwrap_or_default()
    }

    /// Reads an optionally negative integer. Out-of-range values do not parse.
    fn read_int(&mut self) -> Option<i64> {
        let token = self.take_number(|c| c.is_ascii_digit());
        let digits = token.strip_prefix('-').unwrap_or(token);
        if digits.is_empty() {
            return None;
        }
        token.parse().ok()
    }

    /// Reads an optionally negative decimal with at most one `.`, which may
    /// not be the last character.
    fn read_float(&mut self) -> Option<f64> {
        let mut dot_seen = false;
        let token = self.take_number(|c| {
            if c == b'.' && !dot_seen {
                dot_seen = true;
                return true;
            }
            c.is_ascii_digit()
        });
        let digits = token.strip_prefix('-').unwrap_or(token);
        if digits.is_empty() || digits == "." || digits.ends_with('.') {
            return None;
        }
        if self.peek() == Some(b'.') {
            // A second decimal point makes the whole token malformed.
            return None;
        }
        token.parse().ok()
    }
}
