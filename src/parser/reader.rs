//! Buffered character source for the lexer.
//!
//! Supplies one byte of lookahead past the cursor ([`CharReader::peek2`])
//! on top of the current byte ([`CharReader::peek`]), refilling a
//! fixed-size buffer from the underlying stream on demand. End of input is
//! signalled by the `\0` sentinel rather than a separate predicate.

use std::io::{ErrorKind, Read};

const BUFFER_SIZE: usize = 2048;

/// Byte-oriented reader with a one-byte lookahead and line/column tracking.
///
/// The buffer always holds a suffix of the still-unread input: before each
/// refill the unread bytes are compacted to the front, so `peek` never
/// observes stale data after a reload.
pub struct CharReader<R: Read> {
    inner: R,
    buf: Box<[u8]>,
    /// Number of valid bytes in `buf`.
    len: usize,
    /// Cursor into `buf`; never exceeds `len`.
    pos: usize,
    hit_eof: bool,
    line: usize,
    column: usize,
}

impl<R: Read> CharReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, BUFFER_SIZE)
    }

    /// Construct with a custom buffer size. Small capacities are used by
    /// the tests to force tokens across refill boundaries.
    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        Self {
            inner,
            buf: vec![0; capacity.max(2)].into_boxed_slice(),
            len: 0,
            pos: 0,
            hit_eof: false,
            line: 1,
            column: 1,
        }
    }

    /// 1-based line of the byte at the cursor.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the byte at the cursor.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The byte at the cursor, or `\0` once the input is exhausted.
    pub fn peek(&mut self) -> u8 {
        self.ensure(1);
        if self.pos < self.len {
            self.buf[self.pos]
        } else {
            0
        }
    }

    /// The byte one past the cursor, or `\0` if fewer than two remain.
    pub fn peek2(&mut self) -> u8 {
        self.ensure(2);
        if self.pos + 1 < self.len {
            self.buf[self.pos + 1]
        } else {
            0
        }
    }

    /// Consume and return the byte at the cursor, updating line/column.
    /// At end of input this is a no-op returning `\0`.
    pub fn advance(&mut self) -> u8 {
        let ch = self.peek();
        if ch == 0 {
            return 0;
        }
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }

    /// Make at least `want` bytes available past the cursor, unless the
    /// stream runs out first. Unread bytes are moved to the front of the
    /// buffer before reading more, so nothing is lost.
    fn ensure(&mut self, want: usize) {
        if self.pos + want <= self.len || self.hit_eof {
            return;
        }
        if self.pos > 0 {
            self.buf.copy_within(self.pos..self.len, 0);
            self.len -= self.pos;
            self.pos = 0;
        }
        while self.len < want.min(self.buf.len()) && !self.hit_eof {
            match self.inner.read(&mut self.buf[self.len..]) {
                Ok(0) => self.hit_eof = true,
                Ok(n) => self.len += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                // A read failure mid-stream is indistinguishable from a
                // truncated file at this layer; treat it as end of input.
                Err(_) => self.hit_eof = true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_and_advance() {
        let mut r = CharReader::new("ab".as_bytes());
        assert_eq!(r.peek(), b'a');
        assert_eq!(r.peek2(), b'b');
        assert_eq!(r.advance(), b'a');
        assert_eq!(r.peek(), b'b');
        assert_eq!(r.peek2(), 0);
        assert_eq!(r.advance(), b'b');
        assert_eq!(r.peek(), 0);
    }

    #[test]
    fn eof_is_permanent() {
        let mut r = CharReader::new("x".as_bytes());
        r.advance();
        assert_eq!(r.peek(), 0);
        assert_eq!(r.advance(), 0);
        assert_eq!(r.peek(), 0);
        assert_eq!(r.peek2(), 0);
    }

    #[test]
    fn tracks_line_and_column() {
        let mut r = CharReader::new("ab\ncd".as_bytes());
        assert_eq!((r.line(), r.column()), (1, 1));
        r.advance();
        r.advance();
        assert_eq!((r.line(), r.column()), (1, 3));
        r.advance(); // newline
        assert_eq!((r.line(), r.column()), (2, 1));
        r.advance();
        assert_eq!((r.line(), r.column()), (2, 2));
    }

    #[test]
    fn refill_preserves_unread_bytes() {
        // Capacity 4 forces several refills; every byte must still come
        // through in order.
        let input = "abcdefghijklmnop";
        let mut r = CharReader::with_capacity(input.as_bytes(), 4);
        let mut out = Vec::new();
        loop {
            let ch = r.advance();
            if ch == 0 {
                break;
            }
            out.push(ch);
        }
        assert_eq!(out, input.as_bytes());
    }

    #[test]
    fn peek2_across_refill_boundary() {
        // With capacity 2, peek2 at an odd position needs a compacting
        // refill; it must see the true next byte, not stale data.
        let mut r = CharReader::with_capacity("xyz".as_bytes(), 2);
        assert_eq!(r.advance(), b'x');
        assert_eq!(r.peek(), b'y');
        assert_eq!(r.peek2(), b'z');
        assert_eq!(r.advance(), b'y');
        assert_eq!(r.advance(), b'z');
        assert_eq!(r.peek(), 0);
    }
}
