use super::Location;

/// Character-addressed view of the source with line and column tracking.
#[derive(Debug, Clone)]
pub struct Cursor<'s> {
    src: &'s str,
    location: Location,
    mark: usize,
}

impl<'s> Cursor<'s> {
    pub fn new(src: &'s str) -> Self {
        Self {
            src,
            location: Location::START,
            mark: 0,
        }
    }

    /// The `k`-th character ahead, `peek(0)` being the next one.
    pub fn peek(&self, k: usize) -> Option<char> {
        self.rest().chars().nth(k)
    }

    pub fn advance(&mut self, n: usize) {
        for c in self.rest().chars().take(n) {
            self.location.offset += c.len_utf8();
            if c == '\n' {
                self.location.line += 1;
                self.location.column = 1;
            } else {
                self.location.column += 1;
            }
        }
    }

    /// Consumes `lexeme`, which must be a prefix of [`Cursor::rest`].
    pub fn advance_over(&mut self, lexeme: &str) {
        debug_assert!(self.rest().starts_with(lexeme));
        self.advance(lexeme.chars().count());
    }

    pub fn advance_if(&mut self, c: char) -> bool {
        if self.peek(0) == Some(c) {
            self.advance(1);
            true
        } else {
            false
        }
    }

    pub fn advance_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let n = self.rest().chars().take_while(|&c| pred(c)).count();
        self.advance(n);
        n
    }

    pub fn mark(&mut self) {
        self.mark = self.location.offset;
    }

    /// Everything consumed since the last [`Cursor::mark`].
    pub fn extract(&self) -> &'s str {
        &self.src[self.mark..self.location.offset]
    }

    pub fn rest(&self) -> &'s str {
        &self.src[self.location.offset..]
    }

    pub fn is_at_end(&self) -> bool {
        self.location.offset >= self.src.len()
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Rewinds (or skips) to a location previously handed out by this cursor.
    pub fn reset(&mut self, location: Location) {
        self.location = location;
        self.mark = self.mark.min(location.offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_and_extract() {
        let mut cursor = Cursor::new("ab\ncd");
        assert_eq!(cursor.peek(0), Some('a'));
        assert_eq!(cursor.peek(3), Some('c'));
        assert_eq!(cursor.peek(5), None);

        cursor.mark();
        cursor.advance(4);
        assert_eq!(cursor.extract(), "ab\nc");
        assert_eq!(cursor.location().line, 2);
        assert_eq!(cursor.location().column, 2);
        assert_eq!(cursor.rest(), "d");
    }

    #[test]
    fn reset_rewinds() {
        let mut cursor = Cursor::new("x = 1");
        cursor.advance(2);
        let here = cursor.location();
        cursor.advance_while(|c| c != '1');
        assert!(cursor.advance_if('1'));
        assert!(cursor.is_at_end());

        cursor.reset(here);
        assert_eq!(cursor.rest(), "= 1");
        assert!(!cursor.advance_if('1'));
    }
}
