use crate::token::{Token, TokenKind};

/// Positioned read head over a finalized token sequence.
///
/// Both consumers of a token dump (the tree parser and the code
/// generator) walk the sequence through this cursor. The cursor only
/// moves; deciding whether a yielded token is acceptable, and turning
/// an unexpected one into an error, is the caller's job.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    #[must_use]
    pub const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Category of the next token, without consuming it.
    #[must_use]
    pub fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.tokens.get(self.pos).map(|token| &token.kind)
    }

    /// Consumes and returns the next token.
    pub fn take(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Consumes the next token only if it has the given category.
    pub fn take_if(&mut self, kind: &TokenKind) -> Option<&'a Token> {
        if self.peek_kind() == Some(kind) {
            self.take()
        } else {
            None
        }
    }

    /// Moves the read position back `n` tokens, clamping at the start.
    pub fn rewind(&mut self, n: usize) {
        self.pos = self.pos.saturating_sub(n);
    }

    /// Index of the next unread token.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}
