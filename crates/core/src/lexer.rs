use crate::error::ConvertError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A whitespace-delimited word, kept verbatim
    Word(String),
    /// End of a source line
    LineBreak,
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub line: u32,
}

/// Split `src` into words, one `LineBreak` after every source line.
///
/// Empty lines yield only their `LineBreak`. A final line without a trailing
/// newline still gets one, so every line's tokens are always terminated.
pub fn lex(src: &str) -> Vec<Spanned> {
    let mut tokens = Vec::new();
    for (idx, text) in src.lines().enumerate() {
        let line = idx as u32 + 1;
        for word in text.split_whitespace() {
            tokens.push(Spanned {
                token: Token::Word(word.to_owned()),
                line,
            });
        }
        tokens.push(Spanned {
            token: Token::LineBreak,
            line,
        });
    }
    tokens
}

/// Read cursor over an immutable token sequence, shared by the config and
/// data parsers. `pass` is stamped on the structural errors it raises.
pub(crate) struct Cursor<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    pass: u8,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a [Spanned], pass: u8) -> Self {
        Cursor {
            tokens,
            pos: 0,
            pass,
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Line of the token under the cursor, or of the last token once exhausted.
    pub(crate) fn line(&self) -> u32 {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |s| s.line)
    }

    /// Number of words left on the current line.
    pub(crate) fn words_until_break(&self) -> usize {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .take_while(|s| s.token != Token::LineBreak)
            .count()
    }

    /// Take the next word of the current line; a line break here means the
    /// line ended before `expected` was supplied.
    pub(crate) fn take_word(&mut self, expected: &str) -> Result<&'a str, ConvertError> {
        let line = self.line();
        let tokens = self.tokens;
        match tokens.get(self.pos) {
            Some(Spanned {
                token: Token::Word(w),
                ..
            }) => {
                self.pos += 1;
                Ok(w.as_str())
            }
            _ => Err(ConvertError::UnexpectedEndOfLine {
                pass: self.pass,
                line,
                expected: expected.to_owned(),
            }),
        }
    }

    /// Consume the line break closing the current line. Any word still in
    /// front of it is reported as unexpected.
    pub(crate) fn expect_line_break(&mut self) -> Result<(), ConvertError> {
        let tokens = self.tokens;
        match tokens.get(self.pos) {
            Some(Spanned {
                token: Token::LineBreak,
                ..
            })
            | None => {
                self.pos += 1;
                Ok(())
            }
            Some(Spanned {
                token: Token::Word(w),
                line,
            }) => Err(ConvertError::UnexpectedToken {
                pass: self.pass,
                line: *line,
                token: w.clone(),
            }),
        }
    }
}
