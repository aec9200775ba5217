//! Common types shared by all modules.

/// Edit costs and matrix entries.
///
/// Every entry of a distance matrix is at most `m + n`, so `i32` covers inputs
/// with up to `i32::MAX` tokens in total. See [`crate::AlignError::TooLong`].
pub type Cost = i32;

/// An owned encoded token sequence.
pub type Sequence = Vec<u32>;
/// An encoded token sequence slice.
pub type Seq<'a> = &'a [u32];

/// A single input token.
///
/// A sequence is either entirely `Int` (already hashed by the caller) or
/// entirely made of the other variants. Mixing is rejected by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// UTF-8 text.
    Text(&'a str),
    /// Raw bytes, hashed as is.
    Bytes(&'a [u8]),
    /// UTF-16 code units. Transcoded to UTF-8 before hashing, which fails on
    /// unpaired surrogates.
    Utf16(&'a [u16]),
    /// A pre-hashed token code, used unchanged.
    Int(u32),
}

impl Token<'_> {
    pub fn is_int(&self) -> bool {
        matches!(self, Token::Int(_))
    }

    /// Name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Text(_) => "text",
            Token::Bytes(_) => "bytes",
            Token::Utf16(_) => "utf-16",
            Token::Int(_) => "integer",
        }
    }
}

/// Anything that can be viewed as a [`Token`].
pub trait AsToken {
    fn as_token(&self) -> Token<'_>;
}

impl AsToken for Token<'_> {
    fn as_token(&self) -> Token<'_> {
        *self
    }
}

impl AsToken for str {
    fn as_token(&self) -> Token<'_> {
        Token::Text(self)
    }
}

impl AsToken for String {
    fn as_token(&self) -> Token<'_> {
        Token::Text(self)
    }
}

impl AsToken for [u8] {
    fn as_token(&self) -> Token<'_> {
        Token::Bytes(self)
    }
}

impl AsToken for Vec<u8> {
    fn as_token(&self) -> Token<'_> {
        Token::Bytes(self)
    }
}

impl AsToken for [u16] {
    fn as_token(&self) -> Token<'_> {
        Token::Utf16(self)
    }
}

impl AsToken for u32 {
    fn as_token(&self) -> Token<'_> {
        Token::Int(*self)
    }
}

impl<T: AsToken + ?Sized> AsToken for &T {
    fn as_token(&self) -> Token<'_> {
        (**self).as_token()
    }
}
