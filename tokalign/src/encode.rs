//! Map token sequences to dense arrays of 32-bit codes.

use crate::{
    hash::{TokenHasher, SEED},
    AlignError, AsToken, Result, Sequence, Token,
};
use std::borrow::Cow;

/// An encoded token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoded {
    /// One code per token.
    pub codes: Sequence,
    /// UTF-8 byte length of every token, or `None` for integer input.
    pub byte_lens: Option<Vec<usize>>,
}

impl Encoded {
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Byte length of token `i`, when known.
    pub fn byte_len(&self, i: usize) -> Option<usize> {
        self.byte_lens.as_ref().map(|lens| lens[i])
    }
}

/// Encode a token sequence.
///
/// Integer sequences are copied unchanged. Otherwise every token is converted
/// to its UTF-8 bytes and hashed with seed 0.
pub fn encode<T: AsToken>(tokens: &[T], hasher: &dyn TokenHasher) -> Result<Encoded> {
    let Some(first) = tokens.first() else {
        return Ok(Encoded::default());
    };
    let expected = first.as_token();

    if expected.is_int() {
        let codes = tokens
            .iter()
            .enumerate()
            .map(|(index, t)| match t.as_token() {
                Token::Int(x) => Ok(x),
                found => Err(AlignError::InputType {
                    index,
                    expected: expected.kind(),
                    found: found.kind(),
                }),
            })
            .collect::<Result<_>>()?;
        return Ok(Encoded {
            codes,
            byte_lens: None,
        });
    }

    let mut codes = Vec::with_capacity(tokens.len());
    let mut byte_lens = Vec::with_capacity(tokens.len());
    for (index, t) in tokens.iter().enumerate() {
        let bytes = token_bytes(index, expected, t.as_token())?;
        codes.push(hasher.hash32(&bytes, SEED));
        byte_lens.push(bytes.len());
    }
    Ok(Encoded {
        codes,
        byte_lens: Some(byte_lens),
    })
}

fn token_bytes<'t>(index: usize, expected: Token, token: Token<'t>) -> Result<Cow<'t, [u8]>> {
    Ok(match token {
        Token::Text(s) => Cow::Borrowed(s.as_bytes()),
        Token::Bytes(b) => Cow::Borrowed(b),
        Token::Utf16(units) => Cow::Owned(
            String::from_utf16(units)
                .map_err(|e| AlignError::Encoding {
                    index,
                    reason: e.to_string(),
                })?
                .into_bytes(),
        ),
        Token::Int(_) => {
            return Err(AlignError::InputType {
                index,
                expected: expected.kind(),
                found: token.kind(),
            })
        }
    })
}
