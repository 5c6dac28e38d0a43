//! URL token decoding.
//!
//! Impression URLs arrive as fragments of a JSON-ish cell and may still carry
//! backslash escapes (`\/`, `\u0026`, ...). `decode_url_escapes` resolves them
//! with an explicit grammar; `sanitize_url` additionally requires the result to
//! be an absolute http(s) URL.
//!
//! Decoding is not blindly idempotent: a decoded string without backslashes
//! decodes to itself, while one that still holds a backslash is decoded again
//! under the same grammar (or rejected). It is never altered silently.

use thiserror::Error;

/// Reasons a raw URL token cannot be dispatched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    /// Backslash followed by a character outside the escape grammar.
    #[error("invalid escape sequence `\\{0}` at byte {1}")]
    InvalidEscape(char, usize),

    /// The token ends in the middle of an escape sequence.
    #[error("unterminated escape sequence at byte {0}")]
    UnterminatedEscape(usize),

    /// `\u` not followed by four hex digits.
    #[error("invalid unicode escape at byte {0}")]
    InvalidUnicodeEscape(usize),

    /// A UTF-16 surrogate without its pair.
    #[error("unpaired surrogate \\u{0:04x} at byte {1}")]
    UnpairedSurrogate(u32, usize),

    /// Raw control characters are not allowed in a URL token.
    #[error("control character U+{0:04X} at byte {1}")]
    ControlCharacter(u32, usize),

    /// Decoded text is not an absolute URL.
    #[error("not an absolute URL: {0}")]
    InvalidUrl(String),

    /// Decoded URL uses a scheme other than http or https.
    #[error("unsupported scheme `{0}`")]
    UnsupportedScheme(String),
}

/// Resolves backslash escapes in a raw URL token.
///
/// Supported escapes: `\"` `\\` `\/` `\b` `\f` `\n` `\r` `\t` and `\uXXXX`
/// (UTF-16, surrogate pairs must be complete). Anything else is an error.
///
/// # Examples
///
/// ```
/// use impression_check::utils::decode_url_escapes;
///
/// let decoded = decode_url_escapes(r"https:\/\/px.example\/i?a=1&b=2").unwrap();
/// assert_eq!(decoded, "https://px.example/i?a=1&b=2");
/// ```
pub fn decode_url_escapes(raw: &str) -> Result<String, SanitizeError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c != '\\' {
            if (c as u32) < 0x20 {
                return Err(SanitizeError::ControlCharacter(c as u32, pos));
            }
            out.push(c);
            continue;
        }

        let Some((_, escaped)) = chars.next() else {
            return Err(SanitizeError::UnterminatedEscape(pos));
        };
        match escaped {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let unit = read_hex4(&mut chars, pos)?;
                out.push(decode_utf16_unit(unit, &mut chars, pos)?);
            }
            other => return Err(SanitizeError::InvalidEscape(other, pos)),
        }
    }

    Ok(out)
}

fn read_hex4(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    escape_pos: usize,
) -> Result<u32, SanitizeError> {
    let mut value = 0u32;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or(SanitizeError::InvalidUnicodeEscape(escape_pos))?;
        value = value * 16 + digit;
    }
    Ok(value)
}

fn decode_utf16_unit(
    unit: u32,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    escape_pos: usize,
) -> Result<char, SanitizeError> {
    match unit {
        0xD800..=0xDBFF => {
            // High surrogate: the next escape must be the matching low half
            let is_escape = matches!(chars.next(), Some((_, '\\')));
            let is_unicode = matches!(chars.next(), Some((_, 'u')));
            if !is_escape || !is_unicode {
                return Err(SanitizeError::UnpairedSurrogate(unit, escape_pos));
            }
            let low = read_hex4(chars, escape_pos)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(SanitizeError::UnpairedSurrogate(unit, escape_pos));
            }
            let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            char::from_u32(code).ok_or(SanitizeError::InvalidUnicodeEscape(escape_pos))
        }
        0xDC00..=0xDFFF => Err(SanitizeError::UnpairedSurrogate(unit, escape_pos)),
        _ if unit < 0x20 => Err(SanitizeError::ControlCharacter(unit, escape_pos)),
        _ => char::from_u32(unit).ok_or(SanitizeError::InvalidUnicodeEscape(escape_pos)),
    }
}

/// Decodes a raw URL token and checks it is an absolute http(s) URL.
///
/// Returns the decoded text itself, not the `url` crate's normalized
/// serialization, so failure reports show what the input actually contained.
pub fn sanitize_url(raw: &str) -> Result<String, SanitizeError> {
    let decoded = decode_url_escapes(raw.trim())?;
    let parsed = url::Url::parse(&decoded)
        .map_err(|e| SanitizeError::InvalidUrl(format!("{decoded} ({e})")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(decoded),
        other => Err(SanitizeError::UnsupportedScheme(other.to_string())),
    }
}
