// Percent-encoding for expanded values

use std::borrow::Cow;

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Characters left untouched when a value is written into the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// `A-Z a-z 0-9 - . _ ~`
    Unreserved,
    /// Unreserved plus `: / ? # [ ] @ ! $ & ' ( ) * + , ; =`
    Reserved,
}

impl Charset {
    pub fn for_reserved(allow_reserved: bool) -> Self {
        if allow_reserved {
            Charset::Reserved
        } else {
            Charset::Unreserved
        }
    }

    /// Percent-encode every byte outside this set as `%XX` (uppercase hex)
    pub fn encode<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            // urlencoding leaves exactly the unreserved set alone
            Charset::Unreserved => urlencoding::encode(value),
            Charset::Reserved => encode_reserved(value),
        }
    }
}

fn is_reserved_allowed(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'-' | b'.'
                | b'_'
                | b'~'
                | b':'
                | b'/'
                | b'?'
                | b'#'
                | b'['
                | b']'
                | b'@'
                | b'!'
                | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
        )
}

fn encode_reserved(value: &str) -> Cow<'_, str> {
    if value.bytes().all(is_reserved_allowed) {
        return Cow::Borrowed(value);
    }

    let mut encoded = String::with_capacity(value.len() * 3);
    for b in value.bytes() {
        if is_reserved_allowed(b) {
            encoded.push(b as char);
        } else {
            encoded.push('%');
            encoded.push(HEX[(b >> 4) as usize] as char);
            encoded.push(HEX[(b & 0x0F) as usize] as char);
        }
    }
    Cow::Owned(encoded)
}
