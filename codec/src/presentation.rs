//! Text presentations of encoded bytes.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{CodecError, CodecResult};
use crate::limits::CodecLimits;
use crate::value::Value;
use crate::xdr_type::{self, XdrType};

/// How encoded bytes are presented to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// The XDR bytes unchanged.
    #[default]
    Raw,
    /// Lowercase hexadecimal.
    Hex,
    /// Standard base64 with padding.
    Base64,
}

impl Encoding {
    /// Returns the mode name accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Hex => "hex",
            Self::Base64 => "base64",
        }
    }

    /// Converts raw XDR bytes into this presentation.
    #[must_use]
    pub fn present(self, bytes: Vec<u8>) -> Vec<u8> {
        match self {
            Self::Raw => bytes,
            Self::Hex => hex::encode(bytes).into_bytes(),
            Self::Base64 => STANDARD.encode(bytes).into_bytes(),
        }
    }

    /// Converts presented input back into raw XDR bytes.
    ///
    /// Surrounding ASCII whitespace is ignored for the text presentations.
    pub fn parse(self, input: &[u8]) -> CodecResult<Vec<u8>> {
        let failed = |reason: String| CodecError::InvalidPresentation {
            encoding: self.name(),
            reason,
        };
        match self {
            Self::Raw => Ok(input.to_vec()),
            Self::Hex => hex::decode(trim_ascii(input)).map_err(|e| failed(e.to_string())),
            Self::Base64 => STANDARD
                .decode(trim_ascii(input))
                .map_err(|e| failed(e.to_string())),
        }
    }
}

impl FromStr for Encoding {
    type Err = CodecError;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "raw" => Ok(Self::Raw),
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            _ => Err(CodecError::InvalidEncoding {
                mode: mode.to_string(),
            }),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn trim_ascii(input: &[u8]) -> &[u8] {
    let start = input
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(input.len());
    let end = input
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &input[start..end]
}

/// Encodes `value` and presents the bytes in `mode`.
///
/// An unknown mode fails before the value is touched.
pub fn to_xdr_as<T: XdrType + ?Sized>(ty: &T, value: &Value, mode: &str) -> CodecResult<Vec<u8>> {
    let encoding: Encoding = mode.parse()?;
    Ok(encoding.present(xdr_type::encode(ty, value)?))
}

/// Parses `input` presented in `mode` and decodes it as `ty`.
pub fn from_xdr_as<T: XdrType + ?Sized>(
    ty: &T,
    input: &[u8],
    mode: &str,
    limits: &CodecLimits,
) -> CodecResult<Value> {
    let encoding: Encoding = mode.parse()?;
    let bytes = encoding.parse(input)?;
    xdr_type::decode(ty, &bytes, limits)
}
