//! `#RRGGBB` colour values attached to shapes and classes.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// A 24-bit colour in `#RRGGBB` form, stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorHex(String);

impl ColorHex {
    /// Draw a colour with one uniformly random hex digit per nibble.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut s = String::with_capacity(7);
        s.push('#');
        for _ in 0..6 {
            s.push(HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char);
        }
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue channels.
    pub fn rgb(&self) -> [u8; 3] {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        [channel(1), channel(3), channel(5)]
    }
}

impl FromStr for ColorHex {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').ok_or_else(|| InvalidColor(s.to_string()))?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidColor(s.to_string()));
        }
        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }
}

impl TryFrom<String> for ColorHex {
    type Error = InvalidColor;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ColorHex> for String {
    fn from(color: ColorHex) -> Self {
        color.0
    }
}

impl fmt::Display for ColorHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for ColorHex {
    fn default() -> Self {
        Self(crate::constants::DEFAULT_COLOR.to_string())
    }
}

/// A string that is not a `#RRGGBB` colour.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid colour '{0}', expected #RRGGBB")]
pub struct InvalidColor(pub String);
