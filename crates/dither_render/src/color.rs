use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::DitherError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for Rgb {
    type Err = DitherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DitherError::InvalidColor(s.to_owned());

        let digits = match s.strip_prefix('#').or_else(|| s.strip_prefix("0x")) {
            Some(digits) => digits,
            None => return Err(invalid()),
        };

        if !digits.is_ascii() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            // Shorthand `#rgb` expands each nibble, `#abc` == `#aabbcc`.
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).map(|v| v * 0x11);
                let (r, g, b) = (nibble(0), nibble(1), nibble(2));
                match (r, g, b) {
                    (Ok(r), Ok(g), Ok(b)) => Ok(Rgb::new(r, g, b)),
                    _ => Err(invalid()),
                }
            },
            6 => {
                let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                Ok(Rgb::new((value >> 16) as u8, (value >> 8) as u8, value as u8))
            },
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}
