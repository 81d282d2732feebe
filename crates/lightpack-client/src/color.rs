//! Colour values sent with `setcolor`.
//!
//! The protocol carries colours as decimal `r,g,b` triples, 8 bits per
//! channel. No colour-space conversion happens here; anything that can
//! produce an 8-bit RGB triple implements [`ToRgb255`].

use std::fmt;
use std::str::FromStr;

use crate::error::ParseColorError;

/// Anything that can be expressed as an 8-bit-per-channel RGB triple.
pub trait ToRgb255 {
    fn to_rgb255(&self) -> (u8, u8, u8);
}

/// An 8-bit-per-channel RGB colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl ToRgb255 for Rgb {
    fn to_rgb255(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl ToRgb255 for (u8, u8, u8) {
    fn to_rgb255(&self) -> (u8, u8, u8) {
        *self
    }
}

impl ToRgb255 for [u8; 3] {
    fn to_rgb255(&self) -> (u8, u8, u8) {
        (self[0], self[1], self[2])
    }
}

impl<T: ToRgb255 + ?Sized> ToRgb255 for &T {
    fn to_rgb255(&self) -> (u8, u8, u8) {
        (**self).to_rgb255()
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Wire form: `r,g,b`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Accepts `#RRGGBB`, `RRGGBB`, `r,g,b` (decimal) and a few names.
impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let err = |reason: &str| ParseColorError {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        match input.to_ascii_lowercase().as_str() {
            "red" => return Ok(Rgb::new(255, 0, 0)),
            "green" => return Ok(Rgb::new(0, 255, 0)),
            "blue" => return Ok(Rgb::new(0, 0, 255)),
            "white" => return Ok(Rgb::WHITE),
            "orange" => return Ok(Rgb::new(255, 128, 0)),
            "yellow" => return Ok(Rgb::new(255, 255, 0)),
            "purple" => return Ok(Rgb::new(128, 0, 255)),
            "cyan" => return Ok(Rgb::new(0, 255, 255)),
            "off" | "black" => return Ok(Rgb::BLACK),
            _ => {}
        }

        if input.contains(',') {
            let parts: Vec<&str> = input.split(',').map(str::trim).collect();
            let [r, g, b] = parts.as_slice() else {
                return Err(err("expected three comma-separated channels"));
            };
            let channel = |v: &str| {
                v.parse::<u8>()
                    .map_err(|_| err(&format!("channel {v:?} is not in 0..=255")))
            };
            return Ok(Rgb::new(channel(*r)?, channel(*g)?, channel(*b)?));
        }

        let hex = input.strip_prefix('#').unwrap_or(input);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err("expected six hex digits"));
        }
        let val = u32::from_str_radix(hex, 16).map_err(|_| err("not a hex number"))?;
        Ok(Rgb::new((val >> 16) as u8, (val >> 8) as u8, val as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_and_array_adapt() {
        assert_eq!((1u8, 2u8, 3u8).to_rgb255(), (1, 2, 3));
        assert_eq!([4u8, 5, 6].to_rgb255(), (4, 5, 6));
        assert_eq!(Rgb::new(7, 8, 9).to_rgb255(), (7, 8, 9));
        assert_eq!((&Rgb::new(7, 8, 9)).to_rgb255(), (7, 8, 9));
    }

    #[test]
    fn display_is_wire_form() {
        assert_eq!(Rgb::new(255, 0, 16).to_string(), "255,0,16");
    }

    #[test]
    fn parse_hex() {
        assert_eq!("#FF8000".parse::<Rgb>().unwrap(), Rgb::new(255, 128, 0));
        assert_eq!("00ff00".parse::<Rgb>().unwrap(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn parse_decimal_triple() {
        assert_eq!("10, 20,30".parse::<Rgb>().unwrap(), Rgb::new(10, 20, 30));
    }

    #[test]
    fn parse_named_case_insensitive() {
        assert_eq!("Red".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!("OFF".parse::<Rgb>().unwrap(), Rgb::BLACK);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!("#FFF".parse::<Rgb>().is_err());
        assert!("#GG0000".parse::<Rgb>().is_err());
        assert!("+FFFFF".parse::<Rgb>().is_err());
        assert!("#-FFFFF".parse::<Rgb>().is_err());
        assert!("256,0,0".parse::<Rgb>().is_err());
        assert!("1,2".parse::<Rgb>().is_err());
        assert!("chartreuse".parse::<Rgb>().is_err());
    }
}
