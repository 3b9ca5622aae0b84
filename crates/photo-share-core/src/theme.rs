// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Theme palettes

use crate::types::AppTheme;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid hex colour: {0}")]
pub struct ParseColorError(pub String);

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// From a packed 0xAARRGGBB value
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#AARRGGBB`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let digits = hex.trim().trim_start_matches('#');
        let err = || ParseColorError(hex.to_string());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| err())?;

        match digits.len() {
            3 => {
                let expand = |n: u32| ((n & 0xF) * 17) as u8;
                Ok(Self::rgb(expand(value >> 8), expand(value >> 4), expand(value)))
            }
            6 => Ok(Self::from_argb(0xFF00_0000 | value)),
            8 => Ok(Self::from_argb(value)),
            _ => Err(err()),
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xFF {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}

/// Colour roles every palette provides
pub trait ThemeColors: Send + Sync {
    fn theme(&self) -> AppTheme;
    fn accent(&self) -> Rgba;
    fn primary_text(&self) -> Rgba;
    fn secondary_text(&self) -> Rgba;
    fn background(&self) -> Rgba;
    fn card_background(&self) -> Rgba;
    fn overlay(&self) -> Rgba;
    fn favorite_active(&self) -> Rgba;
    fn save(&self) -> Rgba;
    fn delete(&self) -> Rgba;
    fn shadow(&self) -> Rgba;
}

/// Light green palette
#[derive(Debug, Clone, Copy, Default)]
pub struct SpringTheme;

impl ThemeColors for SpringTheme {
    fn theme(&self) -> AppTheme {
        AppTheme::Spring
    }
    fn accent(&self) -> Rgba {
        Rgba::rgb(0x33, 0xB3, 0x66)
    }
    fn primary_text(&self) -> Rgba {
        Rgba::rgb(0x4D, 0x99, 0x80)
    }
    fn secondary_text(&self) -> Rgba {
        Rgba::rgb(0x66, 0x99, 0x80)
    }
    fn background(&self) -> Rgba {
        Rgba::rgb(0xFA, 0xFF, 0xF2)
    }
    fn card_background(&self) -> Rgba {
        Rgba::rgb(0xF7, 0xFC, 0xF5)
    }
    fn overlay(&self) -> Rgba {
        Rgba::from_argb(0x6600_0000)
    }
    fn favorite_active(&self) -> Rgba {
        Rgba::rgb(0xFF, 0xCC, 0x00)
    }
    fn save(&self) -> Rgba {
        Rgba::rgb(0x33, 0xCC, 0x66)
    }
    fn delete(&self) -> Rgba {
        Rgba::rgb(0xFF, 0x99, 0x99)
    }
    fn shadow(&self) -> Rgba {
        Rgba::rgb(0x1A, 0x99, 0xCC).with_alpha(0x26)
    }
}

/// Dark palette with a blue accent
#[derive(Debug, Clone, Copy, Default)]
pub struct SleekTheme;

impl ThemeColors for SleekTheme {
    fn theme(&self) -> AppTheme {
        AppTheme::Sleek
    }
    fn accent(&self) -> Rgba {
        Rgba::rgb(0x00, 0x7A, 0xFF)
    }
    fn primary_text(&self) -> Rgba {
        Rgba::rgb(0xF2, 0xF2, 0xF2)
    }
    fn secondary_text(&self) -> Rgba {
        Rgba::rgb(0xCC, 0xCC, 0xCC)
    }
    fn background(&self) -> Rgba {
        Rgba::rgb(0x0D, 0x0D, 0x0D)
    }
    fn card_background(&self) -> Rgba {
        Rgba::rgb(0x26, 0x26, 0x26)
    }
    fn overlay(&self) -> Rgba {
        Rgba::from_argb(0xB300_0000)
    }
    fn favorite_active(&self) -> Rgba {
        Rgba::rgb(0xFF, 0xCC, 0x00)
    }
    fn save(&self) -> Rgba {
        Rgba::rgb(0x33, 0xCC, 0x33)
    }
    fn delete(&self) -> Rgba {
        Rgba::rgb(0xE6, 0x33, 0x33)
    }
    fn shadow(&self) -> Rgba {
        Rgba::from_argb(0x4D00_0000)
    }
}

static SPRING: SpringTheme = SpringTheme;
static SLEEK: SleekTheme = SleekTheme;

impl AppTheme {
    pub fn colors(&self) -> &'static dyn ThemeColors {
        match self {
            Self::Spring => &SPRING,
            Self::Sleek => &SLEEK,
        }
    }
}
