// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Compass directions
//
// Eight fixed share slots around the photo being distributed.
// Angles follow screen coordinates: top is 0 degrees, growing clockwise.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight compass slots a recipient can be assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShareDirection {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ShareDirection {
    /// All directions in assignment priority order: straight edges first, then diagonals
    pub const ALL: [ShareDirection; 8] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Stable identifier, also used for serialization and CLI parsing
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::TopLeft => "topLeft",
            Self::TopRight => "topRight",
            Self::BottomLeft => "bottomLeft",
            Self::BottomRight => "bottomRight",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::TopRight => "Top right",
            Self::Right => "Right",
            Self::BottomRight => "Bottom right",
            Self::Bottom => "Bottom",
            Self::BottomLeft => "Bottom left",
            Self::Left => "Left",
            Self::TopLeft => "Top left",
        }
    }

    /// Emoji arrow for compact labels
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Top => "⬆️",
            Self::TopRight => "↗️",
            Self::Right => "➡️",
            Self::BottomRight => "↘️",
            Self::Bottom => "⬇️",
            Self::BottomLeft => "↙️",
            Self::Left => "⬅️",
            Self::TopLeft => "↖️",
        }
    }

    /// Symbolic icon name
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Top => "arrow.up",
            Self::TopRight => "arrow.up.right",
            Self::Right => "arrow.right",
            Self::BottomRight => "arrow.down.right",
            Self::Bottom => "arrow.down",
            Self::BottomLeft => "arrow.down.left",
            Self::Left => "arrow.left",
            Self::TopLeft => "arrow.up.left",
        }
    }

    /// Angular position in degrees, clockwise from top
    pub fn angle_degrees(&self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::TopRight => 45.0,
            Self::Right => 90.0,
            Self::BottomRight => 135.0,
            Self::Bottom => 180.0,
            Self::BottomLeft => 225.0,
            Self::Left => 270.0,
            Self::TopLeft => 315.0,
        }
    }

    /// Unit offset toward this slot in screen coordinates (y grows downward)
    pub fn offset_multiplier(&self) -> (f64, f64) {
        match self {
            Self::Top => (0.0, -1.0),
            Self::TopRight => (1.0, -1.0),
            Self::Right => (1.0, 0.0),
            Self::BottomRight => (1.0, 1.0),
            Self::Bottom => (0.0, 1.0),
            Self::BottomLeft => (-1.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::TopLeft => (-1.0, -1.0),
        }
    }

    /// Colour given to the recipient sitting in this slot
    pub fn recipient_color(&self) -> &'static str {
        match self {
            Self::Top => "#E85A5A",
            Self::TopRight => "#E87A3E",
            Self::Right => "#D4A65A",
            Self::BottomRight => "#6BB26B",
            Self::Bottom => "#4A8FB3",
            Self::BottomLeft => "#7A6BB2",
            Self::Left => "#B26BA8",
            Self::TopLeft => "#E85A99",
        }
    }
}

impl fmt::Display for ShareDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown direction: {0}")]
pub struct ParseDirectionError(pub String);

impl FromStr for ShareDirection {
    type Err = ParseDirectionError;

    /// Accepts camelCase, kebab-case and snake_case spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|d| d.as_str().to_lowercase() == normalized)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angles_are_distinct_multiples_of_45() {
        let mut angles: Vec<f64> = ShareDirection::ALL.iter().map(|d| d.angle_degrees()).collect();
        angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let expected: Vec<f64> = (0..8).map(|i| i as f64 * 45.0).collect();
        assert_eq!(angles, expected);
    }

    #[test]
    fn test_parse_accepts_common_spellings() {
        assert_eq!("top".parse::<ShareDirection>().unwrap(), ShareDirection::Top);
        assert_eq!("topLeft".parse::<ShareDirection>().unwrap(), ShareDirection::TopLeft);
        assert_eq!("bottom-right".parse::<ShareDirection>().unwrap(), ShareDirection::BottomRight);
        assert_eq!("BOTTOM_LEFT".parse::<ShareDirection>().unwrap(), ShareDirection::BottomLeft);
        assert!("north".parse::<ShareDirection>().is_err());
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_string(&ShareDirection::TopRight).unwrap();
        assert_eq!(json, "\"topRight\"");
    }
}
