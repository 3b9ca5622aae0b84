// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Drag-to-direction classification
//
// Offsets are in screen coordinates: x grows right, y grows down.
// A hysteresis gap between the center zone and the directional ring keeps
// the target from flickering while a drag hovers near the center.

use crate::direction::ShareDirection;
use crate::photo::PhotoItem;

/// Drags at or inside this radius target every recipient
pub const CENTER_ZONE_RADIUS: f64 = 50.0;

/// Drags beyond this radius target a single direction
pub const DIRECTION_ZONE_RADIUS: f64 = 80.0;

/// A 2D drag displacement or position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle of the vector in degrees, normalized to [0, 360)
    pub fn angle_degrees(&self) -> f64 {
        self.y.atan2(self.x).to_degrees().rem_euclid(360.0)
    }
}

/// Outcome of classifying a drag offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// Dead zone; releasing does nothing
    None,
    /// Center zone; releasing shares with every recipient
    All,
    /// Directional zone; releasing shares with the recipient in that slot
    Direction(ShareDirection),
}

/// Classify a drag offset into a target zone
pub fn classify(offset: Vector2) -> DragTarget {
    let distance = offset.length();

    if distance <= CENTER_ZONE_RADIUS {
        DragTarget::All
    } else if distance > DIRECTION_ZONE_RADIUS {
        DragTarget::Direction(direction_for_angle(offset.angle_degrees()))
    } else {
        DragTarget::None
    }
}

/// Bucket a screen-space angle (0 = pointing right, clockwise) into a 45 degree sector.
///
/// Sector ranges are half-open, so a boundary angle belongs to the sector
/// clockwise of it.
pub fn direction_for_angle(degrees: f64) -> ShareDirection {
    let degrees = degrees.rem_euclid(360.0);

    if !(22.5..337.5).contains(&degrees) {
        ShareDirection::Right
    } else if degrees < 67.5 {
        ShareDirection::BottomRight
    } else if degrees < 112.5 {
        ShareDirection::Bottom
    } else if degrees < 157.5 {
        ShareDirection::BottomLeft
    } else if degrees < 202.5 {
        ShareDirection::Left
    } else if degrees < 247.5 {
        ShareDirection::TopLeft
    } else if degrees < 292.5 {
        ShareDirection::Top
    } else {
        ShareDirection::TopRight
    }
}

/// Transient gesture state for the photo being dragged
#[derive(Debug, Clone, Default)]
pub struct DragState {
    pub is_dragging: bool,
    pub current_photo: Option<PhotoItem>,
    pub start_position: Vector2,
    pub offset: Vector2,
    pub target: Option<DragTarget>,
}

impl DragState {
    pub fn start(&mut self, photo: PhotoItem, position: Vector2) {
        self.is_dragging = true;
        self.current_photo = Some(photo);
        self.start_position = position;
        self.offset = Vector2::ZERO;
        self.target = None;
    }

    /// Record a new offset and its already-resolved target.
    /// Ignored when no drag is in progress.
    pub fn update(&mut self, offset: Vector2, target: DragTarget) {
        if !self.is_dragging {
            return;
        }
        self.offset = offset;
        self.target = Some(target);
    }

    pub fn is_targeting_all(&self) -> bool {
        self.target == Some(DragTarget::All)
    }

    pub fn target_direction(&self) -> Option<ShareDirection> {
        match self.target {
            Some(DragTarget::Direction(direction)) => Some(direction),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polar(distance: f64, degrees: f64) -> Vector2 {
        let radians = degrees.to_radians();
        Vector2::new(distance * radians.cos(), distance * radians.sin())
    }

    #[test]
    fn test_center_zone_ignores_angle() {
        for step in 0..72 {
            let degrees = step as f64 * 5.0;
            for distance in [0.0, 10.0, 49.9] {
                assert_eq!(classify(polar(distance, degrees)), DragTarget::All);
            }
        }
        assert_eq!(classify(Vector2::new(50.0, 0.0)), DragTarget::All);
        assert_eq!(classify(Vector2::new(-30.0, 40.0)), DragTarget::All);
    }

    #[test]
    fn test_dead_zone() {
        assert_eq!(classify(Vector2::new(51.0, 0.0)), DragTarget::None);
        assert_eq!(classify(Vector2::new(0.0, -80.0)), DragTarget::None);
        assert_eq!(classify(polar(65.0, 200.0)), DragTarget::None);
    }

    #[test]
    fn test_cardinal_vectors() {
        let cases = [
            (Vector2::new(0.0, -100.0), ShareDirection::Top),
            (Vector2::new(0.0, 100.0), ShareDirection::Bottom),
            (Vector2::new(100.0, 0.0), ShareDirection::Right),
            (Vector2::new(-100.0, 0.0), ShareDirection::Left),
            (Vector2::new(100.0, -100.0), ShareDirection::TopRight),
            (Vector2::new(-100.0, -100.0), ShareDirection::TopLeft),
            (Vector2::new(100.0, 100.0), ShareDirection::BottomRight),
            (Vector2::new(-100.0, 100.0), ShareDirection::BottomLeft),
        ];
        for (offset, expected) in cases {
            assert_eq!(classify(offset), DragTarget::Direction(expected), "{:?}", offset);
        }
    }

    #[test]
    fn test_sector_sweep_matches_table() {
        let table = [
            (0.0, ShareDirection::Right),
            (45.0, ShareDirection::BottomRight),
            (90.0, ShareDirection::Bottom),
            (135.0, ShareDirection::BottomLeft),
            (180.0, ShareDirection::Left),
            (225.0, ShareDirection::TopLeft),
            (270.0, ShareDirection::Top),
            (315.0, ShareDirection::TopRight),
        ];
        for (center, expected) in table {
            for delta in [-22.0, -10.0, 0.0, 10.0, 22.0] {
                let degrees = center + delta;
                assert_eq!(
                    classify(polar(120.0, degrees)),
                    DragTarget::Direction(expected),
                    "angle {}",
                    degrees
                );
            }
        }
    }

    #[test]
    fn test_boundaries_resolve_clockwise() {
        assert_eq!(direction_for_angle(22.5), ShareDirection::BottomRight);
        assert_eq!(direction_for_angle(67.5), ShareDirection::Bottom);
        assert_eq!(direction_for_angle(247.5), ShareDirection::Top);
        assert_eq!(direction_for_angle(292.5), ShareDirection::TopRight);
        assert_eq!(direction_for_angle(337.5), ShareDirection::Right);
        assert_eq!(direction_for_angle(-90.0), ShareDirection::Top);
        assert_eq!(direction_for_angle(360.0), ShareDirection::Right);
    }

    #[test]
    fn test_drag_state_lifecycle() {
        let photo = PhotoItem::library(
            "a",
            chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        );
        let mut state = DragState::default();

        // Updates before a drag starts are ignored
        state.update(Vector2::new(0.0, -100.0), DragTarget::Direction(ShareDirection::Top));
        assert!(state.target.is_none());

        state.start(photo, Vector2::new(10.0, 10.0));
        state.update(Vector2::new(0.0, 0.0), DragTarget::All);
        assert!(state.is_targeting_all());

        state.update(Vector2::new(0.0, -100.0), DragTarget::Direction(ShareDirection::Top));
        assert_eq!(state.target_direction(), Some(ShareDirection::Top));
        assert!(!state.is_targeting_all());

        state.reset();
        assert!(!state.is_dragging);
        assert!(state.current_photo.is_none());
        assert_eq!(state.offset, Vector2::ZERO);
    }
}
