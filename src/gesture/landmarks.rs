//! Static hand-pose classification from tracked landmarks.
//!
//! Landmarks follow the common 21-point hand model in normalized image coordinates (0..1, Y down).

use bitflags::bitflags;
use glam::Vec2;

use crate::entity::direction::Direction;
use crate::error::GestureError;

pub const LANDMARK_COUNT: usize = 21;

const WRIST: usize = 0;
const THUMB_MCP: usize = 2;
const THUMB_TIP: usize = 4;
const INDEX_PIP: usize = 6;
const INDEX_TIP: usize = 8;
const MIDDLE_PIP: usize = 10;
const MIDDLE_TIP: usize = 12;
const RING_PIP: usize = 14;
const RING_TIP: usize = 16;
const PINKY_PIP: usize = 18;
const PINKY_TIP: usize = 20;

/// Minimum tip-to-MCP distance for the thumb to count as extended.
const THUMB_EXTENDED_LENGTH: f32 = 0.04;
/// How far the thumb tip must sit above or below the wrist for a thumbs up/down.
const THUMB_VERTICAL_MARGIN: f32 = 0.02;

bitflags! {
    /// Which fingers are extended.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Fingers: u8 {
        const THUMB = 1 << 0;
        const INDEX = 1 << 1;
        const MIDDLE = 1 << 2;
        const RING = 1 << 3;
        const PINKY = 1 << 4;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLandmarks([Vec2; LANDMARK_COUNT]);

impl HandLandmarks {
    pub fn new(points: [Vec2; LANDMARK_COUNT]) -> Self {
        Self(points)
    }

    pub fn from_slice(points: &[Vec2]) -> Result<Self, GestureError> {
        let points: [Vec2; LANDMARK_COUNT] = points.try_into().map_err(|_| GestureError::LandmarkCount {
            found: points.len(),
            expected: LANDMARK_COUNT,
        })?;
        Ok(Self(points))
    }

    pub fn extended_fingers(&self) -> Fingers {
        let p = &self.0;
        let mut fingers = Fingers::empty();

        // A finger is extended when its tip is higher in the image than its middle joint.
        for (flag, tip, pip) in [
            (Fingers::INDEX, INDEX_TIP, INDEX_PIP),
            (Fingers::MIDDLE, MIDDLE_TIP, MIDDLE_PIP),
            (Fingers::RING, RING_TIP, RING_PIP),
            (Fingers::PINKY, PINKY_TIP, PINKY_PIP),
        ] {
            fingers.set(flag, p[tip].y < p[pip].y);
        }
        fingers.set(Fingers::THUMB, p[THUMB_TIP].distance(p[THUMB_MCP]) > THUMB_EXTENDED_LENGTH);

        fingers
    }

    /// Maps the pose to a direction.
    ///
    /// Open hand is Right, a peace sign (thumb ignored) is Left, a lone thumb pointing up or down is
    /// Up or Down. Anything else is no gesture.
    pub fn classify(&self) -> Option<Direction> {
        let fingers = self.extended_fingers();
        let others = fingers - Fingers::THUMB;

        if fingers == Fingers::all() {
            return Some(Direction::Right);
        }
        if others == Fingers::INDEX | Fingers::MIDDLE {
            return Some(Direction::Left);
        }
        if fingers == Fingers::THUMB {
            let (thumb, wrist) = (self.0[THUMB_TIP].y, self.0[WRIST].y);
            if thumb < wrist - THUMB_VERTICAL_MARGIN {
                return Some(Direction::Up);
            }
            if thumb > wrist + THUMB_VERTICAL_MARGIN {
                return Some(Direction::Down);
            }
        }
        None
    }
}
