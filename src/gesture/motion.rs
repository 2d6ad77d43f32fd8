//! Frame-difference motion detection.
//!
//! Two consecutive low-resolution frames are compared pixel by pixel; the centroid of the pixels
//! that changed, relative to the frame center, points in the direction of the motion.

use std::time::Duration;

use glam::Vec2;

use crate::entity::direction::Direction;
use crate::error::GestureError;

pub const FRAME_WIDTH: usize = 160;
pub const FRAME_HEIGHT: usize = 120;
/// How often the camera is sampled.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(120);

/// Summed RGB difference above which a pixel counts as moving.
const MOTION_THRESHOLD: u32 = 48;
/// Moving pixels needed before the centroid means anything.
const MIN_MOTION_COUNT: u32 = 40;
/// Centroid offsets within this many pixels of the center are ignored.
const DEAD_ZONE: f32 = 15.0;

/// Compares each RGBA frame to the one before it.
#[derive(Debug)]
pub struct MotionDetector {
    width: usize,
    height: usize,
    previous: Option<Vec<u8>>,
}

impl Default for MotionDetector {
    fn default() -> Self {
        Self::new(FRAME_WIDTH, FRAME_HEIGHT)
    }
}

impl MotionDetector {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            previous: None,
        }
    }

    fn frame_len(&self) -> usize {
        self.width * self.height * 4
    }

    /// Feeds one RGBA frame and returns the direction of motion since the previous one, if any.
    pub fn analyze(&mut self, frame: &[u8]) -> Result<Option<Direction>, GestureError> {
        if frame.len() != self.frame_len() {
            return Err(GestureError::FrameSize {
                found: frame.len(),
                expected: self.frame_len(),
                width: self.width,
                height: self.height,
            });
        }

        let center = Vec2::new(self.width as f32, self.height as f32) / 2.0;
        let direction = self
            .previous
            .as_deref()
            .and_then(|previous| motion_centroid(previous, frame, self.width))
            .and_then(|centroid| direction_from_offset(centroid - center));

        match &mut self.previous {
            Some(previous) => previous.copy_from_slice(frame),
            None => self.previous = Some(frame.to_vec()),
        }

        Ok(direction)
    }
}

/// The mean position of all moving pixels, or `None` if too few moved.
fn motion_centroid(previous: &[u8], current: &[u8], width: usize) -> Option<Vec2> {
    let mut sum = (0u64, 0u64);
    let mut count = 0u32;

    for (index, (old, new)) in previous.chunks_exact(4).zip(current.chunks_exact(4)).enumerate() {
        let diff: u32 = old[..3].iter().zip(&new[..3]).map(|(a, b)| a.abs_diff(*b) as u32).sum();
        if diff > MOTION_THRESHOLD {
            sum.0 += (index % width) as u64;
            sum.1 += (index / width) as u64;
            count += 1;
        }
    }

    (count > MIN_MOTION_COUNT).then(|| Vec2::new(sum.0 as f32, sum.1 as f32) / count as f32)
}

/// Horizontal offsets win when they dominate; screen Y grows downward.
fn direction_from_offset(offset: Vec2) -> Option<Direction> {
    if offset.x.abs() > offset.y.abs() && offset.x.abs() > DEAD_ZONE {
        Some(if offset.x > 0.0 { Direction::Right } else { Direction::Left })
    } else if offset.y.abs() > DEAD_ZONE {
        Some(if offset.y > 0.0 { Direction::Down } else { Direction::Up })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> Vec<u8> {
        vec![0; FRAME_WIDTH * FRAME_HEIGHT * 4]
    }

    /// A blank frame with a white rectangle covering `x` by `y`.
    fn with_patch(x: std::ops::Range<usize>, y: std::ops::Range<usize>) -> Vec<u8> {
        let mut frame = blank();
        for row in y {
            for col in x.clone() {
                let offset = (row * FRAME_WIDTH + col) * 4;
                frame[offset..offset + 4].copy_from_slice(&[255, 255, 255, 255]);
            }
        }
        frame
    }

    #[test]
    fn test_first_frame_only_primes() {
        let mut detector = MotionDetector::default();
        assert_eq!(detector.analyze(&with_patch(140..150, 55..65)).unwrap(), None);
    }

    #[test]
    fn test_motion_on_the_right() {
        let mut detector = MotionDetector::default();
        detector.analyze(&blank()).unwrap();
        assert_eq!(detector.analyze(&with_patch(140..150, 55..65)).unwrap(), Some(Direction::Right));
    }

    #[test]
    fn test_motion_below_center() {
        let mut detector = MotionDetector::default();
        detector.analyze(&blank()).unwrap();
        assert_eq!(detector.analyze(&with_patch(75..85, 100..110)).unwrap(), Some(Direction::Down));
    }

    #[test]
    fn test_motion_near_center_is_ignored() {
        let mut detector = MotionDetector::default();
        detector.analyze(&blank()).unwrap();
        assert_eq!(detector.analyze(&with_patch(75..85, 55..65)).unwrap(), None);
    }

    #[test]
    fn test_too_few_moving_pixels() {
        let mut detector = MotionDetector::default();
        detector.analyze(&blank()).unwrap();
        // 5x8 = 40 pixels: not more than the minimum.
        assert_eq!(detector.analyze(&with_patch(0..5, 0..8)).unwrap(), None);
    }

    #[test]
    fn test_small_differences_do_not_count() {
        let mut detector = MotionDetector::default();
        detector.analyze(&blank()).unwrap();
        // 16 per channel sums to exactly the threshold.
        let dim = vec![16u8; FRAME_WIDTH * FRAME_HEIGHT * 4];
        assert_eq!(detector.analyze(&dim).unwrap(), None);
    }

    #[test]
    fn test_compares_against_latest_frame() {
        let mut detector = MotionDetector::default();
        let patch = with_patch(0..10, 55..65);
        detector.analyze(&blank()).unwrap();
        assert_eq!(detector.analyze(&patch).unwrap(), Some(Direction::Left));
        assert_eq!(detector.analyze(&patch).unwrap(), None);
    }

    #[test]
    fn test_wrong_frame_size() {
        let mut detector = MotionDetector::default();
        let err = detector.analyze(&[0; 16]).unwrap_err();
        assert_eq!(
            err,
            GestureError::FrameSize {
                found: 16,
                expected: 76_800,
                width: 160,
                height: 120,
            }
        );
    }
}
