//! Webcam gesture input.
//!
//! Two independent recognizers turn camera data into directions: a frame-difference motion detector
//! and a hand-pose classifier fed by an external landmark tracker. Both share one cooldown and steer
//! through the same [`InputAdapter`] the keyboard uses. Camera capture and landmark inference live
//! outside this crate; callers push frames or landmarks in with a timestamp.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::entity::direction::Direction;
use crate::error::GestureError;
use crate::input::InputAdapter;

pub mod landmarks;
pub mod motion;
pub mod stabilizer;

use self::landmarks::HandLandmarks;
use self::motion::MotionDetector;
use self::stabilizer::Stabilizer;

/// Minimum time between two gesture-triggered direction changes.
pub const COOLDOWN: Duration = Duration::from_millis(300);

/// Rate limiter keyed on caller-supplied timestamps.
#[derive(Debug, Clone, Copy)]
pub struct Cooldown {
    period: Duration,
    last: Option<Duration>,
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(COOLDOWN)
    }
}

impl Cooldown {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// Whether strictly more than the period has passed since the last firing.
    pub fn is_ready(&self, at: Duration) -> bool {
        self.last.is_none_or(|last| at.saturating_sub(last) > self.period)
    }

    pub fn fire(&mut self, at: Duration) {
        self.last = Some(at);
    }
}

/// What the recognizers last saw, for display next to the camera feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    Motion(Direction),
    Hand(Direction),
    NoHand,
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detection::Motion(direction) => write!(f, "Motion: {}", direction.as_char()),
            Detection::Hand(direction) => write!(f, "MP: {}", direction.as_char()),
            Detection::NoHand => f.write_str("No hand"),
        }
    }
}

/// Receives status updates. Presentation only.
pub type StatusSink = Box<dyn FnMut(&Detection) + Send>;

/// Feeds gesture recognitions into an [`InputAdapter`].
pub struct GestureAdapter<A: InputAdapter> {
    target: A,
    motion: MotionDetector,
    stabilizer: Stabilizer,
    cooldown: Cooldown,
    status: Option<Detection>,
    status_sink: Option<StatusSink>,
}

impl<A: InputAdapter> GestureAdapter<A> {
    pub fn new(target: A) -> Self {
        Self {
            target,
            motion: MotionDetector::default(),
            stabilizer: Stabilizer::default(),
            cooldown: Cooldown::default(),
            status: None,
            status_sink: None,
        }
    }

    pub fn with_status_sink(mut self, sink: impl FnMut(&Detection) + Send + 'static) -> Self {
        self.status_sink = Some(Box::new(sink));
        self
    }

    /// Feeds one RGBA motion frame captured at `at`. Frames are expected every
    /// [`motion::SAMPLE_INTERVAL`].
    ///
    /// Returns the direction sent to the target, if any. Malformed frames are rejected without
    /// disturbing the detector.
    pub fn on_motion_frame(&mut self, frame: &[u8], at: Duration) -> Result<Option<Direction>, GestureError> {
        let candidate = self.motion.analyze(frame).inspect_err(|e| debug!("Rejected gesture frame: {e}"))?;

        match candidate {
            Some(direction) if self.cooldown.is_ready(at) => {
                self.cooldown.fire(at);
                self.emit(Detection::Motion(direction), direction);
                Ok(Some(direction))
            }
            _ => Ok(None),
        }
    }

    /// Feeds the tracker's result for one camera frame: the first detected hand, or `None`.
    pub fn on_hand(&mut self, hand: Option<&HandLandmarks>, at: Duration) -> Option<Direction> {
        let Some(hand) = hand else {
            self.stabilizer.push(None);
            self.report(Detection::NoHand);
            return None;
        };

        let direction = self.stabilizer.push(hand.classify())?;
        if !self.cooldown.is_ready(at) {
            return None;
        }

        self.cooldown.fire(at);
        self.stabilizer.clear();
        self.emit(Detection::Hand(direction), direction);
        Some(direction)
    }

    fn emit(&mut self, detection: Detection, direction: Direction) {
        self.target.request_direction(direction);
        self.report(detection);
    }

    fn report(&mut self, detection: Detection) {
        if self.status != Some(detection) {
            debug!(status = %detection, "Gesture status");
        }
        self.status = Some(detection);
        if let Some(sink) = self.status_sink.as_mut() {
            sink(&detection);
        }
    }

    /// The most recent status, if anything has been recognized yet.
    pub fn status(&self) -> Option<Detection> {
        self.status
    }

    pub fn into_inner(self) -> A {
        self.target
    }
}
