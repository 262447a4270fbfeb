//! Horizontal swipe recognition for the product page.

use serde::{Deserialize, Serialize};

/// Minimum horizontal velocity for a release to count as a swipe.
pub const SWIPE_VELOCITY_THRESHOLD: f64 = 0.5;

/// A drag sample as reported by the front end's gesture layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Swipe {
    /// Pointer is still pressed.
    pub down: bool,
    /// Horizontal offset since the drag started.
    pub movement_x: f64,
    /// Sign of the horizontal direction: positive is rightward.
    pub direction_x: f64,
    /// Horizontal velocity magnitude.
    pub velocity_x: f64,
}

impl Swipe {
    /// A released drag.
    pub fn released(direction_x: f64, velocity_x: f64) -> Self {
        Self {
            down: false,
            movement_x: 0.0,
            direction_x,
            velocity_x,
        }
    }

    pub fn intent(&self) -> Option<NavigationIntent> {
        if !self.down && self.velocity_x > SWIPE_VELOCITY_THRESHOLD && self.direction_x > 0.0 {
            Some(NavigationIntent::Back)
        } else {
            None
        }
    }

    /// How far the card should follow the finger while dragging.
    pub fn offset(&self) -> f64 {
        if self.down {
            self.movement_x
        } else {
            0.0
        }
    }
}

/// Navigation requested by a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationIntent {
    Back,
}
