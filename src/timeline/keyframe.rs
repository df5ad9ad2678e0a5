use std::fmt;

use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;
use crate::camera::pose::CameraPose;
use crate::params::snapshot::FieldParams;

/// Keyframe identifier, unique within a timeline.
///
/// Fresh ids come from the creation time in milliseconds, bumped past existing ids.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct KeyframeId(pub u64);

impl fmt::Display for KeyframeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Camera pose and full parameter snapshot at a point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    /// Identifier.
    pub id: KeyframeId,
    /// Position on the timeline, in seconds (`>= 0`).
    pub time_seconds: f64,
    /// Easing toward the next keyframe.
    #[serde(default)]
    pub easing: Ease,
    /// Camera pose.
    pub camera: CameraPose,
    /// Parameter snapshot.
    #[serde(default)]
    pub parameters: FieldParams,
}

impl Keyframe {
    /// Linear keyframe.
    pub fn new(
        id: KeyframeId,
        time_seconds: f64,
        camera: CameraPose,
        parameters: FieldParams,
    ) -> Self {
        Self {
            id,
            time_seconds,
            easing: Ease::Linear,
            camera,
            parameters,
        }
    }

    /// Builder-style easing override.
    pub fn with_easing(mut self, easing: Ease) -> Self {
        self.easing = easing;
        self
    }

    /// The pose and parameters this keyframe holds.
    pub fn sample(&self) -> TimelineSample {
        TimelineSample {
            camera: self.camera,
            params: self.parameters.clone(),
        }
    }
}

/// Result of evaluating a timeline at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineSample {
    /// Camera pose.
    pub camera: CameraPose,
    /// Parameter snapshot.
    pub params: FieldParams,
}
