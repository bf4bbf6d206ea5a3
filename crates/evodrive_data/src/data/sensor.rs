use serde::{Deserialize, Serialize};

/// Surface category reported by a sensing ray.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum SurfaceTag {
    /// Drivable track surface.
    Track,
    /// Walls and anything past the track edge.
    OutOfBounds,
    /// A checkpoint the vehicle has not yet collected.
    Milestone,
    /// Nothing hit, or an untagged collider.
    #[default]
    Unknown,
}

impl SurfaceTag {
    /// Numeric value fed to the policy network.
    #[must_use]
    pub fn value(self) -> f32 {
        match self {
            Self::Track => 1.0,
            Self::OutOfBounds => -1.0,
            Self::Milestone => 2.0,
            Self::Unknown => 0.0,
        }
    }

    /// Inverse of [`SurfaceTag::value`]; any unrecognised value is `Unknown`.
    #[must_use]
    pub fn from_value(value: f32) -> Self {
        if value == 1.0 {
            Self::Track
        } else if value == -1.0 {
            Self::OutOfBounds
        } else if value == 2.0 {
            Self::Milestone
        } else {
            Self::Unknown
        }
    }
}

/// Result of casting one sensing ray.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub tag: SurfaceTag,
}

impl RayHit {
    /// A ray that found nothing within `max_range`.
    #[must_use]
    pub fn miss(max_range: f32) -> Self {
        Self {
            distance: max_range,
            tag: SurfaceTag::Unknown,
        }
    }

    /// Interleaves hits into the `[distance, tag]` sensor frame.
    #[must_use]
    pub fn flatten(hits: &[RayHit]) -> Vec<f32> {
        hits.iter()
            .flat_map(|h| [h.distance, h.tag.value()])
            .collect()
    }
}
