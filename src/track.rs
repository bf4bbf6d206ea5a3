//! Headless corridor track.
//!
//! The vehicle starts at the origin facing `+x` inside a straight corridor
//! bounded by walls at `y = ±half_width` and a back wall at
//! `x = -start_margin`. Checkpoints are lines across the corridor every
//! `milestone_spacing` units and must be collected in order. Rays are cast
//! analytically against the walls and the next uncollected checkpoint.

use evodrive_core::config::AppConfig;
use evodrive_core::{EnvEvent, Environment, EvolutionError, Result};
use evodrive_data::{ActionTable, RayHit, SurfaceTag};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackConfig {
    pub half_width: f32,
    pub start_margin: f32,
    pub milestone_spacing: f32,
    pub milestone_count: u32,
    /// Maximum ray length; also the distance reported on a miss.
    pub sensor_range: f32,
    /// Angular spread of the ray fan, centred on the heading (radians).
    pub field_of_view: f32,
    pub acceleration: f32,
    /// Fraction of speed lost per second.
    pub drag: f32,
    pub max_speed: f32,
    /// Radians per second at full steering input.
    pub turn_rate: f32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            half_width: 4.0,
            start_margin: 2.0,
            milestone_spacing: 10.0,
            milestone_count: 20,
            sensor_range: 15.0,
            field_of_view: PI,
            acceleration: 8.0,
            drag: 0.5,
            max_speed: 12.0,
            turn_rate: 2.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    /// Radians, counter-clockwise from `+x`.
    pub heading: f32,
}

pub struct Track {
    config: TrackConfig,
    ray_count: usize,
    actions: ActionTable,
    pose: Pose,
    speed: f32,
    collected: u32,
}

impl Track {
    pub fn new(config: TrackConfig, ray_count: usize, actions: ActionTable) -> Result<Self> {
        if ray_count == 0 {
            return Err(EvolutionError::invalid_argument("Track needs at least one ray"));
        }
        let positive = [
            config.half_width,
            config.milestone_spacing,
            config.sensor_range,
            config.max_speed,
        ];
        if positive.iter().any(|v| !(v.is_finite() && *v > 0.0)) || config.start_margin < 0.0 {
            return Err(EvolutionError::invalid_argument(
                "Track dimensions must be positive",
            ));
        }
        Ok(Self {
            config,
            ray_count,
            actions,
            pose: Pose::default(),
            speed: 0.0,
            collected: 0,
        })
    }

    /// Default geometry sized to the configured policy network.
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            TrackConfig::default(),
            config.network.ray_count,
            ActionTable::for_outputs(config.network.output_size),
        )
    }

    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    #[must_use]
    pub fn milestones_collected(&self) -> u32 {
        self.collected
    }

    /// Offsets from the heading, evenly spread across the field of view.
    fn ray_offsets(&self) -> impl Iterator<Item = f32> + '_ {
        let fov = self.config.field_of_view;
        let n = self.ray_count;
        (0..n).map(move |i| {
            if n == 1 {
                0.0
            } else {
                -fov / 2.0 + fov * i as f32 / (n - 1) as f32
            }
        })
    }

    fn next_milestone_x(&self) -> Option<f32> {
        (self.collected < self.config.milestone_count)
            .then(|| self.config.milestone_spacing * (self.collected + 1) as f32)
    }

    fn cast(&self, angle: f32) -> RayHit {
        let (dy, dx) = angle.sin_cos();
        let Pose { x, y, .. } = self.pose;
        let hw = self.config.half_width;
        let mut nearest: Option<(f32, SurfaceTag)> = None;
        let mut consider = |t: f32, tag: SurfaceTag| {
            if t >= 0.0 && nearest.map_or(true, |(best, _)| t < best) {
                nearest = Some((t, tag));
            }
        };

        if dy > 0.0 {
            consider((hw - y) / dy, SurfaceTag::OutOfBounds);
        } else if dy < 0.0 {
            consider((-hw - y) / dy, SurfaceTag::OutOfBounds);
        }
        if dx < 0.0 {
            consider((-self.config.start_margin - x) / dx, SurfaceTag::OutOfBounds);
        } else if dx > 0.0 {
            if let Some(mx) = self.next_milestone_x() {
                consider((mx - x) / dx, SurfaceTag::Milestone);
            }
        }

        match nearest {
            Some((distance, tag)) if distance <= self.config.sensor_range => {
                RayHit { distance, tag }
            }
            _ => RayHit::miss(self.config.sensor_range),
        }
    }

    pub fn cast_rays(&self) -> Vec<RayHit> {
        self.ray_offsets()
            .map(|offset| self.cast(self.pose.heading + offset))
            .collect()
    }

    fn out_of_bounds(&self) -> bool {
        self.pose.y.abs() > self.config.half_width || self.pose.x < -self.config.start_margin
    }
}

impl Environment for Track {
    fn sensor_readings(&mut self) -> Result<Vec<f32>> {
        Ok(RayHit::flatten(&self.cast_rays()))
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn apply_action(&mut self, action: usize, dt: f64) -> Result<Vec<EnvEvent>> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(EvolutionError::environment(format!(
                "Invalid tick duration {dt}"
            )));
        }
        let dt = dt as f32;
        let command = self.actions.command(action);
        let cfg = &self.config;

        self.speed += command.throttle * cfg.acceleration * dt;
        self.speed -= self.speed * cfg.drag * dt;
        self.speed = self.speed.clamp(-cfg.max_speed / 2.0, cfg.max_speed);

        // Negative steer turns left, i.e. counter-clockwise.
        self.pose.heading -= command.steer * cfg.turn_rate * dt;
        let (sin, cos) = self.pose.heading.sin_cos();
        self.pose.x += self.speed * cos * dt;
        self.pose.y += self.speed * sin * dt;

        let mut events = Vec::new();
        while let Some(mx) = self.next_milestone_x() {
            if self.pose.x < mx {
                break;
            }
            self.collected += 1;
            events.push(EnvEvent::MilestoneReached);
        }
        if self.out_of_bounds() {
            events.push(EnvEvent::BoundaryViolation);
        }
        Ok(events)
    }

    fn reset_episode(&mut self) {
        self.pose = Pose::default();
        self.speed = 0.0;
        self.collected = 0;
    }
}
