//! Physical parameter records handed to builders, and model/world settings.

use crate::error::{Result, StructureError};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters for a rigid rod (a cylinder spanning a pair).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RodConfig {
    pub radius: f32,
    /// Density used to derive mass. Zero density yields a static body.
    pub density: f32,
    pub friction: f32,
    pub rolling_friction: f32,
    pub restitution: f32,
}

impl Default for RodConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            density: 1.0,
            friction: 1.0,
            rolling_friction: 0.0,
            restitution: 0.0,
        }
    }
}

impl RodConfig {
    #[must_use]
    pub const fn new(radius: f32, density: f32) -> Self {
        Self {
            radius,
            density,
            friction: 1.0,
            rolling_friction: 0.0,
            restitution: 0.0,
        }
    }

    #[must_use]
    pub const fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    #[must_use]
    pub const fn with_rolling_friction(mut self, rolling_friction: f32) -> Self {
        self.rolling_friction = rolling_friction;
        self
    }

    #[must_use]
    pub const fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }
}

/// Parameters for a tensile member (cable / muscle).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CableConfig {
    pub stiffness: f32,
    pub damping: f32,
    /// Initial tension; the rest length starts at `length - pretension / stiffness`.
    pub pretension: f32,
    /// Whether the engine should record tension/length history.
    pub history: bool,
    pub max_tension: f32,
    /// Rate (length units per second) at which the rest length tracks its target.
    pub target_velocity: f32,
    pub min_rest_length: f32,
}

impl Default for CableConfig {
    fn default() -> Self {
        Self {
            stiffness: 1000.0,
            damping: 10.0,
            pretension: 0.0,
            history: false,
            max_tension: 1000.0,
            target_velocity: 100.0,
            min_rest_length: 0.1,
        }
    }
}

impl CableConfig {
    #[must_use]
    pub const fn new(stiffness: f32, damping: f32, pretension: f32) -> Self {
        Self {
            stiffness,
            damping,
            pretension,
            history: false,
            max_tension: 1000.0,
            target_velocity: 100.0,
            min_rest_length: 0.1,
        }
    }

    #[must_use]
    pub const fn with_history(mut self, history: bool) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub const fn with_max_tension(mut self, max_tension: f32) -> Self {
        self.max_tension = max_tension;
        self
    }

    #[must_use]
    pub const fn with_target_velocity(mut self, target_velocity: f32) -> Self {
        self.target_velocity = target_velocity;
        self
    }

    /// Rejects values the actuator cannot be driven with.
    pub fn validate(&self) -> Result<()> {
        if !(self.target_velocity.is_finite() && self.target_velocity >= 0.0) {
            return Err(StructureError::InvalidArgument(format!(
                "cable target velocity must be finite and non-negative, got {}",
                self.target_velocity
            )));
        }
        Ok(())
    }

    #[must_use]
    pub const fn with_min_rest_length(mut self, min_rest_length: f32) -> Self {
        self.min_rest_length = min_rest_length;
        self
    }
}

/// Parameters for a spherical body placed on a node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereConfig {
    pub radius: f32,
    pub density: f32,
    pub friction: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            density: 1.0,
            friction: 1.0,
        }
    }
}

impl SphereConfig {
    #[must_use]
    pub const fn new(radius: f32, density: f32) -> Self {
        Self {
            radius,
            density,
            friction: 1.0,
        }
    }
}

/// Settings for a [`TensegrityModel`](crate::TensegrityModel).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// JSON description read by
    /// [`TensegrityModel::from_description`](crate::TensegrityModel::from_description).
    pub description_path: Option<PathBuf>,

    /// Offset applied to a described structure before realization, so it does
    /// not start inside the ground plane.
    pub lift: Vec3,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            description_path: None,
            lift: Vec3::new(0.0, 10.0, 0.0),
        }
    }
}

impl ModelConfig {
    #[must_use]
    pub fn with_description(mut self, path: impl Into<PathBuf>) -> Self {
        self.description_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_lift(mut self, lift: Vec3) -> Self {
        self.lift = lift;
        self
    }
}

/// Settings for the bookkeeping [`SimWorld`](crate::SimWorld).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub gravity: Vec3,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
        }
    }
}
