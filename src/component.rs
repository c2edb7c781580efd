//! Concrete objects produced by realization.

use crate::config::{CableConfig, RodConfig, SphereConfig};
use crate::tags::{Tagged, Tags};
use bevy_heavy::ComputeMassProperties3d as _;
use bevy_math::primitives::{Cylinder, Sphere};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position of a component in its model's collection.
pub type ComponentId = usize;

/// Opaque identity assigned by a [`PhysicsWorld`](crate::PhysicsWorld) on install.
pub type WorldHandle = u32;

/// Supported rigid body shapes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ShapePrimitive {
    /// A cylinder along the body's local Y axis.
    Cylinder { radius: f32, length: f32 },
    /// A sphere defined by radius.
    Sphere(f32),
}

impl ShapePrimitive {
    /// Mass from volume and density, computed with `bevy_heavy`.
    pub fn mass(self, density: f32) -> f32 {
        match self {
            Self::Cylinder { radius, length } => Cylinder::new(radius, length).mass(density),
            Self::Sphere(radius) => Sphere::new(radius).mass(density),
        }
    }
}

/// A rigid body: a rod spanning a pair, or a sphere on a node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    pub tags: Tags,
    pub shape: ShapePrimitive,
    /// Centre of mass and orientation in world space.
    pub transform: (Vec3, Quat),
    /// Endpoints for rods; both equal the centre for spheres.
    pub endpoints: (Vec3, Vec3),
    pub density: f32,
    pub mass: f32,
    pub friction: f32,
    pub rolling_friction: f32,
    pub restitution: f32,
    pub handle: Option<WorldHandle>,
}

impl RigidBody {
    /// Builds a rod from `from` to `to`, oriented so its local Y axis runs along it.
    pub fn rod(tags: Tags, from: Vec3, to: Vec3, config: &RodConfig) -> Self {
        let axis = to - from;
        let length = axis.length();
        let rotation = if length > f32::EPSILON {
            Quat::from_rotation_arc(Vec3::Y, axis / length)
        } else {
            tracing::warn!(%tags, position = ?from, "zero-length rod");
            Quat::IDENTITY
        };
        let shape = ShapePrimitive::Cylinder {
            radius: config.radius,
            length,
        };
        Self {
            tags,
            shape,
            transform: ((from + to) / 2.0, rotation),
            endpoints: (from, to),
            density: config.density,
            mass: shape.mass(config.density),
            friction: config.friction,
            rolling_friction: config.rolling_friction,
            restitution: config.restitution,
            handle: None,
        }
    }

    /// Builds a sphere centred on `center`.
    pub fn sphere(tags: Tags, center: Vec3, config: &SphereConfig) -> Self {
        let shape = ShapePrimitive::Sphere(config.radius);
        Self {
            tags,
            shape,
            transform: (center, Quat::IDENTITY),
            endpoints: (center, center),
            density: config.density,
            mass: shape.mass(config.density),
            friction: config.friction,
            rolling_friction: 0.0,
            restitution: 0.0,
            handle: None,
        }
    }

    pub fn center_of_mass(&self) -> Vec3 {
        self.transform.0
    }

    /// A body without mass is fixed in place by the engine.
    pub fn is_static(&self) -> bool {
        self.mass <= 0.0
    }
}

impl Tagged for RigidBody {
    fn tags(&self) -> &Tags {
        &self.tags
    }
}

/// A tensile actuator (cable / muscle) spanning a pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Actuator {
    pub tags: Tags,
    pub endpoints: (Vec3, Vec3),
    pub config: CableConfig,
    /// Current rest length.
    pub rest_length: f32,
    /// Rest length the actuator is driven toward.
    pub target_length: f32,
    pub handle: Option<WorldHandle>,
}

impl Actuator {
    pub fn new(tags: Tags, from: Vec3, to: Vec3, config: &CableConfig) -> Self {
        let length = from.distance(to);
        if length <= f32::EPSILON {
            tracing::warn!(%tags, position = ?from, "zero-length actuator");
        }
        let stretch = if config.stiffness > 0.0 {
            config.pretension / config.stiffness
        } else {
            0.0
        };
        let rest_length = (length - stretch).max(config.min_rest_length);
        Self {
            tags,
            endpoints: (from, to),
            config: *config,
            rest_length,
            target_length: rest_length,
            handle: None,
        }
    }

    /// Distance between the anchor points at build time.
    pub fn length(&self) -> f32 {
        self.endpoints.0.distance(self.endpoints.1)
    }

    /// Sets the rest length the actuator should move toward.
    pub fn set_control_input(&mut self, target_length: f32) {
        self.target_length = target_length.max(self.config.min_rest_length);
    }

    /// Moves the rest length toward its target at `target_velocity`.
    pub fn step(&mut self, dt: f32) {
        let max_change = (self.config.target_velocity * dt).max(0.0);
        let delta = (self.target_length - self.rest_length).clamp(-max_change, max_change);
        self.rest_length = (self.rest_length + delta).max(self.config.min_rest_length);
    }
}

impl Tagged for Actuator {
    fn tags(&self) -> &Tags {
        &self.tags
    }
}

/// One realized object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Component {
    Rigid(RigidBody),
    Actuator(Actuator),
}

impl Component {
    pub fn as_rigid(&self) -> Option<&RigidBody> {
        match self {
            Self::Rigid(body) => Some(body),
            Self::Actuator(_) => None,
        }
    }

    pub fn as_actuator(&self) -> Option<&Actuator> {
        match self {
            Self::Actuator(actuator) => Some(actuator),
            Self::Rigid(_) => None,
        }
    }

    pub fn as_actuator_mut(&mut self) -> Option<&mut Actuator> {
        match self {
            Self::Actuator(actuator) => Some(actuator),
            Self::Rigid(_) => None,
        }
    }

    pub fn handle(&self) -> Option<WorldHandle> {
        match self {
            Self::Rigid(body) => body.handle,
            Self::Actuator(actuator) => actuator.handle,
        }
    }

    pub(crate) fn set_handle(&mut self, handle: WorldHandle) {
        match self {
            Self::Rigid(body) => body.handle = Some(handle),
            Self::Actuator(actuator) => actuator.handle = Some(handle),
        }
    }

    /// Advances time-dependent state; rigid bodies are driven by the engine.
    pub fn step(&mut self, dt: f32) {
        if let Self::Actuator(actuator) = self {
            actuator.step(dt);
        }
    }
}

impl Tagged for Component {
    fn tags(&self) -> &Tags {
        match self {
            Self::Rigid(body) => &body.tags,
            Self::Actuator(actuator) => &actuator.tags,
        }
    }
}
