//! The physics environment seam.
//!
//! Realized components are installed into a [`PhysicsWorld`]; engines adapt
//! their own body/constraint creation behind this trait. [`SimWorld`] only
//! records what was installed, which is what headless tooling and tests need.

use crate::component::{Actuator, RigidBody, WorldHandle};
use crate::config::WorldConfig;

/// An engine that accepts realized components.
pub trait PhysicsWorld {
    /// Creates the engine-side body for `body` and returns its identity.
    fn install_rigid(&mut self, body: &RigidBody) -> WorldHandle;

    /// Creates the engine-side constraint for `actuator` and returns its identity.
    fn install_actuator(&mut self, actuator: &Actuator) -> WorldHandle;
}

/// A bookkeeping world: assigns sequential handles and keeps a copy of each
/// installed component.
#[derive(Clone, Debug, Default)]
pub struct SimWorld {
    pub config: WorldConfig,
    rigids: Vec<RigidBody>,
    actuators: Vec<Actuator>,
    next_handle: WorldHandle,
}

impl SimWorld {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn rigids(&self) -> &[RigidBody] {
        &self.rigids
    }

    pub fn actuators(&self) -> &[Actuator] {
        &self.actuators
    }

    /// Total mass of every installed rigid body.
    pub fn total_mass(&self) -> f32 {
        self.rigids.iter().map(|b| b.mass).sum()
    }

    fn allocate(&mut self) -> WorldHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }
}

impl PhysicsWorld for SimWorld {
    fn install_rigid(&mut self, body: &RigidBody) -> WorldHandle {
        self.rigids.push(body.clone());
        self.allocate()
    }

    fn install_actuator(&mut self, actuator: &Actuator) -> WorldHandle {
        self.actuators.push(actuator.clone());
        self.allocate()
    }
}
