//! The realized model: component collection, queries, stepping and observers.

use crate::component::{Actuator, Component, ComponentId, RigidBody};
use crate::config::ModelConfig;
use crate::description::Description;
use crate::error::{Result, StructureError};
use crate::locator::ComponentLocator;
use crate::realizer::{Group, StructureRealizer};
use crate::tags::{Tagged, Tags};
use crate::world::PhysicsWorld;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Receives lifecycle notifications from a [`TensegrityModel`].
///
/// Controllers implement this to drive actuators each step.
pub trait ModelObserver: Send {
    fn on_setup(&mut self, _model: &mut TensegrityModel) {}

    /// Called before the model's components advance by `dt`.
    fn on_step(&mut self, _model: &mut TensegrityModel, _dt: f32) {}

    fn on_teardown(&mut self, _model: &mut TensegrityModel) {}
}

/// A labelled point fixed to a rigid body, for instrumentation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Component id of the body the marker rides on.
    pub body: ComponentId,
    /// Offset from the body's centre of mass, in world axes at build time.
    pub offset: Vec3,
    pub color: Vec3,
    /// Caller-defined node number the marker stands for.
    pub node: usize,
}

/// Owns the components realized from a structure.
#[derive(Default)]
pub struct TensegrityModel {
    config: ModelConfig,
    components: Vec<Component>,
    groups: Vec<Group>,
    locator: ComponentLocator,
    markers: Vec<Marker>,
    observers: Vec<Box<dyn ModelObserver>>,
    built: bool,
    elapsed: f64,
}

impl TensegrityModel {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Builds a model from the JSON description named by `config`.
    ///
    /// The structure is lifted by `config.lift` and realized with the
    /// description's `"rod"` and `"muscle"` builders. Any read, parse or
    /// realization failure is returned and no model is produced.
    pub fn from_description<W: PhysicsWorld>(config: ModelConfig, world: &mut W) -> Result<Self> {
        let path = config.description_path.clone().ok_or_else(|| {
            StructureError::InvalidArgument("model config has no description path".into())
        })?;
        let description = Description::from_path(&path)?;
        tracing::info!(path = %path.display(), "loaded structure description");

        let mut structure = description.to_structure()?;
        structure.translate(config.lift);
        let spec = description.build_spec();

        let mut model = Self::new(config);
        StructureRealizer::new(&structure, &spec).build_into(&mut model, world)?;
        Ok(model)
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub(crate) fn adopt(&mut self, components: Vec<Component>, groups: Vec<Group>) {
        self.components = components;
        self.groups = groups;
        self.built = true;
    }

    pub fn add_observer(&mut self, observer: Box<dyn ModelObserver>) {
        self.observers.push(observer);
    }

    /// Notifies observers that the model is built.
    pub fn setup(&mut self) {
        self.notify(|observer, model| observer.on_setup(model));
    }

    /// Advances the model by `dt` seconds.
    ///
    /// Observers are notified first, then every component steps.
    pub fn step(&mut self, dt: f32) -> Result<()> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(StructureError::InvalidArgument(format!(
                "dt is not positive: {dt}"
            )));
        }
        self.notify(|observer, model| observer.on_step(model, dt));
        for component in &mut self.components {
            component.step(dt);
        }
        self.elapsed += f64::from(dt);
        Ok(())
    }

    /// Notifies observers, then drops every component so the model can be rebuilt.
    pub fn teardown(&mut self) {
        self.notify(|observer, model| observer.on_teardown(model));
        self.components.clear();
        self.groups.clear();
        self.locator.clear();
        self.markers.clear();
        self.built = false;
        self.elapsed = 0.0;
    }

    fn notify(&mut self, mut f: impl FnMut(&mut Box<dyn ModelObserver>, &mut Self)) {
        // Observers are detached while notified so they can borrow the model.
        let mut observers = std::mem::take(&mut self.observers);
        for observer in &mut observers {
            f(observer, self);
        }
        observers.append(&mut self.observers);
        self.observers = observers;
    }

    /// Simulated time accumulated by [`step`](Self::step).
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Every component in realization order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    pub fn actuator_mut(&mut self, id: ComponentId) -> Option<&mut Actuator> {
        self.components.get_mut(id).and_then(Component::as_actuator_mut)
    }

    pub fn all_actuators(&self) -> Vec<&Actuator> {
        self.components.iter().filter_map(Component::as_actuator).collect()
    }

    pub fn all_rigids(&self) -> Vec<&RigidBody> {
        self.components.iter().filter_map(Component::as_rigid).collect()
    }

    /// Ids of every component whose tags contain `query`, in realization order.
    pub fn find_ids(&self, query: &str) -> Vec<ComponentId> {
        let query = Tags::parse(query);
        self.components
            .iter()
            .enumerate()
            .filter(|(_, c)| c.matches(&query))
            .map(|(id, _)| id)
            .collect()
    }

    /// Every component whose tags contain `query`, in realization order.
    pub fn find(&self, query: &str) -> Vec<&Component> {
        let query = Tags::parse(query);
        self.components.iter().filter(|c| c.matches(&query)).collect()
    }

    pub fn find_actuators(&self, query: &str) -> Vec<&Actuator> {
        self.find(query)
            .into_iter()
            .filter_map(Component::as_actuator)
            .collect()
    }

    pub fn find_rigids(&self, query: &str) -> Vec<&RigidBody> {
        self.find(query)
            .into_iter()
            .filter_map(Component::as_rigid)
            .collect()
    }

    /// One group per realized child structure, in pre-order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Groups whose structure-level tags contain `query`, e.g. `"segment"`.
    pub fn find_groups(&self, query: &str) -> Vec<&Group> {
        let query = Tags::parse(query);
        self.groups.iter().filter(|g| g.matches(&query)).collect()
    }

    /// Binds `label` to every component matching `query`.
    pub fn bind(&mut self, label: &str, query: &str) -> &[ComponentId] {
        self.locator.bind(label, query, &self.components)
    }

    /// Ids bound to `label`.
    pub fn lookup(&self, label: &str) -> Result<&[ComponentId]> {
        self.locator.lookup(label)
    }

    /// Actuators bound to `label`; other component kinds in the group are skipped.
    pub fn actuator_group(&self, label: &str) -> Result<Vec<&Actuator>> {
        Ok(self
            .lookup(label)?
            .iter()
            .filter_map(|&id| self.components[id].as_actuator())
            .collect())
    }

    pub fn locator(&self) -> &ComponentLocator {
        &self.locator
    }

    /// Fixes a marker at `world_point` to the `rigid_index`-th rigid body.
    ///
    /// Bodies are addressed by their position in [`all_rigids`](Self::all_rigids).
    pub fn attach_marker(
        &mut self,
        rigid_index: usize,
        world_point: Vec3,
        color: Vec3,
        node: usize,
    ) -> Result<&Marker> {
        let (body, center) = self
            .components
            .iter()
            .enumerate()
            .filter_map(|(id, c)| c.as_rigid().map(|b| (id, b.center_of_mass())))
            .nth(rigid_index)
            .ok_or_else(|| {
                StructureError::InvalidArgument(format!("no rigid body at index {rigid_index}"))
            })?;
        self.markers.push(Marker {
            body,
            offset: world_point - center,
            color,
            node,
        });
        Ok(&self.markers[self.markers.len() - 1])
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl std::fmt::Debug for TensegrityModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensegrityModel")
            .field("config", &self.config)
            .field("components", &self.components.len())
            .field("groups", &self.groups.len())
            .field("markers", &self.markers)
            .field("observers", &self.observers.len())
            .field("elapsed", &self.elapsed)
            .finish()
    }
}
