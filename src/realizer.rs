//! Turns a [`Structure`] plus a [`BuildSpec`] into concrete components.
//!
//! The structure is flattened depth-first in pre-order: a structure's own nodes
//! and pairs come before those of its children, children in insertion order.
//! That order is the component order of the resulting model, so "the tenth
//! rigid body" is stable for a given structure.

use crate::component::{Actuator, Component, ComponentId, RigidBody};
use crate::error::{Result, StructureError};
use crate::model::TensegrityModel;
use crate::registry::{BuildSpec, ComponentBuilder};
use crate::structure::Structure;
use crate::tags::{Tagged, Tags};
use crate::world::PhysicsWorld;
use serde::{Deserialize, Serialize};

/// The components realized from one child structure (and its descendants).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub tags: Tags,
    pub components: Vec<ComponentId>,
}

impl Tagged for Group {
    fn tags(&self) -> &Tags {
        &self.tags
    }
}

/// Output of [`StructureRealizer::realize`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Realization {
    pub components: Vec<Component>,
    /// One group per child structure, in pre-order.
    pub groups: Vec<Group>,
}

/// Binds a structure to a build spec.
pub struct StructureRealizer<'a> {
    structure: &'a Structure,
    spec: &'a BuildSpec,
}

impl<'a> StructureRealizer<'a> {
    pub fn new(structure: &'a Structure, spec: &'a BuildSpec) -> Self {
        Self { structure, spec }
    }

    /// Realizes every matched node and every pair.
    ///
    /// Fails with [`StructureError::UnboundTag`] on the first pair no pair
    /// builder matches; nothing is returned in that case. Nodes without a
    /// matching node builder are geometry only.
    pub fn realize(&self) -> Result<Realization> {
        let mut realization = Realization::default();
        self.realize_structure(self.structure, &mut realization)?;
        Ok(realization)
    }

    fn realize_structure(&self, structure: &Structure, out: &mut Realization) -> Result<()> {
        for node in structure.nodes() {
            if let Some((_, ComponentBuilder::Sphere(config))) =
                self.spec.best_node_match(node.tags())
            {
                let body = RigidBody::sphere(node.tags().clone(), node.position(), config);
                tracing::debug!(index = out.components.len(), tags = %body.tags, "realized sphere");
                out.components.push(Component::Rigid(body));
            }
        }

        for pair in structure.pairs() {
            let (from, to) = structure.pair_positions(pair);
            let tags = pair.tags().clone();
            let component = match self.spec.best_pair_match(&tags) {
                Some((_, ComponentBuilder::Rod(config))) => {
                    Component::Rigid(RigidBody::rod(tags, from, to, config))
                }
                Some((_, ComponentBuilder::Cable(config))) => {
                    config.validate()?;
                    Component::Actuator(Actuator::new(tags, from, to, config))
                }
                Some((_, ComponentBuilder::Sphere(_))) | None => {
                    return Err(StructureError::UnboundTag {
                        tags: tags.to_string(),
                    });
                }
            };
            tracing::debug!(
                index = out.components.len(),
                tags = %component.tags(),
                "realized pair"
            );
            out.components.push(component);
        }

        for child in structure.children() {
            let start = out.components.len();
            let slot = out.groups.len();
            out.groups.push(Group {
                tags: child.tags().clone(),
                components: Vec::new(),
            });
            self.realize_structure(child, out)?;
            out.groups[slot].components = (start..out.components.len()).collect();
        }

        Ok(())
    }

    /// Realizes the structure and installs the result into `model` and `world`.
    ///
    /// Realization completes before anything is installed, so on error both
    /// the model and the world are left untouched.
    pub fn build_into<W: PhysicsWorld>(
        &self,
        model: &mut TensegrityModel,
        world: &mut W,
    ) -> Result<()> {
        if model.is_built() {
            return Err(StructureError::AlreadyBuilt);
        }

        let Realization {
            mut components,
            groups,
        } = self.realize()?;

        for component in &mut components {
            let handle = match component {
                Component::Rigid(body) => world.install_rigid(body),
                Component::Actuator(actuator) => world.install_actuator(actuator),
            };
            component.set_handle(handle);
        }

        tracing::info!(
            components = components.len(),
            groups = groups.len(),
            "structure built"
        );
        model.adopt(components, groups);
        Ok(())
    }
}
