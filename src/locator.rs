//! Named component groups for controllers.

use crate::component::{Component, ComponentId};
use crate::error::{Result, StructureError};
use crate::tags::{Tagged, Tags};
use std::collections::HashMap;

/// Maps caller-chosen labels to the components whose tags match a query.
///
/// Labels need not equal the query: a controller may bind `"inner left"` to
/// everything tagged `"inner left muscle"`.
#[derive(Clone, Debug, Default)]
pub struct ComponentLocator {
    groups: HashMap<String, Vec<ComponentId>>,
}

impl ComponentLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores, under `label`, the ids of every component matching `query`.
    ///
    /// An empty result is still a valid binding.
    pub fn bind(&mut self, label: &str, query: &str, components: &[Component]) -> &[ComponentId] {
        let query = Tags::parse(query);
        let ids: Vec<ComponentId> = components
            .iter()
            .enumerate()
            .filter(|(_, c)| c.matches(&query))
            .map(|(id, _)| id)
            .collect();
        tracing::debug!(label, %query, matched = ids.len(), "bound component group");
        self.groups.insert(label.to_owned(), ids);
        &self.groups[label]
    }

    pub fn lookup(&self, label: &str) -> Result<&[ComponentId]> {
        self.groups
            .get(label)
            .map(Vec::as_slice)
            .ok_or_else(|| StructureError::LabelNotFound(label.to_owned()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Actuator, RigidBody};
    use crate::config::{CableConfig, RodConfig};
    use glam::Vec3;

    fn components() -> Vec<Component> {
        let muscle = |tags: &str| {
            Component::Actuator(Actuator::new(
                Tags::parse(tags),
                Vec3::ZERO,
                Vec3::X,
                &CableConfig::default(),
            ))
        };
        vec![
            Component::Rigid(RigidBody::rod(
                Tags::parse("front left rod"),
                Vec3::ZERO,
                Vec3::Y,
                &RodConfig::default(),
            )),
            muscle("inner left muscle"),
            muscle("outer left muscle"),
            muscle("inner left muscle"),
        ]
    }

    #[test]
    fn bind_then_lookup() {
        let components = components();
        let mut locator = ComponentLocator::new();

        assert_eq!(locator.bind("inner left", "inner left muscle", &components), &[1, 3]);
        assert_eq!(locator.bind("left", "left", &components), &[0, 1, 2, 3]);
        assert_eq!(locator.lookup("inner left").unwrap(), &[1, 3]);
    }

    #[test]
    fn empty_group_is_not_an_error() {
        let mut locator = ComponentLocator::new();
        locator.bind("broken", "broken", &components());
        assert!(locator.lookup("broken").unwrap().is_empty());
    }

    #[test]
    fn unknown_label() {
        let locator = ComponentLocator::new();
        assert!(matches!(
            locator.lookup("outer top"),
            Err(StructureError::LabelNotFound(label)) if label == "outer top"
        ));
    }
}
