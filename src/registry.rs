//! Tag-keyed builder registry.
//!
//! A [`BuildSpec`] maps tag sets to [`ComponentBuilder`]s. During realization
//! every pair (and every node) asks the registry for its best match: among the
//! entries whose tokens are a subset of the target's tags, the one with the
//! most tokens wins. Equal-sized candidates are ordered by their sorted token
//! sequences, compared token by token, and the first one wins; the outcome
//! never depends on registration order.

use crate::config::{CableConfig, RodConfig, SphereConfig};
use crate::tags::Tags;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What to build for a matched node or pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ComponentBuilder {
    /// A rigid cylinder spanning a pair.
    Rod(RodConfig),
    /// A tensile actuator spanning a pair.
    Cable(CableConfig),
    /// A rigid sphere centred on a node.
    Sphere(SphereConfig),
}

impl ComponentBuilder {
    /// Whether this builder consumes pairs (as opposed to nodes).
    pub fn builds_pairs(&self) -> bool {
        matches!(self, Self::Rod(_) | Self::Cable(_))
    }
}

/// The tag → builder association used by the realizer.
#[derive(Clone, Debug, Default)]
pub struct BuildSpec {
    builders: BTreeMap<Tags, ComponentBuilder>,
}

impl BuildSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `builder` for `tag`, replacing any builder previously
    /// registered for the same (normalised) tag.
    pub fn add_builder(&mut self, tag: &str, builder: ComponentBuilder) {
        let tags = Tags::parse(tag);
        if self.builders.insert(tags, builder).is_some() {
            tracing::debug!(tag, "replacing registered builder");
        }
    }

    /// Builder-style variant of [`add_builder`](Self::add_builder).
    #[must_use]
    pub fn with_builder(mut self, tag: &str, builder: ComponentBuilder) -> Self {
        self.add_builder(tag, builder);
        self
    }

    pub fn builder(&self, tag: &str) -> Option<&ComponentBuilder> {
        self.builders.get(&Tags::parse(tag))
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Best pair builder for a pair tagged `tags`.
    pub fn best_pair_match(&self, tags: &Tags) -> Option<(&Tags, &ComponentBuilder)> {
        self.best_match(tags, true)
    }

    /// Best node builder for a node tagged `tags`.
    pub fn best_node_match(&self, tags: &Tags) -> Option<(&Tags, &ComponentBuilder)> {
        self.best_match(tags, false)
    }

    fn best_match(&self, tags: &Tags, pairs: bool) -> Option<(&Tags, &ComponentBuilder)> {
        let mut best: Option<(&Tags, &ComponentBuilder)> = None;
        // BTreeMap iteration is ordered, so a strict `>` keeps the first of equals.
        for (key, builder) in &self.builders {
            if builder.builds_pairs() != pairs || !tags.contains(key) {
                continue;
            }
            if best.is_none_or(|(current, _)| key.len() > current.len()) {
                best = Some((key, builder));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cable(stiffness: f32) -> ComponentBuilder {
        ComponentBuilder::Cable(CableConfig::new(stiffness, 10.0, 0.0))
    }

    #[test]
    fn most_specific_match_wins() {
        let mut spec = BuildSpec::new();
        spec.add_builder("muscle", cable(1.0));
        spec.add_builder("right muscle", cable(2.0));

        let (key, builder) = spec
            .best_pair_match(&Tags::parse("outer right muscle"))
            .unwrap();
        assert_eq!(key.to_string(), "muscle right");
        assert_eq!(*builder, cable(2.0));

        let (_, builder) = spec.best_pair_match(&Tags::parse("outer left muscle")).unwrap();
        assert_eq!(*builder, cable(1.0));
    }

    #[test]
    fn tie_break_ignores_registration_order() {
        let mut a = BuildSpec::new();
        a.add_builder("left muscle", cable(1.0));
        a.add_builder("inner muscle", cable(2.0));

        let mut b = BuildSpec::new();
        b.add_builder("inner muscle", cable(2.0));
        b.add_builder("left muscle", cable(1.0));

        let target = Tags::parse("inner left muscle");
        let pick_a = a.best_pair_match(&target).unwrap().1;
        let pick_b = b.best_pair_match(&target).unwrap().1;
        assert_eq!(pick_a, pick_b);
        // "inner muscle" sorts before "left muscle".
        assert_eq!(*pick_a, cable(2.0));
    }

    #[test]
    fn re_registering_replaces() {
        let mut spec = BuildSpec::new();
        spec.add_builder("top muscle", cable(1.0));
        spec.add_builder("muscle top", cable(3.0));
        assert_eq!(spec.len(), 1);
        assert_eq!(spec.builder("top muscle"), Some(&cable(3.0)));
    }

    #[test]
    fn node_and_pair_builders_are_separate() {
        let spec = BuildSpec::new()
            .with_builder("rod", ComponentBuilder::Rod(RodConfig::default()))
            .with_builder("hub", ComponentBuilder::Sphere(SphereConfig::default()));

        assert!(spec.best_pair_match(&Tags::parse("hub")).is_none());
        assert!(spec.best_node_match(&Tags::parse("rod")).is_none());
        assert!(spec.best_node_match(&Tags::parse("hub base")).is_some());
    }
}
