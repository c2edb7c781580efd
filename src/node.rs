//! Tagged points, the vertices of a [`Structure`](crate::Structure).

use crate::tags::{Tagged, Tags};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// A 3D coordinate carrying a set of tags.
///
/// Arithmetic on nodes yields new, untagged nodes: a midpoint of two "base"
/// nodes is not itself a "base" node until tagged so.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    position: Vec3,
    tags: Tags,
}

impl Node {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self::at(Vec3::new(x, y, z))
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            tags: Tags::new(),
        }
    }

    /// Builder-style tagging.
    pub fn with_tags(mut self, tags: &str) -> Self {
        self.tags.add(tags);
        self
    }

    pub fn add_tags(&mut self, tags: &str) {
        self.tags.add(tags);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// The untagged point halfway between `self` and `other`.
    pub fn midpoint(&self, other: &Node) -> Node {
        Node::at((self.position + other.position) / 2.0)
    }

    /// An untagged copy displaced by `offset`.
    pub fn offset(&self, offset: Vec3) -> Node {
        Node::at(self.position + offset)
    }

    pub fn distance(&self, other: &Node) -> f32 {
        self.position.distance(other.position)
    }

    pub(crate) fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    pub(crate) fn rotate_about(&mut self, fixed_point: Vec3, rotation: Quat) {
        self.position = fixed_point + rotation * (self.position - fixed_point);
    }

    pub(crate) fn scale_about(&mut self, reference: Vec3, factor: f32) {
        self.position = reference + (self.position - reference) * factor;
    }
}

impl Tagged for Node {
    fn tags(&self) -> &Tags {
        &self.tags
    }
}

impl From<Vec3> for Node {
    fn from(position: Vec3) -> Self {
        Node::at(position)
    }
}

impl Add for &Node {
    type Output = Node;

    fn add(self, rhs: &Node) -> Node {
        Node::at(self.position + rhs.position)
    }
}

impl Add for Node {
    type Output = Node;

    fn add(self, rhs: Node) -> Node {
        &self + &rhs
    }
}

impl Add<Vec3> for &Node {
    type Output = Node;

    fn add(self, rhs: Vec3) -> Node {
        self.offset(rhs)
    }
}

impl Sub for &Node {
    type Output = Vec3;

    fn sub(self, rhs: &Node) -> Vec3 {
        self.position - rhs.position
    }
}

impl Mul<f32> for &Node {
    type Output = Node;

    fn mul(self, rhs: f32) -> Node {
        Node::at(self.position * rhs)
    }
}

impl Div<f32> for Node {
    type Output = Node;

    fn div(self, rhs: f32) -> Node {
        Node::at(self.position / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_nodes_are_untagged() {
        let a = Node::new(0.0, 0.0, 0.0).with_tags("base");
        let b = Node::new(2.0, 4.0, 0.0).with_tags("base");

        let mid = (&a + &b) / 2.0;
        assert_eq!(mid.position(), Vec3::new(1.0, 2.0, 0.0));
        assert!(mid.tags().is_empty());
        assert_eq!(a.midpoint(&b), mid);

        let moved = &a + Vec3::X;
        assert!(moved.tags().is_empty());
        assert_eq!(moved.position(), Vec3::X);
    }

    #[test]
    fn difference_is_a_vector() {
        let a = Node::new(1.0, 1.0, 1.0);
        let b = Node::new(0.0, 1.0, 3.0);
        assert_eq!(&a - &b, Vec3::new(1.0, 0.0, -2.0));
    }
}
