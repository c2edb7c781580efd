//! The structural graph: tagged nodes, tagged pairs between them, and child
//! structures composed by value.

use crate::error::{Result, StructureError};
use crate::node::Node;
use crate::tags::{Tagged, Tags};
use glam::{Quat, Vec3};
use serde::Serialize;

/// A tagged connection between two nodes of the same structure.
///
/// Endpoints are indices into the owning structure's node list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Pair {
    from: usize,
    to: usize,
    tags: Tags,
}

impl Pair {
    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.from, self.to)
    }
}

impl Tagged for Pair {
    fn tags(&self) -> &Tags {
        &self.tags
    }
}

/// A mutable description of an assembly.
///
/// Node order is significant: pairs, replication junctions and markers all
/// address nodes by index. Children are independent copies, each carrying its
/// own local index space.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Structure {
    tags: Tags,
    nodes: Vec<Node>,
    pairs: Vec<Pair>,
    children: Vec<Structure>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an untagged node and returns its index.
    pub fn add_node(&mut self, x: f32, y: f32, z: f32) -> usize {
        self.add_node_at(Node::new(x, y, z))
    }

    /// Appends an existing (possibly derived) node and returns its index.
    pub fn add_node_at(&mut self, node: impl Into<Node>) -> usize {
        self.nodes.push(node.into());
        self.nodes.len() - 1
    }

    /// Connects nodes `from` and `to` with a pair tagged `tags`.
    ///
    /// Both indices must be in bounds and distinct; on failure the pair list is
    /// left untouched.
    pub fn add_pair(&mut self, from: usize, to: usize, tags: &str) -> Result<usize> {
        let len = self.nodes.len();
        if from == to || from >= len || to >= len {
            return Err(StructureError::InvalidIndex { from, to, len });
        }
        self.pairs.push(Pair {
            from,
            to,
            tags: Tags::parse(tags),
        });
        Ok(self.pairs.len() - 1)
    }

    /// Connects two positions by value.
    ///
    /// Used for pairs that span child structures: each position resolves to an
    /// own node at exactly that location, or a new node is appended.
    ///
    /// Coincident positions cannot form a pair and are rejected with
    /// [`StructureError::InvalidArgument`].
    pub fn connect(&mut self, a: Vec3, b: Vec3, tags: &str) -> Result<usize> {
        if a == b {
            return Err(StructureError::InvalidArgument(format!(
                "cannot connect \"{tags}\" to itself at {a}"
            )));
        }
        let from = self.node_at_or_insert(a);
        let to = self.node_at_or_insert(b);
        self.add_pair(from, to, tags)
    }

    fn node_at_or_insert(&mut self, position: Vec3) -> usize {
        match self.nodes.iter().position(|n| n.position() == position) {
            Some(index) => index,
            None => self.add_node_at(position),
        }
    }

    /// Embeds `child` as an independent sub-structure.
    ///
    /// The child is moved in, so later changes to any other copy of it never
    /// reach the embedded one.
    pub fn add_child(&mut self, child: Structure) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    /// Tags the structure as a whole; node and pair tags are unaffected.
    pub fn add_tags(&mut self, tags: &str) {
        self.tags.add(tags);
    }

    /// Moves every node, recursively through all children.
    pub fn translate(&mut self, offset: Vec3) {
        for node in &mut self.nodes {
            node.translate(offset);
        }
        for child in &mut self.children {
            child.translate(offset);
        }
    }

    /// Rotates every node about `fixed_point`, recursively through all children.
    pub fn rotate(&mut self, fixed_point: Vec3, rotation: Quat) {
        for node in &mut self.nodes {
            node.rotate_about(fixed_point, rotation);
        }
        for child in &mut self.children {
            child.rotate(fixed_point, rotation);
        }
    }

    /// Scales every node's distance from `reference`, recursively.
    pub fn scale(&mut self, reference: Vec3, factor: f32) {
        for node in &mut self.nodes {
            node.scale_about(reference, factor);
        }
        for child in &mut self.children {
            child.scale(reference, factor);
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Mutable access to nodes, e.g. for tagging after construction.
    pub fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn children(&self) -> &[Structure] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Structure] {
        &mut self.children
    }

    /// Index of the first own node whose tags contain `query`.
    pub fn find_node(&self, query: &Tags) -> Option<usize> {
        self.nodes.iter().position(|n| n.matches(query))
    }

    /// Resolved endpoint positions of `pair`.
    pub(crate) fn pair_positions(&self, pair: &Pair) -> (Vec3, Vec3) {
        (
            self.nodes[pair.from].position(),
            self.nodes[pair.to].position(),
        )
    }
}

impl Tagged for Structure {
    fn tags(&self) -> &Tags {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn triangle() -> Structure {
        let mut s = Structure::new();
        s.add_node(0.0, 0.0, 0.0);
        s.add_node(1.0, 0.0, 0.0);
        s.add_node(0.0, 1.0, 0.0);
        s
    }

    #[test]
    fn add_pair_keeps_insertion_order() {
        let mut s = triangle();
        assert_eq!(s.add_pair(0, 1, "rod").unwrap(), 0);
        assert_eq!(s.add_pair(2, 0, "muscle").unwrap(), 1);

        let pairs = s.pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].endpoints(), (0, 1));
        assert_eq!(pairs[1].endpoints(), (2, 0));
        assert!(pairs[1].tags().has("muscle"));
    }

    #[test]
    fn add_pair_rejects_bad_indices() {
        let mut s = triangle();
        s.add_pair(0, 1, "rod").unwrap();

        assert!(matches!(
            s.add_pair(1, 1, "rod"),
            Err(StructureError::InvalidIndex { from: 1, to: 1, len: 3 })
        ));
        assert!(matches!(
            s.add_pair(0, 3, "rod"),
            Err(StructureError::InvalidIndex { .. })
        ));
        assert_eq!(s.pairs().len(), 1);
    }

    #[test]
    fn translate_round_trip() {
        let mut s = triangle();
        s.add_child(triangle());
        let before = s.clone();

        let v = Vec3::new(3.5, -1.25, 12.0);
        s.translate(v);
        assert_ne!(s, before);
        s.translate(-v);

        for (a, b) in s.nodes().iter().zip(before.nodes()) {
            assert!(a.position().abs_diff_eq(b.position(), 1e-5));
        }
        for (a, b) in s.children()[0].nodes().iter().zip(before.children()[0].nodes()) {
            assert!(a.position().abs_diff_eq(b.position(), 1e-5));
        }
    }

    #[test]
    fn child_is_a_snapshot() {
        let mut source = triangle();
        let mut parent = Structure::new();
        parent.add_node(5.0, 5.0, 5.0);
        parent.add_child(source.clone());

        source.translate(Vec3::Z);
        assert_eq!(parent.children()[0].nodes()[1].position(), Vec3::X);

        parent.children_mut()[0].translate(Vec3::Y);
        assert_eq!(parent.nodes()[0].position(), Vec3::splat(5.0));
        assert_eq!(parent.children()[0].nodes()[1].position(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn structure_tags_do_not_touch_members() {
        let mut s = triangle();
        s.add_pair(0, 1, "rod").unwrap();
        s.add_tags("segment 3");

        assert!(s.tags().matches("segment 3"));
        assert!(s.nodes().iter().all(|n| n.tags().is_empty()));
        assert!(!s.pairs()[0].tags().has("segment"));
    }

    #[test]
    fn connect_reuses_existing_positions() {
        let mut s = triangle();
        let pair = s.connect(Vec3::X, Vec3::new(9.0, 9.0, 9.0), "muscle").unwrap();
        assert_eq!(s.nodes().len(), 4);
        assert_eq!(s.pairs()[pair].endpoints(), (1, 3));
    }

    #[test]
    fn connect_rejects_coincident_positions() {
        let mut s = triangle();
        let err = s.connect(Vec3::X, Vec3::X, "muscle").unwrap_err();
        assert!(matches!(err, StructureError::InvalidArgument(_)));
        assert!(err.to_string().contains("muscle"));
        assert_eq!(s.nodes().len(), 3);
        assert!(s.pairs().is_empty());
    }

    #[test]
    fn rotate_quarter_turn_about_y() {
        let mut s = triangle();
        s.rotate(Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_2));
        assert!(s.nodes()[1].position().abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
        assert!(s.nodes()[2].position().abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn scale_about_reference() {
        let mut s = triangle();
        s.scale(Vec3::X, 2.0);
        assert_eq!(s.nodes()[0].position(), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(s.nodes()[1].position(), Vec3::X);
        assert_eq!(s.nodes()[2].position(), Vec3::new(-1.0, 2.0, 0.0));
    }

    #[test]
    fn find_node_by_tag() {
        let mut s = triangle();
        s.node_mut(2).unwrap().add_tags("tip");
        assert_eq!(s.find_node(&Tags::parse("tip")), Some(2));
        assert_eq!(s.find_node(&Tags::parse("base")), None);
    }
}
