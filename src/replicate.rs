//! Segment replication: chains of offset copies of one structural unit, wired
//! together by a caller-supplied junction table.

use crate::error::{Result, StructureError};
use crate::structure::Structure;
use crate::tags::Tags;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Names one node of the replicated unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NodeRole {
    /// The node at this index of the unit.
    Index(usize),
    /// The first unit node whose tags contain these tags.
    Tagged(Tags),
}

impl NodeRole {
    /// Resolves the role to a node index of `unit`.
    pub fn resolve(&self, unit: &Structure) -> Result<usize> {
        match self {
            Self::Index(index) if *index < unit.nodes().len() => Ok(*index),
            Self::Index(index) => Err(StructureError::UnknownNodeRole(format!(
                "node {index} of a {}-node unit",
                unit.nodes().len()
            ))),
            Self::Tagged(tags) => unit
                .find_node(tags)
                .ok_or_else(|| StructureError::UnknownNodeRole(tags.to_string())),
        }
    }
}

impl From<usize> for NodeRole {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for NodeRole {
    fn from(tags: &str) -> Self {
        Self::Tagged(Tags::parse(tags))
    }
}

/// One connection synthesized between two adjacent segments: `from` on the
/// earlier segment to `to` on the later one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub from: NodeRole,
    pub to: NodeRole,
    pub tags: String,
}

/// The correspondence table applied at every junction between segments.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    pub connectors: Vec<Connector>,
}

impl Junction {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn connect(
        mut self,
        from: impl Into<NodeRole>,
        to: impl Into<NodeRole>,
        tags: &str,
    ) -> Self {
        self.connectors.push(Connector {
            from: from.into(),
            to: to.into(),
            tags: tags.to_owned(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}

/// Builds a chain of `count` copies of `unit`.
///
/// Copy `i` (1-based) is tagged `"segment {i}"` and translated by `i * offset`.
/// Between every pair of adjacent segments each junction connector becomes one
/// pair on the returned chain, so the chain holds `junction.len() * (count - 1)`
/// pairs. Roles are resolved against `unit` before anything is built.
pub fn replicate(unit: &Structure, count: usize, offset: Vec3, junction: &Junction) -> Result<Structure> {
    let mut wiring = Vec::with_capacity(junction.len());
    for connector in &junction.connectors {
        let from = connector.from.resolve(unit)?;
        let to = connector.to.resolve(unit)?;
        wiring.push((from, to, connector.tags.as_str()));
    }

    let mut chain = Structure::new();
    for i in 1..=count {
        let mut segment = unit.clone();
        segment.add_tags(&format!("segment {i}"));
        segment.translate(offset * i as f32);
        chain.add_child(segment);
    }

    for i in 1..chain.children().len() {
        let prev: Vec<Vec3> = chain.children()[i - 1].nodes().iter().map(|n| n.position()).collect();
        let next: Vec<Vec3> = chain.children()[i].nodes().iter().map(|n| n.position()).collect();
        for (k, &(from, to, tags)) in wiring.iter().enumerate() {
            if prev[from] == next[to] {
                return Err(StructureError::InvalidArgument(format!(
                    "connector {k} (\"{tags}\") joins coincident nodes of segment {i} and segment {}",
                    i + 1
                )));
            }
            chain.connect(prev[from], next[to], tags)?;
        }
    }

    tracing::info!(
        segments = count,
        connectors = chain.pairs().len(),
        "replicated unit"
    );
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::Tagged;

    fn unit() -> Structure {
        let mut s = Structure::new();
        s.add_node(0.0, 0.0, 0.0);
        s.add_node(1.0, 0.0, 0.0);
        s.node_mut(1).unwrap().add_tags("tip");
        s.add_pair(0, 1, "rod").unwrap();
        s
    }

    fn junction() -> Junction {
        Junction::new()
            .connect(NodeRole::Index(0), NodeRole::Index(0), "straight muscle")
            .connect(NodeRole::Index(0), "tip", "diagonal muscle")
    }

    #[test]
    fn zero_and_one_segments_have_no_connectors() {
        let empty = replicate(&unit(), 0, Vec3::Z, &junction()).unwrap();
        assert!(empty.children().is_empty());
        assert!(empty.pairs().is_empty());

        let single = replicate(&unit(), 1, Vec3::Z, &junction()).unwrap();
        assert_eq!(single.children().len(), 1);
        assert!(single.pairs().is_empty());
    }

    #[test]
    fn connectors_link_adjacent_segments() {
        let chain = replicate(&unit(), 3, Vec3::Z, &junction()).unwrap();
        assert_eq!(chain.pairs().len(), 4);

        let (a, b) = chain.pair_positions(&chain.pairs()[1]);
        assert_eq!(a, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(b, Vec3::new(1.0, 0.0, 2.0));
        assert!(chain.pairs()[1].tags().matches("diagonal muscle"));
    }

    #[test]
    fn zero_offset_names_the_coincident_connector() {
        let err = replicate(&unit(), 2, Vec3::ZERO, &junction()).unwrap_err();
        match err {
            StructureError::InvalidArgument(message) => {
                assert!(message.contains("connector 0"));
                assert!(message.contains("straight muscle"));
                assert!(message.contains("segment 1 and segment 2"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_roles_fail_before_building() {
        let bad = Junction::new().connect(NodeRole::Index(0), NodeRole::Index(7), "muscle");
        assert!(matches!(
            replicate(&unit(), 2, Vec3::Z, &bad),
            Err(StructureError::UnknownNodeRole(_))
        ));

        let bad = Junction::new().connect("front", NodeRole::Index(0), "muscle");
        assert!(matches!(
            replicate(&unit(), 0, Vec3::Z, &bad),
            Err(StructureError::UnknownNodeRole(role)) if role == "front"
        ));
    }
}
