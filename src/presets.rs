//! A ready-made tetrahedral spine: unit geometry, junction wiring and
//! material parameters.

use crate::config::{CableConfig, RodConfig};
use crate::error::{Result, StructureError};
use crate::model::TensegrityModel;
use crate::node::Node;
use crate::registry::{BuildSpec, ComponentBuilder};
use crate::replicate::{Junction, replicate};
use crate::structure::Structure;
use glam::Vec3;

/// Edge length of one tetrahedron.
pub const EDGE: f32 = 38.1;

/// Where the first unit is placed before replication.
pub const UNIT_POSITION: Vec3 = Vec3::new(0.0, 2.0, 100.0);

/// Spacing between consecutive segments.
pub const SEGMENT_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -21.5);

/// Controller labels and the tags they select.
pub const MUSCLE_GROUPS: [(&str, &str); 6] = [
    ("inner left", "inner left muscle"),
    ("inner right", "inner right muscle"),
    ("inner top", "inner top muscle"),
    ("outer left", "outer left muscle"),
    ("outer right", "outer right muscle"),
    ("outer top", "outer top muscle"),
];

/// One tetrahedral vertebra.
///
/// Nodes: 0 right, 1 left, 2 top (the base triangle), 3 front tip, then the
/// midpoints of the right and left base edges (tagged `"PCB"`). Eight rods.
pub fn tetra_unit(edge: f32) -> Result<Structure> {
    let height = 3.0_f32.sqrt() / 2.0 * edge;

    let mut tetra = Structure::new();
    tetra.add_node_at(Node::new(-edge / 2.0, 0.0, 0.0).with_tags("base right"));
    tetra.add_node_at(Node::new(edge / 2.0, 0.0, 0.0).with_tags("base left"));
    tetra.add_node_at(Node::new(0.0, height, 0.0).with_tags("base top"));
    tetra.add_node_at(
        Node::new(0.0, height / 2.0, 3.0_f32.sqrt() / 2.0 * height).with_tags("tip front"),
    );

    let nodes = tetra.nodes().to_vec();
    tetra.add_node_at(nodes[0].midpoint(&nodes[2]).with_tags("PCB"));
    tetra.add_node_at(nodes[1].midpoint(&nodes[2]).with_tags("PCB"));

    let rods = [
        (0, 1, "back bottom rod"),
        (0, 4, "back rightBottom rod"),
        (4, 2, "back rightTop rod"),
        (0, 3, "front right rod"),
        (1, 5, "back leftBottom rod"),
        (5, 2, "back leftTop rod"),
        (1, 3, "front left rod"),
        (2, 3, "front top rod"),
    ];
    for (from, to, tags) in rods {
        tetra.add_pair(from, to, tags)?;
    }
    Ok(tetra)
}

/// Six muscles per junction: each base vertex to its counterpart (outer) and
/// to the next segment's tip (inner).
pub fn tetra_junction() -> Junction {
    Junction::new()
        .connect("right", "right", "outer right muscle")
        .connect("left", "left", "outer left muscle")
        .connect("top", "top", "outer top muscle")
        .connect("right", "tip", "inner right muscle")
        .connect("left", "tip", "inner left muscle")
        .connect("top", "tip", "inner top muscle")
}

/// A spine of `segments` vertebrae.
pub fn tetra_spine(segments: usize) -> Result<Structure> {
    let mut unit = tetra_unit(EDGE)?;
    unit.translate(UNIT_POSITION);
    replicate(&unit, segments, SEGMENT_OFFSET, &tetra_junction())
}

/// Builders for the spine: light rods, stiff top muscles and softer side muscles.
pub fn tetra_spine_spec() -> BuildSpec {
    let radius = 0.635;
    let density = 0.00311;
    let friction = 0.8;

    let top = CableConfig::new(10000.0, 10.0, 0.0)
        .with_max_tension(7000.0)
        .with_target_velocity(7.0);
    let side = CableConfig::new(1355.8, 10.0, 0.0)
        .with_max_tension(7000.0)
        .with_target_velocity(7.0);

    BuildSpec::new()
        .with_builder(
            "rod",
            ComponentBuilder::Rod(RodConfig::new(radius, density).with_friction(friction)),
        )
        .with_builder(
            "static rod",
            ComponentBuilder::Rod(RodConfig::new(radius, 0.0).with_friction(friction)),
        )
        .with_builder("top muscle", ComponentBuilder::Cable(top))
        .with_builder("left muscle", ComponentBuilder::Cable(side))
        .with_builder("right muscle", ComponentBuilder::Cable(side))
}

/// Binds every [`MUSCLE_GROUPS`] label on `model`.
pub fn bind_muscle_groups(model: &mut TensegrityModel) {
    for (label, query) in MUSCLE_GROUPS {
        model.bind(label, query);
    }
}

/// Instruments the first two vertebrae of a built spine.
///
/// The first segment's tip rides on the first rod; the second segment's tip,
/// left and right vertices ride on the tenth rod (the second segment's second
/// rod).
pub fn attach_spine_markers(model: &mut TensegrityModel, spine: &Structure) -> Result<()> {
    let segments = spine.children();
    let color = Vec3::X;
    if let Some(first) = segments.first() {
        model.attach_marker(0, node_position(first, 3)?, color, 0)?;
    }
    if let Some(second) = segments.get(1) {
        for node in [3, 1, 0] {
            model.attach_marker(9, node_position(second, node)?, color, 0)?;
        }
    }
    Ok(())
}

fn node_position(segment: &Structure, index: usize) -> Result<Vec3> {
    segment
        .nodes()
        .get(index)
        .map(|n| n.position())
        .ok_or_else(|| StructureError::UnknownNodeRole(format!("node {index} of a spine segment")))
}
