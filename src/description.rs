//! JSON structure descriptions.
//!
//! ```json
//! {
//!   "structure": {
//!     "nodes": [{ "coordinates": [0.0, 0.0, 0.0] }, { "coordinates": [0.0, 5.0, 0.0] }],
//!     "rods": [[1, 2]],
//!     "muscles": []
//!   },
//!   "parameters": {
//!     "rods": { "radius": 0.5, "density": 1.0 },
//!     "muscles": { "stiffness": 1000.0, "damping": 10.0, "pretension": 100.0 }
//!   }
//! }
//! ```
//!
//! Pair entries use one-based node numbers.

use crate::config::{CableConfig, RodConfig};
use crate::error::{Result, StructureError};
use crate::registry::{BuildSpec, ComponentBuilder};
use crate::structure::Structure;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Description {
    pub structure: StructureSection,
    pub parameters: Parameters,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructureSection {
    pub nodes: Vec<NodeEntry>,
    pub rods: Vec<[usize; 2]>,
    pub muscles: Vec<[usize; 2]>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub coordinates: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub rods: RodParameters,
    pub muscles: MuscleParameters,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RodParameters {
    pub radius: f32,
    pub density: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MuscleParameters {
    pub stiffness: f32,
    pub damping: f32,
    pub pretension: f32,
}

impl Description {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| StructureError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&content)
    }

    /// Builds the described structure: nodes in order, then `"rod"` pairs,
    /// then `"muscle"` pairs.
    pub fn to_structure(&self) -> Result<Structure> {
        let mut structure = Structure::new();
        for node in &self.structure.nodes {
            let [x, y, z] = node.coordinates;
            structure.add_node(x, y, z);
        }
        add_pairs(&mut structure, &self.structure.rods, "rod")?;
        add_pairs(&mut structure, &self.structure.muscles, "muscle")?;
        tracing::debug!(
            nodes = structure.nodes().len(),
            pairs = structure.pairs().len(),
            "described structure"
        );
        Ok(structure)
    }

    /// Registers `"rod"` and `"muscle"` builders from the parameters block.
    pub fn build_spec(&self) -> BuildSpec {
        let rods = self.parameters.rods;
        let muscles = self.parameters.muscles;
        BuildSpec::new()
            .with_builder(
                "rod",
                ComponentBuilder::Rod(RodConfig::new(rods.radius, rods.density)),
            )
            .with_builder(
                "muscle",
                ComponentBuilder::Cable(CableConfig::new(
                    muscles.stiffness,
                    muscles.damping,
                    muscles.pretension,
                )),
            )
    }
}

fn add_pairs(structure: &mut Structure, pairs: &[[usize; 2]], tag: &str) -> Result<()> {
    for (i, &[a, b]) in pairs.iter().enumerate() {
        let (Some(from), Some(to)) = (a.checked_sub(1), b.checked_sub(1)) else {
            return Err(StructureError::Description(format!(
                "{tag} {i}: node numbers are one-based, got [{a}, {b}]"
            )));
        };
        structure.add_pair(from, to, tag)?;
    }
    Ok(())
}
