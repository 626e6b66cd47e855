use crate::geometry::{bounds, compute_vertex_normals};
use crate::{Error, MAX_INFLUENCES, Pose, VertexWeights, WeightTolerance};
use glam::Vec3;

/// Skinned triangle mesh.
///
/// Keeps the bind-space positions next to the deformed ones so that every frame is
/// skinned from the undeformed geometry. Topology and weights are fixed at construction.
#[derive(Clone, Debug)]
pub struct Mesh<const N: usize = MAX_INFLUENCES> {
    bind_positions: Vec<Vec3>,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    weights: Vec<VertexWeights<N>>,
    max_joint: Option<usize>,
}

impl<const N: usize> Mesh<N> {
    /// Builds a mesh and validates it against a skeleton of `joint_count` joints.
    pub fn new(
        positions: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
        weights: Vec<VertexWeights<N>>,
        joint_count: usize,
    ) -> Result<Self, Error> {
        Self::with_tolerance(
            positions,
            triangles,
            weights,
            joint_count,
            WeightTolerance::default(),
        )
    }

    /// Like [`Mesh::new`] with an explicit weight-sum tolerance. Accepted weights are
    /// rescaled to sum to 1.
    pub fn with_tolerance(
        positions: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
        mut weights: Vec<VertexWeights<N>>,
        joint_count: usize,
        tolerance: WeightTolerance,
    ) -> Result<Self, Error> {
        if positions.len() != weights.len() {
            return Err(Error::WeightCountMismatch {
                positions: positions.len(),
                weights: weights.len(),
            });
        }
        for (vertex, w) in weights.iter_mut().enumerate() {
            w.validate(vertex, joint_count, tolerance)?;
            w.normalize();
        }
        let vertex_count = positions.len();
        for (triangle, indices) in triangles.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(Error::InvalidTriangle {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }

        let max_joint = weights
            .iter()
            .flat_map(|w| w.influences().map(|(joint, _)| joint))
            .max();

        let mut mesh = Self {
            bind_positions: positions.clone(),
            positions,
            normals: Vec::new(),
            triangles,
            weights,
            max_joint,
        };
        mesh.fill_normals();
        log::debug!(
            "mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangles.len()
        );
        Ok(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn bind_positions(&self) -> &[Vec3] {
        &self.bind_positions
    }

    /// Positions after the last [`Mesh::apply_skinning`] (bind positions before that).
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn weights(&self) -> &[VertexWeights<N>] {
        &self.weights
    }

    /// Axis-aligned bounds of the current positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        bounds(&self.positions)
    }

    /// Number of joints the weights require from a skinning transform set.
    pub fn required_joint_count(&self) -> usize {
        self.max_joint.map_or(0, |j| j + 1)
    }

    /// Linear-blend skinning: every vertex becomes the weighted sum of its bind position
    /// transformed by each influencing joint.
    ///
    /// The sum is accumulated as weighted offsets from the bind position, so identity
    /// transforms reproduce the bind positions exactly.
    ///
    /// `transforms` are per-joint skinning transforms (see
    /// [`Skeleton::skinning_transforms`](crate::Skeleton::skinning_transforms)). Weights
    /// were validated and normalized at construction and are not re-checked here; an
    /// influence whose joint is missing from `transforms` leaves its share at the bind
    /// position.
    pub fn apply_skinning(&mut self, transforms: &Pose) {
        if transforms.len() < self.required_joint_count() {
            log::warn!(
                "skinning with {} transforms, mesh references {} joints",
                transforms.len(),
                self.required_joint_count()
            );
        }
        let joints = transforms.joints();
        for ((out, &bind), w) in self
            .positions
            .iter_mut()
            .zip(&self.bind_positions)
            .zip(&self.weights)
        {
            let mut offset = Vec3::ZERO;
            for (&joint, &weight) in w.joints.iter().zip(&w.weights) {
                if weight == 0.0 {
                    continue;
                }
                let Some(transform) = joints.get(joint) else {
                    continue;
                };
                offset += (transform.transform_point(bind) - bind) * weight;
            }
            *out = bind + offset;
        }
    }

    /// Recomputes vertex normals from the current positions.
    pub fn fill_normals(&mut self) {
        compute_vertex_normals(&self.positions, &self.triangles, &mut self.normals);
    }

    /// [`Mesh::apply_skinning`] followed by [`Mesh::fill_normals`].
    pub fn skin(&mut self, transforms: &Pose) {
        self.apply_skinning(transforms);
        self.fill_normals();
    }

    /// Restores the bind-space geometry.
    pub fn reset_to_bind_pose(&mut self) {
        self.positions.copy_from_slice(&self.bind_positions);
        self.fill_normals();
    }
}
