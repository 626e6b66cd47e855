use crate::{Hierarchy, Mesh, Pose, extract_bones};

/// Flat vertex data of a skinned mesh, ready to be copied into GPU buffers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.indices.clear();
    }

    /// Rewrites positions, normals and indices from `mesh`, reusing the allocations.
    pub fn update_from<const N: usize>(&mut self, mesh: &Mesh<N>) {
        self.positions.clear();
        self.positions
            .extend(mesh.positions().iter().map(|p| p.to_array()));
        self.normals.clear();
        self.normals
            .extend(mesh.normals().iter().map(|n| n.to_array()));
        self.indices.clear();
        self.indices
            .extend(mesh.triangles().iter().flat_map(|tri| tri.iter().copied()));
    }
}

pub fn build_mesh_buffers<const N: usize>(mesh: &Mesh<N>) -> MeshBuffers {
    let mut out = MeshBuffers::default();
    out.update_from(mesh);
    out
}

/// Skeleton drawn as line segments; consecutive vertices form one bone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoneLines {
    pub vertices: Vec<[f32; 3]>,
}

impl BoneLines {
    pub fn from_pose(global: &Pose, hierarchy: &Hierarchy) -> Self {
        Self {
            vertices: extract_bones(global, hierarchy)
                .into_iter()
                .map(|v| v.to_array())
                .collect(),
        }
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }
}
