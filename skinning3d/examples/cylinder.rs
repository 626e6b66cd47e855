use glam::Vec3;
use skinning3d::{
    Animation, Character, Hierarchy, Joint, Mesh, Pose, Skeleton, VertexWeights,
    build_mesh_buffers, rotation_from_axis_angle,
};
use std::f32::consts::PI;
use std::sync::Arc;

/// Open cylinder along +Z, skinned to joints 0 and 1 with weights blending linearly along
/// its length.
fn build_cylinder(
    radius: f32,
    length: f32,
    nu: usize,
    nv: usize,
) -> (Vec<Vec3>, Vec<[u32; 3]>, Vec<VertexWeights<2>>) {
    let mut positions = Vec::with_capacity(nu * nv);
    let mut weights = Vec::with_capacity(nu * nv);
    for ku in 0..nu {
        let u = 2.0 * PI * ku as f32 / nu as f32;
        for kv in 0..nv {
            let t = kv as f32 / (nv - 1) as f32;
            positions.push(Vec3::new(radius * u.cos(), radius * u.sin(), length * t));
            weights.push(VertexWeights {
                joints: [0, 1],
                weights: [1.0 - t, t],
            });
        }
    }

    let mut triangles = Vec::with_capacity(nu * (nv - 1) * 2);
    for ku in 0..nu {
        for kv in 0..nv - 1 {
            let k0 = (nv * ku + kv) as u32;
            let k1 = (nv * ((ku + 1) % nu) + kv) as u32;
            let k2 = (nv * ((ku + 1) % nu) + kv + 1) as u32;
            let k3 = (nv * ku + kv + 1) as u32;
            triangles.push([k0, k1, k2]);
            triangles.push([k0, k2, k3]);
        }
    }
    (positions, triangles, weights)
}

fn main() -> Result<(), skinning3d::Error> {
    let length = 50.0;
    let radius = 4.0;

    let hierarchy = Hierarchy::from_parent_indices(&[-1, 0, 1])?;
    let bind_pose = Pose::new(vec![
        Joint::IDENTITY,
        Joint::from_position(Vec3::new(0.0, 0.0, length / 2.0)),
        Joint::from_position(Vec3::new(0.0, 0.0, length / 2.0)),
    ]);
    let skeleton = Skeleton::new(hierarchy, bind_pose)?;

    // Four keyframes bending the middle joint about Y in 30 degree steps.
    let keyframes = (0..4)
        .map(|k| {
            let mut pose = skeleton.bind_pose().clone();
            pose.joints_mut()[1].orientation =
                rotation_from_axis_angle(Vec3::Y, k as f32 * PI / 6.0);
            pose
        })
        .collect::<Vec<_>>();
    let animation = Animation::new("bend", keyframes, skeleton.hierarchy())?;

    let (positions, triangles, weights) = build_cylinder(radius, length, 20, 30);
    let mesh = Mesh::new(positions, triangles, weights, skeleton.joint_count())?;

    let mut character = Character::new(Arc::new(skeleton), Arc::new(animation), mesh, 1.0)?;

    for step in 0..=16 {
        if step > 0 {
            character.update(0.25)?;
        }
        let cursor = character.state().cursor();
        let tip = character.global_pose()[2].position;
        let (min, max) = character.mesh().bounds().unwrap_or((Vec3::ZERO, Vec3::ZERO));
        println!(
            "step {step:2} keyframe {} phase {:.2} tip ({:7.3}, {:7.3}, {:7.3}) bounds x [{:7.3}, {:7.3}] z [{:7.3}, {:7.3}] bones {}",
            cursor.index,
            cursor.phase,
            tip.x,
            tip.y,
            tip.z,
            min.x,
            max.x,
            min.z,
            max.z,
            character.bone_lines().segment_count(),
        );
    }

    let buffers = build_mesh_buffers(character.mesh());
    println!(
        "buffers: {} positions, {} normals, {} indices",
        buffers.positions.len(),
        buffers.normals.len(),
        buffers.indices.len()
    );
    println!(
        "middle joint orientation: {:?}",
        character.global_pose()[1].orientation
    );
    Ok(())
}
