//! Indexed triangle meshes for the primitive shapes in the scene.

use std::f32::consts::PI;

use glam::{vec3, Vec3};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// xyz triples.
    pub positions: Vec<f32>,
    /// Unit normals, one per position.
    pub normals: Vec<f32>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) {
        self.positions.extend_from_slice(&position.to_array());
        self.normals.extend_from_slice(&normal.to_array());
    }

    fn next_index(&self) -> u16 {
        self.vertex_count() as u16
    }
}

/// Axis-aligned box centred on the origin, four vertices per face so each
/// face gets a flat normal.
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let half = vec3(width, height, depth) * 0.5;
    // (normal, u, v) with u x v == normal keeps every face counter-clockwise.
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut mesh = MeshData::default();
    for (normal, u, v) in faces {
        let base = mesh.next_index();
        for (su, sv) in corners {
            mesh.push_vertex((normal + u * su + v * sv) * half, normal);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Latitude/longitude sphere. The pole rows emit one triangle per segment
/// so no degenerate triangles are produced.
pub fn uv_sphere(radius: f32, width_segments: u16, height_segments: u16) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshData::default();

    for iy in 0..=hs {
        let v = f32::from(iy) / f32::from(hs);
        for ix in 0..=ws {
            let u = f32::from(ix) / f32::from(ws);
            let normal = vec3(
                -(u * 2.0 * PI).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * 2.0 * PI).sin() * (v * PI).sin(),
            );
            mesh.push_vertex(normal * radius, normal);
        }
    }

    let row = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Flat rectangle in the XY plane facing +Z.
pub fn plane(width: f32, height: f32) -> MeshData {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let mut mesh = MeshData::default();
    for (x, y) in [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)] {
        mesh.push_vertex(vec3(x, y, 0.0), Vec3::Z);
    }
    mesh.indices.extend_from_slice(&[0, 1, 2, 0, 2, 3]);
    mesh
}
