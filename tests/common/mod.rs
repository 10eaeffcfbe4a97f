#![allow(dead_code)]

use glam::Vec3;
use mxs_bridge::scene_graph::{Face, PolyMesh};

pub fn init_logger() {
    let _ = pretty_env_logger::try_init();
}

pub fn triangle() -> PolyMesh {
    let mut mesh = PolyMesh::new("triangle");
    mesh.positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
    mesh.normals = vec![Vec3::Z; 3];
    mesh.faces = vec![Face::new([0, 1, 2])];
    mesh
}

pub fn cube() -> PolyMesh {
    let mut mesh = PolyMesh::new("cube");
    mesh.positions = vec![
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
    ];
    mesh.normals = mesh.positions.iter().map(|p| p.normalize()).collect();
    mesh.faces = vec![
        Face::new([0, 3, 2, 1]),
        Face::new([4, 5, 6, 7]),
        Face::new([0, 1, 5, 4]),
        Face::new([1, 2, 6, 5]),
        Face::new([2, 3, 7, 6]),
        Face::new([3, 0, 4, 7]),
    ];
    mesh
}
