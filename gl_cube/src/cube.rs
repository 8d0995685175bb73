use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};
use glarea::glam::Vec3;

use crate::gfx::AttribLayout;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Vec3,
}

impl Vertex {
    const fn new(position: Vec3, color: Vec3) -> Self {
        Vertex { position, color }
    }

    pub const POSITION: AttribLayout = AttribLayout {
        components: 3,
        stride: size_of::<Vertex>() as i32,
        offset: offset_of!(Vertex, position) as i32,
    };

    pub const COLOR: AttribLayout = AttribLayout {
        components: 3,
        stride: size_of::<Vertex>() as i32,
        offset: offset_of!(Vertex, color) as i32,
    };
}

const RED: Vec3 = Vec3::X;
const GREEN: Vec3 = Vec3::Y;
const BLUE: Vec3 = Vec3::Z;
const WHITE: Vec3 = Vec3::ONE;

pub const VERTICES: [Vertex; 8] = [
    Vertex::new(Vec3::new(-1.0, -1.0, 1.0), RED),
    Vertex::new(Vec3::new(1.0, -1.0, 1.0), GREEN),
    Vertex::new(Vec3::new(1.0, 1.0, 1.0), BLUE),
    Vertex::new(Vec3::new(-1.0, 1.0, 1.0), WHITE),
    Vertex::new(Vec3::new(-1.0, -1.0, -1.0), RED),
    Vertex::new(Vec3::new(1.0, -1.0, -1.0), GREEN),
    Vertex::new(Vec3::new(1.0, 1.0, -1.0), BLUE),
    Vertex::new(Vec3::new(-1.0, 1.0, -1.0), WHITE),
];

/// Two counter-clockwise triangles per face.
#[rustfmt::skip]
pub const INDICES: [u16; 36] = [
    0, 1, 2,  2, 3, 0, // +z
    1, 5, 6,  6, 2, 1, // +x
    7, 6, 5,  5, 4, 7, // -z
    4, 0, 3,  3, 7, 4, // -x
    4, 5, 1,  1, 0, 4, // -y
    3, 2, 6,  6, 7, 3, // +y
];

/// A cube face, named by its outward axis.
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

#[cfg(test)]
impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    pub fn normal(self) -> Vec3 {
        match self {
            Face::PosX => Vec3::X,
            Face::NegX => Vec3::NEG_X,
            Face::PosY => Vec3::Y,
            Face::NegY => Vec3::NEG_Y,
            Face::PosZ => Vec3::Z,
            Face::NegZ => Vec3::NEG_Z,
        }
    }

    /// The face whose plane holds all of `corners`, if there is one.
    fn containing(corners: &[Vec3]) -> Option<Face> {
        Face::ALL.into_iter().find(|face| {
            let normal = face.normal();
            corners.iter().all(|corner| corner.dot(normal) == 1.0)
        })
    }
}

/// Reads an index buffer back as faces, one per six indices.
///
/// A group decodes to a face only when its two triangles cover exactly four
/// distinct corners lying in one face plane. `None` if any group does not,
/// or an index points past `vertices`.
#[cfg(test)]
pub fn decode_faces(vertices: &[Vertex], indices: &[u16]) -> Option<Vec<Face>> {
    if indices.len() % 6 != 0 {
        return None;
    }
    indices
        .chunks(6)
        .map(|group| {
            let mut corners: Vec<u16> = group.to_vec();
            corners.sort_unstable();
            corners.dedup();
            if corners.len() != 4 {
                return None;
            }
            let positions = corners
                .iter()
                .map(|&index| vertices.get(index as usize).map(|v| v.position))
                .collect::<Option<Vec<_>>>()?;
            Face::containing(&positions)
        })
        .collect()
}
