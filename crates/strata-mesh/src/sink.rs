use crate::geom::Transform;
use strata_world::NamespacedId;
use vek::{Vec2, Vec3};

/// Texture coordinates used when a face arrives without its own: the unit
/// square, wound to match the box face windings.
pub const UNIT_UVS: [Vec2<f64>; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Receives finished quads from the mesher.
///
/// This is the seam to serialization: an exporter implements it and writes
/// whatever format it likes. One operation, mirroring what the mesher
/// produces: four coplanar vertices, an optional texture-coordinate set
/// (`None` means the unit square), an optional placement applied to the
/// positions, and the face's material.
pub trait FaceSink {
    fn add_face(
        &mut self,
        vertices: [Vec3<f64>; 4],
        uvs: Option<[Vec2<f64>; 4]>,
        transform: Option<&Transform>,
        material: &NamespacedId,
    );
}

/// One stored quad: positions already placed, texture coordinates already
/// defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub vertices: [Vec3<f64>; 4],
    pub uvs: [Vec2<f64>; 4],
    pub material: NamespacedId,
}

/// An in-memory sink that keeps faces in arrival order for a serializer to
/// drain.
#[derive(Debug, Default)]
pub struct MeshBuffer {
    pub faces: Vec<Face>,
}

impl MeshBuffer {
    pub fn new() -> Self {
        MeshBuffer::default()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn clear(&mut self) {
        self.faces.clear();
    }
}

impl FaceSink for MeshBuffer {
    fn add_face(
        &mut self,
        vertices: [Vec3<f64>; 4],
        uvs: Option<[Vec2<f64>; 4]>,
        transform: Option<&Transform>,
        material: &NamespacedId,
    ) {
        let vertices = match transform {
            Some(t) => vertices.map(|v| t.apply(v)),
            None => vertices,
        };
        self.faces.push(Face {
            vertices,
            uvs: uvs.unwrap_or(UNIT_UVS),
            material: material.clone(),
        });
    }
}
