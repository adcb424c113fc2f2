//! Axis-aligned box emission and material-list expansion.

use crate::geom::Transform;
use crate::sink::FaceSink;
use log::warn;
use strata_world::NamespacedId;
use vek::{Vec2, Vec3};

/// Expands an abbreviated material list to the fixed six-side order
/// [top, north, south, west, east, bottom].
///
/// One entry covers all sides; two put the first on top and bottom and the
/// second on the walls; three to five use top / walls / bottom (entries
/// past the third are ignored); six map one to one. An empty list is
/// logged and yields nothing to draw.
pub fn expand_materials(materials: &[NamespacedId]) -> Option<[NamespacedId; 6]> {
    match materials {
        [] => {
            warn!("empty material list, nothing to draw");
            None
        }
        [all] => Some([
            all.clone(),
            all.clone(),
            all.clone(),
            all.clone(),
            all.clone(),
            all.clone(),
        ]),
        [cap, wall] => Some([
            cap.clone(),
            wall.clone(),
            wall.clone(),
            wall.clone(),
            wall.clone(),
            cap.clone(),
        ]),
        [top, north, south, west, east, bottom, ..] => Some([
            top.clone(),
            north.clone(),
            south.clone(),
            west.clone(),
            east.clone(),
            bottom.clone(),
        ]),
        // Three, four, or five entries: top / walls / bottom, the rest
        // ignored.
        [top, wall, bottom, ..] => Some([
            top.clone(),
            wall.clone(),
            wall.clone(),
            wall.clone(),
            wall.clone(),
            bottom.clone(),
        ]),
    }
}

/// Emits up to six quads for the axis-aligned box from `corner0` (start)
/// to `corner1` (end), with one fixed winding per face.
///
/// `visible` masks faces in [`Direction::ALL`][crate::Direction::ALL]
/// order (`None` draws all six). `uvs` supplies per-side texture
/// coordinates; `None` at either level falls back to the sink's default
/// mapping. `transform` travels with each face for the sink to apply.
pub fn add_box(
    sink: &mut dyn FaceSink,
    corner0: Vec3<f64>,
    corner1: Vec3<f64>,
    transform: Option<&Transform>,
    materials: &[NamespacedId; 6],
    uvs: Option<&[Option<[Vec2<f64>; 4]>; 6]>,
    visible: Option<&[bool; 6]>,
) {
    let (xs, ys, zs) = (corner0.x, corner0.y, corner0.z);
    let (xe, ye, ze) = (corner1.x, corner1.y, corner1.z);
    let v = Vec3::new;

    let faces: [[Vec3<f64>; 4]; 6] = [
        // top
        [v(xs, ye, ze), v(xe, ye, ze), v(xe, ye, zs), v(xs, ye, zs)],
        // north
        [v(xe, ys, zs), v(xs, ys, zs), v(xs, ye, zs), v(xe, ye, zs)],
        // south
        [v(xs, ys, ze), v(xe, ys, ze), v(xe, ye, ze), v(xs, ye, ze)],
        // west
        [v(xs, ys, zs), v(xs, ys, ze), v(xs, ye, ze), v(xs, ye, zs)],
        // east
        [v(xe, ys, ze), v(xe, ys, zs), v(xe, ye, zs), v(xe, ye, ze)],
        // bottom
        [v(xe, ys, ze), v(xs, ys, ze), v(xs, ys, zs), v(xe, ys, zs)],
    ];

    for (i, vertices) in faces.into_iter().enumerate() {
        if let Some(visible) = visible {
            if !visible[i] {
                continue;
            }
        }
        let face_uvs = uvs.and_then(|u| u[i]);
        sink.add_face(vertices, face_uvs, transform, &materials[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MeshBuffer, UNIT_UVS};

    fn id(path: &str) -> NamespacedId {
        NamespacedId::minecraft(path)
    }

    #[test]
    fn expansion_shapes() {
        let a = id("a");
        let b = id("b");
        let c = id("c");

        let one = expand_materials(&[a.clone()]).unwrap();
        assert!(one.iter().all(|m| *m == a));

        let two = expand_materials(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(two[0], a);
        assert_eq!(two[5], a);
        assert!(two[1..5].iter().all(|m| *m == b));

        let three = expand_materials(&[a.clone(), b.clone(), c.clone()]).unwrap();
        assert_eq!(three[0], a);
        assert_eq!(three[5], c);
        assert!(three[1..5].iter().all(|m| *m == b));

        // Four and five entries collapse to the three-entry shape.
        let four = expand_materials(&[a.clone(), b.clone(), c.clone(), id("d")]).unwrap();
        assert_eq!(four, three);

        let six_in = [id("t"), id("n"), id("s"), id("w"), id("e"), id("bt")];
        let six = expand_materials(&six_in).unwrap();
        assert_eq!(six, six_in);

        assert_eq!(expand_materials(&[]), None);
    }

    #[test]
    fn no_visibility_argument_emits_all_six() {
        let mut buffer = MeshBuffer::new();
        let materials = expand_materials(&[id("stone")]).unwrap();
        add_box(
            &mut buffer,
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            None,
            &materials,
            None,
            None,
        );
        assert_eq!(buffer.len(), 6);
        assert!(buffer.faces.iter().all(|f| f.uvs == UNIT_UVS));
    }

    #[test]
    fn all_false_visibility_emits_nothing() {
        let mut buffer = MeshBuffer::new();
        let materials = expand_materials(&[id("stone")]).unwrap();
        add_box(
            &mut buffer,
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            None,
            &materials,
            None,
            Some(&[false; 6]),
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn face_windings_are_fixed() {
        let mut buffer = MeshBuffer::new();
        let materials = expand_materials(&[id("t"), id("n"), id("s"), id("w"), id("e"), id("bt")])
            .unwrap();
        add_box(
            &mut buffer,
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 3.0),
            None,
            &materials,
            None,
            None,
        );
        let v = Vec3::new;

        // Top face: all vertices at the end y, winding over z then x.
        assert_eq!(buffer.faces[0].material.path(), "t");
        assert_eq!(
            buffer.faces[0].vertices,
            [v(0.0, 2.0, 3.0), v(1.0, 2.0, 3.0), v(1.0, 2.0, 0.0), v(0.0, 2.0, 0.0)]
        );
        // North face sits on the start z plane.
        assert_eq!(buffer.faces[1].material.path(), "n");
        assert_eq!(
            buffer.faces[1].vertices,
            [v(1.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(0.0, 2.0, 0.0), v(1.0, 2.0, 0.0)]
        );
        // Bottom face winds opposite the top.
        assert_eq!(buffer.faces[5].material.path(), "bt");
        assert_eq!(
            buffer.faces[5].vertices,
            [v(1.0, 0.0, 3.0), v(0.0, 0.0, 3.0), v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn per_side_uvs_apply_only_where_given() {
        let mut buffer = MeshBuffer::new();
        let materials = expand_materials(&[id("stone")]).unwrap();
        let custom = [
            Vec2::new(0.0, 0.5),
            Vec2::new(0.5, 0.5),
            Vec2::new(0.5, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let mut uvs: [Option<[Vec2<f64>; 4]>; 6] = [None; 6];
        uvs[2] = Some(custom);

        add_box(
            &mut buffer,
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            None,
            &materials,
            Some(&uvs),
            None,
        );
        assert_eq!(buffer.faces[2].uvs, custom);
        assert_eq!(buffer.faces[0].uvs, UNIT_UVS);
        assert_eq!(buffer.faces[3].uvs, UNIT_UVS);
    }
}
