use bytemuck::{Pod, Zeroable};
use std::f32::consts::{PI, TAU};

/// Width and height segments of the sphere mesh.
pub const SPHERE_SEGMENTS: u16 = 32;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

/// Unit-edge cube centered on the origin, four vertices per face.
pub fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    let v = |x: f32, y: f32, z: f32| Vertex { position: [x, y, z] };
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        v(-p, -p,  p), v( p, -p,  p), v( p,  p,  p), v(-p,  p,  p),
        // -Z face
        v( p, -p, -p), v(-p, -p, -p), v(-p,  p, -p), v( p,  p, -p),
        // +X face
        v( p, -p,  p), v( p, -p, -p), v( p,  p, -p), v( p,  p,  p),
        // -X face
        v(-p, -p, -p), v(-p, -p,  p), v(-p,  p,  p), v(-p,  p, -p),
        // +Y face
        v(-p,  p,  p), v( p,  p,  p), v( p,  p, -p), v(-p,  p, -p),
        // -Y face
        v(-p, -p, -p), v( p, -p, -p), v( p, -p,  p), v(-p, -p,  p),
    ];
    let indices = (0..6u16)
        .flat_map(|face| {
            let b = face * 4;
            [b, b + 1, b + 2, b + 2, b + 3, b]
        })
        .collect();
    (vertices, indices)
}

/// Unit-radius UV sphere with `segments` slices around and from pole to pole.
///
/// Rows run from the north pole (+Y) down; the pole rows emit a single
/// triangle per quad so no degenerate triangles are produced.
pub fn sphere_mesh(segments: u16) -> (Vec<Vertex>, Vec<u16>) {
    let w = segments;
    let h = segments;
    let mut vertices = Vec::with_capacity(usize::from(w + 1) * usize::from(h + 1));
    for iy in 0..=h {
        let v = f32::from(iy) / f32::from(h);
        let theta = v * PI;
        for ix in 0..=w {
            let u = f32::from(ix) / f32::from(w);
            let phi = u * TAU;
            vertices.push(Vertex {
                position: [
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                ],
            });
        }
    }

    let row = w + 1;
    let mut indices = Vec::new();
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    (vertices, indices)
}
