//! Wavefront OBJ export

use std::fmt::Write;

use crate::block::BlockSet;

/// Corners of a unit cube around its center, front face first
const CUBE_VERTICES: [[f64; 3]; 8] = [
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [-0.5, -0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [0.5, 0.5, -0.5],
    [0.5, -0.5, -0.5],
];

/// Quads as 1-based indices into a block's eight vertices:
/// front, back, top, bottom, right, left
const CUBE_FACES: [[usize; 4]; 6] = [
    [1, 2, 3, 4],
    [8, 7, 6, 5],
    [4, 3, 7, 6],
    [1, 5, 8, 2],
    [2, 8, 7, 3],
    [5, 1, 4, 6],
];

/// Mesh text for `set`. Every block gets its own eight vertices; all vertex
/// lines come first, then six quads per block in set order.
pub fn to_obj(set: &BlockSet, name: &str) -> String {
    let mut out = String::with_capacity(64 + set.len() * 8 * 24);
    // write! into a String cannot fail
    let _ = writeln!(out, "# Brickforge Generated 3D Object: {}", name);

    for block in set {
        for [dx, dy, dz] in CUBE_VERTICES {
            let _ = writeln!(
                out,
                "v {} {} {}",
                f64::from(block.x) + dx,
                f64::from(block.y) + dy,
                f64::from(block.z) + dz
            );
        }
    }

    for i in 0..set.len() {
        let offset = i * CUBE_VERTICES.len();
        for [a, b, c, d] in CUBE_FACES {
            let _ = writeln!(out, "f {} {} {} {}", offset + a, offset + b, offset + c, offset + d);
        }
    }

    out
}
