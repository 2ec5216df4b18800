use super::vertex::Vertex;
use std::f32::consts::PI;

/// CPU-side mesh, ready for upload into vertex and index buffers.
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

/// Unit sphere as a latitude/longitude grid. `slices` counts the segments
/// around the equator, `stacks` the segments from pole to pole.
pub fn sphere(slices: usize, stacks: usize) -> MeshData {
    let mut vertices = Vec::with_capacity((slices + 1) * (stacks + 1));
    for stack in 0..stacks + 1 {
        let v = stack as f32 / stacks as f32;
        let theta = v * PI;
        for slice in 0..slices + 1 {
            let u = slice as f32 / slices as f32;
            let phi = u * 2.0 * PI;
            let position = [
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            ];
            vertices.push(Vertex {
                position,
                normal: position,
                texcoord: [u, 1.0 - v],
            });
        }
    }

    let row = slices + 1;
    let mut indices = Vec::with_capacity(slices * stacks * 6);
    for stack in 0..stacks {
        for slice in 0..slices {
            let index = stack * row + slice;
            indices.push(index as u16);
            indices.push((index + row) as u16);
            indices.push((index + row + 1) as u16);
            indices.push(index as u16);
            indices.push((index + row + 1) as u16);
            indices.push((index + 1) as u16);
        }
    }

    MeshData { vertices, indices }
}

/// Flat annulus in the equatorial plane, its normal along the vertical
/// axis. Texture coordinates run radially so a banded texture reads as
/// rings.
pub fn ring(inner_radius: f32, outer_radius: f32, segments: usize) -> MeshData {
    let mut vertices = Vec::with_capacity((segments + 1) * 2);
    for segment in 0..segments + 1 {
        let u = segment as f32 / segments as f32;
        let phi = u * 2.0 * PI;
        let (sin, cos) = phi.sin_cos();
        for &(radius, v) in [(inner_radius, 0.0f32), (outer_radius, 1.0)].iter() {
            vertices.push(Vertex {
                position: [radius * cos, 0.0, radius * sin],
                normal: [0.0, 1.0, 0.0],
                texcoord: [v, u],
            });
        }
    }

    let mut indices = Vec::with_capacity(segments * 6);
    for segment in 0..segments {
        let index = (segment * 2) as u16;
        indices.push(index);
        indices.push(index + 1);
        indices.push(index + 3);
        indices.push(index);
        indices.push(index + 3);
        indices.push(index + 2);
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_grid_has_the_expected_counts() {
        let mesh = sphere(16, 8);
        assert_eq!(mesh.vertices.len(), 17 * 9);
        assert_eq!(mesh.indices.len(), 16 * 8 * 6);
    }

    #[test]
    fn sphere_indices_stay_in_range() {
        let mesh = sphere(32, 16);
        let count = mesh.vertices.len() as u16;
        assert!(mesh.indices.iter().all(|&index| index < count));
    }

    #[test]
    fn sphere_vertices_sit_on_the_unit_sphere() {
        let mesh = sphere(12, 6);
        for vertex in &mesh.vertices {
            let [x, y, z] = vertex.position;
            let length = (x * x + y * y + z * z).sqrt();
            assert!((length - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn ring_vertices_stay_between_the_radii() {
        let mesh = ring(0.45, 0.675, 24);
        assert_eq!(mesh.vertices.len(), 25 * 2);
        assert_eq!(mesh.indices.len(), 24 * 6);
        for vertex in &mesh.vertices {
            let [x, y, z] = vertex.position;
            assert_eq!(y, 0.0);
            let radius = (x * x + z * z).sqrt();
            assert!(radius > 0.45 - 1e-5 && radius < 0.675 + 1e-5);
        }
    }
}
