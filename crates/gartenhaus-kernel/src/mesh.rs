//! Triangle meshes and binary STL export.

use crate::error::{KernelError, Result};

/// Output triangle mesh for rendering and export.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Append a convex polygon as a triangle fan.
    pub(crate) fn push_fan(&mut self, polygon: impl IntoIterator<Item = [f32; 3]>) {
        let base = self.num_vertices() as u32;
        let mut count = 0u32;
        for v in polygon {
            self.vertices.extend_from_slice(&v);
            count += 1;
        }
        for i in 1..count.saturating_sub(1) {
            self.indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }

    /// Encode as binary STL.
    pub fn to_stl_bytes(&self) -> Result<Vec<u8>> {
        if self.indices.is_empty() {
            return Err(KernelError::EmptyGeometry);
        }
        let num_triangles = self.num_triangles();
        let mut data = Vec::with_capacity(84 + num_triangles * 50);

        let mut header = [b' '; 80];
        let title = b"gartenhaus STL export";
        header[..title.len()].copy_from_slice(title);
        data.extend_from_slice(&header);
        data.extend_from_slice(&(num_triangles as u32).to_le_bytes());

        for tri in self.indices.chunks(3) {
            let v = |k: usize| {
                let i = tri[k] as usize * 3;
                [self.vertices[i], self.vertices[i + 1], self.vertices[i + 2]]
            };
            let (v0, v1, v2) = (v(0), v(1), v(2));

            let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
            let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
            let nx = e1[1] * e2[2] - e1[2] * e2[1];
            let ny = e1[2] * e2[0] - e1[0] * e2[2];
            let nz = e1[0] * e2[1] - e1[1] * e2[0];
            let len = (nx * nx + ny * ny + nz * nz).sqrt();
            let (nx, ny, nz) = if len > 1e-10 {
                (nx / len, ny / len, nz / len)
            } else {
                (0.0, 0.0, 1.0)
            };

            for c in [nx, ny, nz] {
                data.extend_from_slice(&c.to_le_bytes());
            }
            for vert in [v0, v1, v2] {
                for c in vert {
                    data.extend_from_slice(&c.to_le_bytes());
                }
            }
            data.extend_from_slice(&0u16.to_le_bytes());
        }

        Ok(data)
    }
}
