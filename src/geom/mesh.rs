use super::Point3;

/// Indexed triangle mesh, the filled representation of a panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeomMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
}

impl GeomMesh {
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// Fan-triangulates a closed loop from its first corner.
    ///
    /// Quads split along the `0-2` diagonal, which keeps the triangles on the
    /// loop's winding for convex and near-planar panels.
    #[must_use]
    pub fn fan(loop_points: &[Point3]) -> Self {
        let positions = loop_points.iter().map(|p| p.to_array()).collect();
        let mut indices = Vec::with_capacity(loop_points.len().saturating_sub(2) * 3);
        for k in 1..loop_points.len().saturating_sub(1) {
            indices.extend_from_slice(&[0, k as u32, (k + 1) as u32]);
        }
        Self::new(positions, indices)
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Faces as index lists, the shape the host boundary exports.
    #[must_use]
    pub fn faces(&self) -> Vec<Vec<u32>> {
        self.indices.chunks_exact(3).map(<[u32]>::to_vec).collect()
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if self
            .positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
        {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        Ok(())
    }
}
