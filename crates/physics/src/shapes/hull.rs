use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

use super::Sphere;
use crate::error::{PhysicsError, PhysicsResult};
use crate::transform::to_transform_matrix;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    pub corners: [Vec3; 3],
}

impl Triangle {
    #[must_use]
    pub const fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { corners: [a, b, c] }
    }

    /// Decode a tightly packed buffer of `f32` triples, three corners per
    /// triangle, as produced by the asset loader.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::MalformedTriangleData`] when the length is not
    /// a whole number of triangles.
    pub fn from_bytes(bytes: &[u8]) -> PhysicsResult<Vec<Triangle>> {
        if bytes.len() % std::mem::size_of::<Triangle>() != 0 {
            return Err(PhysicsError::MalformedTriangleData { len: bytes.len() });
        }
        Ok(bytes
            .chunks_exact(std::mem::size_of::<Triangle>())
            .map(bytemuck::pod_read_unaligned)
            .collect())
    }

    /// Unit normal following the corner winding, zero for degenerate triangles.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        let [a, b, c] = self.corners;
        (b - a).cross(c - a).normalize_or_zero()
    }

    #[must_use]
    pub fn edges(&self) -> [Vec3; 3] {
        let [a, b, c] = self.corners;
        [b - a, c - b, a - c]
    }

    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        let [a, b, c] = self.corners;
        Self::new(a * factor, b * factor, c * factor)
    }

    #[must_use]
    pub fn transformed(&self, transform: &Mat4) -> Self {
        let [a, b, c] = self.corners;
        Self::new(
            transform.transform_point3(a),
            transform.transform_point3(b),
            transform.transform_point3(c),
        )
    }

    /// Closest point on the triangle to `p`, by Voronoi region.
    #[must_use]
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        let [a, b, c] = self.corners;
        let ab = b - a;
        let ac = c - a;
        let ap = p - a;

        let d1 = ab.dot(ap);
        let d2 = ac.dot(ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return a;
        }

        let bp = p - b;
        let d3 = ab.dot(bp);
        let d4 = ac.dot(bp);
        if d3 >= 0.0 && d4 <= d3 {
            return b;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3);
            return a + ab * v;
        }

        let cp = p - c;
        let d5 = ab.dot(cp);
        let d6 = ac.dot(cp);
        if d6 >= 0.0 && d5 <= d6 {
            return c;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6);
            return a + ac * w;
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return b + (c - b) * w;
        }

        let denom = va + vb + vc;
        if denom.abs() <= f32::EPSILON {
            return a;
        }
        let v = vb / denom;
        let w = vc / denom;
        a + ab * v + ac * w
    }
}

/// Triangle mesh volume. Triangles stay in model space; the accumulated
/// position/rotation/scale is applied on demand.
#[derive(Clone, Debug, PartialEq)]
pub struct Hull {
    triangles: Vec<Triangle>,
    position: Vec3,
    rotation: Mat3,
    scale: Vec3,
    model_sphere: Sphere,
}

impl Hull {
    #[must_use]
    pub fn new(triangles: Vec<Triangle>, position: Vec3) -> Self {
        let model_sphere = model_bounding_sphere(&triangles);
        Self {
            triangles,
            position,
            rotation: Mat3::IDENTITY,
            scale: Vec3::ONE,
            model_sphere,
        }
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> Mat3 {
        self.rotation
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[must_use]
    pub fn world_transform(&self) -> Mat4 {
        to_transform_matrix(self.position, self.rotation, self.scale)
    }

    #[must_use]
    pub fn triangle_in_world_coord(&self, index: usize) -> Option<Triangle> {
        let transform = self.world_transform();
        self.triangles.get(index).map(|t| t.transformed(&transform))
    }

    pub fn world_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        let transform = self.world_transform();
        self.triangles.iter().map(move |t| t.transformed(&transform))
    }

    #[must_use]
    pub fn find_closest_point_on_triangle(&self, point: Vec3, index: usize) -> Option<Vec3> {
        self.triangle_in_world_coord(index).map(|t| t.closest_point(point))
    }

    #[must_use]
    pub fn surrounding_sphere(&self) -> Sphere {
        let center = self.world_transform().transform_point3(self.model_sphere.center);
        let radius = self.model_sphere.radius * self.scale.abs().max_element();
        Sphere::new(radius, center)
    }

    pub fn update_position(&mut self, delta: Vec3) {
        self.position += delta;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Mat3) {
        self.rotation = rotation;
    }

    pub fn scale(&mut self, scale: Vec3) {
        self.scale *= scale;
    }
}

fn model_bounding_sphere(triangles: &[Triangle]) -> Sphere {
    let mut corners = triangles.iter().flat_map(|t| t.corners);
    let Some(first) = corners.next() else {
        return Sphere::new(0.0, Vec3::ZERO);
    };
    let (min, max) = corners.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
    let center = (min + max) * 0.5;
    let radius = triangles
        .iter()
        .flat_map(|t| t.corners)
        .map(|p| p.distance(center))
        .fold(0.0_f32, f32::max);
    Sphere::new(radius, center)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_quad() -> Vec<Triangle> {
        vec![
            Triangle::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 1.0)),
            Triangle::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0), Vec3::new(1.0, 0.0, -1.0)),
        ]
    }

    #[test]
    fn closest_point_regions() {
        let t = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Z);
        assert_eq!(t.closest_point(Vec3::new(-1.0, 0.0, -1.0)), Vec3::ZERO);
        let inside = t.closest_point(Vec3::new(0.25, 5.0, 0.25));
        assert!((inside - Vec3::new(0.25, 0.0, 0.25)).length() < 1e-6);
        let on_edge = t.closest_point(Vec3::new(0.5, 0.0, -2.0));
        assert!((on_edge - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn floor_normal_points_up() {
        let quad = floor_quad();
        assert!((quad[0].normal() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn world_coordinates_apply_transform() {
        let mut hull = Hull::new(floor_quad(), Vec3::new(0.0, 2.0, 0.0));
        hull.scale(Vec3::splat(3.0));
        let t = hull.triangle_in_world_coord(0).unwrap();
        assert_eq!(t.corners[0], Vec3::new(-3.0, 2.0, -3.0));
        assert!(hull.triangle_in_world_coord(2).is_none());
        assert!((hull.surrounding_sphere().radius - 3.0 * 2.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn triangles_decode_from_packed_floats() {
        let floats: Vec<f32> = (0..9).map(|i| i as f32).collect();
        let bytes: &[u8] = bytemuck::cast_slice(&floats);
        let tris = Triangle::from_bytes(bytes).unwrap();
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0].corners[2], Vec3::new(6.0, 7.0, 8.0));

        let err = Triangle::from_bytes(&bytes[..10]).unwrap_err();
        assert_eq!(err, PhysicsError::MalformedTriangleData { len: 10 });
    }
}
