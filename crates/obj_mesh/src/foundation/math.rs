//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the bounding box used to frame a loaded mesh.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Point3,
    /// Maximum corner
    pub max: Point3,
}

impl Aabb {
    /// Create a box containing a single point
    pub fn from_point(point: Point3) -> Self {
        Self { min: point, max: point }
    }

    /// Smallest box containing every point, or `None` when there are no points
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::from_point(first), |mut aabb, p| {
            aabb.expand(&p);
            aabb
        }))
    }

    /// Grow the box to contain `point`
    pub fn expand(&mut self, point: &Point3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Center point
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Size along each axis
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Radius of the sphere enclosing the box, measured from its center
    pub fn radius(&self) -> f32 {
        self.extent().norm() * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points([
            Point3::new(1.0, -2.0, 0.5),
            Point3::new(-1.0, 3.0, 0.0),
            Point3::new(0.0, 0.0, 2.0),
        ])
        .unwrap();

        assert_eq!(aabb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Point3::new(1.0, 3.0, 2.0));
        assert_eq!(aabb.center(), Point3::new(0.0, 0.5, 1.0));
        assert_eq!(aabb.extent(), Vec3::new(2.0, 5.0, 2.0));
    }

    #[test]
    fn test_aabb_empty() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_aabb_radius() {
        let aabb = Aabb::from_points([Point3::origin(), Point3::new(2.0, 0.0, 0.0)]).unwrap();
        assert_relative_eq!(aabb.radius(), 1.0);
    }
}
