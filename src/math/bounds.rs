use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(point1: Vec3, point2: Vec3) -> AABB {
        let min = point1.min(point2);
        let max = point1.max(point2);
        AABB { min, max }
    }

    /// Bounds of a point set, `None` when the set is empty.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<AABB> {
        let mut points = points.into_iter();
        let first = points.next()?;

        Some(points.fold(AABB::new(first, first), |aabb, point| AABB {
            min: aabb.min.min(point),
            max: aabb.max.max(point),
        }))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_points() {
        let aabb =
            AABB::from_points([Vec3::new(1.0, -2.0, 0.0), Vec3::new(-1.0, 3.0, 0.5)]).unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 3.0, 0.5));
        assert!(aabb.contains_point(aabb.center()));
        assert!(AABB::from_points(std::iter::empty()).is_none());
    }
}
