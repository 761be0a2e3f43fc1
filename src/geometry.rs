//! Continuous map geometry: directions and locations.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Reduce an angle into the range (-π, π].
#[must_use]
#[inline]
fn reduce(radians: f32) -> f32 {
    let r = (radians + PI).rem_euclid(TAU) - PI;
    if r <= -PI { r + TAU } else { r }
}

/// A heading on the map.
///
/// The angle is measured counter-clockwise from east and is always kept in
/// (-π, π], so two directions built from angles a full turn apart compare
/// equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    radians: f32,
}

impl Direction {
    /// Create a direction from an angle in radians.
    #[must_use]
    pub fn new(radians: f32) -> Self {
        Self {
            radians: reduce(radians),
        }
    }

    /// Create a direction from an angle in degrees.
    #[must_use]
    pub fn from_degrees(degrees: f32) -> Self {
        Self::new(degrees.to_radians())
    }

    /// Create a direction pointing along the vector `(dx, dy)`.
    ///
    /// A zero vector yields east.
    #[must_use]
    pub fn from_vector(dx: f32, dy: f32) -> Self {
        Self::new(dy.atan2(dx))
    }

    /// Due east.
    #[must_use]
    pub const fn east() -> Self {
        Self { radians: 0.0 }
    }

    /// Due north.
    #[must_use]
    pub const fn north() -> Self {
        Self { radians: FRAC_PI_2 }
    }

    /// Due west.
    #[must_use]
    pub const fn west() -> Self {
        Self { radians: PI }
    }

    /// Due south.
    #[must_use]
    pub const fn south() -> Self {
        Self {
            radians: -FRAC_PI_2,
        }
    }

    /// The angle in radians, in (-π, π].
    #[must_use]
    pub const fn radians(self) -> f32 {
        self.radians
    }

    /// The angle in degrees, in (-180, 180].
    #[must_use]
    pub fn degrees(self) -> f32 {
        self.radians.to_degrees()
    }

    /// Rotate counter-clockwise.
    #[must_use]
    pub fn rotate_left_degrees(self, degrees: f32) -> Self {
        Self::new(self.radians + degrees.to_radians())
    }

    /// Rotate clockwise.
    #[must_use]
    pub fn rotate_right_degrees(self, degrees: f32) -> Self {
        Self::new(self.radians - degrees.to_radians())
    }

    /// The direction pointing the other way.
    #[must_use]
    pub fn opposite(self) -> Self {
        Self::new(self.radians + PI)
    }

    /// Signed angle from `self` to `other`, in (-π, π].
    ///
    /// Positive when `other` is counter-clockwise of `self`.
    #[must_use]
    pub fn radians_between(self, other: Self) -> f32 {
        reduce(other.radians - self.radians)
    }

    /// Signed angle from `self` to `other` in degrees.
    #[must_use]
    pub fn degrees_between(self, other: Self) -> f32 {
        self.radians_between(other).to_degrees()
    }

    /// X component of travelling `distance` along this direction.
    #[must_use]
    pub fn dx(self, distance: f32) -> f32 {
        distance * self.radians.cos()
    }

    /// Y component of travelling `distance` along this direction.
    #[must_use]
    pub fn dy(self, distance: f32) -> f32 {
        distance * self.radians.sin()
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}°", self.degrees())
    }
}

/// A point on the continuous map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapLocation {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl MapLocation {
    /// Create a new location.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another location.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Heading from this location towards `other`.
    ///
    /// Returns east when both locations coincide.
    #[must_use]
    pub fn direction_to(self, other: Self) -> Direction {
        Direction::from_vector(other.x - self.x, other.y - self.y)
    }

    /// The location reached by travelling `distance` along `dir`.
    #[must_use]
    pub fn add(self, dir: Direction, distance: f32) -> Self {
        Self {
            x: self.x + dir.dx(distance),
            y: self.y + dir.dy(distance),
        }
    }

    /// Whether this location lies within `radius` of `center`.
    #[must_use]
    pub fn is_within_distance(self, center: Self, radius: f32) -> bool {
        self.distance_to(center) <= radius
    }
}

impl std::fmt::Display for MapLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    #[test]
    fn test_direction_normalized() {
        assert_close(Direction::new(TAU + 0.5).radians(), 0.5);
        assert_close(Direction::new(-PI).radians(), PI);
        assert_close(Direction::from_degrees(270.0).degrees(), -90.0);
    }

    #[test]
    fn test_rotation() {
        let east = Direction::east();
        assert_close(east.rotate_left_degrees(90.0).radians(), Direction::north().radians());
        assert_close(east.rotate_right_degrees(90.0).radians(), Direction::south().radians());
        assert_close(east.rotate_left_degrees(60.0 * 4.0).degrees(), -120.0);
        assert_close(Direction::north().opposite().radians(), Direction::south().radians());
    }

    #[test]
    fn test_radians_between() {
        let east = Direction::east();
        assert_close(east.degrees_between(Direction::from_degrees(30.0)), 30.0);
        assert_close(east.degrees_between(Direction::from_degrees(-30.0)), -30.0);
        // Wraps across the ±180° seam.
        let a = Direction::from_degrees(170.0);
        let b = Direction::from_degrees(-170.0);
        assert_close(a.degrees_between(b), 20.0);
        assert_close(b.degrees_between(a), -20.0);
    }

    #[test]
    fn test_location_math() {
        let origin = MapLocation::new(0.0, 0.0);
        let target = MapLocation::new(3.0, 4.0);
        assert_close(origin.distance_to(target), 5.0);

        let dir = origin.direction_to(target);
        let reached = origin.add(dir, 5.0);
        assert_close(reached.x, 3.0);
        assert_close(reached.y, 4.0);

        assert!(target.is_within_distance(origin, 5.0));
        assert!(!target.is_within_distance(origin, 4.9));
    }

    #[test]
    fn test_direction_to_same_point_is_east() {
        let p = MapLocation::new(1.0, 1.0);
        assert_close(p.direction_to(p).radians(), 0.0);
    }
}
