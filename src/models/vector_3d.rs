use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::utils::POSITION_EPSILON;

/// A 3-component vector used for positions, velocities and forces.
///
/// All arithmetic is componentwise. `*` and `/` between two vectors multiply
/// and divide element by element; `*` and `/` with an `f64` scale every axis.
///
/// # Examples
///
/// ```
/// use rs_layout::models::Vector3;
///
/// let a = Vector3::new(1.0, 2.0, 3.0);
/// let b = Vector3::new(4.0, 5.0, 6.0);
///
/// assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
/// assert_eq!(a * b, Vector3::new(4.0, 10.0, 18.0));
/// assert_eq!((b / 2.0).sum(), 7.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// A vector with the same value on every axis.
    pub const fn splat(s: f64) -> Self {
        Self::new(s, s, s)
    }

    /// Returns true if `other` is within `1e-8` of `self` on every axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_layout::models::Vector3;
    ///
    /// let a = Vector3::new(1.0, 1.0, 1.0);
    /// assert!(a.same_as(&Vector3::new(1.0 + 1e-9, 1.0, 1.0)));
    /// assert!(!a.same_as(&Vector3::new(1.0 + 1e-6, 1.0, 1.0)));
    /// ```
    pub fn same_as(&self, other: &Vector3) -> bool {
        let diff = *self - *other;
        diff.x.abs() < POSITION_EPSILON
            && diff.y.abs() < POSITION_EPSILON
            && diff.z.abs() < POSITION_EPSILON
    }

    /// Sum of the three components.
    pub fn sum(&self) -> f64 {
        self.x + self.y + self.z
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        (*self * *self).sum().sqrt()
    }

    /// Componentwise absolute value.
    pub fn abs(&self) -> Vector3 {
        Vector3::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Componentwise square.
    pub fn squared(&self) -> Vector3 {
        *self * *self
    }

    /// Componentwise minimum.
    pub fn min(&self, other: &Vector3) -> Vector3 {
        Vector3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Componentwise maximum.
    pub fn max(&self, other: &Vector3) -> Vector3 {
        Vector3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// The largest of the three components.
    pub fn max_element(&self) -> f64 {
        self.x.max(self.y).max(self.z)
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    pub fn to_coord(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<(f64, f64, f64)> for Vector3 {
    fn from(coord: (f64, f64, f64)) -> Self {
        Vector3::new(coord.0, coord.1, coord.2)
    }
}

impl Index<usize> for Vector3 {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 axis out of range: {}", axis),
        }
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Div for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs * self
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Vector3) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Vector3 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl DivAssign<f64> for Vector3 {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}
