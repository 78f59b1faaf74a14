use crate::core::base::Float;
use std::ops;

#[derive(Debug, PartialEq, Default, Copy, Clone)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Copy> Vector3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Vector3::<T> { x, y, z }
    }
}

// Geometric operations only make sense for the shading-frame float type.
impl Vector3<Float> {
    /// The macroscopic surface normal of the local shading frame.
    #[inline]
    pub fn up() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    #[inline]
    pub fn dot(&self, rhs: &Self) -> Float {
        return self.x * rhs.x + self.y * rhs.y + self.z * rhs.z;
    }

    #[inline]
    pub fn length_squared(&self) -> Float {
        return self.dot(self);
    }

    #[inline]
    pub fn length(&self) -> Float {
        return Float::sqrt(self.length_squared());
    }

    #[inline]
    pub fn normalize(&self) -> Self {
        let l = self.length();
        return Self::new(self.x / l, self.y / l, self.z / l);
    }

    #[inline]
    pub fn has_nans(&self) -> bool {
        return self.x.is_nan() || self.y.is_nan() || self.z.is_nan();
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        return self.x.is_finite() && self.y.is_finite() && self.z.is_finite();
    }
}

impl<T: ops::Add<Output = T>> ops::Add<Vector3<T>> for Vector3<T> {
    type Output = Vector3<T>;
    #[inline]
    fn add(self, rhs: Vector3<T>) -> Vector3<T> {
        return Vector3 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        };
    }
}

impl<T: ops::Sub<Output = T>> ops::Sub<Vector3<T>> for Vector3<T> {
    type Output = Vector3<T>;
    #[inline]
    fn sub(self, rhs: Vector3<T>) -> Vector3<T> {
        return Vector3 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        };
    }
}

impl<T: ops::Mul<Output = T> + Copy> ops::Mul<T> for Vector3<T> {
    type Output = Vector3<T>;
    #[inline]
    fn mul(self, rhs: T) -> Vector3<T> {
        return Vector3 {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        };
    }
}

impl ops::Mul<Vector3<Float>> for Float {
    type Output = Vector3<Float>;
    #[inline]
    fn mul(self, rhs: Vector3<Float>) -> Vector3<Float> {
        return rhs * self;
    }
}

impl<T: ops::Div<Output = T> + Copy> ops::Div<T> for Vector3<T> {
    type Output = Vector3<T>;
    #[inline]
    fn div(self, rhs: T) -> Vector3<T> {
        return Vector3 {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        };
    }
}

impl<T: ops::Neg<Output = T>> ops::Neg for Vector3<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        return Vector3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        };
    }
}

impl<T: ops::AddAssign<T>> ops::AddAssign for Vector3<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<T: ops::MulAssign<T> + Copy> ops::MulAssign<T> for Vector3<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: T) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl<T> ops::Index<usize> for Vector3<T> {
    type Output = T;
    #[inline]
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }
}

impl<T: Copy> From<[T; 3]> for Vector3<T> {
    #[inline]
    fn from(value: [T; 3]) -> Self {
        Vector3::<T>::new(value[0], value[1], value[2])
    }
}

impl<T: Copy> From<Vector3<T>> for [T; 3] {
    #[inline]
    fn from(value: Vector3<T>) -> Self {
        [value.x, value.y, value.z]
    }
}

//------------------
#[cfg(test)]
mod tests {
    use super::*;

    type Vector3f = Vector3<Float>;

    #[test]
    fn test_001() {
        let v1 = Vector3f::new(1.0, 2.0, 3.0);
        let v2 = Vector3f::new(4.0, 5.0, 6.0);
        assert_eq!(v1 + v2, Vector3f::new(5.0, 7.0, 9.0));
        assert_eq!(v2 - v1, Vector3f::new(3.0, 3.0, 3.0));
        assert_eq!(2.0 * v1, Vector3f::new(2.0, 4.0, 6.0));
        assert_eq!(-v1, Vector3f::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_002() {
        let v1 = Vector3f::new(4.0, 0.0, 0.0);
        assert_eq!(v1.length(), 4.0);
        assert_eq!(v1.normalize(), Vector3f::new(1.0, 0.0, 0.0));
        assert_eq!(v1.dot(&Vector3f::up()), 0.0);
    }

    #[test]
    fn test_003() {
        let v = Vector3f::from([1.0, 2.0, 3.0]);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[2], 3.0);
        let a: [Float; 3] = v.into();
        assert_eq!(a, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_004() {
        let v = Vector3f::new(0.0, 0.0, 0.0).normalize();
        assert!(v.has_nans());
        assert!(!v.is_finite());
        assert!(Vector3f::up().is_finite());
    }
}
