use crate::core::base::Float;
use std::ops;

#[derive(Debug, PartialEq, Default, Copy, Clone)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> Vector2<T> {
    pub fn new(x: T, y: T) -> Self {
        Vector2::<T> { x, y }
    }
}

impl<T: Default> Vector2<T> {
    #[inline]
    pub fn zero() -> Self {
        Vector2::<T> {
            x: T::default(),
            y: T::default(),
        }
    }
}

impl Vector2<Float> {
    #[inline]
    pub fn length_squared(&self) -> Float {
        return self.x * self.x + self.y * self.y;
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        return self.x.is_finite() && self.y.is_finite();
    }

    /// Rotates counter-clockwise by the angle whose cosine and sine are given.
    #[inline]
    pub fn rotate(&self, cos_phi: Float, sin_phi: Float) -> Self {
        Self::new(
            cos_phi * self.x - sin_phi * self.y,
            sin_phi * self.x + cos_phi * self.y,
        )
    }
}

impl<T: ops::Add<Output = T>> ops::Add<Vector2<T>> for Vector2<T> {
    type Output = Vector2<T>;
    #[inline]
    fn add(self, rhs: Vector2<T>) -> Vector2<T> {
        return Vector2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        };
    }
}

impl<T: ops::Sub<Output = T>> ops::Sub<Vector2<T>> for Vector2<T> {
    type Output = Vector2<T>;
    #[inline]
    fn sub(self, rhs: Vector2<T>) -> Vector2<T> {
        return Vector2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        };
    }
}

impl<T: ops::Mul<Output = T> + Copy> ops::Mul<T> for Vector2<T> {
    type Output = Vector2<T>;
    #[inline]
    fn mul(self, rhs: T) -> Vector2<T> {
        return Vector2 {
            x: self.x * rhs,
            y: self.y * rhs,
        };
    }
}

impl<T> ops::Index<usize> for Vector2<T> {
    type Output = T;
    #[inline]
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            _ => &self.y,
        }
    }
}
