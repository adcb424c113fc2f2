use vek::{Mat4, Vec3, Vec4};

/// An affine placement applied to vertex positions on their way into a
/// face sink. A newtype around a matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform(pub Mat4<f64>);

impl Transform {
    pub fn identity() -> Self {
        Transform(Mat4::identity())
    }

    /// Translate by `v`.
    pub fn translate<V: Into<Vec3<f64>>>(v: V) -> Self {
        Transform(Mat4::translation_3d(v))
    }

    /// Component-wise scale by `v`.
    pub fn scale<V: Into<Vec3<f64>>>(v: V) -> Self {
        Transform(Mat4::scaling_3d(v))
    }

    /// Apply this transformation to a point.
    pub fn apply(&self, v: Vec3<f64>) -> Vec3<f64> {
        (self.0 * Vec4::from_point(v)).xyz()
    }

    /// Compose with another such that
    /// `b.apply(a.apply(v)) == a.then(&b).apply(v)`.
    pub fn then(&self, other: &Self) -> Self {
        Transform(other.0 * self.0)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
