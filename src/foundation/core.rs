/// 3-D vector in scene units (x right, y up, z toward the viewer).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Build a vector from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length.
    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Multiply every component by `k`.
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// A single styling/geometry property value attached to scene and visual elements.
///
/// Serialized untagged so registry JSON can say `"color": "#3498db"` or `"size": 0.1` directly.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Boolean flag.
    Flag(bool),
    /// Scalar number.
    Num(f64),
    /// Direction or position.
    Vec(Vec3),
    /// Free text (colors, shapes, labels).
    Text(String),
}

impl PropValue {
    /// The scalar value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Num(v) => Some(*v),
            _ => None,
        }
    }

    /// The string value, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The vector value, if this is a vector.
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Self::Vec(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec3> for PropValue {
    fn from(v: Vec3) -> Self {
        Self::Vec(v)
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

/// Ordered property map. `BTreeMap` keeps emission byte-stable.
pub type Props = std::collections::BTreeMap<String, PropValue>;

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
