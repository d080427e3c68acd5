//! Property values

use std::fmt;

use bridge_core::{BridgeError, Result};
#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Discriminant of a [`Value`], in C layout
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Float = 0,
    Vec3 = 1,
    Vec4 = 2,
    Matrix44 = 3,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Float => "Float",
            ValueKind::Vec3 => "Vec3",
            ValueKind::Vec4 => "Vec4",
            ValueKind::Matrix44 => "Matrix44",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property value
///
/// The kind of a value is fixed once created; [`Value::update`] only copies
/// between values of the same kind.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize), serde(untagged))]
pub enum Value {
    Float(f64),
    Vec3(Vec3),
    Vec4(Vec4),
    Matrix44(Matrix44),
}

bridge_core::bridge_type!(Value);

impl Value {
    pub fn vec3() -> Self {
        Self::Vec3(Vec3::default())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Float(_) => ValueKind::Float,
            Self::Vec3(_) => ValueKind::Vec3,
            Self::Vec4(_) => ValueKind::Vec4,
            Self::Matrix44(_) => ValueKind::Matrix44,
        }
    }

    /// Copies `other` into `self`; both must be the same kind
    pub fn update(&mut self, other: &Self) -> Result<()> {
        match (self, other) {
            (Self::Float(this), Self::Float(them)) => *this = *them,
            (Self::Vec3(this), Self::Vec3(them)) => *this = *them,
            (Self::Vec4(this), Self::Vec4(them)) => *this = *them,
            (Self::Matrix44(this), Self::Matrix44(them)) => *this = *them,
            (this, them) => {
                return Err(BridgeError::KindMismatch {
                    expected: this.kind().as_str(),
                    found: them.kind().as_str(),
                })
            }
        }
        Ok(())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<&Vec3> {
        match self {
            Self::Vec3(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_vec3_mut(&mut self) -> Option<&mut Vec3> {
        match self {
            Self::Vec3(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_vec4(&self) -> Option<&Vec4> {
        match self {
            Self::Vec4(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_vec4_mut(&mut self) -> Option<&mut Vec4> {
        match self {
            Self::Vec4(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_matrix44(&self) -> Option<&Matrix44> {
        match self {
            Self::Matrix44(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_matrix44_mut(&mut self) -> Option<&mut Matrix44> {
        match self {
            Self::Matrix44(value) => Some(value),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<(f64, f64, f64)> for Value {
    fn from(value: (f64, f64, f64)) -> Self {
        Self::Vec3(value.into())
    }
}

impl From<(f64, f64, f64, f64)> for Value {
    fn from(value: (f64, f64, f64, f64)) -> Self {
        Self::Vec4(value.into())
    }
}

impl From<Matrix44> for Value {
    fn from(value: Matrix44) -> Self {
        Self::Matrix44(value)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde_support",
    derive(Serialize, Deserialize),
    serde(deny_unknown_fields)
)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

bridge_core::bridge_type!(Vec3);

impl From<(f64, f64, f64)> for Vec3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

impl From<Vec3> for (f64, f64, f64) {
    fn from(vec3: Vec3) -> Self {
        (vec3.x, vec3.y, vec3.z)
    }
}

impl PartialEq<(f64, f64, f64)> for Vec3 {
    fn eq(&self, other: &(f64, f64, f64)) -> bool {
        (self.x, self.y, self.z) == *other
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde_support",
    derive(Serialize, Deserialize),
    serde(deny_unknown_fields)
)]
pub struct Vec4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

bridge_core::bridge_type!(Vec4);

impl From<(f64, f64, f64, f64)> for Vec4 {
    fn from((x, y, z, w): (f64, f64, f64, f64)) -> Self {
        Self { x, y, z, w }
    }
}

impl From<Vec4> for (f64, f64, f64, f64) {
    fn from(vec4: Vec4) -> Self {
        (vec4.x, vec4.y, vec4.z, vec4.w)
    }
}

impl PartialEq<(f64, f64, f64, f64)> for Vec4 {
    fn eq(&self, other: &(f64, f64, f64, f64)) -> bool {
        (self.x, self.y, self.z, self.w) == *other
    }
}

/// Row-major 4x4 matrix
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde_support",
    derive(Serialize, Deserialize),
    serde(transparent)
)]
pub struct Matrix44(pub [[f64; 4]; 4]);

bridge_core::bridge_type!(Matrix44);

impl Matrix44 {
    pub fn identity() -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self(rows)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.0.get(row).and_then(|cells| cells.get(col)).copied()
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f64> {
        self.0.get_mut(row).and_then(|cells| cells.get_mut(col))
    }

    pub fn rows(&self) -> &[[f64; 4]; 4] {
        &self.0
    }
}

impl Default for Matrix44 {
    fn default() -> Self {
        Self::identity()
    }
}
