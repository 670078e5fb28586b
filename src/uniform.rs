// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! Uniform types shared by reflection, the per-frame push and the control
//! panel.
//!
//! [`UniformKind`] is what the linker reports for an active uniform,
//! [`UniformValue`] is a value the user can edit. Both the panel and the
//! push step dispatch on these enums, so the GL type switch lives in one
//! place ([`UniformKind::from_gl`]).

use std::collections::{BTreeMap, HashMap};

/// Declared type of an active uniform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    Int,
    Float,
    Bool,
    Vec2,
    Vec3,
    Vec4,
    Sampler2D,
    /// Any other GL type, kept so the table stays complete
    Other(u32),
}

impl UniformKind {
    /// Map a GL type enum (as returned by glGetActiveUniform) to a kind
    pub fn from_gl(utype: u32) -> Self {
        match utype {
            glow::INT => UniformKind::Int,
            glow::FLOAT => UniformKind::Float,
            glow::BOOL => UniformKind::Bool,
            glow::FLOAT_VEC2 => UniformKind::Vec2,
            glow::FLOAT_VEC3 => UniformKind::Vec3,
            glow::FLOAT_VEC4 => UniformKind::Vec4,
            glow::SAMPLER_2D => UniformKind::Sampler2D,
            other => UniformKind::Other(other),
        }
    }

    /// Initial value shown by a control, or None if the kind is not editable
    pub fn default_value(self) -> Option<UniformValue> {
        match self {
            UniformKind::Int => Some(UniformValue::Int(0)),
            UniformKind::Float => Some(UniformValue::Float(0.0)),
            UniformKind::Bool => Some(UniformValue::Bool(false)),
            UniformKind::Vec3 => Some(UniformValue::Vec3([0.0; 3])),
            UniformKind::Vec4 => Some(UniformValue::Vec4([0.0; 4])),
            _ => None,
        }
    }

    pub fn is_editable(self) -> bool {
        self.default_value().is_some()
    }
}

/// A user-editable uniform value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Bool(bool),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Int(_) => UniformKind::Int,
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::Bool(_) => UniformKind::Bool,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Vec4(_) => UniformKind::Vec4,
        }
    }
}

/// Reflected information about one active uniform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformInfo {
    pub location: u32,
    pub kind: UniformKind,
}

/// Active uniforms of one linked program, keyed by exact name.
/// Array uniforms are keyed by their base name (`iChannelResolution`).
pub type UniformTable = BTreeMap<String, UniformInfo>;

/// Strip the `[0]` suffix GL reports for array uniforms
pub fn base_name(reported: &str) -> &str {
    reported.strip_suffix("[0]").unwrap_or(reported)
}

/// User-edited uniform values, independent of any program.
///
/// Values are keyed by the raw uniform name (prefix included), so they
/// survive reloads and shaders that temporarily drop a uniform. Booleans
/// share the integer map as 0/1.
#[derive(Debug, Default, Clone)]
pub struct UniformValueStore {
    ints: HashMap<String, i32>,
    floats: HashMap<String, f32>,
    vec3s: HashMap<String, [f32; 3]>,
    vec4s: HashMap<String, [f32; 4]>,
}

impl UniformValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value for `name`, read back as `kind`
    pub fn get(&self, name: &str, kind: UniformKind) -> Option<UniformValue> {
        match kind {
            UniformKind::Int => self.ints.get(name).map(|v| UniformValue::Int(*v)),
            UniformKind::Bool => self.ints.get(name).map(|v| UniformValue::Bool(*v != 0)),
            UniformKind::Float => self.floats.get(name).map(|v| UniformValue::Float(*v)),
            UniformKind::Vec3 => self.vec3s.get(name).map(|v| UniformValue::Vec3(*v)),
            UniformKind::Vec4 => self.vec4s.get(name).map(|v| UniformValue::Vec4(*v)),
            _ => None,
        }
    }

    pub fn set(&mut self, name: &str, value: UniformValue) {
        let name = name.to_string();
        match value {
            UniformValue::Int(v) => {
                self.ints.insert(name, v);
            }
            UniformValue::Bool(v) => {
                self.ints.insert(name, v as i32);
            }
            UniformValue::Float(v) => {
                self.floats.insert(name, v);
            }
            UniformValue::Vec3(v) => {
                self.vec3s.insert(name, v);
            }
            UniformValue::Vec4(v) => {
                self.vec4s.insert(name, v);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ints.len() + self.floats.len() + self.vec3s.len() + self.vec4s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
