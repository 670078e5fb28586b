// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! Per-frame uniform state and the draw step.
//!
//! Everything the shader sees in one frame is gathered into
//! [`FrameInputs`]; [`draw_frame`] pushes it, plus any stored user values,
//! through a [`UniformSink`] and issues the quad draw. The GL sink lives in
//! `render::adapter::gl::quad`; tests use a recording sink.

use crate::{
    render::adapter::gl::shader_source::{channel_name, CHANNEL_RESOLUTION, QUAD_VERTICES},
    uniform::{UniformTable, UniformValue, UniformValueStore},
};

/// Receives uniform writes and the draw call for the bound program
pub trait UniformSink {
    fn set_int(&mut self, location: u32, v: i32);
    fn set_float(&mut self, location: u32, v: f32);
    fn set_vec3(&mut self, location: u32, v: [f32; 3]);
    fn set_vec4(&mut self, location: u32, v: [f32; 4]);
    fn set_vec3_array(&mut self, location: u32, v: &[[f32; 3]]);
    fn draw_triangles(&mut self, vertex_count: i32);
}

impl UniformValue {
    /// Write this value to `location`; booleans go out as 0/1 ints
    pub fn push<S: UniformSink + ?Sized>(&self, sink: &mut S, location: u32) {
        match *self {
            UniformValue::Int(v) => sink.set_int(location, v),
            UniformValue::Float(v) => sink.set_float(location, v),
            UniformValue::Bool(v) => sink.set_int(location, v as i32),
            UniformValue::Vec3(v) => sink.set_vec3(location, v),
            UniformValue::Vec4(v) => sink.set_vec4(location, v),
        }
    }
}

/// Mouse state in window pixels, y measured from the bottom edge
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left: bool,
    pub right: bool,
}

impl MouseState {
    /// Value of `iMouse`
    pub fn as_uniform(&self) -> [f32; 4] {
        [
            self.x,
            self.y,
            if self.left { 1.0 } else { 0.0 },
            if self.right { 1.0 } else { 0.0 },
        ]
    }
}

/// Built-in uniform values for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInputs {
    /// seconds since the current program became active
    pub time: f32,
    pub width: u32,
    pub height: u32,
    pub mouse: MouseState,
    pub frame: i32,
    /// (w, h, 0) per bound texture, index = texture unit
    pub channels: Vec<[f32; 3]>,
}

impl FrameInputs {
    pub fn resolution(&self) -> [f32; 3] {
        [self.width as f32, self.height as f32, 0.0]
    }
}

/// Push built-ins and stored user values, then draw the quad.
///
/// Only uniforms present in `table` are written; names the linker removed
/// are skipped silently.
pub fn draw_frame<S: UniformSink + ?Sized>(
    sink: &mut S,
    table: &UniformTable,
    inputs: &FrameInputs,
    store: &UniformValueStore,
) {
    if let Some(u) = table.get("iTime") {
        sink.set_float(u.location, inputs.time);
    }
    if let Some(u) = table.get("iResolution") {
        sink.set_vec3(u.location, inputs.resolution());
    }
    if let Some(u) = table.get("iMouse") {
        sink.set_vec4(u.location, inputs.mouse.as_uniform());
    }
    if let Some(u) = table.get("iFrame") {
        sink.set_int(u.location, inputs.frame);
    }
    for unit in 0..inputs.channels.len() {
        if let Some(u) = table.get(&channel_name(unit)) {
            sink.set_int(u.location, unit as i32);
        }
    }
    if !inputs.channels.is_empty() {
        if let Some(u) = table.get(CHANNEL_RESOLUTION) {
            sink.set_vec3_array(u.location, &inputs.channels);
        }
    }

    for (name, info) in table {
        if let Some(value) = store.get(name, info.kind) {
            value.push(sink, info.location);
        }
    }

    sink.draw_triangles(QUAD_VERTICES);
}

/// Fires once every `every` frames, starting with frame 0
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    every: u64,
}

impl Cadence {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
        }
    }

    pub fn is_due(&self, frame: u64) -> bool {
        frame % self.every == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniform::{UniformInfo, UniformKind};

    #[derive(Default)]
    struct Record {
        ints: Vec<(u32, i32)>,
        floats: Vec<(u32, f32)>,
        vec3s: Vec<(u32, [f32; 3])>,
        vec4s: Vec<(u32, [f32; 4])>,
        arrays: Vec<(u32, Vec<[f32; 3]>)>,
        draws: Vec<i32>,
    }

    impl UniformSink for Record {
        fn set_int(&mut self, location: u32, v: i32) {
            self.ints.push((location, v));
        }
        fn set_float(&mut self, location: u32, v: f32) {
            self.floats.push((location, v));
        }
        fn set_vec3(&mut self, location: u32, v: [f32; 3]) {
            self.vec3s.push((location, v));
        }
        fn set_vec4(&mut self, location: u32, v: [f32; 4]) {
            self.vec4s.push((location, v));
        }
        fn set_vec3_array(&mut self, location: u32, v: &[[f32; 3]]) {
            self.arrays.push((location, v.to_vec()));
        }
        fn draw_triangles(&mut self, vertex_count: i32) {
            self.draws.push(vertex_count);
        }
    }

    fn info(location: u32, kind: UniformKind) -> UniformInfo {
        UniformInfo {
            location,
            kind,
        }
    }

    #[test]
    fn test_mouse_uniform() {
        let m = MouseState {
            x: 10.0,
            y: 20.0,
            left: true,
            right: false,
        };
        assert_eq!(m.as_uniform(), [10.0, 20.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unknown_uniforms_are_not_written() {
        let table = UniformTable::new();
        let mut rec = Record::default();
        let inputs = FrameInputs {
            time: 1.0,
            width: 4,
            height: 3,
            ..Default::default()
        };
        draw_frame(&mut rec, &table, &inputs, &UniformValueStore::new());
        assert!(rec.floats.is_empty() && rec.vec3s.is_empty() && rec.ints.is_empty());
        assert_eq!(rec.draws, vec![6]);
    }

    #[test]
    fn test_builtins_and_channels() {
        let mut table = UniformTable::new();
        table.insert("iTime".into(), info(0, UniformKind::Float));
        table.insert("iResolution".into(), info(1, UniformKind::Vec3));
        table.insert("iMouse".into(), info(2, UniformKind::Vec4));
        table.insert("iFrame".into(), info(3, UniformKind::Int));
        table.insert("iChannel0".into(), info(4, UniformKind::Sampler2D));
        table.insert("iChannel1".into(), info(5, UniformKind::Sampler2D));
        table.insert("iChannelResolution".into(), info(6, UniformKind::Vec3));

        let inputs = FrameInputs {
            time: 2.5,
            width: 640,
            height: 480,
            mouse: MouseState::default(),
            frame: 7,
            channels: vec![[16.0, 16.0, 0.0], [32.0, 8.0, 0.0]],
        };
        let mut rec = Record::default();
        draw_frame(&mut rec, &table, &inputs, &UniformValueStore::new());

        assert_eq!(rec.floats, vec![(0, 2.5)]);
        assert_eq!(rec.vec3s, vec![(1, [640.0, 480.0, 0.0])]);
        assert_eq!(rec.vec4s, vec![(2, [0.0; 4])]);
        assert_eq!(rec.ints, vec![(3, 7), (4, 0), (5, 1)]);
        assert_eq!(rec.arrays, vec![(6, inputs.channels.clone())]);
        assert_eq!(rec.draws, vec![6]);
    }

    #[test]
    fn test_stored_values_are_pushed_by_kind() {
        let mut table = UniformTable::new();
        table.insert("ctl_on".into(), info(10, UniformKind::Bool));
        table.insert("ctl_gain".into(), info(11, UniformKind::Float));
        table.insert("ctl_color".into(), info(12, UniformKind::Vec4));
        table.insert("ctl_untouched".into(), info(13, UniformKind::Int));

        let mut store = UniformValueStore::new();
        store.set("ctl_on", UniformValue::Bool(true));
        store.set("ctl_gain", UniformValue::Float(0.75));
        store.set("ctl_color", UniformValue::Vec4([0.1, 0.2, 0.3, 1.0]));
        store.set("ctl_gone", UniformValue::Int(9));

        let mut rec = Record::default();
        draw_frame(&mut rec, &table, &FrameInputs::default(), &store);

        assert_eq!(rec.ints, vec![(10, 1)]);
        assert_eq!(rec.floats, vec![(11, 0.75)]);
        assert_eq!(rec.vec4s, vec![(12, [0.1, 0.2, 0.3, 1.0])]);
    }

    #[test]
    fn test_cadence() {
        let c = Cadence::new(5);
        let due: Vec<u64> = (0..12).filter(|f| c.is_due(*f)).collect();
        assert_eq!(due, vec![0, 5, 10]);
        // zero is clamped to every frame
        assert!(Cadence::new(0).is_due(3));
    }
}
