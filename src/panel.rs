// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! Uniform control panel.
//!
//! Every active uniform whose name starts with the control prefix gets one
//! egui widget chosen by its [`UniformKind`]. Edited values go into the
//! [`UniformValueStore`] under the full uniform name, so they are pushed
//! every frame whether or not the panel is visible.

use crate::uniform::{UniformKind, UniformTable, UniformValue, UniformValueStore};

/// One editable uniform as shown in the panel
#[derive(Debug, Clone, PartialEq)]
pub struct Control<'a> {
    /// full uniform name, the store key
    pub name: &'a str,
    /// name with the prefix removed
    pub label: &'a str,
    pub kind: UniformKind,
}

/// Uniforms that get a control, in table order.
/// Unsupported kinds are skipped.
pub fn controls<'a>(table: &'a UniformTable, prefix: &str) -> Vec<Control<'a>> {
    table
        .iter()
        .filter(|(_, info)| info.kind.is_editable())
        .filter_map(|(name, info)| {
            name.strip_prefix(prefix).map(|label| Control {
                name: name.as_str(),
                label,
                kind: info.kind,
            })
        })
        .collect()
}

pub struct ControlPanel {
    prefix: String,
    visible: bool,
}

impl ControlPanel {
    pub fn new(prefix: &str, visible: bool) -> Self {
        Self {
            prefix: prefix.to_string(),
            visible,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Draw the panel; no-op when hidden or when there is nothing to edit
    pub fn show(&self, ctx: &egui::Context, table: &UniformTable, store: &mut UniformValueStore) {
        if !self.visible {
            return;
        }
        let controls = controls(table, &self.prefix);
        if controls.is_empty() {
            return;
        }
        egui::Window::new("Uniforms")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                for control in &controls {
                    control_ui(ui, control, store);
                }
            });
    }
}

/// Render one widget and write the value back if the user changed it
fn control_ui(ui: &mut egui::Ui, control: &Control<'_>, store: &mut UniformValueStore) {
    let Some(default) = control.kind.default_value() else {
        return;
    };
    let mut value = store.get(control.name, control.kind).unwrap_or(default);

    let changed = ui
        .horizontal(|ui| match &mut value {
            UniformValue::Int(v) => {
                let r = ui.add(egui::DragValue::new(v));
                ui.label(control.label);
                r.changed()
            }
            UniformValue::Float(v) => ui
                .add(egui::Slider::new(v, 0.0..=1.0).text(control.label))
                .changed(),
            UniformValue::Bool(v) => ui.checkbox(v, control.label).changed(),
            UniformValue::Vec3(v) => {
                let r = ui.color_edit_button_rgb(v);
                ui.label(control.label);
                r.changed()
            }
            UniformValue::Vec4(v) => {
                let r = ui.color_edit_button_rgba_unmultiplied(v);
                ui.label(control.label);
                r.changed()
            }
        })
        .inner;

    commit_edit(store, control, value, changed);
}

/// Store an edited value under the full uniform name
fn commit_edit(
    store: &mut UniformValueStore,
    control: &Control<'_>,
    value: UniformValue,
    changed: bool,
) {
    if changed && value.kind() == control.kind {
        store.set(control.name, value);
    }
}
