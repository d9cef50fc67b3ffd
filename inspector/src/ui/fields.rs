//! Parameter field widgets.

use egui::{ComboBox, DragValue, RichText};

use lilium_core::math::{Bounds, Color, Curve, Keyframe, LayerMask, Rect, Vec2, Vec3, Vec4};

use crate::config::PanelConfig;
use crate::panel::ParamView;
use crate::param::{ObjectRef, ParamKind, ParamValue, integer_range};

/// Data shared by every field of one refresh.
pub struct FieldContext<'a> {
    /// Layer names for layer mask fields.
    pub config: &'a PanelConfig,
    /// Choices for object reference fields.
    pub objects: &'a [ObjectRef],
}

/// Draws the editor for one parameter and returns the (possibly edited) value.
///
/// The dispatch is total: a kind/value pair without an editor is shown as a
/// disabled "Unsupported" label and passed through unchanged.
pub fn param_field(ui: &mut egui::Ui, param: &ParamView, ctx: &FieldContext<'_>) -> ParamValue {
    let mut value = param.value.clone();
    ui.horizontal(|ui| {
        ui.label(&param.label);
        match (&param.kind, &mut value) {
            (ParamKind::Int, ParamValue::Int(v)) => {
                let mut drag = DragValue::new(v);
                if let Some(range) = integer_range(&param.type_name) {
                    // Bound new edits only; a cached value is never rewritten by a redraw.
                    drag = drag.range(range).clamp_existing_to_range(false);
                }
                ui.add(drag);
            }
            (ParamKind::Float, ParamValue::Float(v)) => {
                ui.add(DragValue::new(v).speed(0.01));
            }
            (ParamKind::Double, ParamValue::Double(v)) => {
                ui.add(DragValue::new(v).speed(0.01));
            }
            (ParamKind::Bool, ParamValue::Bool(v)) => {
                ui.checkbox(v, "");
            }
            (ParamKind::Text, ParamValue::Text(v)) => {
                ui.text_edit_singleline(v);
            }
            (ParamKind::Vec2, ParamValue::Vec2(v)) => vec2_field(ui, v),
            (ParamKind::Vec3, ParamValue::Vec3(v)) => vec3_field(ui, v),
            (ParamKind::Vec4, ParamValue::Vec4(v)) => vec4_field(ui, v),
            (ParamKind::Color, ParamValue::Color(c)) => {
                let mut rgba = c.to_array();
                if ui.color_edit_button_rgba_unmultiplied(&mut rgba).changed() {
                    *c = Color::from_array(rgba);
                }
                ui.weak(format!("#{}", c.to_hex()));
            }
            (ParamKind::Rect, ParamValue::Rect(r)) => rect_field(ui, r),
            (ParamKind::Bounds, ParamValue::Bounds(b)) => bounds_field(ui, b),
            (ParamKind::Curve, ParamValue::Curve(c)) => curve_field(ui, c),
            (ParamKind::LayerMask, ParamValue::LayerMask(m)) => layer_mask_field(ui, m, ctx.config),
            (ParamKind::Enum { variants, .. }, ParamValue::Enum(i)) => enum_field(ui, i, variants),
            (ParamKind::Object, ParamValue::Object(o)) => object_field(ui, o, ctx.objects),
            _ => unsupported_field(ui, &param.type_name),
        }
    });
    value
}

fn unsupported_field(ui: &mut egui::Ui, type_name: &str) {
    ui.add_enabled(
        false,
        egui::Label::new(RichText::new(format!("Unsupported: {type_name}")).italics()),
    );
}

fn vec2_field(ui: &mut egui::Ui, v: &mut Vec2) {
    ui.add(DragValue::new(&mut v.x).speed(0.01).prefix("x: "));
    ui.add(DragValue::new(&mut v.y).speed(0.01).prefix("y: "));
}

fn vec3_field(ui: &mut egui::Ui, v: &mut Vec3) {
    ui.add(DragValue::new(&mut v.x).speed(0.01).prefix("x: "));
    ui.add(DragValue::new(&mut v.y).speed(0.01).prefix("y: "));
    ui.add(DragValue::new(&mut v.z).speed(0.01).prefix("z: "));
}

fn vec4_field(ui: &mut egui::Ui, v: &mut Vec4) {
    ui.add(DragValue::new(&mut v.x).speed(0.01).prefix("x: "));
    ui.add(DragValue::new(&mut v.y).speed(0.01).prefix("y: "));
    ui.add(DragValue::new(&mut v.z).speed(0.01).prefix("z: "));
    ui.add(DragValue::new(&mut v.w).speed(0.01).prefix("w: "));
}

fn rect_field(ui: &mut egui::Ui, r: &mut Rect) {
    ui.add(DragValue::new(&mut r.x).speed(0.1).prefix("x: "));
    ui.add(DragValue::new(&mut r.y).speed(0.1).prefix("y: "));
    // Negative sizes are valid (flipped rects) and must survive a redraw.
    ui.add(DragValue::new(&mut r.width).speed(0.1).prefix("w: "));
    ui.add(DragValue::new(&mut r.height).speed(0.1).prefix("h: "));
}

fn bounds_field(ui: &mut egui::Ui, b: &mut Bounds) {
    ui.vertical(|ui| {
        ui.horizontal(|ui| {
            ui.label("Center");
            vec3_field(ui, &mut b.center);
        });
        ui.horizontal(|ui| {
            ui.label("Extents");
            vec3_field(ui, &mut b.extents);
        });
    });
}

fn curve_field(ui: &mut egui::Ui, curve: &mut Curve) {
    ui.vertical(|ui| {
        let mut edited = None;
        let mut removed = None;
        for (i, key) in curve.keys().iter().enumerate() {
            let mut key = *key;
            ui.horizontal(|ui| {
                let time = ui.add(DragValue::new(&mut key.time).speed(0.01).prefix("t: "));
                let value = ui.add(DragValue::new(&mut key.value).speed(0.01).prefix("v: "));
                if time.changed() || value.changed() {
                    edited = Some((i, key));
                }
                if ui.small_button("x").on_hover_text("Remove key").clicked() {
                    removed = Some(i);
                }
            });
        }

        if let Some((i, key)) = edited {
            curve.set_key(i, key);
        }
        if let Some(i) = removed {
            curve.remove_key(i);
        }

        ui.horizontal(|ui| {
            if ui.small_button("+ Key").clicked() {
                let next = curve
                    .keys()
                    .last()
                    .map_or(Keyframe::new(0.0, 0.0), |k| Keyframe::new(k.time + 1.0, k.value));
                curve.add_key(next);
            }
            if curve.is_empty() {
                ui.weak("(empty curve)");
            }
        });
    });
}

/// Text shown in the closed layer mask dropdown.
pub fn mask_summary(mask: LayerMask, config: &PanelConfig) -> String {
    match mask {
        LayerMask::NOTHING => "Nothing".to_owned(),
        LayerMask::EVERYTHING => "Everything".to_owned(),
        m if m.count() == 1 => {
            let bit = m.bits().trailing_zeros();
            config
                .layer_name(bit)
                .map_or_else(|| format!("Layer {bit}"), str::to_owned)
        }
        _ => "Mixed...".to_owned(),
    }
}

fn layer_mask_field(ui: &mut egui::Ui, mask: &mut LayerMask, config: &PanelConfig) {
    ComboBox::from_id_salt("layer_mask")
        .selected_text(mask_summary(*mask, config))
        .show_ui(ui, |ui| {
            ui.selectable_value(mask, LayerMask::NOTHING, "Nothing");
            ui.selectable_value(mask, LayerMask::EVERYTHING, "Everything");
            ui.separator();
            for (bit, name) in config.named_layers() {
                let mut selected = mask.contains(bit);
                if ui.checkbox(&mut selected, name).changed() {
                    *mask = if selected {
                        mask.with(bit)
                    } else {
                        mask.without(bit)
                    };
                }
            }
        });
}

fn enum_field(ui: &mut egui::Ui, index: &mut usize, variants: &[&str]) {
    let selected = variants.get(*index).copied().unwrap_or("?");
    ComboBox::from_id_salt("enum")
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for (i, name) in variants.iter().enumerate() {
                ui.selectable_value(index, i, *name);
            }
        });
}

fn object_field(ui: &mut egui::Ui, object: &mut Option<ObjectRef>, candidates: &[ObjectRef]) {
    let selected = object
        .as_ref()
        .map_or_else(|| "None".to_owned(), |o| format!("{} ({})", o.name, o.id));
    ComboBox::from_id_salt("object")
        .selected_text(selected)
        .show_ui(ui, |ui| {
            if ui.selectable_label(object.is_none(), "None").clicked() {
                *object = None;
            }
            for candidate in candidates {
                let is_selected = object.as_ref() == Some(candidate);
                let text = format!("{} ({})", candidate.name, candidate.id);
                if ui.selectable_label(is_selected, text).clicked() {
                    *object = Some(candidate.clone());
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use lilium_core::editor::ObjectId;

    fn render<R>(f: impl FnOnce(&mut egui::Ui) -> R) -> Option<R> {
        let ctx = egui::Context::default();
        let mut out = None;
        let mut f = Some(f);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                if let Some(f) = f.take() {
                    out = Some(f(ui));
                }
            });
        });
        out
    }

    fn view(kind: ParamKind, value: ParamValue, type_name: &str) -> ParamView {
        ParamView {
            index: 0,
            label: "Value".into(),
            type_name: type_name.into(),
            kind,
            value,
            editable: true,
        }
    }

    #[test]
    fn mask_summaries() {
        let config = PanelConfig::default();
        assert_eq!(mask_summary(LayerMask::NOTHING, &config), "Nothing");
        assert_eq!(mask_summary(LayerMask::EVERYTHING, &config), "Everything");
        assert_eq!(mask_summary(LayerMask::layer(4), &config), "Water");
        assert_eq!(mask_summary(LayerMask::layer(3), &config), "Layer 3");
        assert_eq!(
            mask_summary(LayerMask::layer(0).with(4), &config),
            "Mixed..."
        );
    }

    #[test]
    fn untouched_fields_pass_values_through() {
        let config = PanelConfig::default();
        let objects = [ObjectRef::new(ObjectId(1), "Player")];
        let ctx = FieldContext {
            config: &config,
            objects: &objects,
        };
        let cases = [
            view(ParamKind::Int, ParamValue::Int(7), "i32"),
            view(ParamKind::Int, ParamValue::Int(-3), "u8"),
            view(ParamKind::Int, ParamValue::Int(i64::MAX), "i64"),
            view(ParamKind::Text, ParamValue::Text("hi".into()), "String"),
            view(ParamKind::Curve, ParamValue::Curve(Curve::linear()), "Curve"),
            view(ParamKind::LayerMask, ParamValue::LayerMask(LayerMask(5)), "LayerMask"),
            view(ParamKind::Object, ParamValue::Object(None), "Option<ObjectRef>"),
            view(
                ParamKind::Object,
                ParamValue::Object(Some(ObjectRef::new(ObjectId(9), "Gone"))),
                "Option<ObjectRef>",
            ),
            view(
                ParamKind::Rect,
                ParamValue::Rect(Rect::new(1.0, 2.0, -5.0, -3.0)),
                "Rect",
            ),
            view(
                ParamKind::Bounds,
                ParamValue::Bounds(Bounds::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.5, 2.0))),
                "Bounds",
            ),
            view(
                ParamKind::Vec4,
                ParamValue::Vec4(Vec4::new(-1.0, 2.5, 1e6, -1e-3)),
                "Vec4",
            ),
            view(ParamKind::Unsupported, ParamValue::Unsupported, "Mesh"),
        ];
        for case in &cases {
            let out = render(|ui| param_field(ui, case, &ctx));
            assert_eq!(out.as_ref(), Some(&case.value));
        }
    }

    #[test]
    fn mismatched_value_is_shown_as_unsupported() {
        let config = PanelConfig::default();
        let ctx = FieldContext {
            config: &config,
            objects: &[],
        };
        let case = view(ParamKind::Float, ParamValue::Bool(true), "f32");
        let out = render(|ui| param_field(ui, &case, &ctx));
        assert_eq!(out, Some(ParamValue::Bool(true)));
    }
}
