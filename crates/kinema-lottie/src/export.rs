use kinema_core::{Color, KinemaError, KinemaResult};
use kinema_timeline::{Keyframe, Property, SceneObject, SceneRegistry, ShapeKind, Timeline, Value};

use crate::document::{
    LottieAnimation, LottieKeyframe, LottieLayer, LottieShape, LottieTransform, LottieValue,
    StaticValue, LOTTIE_VERSION,
};

/// Lottie layer type for vector shape layers.
const SHAPE_LAYER_TYPE: u32 = 4;

const DEFAULT_CANVAS_SIZE: f64 = 512.0;

/// Document-level export settings.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub name: String,
    pub width: f64,
    pub height: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            name: "Animation".to_string(),
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
        }
    }
}

/// Assemble a Lottie document from the live scene objects and the
/// timeline snapshot. Registry insertion order becomes the layer order, so
/// repeated exports of unchanged state are byte-identical.
pub fn export(
    registry: &SceneRegistry,
    timeline: &Timeline,
    options: &ExportOptions,
) -> KinemaResult<LottieAnimation> {
    tracing::debug!(
        objects = registry.count(),
        keyframes = timeline.keyframe_count(),
        "assembling lottie document"
    );

    let duration = timeline.duration() as f64;
    let layers = registry
        .objects()
        .iter()
        .enumerate()
        .map(|(index, object)| build_layer(object, timeline, index as u32, duration))
        .collect::<KinemaResult<Vec<_>>>()?;

    Ok(LottieAnimation {
        v: LOTTIE_VERSION.to_string(),
        fr: timeline.frame_rate() as f64,
        ip: 0.0,
        op: duration,
        w: options.width,
        h: options.height,
        nm: options.name.clone(),
        layers,
    })
}

/// Export and render as the pretty-printed UTF-8 JSON string the
/// download/clipboard sinks consume.
pub fn export_to_string(
    registry: &SceneRegistry,
    timeline: &Timeline,
    options: &ExportOptions,
) -> KinemaResult<String> {
    Ok(export(registry, timeline, options)?.to_pretty_json()?)
}

fn build_layer(
    object: &SceneObject,
    timeline: &Timeline,
    index: u32,
    duration: f64,
) -> KinemaResult<LottieLayer> {
    let keyframes = timeline.keyframes_for_object(&object.id);
    let transform = &object.transform;

    let ks = LottieTransform {
        p: transform_channel(
            &keyframes,
            Property::Position,
            StaticValue::Components(vec![transform.position.x, transform.position.y]),
        )?,
        s: transform_channel(
            &keyframes,
            Property::Scale,
            StaticValue::Components(vec![transform.scale.x * 100.0, transform.scale.y * 100.0]),
        )?,
        r: transform_channel(
            &keyframes,
            Property::Rotation,
            StaticValue::Scalar(transform.rotation),
        )?,
        o: transform_channel(
            &keyframes,
            Property::Opacity,
            StaticValue::Scalar(transform.opacity * 100.0),
        )?,
        // anchor-point animation is out of scope
        a: LottieValue::components(vec![0.0, 0.0]),
    };

    Ok(LottieLayer {
        ty: SHAPE_LAYER_TYPE,
        nm: object.id.to_string(),
        ind: index,
        ip: 0.0,
        op: duration,
        ks,
        shapes: build_shapes(object, &keyframes)?,
    })
}

/// Emit one transform channel: animated when the object has keyframes for
/// the property, otherwise static at the live value.
fn transform_channel(
    keyframes: &[&Keyframe],
    property: Property,
    static_value: StaticValue,
) -> KinemaResult<LottieValue> {
    let track = sorted_track(keyframes, property);
    if track.is_empty() {
        return Ok(LottieValue::Static(static_value));
    }

    let last = track.len() - 1;
    let entries = track
        .iter()
        .enumerate()
        .map(|(i, kf)| Ok(build_entry(kf, transform_components(kf)?, i == last)))
        .collect::<KinemaResult<Vec<_>>>()?;
    Ok(LottieValue::Animated(entries))
}

/// Keyframes of one property, ascending by frame. The order is total: the
/// store holds at most one keyframe per (object, frame, property).
fn sorted_track<'a>(keyframes: &[&'a Keyframe], property: Property) -> Vec<&'a Keyframe> {
    let mut track: Vec<&Keyframe> = keyframes
        .iter()
        .copied()
        .filter(|kf| kf.property == property)
        .collect();
    track.sort_by_key(|kf| kf.frame);
    track
}

fn build_entry(keyframe: &Keyframe, components: Vec<f64>, terminal: bool) -> LottieKeyframe {
    let mut entry = LottieKeyframe {
        t: keyframe.frame as f64,
        s: components,
        o: None,
        i: None,
    };
    if !terminal {
        let handles = keyframe.easing.handles();
        entry.o = Some(handles.o);
        entry.i = Some(handles.i);
    }
    entry
}

/// Scalar values wrap in a one-element array; vectors pass through.
fn transform_components(keyframe: &Keyframe) -> KinemaResult<Vec<f64>> {
    match &keyframe.value {
        Value::Scalar(v) => Ok(vec![*v]),
        Value::Vec2([x, y]) => Ok(vec![*x, *y]),
        Value::Color(_) => Err(KinemaError::Export(format!(
            "color value on {} track of object {} at frame {}",
            keyframe.property, keyframe.object_id, keyframe.frame
        ))),
    }
}

fn build_shapes(object: &SceneObject, keyframes: &[&Keyframe]) -> KinemaResult<Vec<LottieShape>> {
    let mut shapes = vec![match object.kind {
        ShapeKind::Rect => LottieShape::geometry("rc", "Rectangle"),
        ShapeKind::Ellipse => LottieShape::geometry("el", "Ellipse"),
        ShapeKind::Path => LottieShape::geometry("sh", "Path"),
        _ => LottieShape::geometry("sh", "Shape"),
    }];

    let has_color_tracks = keyframes
        .iter()
        .any(|kf| matches!(kf.property, Property::Fill | Property::Stroke));
    if has_color_tracks {
        shapes.push(LottieShape {
            ty: "fl".to_string(),
            nm: "Fill".to_string(),
            c: Some(color_channel(keyframes, Property::Fill, object.style.fill)?),
        });
        shapes.push(LottieShape {
            ty: "st".to_string(),
            nm: "Stroke".to_string(),
            c: Some(color_channel(
                keyframes,
                Property::Stroke,
                object.style.stroke,
            )?),
        });
    }

    Ok(shapes)
}

/// Emit a color track: keyframed colors become RGBA entries with tangent
/// handles on every non-terminal entry; otherwise a single static RGBA
/// from the live style (black when unset).
fn color_channel(
    keyframes: &[&Keyframe],
    property: Property,
    live: Option<Color>,
) -> KinemaResult<LottieValue> {
    let track = sorted_track(keyframes, property);
    if track.is_empty() {
        let color = live.unwrap_or(Color::BLACK);
        return Ok(LottieValue::components(
            color.to_rgba_components().to_vec(),
        ));
    }

    let last = track.len() - 1;
    let entries = track
        .iter()
        .enumerate()
        .map(|(i, kf)| Ok(build_entry(kf, color_components(kf)?, i == last)))
        .collect::<KinemaResult<Vec<_>>>()?;
    Ok(LottieValue::Animated(entries))
}

fn color_components(keyframe: &Keyframe) -> KinemaResult<Vec<f64>> {
    let hex = keyframe.value.as_color().ok_or_else(|| {
        KinemaError::Export(format!(
            "non-color value on {} track of object {} at frame {}",
            keyframe.property, keyframe.object_id, keyframe.frame
        ))
    })?;
    Ok(Color::from_hex(hex)?.to_rgba_components().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinema_core::{Easing, Point2D};
    use kinema_timeline::ObjectId;

    fn rect_object(id: &str) -> SceneObject {
        SceneObject::new(ObjectId::new(id), ShapeKind::Rect)
            .with_position(100.0, 150.0)
            .with_scale(1.0, 1.0)
            .with_opacity(1.0)
    }

    fn keyframe(object: &str, frame: u32, property: Property, value: Value) -> Keyframe {
        Keyframe::new(ObjectId::new(object), frame, property, value)
    }

    #[test]
    fn test_document_header() {
        let registry = SceneRegistry::new();
        let timeline = Timeline::new();
        let doc = export(&registry, &timeline, &ExportOptions::default()).unwrap();

        assert_eq!(doc.v, "5.5.7");
        assert_eq!(doc.fr, 30.0);
        assert_eq!(doc.ip, 0.0);
        assert_eq!(doc.op, 60.0);
        assert_eq!(doc.w, 512.0);
        assert_eq!(doc.h, 512.0);
        assert_eq!(doc.nm, "Animation");
        assert!(doc.layers.is_empty());
    }

    #[test]
    fn test_object_without_keyframes_exports_static_channels() {
        let mut registry = SceneRegistry::new();
        registry.register(
            rect_object("rect-1")
                .with_scale(2.0, 0.5)
                .with_rotation(45.0)
                .with_opacity(0.8),
        );
        let timeline = Timeline::new();
        let doc = export(&registry, &timeline, &ExportOptions::default()).unwrap();

        let ks = &doc.layers[0].ks;
        assert_eq!(
            ks.p,
            LottieValue::components(vec![100.0, 150.0]),
            "position is the live value, not a keyframe array"
        );
        assert_eq!(ks.s, LottieValue::components(vec![200.0, 50.0]));
        assert_eq!(ks.r, LottieValue::scalar(45.0));
        assert_eq!(ks.o, LottieValue::scalar(80.0));
        assert_eq!(ks.a, LottieValue::components(vec![0.0, 0.0]));
    }

    #[test]
    fn test_animated_opacity_channel() {
        let mut registry = SceneRegistry::new();
        registry.register(rect_object("rect-1"));
        let mut timeline = Timeline::new();
        timeline.set_duration(30);
        timeline.add_keyframe(keyframe("rect-1", 0, Property::Opacity, Value::Scalar(0.0)));
        timeline.add_keyframe(keyframe(
            "rect-1",
            30,
            Property::Opacity,
            Value::Scalar(100.0),
        ));

        let doc = export(&registry, &timeline, &ExportOptions::default()).unwrap();
        let LottieValue::Animated(entries) = &doc.layers[0].ks.o else {
            panic!("opacity channel should be animated");
        };

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].t, 0.0);
        assert_eq!(entries[0].s, vec![0.0]);
        // default easing resolves to the linear preset handles
        assert_eq!(entries[0].o, Some(Point2D::new(0.0, 0.0)));
        assert_eq!(entries[0].i, Some(Point2D::new(1.0, 1.0)));
        // the terminal entry has no outgoing segment, hence no handles
        assert_eq!(entries[1].t, 30.0);
        assert_eq!(entries[1].s, vec![100.0]);
        assert_eq!(entries[1].o, None);
        assert_eq!(entries[1].i, None);
    }

    #[test]
    fn test_animated_track_sorts_by_frame() {
        let mut registry = SceneRegistry::new();
        registry.register(rect_object("rect-1"));
        let mut timeline = Timeline::new();
        timeline.add_keyframe(keyframe(
            "rect-1",
            30,
            Property::Rotation,
            Value::Scalar(360.0),
        ));
        timeline.add_keyframe(keyframe("rect-1", 0, Property::Rotation, Value::Scalar(0.0)));
        timeline.add_keyframe(keyframe(
            "rect-1",
            15,
            Property::Rotation,
            Value::Scalar(180.0),
        ));

        let doc = export(&registry, &timeline, &ExportOptions::default()).unwrap();
        let LottieValue::Animated(entries) = &doc.layers[0].ks.r else {
            panic!("rotation channel should be animated");
        };
        let frames: Vec<f64> = entries.iter().map(|e| e.t).collect();
        assert_eq!(frames, vec![0.0, 15.0, 30.0]);
    }

    #[test]
    fn test_bezier_easing_handles_pass_through() {
        let mut registry = SceneRegistry::new();
        registry.register(rect_object("rect-1"));
        let mut timeline = Timeline::new();
        timeline.add_keyframe(
            keyframe("rect-1", 0, Property::Scale, Value::Vec2([0.0, 0.0]))
                .with_easing(Easing::bezier(0.68, -0.55, 0.27, 1.55)),
        );
        timeline.add_keyframe(keyframe(
            "rect-1",
            30,
            Property::Scale,
            Value::Vec2([100.0, 100.0]),
        ));

        let doc = export(&registry, &timeline, &ExportOptions::default()).unwrap();
        let LottieValue::Animated(entries) = &doc.layers[0].ks.s else {
            panic!("scale channel should be animated");
        };
        assert_eq!(entries[0].o, Some(Point2D::new(0.68, -0.55)));
        assert_eq!(entries[0].i, Some(Point2D::new(0.27, 1.55)));
        assert_eq!(entries[0].s, vec![0.0, 0.0]);
    }

    #[test]
    fn test_layer_identity_and_order() {
        let mut registry = SceneRegistry::new();
        registry.register(rect_object("first"));
        registry.register(SceneObject::new(ObjectId::new("second"), ShapeKind::Ellipse));
        let timeline = Timeline::new();

        let doc = export(&registry, &timeline, &ExportOptions::default()).unwrap();
        assert_eq!(doc.layers.len(), 2);
        assert_eq!(doc.layers[0].nm, "first");
        assert_eq!(doc.layers[0].ind, 0);
        assert_eq!(doc.layers[0].ty, 4);
        assert_eq!(doc.layers[1].nm, "second");
        assert_eq!(doc.layers[1].ind, 1);
        assert_eq!(doc.layers[1].op, 60.0);
    }

    #[test]
    fn test_geometry_descriptors() {
        let mut registry = SceneRegistry::new();
        registry.register(SceneObject::new(ObjectId::new("r"), ShapeKind::Rect));
        registry.register(SceneObject::new(ObjectId::new("e"), ShapeKind::Ellipse));
        registry.register(SceneObject::new(ObjectId::new("p"), ShapeKind::Path));
        registry.register(SceneObject::new(ObjectId::new("t"), ShapeKind::Text));
        let timeline = Timeline::new();

        let doc = export(&registry, &timeline, &ExportOptions::default()).unwrap();
        let tags: Vec<(&str, &str)> = doc
            .layers
            .iter()
            .map(|l| (l.shapes[0].ty.as_str(), l.shapes[0].nm.as_str()))
            .collect();
        assert_eq!(
            tags,
            vec![
                ("rc", "Rectangle"),
                ("el", "Ellipse"),
                ("sh", "Path"),
                ("sh", "Shape"),
            ]
        );
    }

    #[test]
    fn test_fill_keyframes_emit_color_tracks() {
        let mut registry = SceneRegistry::new();
        registry.register(rect_object("rect-1"));
        let mut timeline = Timeline::new();
        timeline.add_keyframe(keyframe(
            "rect-1",
            0,
            Property::Fill,
            Value::Color("#ff0000".into()),
        ));
        timeline.add_keyframe(keyframe(
            "rect-1",
            30,
            Property::Fill,
            Value::Color("#0000ff".into()),
        ));

        let doc = export(&registry, &timeline, &ExportOptions::default()).unwrap();
        let shapes = &doc.layers[0].shapes;
        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[1].ty, "fl");
        assert_eq!(shapes[2].ty, "st");

        let Some(LottieValue::Animated(entries)) = &shapes[1].c else {
            panic!("fill should carry an animated color track");
        };
        assert_eq!(entries[0].s, vec![1.0, 0.0, 0.0, 1.0]);
        assert!(entries[0].o.is_some());
        assert_eq!(entries[1].s, vec![0.0, 0.0, 1.0, 1.0]);
        assert!(entries[1].o.is_none());

        // no stroke keyframes: the stroke track is static, defaulting to black
        assert_eq!(
            shapes[2].c,
            Some(LottieValue::components(vec![0.0, 0.0, 0.0, 1.0]))
        );
    }

    #[test]
    fn test_static_color_uses_live_style() {
        let mut registry = SceneRegistry::new();
        registry.register(rect_object("rect-1").with_fill(Color::from_hex("#00ff00").unwrap()));
        let mut timeline = Timeline::new();
        timeline.add_keyframe(keyframe(
            "rect-1",
            0,
            Property::Stroke,
            Value::Color("#000000".into()),
        ));
        timeline.add_keyframe(keyframe(
            "rect-1",
            10,
            Property::Stroke,
            Value::Color("#ffffff".into()),
        ));

        let doc = export(&registry, &timeline, &ExportOptions::default()).unwrap();
        let shapes = &doc.layers[0].shapes;
        // fill has no keyframes: static track from the live fill color
        assert_eq!(
            shapes[1].c,
            Some(LottieValue::components(vec![0.0, 1.0, 0.0, 1.0]))
        );
        assert!(matches!(shapes[2].c, Some(LottieValue::Animated(_))));
    }

    #[test]
    fn test_no_color_keyframes_no_style_shapes() {
        let mut registry = SceneRegistry::new();
        registry.register(rect_object("rect-1"));
        let timeline = Timeline::new();
        let doc = export(&registry, &timeline, &ExportOptions::default()).unwrap();
        assert_eq!(doc.layers[0].shapes.len(), 1);
    }

    #[test]
    fn test_malformed_color_fails_export() {
        let mut registry = SceneRegistry::new();
        registry.register(rect_object("rect-1"));
        let mut timeline = Timeline::new();
        timeline.add_keyframe(keyframe(
            "rect-1",
            0,
            Property::Fill,
            Value::Color("not-a-color".into()),
        ));

        let err = export(&registry, &timeline, &ExportOptions::default()).unwrap_err();
        assert!(err.to_string().contains("invalid hex"));
    }

    #[test]
    fn test_mismatched_value_shape_fails_export() {
        let mut registry = SceneRegistry::new();
        registry.register(rect_object("rect-1"));
        let mut timeline = Timeline::new();
        timeline.add_keyframe(keyframe(
            "rect-1",
            0,
            Property::Opacity,
            Value::Color("#ff0000".into()),
        ));
        timeline.add_keyframe(keyframe(
            "rect-1",
            30,
            Property::Opacity,
            Value::Scalar(100.0),
        ));

        let err = export(&registry, &timeline, &ExportOptions::default()).unwrap_err();
        assert!(matches!(err, KinemaError::Export(_)));
    }

    #[test]
    fn test_export_is_deterministic() {
        let mut registry = SceneRegistry::new();
        registry.register(rect_object("rect-1"));
        registry.register(rect_object("rect-2"));
        let mut timeline = Timeline::new();
        for frame in [0, 10, 20, 30] {
            timeline.add_keyframe(keyframe(
                "rect-1",
                frame,
                Property::Opacity,
                Value::Scalar(frame as f64),
            ));
            timeline.add_keyframe(keyframe(
                "rect-2",
                frame,
                Property::Position,
                Value::Vec2([frame as f64, 0.0]),
            ));
        }

        let options = ExportOptions::default();
        let first = export_to_string(&registry, &timeline, &options).unwrap();
        let second = export_to_string(&registry, &timeline, &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_export_to_string_is_pretty_json() {
        let registry = SceneRegistry::new();
        let timeline = Timeline::new();
        let json = export_to_string(&registry, &timeline, &ExportOptions::default()).unwrap();
        assert!(json.contains("\"v\": \"5.5.7\""));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["fr"], 30.0);
    }
}
