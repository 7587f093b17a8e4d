use serde::de::Error as DeError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use kinema_core::Point2D;

/// Lottie format version the exporter stamps into documents.
pub const LOTTIE_VERSION: &str = "5.5.7";

/// The root of a Lottie animation document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LottieAnimation {
    /// Format version.
    pub v: String,
    /// Frame rate.
    pub fr: f64,
    /// In-point (first frame).
    pub ip: f64,
    /// Out-point (last frame).
    pub op: f64,
    /// Canvas width in pixels.
    pub w: f64,
    /// Canvas height in pixels.
    pub h: f64,
    /// Animation name.
    pub nm: String,
    pub layers: Vec<LottieLayer>,
}

impl LottieAnimation {
    /// Render as pretty-printed UTF-8 JSON, the form the download and
    /// clipboard sinks accept.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// One layer of the document: a transform block plus shape descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LottieLayer {
    /// Layer type (4 = shape layer).
    pub ty: u32,
    /// Layer name.
    pub nm: String,
    /// Layer index.
    pub ind: u32,
    /// Layer in-point.
    pub ip: f64,
    /// Layer out-point.
    pub op: f64,
    /// Transform block.
    pub ks: LottieTransform,
    #[serde(default)]
    pub shapes: Vec<LottieShape>,
}

/// The five animatable transform channels of a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LottieTransform {
    /// Position.
    pub p: LottieValue,
    /// Scale (percent).
    pub s: LottieValue,
    /// Rotation (degrees).
    pub r: LottieValue,
    /// Opacity (percent).
    pub o: LottieValue,
    /// Anchor point.
    pub a: LottieValue,
}

/// A property value that is either fixed for the whole duration or carries
/// an ordered keyframe track. Encodes the wire shape `{"a": 0|1, "k": ...}`;
/// the variant, not a flag, decides how `k` is read.
#[derive(Debug, Clone, PartialEq)]
pub enum LottieValue {
    Static(StaticValue),
    Animated(Vec<LottieKeyframe>),
}

impl LottieValue {
    pub fn scalar(value: f64) -> Self {
        LottieValue::Static(StaticValue::Scalar(value))
    }

    pub fn components(values: Vec<f64>) -> Self {
        LottieValue::Static(StaticValue::Components(values))
    }
}

impl Serialize for LottieValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("LottieValue", 2)?;
        match self {
            LottieValue::Static(value) => {
                state.serialize_field("a", &0u8)?;
                state.serialize_field("k", value)?;
            }
            LottieValue::Animated(entries) => {
                state.serialize_field("a", &1u8)?;
                state.serialize_field("k", entries)?;
            }
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for LottieValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            a: u8,
            k: serde_json::Value,
        }

        let raw = Raw::deserialize(deserializer)?;
        match raw.a {
            0 => serde_json::from_value(raw.k)
                .map(LottieValue::Static)
                .map_err(DeError::custom),
            1 => serde_json::from_value(raw.k)
                .map(LottieValue::Animated)
                .map_err(DeError::custom),
            other => Err(DeError::custom(format!(
                "animated flag must be 0 or 1, got {other}"
            ))),
        }
    }
}

/// The payload of a static channel: a bare scalar or a component list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StaticValue {
    Scalar(f64),
    Components(Vec<f64>),
}

/// One entry of an animated track. The final entry of a track carries no
/// tangent handles: a temporal endpoint has no outgoing segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LottieKeyframe {
    /// Frame.
    pub t: f64,
    /// Value components at this frame.
    pub s: Vec<f64>,
    /// Out-tangent of the segment leaving this keyframe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o: Option<Point2D>,
    /// In-tangent of the segment arriving at the next keyframe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i: Option<Point2D>,
}

/// A shape descriptor: geometry (`rc`/`el`/`sh`) or styling (`fl`/`st`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LottieShape {
    pub ty: String,
    pub nm: String,
    /// Color track for fill and stroke descriptors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<LottieValue>,
}

impl LottieShape {
    /// A bare geometry descriptor with no color payload.
    pub fn geometry(ty: impl Into<String>, nm: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            nm: nm.into(),
            c: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_value_wire_shape() {
        let json = serde_json::to_value(LottieValue::components(vec![256.0, 256.0])).unwrap();
        assert_eq!(json["a"], 0);
        assert_eq!(json["k"], serde_json::json!([256.0, 256.0]));
    }

    #[test]
    fn test_animated_value_wire_shape() {
        let track = LottieValue::Animated(vec![
            LottieKeyframe {
                t: 0.0,
                s: vec![0.0],
                o: Some(Point2D::new(0.0, 0.0)),
                i: Some(Point2D::new(1.0, 1.0)),
            },
            LottieKeyframe {
                t: 30.0,
                s: vec![100.0],
                o: None,
                i: None,
            },
        ]);
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["a"], 1);
        assert_eq!(json["k"][0]["t"], 0.0);
        assert_eq!(json["k"][0]["o"]["x"], 0.0);
        // the terminal entry has no handle keys at all
        assert!(json["k"][1].get("o").is_none());
        assert!(json["k"][1].get("i").is_none());
    }

    #[test]
    fn test_value_round_trip() {
        for value in [
            LottieValue::scalar(45.0),
            LottieValue::components(vec![1.0, 2.0]),
            LottieValue::Animated(vec![LottieKeyframe {
                t: 10.0,
                s: vec![50.0],
                o: None,
                i: None,
            }]),
        ] {
            let json = serde_json::to_string(&value).unwrap();
            let back: LottieValue = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value);
        }
    }

    #[test]
    fn test_value_rejects_bad_flag() {
        let result: Result<LottieValue, _> =
            serde_json::from_value(serde_json::json!({ "a": 2, "k": 1.0 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_shape_omits_empty_color() {
        let json = serde_json::to_value(LottieShape::geometry("rc", "Rectangle")).unwrap();
        assert_eq!(json["ty"], "rc");
        assert!(json.get("c").is_none());
    }
}
