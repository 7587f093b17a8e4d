use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kinema_core::{Color, Transform2D};

/// Unique identifier for a scene object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh unique object id.
    pub fn generate() -> Self {
        Self(format!("obj-{}", Uuid::new_v4()))
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geometry kind of a scene object, as drawn on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Ellipse,
    Path,
    Text,
    Group,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeKind::Rect => write!(f, "rect"),
            ShapeKind::Ellipse => write!(f, "ellipse"),
            ShapeKind::Path => write!(f, "path"),
            ShapeKind::Text => write!(f, "text"),
            ShapeKind::Group => write!(f, "group"),
        }
    }
}

/// Current fill/stroke styling of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
}

/// A live scene object as the exporter sees it: identity, geometry kind,
/// and the current (static) transform and style. The registry owns the
/// object state; the canvas and UI hold identifiers only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub kind: ShapeKind,
    pub transform: Transform2D,
    pub style: ObjectStyle,
}

impl SceneObject {
    /// Create an object with identity transform and no styling.
    pub fn new(id: ObjectId, kind: ShapeKind) -> Self {
        Self {
            id,
            kind,
            transform: Transform2D::identity(),
            style: ObjectStyle::default(),
        }
    }

    /// Builder: set position.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.transform.position = kinema_core::Point2D::new(x, y);
        self
    }

    /// Builder: set scale factors.
    pub fn with_scale(mut self, sx: f64, sy: f64) -> Self {
        self.transform.scale = kinema_core::Point2D::new(sx, sy);
        self
    }

    /// Builder: set rotation in degrees.
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.transform.rotation = degrees;
        self
    }

    /// Builder: set opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.transform.opacity = opacity;
        self
    }

    /// Builder: set fill color.
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.style.fill = Some(fill);
        self
    }

    /// Builder: set stroke color.
    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.style.stroke = Some(stroke);
        self
    }
}

/// Registry of all live scene objects. Insertion order is stable and
/// becomes the exported layer order, so the arena is an ordered list with
/// map-style lookup rather than a hash map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneRegistry {
    objects: Vec<SceneObject>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Register an object. Re-registering an existing id replaces the
    /// object in place, keeping its position in the layer order.
    pub fn register(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id.clone();
        if let Some(existing) = self.objects.iter_mut().find(|o| o.id == id) {
            *existing = object;
        } else {
            self.objects.push(object);
        }
        id
    }

    /// Remove an object by id.
    pub fn unregister(&mut self, id: &ObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|o| &o.id == id)?;
        Some(self.objects.remove(index))
    }

    /// Get an object by id.
    pub fn get(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| &o.id == id)
    }

    /// Get a mutable reference to an object by id.
    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| &o.id == id)
    }

    /// All objects in insertion order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Number of registered objects.
    pub fn count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Drop every registered object.
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}
