use crate::foundation::core::{Props, Vec3};

/// Drawable shape family; the emitter has one snippet shape per variant (two for points).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualType {
    /// A sphere, or a whole point cloud when flagged as a collection.
    Point,
    /// A 3-D arrow from the element position.
    Arrow,
    /// A line segment tied to one sample point.
    Line,
    /// A flat rectangle.
    Surface,
    /// A text label.
    Text,
    /// One coordinate axis through the origin.
    AxisSet,
    /// A flat ellipse.
    Ellipse,
}

/// One timed animation applied to a visual element.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimationEvent {
    /// Animation kind, a key of the animation library.
    pub kind: String,
    /// Seconds after scene start.
    pub delay: f64,
    /// Run time in seconds.
    pub duration: f64,
}

impl AnimationEvent {
    /// Build an event.
    pub fn new(kind: &str, delay: f64, duration: f64) -> Self {
        Self {
            kind: kind.to_string(),
            delay,
            duration,
        }
    }
}

/// Concrete drawable/animatable unit.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct VisualElement {
    /// Identifier, also the variable name in the emitted script.
    pub id: String,
    /// Shape family.
    pub visual_type: VisualType,
    /// Anchor position.
    pub position: Vec3,
    /// Styling and geometry.
    pub props: Props,
    /// Animation events in declaration order.
    pub events: Vec<AnimationEvent>,
    /// Ids (or kinds) this element depends on.
    pub depends_on: Vec<String>,
}

impl VisualElement {
    /// Color property, if set.
    pub fn color(&self) -> Option<&str> {
        self.props.get("color").and_then(|v| v.as_str())
    }

    /// Numeric property, falling back to `default`.
    pub fn num(&self, key: &str, default: f64) -> f64 {
        self.props.get(key).and_then(|v| v.as_f64()).unwrap_or(default)
    }

    /// Whether a boolean property is set to `true`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.props.get(key), Some(crate::foundation::core::PropValue::Flag(true)))
    }
}

/// Straight camera move.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CameraMovement {
    /// Start position.
    pub start: Vec3,
    /// End position.
    pub end: Vec3,
    /// Run time in seconds.
    pub duration: f64,
    /// Easing tag.
    pub easing: String,
}

/// Per-scene visual record: the unit the emitter serializes and the critic scores.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneVisual {
    /// Scene id.
    pub name: String,
    /// Scene duration in seconds (mutable across revisions).
    pub duration: f64,
    /// Visual elements in scene-element order, then ascending fan-out index.
    pub elements: Vec<VisualElement>,
    /// Camera moves.
    pub camera_movements: Vec<CameraMovement>,
    /// Narration (mutable across revisions).
    pub narration: String,
    /// Background color, `#rrggbb`.
    pub background_color: String,
    /// A title label has been appended by a revision.
    pub labelled: bool,
}

impl SceneVisual {
    /// Class name in the emitted script (`data_introduction` -> `DataIntroduction`).
    pub fn class_name(&self) -> String {
        class_name(&self.name)
    }
}

/// CamelCase join of an underscored id.
pub fn class_name(id: &str) -> String {
    id.split('_').map(capitalize).collect()
}

/// Space-separated Title Case of an underscored id.
pub fn title_case(id: &str) -> String {
    id.split('_')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
