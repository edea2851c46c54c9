/// Segment classification for route patterns
///
/// Pure functional parsing of single pattern components into typed segments.
/// All functions are **pure**: same input → same output, no side effects.
use std::fmt;

/// Kind of a route pattern segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Literal path component that must match exactly
    Dir,
    /// Named parameter bound to `state[name]`
    Param,
}

/// A single typed segment of a parsed route pattern
///
/// # Examples
///
/// ```
/// use state_router::route::pattern::{classify_segment, SegmentKind};
///
/// let seg = classify_segment("products").unwrap();
/// assert_eq!(seg.kind, SegmentKind::Dir);
///
/// let seg = classify_segment(":id").unwrap();
/// assert_eq!(seg.kind, SegmentKind::Param);
/// assert_eq!(seg.name, "id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub name: String,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SegmentKind::Dir,
        }
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SegmentKind::Param,
        }
    }

    pub fn is_param(&self) -> bool {
        self.kind == SegmentKind::Param
    }
}

/// Non-fatal diagnostic produced while parsing a pattern
///
/// The `Display` output is the exact text emitted on the warning channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternWarning {
    /// Parameter name contains characters outside `[a-zA-Z0-9_-]`
    InvalidCharacters { segment: String },
    /// Parameter name contains a `*`
    Splat { segment: String },
}

impl fmt::Display for PatternWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternWarning::InvalidCharacters { segment } => {
                write!(f, "Param segments \"{segment}\" includes invalid characters.")
            }
            PatternWarning::Splat { segment } => write!(
                f,
                "Param segments \"{segment}\" includes invalid characters. \
                 Splats are not supported. Consider using child routes instead"
            ),
        }
    }
}

/// Checks a parameter name against the allowed identifier set
///
/// Returns `None` when the name is valid.
///
/// # Examples
///
/// ```
/// use state_router::route::pattern::{validate_param_name, PatternWarning};
///
/// assert_eq!(validate_param_name("dataset"), None);
/// assert!(matches!(validate_param_name("pa`ram"), Some(PatternWarning::InvalidCharacters { .. })));
/// assert!(matches!(validate_param_name("rest*"), Some(PatternWarning::Splat { .. })));
/// ```
pub fn validate_param_name(name: &str) -> Option<PatternWarning> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        return None;
    }

    let segment = format!(":{name}");
    if name.contains('*') {
        Some(PatternWarning::Splat { segment })
    } else {
        Some(PatternWarning::InvalidCharacters { segment })
    }
}

/// Classifies one pattern component (pure function)
///
/// # Parsing Rules
///
/// 1. **Empty**: no segment
/// 2. **Param**: `:name`
/// 3. **Dir**: any other text
pub fn classify_segment(component: &str) -> Option<Segment> {
    if component.is_empty() {
        return None;
    }

    match component.strip_prefix(':') {
        Some(name) => Some(Segment::param(name)),
        None => Some(Segment::dir(component)),
    }
}
