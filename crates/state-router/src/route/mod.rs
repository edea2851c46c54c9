/// Route pattern module
///
/// Contains the pure functional components that turn pattern strings into
/// typed segment lists:
/// - `pattern` classifies single components and validates parameter names
/// - `parser` folds a whole pattern into a `RoutePattern`

pub mod parser;
pub mod pattern;

pub use parser::{parse, RoutePattern};
pub use pattern::{classify_segment, validate_param_name, PatternWarning, Segment, SegmentKind};
