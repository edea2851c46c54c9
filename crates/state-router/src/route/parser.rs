/// Pattern parsing for route nodes
///
/// Pure functional parser that transforms pattern strings like
/// `/products/:id/*` into an ordered list of typed segments.
use super::pattern::{classify_segment, validate_param_name, PatternWarning, Segment};

/// A parsed route pattern
///
/// Immutable after creation. The same input always yields the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
    warnings: Vec<PatternWarning>,
}

impl RoutePattern {
    /// The pattern string exactly as written
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Diagnostics collected while parsing (also emitted as `tracing` warnings)
    pub fn warnings(&self) -> &[PatternWarning] {
        &self.warnings
    }

    /// Names of the `param` segments, in pattern order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter(|s| s.is_param())
            .map(|s| s.name.as_str())
    }
}

/// Internal accumulator for fold-based parsing
#[derive(Default)]
struct ParseState {
    segments: Vec<Segment>,
    warnings: Vec<PatternWarning>,
}

impl ParseState {
    fn with_segment(mut self, segment: Segment) -> Self {
        if segment.is_param() {
            if let Some(warning) = validate_param_name(&segment.name) {
                self.warnings.push(warning);
            }
        }
        self.segments.push(segment);
        self
    }
}

/// Parses a route pattern into segments (pure function)
///
/// - Anything after `?` is ignored
/// - Empty components (leading, trailing or doubled `/`) are discarded
/// - A trailing bare `*` contributes no segment
/// - Invalid parameter names are reported, never rejected
///
/// # Examples
///
/// ```
/// use state_router::route::parser::parse;
/// use state_router::route::pattern::Segment;
///
/// let pattern = parse("/products/:id/*");
/// assert_eq!(pattern.raw(), "/products/:id/*");
/// assert_eq!(
///     pattern.segments(),
///     &[Segment::dir("products"), Segment::param("id")]
/// );
/// ```
pub fn parse(raw: &str) -> RoutePattern {
    let without_query = raw.split('?').next().unwrap_or_default();
    let components: Vec<&str> = without_query.split('/').filter(|c| !c.is_empty()).collect();

    let body = match components.split_last() {
        Some((&"*", rest)) => rest,
        _ => components.as_slice(),
    };

    let state = body
        .iter()
        .filter_map(|c| classify_segment(c))
        .fold(ParseState::default(), ParseState::with_segment);

    for warning in &state.warnings {
        tracing::warn!(pattern = raw, "{}", warning);
    }

    RoutePattern {
        raw: raw.to_string(),
        segments: state.segments,
        warnings: state.warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_static() {
        let pattern = parse("/some/basepath");
        assert_eq!(
            pattern.segments(),
            &[Segment::dir("some"), Segment::dir("basepath")]
        );
        assert!(pattern.warnings().is_empty());
    }

    #[test]
    fn test_parse_params() {
        let pattern = parse("/foo/:bar/:baz");
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["bar", "baz"]);
    }

    #[test]
    fn test_parse_discards_empty_components() {
        let pattern = parse("//foo///:bar/");
        assert_eq!(
            pattern.segments(),
            &[Segment::dir("foo"), Segment::param("bar")]
        );
    }

    #[test]
    fn test_parse_root() {
        assert!(parse("/").segments().is_empty());
        assert!(parse("").segments().is_empty());
    }

    #[test]
    fn test_parse_trailing_wildcard() {
        let pattern = parse("/tools/*");
        assert_eq!(pattern.segments(), &[Segment::dir("tools")]);
        assert!(pattern.warnings().is_empty());
    }

    #[test]
    fn test_parse_ignores_query() {
        let pattern = parse("/search/:term?page=1");
        assert_eq!(
            pattern.segments(),
            &[Segment::dir("search"), Segment::param("term")]
        );
        assert_eq!(pattern.raw(), "/search/:term?page=1");
    }

    #[test]
    fn test_parse_invalid_param_still_builds() {
        let pattern = parse("/foo/:pa`ram");
        assert_eq!(pattern.segments()[1], Segment::param("pa`ram"));
        assert_eq!(
            pattern.warnings(),
            &[PatternWarning::InvalidCharacters {
                segment: ":pa`ram".to_string()
            }]
        );
    }

    #[test]
    fn test_parse_splat_param_warns() {
        let pattern = parse("/foo/:rest*");
        assert!(matches!(pattern.warnings(), [PatternWarning::Splat { .. }]));
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse("/a/:b/c"), parse("/a/:b/c"));
    }
}
