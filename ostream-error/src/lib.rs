//! Structured error types for the ordered-stream engine.
//!
//! Every fallible combinator in this workspace produces a concrete,
//! inspectable error type rather than a stringly-typed one. The two pieces
//! that matter most:
//!
//! - [`MapError`] is what `try_map` (and, transitively, `flat_map`) widens
//!   its output error to when both the upstream and the transform can fail.
//!   It is a plain two-variant enum, not a blanket `From` conversion, so it
//!   carries no coherence risk when composed further.
//! - [`AnyStreamError`] is the explicit type-erasure escape hatch for
//!   callers that need a single error type across heterogeneous streams
//!   (for example, storing several streams with unrelated error types in
//!   one `Vec`).

/// The error produced by a `try_map` stage: either the upstream failed, or
/// the transform itself failed.
#[derive(Debug, thiserror::Error)]
pub enum MapError<Eu, Et> {
    /// The upstream stream's `next()` returned this error.
    #[error("upstream error: {0}")]
    Upstream(Eu),
    /// The transform closure returned this error for the current element.
    #[error("transform error: {0}")]
    Transform(Et),
}

impl<Eu, Et> MapError<Eu, Et> {
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }

    pub const fn is_transform(&self) -> bool {
        matches!(self, Self::Transform(_))
    }
}

impl<Et> MapError<std::convert::Infallible, Et> {
    /// Collapse a `MapError` known to never be the `Upstream` variant (the
    /// upstream was statically infallible) down to the transform's own
    /// error type.
    pub fn into_transform_error(self) -> Et {
        match self {
            Self::Upstream(never) => match never {},
            Self::Transform(e) => e,
        }
    }
}

impl<Eu> MapError<Eu, std::convert::Infallible> {
    /// Collapse a `MapError` known to never be the `Transform` variant (the
    /// transform was statically infallible) down to the upstream's own
    /// error type.
    pub fn into_upstream_error(self) -> Eu {
        match self {
            Self::Upstream(e) => e,
            Self::Transform(never) => match never {},
        }
    }
}

/// A type-erased stream error, for callers that need a single uniform
/// error type across heterogeneous streams. Obtained via `.erase()` in the
/// `ostream-exec` crate.
pub type AnyStreamError = Box<dyn std::error::Error + Send + Sync>;

/// Aggregates the errors collected by a `for_each`/batched `try_map` run
/// that chooses not to fail fast.
#[derive(Debug, thiserror::Error)]
#[error("{} error(s) occurred", errors.len())]
pub struct MultipleErrors<E> {
    pub errors: Vec<E>,
}

impl<E> MultipleErrors<E> {
    pub fn new(errors: Vec<E>) -> Self {
        Self { errors }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn into_transform_error_unwraps_when_upstream_infallible() {
        let err: MapError<Infallible, Boom> = MapError::Transform(Boom);
        let _: Boom = err.into_transform_error();
    }

    #[test]
    fn into_upstream_error_unwraps_when_transform_infallible() {
        let err: MapError<Boom, Infallible> = MapError::Upstream(Boom);
        let _: Boom = err.into_upstream_error();
    }

    #[test]
    fn multiple_errors_reports_count() {
        let agg = MultipleErrors::new(vec![Boom, Boom, Boom]);
        assert_eq!(agg.len(), 3);
        assert_eq!(format!("{agg}"), "3 error(s) occurred");
    }
}
