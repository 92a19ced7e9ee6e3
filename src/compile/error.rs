//! Compilation error taxonomy.
//!
//! Every variant aborts only the affected item's compilation; the build
//! driver decides what to do next. No retries happen in the core.

use thiserror::Error;

use super::registry::BoxError;
use super::stage::CompileStage;
use crate::core::LogicalPath;

/// Errors raised while compiling one item
#[derive(Debug, Error)]
pub enum CompileError {
    /// The legacy single-list `filters` attribute. A deliberate hard stop:
    /// guessing a stage split would silently miscompile.
    #[error("the `filters` attribute is no longer supported; declare `filters_pre` and `filters_post` instead")]
    NoLongerSupported,

    #[error("unknown filter `{0}`")]
    UnknownFilter(String),

    #[error("unknown layout `{0}`")]
    UnknownLayout(String),

    /// The item transitively depends on its own compilation. Carries the
    /// full compilation stack for diagnosis.
    #[error("cyclic compilation: {}", display_stack(.0))]
    Cyclic(Vec<LogicalPath>),

    /// A filter or layout failed; the original error is preserved as the
    /// source, with stage context attached.
    #[error("{stage} stage failed in `{name}`")]
    Stage {
        stage: CompileStage,
        name: String,
        #[source]
        source: BoxError,
    },
}

fn display_stack(stack: &[LogicalPath]) -> String {
    stack
        .iter()
        .map(LogicalPath::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
