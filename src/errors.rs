//! Error types with rich diagnostics using miette
//!
//! Layout itself is infallible; errors only come out of option parsing and
//! validation, which runs once whenever options are installed.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors raised while parsing or validating [`FunnelOptions`](crate::FunnelOptions)
#[derive(Error, Diagnostic, Debug)]
pub enum OptionsError {
    #[error("invalid options: {message}")]
    #[diagnostic(code(funnel::options::parse))]
    Parse {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("{field} must be a fraction in [0, 1], got {value}")]
    #[diagnostic(
        code(funnel::options::fraction_out_of_range),
        help("neck dimensions are fractions of the funnel width and height")
    )]
    FractionOutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be a finite, non-negative number, got {value}")]
    #[diagnostic(code(funnel::options::negative_size))]
    NegativeSize { field: &'static str, value: f64 },

    #[error("{field} must be finite, got {value}")]
    #[diagnostic(code(funnel::options::non_finite))]
    NonFinite { field: &'static str, value: f64 },

    #[error("label.format.precision must be at most {max}, got {value}")]
    #[diagnostic(code(funnel::options::precision_out_of_range))]
    PrecisionOutOfRange { value: usize, max: usize },
}

impl OptionsError {
    /// Build a parse error pointing at the line/column serde_json reported.
    pub(crate) fn from_json(name: &str, source: &str, err: &serde_json::Error) -> Self {
        let offset = line_col_to_offset(source, err.line(), err.column());
        OptionsError::Parse {
            message: err.to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: SourceSpan::from((offset, 0)),
        }
    }
}

/// Convert serde_json's 1-based line and column into a byte offset.
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}
