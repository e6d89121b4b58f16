use thiserror::Error;

/// Rejected edit. The graph is left exactly as it was.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EditError {
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },
    #[error("parameter '{param}' must be within [0, 1], got {got}")]
    InvalidParameter { param: &'static str, got: f64 },
    #[error("invalid topology: {0}")]
    InvalidTopology(&'static str),
}

impl EditError {
    pub fn code(&self) -> &'static str {
        match self {
            EditError::IndexOutOfRange { .. } => "index_out_of_range",
            EditError::InvalidParameter { .. } => "invalid_parameter",
            EditError::InvalidTopology(_) => "invalid_topology",
        }
    }

    pub(crate) fn node(index: usize, len: usize) -> Self {
        EditError::IndexOutOfRange { kind: "node", index, len }
    }

    pub(crate) fn segment(index: usize, len: usize) -> Self {
        EditError::IndexOutOfRange { kind: "segment", index, len }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum OutlineError {
    #[error("outline exceeds {0} characters")]
    TooLong(usize),
    #[error("outline exceeds {0} commands")]
    TooManyCommands(usize),
    #[error("path exceeds {0} nodes")]
    TooManyNodes(usize),
    #[error("unexpected command '{command}' at offset {offset}")]
    UnexpectedCommand { command: char, offset: usize },
    #[error("command '{command}' is missing a number at offset {offset}")]
    MissingNumber { command: char, offset: usize },
    #[error("coordinate out of bounds at offset {offset}")]
    CoordOutOfBounds { offset: usize },
    #[error("outline must start with a moveto")]
    MissingMoveTo,
    #[error("expected a single subpath, found {0}")]
    MultipleSubpaths(usize),
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

impl OutlineError {
    pub fn code(&self) -> &'static str {
        match self {
            OutlineError::TooLong(_) | OutlineError::TooManyCommands(_) | OutlineError::TooManyNodes(_) => {
                "limit_exceeded"
            }
            OutlineError::CoordOutOfBounds { .. } => "out_of_range",
            OutlineError::InvalidDocument(_) => "invalid_document",
            _ => "parse_error",
        }
    }
}
