///! Error kinds raised by the observation engine and its toolkit
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GateError>;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("Duplicate frame name: {0}")]
    DuplicateFrameName(String),

    #[error("Frame name cannot be resolved: {0}")]
    FrameNotResolvable(String),

    #[error("Body fixed frame for {0} cannot be found")]
    BodyFrameUnresolvable(i32),

    #[error("No free frame ID left in [{begin}, {end})")]
    FrameIdSpaceExhausted { begin: i32, end: i32 },

    #[error("{what} '{value}' is not a valid number")]
    InvalidNumericArgument { what: String, value: String },

    #[error("No {kind} in database called '{key}'{}", hint_suffix(.hint))]
    RecordNotFound {
        kind: &'static str,
        key: String,
        /// Command that would add the record, appended to the message
        hint: Option<&'static str>,
    },

    #[error("Frame name '{name}' is longer than {max} characters")]
    FrameNameTooLong { name: String, max: usize },

    #[error("Unknown frame: {0}")]
    UnknownFrame(String),

    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("Insufficient ephemeris data to compute the state of {target} relative to {observer}")]
    InsufficientEphemeris { target: String, observer: String },

    #[error("Cannot convert {from} to {to}")]
    UnitMismatch { from: String, to: String },

    #[error("Invalid element set: {0}")]
    InvalidElementSet(String),

    #[error("Propagation failed: {0}")]
    Propagation(String),

    #[error("Invalid time string '{0}'")]
    InvalidTime(String),

    #[error("Malformed kernel data: {0}")]
    Kernel(String),

    #[error("Star catalog error: {0}")]
    Catalog(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GateError {
    pub fn invalid_number(what: impl Into<String>, value: impl Into<String>) -> Self {
        GateError::InvalidNumericArgument {
            what: what.into(),
            value: value.into(),
        }
    }

    pub fn record_not_found(kind: &'static str, key: impl Into<String>) -> Self {
        GateError::RecordNotFound {
            kind,
            key: key.into(),
            hint: None,
        }
    }

    /// Attach a follow-up suggestion to a `RecordNotFound`; other kinds pass through
    pub fn with_hint(self, hint: &'static str) -> Self {
        match self {
            GateError::RecordNotFound { kind, key, .. } => GateError::RecordNotFound {
                kind,
                key,
                hint: Some(hint),
            },
            other => other,
        }
    }
}

fn hint_suffix(hint: &Option<&'static str>) -> String {
    hint.map(|hint| format!(". Try {}?", hint)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_not_found_message() {
        let err = GateError::record_not_found("satellite", "ISS");
        assert_eq!(err.to_string(), "No satellite in database called 'ISS'");

        let err = err.with_hint("SAT ADD");
        assert_eq!(err.to_string(), "No satellite in database called 'ISS'. Try SAT ADD?");
        assert!(matches!(err, GateError::RecordNotFound { kind: "satellite", .. }));
    }
}
