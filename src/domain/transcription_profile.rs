use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseShape {
    Summary,
    Detailed,
}

/// How the scratch file is handed to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Path,
    Samples,
}

/// Per-endpoint knobs that used to be separate copies of the same handler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranscriptionProfile {
    pub shape: ResponseShape,
    pub input_mode: InputMode,
    /// When set, the request's own language hint is ignored.
    pub forced_language: Option<String>,
    pub fallback_language: String,
}

impl TranscriptionProfile {
    pub fn summary() -> Self {
        Self {
            shape: ResponseShape::Summary,
            input_mode: InputMode::Samples,
            forced_language: Some("en".to_string()),
            fallback_language: "en".to_string(),
        }
    }

    pub fn detailed() -> Self {
        Self {
            shape: ResponseShape::Detailed,
            input_mode: InputMode::Path,
            forced_language: None,
            fallback_language: "unknown".to_string(),
        }
    }

    /// Summary shape over a caller-owned path, as served by `/api/transcribe`.
    pub fn referenced() -> Self {
        Self {
            input_mode: InputMode::Path,
            forced_language: None,
            ..Self::summary()
        }
    }

    pub fn effective_language<'a>(&'a self, hint: Option<&'a str>) -> Option<&'a str> {
        self.forced_language.as_deref().or(hint)
    }
}
