//! Core data models for better-prompt
//!
//! These models are shared by the scorer, the HTTP server, the CLI and the
//! reporters. Everything here is plain data that crosses the JSON boundary.

use serde::{Deserialize, Serialize};

/// One of the four quality axes a prompt is scored on.
///
/// The declaration order is the canonical display order used by every
/// reporter (bot replies included): efficiency, length, clarity, structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreAxis {
    Efficiency,
    Length,
    Clarity,
    Structure,
}

impl ScoreAxis {
    /// All axes in display order
    pub const ALL: [ScoreAxis; 4] = [
        ScoreAxis::Efficiency,
        ScoreAxis::Length,
        ScoreAxis::Clarity,
        ScoreAxis::Structure,
    ];
}

impl std::fmt::Display for ScoreAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreAxis::Efficiency => write!(f, "efficiency"),
            ScoreAxis::Length => write!(f, "length"),
            ScoreAxis::Clarity => write!(f, "clarity"),
            ScoreAxis::Structure => write!(f, "structure"),
        }
    }
}

/// Four-field quality assessment of a prompt text.
///
/// Each field is a percentage in `[0, 100]`. A record is built fresh on every
/// scoring call and has no identity; it is passed around by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub efficiency: u8,
    pub length: u8,
    pub clarity: u8,
    pub structure: u8,
}

impl ScoreRecord {
    /// The all-zero record returned for empty input
    pub const ZERO: ScoreRecord = ScoreRecord {
        efficiency: 0,
        length: 0,
        clarity: 0,
        structure: 0,
    };

    pub fn get(&self, axis: ScoreAxis) -> u8 {
        match axis {
            ScoreAxis::Efficiency => self.efficiency,
            ScoreAxis::Length => self.length,
            ScoreAxis::Clarity => self.clarity,
            ScoreAxis::Structure => self.structure,
        }
    }

    /// Axis/value pairs in display order
    pub fn entries(&self) -> [(ScoreAxis, u8); 4] {
        ScoreAxis::ALL.map(|axis| (axis, self.get(axis)))
    }
}

/// Body of `POST /api/improve`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImproveRequest {
    #[serde(default)]
    pub prompt: String,
}

/// Improved prompt bundled with its scores.
///
/// `scores` is optional on the wire: the server always fills it, but a client
/// talking to an older server may get a bare `{output}` and must score locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImproveResponse {
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoreRecord>,
}

impl ImproveResponse {
    /// Bundle `output` with its freshly computed scores
    pub fn scored(output: impl Into<String>) -> Self {
        let output = output.into();
        let scores = crate::scoring::score(&output);
        Self {
            output,
            scores: Some(scores),
        }
    }

    /// Fill in missing scores with the local scorer, keeping any the server sent
    pub fn ensure_scores(mut self) -> Self {
        if self.scores.is_none() {
            self.scores = Some(crate::scoring::score(&self.output));
        }
        self
    }
}

/// Body of `POST /api/score`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub text: String,
}

/// Error payload returned with every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Name of the configured improvement oracle, if any
    pub oracle: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_follow_display_order() {
        let record = ScoreRecord {
            efficiency: 70,
            length: 60,
            clarity: 80,
            structure: 90,
        };
        let axes: Vec<ScoreAxis> = record.entries().iter().map(|(a, _)| *a).collect();
        assert_eq!(axes, ScoreAxis::ALL.to_vec());
        assert_eq!(record.entries()[3], (ScoreAxis::Structure, 90));
    }

    #[test]
    fn test_improve_request_missing_prompt_is_empty() {
        let req: ImproveRequest = serde_json::from_str("{}").unwrap();
        assert!(req.prompt.is_empty());
    }

    #[test]
    fn test_response_without_scores_deserializes() {
        let resp: ImproveResponse = serde_json::from_str(r#"{"output":"Опиши план"}"#).unwrap();
        assert!(resp.scores.is_none());

        let filled = resp.ensure_scores();
        assert_eq!(filled.scores, Some(crate::scoring::score("Опиши план")));
    }

    #[test]
    fn test_ensure_scores_keeps_server_scores() {
        let sent = ScoreRecord {
            efficiency: 1,
            length: 2,
            clarity: 3,
            structure: 4,
        };
        let resp = ImproveResponse {
            output: "anything".into(),
            scores: Some(sent),
        };
        assert_eq!(resp.ensure_scores().scores, Some(sent));
    }

    #[test]
    fn test_score_record_json_shape() {
        let json = serde_json::to_value(ScoreRecord::ZERO).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"efficiency": 0, "length": 0, "clarity": 0, "structure": 0})
        );
    }
}
