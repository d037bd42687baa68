use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use huecheck_core::{AnswerRecord, Plate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const TRANSCRIPT_DOMAIN: &str = "huecheck";
const TRANSCRIPT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded transcript payload.
const TRANSCRIPT_HEADER: &str = "huecheck:v1";
/// Delimiter separating the prefix segments and the payload.
const FIELD_DELIMITER: char = ':';

/// Answers of one assessment session in a form that can be pasted elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SessionTranscript {
    answers: Vec<Option<usize>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableTranscript {
    answers: Vec<Option<usize>>,
}

impl SessionTranscript {
    /// Captures the choices stored in `answers`.
    #[must_use]
    pub(crate) fn from_answers(answers: &AnswerRecord) -> Self {
        Self {
            answers: answers.iter().collect(),
        }
    }

    /// Encodes the transcript into a single line.
    pub(crate) fn encode(&self) -> Result<String, TranscriptError> {
        let payload = SerializableTranscript {
            answers: self.answers.clone(),
        };
        let json = serde_json::to_vec(&payload).map_err(TranscriptError::Serialize)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!("{TRANSCRIPT_HEADER}{FIELD_DELIMITER}{encoded}"))
    }

    /// Decodes a transcript from its single-line representation.
    pub(crate) fn decode(value: &str) -> Result<Self, TranscriptError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TranscriptError::EmptyPayload);
        }

        let mut parts = trimmed.splitn(3, FIELD_DELIMITER);
        let domain = parts.next().ok_or(TranscriptError::MissingPrefix)?;
        let version = parts.next().ok_or(TranscriptError::MissingVersion)?;
        let payload = parts.next().ok_or(TranscriptError::MissingPayload)?;

        if domain != TRANSCRIPT_DOMAIN {
            return Err(TranscriptError::InvalidPrefix(domain.to_owned()));
        }
        if version != TRANSCRIPT_VERSION {
            return Err(TranscriptError::UnsupportedVersion(version.to_owned()));
        }

        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(TranscriptError::InvalidEncoding)?;
        let decoded: SerializableTranscript =
            serde_json::from_slice(&bytes).map_err(TranscriptError::InvalidPayload)?;
        Ok(Self {
            answers: decoded.answers,
        })
    }

    /// Validates the transcript against `plates` and rebuilds the answer record.
    pub(crate) fn into_answers(self, plates: &[Plate]) -> Result<AnswerRecord, TranscriptError> {
        if self.answers.len() != plates.len() {
            return Err(TranscriptError::AnswerCountMismatch {
                expected: plates.len(),
                found: self.answers.len(),
            });
        }
        for (plate, choice) in plates.iter().zip(&self.answers) {
            if let Some(option) = *choice {
                if option >= plate.options().len() {
                    return Err(TranscriptError::OptionOutOfRange {
                        plate: plate.id(),
                        option,
                    });
                }
            }
        }
        Ok(AnswerRecord::from_choices(self.answers))
    }
}

/// Errors that can occur while encoding or decoding transcripts.
#[derive(Debug, Error)]
pub(crate) enum TranscriptError {
    /// The provided string was empty or contained only whitespace.
    #[error("transcript was empty")]
    EmptyPayload,
    /// The prefix segment was missing.
    #[error("transcript is missing the prefix")]
    MissingPrefix,
    /// The version segment was missing.
    #[error("transcript is missing the version")]
    MissingVersion,
    /// The payload segment was missing.
    #[error("transcript is missing the payload")]
    MissingPayload,
    /// The transcript used an unexpected prefix.
    #[error("transcript prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The transcript used an unsupported version identifier.
    #[error("transcript version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode transcript payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The decoded payload was not a transcript.
    #[error("could not parse transcript payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
    /// The answers could not be serialised.
    #[error("could not serialise transcript: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The transcript holds a different number of answers than there are plates.
    #[error("transcript holds {found} answers but the assessment has {expected} plates")]
    AnswerCountMismatch {
        /// Plates in the assessment.
        expected: usize,
        /// Answers in the transcript.
        found: usize,
    },
    /// An answer names an option the plate does not offer.
    #[error("plate {plate} has no option {option}")]
    OptionOutOfRange {
        /// Identifier of the plate.
        plate: &'static str,
        /// Offending option index.
        option: usize,
    },
}
