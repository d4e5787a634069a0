//! Oldenburg Burnout Inventory, 12-item form.
//!
//! Items are answered on a 4-point agreement scale (1 = Strongly Agree,
//! 4 = Strongly Disagree). Positively worded items are reverse-scored so
//! every item points the same direction before summing.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::error::InstrumentError;
use crate::scoring::{round2, Domain, ScoreEntry, ScoreRange, ScoreType, Subscale};
use crate::Instrument;

pub const QUESTION_COUNT: usize = 12;
pub const EXHAUSTION_QUESTIONS: [u8; 6] = [2, 4, 5, 8, 10, 12];
pub const DISENGAGEMENT_QUESTIONS: [u8; 6] = [1, 3, 6, 7, 9, 11];
pub const REVERSE_SCORED_QUESTIONS: [u8; 4] = [1, 5, 7, 10];

pub const MIN_RESPONSE: i32 = 1;
pub const MAX_RESPONSE: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OlbiSubscale {
    Exhaustion,
    Disengagement,
}

/// One answered item, as collected by the survey form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BurnoutSurveyResponse {
    pub question_number: i32,
    pub response_value: i32,
}

/// Derived scores. Computed on demand, never the primary record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BurnoutSurveyScores {
    pub exhaustion_score: u32,
    pub disengagement_score: u32,
    pub exhaustion_average: f64,
    pub disengagement_average: f64,
    pub total_average: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum ResponseError {
    #[error("expected {expected} responses, got {actual}")]
    WrongCount { expected: usize, actual: usize },

    #[error("question number {question_number} is outside 1-12")]
    QuestionOutOfRange { question_number: i32 },

    #[error("question {question_number} answered more than once")]
    DuplicateQuestion { question_number: i32 },

    #[error("question {question_number} has no response")]
    MissingQuestion { question_number: i32 },

    #[error("question {question_number}: response {value} is outside 1-4")]
    ValueOutOfRange { question_number: i32, value: i32 },
}

pub fn subscale_of(question_number: i32) -> Option<OlbiSubscale> {
    let q = u8::try_from(question_number).ok()?;
    if EXHAUSTION_QUESTIONS.contains(&q) {
        Some(OlbiSubscale::Exhaustion)
    } else if DISENGAGEMENT_QUESTIONS.contains(&q) {
        Some(OlbiSubscale::Disengagement)
    } else {
        None
    }
}

pub fn is_reverse_scored(question_number: i32) -> bool {
    u8::try_from(question_number).is_ok_and(|q| REVERSE_SCORED_QUESTIONS.contains(&q))
}

/// Invert a 1–4 response (1↔4, 2↔3). Only meaningful for values in range.
pub fn reverse_score(raw: i32) -> i32 {
    (MAX_RESPONSE + MIN_RESPONSE) - raw
}

/// Check that `responses` is a complete, in-range answer set. An empty
/// vector means the set can be scored.
pub fn validate_responses(responses: &[BurnoutSurveyResponse]) -> Vec<ResponseError> {
    let mut errors = Vec::new();
    if responses.len() != QUESTION_COUNT {
        errors.push(ResponseError::WrongCount {
            expected: QUESTION_COUNT,
            actual: responses.len(),
        });
    }

    let mut seen = [false; QUESTION_COUNT];
    for response in responses {
        let q = response.question_number;
        if !(1..=QUESTION_COUNT as i32).contains(&q) {
            errors.push(ResponseError::QuestionOutOfRange { question_number: q });
            continue;
        }

        let slot = &mut seen[(q - 1) as usize];
        if *slot {
            errors.push(ResponseError::DuplicateQuestion { question_number: q });
        }
        *slot = true;

        if !(MIN_RESPONSE..=MAX_RESPONSE).contains(&response.response_value) {
            errors.push(ResponseError::ValueOutOfRange {
                question_number: q,
                value: response.response_value,
            });
        }
    }

    for (idx, answered) in seen.iter().enumerate() {
        if !answered {
            errors.push(ResponseError::MissingQuestion {
                question_number: idx as i32 + 1,
            });
        }
    }

    errors
}

/// Score a response set that has already been validated.
pub fn score_unchecked(responses: &[BurnoutSurveyResponse]) -> BurnoutSurveyScores {
    let mut exhaustion = 0i32;
    let mut disengagement = 0i32;

    for response in responses {
        let value = if is_reverse_scored(response.question_number) {
            reverse_score(response.response_value)
        } else {
            response.response_value
        };
        match subscale_of(response.question_number) {
            Some(OlbiSubscale::Exhaustion) => exhaustion += value,
            Some(OlbiSubscale::Disengagement) => disengagement += value,
            None => {}
        }
    }

    let exhaustion_average = round2(f64::from(exhaustion) / EXHAUSTION_QUESTIONS.len() as f64);
    let disengagement_average =
        round2(f64::from(disengagement) / DISENGAGEMENT_QUESTIONS.len() as f64);

    BurnoutSurveyScores {
        exhaustion_score: exhaustion.max(0) as u32,
        disengagement_score: disengagement.max(0) as u32,
        exhaustion_average,
        disengagement_average,
        total_average: round2((exhaustion_average + disengagement_average) / 2.0),
    }
}

/// Validate, then score. Scores are checked against the instrument's
/// declared ranges before being returned.
pub fn score(responses: &[BurnoutSurveyResponse]) -> Result<BurnoutSurveyScores, InstrumentError> {
    let errors = validate_responses(responses);
    if !errors.is_empty() {
        tracing::debug!(count = errors.len(), "rejected burnout survey responses");
        return Err(InstrumentError::InvalidResponses(errors));
    }

    let scores = score_unchecked(responses);
    if let Some(err) = Olbi.validate_scores(&scores.to_score_entries()).into_iter().next() {
        tracing::error!(%err, "computed burnout scores outside instrument range");
        return Err(err.into());
    }
    Ok(scores)
}

impl BurnoutSurveyScores {
    pub fn to_score_entries(&self) -> Vec<ScoreEntry> {
        [
            ("exhaustion_score", f64::from(self.exhaustion_score)),
            ("exhaustion_average", self.exhaustion_average),
            ("disengagement_score", f64::from(self.disengagement_score)),
            ("disengagement_average", self.disengagement_average),
            ("total_average", self.total_average),
        ]
        .into_iter()
        .map(|(id, value)| ScoreEntry {
            subscale_id: id.to_string(),
            value,
        })
        .collect()
    }
}

pub struct Olbi;

impl Instrument for Olbi {
    fn id(&self) -> &str {
        "olbi"
    }

    fn name(&self) -> &str {
        "Oldenburg Burnout Inventory"
    }

    fn domains(&self) -> &[Domain] {
        static DOMAINS: std::sync::LazyLock<Vec<Domain>> = std::sync::LazyLock::new(|| {
            let raw = ScoreRange {
                min: 6.0,
                max: 24.0,
                step: Some(1.0),
            };
            let average = ScoreRange {
                min: 1.0,
                max: 4.0,
                step: None,
            };

            vec![
                Domain {
                    id: "exhaustion".to_string(),
                    name: "Exhaustion".to_string(),
                    subscales: vec![
                        subscale("exhaustion_score", "Exhaustion Score", ScoreType::Raw, raw),
                        subscale("exhaustion_average", "Exhaustion Average", ScoreType::Average, average),
                    ],
                    items: EXHAUSTION_QUESTIONS.to_vec(),
                    description: Some("Questions 2, 4, 5, 8, 10, 12".to_string()),
                },
                Domain {
                    id: "disengagement".to_string(),
                    name: "Disengagement".to_string(),
                    subscales: vec![
                        subscale("disengagement_score", "Disengagement Score", ScoreType::Raw, raw),
                        subscale(
                            "disengagement_average",
                            "Disengagement Average",
                            ScoreType::Average,
                            average,
                        ),
                    ],
                    items: DISENGAGEMENT_QUESTIONS.to_vec(),
                    description: Some("Questions 1, 3, 6, 7, 9, 11".to_string()),
                },
                Domain {
                    id: "overall".to_string(),
                    name: "Overall".to_string(),
                    subscales: vec![subscale(
                        "total_average",
                        "Total Average",
                        ScoreType::Average,
                        average,
                    )],
                    items: Vec::new(),
                    description: Some("Mean of the two subscale averages".to_string()),
                },
            ]
        });
        &DOMAINS
    }
}

fn subscale(id: &str, name: &str, score_type: ScoreType, range: ScoreRange) -> Subscale {
    Subscale {
        id: id.to_string(),
        name: name.to_string(),
        score_type,
        range,
        description: None,
    }
}
