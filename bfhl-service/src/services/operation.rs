//! Classification, validation and execution of `/bfhl` operations.
//!
//! A request body must carry exactly one operation key. The value under that
//! key is decoded into an [`Operation`], rejecting the whole request on the
//! first violated constraint, and then executed against the math kernel or
//! the one-word answerer.

use crate::dtos::OperationOutput;
use crate::error::BfhlError;
use crate::services::answerer::OneWordAnswerer;
use crate::services::math;
use serde_json::{Map, Value};
use validator::Validate;

pub const MAX_ARRAY_LENGTH: usize = 100;
pub const MAX_FIBONACCI: u64 = 100;
pub const MAX_AI_QUESTION_LENGTH: usize = 500;
/// 2^53 - 1, the largest integer a JSON client can represent exactly.
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKey {
    Fibonacci,
    Prime,
    Lcm,
    Hcf,
    Ai,
}

impl OperationKey {
    /// Scan order used by [`classify`].
    pub const ALL: [OperationKey; 5] = [
        OperationKey::Fibonacci,
        OperationKey::Prime,
        OperationKey::Lcm,
        OperationKey::Hcf,
        OperationKey::Ai,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OperationKey::Fibonacci => "fibonacci",
            OperationKey::Prime => "prime",
            OperationKey::Lcm => "lcm",
            OperationKey::Hcf => "hcf",
            OperationKey::Ai => "AI",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    NoOperation,
    AmbiguousOperation,
    Operation(OperationKey),
}

/// Which operation key the body carries. Keys holding `null` count as absent.
pub fn classify(body: &Map<String, Value>) -> Classification {
    let mut present = OperationKey::ALL
        .into_iter()
        .filter(|key| body.get(key.as_str()).is_some_and(|v| !v.is_null()));

    match (present.next(), present.next()) {
        (None, _) => Classification::NoOperation,
        (Some(key), None) => Classification::Operation(key),
        (Some(_), Some(_)) => Classification::AmbiguousOperation,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Fibonacci(usize),
    PrimeFilter(Vec<u64>),
    Lcm(Vec<u64>),
    Hcf(Vec<u64>),
    AiQuestion(String),
}

#[derive(Debug, Validate)]
struct Question {
    #[validate(length(max = 500, message = "AI question too long"))]
    text: String,
}

impl Operation {
    /// Classify `body` and decode the payload of its single operation key.
    pub fn decode(body: &Map<String, Value>) -> Result<Self, BfhlError> {
        match classify(body) {
            Classification::NoOperation => Err(BfhlError::NoOperation),
            Classification::AmbiguousOperation => Err(BfhlError::AmbiguousOperation),
            Classification::Operation(key) => {
                let payload = body.get(key.as_str()).unwrap_or(&Value::Null);
                Self::from_payload(key, payload)
            }
        }
    }

    /// Shape checks run before range checks so the reported message is
    /// deterministic.
    pub fn from_payload(key: OperationKey, payload: &Value) -> Result<Self, BfhlError> {
        match key {
            OperationKey::Fibonacci => match safe_integer(payload) {
                Some(n) if n <= MAX_FIBONACCI => Ok(Operation::Fibonacci(n as usize)),
                _ => Err(BfhlError::invalid_input(format!(
                    "fibonacci must be a non-negative integer <= {}",
                    MAX_FIBONACCI
                ))),
            },
            OperationKey::Prime => {
                let items = payload
                    .as_array()
                    .filter(|items| items.len() <= MAX_ARRAY_LENGTH)
                    .ok_or_else(|| {
                        BfhlError::invalid_input(format!(
                            "prime must be an array (max length {})",
                            MAX_ARRAY_LENGTH
                        ))
                    })?;
                Ok(Operation::PrimeFilter(integer_elements(key, items)?))
            }
            OperationKey::Lcm => Ok(Operation::Lcm(non_empty_integers(key, payload)?)),
            OperationKey::Hcf => Ok(Operation::Hcf(non_empty_integers(key, payload)?)),
            OperationKey::Ai => {
                let text = payload
                    .as_str()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| BfhlError::invalid_input("AI must be a non-empty string"))?;

                let question = Question {
                    text: text.to_string(),
                };
                question.validate().map_err(|errors| {
                    let message = errors
                        .field_errors()
                        .values()
                        .flat_map(|errs| errs.iter())
                        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .unwrap_or_else(|| "AI question too long".to_string());
                    BfhlError::InvalidInput(message)
                })?;

                Ok(Operation::AiQuestion(question.text))
            }
        }
    }

    pub fn key(&self) -> OperationKey {
        match self {
            Operation::Fibonacci(_) => OperationKey::Fibonacci,
            Operation::PrimeFilter(_) => OperationKey::Prime,
            Operation::Lcm(_) => OperationKey::Lcm,
            Operation::Hcf(_) => OperationKey::Hcf,
            Operation::AiQuestion(_) => OperationKey::Ai,
        }
    }

    pub async fn execute(self, answerer: &OneWordAnswerer) -> Result<OperationOutput, BfhlError> {
        match self {
            Operation::Fibonacci(n) => Ok(OperationOutput::Sequence(math::fibonacci(n))),
            Operation::PrimeFilter(values) => Ok(OperationOutput::Numbers(
                values.into_iter().filter(|&v| math::is_prime(v)).collect(),
            )),
            Operation::Lcm(values) => math::lcm_of(&values)
                .map(OperationOutput::Number)
                .ok_or_else(|| BfhlError::invalid_input("lcm result is too large")),
            Operation::Hcf(values) => math::hcf_of(&values)
                .map(OperationOutput::Number)
                .ok_or_else(|| BfhlError::invalid_input("hcf must be a non-empty integer array")),
            Operation::AiQuestion(question) => answerer
                .answer(&question)
                .await
                .map(OperationOutput::Word)
                .map_err(BfhlError::ServiceUnavailable),
        }
    }
}

/// A JSON number that is a whole value in `[0, MAX_SAFE_INTEGER]`.
///
/// Floats with no fractional part (`5.0`) are accepted.
fn safe_integer(value: &Value) -> Option<u64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(u) = n.as_u64() {
        return (u <= MAX_SAFE_INTEGER).then_some(u);
    }
    if n.is_i64() {
        return None;
    }
    let f = n.as_f64()?;
    (f.fract() == 0.0 && (0.0..=MAX_SAFE_INTEGER as f64).contains(&f)).then_some(f as u64)
}

fn integer_elements(key: OperationKey, items: &[Value]) -> Result<Vec<u64>, BfhlError> {
    items
        .iter()
        .map(safe_integer)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| {
            BfhlError::invalid_input(format!(
                "{} array must contain non-negative integers only",
                key.as_str()
            ))
        })
}

fn non_empty_integers(key: OperationKey, payload: &Value) -> Result<Vec<u64>, BfhlError> {
    let items = payload
        .as_array()
        .filter(|items| !items.is_empty() && items.len() <= MAX_ARRAY_LENGTH)
        .ok_or_else(|| {
            BfhlError::invalid_input(format!(
                "{} must be a non-empty integer array (max length {})",
                key.as_str(),
                MAX_ARRAY_LENGTH
            ))
        })?;
    integer_elements(key, items)
}
