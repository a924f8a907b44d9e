use serde::Serialize;

/// Fixed-shape body returned by every endpoint.
///
/// Exactly one of `data` and `error` is present, except on `/health` where
/// both are omitted.
#[derive(Debug, Serialize)]
pub struct ResponseEnvelope {
    pub is_success: bool,
    pub official_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<OperationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    pub fn success(official_email: &str, data: OperationOutput) -> Self {
        Self {
            is_success: true,
            official_email: official_email.to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(official_email: &str, error: impl Into<String>) -> Self {
        Self {
            is_success: false,
            official_email: official_email.to_string(),
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn health(official_email: &str) -> Self {
        Self {
            is_success: true,
            official_email: official_email.to_string(),
            data: None,
            error: None,
        }
    }
}

/// Result payload of a successful operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    /// Fibonacci terms. Late terms exceed `u64`.
    Sequence(Vec<u128>),
    Numbers(Vec<u64>),
    Number(u64),
    Word(String),
}
