#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("Malformed type expression `{expr}`: {reason}")]
    MalformedTypeExpression { expr: String, reason: String },
    #[error("Unsupported bound combination in `{expr}`: {reason}")]
    UnsupportedBoundCombination { expr: String, reason: String },
    #[error("Type token `{token}` refers to slot {slot}, which has not been rendered")]
    DictionaryRenderOrderViolation { token: String, slot: usize },
    #[error("Invalid type token: {0}")]
    InvalidTypeToken(String),
}

impl TypeError {
    pub fn malformed(expr: &str, reason: impl Into<String>) -> Self {
        TypeError::MalformedTypeExpression {
            expr: expr.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unsupported_bounds(expr: &str, reason: impl Into<String>) -> Self {
        TypeError::UnsupportedBoundCombination {
            expr: expr.to_string(),
            reason: reason.into(),
        }
    }
}

pub type TypeResult<T> = std::result::Result<T, TypeError>;
