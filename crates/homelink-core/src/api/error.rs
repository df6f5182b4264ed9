use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("authentication rejected ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Cut `text` to at most `max` bytes, backing up so the cut never
/// lands inside a multibyte character.
pub(crate) fn clip(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

impl ClientError {
    /// Truncate a response body to avoid dumping excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                clip(body, MAX_ERROR_BODY_LENGTH),
                body.len()
            )
        }
    }

    /// Message for a non-success status: the server body text when there
    /// is one, otherwise the canonical reason phrase.
    fn describe(status: reqwest::StatusCode, body: &str) -> String {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            status.canonical_reason().unwrap_or("unknown status").to_string()
        } else {
            Self::truncate_body(trimmed)
        }
    }

    /// Error for a rejected login or refresh call.
    pub fn auth(status: reqwest::StatusCode, body: &str) -> Self {
        ClientError::Auth {
            status: status.as_u16(),
            message: Self::describe(status, body),
        }
    }

    /// Error for any other non-success resource response.
    pub fn api(status: reqwest::StatusCode, body: &str) -> Self {
        ClientError::Api {
            status: status.as_u16(),
            message: Self::describe(status, body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn auth_error_uses_body_text() {
        let err = ClientError::auth(StatusCode::FORBIDDEN, "Invalid credentials");
        match err {
            ClientError::Auth { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn empty_body_falls_back_to_reason_phrase() {
        let err = ClientError::api(StatusCode::NOT_FOUND, "  \n");
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn truncation_never_splits_a_multibyte_character() {
        // 499 ASCII bytes, then two-byte characters straddling the
        // truncation limit at byte 500
        let body = format!("{}{}", "a".repeat(499), "é".repeat(300));
        assert!(body.len() > MAX_ERROR_BODY_LENGTH);
        let err = ClientError::api(StatusCode::INTERNAL_SERVER_ERROR, &body);
        match err {
            ClientError::Api { message, .. } => {
                assert!(message.contains("truncated"));
                assert!(message.starts_with(&"a".repeat(499)));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn clip_backs_up_to_a_char_boundary() {
        let text = "aé"; // bytes: a=1, é=2
        assert_eq!(clip(text, 3), "aé");
        assert_eq!(clip(text, 2), "a");
        assert_eq!(clip(text, 1), "a");
        assert_eq!(clip("", 5), "");
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(2000);
        let err = ClientError::api(StatusCode::INTERNAL_SERVER_ERROR, &body);
        match err {
            ClientError::Api { message, .. } => {
                assert!(message.len() < 600);
                assert!(message.contains("truncated, 2000 total bytes"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
