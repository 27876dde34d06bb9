use studio_auth_types::token::{IssuedToken, issue_service_token};

use crate::error::IdentityServiceError;

pub const SERVICE_NAME_MAX_CHARS: usize = 64;

pub struct IssueServiceTokenInput {
    /// Bearer credential presented by the caller.
    pub credential: Option<String>,
    pub service_name: String,
}

/// Mint a short-lived service token for a caller holding the shared
/// internal credential.
pub struct IssueServiceTokenUseCase {
    pub internal_auth_token: Option<String>,
    pub service_secret: String,
    pub ttl_secs: u64,
}

impl IssueServiceTokenUseCase {
    pub fn execute(&self, input: IssueServiceTokenInput) -> Result<IssuedToken, IdentityServiceError> {
        let authorized = match (&self.internal_auth_token, &input.credential) {
            (Some(expected), Some(presented)) => {
                constant_time_eq(expected.as_bytes(), presented.as_bytes())
            }
            _ => false,
        };
        if !authorized {
            tracing::warn!(service = %input.service_name, "service token request rejected");
            return Err(IdentityServiceError::InvalidInternalCredential);
        }

        validate_service_name(&input.service_name)?;
        let issued = issue_service_token(&input.service_name, &self.service_secret, self.ttl_secs)
            .map_err(|e| anyhow::anyhow!("sign service token: {e}"))?;
        tracing::debug!(service = %input.service_name, "service token issued");
        Ok(issued)
    }
}

/// Lower-case ASCII letters, digits, `-` and `_`.
pub fn validate_service_name(name: &str) -> Result<(), IdentityServiceError> {
    let ok = !name.is_empty()
        && name.len() <= SERVICE_NAME_MAX_CHARS
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
    if !ok {
        return Err(IdentityServiceError::Validation(
            "invalid service name".to_owned(),
        ));
    }
    Ok(())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
