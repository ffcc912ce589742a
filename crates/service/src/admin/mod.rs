//! Static-token admin gate.
//!
//! One shared password exchanges for one shared token; there is no expiry or
//! revocation.

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AdminAuthError {
    #[error("Password required")]
    PasswordRequired,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Unauthorized")]
    Unauthorized,
}

#[derive(Clone)]
pub struct AdminGate {
    password: String,
    token: String,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate").finish_non_exhaustive()
    }
}

impl AdminGate {
    pub fn new(password: impl Into<String>, token: impl Into<String>) -> Self {
        Self { password: password.into(), token: token.into() }
    }

    pub fn from_config(cfg: &configs::AdminConfig) -> Self {
        Self::new(cfg.password.clone(), cfg.token.clone())
    }

    /// Exchange the admin password for the static token.
    ///
    /// # Examples
    /// ```
    /// use service::admin::{AdminGate, AdminAuthError};
    /// let gate = AdminGate::new("s3cret", "tok-123");
    /// assert_eq!(gate.login(Some("s3cret")), Ok("tok-123"));
    /// assert_eq!(gate.login(Some("nope")), Err(AdminAuthError::InvalidPassword));
    /// assert_eq!(gate.login(None), Err(AdminAuthError::PasswordRequired));
    /// ```
    pub fn login(&self, password: Option<&str>) -> Result<&str, AdminAuthError> {
        let password = password.filter(|p| !p.is_empty()).ok_or(AdminAuthError::PasswordRequired)?;
        if !constant_time_eq(password.as_bytes(), self.password.as_bytes()) {
            warn!("admin_login_rejected");
            return Err(AdminAuthError::InvalidPassword);
        }
        Ok(&self.token)
    }

    /// Check an `Authorization` header value of the form `Bearer <token>`.
    pub fn authorize(&self, header: Option<&str>) -> Result<(), AdminAuthError> {
        let presented = header
            .and_then(|h| h.strip_prefix("Bearer "))
            .and_then(|rest| rest.split(' ').next())
            .filter(|t| !t.is_empty())
            .ok_or(AdminAuthError::Unauthorized)?;
        if constant_time_eq(presented.as_bytes(), self.token.as_bytes()) {
            Ok(())
        } else {
            Err(AdminAuthError::Unauthorized)
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
