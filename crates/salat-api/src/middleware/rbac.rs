//! Role guards for handlers.

use salat_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::AuthUser;

/// Checks that the authenticated user is the administrator.
pub fn require_admin(auth: &AuthUser) -> Result<(), ApiError> {
    if !auth.identity.is_admin() {
        return Err(AppError::authorization("Admin access required").into());
    }
    Ok(())
}
