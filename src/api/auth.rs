//! Caller identity forwarded by the auth gateway

use crate::error::AppError;
use crate::models::{CallerContext, Role};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Authenticated user id
pub const CALLER_ID_HEADER: &str = "x-caller-id";

/// Role of the authenticated user: `user`, `analyst` or `admin`
pub const CALLER_ROLE_HEADER: &str = "x-caller-role";

#[async_trait]
impl<S> FromRequestParts<S> for CallerContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let caller_id = header_value(parts, CALLER_ID_HEADER)?;
        let role = header_value(parts, CALLER_ROLE_HEADER)?
            .parse::<Role>()
            .map_err(|_| AppError::Authentication(format!("unknown role in {}", CALLER_ROLE_HEADER)))?;

        Ok(CallerContext::new(role, caller_id))
    }
}

fn header_value(parts: &Parts, name: &str) -> Result<String, AppError> {
    let value = parts
        .headers
        .get(name)
        .ok_or_else(|| AppError::Authentication(format!("missing {} header", name)))?
        .to_str()
        .map_err(|_| AppError::Authentication(format!("malformed {} header", name)))?
        .trim();

    if value.is_empty() {
        return Err(AppError::Authentication(format!("empty {} header", name)));
    }
    Ok(value.to_string())
}

/// Analytics are visible to staff only
pub fn require_staff(caller: &CallerContext) -> Result<(), AppError> {
    if caller.role.is_staff() {
        Ok(())
    } else {
        Err(AppError::Authorization(
            "analytics are available to analysts and admins only".to_string(),
        ))
    }
}

pub fn require_admin(caller: &CallerContext) -> Result<(), AppError> {
    if caller.role.is_elevated() {
        Ok(())
    } else {
        Err(AppError::Authorization("admin role required".to_string()))
    }
}
