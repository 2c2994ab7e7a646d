use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{validate_jwt, Claims, JwtError, Role};
use crate::error::ApiError;
use crate::state::AppState;

/// Error code for requests carrying an unusable bearer token
pub const AUTH_ERROR_CODE: &str = "AUTH401";

/// Authenticated caller, injected into request extensions by the middleware
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Principal {
    pub role: Role,
    pub id: i64,
}

impl TryFrom<Claims> for Principal {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| JwtError::InvalidToken(format!("subject '{}' is not a valid id", claims.sub)))?;

        Ok(Self { role: claims.role, id })
    }
}

/// Decodes an optional bearer token into a `Principal`.
///
/// A request without an Authorization header passes through with no
/// principal; each handler decides whether it needs one. A header that is
/// present but unusable is rejected with 401.
pub async fn role_claims_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match extract_bearer(request.headers()) {
        Ok(token) => token,
        Err(msg) => return ApiError::unauthorized(AUTH_ERROR_CODE, msg).into_response(),
    };

    if let Some(token) = token {
        let principal = validate_jwt(&token, &state.config.security.jwt_secret)
            .and_then(Principal::try_from);

        match principal {
            Ok(principal) => {
                tracing::debug!("Authenticated {:?} {}", principal.role, principal.id);
                request.extensions_mut().insert(principal);
            }
            Err(e) => {
                tracing::warn!("Rejected bearer token: {}", e);
                return ApiError::unauthorized(AUTH_ERROR_CODE, e.to_string()).into_response();
            }
        }
    }

    next.run(request).await
}

/// Extract the bearer token, if an Authorization header is present
fn extract_bearer(headers: &HeaderMap) -> Result<Option<String>, String> {
    let Some(auth_header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(Some(token.trim().to_string()))
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

/// Role claims visible to handlers: the caller's id in the slot of its
/// role. At most one is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoleClaims {
    pub empresa: Option<i64>,
    pub aluno: Option<i64>,
    pub instituicao_de_ensino: Option<i64>,
}

impl RoleClaims {
    pub fn business_id(&self) -> Option<i64> {
        self.empresa
    }

    pub fn student_id(&self) -> Option<i64> {
        self.aluno
    }

    pub fn institution_id(&self) -> Option<i64> {
        self.instituicao_de_ensino
    }
}

impl From<Option<Principal>> for RoleClaims {
    fn from(principal: Option<Principal>) -> Self {
        let mut claims = RoleClaims::default();
        if let Some(Principal { role, id }) = principal {
            match role {
                Role::Business => claims.empresa = Some(id),
                Role::Student => claims.aluno = Some(id),
                Role::Institution => claims.instituicao_de_ensino = Some(id),
            }
        }
        claims
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RoleClaims
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RoleClaims::from(parts.extensions.get::<Principal>().copied()))
    }
}
