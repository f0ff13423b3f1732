//! Authentication extractors.
//!
//! Guard handlers by the signed-in identity held in the identity store. The
//! requirement is the stricter of the extractor's own and the one the route
//! table gives the request path.

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};

use crate::models::Identity;
use crate::navigation::{Access, LOGIN_PATH, Requirement, Route};
use crate::state::AppState;

/// Error returned when a guarded handler rejects the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No identity; send the visitor to the login page.
    RedirectToLogin,
    /// Signed in, but not allowed here.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "Only admins can access this resource",
            )
                .into_response(),
        }
    }
}

/// Requirement of the requested page. Nested routers see a stripped URI, so
/// the original one is preferred.
fn route_requirement(parts: &Parts) -> Requirement {
    let path = parts
        .extensions
        .get::<OriginalUri>()
        .map_or_else(|| parts.uri.path(), |original| original.0.path());
    Route::parse(path).map_or(Requirement::Public, Route::requirement)
}

async fn guard(
    parts: &Parts,
    state: &AppState,
    floor: Requirement,
) -> Result<Identity, AuthRejection> {
    let requirement = floor.max(route_requirement(parts));
    let identity = state.identity().current().await;
    match (requirement.check(identity.as_ref()), identity) {
        (Access::Allow, Some(identity)) => Ok(identity),
        (Access::Forbidden, _) => Err(AuthRejection::Forbidden),
        _ => Err(AuthRejection::RedirectToLogin),
    }
}

/// Extractor that requires a signed-in identity.
///
/// # Example
///
/// ```rust,ignore
/// async fn profile(RequireIdentity(identity): RequireIdentity) -> impl IntoResponse {
///     format!("Hello, {}!", identity.name)
/// }
/// ```
pub struct RequireIdentity(pub Identity);

impl FromRequestParts<AppState> for RequireIdentity {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        guard(parts, state, Requirement::SignedIn).await.map(Self)
    }
}

/// Extractor that requires an admin identity.
///
/// Signed-out visitors are redirected to login; signed-in shoppers get 403.
pub struct RequireAdmin(pub Identity);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let admin = guard(parts, state, Requirement::Admin).await;
        if admin.is_err() {
            tracing::info!(rejection = ?admin, "Admin access denied");
        }
        admin.map(Self)
    }
}

/// Extractor that optionally gets the signed-in identity.
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequestParts<AppState> for OptionalIdentity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.identity().current().await))
    }
}
