//! Authentication middleware that checks the bearer token belongs to the user named in the path.

use std::collections::HashMap;

use axum::{
    RequestPartsExt,
    extract::{FromRef, Path, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::DecodingKey;

use crate::{AppState, Error, auth::decode_token};

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key used to verify the signature of bearer tokens.
    pub decoding_key: DecodingKey,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            decoding_key: state.decoding_key.clone(),
        }
    }
}

/// Middleware function that only lets a request through if it carries a valid
/// bearer token issued to the user named by the `{username}` path parameter.
///
/// Otherwise a JSON error response is returned with the status:
/// - 401 if the token is missing, malformed, badly signed or expired,
/// - or 403 if the token was issued to a different user.
///
/// **Note**: This must be added with `route_layer` so that the path parameters
/// have been matched before the middleware runs.
pub async fn ensure_correct_user(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    if let Err(error) = authorize(&mut parts, &state).await {
        return error.into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}

async fn authorize(parts: &mut Parts, state: &AuthState) -> Result<(), Error> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|rejection| {
            if rejection.is_missing() {
                Error::MissingToken
            } else {
                Error::InvalidToken
            }
        })?;

    let claims = decode_token(bearer.token(), &state.decoding_key)?;

    let Path(params) = parts.extract::<Path<HashMap<String, String>>>().await?;

    let Some(username) = params.get("username") else {
        tracing::error!(
            "ensure_correct_user was applied to {} which has no username parameter",
            parts.uri.path()
        );
        return Err(Error::Forbidden);
    };

    if claims.username != *username {
        tracing::warn!(
            "User {} tried to access the resources of user {username}",
            claims.username
        );
        return Err(Error::Forbidden);
    }

    Ok(())
}
