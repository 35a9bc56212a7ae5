// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request actor extraction.
//!
//! Authentication happens in front of this server. The gateway forwards
//! the resolved identity in headers:
//!
//! - `x-actor-id`: login of the caller (required)
//! - `x-actor-role`: `admin`, `staff` or `customer` (required)
//! - `x-customer-id`: the linked customer record, for the customer role
//! - `x-request-id`: correlation id recorded as the audit cause (optional)

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use courtside_api::{AuthenticatedActor, Role};
use courtside_audit::Cause;
use tracing::{debug, warn};

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";
pub const CUSTOMER_ID_HEADER: &str = "x-customer-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The caller and the cause recorded against anything they change.
pub struct RequestContext {
    pub actor: AuthenticatedActor,
    pub cause: Cause,
}

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<Option<&'a str>, ActorError> {
    headers
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map(str::trim)
                .map_err(|_| ActorError::InvalidHeader(name))
        })
        .transpose()
}

impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = ActorError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id: &str = header(&parts.headers, ACTOR_ID_HEADER)?
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                debug!("Missing actor header");
                ActorError::MissingActor
            })?;

        let role_str: &str =
            header(&parts.headers, ACTOR_ROLE_HEADER)?.ok_or(ActorError::MissingActor)?;
        let role: Role = Role::parse(role_str).ok_or_else(|| {
            warn!(role = role_str, "Unknown actor role");
            ActorError::InvalidRole(role_str.to_string())
        })?;

        let customer_id: Option<i64> = header(&parts.headers, CUSTOMER_ID_HEADER)?
            .map(|raw| {
                raw.parse::<i64>()
                    .map_err(|_| ActorError::InvalidHeader(CUSTOMER_ID_HEADER))
            })
            .transpose()?;

        let actor: AuthenticatedActor = match (role, customer_id) {
            (Role::Customer, Some(customer_id)) => {
                AuthenticatedActor::for_customer(id.to_string(), customer_id)
            }
            _ => AuthenticatedActor::new(id.to_string(), role),
        };

        let description: String = format!("{} {}", parts.method, parts.uri.path());
        let cause_id: String = header(&parts.headers, REQUEST_ID_HEADER)?
            .filter(|rid| !rid.is_empty())
            .map_or_else(|| description.clone(), str::to_string);

        Ok(Self {
            actor,
            cause: Cause::new(cause_id, description),
        })
    }
}

/// Public routes take `Option<RequestContext>`: no actor id means an
/// anonymous caller, while a malformed identity is still rejected.
impl<S: Send + Sync> OptionalFromRequestParts<S> for RequestContext {
    type Rejection = ActorError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        if parts.headers.contains_key(ACTOR_ID_HEADER) {
            <Self as FromRequestParts<S>>::from_request_parts(parts, state)
                .await
                .map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Actor extraction errors.
#[derive(Debug)]
pub enum ActorError {
    /// No actor id or role was forwarded.
    MissingActor,
    /// A header was not valid text or not a number where one is expected.
    InvalidHeader(&'static str),
    /// The role is not one the server knows.
    InvalidRole(String),
}

impl IntoResponse for ActorError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingActor => (
                StatusCode::UNAUTHORIZED,
                format!("Missing {ACTOR_ID_HEADER} or {ACTOR_ROLE_HEADER} header"),
            )
                .into_response(),
            Self::InvalidHeader(name) => {
                (StatusCode::BAD_REQUEST, format!("Invalid {name} header")).into_response()
            }
            Self::InvalidRole(role) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid role: '{role}'. Must be 'admin', 'staff' or 'customer'"),
            )
                .into_response(),
        }
    }
}
