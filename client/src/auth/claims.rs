use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use serde::Deserialize;

/// Identity derived purely from the claims of a bearer token.
///
/// This is a read-only projection: the signature is never verified here. The
/// backend re-validates the token on every call, so the client only needs the
/// claims to decide what to render.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserIdentity {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
}

impl UserIdentity {
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[derive(Debug, Default, Deserialize)]
struct RoleSet {
    #[serde(default)]
    roles: Vec<String>,
}

/// The subset of identity-provider claims the client reads.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    preferred_username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    given_name: Option<String>,
    #[serde(default)]
    family_name: Option<String>,
    #[serde(default)]
    exp: Option<i64>,
    #[serde(default)]
    resource_access: HashMap<String, RoleSet>,
    #[serde(default)]
    realm_access: Option<RoleSet>,
}

/// Decodes the payload segment of a `header.payload.signature` token.
/// Any malformed input yields `None`, never a panic.
fn decode_payload(token: &str) -> Option<TokenClaims> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    let _signature = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Extracts the user identity from a bearer token, unioning client-scoped
/// roles (under `resource_access` for `client_id`) with realm-wide roles.
/// A token that cannot be decoded yields no identity; callers treat that
/// identically to "no token".
#[must_use]
pub fn decode_token(token: &str, client_id: &str) -> Option<UserIdentity> {
    let claims = decode_payload(token)?;
    let id = claims.sub?;

    let mut roles: Vec<String> = claims
        .resource_access
        .get(client_id)
        .map(|access| access.roles.clone())
        .unwrap_or_default();
    if let Some(realm) = claims.realm_access {
        roles.extend(realm.roles);
    }

    Some(UserIdentity {
        username: claims.preferred_username.unwrap_or_else(|| id.clone()),
        id,
        email: claims.email.unwrap_or_default(),
        first_name: claims.given_name.unwrap_or_default(),
        last_name: claims.family_name.unwrap_or_default(),
        roles,
    })
}

/// Reads the `exp` claim (seconds since epoch) and compares it to now.
/// Tokens with an unparseable payload or no `exp` claim count as expired.
#[must_use]
pub fn is_expired(token: &str) -> bool {
    decode_payload(token)
        .and_then(|claims| claims.exp)
        .is_none_or(|exp| exp <= Utc::now().timestamp())
}
