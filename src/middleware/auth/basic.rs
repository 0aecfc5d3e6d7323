//! HTTP Basic authentication for every broker route.
//!
//! - Runs before any broker logic; a rejected request never reaches the
//!   version gate or the dispatcher.
//! - Credentials are kept as SHA-256 digests and compared in constant time.
//! - Every configured pair is checked, so timing does not reveal which one matched.

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};

use crate::config::BrokerCredentials;
use crate::state::AppState;

type Digest32 = [u8; 32];

#[derive(Debug, Clone, Default)]
pub struct CredentialSet {
    digests: Vec<(Digest32, Digest32)>,
}

impl CredentialSet {
    pub fn new(credentials: &[BrokerCredentials]) -> Self {
        Self {
            digests: credentials
                .iter()
                .map(|c| (sha256(&c.username), sha256(&c.password)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    pub fn authorize(&self, username: &str, password: &str) -> bool {
        let user = sha256(username);
        let pass = sha256(password);
        let matched = self
            .digests
            .iter()
            .fold(Choice::from(0), |matched, (u, p)| {
                matched | (user[..].ct_eq(&u[..]) & pass[..].ct_eq(&p[..]))
            });
        bool::from(matched)
    }
}

fn sha256(s: &str) -> Digest32 {
    Sha256::digest(s.as_bytes()).into()
}

/// Splits `Basic <base64(user:pass)>`.
fn decode_basic(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, basic_auth_middleware))
}

async fn basic_auth_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(decode_basic)
        .is_some_and(|(user, pass)| state.credentials.authorize(&user, &pass));

    if !authorized {
        tracing::warn!(
            method = %req.method(),
            path = %req.uri().path(),
            "basic auth rejected"
        );
        return unauthorized();
    }

    next.run(req).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static(r#"Basic realm="service broker""#),
        )],
        "Not Authorized",
    )
        .into_response()
}
