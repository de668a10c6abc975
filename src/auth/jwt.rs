use std::time::Duration;

use anyhow::bail;
use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::{
    accounts::repo_types::Account, auth::claims::Claims, config::JwtConfig, state::AppState,
};

/// Signing and verification keys for account tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.keys.clone()
    }
}

impl JwtKeys {
    /// Fails when the secret is empty so a misconfigured process never signs
    /// with a guessable key.
    pub fn new(cfg: &JwtConfig) -> anyhow::Result<Self> {
        if cfg.secret.trim().is_empty() {
            bail!("jwt secret must not be empty");
        }
        if cfg.ttl_minutes <= 0 {
            bail!("jwt ttl must be positive");
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            ttl: Duration::from_secs((cfg.ttl_minutes as u64) * 60),
        })
    }

    /// Issues an HS256 token whose `number` claim is the account number.
    pub fn sign(&self, account: &Account) -> Result<String, jsonwebtoken::errors::Error> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            number: account.number,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(number = account.number, "jwt signed");
        Ok(token)
    }

    /// Checks signature, issuer and expiry. Only the HMAC family is accepted.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(number = data.claims.number, "jwt verified");
        Ok(data.claims)
    }
}
