//! Login and logout against the backend.

use crate::{ApiClient, FetchError};
use priceflow_auth::Credential;
use serde::Serialize;
use serde_json::Value;

pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const LOGOUT_ENDPOINT: &str = "/auth/logout";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Exchange email and password for a token and store it.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credential, FetchError> {
        let body: Value = self
            .post(LOGIN_ENDPOINT)
            .json(&LoginRequest { email, password })?
            .send_json()
            .await?;

        let token = token_from(&body)
            .ok_or_else(|| FetchError::Parse("login response carried no token".to_string()))?;
        Ok(self.session().login(token)?)
    }

    /// End the session on the backend and forget the local credential.
    ///
    /// The credential is cleared even when the backend call fails. A 401
    /// means the backend already considers the session over.
    pub async fn logout(&self) -> Result<(), FetchError> {
        let result = self.post(LOGOUT_ENDPOINT).send().await;
        self.session().logout()?;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.is_unauthorized() => Ok(()),
            Err(e) => Err(e),
        }
    }
}

fn token_from(body: &Value) -> Option<&str> {
    body.get("token")
        .or_else(|| body.get("data").and_then(|d| d.get("token")))
        .and_then(Value::as_str)
}
