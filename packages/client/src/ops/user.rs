//! Authentication and user profile operations.

use aiot_api::{LoginRequest, ResetPasswordRequest, TokenResponse, UserProfile};

use crate::error::Result;
use crate::paths;
use crate::transport::{Endpoint, OK_OR_CREATED};
use crate::Client;

impl Client {
    /// `POST /user/login`: exchange credentials for a bearer token.
    ///
    /// A 401/403 answer yields the "invalid email or password" sentinel
    /// ([`crate::Error::is_invalid_credentials`]).
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: TokenResponse = self
            .call(
                Endpoint::post("Authenticate", paths::LOGIN)
                    .accepting(OK_OR_CREATED)
                    .login(),
            )
            .json(&body)
            .fetch()
            .await?;
        Ok(resp.token)
    }

    /// `GET /user/verify`: check that `token` is accepted by the gateway.
    ///
    /// Returns `Ok(true)` when it is; a rejected token is an error
    /// ([`crate::Error::is_unauthorized`]), never `Ok(false)`.
    pub async fn verify_token(&self, token: &str) -> Result<bool> {
        self.call(Endpoint::get("VerifyToken", paths::VERIFY))
            .token(token)
            .send()
            .await?;
        Ok(true)
    }

    /// `POST /user/reset-password`: replace `old_password` with `new_password`.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        old_password: &str,
    ) -> Result<()> {
        let body = ResetPasswordRequest {
            new_password: new_password.to_string(),
            old_password: old_password.to_string(),
        };
        self.call(Endpoint::post("ResetPassword", paths::RESET_PASSWORD))
            .token(token)
            .json(&body)
            .send()
            .await
    }

    /// `GET /user/profile`: profile of the token's owner.
    pub async fn user_profile(&self, token: &str) -> Result<UserProfile> {
        self.call(Endpoint::get("GetUserProfile", paths::PROFILE))
            .token(token)
            .fetch()
            .await
    }
}
