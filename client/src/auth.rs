use autoreply_types::{LoginRequest, RegisterRequest};
use email_address::EmailAddress;

use crate::api::ApiClient;
use crate::error::{ActionError, FormError};

pub fn validate_login(request: &LoginRequest) -> Result<(), FormError> {
    validate_email(&request.email)?;
    if request.password.is_empty() {
        return Err(FormError::Required("Password"));
    }
    Ok(())
}

pub fn validate_registration(request: &RegisterRequest) -> Result<(), FormError> {
    if request.name.trim().is_empty() {
        return Err(FormError::Required("Name"));
    }
    validate_email(&request.email)?;
    if request.password.is_empty() {
        return Err(FormError::Required("Password"));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), FormError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FormError::Required("Email"));
    }
    if !EmailAddress::is_valid(email) {
        return Err(FormError::InvalidEmail);
    }
    Ok(())
}

/// Logs in and stores the returned token. Nothing is stored on failure.
pub async fn log_in(api: &ApiClient, request: &LoginRequest) -> Result<(), ActionError> {
    validate_login(request)?;

    let request = LoginRequest {
        email: request.email.trim().to_string(),
        password: request.password.clone(),
    };
    let response = api.login(&request).await?;
    api.session().sign_in(&response.token);
    Ok(())
}

pub async fn register(api: &ApiClient, request: &RegisterRequest) -> Result<(), ActionError> {
    validate_registration(request)?;

    let request = RegisterRequest {
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        password: request.password.clone(),
    };
    let response = api.register(&request).await?;
    api.session().sign_in(&response.token);
    Ok(())
}

pub fn log_out(api: &ApiClient) {
    api.session().sign_out();
}
