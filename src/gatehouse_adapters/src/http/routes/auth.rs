use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gatehouse_application::{
    ActivateUseCase, ConfirmPasswordResetUseCase, GetAccountUseCase, LoginUseCase,
    ReissueActivationCodeUseCase, RegisterUseCase, RequestPasswordResetUseCase,
};
use gatehouse_core::{
    AccountId, AccountStore, ActivationCode, Clock, CredentialHasher, Email, NotificationSender,
    Password,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use super::{error::AccountApiError, users::AccountResponse};
use crate::{auth::BearerAccount, http::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub display_name: Option<String>,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountIdResponse {
    pub account_id: AccountId,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<S, H, N, C>(
    State(state): State<AppState<S, H, N, C>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AccountApiError>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    N: NotificationSender + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let use_case = RegisterUseCase::new(
        state.account_store,
        state.hasher,
        state.notifier,
        state.clock,
        state.policy,
    );

    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let account_id = use_case
        .execute(email, request.display_name, password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AccountIdResponse { account_id }),
    ))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<S, H, N, C>(
    State(state): State<AppState<S, H, N, C>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AccountApiError>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    N: NotificationSender + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let use_case = LoginUseCase::new(state.account_store, state.hasher, state.policy);

    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let account = use_case.execute(email, password).await?;
    let token = state.token_issuer.issue(&account)?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            access_token: token.access_token,
            token_type: token.token_type.to_string(),
            expires_in: token.expires_in,
        }),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateRequest {
    pub account_id: String,
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivateResponse {
    pub activated: bool,
}

#[tracing::instrument(name = "Activate", skip_all)]
pub async fn activate<S, H, N, C>(
    State(state): State<AppState<S, H, N, C>>,
    Json(request): Json<ActivateRequest>,
) -> Result<impl IntoResponse, AccountApiError>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    N: NotificationSender + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let use_case = ActivateUseCase::new(state.account_store, state.clock);

    let account_id = AccountId::parse(&request.account_id)?;
    let code = ActivationCode::parse(request.code)?;

    use_case.execute(account_id, code).await?;

    Ok((
        StatusCode::OK,
        Json(ActivateResponse { activated: true }),
    ))
}

#[derive(Deserialize)]
pub struct EmailRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Reissue activation code", skip_all)]
pub async fn reissue_activation_code<S, H, N, C>(
    State(state): State<AppState<S, H, N, C>>,
    Json(request): Json<EmailRequest>,
) -> Result<impl IntoResponse, AccountApiError>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    N: NotificationSender + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let use_case = ReissueActivationCodeUseCase::new(
        state.account_store,
        state.notifier,
        state.clock,
        state.policy,
    );

    let email = Email::try_from(request.email)?;
    let account_id = use_case.execute(email).await?;

    Ok((
        StatusCode::OK,
        Json(AccountIdResponse { account_id }),
    ))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetResponse {
    pub account_id: AccountId,
    pub email: String,
}

#[tracing::instrument(name = "Request password reset", skip_all)]
pub async fn request_password_reset<S, H, N, C>(
    State(state): State<AppState<S, H, N, C>>,
    Json(request): Json<EmailRequest>,
) -> Result<impl IntoResponse, AccountApiError>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    N: NotificationSender + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let use_case = RequestPasswordResetUseCase::new(
        state.account_store,
        state.notifier,
        state.clock,
        state.policy,
    );

    let email = Email::try_from(request.email)?;
    let requested = use_case.execute(email).await?;

    Ok((
        StatusCode::OK,
        Json(PasswordResetResponse {
            account_id: requested.account_id,
            email: requested.email.as_ref().expose_secret().clone(),
        }),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPasswordResetRequest {
    pub email: Secret<String>,
    pub code: String,
    pub password: Secret<String>,
    pub confirm_password: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfirmPasswordResetResponse {
    pub confirmed: bool,
}

#[tracing::instrument(name = "Confirm password reset", skip_all)]
pub async fn confirm_password_reset<S, H, N, C>(
    State(state): State<AppState<S, H, N, C>>,
    Json(request): Json<ConfirmPasswordResetRequest>,
) -> Result<impl IntoResponse, AccountApiError>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    N: NotificationSender + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let use_case =
        ConfirmPasswordResetUseCase::new(state.account_store, state.hasher, state.clock);

    let email = Email::try_from(request.email)?;
    let code = ActivationCode::parse(request.code)?;
    let password = Password::try_from(request.password)?;
    let confirm_password = Password::try_from(request.confirm_password)?;

    use_case
        .execute(email, code, password, confirm_password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ConfirmPasswordResetResponse { confirmed: true }),
    ))
}

#[tracing::instrument(name = "Profile", skip_all)]
pub async fn profile<S, H, N, C>(
    State(state): State<AppState<S, H, N, C>>,
    caller: BearerAccount,
) -> Result<impl IntoResponse, AccountApiError>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    N: NotificationSender + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let account = GetAccountUseCase::new(state.account_store)
        .execute(caller.account_id)
        .await?;

    Ok((StatusCode::OK, Json(AccountResponse::from(account))))
}
