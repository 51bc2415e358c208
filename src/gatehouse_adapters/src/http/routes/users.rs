use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use gatehouse_application::{
    AccountPage, CreateAccountUseCase, DeleteAccountUseCase, GetAccountUseCase,
    ListAccountsUseCase, NewAccount, PageRequest, UpdateAccountUseCase,
};
use gatehouse_core::{
    Account, AccountId, AccountStore, Clock, CredentialHasher, Email, NotificationSender,
    Password, ProfileUpdate,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use super::error::AccountApiError;
use crate::{auth::BearerAccount, http::AppState};

/// Public view of an account. The credential hash and pending code never
/// leave the service.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: AccountId,
    pub email: String,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email.as_ref().expose_secret().clone(),
            display_name: account.display_name,
            phone: account.phone,
            address: account.address,
            image: account.image,
            is_active: account.is_active,
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountListResponse {
    pub items: Vec<AccountResponse>,
    pub total_items: u64,
    pub total_pages: u64,
    pub current: u64,
    pub page_size: u64,
}

impl From<AccountPage> for AccountListResponse {
    fn from(page: AccountPage) -> Self {
        Self {
            items: page.items.into_iter().map(AccountResponse::from).collect(),
            total_items: page.total_items,
            total_pages: page.total_pages,
            current: page.page,
            page_size: page.page_size,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
}

#[tracing::instrument(name = "Create account", skip_all)]
pub async fn create_account<S, H, N, C>(
    State(state): State<AppState<S, H, N, C>>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, AccountApiError>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    N: NotificationSender + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let use_case = CreateAccountUseCase::new(state.account_store, state.hasher, state.clock);

    let new_account = NewAccount {
        email: Email::try_from(request.email)?,
        password: Password::try_from(request.password)?,
        profile: ProfileUpdate {
            display_name: request.display_name,
            phone: request.phone,
            address: request.address,
            image: request.image,
        },
    };

    let account = use_case.execute(new_account).await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// Paging parameters are taken as raw text so that empty, negative or
/// malformed values fall back to the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAccountsQuery {
    pub current: Option<String>,
    pub page_size: Option<String>,
}

impl ListAccountsQuery {
    fn page_request(&self) -> PageRequest {
        PageRequest {
            page: parse_page_number(self.current.as_deref()),
            page_size: parse_page_number(self.page_size.as_deref()),
        }
    }
}

fn parse_page_number(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse().ok())
}

#[tracing::instrument(name = "List accounts", skip_all)]
pub async fn list_accounts<S, H, N, C>(
    State(state): State<AppState<S, H, N, C>>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<impl IntoResponse, AccountApiError>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    N: NotificationSender + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let page = ListAccountsUseCase::new(state.account_store)
        .execute(query.page_request())
        .await?;

    Ok((StatusCode::OK, Json(AccountListResponse::from(page))))
}

#[tracing::instrument(name = "Get account", skip_all)]
pub async fn get_account<S, H, N, C>(
    State(state): State<AppState<S, H, N, C>>,
    _caller: BearerAccount,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AccountApiError>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    N: NotificationSender + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let id = AccountId::parse(&id)?;
    let account = GetAccountUseCase::new(state.account_store)
        .execute(id)
        .await?;

    Ok((StatusCode::OK, Json(AccountResponse::from(account))))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
}

#[tracing::instrument(name = "Update account", skip_all)]
pub async fn update_account<S, H, N, C>(
    State(state): State<AppState<S, H, N, C>>,
    _caller: BearerAccount,
    Path(id): Path<String>,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<impl IntoResponse, AccountApiError>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    N: NotificationSender + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let id = AccountId::parse(&id)?;
    let update = ProfileUpdate {
        display_name: request.display_name,
        phone: request.phone,
        address: request.address,
        image: request.image,
    };

    let account = UpdateAccountUseCase::new(state.account_store)
        .execute(id, update)
        .await?;

    Ok((StatusCode::OK, Json(AccountResponse::from(account))))
}

#[tracing::instrument(name = "Delete account", skip_all)]
pub async fn delete_account<S, H, N, C>(
    State(state): State<AppState<S, H, N, C>>,
    _caller: BearerAccount,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AccountApiError>
where
    S: AccountStore + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    N: NotificationSender + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let id = AccountId::parse(&id)?;
    DeleteAccountUseCase::new(state.account_store)
        .execute(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(current: Option<&str>, page_size: Option<&str>) -> ListAccountsQuery {
        ListAccountsQuery {
            current: current.map(str::to_owned),
            page_size: page_size.map(str::to_owned),
        }
    }

    #[test]
    fn test_page_numbers_are_parsed() {
        let request = query(Some("3"), Some(" 20 ")).page_request();

        assert_eq!(request.page, Some(3));
        assert_eq!(request.page_size, Some(20));
    }

    #[test]
    fn test_unusable_page_numbers_are_dropped() {
        for raw in ["", "-1", "abc", "1.5"] {
            let request = query(Some(raw), Some(raw)).page_request();

            assert_eq!(request.page, None, "current={raw:?}");
            assert_eq!(request.page_size, None, "pageSize={raw:?}");
        }
    }
}
