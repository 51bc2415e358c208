use gatehouse_core::{Account, AccountStore};

use crate::AccountLifecycleError;

pub const DEFAULT_PAGE_SIZE: u64 = 5;
pub const MAX_PAGE_SIZE: u64 = 100;

/// 1-based page selection; missing or zero values fall back to defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRequest {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PageRequest {
    fn page(&self) -> u64 {
        self.page.filter(|p| *p >= 1).unwrap_or(1)
    }

    fn page_size(&self) -> u64 {
        self.page_size
            .filter(|s| *s >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE)
    }
}

#[derive(Debug)]
pub struct AccountPage {
    pub items: Vec<Account>,
    pub total_items: u64,
    pub total_pages: u64,
    pub page: u64,
    pub page_size: u64,
}

pub struct ListAccountsUseCase<S>
where
    S: AccountStore,
{
    account_store: S,
}

impl<S> ListAccountsUseCase<S>
where
    S: AccountStore,
{
    pub fn new(account_store: S) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "ListAccountsUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        request: PageRequest,
    ) -> Result<AccountPage, AccountLifecycleError> {
        let page = request.page();
        let page_size = request.page_size();

        let total_items = self.account_store.count().await?;
        let total_pages = total_items.div_ceil(page_size);
        let offset = (page - 1).saturating_mul(page_size);
        let items = self.account_store.list(offset, page_size).await?;

        Ok(AccountPage {
            items,
            total_items,
            total_pages,
            page,
            page_size,
        })
    }
}
