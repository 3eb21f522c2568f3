use super::{BackendClient, Page};
use crate::http::{ApiResponse, Messages, Method};
use crate::model::{Account, CreateAccountRequest, UpdateAccountRequest};
use async_trait::async_trait;
use tracing::instrument;

const LIST: Messages<'static> = Messages::new("Accounts loaded", "Could not load accounts");
const GET: Messages<'static> = Messages::new("Account loaded", "Could not load the account");
const CREATE: Messages<'static> = Messages::new("Account created", "Could not create the account");
const UPDATE: Messages<'static> = Messages::new("Account updated", "Could not update the account");
const DELETE: Messages<'static> = Messages::new("Account deleted", "Could not delete the account");

#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn list_accounts(&self, page: Page) -> ApiResponse<Vec<Account>>;
    async fn get_account(&self, account_id: &str) -> ApiResponse<Account>;
    async fn create_account(&self, request: &CreateAccountRequest) -> ApiResponse<Account>;
    async fn update_account(&self, account_id: &str, request: &UpdateAccountRequest) -> ApiResponse<Account>;
    async fn delete_account(&self, account_id: &str) -> ApiResponse<()>;
}

#[async_trait]
impl AccountApi for BackendClient {
    #[instrument(skip(self))]
    async fn list_accounts(&self, page: Page) -> ApiResponse<Vec<Account>> {
        self.call(page.apply(self.request(Method::GET, "/account")), LIST)
            .await
    }

    #[instrument(skip(self))]
    async fn get_account(&self, account_id: &str) -> ApiResponse<Account> {
        self.call(self.request(Method::GET, &format!("/account/{account_id}")), GET)
            .await
    }

    #[instrument(skip(self, request))]
    async fn create_account(&self, request: &CreateAccountRequest) -> ApiResponse<Account> {
        self.call_json(self.request(Method::POST, "/account"), request, CREATE)
            .await
    }

    #[instrument(skip(self, request))]
    async fn update_account(&self, account_id: &str, request: &UpdateAccountRequest) -> ApiResponse<Account> {
        let path = format!("/account/{account_id}");
        self.call_json(self.request(Method::PUT, &path), request, UPDATE)
            .await
    }

    #[instrument(skip(self))]
    async fn delete_account(&self, account_id: &str) -> ApiResponse<()> {
        self.call_unit(self.request(Method::DELETE, &format!("/account/{account_id}")), DELETE)
            .await
    }
}
