use super::BackendClient;
use crate::http::{ApiResponse, Messages, Method};
use crate::model::{CreateRoleRequest, Role};
use async_trait::async_trait;
use tracing::instrument;

const LIST: Messages<'static> = Messages::new("Roles loaded", "Could not load roles");
const GET: Messages<'static> = Messages::new("Role loaded", "Could not load the role");
const CREATE: Messages<'static> = Messages::new("Role created", "Could not create the role");

#[async_trait]
pub trait RoleApi: Send + Sync {
    async fn list_roles(&self) -> ApiResponse<Vec<Role>>;
    async fn get_role(&self, role_id: &str) -> ApiResponse<Role>;
    async fn create_role(&self, request: &CreateRoleRequest) -> ApiResponse<Role>;
}

#[async_trait]
impl RoleApi for BackendClient {
    #[instrument(skip(self))]
    async fn list_roles(&self) -> ApiResponse<Vec<Role>> {
        self.call(self.request(Method::GET, "/roles"), LIST).await
    }

    #[instrument(skip(self))]
    async fn get_role(&self, role_id: &str) -> ApiResponse<Role> {
        self.call(self.request(Method::GET, &format!("/roles/{role_id}")), GET)
            .await
    }

    #[instrument(skip(self, request))]
    async fn create_role(&self, request: &CreateRoleRequest) -> ApiResponse<Role> {
        self.call_json(self.request(Method::POST, "/roles"), request, CREATE)
            .await
    }
}
