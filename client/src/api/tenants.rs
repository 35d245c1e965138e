use crate::api::client::{ApiClient, ApiError, Sourced};
use crate::tenant::{NewTenant, TenantConfig};

impl ApiClient {
    /// Reads one tenant's configuration by key. The request is tagged with the
    /// looked-up key itself so a different tenant than the active one can be
    /// resolved, e.g. before switching to it.
    pub async fn tenant_by_key(&self, key: &str) -> Result<TenantConfig, ApiError> {
        let request = self.http().get(self.url(&format!("/tenants/key/{key}")));
        Ok(self.send(request, Some(key)).await?.json().await?)
    }

    pub async fn tenants(&self) -> Result<Sourced<Vec<TenantConfig>>, ApiError> {
        let request = self.http().get(self.url("/tenants"));
        let result = match self.send(request, None).await {
            Ok(response) => response.json().await.map_err(ApiError::from),
            Err(e) => Err(e),
        };
        self.recover(result, Vec::new)
    }

    pub async fn create_tenant(&self, tenant: &NewTenant) -> Result<TenantConfig, ApiError> {
        let request = self.http().post(self.url("/tenants")).json(tenant);
        Ok(self.send(request, None).await?.json().await?)
    }

    pub async fn update_tenant(&self, id: &str, tenant: &NewTenant) -> Result<TenantConfig, ApiError> {
        let request = self.http().put(self.url(&format!("/tenants/{id}"))).json(tenant);
        Ok(self.send(request, None).await?.json().await?)
    }

    pub async fn delete_tenant(&self, id: &str) -> Result<(), ApiError> {
        let request = self.http().delete(self.url(&format!("/tenants/{id}")));
        self.send(request, None).await?;
        Ok(())
    }
}
