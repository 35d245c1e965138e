use serde::{Deserialize, Serialize};

use crate::api::client::{ApiClient, ApiError, Sourced};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingHours {
    pub reception: String,
    pub restaurant: String,
    pub spa: String,
    pub pool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gym: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concierge: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelPolicies {
    pub check_in: String,
    pub check_out: String,
    pub cancellation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoking_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_policy: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub city: String,
    pub country: String,
    pub timezone: String,
}

/// Per-tenant hotel profile, scoped by the tenant header on every call.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub operating_hours: OperatingHours,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub policies: HotelPolicies,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ApiClient {
    /// Reads the active tenant's hotel profile. Degrades to `None` on failure
    /// when offline fallback is enabled, so info sections simply stay empty.
    pub async fn hotel_info(&self) -> Result<Sourced<Option<HotelInfo>>, ApiError> {
        let request = self.http().get(self.url("/hotel-info"));
        let result = match self.send(request, None).await {
            Ok(response) => response.json().await.map(Some).map_err(ApiError::from),
            Err(e) => Err(e),
        };
        self.recover(result, || None)
    }

    pub async fn create_hotel_info(&self, info: &HotelInfo) -> Result<HotelInfo, ApiError> {
        let request = self.http().post(self.url("/hotel-info")).json(info);
        Ok(self.send(request, None).await?.json().await?)
    }

    pub async fn update_hotel_info(&self, info: &HotelInfo) -> Result<HotelInfo, ApiError> {
        let request = self.http().put(self.url("/hotel-info")).json(info);
        Ok(self.send(request, None).await?.json().await?)
    }
}
