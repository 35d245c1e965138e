use serde::{Deserialize, Serialize};

use crate::api::client::{ApiClient, ApiError, Sourced};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageBanner {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub cta_text: String,
    #[serde(default)]
    pub cta_link: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub active: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceShortcut {
    pub id: i64,
    pub service_name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_name: String,
    #[serde(default)]
    pub color_code: String,
    #[serde(default)]
    pub link_url: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub active: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageConfig {
    pub id: i64,
    pub hotel_title: String,
    pub welcome_heading: String,
    pub welcome_subtitle: String,
    pub assistant_prompt: String,
    pub assistant_button_text: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub banner_rotation_interval: i64,
    pub active: bool,
    #[serde(default)]
    pub banners: Vec<LandingPageBanner>,
    #[serde(default)]
    pub service_shortcuts: Vec<ServiceShortcut>,
}

/// Banner payload for create and update calls; the backend assigns the id.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLandingPageBanner {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub cta_text: String,
    #[serde(default)]
    pub cta_link: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Shortcut payload for create and update calls; the backend assigns the id.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceShortcut {
    pub service_name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_name: String,
    #[serde(default)]
    pub color_code: String,
    #[serde(default)]
    pub link_url: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LandingPageConfigResponse {
    pub config: LandingPageConfig,
    #[serde(default)]
    pub banners: Vec<LandingPageBanner>,
    #[serde(default)]
    pub shortcuts: Vec<ServiceShortcut>,
}

/// Built-in landing page shown when the backend has no config for the tenant
/// or is unreachable, so the marketing surface always renders.
#[must_use]
pub fn placeholder_landing_config() -> LandingPageConfigResponse {
    let banners = vec![LandingPageBanner {
        id: 1,
        title: "Special Promotion".to_string(),
        subtitle: "Book now and save 20%".to_string(),
        image_url: "/assets/promo-banner.jpg".to_string(),
        cta_text: "Book Now".to_string(),
        cta_link: "/booking".to_string(),
        display_order: 1,
        active: true,
    }];
    let shortcuts = vec![
        ServiceShortcut {
            id: 1,
            service_name: "checkin".to_string(),
            display_name: "Check-in".to_string(),
            description: "Quick check-in process".to_string(),
            icon_name: "check-circle".to_string(),
            color_code: "#10B981".to_string(),
            link_url: "/checkin".to_string(),
            display_order: 1,
            active: true,
        },
        ServiceShortcut {
            id: 2,
            service_name: "concierge".to_string(),
            display_name: "Concierge".to_string(),
            description: "Local recommendations".to_string(),
            icon_name: "concierge".to_string(),
            color_code: "#8B5CF6".to_string(),
            link_url: "/concierge".to_string(),
            display_order: 2,
            active: true,
        },
    ];
    LandingPageConfigResponse {
        config: LandingPageConfig {
            id: 1,
            hotel_title: "SawadeeAI Hotel".to_string(),
            welcome_heading: "Welcome to SawadeeAI Hotel".to_string(),
            welcome_subtitle: "Experience luxury and comfort in the heart of the city".to_string(),
            assistant_prompt: "How can I help you today?".to_string(),
            assistant_button_text: "Chat with us".to_string(),
            primary_color: "#2B6CB0".to_string(),
            secondary_color: "#3182CE".to_string(),
            banner_rotation_interval: 5000,
            active: true,
            banners: banners.clone(),
            service_shortcuts: shortcuts.clone(),
        },
        banners,
        shortcuts,
    }
}

impl ApiClient {
    pub async fn landing_config(&self) -> Result<Sourced<LandingPageConfigResponse>, ApiError> {
        let request = self.http().get(self.url("/landing-page/config"));
        let result = match self.send(request, None).await {
            Ok(response) => response.json().await.map_err(ApiError::from),
            Err(e) => Err(e),
        };
        self.recover(result, placeholder_landing_config)
    }

    pub async fn update_landing_config(
        &self,
        config: &LandingPageConfig,
    ) -> Result<LandingPageConfigResponse, ApiError> {
        let request = self.http().put(self.url("/landing-page/config")).json(config);
        Ok(self.send(request, None).await?.json().await?)
    }

    pub async fn create_landing_banner(&self, banner: &NewLandingPageBanner) -> Result<LandingPageBanner, ApiError> {
        let request = self.http().post(self.url("/landing-page/banners")).json(banner);
        Ok(self.send(request, None).await?.json().await?)
    }

    pub async fn update_landing_banner(
        &self,
        id: i64,
        banner: &NewLandingPageBanner,
    ) -> Result<LandingPageBanner, ApiError> {
        let request = self
            .http()
            .put(self.url(&format!("/landing-page/banners/{id}")))
            .json(banner);
        Ok(self.send(request, None).await?.json().await?)
    }

    pub async fn delete_landing_banner(&self, id: i64) -> Result<(), ApiError> {
        let request = self.http().delete(self.url(&format!("/landing-page/banners/{id}")));
        self.send(request, None).await?;
        Ok(())
    }

    pub async fn create_service_shortcut(&self, shortcut: &NewServiceShortcut) -> Result<ServiceShortcut, ApiError> {
        let request = self.http().post(self.url("/landing-page/shortcuts")).json(shortcut);
        Ok(self.send(request, None).await?.json().await?)
    }

    pub async fn update_service_shortcut(
        &self,
        id: i64,
        shortcut: &NewServiceShortcut,
    ) -> Result<ServiceShortcut, ApiError> {
        let request = self
            .http()
            .put(self.url(&format!("/landing-page/shortcuts/{id}")))
            .json(shortcut);
        Ok(self.send(request, None).await?.json().await?)
    }

    pub async fn delete_service_shortcut(&self, id: i64) -> Result<(), ApiError> {
        let request = self.http().delete(self.url(&format!("/landing-page/shortcuts/{id}")));
        self.send(request, None).await?;
        Ok(())
    }
}
