//! API client for the smart-home REST service.
//!
//! This module provides the `ApiClient` struct: login/logout/refresh
//! against the `/user` auth endpoints, a single authenticated request
//! path that retries exactly once after a silent token refresh when the
//! server reports 401, and one method per resource operation.

use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::{SessionState, Token};
use crate::config::Config;
use crate::models::{
    ChangeMailRequest, ChangePasswordRequest, ChangeUpdateFrequency, Device, DeviceHouseAssoc,
    DeviceId, Host, HostHouseAssoc, HostId, House, HouseId, NewHouse, ThData, User, UserId,
    UserLogin,
};

use super::ClientError;

/// Client for the smart-home service. One instance serves the whole
/// interactive session; all mutable session state lives behind a single
/// mutex so at most one token refresh is ever in flight.
pub struct ApiClient {
    http: Client,
    session: Mutex<SessionState>,
}

impl ApiClient {
    /// Create a new API client pointed at the configured server.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            session: Mutex::new(SessionState::new(config.server_url.clone())),
        })
    }

    // ===== Session management =====

    /// Log in with mail and password. On success the refresh token is
    /// stored, a first access token is fetched, and the silent 401
    /// retry path is armed. A failure anywhere leaves the session as it
    /// was, with the retry path disarmed.
    pub async fn login(&self, mail: &str, password: &str) -> Result<(), ClientError> {
        let mut session = self.session.lock().await;
        let url = format!("{}/user/login", session.base_url);
        let response = self
            .http
            .post(&url)
            .json(&UserLogin { mail, password })
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "login rejected");
            return Err(ClientError::auth(status, &body));
        }

        let token = Self::decode::<Token>(response).await?;
        session.tokens.add_refresh(token);
        // The `?` here matters: refresh_enabled must only be set once
        // the first access token is actually in hand.
        self.refresh_locked(&mut session).await?;
        session.refresh_enabled = true;
        debug!("login succeeded");
        Ok(())
    }

    /// Drop all tokens and disable the 401 retry path. Idempotent.
    pub async fn logout(&self) {
        self.session.lock().await.logout();
        debug!("logged out");
    }

    /// Fetch a new access token using the current refresh token.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let mut session = self.session.lock().await;
        self.refresh_locked(&mut session).await
    }

    /// Point the client at a different server. The URL is taken
    /// verbatim and tokens are deliberately left alone; callers pair
    /// this with `logout` because tokens are not portable across
    /// servers.
    pub async fn change_base_url(&self, new_url: &str) {
        self.session.lock().await.base_url = new_url.to_string();
    }

    pub async fn server_url(&self) -> String {
        self.session.lock().await.base_url.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.lock().await.is_authenticated()
    }

    async fn refresh_locked(&self, session: &mut SessionState) -> Result<(), ClientError> {
        let url = format!("{}/user/refresh", session.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(session.tokens.current_refresh())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "token refresh rejected");
            return Err(ClientError::auth(status, &body));
        }

        let token = Self::decode::<Token>(response).await?;
        session.tokens.add_access(token);
        debug!("access token refreshed");
        Ok(())
    }

    // ===== Authenticated request path =====

    /// Send one authenticated request. On a 401 with the retry path
    /// armed, refresh the access token and resend the original request
    /// exactly once; the second outcome is final even if it is 401
    /// again. Any other status is returned as-is for the caller to map.
    async fn execute<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ClientError> {
        let (url, attached) = {
            let session = self.session.lock().await;
            (
                format!("{}{}", session.base_url, path),
                session.tokens.current_access().to_string(),
            )
        };

        let response = self.send(method.clone(), &url, body, &attached).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let fresh = {
            let mut session = self.session.lock().await;
            if !session.refresh_enabled {
                return Ok(response);
            }
            // If another request already refreshed between our read and
            // this 401, reuse its token instead of refreshing again.
            if session.tokens.current_access() == attached {
                self.refresh_locked(&mut session).await?;
            }
            session.tokens.current_access().to_string()
        };

        debug!(url = %url, "retrying request after token refresh");
        Ok(self.send(method, &url, body, &fresh).await?)
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        token: &str,
    ) -> Result<Response, reqwest::Error> {
        let mut request = self.http.request(method, url).bearer_auth(token);
        if let Some(json) = body {
            request = request.json(json);
        }
        request.send().await
    }

    async fn expect_ok(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status == StatusCode::OK {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::api(status, &body))
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ClientError::InvalidResponse(format!(
                "{}. Response starts with: {}",
                e,
                super::error::clip(&text, 200)
            ))
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.execute(Method::GET, path, None::<&()>).await?;
        Self::decode(Self::expect_ok(response).await?).await
    }

    /// POST where only the status matters.
    async fn post_ok<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ClientError> {
        let response = self.execute(Method::POST, path, Some(body)).await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    // ===== User operations =====

    pub async fn user_detail(&self) -> Result<User, ClientError> {
        self.get_json("/user/detail").await
    }

    pub async fn edit_mail(&self, new_mail: &str) -> Result<(), ClientError> {
        self.post_ok("/user/editMail", &ChangeMailRequest { new_mail }).await
    }

    pub async fn edit_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ClientError> {
        self.post_ok(
            "/user/editPassword",
            &ChangePasswordRequest { old_password, new_password },
        )
        .await
    }

    pub async fn enable_user(&self, user_id: Uuid) -> Result<(), ClientError> {
        self.post_ok("/user/enable", &UserId { id: user_id }).await
    }

    pub async fn disable_user(&self, user_id: Uuid) -> Result<(), ClientError> {
        self.post_ok("/user/disable", &UserId { id: user_id }).await
    }

    // ===== Device operations =====

    pub async fn device_detail(&self, device_id: Uuid) -> Result<Device, ClientError> {
        self.get_json(&format!("/device/detail/{device_id}")).await
    }

    pub async fn list_devices_by_owner(&self) -> Result<Vec<Device>, ClientError> {
        self.get_json("/device/listOwner").await
    }

    pub async fn list_devices_by_house(&self, house_id: Uuid) -> Result<Vec<Device>, ClientError> {
        self.get_json(&format!("/device/listHouse/{house_id}")).await
    }

    pub async fn list_devices_by_host(&self, host_id: Uuid) -> Result<Vec<Device>, ClientError> {
        self.get_json(&format!("/device/listHost/{host_id}")).await
    }

    pub async fn change_update_frequency(
        &self,
        device_id: Uuid,
        update_frequency: u32,
    ) -> Result<(), ClientError> {
        self.post_ok(
            "/device/changeUpdateFrequency",
            &ChangeUpdateFrequency { device_id, update_frequency },
        )
        .await
    }

    pub async fn begin_device_assoc(&self, device_id: Uuid) -> Result<(), ClientError> {
        self.post_ok("/device/beginAssoc", &DeviceId { id: device_id }).await
    }

    pub async fn device_house_assoc(
        &self,
        device_id: Uuid,
        house_id: Uuid,
    ) -> Result<(), ClientError> {
        self.post_ok("/device/houseAssoc", &DeviceHouseAssoc { device_id, house_id }).await
    }

    pub async fn reset_device_assoc(&self, device_id: Uuid) -> Result<(), ClientError> {
        self.post_ok("/device/resetAssoc", &DeviceId { id: device_id }).await
    }

    pub async fn register_device(&self) -> Result<DeviceId, ClientError> {
        self.get_json("/device/register").await
    }

    pub async fn enable_device(&self, device_id: Uuid) -> Result<(), ClientError> {
        self.post_ok("/device/enable", &DeviceId { id: device_id }).await
    }

    pub async fn disable_device(&self, device_id: Uuid) -> Result<(), ClientError> {
        self.post_ok("/device/disable", &DeviceId { id: device_id }).await
    }

    // ===== Host operations =====

    pub async fn host_detail(&self, host_id: Uuid) -> Result<Host, ClientError> {
        self.get_json(&format!("/host/detail/{host_id}")).await
    }

    pub async fn list_hosts_by_owner(&self) -> Result<Vec<Host>, ClientError> {
        self.get_json("/host/listOwner").await
    }

    pub async fn list_hosts_by_house(&self, house_id: Uuid) -> Result<Vec<Host>, ClientError> {
        self.get_json(&format!("/host/listHouse/{house_id}")).await
    }

    pub async fn begin_host_assoc(&self, host_id: Uuid) -> Result<(), ClientError> {
        self.post_ok("/host/beginAssoc", &HostId { id: host_id }).await
    }

    pub async fn host_house_assoc(&self, host_id: Uuid, house_id: Uuid) -> Result<(), ClientError> {
        self.post_ok("/host/houseAssoc", &HostHouseAssoc { host_id, house_id }).await
    }

    pub async fn reset_host_assoc(&self, host_id: Uuid) -> Result<(), ClientError> {
        self.post_ok("/host/resetAssoc", &HostId { id: host_id }).await
    }

    pub async fn register_host(&self) -> Result<HostId, ClientError> {
        self.get_json("/host/register").await
    }

    pub async fn enable_host(&self, host_id: Uuid) -> Result<(), ClientError> {
        self.post_ok("/host/enable", &HostId { id: host_id }).await
    }

    pub async fn disable_host(&self, host_id: Uuid) -> Result<(), ClientError> {
        self.post_ok("/host/disable", &HostId { id: host_id }).await
    }

    // ===== House operations =====

    pub async fn house_detail(&self, house_id: Uuid) -> Result<House, ClientError> {
        self.get_json(&format!("/house/detail/{house_id}")).await
    }

    pub async fn list_houses(&self) -> Result<Vec<House>, ClientError> {
        self.get_json("/house/list").await
    }

    pub async fn new_house(&self, name: &str) -> Result<(), ClientError> {
        self.post_ok("/house/new", &NewHouse { name }).await
    }

    /// The update endpoint takes a full house body, so the current user
    /// is fetched first to fill in the owner.
    pub async fn update_house(&self, house_id: Uuid, new_name: &str) -> Result<(), ClientError> {
        let user = self.user_detail().await?;
        self.post_ok(
            "/house/update",
            &House {
                id: house_id,
                name: new_name.to_string(),
                owner_id: user.id,
            },
        )
        .await
    }

    pub async fn delete_house(&self, house_id: Uuid) -> Result<(), ClientError> {
        self.post_ok("/house/delete", &HouseId { id: house_id }).await
    }

    // ===== Sensor history operations =====

    pub async fn thdata_detail(&self, data_id: Uuid) -> Result<ThData, ClientError> {
        self.get_json(&format!("/thdata/detail/{data_id}")).await
    }

    pub async fn thdata_list(&self, device_id: Uuid) -> Result<Vec<ThData>, ClientError> {
        self.get_json(&format!("/thdata/list/{device_id}")).await
    }
}
