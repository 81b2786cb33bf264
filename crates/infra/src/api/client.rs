//! `PartnerApi` over HTTP
//!
//! Each method serialises its input, calls one fixed verb and path and hands
//! the parsed envelope back unchanged. The only side effects are on the
//! session: `login` stores the issued tokens and `logout` clears them.

use std::sync::Arc;

use async_trait::async_trait;
use partnerdesk_core::{PartnerApi, ProgressCallback};
use partnerdesk_domain::constants::{
    CHECK_HOTEL_PATH, HOTEL_OPERATIONS_PATH, LOGIN_PATH, LOGOUT_PATH, REGISTER_HOTEL_PATH,
    SET_PASSWORD_PATH,
};
use partnerdesk_domain::{
    Acknowledgement, ApiConfig, ApiEnvelope, AuthenticatedUser, BulkStatusRequest, Credentials,
    FileAttachment, HotelProfile, HotelRegistration, HotelSettings, HotelStatusRequest,
    NewRoomType, PhoneRequest, Result, RoomStatus, RoomStatusRequest, RoomTypesPayload,
    RoomUpdate, TokenPair, UploadForm,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use urlencoding::encode;

use crate::auth::TokenStore;
use crate::errors::InfraError;
use crate::http::{RequestClient, RequestDescriptor, UploadClient};

#[derive(Clone)]
pub struct HotelApiClient {
    requests: RequestClient,
    uploads: UploadClient,
}

impl HotelApiClient {
    pub fn new(requests: RequestClient, uploads: UploadClient) -> Self {
        Self { requests, uploads }
    }

    /// Request and upload clients sharing one connection pool and `tokens`.
    pub fn from_config(config: &ApiConfig, tokens: Arc<TokenStore>) -> Result<Self> {
        let requests = RequestClient::from_config(config, tokens)?;
        let uploads = UploadClient::from_request_client(&requests, config.upload_timeout);
        Ok(Self::new(requests, uploads))
    }

    /// Same façade with every call bound to `cancel`.
    pub fn scoped(&self, cancel: CancellationToken) -> Self {
        Self {
            requests: self.requests.scoped(cancel.clone()),
            uploads: self.uploads.scoped(cancel),
        }
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        self.requests.tokens()
    }

    pub fn requests(&self) -> &RequestClient {
        &self.requests
    }

    async fn send<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> Result<T> {
        self.requests.request_json(&descriptor).await
    }

    async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &UploadForm,
        progress: ProgressCallback,
    ) -> Result<T> {
        let body = self.uploads.upload(path, form, progress).await?;
        decode(body)
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T> {
    serde_json::from_value(body).map_err(|err| InfraError::from(err).into())
}

/// `/hotel-operations/{hotel_id}` followed by `segments`, each percent-encoded.
fn hotel_path(hotel_id: &str, segments: &[&str]) -> String {
    let mut path = format!("{HOTEL_OPERATIONS_PATH}/{}", encode(hotel_id));
    for segment in segments {
        path.push('/');
        path.push_str(&encode(segment));
    }
    path
}

#[async_trait]
impl PartnerApi for HotelApiClient {
    async fn check_hotel(&self, phone: &str) -> Result<ApiEnvelope<HotelProfile>> {
        let descriptor = RequestDescriptor::post(CHECK_HOTEL_PATH)
            .anonymous()
            .retry_transport(true)
            .json(&PhoneRequest { phone: phone.to_string() })?;
        self.send(descriptor).await
    }

    async fn set_password(&self, phone: &str, password: &str) -> Result<Acknowledgement> {
        let descriptor = RequestDescriptor::post(SET_PASSWORD_PATH)
            .anonymous()
            .json(&Credentials::new(phone, password))?;
        self.send(descriptor).await
    }

    async fn login(&self, phone: &str, password: &str) -> Result<ApiEnvelope<AuthenticatedUser>> {
        let descriptor = RequestDescriptor::post(LOGIN_PATH)
            .anonymous()
            .retry_transport(true)
            .json(&Credentials::new(phone, password))?;
        let envelope: ApiEnvelope<AuthenticatedUser> = self.send(descriptor).await?;

        if envelope.success {
            match envelope.token.clone() {
                Some(token) => {
                    let pair = TokenPair::new(token, envelope.refresh_token.clone());
                    self.tokens().store_tokens(pair).await?;
                    info!("Login succeeded");
                }
                None => warn!("Login succeeded but the response carried no token"),
            }
        }

        Ok(envelope)
    }

    async fn logout(&self) -> Result<()> {
        if self.tokens().is_authenticated() {
            let descriptor = RequestDescriptor::post(LOGOUT_PATH);
            if let Err(err) = self.requests.request(&descriptor).await {
                warn!(error = %err, "Logout request failed, clearing local session anyway");
            }
        } else {
            debug!("Logout without a session, skipping backend call");
        }

        self.tokens().clear_tokens().await
    }

    async fn register_hotel(
        &self,
        registration: &HotelRegistration,
        progress: ProgressCallback,
    ) -> Result<Value> {
        self.uploads.upload(REGISTER_HOTEL_PATH, &registration.to_form(), progress).await
    }

    async fn hotel_settings(&self, hotel_id: &str) -> Result<ApiEnvelope<HotelSettings>> {
        self.send(RequestDescriptor::get(hotel_path(hotel_id, &[]))).await
    }

    async fn update_hotel_status(&self, hotel_id: &str, open: bool) -> Result<Acknowledgement> {
        let descriptor = RequestDescriptor::put(hotel_path(hotel_id, &["status"]))
            .json(&HotelStatusRequest { hotel_status: open })?;
        self.send(descriptor).await
    }

    async fn add_room_type(
        &self,
        hotel_id: &str,
        room_type: &NewRoomType,
        progress: ProgressCallback,
    ) -> Result<ApiEnvelope<RoomTypesPayload>> {
        let path = hotel_path(hotel_id, &["room-types"]);
        self.upload(&path, &room_type.to_form(), progress).await
    }

    async fn add_room_type_photos(
        &self,
        hotel_id: &str,
        room_type_name: &str,
        photos: &[FileAttachment],
        progress: ProgressCallback,
    ) -> Result<ApiEnvelope<RoomTypesPayload>> {
        let path = hotel_path(hotel_id, &["room-types", room_type_name, "photos"]);
        let form = UploadForm::photos(photos.iter().cloned());
        self.upload(&path, &form, progress).await
    }

    async fn delete_room_type(
        &self,
        hotel_id: &str,
        room_type_name: &str,
    ) -> Result<ApiEnvelope<RoomTypesPayload>> {
        let path = hotel_path(hotel_id, &["room-types", room_type_name]);
        self.send(RequestDescriptor::delete(path)).await
    }

    async fn update_room_status(
        &self,
        hotel_id: &str,
        room_number: &str,
        status: RoomStatus,
    ) -> Result<Acknowledgement> {
        let path = hotel_path(hotel_id, &["rooms", room_number, "status"]);
        let descriptor = RequestDescriptor::put(path).json(&RoomStatusRequest { status })?;
        self.send(descriptor).await
    }

    async fn bulk_update_room_status(
        &self,
        hotel_id: &str,
        updates: &[RoomUpdate],
    ) -> Result<ApiEnvelope<RoomTypesPayload>> {
        let descriptor = RequestDescriptor::put(hotel_path(hotel_id, &["rooms", "bulk-status"]))
            .json(&BulkStatusRequest { room_updates: updates.to_vec() })?;
        self.send(descriptor).await
    }
}
