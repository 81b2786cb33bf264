//! In-memory doubles for the core ports

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use partnerdesk_core::{PartnerApi, PhoneMemory, ProgressCallback};
use partnerdesk_domain::{
    Acknowledgement, ApiEnvelope, AuthenticatedUser, FileAttachment, HotelProfile,
    HotelRegistration, HotelSettings, NewRoomType, PartnerDeskError, Result as DomainResult,
    Role, RoomStatus, RoomType, RoomTypesPayload, RoomUpdate,
};

#[derive(Debug, Clone)]
struct Account {
    profile: HotelProfile,
    user: AuthenticatedUser,
    password: Option<String>,
}

#[derive(Debug)]
struct State {
    accounts: HashMap<String, Account>,
    settings: HotelSettings,
    calls: Vec<String>,
    registrations: Vec<HotelRegistration>,
    fail_next: Option<PartnerDeskError>,
    logged_in: bool,
    delays: HashMap<String, Duration>,
}

/// Fake partner backend implementing [`PartnerApi`].
pub struct FakeBackend {
    state: Mutex<State>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            state: Mutex::new(State {
                accounts: HashMap::new(),
                settings: HotelSettings { hotel_status: true, room_types: Vec::new() },
                calls: Vec::new(),
                registrations: Vec::new(),
                fail_next: None,
                logged_in: false,
                delays: HashMap::new(),
            }),
        }
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hotel account. `password: None` means first login pending.
    pub fn with_hotel(self, phone: &str, name: &str, password: Option<&str>) -> Self {
        self.with_account(phone, name, password, Role::Hotel)
    }

    pub fn with_account(
        self,
        phone: &str,
        name: &str,
        password: Option<&str>,
        role: Role,
    ) -> Self {
        let account = Account {
            profile: HotelProfile {
                id: Some(format!("hotel-{phone}")),
                name: name.to_string(),
                phone: Some(phone.to_string()),
                business_address: None,
                is_first_login: password.is_none(),
                room_types: Vec::new(),
            },
            user: AuthenticatedUser {
                id: format!("hotel-{phone}"),
                name: name.to_string(),
                phone: phone.to_string(),
                business_address: None,
                role,
            },
            password: password.map(str::to_string),
        };
        self.state.lock().accounts.insert(phone.to_string(), account);
        self
    }

    pub fn with_room_types(self, room_types: Vec<RoomType>) -> Self {
        self.state.lock().settings.room_types = room_types;
        self
    }

    /// Make the next call fail with `err` before touching any state.
    pub fn fail_next(&self, err: PartnerDeskError) {
        self.state.lock().fail_next = Some(err);
    }

    /// Hold the response of every `call` for `delay`. Server state changes
    /// before the wait, like a slow network on the way back.
    pub fn delay_call(&self, call: &str, delay: Duration) {
        self.state.lock().delays.insert(call.to_string(), delay);
    }

    /// Hold single-room status responses for `room_number` only.
    pub fn delay_room(&self, room_number: &str, delay: Duration) {
        self.delay_call(&format!("update_room_status:{room_number}"), delay);
    }

    /// Names of every call made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.state.lock().calls.iter().filter(|c| c.as_str() == name).count()
    }

    pub fn settings(&self) -> HotelSettings {
        self.state.lock().settings.clone()
    }

    pub fn registrations(&self) -> Vec<HotelRegistration> {
        self.state.lock().registrations.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.lock().logged_in
    }

    async fn pause(&self, key: &str) {
        let delay = self.state.lock().delays.get(key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn enter(&self, name: &str) -> DomainResult<parking_lot::MutexGuard<'_, State>> {
        let mut state = self.state.lock();
        state.calls.push(name.to_string());
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

fn room_types_envelope(settings: &HotelSettings) -> ApiEnvelope<RoomTypesPayload> {
    ApiEnvelope::ok(RoomTypesPayload { room_types: settings.room_types.clone() })
}

fn report(progress: &ProgressCallback) {
    for pct in [0, 40, 100] {
        progress(pct);
    }
}

#[async_trait]
impl PartnerApi for FakeBackend {
    async fn check_hotel(&self, phone: &str) -> DomainResult<ApiEnvelope<HotelProfile>> {
        let state = self.enter("check_hotel")?;
        Ok(match state.accounts.get(phone) {
            Some(account) => ApiEnvelope::ok(account.profile.clone()),
            None => ApiEnvelope::failure("Hotel not found"),
        })
    }

    async fn set_password(&self, phone: &str, password: &str) -> DomainResult<Acknowledgement> {
        let mut state = self.enter("set_password")?;
        Ok(match state.accounts.get_mut(phone) {
            Some(account) if account.password.is_none() => {
                account.password = Some(password.to_string());
                account.profile.is_first_login = false;
                ApiEnvelope {
                    success: true,
                    message: Some("Password set".into()),
                    ..ApiEnvelope::default()
                }
            }
            Some(_) => ApiEnvelope::failure("Password already set"),
            None => ApiEnvelope::failure("Hotel not found"),
        })
    }

    async fn login(
        &self,
        phone: &str,
        password: &str,
    ) -> DomainResult<ApiEnvelope<AuthenticatedUser>> {
        let mut state = self.enter("login")?;
        let user = state
            .accounts
            .get(phone)
            .filter(|a| a.password.as_deref() == Some(password))
            .map(|a| a.user.clone());
        match user {
            Some(user) => {
                state.logged_in = true;
                Ok(ApiEnvelope { token: Some("access".into()), ..ApiEnvelope::ok(user) })
            }
            None => Err(PartnerDeskError::http(401, Some("Invalid credentials".into()))),
        }
    }

    async fn logout(&self) -> DomainResult<()> {
        let mut state = self.enter("logout")?;
        state.logged_in = false;
        Ok(())
    }

    async fn register_hotel(
        &self,
        registration: &HotelRegistration,
        progress: ProgressCallback,
    ) -> DomainResult<serde_json::Value> {
        let mut state = self.enter("register_hotel")?;
        report(&progress);
        state.registrations.push(registration.clone());
        Ok(serde_json::json!({"success": true, "message": "Registration received"}))
    }

    async fn hotel_settings(&self, _hotel_id: &str) -> DomainResult<ApiEnvelope<HotelSettings>> {
        let settings = self.enter("hotel_settings")?.settings.clone();
        self.pause("hotel_settings").await;
        Ok(ApiEnvelope::ok(settings))
    }

    async fn update_hotel_status(
        &self,
        _hotel_id: &str,
        open: bool,
    ) -> DomainResult<Acknowledgement> {
        self.enter("update_hotel_status")?.settings.hotel_status = open;
        self.pause("update_hotel_status").await;
        Ok(ApiEnvelope::ok(serde_json::Value::Null))
    }

    async fn add_room_type(
        &self,
        _hotel_id: &str,
        room_type: &NewRoomType,
        progress: ProgressCallback,
    ) -> DomainResult<ApiEnvelope<RoomTypesPayload>> {
        let mut state = self.enter("add_room_type")?;
        if state.settings.room_types.iter().any(|rt| rt.name == room_type.name) {
            return Ok(ApiEnvelope::failure("Room type already exists"));
        }
        report(&progress);
        let first =
            state.settings.room_types.iter().map(|rt| rt.rooms.len() as u32).sum::<u32>() + 101;
        state.settings.room_types.push(RoomType {
            id: None,
            name: room_type.name.clone(),
            hourly_price: room_type.hourly_price,
            room_count: room_type.room_count,
            rooms: (first..first + room_type.room_count)
                .map(|n| partnerdesk_domain::Room::new(n.to_string(), RoomStatus::Vacant))
                .collect(),
            photos: room_type
                .photos
                .iter()
                .map(|p| format!("https://cdn.test/{}", p.file_name))
                .collect(),
        });
        Ok(room_types_envelope(&state.settings))
    }

    async fn add_room_type_photos(
        &self,
        _hotel_id: &str,
        room_type_name: &str,
        photos: &[FileAttachment],
        progress: ProgressCallback,
    ) -> DomainResult<ApiEnvelope<RoomTypesPayload>> {
        let mut state = self.enter("add_room_type_photos")?;
        report(&progress);
        let Some(room_type) =
            state.settings.room_types.iter_mut().find(|rt| rt.name == room_type_name)
        else {
            return Ok(ApiEnvelope::failure("Room type not found"));
        };
        room_type
            .photos
            .extend(photos.iter().map(|p| format!("https://cdn.test/{}", p.file_name)));
        Ok(room_types_envelope(&state.settings))
    }

    async fn delete_room_type(
        &self,
        _hotel_id: &str,
        room_type_name: &str,
    ) -> DomainResult<ApiEnvelope<RoomTypesPayload>> {
        let mut state = self.enter("delete_room_type")?;
        state.settings.room_types.retain(|rt| rt.name != room_type_name);
        Ok(room_types_envelope(&state.settings))
    }

    async fn update_room_status(
        &self,
        _hotel_id: &str,
        room_number: &str,
        status: RoomStatus,
    ) -> DomainResult<Acknowledgement> {
        let ack = {
            let mut state = self.enter("update_room_status")?;
            let room = state
                .settings
                .room_types
                .iter_mut()
                .flat_map(|rt| rt.rooms.iter_mut())
                .find(|r| r.room_number == room_number);
            match room {
                Some(room) => {
                    room.status = status;
                    ApiEnvelope::ok(serde_json::Value::Null)
                }
                None => ApiEnvelope::failure("Room not found"),
            }
        };
        self.pause(&format!("update_room_status:{room_number}")).await;
        Ok(ack)
    }

    async fn bulk_update_room_status(
        &self,
        _hotel_id: &str,
        updates: &[RoomUpdate],
    ) -> DomainResult<ApiEnvelope<RoomTypesPayload>> {
        let mut state = self.enter("bulk_update_room_status")?;
        for update in updates {
            for room in state.settings.room_types.iter_mut().flat_map(|rt| rt.rooms.iter_mut()) {
                if room.room_number == update.room_number {
                    room.status = update.status;
                }
            }
        }
        Ok(room_types_envelope(&state.settings))
    }
}

/// In-memory [`PhoneMemory`].
#[derive(Default)]
pub struct MemoryPhones {
    phone: Mutex<Option<String>>,
}

impl MemoryPhones {
    pub fn with_phone(phone: &str) -> Self {
        Self { phone: Mutex::new(Some(phone.to_string())) }
    }

    pub fn current(&self) -> Option<String> {
        self.phone.lock().clone()
    }
}

#[async_trait]
impl PhoneMemory for MemoryPhones {
    async fn remembered_phone(&self) -> DomainResult<Option<String>> {
        Ok(self.phone.lock().clone())
    }

    async fn remember_phone(&self, phone: &str) -> DomainResult<()> {
        *self.phone.lock() = Some(phone.to_string());
        Ok(())
    }

    async fn forget_phone(&self) -> DomainResult<()> {
        *self.phone.lock() = None;
        Ok(())
    }
}
