//! Command handlers against a mock backend.

mod support;

use clap::Parser;
use partnerdesk_app::commands::auth::{PASSWORD_NOT_SET_MESSAGE, PHONE_REQUIRED_MESSAGE};
use partnerdesk_app::{cli::HotelAction, commands, dispatch, Cli};
use partnerdesk_core::auth::login_flow::{NOT_ADMIN_MESSAGE, PASSWORD_SET_MESSAGE};
use partnerdesk_core::PhoneMemory;
use partnerdesk_domain::{PartnerDeskError, RoomStatus};
use serde_json::json;
use support::{signed_in_context, signed_out_context, PASSWORD, PHONE};
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_check_hotel(server: &MockServer, first_login: bool) {
    Mock::given(method("POST"))
        .and(path("/auth/check-hotel"))
        .and(body_json(json!({"phone": PHONE})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"_id": "h1", "name": "Hotel Sunrise", "isFirstLogin": first_login}
        })))
        .mount(server)
        .await;
}

fn login_response(role: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "token": "access-1",
        "refreshToken": "refresh-1",
        "data": {"_id": "h1", "name": "Hotel Sunrise", "phone": PHONE, "role": role}
    }))
}

fn settings_body() -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "hotelStatus": true,
            "roomTypes": [{
                "_id": "rt1",
                "name": "Deluxe",
                "hourlyPrice": 499,
                "roomCount": 2,
                "rooms": [
                    {"roomNumber": 101, "status": "booked"},
                    {"roomNumber": "102", "status": "vacant"}
                ],
                "photos": []
            }]
        }
    })
}

async fn mount_settings(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/hotel-operations/h1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(settings_body()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn partner_login_stores_session_and_remembers_phone() {
    let server = MockServer::start().await;
    mount_check_hotel(&server, false).await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"phone": PHONE, "password": PASSWORD})))
        .respond_with(login_response("hotel"))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = signed_out_context(&server);

    let output = commands::login(&ctx, Some(PHONE), PASSWORD, false).await.unwrap();

    assert!(output.starts_with("Welcome, Hotel Sunrise"), "{output}");
    assert!(output.contains("Hotel id: h1"));
    assert!(ctx.tokens.is_authenticated());
    assert_eq!(ctx.tokens.remembered_phone().await.unwrap().as_deref(), Some(PHONE));
    assert_eq!(commands::whoami(&ctx).await.unwrap(), format!("Signed in (phone {PHONE})"));
}

#[tokio::test]
async fn first_login_must_set_password_before_login() {
    let server = MockServer::start().await;
    mount_check_hotel(&server, true).await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(login_response("hotel"))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = signed_out_context(&server);

    let err = commands::login(&ctx, Some(PHONE), PASSWORD, false).await.unwrap_err();

    assert_eq!(err, PartnerDeskError::validation("password", PASSWORD_NOT_SET_MESSAGE));
    assert!(!ctx.tokens.is_authenticated());
}

#[tokio::test]
async fn set_password_on_first_login() {
    let server = MockServer::start().await;
    mount_check_hotel(&server, true).await;
    Mock::given(method("POST"))
        .and(path("/auth/set-password"))
        .and(body_json(json!({"phone": PHONE, "password": PASSWORD})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = signed_out_context(&server);

    let output = commands::set_password(&ctx, Some(PHONE), PASSWORD).await.unwrap();

    assert_eq!(output, PASSWORD_SET_MESSAGE);
}

#[tokio::test]
async fn missing_phone_never_reaches_the_network() {
    let server = MockServer::start().await;

    let ctx = signed_out_context(&server);

    let err = commands::check_hotel(&ctx, None).await.unwrap_err();

    assert_eq!(err, PartnerDeskError::validation("phone", PHONE_REQUIRED_MESSAGE));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn check_hotel_uses_remembered_phone() {
    let server = MockServer::start().await;
    mount_check_hotel(&server, false).await;

    let ctx = signed_out_context(&server);
    ctx.tokens.remember_phone(PHONE).await.unwrap();

    let output = commands::check_hotel(&ctx, None).await.unwrap();

    assert_eq!(output, "Hotel Sunrise: password set, ready to log in");
}

#[tokio::test]
async fn admin_login_refuses_hotel_accounts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(login_response("hotel"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = signed_out_context(&server);

    let err = commands::login(&ctx, Some(PHONE), PASSWORD, true).await.unwrap_err();

    assert_eq!(err, PartnerDeskError::Rejected(NOT_ADMIN_MESSAGE.to_string()));
    assert!(!ctx.tokens.is_authenticated());
}

#[tokio::test]
async fn logout_discards_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = signed_in_context(&server).await;

    assert_eq!(commands::logout(&ctx).await.unwrap(), "Signed out");
    assert!(!ctx.tokens.is_authenticated());
    assert_eq!(commands::whoami(&ctx).await.unwrap(), "Not signed in");
}

#[tokio::test]
async fn settings_lists_room_types() {
    let server = MockServer::start().await;
    mount_settings(&server).await;

    let ctx = signed_in_context(&server).await;

    let output = commands::settings(&ctx, "h1").await.unwrap();

    assert_eq!(
        output,
        "Hotel is open\nDeluxe: 2 rooms at 499/hour (1 vacant, 1 booked, 0 maintenance, 0 photos)"
    );
}

#[tokio::test]
async fn toggle_closes_an_open_hotel() {
    let server = MockServer::start().await;
    mount_settings(&server).await;
    Mock::given(method("PUT"))
        .and(path("/hotel-operations/h1/status"))
        .and(body_json(json!({"hotelStatus": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = signed_in_context(&server).await;

    let output = commands::hotel_status(&ctx, "h1", HotelAction::Toggle).await.unwrap();

    assert_eq!(output, "Hotel is now closed");
}

#[tokio::test]
async fn rejected_status_change_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/hotel-operations/h1/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Hotel is suspended"})),
        )
        .mount(&server)
        .await;

    let ctx = signed_in_context(&server).await;

    let err = commands::hotel_status(&ctx, "h1", HotelAction::Open).await.unwrap_err();

    assert_eq!(err, PartnerDeskError::Rejected("Hotel is suspended".to_string()));
}

#[tokio::test]
async fn room_status_sends_single_update() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/hotel-operations/h1/rooms/101/status"))
        .and(body_json(json!({"status": "maintenance"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = signed_in_context(&server).await;

    let output =
        commands::room_status(&ctx, "h1", "101", RoomStatus::Maintenance).await.unwrap();

    assert_eq!(output, "Room 101 is now maintenance");
}

#[tokio::test]
async fn bulk_status_updates_every_room_of_the_type() {
    let server = MockServer::start().await;
    mount_settings(&server).await;
    Mock::given(method("PUT"))
        .and(path("/hotel-operations/h1/rooms/bulk-status"))
        .and(body_json(json!({"roomUpdates": [
            {"roomNumber": "101", "status": "vacant"},
            {"roomNumber": "102", "status": "vacant"}
        ]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"roomTypes": [{
                "name": "Deluxe",
                "hourlyPrice": 499,
                "roomCount": 2,
                "rooms": [
                    {"roomNumber": "101", "status": "vacant"},
                    {"roomNumber": "102", "status": "vacant"}
                ]
            }]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = signed_in_context(&server).await;

    let output = commands::bulk_status(&ctx, "h1", "Deluxe", RoomStatus::Vacant).await.unwrap();

    assert!(output.starts_with("2 Deluxe rooms set to vacant"), "{output}");
    assert!(output.contains("(2 vacant, 0 booked, 0 maintenance, 0 photos)"));
}

#[tokio::test]
async fn bulk_status_for_unknown_room_type_is_rejected_locally() {
    let server = MockServer::start().await;
    mount_settings(&server).await;

    let ctx = signed_in_context(&server).await;

    let err = commands::bulk_status(&ctx, "h1", "Suite", RoomStatus::Booked).await.unwrap_err();

    assert!(matches!(err, PartnerDeskError::Validation { ref field, .. } if field == "roomType"));
}

#[tokio::test]
async fn add_photos_uploads_files_from_disk() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hotel-operations/h1/room-types/Deluxe/photos"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"roomTypes": [{
                "name": "Deluxe",
                "hourlyPrice": 499,
                "roomCount": 2,
                "photos": ["https://cdn.example/1.jpg"]
            }]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let photo = dir.path().join("lobby.jpg");
    std::fs::write(&photo, vec![0xFF_u8; 2048]).unwrap();

    let ctx = signed_in_context(&server).await;

    let output = commands::add_photos(&ctx, "h1", "Deluxe", &[photo]).await.unwrap();

    assert!(output.ends_with("1 photos)"), "{output}");
    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("filename=\"lobby.jpg\""));
    assert!(body.contains("image/jpeg"));
}

#[tokio::test]
async fn missing_photo_file_is_a_validation_error() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let ctx = signed_in_context(&server).await;

    let missing = dir.path().join("gone.jpg");
    let err = commands::add_photos(&ctx, "h1", "Deluxe", &[missing]).await.unwrap_err();

    assert!(matches!(err, PartnerDeskError::Validation { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_registration_is_not_submitted() {
    let server = MockServer::start().await;

    let ctx = signed_out_context(&server);
    let cli = Cli::try_parse_from([
        "partnerdesk",
        "register",
        "--name",
        "Hotel Sunrise",
        "--phone",
        "12345",
        "--address",
        "1 MG Road",
        "--business-address",
        "1 MG Road",
        "--gst",
        "22AAAAA0000A1Z5",
        "--aadhar",
        "1234 5678 9012",
    ])
    .unwrap();

    let err = dispatch(&ctx, &cli.command).await.unwrap_err();

    assert!(matches!(err, PartnerDeskError::Validation { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn registration_is_uploaded_as_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hotels/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let pic = dir.path().join("kitchen.png");
    std::fs::write(&pic, b"png-bytes").unwrap();

    let ctx = signed_out_context(&server);
    let cli = Cli::try_parse_from([
        "partnerdesk",
        "register",
        "--name",
        "Hotel Sunrise",
        "--phone",
        "+91 98765 43210",
        "--address",
        "1 MG Road",
        "--business-address",
        "1 MG Road",
        "--gst",
        "22aaaaa0000a1z5",
        "--aadhar",
        "1234 5678 9012",
        "--hygiene-pic",
        pic.to_str().unwrap(),
    ])
    .unwrap();

    let output = dispatch(&ctx, &cli.command).await.unwrap();

    assert!(output.starts_with("Your details have been received"));
    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("9876543210"));
    assert!(body.contains("22AAAAA0000A1Z5"));
    assert!(body.contains("123456789012"));
    assert!(body.contains("name=\"hygienePics\""));
}
