//! Form validation rules
//!
//! Every check here runs before a request is built, so a rejected form never
//! reaches the network. Normalising validators return the value the backend
//! should receive (bare 10-digit phone, upper-cased GSTIN, ungrouped Aadhar).
//!
//! ```
//! use partnerdesk_core::validation::normalize_phone;
//!
//! assert_eq!(normalize_phone("+91 98765-43210").unwrap(), "9876543210");
//! assert!(normalize_phone("12345").is_err());
//! ```

use once_cell::sync::Lazy;
use partnerdesk_common::validation::{
    CollectionValidator, RangeValidator, StringValidator, Validator,
};
use partnerdesk_domain::constants::MIN_PASSWORD_LENGTH;
use partnerdesk_domain::{
    FileAttachment, HotelRegistration, NewRoomType, PartnerDeskError, Result, RoomUpdate,
};
use regex::Regex;

static MOBILE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[6-9]\d{9}$").expect("MOBILE_NUMBER should compile - this is a bug")
});

static GSTIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}[A-Z]{5}\d{4}[A-Z][1-9A-Z]Z[0-9A-Z]$")
        .expect("GSTIN should compile - this is a bug")
});

static AADHAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4} ?\d{4} ?\d{4}$").expect("AADHAR should compile - this is a bug")
});

pub const PHONE_MESSAGE: &str = "Please enter a valid 10-digit mobile number";
pub const PASSWORD_MISSING_MESSAGE: &str = "Please enter a password";
pub const GST_MESSAGE: &str = "Please enter a valid 15-character GST number";
pub const AADHAR_MESSAGE: &str = "Aadhar number must be 12 digits";

/// Strip separators and the optional `+91`/`91` country prefix, then require
/// a 10-digit Indian mobile number.
pub fn normalize_phone(input: &str) -> Result<String> {
    let compact: String = input.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    let compact = compact.as_str();
    let local = match compact.strip_prefix("+91") {
        Some(rest) => rest,
        None if compact.len() == 12 => compact.strip_prefix("91").unwrap_or(compact),
        None => compact,
    };

    if MOBILE_NUMBER.is_match(local) {
        Ok(local.to_string())
    } else {
        Err(PartnerDeskError::validation("phone", PHONE_MESSAGE))
    }
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(PartnerDeskError::validation("password", PASSWORD_MISSING_MESSAGE));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PartnerDeskError::validation(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters long"),
        ));
    }
    Ok(())
}

pub fn normalize_gst(input: &str) -> Result<String> {
    let gst = input.trim().to_uppercase();
    if GSTIN.is_match(&gst) {
        Ok(gst)
    } else {
        Err(PartnerDeskError::validation("gst", GST_MESSAGE))
    }
}

pub fn normalize_aadhar(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if AADHAR.is_match(trimmed) {
        Ok(trimmed.replace(' ', ""))
    } else {
        Err(PartnerDeskError::validation("aadhar", AADHAR_MESSAGE))
    }
}

/// Check every registration field and return the normalised registration.
///
/// All failing fields are reported together.
pub fn validate_registration(registration: &HotelRegistration) -> Result<HotelRegistration> {
    let required = StringValidator::new().not_empty().message("This field is required");
    let mut validator = Validator::new();
    validator
        .validate_field("name", registration.name.as_str(), &required)
        .validate_field("address", registration.address.as_str(), &required)
        .validate_field("businessAddress", registration.business_address.as_str(), &required);

    let mut normalized = registration.clone();
    normalized.name = registration.name.trim().to_string();
    normalized.address = registration.address.trim().to_string();
    normalized.business_address = registration.business_address.trim().to_string();

    match normalize_phone(&registration.phone) {
        Ok(phone) => normalized.phone = phone,
        Err(_) => {
            validator.add_error("phone", PHONE_MESSAGE);
        }
    }
    match normalize_gst(&registration.gst) {
        Ok(gst) => normalized.gst = gst,
        Err(_) => {
            validator.add_error("gst", GST_MESSAGE);
        }
    }
    match normalize_aadhar(&registration.aadhar) {
        Ok(aadhar) => normalized.aadhar = aadhar,
        Err(_) => {
            validator.add_error("aadhar", AADHAR_MESSAGE);
        }
    }

    validator.finish()?;
    Ok(normalized)
}

pub fn validate_new_room_type(room_type: &NewRoomType) -> Result<()> {
    let mut validator = Validator::new();
    validator
        .validate_field(
            "name",
            room_type.name.as_str(),
            &StringValidator::new().not_empty().message("Room type name is required"),
        )
        .validate_field("roomCount", &room_type.room_count, &RangeValidator::new().min(1u32));

    if !room_type.hourly_price.is_finite() || room_type.hourly_price <= 0.0 {
        validator.add_error("hourlyPrice", "Hourly price must be greater than 0");
    }

    validator.finish()?;
    Ok(())
}

pub fn validate_photos(photos: &[FileAttachment]) -> Result<()> {
    if photos.is_empty() {
        return Err(PartnerDeskError::validation("photos", "Select at least one photo"));
    }
    if let Some(empty) = photos.iter().find(|p| p.is_empty()) {
        return Err(PartnerDeskError::validation(
            "photos",
            format!("{} is empty", empty.file_name),
        ));
    }
    Ok(())
}

/// At least one update and no room number listed twice.
pub fn validate_bulk_updates(updates: &[RoomUpdate]) -> Result<()> {
    let numbers: Vec<&str> = updates.iter().map(|u| u.room_number.as_str()).collect();
    let mut validator = Validator::new();
    validator.validate_field(
        "roomUpdates",
        numbers.as_slice(),
        &CollectionValidator::new().min_size(1).unique_items(),
    );
    validator.finish()?;
    Ok(())
}
