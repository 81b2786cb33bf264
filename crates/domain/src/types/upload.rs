//! Multipart payloads

use std::fmt;

use serde::Serialize;

/// One binary part of a multipart payload.
#[derive(Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), mime_type: mime_type.into(), bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for FileAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileAttachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Transport-agnostic multipart form: ordered text fields plus named file
/// parts. Repeated part names form arrays on the server (`photos`,
/// `hygienePics`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, FileAttachment)>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn file(mut self, name: impl Into<String>, attachment: FileAttachment) -> Self {
        self.files.push((name.into(), attachment));
        self
    }

    #[must_use]
    pub fn files(self, name: &str, attachments: impl IntoIterator<Item = FileAttachment>) -> Self {
        attachments.into_iter().fold(self, |form, attachment| form.file(name, attachment))
    }

    /// Bytes progress is measured against.
    pub fn total_file_bytes(&self) -> u64 {
        self.files.iter().map(|(_, f)| f.bytes.len() as u64).sum()
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    /// Form carrying only `photos[]` parts.
    pub fn photos(photos: impl IntoIterator<Item = FileAttachment>) -> Self {
        Self::new().files("photos", photos)
    }
}

/// Hotel registration submitted by a prospective partner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRegistration {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub business_address: String,
    pub gst: String,
    pub aadhar: String,
    #[serde(skip)]
    pub hygiene_pics: Vec<FileAttachment>,
    #[serde(skip)]
    pub view360: Vec<FileAttachment>,
}

impl HotelRegistration {
    pub fn to_form(&self) -> UploadForm {
        UploadForm::new()
            .text("name", &self.name)
            .text("phone", &self.phone)
            .text("address", &self.address)
            .text("businessAddress", &self.business_address)
            .text("gst", &self.gst)
            .text("aadhar", &self.aadhar)
            .files("hygienePics", self.hygiene_pics.iter().cloned())
            .files("view360", self.view360.iter().cloned())
    }
}

/// Room type to add to a hotel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewRoomType {
    pub name: String,
    pub hourly_price: f64,
    pub room_count: u32,
    pub photos: Vec<FileAttachment>,
}

impl NewRoomType {
    pub fn to_form(&self) -> UploadForm {
        UploadForm::new()
            .text("name", self.name.trim())
            .text("hourlyPrice", self.hourly_price.to_string())
            .text("roomCount", self.room_count.to_string())
            .files("photos", self.photos.iter().cloned())
    }
}
