use poem_openapi::Object;

use crate::presentation::models::ThemeKind;

#[derive(Object, Debug)]
pub struct AddRecipientRequestDto {
    pub handle: String,
}

#[derive(Object, Debug)]
pub struct UpdateSettingsRequestDto {
    pub theme: Option<ThemeKind>,
    pub hours: Option<u32>,
    pub minutes: Option<u32>,
    pub seconds: Option<u32>,
}
