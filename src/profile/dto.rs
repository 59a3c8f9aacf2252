use serde::Deserialize;
use time::Date;

/// All fields optional; only present fields are written.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<Date>,
    pub height_cm: Option<f64>,
    pub activity_level: Option<String>,
}
