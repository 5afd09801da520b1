use chrono::NaiveDate;
use serde::Deserialize;

use super::photo::{self, ValidPhoto};
use crate::errors::ServiceError;

/// Place record as stored.
pub type Place = models::place::Model;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Create-place input (the wishlist form).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPlaceInput {
    pub name: String,
    #[serde(default)]
    pub visited: bool,
}

/// Raw photo bytes as received from the client.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub enum PhotoChange {
    #[default]
    Keep,
    Replace(PhotoUpload),
    Clear,
}

/// Partial update of a place's trip details.
///
/// `None` leaves a field untouched; an empty string clears it.
#[derive(Debug, Clone, Default)]
pub struct PlaceDetailsUpdate {
    pub notes: Option<String>,
    pub date_visited: Option<String>,
    pub photo: PhotoChange,
}

#[derive(Debug)]
pub enum ValidatedPhoto {
    Keep,
    Replace(ValidPhoto),
    Clear,
}

/// Update after validation; nothing here can fail any more.
#[derive(Debug)]
pub struct ValidatedDetails {
    pub notes: Option<Option<String>>,
    pub date_visited: Option<Option<NaiveDate>>,
    pub photo: ValidatedPhoto,
}

impl PlaceDetailsUpdate {
    pub fn validate(self, max_photo_bytes: usize) -> Result<ValidatedDetails, ServiceError> {
        let notes = self.notes.map(|n| {
            let n = n.trim().to_string();
            if n.is_empty() { None } else { Some(n) }
        });

        let date_visited = match self.date_visited {
            None => None,
            Some(raw) => Some(parse_date(&raw)?),
        };

        let photo = match self.photo {
            PhotoChange::Keep => ValidatedPhoto::Keep,
            PhotoChange::Clear => ValidatedPhoto::Clear,
            PhotoChange::Replace(upload) => ValidatedPhoto::Replace(photo::validate_photo(upload.bytes, max_photo_bytes)?),
        };

        Ok(ValidatedDetails { notes, date_visited, photo })
    }
}

/// Empty input clears the date; anything else must be `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>, ServiceError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| ServiceError::Validation(format!("enter a valid date (YYYY-MM-DD), got {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_and_blank() {
        assert_eq!(parse_date("2024-05-17").unwrap(), NaiveDate::from_ymd_opt(2024, 5, 17));
        assert_eq!(parse_date("  ").unwrap(), None);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(matches!(parse_date("17/05/2024"), Err(ServiceError::Validation(_))));
        assert!(matches!(parse_date("2024-02-30"), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn untouched_fields_stay_none() {
        let v = PlaceDetailsUpdate::default().validate(1024).unwrap();
        assert!(v.notes.is_none());
        assert!(v.date_visited.is_none());
        assert!(matches!(v.photo, ValidatedPhoto::Keep));
    }

    #[test]
    fn blank_notes_clear() {
        let v = PlaceDetailsUpdate { notes: Some("   ".into()), ..Default::default() }.validate(1024).unwrap();
        assert_eq!(v.notes, Some(None));
    }

    #[test]
    fn invalid_photo_fails_whole_update() {
        let upd = PlaceDetailsUpdate {
            notes: Some("fine".into()),
            date_visited: Some("2024-01-01".into()),
            photo: PhotoChange::Replace(PhotoUpload { bytes: b"not an image".to_vec() }),
        };
        assert!(matches!(upd.validate(1024), Err(ServiceError::Validation(_))));
    }
}
