//! Multipart form decoding for restaurant writes.
//!
//! Everything stringly-typed about `multipart/form-data` is contained
//! here: `"true"`/`"false"` booleans, JSON-in-a-string category lists,
//! stringly floats for coordinates, repeated file parts. The workflow
//! handlers only ever see typed values.

use std::collections::HashMap;

use axum::extract::multipart::Multipart;

use crate::domain::foundation::FieldIssue;
use crate::domain::restaurant::{RestaurantDraft, RestaurantPatch};

/// Per-file upload ceiling.
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
/// Accepted upload content types.
const ALLOWED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Decoded create request.
#[derive(Debug)]
pub struct CreateForm {
    pub draft: RestaurantDraft,
    pub images: Vec<Vec<u8>>,
}

/// Decoded update request.
#[derive(Debug)]
pub struct UpdateForm {
    pub patch: RestaurantPatch,
    pub new_images: Vec<Vec<u8>>,
    pub images_to_keep: Option<Vec<String>>,
    pub images_to_remove: Option<Vec<String>>,
}

/// Decoding failures; all map to 400 responses.
#[derive(Debug)]
pub enum FormError {
    Malformed(String),
    Validation(Vec<FieldIssue>),
    UnsupportedImageType(String),
    ImageTooLarge,
}

/// Parses a create request.
pub async fn parse_create(multipart: &mut Multipart) -> Result<CreateForm, FormError> {
    let raw = collect(multipart).await?;

    let mut issues = Vec::new();
    let name = required(&raw.fields, "name", &mut issues);
    let address = required(&raw.fields, "address", &mut issues);
    let city = required(&raw.fields, "city", &mut issues);
    let pin_code = required(&raw.fields, "pinCode", &mut issues);
    let phone_number = required(&raw.fields, "phoneNumber", &mut issues);
    let opening_time = required(&raw.fields, "openingTime", &mut issues);
    let closing_time = required(&raw.fields, "closingTime", &mut issues);
    let categories = match optional(&raw.fields, "categories") {
        Some(value) => parse_categories(value),
        None => {
            issues.push(FieldIssue::new("categories", "is required"));
            Vec::new()
        }
    };

    let coordinates = parse_coordinate_pair(&raw.fields)?;
    let offers_delivery = parse_bool_or(&raw.fields, "offersDelivery", false)?;
    let offers_dine_in = parse_bool_or(&raw.fields, "offersDineIn", false)?;
    let offers_pickup = parse_bool_or(&raw.fields, "offersPickup", false)?;

    if !issues.is_empty() {
        return Err(FormError::Validation(issues));
    }

    Ok(CreateForm {
        draft: RestaurantDraft {
            name,
            categories,
            description: optional(&raw.fields, "description").map(String::from),
            address,
            city,
            pin_code,
            coordinates,
            phone_number,
            website: optional(&raw.fields, "website").map(String::from),
            opening_time,
            closing_time,
            offers_delivery,
            offers_dine_in,
            offers_pickup,
        },
        images: raw.images,
    })
}

/// Parses an update request; absent fields stay `None`.
pub async fn parse_update(multipart: &mut Multipart) -> Result<UpdateForm, FormError> {
    let raw = collect(multipart).await?;

    let patch = RestaurantPatch {
        name: optional(&raw.fields, "name").map(String::from),
        categories: optional(&raw.fields, "categories").map(parse_categories),
        description: optional(&raw.fields, "description").map(String::from),
        address: optional(&raw.fields, "address").map(String::from),
        city: optional(&raw.fields, "city").map(String::from),
        pin_code: optional(&raw.fields, "pinCode").map(String::from),
        coordinates: parse_coordinate_pair(&raw.fields)?,
        phone_number: optional(&raw.fields, "phoneNumber").map(String::from),
        website: optional(&raw.fields, "website").map(String::from),
        opening_time: optional(&raw.fields, "openingTime").map(String::from),
        closing_time: optional(&raw.fields, "closingTime").map(String::from),
        offers_delivery: parse_bool_opt(&raw.fields, "offersDelivery")?,
        offers_dine_in: parse_bool_opt(&raw.fields, "offersDineIn")?,
        offers_pickup: parse_bool_opt(&raw.fields, "offersPickup")?,
    };

    Ok(UpdateForm {
        patch,
        new_images: raw.images,
        images_to_keep: raw.images_to_keep,
        images_to_remove: raw.images_to_remove,
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Raw multipart collection
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct RawForm {
    fields: HashMap<String, String>,
    images: Vec<Vec<u8>>,
    images_to_keep: Option<Vec<String>>,
    images_to_remove: Option<Vec<String>>,
}

async fn collect(multipart: &mut Multipart) -> Result<RawForm, FormError> {
    let mut raw = RawForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FormError::Malformed(e.to_string()))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };
        match name.as_str() {
            "images" => {
                let content_type = field.content_type().map(ToString::to_string);
                if !content_type
                    .as_deref()
                    .is_some_and(|ct| ALLOWED_IMAGE_TYPES.contains(&ct))
                {
                    return Err(FormError::UnsupportedImageType(
                        content_type.unwrap_or_else(|| "unknown".to_string()),
                    ));
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| FormError::Malformed(e.to_string()))?;
                if bytes.len() > MAX_IMAGE_BYTES {
                    return Err(FormError::ImageTooLarge);
                }
                raw.images.push(bytes.to_vec());
            }
            "imagesToKeep" => {
                let text = text_of(field).await?;
                raw.images_to_keep
                    .get_or_insert_with(Vec::new)
                    .extend(expand_list_entry(&text));
            }
            "imagesToRemove" => {
                let text = text_of(field).await?;
                raw.images_to_remove
                    .get_or_insert_with(Vec::new)
                    .extend(expand_list_entry(&text));
            }
            _ => {
                let text = text_of(field).await?;
                raw.fields.insert(name, text);
            }
        }
    }

    Ok(raw)
}

async fn text_of(field: axum::extract::multipart::Field<'_>) -> Result<String, FormError> {
    field
        .text()
        .await
        .map_err(|e| FormError::Malformed(e.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════
// Stringly-typed value parsing
// ════════════════════════════════════════════════════════════════════════════

/// A list field arrives either as a JSON array string or as a bare value.
fn expand_list_entry(value: &str) -> Vec<String> {
    serde_json::from_str::<Vec<String>>(value).unwrap_or_else(|_| vec![value.to_string()])
}

fn parse_categories(value: &str) -> Vec<String> {
    expand_list_entry(value)
}

/// Empty strings count as absent (form fields are often submitted blank).
fn optional<'a>(fields: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

fn required(fields: &HashMap<String, String>, key: &str, issues: &mut Vec<FieldIssue>) -> String {
    match optional(fields, key) {
        Some(value) => value.to_string(),
        None => {
            issues.push(FieldIssue::new(key, "is required"));
            String::new()
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, FormError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(FormError::Malformed(format!(
            "{} must be \"true\" or \"false\"",
            key
        ))),
    }
}

fn parse_bool_or(
    fields: &HashMap<String, String>,
    key: &str,
    default: bool,
) -> Result<bool, FormError> {
    match optional(fields, key) {
        Some(value) => parse_bool(key, value),
        None => Ok(default),
    }
}

fn parse_bool_opt(fields: &HashMap<String, String>, key: &str) -> Result<Option<bool>, FormError> {
    optional(fields, key)
        .map(|value| parse_bool(key, value))
        .transpose()
}

fn parse_float(key: &str, value: &str) -> Result<f64, FormError> {
    value
        .parse()
        .map_err(|_| FormError::Malformed(format!("{} must be a number", key)))
}

fn parse_coordinate_pair(
    fields: &HashMap<String, String>,
) -> Result<Option<(f64, f64)>, FormError> {
    match (optional(fields, "latitude"), optional(fields, "longitude")) {
        (Some(lat), Some(lng)) => Ok(Some((
            parse_float("latitude", lat)?,
            parse_float("longitude", lng)?,
        ))),
        (None, None) => Ok(None),
        _ => Err(FormError::Malformed(
            "latitude and longitude must be provided together".to_string(),
        )),
    }
}
