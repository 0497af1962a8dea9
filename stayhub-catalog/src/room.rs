use stayhub_core::{DateRange, Host, Identity, ImageUpload, NewRoom, Price};

use crate::{CatalogError, CatalogResult};

/// Raw input of the "add room" form.
#[derive(Debug, Clone)]
pub struct NewRoomForm {
    pub location: String,
    pub title: String,
    pub dates: DateRange,
    /// Price per night as typed, e.g. `"120"` or `"99.50"`.
    pub price: String,
    pub guests: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub category: String,
    pub description: String,
    pub image: ImageUpload,
}

impl NewRoomForm {
    /// Check the form before anything is uploaded.
    pub fn validate(&self) -> CatalogResult<Price> {
        for (field, value) in [
            ("location", &self.location),
            ("title", &self.title),
            ("category", &self.category),
        ] {
            if value.trim().is_empty() {
                return Err(CatalogError::InvalidForm(format!("{} is required", field)));
            }
        }
        if self.image.bytes.is_empty() {
            return Err(CatalogError::InvalidForm("image is required".to_string()));
        }
        parse_price(&self.price)
    }

    /// Build the room payload once the image is hosted.
    pub fn into_room(self, price: Price, image_url: String, host: &Identity) -> NewRoom {
        NewRoom {
            location: self.location,
            title: self.title,
            from: self.dates.from,
            to: self.dates.to,
            price,
            guests: self.guests,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            category: self.category,
            description: self.description,
            image: image_url,
            host: Host {
                name: host.display_name.clone(),
                image: host.photo_url.clone(),
                email: host.email.clone(),
            },
        }
    }
}

/// Parse a typed price into minor units. At most two decimals, never rounded.
pub fn parse_price(input: &str) -> CatalogResult<Price> {
    let invalid = || CatalogError::InvalidForm(format!("invalid price: {:?}", input));
    let input = input.trim();

    let (major, minor) = match input.split_once('.') {
        Some((major, minor)) => (major, minor),
        None => (input, ""),
    };
    if major.is_empty() || !major.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if minor.len() > 2 || !minor.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let major: i64 = major.parse().map_err(|_| invalid())?;
    let minor: i64 = match minor.len() {
        0 => 0,
        1 => minor.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => minor.parse().map_err(|_| invalid())?,
    };
    let cents = major
        .checked_mul(100)
        .and_then(|c| c.checked_add(minor))
        .ok_or_else(invalid)?;

    let price = Price::from_minor(cents);
    if !price.is_positive() {
        return Err(CatalogError::InvalidForm("price must be positive".to_string()));
    }
    Ok(price)
}
