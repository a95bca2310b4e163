use crate::db::{
    entities::venues,
    enums::{Genre, UsState},
};

use super::{
    genre_list, max_length, optional, optional_phone, optional_url, required, us_state, FormData,
    FormErrors, MAX_LONG_LEN, MAX_SHORT_LEN,
};

/// Raw venue form values, kept as submitted so the page can be re-rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// A venue that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: UsState,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<Genre>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            name: data.text("name"),
            city: data.text("city"),
            state: data.text("state"),
            address: data.text("address"),
            phone: data.text("phone"),
            genres: data.all("genres"),
            image_link: data.text("image_link"),
            facebook_link: data.text("facebook_link"),
            website_link: data.text("website_link"),
            seeking_talent: data.checked("seeking_talent"),
            seeking_description: data.text("seeking_description"),
        }
    }

    /// Prefill for the edit page.
    pub fn from_model(venue: &venues::Model) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone().unwrap_or_default(),
            genres: venue.genre_list(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            website_link: venue.website_link.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<VenueInput, FormErrors> {
        let mut errors = FormErrors::new();

        let name = required(&mut errors, "name", &self.name);
        let city = required(&mut errors, "city", &self.city);
        max_length(&mut errors, "city", &city, MAX_SHORT_LEN);
        let state = us_state(&mut errors, &self.state);
        let address = required(&mut errors, "address", &self.address);
        max_length(&mut errors, "address", &address, MAX_SHORT_LEN);
        let phone = optional_phone(&mut errors, &self.phone);
        let genres = genre_list(&mut errors, &self.genres);
        let image_link = optional_url(&mut errors, "image_link", &self.image_link);
        let facebook_link = optional_url(&mut errors, "facebook_link", &self.facebook_link);
        let website_link = optional_url(&mut errors, "website_link", &self.website_link);
        max_length(
            &mut errors,
            "seeking_description",
            &self.seeking_description,
            MAX_LONG_LEN,
        );

        match state {
            Some(state) if errors.is_empty() => Ok(VenueInput {
                name,
                city,
                state,
                address,
                phone,
                genres,
                image_link,
                facebook_link,
                website_link,
                seeking_talent: self.seeking_talent,
                seeking_description: optional(&self.seeking_description),
            }),
            _ => Err(errors),
        }
    }
}
