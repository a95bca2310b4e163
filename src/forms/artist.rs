use crate::db::{
    entities::artists,
    enums::{Genre, UsState},
};

use super::{
    genre_list, max_length, optional, optional_phone, optional_url, required, us_state, FormData,
    FormErrors, MAX_LONG_LEN, MAX_SHORT_LEN,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: UsState,
    pub phone: Option<String>,
    pub genres: Vec<Genre>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            name: data.text("name"),
            city: data.text("city"),
            state: data.text("state"),
            phone: data.text("phone"),
            genres: data.all("genres"),
            image_link: data.text("image_link"),
            facebook_link: data.text("facebook_link"),
            website_link: data.text("website_link"),
            seeking_venue: data.checked("seeking_venue"),
            seeking_description: data.text("seeking_description"),
        }
    }

    pub fn from_model(artist: &artists::Model) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            genres: artist.genre_list(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            website_link: artist.website_link.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ArtistInput, FormErrors> {
        let mut errors = FormErrors::new();

        let name = required(&mut errors, "name", &self.name);
        let city = required(&mut errors, "city", &self.city);
        max_length(&mut errors, "city", &city, MAX_SHORT_LEN);
        let state = us_state(&mut errors, &self.state);
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
            Some(state) if errors.is_empty() => Ok(ArtistInput {
                name,
                city,
                state,
                phone,
                genres,
                image_link,
                facebook_link,
                website_link,
                seeking_venue: self.seeking_venue,
                seeking_description: optional(&self.seeking_description),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{INVALID_CHOICE, REQUIRED};

    fn valid_form() -> ArtistForm {
        ArtistForm {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "326.123.5000".to_string(),
            genres: vec!["Rock n Roll".to_string()],
            image_link: "https://images.example.com/gnp.jpg".to_string(),
            facebook_link: String::new(),
            website_link: "https://www.gunsnpetalsband.com".to_string(),
            seeking_venue: true,
            seeking_description: String::new(),
        }
    }

    #[test]
    fn test_valid_artist() {
        let input = valid_form().validate().expect("form should validate");

        assert_eq!(input.name, "Guns N Petals");
        assert_eq!(input.genres, vec![Genre::RockNRoll]);
        assert_eq!(input.seeking_description, None);
        assert!(input.seeking_venue);
    }

    #[test]
    fn test_unknown_genre_rejected() {
        let form = ArtistForm {
            genres: vec!["Rock n Roll".to_string(), "Polka".to_string()],
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("genres").unwrap().contains("Polka"));
    }

    #[test]
    fn test_lowercase_state_is_not_a_choice() {
        let form = ArtistForm {
            state: "ca".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap_err().get("state"), Some(INVALID_CHOICE));
    }

    #[test]
    fn test_blank_name_required() {
        let form = ArtistForm {
            name: String::new(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap_err().get("name"), Some(REQUIRED));
    }
}
