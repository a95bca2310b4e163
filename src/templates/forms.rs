//! New/edit pages for venues and artists, and the new show page.

use maud::{html, Markup};

use super::components::{
    checkbox_field, multi_select_field, select_field, submit_button, text_field,
};
use super::layout::base_layout;
use crate::db::enums::{Genre, UsState};
use crate::flash::FlashMessage;
use crate::forms::{ArtistForm, FormErrors, ShowForm, VenueForm};

/// Whether a form creates a record or edits the one with the given id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i32),
}

fn state_options() -> Vec<&'static str> {
    UsState::ALL.iter().map(|s| s.as_str()).collect()
}

fn genre_options() -> Vec<&'static str> {
    Genre::ALL.iter().map(|g| g.as_str()).collect()
}

fn form_shell(heading: &str, action: &str, button: &str, fields: Markup) -> Markup {
    html! {
        div class="max-w-2xl mx-auto bg-white rounded-lg shadow-md p-8" {
            h1 class="text-2xl font-bold text-gray-900 mb-6" { (heading) }
            form method="post" action=(action) class="space-y-5" novalidate {
                (fields)
                div class="pt-2" {
                    (submit_button(button))
                }
            }
        }
    }
}

pub fn venue_form_page(
    mode: FormMode,
    form: &VenueForm,
    errors: &FormErrors,
    flash: Option<&FlashMessage>,
) -> Markup {
    let (title, heading, action, button) = match mode {
        FormMode::Create => (
            "New venue".to_string(),
            "List a new venue".to_string(),
            "/venues/create".to_string(),
            "Create Venue",
        ),
        FormMode::Edit(id) => (
            "Edit venue".to_string(),
            format!("Edit venue {}", form.name),
            format!("/venues/{}/edit", id),
            "Save Venue",
        ),
    };

    base_layout(
        &title,
        flash,
        form_shell(
            &heading,
            &action,
            button,
            html! {
                (text_field("Name", "name", &form.name, "Venue name", errors.get("name")))
                div class="grid grid-cols-2 gap-4" {
                    (text_field("City", "city", &form.city, "City", errors.get("city")))
                    (select_field("State", "state", &state_options(), &form.state, errors.get("state")))
                }
                (text_field("Address", "address", &form.address, "Street address", errors.get("address")))
                (text_field("Phone", "phone", &form.phone, "xxx-xxx-xxxx", errors.get("phone")))
                (multi_select_field("Genres", "genres", &genre_options(), &form.genres, errors.get("genres")))
                (text_field("Image link", "image_link", &form.image_link, "https://", errors.get("image_link")))
                (text_field("Facebook link", "facebook_link", &form.facebook_link, "https://facebook.com/", errors.get("facebook_link")))
                (text_field("Website link", "website_link", &form.website_link, "https://", errors.get("website_link")))
                (checkbox_field("Looking for talent", "seeking_talent", form.seeking_talent))
                (text_field("Seeking description", "seeking_description", &form.seeking_description, "What kind of acts are you after?", None))
            },
        ),
    )
}

pub fn artist_form_page(
    mode: FormMode,
    form: &ArtistForm,
    errors: &FormErrors,
    flash: Option<&FlashMessage>,
) -> Markup {
    let (title, heading, action, button) = match mode {
        FormMode::Create => (
            "New artist".to_string(),
            "List a new artist".to_string(),
            "/artists/create".to_string(),
            "Create Artist",
        ),
        FormMode::Edit(id) => (
            "Edit artist".to_string(),
            format!("Edit artist {}", form.name),
            format!("/artists/{}/edit", id),
            "Save Artist",
        ),
    };

    base_layout(
        &title,
        flash,
        form_shell(
            &heading,
            &action,
            button,
            html! {
                (text_field("Name", "name", &form.name, "Artist name", errors.get("name")))
                div class="grid grid-cols-2 gap-4" {
                    (text_field("City", "city", &form.city, "City", errors.get("city")))
                    (select_field("State", "state", &state_options(), &form.state, errors.get("state")))
                }
                (text_field("Phone", "phone", &form.phone, "xxx-xxx-xxxx", errors.get("phone")))
                (multi_select_field("Genres", "genres", &genre_options(), &form.genres, errors.get("genres")))
                (text_field("Image link", "image_link", &form.image_link, "https://", errors.get("image_link")))
                (text_field("Facebook link", "facebook_link", &form.facebook_link, "https://facebook.com/", errors.get("facebook_link")))
                (text_field("Website link", "website_link", &form.website_link, "https://", errors.get("website_link")))
                (checkbox_field("Looking for venues", "seeking_venue", form.seeking_venue))
                (text_field("Seeking description", "seeking_description", &form.seeking_description, "Where would you like to play?", None))
            },
        ),
    )
}

pub fn show_form_page(form: &ShowForm, errors: &FormErrors, flash: Option<&FlashMessage>) -> Markup {
    base_layout(
        "New show",
        flash,
        form_shell(
            "List a new show",
            "/shows/create",
            "Create Show",
            html! {
                (text_field("Artist ID", "artist_id", &form.artist_id, "ID of the performing artist", errors.get("artist_id")))
                (text_field("Venue ID", "venue_id", &form.venue_id, "ID of the hosting venue", errors.get("venue_id")))
                (text_field("Start time", "start_time", &form.start_time, "YYYY-MM-DD HH:MM:SS", errors.get("start_time")))
            },
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_mode_posts_back_to_record() {
        let form = VenueForm {
            name: "Park Square Live Music & Coffee".to_string(),
            ..Default::default()
        };
        let html = venue_form_page(FormMode::Edit(3), &form, &FormErrors::new(), None).into_string();

        assert!(html.contains(r#"action="/venues/3/edit""#));
        assert!(html.contains("Park Square Live Music &amp; Coffee"));
    }

    #[test]
    fn test_errors_render_inline() {
        let mut errors = FormErrors::new();
        errors.add("artist_id", "No artist with ID 9.");
        let html = show_form_page(&ShowForm::default(), &errors, None).into_string();

        assert!(html.contains("No artist with ID 9."));
    }

    #[test]
    fn test_prefilled_genres_are_selected() {
        let form = ArtistForm {
            genres: vec!["R&B".to_string()],
            ..Default::default()
        };
        let html = artist_form_page(FormMode::Create, &form, &FormErrors::new(), None).into_string();

        assert!(html.contains(r#"<option value="R&amp;B" selected>"#));
    }
}
