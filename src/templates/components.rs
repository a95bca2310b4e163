use maud::{html, Markup};
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::flash::FlashLevel;
use crate::services::DirectoryEntry;

pub const VENUE_PLACEHOLDER_IMAGE: &str =
    "https://cdn.pixabay.com/photo/2017/08/08/01/22/architecture-2610006_1280.jpg";
pub const ARTIST_PLACEHOLDER_IMAGE: &str =
    "https://cdn.pixabay.com/photo/2015/10/05/22/37/blank-profile-picture-973460_1280.png";

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-indigo-500";
const INPUT_ERROR_CLASS: &str = "w-full px-3 py-2 border border-red-400 rounded-md focus:outline-none focus:ring-2 focus:ring-red-500";

/// e.g. "Sat May 21, 2019 9:30PM"
pub fn format_start_time(start: &DateTimeWithTimeZone) -> String {
    start.format("%a %b %-d, %Y %-I:%M%p").to_string()
}

pub fn notification(message: &str, level: FlashLevel) -> Markup {
    let (bg_color, text_color, icon) = match level {
        FlashLevel::Success => ("bg-green-50", "text-green-800", "✓"),
        FlashLevel::Error => ("bg-red-50", "text-red-800", "✗"),
        FlashLevel::Info => ("bg-blue-50", "text-blue-800", "ℹ"),
    };

    html! {
        div class={(format!("p-4 rounded-md {} {}", bg_color, text_color))} role="alert" {
            div class="flex items-center" {
                span class="font-bold mr-2" { (icon) }
                span { (message) }
            }
        }
    }
}

fn field_error(error: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = error {
            p class="mt-1 text-sm text-red-600" { (message) }
        }
    }
}

fn input_class(error: Option<&str>) -> &'static str {
    if error.is_some() {
        INPUT_ERROR_CLASS
    } else {
        INPUT_CLASS
    }
}

pub fn text_field(
    label: &str,
    name: &str,
    value: &str,
    placeholder: &str,
    error: Option<&str>,
) -> Markup {
    html! {
        div {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" { (label) }
            input
                type="text"
                id=(name)
                name=(name)
                value=(value)
                placeholder=(placeholder)
                class=(input_class(error));
            (field_error(error))
        }
    }
}

pub fn select_field(
    label: &str,
    name: &str,
    options: &[&str],
    selected: &str,
    error: Option<&str>,
) -> Markup {
    html! {
        div {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" { (label) }
            select id=(name) name=(name) class=(input_class(error)) {
                option value="" selected[selected.is_empty()] { "Select…" }
                @for option in options {
                    option value=(option) selected[*option == selected] { (option) }
                }
            }
            (field_error(error))
        }
    }
}

pub fn multi_select_field(
    label: &str,
    name: &str,
    options: &[&str],
    selected: &[String],
    error: Option<&str>,
) -> Markup {
    html! {
        div {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" {
                (label)
                span class="ml-2 text-xs text-gray-500" { "Ctrl+Click to select multiple" }
            }
            select id=(name) name=(name) multiple size="8" class=(input_class(error)) {
                @for option in options {
                    option value=(option) selected[selected.iter().any(|s| s == option)] { (option) }
                }
            }
            (field_error(error))
        }
    }
}

pub fn checkbox_field(label: &str, name: &str, checked: bool) -> Markup {
    html! {
        div class="flex items-center" {
            input type="checkbox" id=(name) name=(name) value="y" checked[checked]
                class="h-4 w-4 text-indigo-600 border-gray-300 rounded";
            label for=(name) class="ml-2 text-sm text-gray-700" { (label) }
        }
    }
}

pub fn submit_button(text: &str) -> Markup {
    html! {
        button
            type="submit"
            class="px-4 py-2 bg-indigo-600 hover:bg-indigo-700 text-white font-semibold rounded-md" {
            (text)
        }
    }
}

pub fn genre_badges(genres: &[String]) -> Markup {
    html! {
        div class="flex flex-wrap gap-2" {
            @for genre in genres {
                span class="px-2 py-1 bg-gray-100 text-gray-700 text-sm rounded" { (genre) }
            }
        }
    }
}

/// Listing row linking to `/{kind}/{id}` with the upcoming show count.
pub fn entry_card(kind: &str, entry: &DirectoryEntry) -> Markup {
    html! {
        a href={(format!("/{}/{}", kind, entry.id))}
          class="entry-card block bg-white rounded-lg shadow-sm p-4 transition" {
            div class="flex justify-between items-center" {
                span class="font-semibold text-gray-900" { (entry.name) }
                span class="text-xs text-gray-500" {
                    (entry.num_upcoming_shows) " upcoming"
                    @if entry.num_upcoming_shows == 1 { " show" } @else { " shows" }
                }
            }
        }
    }
}

pub struct ShowCardData<'a> {
    pub href: String,
    pub title: &'a str,
    pub subtitle: Option<String>,
    pub image_link: &'a str,
    pub start_time: &'a DateTimeWithTimeZone,
}

pub fn show_card(show: &ShowCardData) -> Markup {
    html! {
        a href=(show.href) class="show-card entry-card block bg-white rounded-lg shadow-md overflow-hidden" {
            img src=(show.image_link) alt=(show.title) class="w-full" loading="lazy";
            div class="p-4" {
                h4 class="font-semibold text-gray-900 truncate" title=(show.title) { (show.title) }
                @if let Some(subtitle) = &show.subtitle {
                    p class="text-sm text-gray-600 truncate" { (subtitle) }
                }
                p class="text-xs text-gray-500 mt-1" { (format_start_time(show.start_time)) }
            }
        }
    }
}

pub fn search_bar(action: &str, placeholder: &str, term: &str) -> Markup {
    html! {
        form method="post" action=(action) class="mb-6" {
            input
                type="search"
                name="search_term"
                value=(term)
                placeholder=(placeholder)
                aria-label=(placeholder)
                class=(INPUT_CLASS)
                hx-post=(action)
                hx-trigger="keyup changed delay:400ms, search"
                hx-target="#search-results"
                hx-swap="innerHTML";
        }
    }
}

pub fn contact_row(label: &str, value: Option<&str>) -> Markup {
    html! {
        div {
            dt class="text-sm font-medium text-gray-500" { (label) }
            dd class="mt-1 text-gray-900" {
                @match value {
                    Some(v) if v.starts_with("http") => {
                        a href=(v) target="_blank" rel="noopener" class="text-indigo-600 hover:underline" { (v) }
                    }
                    Some(v) => { (v) }
                    None => {
                        span class="text-gray-400" { "No " (label.to_lowercase()) }
                    }
                }
            }
        }
    }
}
