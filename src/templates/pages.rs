use axum::http::StatusCode;
use maud::{html, Markup};

use super::components::{
    contact_row, entry_card, genre_badges, search_bar, show_card, ShowCardData,
    ARTIST_PLACEHOLDER_IMAGE, VENUE_PLACEHOLDER_IMAGE,
};
use super::layout::base_layout;
use crate::flash::FlashMessage;
use crate::services::{
    Area, ArtistDetail, ArtistShow, SearchResults, ShowListing, VenueDetail, VenueShow,
};

pub fn home_page(flash: Option<&FlashMessage>) -> Markup {
    base_layout(
        "Home",
        flash,
        html! {
            div class="text-center py-16" {
                h1 class="text-4xl font-bold text-gray-900 mb-4" { "Fyyur" }
                p class="text-lg text-gray-600 mb-8" {
                    "Discover venues, book artists and list upcoming shows."
                }
                div class="flex justify-center gap-4" {
                    a href="/venues/create" class="px-4 py-2 bg-indigo-600 hover:bg-indigo-700 text-white rounded-md" {
                        "Post a venue"
                    }
                    a href="/artists/create" class="px-4 py-2 bg-indigo-600 hover:bg-indigo-700 text-white rounded-md" {
                        "Post an artist"
                    }
                    a href="/shows/create" class="px-4 py-2 bg-white border border-indigo-600 text-indigo-600 rounded-md" {
                        "List a show"
                    }
                }
            }
        },
    )
}

fn page_header(title: &str, create_href: &str, create_label: &str) -> Markup {
    html! {
        div class="flex justify-between items-center mb-6" {
            h1 class="text-3xl font-bold text-gray-900" { (title) }
            a href=(create_href) class="px-4 py-2 bg-indigo-600 hover:bg-indigo-700 text-white rounded-md text-sm" {
                (create_label)
            }
        }
    }
}

pub fn venues_page(areas: &[Area], flash: Option<&FlashMessage>) -> Markup {
    base_layout(
        "Venues",
        flash,
        html! {
            (page_header("Venues", "/venues/create", "Post a venue"))
            (search_bar("/venues/search", "Find a venue", ""))

            div id="search-results" {
                @if areas.is_empty() {
                    p class="text-gray-600" { "No venues listed yet." }
                }
                @for area in areas {
                    section class="mb-8" {
                        h2 class="text-xl font-semibold text-gray-800 mb-3" {
                            (area.city) ", " (area.state)
                        }
                        div class="grid gap-3 md:grid-cols-2" {
                            @for venue in &area.venues {
                                (entry_card("venues", venue))
                            }
                        }
                    }
                }
            }
        },
    )
}

/// Artists listing. Only id and name are shown here.
pub fn artists_page(artists: &[(i32, String)], flash: Option<&FlashMessage>) -> Markup {
    base_layout(
        "Artists",
        flash,
        html! {
            (page_header("Artists", "/artists/create", "Post an artist"))
            (search_bar("/artists/search", "Find an artist", ""))

            div id="search-results" {
                @if artists.is_empty() {
                    p class="text-gray-600" { "No artists listed yet." }
                }
                div class="grid gap-3 md:grid-cols-2" {
                    @for (id, name) in artists {
                        a href={(format!("/artists/{}", id))}
                          class="entry-card block bg-white rounded-lg shadow-sm p-4 font-semibold text-gray-900" {
                            (name)
                        }
                    }
                }
            }
        },
    )
}

pub fn search_results_partial(kind: &str, term: &str, results: &SearchResults) -> Markup {
    html! {
        p class="text-gray-700 mb-4" {
            "Number of search results for \"" (term) "\": " strong { (results.count) }
        }
        div class="grid gap-3 md:grid-cols-2" {
            @for entry in &results.data {
                (entry_card(kind, entry))
            }
        }
    }
}

/// Full search page; `kind` is `venues` or `artists`.
pub fn search_results_page(kind: &str, term: &str, results: &SearchResults) -> Markup {
    let (title, placeholder) = if kind == "venues" {
        ("Venue search", "Find a venue")
    } else {
        ("Artist search", "Find an artist")
    };

    base_layout(
        title,
        None,
        html! {
            h1 class="text-3xl font-bold text-gray-900 mb-6" { (title) }
            (search_bar(&format!("/{}/search", kind), placeholder, term))
            div id="search-results" {
                (search_results_partial(kind, term, results))
            }
        },
    )
}

fn seeking_banner(seeking: bool, what: &str, description: Option<&str>) -> Markup {
    html! {
        @if seeking {
            div class="p-4 rounded-md bg-indigo-50 text-indigo-800" {
                p class="font-semibold" { "Currently seeking " (what) }
                @if let Some(description) = description {
                    p class="mt-1" { (description) }
                }
            }
        } @else {
            p class="text-gray-500" { "Not currently seeking " (what) }
        }
    }
}

fn delete_form(action: &str, label: &str) -> Markup {
    html! {
        form method="post" action=(action)
             onsubmit="return confirm('Delete this listing and all of its shows?');" {
            button type="submit" class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white rounded-md text-sm" {
                (label)
            }
        }
    }
}

fn show_section(heading: &str, count: usize, cards: Vec<Markup>) -> Markup {
    html! {
        section class="mt-10" {
            h2 class="text-2xl font-semibold text-gray-900 mb-4" {
                (count) " " (heading)
                @if count == 1 { " Show" } @else { " Shows" }
            }
            div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4" {
                @for card in cards {
                    (card)
                }
            }
        }
    }
}

fn venue_show_card(show: &VenueShow) -> Markup {
    show_card(&ShowCardData {
        href: format!("/artists/{}", show.artist_id),
        title: &show.artist_name,
        subtitle: None,
        image_link: show
            .artist_image_link
            .as_deref()
            .unwrap_or(ARTIST_PLACEHOLDER_IMAGE),
        start_time: &show.start_time,
    })
}

fn artist_show_card(show: &ArtistShow) -> Markup {
    show_card(&ShowCardData {
        href: format!("/venues/{}", show.venue_id),
        title: &show.venue_name,
        subtitle: None,
        image_link: show
            .venue_image_link
            .as_deref()
            .unwrap_or(VENUE_PLACEHOLDER_IMAGE),
        start_time: &show.start_time,
    })
}

pub fn venue_detail_page(venue: &VenueDetail, flash: Option<&FlashMessage>) -> Markup {
    let image = venue.image_link.as_deref().unwrap_or(VENUE_PLACEHOLDER_IMAGE);

    base_layout(
        &venue.name,
        flash,
        html! {
            div class="grid md:grid-cols-3 gap-8" {
                div class="md:col-span-2 space-y-4" {
                    p class="text-sm text-gray-500" { "ID: " (venue.id) }
                    h1 class="text-4xl font-bold text-gray-900" { (venue.name) }
                    (genre_badges(&venue.genres))
                    dl class="grid grid-cols-2 gap-4" {
                        (contact_row("Address", Some(format!("{}, {}, {}", venue.address, venue.city, venue.state).as_str())))
                        (contact_row("Phone", venue.phone.as_deref()))
                        (contact_row("Website", venue.website_link.as_deref()))
                        (contact_row("Facebook", venue.facebook_link.as_deref()))
                    }
                    (seeking_banner(venue.seeking_talent, "talent", venue.seeking_description.as_deref()))
                    div class="flex gap-3" {
                        a href={(format!("/venues/{}/edit", venue.id))}
                          class="px-4 py-2 bg-white border border-gray-300 rounded-md text-sm" { "Edit" }
                        (delete_form(&format!("/venues/{}/delete", venue.id), "Delete venue"))
                    }
                }
                img src=(image) alt=(venue.name) class="rounded-lg shadow-md w-full";
            }

            (show_section("Upcoming", venue.upcoming_shows_count, venue.upcoming_shows.iter().map(venue_show_card).collect()))
            (show_section("Past", venue.past_shows_count, venue.past_shows.iter().map(venue_show_card).collect()))
        },
    )
}

pub fn artist_detail_page(artist: &ArtistDetail, flash: Option<&FlashMessage>) -> Markup {
    let image = artist.image_link.as_deref().unwrap_or(ARTIST_PLACEHOLDER_IMAGE);

    base_layout(
        &artist.name,
        flash,
        html! {
            div class="grid md:grid-cols-3 gap-8" {
                div class="md:col-span-2 space-y-4" {
                    p class="text-sm text-gray-500" { "ID: " (artist.id) }
                    h1 class="text-4xl font-bold text-gray-900" { (artist.name) }
                    (genre_badges(&artist.genres))
                    dl class="grid grid-cols-2 gap-4" {
                        (contact_row("Location", Some(format!("{}, {}", artist.city, artist.state).as_str())))
                        (contact_row("Phone", artist.phone.as_deref()))
                        (contact_row("Website", artist.website_link.as_deref()))
                        (contact_row("Facebook", artist.facebook_link.as_deref()))
                    }
                    (seeking_banner(artist.seeking_venue, "performance venues", artist.seeking_description.as_deref()))
                    div class="flex gap-3" {
                        a href={(format!("/artists/{}/edit", artist.id))}
                          class="px-4 py-2 bg-white border border-gray-300 rounded-md text-sm" { "Edit" }
                        (delete_form(&format!("/artists/{}/delete", artist.id), "Delete artist"))
                    }
                }
                img src=(image) alt=(artist.name) class="rounded-lg shadow-md w-full";
            }

            (show_section("Upcoming", artist.upcoming_shows_count, artist.upcoming_shows.iter().map(artist_show_card).collect()))
            (show_section("Past", artist.past_shows_count, artist.past_shows.iter().map(artist_show_card).collect()))
        },
    )
}

pub fn shows_page(shows: &[ShowListing], flash: Option<&FlashMessage>) -> Markup {
    base_layout(
        "Shows",
        flash,
        html! {
            (page_header("Shows", "/shows/create", "List a show"))

            @if shows.is_empty() {
                p class="text-gray-600" { "No shows listed yet." }
            }
            div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4" {
                @for show in shows {
                    (show_card(&ShowCardData {
                        href: format!("/venues/{}", show.venue_id),
                        title: &show.artist_name,
                        subtitle: Some(format!("at {}", show.venue_name)),
                        image_link: show.artist_image_link.as_deref().unwrap_or(ARTIST_PLACEHOLDER_IMAGE),
                        start_time: &show.start_time,
                    }))
                }
            }
        },
    )
}

pub fn not_found_page(message: &str) -> Markup {
    base_layout(
        "Not found",
        None,
        html! {
            div class="text-center py-16" {
                h1 class="text-5xl font-bold text-gray-900 mb-4" { "404" }
                p class="text-lg text-gray-600 mb-6" { (message) }
                a href="/" class="text-indigo-600 hover:underline" { "Back to the home page" }
            }
        },
    )
}

pub fn server_error_page(status: StatusCode, message: &str) -> Markup {
    base_layout(
        "Error",
        None,
        html! {
            div class="text-center py-16" {
                h1 class="text-5xl font-bold text-gray-900 mb-4" { (status.as_u16()) }
                p class="text-lg text-gray-600 mb-6" { (message) }
                a href="/" class="text-indigo-600 hover:underline" { "Back to the home page" }
            }
        },
    )
}
