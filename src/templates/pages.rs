use axum::http::StatusCode;
use maud::{html, Markup};

use super::components::{
    artist_appearance_card, genre_tags, genres_select, notification, notification_area,
    search_bar, submit_button, summary_list, text_field, venue_booking_card, yes_no_select,
    Notice,
};
use super::layout::base_layout;
use crate::db::{artist, venue, Genres};
use crate::services::directory::{
    Area, ArtistDetail, SearchResults, ShowListing, Summary, VenueDetail,
};

pub fn home_page(notice: Option<&Notice>) -> Markup {
    base_layout(
        "Home",
        html! {
            (notification_area(notice))

            div class="text-center py-16" {
                h1 class="text-4xl font-bold text-gray-900" { "Fyyur" }
                p class="text-gray-600 mt-4 text-lg" {
                    "Book local artists at local venues."
                }
                div class="mt-8 flex justify-center gap-4" {
                    a href="/venues" class="px-4 py-2 bg-indigo-600 hover:bg-indigo-700 text-white font-semibold rounded-md" {
                        "Find a venue"
                    }
                    a href="/artists" class="px-4 py-2 bg-white border border-gray-300 hover:bg-gray-50 text-gray-900 font-semibold rounded-md" {
                        "Find an artist"
                    }
                }
            }
        },
    )
}

pub fn venues_page(areas: &[Area]) -> Markup {
    base_layout(
        "Venues",
        html! {
            div class="mb-8" {
                h1 class="text-3xl font-bold text-gray-900" { "Venues" }
            }

            (search_bar("/venues/search", "Find a venue", ""))

            @if areas.is_empty() {
                div class="text-center py-12" {
                    p class="text-gray-600 text-lg" { "No venues listed yet." }
                }
            } @else {
                div class="space-y-8" {
                    @for area in areas {
                        section {
                            h2 class="text-xl font-semibold text-gray-900 mb-3" {
                                (area.city) ", " (area.state)
                            }
                            (summary_list(&area.venues, "/venues"))
                        }
                    }
                }
            }
        },
    )
}

pub fn artists_page(artists: &[Summary]) -> Markup {
    base_layout(
        "Artists",
        html! {
            div class="mb-8" {
                h1 class="text-3xl font-bold text-gray-900" { "Artists" }
            }

            (search_bar("/artists/search", "Find an artist", ""))

            @if artists.is_empty() {
                div class="text-center py-12" {
                    p class="text-gray-600 text-lg" { "No artists listed yet." }
                }
            } @else {
                (summary_list(artists, "/artists"))
            }
        },
    )
}

/// Results page shared by venue and artist search. `base_url` is the
/// collection root, e.g. `/venues`.
pub fn search_results_page(
    kind: &str,
    base_url: &str,
    search_term: &str,
    results: &SearchResults,
) -> Markup {
    base_layout(
        &format!("Search {}", kind),
        html! {
            (search_bar(&format!("{}/search", base_url), &format!("Find {}", kind.to_lowercase()), search_term))

            h2 class="text-xl text-gray-900 mb-4" {
                "Number of search results for \"" (search_term) "\": "
                span class="font-semibold" { (results.count) }
            }

            @if !results.data.is_empty() {
                (summary_list(&results.data, base_url))
            }
        },
    )
}

fn detail_row(label: &str, value: Option<&str>) -> Markup {
    html! {
        @if let Some(value) = value {
            div {
                dt class="text-sm font-medium text-gray-500" { (label) }
                dd class="mt-1 text-gray-900" { (value) }
            }
        }
    }
}

fn link_row(label: &str, href: Option<&str>) -> Markup {
    html! {
        @if let Some(href) = href {
            div {
                dt class="text-sm font-medium text-gray-500" { (label) }
                dd class="mt-1" {
                    a href=(href) target="_blank" class="text-indigo-600 hover:underline" { (href) }
                }
            }
        }
    }
}

fn seeking_banner(seeking: bool, seeking_label: &str, not_seeking_label: &str, description: Option<&str>) -> Markup {
    html! {
        @if seeking {
            div class="p-4 rounded-md bg-indigo-50 text-indigo-900" {
                p class="font-semibold" { (seeking_label) }
                @if let Some(description) = description {
                    p class="mt-1" { (description) }
                }
            }
        } @else {
            p class="text-gray-500" { (not_seeking_label) }
        }
    }
}

fn show_section(title: &str, count: usize, cards: Markup) -> Markup {
    html! {
        section class="mb-8" {
            h2 class="text-xl font-semibold text-gray-900 mb-4" {
                (count) " " (title) @if count != 1 { "s" }
            }
            @if count == 0 {
                p class="text-gray-500" { "Nothing to show." }
            } @else {
                div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4" {
                    (cards)
                }
            }
        }
    }
}

fn profile_header(
    name: &str,
    id: i32,
    base_url: &str,
    genres: &Genres,
    image_link: Option<&str>,
    actions: Markup,
) -> Markup {
    html! {
        div class="bg-white rounded-lg shadow-sm p-6 mb-8" {
            div class="flex flex-col md:flex-row gap-6" {
                @if let Some(src) = image_link {
                    img src=(src) alt=(name) class="w-full md:w-64 rounded-lg shadow-md object-cover";
                }
                div class="flex-grow" {
                    p class="text-sm text-gray-500" { "ID: " (id) }
                    h1 class="text-3xl font-bold text-gray-900 mb-4" { (name) }
                    (genre_tags(genres))
                    div class="mt-6 flex gap-3" {
                        a href=(format!("{}/{}/edit", base_url, id))
                          class="px-4 py-2 bg-gray-200 hover:bg-gray-300 text-gray-700 font-semibold rounded-md" {
                            "Edit"
                        }
                        (actions)
                    }
                }
            }
        }
    }
}

pub fn venue_detail_page(detail: &VenueDetail, notice: Option<&Notice>) -> Markup {
    let venue = &detail.venue;

    base_layout(
        &venue.name,
        html! {
            (notification_area(notice))

            (profile_header(
                &venue.name,
                venue.id,
                "/venues",
                &venue.genres,
                venue.image_link.as_deref(),
                html! {
                    button
                        class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white font-semibold rounded-md"
                        hx-delete=(format!("/venues/{}", venue.id))
                        hx-confirm="Delete this venue and all of its shows?"
                        hx-swap="none" {
                        "Delete"
                    }
                },
            ))

            div class="bg-white rounded-lg shadow-sm p-6 mb-8" {
                dl class="grid grid-cols-1 md:grid-cols-2 gap-4" {
                    (detail_row("Location", Some(&format!("{}, {}, {}", venue.address, venue.city, venue.state))))
                    (detail_row("Phone", venue.phone.as_deref()))
                    (link_row("Website", venue.website.as_deref()))
                    (link_row("Facebook", venue.facebook_link.as_deref()))
                }
                div class="mt-6" {
                    (seeking_banner(
                        venue.seeking_talent,
                        "Currently seeking talent",
                        "Not currently seeking talent",
                        venue.seeking_description.as_deref(),
                    ))
                }
            }

            (show_section("Upcoming Show", detail.upcoming_shows_count, html! {
                @for show in &detail.upcoming_shows { (artist_appearance_card(show)) }
            }))
            (show_section("Past Show", detail.past_shows_count, html! {
                @for show in &detail.past_shows { (artist_appearance_card(show)) }
            }))
        },
    )
}

pub fn artist_detail_page(detail: &ArtistDetail, notice: Option<&Notice>) -> Markup {
    let artist = &detail.artist;

    base_layout(
        &artist.name,
        html! {
            (notification_area(notice))

            (profile_header(
                &artist.name,
                artist.id,
                "/artists",
                &artist.genres,
                artist.image_link.as_deref(),
                html! {},
            ))

            div class="bg-white rounded-lg shadow-sm p-6 mb-8" {
                dl class="grid grid-cols-1 md:grid-cols-2 gap-4" {
                    (detail_row("Location", Some(&format!("{}, {}", artist.city, artist.state))))
                    (detail_row("Phone", artist.phone.as_deref()))
                    (link_row("Website", artist.website.as_deref()))
                    (link_row("Facebook", artist.facebook_link.as_deref()))
                }
                div class="mt-6" {
                    (seeking_banner(
                        artist.seeking_venue,
                        "Currently seeking performance venues",
                        "Not currently seeking performance venues",
                        artist.seeking_description.as_deref(),
                    ))
                }
            }

            (show_section("Upcoming Show", detail.upcoming_shows_count, html! {
                @for show in &detail.upcoming_shows { (venue_booking_card(show)) }
            }))
            (show_section("Past Show", detail.past_shows_count, html! {
                @for show in &detail.past_shows { (venue_booking_card(show)) }
            }))
        },
    )
}

pub fn shows_page(shows: &[ShowListing]) -> Markup {
    base_layout(
        "Shows",
        html! {
            div class="mb-8" {
                h1 class="text-3xl font-bold text-gray-900" { "Shows" }
            }

            @if shows.is_empty() {
                div class="text-center py-12" {
                    p class="text-gray-600 text-lg" { "No shows listed yet." }
                }
            } @else {
                div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6" {
                    @for show in shows {
                        div class="listing-card bg-white rounded-lg shadow-sm p-4" {
                            div class="flex items-center gap-4" {
                                @if let Some(src) = &show.artist_image_link {
                                    img src=(src) alt=(show.artist_name) class="w-16 h-16 rounded object-cover" loading="lazy";
                                }
                                div {
                                    p class="text-sm text-gray-600" { (show.start_time) }
                                    a href=(format!("/artists/{}", show.artist_id)) class="font-semibold text-gray-900 hover:underline" {
                                        (show.artist_name)
                                    }
                                    p class="text-sm text-gray-600" {
                                        "playing at "
                                        a href=(format!("/venues/{}", show.venue_id)) class="text-indigo-600 hover:underline" {
                                            (show.venue_name)
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn form_card(heading: &str, action: &str, fields: Markup, submit_label: &str) -> Markup {
    html! {
        div class="max-w-2xl mx-auto" {
            h1 class="text-3xl font-bold text-gray-900 mb-8" { (heading) }
            form method="post" action=(action) class="bg-white rounded-lg shadow-sm p-6 space-y-4" {
                (fields)
                (submit_button(submit_label))
            }
        }
    }
}

/// Create form when `venue` is `None`, prefilled edit form otherwise.
pub fn venue_form_page(venue: Option<&venue::Model>) -> Markup {
    let empty = Genres::default();
    let (heading, action) = match venue {
        Some(v) => (format!("Edit venue {}", v.name), format!("/venues/{}/edit", v.id)),
        None => ("List a new venue".to_string(), "/venues/create".to_string()),
    };

    base_layout(
        &heading,
        form_card(
            &heading,
            &action,
            html! {
                (text_field("Name", "name", venue.map(|v| v.name.as_str()), true))
                (text_field("City", "city", venue.map(|v| v.city.as_str()), true))
                (text_field("State", "state", venue.map(|v| v.state.as_str()), true))
                (text_field("Address", "address", venue.map(|v| v.address.as_str()), true))
                (text_field("Phone", "phone", venue.and_then(|v| v.phone.as_deref()), true))
                (genres_select(venue.map(|v| &v.genres).unwrap_or(&empty)))
                (text_field("Image link", "image_link", venue.and_then(|v| v.image_link.as_deref()), true))
                (text_field("Facebook link", "facebook_link", venue.and_then(|v| v.facebook_link.as_deref()), true))
                (text_field("Website", "website", venue.and_then(|v| v.website.as_deref()), false))
                (yes_no_select("Seeking talent", "seeking_talent", venue.map(|v| v.seeking_talent).unwrap_or(false)))
                (text_field("Seeking description", "seeking_description", venue.and_then(|v| v.seeking_description.as_deref()), false))
            },
            if venue.is_some() { "Save venue" } else { "Create venue" },
        ),
    )
}

/// Create form when `artist` is `None`, prefilled edit form otherwise.
pub fn artist_form_page(artist: Option<&artist::Model>) -> Markup {
    let empty = Genres::default();
    let (heading, action) = match artist {
        Some(a) => (format!("Edit artist {}", a.name), format!("/artists/{}/edit", a.id)),
        None => ("List a new artist".to_string(), "/artists/create".to_string()),
    };

    base_layout(
        &heading,
        form_card(
            &heading,
            &action,
            html! {
                (text_field("Name", "name", artist.map(|a| a.name.as_str()), true))
                (text_field("City", "city", artist.map(|a| a.city.as_str()), true))
                (text_field("State", "state", artist.map(|a| a.state.as_str()), true))
                (text_field("Phone", "phone", artist.and_then(|a| a.phone.as_deref()), true))
                (genres_select(artist.map(|a| &a.genres).unwrap_or(&empty)))
                (text_field("Image link", "image_link", artist.and_then(|a| a.image_link.as_deref()), true))
                (text_field("Facebook link", "facebook_link", artist.and_then(|a| a.facebook_link.as_deref()), true))
                (text_field("Website", "website", artist.and_then(|a| a.website.as_deref()), false))
                (yes_no_select("Seeking venue", "seeking_venue", artist.map(|a| a.seeking_venue).unwrap_or(false)))
                (text_field("Seeking description", "seeking_description", artist.and_then(|a| a.seeking_description.as_deref()), false))
            },
            if artist.is_some() { "Save artist" } else { "Create artist" },
        ),
    )
}

pub fn show_form_page() -> Markup {
    base_layout(
        "List a new show",
        form_card(
            "List a new show",
            "/shows/create",
            html! {
                (text_field("Artist ID", "artist_id", None, true))
                (text_field("Venue ID", "venue_id", None, true))
                div {
                    label for="start_time" class="block text-sm font-medium text-gray-700 mb-2" { "Start time" }
                    input type="datetime-local" id="start_time" name="start_time" required
                        class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-indigo-500";
                }
            },
            "Create show",
        ),
    )
}

pub fn error_page(status: StatusCode, notice: &Notice) -> Markup {
    let heading = match status {
        StatusCode::NOT_FOUND => "Not Found",
        StatusCode::BAD_REQUEST => "Bad Request",
        _ => "Something went wrong",
    };

    base_layout(
        heading,
        html! {
            (notification(notice))

            div class="text-center py-12" {
                p class="text-6xl font-bold text-gray-300" { (status.as_u16()) }
                h1 class="text-2xl font-semibold text-gray-900 mt-4" { (heading) }
                a href="/" class="inline-block mt-6 text-indigo-600 hover:underline" { "Back to home" }
            }
        },
    )
}
