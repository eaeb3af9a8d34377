use maud::{html, Markup};
use serde::Deserialize;

use crate::db::Genres;
use crate::forms::{yes_no, GENRES};
use crate::services::directory::{ArtistAppearance, Summary, VenueBooking};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// One-shot message shown at the top of the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Query string carrying this notice across a redirect.
    pub fn to_query(&self) -> String {
        format!(
            "notice={}&level={}",
            urlencoding::encode(&self.message),
            self.level.as_str()
        )
    }
}

pub fn notification(notice: &Notice) -> Markup {
    let (bg_color, text_color, icon) = match notice.level {
        NoticeLevel::Success => ("bg-green-50", "text-green-800", "✓"),
        NoticeLevel::Error => ("bg-red-50", "text-red-800", "✗"),
    };

    html! {
        div id="notification-area" class={(format!("p-4 mb-6 rounded-md {} {}", bg_color, text_color))} {
            div class="flex items-center" {
                span class="font-bold mr-2" { (icon) }
                span { (notice.message) }
            }
        }
    }
}

pub fn notification_area(notice: Option<&Notice>) -> Markup {
    html! {
        @if let Some(notice) = notice {
            (notification(notice))
        }
    }
}

pub fn summary_list(items: &[Summary], base_url: &str) -> Markup {
    html! {
        ul class="divide-y divide-gray-100 bg-white rounded-lg shadow-sm" {
            @for item in items {
                li {
                    a href=(format!("{}/{}", base_url, item.id))
                      class="block px-4 py-3 text-gray-900 hover:bg-gray-50" {
                        (item.name)
                    }
                }
            }
        }
    }
}

pub fn genre_tags(genres: &Genres) -> Markup {
    html! {
        div class="flex flex-wrap gap-2" {
            @for genre in genres.iter() {
                span class="px-2 py-1 bg-gray-100 text-gray-700 text-sm rounded" { (genre) }
            }
        }
    }
}

fn thumbnail(image_link: Option<&str>, alt: &str) -> Markup {
    html! {
        @if let Some(src) = image_link {
            img src=(src) alt=(alt) class="w-16 h-16 rounded object-cover" loading="lazy";
        } @else {
            div class="w-16 h-16 rounded bg-gray-200" {}
        }
    }
}

pub fn artist_appearance_card(show: &ArtistAppearance) -> Markup {
    html! {
        a href=(format!("/artists/{}", show.artist_id))
          class="listing-card flex items-center gap-4 bg-white rounded-lg shadow-sm p-4" {
            (thumbnail(show.artist_image_link.as_deref(), &show.artist_name))
            div {
                p class="font-semibold text-gray-900" { (show.artist_name) }
                p class="text-sm text-gray-600" { (show.start_time) }
            }
        }
    }
}

pub fn venue_booking_card(show: &VenueBooking) -> Markup {
    html! {
        a href=(format!("/venues/{}", show.venue_id))
          class="listing-card flex items-center gap-4 bg-white rounded-lg shadow-sm p-4" {
            (thumbnail(show.venue_image_link.as_deref(), &show.venue_name))
            div {
                p class="font-semibold text-gray-900" { (show.venue_name) }
                p class="text-sm text-gray-600" { (show.start_time) }
            }
        }
    }
}

pub fn search_bar(action: &str, placeholder: &str, term: &str) -> Markup {
    html! {
        form method="post" action=(action) class="flex gap-2 mb-6" {
            input
                type="search"
                name="search_term"
                value=(term)
                placeholder=(placeholder)
                class="flex-grow px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-indigo-500";
            button type="submit" class="px-4 py-2 bg-indigo-600 hover:bg-indigo-700 text-white font-semibold rounded-md" {
                "Search"
            }
        }
    }
}

const INPUT_CLASS: &str =
    "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-indigo-500";

pub fn text_field(label: &str, name: &str, value: Option<&str>, required: bool) -> Markup {
    html! {
        div {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" { (label) }
            input type="text" id=(name) name=(name) value=[value] required[required] class=(INPUT_CLASS);
        }
    }
}

pub fn genres_select(selected: &Genres) -> Markup {
    html! {
        div {
            label for="genres" class="block text-sm font-medium text-gray-700 mb-2" { "Genres" }
            select id="genres" name="genres" multiple required class=(INPUT_CLASS) {
                @for genre in GENRES {
                    option value=(genre) selected[selected.contains(genre)] { (genre) }
                }
            }
            p class="mt-1 text-xs text-gray-500" { "Ctrl+Click to select multiple" }
        }
    }
}

pub fn yes_no_select(label: &str, name: &str, current: bool) -> Markup {
    html! {
        div {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" { (label) }
            select id=(name) name=(name) class=(INPUT_CLASS) {
                @for choice in ["Yes", "No"] {
                    option value=(choice) selected[yes_no(current) == choice] { (choice) }
                }
            }
        }
    }
}

pub fn submit_button(label: &str) -> Markup {
    html! {
        button type="submit" class="px-4 py-2 bg-indigo-600 hover:bg-indigo-700 text-white font-semibold rounded-md" {
            (label)
        }
    }
}
