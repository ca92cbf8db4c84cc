//! Authenticated dashboard page.

use maud::{Markup, html};

use salat_core::types::{MAX_OFFSET_MINUTES, OffsetKind, Prayer};
use salat_service::location::LocationMode;
use salat_service::{Dashboard, OffsetSnapshot, PrayerCard};

use super::layout::{NoticeLevel, Refresh, notice, page};
use crate::dto::request::offset_field;

/// Renders the full dashboard. `saved` confirms an offset update;
/// `refresh_target` is the URL the page re-polls.
pub fn dashboard_page(dashboard: &Dashboard, saved: bool, refresh_target: &str) -> Markup {
    let content = html! {
        div class="bar" {
            span { "✅ Logged in as " (dashboard.viewer.display_name) }
            form class="inline" method="post" action="/logout" {
                button type="submit" { "Log out" }
            }
        }
        @if saved {
            (notice(NoticeLevel::Success, "Configuration saved."))
        }
        @if let Some(warning) = &dashboard.location.warning {
            (notice(NoticeLevel::Warning, warning))
        }
        (location_form(dashboard))
        @match &dashboard.prayers {
            Some(cards) => {
                div class="grid" {
                    @for card in cards {
                        (prayer_card(card))
                    }
                }
            }
            None => {
                (notice(NoticeLevel::Error, "Prayer times are not available."))
            }
        }
        @if let Some(offsets) = &dashboard.offsets {
            (offset_editor(offsets))
        }
    };

    let refresh = dashboard
        .refresh_interval_seconds
        .map(|seconds| Refresh {
            seconds,
            target: refresh_target,
        });
    page(&dashboard.header, refresh, content, &dashboard.footer)
}

fn prayer_card(card: &PrayerCard) -> Markup {
    html! {
        div class="prayer-card" {
            h3 { (card.prayer) }
            p class="prayer-time" { (card.adhan) " ⏳ +" (card.iqama_offset) " min" }
            p class="muted" { "Iqama " (card.iqama) }
            p class="muted" {
                "Reminder " (card.reminder) " (" (card.reminder_lead) " min before)"
            }
        }
    }
}

fn location_form(dashboard: &Dashboard) -> Markup {
    let resolved = &dashboard.location;
    let gps = resolved.mode == LocationMode::Gps;
    let (lat, lon) = resolved
        .coordinates
        .map(|c| (format!("{:.5}", c.latitude), format!("{:.5}", c.longitude)))
        .unwrap_or_default();
    let (city, country) = if gps {
        ("", "")
    } else {
        (
            resolved.location.city.as_str(),
            resolved.location.country.as_str(),
        )
    };

    html! {
        form method="get" action="/" {
            fieldset {
                legend { "Location" }
                p {
                    label { input type="radio" name="mode" value="gps" checked[gps]; " 📍 GPS" }
                    label { input type="radio" name="mode" value="manual" checked[!gps]; " 🌍 Manual" }
                }
                p {
                    label for="city" { "City" } " "
                    input id="city" name="city" value=(city);
                    " "
                    label for="country" { "Country" } " "
                    input id="country" name="country" value=(country);
                }
                p {
                    label for="lat" { "Latitude" } " "
                    input id="lat" name="lat" value=(lat) inputmode="decimal";
                    " "
                    label for="lon" { "Longitude" } " "
                    input id="lon" name="lon" value=(lon) inputmode="decimal";
                }
                p { button type="submit" { "Show" } }
            }
        }
    }
}

fn offset_editor(offsets: &OffsetSnapshot) -> Markup {
    let sections = [
        (OffsetKind::Iqama, "Iqama offsets (minutes)"),
        (OffsetKind::Reminder, "Reminders (minutes before)"),
    ];

    html! {
        form method="post" action="/admin/offsets" {
            fieldset {
                legend { "⚙ Configuration" }
                @for (kind, heading) in sections {
                    p { em { (heading) } }
                    @for prayer in Prayer::ALL {
                        @let field = offset_field(kind, prayer);
                        p {
                            label for=(field) { (prayer) } " "
                            input id=(field) name=(field) type="number" min="0"
                                max=(MAX_OFFSET_MINUTES) value=(offsets.table(kind).get(prayer)) required;
                        }
                    }
                }
                p { button type="submit" { "Save" } }
            }
        }
    }
}
