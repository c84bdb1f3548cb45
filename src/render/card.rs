use console::Style;

use super::meter::{MeterTone, render_meter};
use super::{CARD_WIDTH, RenderOptions};
use crate::domain::{Place, ViewMode};
use crate::search::ScanResult;

const MAX_SOURCES: usize = 4;
const DISCLAIMER: &str = "DATA PROVIDED BY GEMINI AI + GOOGLE MAPS GROUNDING. ESTIMATES ONLY.";

/// Full card for one place: tier rule, category, name, meter, vibe, address, link
pub fn render_place_card(place: &Place, options: &RenderOptions) -> String {
    let tone = MeterTone::for_level(place.crowd_level);
    let dim = MeterTone::Track.style();
    let mut lines = Vec::new();

    lines.push(options.paint(&"━".repeat(CARD_WIDTH), &tone.style()));

    let category = format!("[{}]", place.category.to_uppercase());
    if place.is_crowded() {
        let badge = "● HIGH TRAFFIC";
        let padding = CARD_WIDTH.saturating_sub(category.chars().count() + badge.chars().count());
        lines.push(format!(
            "{}{}{}",
            options.paint(&category, &dim),
            " ".repeat(padding),
            options.paint(badge, &Style::new().red().bold())
        ));
    } else {
        lines.push(options.paint(&category, &dim));
    }

    lines.push(options.paint(&place.name, &Style::new().bold()));
    lines.push(String::new());
    lines.push(render_meter(place.crowd_level, options));
    lines.push(String::new());
    lines.push(format!("│ {}", place.description));
    lines.push(String::new());
    lines.push(format!("{} {}", options.paint("LOC:", &dim), place.address));

    if let Some(uri) = &place.maps_uri {
        lines.push(format!(
            "{} {}",
            options.paint("NAVIGATE:", &Style::new().cyan()),
            uri
        ));
    }

    lines.join("\n")
}

/// One compact line: label, level, name, category
pub fn render_list_row(place: &Place, options: &RenderOptions) -> String {
    let tone = MeterTone::for_level(place.crowd_level);
    let label = format!("{:<8}", place.crowd_label.as_str().to_uppercase());
    format!(
        "{} {:>3}%  {}  ({})",
        options.paint(&label, &tone.style()),
        place.crowd_level,
        place.name,
        place.category
    )
}

/// Up to four maps-grounded sources followed by the estimates disclaimer
pub fn render_sources(result: &ScanResult, options: &RenderOptions) -> String {
    let dim = MeterTone::Track.style();
    let mut lines: Vec<String> = result
        .map_sources()
        .take(MAX_SOURCES)
        .map(|chunk| {
            let title = chunk
                .maps_title()
                .filter(|t| !t.is_empty())
                .unwrap_or("Data Source");
            format!("⌖ {} {}", title, options.paint(chunk.maps_uri().unwrap_or_default(), &dim))
        })
        .collect();

    lines.push(options.paint(DISCLAIMER, &dim));
    lines.join("\n")
}

/// Whole result view: heading, places in the chosen layout, sources footer
pub fn render_results(result: &ScanResult, view: ViewMode, options: &RenderOptions) -> String {
    if result.places.is_empty() {
        return options.paint(
            "NO SIGNALS DETECTED IN THIS SECTOR",
            &MeterTone::Track.style(),
        );
    }

    let heading = format!("DETECTED POINTS OF INTEREST ({})", result.places.len());
    let body = match view {
        ViewMode::Grid => result
            .places
            .iter()
            .map(|p| render_place_card(p, options))
            .collect::<Vec<_>>()
            .join("\n\n"),
        ViewMode::List => result
            .places
            .iter()
            .map(|p| render_list_row(p, options))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    format!(
        "{}\n\n{}\n\n{}",
        options.paint(&heading, &Style::new().bold()),
        body,
        render_sources(result, options)
    )
}
