use console::Style;

use super::{RenderOptions, TOTAL_SEGMENTS};
use crate::domain::CrowdLabel;

/// Meter palette: one tone per crowd tier plus the unlit track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterTone {
    Calm,
    Moderate,
    Busy,
    Severe,
    Track,
}

impl MeterTone {
    /// Tone for a crowd level. Derived from the label so both always agree
    /// on the 30/60/80 boundaries.
    pub fn for_level(level: u8) -> MeterTone {
        match CrowdLabel::from_level(level) {
            CrowdLabel::Low => MeterTone::Calm,
            CrowdLabel::Moderate => MeterTone::Moderate,
            CrowdLabel::High => MeterTone::Busy,
            CrowdLabel::Severe => MeterTone::Severe,
        }
    }

    pub fn style(&self) -> Style {
        match self {
            MeterTone::Calm => Style::new().green(),
            MeterTone::Moderate => Style::new().yellow(),
            MeterTone::Busy => Style::new().color256(208),
            MeterTone::Severe => Style::new().red().bold(),
            MeterTone::Track => Style::new().black().bright(),
        }
    }
}

/// Lit segments out of ten: ceil(level / 10)
pub fn active_segments(level: u8) -> u8 {
    level.min(100).div_ceil(10)
}

/// Two-line crowd meter: a header with the density reading, then the bar
pub fn render_meter(level: u8, options: &RenderOptions) -> String {
    let tone = MeterTone::for_level(level);
    let lit = active_segments(level);

    let reading = format!("{}% DENSITY", level);
    let padding = super::CARD_WIDTH.saturating_sub("SENSOR READING".len() + reading.len());
    let header = format!(
        "{}{}{}",
        options.paint("SENSOR READING", &MeterTone::Track.style()),
        " ".repeat(padding),
        options.paint(&reading, &tone.style().bold())
    );

    let (on, off) = if options.color { ("█", "░") } else { ("#", "·") };
    let bar = (0..TOTAL_SEGMENTS)
        .map(|i| {
            if i < lit {
                options.paint(on, &tone.style())
            } else {
                options.paint(off, &MeterTone::Track.style())
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!("{}\n{}", header, bar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_segments_round_up() {
        assert_eq!(active_segments(0), 0);
        assert_eq!(active_segments(1), 1);
        assert_eq!(active_segments(10), 1);
        assert_eq!(active_segments(11), 2);
        assert_eq!(active_segments(85), 9);
        assert_eq!(active_segments(100), 10);
    }

    #[test]
    fn test_tone_thresholds_match_labels() {
        assert_eq!(MeterTone::for_level(29), MeterTone::Calm);
        assert_eq!(MeterTone::for_level(30), MeterTone::Moderate);
        assert_eq!(MeterTone::for_level(59), MeterTone::Moderate);
        assert_eq!(MeterTone::for_level(60), MeterTone::Busy);
        assert_eq!(MeterTone::for_level(79), MeterTone::Busy);
        assert_eq!(MeterTone::for_level(80), MeterTone::Severe);
    }

    #[test]
    fn test_plain_meter() {
        let meter = render_meter(85, &RenderOptions::plain());
        let mut lines = meter.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("SENSOR READING"));
        assert!(header.ends_with("85% DENSITY"));

        assert_eq!(lines.next().unwrap(), "# # # # # # # # # ·");
        assert!(!meter.contains('\u{1b}'));
    }

    #[test]
    fn test_colored_meter_emits_escapes() {
        let meter = render_meter(20, &RenderOptions::colored());
        assert!(meter.contains('\u{1b}'));
        assert_eq!(meter.matches('█').count(), 2);
        assert_eq!(meter.matches('░').count(), 8);
    }
}
