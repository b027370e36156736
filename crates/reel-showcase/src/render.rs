//! Text rendering of a carousel frame.

use reel_core::Carousel;
use reel_runtime::CarouselEvent;

use crate::data::Project;

const DOT_ACTIVE: char = '●';
const DOT_INACTIVE: char = '○';

/// Indicator row: one dot per item, the active one filled.
#[must_use]
pub fn dots<T>(carousel: &Carousel<T>) -> String {
    (0..carousel.len())
        .map(|i| if carousel.is_active(i) { DOT_ACTIVE } else { DOT_INACTIVE })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Short label for an event.
#[must_use]
pub fn event_label(event: &CarouselEvent) -> String {
    match event {
        CarouselEvent::Moved { from, to, motion } => format!("moved {from} -> {to} ({motion:?})"),
        CarouselEvent::SnappedBack { index } => format!("snapped back to {index}"),
        CarouselEvent::ResetCommitted => "loop reset".to_owned(),
        CarouselEvent::Settled => "settled".to_owned(),
    }
}

/// Full frame: header line, dots, and the active project, each line cut to `width`.
#[must_use]
pub fn frame(carousel: &Carousel<Project>, event: &CarouselEvent, width: usize) -> String {
    let mut lines = vec![
        format!("[{}] index {}", event_label(event), carousel.index()),
        dots(carousel),
    ];
    match carousel.active() {
        Some(project) => {
            lines.push(format!("{} · {}", project.name, project.sector));
            lines.push(project.summary.to_owned());
        }
        None => lines.push("(no projects)".to_owned()),
    }
    lines
        .iter()
        .map(|line| fit(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Truncate to `width` characters, marking the cut with `…`.
fn fit(line: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if line.chars().count() <= width {
        return line.to_owned();
    }
    let mut out: String = line.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PROJECTS;
    use reel_core::{CarouselConfig, Motion};

    #[test]
    fn dots_follow_active_item() {
        let mut c = Carousel::new(PROJECTS.to_vec(), CarouselConfig::featured_projects());
        assert_eq!(dots(&c), "● ○ ○ ○ ○");
        c.next();
        c.next();
        assert_eq!(dots(&c), "○ ○ ● ○ ○");
    }

    #[test]
    fn frame_shows_active_project() {
        let mut c = Carousel::new(PROJECTS.to_vec(), CarouselConfig::featured_projects());
        c.next();
        let event = CarouselEvent::Moved {
            from: 0,
            to: 1,
            motion: Motion::Slide,
        };
        let text = frame(&c, &event, 80);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[moved 0 -> 1 (Slide)] index 1");
        assert_eq!(lines[1], "○ ● ○ ○ ○");
        assert!(lines[2].starts_with("Lumen Studio"));
    }

    #[test]
    fn fit_truncates_by_chars() {
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("●○●", 3), "●○●");
        assert_eq!(fit("anything", 0), "");
    }
}
