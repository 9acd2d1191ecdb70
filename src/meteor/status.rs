use std::fmt::{Display, Formatter};

use ratatui::{prelude::*, text::Text};
use rust_i18n::t;

use crate::meteor::catalog::Shower;

/// Coarse visual prominence of a shower, derived from its ZHR.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Intensity {
    Strong,
    Moderate,
    Weak,
}

impl Intensity {
    pub fn from_zhr(zhr: u32) -> Self {
        match zhr {
            51.. => Self::Strong,
            21..=50 => Self::Moderate,
            _ => Self::Weak,
        }
    }
}

impl Display for Intensity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Intensity::Strong => write!(f, "{}", t!("status.strong")),
            Intensity::Moderate => write!(f, "{}", t!("status.moderate")),
            Intensity::Weak => write!(f, "{}", t!("status.weak")),
        }
    }
}

/// Formats the summary of the active showers, one line per shower.
pub fn format_active_shower_status(active: &[&Shower]) -> Text<'static> {
    if active.is_empty() {
        return Text::from(t!("status.none_active").to_string().dark_gray());
    }

    active
        .iter()
        .map(|shower| {
            let intensity = Intensity::from_zhr(shower.zhr);
            Line::from(vec![
                "● ".fg(shower.color),
                shower.name.bold(),
                format!(
                    "  {} {} | ZHR {} ({intensity})",
                    t!("status.peak"),
                    shower.peak,
                    shower.zhr
                )
                .dark_gray(),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meteor::catalog::CATALOG;

    fn shower(short_name: &str) -> &'static Shower {
        CATALOG
            .iter()
            .find(|shower| shower.short_name == short_name)
            .unwrap()
    }

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn intensity_thresholds() {
        assert_eq!(Intensity::from_zhr(120), Intensity::Strong);
        assert_eq!(Intensity::from_zhr(51), Intensity::Strong);
        assert_eq!(Intensity::from_zhr(50), Intensity::Moderate);
        assert_eq!(Intensity::from_zhr(30), Intensity::Moderate);
        assert_eq!(Intensity::from_zhr(21), Intensity::Moderate);
        assert_eq!(Intensity::from_zhr(20), Intensity::Weak);
        assert_eq!(Intensity::from_zhr(10), Intensity::Weak);
    }

    #[test]
    fn intensity_labels() {
        assert_eq!(Intensity::Strong.to_string(), "strong");
        assert_eq!(Intensity::Moderate.to_string(), "moderate");
        assert_eq!(Intensity::Weak.to_string(), "weak");
    }

    #[test]
    fn empty_list_has_its_own_message() {
        let text = format_active_shower_status(&[]);
        assert_eq!(text.lines.len(), 1);
        assert_eq!(plain(&text.lines[0]), "No active meteor showers");
    }

    #[test]
    fn one_line_per_shower() {
        let text = format_active_shower_status(&[shower("GEM"), shower("URS")]);
        assert_eq!(text.lines.len(), 2);

        let geminids = plain(&text.lines[0]);
        assert!(geminids.contains("Geminids"));
        assert!(geminids.contains("12/13-12/14"));
        assert!(geminids.contains("ZHR 120"));
        assert!(geminids.ends_with("(strong)"));

        let ursids = plain(&text.lines[1]);
        assert!(ursids.contains("Ursids"));
        assert!(ursids.ends_with("(weak)"));
    }

    #[test]
    fn moderate_shower_line() {
        let text = format_active_shower_status(&[shower("ORI")]);
        let line = plain(&text.lines[0]);
        assert_eq!(line, "● Orionids  Peak 10/21-10/22 | ZHR 25 (moderate)");
    }
}
