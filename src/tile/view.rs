use super::HostCaps;
use crate::provider::DayEntry;
use crate::theme::{MonthTheme, Rgb};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use time::Date;

// Fillers for low-fidelity slots.
static WEEKDAY_MASK: &str = "──────";
static NUMERAL_MASK: &str = "··";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Backdrop {
    /// The host paints the whole container with a vertical gradient of the
    /// base color.
    Gradient(Rgb),
    /// Manual fill for hosts without the container primitive.
    Flat(Color),
}

/// Everything needed to draw one tile, independent of where it ends up.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Tile {
    pub(crate) backdrop: Backdrop,
    /// Pull the content in by an extra margin; set when the backdrop is a
    /// manual fill.
    pub(crate) inset: bool,
    /// Emoji label followed by the full weekday name.
    pub(crate) header: Line<'static>,
    /// Day-of-month, drawn oversized by the adapter.
    pub(crate) numeral: Span<'static>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct TileView;

impl TileView {
    pub(crate) fn compose(entry: DayEntry, theme: MonthTheme, caps: HostCaps) -> Tile {
        let text = text_style(theme);
        Tile {
            backdrop: backdrop(theme, caps),
            inset: !caps.container_background,
            header: header(theme, Span::styled(weekday_label(entry.date), text)),
            numeral: Span::styled(day_label(entry.date), text),
        }
    }

    /// Low-fidelity variant for placeholder slots: same layout and colors,
    /// with the date-dependent text masked out.
    pub(crate) fn compose_placeholder(theme: MonthTheme, caps: HostCaps) -> Tile {
        let text = text_style(theme).add_modifier(Modifier::DIM);
        Tile {
            backdrop: backdrop(theme, caps),
            inset: !caps.container_background,
            header: header(theme, Span::styled(WEEKDAY_MASK, text)),
            numeral: Span::styled(NUMERAL_MASK, text),
        }
    }
}

fn backdrop(theme: MonthTheme, caps: HostCaps) -> Backdrop {
    if caps.container_background {
        Backdrop::Gradient(theme.backdrop)
    } else {
        Backdrop::Flat(theme.backdrop_fallback)
    }
}

fn text_style(theme: MonthTheme) -> Style {
    Style::new().fg(theme.text).add_modifier(Modifier::BOLD)
}

fn header(theme: MonthTheme, weekday: Span<'static>) -> Line<'static> {
    Line::from_iter([Span::raw(theme.emoji), Span::raw(" "), weekday])
}

fn weekday_label(date: Date) -> String {
    date.weekday().to_string()
}

fn day_label(date: Date) -> String {
    date.day().to_string()
}
