use crate::tile::MonthStyler;
use ratatui::style::{Color, Modifier, Style};
use time::{Date, Month};

pub(crate) type Rgb = (u8, u8, u8);

/// Style of everything outside the tile itself (surround, overlays).
pub(crate) const SURFACE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) mod overlay {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = SURFACE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = SURFACE_STYLE.add_modifier(Modifier::UNDERLINED);
}

/// One month's look: the gradient base for the backdrop, a flat stand-in
/// for hosts that can't paint a gradient, the text color, and the emoji
/// label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthTheme {
    pub(crate) backdrop: Rgb,
    pub(crate) backdrop_fallback: Color,
    pub(crate) text: Color,
    pub(crate) emoji: &'static str,
}

const fn theme(
    backdrop: Rgb,
    backdrop_fallback: Color,
    text: Color,
    emoji: &'static str,
) -> MonthTheme {
    MonthTheme {
        backdrop,
        backdrop_fallback,
        text,
        emoji,
    }
}

pub(crate) fn month_theme(month: Month) -> MonthTheme {
    match month {
        Month::January => theme((0x4e, 0x61, 0x7d), Color::DarkGray, Color::White, "⛄"),
        Month::February => theme((0x9b, 0x48, 0x64), Color::Magenta, Color::White, "❤️"),
        Month::March => theme((0x3a, 0x7d, 0x54), Color::Green, Color::White, "☘️"),
        Month::April => theme((0x56, 0x74, 0xa6), Color::Blue, Color::White, "🌧️"),
        Month::May => theme((0xc4, 0x62, 0x6b), Color::LightMagenta, Color::White, "🌺"),
        Month::June => theme((0xde, 0xa5, 0x42), Color::Yellow, Color::White, "🌤️"),
        Month::July => theme((0x26, 0x8b, 0xa5), Color::Cyan, Color::White, "🏖️"),
        Month::August => theme((0xd6, 0x7d, 0x3e), Color::LightYellow, Color::White, "⛱️"),
        Month::September => theme((0x92, 0x5f, 0x2f), Color::LightRed, Color::White, "📚"),
        Month::October => theme((0x30, 0x2a, 0x38), Color::Black, Color::LightYellow, "👻"),
        Month::November => theme((0x79, 0x4e, 0x36), Color::Red, Color::White, "🦃"),
        Month::December => theme((0x8e, 0x2c, 0x36), Color::LightRed, Color::White, "🎄"),
    }
}

/// The built-in month-to-theme mapping.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthlyPalette;

impl MonthStyler for MonthlyPalette {
    fn month_theme(&self, date: Date) -> MonthTheme {
        month_theme(date.month())
    }
}
