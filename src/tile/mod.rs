mod view;
mod widget;
pub(crate) use self::view::TileView;
pub(crate) use self::widget::TileWidget;
use crate::theme::MonthTheme;
use time::Date;

/// Maps a calendar day to the theme it is drawn with.
pub(crate) trait MonthStyler {
    fn month_theme(&self, date: Date) -> MonthTheme;
}

/// Host abilities, probed once at startup and passed through rendering.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct HostCaps {
    /// Whether the host can paint the tile container with a smooth
    /// gradient.  Without it the view falls back to a flat, inset fill.
    pub(crate) container_background: bool,
}

impl HostCaps {
    pub(crate) fn detect() -> HostCaps {
        let truecolor = std::env::var("COLORTERM")
            .is_ok_and(|v| v.contains("truecolor") || v.contains("24bit"));
        HostCaps {
            container_background: truecolor,
        }
    }
}

/// What the tile declares to its host.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WidgetMetadata {
    pub(crate) display_name: &'static str,
    pub(crate) description: &'static str,
    /// Cell dimensions of the single supported (smallest) tile family.
    pub(crate) tile_width: u16,
    pub(crate) tile_height: u16,
    /// When `false`, the backdrop is painted out to the tile edge instead
    /// of stopping at host chrome.
    pub(crate) content_margins: bool,
}

pub(crate) const METADATA: WidgetMetadata = WidgetMetadata {
    display_name: "Monthly Style",
    description: "New theme of the widget every month.",
    tile_width: 22,
    tile_height: 11,
    content_margins: false,
};
