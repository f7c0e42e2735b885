use super::view::{Backdrop, Tile};
use super::METADATA;
use ratatui::buffer::Buffer;
use ratatui::layout::{Flex, Layout, Margin, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Widget;

/// Rows per oversized digit.
const GLYPH_HEIGHT: u16 = 5;

/// Columns per oversized digit; digits are separated by one blank column.
const GLYPH_WIDTH: u16 = 3;

// 3×5 block glyphs for the day numeral.
static DIGIT_GLYPHS: [[&str; 5]; 10] = [
    ["███", "█ █", "█ █", "█ █", "███"],
    [" █ ", "██ ", " █ ", " █ ", "███"],
    ["███", "  █", "███", "█  ", "███"],
    ["███", "  █", "███", "  █", "███"],
    ["█ █", "█ █", "███", "  █", "  █"],
    ["███", "█  ", "███", "  █", "███"],
    ["███", "█  ", "███", "█ █", "███"],
    ["███", "  █", "  █", "  █", "  █"],
    ["███", "█ █", "███", "█ █", "███"],
    ["███", "█ █", "███", "  █", "███"],
];

// Vertical gradient bounds, in permille of the backdrop base color.
const SHADE_TOP: u32 = 1150;
const SHADE_BOTTOM: u32 = 820;

/// Draws a [`Tile`] into the smallest-family rectangle, centered in the
/// frame.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TileWidget {
    tile: Tile,
}

impl TileWidget {
    pub(crate) fn new(tile: Tile) -> TileWidget {
        TileWidget { tile }
    }
}

impl Widget for TileWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [tile_area] = Layout::horizontal([METADATA.tile_width])
            .flex(Flex::Center)
            .areas(area);
        let [tile_area] = Layout::vertical([METADATA.tile_height])
            .flex(Flex::Center)
            .areas(tile_area);
        // Hosts normally reserve chrome around a tile; the metadata opts out
        // so the backdrop runs to the tile edge.
        let tile_area = if METADATA.content_margins {
            tile_area.inner(Margin::new(1, 1))
        } else {
            tile_area
        };
        paint_backdrop(self.tile.backdrop, tile_area, buf);
        let margin = if self.tile.inset {
            Margin::new(3, 2)
        } else {
            Margin::new(2, 1)
        };
        let content = tile_area.inner(margin);
        if content.is_empty() {
            return;
        }
        buf.set_line(content.x, content.y, &self.tile.header, content.width);
        render_numeral(&self.tile.numeral, content, buf);
    }
}

fn paint_backdrop(backdrop: Backdrop, area: Rect, buf: &mut Buffer) {
    match backdrop {
        Backdrop::Flat(color) => buf.set_style(area, Style::new().bg(color)),
        Backdrop::Gradient((r, g, b)) => {
            let span = u32::from(area.height.saturating_sub(1)).max(1);
            for (i, y) in (area.top()..area.bottom()).enumerate() {
                let step = u32::try_from(i).unwrap_or(u32::MAX).min(span);
                let permille = SHADE_TOP - (SHADE_TOP - SHADE_BOTTOM) * step / span;
                let shaded = Color::Rgb(shade(r, permille), shade(g, permille), shade(b, permille));
                buf.set_style(Rect::new(area.x, y, area.width, 1), Style::new().bg(shaded));
            }
        }
    }
}

fn shade(component: u8, permille: u32) -> u8 {
    u8::try_from((u32::from(component) * permille / 1000).min(255)).unwrap_or(u8::MAX)
}

fn glyph(ch: char) -> Option<&'static [&'static str; 5]> {
    let index = usize::try_from(ch.to_digit(10)?).ok()?;
    DIGIT_GLYPHS.get(index)
}

// The numeral is blown up to block glyphs when every character has one;
// masked or otherwise non-numeric content is printed at its natural size.
fn render_numeral(numeral: &Span<'_>, content: Rect, buf: &mut Buffer) {
    let top = content.y.saturating_add(2);
    let glyphs = numeral
        .content
        .chars()
        .map(glyph)
        .collect::<Option<Vec<_>>>();
    match glyphs {
        Some(glyphs) if !glyphs.is_empty() => {
            let width = u16::try_from(glyphs.len())
                .unwrap_or(u16::MAX)
                .saturating_mul(GLYPH_WIDTH + 1)
                .saturating_sub(1);
            let x = content.x + content.width.saturating_sub(width) / 2;
            let bottom = content.bottom().min(top.saturating_add(GLYPH_HEIGHT));
            for (i, y) in (top..bottom).enumerate() {
                let row = glyphs
                    .iter()
                    .filter_map(|g| g.get(i).copied())
                    .collect::<Vec<_>>()
                    .join(" ");
                buf.set_string(x, y, row, numeral.style);
            }
        }
        _ => {
            let width = u16::try_from(numeral.width()).unwrap_or(u16::MAX);
            let x = content.x + content.width.saturating_sub(width) / 2;
            let y = top.saturating_add(GLYPH_HEIGHT / 2);
            if y < content.bottom() {
                buf.set_string(x, y, numeral.content.as_ref(), numeral.style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::DayEntry;
    use crate::theme::month_theme;
    use crate::tile::{HostCaps, TileView};
    use time::macros::date;
    use time::Month;

    fn row_text(buf: &Buffer, y: u16) -> String {
        let area = *buf.area();
        (area.left()..area.right())
            .filter_map(|x| buf.cell((x, y)))
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn tile_buffer(caps: HostCaps) -> Buffer {
        let entry = DayEntry::new(date!(2024 - 03 - 05));
        let theme = month_theme(Month::March);
        let tile = TileView::compose(entry, theme, caps);
        let area = Rect::new(0, 0, METADATA.tile_width, METADATA.tile_height);
        let mut buf = Buffer::empty(area);
        TileWidget::new(tile).render(area, &mut buf);
        buf
    }

    #[test]
    fn weekday_and_numeral_reach_the_buffer() {
        let buf = tile_buffer(HostCaps {
            container_background: true,
        });
        assert!(row_text(&buf, 1).contains("Tuesday"));
        let body = (0..METADATA.tile_height)
            .map(|y| row_text(&buf, y))
            .collect::<Vec<_>>()
            .join("\n");
        assert!(body.contains('█'));
    }

    #[test]
    fn gradient_fades_from_top_to_bottom() {
        let buf = tile_buffer(HostCaps {
            container_background: true,
        });
        let (r, g, b) = month_theme(Month::March).backdrop;
        assert_eq!(
            buf.cell((0, 0)).map(|cell| cell.bg),
            Some(Color::Rgb(
                shade(r, SHADE_TOP),
                shade(g, SHADE_TOP),
                shade(b, SHADE_TOP)
            ))
        );
        assert_eq!(
            buf.cell((0, METADATA.tile_height - 1)).map(|cell| cell.bg),
            Some(Color::Rgb(
                shade(r, SHADE_BOTTOM),
                shade(g, SHADE_BOTTOM),
                shade(b, SHADE_BOTTOM)
            ))
        );
    }

    #[test]
    fn flat_host_gets_a_uniform_inset_fill() {
        let buf = tile_buffer(HostCaps {
            container_background: false,
        });
        let fallback = month_theme(Month::March).backdrop_fallback;
        assert_eq!(buf.cell((0, 0)).map(|cell| cell.bg), Some(fallback));
        assert_eq!(
            buf.cell((0, METADATA.tile_height - 1)).map(|cell| cell.bg),
            Some(fallback)
        );
        // Content moves in under the manual fill.
        assert!(row_text(&buf, 1).trim().is_empty());
        assert!(row_text(&buf, 2).contains("Tuesday"));
    }

    #[test]
    fn masked_numeral_is_printed_small() {
        let theme = month_theme(Month::March);
        let caps = HostCaps {
            container_background: true,
        };
        let tile = TileView::compose_placeholder(theme, caps);
        let area = Rect::new(0, 0, METADATA.tile_width, METADATA.tile_height);
        let mut buf = Buffer::empty(area);
        TileWidget::new(tile).render(area, &mut buf);
        let body = (0..METADATA.tile_height)
            .map(|y| row_text(&buf, y))
            .collect::<Vec<_>>()
            .join("\n");
        assert!(body.contains("··"));
        assert!(!body.contains('█'));
    }
}
