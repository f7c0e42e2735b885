use crate::provider::DayEntry;
use crate::theme::{
    overlay::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    SURFACE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 16;
const OUTER_HEIGHT: u16 = 8;

/// Digit cells in a complete YYYYMMDD entry; also the cursor position at
/// which ENTER becomes active.
const CELLS: usize = 8;

static FALLBACK: [&str; CELLS] = ["Y", "Y", "Y", "Y", "M", "M", "D", "D"];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct JumpTo;

impl StatefulWidget for JumpTo {
    type State = JumpToState;

    /*
     * ................
     * .┌ Show Day… ─┐.
     * .│            │.
     * .│ YYYY-MM-DD │.
     * .│            │.
     * .│  [ENTER]   │.
     * .└────────────┘.
     * ................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(SURFACE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Show Day… ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct JumpToState {
    cells: [Option<u8>; CELLS],
    pos: usize,
}

impl JumpToState {
    pub(crate) fn new() -> JumpToState {
        JumpToState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", SURFACE_STYLE),
            self.to_line(),
            Line::styled("", SURFACE_STYLE),
            // Style a span and convert it to a line rather than creating a
            // styled line directly so that only the "[ENTER]" text and not
            // any of its centering padding will be underlined:
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == CELLS {
                    READY_ENTER_STYLE
                } else {
                    SURFACE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, (cell, fallback)) in std::iter::zip(self.cells, FALLBACK).enumerate() {
            if i == 4 || i == 6 {
                spans.push(Span::styled("-", SURFACE_STYLE));
            }
            spans.push(match cell {
                Some(d) => Span::styled(format!("{d}"), SURFACE_STYLE),
                None => Span::styled(fallback, UNFILLED_CELL_STYLE),
            });
        }
        Line::from_iter(spans)
    }

    pub(crate) fn handle_input(&mut self, input: JumpToInput) -> JumpToOutput {
        match (input, self.pos) {
            (JumpToInput::Digit(d), 0..CELLS) => {
                self.cells[self.pos] = Some(d);
                self.pos += 1;
                JumpToOutput::Ok
            }
            (JumpToInput::Backspace, 1..) => {
                self.pos -= 1;
                self.cells[self.pos] = None;
                JumpToOutput::Ok
            }
            (JumpToInput::Enter, CELLS) => {
                let mut year = 0i32;
                let mut month = 0u8;
                let mut day = 0u8;
                for (i, cell) in self.cells.iter().enumerate() {
                    let d = cell.expect("all cells should be filled at the confirm position");
                    match i {
                        0..4 => year = year * 10 + i32::from(d),
                        4..6 => month = month * 10 + d,
                        _ => day = day * 10 + d,
                    }
                }
                match DayEntry::from_components(year, month, day) {
                    Ok(entry) => JumpToOutput::Jump(entry),
                    Err(_) => JumpToOutput::Invalid,
                }
            }
            _ => JumpToOutput::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToInput {
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToOutput {
    Ok,
    Invalid,
    Jump(DayEntry),
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn typed(digits: &str) -> JumpToState {
        let mut state = JumpToState::new();
        for c in digits.chars() {
            let d = u8::try_from(c.to_digit(10).unwrap()).unwrap();
            assert_eq!(state.handle_input(JumpToInput::Digit(d)), JumpToOutput::Ok);
        }
        state
    }

    #[test]
    fn full_entry_confirms_to_a_day() {
        let mut state = typed("20240305");
        assert_eq!(state.handle_input(JumpToInput::Digit(1)), JumpToOutput::Invalid);
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Jump(DayEntry::new(date!(2024 - 03 - 05)))
        );
    }

    #[test]
    fn nonexistent_dates_are_rejected_on_confirm() {
        let mut state = typed("20230229");
        assert_eq!(state.handle_input(JumpToInput::Enter), JumpToOutput::Invalid);
    }

    #[test]
    fn enter_is_inert_until_all_cells_are_filled() {
        let mut state = typed("2024");
        assert_eq!(state.handle_input(JumpToInput::Enter), JumpToOutput::Invalid);
    }

    #[test]
    fn backspace_reopens_the_previous_cell() {
        let mut state = typed("20240305");
        assert_eq!(
            state.handle_input(JumpToInput::Backspace),
            JumpToOutput::Ok
        );
        assert_eq!(state.handle_input(JumpToInput::Digit(6)), JumpToOutput::Ok);
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Jump(DayEntry::new(date!(2024 - 03 - 06)))
        );
    }

    #[test]
    fn backspace_at_the_start_is_invalid() {
        let mut state = JumpToState::new();
        assert_eq!(
            state.handle_input(JumpToInput::Backspace),
            JumpToOutput::Invalid
        );
    }
}
