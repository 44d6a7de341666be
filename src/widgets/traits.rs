use crate::core::Result;
use crate::core::event::ChangeEvent;
use crate::terminal::{KeyEvent, TerminalSize};
use crate::ui::layout::CursorPos;
use crate::ui::span::{Span, SpanLine};

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub terminal_size: TerminalSize,
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
    /// Where the terminal cursor belongs, relative to the first line.
    pub cursor: Option<CursorPos>,
}

impl DrawOutput {
    pub fn plain_lines(lines: Vec<String>) -> Self {
        Self {
            lines: lines.into_iter().map(|line| vec![Span::new(line)]).collect(),
            cursor: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Drawable
// ---------------------------------------------------------------------------

pub trait Drawable {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput;
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    /// Edits committed while handling the gesture, in commit order.
    pub changes: Vec<ChangeEvent>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            handled: true,
            request_render: false,
            changes: Vec::new(),
        }
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            changes: Vec::new(),
        }
    }

    pub fn with_change(event: ChangeEvent) -> Self {
        Self {
            handled: true,
            request_render: true,
            changes: vec![event],
        }
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.request_render |= other.request_render;
        self.changes.extend(other.changes);
    }
}

// ---------------------------------------------------------------------------
// Interactive
// ---------------------------------------------------------------------------

pub trait Interactive {
    fn on_key(&mut self, key: KeyEvent) -> Result<InteractionResult>;

    fn on_tick(&mut self) -> Result<InteractionResult> {
        Ok(InteractionResult::ignored())
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawOutput, InteractionResult};

    #[test]
    fn merge_ors_flags_and_keeps_changes() {
        let mut result = InteractionResult::consumed();
        result.merge(InteractionResult::ignored());
        assert!(result.handled);
        assert!(!result.request_render);

        result.merge(InteractionResult::handled());
        assert!(result.request_render);
        assert!(result.changes.is_empty());
    }

    #[test]
    fn plain_lines_wraps_each_line_in_one_span() {
        let out = DrawOutput::plain_lines(vec!["a".to_string(), "bc".to_string()]);
        assert_eq!(out.lines.len(), 2);
        assert_eq!(out.lines[1][0].text, "bc");
        assert!(out.cursor.is_none());
    }
}
