//! Flattens an element tree into styled terminal lines.

use unicode_width::UnicodeWidthChar;

use crate::ui::class_name::OBJECT_EDITOR;
use crate::ui::element::{Element, ElementAction, ElementId, Tag};
use crate::ui::span::{Span, SpanLine, line_width};
use crate::ui::style::{Color, Style};
use crate::widgets::leaf_editor::token_style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOptions {
    pub focused: Option<ElementId>,
    /// Element being edited and the char index of its cursor.
    pub editing: Option<(ElementId, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    pub row: u16,
    pub col: u16,
}

#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

pub fn layout(root: &Element, options: &LayoutOptions) -> Layout {
    let mut out = Layout {
        lines: vec![Vec::new()],
        cursor: None,
    };
    emit(root, options, &mut out);
    out
}

fn emit(el: &Element, options: &LayoutOptions, out: &mut Layout) {
    if el.tag() == Tag::Br {
        out.lines.push(Vec::new());
    } else if !el.text().is_empty() || el.is_editable() {
        let mut style = element_style(el);
        if options.focused == Some(el.id()) {
            style = style.underline().bold();
        }
        let editing = options
            .editing
            .filter(|(id, _)| *id == el.id())
            .map(|(_, cursor)| cursor);
        if editing.is_some() {
            style = style.background(Color::DarkGrey);
        }

        if let Some(cursor) = editing {
            let before: usize = el
                .text()
                .chars()
                .take(cursor)
                .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
                .sum();
            let row = out.lines.len().saturating_sub(1);
            let col = out.lines.last().map_or(0, |line| line_width(line)) + before;
            out.cursor = Some(CursorPos {
                row: row as u16,
                col: col as u16,
            });
        }
        let line = current_line(out);
        // An empty editable region still needs a cell for the cursor.
        let text = if el.text().is_empty() { " " } else { el.text() };
        line.push(Span::styled(text, style));
        if el.tag() == Tag::Button {
            line.push(Span::new(" "));
        }
    }

    for child in el.children() {
        emit(child, options, out);
    }
}

fn current_line(out: &mut Layout) -> &mut SpanLine {
    if out.lines.is_empty() {
        out.lines.push(Vec::new());
    }
    let last = out.lines.len() - 1;
    &mut out.lines[last]
}

fn element_style(el: &Element) -> Style {
    if let Some(ElementAction::Leaf(binding)) = el.action() {
        return token_style(binding.value().kind());
    }
    if el.tag() == Tag::Button {
        return Style::new().color(Color::Blue).bold();
    }
    if el.has_class(&OBJECT_EDITOR.elem("inner_key")) {
        return Style::new().color(Color::White).bold();
    }
    if el.has_class(&OBJECT_EDITOR.elem("inner_indent")) {
        return Style::default();
    }
    Style::new().color(Color::DarkGrey)
}

/// Elements carrying an action, in document order.
pub fn interactive(root: &Element) -> Vec<&Element> {
    root.descendants()
        .into_iter()
        .filter(|el| el.action().is_some())
        .collect()
}

/// Cuts `line` to at most `width` columns, ending with `…` when cut.
pub fn truncate_line(line: &[Span], width: usize) -> SpanLine {
    if line_width(line) <= width {
        return line.to_vec();
    }
    let budget = width.saturating_sub(1);
    let mut used = 0usize;
    let mut out = Vec::new();
    'spans: for span in line {
        let mut text = String::new();
        for ch in span.text.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if used + w > budget {
                if !text.is_empty() {
                    out.push(Span::styled(text, span.style));
                }
                break 'spans;
            }
            used += w;
            text.push(ch);
        }
        out.push(Span::styled(text, span.style));
    }
    if width > 0 {
        out.push(Span::new("…"));
    }
    out
}
