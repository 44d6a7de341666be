use std::collections::HashMap;

use super::{COLLAPSED_ENTRY_CAP, COLLAPSED_GLYPH, ELLIPSIS, INDENT, NodeState};
use crate::core::value::{ContainerKind, Value};
use crate::core::value_path::{PathSegment, ValuePath};
use crate::core::{Error, Result};
use crate::ui::class_name::OBJECT_EDITOR;
use crate::ui::element::{Element, ElementAction, ElementIds, Tag};
use crate::widgets::leaf_editor::{LeafBinding, render_token};

pub(super) struct RenderCx<'a> {
    pub ids: &'a mut ElementIds,
    pub nodes: &'a mut HashMap<ValuePath, NodeState>,
}

/// Renders `container` into `mount`, replacing whatever the mount held.
pub(super) fn render_node(
    cx: &mut RenderCx<'_>,
    container: &Value,
    expanded: bool,
    mount: &mut Element,
    path: &ValuePath,
) -> Result<()> {
    let kind = container.container_kind().ok_or(Error::NotAContainer {
        kind: container.kind(),
    })?;

    mount.clear_children();
    mount.set_class(&OBJECT_EDITOR.elem("opened"), expanded);
    mount.push(toggle_button(cx.ids, kind, expanded, path));

    let mut inner = Element::new(cx.ids.next_id(), Tag::Div).with_class(OBJECT_EDITOR.elem("inner"));
    if expanded {
        render_expanded(cx, container, kind, &mut inner, path)?;
    } else {
        render_collapsed(cx, container, kind, &mut inner, path);
    }
    mount.push(inner);

    cx.nodes.insert(
        path.clone(),
        NodeState {
            expanded,
            mount: mount.id(),
            kind,
        },
    );
    Ok(())
}

pub(super) fn toggle_label(kind: ContainerKind, expanded: bool) -> String {
    if expanded {
        format!("{} ►", kind.type_name())
    } else {
        COLLAPSED_GLYPH.to_string()
    }
}

fn toggle_button(ids: &mut ElementIds, kind: ContainerKind, expanded: bool, path: &ValuePath) -> Element {
    Element::new(ids.next_id(), Tag::Button)
        .with_class(OBJECT_EDITOR.elem("button"))
        .with_text(toggle_label(kind, expanded))
        .with_action(ElementAction::Toggle(path.clone()))
}

fn render_collapsed(
    cx: &mut RenderCx<'_>,
    container: &Value,
    kind: ContainerKind,
    inner: &mut Element,
    path: &ValuePath,
) {
    let entries = container.entries();
    let total = entries.len();
    let shown = total.min(COLLAPSED_ENTRY_CAP);
    let truncated = total > COLLAPSED_ENTRY_CAP;

    let (open, close) = if total == 0 {
        (kind.open_brace().to_string(), kind.close_brace().to_string())
    } else {
        (format!("{} ", kind.open_brace()), format!(" {}", kind.close_brace()))
    };
    inner.push(brace(cx.ids, open));

    let mut content = Element::new(cx.ids.next_id(), Tag::Span).with_class(inner_class("content"));
    for (idx, (segment, value)) in entries.into_iter().take(shown).enumerate() {
        let mut line = Element::new(cx.ids.next_id(), Tag::Span).with_class(inner_class("line"));
        if kind == ContainerKind::Record {
            line.push(key_label(cx.ids, &segment));
        }
        line.push(summary(cx.ids, value, path.child(segment)));
        let last = idx + 1 == shown && !truncated;
        line.push(separator(cx.ids, if last { "" } else { ", " }));
        content.push(line);
    }
    if truncated {
        content.push(
            Element::new(cx.ids.next_id(), Tag::Span)
                .with_class(inner_class("ellipsis"))
                .with_text(ELLIPSIS),
        );
    }
    inner.push(content);
    inner.push(brace(cx.ids, close));
}

fn render_expanded(
    cx: &mut RenderCx<'_>,
    container: &Value,
    kind: ContainerKind,
    inner: &mut Element,
    path: &ValuePath,
) -> Result<()> {
    let entries = container.entries();
    let total = entries.len();
    let depth = path.depth();

    inner.push(brace(cx.ids, kind.open_brace()));

    let mut content = Element::new(cx.ids.next_id(), Tag::Span).with_class(inner_class("content"));
    for (idx, (segment, value)) in entries.into_iter().enumerate() {
        content.push(Element::line_break(cx.ids.next_id()));
        content.push(indent(cx.ids, depth + 1));

        let mut line = Element::new(cx.ids.next_id(), Tag::Span).with_class(inner_class("line"));
        line.push(key_label(cx.ids, &segment));
        let child_path = path.child(segment);
        match value.container_kind() {
            Some(child_kind) => {
                let mut child = Element::new(cx.ids.next_id(), Tag::Span)
                    .with_class(OBJECT_EDITOR.elem(child_kind.class_suffix()));
                render_node(cx, value, false, &mut child, &child_path)?;
                line.push(child);
            }
            None => line.push(render_token(cx.ids, LeafBinding::new(child_path, value.clone()))),
        }
        line.push(separator(cx.ids, if idx + 1 < total { "," } else { "" }));
        content.push(line);
    }
    if total > 0 {
        content.push(Element::line_break(cx.ids.next_id()));
        content.push(indent(cx.ids, depth));
    }
    inner.push(content);
    inner.push(brace(cx.ids, kind.close_brace()));
    Ok(())
}

fn summary(ids: &mut ElementIds, value: &Value, path: ValuePath) -> Element {
    let text = match value {
        Value::List(items) => format!("Array({})", items.len()),
        Value::Object(_) => "{...}".to_string(),
        _ => return render_token(ids, LeafBinding::new(path, value.clone())),
    };
    Element::new(ids.next_id(), Tag::Span)
        .with_class(OBJECT_EDITOR.elem("summary"))
        .with_text(text)
}

fn key_label(ids: &mut ElementIds, segment: &PathSegment) -> Element {
    Element::new(ids.next_id(), Tag::Span)
        .with_class(inner_class("key"))
        .with_text(segment.label())
}

fn brace(ids: &mut ElementIds, text: impl Into<String>) -> Element {
    Element::new(ids.next_id(), Tag::Span)
        .with_class(inner_class("brace"))
        .with_text(text)
}

fn separator(ids: &mut ElementIds, text: &str) -> Element {
    Element::new(ids.next_id(), Tag::Span)
        .with_class(inner_class("hyphen"))
        .with_text(text)
}

fn indent(ids: &mut ElementIds, depth: usize) -> Element {
    Element::new(ids.next_id(), Tag::Span)
        .with_class(inner_class("indent"))
        .with_text(INDENT.repeat(depth))
}

fn inner_class(part: &str) -> String {
    OBJECT_EDITOR.elem(&format!("inner_{part}"))
}
