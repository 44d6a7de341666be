//! Leaf editor: typed tokens for primitive values and the text they edit into.
//!
//! A token is a styled inline element whose text and class follow the
//! value's [`ValueKind`]. Committed text is parsed strictly as JSON, with
//! `f()` as the only non-JSON literal (a no-op callable).

mod session;
mod text_edit;

pub use session::{ActiveEdit, EditSession};
pub use text_edit::EditBuffer;

use crate::core::value::{Callable, Value, ValueKind, format_number};
use crate::core::value_path::{PathSegment, ValuePath};
use crate::core::{Error, Result};
use crate::ui::class_name::OBJECT_EDITOR;
use crate::ui::element::{Element, ElementAction, ElementIds, Tag};
use crate::ui::style::{Color, Style};

pub const CALLABLE_TOKEN: &str = "f()";

/// A primitive value together with the path of the field holding it.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafBinding {
    path: ValuePath,
    value: Value,
}

impl LeafBinding {
    pub fn new(path: ValuePath, value: Value) -> Self {
        Self { path, value }
    }

    /// Path of the edited field (`propPath`).
    pub fn path(&self) -> &ValuePath {
        &self.path
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Path of the container owning the field (`objPath`).
    pub fn obj_path(&self) -> ValuePath {
        self.path.parent()
    }

    pub fn prop_name(&self) -> Option<&PathSegment> {
        self.path.last()
    }
}

pub fn token_text(value: &Value) -> String {
    match value {
        Value::Callable(_) => CALLABLE_TOKEN.to_string(),
        Value::Number(n) => format_number(*n),
        Value::Bool(b) => b.to_string(),
        Value::Text(text) => serde_json::Value::String(text.clone()).to_string(),
        Value::None => "null".to_string(),
        Value::List(_) | Value::Object(_) => value.to_json().to_string(),
    }
}

pub fn token_style(kind: ValueKind) -> Style {
    match kind {
        ValueKind::Callable => Style::new().color(Color::Magenta),
        ValueKind::Number => Style::new().color(Color::Cyan),
        ValueKind::Boolean => Style::new().color(Color::Yellow),
        ValueKind::String => Style::new().color(Color::Green),
        ValueKind::Null | ValueKind::Container(_) => Style::new().color(Color::DarkGrey),
    }
}

/// Builds the non-editable token for `binding`.
pub fn render_token(ids: &mut ElementIds, binding: LeafBinding) -> Element {
    let kind = binding.value().kind();
    let text = token_text(binding.value());
    Element::new(ids.next_id(), Tag::Span)
        .with_class(OBJECT_EDITOR.elem("token"))
        .with_class(OBJECT_EDITOR.elem(kind.class_suffix()))
        .with_text(text)
        .with_action(ElementAction::Leaf(binding))
}

/// Turns a mounted token into an editable text region holding `text`.
pub fn begin_edit(token: &mut Element, text: &str) {
    token.set_editable(true);
    token.set_text(text);
    token.add_class(OBJECT_EDITOR.elem("editing"));
}

pub fn parse_edit_text(text: &str) -> Result<Value> {
    if text.trim() == CALLABLE_TOKEN {
        return Ok(Value::Callable(Callable::noop()));
    }
    serde_json::from_str::<serde_json::Value>(text)
        .map(Value::from)
        .map_err(|source| Error::malformed_edit(text, source))
}

#[cfg(test)]
mod tests {
    use super::{LeafBinding, begin_edit, parse_edit_text, render_token, token_text};
    use crate::core::Error;
    use crate::core::value::{Callable, Value};
    use crate::core::value_path::{PathSegment, ValuePath};
    use crate::ui::class_name::OBJECT_EDITOR;
    use crate::ui::element::{ElementAction, ElementIds};

    #[test]
    fn tokens_follow_value_kind() {
        assert_eq!(token_text(&Value::Number(42.0)), "42");
        assert_eq!(token_text(&Value::Number(0.5)), "0.5");
        assert_eq!(token_text(&Value::Bool(false)), "false");
        assert_eq!(token_text(&Value::Text("hello".to_string())), "\"hello\"");
        assert_eq!(token_text(&Value::None), "null");
        assert_eq!(token_text(&Value::Callable(Callable::noop())), "f()");
    }

    #[test]
    fn strings_are_escaped_when_quoted() {
        assert_eq!(token_text(&Value::Text("a\"b".to_string())), r#""a\"b""#);
    }

    #[test]
    fn numeric_text_parses_to_number() {
        assert_eq!(parse_edit_text("43").expect("number"), Value::Number(43.0));
        assert_eq!(
            parse_edit_text("\"world\"").expect("string"),
            Value::Text("world".to_string())
        );
        assert_eq!(parse_edit_text(" null ").expect("null"), Value::None);
        assert!(matches!(
            parse_edit_text("[1, {\"a\": true}]").expect("nested"),
            Value::List(_)
        ));
    }

    #[test]
    fn callable_sentinel_parses_to_callable() {
        assert!(matches!(
            parse_edit_text("f()").expect("callable"),
            Value::Callable(_)
        ));
    }

    #[test]
    fn bare_words_are_rejected() {
        let err = parse_edit_text("world").expect_err("bare word");
        assert!(matches!(err, Error::MalformedEdit { ref text, .. } if text == "world"));
        assert!(parse_edit_text("").is_err());
    }

    #[test]
    fn token_carries_kind_class_and_binding() {
        let mut ids = ElementIds::default();
        let path = ValuePath::parse("a.b").expect("path");
        let binding = LeafBinding::new(path.clone(), Value::Text("x".to_string()));
        assert_eq!(binding.obj_path().to_string(), "a");
        assert_eq!(binding.prop_name(), Some(&PathSegment::Key("b".to_string())));

        let mut token = render_token(&mut ids, binding);
        assert!(token.has_class(&OBJECT_EDITOR.elem("string")));
        assert!(matches!(token.action(), Some(ElementAction::Leaf(b)) if *b.path() == path));
        assert!(!token.is_editable());

        begin_edit(&mut token, "\"y\"");
        assert!(token.is_editable());
        assert_eq!(token.text(), "\"y\"");
    }
}
