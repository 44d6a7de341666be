use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    /// Label used in front of an entry (`key: `).
    pub fn label(&self) -> String {
        format!("{self}: ")
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl Serialize for PathSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Key(key) => serializer.serialize_str(key),
            Self::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[PathSegment] {
        self.segments.as_slice()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    pub fn parent(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        Self { segments }
    }

    /// True when `self` lies strictly below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &ValuePath) -> bool {
        self.segments.len() > ancestor.segments.len()
            && self.segments[..ancestor.segments.len()] == *ancestor.segments
    }

    pub fn parse(input: &str) -> Result<Self, ValuePathParseError> {
        parse_path(input)
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for ValuePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<Vec<PathSegment>> for ValuePath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self::new(segments)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValuePathParseError {
    message: String,
}

impl ValuePathParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn parse_path(input: &str) -> Result<ValuePath, ValuePathParseError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Ok(ValuePath::empty());
    }

    let chars: Vec<char> = raw.chars().collect();
    let mut idx = 0usize;
    let mut out = Vec::<PathSegment>::new();

    while idx < chars.len() {
        let ch = chars[idx];
        if ch == '.' {
            if out.is_empty() {
                return Err(ValuePathParseError::new("path cannot start with '.'"));
            }
            idx += 1;
            out.push(parse_dotted(&chars, &mut idx)?);
            continue;
        }

        if ch == '[' {
            out.push(parse_bracket_segment(&chars, &mut idx)?);
            continue;
        }

        if out.is_empty() {
            out.push(parse_dotted(&chars, &mut idx)?);
            continue;
        }

        return Err(ValuePathParseError::new(format!(
            "unexpected character '{}' at position {}",
            ch, idx
        )));
    }

    Ok(ValuePath::new(out))
}

fn parse_dotted(chars: &[char], idx: &mut usize) -> Result<PathSegment, ValuePathParseError> {
    let start = *idx;
    while *idx < chars.len() {
        let ch = chars[*idx];
        if ch == '.' || ch == '[' || ch == ']' {
            break;
        }
        *idx += 1;
    }
    if *idx == start {
        return Err(ValuePathParseError::new(format!(
            "expected key at position {}",
            start
        )));
    }
    let key = chars[start..*idx].iter().collect::<String>();
    Ok(segment_from_text(key))
}

fn parse_bracket_segment(
    chars: &[char],
    idx: &mut usize,
) -> Result<PathSegment, ValuePathParseError> {
    *idx += 1;
    if *idx >= chars.len() {
        return Err(ValuePathParseError::new("unterminated '[' segment"));
    }

    let ch = chars[*idx];
    if ch == '"' || ch == '\'' {
        let quote = ch;
        *idx += 1;
        let mut key = String::new();
        let mut closed = false;
        while *idx < chars.len() {
            let c = chars[*idx];
            *idx += 1;
            if c == '\\' {
                let Some(next) = chars.get(*idx).copied() else {
                    return Err(ValuePathParseError::new("unterminated escape in quoted key"));
                };
                key.push(next);
                *idx += 1;
                continue;
            }
            if c == quote {
                closed = true;
                break;
            }
            key.push(c);
        }
        if !closed {
            return Err(ValuePathParseError::new("unterminated quoted key"));
        }
        if chars.get(*idx).copied() != Some(']') {
            return Err(ValuePathParseError::new("expected closing ']'"));
        }
        *idx += 1;
        return Ok(PathSegment::Key(key));
    }

    let start = *idx;
    while *idx < chars.len() && chars[*idx] != ']' {
        *idx += 1;
    }
    if *idx >= chars.len() {
        return Err(ValuePathParseError::new("unterminated '[' segment"));
    }
    let raw = chars[start..*idx].iter().collect::<String>();
    *idx += 1;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValuePathParseError::new("empty bracket segment"));
    }
    Ok(segment_from_text(trimmed.to_string()))
}

fn segment_from_text(text: String) -> PathSegment {
    if !text.is_empty()
        && text.chars().all(|ch| ch.is_ascii_digit())
        && let Ok(index) = text.parse::<usize>()
    {
        return PathSegment::Index(index);
    }
    PathSegment::Key(text)
}
