//! Kotlin literal syntax for annotation values.
//!
//! [`render`] writes an [`AnnotationValue`] the way it must appear in Kotlin
//! source; [`parse_value`] reads such text back. Singletons and other classes
//! both render as class literals, so [`parse_value_in`] consults the
//! declaration graph to tell them apart.

use crate::annotations::{AnnotationValue, DeclarationRef, RefKind};
use crate::types::TypeResolver;
use imogen_core::DeclarationKind;
use std::fmt::Write;
use thiserror::Error;

/// Errors from [`parse_value`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("unexpected end of literal")]
    UnexpectedEnd,

    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { offset: usize, found: char },

    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    #[error("invalid number literal {0}")]
    InvalidNumber(String),

    #[error("trailing input at offset {offset}")]
    TrailingInput { offset: usize },
}

/// Render a value as a Kotlin literal.
pub fn render(value: &AnnotationValue) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &AnnotationValue) {
    match value {
        AnnotationValue::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
        // The magnitude of i64::MIN does not fit a Kotlin integer literal
        AnnotationValue::Integer(i64::MIN) => out.push_str("Long.MIN_VALUE"),
        AnnotationValue::Integer(value) => {
            let _ = write!(out, "{value}");
        }
        AnnotationValue::Float(value) => {
            if value.is_nan() {
                out.push_str("Float.NaN");
            } else if value.is_infinite() {
                out.push_str(if *value > 0.0 {
                    "Float.POSITIVE_INFINITY"
                } else {
                    "Float.NEGATIVE_INFINITY"
                });
            } else {
                let _ = write!(out, "{value:?}F");
            }
        }
        AnnotationValue::Double(value) => {
            if value.is_nan() {
                out.push_str("Double.NaN");
            } else if value.is_infinite() {
                out.push_str(if *value > 0.0 {
                    "Double.POSITIVE_INFINITY"
                } else {
                    "Double.NEGATIVE_INFINITY"
                });
            } else {
                let _ = write!(out, "{value:?}");
            }
        }
        AnnotationValue::String(value) => {
            out.push('"');
            for c in value.chars() {
                escape_char(out, c, '"');
            }
            out.push('"');
        }
        AnnotationValue::Char(value) => {
            out.push('\'');
            escape_char(out, *value, '\'');
            out.push('\'');
        }
        AnnotationValue::Reference(reference) => {
            out.push_str(&reference.qualified_name);
            if reference.kind != RefKind::EnumConstant {
                out.push_str("::class");
            }
        }
        AnnotationValue::Array(values) => {
            out.push('[');
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, value);
            }
            out.push(']');
        }
        AnnotationValue::Unsupported(text) => out.push_str(text),
    }
}

fn escape_char(out: &mut String, c: char, quote: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{8}' => out.push_str("\\b"),
        '$' if quote == '"' => out.push_str("\\$"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if c.is_control() => {
            let _ = write!(out, "\\u{:04X}", c as u32);
        }
        c => out.push(c),
    }
}

/// Parse a rendered Kotlin literal back into a value.
///
/// Class literals read back as [`RefKind::Class`].
pub fn parse_value(text: &str) -> Result<AnnotationValue, LiteralError> {
    Parser::new(text, None).parse()
}

/// Parse a rendered Kotlin literal, typing references by their declaration.
///
/// A class literal naming an `object` in the graph reads back as
/// [`RefKind::Singleton`]; names the graph does not know keep the kind their
/// syntax implies.
pub fn parse_value_in(
    text: &str,
    resolver: TypeResolver<'_>,
) -> Result<AnnotationValue, LiteralError> {
    Parser::new(text, Some(resolver)).parse()
}

struct Parser<'t, 'g> {
    text: &'t str,
    offset: usize,
    resolver: Option<TypeResolver<'g>>,
}

impl<'t, 'g> Parser<'t, 'g> {
    fn new(text: &'t str, resolver: Option<TypeResolver<'g>>) -> Self {
        Self {
            text,
            offset: 0,
            resolver,
        }
    }

    fn parse(mut self) -> Result<AnnotationValue, LiteralError> {
        let value = self.value()?;
        if self.offset < self.text.len() {
            return Err(LiteralError::TrailingInput {
                offset: self.offset,
            });
        }
        Ok(value)
    }

    fn reference(&self, name: &str, written: RefKind) -> AnnotationValue {
        let kind = match self
            .resolver
            .and_then(|resolver| resolver.graph().get(name))
            .map(|declaration| declaration.kind)
        {
            Some(DeclarationKind::Object) => RefKind::Singleton,
            Some(DeclarationKind::EnumEntry) => RefKind::EnumConstant,
            Some(_) => RefKind::Class,
            None => written,
        };
        AnnotationValue::Reference(DeclarationRef::new(name, kind))
    }

    fn peek(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    fn next(&mut self) -> Result<char, LiteralError> {
        let c = self.peek().ok_or(LiteralError::UnexpectedEnd)?;
        self.offset += c.len_utf8();
        Ok(c)
    }

    fn expect(&mut self, expected: char) -> Result<(), LiteralError> {
        let offset = self.offset;
        match self.next()? {
            c if c == expected => Ok(()),
            found => Err(LiteralError::UnexpectedChar { offset, found }),
        }
    }

    fn value(&mut self) -> Result<AnnotationValue, LiteralError> {
        match self.peek().ok_or(LiteralError::UnexpectedEnd)? {
            '[' => self.array(),
            '"' => self.string(),
            '\'' => self.char_literal(),
            c if c == '-' || c.is_ascii_digit() => self.number(),
            c if c == '_' || c.is_alphabetic() => self.name(),
            found => Err(LiteralError::UnexpectedChar {
                offset: self.offset,
                found,
            }),
        }
    }

    fn array(&mut self) -> Result<AnnotationValue, LiteralError> {
        self.expect('[')?;
        let mut values = Vec::new();

        if self.peek() == Some(']') {
            self.offset += 1;
            return Ok(AnnotationValue::Array(values));
        }

        loop {
            values.push(self.value()?);
            let offset = self.offset;
            match self.next()? {
                ']' => return Ok(AnnotationValue::Array(values)),
                ',' => {
                    while self.peek() == Some(' ') {
                        self.offset += 1;
                    }
                }
                found => return Err(LiteralError::UnexpectedChar { offset, found }),
            }
        }
    }

    fn string(&mut self) -> Result<AnnotationValue, LiteralError> {
        self.expect('"')?;
        let mut value = String::new();
        loop {
            match self.next()? {
                '"' => return Ok(AnnotationValue::String(value)),
                '\\' => value.push(self.escape()?),
                c => value.push(c),
            }
        }
    }

    fn char_literal(&mut self) -> Result<AnnotationValue, LiteralError> {
        self.expect('\'')?;
        let value = match self.next()? {
            '\\' => self.escape()?,
            c => c,
        };
        self.expect('\'')?;
        Ok(AnnotationValue::Char(value))
    }

    /// Character after a backslash
    fn escape(&mut self) -> Result<char, LiteralError> {
        let offset = self.offset - 1;
        Ok(match self.next()? {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'b' => '\u{8}',
            'u' => {
                let end = self.offset + 4;
                let digits = self
                    .text
                    .get(self.offset..end)
                    .ok_or(LiteralError::InvalidEscape { offset })?;
                let code = u32::from_str_radix(digits, 16)
                    .map_err(|_| LiteralError::InvalidEscape { offset })?;
                self.offset = end;
                char::from_u32(code).ok_or(LiteralError::InvalidEscape { offset })?
            }
            c @ ('\\' | '"' | '\'' | '$') => c,
            _ => return Err(LiteralError::InvalidEscape { offset }),
        })
    }

    fn number(&mut self) -> Result<AnnotationValue, LiteralError> {
        let start = self.offset;
        if self.peek() == Some('-') {
            self.offset += 1;
        }

        let mut fractional = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => {}
                '.' | 'e' | 'E' => fractional = true,
                '+' | '-' if matches!(self.text[..self.offset].chars().last(), Some('e' | 'E')) => {}
                _ => break,
            }
            self.offset += 1;
        }

        let digits = &self.text[start..self.offset];
        let invalid = || LiteralError::InvalidNumber(digits.to_string());

        if matches!(self.peek(), Some('F' | 'f')) {
            self.offset += 1;
            return digits
                .parse::<f32>()
                .map(AnnotationValue::Float)
                .map_err(|_| invalid());
        }

        if fractional {
            digits
                .parse::<f64>()
                .map(AnnotationValue::Double)
                .map_err(|_| invalid())
        } else {
            digits
                .parse::<i64>()
                .map(AnnotationValue::Integer)
                .map_err(|_| invalid())
        }
    }

    /// `true`, `false`, a numeric constant, an enum constant or a class literal
    fn name(&mut self) -> Result<AnnotationValue, LiteralError> {
        let start = self.offset;
        while let Some(c) = self.peek() {
            if c == '_' || c == '.' || c.is_alphanumeric() {
                self.offset += c.len_utf8();
            } else {
                break;
            }
        }
        let name = &self.text[start..self.offset];

        if self.text[self.offset..].starts_with("::class") {
            self.offset += "::class".len();
            return Ok(self.reference(name, RefKind::Class));
        }

        Ok(match name {
            "true" => AnnotationValue::Bool(true),
            "false" => AnnotationValue::Bool(false),
            "Float.NaN" => AnnotationValue::Float(f32::NAN),
            "Float.POSITIVE_INFINITY" => AnnotationValue::Float(f32::INFINITY),
            "Float.NEGATIVE_INFINITY" => AnnotationValue::Float(f32::NEG_INFINITY),
            "Double.NaN" => AnnotationValue::Double(f64::NAN),
            "Double.POSITIVE_INFINITY" => AnnotationValue::Double(f64::INFINITY),
            "Double.NEGATIVE_INFINITY" => AnnotationValue::Double(f64::NEG_INFINITY),
            "Long.MIN_VALUE" => AnnotationValue::Integer(i64::MIN),
            _ => self.reference(name, RefKind::EnumConstant),
        })
    }
}
