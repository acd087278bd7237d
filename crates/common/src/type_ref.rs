//! Type expressions as written in source declarations
//!
//! A `TypeRef` is the parsed form of a declared type such as `String`,
//! `java.util.List<com.acme.Order>`, `Map<String, List<T>>` or `Item[]`.
//! Descriptor files carry them as plain strings; serde goes through
//! [`TypeRef::parse`] and `Display`.

use crate::{DocError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A (possibly generic, possibly array) type reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    /// Type name as written, qualified or simple (e.g. "java.util.List", "T")
    pub name: String,
    /// Generic arguments in declaration order
    pub args: Vec<TypeRef>,
    /// Number of trailing `[]`
    pub array_dims: usize,
}

impl TypeRef {
    /// A plain, non-generic type reference
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            array_dims: 0,
        }
    }

    /// A generic type reference with the given arguments
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            args,
            array_dims: 0,
        }
    }

    /// Wrap a type in one more array dimension
    pub fn array_of(element: TypeRef) -> Self {
        Self {
            array_dims: element.array_dims + 1,
            ..element
        }
    }

    /// Parse a type expression
    ///
    /// # Examples
    /// ```
    /// use paramdoc_common::TypeRef;
    ///
    /// let ty = TypeRef::parse("java.util.Map<String, List<Order>>").unwrap();
    /// assert_eq!(ty.simple_name(), "Map");
    /// assert_eq!(ty.args.len(), 2);
    /// assert_eq!(ty.label(), "Map<String, List<Order>>");
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut cursor = Cursor { src: text, pos: 0 };
        let ty = parse_type(&mut cursor)?;
        cursor.skip_ws();
        if cursor.pos != text.len() {
            return Err(cursor.error("unexpected trailing input"));
        }
        Ok(ty)
    }

    /// Name without package qualifier
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Human-readable label built from simple names (`List<Order>`, `Item[]`)
    pub fn label(&self) -> String {
        let mut out = self.simple_name().to_string();
        if !self.args.is_empty() {
            let args: Vec<String> = self.args.iter().map(TypeRef::label).collect();
            out.push('<');
            out.push_str(&args.join(", "));
            out.push('>');
        }
        out.push_str(&"[]".repeat(self.array_dims));
        out
    }

    /// Whether this is an array type
    pub fn is_array(&self) -> bool {
        self.array_dims > 0
    }

    /// Element type of an array, `None` for non-array types
    pub fn element(&self) -> Option<TypeRef> {
        if self.array_dims == 0 {
            return None;
        }
        Some(Self {
            name: self.name.clone(),
            args: self.args.clone(),
            array_dims: self.array_dims - 1,
        })
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        for _ in 0..self.array_dims {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

impl FromStr for TypeRef {
    type Err = DocError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = DocError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let src = self.src;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '.' || c == '$' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        if self.pos > start {
            Some(&src[start..self.pos])
        } else {
            None
        }
    }

    fn error(&self, msg: &str) -> DocError {
        DocError::Parse(format!(
            "invalid type expression '{}' at offset {}: {}",
            self.src, self.pos, msg
        ))
    }
}

fn parse_type(cursor: &mut Cursor<'_>) -> Result<TypeRef> {
    // Wildcards: `?`, `? extends X`, `? super X`
    if cursor.eat('?') {
        let save = cursor.pos;
        return match cursor.ident() {
            Some("extends") | Some("super") => parse_type(cursor),
            _ => {
                cursor.pos = save;
                Ok(TypeRef::named("Object"))
            }
        };
    }

    let name = cursor
        .ident()
        .ok_or_else(|| cursor.error("expected type name"))?
        .to_string();

    let mut args = Vec::new();
    if cursor.eat('<') && !cursor.eat('>') {
        loop {
            args.push(parse_type(cursor)?);
            if cursor.eat(',') {
                continue;
            }
            if cursor.eat('>') {
                break;
            }
            return Err(cursor.error("expected ',' or '>'"));
        }
    }

    let mut array_dims = 0;
    while cursor.eat('[') {
        if !cursor.eat(']') {
            return Err(cursor.error("expected ']'"));
        }
        array_dims += 1;
    }

    Ok(TypeRef {
        name,
        args,
        array_dims,
    })
}
