//! A parser library for Paradox script files.
//!
//! Both games on either side of the conversion store their data in the same
//! loosely structured text format: `key = value` assignments, `{}` blocks
//! and bare value lists. Converter configuration files use it too.
//!
//! Files are read as UTF-8 when they decode cleanly (with or without a
//! byte-order mark) and as `WINDOWS_1252` otherwise.

pub mod de;
pub mod error;

pub use de::from_node;
pub use error::ParseError;

use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1252;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Represents a token scanned from a script file.
#[derive(Debug, Clone, PartialEq)]
pub enum PdxToken {
    /// An unquoted word (keys, tags, enum-like values, dates).
    Identifier(String),
    /// A quoted string value.
    StringValue(String),
    /// A floating point number.
    FloatValue(f64),
    /// An integer number.
    IntValue(i64),
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `=`
    Equals,
}

impl PdxToken {
    fn describe(&self) -> String {
        match self {
            PdxToken::Identifier(s) => s.clone(),
            PdxToken::StringValue(s) => format!("\"{}\"", s),
            PdxToken::FloatValue(f) => f.to_string(),
            PdxToken::IntValue(i) => i.to_string(),
            PdxToken::LeftBrace => "{".to_string(),
            PdxToken::RightBrace => "}".to_string(),
            PdxToken::Equals => "=".to_string(),
        }
    }
}

/// Represents an item in the parse tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PdxAstItem {
    /// A `{ ... }` block, or the top level of a file.
    AssignmentList,
    /// A `key = value` assignment. Always has exactly two children.
    Assignment,
    /// An unquoted word.
    Identifier(String),
    /// A quoted string.
    StringValue(String),
    /// A float value.
    FloatValue(f64),
    /// An integer value.
    IntValue(i64),
}

/// A node in the parse tree.
#[derive(Debug, Clone, PartialEq)]
pub struct PdxNode {
    /// Child nodes (block members, or key and value of an assignment).
    pub children: Vec<PdxNode>,
    /// The type of item and its data.
    pub entry: PdxAstItem,
}

impl PdxNode {
    fn terminal(entry: PdxAstItem) -> Self {
        Self {
            children: Vec::new(),
            entry,
        }
    }

    fn list(children: Vec<PdxNode>) -> Self {
        Self {
            children,
            entry: PdxAstItem::AssignmentList,
        }
    }

    /// Textual form of a terminal node; `None` for blocks and assignments.
    ///
    /// Numbers are rendered back to text so numeric keys such as province
    /// ids can be treated like any other key.
    pub fn scalar(&self) -> Option<String> {
        match &self.entry {
            PdxAstItem::Identifier(s) | PdxAstItem::StringValue(s) => Some(s.clone()),
            PdxAstItem::IntValue(i) => Some(i.to_string()),
            PdxAstItem::FloatValue(f) => Some(f.to_string()),
            PdxAstItem::AssignmentList | PdxAstItem::Assignment => None,
        }
    }

    /// Whether this node is a `{ ... }` block.
    pub fn is_block(&self) -> bool {
        matches!(self.entry, PdxAstItem::AssignmentList)
    }

    /// Iterates the `key = value` members of a block, in file order.
    ///
    /// Bare values in the block are skipped.
    pub fn assignments(&self) -> impl Iterator<Item = (&PdxNode, &PdxNode)> {
        self.children.iter().filter_map(|child| match child.entry {
            PdxAstItem::Assignment => match child.children.as_slice() {
                [key, value] => Some((key, value)),
                _ => None,
            },
            _ => None,
        })
    }

    /// All values assigned to `key` in this block, in file order.
    ///
    /// Script files routinely repeat keys, so this yields every match.
    pub fn values_of<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a PdxNode> + 'a {
        self.assignments()
            .filter(move |(k, _)| k.scalar().as_deref() == Some(key))
            .map(|(_, v)| v)
    }
}

/// Decodes raw file contents.
pub fn decode_contents(bytes: &[u8]) -> String {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, _) = WINDOWS_1252.decode(body);
            text.into_owned()
        }
    }
}

pub trait PdxTxt {
    /// Reads and tokenizes a script file.
    fn open_txt(path: &Path) -> std::io::Result<Vec<PdxToken>> {
        let bytes = fs::read(path)?;
        Ok(Self::tokenize(&decode_contents(&bytes)))
    }

    fn tokenize(contents: &str) -> Vec<PdxToken> {
        let mut tokens: Vec<PdxToken> = Vec::new();
        let mut chars = contents.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                c if c.is_whitespace() => {}
                '#' => {
                    while chars.next_if(|&nc| nc != '\n' && nc != '\r').is_some() {}
                }
                '{' => tokens.push(PdxToken::LeftBrace),
                '}' => tokens.push(PdxToken::RightBrace),
                '=' => tokens.push(PdxToken::Equals),
                '"' => {
                    let mut s = String::new();
                    while let Some(nc) = chars.next() {
                        match nc {
                            '"' => break,
                            '\\' if chars.peek() == Some(&'"') => {
                                s.push('"');
                                chars.next();
                            }
                            _ => s.push(nc),
                        }
                    }
                    tokens.push(PdxToken::StringValue(s));
                }
                _ => {
                    let mut s = String::from(c);
                    while let Some(nc) = chars.next_if(|&nc| {
                        !(nc.is_whitespace() || matches!(nc, '=' | '{' | '}' | '#' | '"'))
                    }) {
                        s.push(nc);
                    }
                    tokens.push(classify_word(s));
                }
            }
        }
        tokens
    }

    /// Parses a token stream into a tree rooted at an `AssignmentList`.
    fn parse(tokens: Vec<PdxToken>) -> Result<PdxNode, ParseError> {
        if tokens.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
        };
        let root = parser.block(false)?;
        if parser.pos != tokens.len() {
            return Err(ParseError::UnconsumedTokens {
                position: parser.pos,
                remaining: tokens.len() - parser.pos,
            });
        }
        Ok(root)
    }

    /// Convenience for `open_txt` followed by `parse`.
    ///
    /// An empty file yields an empty block instead of `EmptyInput`.
    fn parse_file(path: &Path) -> Result<PdxNode, ParseError> {
        let tokens = Self::open_txt(path).map_err(|e| ParseError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if tokens.is_empty() {
            return Ok(PdxNode::list(Vec::new()));
        }
        Self::parse(tokens)
    }
}

pub struct DefaultPdxTxt {}
impl PdxTxt for DefaultPdxTxt {}

fn classify_word(s: String) -> PdxToken {
    if let Ok(i) = s.parse::<i64>() {
        return PdxToken::IntValue(i);
    }
    // Rust accepts "inf" and "NaN" as floats; in script files those are
    // words (and "Nan" is a real country name).
    let numeric = s
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+'));
    match s.parse::<f64>() {
        Ok(f) if numeric => PdxToken::FloatValue(f),
        _ => PdxToken::Identifier(s),
    }
}

struct Parser<'t> {
    tokens: &'t [PdxToken],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t PdxToken> {
        self.tokens.get(self.pos)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(tok) => ParseError::UnexpectedToken {
                position: self.pos,
                token: tok.describe(),
                expected: expected.to_string(),
            },
            None => ParseError::UnexpectedEof { position: self.pos },
        }
    }

    /// Parses block members until `}` (nested) or end of input (top level).
    fn block(&mut self, nested: bool) -> Result<PdxNode, ParseError> {
        let mut children = Vec::new();
        loop {
            let Some(tok) = self.peek() else {
                if nested {
                    return Err(ParseError::UnexpectedEof { position: self.pos });
                }
                return Ok(PdxNode::list(children));
            };
            match tok {
                PdxToken::RightBrace if nested => {
                    self.pos += 1;
                    return Ok(PdxNode::list(children));
                }
                PdxToken::RightBrace | PdxToken::Equals => {
                    return Err(self.unexpected("a key or value"));
                }
                PdxToken::LeftBrace => {
                    // Anonymous block inside a list, e.g. `{ { 1 2 } { 3 4 } }`.
                    self.pos += 1;
                    children.push(self.block(true)?);
                }
                _ => {
                    let lhs = self.terminal()?;
                    if self.peek() == Some(&PdxToken::Equals) {
                        let eq_pos = self.pos;
                        self.pos += 1;
                        let rhs = match self.peek() {
                            Some(PdxToken::LeftBrace) => {
                                self.pos += 1;
                                self.block(true)?
                            }
                            Some(PdxToken::RightBrace) | Some(PdxToken::Equals) | None => {
                                return Err(ParseError::MissingRhs { position: eq_pos });
                            }
                            Some(_) => self.terminal()?,
                        };
                        children.push(PdxNode {
                            children: vec![lhs, rhs],
                            entry: PdxAstItem::Assignment,
                        });
                    } else {
                        children.push(lhs);
                    }
                }
            }
        }
    }

    fn terminal(&mut self) -> Result<PdxNode, ParseError> {
        let entry = match self.peek() {
            Some(PdxToken::Identifier(s)) => PdxAstItem::Identifier(s.clone()),
            Some(PdxToken::StringValue(s)) => PdxAstItem::StringValue(s.clone()),
            Some(PdxToken::IntValue(i)) => PdxAstItem::IntValue(*i),
            Some(PdxToken::FloatValue(f)) => PdxAstItem::FloatValue(*f),
            _ => return Err(self.unexpected("a value")),
        };
        self.pos += 1;
        Ok(PdxNode::terminal(entry))
    }
}
