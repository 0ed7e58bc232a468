//! A small subset of CSS selectors.
//!
//! Supported: type selectors, `*` , `#id` , `.class` , `[attr]` , `[attr=value]`
//! (value may be quoted), compound selectors of these and `,` lists.
//! Combinators and pseudo-classes are rejected.

use std::{iter::Peekable, str::CharIndices};

use crate::{ElementData, TreeError};

#[derive(Debug, Clone, PartialEq)]
struct AttrCond {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Compound {
    tag_name: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttrCond>,
}

impl Compound {
    fn matches(&self, elem: &ElementData) -> bool {
        if let Some(tag_name) = self.tag_name.as_ref() {
            if *tag_name != elem.tag_name {
                return false;
            }
        }
        if let Some(id) = self.id.as_ref() {
            if elem.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|x| elem.has_class(x)) {
            return false;
        }
        self.attributes.iter().all(|cond| match elem.attribute(&cond.name) {
            None => false,
            Some(v) => cond.value.as_ref().map(|x| x == v).unwrap_or(true),
        })
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    list: Vec<Compound>,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn take_ident(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut s = String::new();
    while let Some((_, c)) = chars.peek() {
        if !is_ident_char(*c) {
            break;
        }
        s.push(*c);
        chars.next();
    }
    s
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(src: &str) -> Result<Self, TreeError> {
        let illegal = |msg: &str| TreeError::IllegalSelector {
            selector: src.to_string(),
            msg: msg.to_string(),
        };
        let mut list = Vec::new();
        for part in src.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(illegal("empty selector"));
            }
            let mut compound = Compound::default();
            let mut chars = part.char_indices().peekable();
            while let Some((_, c)) = chars.peek().cloned() {
                match c {
                    '*' => {
                        chars.next();
                    }
                    '#' => {
                        chars.next();
                        let id = take_ident(&mut chars);
                        if id.is_empty() {
                            return Err(illegal("empty id"));
                        }
                        compound.id = Some(id);
                    }
                    '.' => {
                        chars.next();
                        let class = take_ident(&mut chars);
                        if class.is_empty() {
                            return Err(illegal("empty class"));
                        }
                        compound.classes.push(class);
                    }
                    '[' => {
                        chars.next();
                        let name = take_ident(&mut chars).to_ascii_lowercase();
                        if name.is_empty() {
                            return Err(illegal("empty attribute name"));
                        }
                        let value = match chars.next() {
                            Some((_, ']')) => None,
                            Some((_, '=')) => {
                                let mut v = String::new();
                                let quote = match chars.peek() {
                                    Some((_, q)) if *q == '"' || *q == '\'' => {
                                        let q = *q;
                                        chars.next();
                                        Some(q)
                                    }
                                    _ => None,
                                };
                                loop {
                                    match chars.next() {
                                        None => return Err(illegal("unclosed attribute")),
                                        Some((_, c)) if Some(c) == quote => {
                                            if chars.next().map(|x| x.1) != Some(']') {
                                                return Err(illegal("expected `]`"));
                                            }
                                            break;
                                        }
                                        Some((_, ']')) if quote.is_none() => break,
                                        Some((_, c)) => v.push(c),
                                    }
                                }
                                Some(v)
                            }
                            _ => return Err(illegal("unsupported attribute condition")),
                        };
                        compound.attributes.push(AttrCond { name, value });
                    }
                    c if is_ident_char(c) => {
                        if compound.tag_name.is_some() {
                            return Err(illegal("unexpected type selector"));
                        }
                        compound.tag_name = Some(take_ident(&mut chars).to_ascii_lowercase());
                    }
                    _ => return Err(illegal("combinators and pseudo-classes are not supported")),
                }
            }
            list.push(compound);
        }
        Ok(Self { list })
    }

    /// Check if the element matches any selector in the list.
    pub fn matches(&self, elem: &ElementData) -> bool {
        self.list.iter().any(|x| x.matches(elem))
    }
}

impl std::str::FromStr for Selector {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
