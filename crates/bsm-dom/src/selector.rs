//! Element Query
//!
//! A small CSS selector subset for querySelector: type, universal, `#id`,
//! `.class`, `[attr]`, `[attr=value]`, descendant and child combinators, and
//! comma-separated selector lists.

use crate::{DomError, DomResult, DomTree, ElementData, NodeId};

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Universal,
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
}

impl SimpleSelector {
    fn matches(&self, elem: &ElementData) -> bool {
        match self {
            Self::Universal => true,
            Self::Tag(tag) => elem.name.eq_ignore_ascii_case(tag),
            Self::Id(id) => elem.id() == Some(id.as_str()),
            Self::Class(class) => elem.has_class(class),
            Self::Attribute { name, value: None } => elem.attrs.has_attribute(name),
            Self::Attribute { name, value: Some(v) } => elem.get_attr(name) == Some(v.as_str()),
        }
    }
}

/// Sequence of simple selectors that must all match one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    pub parts: Vec<SimpleSelector>,
}

impl CompoundSelector {
    pub fn matches(&self, elem: &ElementData) -> bool {
        self.parts.iter().all(|p| p.matches(elem))
    }
}

/// Relationship between a compound and the one before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
}

/// Parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Each alternative is left-to-right; an entry's combinator links it to
    /// the previous entry and is ignored on the first one.
    alternatives: Vec<Vec<(Combinator, CompoundSelector)>>,
}

impl Selector {
    /// Parse a selector string
    pub fn parse(input: &str) -> DomResult<Self> {
        Parser::new(input).parse_list()
    }

    /// Check whether the element `node` matches
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.alternatives
            .iter()
            .any(|complex| matches_complex(tree, node, complex))
    }
}

fn matches_complex(tree: &DomTree, node: NodeId, complex: &[(Combinator, CompoundSelector)]) -> bool {
    let Some(((combinator, last), rest)) = complex.split_last() else {
        return false;
    };
    if !tree.element(node).is_some_and(|e| last.matches(e)) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }
    match combinator {
        Combinator::Child => tree
            .parent(node)
            .is_some_and(|p| matches_complex(tree, p, rest)),
        Combinator::Descendant => {
            let mut current = tree.parent(node);
            while let Some(ancestor) = current {
                if matches_complex(tree, ancestor, rest) {
                    return true;
                }
                current = tree.parent(ancestor);
            }
            false
        }
    }
}

impl DomTree {
    /// First descendant of `scope` matching `selector`
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .find(|&n| selector.matches(self, n)))
    }

    /// All descendants of `scope` matching `selector`, in document order
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .filter(|&n| selector.matches(self, n))
            .collect())
    }
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self) -> DomError {
        DomError::Syntax(self.input.to_string())
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_list(mut self) -> DomResult<Selector> {
        let mut alternatives = Vec::new();
        loop {
            self.skip_whitespace();
            alternatives.push(self.parse_complex()?);
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(',') => self.pos += 1,
                Some(_) => return Err(self.error()),
            }
        }
        Ok(Selector { alternatives })
    }

    fn parse_complex(&mut self) -> DomResult<Vec<(Combinator, CompoundSelector)>> {
        let mut complex = vec![(Combinator::Descendant, self.parse_compound()?)];
        loop {
            let had_space = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(_) if had_space => Combinator::Descendant,
                Some(_) => return Err(self.error()),
            };
            complex.push((combinator, self.parse_compound()?));
        }
        Ok(complex)
    }

    fn parse_compound(&mut self) -> DomResult<CompoundSelector> {
        let mut parts = Vec::new();
        if self.peek() == Some('*') {
            self.pos += 1;
            parts.push(SimpleSelector::Universal);
        } else if self.peek().is_some_and(is_ident_char) {
            parts.push(SimpleSelector::Tag(self.parse_ident()?.to_ascii_lowercase()));
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    parts.push(SimpleSelector::Id(self.parse_ident()?));
                }
                Some('.') => {
                    self.pos += 1;
                    parts.push(SimpleSelector::Class(self.parse_ident()?));
                }
                Some('[') => {
                    self.pos += 1;
                    parts.push(self.parse_attribute()?);
                }
                _ => break,
            }
        }

        if parts.is_empty() {
            return Err(self.error());
        }
        Ok(CompoundSelector { parts })
    }

    fn parse_ident(&mut self) -> DomResult<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error());
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn parse_attribute(&mut self) -> DomResult<SimpleSelector> {
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();
        let value = match self.peek() {
            Some(']') => None,
            Some('=') => {
                self.pos += 1;
                self.skip_whitespace();
                let value = match self.peek() {
                    Some(quote @ ('"' | '\'')) => {
                        self.pos += 1;
                        let start = self.pos;
                        while self.peek().is_some_and(|c| c != quote) {
                            self.pos += 1;
                        }
                        if self.peek().is_none() {
                            return Err(self.error());
                        }
                        let value: String = self.chars[start..self.pos].iter().collect();
                        self.pos += 1;
                        value
                    }
                    _ => self.parse_ident()?,
                };
                self.skip_whitespace();
                Some(value)
            }
            _ => return Err(self.error()),
        };
        if self.peek() != Some(']') {
            return Err(self.error());
        }
        self.pos += 1;
        Ok(SimpleSelector::Attribute { name, value })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}
