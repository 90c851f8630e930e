// Abstract Syntax Tree types for URI templates

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

use super::parser::TemplateParser;

/// Represents a parsed template as a list of parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    raw: String,
    pub parts: Vec<TemplatePart>,
}

impl Template {
    pub fn new(raw: impl Into<String>, parts: Vec<TemplatePart>) -> Self {
        Self {
            raw: raw.into(),
            parts,
        }
    }

    /// The template string this was parsed from
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Get all varspecs in this template, in declaration order
    pub fn variables(&self) -> Vec<&VarSpec> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                TemplatePart::Expression(expr) => Some(expr.varspecs.iter()),
                TemplatePart::Literal(_) => None,
            })
            .flatten()
            .collect()
    }

    /// Distinct variable names, in the order they first appear
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for var in self.variables() {
            if !names.contains(&var.name.as_str()) {
                names.push(&var.name);
            }
        }
        names
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Template {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateParser::parse(s)
    }
}

/// A template consists of literal strings and `{...}` expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Expression(Expression),
}

/// A `{...}` expression: one operator applied to one or more varspecs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub operator: Operator,
    pub varspecs: Vec<VarSpec>,
}

/// Expression operators from RFC 6570 section 2.2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `{var}`
    Simple,
    /// `{+var}`
    Reserved,
    /// `{#var}`
    Fragment,
    /// `{.var}`
    Label,
    /// `{/var}`
    PathSegment,
    /// `{;var}`
    PathParameter,
    /// `{?var}`
    Query,
    /// `{&var}`
    QueryContinuation,
}

impl Operator {
    /// Operator selected by the first character of an expression body, if any
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Operator::Reserved),
            '#' => Some(Operator::Fragment),
            '.' => Some(Operator::Label),
            '/' => Some(Operator::PathSegment),
            ';' => Some(Operator::PathParameter),
            '?' => Some(Operator::Query),
            '&' => Some(Operator::QueryContinuation),
            _ => None,
        }
    }

    pub fn as_char(self) -> Option<char> {
        match self {
            Operator::Simple => None,
            Operator::Reserved => Some('+'),
            Operator::Fragment => Some('#'),
            Operator::Label => Some('.'),
            Operator::PathSegment => Some('/'),
            Operator::PathParameter => Some(';'),
            Operator::Query => Some('?'),
            Operator::QueryContinuation => Some('&'),
        }
    }

    /// Written once before the first rendered varspec
    pub fn prefix(self) -> &'static str {
        match self {
            Operator::Simple | Operator::Reserved => "",
            Operator::Fragment => "#",
            Operator::Label => ".",
            Operator::PathSegment => "/",
            Operator::PathParameter => ";",
            Operator::Query => "?",
            Operator::QueryContinuation => "&",
        }
    }

    /// Written between rendered varspecs (and exploded elements)
    pub fn separator(self) -> &'static str {
        match self {
            Operator::Simple | Operator::Reserved | Operator::Fragment => ",",
            Operator::Label => ".",
            Operator::PathSegment => "/",
            Operator::PathParameter => ";",
            Operator::Query | Operator::QueryContinuation => "&",
        }
    }

    /// Whether values render as `name=value` pairs
    pub fn is_named(self) -> bool {
        matches!(
            self,
            Operator::PathParameter | Operator::Query | Operator::QueryContinuation
        )
    }

    /// Text following a name whose value is empty
    pub fn if_empty(self) -> &'static str {
        match self {
            Operator::Query | Operator::QueryContinuation => "=",
            _ => "",
        }
    }

    pub fn allows_reserved(self) -> bool {
        matches!(self, Operator::Reserved | Operator::Fragment)
    }
}

/// A single variable reference inside an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSpec {
    pub name: String,
    pub modifier: Modifier,
}

/// Value modifiers from RFC 6570 section 2.4; at most one per varspec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modifier {
    #[default]
    None,
    /// `{var:3}`
    Prefix(usize),
    /// `{var*}`
    Explode,
}

impl VarSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifier: Modifier::None,
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn explode(&self) -> bool {
        self.modifier == Modifier::Explode
    }

    /// Prefix length, 0 when the value is not truncated
    pub fn truncate(&self) -> usize {
        match self.modifier {
            Modifier::Prefix(len) => len,
            _ => 0,
        }
    }
}
