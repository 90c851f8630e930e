// Template module for RFC 6570 (level 4) URI templates
//
// This module provides parsing of template strings into a reusable form,
// and expansion of that form against a set of variables.

mod ast;
mod encode;
mod parser;
mod resolver;

pub use ast::{Expression, Modifier, Operator, Template, TemplatePart, VarSpec};
pub use encode::Charset;
pub use parser::TemplateParser;
pub use resolver::TemplateResolver;
