//! RFC 6570 URI Templates, up to level 4.
//!
//! Parse a template once, then expand it against any number of variable sets:
//!
//! ```
//! use std::collections::HashMap;
//! use uritemplate::{Template, Value};
//!
//! let template: Template = "https://api.github.com/repos{/user,repo}{?page}".parse()?;
//!
//! let mut vars = HashMap::new();
//! vars.insert("user", Value::from("rust-lang"));
//! vars.insert("repo", Value::from("rust"));
//!
//! assert_eq!(template.expand(&vars)?, "https://api.github.com/repos/rust-lang/rust");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod template;
pub mod vars;

pub use error::{Error, ExpandError, ParseError};
pub use template::{Template, TemplateParser, TemplateResolver};
pub use vars::{to_vars, vars_from_json, Environment, Value, Vars};

/// Parse a template string
pub fn parse(template: &str) -> Result<Template, ParseError> {
    TemplateParser::parse(template)
}

/// Parse and expand in one step
pub fn expand<E>(template: &str, vars: &E) -> Result<String, Error>
where
    E: Environment + ?Sized,
{
    Ok(parse(template)?.expand(vars)?)
}
