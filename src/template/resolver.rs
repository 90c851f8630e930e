// Template expansion

use crate::error::ExpandError;
use crate::vars::{Environment, Value};

use super::ast::{Expression, Operator, Template, TemplatePart, VarSpec};
use super::encode::Charset;

/// Expands parsed templates against an environment of variables
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateResolver;

impl TemplateResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve template with provided variable values
    pub fn resolve<E>(&self, template: &Template, vars: &E) -> Result<String, ExpandError>
    where
        E: Environment + ?Sized,
    {
        let mut result = String::with_capacity(template.as_str().len());

        for part in &template.parts {
            match part {
                TemplatePart::Literal(s) => result.push_str(s),
                TemplatePart::Expression(expr) => {
                    self.expand_expression(expr, vars, &mut result)
                        .map_err(|err| {
                            tracing::debug!(template = template.as_str(), error = %err, "expansion failed");
                            err
                        })?;
                }
            }
        }

        Ok(result)
    }

    /// Names the template references that have no value in `vars`
    pub fn missing_variables<'t, E>(&self, template: &'t Template, vars: &E) -> Vec<&'t str>
    where
        E: Environment + ?Sized,
    {
        template
            .variable_names()
            .into_iter()
            .filter(|name| vars.lookup(name).is_none())
            .collect()
    }

    fn expand_expression<E>(
        &self,
        expr: &Expression,
        vars: &E,
        result: &mut String,
    ) -> Result<(), ExpandError>
    where
        E: Environment + ?Sized,
    {
        let op = expr.operator;
        // Rendered separately so the prefix can be dropped when nothing renders
        let mut rendered = String::new();

        for var in &expr.varspecs {
            let value = match vars.lookup(&var.name) {
                Some(value) if !value.is_empty_collection() => value,
                _ => continue,
            };

            if matches!(value, Value::Map(_)) && var.truncate() > 0 {
                return Err(ExpandError::TruncatedMap(var.name.clone()));
            }

            if !rendered.is_empty() {
                rendered.push_str(op.separator());
            }

            match value {
                Value::Scalar(s) => expand_scalar(op, var, s, &mut rendered),
                Value::List(items) => expand_list(op, var, items, &mut rendered),
                Value::Map(entries) => expand_map(op, var, entries, &mut rendered),
            }
        }

        if rendered.is_empty() {
            tracing::trace!(operator = ?op, "expression rendered nothing");
            return Ok(());
        }

        result.push_str(op.prefix());
        result.push_str(&rendered);
        Ok(())
    }
}

impl Template {
    /// Expand this template; see [`TemplateResolver::resolve`]
    pub fn expand<E>(&self, vars: &E) -> Result<String, ExpandError>
    where
        E: Environment + ?Sized,
    {
        TemplateResolver::new().resolve(self, vars)
    }
}

fn charset(op: Operator) -> Charset {
    Charset::for_reserved(op.allows_reserved())
}

fn push_name(op: Operator, name: &str, empty: bool, buf: &mut String) {
    if op.is_named() {
        buf.push_str(name);
        buf.push_str(if empty { op.if_empty() } else { "=" });
    }
}

/// First `len` characters of `s`; 0 leaves it whole
fn truncate(s: &str, len: usize) -> &str {
    if len == 0 {
        return s;
    }
    match s.char_indices().nth(len) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

fn expand_scalar(op: Operator, var: &VarSpec, value: &str, buf: &mut String) {
    let value = truncate(value, var.truncate());
    push_name(op, &var.name, value.is_empty(), buf);
    buf.push_str(&charset(op).encode(value));
}

fn expand_list(op: Operator, var: &VarSpec, items: &[String], buf: &mut String) {
    let explode = var.explode();
    if !explode {
        push_name(op, &var.name, false, buf);
    }

    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            buf.push_str(if explode { op.separator() } else { "," });
        }
        let item = truncate(item, var.truncate());
        if explode {
            push_name(op, &var.name, item.is_empty(), buf);
        }
        buf.push_str(&charset(op).encode(item));
    }
}

fn expand_map(op: Operator, var: &VarSpec, entries: &[(String, String)], buf: &mut String) {
    let explode = var.explode();
    if !explode {
        push_name(op, &var.name, false, buf);
    }

    let cs = charset(op);
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            buf.push_str(if explode { op.separator() } else { "," });
        }
        buf.push_str(&cs.encode(key));
        buf.push(if explode { '=' } else { ',' });
        buf.push_str(&cs.encode(value));
    }
}
