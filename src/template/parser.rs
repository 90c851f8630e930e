// Template parser: splits literals from expressions, then parses each expression body

use crate::error::ParseError;

use super::ast::{Expression, Modifier, Operator, Template, TemplatePart, VarSpec};

pub struct TemplateParser;

impl TemplateParser {
    pub fn parse(template: &str) -> Result<Template, ParseError> {
        let parts = Self::parse_parts(template).map_err(|err| {
            tracing::debug!(template, error = %err, "rejected template");
            err
        })?;
        tracing::debug!(template, parts = parts.len(), "parsed template");
        Ok(Template::new(template, parts))
    }

    fn parse_parts(template: &str) -> Result<Vec<TemplatePart>, ParseError> {
        let mut segments = template.split('{');
        let mut parts = Vec::new();

        // Text before the first '{' is always a literal, possibly empty
        let leading = segments.next().unwrap_or_default();
        if leading.contains('}') {
            return Err(ParseError::UnexpectedClosingBrace);
        }
        parts.push(TemplatePart::Literal(leading.to_string()));

        for segment in segments {
            let mut split = segment.split('}');
            let (body, literal) = match (split.next(), split.next(), split.next()) {
                (Some(body), Some(literal), None) => (body, literal),
                _ => return Err(ParseError::MalformedExpression),
            };

            parts.push(TemplatePart::Expression(Self::parse_expression(body)?));
            parts.push(TemplatePart::Literal(literal.to_string()));
        }

        Ok(parts)
    }

    fn parse_expression(body: &str) -> Result<Expression, ParseError> {
        let (operator, rest) = match body.chars().next().and_then(Operator::from_char) {
            // Every operator is a single ASCII byte
            Some(op) => (op, &body[1..]),
            None => (Operator::Simple, body),
        };

        let varspecs = rest
            .split(',')
            .map(Self::parse_varspec)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Expression { operator, varspecs })
    }

    fn parse_varspec(spec: &str) -> Result<VarSpec, ParseError> {
        let (spec_body, explode) = match spec.strip_suffix('*') {
            Some(stripped) => (stripped, true),
            None => (spec, false),
        };

        let mut pieces = spec_body.split(':');
        let name = pieces.next().unwrap_or_default();
        let truncate = match (pieces.next(), pieces.next()) {
            (None, _) => 0,
            (Some(len), None) => Self::parse_prefix_len(spec, len)?,
            (Some(_), Some(_)) => return Err(ParseError::MultipleColons(spec.to_string())),
        };

        if !is_valid_name(name) {
            return Err(ParseError::InvalidName(name.to_string()));
        }

        let modifier = match (explode, truncate) {
            (true, 0) => Modifier::Explode,
            (true, _) => return Err(ParseError::ExplodeWithPrefix(spec.to_string())),
            (false, 0) => Modifier::None,
            (false, len) => Modifier::Prefix(len),
        };

        Ok(VarSpec::new(name).with_modifier(modifier))
    }

    fn parse_prefix_len(spec: &str, len: &str) -> Result<usize, ParseError> {
        if len.is_empty() || !len.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidPrefix(spec.to_string()));
        }
        len.parse()
            .map_err(|_| ParseError::InvalidPrefix(spec.to_string()))
    }
}

/// Matches `^([A-Za-z0-9_.]|%[0-9A-Fa-f][0-9A-Fa-f])+$`
fn is_valid_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() {
        return false;
    }

    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' => pos += 1,
            b'%' => {
                let triplet_ok = bytes
                    .get(pos + 1..pos + 3)
                    .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
                if !triplet_ok {
                    return false;
                }
                pos += 3;
            }
            _ => return false,
        }
    }
    true
}
