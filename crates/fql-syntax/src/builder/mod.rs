use crate::{
    ast::{
        expr::FilterExpr,
        ident::Identifier,
        literal::Literal,
        operator::CompareOp,
        span::Span,
    },
    errors::FilterParseError,
    parser::{FilterParser, Rule},
    schema::{Field, FieldKind, Schema},
};
use chrono::{NaiveDate, NaiveDateTime};
use pest::{Parser, iterators::Pair};
use tracing::debug;

pub type ParseResult<T> = Result<T, FilterParseError>;

/// Parse normalized filter text into a typed AST bound to `schema`.
///
/// Expects [`crate::normalize::normalize`]d input; keyword casing and date
/// tagging are not re-applied here. Every field identifier is resolved
/// against the schema and every literal is coerced to the declared field
/// kind, so the resulting AST is fully typed.
pub fn parse(input: &str, schema: &Schema) -> ParseResult<FilterExpr> {
    debug!(schema = %schema.name, "parsing filter");

    let mut pairs = FilterParser::parse(Rule::filter, input)
        .map_err(FilterParseError::from_pest_error)?;

    let filter = pairs.next().ok_or_else(|| FilterParseError::Syntax {
        message: "empty input".to_string(),
        line: 1,
        column: 1,
    })?;

    let expr = filter
        .into_inner()
        .find(|p| p.as_rule() == Rule::expr)
        .ok_or_else(|| FilterParseError::Syntax {
            message: "expected an expression".to_string(),
            line: 1,
            column: 1,
        })?;

    build_expr(expr, schema)
}

fn build_expr(pair: Pair<Rule>, schema: &Schema) -> ParseResult<FilterExpr> {
    let span = pair_to_span(&pair);
    let mut operands = pair
        .into_inner()
        .filter(|p| p.as_rule() != Rule::kw_or);

    let first = operands.next().ok_or_else(|| syntax_at(span, "expected an expression"))?;
    let mut expr = build_and_expr(first, schema)?;

    // Left-associative fold over the `or` chain.
    for operand in operands {
        let right = build_and_expr(operand, schema)?;
        expr = FilterExpr::Or {
            left: Box::new(expr),
            right: Box::new(right),
        };
    }

    Ok(expr)
}

fn build_and_expr(pair: Pair<Rule>, schema: &Schema) -> ParseResult<FilterExpr> {
    let span = pair_to_span(&pair);
    let mut operands = pair
        .into_inner()
        .filter(|p| p.as_rule() != Rule::kw_and);

    let first = operands.next().ok_or_else(|| syntax_at(span, "expected a comparison"))?;
    let mut expr = build_comparison(first, schema)?;

    for operand in operands {
        let right = build_comparison(operand, schema)?;
        expr = FilterExpr::And {
            left: Box::new(expr),
            right: Box::new(right),
        };
    }

    Ok(expr)
}

fn build_comparison(pair: Pair<Rule>, schema: &Schema) -> ParseResult<FilterExpr> {
    let span = pair_to_span(&pair);
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| syntax_at(span, "expected a comparison"))?;

    match inner.as_rule() {
        Rule::grouped => {
            let expr = inner
                .into_inner()
                .find(|p| p.as_rule() == Rule::expr)
                .ok_or_else(|| syntax_at(span, "expected an expression inside parentheses"))?;
            build_expr(expr, schema)
        }
        Rule::condition => build_condition(inner, schema),
        _ => Err(syntax_at(span, "expected a comparison")),
    }
}

fn build_condition(pair: Pair<Rule>, schema: &Schema) -> ParseResult<FilterExpr> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();

    let ident = inner
        .next()
        .ok_or_else(|| syntax_at(span, "expected a field name"))?;
    let op = inner
        .next()
        .ok_or_else(|| syntax_at(span, "expected a comparison operator"))?;
    let literal = inner
        .next()
        .ok_or_else(|| syntax_at(span, "expected a literal"))?;

    let ident_span = pair_to_span(&ident);
    let name = ident.as_str();
    let field = schema
        .field(name)
        .ok_or_else(|| FilterParseError::UnknownField {
            name: name.to_string(),
            schema: schema.name.clone(),
            line: ident_span.line,
            column: ident_span.column,
        })?;

    let op = match op.as_rule() {
        Rule::op_eq => CompareOp::Eq,
        Rule::op_ne => CompareOp::Ne,
        Rule::op_lt => CompareOp::Lt,
        Rule::op_gt => CompareOp::Gt,
        _ => return Err(syntax_at(span, "expected a comparison operator")),
    };

    let literal = build_literal(&literal, field)?;

    Ok(FilterExpr::Comparison {
        field: Identifier::new(name, ident_span),
        op,
        literal,
        span,
    })
}

/// Coerce a raw literal to the declared kind of its field.
fn build_literal(pair: &Pair<Rule>, field: &Field) -> ParseResult<Literal> {
    let raw = pair.as_str();
    match (pair.as_rule(), field.kind) {
        (Rule::number_lit, FieldKind::Integer) => raw
            .parse::<i64>()
            .map(Literal::Int)
            .map_err(|_| literal_type(field, raw)),
        (Rule::number_lit, FieldKind::Decimal) => raw
            .parse::<f64>()
            .map(Literal::Float)
            .map_err(|_| literal_type(field, raw)),
        (Rule::string_lit, FieldKind::String) => Ok(Literal::String(unquote(raw).to_string())),
        (Rule::string_lit, FieldKind::Boolean) => match unquote(raw) {
            "true" => Ok(Literal::Boolean(true)),
            "false" => Ok(Literal::Boolean(false)),
            _ => Err(literal_type(field, raw)),
        },
        (Rule::datetime_lit, FieldKind::DateTime) => {
            let content = unquote(raw.strip_prefix("datetime").unwrap_or(raw));
            parse_datetime(content).ok_or_else(|| literal_type(field, raw))
        }
        _ => Err(literal_type(field, raw)),
    }
}

/// Accepts `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`; a bare date is midnight.
fn parse_datetime(content: &str) -> Option<Literal> {
    NaiveDateTime::parse_from_str(content, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(content, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(Literal::DateTime)
}

fn unquote(raw: &str) -> &str {
    raw.trim_matches('\'')
}

fn literal_type(field: &Field, raw: &str) -> FilterParseError {
    FilterParseError::LiteralType {
        field: field.name.clone(),
        expected: field.kind,
        literal: raw.to_string(),
    }
}

fn syntax_at(span: Span, message: &str) -> FilterParseError {
    FilterParseError::Syntax {
        message: message.to_string(),
        line: span.line,
        column: span.column,
    }
}

fn pair_to_span(pair: &Pair<Rule>) -> Span {
    let (line, column) = pair.line_col();
    let span = pair.as_span();
    Span::new(span.start(), span.end(), line, column)
}
