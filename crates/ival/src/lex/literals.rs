//! The standard recognizers.

use lazy_regex::regex_find;

use crate::ast::Node;
use crate::interval::Interval;
use crate::parse::{ParseResult, SyntaxError, SyntaxErrorKind};

use super::{Cursor, Position, ScanContext, Scanned, TokenKind};

fn literal(node: Node) -> ParseResult<Option<Scanned>> {
    Ok(Some(Scanned::Token(TokenKind::Literal(node))))
}

fn malformed(reason: &'static str, cursor: &Cursor<'_>) -> SyntaxError {
    SyntaxError::new(SyntaxErrorKind::MalformedInterval(reason), cursor.location())
}

fn to_f64(digits: &str, cursor: &Cursor<'_>) -> ParseResult<f64> {
    digits
        .parse()
        .map_err(|_| {
            SyntaxError::new(
                SyntaxErrorKind::UnexpectedToken(digits.to_owned()),
                cursor.location(),
            )
        })
}

fn bound(cursor: &mut Cursor<'_>) -> ParseResult<f64> {
    let Some(digits) = regex_find!(r"^[0-9]+(?:\.[0-9]+)?", cursor.rest()) else {
        return Err(malformed("expected a bound", cursor));
    };
    let val = to_f64(digits, cursor)?;
    cursor.advance_over(digits);
    Ok(val)
}

/// `I{lo,hi}` with unsigned decimal bounds. Anything that does not start
/// with `I{` is left to other recognizers.
pub fn interval(cursor: &mut Cursor<'_>, _: &mut ScanContext<'_>) -> ParseResult<Option<Scanned>> {
    if cursor.peek(0) != Some('I') || cursor.peek(1) != Some('{') {
        return Ok(None);
    }
    cursor.advance(2);

    let lo = bound(cursor)?;
    if !cursor.advance_if(',') {
        return Err(malformed("expected ','", cursor));
    }
    let hi = bound(cursor)?;
    if !cursor.advance_if('}') {
        return Err(malformed("missing '}'", cursor));
    }
    if cursor.peek(0).is_some_and(char::is_alphanumeric) {
        return Err(malformed("unexpected trailing character", cursor));
    }

    literal(Node::Interval(Interval::new(lo, hi)))
}

/// Identifiers. Registered operator names such as `if` become operator
/// tokens, everything else an interned symbol.
pub fn name(cursor: &mut Cursor<'_>, ctx: &mut ScanContext<'_>) -> ParseResult<Option<Scanned>> {
    let Some(name) = regex_find!(r"^[\p{L}_][\p{L}\p{N}_]*", cursor.rest()) else {
        return Ok(None);
    };
    cursor.advance_over(name);

    if ctx.vocabulary.is_operator(name) {
        Ok(Some(Scanned::Token(TokenKind::Operator(name.to_owned()))))
    } else {
        literal(Node::Symbol(ctx.interner.intern(name)))
    }
}

pub fn number(cursor: &mut Cursor<'_>, ctx: &mut ScanContext<'_>) -> ParseResult<Option<Scanned>> {
    let found = match ctx.position {
        Position::Operand => regex_find!(r"^[+-]?[0-9]+(?:\.[0-9]+)?", cursor.rest()),
        Position::Operator => regex_find!(r"^[0-9]+(?:\.[0-9]+)?", cursor.rest()),
    };
    let Some(digits) = found else {
        return Ok(None);
    };
    let val = to_f64(digits, cursor)?;
    cursor.advance_over(digits);
    literal(Node::number(val))
}

pub fn operator(
    cursor: &mut Cursor<'_>,
    ctx: &mut ScanContext<'_>,
) -> ParseResult<Option<Scanned>> {
    let Some(symbol) = ctx.vocabulary.longest_symbol(cursor.rest()) else {
        return Ok(None);
    };
    cursor.advance_over(symbol);
    Ok(Some(Scanned::Token(TokenKind::Operator(symbol.to_owned()))))
}

/// Whitespace and `#` comments running to the end of the line.
pub fn whitespace(
    cursor: &mut Cursor<'_>,
    _: &mut ScanContext<'_>,
) -> ParseResult<Option<Scanned>> {
    let mut skipped = 0;
    loop {
        skipped += cursor.advance_while(char::is_whitespace);
        if cursor.advance_if('#') {
            skipped += 1 + cursor.advance_while(|c| c != '\n');
        } else {
            break;
        }
    }
    Ok((skipped > 0).then_some(Scanned::Trivia))
}
