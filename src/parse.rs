//! Route definition parser.
//!
//! A route definition is a chain of filter calls joined by `->`, optionally
//! terminated by `<shunt>`:
//!
//! ```text
//! status(420) -> inlineContent("Enhance Your Calm") -> <shunt>
//! ```
//!
//! Arguments are double-quoted strings (escapes `\"` `\\` `\n` `\r` `\t`)
//! or decimal numbers. The parser only checks syntax; whether a filter
//! exists and accepts its arguments is decided by the
//! [`Registry`](crate::filter::Registry).

use crate::args::Arg;
use crate::error::Error;

const SHUNT: &str = "<shunt>";

/// One filter call, e.g. `inlineContent("x")`.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterDef {
    pub name: String,
    pub args: Vec<Arg>,
}

/// A parsed route definition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteDef {
    pub filters: Vec<FilterDef>,
    /// Whether the chain ends in `<shunt>`.
    pub shunt: bool,
}

/// Parses a route definition. Empty input is an empty chain.
pub fn parse(src: &str) -> Result<RouteDef, Error> {
    let mut p = Parser { src, pos: 0 };
    let mut def = RouteDef::default();

    p.skip_ws();
    if p.at_end() {
        return Ok(def);
    }

    loop {
        p.skip_ws();
        if def.shunt {
            return Err(p.error("<shunt> must be the last item"));
        }
        if p.eat(SHUNT) {
            def.shunt = true;
        } else {
            def.filters.push(p.filter()?);
        }

        p.skip_ws();
        if p.at_end() {
            return Ok(def);
        }
        if !p.eat("->") {
            return Err(p.error("expected `->`"));
        }
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos == self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, token: &str) -> bool {
        let found = self.rest().starts_with(token);
        if found {
            self.pos += token.len();
        }
        found
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn error(&self, message: &'static str) -> Error {
        Error::Syntax { offset: self.pos, message }
    }

    fn filter(&mut self) -> Result<FilterDef, Error> {
        let name = self.ident()?;
        self.skip_ws();
        if !self.eat("(") {
            return Err(self.error("expected `(`"));
        }

        let mut args = Vec::new();
        self.skip_ws();
        if !self.eat(")") {
            loop {
                self.skip_ws();
                args.push(self.arg()?);
                self.skip_ws();
                if self.eat(")") {
                    break;
                }
                if !self.eat(",") {
                    return Err(self.error("expected `,` or `)`"));
                }
            }
        }
        Ok(FilterDef { name, args })
    }

    fn ident(&mut self) -> Result<String, Error> {
        let len = self
            .rest()
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(self.rest().len());
        let name = &self.rest()[..len];
        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(self.error("expected filter name"));
        }
        let name = name.to_owned();
        self.pos += len;
        Ok(name)
    }

    fn arg(&mut self) -> Result<Arg, Error> {
        match self.peek() {
            Some('"') => self.string().map(Arg::String),
            Some(c) if c == '-' || c.is_ascii_digit() => self.number().map(Arg::Number),
            _ => Err(self.error("expected string or number")),
        }
    }

    fn string(&mut self) -> Result<String, Error> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => out.push(match self.bump() {
                    Some('"') => '"',
                    Some('\\') => '\\',
                    Some('n') => '\n',
                    Some('r') => '\r',
                    Some('t') => '\t',
                    _ => return Err(self.error("invalid escape sequence")),
                }),
                Some(c) => out.push(c),
                None => {
                    return Err(Error::Syntax { offset: start, message: "unterminated string" });
                }
            }
        }
    }

    fn number(&mut self) -> Result<f64, Error> {
        let start = self.pos;
        self.eat("-");
        let digits = |p: &mut Self| {
            let from = p.pos;
            while p.peek().is_some_and(|c| c.is_ascii_digit()) {
                p.pos += 1;
            }
            p.pos > from
        };
        if !digits(self) {
            return Err(self.error("expected digit"));
        }
        if self.eat(".") && !digits(self) {
            return Err(self.error("expected digit"));
        }
        self.src[start..self.pos]
            .parse()
            .map_err(|_| Error::Syntax { offset: start, message: "invalid number" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(name: &str, args: Vec<Arg>) -> FilterDef {
        FilterDef { name: name.to_owned(), args }
    }

    fn offset(e: Error) -> usize {
        match e {
            Error::Syntax { offset, .. } => offset,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty() {
        assert_eq!(parse("").unwrap(), RouteDef::default());
        assert_eq!(parse("  \n ").unwrap(), RouteDef::default());
    }

    #[test]
    fn single_filter_with_shunt() {
        let def = parse(r#"inlineContent("Enhance Your Calm") -> <shunt>"#).unwrap();
        assert!(def.shunt);
        assert_eq!(def.filters, vec![filter("inlineContent", vec!["Enhance Your Calm".into()])]);
    }

    #[test]
    fn escapes_and_two_arguments() {
        let def = parse(r#"inlineContent("{\"foo\": 42}\n", "application/json")"#).unwrap();
        assert!(!def.shunt);
        assert_eq!(
            def.filters[0].args,
            vec![Arg::from("{\"foo\": 42}\n"), Arg::from("application/json")]
        );
    }

    #[test]
    fn chain_with_numbers() {
        let def = parse(r#"status(420)->latency(-1.5, 3) -> inlineContent("") -> <shunt>"#).unwrap();
        assert_eq!(def.filters, vec![
            filter("status", vec![Arg::Number(420.0)]),
            filter("latency", vec![Arg::Number(-1.5), Arg::Number(3.0)]),
            filter("inlineContent", vec!["".into()]),
        ]);
        assert!(def.shunt);
    }

    #[test]
    fn no_arguments() {
        let def = parse("preserveHost( )").unwrap();
        assert_eq!(def.filters, vec![filter("preserveHost", vec![])]);
    }

    #[test]
    fn bare_shunt() {
        let def = parse("<shunt>").unwrap();
        assert!(def.shunt && def.filters.is_empty());
    }

    #[test]
    fn shunt_must_be_last() {
        assert_eq!(offset(parse(r#"<shunt> -> inlineContent("x")"#).unwrap_err()), 11);
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(offset(parse(r#"inlineContent("x"#).unwrap_err()), 14);
        assert_eq!(offset(parse(r#"inlineContent("x" "y")"#).unwrap_err()), 18);
        assert_eq!(offset(parse(r#"inlineContent("\q")"#).unwrap_err()), 17);
        assert_eq!(offset(parse(r#"inlineContent(x)"#).unwrap_err()), 14);
        assert_eq!(offset(parse(r#"inlineContent("x") inlineContent("y")"#).unwrap_err()), 19);
        assert_eq!(offset(parse("9lives()").unwrap_err()), 0);
        assert_eq!(offset(parse("a(1.)").unwrap_err()), 4);
    }
}
