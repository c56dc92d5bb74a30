/*!
The fact-file reader.

A fact file is a sequence of lines, each blank, a preamble declaration, or a timed
ground fact:

```text
type: track = { t1, t2 }
type: moving(track)

moving(t1) @ [0:14]
!moving(t2) @ { [0:4], [9:14] }
```

`!` negates a fact.
An interval is `[i:j]` or `[i,j]` (the liquid span of `[i, j]`) or `[(i,j),(k,l)]` (an
explicit span interval).
*/

use crate::{
    builder::{
        lexer::{self, Cursor, TokenKind},
        Preamble,
    },
    domain::Fact,
    structures::{atom::Atom, interval::Interval, span_interval::SpanInterval, term::Term},
    types::err::ParseError,
};

/// Parses a fact file into its preamble and facts.
pub fn parse_fact_file(input: &str) -> Result<(Preamble, Vec<Fact>), ParseError> {
    let tokens = lexer::tokenize(input)?;
    let mut cursor = Cursor::new(tokens);

    let mut preamble = Preamble::default();
    let mut facts = Vec::new();

    while !cursor.at_end() {
        if cursor.eat(&TokenKind::EndLine) {
            continue;
        }
        if cursor.check(&TokenKind::Type) {
            parse_type_declaration(&mut cursor, &mut preamble)?;
            continue;
        }
        facts.extend(parse_fact(&mut cursor)?);
    }

    Ok((preamble, facts))
}

/// `type: sort = { a, b }` or `type: pred(sort, …)`.
pub(super) fn parse_type_declaration(
    cursor: &mut Cursor,
    preamble: &mut Preamble,
) -> Result<(), ParseError> {
    cursor.expect(&TokenKind::Type, "type")?;
    cursor.expect(&TokenKind::Colon, "a colon")?;
    let name = cursor.expect_ident()?;

    match cursor.eat(&TokenKind::Equals) {
        true => {
            // A sort and its objects.
            cursor.expect(&TokenKind::OpenBrace, "an opening brace")?;
            let mut objects = std::collections::BTreeSet::new();
            if !cursor.check(&TokenKind::CloseBrace) {
                objects.insert(cursor.expect_ident()?);
                while cursor.eat(&TokenKind::Comma) {
                    objects.insert(cursor.expect_ident()?);
                }
            }
            cursor.expect(&TokenKind::CloseBrace, "a closing brace")?;
            preamble.sorts.insert(name, objects);
        }
        false => {
            // A predicate signature.
            cursor.expect(&TokenKind::OpenParen, "an opening parenthesis")?;
            let mut signature = Vec::new();
            if !cursor.check(&TokenKind::CloseParen) {
                signature.push(cursor.expect_ident()?);
                while cursor.eat(&TokenKind::Comma) {
                    signature.push(cursor.expect_ident()?);
                }
            }
            cursor.expect(&TokenKind::CloseParen, "a closing parenthesis")?;
            preamble.signatures.insert(name, signature);
        }
    }

    Ok(())
}

/// `[!] pred(c, …) @ interval` or `@ { interval, … }`.
///
/// A braced fact yields one [Fact] per interval.
fn parse_fact(cursor: &mut Cursor) -> Result<Vec<Fact>, ParseError> {
    let truth = !cursor.eat(&TokenKind::Not);
    let atom = parse_ground_atom(cursor)?;
    cursor.expect(&TokenKind::At, "@")?;

    let mut facts = Vec::new();
    match cursor.eat(&TokenKind::OpenBrace) {
        true => {
            while !cursor.check(&TokenKind::CloseBrace) {
                let at = parse_span_interval(cursor)?;
                facts.push(Fact {
                    atom: atom.clone(),
                    truth,
                    at,
                });
                if !cursor.check(&TokenKind::CloseBrace) {
                    cursor.expect(&TokenKind::Comma, "a comma")?;
                }
            }
            cursor.expect(&TokenKind::CloseBrace, "a closing brace")?;
        }
        false => {
            let at = parse_span_interval(cursor)?;
            facts.push(Fact { atom, truth, at });
        }
    }

    Ok(facts)
}

/// `pred(c, …)`, every argument a constant.
pub(super) fn parse_ground_atom(cursor: &mut Cursor) -> Result<Atom, ParseError> {
    let predicate = cursor.expect_ident()?;
    cursor.expect(&TokenKind::OpenParen, "an opening parenthesis")?;

    let mut terms = Vec::new();
    if !cursor.check(&TokenKind::CloseParen) {
        terms.push(Term::Constant(cursor.expect_ident()?));
        while cursor.eat(&TokenKind::Comma) {
            terms.push(Term::Constant(cursor.expect_ident()?));
        }
    }
    cursor.expect(&TokenKind::CloseParen, "a closing parenthesis")?;

    Ok(Atom::new(predicate, terms))
}

/// `[i:j]`, `[i,j]`, or `[(i,j),(k,l)]`.
pub(super) fn parse_span_interval(cursor: &mut Cursor) -> Result<SpanInterval, ParseError> {
    cursor.expect(&TokenKind::OpenBracket, "an opening bracket")?;

    match cursor.check(&TokenKind::OpenParen) {
        true => {
            let start = parse_interval_pair(cursor)?;
            cursor.expect(&TokenKind::Comma, "a comma")?;
            let finish = parse_interval_pair(cursor)?;
            cursor.expect(&TokenKind::CloseBracket, "a closing bracket")?;
            Ok(SpanInterval::new(start, finish))
        }
        false => {
            let start = cursor.expect_number()?;
            // `:` and `,` both delimit a liquid interval literal.
            if !cursor.eat(&TokenKind::Colon) {
                cursor.expect(&TokenKind::Comma, "a colon or comma")?;
            }
            let finish = cursor.expect_number()?;
            cursor.expect(&TokenKind::CloseBracket, "a closing bracket")?;
            Ok(SpanInterval::liquid(start, finish))
        }
    }
}

/// `(i, j)`.
fn parse_interval_pair(cursor: &mut Cursor) -> Result<Interval, ParseError> {
    cursor.expect(&TokenKind::OpenParen, "an opening parenthesis")?;
    let start = cursor.expect_number()?;
    cursor.expect(&TokenKind::Comma, "a comma")?;
    let finish = cursor.expect_number()?;
    cursor.expect(&TokenKind::CloseParen, "a closing parenthesis")?;
    Ok(Interval::new(start, finish))
}

#[cfg(test)]
mod fact_tests {
    use super::*;
    use crate::types::err::ParseErrorKind;

    #[test]
    fn declarations_and_facts() {
        let input = "\
type: track = { t1, t2 }
type: moving(track)

// observations
moving(t1) @ [0:14]
!moving(t2) @ { [0:4], [9,14] }
";
        let (preamble, facts) = parse_fact_file(input).unwrap();

        assert_eq!(preamble.sorts["track"].len(), 2);
        assert_eq!(preamble.signatures["moving"], vec!["track".to_owned()]);

        assert_eq!(facts.len(), 3);
        assert!(facts[0].truth);
        assert_eq!(facts[0].at, SpanInterval::liquid(0, 14));
        assert!(!facts[1].truth);
        assert_eq!(facts[2].at, SpanInterval::liquid(9, 14));
    }

    #[test]
    fn explicit_span_intervals() {
        let (_, facts) = parse_fact_file("p(a) @ [(1,2),(3,4)]\n").unwrap();
        assert_eq!(
            facts[0].at,
            SpanInterval::new(Interval::new(1, 2), Interval::new(3, 4))
        );
    }

    #[test]
    fn variables_are_rejected() {
        let error = parse_fact_file("p(?x) @ [0:1]\n").unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::Variable(_)));
    }

    #[test]
    fn missing_interval_is_located() {
        let error = parse_fact_file("p(a) @\nq(b) @ [0:1]\n").unwrap_err();
        assert_eq!(error.line, 1);
    }
}
