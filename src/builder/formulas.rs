/*!
The formula-file reader.

A formula file carries the same preamble declarations as a fact file, followed by
weighted formulas, one per line:

```text
1.5 : [ moving(t1) -> !stopped(t1) ]
inf : spinning(t1) -> <>{mi} spinning(t1) @ [0:99]
2.0 : near(t1, t2) ^{m} far(t1, t2)
```

Operator precedence, loosest to tightest: implication `->`, disjunction `v`,
conjunction `^` (with an optional `{…}` relation annotation, or the `;` shorthand for
`^{m}`), the unary `!` and `<>{…}`, and finally parentheses, `[ … ]` liquid blocks,
atoms, and the boolean constants.

Implication is sugar: `x -> y` reads as `!x v y`.
Inside a liquid block only the pointwise connectives are available; a diamond there is
an error, as is a relation annotation on a conjunction.
*/

use std::collections::BTreeSet;

use crate::{
    builder::{
        facts::{parse_ground_atom, parse_span_interval, parse_type_declaration},
        lexer::{self, Cursor, TokenKind},
        Preamble,
    },
    structures::{
        formula::WeightedFormula,
        interval::IntervalRelation,
        sentence::Sentence,
        siset::SISet,
    },
    types::err::{ParseError, ParseErrorKind},
};

/// Parses a formula file into its preamble and weighted formulas.
pub fn parse_formula_file(input: &str) -> Result<(Preamble, Vec<WeightedFormula>), ParseError> {
    let tokens = lexer::tokenize(input)?;
    let mut cursor = Cursor::new(tokens);

    let mut preamble = Preamble::default();
    let mut formulas = Vec::new();

    while !cursor.at_end() {
        if cursor.eat(&TokenKind::EndLine) {
            continue;
        }
        if cursor.check(&TokenKind::Type) {
            parse_type_declaration(&mut cursor, &mut preamble)?;
            continue;
        }
        formulas.push(parse_weighted_formula(&mut cursor)?);
    }

    Ok((preamble, formulas))
}

/// `[weight :] formula [@ interval-spec]`.
fn parse_weighted_formula(cursor: &mut Cursor) -> Result<WeightedFormula, ParseError> {
    let weight = match cursor.peek() {
        Some(TokenKind::Number(n)) => {
            let weight = *n as f64;
            cursor.expect_number()?;
            cursor.expect(&TokenKind::Colon, "a colon after the weight")?;
            Some(weight)
        }
        Some(TokenKind::Float(x)) => {
            let weight = *x;
            cursor.eat(&TokenKind::Float(weight));
            cursor.expect(&TokenKind::Colon, "a colon after the weight")?;
            Some(weight)
        }
        Some(TokenKind::Infinity) => {
            cursor.eat(&TokenKind::Infinity);
            cursor.expect(&TokenKind::Colon, "a colon after the weight")?;
            None
        }
        _ => None,
    };

    let sentence = parse_implication(cursor)?;

    let mut formula = WeightedFormula {
        sentence,
        weight,
        quantification: None,
    };

    if cursor.eat(&TokenKind::At) {
        let mut intervals = Vec::new();
        match cursor.eat(&TokenKind::OpenBrace) {
            true => {
                while !cursor.check(&TokenKind::CloseBrace) {
                    if let Some(si) = parse_span_interval(cursor)?.normalized() {
                        intervals.push(si);
                    }
                    if !cursor.check(&TokenKind::CloseBrace) {
                        cursor.expect(&TokenKind::Comma, "a comma")?;
                    }
                }
                cursor.expect(&TokenKind::CloseBrace, "a closing brace")?;
            }
            false => {
                if let Some(si) = parse_span_interval(cursor)?.normalized() {
                    intervals.push(si);
                }
            }
        }

        if let Some(span) = intervals
            .iter()
            .map(|si| crate::structures::interval::Interval::new(si.start.start, si.finish.finish))
            .reduce(|a, b| a.span(&b))
        {
            let mut quantification = SISet::new(false, span);
            for si in intervals {
                quantification.add(si);
            }
            formula.quantification = Some(quantification);
        }
    }

    Ok(formula)
}

/// `or ( -> or )*`, desugared to disjunction on the spot.
fn parse_implication(cursor: &mut Cursor) -> Result<Sentence, ParseError> {
    let mut sentence = parse_disjunction(cursor)?;
    while cursor.eat(&TokenKind::Implies) {
        let consequent = parse_disjunction(cursor)?;
        sentence = Sentence::Disjunction(
            Box::new(Sentence::Negation(Box::new(sentence))),
            Box::new(consequent),
        );
    }
    Ok(sentence)
}

fn parse_disjunction(cursor: &mut Cursor) -> Result<Sentence, ParseError> {
    let mut sentence = parse_conjunction(cursor)?;
    while cursor.eat(&TokenKind::Or) {
        let right = parse_conjunction(cursor)?;
        sentence = Sentence::Disjunction(Box::new(sentence), Box::new(right));
    }
    Ok(sentence)
}

/// `unary ( (^ [rels] | ;) unary )*`; `;` is the `^{m}` shorthand.
fn parse_conjunction(cursor: &mut Cursor) -> Result<Sentence, ParseError> {
    let mut sentence = parse_unary(cursor)?;
    loop {
        let relations = if cursor.eat(&TokenKind::Semicolon) {
            [IntervalRelation::Meets].into_iter().collect()
        } else if cursor.eat(&TokenKind::And) {
            let annotated = parse_relation_list(cursor)?;
            match annotated.is_empty() {
                true => Sentence::default_conjunction_relations(),
                false => annotated,
            }
        } else {
            break;
        };

        let right = parse_unary(cursor)?;
        sentence = Sentence::Conjunction(Box::new(sentence), Box::new(right), relations);
    }
    Ok(sentence)
}

fn parse_unary(cursor: &mut Cursor) -> Result<Sentence, ParseError> {
    if cursor.eat(&TokenKind::Not) {
        return Ok(Sentence::Negation(Box::new(parse_unary(cursor)?)));
    }

    if cursor.eat(&TokenKind::Diamond) {
        let annotated = parse_relation_list(cursor)?;
        let relations = match annotated.is_empty() {
            true => Sentence::default_diamond_relations(),
            false => annotated,
        };
        let inner = parse_unary(cursor)?;
        return Ok(Sentence::DiamondOp(Box::new(inner), relations));
    }

    parse_primary(cursor)
}

/// Parentheses, liquid blocks, boolean constants, and atoms.
fn parse_primary(cursor: &mut Cursor) -> Result<Sentence, ParseError> {
    if cursor.eat(&TokenKind::OpenBracket) {
        let inner = parse_liquid_implication(cursor)?;
        cursor.expect(&TokenKind::CloseBracket, "a closing bracket")?;
        return Ok(Sentence::LiquidOp(Box::new(inner)));
    }

    if cursor.eat(&TokenKind::OpenParen) {
        let inner = parse_implication(cursor)?;
        cursor.expect(&TokenKind::CloseParen, "a closing parenthesis")?;
        return Ok(inner);
    }

    if cursor.eat(&TokenKind::True) {
        return Ok(Sentence::BoolLit(true));
    }
    if cursor.eat(&TokenKind::False) {
        return Ok(Sentence::BoolLit(false));
    }

    Ok(Sentence::Atom(parse_ground_atom(cursor)?))
}

/// `{ * }` or `{ rel, … }`; an absent list is empty, and the caller defaults it.
fn parse_relation_list(cursor: &mut Cursor) -> Result<BTreeSet<IntervalRelation>, ParseError> {
    let mut relations = BTreeSet::new();
    if !cursor.eat(&TokenKind::OpenBrace) {
        return Ok(relations);
    }

    if cursor.eat(&TokenKind::Star) {
        relations.extend(crate::structures::interval::ALL_RELATIONS);
    } else {
        relations.insert(parse_relation(cursor)?);
        while cursor.eat(&TokenKind::Comma) {
            relations.insert(parse_relation(cursor)?);
        }
    }

    cursor.expect(&TokenKind::CloseBrace, "a closing brace")?;
    Ok(relations)
}

fn parse_relation(cursor: &mut Cursor) -> Result<IntervalRelation, ParseError> {
    if cursor.eat(&TokenKind::Equals) {
        return Ok(IntervalRelation::Equals);
    }
    if cursor.eat(&TokenKind::GreaterThan) {
        return Ok(IntervalRelation::GreaterThan);
    }
    if cursor.eat(&TokenKind::LessThan) {
        return Ok(IntervalRelation::LessThan);
    }

    let name = cursor.expect_ident()?;
    name.parse::<IntervalRelation>()
        .map_err(|_| cursor.error(ParseErrorKind::UnknownRelation(name)))
}

/// The pointwise fragment inside a liquid block.
fn parse_liquid_implication(cursor: &mut Cursor) -> Result<Sentence, ParseError> {
    let mut sentence = parse_liquid_disjunction(cursor)?;
    while cursor.eat(&TokenKind::Implies) {
        let consequent = parse_liquid_disjunction(cursor)?;
        sentence = Sentence::Disjunction(
            Box::new(Sentence::Negation(Box::new(sentence))),
            Box::new(consequent),
        );
    }
    Ok(sentence)
}

fn parse_liquid_disjunction(cursor: &mut Cursor) -> Result<Sentence, ParseError> {
    let mut sentence = parse_liquid_conjunction(cursor)?;
    while cursor.eat(&TokenKind::Or) {
        let right = parse_liquid_conjunction(cursor)?;
        sentence = Sentence::Disjunction(Box::new(sentence), Box::new(right));
    }
    Ok(sentence)
}

fn parse_liquid_conjunction(cursor: &mut Cursor) -> Result<Sentence, ParseError> {
    let mut sentence = parse_liquid_unary(cursor)?;
    while cursor.eat(&TokenKind::And) {
        let right = parse_liquid_unary(cursor)?;
        sentence = Sentence::Conjunction(
            Box::new(sentence),
            Box::new(right),
            Sentence::default_conjunction_relations(),
        );
    }
    Ok(sentence)
}

fn parse_liquid_unary(cursor: &mut Cursor) -> Result<Sentence, ParseError> {
    if cursor.check(&TokenKind::Diamond) {
        return Err(cursor.error(ParseErrorKind::DiamondInLiquid));
    }
    if cursor.eat(&TokenKind::Not) {
        return Ok(Sentence::Negation(Box::new(parse_liquid_unary(cursor)?)));
    }

    if cursor.eat(&TokenKind::OpenParen) {
        let inner = parse_liquid_implication(cursor)?;
        cursor.expect(&TokenKind::CloseParen, "a closing parenthesis")?;
        return Ok(inner);
    }

    if cursor.eat(&TokenKind::True) {
        return Ok(Sentence::BoolLit(true));
    }
    if cursor.eat(&TokenKind::False) {
        return Ok(Sentence::BoolLit(false));
    }

    Ok(Sentence::Atom(parse_ground_atom(cursor)?))
}
