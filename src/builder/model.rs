/*!
The model reader.

A model file is one line per atom, `atom @ {si, …}` --- the format
[Model](crate::structures::model::Model) prints.
Reading a printed model yields the model back:

```rust
# use tempel::builder::model::parse_model;
# use tempel::structures::atom::Atom;
# use tempel::structures::model::Model;
# use tempel::structures::siset::SISet;
# use tempel::structures::span_interval::SpanInterval;
# use tempel::structures::interval::Interval;
let mut model = Model::new();
model.set_atom(
    Atom::ground("p", &["a"]),
    SISet::from_span_interval(SpanInterval::liquid(0, 4), true, Interval::new(0, 9)),
);

let reread = parse_model(&model.to_string()).unwrap();
assert_eq!(reread, model);
```
*/

use crate::{
    builder::{
        facts::{parse_ground_atom, parse_span_interval},
        lexer::{self, Cursor, TokenKind},
    },
    structures::{interval::Interval, model::Model, siset::SISet, span_interval::SpanInterval},
    types::err::ParseError,
};

/// Parses a printed model.
pub fn parse_model(input: &str) -> Result<Model, ParseError> {
    let tokens = lexer::tokenize(input)?;
    let mut cursor = Cursor::new(tokens);

    let mut model = Model::new();

    while !cursor.at_end() {
        if cursor.eat(&TokenKind::EndLine) {
            continue;
        }

        let atom = parse_ground_atom(&mut cursor)?;
        cursor.expect(&TokenKind::At, "@")?;

        let mut members: Vec<SpanInterval> = Vec::new();
        cursor.expect(&TokenKind::OpenBrace, "an opening brace")?;
        while !cursor.check(&TokenKind::CloseBrace) {
            if let Some(si) = parse_span_interval(&mut cursor)?.normalized() {
                members.push(si);
            }
            if !cursor.check(&TokenKind::CloseBrace) {
                cursor.expect(&TokenKind::Comma, "a comma")?;
            }
        }
        cursor.expect(&TokenKind::CloseBrace, "a closing brace")?;

        // An entry of liquid members reads back as a liquid set.
        let liquid = !members.is_empty() && members.iter().all(SpanInterval::is_liquid);
        let span = members
            .iter()
            .map(|si| Interval::new(si.start.start, si.finish.finish))
            .reduce(|a, b| a.span(&b))
            .unwrap_or(Interval::new(0, 0));

        let mut times = SISet::new(liquid, span);
        for member in members {
            times.add(member);
        }
        model.set_atom(atom, times);
    }

    Ok(model)
}

#[cfg(test)]
mod model_reader_tests {
    use super::*;
    use crate::structures::atom::Atom;

    #[test]
    fn a_printed_model_reads_back() {
        let input = "\
p(a) @ {[0:4], [7:9]}
q(a, b) @ {[(1, 2), (3, 4)]}
";
        let model = parse_model(input).unwrap();

        let p = model.atom_at(&Atom::ground("p", &["a"])).unwrap();
        assert!(p.force_liquid());
        assert_eq!(p.liq_size(), 8);

        let q = model.atom_at(&Atom::ground("q", &["a", "b"])).unwrap();
        assert!(!q.force_liquid());
        assert_eq!(q.members().len(), 1);

        let reprinted = parse_model(&model.to_string()).unwrap();
        assert_eq!(reprinted, model);
    }

    #[test]
    fn an_empty_entry_is_false_everywhere() {
        let model = parse_model("p(a) @ {}\n").unwrap();
        let times = model.atom_at(&Atom::ground("p", &["a"])).unwrap();
        assert!(times.is_empty());
    }
}
