//! Serialisation round-trips: parse(print(m)) = m.

use tempel::{
    builder::model::parse_model,
    structures::{
        atom::Atom,
        interval::Interval,
        model::Model,
        siset::SISet,
        span_interval::SpanInterval,
    },
};

#[test]
fn a_three_atom_model_round_trips() {
    let universe = Interval::new(0, 20);

    let mut model = Model::new();
    model.set_atom(
        Atom::ground("moving", &["t1"]),
        SISet::from_span_interval(SpanInterval::liquid(0, 9), true, universe),
    );
    model.set_atom(
        Atom::ground("stopped", &["t1", "t2"]),
        {
            let mut times = SISet::new(true, universe);
            times.add(SpanInterval::liquid(2, 4));
            times.add(SpanInterval::liquid(11, 17));
            times
        },
    );
    model.set_atom(
        Atom::ground("spanning", &["t2"]),
        SISet::from_span_interval(
            SpanInterval::new(Interval::new(1, 3), Interval::new(5, 8)),
            false,
            universe,
        ),
    );

    let printed = model.to_string();
    let reread = parse_model(&printed).unwrap();

    assert_eq!(reread, model);

    // And printing is a fixed point.
    assert_eq!(reread.to_string(), printed);
}

#[test]
fn an_empty_model_round_trips() {
    let model = Model::new();
    let reread = parse_model(&model.to_string()).unwrap();
    assert!(reread.is_empty());
}

#[test]
fn search_output_round_trips() {
    use tempel::{builder, config::Config, procedures::walk_sat::Search};

    let facts = "p(a) @ [0:9]\n";
    let formulas = "p(a) -> q(a) @ [0:9]\n";
    let domain = builder::load_domain(facts, formulas, true).unwrap();

    let result = Search::from_config(&domain, Config::default()).run(domain.default_model());

    let reread = parse_model(&result.best_model.to_string()).unwrap();
    assert_eq!(reread, result.best_model);
}
