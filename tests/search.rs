//! End-to-end search scenarios.

use tempel::{
    builder,
    config::Config,
    domain::Domain,
    procedures::walk_sat::Search,
    structures::{
        atom::Atom, formula::WeightedFormula, interval::Interval, sentence::Sentence,
        siset::SISet, span_interval::SpanInterval,
    },
};

fn p() -> Atom {
    Atom::ground("p", &["a"])
}

fn q() -> Atom {
    Atom::ground("q", &["a"])
}

#[test]
fn a_single_soft_formula_is_satisfied() {
    let mut domain = Domain::new(Interval::new(0, 0));
    domain.push_formula(
        WeightedFormula::soft(Sentence::Atom(p()), 2.0).at(SISet::from_span_interval(
            SpanInterval::liquid(0, 0),
            false,
            Interval::new(0, 0),
        )),
    );

    let config = Config {
        iterations: 100,
        ..Config::default()
    };
    let result = Search::from_config(&domain, config).run(domain.default_model());

    assert!(result.fully_satisfied);
    assert_eq!(domain.score(&result.best_model), 2.0);
    assert_eq!(result.best_model.atom_at(&p()).unwrap().liq_size(), 1);
}

#[test]
fn a_hard_implication_forces_its_consequent() {
    let facts = "p(a) @ [0:9]\n";
    let formulas = "p(a) -> q(a) @ [0:9]\n";
    let domain = builder::load_domain(facts, formulas, true).unwrap();

    let result = Search::from_config(&domain, Config::default()).run(domain.default_model());

    assert!(result.fully_satisfied);
    assert!(domain.is_fully_satisfied(&result.best_model));

    let best_q = result.best_model.atom_at(&q()).unwrap();
    assert_eq!(best_q.liq_size(), 10);

    // Only the atoms of the problem are mentioned.
    let mentioned: Vec<&Atom> = result.best_model.iter().map(|(atom, _)| atom).collect();
    assert_eq!(mentioned, vec![&p(), &q()]);
}

#[test]
fn the_best_score_is_monotone_across_iterations() {
    let facts = "p(a) @ [0:9]\n";
    let formulas = "\
1.0 : q(a) @ [0:9]
1.5 : !q(a) @ [0:9]
";
    let domain = builder::load_domain(facts, formulas, true).unwrap();

    let config = Config {
        iterations: 200,
        seed: 11,
        ..Config::default()
    };
    let result = Search::from_config(&domain, config).run(domain.default_model());

    let mut previous = f64::NEG_INFINITY;
    for row in &result.trace {
        assert!(row.best_score >= previous);
        previous = row.best_score;
    }
}

#[test]
fn seeded_runs_repeat_exactly() {
    let facts = "p(a) @ [0:9]\n";
    let formulas = "\
1.0 : q(a) @ [0:9]
2.0 : [ q(a) -> p(a) ] @ [0:9]
";
    let domain = builder::load_domain(facts, formulas, true).unwrap();

    let config = Config {
        iterations: 100,
        seed: 3,
        ..Config::default()
    };

    let first = Search::from_config(&domain, config.clone()).run(domain.default_model());
    let second = Search::from_config(&domain, config).run(domain.default_model());

    assert_eq!(first.best_model, second.best_model);
    assert_eq!(first.best_score, second.best_score);
    assert_eq!(first.trace, second.trace);
}

#[test]
fn observed_atoms_are_never_modified() {
    let facts = "p(a) @ [3:5]\n";
    let formulas = "5.0 : !p(a) @ [0:9]\n";
    let mut domain = builder::load_domain(facts, formulas, true).unwrap();
    domain.set_max_interval_checked(Interval::new(0, 9)).unwrap();

    let result = Search::from_config(&domain, Config::default()).run(domain.default_model());

    // However attractive the reward, the observation stands.
    let best_p = result.best_model.atom_at(&p()).unwrap();
    assert_eq!(best_p.liq_size(), 3);
}
