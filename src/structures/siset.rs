/*!
Sets of span intervals, and the algebra over them.

A [SISet] is an ordered sequence of [span intervals](SpanInterval) together with two configuration bits:

- `force_liquid`: every member is a liquid span interval, and additions are first projected to liquid form and coalesced with their neighbours.
  A liquid set is, in effect, a set of time points.
- `max_interval`: the universe against which complementation is taken.

Members are kept sorted lexicographically on their four endpoints, and this order is canonical: equality and hashing are defined over the sorted, disjoint representation produced by [make_disjoint](SISet::make_disjoint).

The set operations are exactly those of the name: union through [add](SISet::add), difference through [subtract](SISet::subtract), [complement](SISet::complement) by De Morgan over per-member complements, and pairwise [intersection].
[satisfies_relation](SISet::satisfies_relation) lifts the span-interval relation primitive over members, and [composed_of] builds the spans of relation-constrained pairs for the conjunction operator.
*/

use crate::structures::{
    interval::{Interval, IntervalRelation},
    span_interval::{clip_to_universe, SpanInterval},
};

/// An ordered set of span intervals over a bounded universe.
#[derive(Clone, Debug)]
pub struct SISet {
    members: Vec<SpanInterval>,

    force_liquid: bool,

    max_interval: Interval,
}

impl SISet {
    /// An empty set over the given universe.
    pub fn new(force_liquid: bool, max_interval: Interval) -> Self {
        SISet {
            members: Vec::new(),
            force_liquid,
            max_interval,
        }
    }

    /// A set holding (the normalized form of) a single span interval.
    pub fn from_span_interval(si: SpanInterval, force_liquid: bool, max_interval: Interval) -> Self {
        let mut set = SISet::new(force_liquid, max_interval);
        set.add(si);
        set
    }

    /// The universe of the set.
    pub fn max_interval(&self) -> Interval {
        self.max_interval
    }

    /// Whether additions are projected to liquid form.
    pub fn force_liquid(&self) -> bool {
        self.force_liquid
    }

    /// Widens (or narrows) the universe of the set.
    ///
    /// Members are not trimmed; the universe only bounds complementation and relation queries.
    pub fn set_max_interval(&mut self, max_interval: Interval) {
        self.max_interval = max_interval;
    }

    /// The members of the set, in canonical order.
    pub fn members(&self) -> &[SpanInterval] {
        &self.members
    }

    /// Whether the set denotes no intervals.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The interval spanned by the members, from least start to greatest finish.
    pub fn span_of(&self) -> Option<Interval> {
        let start = self.members.iter().map(|si| si.start.start).min()?;
        let finish = self.members.iter().map(|si| si.finish.finish).max()?;
        Some(Interval::new(start, finish))
    }

    /// The count of ordinary intervals denoted by the set.
    ///
    /// Counted over a disjoint copy, so overlapping members are not counted twice.
    pub fn size(&self) -> u64 {
        let mut disjoint = self.clone();
        disjoint.make_disjoint();
        disjoint.members.iter().map(SpanInterval::size).sum()
    }

    /// The count of time points in the liquid projection of the set.
    pub fn liq_size(&self) -> u64 {
        self.liquid_runs().iter().map(Interval::length).sum()
    }

    /// Adds a span interval to the set.
    ///
    /// The span interval is normalized, and, on a liquid set, projected to liquid form and coalesced with its neighbours.
    /// Union on a non-liquid set does not preserve disjointness; call [make_disjoint](SISet::make_disjoint) when a canonical representation is required.
    pub fn add(&mut self, si: SpanInterval) {
        let Some(si) = si.normalized() else {
            return;
        };

        match self.force_liquid {
            true => {
                self.members.push(si.to_liquid_inc());
                self.coalesce_liquid();
            }
            false => {
                if let Err(position) = self.members.binary_search(&si) {
                    self.members.insert(position, si);
                }
            }
        }
    }

    /// Adds every member of `other` to the set.
    pub fn add_set(&mut self, other: &SISet) {
        for si in &other.members {
            self.add(*si);
        }
    }

    /// Removes the denoted intervals of `si` from the set.
    ///
    /// Every member is rewritten into at most four span intervals, and the result is disjoint whenever the set was.
    pub fn subtract(&mut self, si: &SpanInterval) {
        if self.force_liquid {
            // On a liquid set subtraction is pointwise: the covered points are removed
            // from each run, rather than the covered intervals from each rectangle.
            let cut = Interval::new(si.start.start, si.finish.finish);
            let mut rewritten = Vec::with_capacity(self.members.len() + 1);
            for member in &self.members {
                let run = Interval::new(member.start.start, member.finish.finish);
                if run.start < cut.start {
                    rewritten.push(SpanInterval::liquid(run.start, run.finish.min(cut.start - 1)));
                }
                if run.finish > cut.finish {
                    rewritten.push(SpanInterval::liquid(run.start.max(cut.finish + 1), run.finish));
                }
            }
            self.members = rewritten;
            return;
        }

        let mut rewritten = Vec::with_capacity(self.members.len());
        for member in &self.members {
            rewritten.extend(member.subtract(si));
        }
        rewritten.sort();
        rewritten.dedup();
        self.members = rewritten;
    }

    /// Removes every member of `other` from the set.
    pub fn subtract_set(&mut self, other: &SISet) {
        for si in &other.members {
            self.subtract(si);
        }
    }

    /// The complement of the set with respect to its universe.
    ///
    /// By De Morgan the complement of a union is the intersection of the per-member complements, so the per-member complements are intersected pairwise, short-circuiting when an intermediate becomes empty.
    /// The complement of the empty set is the whole universe.
    pub fn complement(&self) -> SISet {
        if self.force_liquid {
            return self.liquid_complement();
        }

        let mut result = SISet::new(false, self.max_interval);

        let mut members = self.members.iter();
        let Some(first) = members.next() else {
            result.add(SpanInterval::new(self.max_interval, self.max_interval));
            return result;
        };

        let mut acc = first.complement(&self.max_interval);
        for member in members {
            if acc.is_empty() {
                break;
            }
            let mut next = Vec::new();
            for piece in &acc {
                for comp in member.complement(&self.max_interval) {
                    if let Some(common) = piece.intersection(&comp) {
                        next.push(common);
                    }
                }
            }
            acc = next;
        }

        for piece in acc {
            result.add(piece);
        }
        result.make_disjoint();
        result
    }

    /// The complement of a liquid set: the runs of points the set does not cover.
    fn liquid_complement(&self) -> SISet {
        let mut result = SISet::new(true, self.max_interval);
        let mut cursor = self.max_interval.start;
        let mut covered_to_end = false;

        for run in self.liquid_runs() {
            if run.finish < self.max_interval.start {
                continue;
            }
            if run.start > self.max_interval.finish {
                break;
            }
            let start = run.start.max(self.max_interval.start);
            if start > cursor {
                result.add(SpanInterval::liquid(cursor, start - 1));
            }
            if run.finish >= self.max_interval.finish {
                covered_to_end = true;
                break;
            }
            cursor = run.finish + 1;
        }

        if !covered_to_end && cursor <= self.max_interval.finish {
            result.add(SpanInterval::liquid(cursor, self.max_interval.finish));
        }
        result
    }

    /// The union over members of the spans of intervals standing in `rel` to the member.
    pub fn satisfies_relation(&self, rel: IntervalRelation) -> SISet {
        let mut result = SISet::new(false, self.max_interval);
        for member in &self.members {
            for related in member.satisfies_relation(rel, &self.max_interval) {
                result.add(related);
            }
        }
        result
    }

    /// Whether every interval denoted by `other` is denoted by `self`.
    pub fn includes(&self, other: &SISet) -> bool {
        let mut remainder = other.clone();
        // Liquid coercion would be wrong here: inclusion is over denoted intervals.
        remainder.force_liquid = false;
        remainder.subtract_set(self);
        remainder.is_empty()
    }

    /// Whether the set denotes every interval of `si`.
    pub fn includes_span_interval(&self, si: &SpanInterval) -> bool {
        self.includes(&SISet::from_span_interval(*si, false, self.max_interval))
    }

    /// Whether no two members share a denoted interval.
    pub fn is_disjoint(&self) -> bool {
        for (index, member) in self.members.iter().enumerate() {
            for other in &self.members[index + 1..] {
                if member.intersection(other).is_some() {
                    return false;
                }
            }
        }
        true
    }

    /// Rewrites the members so no two share a denoted interval, preserving the denoted set.
    ///
    /// Later members are subtracted against earlier ones, pairwise.
    ///
    /// # Panics
    /// On the internal invariant that the rewritten set is disjoint.
    pub fn make_disjoint(&mut self) {
        if self.force_liquid {
            // Coalesced liquid runs are disjoint already.
            self.coalesce_liquid();
            return;
        }

        let mut disjoint: Vec<SpanInterval> = Vec::with_capacity(self.members.len());
        for member in &self.members {
            let mut pieces = vec![*member];
            for settled in &disjoint {
                pieces = pieces
                    .iter()
                    .flat_map(|piece| piece.subtract(settled))
                    .collect();
                if pieces.is_empty() {
                    break;
                }
            }
            disjoint.extend(pieces);
        }
        disjoint.sort();
        self.members = disjoint;

        if !self.is_disjoint() {
            panic!("! make_disjoint left an overlapping pair");
        }
    }

    /// The inclusive liquid projection of the set: a liquid set covering every member.
    pub fn to_liquid_inc(&self) -> SISet {
        let mut result = SISet::new(true, self.max_interval);
        for member in &self.members {
            result.add(member.to_liquid_inc());
        }
        result
    }

    /// The maximal runs of the liquid projection.
    fn liquid_runs(&self) -> Vec<Interval> {
        let mut runs: Vec<Interval> = self
            .members
            .iter()
            .map(|si| Interval::new(si.start.start, si.finish.finish))
            .collect();
        runs.sort();

        let mut coalesced: Vec<Interval> = Vec::with_capacity(runs.len());
        for run in runs {
            match coalesced.last_mut() {
                Some(last) if run.start <= last.finish.saturating_add(1) => {
                    last.finish = last.finish.max(run.finish);
                }
                _ => coalesced.push(run),
            }
        }
        coalesced
    }

    /// The spanning form of the set: one single-interval member per maximal liquid run.
    ///
    /// On a liquid set this is the event reading --- each run `[a, b]` becomes the one
    /// interval `[(a, a), (b, b)]` rather than the family of its sub-intervals.
    /// A non-liquid set is already at the interval level and is returned as is.
    pub fn spanning(&self) -> SISet {
        if !self.force_liquid {
            return self.clone();
        }

        let mut result = SISet::new(false, self.max_interval);
        for run in self.liquid_runs() {
            result.add(SpanInterval::from_points(
                run.start, run.start, run.finish, run.finish,
            ));
        }
        result
    }

    /// Merges overlapping and adjacent liquid members, restoring the liquid invariant.
    fn coalesce_liquid(&mut self) {
        let runs = self.liquid_runs();
        self.members = runs
            .into_iter()
            .map(|run| SpanInterval::liquid(run.start, run.finish))
            .collect();
    }
}

impl PartialEq for SISet {
    /// Sequence equality over the canonical (disjoint, sorted) representation.
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.clone();
        left.make_disjoint();
        let mut right = other.clone();
        right.make_disjoint();
        left.members == right.members
    }
}

impl Eq for SISet {}

impl std::hash::Hash for SISet {
    /// Hashes the liquid projection, so sets equal by interval hash alike.
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for run in self.liquid_runs() {
            run.hash(state);
        }
    }
}

impl std::fmt::Display for SISet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, member) in self.members.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{member}")?;
        }
        write!(f, "}}")
    }
}

/// The pairwise intersection of two sets.
///
/// The universe of the result is the common part of the operand universes.
pub fn intersection(a: &SISet, b: &SISet) -> SISet {
    let max_interval = Interval::new(
        a.max_interval.start.max(b.max_interval.start),
        a.max_interval.finish.min(b.max_interval.finish),
    );

    let mut result = SISet::new(a.force_liquid && b.force_liquid, max_interval);
    for left in &a.members {
        for right in &b.members {
            if let Some(common) = left.intersection(right) {
                result.add(common);
            }
        }
    }
    result
}

/// The weaker equivalence comparing the liquid projections of the operands.
pub fn equal_by_interval(a: &SISet, b: &SISet) -> bool {
    a.liquid_runs() == b.liquid_runs()
}

/// The spans of pairs of intervals, one from each operand, standing in `rel`.
///
/// For `x ∈ a` and `y ∈ b` with `rel(x, y)`, the span `[min start, max finish]` of the
/// pair belongs to the result, and every span denoted by the result has such a
/// witnessing pair --- the set is exact, without enumerating pairs.
/// The relations whose constraints are strict inequalities exclude near-diagonal spans
/// no rectangle can, and carry a rectangle plus one row per start point along the
/// diagonal band; the band collapses for single-event (singleton-axis) operands.
pub fn composed_of(
    a: &SpanInterval,
    b: &SpanInterval,
    rel: IntervalRelation,
    universe: &Interval,
) -> Vec<SpanInterval> {
    use IntervalRelation::*;

    // The converse cases reduce to the direct ones with the operands swapped, as the
    // span of a pair does not depend on its order.
    match rel {
        MeetsI | UMeetsI | GreaterThan | OverlapsI | StartsI | DuringI | FinishesI => {
            return composed_of(b, a, rel.inverse(), universe);
        }
        _ => {}
    }

    let (m0, mn) = (universe.start as i64, universe.finish as i64);
    let (as1, as2) = (a.start.start as i64, a.start.finish as i64);
    let (af1, af2) = (a.finish.start as i64, a.finish.finish as i64);
    let (bs1, bs2) = (b.start.start as i64, b.start.finish as i64);
    let (bf1, bf2) = (b.finish.start as i64, b.finish.finish as i64);

    let mut spans = Vec::new();

    match rel {
        Equals => spans.extend(a.intersection(b)),

        Meets => {
            // x.finish + 1 = y.start: x runs out exactly where y begins.  The span
            // must reach past its own junction point, so spans starting inside the
            // junction window go row by row.
            let j_lo = af1.max(bs1 - 1);
            let j_hi = af2.min(bs2 - 1);
            if j_lo <= j_hi {
                spans.extend(clip_to_universe((as1, as2.min(j_lo)), (bf1.max(j_lo + 1), bf2), m0, mn));
                for u in as1.max(j_lo + 1).max(m0)..=as2.min(j_hi).min(mn) {
                    spans.extend(clip_to_universe((u, u), (bf1.max(u + 1), bf2), m0, mn));
                }
            }
        }

        UMeets => {
            // x.finish = y.start: the pair shares a single point.
            let j_lo = af1.max(bs1);
            let j_hi = af2.min(bs2);
            if j_lo <= j_hi {
                spans.extend(clip_to_universe((as1, as2.min(j_hi)), (bf1.max(j_lo), bf2), m0, mn));
            }
        }

        LessThan => {
            // x.finish + 1 < y.start: a gap between the pair.  The span must leave
            // room for the gap, so spans hugging the diagonal go row by row.
            if af1 + 2 > bs2 {
                return spans;
            }
            let h = bs1.max(af1 + 2);
            let u_cap = as2.min(af2).min(bs2 - 2);
            spans.extend(clip_to_universe((as1, u_cap.min(h - 2)), (bf1.max(h), bf2), m0, mn));
            for u in as1.max(h - 1).max(m0)..=u_cap.min(mn) {
                spans.extend(clip_to_universe((u, u), (bf1.max(u + 2), bf2), m0, mn));
            }
        }

        Overlaps => {
            // x.start < y.start ≤ x.finish < y.finish.
            if bs1 > af2 {
                return spans;
            }
            let d = af1.max(bs1);
            let u_cap = as2.min(af2 - 1).min(bs2 - 1);
            spans.extend(clip_to_universe((as1, u_cap.min(d - 1)), (bf1.max(d + 1), bf2), m0, mn));
            for u in as1.max(d).max(m0)..=u_cap.min(mn) {
                spans.extend(clip_to_universe((u, u), (bf1.max(u + 2), bf2), m0, mn));
            }
        }

        Starts => {
            // x.start = y.start, x.finish < y.finish: the span is y.
            let Some(anchor) = a.start.intersection(&b.start) else {
                return spans;
            };
            let (i1, i2) = (anchor.start as i64, anchor.finish as i64);
            spans.extend(clip_to_universe((i1, i2.min(af1)), (bf1.max(af1 + 1), bf2), m0, mn));
            for u in i1.max(af1 + 1).max(m0)..=i2.min(mn) {
                spans.extend(clip_to_universe((u, u), (bf1.max(u + 1), bf2), m0, mn));
            }
        }

        During => {
            // y.start < x.start, x.finish < y.finish: the span is y.
            let u_cap = bs2.min(as2 - 1);
            spans.extend(clip_to_universe((bs1, u_cap.min(af1 - 1)), (bf1.max(af1 + 1), bf2), m0, mn));
            for u in bs1.max(af1).max(m0)..=u_cap.min(mn) {
                spans.extend(clip_to_universe((u, u), (bf1.max(u + 2), bf2), m0, mn));
            }
        }

        Finishes => {
            // x.finish = y.finish, y.start < x.start: the span is y.
            let Some(anchor) = a.finish.intersection(&b.finish) else {
                return spans;
            };
            let (e1, e2) = (anchor.start as i64, anchor.finish as i64);
            let u_cap = bs2.min(as2 - 1);
            spans.extend(clip_to_universe((bs1, u_cap.min(as1 - 1)), (e1, e2), m0, mn));
            for u in bs1.max(as1).max(m0)..=u_cap.min(mn) {
                spans.extend(clip_to_universe((u, u), (e1.max(u + 1), e2), m0, mn));
            }
        }

        MeetsI | UMeetsI | GreaterThan | OverlapsI | StartsI | DuringI | FinishesI => {
            unreachable!()
        }
    }

    spans
}

#[cfg(test)]
mod siset_tests {
    use super::*;

    fn universe() -> Interval {
        Interval::new(0, 10)
    }

    #[test]
    fn liquid_addition_coalesces() {
        let mut set = SISet::new(true, universe());
        set.add(SpanInterval::liquid(0, 2));
        set.add(SpanInterval::liquid(5, 7));
        set.add(SpanInterval::liquid(3, 4));

        assert_eq!(set.members(), &[SpanInterval::liquid(0, 7)]);
        assert_eq!(set.liq_size(), 8);
    }

    #[test]
    fn complement_of_empty_is_the_universe() {
        let set = SISet::new(false, universe());
        let complement = set.complement();

        assert_eq!(
            complement.members(),
            &[SpanInterval::new(universe(), universe())]
        );
    }

    #[test]
    fn complement_partitions_the_universe() {
        let set = SISet::from_span_interval(
            SpanInterval::from_points(1, 2, 3, 4),
            false,
            universe(),
        );
        let complement = set.complement();

        let full = SpanInterval::new(universe(), universe()).size();
        assert_eq!(set.size() + complement.size(), full);

        // Nothing is in both.
        assert!(intersection(&set, &complement).is_empty());
    }

    #[test]
    fn double_complement_preserves_the_set() {
        let mut set = SISet::new(false, universe());
        set.add(SpanInterval::from_points(1, 2, 3, 4));
        set.add(SpanInterval::from_points(6, 6, 8, 9));

        let back = set.complement().complement();
        assert!(back.includes(&set) && set.includes(&back));
    }

    #[test]
    fn inclusion_matches_union_stability() {
        let mut set = SISet::new(false, universe());
        set.add(SpanInterval::from_points(2, 4, 5, 9));

        let inside = SpanInterval::from_points(3, 4, 6, 7);
        assert!(set.includes_span_interval(&inside));

        let mut extended = set.clone();
        extended.add(inside);
        assert_eq!(extended, set);

        let outside = SpanInterval::from_points(0, 1, 5, 9);
        assert!(!set.includes_span_interval(&outside));
    }

    #[test]
    fn make_disjoint_preserves_size() {
        let mut set = SISet::new(false, universe());
        set.add(SpanInterval::from_points(0, 4, 0, 9));
        set.add(SpanInterval::from_points(2, 6, 3, 8));

        let expected = set.size();
        set.make_disjoint();
        assert!(set.is_disjoint());
        assert_eq!(set.members.iter().map(SpanInterval::size).sum::<u64>(), expected);
    }

    #[test]
    fn spanning_reads_runs_as_events() {
        let mut set = SISet::new(true, universe());
        set.add(SpanInterval::liquid(3, 7));

        assert_eq!(
            set.spanning().members(),
            &[SpanInterval::from_points(3, 3, 7, 7)]
        );
    }

    #[test]
    fn composed_of_meets_spans_the_junction() {
        let p = SpanInterval::from_points(0, 0, 4, 4);
        let q = SpanInterval::from_points(5, 5, 9, 9);

        let spans = composed_of(&p, &q, IntervalRelation::Meets, &Interval::new(0, 9));
        assert_eq!(spans, vec![SpanInterval::from_points(0, 0, 9, 9)]);

        // No junction, no span.
        let r = SpanInterval::from_points(6, 6, 9, 9);
        assert!(composed_of(&p, &r, IntervalRelation::Meets, &Interval::new(0, 9)).is_empty());
    }

    #[test]
    fn composed_of_excludes_spans_without_a_pair() {
        let wide = SpanInterval::from_points(0, 10, 0, 10);
        let universe = Interval::new(0, 20);

        let denotes = |spans: &[SpanInterval], j: &SpanInterval| {
            spans.iter().any(|span| span.intersection(j).is_some())
        };

        // An overlapping pair spans at least three points, a strictly nested pair
        // likewise: the two-point span [0, 1] has no witnessing pair under either.
        for rel in [IntervalRelation::Overlaps, IntervalRelation::During] {
            let spans = composed_of(&wide, &wide, rel, &universe);
            assert!(!denotes(&spans, &SpanInterval::from_points(0, 0, 1, 1)), "{rel}");
            assert!(denotes(&spans, &SpanInterval::from_points(0, 0, 2, 2)), "{rel}");
        }

        // A gap needs room too.
        let spans = composed_of(&wide, &wide, IntervalRelation::LessThan, &universe);
        assert!(!denotes(&spans, &SpanInterval::from_points(5, 5, 5, 5)));
        assert!(denotes(&spans, &SpanInterval::from_points(0, 0, 2, 2)));
    }

    #[test]
    fn equal_by_interval_ignores_shape() {
        let mut squares = SISet::new(false, universe());
        squares.add(SpanInterval::from_points(0, 0, 4, 4));

        let mut liquid = SISet::new(true, universe());
        liquid.add(SpanInterval::liquid(0, 4));

        assert!(equal_by_interval(&squares, &liquid));
        assert_ne!(squares, liquid);
    }
}
