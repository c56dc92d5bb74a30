/*!
Span intervals --- rectangles of intervals.

A span interval is a pair of intervals `(S, F)` and denotes the set of ordinary intervals `[i, j]` with `i ∈ S`, `j ∈ F`, and `i ≤ j`.
In other words, a span interval is an axis-aligned rectangle in the plane of (start, finish) pairs, restricted to the half-plane of ordered pairs.

Two shapes are of particular interest:

- A span interval is *liquid* when `S = F`, in which case it denotes every sub-interval of the single interval `[S.start, F.finish]`.
  Liquid span intervals represent properties of time points.
- A span interval with singleton axes, `[(a, a), (b, b)]`, denotes exactly one interval, and is how an event holding over a maximal run `[a, b]` is represented at the interval level.

Operations which remove part of a rectangle (complement, subtraction) return at most four rectangles, one per side.
[satisfies_relation](SpanInterval::satisfies_relation) is the primitive behind the diamond operator: for a relation `r` it computes the intervals standing in `r` to some member of `self`, as a small set of rectangles in which every denoted interval has a witness.
*/

use crate::structures::interval::{Interval, IntervalRelation};

/// A rectangle of intervals: start times drawn from `start`, finish times from `finish`.
///
/// Instances are kept normalized: construction through [normalized](SpanInterval::normalized) guarantees every point of the rectangle denotes a valid interval axis-wise, i.e. `start.start ≤ finish.finish` and neither axis is reversed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpanInterval {
    /// The interval of admissible start points.
    pub start: Interval,

    /// The interval of admissible finish points.
    pub finish: Interval,
}

impl SpanInterval {
    /// A span interval from raw axes, without normalisation.
    pub fn new(start: Interval, finish: Interval) -> Self {
        SpanInterval { start, finish }
    }

    /// A span interval from four endpoints, without normalisation.
    pub fn from_points(s1: u32, s2: u32, f1: u32, f2: u32) -> Self {
        SpanInterval::new(Interval::new(s1, s2), Interval::new(f1, f2))
    }

    /// The liquid span interval denoting every sub-interval of `[start, finish]`.
    pub fn liquid(start: u32, finish: u32) -> Self {
        SpanInterval::from_points(start, finish, start, finish)
    }

    /// Intersects the constraint `start ≤ finish` into the rectangle.
    ///
    /// Start points above the greatest finish and finish points below the least start denote nothing and are trimmed.
    /// Returns nothing when the trimmed rectangle is empty.
    pub fn normalized(self) -> Option<Self> {
        let start = Interval::new(self.start.start, self.start.finish.min(self.finish.finish))
            .normalized()?;
        let finish = Interval::new(self.finish.start.max(self.start.start), self.finish.finish)
            .normalized()?;

        match start.start <= finish.finish {
            true => Some(SpanInterval::new(start, finish)),
            false => None,
        }
    }

    /// Whether the span interval denotes properties of points, i.e. both axes coincide.
    pub fn is_liquid(&self) -> bool {
        self.start == self.finish
    }

    /// The liquid span interval denoting every sub-interval of the enclosing run.
    ///
    /// This is the inclusive liquid projection: the result covers `self`, and is the least liquid span interval to do so.
    pub fn to_liquid_inc(&self) -> Self {
        SpanInterval::liquid(self.start.start, self.finish.finish)
    }

    /// The count of ordinary intervals denoted.
    ///
    /// Expects a normalized span interval.
    pub fn size(&self) -> u64 {
        let (s1, s2) = (self.start.start as u64, self.start.finish as u64);
        let (f1, f2) = (self.finish.start as u64, self.finish.finish as u64);

        // Start points at or below f1 pair with the full finish axis.
        let full_rows = s2.min(f1).checked_sub(s1).map_or(0, |d| d + 1);
        let mut count = full_rows * (f2 - f1 + 1);

        // Start points above f1 pair with a shrinking suffix of the finish axis.
        let lo = s1.max(f1 + 1);
        if lo <= s2 {
            // Sum of (f2 − i + 1) for i in lo..=s2.
            let n = s2 - lo + 1;
            count += n * (f2 + 1) - (lo + s2) * n / 2;
        }
        count
    }

    /// The largest span interval denoting intervals of both operands, if one exists.
    pub fn intersection(&self, other: &SpanInterval) -> Option<SpanInterval> {
        let start = self.start.intersection(&other.start)?;
        let finish = self.finish.intersection(&other.finish)?;
        SpanInterval::new(start, finish).normalized()
    }

    /// The denoted intervals of `self` which are not denoted by `other`, as at most four disjoint span intervals.
    pub fn subtract(&self, other: &SpanInterval) -> Vec<SpanInterval> {
        let Some(common) = self.intersection(other) else {
            return vec![*self];
        };

        let mut pieces = Vec::with_capacity(4);

        // Strips on the start axis, either side of the intersection.
        if common.start.start > 0 {
            pieces.push(SpanInterval::new(
                Interval::new(self.start.start, common.start.start - 1),
                self.finish,
            ));
        }
        pieces.push(SpanInterval::new(
            Interval::new(common.start.finish + 1, self.start.finish),
            self.finish,
        ));

        // Strips on the finish axis, inside the start overlap.
        if common.finish.start > 0 {
            pieces.push(SpanInterval::new(
                common.start,
                Interval::new(self.finish.start, common.finish.start - 1),
            ));
        }
        pieces.push(SpanInterval::new(
            common.start,
            Interval::new(common.finish.finish + 1, self.finish.finish),
        ));

        pieces.into_iter().filter_map(SpanInterval::normalized).collect()
    }

    /// The denoted intervals of the universe square which `self` does not denote.
    pub fn complement(&self, max_interval: &Interval) -> Vec<SpanInterval> {
        let universe = SpanInterval::new(*max_interval, *max_interval);
        universe.subtract(self)
    }

    /// The spans of intervals standing in `rel` to at least one interval denoted by `self`.
    ///
    /// One table entry per relation, and every interval denoted by the result has a
    /// witness in `self` --- the property the diamond operator relies on.
    ///
    /// Most relations yield a single rectangle.
    /// The strictly-ordered converses (`Overlaps`, `OverlapsI`, `StartsI`, `DuringI`,
    /// `FinishesI`) exclude near-diagonal intervals no rectangle can, so their results
    /// carry a rectangle plus one row per start point along the diagonal band; the band
    /// collapses for single-event (singleton-axis) sources, the common shape here.
    /// For the meets family the start axis is pinned to the finish axis --- a deliberate
    /// narrowing, so e.g. `Meets` applied to a single event `[(a, a), (b, b)]` yields
    /// exactly the instant before the event begins.
    pub fn satisfies_relation(
        &self,
        rel: IntervalRelation,
        max_interval: &Interval,
    ) -> Vec<SpanInterval> {
        use IntervalRelation::*;

        let (s1, s2) = (self.start.start as i64, self.start.finish as i64);
        let (f1, f2) = (self.finish.start as i64, self.finish.finish as i64);
        let (m0, mn) = (max_interval.start as i64, max_interval.finish as i64);

        let mut pieces = Vec::new();

        match rel {
            Equals => pieces.push(*self),

            Meets => pieces.extend(clip_to_universe((s1 - 1, s2 - 1), (s1 - 1, s2 - 1), m0, mn)),
            MeetsI => pieces.extend(clip_to_universe((f1 + 1, f2 + 1), (f1 + 1, f2 + 1), m0, mn)),
            UMeets => pieces.extend(clip_to_universe((s1, s2), (s1, s2), m0, mn)),
            UMeetsI => pieces.extend(clip_to_universe((f1, f2), (f1, f2), m0, mn)),

            LessThan => pieces.extend(clip_to_universe((m0, s2 - 2), (m0, s2 - 2), m0, mn)),
            GreaterThan => pieces.extend(clip_to_universe((f1 + 2, mn), (f1 + 2, mn), m0, mn)),

            Starts => pieces.extend(clip_to_universe((s1, s2), (s1, f2 - 1), m0, mn)),
            During => {
                pieces.extend(clip_to_universe((s1 + 1, f2 - 1), (s1 + 1, f2 - 1), m0, mn))
            }
            Finishes => pieces.extend(clip_to_universe((s1 + 1, f2), (f1, f2), m0, mn)),

            // j overlaps some i: j.start < i.start ≤ j.finish < i.finish.
            // Starts below the source need only reach it; starts inside the source
            // need a finish strictly beyond their own start, row by row.
            Overlaps => {
                pieces.extend(clip_to_universe((m0, s1 - 1), (s1, f2 - 1), m0, mn));
                for u in s1.max(m0)..=(s2 - 1).min(mn) {
                    pieces.extend(clip_to_universe((u, u), (u + 1, f2 - 1), m0, mn));
                }
            }

            // Some i overlaps j: i.start < j.start ≤ i.finish < j.finish.
            OverlapsI => {
                pieces.extend(clip_to_universe((s1 + 1, f1), (f1 + 1, mn), m0, mn));
                for u in (s1 + 1).max(f1 + 1).max(m0)..=f2.min(mn) {
                    pieces.extend(clip_to_universe((u, u), (u + 1, mn), m0, mn));
                }
            }

            // j is started by some i: j.start = i.start, i.finish < j.finish.
            StartsI => {
                pieces.extend(clip_to_universe((s1, s2.min(f1)), (f1 + 1, mn), m0, mn));
                for u in s1.max(f1 + 1).max(m0)..=s2.min(mn) {
                    pieces.extend(clip_to_universe((u, u), (u + 1, mn), m0, mn));
                }
            }

            // j strictly contains some i: j.start < i.start, i.finish < j.finish.
            DuringI => {
                pieces.extend(clip_to_universe(
                    (m0, (s2 - 1).min(f1 - 1)),
                    (f1 + 1, mn),
                    m0,
                    mn,
                ));
                for u in f1.max(m0)..=(s2 - 1).min(mn) {
                    pieces.extend(clip_to_universe((u, u), (u + 2, mn), m0, mn));
                }
            }

            // j is finished by some i: j.finish = i.finish, j.start < i.start.
            FinishesI => {
                pieces.extend(clip_to_universe((m0, s1 - 1), (f1, f2), m0, mn));
                for u in s1.max(m0)..=(s2 - 1).min(mn) {
                    pieces.extend(clip_to_universe((u, u), (f1.max(u + 1), f2), m0, mn));
                }
            }
        }

        pieces
    }
}

/// Clamps the rectangle to the universe square and normalizes, yielding nothing when empty.
pub(crate) fn clip_to_universe(
    (js_lo, js_hi): (i64, i64),
    (jf_lo, jf_hi): (i64, i64),
    m0: i64,
    mn: i64,
) -> Option<SpanInterval> {
    let js_lo = js_lo.max(m0);
    let js_hi = js_hi.min(mn);
    let jf_lo = jf_lo.max(m0);
    let jf_hi = jf_hi.min(mn);

    if js_lo > js_hi || jf_lo > jf_hi {
        return None;
    }

    SpanInterval::from_points(js_lo as u32, js_hi as u32, jf_lo as u32, jf_hi as u32).normalized()
}

impl std::fmt::Display for SpanInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.is_liquid() {
            true => write!(f, "[{}:{}]", self.start.start, self.start.finish),
            false => write!(
                f,
                "[({}, {}), ({}, {})]",
                self.start.start, self.start.finish, self.finish.start, self.finish.finish
            ),
        }
    }
}

#[cfg(test)]
mod span_interval_tests {
    use super::*;
    use crate::structures::interval::relation_holds;

    #[test]
    fn normalisation_trims_the_unordered_corner() {
        let si = SpanInterval::from_points(3, 9, 0, 5).normalized().unwrap();
        assert_eq!(si, SpanInterval::from_points(3, 5, 3, 5));

        assert!(SpanInterval::from_points(6, 9, 0, 5).normalized().is_none());
    }

    #[test]
    fn size_counts_ordered_pairs() {
        // All sub-intervals of [0, 3].
        assert_eq!(SpanInterval::liquid(0, 3).size(), 10);

        // A single interval.
        assert_eq!(SpanInterval::from_points(2, 2, 7, 7).size(), 1);

        // Mixed: starts 0..=2, finishes 2..=4.
        assert_eq!(SpanInterval::from_points(0, 2, 2, 4).size(), 9);
    }

    #[test]
    fn complement_covers_the_universe() {
        let universe = Interval::new(0, 10);
        let si = SpanInterval::from_points(1, 2, 3, 4);

        let pieces = si.complement(&universe);
        assert_eq!(pieces.len(), 4);

        let total: u64 = pieces.iter().map(SpanInterval::size).sum();
        let universe_size = SpanInterval::new(universe, universe).size();
        assert_eq!(total + si.size(), universe_size);
    }

    #[test]
    fn subtraction_is_disjoint_and_exact() {
        let a = SpanInterval::from_points(0, 5, 0, 9);
        let b = SpanInterval::from_points(2, 3, 4, 6);

        let pieces = a.subtract(&b);
        for (index, piece) in pieces.iter().enumerate() {
            assert!(piece.intersection(&b).is_none());
            for other in &pieces[index + 1..] {
                assert!(piece.intersection(other).is_none());
            }
        }

        let total: u64 = pieces.iter().map(SpanInterval::size).sum();
        assert_eq!(
            total,
            a.size() - a.intersection(&b).map_or(0, |c| c.size())
        );
    }

    #[test]
    fn equals_is_the_identity_relation() {
        let si = SpanInterval::from_points(1, 4, 3, 8);
        let universe = Interval::new(0, 10);

        assert_eq!(si.satisfies_relation(IntervalRelation::Equals, &universe), vec![si]);
    }

    #[test]
    fn meets_before_a_single_event() {
        let event = SpanInterval::from_points(3, 3, 7, 7);
        let universe = Interval::new(0, 10);

        let before = event.satisfies_relation(IntervalRelation::Meets, &universe);
        assert_eq!(before, vec![SpanInterval::from_points(2, 2, 2, 2)]);

        let after = event.satisfies_relation(IntervalRelation::MeetsI, &universe);
        assert_eq!(after, vec![SpanInterval::from_points(8, 8, 8, 8)]);
    }

    #[test]
    fn relation_results_have_witnesses() {
        let universe = Interval::new(0, 12);
        let sources = [
            SpanInterval::from_points(3, 5, 6, 9),
            SpanInterval::from_points(3, 3, 7, 7),
            SpanInterval::liquid(0, 10),
            SpanInterval::from_points(0, 10, 0, 10),
        ];

        for source in sources {
            for rel in crate::structures::interval::ALL_RELATIONS {
                // Every interval denoted by every returned rectangle stands in rel to
                // some interval denoted by the source.
                for piece in source.satisfies_relation(rel, &universe) {
                    for js in piece.start.start..=piece.start.finish {
                        for jf in piece.finish.start..=piece.finish.finish {
                            if js > jf {
                                continue;
                            }
                            let j = Interval::new(js, jf);

                            let witnessed = (source.start.start..=source.start.finish)
                                .any(|is| {
                                    (source.finish.start..=source.finish.finish)
                                        .filter(|ifin| is <= *ifin)
                                        .any(|ifin| {
                                            relation_holds(rel, &j, &Interval::new(is, ifin))
                                        })
                                });

                            assert!(
                                witnessed,
                                "no witness for {j} under {rel} against {source}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn overlap_results_omit_unwitnessed_instants() {
        // A wide source: an instant cannot overlap anything, so no returned piece may
        // denote one.
        let source = SpanInterval::from_points(0, 10, 0, 10);
        let universe = Interval::new(0, 20);

        for piece in source.satisfies_relation(IntervalRelation::Overlaps, &universe) {
            assert!(
                piece.start.start < piece.finish.start,
                "{piece} denotes an instant"
            );
        }

        // The non-degenerate answers are still there.
        let covers = |pieces: &[SpanInterval], j: &SpanInterval| {
            pieces.iter().any(|piece| piece.intersection(j).is_some())
        };
        let pieces = source.satisfies_relation(IntervalRelation::Overlaps, &universe);
        assert!(covers(&pieces, &SpanInterval::from_points(0, 0, 1, 1)));
        assert!(!covers(&pieces, &SpanInterval::from_points(0, 0, 0, 0)));
    }
}
