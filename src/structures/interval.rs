/*!
(The representation of) a closed interval of time points, and the relations between intervals.

Time points are non-negative integers.
An interval is a pair of time points `start ≤ finish`, and denotes every point between the two, inclusive.
So, the length of an interval is `finish − start + 1`, and a single instant is an interval of length one.

Intervals are compared to each other through the thirteen relations of Allen's interval algebra, together with two 'union' variants of meets used when joining liquid runs:

- `UMeets` holds when the finish of one interval is the start of the other, so the two share exactly one point.
- `UMeetsI` is its converse.

Each relation is a predicate on a pair of intervals, given by [relation_holds].
*/

use crate::types::err::{self};

/// A closed interval `[start, finish]` of time points, with `start ≤ finish`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    /// The first point of the interval.
    pub start: u32,

    /// The last point of the interval.
    pub finish: u32,
}

impl Interval {
    /// An interval from `start` to `finish`, without any check that the pair is ordered.
    ///
    /// For a checked constructor, see [normalized](Interval::normalized).
    pub fn new(start: u32, finish: u32) -> Self {
        Interval { start, finish }
    }

    /// The interval, if `start ≤ finish`, and nothing otherwise.
    pub fn normalized(self) -> Option<Self> {
        match self.start <= self.finish {
            true => Some(self),
            false => None,
        }
    }

    /// A count of the points in the interval.
    pub fn length(&self) -> u64 {
        (self.finish - self.start) as u64 + 1
    }

    /// The largest interval contained in both `self` and `other`, if one exists.
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        Interval::new(self.start.max(other.start), self.finish.min(other.finish)).normalized()
    }

    /// The smallest interval containing both `self` and `other`.
    pub fn span(&self, other: &Interval) -> Interval {
        Interval::new(self.start.min(other.start), self.finish.max(other.finish))
    }

    /// Whether `other` is contained in `self`.
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.finish <= self.finish
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.finish)
    }
}

/// The relations which may hold between a pair of intervals.
///
/// The thirteen relations of Allen's interval algebra are mutually exclusive and jointly exhaustive.
/// `UMeets` and `UMeetsI` overlap with the others: two intervals which share exactly one boundary point stand in `UMeets`, and also in whichever Allen relation their remaining endpoints determine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntervalRelation {
    /// `a` finishes immediately before `b` starts.
    Meets,

    /// `b` finishes immediately before `a` starts.
    MeetsI,

    /// The finish of `a` is the start of `b`.
    UMeets,

    /// The finish of `b` is the start of `a`.
    UMeetsI,

    /// `a` starts first, the two overlap, and `b` finishes last.
    Overlaps,

    /// The converse of `Overlaps`.
    OverlapsI,

    /// `a` and `b` start together and `a` finishes first.
    Starts,

    /// `a` and `b` start together and `b` finishes first.
    StartsI,

    /// `a` is strictly inside `b`.
    During,

    /// `b` is strictly inside `a`.
    DuringI,

    /// `a` and `b` finish together and `b` starts first.
    Finishes,

    /// `a` and `b` finish together and `a` starts first.
    FinishesI,

    /// `a` and `b` are the same interval.
    Equals,

    /// `a` starts strictly after `b` finishes, with a gap.
    GreaterThan,

    /// `a` finishes strictly before `b` starts, with a gap.
    LessThan,
}

/// Every relation, in a fixed order.
pub const ALL_RELATIONS: [IntervalRelation; 15] = [
    IntervalRelation::Meets,
    IntervalRelation::MeetsI,
    IntervalRelation::UMeets,
    IntervalRelation::UMeetsI,
    IntervalRelation::Overlaps,
    IntervalRelation::OverlapsI,
    IntervalRelation::Starts,
    IntervalRelation::StartsI,
    IntervalRelation::During,
    IntervalRelation::DuringI,
    IntervalRelation::Finishes,
    IntervalRelation::FinishesI,
    IntervalRelation::Equals,
    IntervalRelation::GreaterThan,
    IntervalRelation::LessThan,
];

impl IntervalRelation {
    /// The converse relation: `a rel b` holds exactly when `b rel.inverse() a` holds.
    pub fn inverse(self) -> Self {
        use IntervalRelation::*;
        match self {
            Meets => MeetsI,
            MeetsI => Meets,
            UMeets => UMeetsI,
            UMeetsI => UMeets,
            Overlaps => OverlapsI,
            OverlapsI => Overlaps,
            Starts => StartsI,
            StartsI => Starts,
            During => DuringI,
            DuringI => During,
            Finishes => FinishesI,
            FinishesI => Finishes,
            Equals => Equals,
            GreaterThan => LessThan,
            LessThan => GreaterThan,
        }
    }

    /// The short name used in relation annotation lists of the formula grammar.
    pub fn name(self) -> &'static str {
        use IntervalRelation::*;
        match self {
            Meets => "m",
            MeetsI => "mi",
            UMeets => "um",
            UMeetsI => "umi",
            Overlaps => "o",
            OverlapsI => "oi",
            Starts => "s",
            StartsI => "si",
            During => "d",
            DuringI => "di",
            Finishes => "f",
            FinishesI => "fi",
            Equals => "=",
            GreaterThan => ">",
            LessThan => "<",
        }
    }
}

impl std::str::FromStr for IntervalRelation {
    type Err = err::ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use IntervalRelation::*;
        match s {
            "m" => Ok(Meets),
            "mi" => Ok(MeetsI),
            "um" => Ok(UMeets),
            "umi" => Ok(UMeetsI),
            "o" => Ok(Overlaps),
            "oi" => Ok(OverlapsI),
            "s" => Ok(Starts),
            "si" => Ok(StartsI),
            "d" => Ok(During),
            "di" => Ok(DuringI),
            "f" => Ok(Finishes),
            "fi" => Ok(FinishesI),
            "=" => Ok(Equals),
            ">" => Ok(GreaterThan),
            "<" => Ok(LessThan),
            _ => Err(err::ErrorKind::from(err::ParseError::unknown_relation(s))),
        }
    }
}

impl std::fmt::Display for IntervalRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Whether `rel` holds of the ordered pair `(a, b)`.
pub fn relation_holds(rel: IntervalRelation, a: &Interval, b: &Interval) -> bool {
    use IntervalRelation::*;
    match rel {
        Meets => a.finish + 1 == b.start,
        MeetsI => b.finish + 1 == a.start,
        UMeets => a.finish == b.start,
        UMeetsI => b.finish == a.start,
        Overlaps => a.start < b.start && b.start <= a.finish && a.finish < b.finish,
        OverlapsI => relation_holds(Overlaps, b, a),
        Starts => a.start == b.start && a.finish < b.finish,
        StartsI => a.start == b.start && b.finish < a.finish,
        During => b.start < a.start && a.finish < b.finish,
        DuringI => relation_holds(During, b, a),
        Finishes => a.finish == b.finish && b.start < a.start,
        FinishesI => a.finish == b.finish && a.start < b.start,
        Equals => a == b,
        GreaterThan => b.finish + 1 < a.start,
        LessThan => a.finish + 1 < b.start,
    }
}

#[cfg(test)]
mod interval_tests {
    use super::*;

    #[test]
    fn normalisation() {
        assert!(Interval::new(3, 2).normalized().is_none());
        assert_eq!(Interval::new(2, 2).normalized(), Some(Interval::new(2, 2)));
    }

    #[test]
    fn span_and_intersection() {
        let a = Interval::new(1, 4);
        let b = Interval::new(3, 9);

        assert_eq!(a.span(&b), Interval::new(1, 9));
        assert_eq!(a.intersection(&b), Some(Interval::new(3, 4)));
        assert_eq!(a.intersection(&Interval::new(6, 9)), None);
    }

    #[test]
    fn relations_on_a_junction() {
        let a = Interval::new(0, 4);
        let b = Interval::new(5, 9);

        assert!(relation_holds(IntervalRelation::Meets, &a, &b));
        assert!(relation_holds(IntervalRelation::MeetsI, &b, &a));
        assert!(!relation_holds(IntervalRelation::LessThan, &a, &b));
        assert!(relation_holds(IntervalRelation::LessThan, &a, &Interval::new(6, 9)));
    }

    #[test]
    fn inverses_agree_with_swapped_arguments() {
        let a = Interval::new(2, 5);
        let b = Interval::new(4, 8);

        for rel in ALL_RELATIONS {
            assert_eq!(
                relation_holds(rel, &a, &b),
                relation_holds(rel.inverse(), &b, &a),
            );
        }
    }
}
