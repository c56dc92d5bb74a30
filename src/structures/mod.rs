/*!
The abstract elements of the logic and their representations.

Leaves first: [intervals](interval) and their relations, [span intervals](span_interval) (rectangles of intervals), and [sets of span intervals](siset) with the algebra over them.
Above those, the formula language: [terms](term), [atoms](atom), [sentences](sentence), and [weighted formulas](formula).
Finally [models](model), the assignments the search ranges over.
*/

pub mod atom;
pub mod formula;
pub mod interval;
pub mod model;
pub mod sentence;
pub mod siset;
pub mod span_interval;
pub mod term;
