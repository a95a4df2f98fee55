//! Ordered candidate moves for the priority-fallback rule.
//!
//! Given a desired unit step, [`fallback_candidates`] lists every move
//! the rule may try, in the order it tries them:
//!
//! | Desired | Candidates |
//! |---------|------------|
//! | axis `(dx, 0)` | `(dx, 0)`, `(dx, 1)`, `(dx, -1)` |
//! | axis `(0, dy)` | `(0, dy)`, `(1, dy)`, `(-1, dy)` |
//! | diagonal `(dx, dy)` | `(dx, dy)`, `(dx, 0)`, `(0, dy)`, `(dx, -dy)`, `(-dx, dy)` |
//! | `(0, 0)` | none |

use crate::planner::Rule;
use skyspace_core::MoveVector;
use smallvec::SmallVec;

/// A candidate move and the rule step that proposes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Displacement to try.
    pub vector: MoveVector,
    /// Fallback step it belongs to.
    pub rule: Rule,
}

/// At most five candidates (diagonal case); never heap-allocated.
pub type Candidates = SmallVec<[Candidate; 5]>;

fn push(out: &mut Candidates, vector: Option<MoveVector>, rule: Rule) {
    if let Some(vector) = vector {
        out.push(Candidate { vector, rule });
    }
}

/// All candidates for `desired`, highest priority first.
///
/// Empty for a hold vector (the aircraft has arrived).
pub fn fallback_candidates(desired: MoveVector) -> Candidates {
    let mut out = Candidates::new();
    if desired.is_hold() {
        return out;
    }
    push(&mut out, Some(desired), Rule::Desired);

    let (dx, dy) = (desired.dx(), desired.dy());
    if desired.is_axis_aligned() {
        if dx != 0 {
            push(&mut out, desired.with_dy(1), Rule::SidestepPositive);
            push(&mut out, desired.with_dy(-1), Rule::SidestepNegative);
        } else {
            push(&mut out, desired.with_dx(1), Rule::SidestepPositive);
            push(&mut out, desired.with_dx(-1), Rule::SidestepNegative);
        }
    } else {
        push(&mut out, desired.with_dy(0), Rule::DropDy);
        push(&mut out, desired.with_dx(0), Rule::DropDx);
        push(&mut out, desired.with_dy(-dy), Rule::MirrorDy);
        push(&mut out, desired.with_dx(-dx), Rule::MirrorDx);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(dx: i8, dy: i8) -> MoveVector {
        MoveVector::new(dx, dy).unwrap()
    }

    fn vectors(c: &Candidates) -> Vec<(i8, i8)> {
        c.iter().map(|c| (c.vector.dx(), c.vector.dy())).collect()
    }

    #[test]
    fn hold_has_no_candidates() {
        assert!(fallback_candidates(MoveVector::HOLD).is_empty());
    }

    #[test]
    fn row_axis_sidesteps_positive_then_negative() {
        let c = fallback_candidates(v(1, 0));
        assert_eq!(vectors(&c), vec![(1, 0), (1, 1), (1, -1)]);
        assert_eq!(c[1].rule, Rule::SidestepPositive);
        assert_eq!(c[2].rule, Rule::SidestepNegative);
    }

    #[test]
    fn column_axis_sidesteps_positive_then_negative() {
        let c = fallback_candidates(v(0, -1));
        assert_eq!(vectors(&c), vec![(0, -1), (1, -1), (-1, -1)]);
    }

    #[test]
    fn diagonal_order_is_drop_dy_drop_dx_mirror_dy_mirror_dx() {
        let c = fallback_candidates(v(1, 1));
        assert_eq!(vectors(&c), vec![(1, 1), (1, 0), (0, 1), (1, -1), (-1, 1)]);
        let rules: Vec<Rule> = c.iter().map(|c| c.rule).collect();
        assert_eq!(
            rules,
            vec![
                Rule::Desired,
                Rule::DropDy,
                Rule::DropDx,
                Rule::MirrorDy,
                Rule::MirrorDx
            ]
        );
    }

    #[test]
    fn diagonal_negative_components() {
        let c = fallback_candidates(v(-1, 1));
        assert_eq!(vectors(&c), vec![(-1, 1), (-1, 0), (0, 1), (-1, -1), (1, 1)]);
    }

    proptest! {
        #[test]
        fn candidates_are_distinct_non_hold_and_keep_progress_on_one_axis(
            dx in -1i8..=1, dy in -1i8..=1,
        ) {
            let desired = v(dx, dy);
            let c = fallback_candidates(desired);
            let expected_len = if desired.is_hold() {
                0
            } else if desired.is_diagonal() {
                5
            } else {
                3
            };
            prop_assert_eq!(c.len(), expected_len);
            for (i, a) in c.iter().enumerate() {
                prop_assert!(!a.vector.is_hold());
                // Every candidate keeps at least one desired component.
                prop_assert!(
                    (dx != 0 && a.vector.dx() == dx) || (dy != 0 && a.vector.dy() == dy)
                );
                for b in c.iter().skip(i + 1) {
                    prop_assert_ne!(a.vector, b.vector);
                }
            }
        }
    }
}
