//! Regular-expression terms.
//!
//! `Rx` is a closed algebraic data type; everything downstream pattern-matches
//! it exhaustively. Nodes are immutable and children are `Arc`-shared, so a
//! sub-term can appear under several parents without copying.
//!
//! Construction goes through the smart constructors (`concat`, `choice`,
//! `star`, `repeat`, ...), which apply the algebraic identities that keep
//! trees small: `∅` annihilates concatenation, `ε` is its identity, nested
//! stars collapse, and so on. The identities are applied at construction
//! time, never lazily, so every `Rx` in circulation is normalized.

use std::sync::Arc;

use crate::letter_set::LetterSet;
use crate::size::Size;

/// A regular-expression term over 16-bit code units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rx {
    /// The empty language: matches nothing at all.
    Phi,
    /// The language containing only the empty string.
    Empty,
    /// A single code unit.
    Letter(u16),
    /// Any code unit in the set.
    Letters(LetterSet),
    /// `r1` followed by `r2`.
    Concat(Arc<Rx>, Arc<Rx>),
    /// Either `r1` or `r2`.
    Choice(Arc<Rx>, Arc<Rx>),
    /// Zero or more repetitions.
    Star(Arc<Rx>),
    /// Between `lo` and `hi` repetitions; `None` means unbounded.
    Repeat(Arc<Rx>, u32, Option<u32>),
    /// A free variable, reserved for fixed-point extensions. The NFA
    /// compiler rejects it.
    Var(u32),
}

impl Rx {
    /// The term matching exactly the code unit `cu`.
    pub fn letter(cu: u16) -> Rx {
        Rx::Letter(cu)
    }

    /// The term matching any code unit in `set`.
    ///
    /// An empty set is the empty language; a singleton collapses to
    /// `Letter`.
    pub fn letters(set: LetterSet) -> Rx {
        if set.is_empty() {
            Rx::Phi
        } else if set.len() == 1 {
            let (lo, _) = set.ranges().next().unwrap();
            Rx::Letter(lo)
        } else {
            Rx::Letters(set)
        }
    }

    /// `r1 · r2`, with `ε` as identity and `∅` as annihilator.
    pub fn concat(r1: Rx, r2: Rx) -> Rx {
        match (r1, r2) {
            (Rx::Phi, _) | (_, Rx::Phi) => Rx::Phi,
            (Rx::Empty, r) | (r, Rx::Empty) => r,
            (r1, r2) => Rx::Concat(Arc::new(r1), Arc::new(r2)),
        }
    }

    /// `r1 + r2`, with `∅` as identity.
    pub fn choice(r1: Rx, r2: Rx) -> Rx {
        match (r1, r2) {
            (Rx::Phi, r) | (r, Rx::Phi) => r,
            (r1, r2) => Rx::Choice(Arc::new(r1), Arc::new(r2)),
        }
    }

    /// `r*`. Nested stars collapse; `∅*` and `ε*` are both `ε`.
    pub fn star(r: Rx) -> Rx {
        match r {
            Rx::Phi | Rx::Empty => Rx::Empty,
            star @ Rx::Star(_) => star,
            r => Rx::Star(Arc::new(r)),
        }
    }

    /// `r{lo,hi}`; `hi = None` means no upper bound.
    ///
    /// Requires `lo <= hi` when `hi` is finite.
    pub fn repeat(r: Rx, lo: u32, hi: Option<u32>) -> Rx {
        if let Some(h) = hi {
            assert!(lo <= h, "invalid repetition bounds {{{},{}}}", lo, h);
        }
        match r {
            Rx::Phi => {
                if lo == 0 {
                    Rx::Empty
                } else {
                    Rx::Phi
                }
            }
            Rx::Empty => Rx::Empty,
            r => match (lo, hi) {
                (0, Some(0)) => Rx::Empty,
                (0, None) => Rx::star(r),
                (1, Some(1)) => r,
                _ => Rx::Repeat(Arc::new(r), lo, hi),
            },
        }
    }

    /// `r?`, encoded as `r + ε`.
    pub fn optional(r: Rx) -> Rx {
        Rx::choice(r, Rx::Empty)
    }

    /// `r+`, encoded as `r · r*`.
    pub fn plus(r: Rx) -> Rx {
        Rx::concat(r.clone(), Rx::star(r))
    }

    /// Whether the empty string is in the language of this term.
    pub fn nullable(&self) -> bool {
        match self {
            Rx::Phi => false,
            Rx::Empty => true,
            Rx::Letter(_) | Rx::Letters(_) => false,
            Rx::Concat(r1, r2) => r1.nullable() && r2.nullable(),
            Rx::Choice(r1, r2) => r1.nullable() || r2.nullable(),
            Rx::Star(_) => true,
            Rx::Repeat(r, lo, _) => *lo == 0 || r.nullable(),
            Rx::Var(_) => false,
        }
    }

    /// An upper bound on the number of distinct strings in the language.
    ///
    /// The bound is exact when alternatives are disjoint and concatenations
    /// decompose uniquely; otherwise strings may be counted more than once.
    /// It is always `0` exactly for the empty language and `∞` exactly for
    /// infinite ones, which is the distinction callers usually need.
    pub fn cardinality(&self) -> Size {
        match self {
            Rx::Phi => Size::ZERO,
            Rx::Empty => Size::ONE,
            Rx::Letter(_) => Size::ONE,
            Rx::Letters(set) => set.size(),
            Rx::Concat(r1, r2) => r1.cardinality() * r2.cardinality(),
            Rx::Choice(r1, r2) => r1.cardinality() + r2.cardinality(),
            Rx::Star(r) => {
                if r.cardinality().is_zero() {
                    Size::ONE
                } else {
                    Size::INFINITY
                }
            }
            Rx::Repeat(r, lo, hi) => {
                let c = r.cardinality();
                if c.is_zero() {
                    return if *lo == 0 { Size::ONE } else { Size::ZERO };
                }
                match hi {
                    None => Size::INFINITY,
                    // At most (hi - lo + 1) lengths, each with at most c^hi
                    // distinct strings.
                    Some(h) => Size::from(h - lo + 1) * c.pow(*h),
                }
            }
            // A free variable could denote any language, so no finite
            // bound is sound.
            Rx::Var(_) => Size::INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(c: char) -> Rx {
        Rx::letter(c as u16)
    }

    #[test]
    fn test_choice_identities() {
        let a = lit('a');
        assert_eq!(Rx::choice(Rx::Phi, a.clone()), a);
        assert_eq!(Rx::choice(a.clone(), Rx::Phi), a);
    }

    #[test]
    fn test_concat_identities() {
        let a = lit('a');
        assert_eq!(Rx::concat(Rx::Empty, a.clone()), a);
        assert_eq!(Rx::concat(a.clone(), Rx::Empty), a);
        assert_eq!(Rx::concat(Rx::Phi, a.clone()), Rx::Phi);
        assert_eq!(Rx::concat(a, Rx::Phi), Rx::Phi);
    }

    #[test]
    fn test_star_identities() {
        let a = lit('a');
        assert_eq!(Rx::star(Rx::Empty), Rx::Empty);
        assert_eq!(Rx::star(Rx::Phi), Rx::Empty);

        let starred = Rx::star(a.clone());
        assert_eq!(Rx::star(starred.clone()), starred);
        assert_eq!(starred, Rx::Star(Arc::new(a)));
    }

    #[test]
    fn test_letters_normalization() {
        assert_eq!(Rx::letters(LetterSet::empty()), Rx::Phi);
        assert_eq!(
            Rx::letters(LetterSet::single(b'x' as u16)),
            Rx::Letter(b'x' as u16)
        );
        assert!(matches!(
            Rx::letters(LetterSet::range(b'a' as u16, b'z' as u16)),
            Rx::Letters(_)
        ));
    }

    #[test]
    fn test_repeat_normalization() {
        let a = lit('a');
        assert_eq!(Rx::repeat(a.clone(), 0, Some(0)), Rx::Empty);
        assert_eq!(Rx::repeat(a.clone(), 1, Some(1)), a);
        assert_eq!(Rx::repeat(a.clone(), 0, None), Rx::star(a.clone()));
        assert_eq!(Rx::repeat(Rx::Phi, 0, Some(5)), Rx::Empty);
        assert_eq!(Rx::repeat(Rx::Phi, 2, Some(5)), Rx::Phi);
        assert_eq!(Rx::repeat(Rx::Empty, 3, Some(7)), Rx::Empty);
        assert!(matches!(
            Rx::repeat(a, 2, Some(6)),
            Rx::Repeat(_, 2, Some(6))
        ));
    }

    #[test]
    #[should_panic(expected = "invalid repetition bounds")]
    fn test_repeat_rejects_inverted_bounds() {
        Rx::repeat(lit('a'), 5, Some(2));
    }

    #[test]
    fn test_sugar_encodings() {
        let a = lit('a');
        assert_eq!(
            Rx::optional(a.clone()),
            Rx::Choice(Arc::new(a.clone()), Arc::new(Rx::Empty))
        );
        assert_eq!(
            Rx::plus(a.clone()),
            Rx::Concat(Arc::new(a.clone()), Arc::new(Rx::star(a)))
        );
    }

    #[test]
    fn test_nullable() {
        let a = lit('a');
        assert!(!Rx::Phi.nullable());
        assert!(Rx::Empty.nullable());
        assert!(!a.nullable());
        assert!(Rx::star(a.clone()).nullable());
        assert!(Rx::optional(a.clone()).nullable());
        assert!(!Rx::plus(a.clone()).nullable());
        assert!(!Rx::concat(a.clone(), Rx::star(a.clone())).nullable());
        assert!(Rx::concat(Rx::star(a.clone()), Rx::star(a.clone())).nullable());
        assert!(Rx::repeat(a.clone(), 0, Some(3)).nullable());
        assert!(!Rx::repeat(a, 2, Some(3)).nullable());
    }

    #[test]
    fn test_cardinality() {
        let a = lit('a');
        let digit = Rx::letters(LetterSet::range(b'0' as u16, b'9' as u16));

        assert_eq!(Rx::Phi.cardinality(), Size::ZERO);
        assert_eq!(Rx::Empty.cardinality(), Size::ONE);
        assert_eq!(a.cardinality(), Size::ONE);
        assert_eq!(digit.cardinality(), Size::from(10u32));
        assert_eq!(
            Rx::concat(digit.clone(), digit.clone()).cardinality(),
            Size::from(100u32)
        );
        assert_eq!(
            Rx::choice(a.clone(), digit.clone()).cardinality(),
            Size::from(11u32)
        );
        assert_eq!(Rx::star(a.clone()).cardinality(), Size::INFINITY);
        assert_eq!(Rx::repeat(digit, 2, Some(4)).cardinality(), Size::from(30_000u32));
        // Concatenating the empty language with something infinite is still
        // empty: the 0 × ∞ = 0 case.
        assert_eq!(
            Rx::Concat(Arc::new(Rx::Phi), Arc::new(Rx::star(a))).cardinality(),
            Size::ZERO
        );
    }
}
