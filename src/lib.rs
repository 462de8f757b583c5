//! antimirov: regular-expression matching in guaranteed linear time.
//!
//! This crate parses a textual regular expression into an algebraic term
//! ([`Rx`]), compiles the term into a non-deterministic finite automaton
//! ([`Nfa`]) by Thompson construction, and matches input by simulating every
//! live state at once with bitsets. Matching runs in O(n·m) for input length
//! n and automaton size m. There is no backtracking, so inputs that send
//! backtracking engines into exponential blow-up (`(o*)*a` against a long
//! run of `o`s) are handled in linear time.
//!
//! The matcher works on 16-bit code units, the alphabet produced by
//! `str::encode_utf16`. Surrogate pairs are matched per code unit. The
//! language covers character classes, alternation, grouping and bounded or
//! unbounded repetition; capture groups, backreferences, lookaround and
//! anchors are deliberately out of scope.
//!
//! ```
//! use antimirov::{Nfa, Rx};
//!
//! let rx = Rx::parse("(ab)*c").unwrap();
//! let nfa = Nfa::from_rx(&rx).unwrap();
//!
//! assert!(nfa.accepts("c"));
//! assert!(nfa.accepts("ababc"));
//! assert!(nfa.rejects("abab"));
//! ```
//!
//! All public values are immutable once constructed and can be shared
//! freely across threads. Matching allocates only transient working
//! bitsets; the automaton itself is never mutated.

pub mod bit_set;
pub mod letter_map;
pub mod letter_set;
pub mod nfa;
pub mod parser;
pub mod rx;
pub mod size;

pub use bit_set::BitSet;
pub use letter_map::LetterMap;
pub use letter_set::LetterSet;
pub use nfa::{CompileError, Nfa, NfaBuilder};
pub use parser::ParseError;
pub use rx::Rx;
pub use size::Size;
