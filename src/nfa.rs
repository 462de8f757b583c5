//! NFA construction and simulation.
//!
//! This module turns an `Rx` term into an executable automaton in two steps.
//!
//! `NfaBuilder` runs the Thompson construction: every sub-expression gets a
//! fresh pair of state indices, sub-builders are grafted into their parent
//! with `absorb`, and epsilon edges wire the pieces together. The builder is
//! transient; `build` consumes it.
//!
//! `build` produces the compiled `Nfa`: epsilon closures are computed once,
//! up front, and baked into a single `LetterMap` from code-unit ranges to
//! per-source-state successor bitsets. Matching therefore never chases
//! epsilon edges: each input unit costs one range lookup plus a bitset
//! union per live state, which is what gives the O(n·m) guarantee and makes
//! pathological patterns like `(o*)*a` run in linear time.
//!
//! The compiled form trades space for that guarantee: the edge table is
//! O(size²) in the worst case (an array of `size` slots per character
//! range).

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::bit_set::BitSet;
use crate::letter_map::LetterMap;
use crate::letter_set::LetterSet;
use crate::rx::Rx;

/// A state index in a builder or compiled automaton.
type StateId = usize;

/// Fatal compilation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The term contained a free variable, which has no operational meaning.
    UnresolvedVar(u32),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::UnresolvedVar(id) => {
                write!(f, "cannot compile free variable {}", id)
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// Outgoing edges of one builder state.
#[derive(Debug, Default)]
struct StateEdges {
    /// Successors reachable without consuming input.
    epsilon: FxHashSet<StateId>,
    /// Successors reachable by consuming any unit in the set.
    letters: Vec<(LetterSet, FxHashSet<StateId>)>,
}

/// Intermediate Thompson-construction form, discarded after `build`.
#[derive(Debug)]
pub struct NfaBuilder {
    start: StateId,
    accept: StateId,
    /// Sparse edge table; states with no outgoing edges have no entry.
    edges: FxHashMap<StateId, StateEdges>,
    /// Total number of allocated states. Only meaningful on the root
    /// builder returned by `from_rx`.
    states: usize,
}

impl NfaBuilder {
    fn new(start: StateId, accept: StateId) -> NfaBuilder {
        NfaBuilder {
            start,
            accept,
            edges: FxHashMap::default(),
            states: 0,
        }
    }

    /// Run the Thompson construction over a term.
    pub fn from_rx(rx: &Rx) -> Result<NfaBuilder, CompileError> {
        let mut next_state = 0;
        let mut builder = compile(rx, &mut next_state)?;
        builder.states = next_state;
        Ok(builder)
    }

    fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.edges.entry(from).or_default().epsilon.insert(to);
    }

    fn add_letters(&mut self, from: StateId, set: LetterSet, to: StateId) {
        let edges = self.edges.entry(from).or_default();
        edges
            .letters
            .push((set, FxHashSet::from_iter([to])));
    }

    /// Graft a sub-builder's edges into this one. State indices are
    /// globally fresh, so no renumbering is needed.
    fn absorb(&mut self, other: NfaBuilder) {
        for (state, other_edges) in other.edges {
            let edges = self.edges.entry(state).or_default();
            edges.epsilon.extend(other_edges.epsilon);
            edges.letters.extend(other_edges.letters);
        }
    }

    /// The least set containing `seeds` and closed under epsilon edges,
    /// computed by worklist iteration.
    fn closure(&self, seeds: impl IntoIterator<Item = StateId>) -> FxHashSet<StateId> {
        let mut seen: FxHashSet<StateId> = seeds.into_iter().collect();
        let mut work: Vec<StateId> = seen.iter().copied().collect();
        while let Some(state) = work.pop() {
            if let Some(edges) = self.edges.get(&state) {
                for &next in &edges.epsilon {
                    if seen.insert(next) {
                        work.push(next);
                    }
                }
            }
        }
        seen
    }

    /// Compile into the executable form.
    pub fn build(self) -> Nfa {
        let size = self.states;

        let mut start = BitSet::new(size);
        for state in self.closure([self.start]) {
            start.insert(state);
        }

        let mut accept = BitSet::new(size);
        accept.insert(self.accept);

        // One LetterMap per letter edge, all folded together. Where two
        // edges cover the same range, their slot arrays are combined
        // entry-wise.
        let mut edges: LetterMap<Vec<Option<BitSet>>> = LetterMap::new();
        for (&source, state_edges) in &self.edges {
            for (set, targets) in &state_edges.letters {
                if targets.is_empty() {
                    continue;
                }
                let mut reachable = BitSet::new(size);
                for state in self.closure(targets.iter().copied()) {
                    reachable.insert(state);
                }
                let mut row: Vec<Option<BitSet>> = vec![None; size];
                row[source] = Some(reachable);
                edges = edges.merge(LetterMap::from_set(set, row), union_rows);
            }
        }

        Nfa {
            size,
            start,
            accept,
            edges,
        }
    }
}

/// Combine two per-range slot arrays entry-wise.
fn union_rows(mut left: Vec<Option<BitSet>>, right: Vec<Option<BitSet>>) -> Vec<Option<BitSet>> {
    for (slot, incoming) in left.iter_mut().zip(right) {
        match (slot.as_mut(), incoming) {
            (Some(existing), Some(other)) => existing.union_with(&other),
            (None, Some(other)) => *slot = Some(other),
            _ => {}
        }
    }
    left
}

/// Allocate a fresh state index.
fn fresh(next_state: &mut usize) -> StateId {
    let state = *next_state;
    *next_state += 1;
    state
}

/// The Thompson construction proper: one fresh `(start, accept)` pair per
/// sub-expression, sub-builders absorbed into the parent.
fn compile(rx: &Rx, next_state: &mut usize) -> Result<NfaBuilder, CompileError> {
    match rx {
        Rx::Phi => {
            let start = fresh(next_state);
            let accept = fresh(next_state);
            Ok(NfaBuilder::new(start, accept))
        }
        Rx::Empty => {
            // A single state doing double duty as start and accept.
            let state = fresh(next_state);
            Ok(NfaBuilder::new(state, state))
        }
        Rx::Letter(cu) => {
            let start = fresh(next_state);
            let accept = fresh(next_state);
            let mut builder = NfaBuilder::new(start, accept);
            builder.add_letters(start, LetterSet::single(*cu), accept);
            Ok(builder)
        }
        Rx::Letters(set) => {
            let start = fresh(next_state);
            let accept = fresh(next_state);
            let mut builder = NfaBuilder::new(start, accept);
            builder.add_letters(start, set.clone(), accept);
            Ok(builder)
        }
        Rx::Concat(r1, r2) => {
            let first = compile(r1, next_state)?;
            let second = compile(r2, next_state)?;
            let mut builder = NfaBuilder::new(first.start, second.accept);
            builder.add_epsilon(first.accept, second.start);
            builder.absorb(first);
            builder.absorb(second);
            Ok(builder)
        }
        Rx::Choice(r1, r2) => {
            let left = compile(r1, next_state)?;
            let right = compile(r2, next_state)?;
            let start = fresh(next_state);
            let accept = fresh(next_state);
            let mut builder = NfaBuilder::new(start, accept);
            builder.add_epsilon(start, left.start);
            builder.add_epsilon(start, right.start);
            builder.add_epsilon(left.accept, accept);
            builder.add_epsilon(right.accept, accept);
            builder.absorb(left);
            builder.absorb(right);
            Ok(builder)
        }
        Rx::Star(r) => {
            let inner = compile(r, next_state)?;
            let start = fresh(next_state);
            let accept = fresh(next_state);
            let mut builder = NfaBuilder::new(start, accept);
            // Zero iterations, entry into the body, and the loop back.
            builder.add_epsilon(start, accept);
            builder.add_epsilon(start, inner.start);
            builder.add_epsilon(inner.accept, start);
            builder.absorb(inner);
            Ok(builder)
        }
        Rx::Repeat(r, lo, hi) => {
            let unfolded = unfold_repeat(r, *lo, *hi);
            compile(&unfolded, next_state)
        }
        Rx::Var(id) => Err(CompileError::UnresolvedVar(*id)),
    }
}

/// Peel one layer off a bounded repetition.
fn unfold_repeat(r: &Rx, lo: u32, hi: Option<u32>) -> Rx {
    if lo > 0 {
        return Rx::concat(
            r.clone(),
            Rx::repeat(r.clone(), lo - 1, hi.map(|h| h - 1)),
        );
    }
    match hi {
        None => Rx::star(r.clone()),
        Some(0) => Rx::Empty,
        Some(h) => Rx::choice(
            Rx::Empty,
            Rx::concat(r.clone(), Rx::repeat(r.clone(), 0, Some(h - 1))),
        ),
    }
}

/// A compiled, immutable automaton.
///
/// `edges` maps each code-unit range to an array with one slot per state:
/// slot `s` holds the (closure-applied) successors of `s` on that range, or
/// `None` when `s` has no transition there.
#[derive(Debug)]
pub struct Nfa {
    size: usize,
    start: BitSet,
    accept: BitSet,
    edges: LetterMap<Vec<Option<BitSet>>>,
}

impl Nfa {
    /// Compile a term into an automaton.
    pub fn from_rx(rx: &Rx) -> Result<Nfa, CompileError> {
        Ok(NfaBuilder::from_rx(rx)?.build())
    }

    /// Number of automaton states.
    pub fn state_count(&self) -> usize {
        self.size
    }

    /// Whether the automaton accepts `input`.
    ///
    /// Simultaneous-state simulation over the input's UTF-16 code units:
    /// per unit, one range lookup and a bitset union per live state. Never
    /// fails, never backtracks.
    pub fn accepts(&self, input: &str) -> bool {
        let mut live = self.start.clone();
        for cu in input.encode_utf16() {
            if live.is_empty() {
                return false;
            }
            let row = match self.edges.get(cu) {
                Some(row) => row,
                // No state anywhere transitions on this unit.
                None => return false,
            };
            let mut next = BitSet::new(self.size);
            for state in live.iter() {
                if let Some(targets) = &row[state] {
                    next.union_with(targets);
                }
            }
            live = next;
        }
        live.intersects(&self.accept)
    }

    /// Whether the automaton rejects `input`.
    pub fn rejects(&self, input: &str) -> bool {
        !self.accepts(input)
    }
}
