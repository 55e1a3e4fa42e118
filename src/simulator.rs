//! Bounded breadth-first simulation of nondeterministic pushdown automata.
//!
//! # Search
//!
//! The simulator explores the configuration graph of a [`Pda`] breadth-first.
//! A [`Configuration`] is the triple `(state, cursor, stack)`; it is the key of
//! a *global* visited set, so every configuration is enqueued at most once
//! for the whole search, whichever path reaches it first.
//!
//! From a dequeued configuration the successors are:
//!
//! 1. every epsilon-read transition of the current state (cursor unchanged),
//! 2. if input remains, every transition reading the next input symbol
//!    (cursor advances by one),
//!
//! restricted to transitions whose `pop` is epsilon or equals the stack top.
//!
//! A configuration accepts iff all input is consumed and its state is
//! accepting; the stack is irrelevant.
//!
//! # Budgets
//!
//! The configuration space is infinite as soon as some epsilon-cycle grows
//! the stack, so the visited set alone cannot guarantee termination. Two
//! mandatory budgets bound the loop: [`SimulationLimits::max_steps`] counts
//! dequeued configurations and [`SimulationLimits::max_configs`] counts
//! expanded ones. Running out of budget is not an error: the verdict is
//! rejection, with the trace of the last dequeued configuration.
//!
//! # Traces
//!
//! Every admitted configuration records its parent in an append-only arena.
//! Branches therefore never share mutable history; the trace of a
//! configuration is rebuilt by walking parents once the search is over.

use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::pda::Pda;
use crate::queue::BfsQueue;
use crate::symbol::EPSILON_DISPLAY;
use crate::trace::{Run, TraceStep};
use crate::types::{Interner, StateId, SymbolId};

/// Search budgets for a single simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationLimits {
    /// Maximum number of dequeued configurations.
    pub max_steps: usize,
    /// Maximum number of expanded configurations.
    pub max_configs: usize,
}

impl Default for SimulationLimits {
    fn default() -> Self {
        Self {
            max_steps: 2000,
            max_configs: 3000,
        }
    }
}

/// A snapshot of a running pushdown automaton. The stack top is the last element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Configuration {
    pub state: StateId,
    pub cursor: usize,
    pub stack: Vec<SymbolId>,
}

/// Outcome of a search, with the budget counters.
#[derive(Debug, Clone)]
pub struct Search {
    pub run: Run,
    /// Configurations taken off the frontier.
    pub dequeued: usize,
    /// Configurations whose successors were generated.
    pub expanded: usize,
    /// Whether the search stopped on a budget rather than an empty frontier.
    pub budget_exhausted: bool,
}

#[derive(Debug, Clone)]
struct Move {
    to: StateId,
    pop: Option<SymbolId>,
    /// Symbols in the order they are pushed; the last one ends on top.
    push: Vec<SymbolId>,
}

impl Move {
    fn apply(&self, config: &Configuration, advance: usize) -> Option<Configuration> {
        let mut stack = config.stack.clone();
        if let Some(top) = self.pop {
            if stack.last() != Some(&top) {
                return None;
            }
            stack.pop();
        }
        stack.extend_from_slice(&self.push);
        Some(Configuration {
            state: self.to,
            cursor: config.cursor + advance,
            stack,
        })
    }
}

struct Node {
    parent: Option<usize>,
    consumed: Option<char>,
    config: Configuration,
}

/// A [`Pda`] compiled for repeated simulation.
///
/// Names are interned and transitions are grouped by `(state, read)` once,
/// so scoring many words against one automaton does not rebuild the table.
pub struct Simulator {
    states: Interner<StateId>,
    symbols: Interner<SymbolId>,
    /// `(from, read)` to candidate moves; `None` reads epsilon.
    moves: HashMap<(StateId, Option<SymbolId>), Vec<Move>>,
    accepting: HashSet<StateId>,
    start: StateId,
    initial_stack: SymbolId,
    limits: SimulationLimits,
}

impl Simulator {
    pub fn new(pda: &Pda, limits: SimulationLimits) -> Self {
        let mut states = Interner::new();
        let mut symbols = Interner::new();

        for state in pda.states() {
            states.intern(state);
        }
        let start = states.intern(pda.start_state());
        let initial_stack = symbols.intern(pda.initial_stack_symbol());

        let mut moves: HashMap<_, Vec<Move>> = HashMap::new();
        for t in pda.transitions() {
            let from = states.intern(&t.from);
            let read = (!t.reads_epsilon()).then(|| symbols.intern(&t.read));
            let m = Move {
                to: states.intern(&t.to),
                pop: t.pops().then(|| symbols.intern(&t.pop)),
                push: t.push.iter().rev().map(|s| symbols.intern(s)).collect(),
            };
            moves.entry((from, read)).or_default().push(m);
        }

        let accepting = pda.accept_states().iter().filter_map(|s| states.get(s)).collect();

        Self {
            states,
            symbols,
            moves,
            accepting,
            start,
            initial_stack,
            limits,
        }
    }

    pub fn limits(&self) -> SimulationLimits {
        self.limits
    }

    /// Decides acceptance of `word`.
    pub fn accepts(&self, word: &str) -> bool {
        self.search(word).run.accepted
    }

    /// Decides acceptance of `word` and returns a trace.
    pub fn run(&self, word: &str) -> Run {
        self.search(word).run
    }

    /// Runs the bounded search on `word`.
    pub fn search(&self, word: &str) -> Search {
        let input: Vec<char> = word.chars().collect();
        // Characters never mentioned by any transition can never be read.
        let tokens: Vec<Option<SymbolId>> = input
            .iter()
            .map(|c| self.symbols.get(c.encode_utf8(&mut [0u8; 4])))
            .collect();

        let root = Configuration {
            state: self.start,
            cursor: 0,
            stack: vec![self.initial_stack],
        };
        let mut arena = vec![Node {
            parent: None,
            consumed: None,
            config: root.clone(),
        }];
        let mut queue = BfsQueue::new();
        queue.push(root, 0usize);

        let mut dequeued = 0;
        let mut expanded = 0;
        let mut last = 0;

        while dequeued < self.limits.max_steps && expanded < self.limits.max_configs {
            let Some((config, node)) = queue.pop() else {
                break;
            };
            dequeued += 1;
            last = node;

            if config.cursor == input.len() && self.accepting.contains(&config.state) {
                info!(
                    "npda: accepted {:?} after {} steps ({} configurations expanded)",
                    word, dequeued, expanded
                );
                return Search {
                    run: Run {
                        accepted: true,
                        trace: self.trace(&arena, node, &input),
                    },
                    dequeued,
                    expanded,
                    budget_exhausted: false,
                };
            }

            expanded += 1;
            debug!(
                "npda: expanding state {} at {} with stack depth {}",
                self.states.name(config.state),
                config.cursor,
                config.stack.len()
            );

            let epsilon_moves = self.candidates(config.state, None).map(|m| (m, 0, None));
            let read_moves = input
                .get(config.cursor)
                .zip(tokens.get(config.cursor).copied().flatten())
                .into_iter()
                .flat_map(|(&c, symbol)| self.candidates(config.state, Some(symbol)).map(move |m| (m, 1, Some(c))));

            for (m, advance, consumed) in epsilon_moves.chain(read_moves) {
                let Some(next) = m.apply(&config, advance) else {
                    continue;
                };
                if queue.push(next.clone(), arena.len()) {
                    arena.push(Node {
                        parent: Some(node),
                        consumed,
                        config: next,
                    });
                }
            }
        }

        let budget_exhausted = !queue.is_empty();
        if budget_exhausted {
            warn!(
                "npda: search budget exhausted on {:?} (steps {}/{}, configs {}/{})",
                word, dequeued, self.limits.max_steps, expanded, self.limits.max_configs
            );
        }
        info!(
            "npda: rejected {:?} after {} steps ({} configurations expanded)",
            word, dequeued, expanded
        );

        Search {
            run: Run {
                accepted: false,
                trace: self.trace(&arena, last, &input),
            },
            dequeued,
            expanded,
            budget_exhausted,
        }
    }

    fn candidates(&self, state: StateId, read: Option<SymbolId>) -> impl Iterator<Item = &Move> {
        self.moves.get(&(state, read)).into_iter().flatten()
    }

    fn trace(&self, arena: &[Node], node: usize, input: &[char]) -> Vec<TraceStep> {
        let mut path = Vec::new();
        let mut current = Some(node);
        while let Some(index) = current {
            path.push(index);
            current = arena[index].parent;
        }

        path.iter()
            .rev()
            .enumerate()
            .map(|(step, &index)| {
                let Node { parent, consumed, config } = &arena[index];
                let consumed = match (parent, consumed) {
                    (None, _) => String::new(),
                    (Some(_), Some(c)) => c.to_string(),
                    (Some(_), None) => EPSILON_DISPLAY.to_string(),
                };
                TraceStep {
                    step,
                    state: self.states.name(config.state).to_string(),
                    consumed,
                    remaining_input: input[config.cursor..].iter().collect(),
                    stack: Some(config.stack.iter().map(|&s| self.symbols.name(s).to_string()).collect()),
                }
            })
            .collect()
    }
}

/// Simulates `pda` on `word` within `limits`.
pub fn simulate(pda: &Pda, word: &str, limits: &SimulationLimits) -> Run {
    Simulator::new(pda, *limits).run(word)
}
