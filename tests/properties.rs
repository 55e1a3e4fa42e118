use serde_json::{json, Value};
use test_log::test;

use automata_rs::dfa::Dfa;
use automata_rs::pda::Pda;
use automata_rs::policy::{decide, Disposition, Thresholds};
use automata_rs::scorer::{score, MismatchKind, Penalty, ScoringConfig};
use automata_rs::simulator::{simulate, SimulationLimits, Simulator};
use automata_rs::symbol::EPSILON;

// ─── Normalization ──────────────────────────────────────────────────────────

fn malformed_dfas() -> Vec<Value> {
    vec![
        json!({}),
        json!(null),
        json!([1, 2, 3]),
        json!({ "states": [], "alphabet": [] }),
        json!({ "states": [], "alphabet": ["a"], "start_state": "ghost" }),
        json!({ "states": ["q0", "q1"], "start_state": "elsewhere", "accept_states": ["q1", "nowhere"] }),
        json!({
            "alphabet": ["a", "b", "a"],
            "states": ["q0", 7, null, " "],
            "transitions": {
                "q0": { "a": "q9", "b": 3, "c": "q0" },
                "q9": { "a": "q10" },
                "junk": "not a row"
            }
        }),
        json!({ "states": ["q_sink"], "transitions": { "q_sink": { "0": "q_sink_1" } } }),
    ]
}

#[test]
fn dfa_is_total_on_malformed_input() {
    for raw in malformed_dfas() {
        let dfa = Dfa::normalize(&raw);
        assert!(!dfa.states().is_empty(), "{}", raw);
        assert!(dfa.states().iter().any(|s| s == dfa.start_state()), "{}", raw);
        for state in dfa.states() {
            for symbol in dfa.alphabet() {
                let target = dfa
                    .next(state, symbol)
                    .unwrap_or_else(|| panic!("missing {} --{}--> in {}", state, symbol, raw));
                assert!(dfa.states().iter().any(|s| s == target), "{}", raw);
            }
        }
        for accept in dfa.accept_states() {
            assert!(dfa.states().contains(accept), "{}", raw);
        }
    }
}

#[test]
fn synthesized_states_never_accept() {
    for raw in malformed_dfas() {
        let dfa = Dfa::normalize(&raw);
        for state in dfa.synthesized_states() {
            assert!(!dfa.is_accepting(state), "{} accepts in {}", state, raw);
        }
    }

    let dfa = Dfa::normalize(&json!({
        "alphabet": ["a"],
        "states": ["q0"],
        "accept_states": ["q0", "ghost"],
        "transitions": { "q0": { "a": "ghost" } }
    }));
    assert_eq!(dfa.synthesized_states(), ["ghost", "q_sink"]);
    assert!(!dfa.is_accepting("ghost"));
    assert!(!dfa.run("a"));
}

#[test]
fn dfa_run_is_pure() {
    let dfa = Dfa::even_length();
    for word in ["", "0", "01", "0110", "2", "01x"] {
        let first = dfa.run(word);
        for _ in 0..10 {
            assert_eq!(dfa.run(word), first);
        }
        assert_eq!(dfa.trace(word).accepted, first);
    }
}

#[test]
fn epsilon_spellings_are_equivalent() {
    let spellings = [Value::Null, json!(""), json!("ε"), json!("eps"), json!("epsilon"), json!("  ε ")];
    for spelling in &spellings {
        let mut t = json!({ "from": "q0", "to": "q1" });
        if !spelling.is_null() {
            t["read"] = spelling.clone();
            t["pop"] = spelling.clone();
        }
        let pda = Pda::normalize(&json!({ "states": ["q0", "q1"], "transitions": [t] }));
        let transition = &pda.transitions()[0];
        assert_eq!(transition.read, EPSILON, "read {}", spelling);
        assert_eq!(transition.pop, EPSILON, "pop {}", spelling);
        assert!(transition.reads_epsilon());
        assert!(!transition.pops());
    }
}

// ─── Simulation ─────────────────────────────────────────────────────────────

/// `{ aⁿbⁿ : n ≥ 0 }` with two working states and a final state reached once
/// only the initial symbol is left.
fn anbn() -> Pda {
    Pda::normalize(&json!({
        "states": ["q0", "q1", "q2"],
        "start_state": "q0",
        "accept_states": ["q2"],
        "initial_stack_symbol": "Z",
        "transitions": [
            { "from": "q0", "to": "q0", "read": "a", "pop": "ε", "push": ["A"] },
            { "from": "q0", "to": "q1", "read": "ε", "pop": "ε", "push": [] },
            { "from": "q1", "to": "q1", "read": "b", "pop": "A", "push": [] },
            { "from": "q1", "to": "q2", "read": "ε", "pop": "Z", "push": ["Z"] }
        ]
    }))
}

#[test]
fn anbn_is_recognized() {
    let pda = anbn();
    let limits = SimulationLimits::default();
    assert!(simulate(&pda, "aabb", &limits).accepted);
    assert!(!simulate(&pda, "aab", &limits).accepted);
    assert!(simulate(&pda, "", &limits).accepted);

    let run = simulate(&pda, "aabb", &limits);
    assert_eq!(run.final_state(), Some("q2"));
    assert_eq!(run.trace.last().and_then(|s| s.stack.clone()), Some(vec!["Z".to_string()]));
}

#[test]
fn runaway_pda_terminates_on_every_word() {
    let pda = Pda::normalize(&json!({
        "states": ["q0", "q1"],
        "accept_states": ["q1"],
        "transitions": [{ "from": "q0", "to": "q0", "read": "eps", "pop": "eps", "push": ["X"] }]
    }));
    let limits = SimulationLimits {
        max_steps: 100_000,
        max_configs: 500,
    };
    let simulator = Simulator::new(&pda, limits);
    for word in ["", "a", "ab", "zzzzzzzz"] {
        let search = simulator.search(word);
        assert!(!search.run.accepted);
        assert!(search.budget_exhausted);
        assert_eq!(search.expanded, 500);
    }
}

// ─── Scoring and policy ─────────────────────────────────────────────────────

#[test]
fn scorer_is_monotone_in_mismatches() {
    let even = |w: &str| w.len() % 2 == 0;
    for config in [ScoringConfig::default(), ScoringConfig { penalty: Penalty::Proportional }] {
        let mut accepted = vec!["", "ab"];
        let mut rejected = vec!["a"];
        let mut last = score(&even, &accepted[..], &rejected[..], &config);
        for i in 0..10 {
            // Alternate between a false reject and a false accept.
            if i % 2 == 0 {
                accepted.push("abc");
            } else {
                rejected.push("abcd");
            }
            let next = score(&even, &accepted[..], &rejected[..], &config);
            assert!(next.score <= last.score, "{:?}: {} > {}", config, next.score, last.score);
            assert!(next.errors.len() > last.errors.len());
            last = next;
        }
    }
}

#[test]
fn no_examples_short_circuits() {
    let always = |_: &str| true;
    let never = |_: &str| false;
    let empty: [&str; 0] = [];
    for config in [ScoringConfig::default(), ScoringConfig { penalty: Penalty::Proportional }] {
        for report in [score(&always, &empty, &empty, &config), score(&never, &empty, &empty, &config)] {
            assert!(!report.valid);
            assert_eq!(report.score, 0);
            assert_eq!(report.errors.len(), 1);
            assert_eq!(report.errors[0].kind, MismatchKind::NoExamples);
        }
    }
}

#[test]
fn policy_covers_every_score() {
    let configurations = [
        Thresholds::default(),
        Thresholds {
            strict: 100,
            repair: 0,
            display: 50,
        },
        Thresholds {
            strict: 90,
            repair: 80,
            display: 60,
        },
    ];
    for thresholds in configurations {
        thresholds.validate().unwrap();
        let mut seen = Vec::new();
        for score in 0..=100u8 {
            let disposition = decide(score, &thresholds);
            if thresholds.meets_strict(score) {
                assert_eq!(disposition, Disposition::Accept, "score {}", score);
            } else {
                assert_ne!(disposition, Disposition::Accept, "score {}", score);
            }
            if !seen.contains(&disposition) {
                seen.push(disposition);
            }
        }
        assert!(seen.contains(&Disposition::Accept));
    }
}
