#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};
    use std::time::Duration;

    use proptest::prelude::*;

    use crate::aggregate::FingerprintMode;
    use crate::board::BoxConfiguration;
    use crate::builder::SolverBuilder;
    use crate::chain::Chain;
    use crate::observer::SearchEvent;
    use crate::search::{Ceiling, Limits, Strategy};
    use crate::solver::{CoverageTarget, Solver};

    fn small_box() -> BoxConfiguration {
        BoxConfiguration::new(["AB", "CD", "EF", "GH"])
    }

    fn solver_for(words: &[&str], max_chain_length: usize) -> Solver {
        SolverBuilder::new(small_box())
            .add_words(words)
            .max_chain_length(max_chain_length)
            .build()
            .unwrap()
    }

    fn both_strategies(solver: &Solver) -> [Vec<Chain>; 2] {
        [solver.solve_bfs().unwrap().solutions, solver.solve().unwrap().solutions]
    }

    #[test]
    fn three_word_chain() {
        let solver = solver_for(&["ACE", "EGB", "BDFH"], 3);
        let universe = solver.universe_letters().into_iter().collect::<BTreeSet<_>>();

        for solutions in both_strategies(&solver) {
            assert_eq!(solutions, vec![Chain::from_iter(["ACE", "EGB", "BDFH"])]);
            for chain in solutions {
                assert!(chain.len() <= 3);
                assert!(chain.is_linked());
                assert_eq!(chain.letters(), universe);
            }
        }
    }

    #[test]
    fn chain_too_long_for_maximum() {
        let solver = solver_for(&["ACE", "EGB", "BDFH"], 2);
        for solutions in both_strategies(&solver) {
            assert!(solutions.is_empty());
        }
    }

    #[test]
    fn empty_vocabulary() {
        let solver = solver_for(&[], 3);
        let mut events = Vec::new();
        let report = solver.solve_with(Strategy::BreadthFirst, &mut |event: &SearchEvent| events.push(format!("{:?}", event))).unwrap();

        assert!(report.solutions.is_empty());
        assert_eq!(report.diagnostics.start_words_total, 0);
        assert!(events.iter().any(|event| event == "EmptyVocabulary"));
        assert!(events.iter().any(|event| event.starts_with("NoSolutions")));
        assert!(solver.solve().unwrap().solutions.is_empty());
    }

    #[test]
    fn single_word_covering_valid_letters() {
        // ACD and CDA both use two letters of the CD edge in a row
        let words = ["ACD", "CDA", "ACE"];
        let solver = solver_for(&words, 3);
        assert_eq!(solver.valid_words().collect::<Vec<_>>(), vec!["ACE"]);
        for solutions in both_strategies(&solver) {
            assert_eq!(solutions, vec![Chain::from_iter(["ACE"])]);
        }

        let solver = SolverBuilder::new(small_box())
            .add_words(words)
            .coverage(CoverageTarget::BoxLetters)
            .build()
            .unwrap();
        for solutions in both_strategies(&solver) {
            assert!(solutions.is_empty());
        }
    }

    #[test]
    fn words_reusing_an_edge_never_chain() {
        let solver = solver_for(&["ACD", "DEF", "FGB", "BAH", "HCE"], 5);
        assert_eq!(solver.valid_words().collect::<Vec<_>>(), vec!["FGB", "HCE"]);
        assert_eq!(solver.graph().edge_count(), 0);
        for solutions in both_strategies(&solver) {
            assert!(solutions.is_empty());
        }
    }

    #[test]
    fn fingerprint_modes() {
        let build = |fingerprint| SolverBuilder::new(small_box())
            .add_words(["ACE", "EGA"])
            .fingerprint(fingerprint)
            .build()
            .unwrap();

        // ACE -> EGA and EGA -> ACE use the same words
        for solutions in both_strategies(&build(FingerprintMode::WordSet)) {
            assert_eq!(solutions, vec![Chain::from_iter(["ACE", "EGA"])]);
        }
        for solutions in both_strategies(&build(FingerprintMode::OrderedChain)) {
            assert_eq!(solutions, vec![Chain::from_iter(["ACE", "EGA"]), Chain::from_iter(["EGA", "ACE"])]);
        }
    }

    #[test]
    fn session_solution_cap() {
        let solver = SolverBuilder::new(small_box())
            .add_words(["ACE", "EGA"])
            .fingerprint(FingerprintMode::OrderedChain)
            .limits(Limits { max_solutions: 1, ..Limits::default() })
            .build()
            .unwrap();

        let report = solver.solve_bfs().unwrap();
        assert_eq!(report.solutions, vec![Chain::from_iter(["ACE", "EGA"])]);
        assert_eq!(report.diagnostics.ceiling_hits(Ceiling::Solutions), 1);
        assert_eq!(report.diagnostics.start_words_processed, 1);
        assert!(report.diagnostics.truncated());
    }

    #[test]
    fn session_time_budget() {
        let solver = SolverBuilder::new(small_box())
            .add_words(["ACE", "EGB", "BDFH"])
            .limits(Limits { session_time_limit: Duration::ZERO, ..Limits::default() })
            .build()
            .unwrap();

        let report = solver.solve().unwrap();
        assert!(report.solutions.is_empty());
        assert_eq!(report.diagnostics.ceiling_hits(Ceiling::SessionTime), 1);
        assert_eq!(report.diagnostics.start_words_processed, 0);
    }

    #[test]
    fn per_word_ceilings_keep_partial_results() {
        let solver = SolverBuilder::new(small_box())
            .add_words(["ACE", "EGB", "BDFH"])
            .limits(Limits { max_iterations: 1, ..Limits::default() })
            .build()
            .unwrap();

        let report = solver.solve().unwrap();
        assert!(report.solutions.is_empty());
        assert_eq!(report.diagnostics.start_words_processed, 3);
        // BDFH has no successors, so its single iteration finishes the search
        assert_eq!(report.diagnostics.ceiling_hits(Ceiling::Iterations), 2);
    }

    #[test]
    fn branch_solution_cap_only_limits_depth_first() {
        let solver = SolverBuilder::new(small_box())
            .add_words(["ACE", "EGA", "EGCA"])
            .max_chain_length(2)
            .limits(Limits { branch_solution_cap: 0, ..Limits::default() })
            .build()
            .unwrap();

        assert_eq!(solver.bfs("ACE").unwrap(), vec![
            Chain::from_iter(["ACE", "EGA"]),
            Chain::from_iter(["ACE", "EGCA"]),
        ]);
        assert_eq!(solver.dfs("ACE").unwrap(), vec![Chain::from_iter(["ACE", "EGA"])]);

        let report = solver.solve_bfs().unwrap();
        assert_eq!(report.diagnostics.ceiling_hits(Ceiling::BranchSolutions), 0);
        let report = solver.solve().unwrap();
        assert!(report.diagnostics.ceiling_hits(Ceiling::BranchSolutions) > 0);
    }

    #[test]
    fn invalid_start_word() {
        let solver = solver_for(&["ACE", "EGB", "BDFH"], 3);
        assert!(solver.bfs("XYZ").unwrap().is_empty());
        assert!(solver.dfs("BAD").unwrap().is_empty());
        assert_eq!(solver.bfs("ACE").unwrap(), vec![Chain::from_iter(["ACE", "EGB", "BDFH"])]);
    }

    #[test]
    fn depth_first_finds_chains_breadth_first_prunes() {
        // several routes reach the same word with the same letters
        let solver = solver_for(&["ACE", "EDA", "EGB", "AFH", "BDFH", "HCEGB", "EHA", "AGDF"], 4);
        let bfs = solver.solve_bfs().unwrap();
        let dfs = solver.solve().unwrap();

        assert!(!bfs.solutions.is_empty());
        let bfs = bfs.solutions.into_iter().collect::<HashSet<_>>();
        let dfs = dfs.solutions.into_iter().collect::<HashSet<_>>();
        assert!(dfs.len() >= bfs.len());
    }

    #[test]
    fn events_describe_the_session() {
        let solver = solver_for(&["ACE", "EGB", "BDFH"], 3);
        let mut events = Vec::new();
        let report = solver.solve_with(Strategy::DepthFirst, &mut |event: &SearchEvent| events.push(format!("{:?}", event))).unwrap();

        assert_eq!(report.solutions.len(), 1);
        assert!(events.first().unwrap().starts_with("SessionStarted"));
        assert!(events.last().unwrap().starts_with("SessionFinished"));
        assert_eq!(events.iter().filter(|event| event.starts_with("SolutionFound")).count(), 1);
        assert!(!events.iter().any(|event| event.starts_with("NoSolutions")));
    }

    #[test]
    fn diagnostics_of_a_clean_solve() {
        let solver = solver_for(&["ACE", "EGB", "BDFH"], 3);
        let report = solver.solve_bfs().unwrap();
        assert_eq!(report.diagnostics.strategy, Strategy::BreadthFirst);
        assert_eq!(report.diagnostics.solutions_found, 1);
        assert!(!report.diagnostics.truncated());
    }

    proptest! {
        #[test]
        fn longer_chains_only_add_solutions(
            words in prop::collection::vec("[A-H]{2,5}", 0..8),
            max_chain_length in 1usize..4,
            strategy in prop_oneof![Just(Strategy::BreadthFirst), Just(Strategy::DepthFirst)],
        ) {
            let word_sets = |max_chain_length| {
                let solver = solver_for(&words.iter().map(String::as_str).collect::<Vec<_>>(), max_chain_length);
                solver.solve_with(strategy, &mut crate::observer::NullObserver).unwrap()
                    .solutions
                    .into_iter()
                    .map(|chain| chain.words().iter().cloned().collect::<BTreeSet<_>>())
                    .collect::<HashSet<_>>()
            };

            let shorter = word_sets(max_chain_length);
            let longer = word_sets(max_chain_length + 1);
            prop_assert!(shorter.is_subset(&longer));
        }

        #[test]
        fn solutions_are_linked_and_covering(words in prop::collection::vec("[A-H]{2,5}", 0..8)) {
            let solver = solver_for(&words.iter().map(String::as_str).collect::<Vec<_>>(), 3);
            let universe = solver.universe_letters().into_iter().collect::<BTreeSet<_>>();

            for solutions in both_strategies(&solver) {
                for chain in solutions {
                    prop_assert!(!chain.is_empty() && chain.len() <= 3);
                    prop_assert!(chain.is_linked());
                    prop_assert_eq!(chain.letters(), universe.clone());
                }
            }
        }
    }
}
