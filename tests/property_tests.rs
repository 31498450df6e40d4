use lloyd::cluster::{ClusterState, Clustering, Kmeans};
use proptest::prelude::*;

const MAX_PASSES: usize = 500;

fn coords() -> impl Strategy<Value = (f64, f64)> {
    (-100.0f64..100.0, -100.0f64..100.0)
}

proptest! {
    #[test]
    fn prop_kmeans_all_assigned(
        data in prop::collection::vec(coords(), 1..30),
        k in 1usize..6
    ) {
        let model = Kmeans::new(k).with_seed(42).with_max_iter(MAX_PASSES);
        let labels = model.fit_predict(&data).unwrap();

        prop_assert_eq!(labels.len(), data.len());
        for &l in &labels {
            prop_assert!(l < k);
        }
    }

    #[test]
    fn prop_pass_invariants(
        data in prop::collection::vec(coords(), 1..30),
        seeds in prop::collection::vec(coords(), 1..6)
    ) {
        let mut state = ClusterState::with_centroids(&data, &seeds).unwrap();
        let k = seeds.len();

        while state.iteration() < MAX_PASSES {
            let before = state.centroids().to_vec();
            let prev_iter = state.iteration();
            let Some(pass) = state.step() else { break };

            // Counter advances by exactly one per pass.
            prop_assert_eq!(pass.iteration, prev_iter + 1);
            prop_assert_eq!(state.iteration(), prev_iter + 1);

            for p in state.points() {
                let id = p.centroid_id().unwrap();
                prop_assert!((1..=k).contains(&id));
            }

            let sizes = state.cluster_sizes();
            prop_assert_eq!(sizes.iter().sum::<usize>(), data.len());
            prop_assert_eq!(sizes.iter().filter(|&&s| s == 0).count(), pass.empty_centroids);

            for (c, (old, size)) in state.centroids().iter().zip(before.iter().zip(&sizes)) {
                prop_assert!(c.wcss.unwrap() >= 0.0);
                if *size == 0 {
                    prop_assert_eq!((c.x, c.y), (old.x, old.y));
                }
            }
        }

        if state.is_converged() {
            let frozen = state.clone();
            prop_assert!(state.step().is_none());
            prop_assert_eq!(state.iteration(), frozen.iteration());
            prop_assert_eq!(state.centroids(), frozen.centroids());
        }
    }

    #[test]
    fn prop_injected_centroids_are_deterministic(
        data in prop::collection::vec(coords(), 1..30),
        seeds in prop::collection::vec(coords(), 1..6)
    ) {
        let mut a = ClusterState::with_centroids(&data, &seeds).unwrap();
        let mut b = ClusterState::with_centroids(&data, &seeds).unwrap();
        let stop_a = a.run(Some(MAX_PASSES));
        let stop_b = b.run(Some(MAX_PASSES));

        prop_assert_eq!(stop_a, stop_b);
        prop_assert_eq!(a.labels(), b.labels());
        prop_assert_eq!(a.centroids(), b.centroids());
    }
}
