use proptest::prelude::*;
use vecadd::{run_benchmark, Config, HostBackend, InputVectors, LaunchGeometry};

fn operands() -> impl Strategy<Value = (Vec<i32>, Vec<i32>)> {
    (1usize..600).prop_flat_map(|len| {
        (
            prop::collection::vec(0i32..100, len),
            prop::collection::vec(0i32..100, len),
        )
    })
}

proptest! {
    #[test]
    fn sum_matches_host_for_any_group(
        (a, b) in operands(),
        group in 1usize..128,
    ) {
        let len = a.len();
        prop_assume!(group <= len);
        let inputs = InputVectors::from_vecs(a, b).unwrap();
        let config = Config {
            vector_len: len,
            work_group_size: Some(group),
            ..Config::default()
        };
        let report = run_benchmark(&mut HostBackend::new(), &config, &inputs).unwrap();
        prop_assert_eq!(report.result, inputs.expected_sum());
    }

    #[test]
    fn geometry_covers_length_with_less_than_one_group_padding(
        len in 1usize..100_000,
        local in 1usize..1_025,
    ) {
        let g = LaunchGeometry::new(len, local).unwrap();
        prop_assert!(g.global >= len);
        prop_assert_eq!(g.global % local, 0);
        prop_assert!(g.padding() < local);
    }
}
