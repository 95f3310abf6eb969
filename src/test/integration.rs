//! Cross-policy consistency checks: every strategy composition must answer
//! every query identically, only the tree shape may differ.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::aabb::Aabb;
use crate::kdtree::KdTree;
use crate::point::sq_dist;
use crate::subdivision::{
    MaximumSpreadAxis, MedianPosition, MidpointPosition, PeriodicAxis, SlidingPlane,
    SubdivisionPolicy,
};

fn random_points(n: usize, seed: u64) -> Vec<[f64; 3]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            [
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
            ]
        })
        .collect()
}

#[test]
fn all_policy_compositions_agree() {
    let points = random_points(400, 7);
    let volume = Aabb::from_corners(&[-20.0, -20.0, -20.0], &[20.0, 20.0, 20.0]);
    let query = [10.0, -5.0, 0.0];
    let max_distance = 35.0;

    let mut range_results: Vec<Vec<[f64; 3]>> = Vec::new();
    let mut sorted_results: Vec<Vec<[f64; 3]>> = Vec::new();

    macro_rules! check_policy {
        ($axis:expr, $position:expr, $bucket:expr) => {{
            let policy = SubdivisionPolicy::compose($axis, $position, SlidingPlane, $bucket);
            let mut builder = KdTree::builder_with_policy(3, policy);
            builder.extend(points.iter().copied());
            let tree = builder.finish();

            let mut range: Vec<[f64; 3]> = tree.find_inside_volume(&volume).copied().collect();
            range.sort_by(|a, b| a.partial_cmp(b).unwrap());
            range_results.push(range);

            let sorted: Vec<[f64; 3]> = tree
                .find_in_sorted_order(&query, max_distance)
                .copied()
                .collect();
            for pair in sorted.windows(2) {
                assert!(sq_dist(&pair[0], &query) <= sq_dist(&pair[1], &query));
            }
            sorted_results.push(sorted);

            for point in &points {
                assert_eq!(tree.find(point), Some(point));
            }
        }};
    }

    for bucket_size in [1, 12] {
        check_policy!(MaximumSpreadAxis, MidpointPosition, bucket_size);
        check_policy!(MaximumSpreadAxis, MedianPosition, bucket_size);
        check_policy!(PeriodicAxis, MidpointPosition, bucket_size);
        check_policy!(PeriodicAxis, MedianPosition, bucket_size);
    }

    assert!(range_results.windows(2).all(|w| w[0] == w[1]));
    assert!(sorted_results.windows(2).all(|w| w[0] == w[1]));
}
