use polars::prelude::*;
use qboost::prelude::*;

fn sample(features: DataFrame, target: &[f64]) -> Sample {
    let target = Series::new("y", target);
    Sample::from_dataframe(features)
        .unwrap()
        .set_target(&target)
        .unwrap()
}

#[test]
fn a_single_split_separates_two_clusters() {
    let features = df!(
        "x" => [0.0, 0.0, 0.0, 10.0, 10.0, 10.0],
    )
    .unwrap();
    let target = [-1.0, -1.0, -1.0, 1.0, 1.0, 1.0];
    let sample = sample(features, &target);

    // Derivatives of the squared loss at an all-zero prediction.
    let predictions = vec![0.0; 6];
    let gh = Objective::Mse.grad_hess(sample.target(), &predictions);
    let indices = (0..6).collect::<Vec<_>>();

    let weak_learner = RegressionTreeBuilder::new(&sample)
        .max_depth(2)
        .lambda_l2(0.0)
        .build();
    let tree = weak_learner.produce(&sample, &gh, &indices);

    // With no regularization the leaf value is the cluster mean.
    for row in 0..6 {
        let expected = target[row];
        let got = tree.predict(&sample, row);
        assert!(
            (got - expected).abs() < 1e-9,
            "row {row}: expected {expected}, got {got}"
        );
    }
    assert_eq!(tree.leaves(), 2);
}

#[test]
fn depth_one_trees_are_single_leaves() {
    let features = df!(
        "x" => [0.0, 1.0, 2.0, 3.0],
        "z" => [5.0, 5.0, 5.0, 5.0],
    )
    .unwrap();
    let target = [0.0, 1.0, 2.0, 3.0];
    let sample = sample(features, &target);

    let predictions = vec![0.0; 4];
    let gh = Objective::Mse.grad_hess(sample.target(), &predictions);
    let indices = (0..4).collect::<Vec<_>>();

    let weak_learner = RegressionTreeBuilder::new(&sample).max_depth(1).build();
    let tree = weak_learner.produce(&sample, &gh, &indices);

    assert_eq!(tree.leaves(), 1);
}

#[test]
fn max_bin_above_the_default_cap_is_honored() {
    let values = (0..300).map(|v| v as f64).collect::<Vec<_>>();
    let features = df!("x" => &values).unwrap();
    let sample = sample(features, &values);

    let capped = RegressionTreeBuilder::new(&sample).build();
    let raised = RegressionTreeBuilder::new(&sample).max_bin(300).build();

    // 300 distinct values: the default caps at 255 bins, a raised
    // `max_bin` gets one bin per distinct value.
    assert!(format!("{capped}").contains("[x | 255 bins]"));
    assert!(format!("{raised}").contains("[x | 300 bins]"));
}

#[test]
fn regularization_shrinks_leaf_values() {
    let features = df!("x" => [0.0, 10.0]).unwrap();
    let target = [1.0, 1.0];
    let sample = sample(features, &target);

    let predictions = vec![0.0; 2];
    let gh = Objective::Mse.grad_hess(sample.target(), &predictions);
    let indices = vec![0, 1];

    let strong = RegressionTreeBuilder::new(&sample)
        .max_depth(1)
        .lambda_l2(10.0)
        .build()
        .produce(&sample, &gh, &indices);
    let weak = RegressionTreeBuilder::new(&sample)
        .max_depth(1)
        .lambda_l2(0.0)
        .build()
        .produce(&sample, &gh, &indices);

    let strong_pred = strong.predict(&sample, 0);
    let weak_pred = weak.predict(&sample, 0);
    assert!(strong_pred.abs() < weak_pred.abs());
    assert!((weak_pred - 1.0).abs() < 1e-9);
}
