use polars::prelude::*;
use qboost::prelude::*;
use serde_json::json;

/// Deterministic pseudo-noise for reproducible tests.
fn lcg(state: &mut u64) -> f64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    ((*state >> 33) as f64) / ((1u64 << 31) as f64) - 1.0
}

/// A 140-day, two-instrument panel with a linear signal:
/// `label = 2 * f1 - f2 + 0.01 * noise`.
fn signal_panel() -> DataFrame {
    let mut date = Vec::new();
    let mut symbol = Vec::new();
    let mut f1 = Vec::new();
    let mut f2 = Vec::new();
    let mut label = Vec::new();

    let mut state = 42u64;
    for day in 0..140usize {
        let d = format!("2020-{:02}-{:02}", 1 + day / 28, 1 + day % 28);
        for sym in ["AAA", "BBB"] {
            let x1 = ((day * 7 + sym.len()) % 23) as f64 / 23.0;
            let x2 = ((day * 13) % 17) as f64 / 17.0;
            date.push(d.clone());
            symbol.push(sym.to_string());
            f1.push(x1);
            f2.push(x2);
            label.push(2.0 * x1 - x2 + 0.01 * lcg(&mut state));
        }
    }

    df!(
        "date" => date,
        "symbol" => symbol,
        "f1" => f1,
        "f2" => f2,
        "label" => label,
    )
    .unwrap()
}

fn signal_dataset() -> DatasetHandler {
    DatasetBuilder::new()
        .frame(signal_panel())
        .datetime("date")
        .instrument("symbol")
        .label("label")
        // Months 1-3 train, month 4 valid, month 5 test.
        .segment(Segment::Train, ("2020-01-01", "2020-03-28"))
        .segment(Segment::Valid, ("2020-04-01", "2020-04-28"))
        .segment(Segment::Test, ("2020-05-01", "2020-05-28"))
        .build()
        .unwrap()
}

#[test]
fn fit_learns_the_signal() {
    let dataset = signal_dataset();

    let mut model = GbdtModel::with_overrides(json!({
        "num_boost_round": 200,
        "early_stopping_rounds": 50,
        "learning_rate": 0.1,
        "max_depth": 4,
        "verbose_eval": 0,
    }))
    .unwrap();

    let report = model.fit(&dataset).unwrap();

    assert!(report.rounds() > 0);
    assert!(report.best_round > 0);
    assert_eq!(report.valid_loss.len(), report.rounds());

    // Boosting reduces the training loss.
    let first = report.train_loss.first().copied().unwrap();
    let last = report.train_loss.last().copied().unwrap();
    assert!(last < first);

    // The model fits the (almost noiseless) signal tightly.
    let best = report.best_score.unwrap();
    assert!(best < 0.1, "valid mse too high: {best}");

    let scores = model.predict(&dataset, Segment::Test).unwrap();
    assert_eq!(scores.len(), 28 * 2);
    assert!(scores.values().iter().all(|v| v.is_finite()));

    let frame = scores.into_dataframe().unwrap();
    assert_eq!(
        frame.get_column_names(),
        &["datetime", "instrument", "score"]
    );
}

#[test]
fn predict_before_fit_is_an_error() {
    let dataset = signal_dataset();
    let model = GbdtModel::new(GbdtParams::default()).unwrap();

    let result = model.predict(&dataset, Segment::Test);
    assert!(matches!(result, Err(QBoostError::NotFitted)));
}

#[test]
fn multi_label_training_is_rejected() {
    let mut frame = signal_panel();
    let mut extra = frame.column("label").unwrap().clone();
    extra.rename("label2");
    frame.with_column(extra).unwrap();

    let dataset = DatasetBuilder::new()
        .frame(frame)
        .datetime("date")
        .instrument("symbol")
        .label("label")
        .label("label2")
        .segment(Segment::Train, ("2020-01-01", "2020-03-28"))
        .segment(Segment::Valid, ("2020-04-01", "2020-04-28"))
        .build()
        .unwrap();

    let mut model = GbdtModel::new(GbdtParams::default()).unwrap();
    let result = model.fit(&dataset);
    assert!(matches!(result, Err(QBoostError::MultiLabel(2))));
}

#[test]
fn nan_features_are_rejected() {
    let mut frame = signal_panel();
    let mut f1 = frame
        .column("f1")
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect::<Vec<_>>();
    f1[3] = f64::NAN;
    frame.with_column(Series::new("f1", f1)).unwrap();

    let dataset = DatasetBuilder::new()
        .frame(frame)
        .datetime("date")
        .instrument("symbol")
        .label("label")
        .segment(Segment::Train, ("2020-01-01", "2020-03-28"))
        .segment(Segment::Valid, ("2020-04-01", "2020-04-28"))
        .build()
        .unwrap();

    let mut model = GbdtModel::new(GbdtParams::default()).unwrap();
    let result = model.fit(&dataset);
    assert!(matches!(result, Err(QBoostError::NonFiniteValue(_, _))));
}

#[test]
fn predict_rejects_mismatched_feature_columns() {
    let dataset = signal_dataset();
    let mut model = GbdtModel::with_overrides(json!({
        "num_boost_round": 5,
        "verbose_eval": 0,
    }))
    .unwrap();
    model.fit(&dataset).unwrap();

    // The same panel with a renamed feature column.
    let mut frame = signal_panel();
    frame.rename("f1", "g1").unwrap();
    let renamed = DatasetBuilder::new()
        .frame(frame)
        .datetime("date")
        .instrument("symbol")
        .label("label")
        .segment(Segment::Test, ("2020-05-01", "2020-05-28"))
        .build()
        .unwrap();

    let result = model.predict(&renamed, Segment::Test);
    assert!(matches!(result, Err(QBoostError::FeatureMismatch { .. })));
}

#[test]
fn binary_objective_scores_probabilities() {
    let mut frame = signal_panel();
    // Binarize the label around the middle of the signal range.
    let label = frame
        .column("label")
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .map(|y| if y > 0.5 { 1.0 } else { 0.0 })
        .collect::<Vec<_>>();
    frame.with_column(Series::new("label", label)).unwrap();

    let dataset = DatasetBuilder::new()
        .frame(frame)
        .datetime("date")
        .instrument("symbol")
        .label("label")
        .segment(Segment::Train, ("2020-01-01", "2020-03-28"))
        .segment(Segment::Valid, ("2020-04-01", "2020-04-28"))
        .segment(Segment::Test, ("2020-05-01", "2020-05-28"))
        .build()
        .unwrap();

    let mut model = GbdtModel::with_overrides(json!({
        "objective": "binary",
        "num_boost_round": 100,
        "learning_rate": 0.2,
        "max_depth": 3,
        "verbose_eval": 0,
    }))
    .unwrap();

    model.fit(&dataset).unwrap();
    let scores = model.predict(&dataset, Segment::Test).unwrap();

    assert!(scores
        .values()
        .iter()
        .all(|p| (0.0..=1.0).contains(p)));
}

#[test]
fn binary_objective_rejects_real_valued_labels() {
    let dataset = signal_dataset();

    let mut model = GbdtModel::with_overrides(json!({
        "objective": "binary",
        "verbose_eval": 0,
    }))
    .unwrap();

    let result = model.fit(&dataset);
    assert!(matches!(result, Err(QBoostError::InvalidLabel { .. })));
}

#[test]
fn pure_noise_triggers_early_stopping() {
    let mut date = Vec::new();
    let mut x = Vec::new();
    let mut label = Vec::new();

    let mut state = 7u64;
    for day in 0..140usize {
        date.push(format!("2020-{:02}-{:02}", 1 + day / 28, 1 + day % 28));
        x.push(lcg(&mut state));
        label.push(lcg(&mut state));
    }
    let frame = df!("date" => date, "x" => x, "label" => label).unwrap();

    let dataset = DatasetBuilder::new()
        .frame(frame)
        .datetime("date")
        .label("label")
        .segment(Segment::Train, ("2020-01-01", "2020-03-28"))
        .segment(Segment::Valid, ("2020-04-01", "2020-04-28"))
        .build()
        .unwrap();

    let mut model = GbdtModel::with_overrides(json!({
        "num_boost_round": 500,
        "early_stopping_rounds": 5,
        "learning_rate": 0.3,
        "verbose_eval": 0,
    }))
    .unwrap();

    let report = model.fit(&dataset).unwrap();
    assert!(report.rounds() < 500, "the noise run never stopped early");
    assert_eq!(
        model.ensemble().unwrap().len(),
        report.best_round,
        "the ensemble is not truncated to the best round"
    );
}

#[test]
fn disabling_early_stopping_keeps_every_round() {
    let mut date = Vec::new();
    let mut x = Vec::new();
    let mut label = Vec::new();

    let mut state = 11u64;
    for day in 0..140usize {
        date.push(format!("2020-{:02}-{:02}", 1 + day / 28, 1 + day % 28));
        x.push(lcg(&mut state));
        label.push(lcg(&mut state));
    }
    let frame = df!("date" => date, "x" => x, "label" => label).unwrap();

    let dataset = DatasetBuilder::new()
        .frame(frame)
        .datetime("date")
        .label("label")
        .segment(Segment::Train, ("2020-01-01", "2020-03-28"))
        .segment(Segment::Valid, ("2020-04-01", "2020-04-28"))
        .build()
        .unwrap();

    let mut model = GbdtModel::with_overrides(json!({
        "num_boost_round": 30,
        "early_stopping_rounds": 0,
        "learning_rate": 0.3,
        "verbose_eval": 0,
    }))
    .unwrap();

    let report = model.fit(&dataset).unwrap();
    // On noise the best round comes early, but with early stopping
    // disabled the full ensemble survives.
    assert_eq!(report.rounds(), 30);
    assert_eq!(model.ensemble().unwrap().len(), 30);
}

#[test]
fn save_and_load_round_trip() {
    let dataset = signal_dataset();

    let mut model = GbdtModel::with_overrides(json!({
        "num_boost_round": 50,
        "learning_rate": 0.1,
        "verbose_eval": 0,
    }))
    .unwrap();
    model.fit(&dataset).unwrap();

    let path = std::env::temp_dir().join("qboost_round_trip.json");
    model.save_json(&path).unwrap();
    let loaded = GbdtModel::load_json(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let before = model.predict(&dataset, Segment::Test).unwrap();
    let after = loaded.predict(&dataset, Segment::Test).unwrap();
    assert_eq!(before.values(), after.values());
}
