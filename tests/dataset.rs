use polars::prelude::*;
use qboost::prelude::*;

/// A small two-instrument panel spanning three months.
fn panel() -> DataFrame {
    let mut date = Vec::new();
    let mut symbol = Vec::new();
    let mut f1 = Vec::new();
    let mut f2 = Vec::new();
    let mut label = Vec::new();

    for day in 0..60usize {
        let d = format!("2020-{:02}-{:02}", 1 + day / 28, 1 + day % 28);
        for sym in ["AAA", "BBB"] {
            let x1 = (day as f64) / 10.0;
            let x2 = if sym == "AAA" { 1.0 } else { -1.0 };
            date.push(d.clone());
            symbol.push(sym.to_string());
            f1.push(x1);
            f2.push(x2);
            label.push(2.0 * x1 - x2);
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

fn handler() -> DatasetHandler {
    DatasetBuilder::new()
        .frame(panel())
        .datetime("date")
        .instrument("symbol")
        .label("label")
        .segment(Segment::Train, ("2020-01-01", "2020-02-28"))
        .segment(Segment::Valid, ("2020-03-01", "2020-03-28"))
        .build()
        .unwrap()
}

#[test]
fn prepare_selects_rows_by_date_range() {
    let dataset = handler();

    let train = dataset.prepare(Segment::Train).unwrap();
    let valid = dataset.prepare(Segment::Valid).unwrap();

    // 56 days of January/February, 2 instruments each.
    assert_eq!(train.features.shape().0, 56 * 2);
    assert_eq!(valid.features.shape().0, 4 * 2);

    // Features exclude the datetime, instrument, and label columns.
    assert_eq!(dataset.feature_names(), &["f1", "f2"]);
    assert_eq!(train.features.get_column_names(), &["f1", "f2"]);
    assert_eq!(train.labels.get_column_names(), &["label"]);

    // The row index is aligned with the rows.
    assert_eq!(train.index.len(), train.features.shape().0);
    assert!(train
        .index
        .datetime()
        .iter()
        .all(|d| d.as_str() <= "2020-02-28"));
    assert!(valid
        .index
        .datetime()
        .iter()
        .all(|d| d.as_str() >= "2020-03-01"));
}

#[test]
fn build_rejects_unknown_columns() {
    let result = DatasetBuilder::new()
        .frame(panel())
        .datetime("date")
        .label("no_such_column")
        .segment(Segment::Train, ("2020-01-01", "2020-02-28"))
        .build();

    assert!(matches!(result, Err(QBoostError::MissingColumn(_))));
}

#[test]
fn build_requires_a_label() {
    let result = DatasetBuilder::new()
        .frame(panel())
        .datetime("date")
        .build();

    assert!(matches!(
        result,
        Err(QBoostError::InvalidParameter { .. })
    ));
}

#[test]
fn prepare_rejects_unconfigured_segments() {
    let dataset = handler();
    let result = dataset.prepare(Segment::Test);

    assert!(matches!(
        result,
        Err(QBoostError::UnknownSegment(Segment::Test))
    ));
}

#[test]
fn prepare_rejects_empty_segments() {
    let dataset = DatasetBuilder::new()
        .frame(panel())
        .datetime("date")
        .label("label")
        .segment(Segment::Train, ("2030-01-01", "2030-12-31"))
        .build()
        .unwrap();

    let result = dataset.prepare(Segment::Train);
    assert!(matches!(
        result,
        Err(QBoostError::EmptySegment(Segment::Train))
    ));
}

#[test]
fn instrument_column_is_optional() {
    let frame = df!(
        "date" => ["2020-01-01", "2020-01-02", "2020-01-03"],
        "x" => [1.0, 2.0, 3.0],
        "y" => [1.0, 4.0, 9.0],
    )
    .unwrap();

    let dataset = DatasetBuilder::new()
        .frame(frame)
        .datetime("date")
        .label("y")
        .segment(Segment::Train, ("2020-01-01", "2020-01-03"))
        .build()
        .unwrap();

    let train = dataset.prepare(Segment::Train).unwrap();
    assert_eq!(train.features.shape(), (3, 1));
    assert!(train.index.instrument().is_none());
}
