use std::collections::HashMap;

use polars::prelude::*;

use super::segment::{DateRange, Segment};
use crate::error::{QBoostError, Result};

/// The `(datetime, instrument)` keys of the rows in a prepared split,
/// in row order. Scoring output is aligned to this index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIndex {
    pub(crate) datetime: Vec<String>,
    pub(crate) instrument: Option<Vec<String>>,
}

impl RowIndex {
    /// The number of rows in the index.
    pub fn len(&self) -> usize {
        self.datetime.len()
    }

    /// Returns `true` if the index has no rows.
    pub fn is_empty(&self) -> bool {
        self.datetime.is_empty()
    }

    /// The datetime key of each row.
    pub fn datetime(&self) -> &[String] {
        &self.datetime[..]
    }

    /// The instrument key of each row, if the handler has one.
    pub fn instrument(&self) -> Option<&[String]> {
        self.instrument.as_deref()
    }
}

/// One prepared split: the feature frame, the label frame
/// (kept as a frame so the model can reject multi-column labels),
/// and the row index.
#[derive(Debug, Clone)]
pub struct Split {
    /// Feature columns for the split.
    pub features: DataFrame,
    /// Label columns for the split. May have more than one column;
    /// single-label enforcement is the model's job.
    pub labels: DataFrame,
    /// Row keys, aligned with `features` and `labels`.
    pub index: RowIndex,
}

/// A builder for [`DatasetHandler`].
///
/// # Example
/// ```no_run
/// use qboost::prelude::*;
/// use polars::prelude::*;
///
/// # fn main() -> qboost::Result<()> {
/// # let frame: DataFrame = unimplemented!();
/// let dataset = DatasetBuilder::new()
///     .frame(frame)
///     .datetime("date")
///     .instrument("symbol")
///     .label("ret_1d")
///     .segment(Segment::Train, ("2019-01-01", "2021-12-31"))
///     .segment(Segment::Valid, ("2022-01-01", "2022-12-31"))
///     .segment(Segment::Test, ("2023-01-01", "2023-12-31"))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    frame: Option<DataFrame>,
    datetime_col: Option<String>,
    instrument_col: Option<String>,
    label_cols: Vec<String>,
    segments: HashMap<Segment, DateRange>,
}

impl DatasetBuilder {
    /// Construct a new, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw time-indexed frame.
    pub fn frame(mut self, frame: DataFrame) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Set the name of the datetime column.
    /// The column must hold ISO-8601 strings.
    pub fn datetime<S: ToString>(mut self, name: S) -> Self {
        self.datetime_col = Some(name.to_string());
        self
    }

    /// Set the name of the instrument column.
    /// Optional; omit it for single-asset data.
    pub fn instrument<S: ToString>(mut self, name: S) -> Self {
        self.instrument_col = Some(name.to_string());
        self
    }

    /// Add a label column. Call once per label column.
    pub fn label<S: ToString>(mut self, name: S) -> Self {
        self.label_cols.push(name.to_string());
        self
    }

    /// Set the inclusive date range of a segment.
    pub fn segment<R: Into<DateRange>>(mut self, segment: Segment, range: R) -> Self {
        self.segments.insert(segment, range.into());
        self
    }

    /// Validate the configuration and build a [`DatasetHandler`].
    /// Every remaining column of the frame becomes a feature,
    /// in frame order.
    pub fn build(self) -> Result<DatasetHandler> {
        let frame = self.frame.ok_or_else(|| QBoostError::InvalidParameter {
            name: "frame".into(),
            reason: "no data frame supplied".into(),
        })?;
        let datetime_col =
            self.datetime_col
                .ok_or_else(|| QBoostError::InvalidParameter {
                    name: "datetime".into(),
                    reason: "no datetime column supplied".into(),
                })?;
        if self.label_cols.is_empty() {
            return Err(QBoostError::InvalidParameter {
                name: "label".into(),
                reason: "no label column supplied".into(),
            });
        }

        let names = frame
            .get_column_names()
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        let mut reserved = vec![datetime_col.clone()];
        if let Some(col) = &self.instrument_col {
            reserved.push(col.clone());
        }
        reserved.extend(self.label_cols.iter().cloned());
        for col in &reserved {
            if !names.contains(col) {
                return Err(QBoostError::MissingColumn(col.clone()));
            }
        }

        let feature_cols = names
            .into_iter()
            .filter(|name| !reserved.contains(name))
            .collect::<Vec<_>>();

        Ok(DatasetHandler {
            frame,
            datetime_col,
            instrument_col: self.instrument_col,
            label_cols: self.label_cols,
            feature_cols,
            segments: self.segments,
        })
    }
}

/// Prepares labeled feature/label splits from one raw time-indexed frame.
/// Each segment is selected by its inclusive date range on the datetime
/// column.
#[derive(Debug, Clone)]
pub struct DatasetHandler {
    frame: DataFrame,
    datetime_col: String,
    instrument_col: Option<String>,
    label_cols: Vec<String>,
    feature_cols: Vec<String>,
    segments: HashMap<Segment, DateRange>,
}

impl DatasetHandler {
    /// The feature column names, in frame order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_cols[..]
    }

    /// The label column names.
    pub fn label_names(&self) -> &[String] {
        &self.label_cols[..]
    }

    /// Returns `true` if a date range is configured for `segment`.
    pub fn has_segment(&self, segment: Segment) -> bool {
        self.segments.contains_key(&segment)
    }

    /// Prepare the feature/label split for `segment`.
    /// Errors if the segment has no configured range or selects no rows.
    pub fn prepare(&self, segment: Segment) -> Result<Split> {
        let range = self
            .segments
            .get(&segment)
            .ok_or(QBoostError::UnknownSegment(segment))?;

        let dates = self.frame.column(&self.datetime_col)?.utf8()?;

        let rows = dates
            .into_iter()
            .enumerate()
            .filter_map(|(i, date)| {
                date.filter(|d| range.contains(d)).map(|_| i as IdxSize)
            })
            .collect::<Vec<IdxSize>>();
        if rows.is_empty() {
            return Err(QBoostError::EmptySegment(segment));
        }
        let rows = IdxCa::from_vec("rows", rows);

        let features = self
            .frame
            .select(self.feature_cols.iter().map(|s| s.as_str()))?
            .take(&rows)?;
        let labels = self
            .frame
            .select(self.label_cols.iter().map(|s| s.as_str()))?
            .take(&rows)?;
        let index = self.row_index(&rows)?;

        Ok(Split {
            features,
            labels,
            index,
        })
    }

    fn row_index(&self, rows: &IdxCa) -> Result<RowIndex> {
        let datetime = self
            .frame
            .column(&self.datetime_col)?
            .take(rows)?
            .utf8()?
            .into_iter()
            .map(|d| d.unwrap_or_default().to_string())
            .collect::<Vec<_>>();

        let instrument = match &self.instrument_col {
            Some(col) => {
                let keys = self
                    .frame
                    .column(col)?
                    .take(rows)?
                    .utf8()?
                    .into_iter()
                    .map(|k| k.unwrap_or_default().to_string())
                    .collect::<Vec<_>>();
                Some(keys)
            }
            None => None,
        };

        Ok(RowIndex {
            datetime,
            instrument,
        })
    }
}
