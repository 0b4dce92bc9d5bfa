//! Per-segment index evaluation

use crate::index::Index;
use hrv_core::{AnalysisConfig, Result};
use hrv_segmentation::{SegmentGenerator, Segments};
use hrv_signal::Signal;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Index values of one segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRow {
    pub begin: usize,
    pub end: usize,
    pub label: Option<String>,
    pub values: Vec<f64>,
}

/// Index values per segment, one column per index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentTable {
    pub labels: Vec<String>,
    pub rows: Vec<SegmentRow>,
}

impl SegmentTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of the named index across all segments
    pub fn column(&self, label: &str) -> Option<Vec<f64>> {
        let position = self.labels.iter().position(|l| l == label)?;
        Some(self.rows.iter().map(|row| row.values[position]).collect())
    }
}

/// Evaluates a fixed list of indexes over every segment of a signal
///
/// Each segment becomes its own [`Signal`], so intermediate results are
/// shared between the indexes of a segment but never across segments.
pub struct SegmentMapper {
    indexes: Vec<Box<dyn Index>>,
    config: AnalysisConfig,
}

impl SegmentMapper {
    pub fn new(indexes: Vec<Box<dyn Index>>, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { indexes, config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn labels(&self) -> Vec<String> {
        self.indexes.iter().map(|index| index.name()).collect()
    }

    /// Run `generator` over `signal` and evaluate every index per segment
    #[instrument(skip_all, fields(generator = generator.name(), samples = signal.len()))]
    pub fn map(
        &self,
        generator: &mut dyn SegmentGenerator,
        signal: Arc<Signal>,
    ) -> Result<SegmentTable> {
        generator.initialize(Some(signal))?;
        let mut rows = Vec::new();
        for segment in Segments::new(generator) {
            let segment = segment?;
            let part = segment.materialize()?;
            rows.push(SegmentRow {
                begin: segment.begin(),
                end: segment.end(),
                label: segment.label().map(str::to_string),
                values: self.evaluate(&part)?,
            });
        }
        debug!(segments = rows.len(), indexes = self.indexes.len(), "segments mapped");
        Ok(SegmentTable {
            labels: self.labels(),
            rows,
        })
    }

    /// Every index on one signal, in order
    ///
    /// An index that lacks data yields NaN; any other failure is returned.
    pub fn evaluate(&self, signal: &Signal) -> Result<Vec<f64>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.indexes
                .par_iter()
                .map(|index| evaluate_one(index.as_ref(), signal, &self.config))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.indexes
                .iter()
                .map(|index| evaluate_one(index.as_ref(), signal, &self.config))
                .collect()
        }
    }
}

fn evaluate_one(index: &dyn Index, signal: &Signal, config: &AnalysisConfig) -> Result<f64> {
    match index.compute(signal, config) {
        Err(err) if err.is_insufficient_data() => {
            warn!(index = %index.name(), samples = signal.len(), error = %err, "segment too short");
            Ok(f64::NAN)
        }
        result => result,
    }
}

impl std::fmt::Debug for SegmentMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentMapper")
            .field("indexes", &self.labels())
            .field("config", &self.config)
            .finish()
    }
}
