use std::collections::BTreeSet;

use ndarray::{Array1, Array2, Axis};

use crate::error::{DatasetError, Result};

/// one binary column per category, columns grouped by source column
///
/// categories are sorted ascending within each column and named
/// `<column>_<category>`. a missing cell leaves the whole group at zero.
pub fn one_hot_encode(columns: &[(&str, Vec<Option<String>>)]) -> Result<(Array2<f64>, Vec<String>)> {
    let n_rows = columns.first().map_or(0, |(_, values)| values.len());
    if let Some((name, values)) = columns.iter().find(|(_, values)| values.len() != n_rows) {
        return Err(DatasetError::invalid_dimensions(format!(
            "column `{}` has {} rows, expected {}",
            name,
            values.len(),
            n_rows
        )));
    }

    let levels: Vec<Vec<&str>> = columns
        .iter()
        .map(|(_, values)| {
            values
                .iter()
                .flatten()
                .map(String::as_str)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        })
        .collect();

    let n_cols = levels.iter().map(Vec::len).sum();
    let mut encoded = Array2::zeros((n_rows, n_cols));
    let mut names = Vec::with_capacity(n_cols);

    let mut offset = 0;
    for ((name, values), levels) in columns.iter().zip(&levels) {
        for (i, value) in values.iter().enumerate() {
            if let Some(value) = value {
                // levels are sorted, so binary search finds the slot
                if let Ok(k) = levels.binary_search(&value.as_str()) {
                    encoded[[i, offset + k]] = 1.0;
                }
            }
        }
        names.extend(levels.iter().map(|level| format!("{name}_{level}")));
        offset += levels.len();
    }

    Ok((encoded, names))
}

/// fills NaN with the column mean
#[derive(Debug, Clone, Default)]
pub struct MeanImputer {
    statistics: Option<Array1<f64>>,
}

impl MeanImputer {
    pub fn new() -> Self {
        Self::default()
    }

    /// column means over the observed (non-NaN) cells
    pub fn fit(&mut self, data: &Array2<f64>) -> Result<()> {
        let means = data
            .axis_iter(Axis(1))
            .map(|column| {
                let (sum, count) = column
                    .iter()
                    .filter(|v| !v.is_nan())
                    .fold((0.0, 0usize), |(s, c), &v| (s + v, c + 1));
                if count == 0 { f64::NAN } else { sum / count as f64 }
            })
            .collect::<Array1<f64>>();

        self.statistics = Some(means);
        Ok(())
    }

    /// imputed copy; columns with nothing observed are dropped
    pub fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>> {
        let means = self.fitted()?;
        if data.ncols() != means.len() {
            return Err(DatasetError::invalid_dimensions(format!(
                "imputer fitted on {} columns, got {}",
                means.len(),
                data.ncols()
            )));
        }

        let kept = self.kept_columns()?;
        if kept.len() < means.len() {
            log::warn!(
                "dropping {} column(s) with no observed values",
                means.len() - kept.len()
            );
        }

        let mut result = data.select(Axis(1), &kept);
        for (mut column, &j) in result.axis_iter_mut(Axis(1)).zip(&kept) {
            let mean = means[j];
            column.mapv_inplace(|v| if v.is_nan() { mean } else { v });
        }
        Ok(result)
    }

    pub fn fit_transform(&mut self, data: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(data)?;
        self.transform(data)
    }

    /// per-column fill values (NaN for all-missing columns)
    pub fn statistics(&self) -> Option<&Array1<f64>> {
        self.statistics.as_ref()
    }

    /// indices of the input columns that survive `transform`
    pub fn kept_columns(&self) -> Result<Vec<usize>> {
        Ok(self
            .fitted()?
            .iter()
            .enumerate()
            .filter(|(_, mean)| !mean.is_nan())
            .map(|(j, _)| j)
            .collect())
    }

    fn fitted(&self) -> Result<&Array1<f64>> {
        self.statistics
            .as_ref()
            .ok_or_else(|| DatasetError::invalid_parameter("imputer", "not fitted - call fit() first"))
    }
}

/// zero mean, unit variance per column
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    mean: Option<Array1<f64>>,
    scale: Option<Array1<f64>>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// population mean and std (ddof = 0)
    pub fn fit(&mut self, data: &Array2<f64>) -> Result<()> {
        let mean = data
            .mean_axis(Axis(0))
            .ok_or_else(|| DatasetError::invalid_dimensions("can't standardize an empty matrix"))?;
        let std = data.std_axis(Axis(0), 0.0);

        // constant columns keep scale 1 so they come out as zeros
        let scale = std
            .iter()
            .zip(mean.iter())
            .map(|(&s, &m)| {
                if s < 10.0 * f64::EPSILON * m.abs().max(1.0) { 1.0 } else { s }
            })
            .collect::<Array1<f64>>();

        self.mean = Some(mean);
        self.scale = Some(scale);
        Ok(())
    }

    pub fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>> {
        let (mean, scale) = match (&self.mean, &self.scale) {
            (Some(mean), Some(scale)) => (mean, scale),
            _ => return Err(DatasetError::invalid_parameter("scaler", "not fitted - call fit() first")),
        };
        if data.ncols() != mean.len() {
            return Err(DatasetError::invalid_dimensions(format!(
                "scaler fitted on {} columns, got {}",
                mean.len(),
                data.ncols()
            )));
        }

        let mut result = data.clone();
        for mut row in result.axis_iter_mut(Axis(0)) {
            row -= mean;
            row /= scale;
        }
        Ok(result)
    }

    pub fn fit_transform(&mut self, data: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(data)?;
        self.transform(data)
    }

    pub fn mean(&self) -> Option<&Array1<f64>> {
        self.mean.as_ref()
    }

    pub fn scale(&self) -> Option<&Array1<f64>> {
        self.scale.as_ref()
    }
}
