use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use crate::error::{DatasetError, Result};

/// flat survival triple - covariates, times, events
#[derive(Debug, Clone, PartialEq)]
pub struct SurvivalData {
    covariates: Array2<f64>,    // n_samples x n_features, imputed + standardized
    times: Array1<f64>,         // time to event/censoring
    events: Array1<u8>,         // 1 = event, 0 = censored
    feature_names: Vec<String>, // one per covariate column
}

impl SurvivalData {
    /// make new survival data, checking the triple lines up
    pub fn new(
        covariates: Array2<f64>,
        times: Array1<f64>,
        events: Array1<u8>,
        feature_names: Vec<String>,
    ) -> Result<Self> {
        let n_samples = times.len();

        if events.len() != n_samples {
            return Err(DatasetError::invalid_dimensions(
                format!("times len ({}) != events len ({})", n_samples, events.len())
            ));
        }

        if covariates.nrows() != n_samples {
            return Err(DatasetError::invalid_dimensions(
                format!("covariates rows ({}) != n_samples ({})", covariates.nrows(), n_samples)
            ));
        }

        if feature_names.len() != covariates.ncols() {
            return Err(DatasetError::invalid_dimensions(
                format!("{} feature names for {} columns", feature_names.len(), covariates.ncols())
            ));
        }

        if let Some(i) = times.iter().position(|&t| t < 0.0 || !t.is_finite()) {
            return Err(DatasetError::invalid_survival_data(
                format!("time at row {} is {} - must be non-negative & finite", i, times[i])
            ));
        }

        if events.iter().any(|&e| e > 1) {
            return Err(DatasetError::invalid_survival_data(
                "event indicators must be 0 or 1"
            ));
        }

        Ok(Self { covariates, times, events, feature_names })
    }

    /// how many observations
    pub fn n_samples(&self) -> usize {
        self.times.len()
    }

    /// how many covariates per observation
    pub fn n_features(&self) -> usize {
        self.covariates.ncols()
    }

    pub fn covariates(&self) -> ArrayView2<'_, f64> {
        self.covariates.view()
    }

    pub fn times(&self) -> ArrayView1<'_, f64> {
        self.times.view()
    }

    pub fn events(&self) -> ArrayView1<'_, u8> {
        self.events.view()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// how many events were observed (not censored)
    pub fn n_events(&self) -> usize {
        self.events.iter().filter(|&&e| e == 1).count()
    }

    /// hand back (x, t, e)
    pub fn into_parts(self) -> (Array2<f64>, Array1<f64>, Array1<u8>) {
        (self.covariates, self.times, self.events)
    }

    /// grab a subset of rows by indices
    pub fn subset(&self, indices: &[usize]) -> Result<Self> {
        if indices.iter().any(|&i| i >= self.n_samples()) {
            return Err(DatasetError::invalid_dimensions(
                "subset index out of bounds"
            ));
        }

        Ok(Self {
            covariates: self.covariates.select(Axis(0), indices),
            times: self.times.select(Axis(0), indices),
            events: self.events.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
        })
    }

    /// keep rows where `mask` is true
    pub fn filter_rows(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.n_samples() {
            return Err(DatasetError::invalid_dimensions(
                format!("mask len ({}) != n_samples ({})", mask.len(), self.n_samples())
            ));
        }

        let keep: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &k)| k.then_some(i))
            .collect();
        self.subset(&keep)
    }
}

/// per-subject sequences, subjects in ascending id order
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectSequences {
    subject_ids: Vec<i64>,
    covariates: Vec<Array2<f64>>,
    times: Vec<Array1<f64>>,
    events: Vec<Array1<u8>>,
    feature_names: Vec<String>,
}

/// one subject's observations, borrowed
#[derive(Debug, Clone, Copy)]
pub struct Subject<'a> {
    pub id: i64,
    pub covariates: ArrayView2<'a, f64>,
    pub times: ArrayView1<'a, f64>,
    pub events: ArrayView1<'a, u8>,
}

impl SubjectSequences {
    pub(crate) fn new(
        subject_ids: Vec<i64>,
        covariates: Vec<Array2<f64>>,
        times: Vec<Array1<f64>>,
        events: Vec<Array1<u8>>,
        feature_names: Vec<String>,
    ) -> Result<Self> {
        let n = subject_ids.len();
        if covariates.len() != n || times.len() != n || events.len() != n {
            return Err(DatasetError::invalid_dimensions(format!(
                "{} subjects but {} / {} / {} sequences",
                n,
                covariates.len(),
                times.len(),
                events.len()
            )));
        }

        for (k, ((x, t), e)) in covariates.iter().zip(&times).zip(&events).enumerate() {
            if x.nrows() != t.len() || t.len() != e.len() {
                return Err(DatasetError::invalid_dimensions(format!(
                    "subject {} has {} rows, {} times, {} events",
                    subject_ids[k],
                    x.nrows(),
                    t.len(),
                    e.len()
                )));
            }
        }

        Ok(Self { subject_ids, covariates, times, events, feature_names })
    }

    pub fn n_subjects(&self) -> usize {
        self.subject_ids.len()
    }

    /// total rows across all subjects
    pub fn n_observations(&self) -> usize {
        self.times.iter().map(Array1::len).sum()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn subject_ids(&self) -> &[i64] {
        &self.subject_ids
    }

    pub fn covariates(&self) -> &[Array2<f64>] {
        &self.covariates
    }

    pub fn times(&self) -> &[Array1<f64>] {
        &self.times
    }

    pub fn events(&self) -> &[Array1<u8>] {
        &self.events
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn subject(&self, k: usize) -> Option<Subject<'_>> {
        (k < self.n_subjects()).then(|| Subject {
            id: self.subject_ids[k],
            covariates: self.covariates[k].view(),
            times: self.times[k].view(),
            events: self.events[k].view(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Subject<'_>> + '_ {
        (0..self.n_subjects()).filter_map(move |k| self.subject(k))
    }

    /// hand back (x, t, e) as per-subject sequences
    pub fn into_parts(self) -> (Vec<Array2<f64>>, Vec<Array1<f64>>, Vec<Array1<u8>>) {
        (self.covariates, self.times, self.events)
    }
}

/// what a loader returns - flat rows or per-subject sequences
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedDataset {
    Flat(SurvivalData),
    Sequential(SubjectSequences),
}

impl LoadedDataset {
    /// rows when flat, subjects when sequential
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(data) => data.n_samples(),
            Self::Sequential(seq) => seq.n_subjects(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_sequential(&self) -> bool {
        matches!(self, Self::Sequential(_))
    }

    pub fn feature_names(&self) -> &[String] {
        match self {
            Self::Flat(data) => data.feature_names(),
            Self::Sequential(seq) => seq.feature_names(),
        }
    }

    pub fn as_flat(&self) -> Option<&SurvivalData> {
        match self {
            Self::Flat(data) => Some(data),
            Self::Sequential(_) => None,
        }
    }

    pub fn as_sequential(&self) -> Option<&SubjectSequences> {
        match self {
            Self::Sequential(seq) => Some(seq),
            Self::Flat(_) => None,
        }
    }

    pub fn into_flat(self) -> Option<SurvivalData> {
        match self {
            Self::Flat(data) => Some(data),
            Self::Sequential(_) => None,
        }
    }

    pub fn into_sequential(self) -> Option<SubjectSequences> {
        match self {
            Self::Sequential(seq) => Some(seq),
            Self::Flat(_) => None,
        }
    }
}
