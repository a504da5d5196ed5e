//! Primary biliary cirrhosis (PBC) follow-up study.
//!
//! Fleming & Harrington's Mayo Clinic trial data with repeated lab
//! measurements per patient - the usual benchmark for survival models with
//! time-dependent covariates. Every row is one visit; `years` is the
//! patient's total follow-up and `year` the visit time, so `years - year` is
//! the remaining time to event or censoring as seen from that visit.
//!
//! The bundled `datasets/pbc2.csv` is a synthetic stand-in with the same
//! columns and category spellings as the public file, not the trial data.
//! Point [`LoadOptions::with_data_dir`](crate::LoadOptions::with_data_dir) at
//! a directory holding the real `pbc2.csv` to load the study itself.

use ndarray::{concatenate, Array1, Axis};

use crate::config::DataSource;
use crate::data::{LoadedDataset, SurvivalData};
use crate::error::{DatasetError, Result};
use crate::preprocessing::{one_hot_encode, MeanImputer, StandardScaler};
use crate::resources::{read_resource, PBC_RESOURCE};
use crate::sequence::group_by_subject;
use crate::table::RawTable;

/// encoded in this order; `histologic` is cast to text first
pub const CATEGORICAL_COLUMNS: [&str; 7] = [
    "drug",
    "sex",
    "ascites",
    "hepatomegaly",
    "spiders",
    "edema",
    "histologic",
];

pub const NUMERIC_COLUMNS: [&str; 7] = [
    "serBilir",
    "serChol",
    "albumin",
    "alkaline",
    "SGOT",
    "platelets",
    "prothrombin",
];

const TEXT_COERCED: &str = "histologic";
const AGE: &str = "age";
const FOLLOW_UP: &str = "years";
const VISIT: &str = "year";
const EVENT: &str = "status2";
const SUBJECT: &str = "id";

/// load PBC from the configured source
pub fn load_pbc(sequential: bool, source: &DataSource) -> Result<LoadedDataset> {
    let bytes = read_resource(PBC_RESOURCE, source)?;
    load_pbc_from_bytes(&bytes, sequential)
}

/// run the PBC pipeline over raw csv text
pub fn load_pbc_from_bytes(bytes: &[u8], sequential: bool) -> Result<LoadedDataset> {
    let table = RawTable::from_bytes(PBC_RESOURCE, bytes)?;
    let data = preprocess(&table)?;

    log::info!(
        "loaded PBC: {} visits, {} features, {} events",
        data.n_samples(),
        data.n_features(),
        data.n_events()
    );

    if !sequential {
        return Ok(LoadedDataset::Flat(data));
    }

    let ids = table.integer_column(SUBJECT)?;
    let sequences = group_by_subject(&ids, &data)?;
    log::info!("grouped PBC into {} subjects", sequences.n_subjects());
    Ok(LoadedDataset::Sequential(sequences))
}

fn preprocess(table: &RawTable) -> Result<SurvivalData> {
    let categorical = CATEGORICAL_COLUMNS
        .iter()
        .map(|&name| -> Result<(&str, Vec<Option<String>>)> {
            let values = if name == TEXT_COERCED {
                table.text_column_coerced(name)?
            } else {
                table.text_column(name)?
            };
            Ok((name, values))
        })
        .collect::<Result<Vec<_>>>()?;
    let (x_cat, mut names) = one_hot_encode(&categorical)?;

    let numeric = NUMERIC_COLUMNS
        .iter()
        .map(|&name| table.numeric_column(name).map(|col| col.insert_axis(Axis(1))))
        .collect::<Result<Vec<_>>>()?;
    let numeric_views: Vec<_> = numeric.iter().map(|col| col.view()).collect();
    let x_num = concatenate(Axis(1), &numeric_views)
        .map_err(|err| DatasetError::invalid_dimensions(err.to_string()))?;
    names.extend(NUMERIC_COLUMNS.iter().map(|name| name.to_string()));

    let follow_up = table.numeric_column(FOLLOW_UP)?;
    let visit = table.numeric_column(VISIT)?;

    // age at the visit, not at enrolment
    let age = (&table.numeric_column(AGE)? + &follow_up).insert_axis(Axis(1));
    names.push(AGE.to_string());

    let x = concatenate(Axis(1), &[x_cat.view(), x_num.view(), age.view()])
        .map_err(|err| DatasetError::invalid_dimensions(err.to_string()))?;

    let times: Array1<f64> = &follow_up - &visit;
    let events = table.event_column(EVENT)?;

    let mut imputer = MeanImputer::new();
    let x = imputer.fit_transform(&x)?;
    let names = imputer
        .kept_columns()?
        .into_iter()
        .map(|j| names[j].clone())
        .collect();
    let x = StandardScaler::new().fit_transform(&x)?;

    SurvivalData::new(x, times, events, names)
}
