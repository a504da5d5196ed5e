use rand::rngs::StdRng;
use rand::SeedableRng;
use survival_datasets::{increase_censoring, load_dataset, LoadOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Survival Datasets - Basic Usage Example");
    println!("=======================================");
    println!("(bundled csv files are synthetic stand-ins, see LoadOptions::with_data_dir)\n");

    // Example 1: SUPPORT, one row per patient
    println!("Example 1: SUPPORT");
    println!("------------------");

    let support = load_dataset("SUPPORT", &LoadOptions::new())?
        .into_flat()
        .ok_or("SUPPORT should load flat")?;

    println!("  - Number of patients: {}", support.n_samples());
    println!("  - Number of features: {}", support.n_features());
    println!("  - Number of deaths: {}", support.n_events());
    let first: Vec<&String> = support.feature_names().iter().take(5).collect();
    println!("  - First features: {:?}", first);
    println!();

    // Example 2: PBC, flat and per subject
    println!("Example 2: PBC");
    println!("--------------");

    let flat = load_dataset("PBC", &LoadOptions::new())?;
    let sequential = load_dataset("PBC", &LoadOptions::new().with_sequential(true))?;
    let subjects = sequential.as_sequential().ok_or("PBC should load sequential")?;

    println!("  - Visits (flat rows): {}", flat.len());
    println!("  - Subjects: {}", subjects.n_subjects());
    if let Some(first) = subjects.subject(0) {
        println!(
            "  - Subject {} has {} visits, times {:?}",
            first.id,
            first.times.len(),
            first.times.to_vec()
        );
    }
    println!();

    // Example 3: heavier censoring
    println!("Example 3: Increase censoring by 30%");
    println!("------------------------------------");

    let (_, mut times, mut events) = support.into_parts();
    let before = events.iter().filter(|&&e| e == 1).count();
    let mut rng = StdRng::seed_from_u64(42);
    let switched = increase_censoring(&mut events, &mut times, 0.3, &mut rng)?;

    println!("  - Events before: {}", before);
    println!("  - Switched to censored: {}", switched.len());
    println!("  - Events after: {}", events.iter().filter(|&&e| e == 1).count());

    // unknown names are an error, not a value
    if let Err(err) = load_dataset("METABRIC", &LoadOptions::new()) {
        println!("\n  - {}", err);
    }

    Ok(())
}
