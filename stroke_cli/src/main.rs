use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use stroke_core::*;

#[derive(Parser)]
#[command(name = "stroketriage")]
#[command(about = "Stroke eligibility decision support", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a case file and print the verdict
    Evaluate {
        /// Path to the case JSON file
        case_file: PathBuf,

        /// Print the raw verdict record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a starter case JSON to fill in
    Template,
}

fn main() -> Result<()> {
    // Initialize logging
    stroke_core::logging::init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Evaluate { case_file, json } => cmd_evaluate(&case_file, json, &config),
        Commands::Template => cmd_template(),
    }
}

fn cmd_evaluate(case_file: &Path, json: bool, config: &Config) -> Result<()> {
    let case = load_case(case_file, config)?;
    let verdict = evaluate(&case)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        display_verdict(&verdict, config);
    }

    Ok(())
}

/// Read a case file, filling a missing transport section from the site
/// config before the record is deserialized
fn load_case(path: &Path, config: &Config) -> Result<CaseInputs> {
    let contents = std::fs::read_to_string(path)?;
    let mut value: serde_json::Value = serde_json::from_str(&contents)?;

    if value.get("transport").is_none() {
        if let Some(obj) = value.as_object_mut() {
            tracing::info!("Case file has no transport section, using site config");
            let transport = TransportPlan {
                dido_minutes: config.logistics.dido_minutes,
                transport_minutes: config.logistics.transport_minutes,
                receiving_dtn_minutes: config.logistics.receiving_dtn_minutes,
                spoke_mode: config.logistics.spoke_mode,
            };
            obj.insert("transport".to_string(), serde_json::to_value(transport)?);
        }
    }

    Ok(serde_json::from_value(value)?)
}

fn cmd_template() -> Result<()> {
    let now = chrono::Utc::now();
    let template = CaseInputs {
        onset: StrokeOnset::Known,
        last_known_well: now - chrono::Duration::hours(2),
        bedtime: None,
        wake: None,
        recognition: None,
        evaluated_at: now,
        nihss: None,
        disabling_deficit: false,
        imaging: ImagingAvailability::default(),
        transport: TransportPlan::default(),
        occlusion_site: OcclusionSite::Unknown,
        aspects: None,
        pc_aspects: None,
        age: None,
        prestroke_mrs: None,
        mass_effect: Finding::Unknown,
        mri_mismatch: Finding::Unknown,
        perfusion_penumbra: Finding::Unknown,
        high_risk_flags: vec![],
    };

    println!("{}", serde_json::to_string_pretty(&template)?);
    Ok(())
}

fn display_verdict(verdict: &Verdict, config: &Config) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  STROKE PATHWAY VERDICT");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  IVT:      {}", verdict.ivt.status);
    println!("            {}", verdict.ivt.rationale);
    if let Some(cor) = verdict.ivt.cor {
        println!("            {}", cor);
    }
    println!("            [{}]", verdict.ivt.math_trace);
    println!();
    println!("  EVT:      {}", verdict.evt.status);
    println!("            {}", verdict.evt.rationale);
    if let Some(cor) = verdict.evt.cor {
        println!("            {}", cor);
    }
    println!();
    println!("  Transfer: {}", verdict.transfer.status);
    println!("            {}", verdict.transfer.rationale);
    println!();
    println!("─────────────────────────────────────────");
    println!("{}", verdict.docs.ed_summary);
    println!();
    println!("{}", verdict.docs.transfer_summary);

    if let Some(ref line) = config.specialist_line {
        println!();
        println!("  ℹ Specialist line: {}", line);
    }

    println!();
    println!("! Decision support only. Final decisions require clinician");
    println!("  judgment, specialist consultation, and local policy.");
}
