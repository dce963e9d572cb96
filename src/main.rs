use clap::{Args, Parser, Subcommand};
use intecomm_eligibility::config::AppConfig;
use intecomm_eligibility::error::AppError;
use intecomm_eligibility::screening::{
    EligibilityAssessment, EligibilityEvaluator, RequiredFieldSchema, ScreeningAnswers,
};
use intecomm_eligibility::telemetry;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "intecomm",
    about = "Screen prospective participants for the comorbidity management study",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assess a JSON record of screening answers
    Assess(AssessArgs),
    /// List the required fields and the constraint each must satisfy
    Schema,
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// Path to the answers record (reads stdin when omitted)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Print the full assessment as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(
        environment = ?config.environment,
        minimum_age = config.screening.minimum_age,
        maximum_age = config.screening.maximum_age,
        "screening configuration loaded"
    );

    match cli.command {
        Command::Assess(args) => run_assess(args, EligibilityEvaluator::new(config.screening)),
        Command::Schema => {
            render_schema(&RequiredFieldSchema::from_config(&config.screening));
            Ok(())
        }
    }
}

fn run_assess(args: AssessArgs, evaluator: EligibilityEvaluator) -> Result<(), AppError> {
    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let answers = ScreeningAnswers::from_json_str(&raw)?;
    info!(source = ?args.input, "screening answers accepted");
    let assessment = evaluator.assess(&answers);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        render_assessment(&assessment);
    }
    Ok(())
}

fn render_assessment(assessment: &EligibilityAssessment) {
    println!("Screening verdict: {}", assessment.eligible().label());

    let conditions: Vec<&str> = assessment
        .qualifying_conditions()
        .iter()
        .map(|condition| condition.label())
        .collect();
    if conditions.is_empty() {
        println!("Qualifying conditions: none");
    } else {
        println!("Qualifying conditions: {}", conditions.join(", "));
    }

    match assessment.blood_pressure() {
        Some(average) => println!(
            "Average BP: {:.1}/{:.1}",
            average.systolic, average.diastolic
        ),
        None => println!("Average BP: not measured"),
    }

    if assessment.reasons_ineligible().is_empty() {
        println!("\nReasons ineligible: none");
    } else {
        println!("\nReasons ineligible");
        for (code, message) in assessment.reasons_ineligible().iter() {
            println!("- {code}: {message}");
        }
    }
}

fn render_schema(schema: &RequiredFieldSchema) {
    println!("Required fields");
    for view in schema.views() {
        println!("- {} {} ({})", view.field, view.constraint, view.message);
    }
}
