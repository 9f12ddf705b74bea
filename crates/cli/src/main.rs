use clap::{Parser, Subcommand};
use shc_core::{
    config::core_config_from_env_values,
    constants::{SEED_SAMPLE_DATA_ENV, SUGGESTION_COUNT_ENV},
    seed::sample_registry,
    validation::{non_blank, parse_list},
    PatientRecord, RecordUpdate, Registry, RegistryError, SearchReport,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shc")]
#[command(about = "Smart Health Care patient record CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scripted demo: symptom search, then a remote consultation for Bob
    Demo,
    /// List all patients
    List,
    /// Find patients with all of the given symptoms
    Search {
        /// Symptoms (comma-separated)
        symptoms: String,
    },
    /// Show a patient's record
    Show {
        /// Patient name (case-insensitive)
        name: String,
    },
    /// Run a remote consultation for a patient
    Consult {
        /// Patient name (case-insensitive)
        name: String,
    },
    /// Add a new patient record
    Add {
        /// Patient name
        name: String,
        #[arg(long)]
        diagnosis: String,
        #[arg(long)]
        prescription: String,
        /// Past health issues (comma-separated)
        #[arg(long, default_value = "")]
        history: String,
        /// Medications (comma-separated)
        #[arg(long, default_value = "")]
        medications: String,
        /// Symptoms (comma-separated)
        #[arg(long, default_value = "")]
        symptoms: String,
    },
    /// Update an existing record; omitted or blank fields keep their current value
    Update {
        /// Patient name (case-insensitive)
        name: String,
        #[command(flatten)]
        fields: UpdateFields,
    },
    /// Reveal a stored device reading
    Device {
        /// Patient name (case-insensitive)
        name: String,
        /// Device name, e.g. "Heart Rate Monitor"
        device: String,
    },
}

#[derive(clap::Args, Debug, Default)]
struct UpdateFields {
    #[arg(long)]
    diagnosis: Option<String>,
    #[arg(long)]
    prescription: Option<String>,
    /// Past health issues (comma-separated)
    #[arg(long)]
    history: Option<String>,
    /// Medications (comma-separated)
    #[arg(long)]
    medications: Option<String>,
    /// Symptoms (comma-separated)
    #[arg(long)]
    symptoms: Option<String>,
}

impl From<UpdateFields> for RecordUpdate {
    fn from(fields: UpdateFields) -> Self {
        RecordUpdate {
            diagnosis: non_blank(fields.diagnosis),
            prescription: non_blank(fields.prescription),
            history: fields.history.as_deref().map(parse_list),
            medications: fields.medications.as_deref().map(parse_list),
            symptoms: fields.symptoms.as_deref().map(parse_list),
        }
    }
}

/// Renders a search report with each matched record shown in full.
fn render_matches(registry: &Registry, report: &SearchReport) -> String {
    if report.matches.is_empty() {
        return "No matching patient records found.\n".to_string();
    }

    let mut out = String::new();
    for found in &report.matches {
        out.push_str(&format!("Match found for patient: {}\n", found.name));
        if let Some(record) = registry.find_by_name(&found.name) {
            out.push_str(&format!("{record}\n"));
        }
        out.push_str(&format!(
            "Suggested Treatment: {}\n\n",
            found.suggestions.join(", ")
        ));
    }
    out
}

fn print_matches(registry: &Registry, symptoms: &[String], suggestion_count: usize) {
    match registry.search_report(symptoms, suggestion_count, &mut rand::thread_rng()) {
        Ok(report) => print!("{}", render_matches(registry, &report)),
        Err(RegistryError::InvalidSearch) => println!("No symptoms provided to search for."),
        Err(e) => eprintln!("Error searching records: {}", e),
    }
}

fn print_record(registry: &Registry, name: &str) {
    match registry.find_by_name(name) {
        Some(record) => println!("{record}"),
        None => println!("No record found for patient: {}", name),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("shc_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let cfg = core_config_from_env_values(
        std::env::var(SUGGESTION_COUNT_ENV).ok(),
        std::env::var(SEED_SAMPLE_DATA_ENV).ok(),
    )?;
    let mut registry = if cfg.seed_sample_data() {
        sample_registry()?
    } else {
        Registry::new()
    };
    let suggestion_count = cfg.suggestion_count();

    match cli.command {
        Some(Commands::Demo) => {
            let symptoms = parse_list("fever, cough, sore throat");
            print_matches(&registry, &symptoms, suggestion_count);

            println!("Starting remote consultation for Bob...");
            match registry.consultation("Bob") {
                Ok(record) => println!("{record}"),
                Err(e) => eprintln!("Error during consultation: {}", e),
            }
            println!("Consultation complete. Recommendations have been updated in the system.");
        }
        Some(Commands::List) => {
            if registry.is_empty() {
                println!("No patients found.");
            } else {
                for record in registry.records() {
                    println!(
                        "Name: {}, Diagnosis: {}, Visits: {}",
                        record.name(),
                        record.diagnosis(),
                        record.visit_count()
                    );
                }
            }
        }
        Some(Commands::Search { symptoms }) => {
            print_matches(&registry, &parse_list(&symptoms), suggestion_count);
        }
        Some(Commands::Show { name }) => print_record(&registry, &name),
        Some(Commands::Consult { name }) => {
            println!("Starting remote consultation for {}...", name);
            match registry.consultation(&name) {
                Ok(record) => {
                    println!("{record}");
                    println!(
                        "Consultation complete. Recommendations have been updated in the system."
                    );
                }
                Err(e) => eprintln!("Error during consultation: {}", e),
            }
        }
        Some(Commands::Add {
            name,
            diagnosis,
            prescription,
            history,
            medications,
            symptoms,
        }) => match PatientRecord::new(
            &name,
            diagnosis,
            prescription,
            parse_list(&symptoms),
            parse_list(&history),
            parse_list(&medications),
        ) {
            Ok(record) => {
                println!("New patient record added.");
                println!("{record}");
                registry.insert(record);
            }
            Err(e) => eprintln!("Error adding patient record: {}", e),
        },
        Some(Commands::Update { name, fields }) => {
            match registry.update(&name, fields.into()) {
                Ok(record) => {
                    println!("Record updated.");
                    println!("{record}");
                }
                Err(RegistryError::RecordNotFound(_)) => println!("Patient record not found."),
                Err(e) => eprintln!("Error updating record: {}", e),
            }
        }
        Some(Commands::Device { name, device }) => {
            match registry.get_device_reading(&name, &device) {
                Ok(value) => println!("{}: {}", device, value),
                Err(e) => eprintln!("Error reading device data: {}", e),
            }
        }
        None => {
            println!("Use 'shc --help' for commands");
        }
    }

    Ok(())
}
