use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docgen::config::Config;
use docgen::document::GeneratedDocument;
use docgen::models::{ExperienceRow, Offer, OfferRecord, ProfileRow, SkillRow};
use docgen::offer::{build_offer_document, offer_from_table, render_offer};
use docgen::profile::{build_profile_document, render_profile, ProfileTables};
use docgen::table::Table;

#[derive(Parser, Debug)]
#[command(name = "docgen", version, about = "Render CVs and job offers as Word documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one profile from the profiles/skills/experiences CSV files
    Profile {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        profiles: Option<PathBuf>,
        #[arg(long)]
        skills: Option<PathBuf>,
        #[arg(long)]
        experiences: Option<PathBuf>,
        /// Output path (default: profile.docx)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the document outline as JSON instead of writing a file
        #[arg(long)]
        outline: bool,
    },
    /// Render one row of offers.csv
    Offer {
        #[arg(long, default_value_t = 1)]
        row: usize,
        #[arg(long)]
        offers: Option<PathBuf>,
        /// Output path (default: offre.docx)
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        outline: bool,
    },
    /// Render an offer given directly on the command line
    OfferFields {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        contract: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        outline: bool,
    },
}

fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Profile {
            id,
            profiles,
            skills,
            experiences,
            out,
            outline,
        } => {
            let profiles: Table<ProfileRow> =
                load_table(config.data_file(profiles, "employee_profiles.csv"))?;
            let skills: Table<SkillRow> =
                load_table(config.data_file(skills, "employee_skills.csv"))?;
            let experiences: Table<ExperienceRow> =
                load_table(config.data_file(experiences, "employee_experiences.csv"))?;
            let tables = ProfileTables {
                profiles: &profiles,
                skills: &skills,
                experiences: &experiences,
            };

            if outline {
                print_outline(&build_profile_document(id, tables)?)?;
            } else {
                let path = render_profile(id, tables, out.as_deref())
                    .with_context(|| format!("Failed to render profile {id}"))?;
                info!("Wrote {}", path.display());
            }
        }
        Command::Offer {
            row,
            offers,
            out,
            outline,
        } => {
            let offers: Table<OfferRecord> = load_table(config.data_file(offers, "offers.csv"))?;
            let offer = offer_from_table(&offers, row)?;
            emit_offer(&offer, out, outline)?;
        }
        Command::OfferFields {
            title,
            description,
            contract,
            company,
            location,
            out,
            outline,
        } => {
            let offer = Offer {
                job_title: title,
                description,
                contract,
                company,
                location,
            };
            emit_offer(&offer, out, outline)?;
        }
    }

    Ok(())
}

fn load_table<R: serde::de::DeserializeOwned>(path: PathBuf) -> Result<Table<R>> {
    Table::from_csv_path(&path).with_context(|| format!("Failed to load {}", path.display()))
}

fn emit_offer(offer: &Offer, out: Option<PathBuf>, outline: bool) -> Result<()> {
    if outline {
        return print_outline(&build_offer_document(offer));
    }
    let path = render_offer(offer, out.as_deref())
        .with_context(|| format!("Failed to render offer '{}'", offer.job_title))?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn print_outline(document: &GeneratedDocument) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(document)?);
    Ok(())
}
