use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use catalog_model::{RecordFields, ScholarshipRecord};
use catalog_query::{
    closing_soon, filter, proportion_summary, substring_search, top_n, busiest_entity_sentence,
    leading_share_sentence, Criteria, FuzzySearch,
};
use catalog_store::CatalogStore;

mod auth;
mod config;
mod csv;
mod remote;
mod render;

use config::CatalogConfig;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Scholarship catalog over a single SQLite file", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file
    #[arg(long, global = true, default_value = "catalog.toml")]
    config: PathBuf,

    /// Database file (overrides the config and CATALOG_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Emit JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Username for the session gate
    #[arg(long, global = true)]
    user: Option<String>,

    /// Password for the session gate
    #[arg(long, global = true)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bulk import records from a CSV file
    Upload {
        file: PathBuf,
    },
    /// Insert a single record
    Add(AddArgs),
    /// Show every stored record
    List,
    /// Substring search across all attributes
    Search {
        keyword: String,
    },
    /// Fuzzy best-match search against one attribute
    Fuzzy {
        keyword: String,
        /// Attribute to score against (default: institution_name)
        #[arg(long)]
        field: Option<String>,
        /// Keep scores strictly above this value, 0-100 (default: 70)
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Multi-criteria filtered view
    Filter {
        /// Repeatable constraint, e.g. --where continent=Asia,Europe
        #[arg(long = "where", value_name = "ATTR=V1,V2")]
        criteria: Vec<String>,
    },
    /// Group counts for charting
    Chart {
        /// Attribute to group by
        #[arg(long)]
        by: String,
        /// Keep only the N largest groups
        #[arg(long)]
        top: Option<usize>,
    },
    /// Proportions plus a narrative summary
    Summary {
        /// Attribute to group by
        #[arg(long)]
        by: String,
    },
    /// Records whose application window closes this month or next
    ClosingSoon {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        on: Option<NaiveDate>,
    },
    /// Export the catalog as CSV
    Report {
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Update fields of an existing record
    Edit(EditArgs),
    /// Delete one record by id
    Delete {
        id: String,
    },
    /// Delete every record
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
    /// Import records from a remote JSON list
    ImportRemote {
        url: String,
    },
}

#[derive(Args)]
struct AddArgs {
    id: String,
    #[arg(long)]
    continent: String,
    #[arg(long)]
    origin_country: String,
    #[arg(long)]
    institution: String,
    #[arg(long)]
    top_university: Option<String>,
    #[arg(long)]
    program_level: String,
    #[arg(long)]
    scholarship_type: String,
    #[arg(long, default_value = "-")]
    requirements: String,
    #[arg(long, default_value = "-")]
    benefit: String,
    #[arg(long, default_value = "-")]
    window: String,
    #[arg(long, default_value = "-")]
    link: String,
}

#[derive(Args)]
struct EditArgs {
    id: String,
    #[arg(long)]
    continent: Option<String>,
    #[arg(long)]
    origin_country: Option<String>,
    #[arg(long)]
    institution: Option<String>,
    #[arg(long)]
    top_university: Option<String>,
    #[arg(long)]
    program_level: Option<String>,
    #[arg(long)]
    scholarship_type: Option<String>,
    #[arg(long)]
    requirements: Option<String>,
    #[arg(long)]
    benefit: Option<String>,
    #[arg(long)]
    window: Option<String>,
    #[arg(long)]
    link: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter_level = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter_level))
        .init();

    let mut config = CatalogConfig::load(&cli.config)?;
    if let Some(db) = &cli.db {
        config.database = Some(db.clone());
    }
    auth::enforce(&config, cli.user.as_deref(), cli.password.as_deref())?;

    let store = CatalogStore::open(config.database_path())?;
    run(&cli, &store)
}

fn run(cli: &Cli, store: &CatalogStore) -> Result<()> {
    match &cli.command {
        Commands::Upload { file } => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("reading upload {}", file.display()))?;
            let rows = csv::strip_header(csv::parse_rows(&text));
            let total = rows.len();
            let (records, skipped) = csv::rows_to_records(rows);
            let inserted = store.insert(&records)?;
            println!(
                "Imported {inserted} of {total} rows ({} duplicate ids ignored, {skipped} rows skipped).",
                records.len() - inserted
            );
        }
        Commands::Add(args) => {
            let record = ScholarshipRecord {
                id: args.id.clone(),
                continent: args.continent.clone(),
                origin_country: args.origin_country.clone(),
                institution_name: args.institution.clone(),
                top_university: args.top_university.clone(),
                program_level: args.program_level.clone(),
                scholarship_type: args.scholarship_type.clone(),
                requirements: args.requirements.clone(),
                benefit: args.benefit.clone(),
                application_window: args.window.clone(),
                link: args.link.clone(),
                created_at: None,
            };
            let inserted = store.insert(std::slice::from_ref(&record))?;
            if inserted == 1 {
                println!("Added {}.", record.id);
            } else {
                println!("Id {} already exists; nothing inserted.", record.id);
            }
        }
        Commands::List => {
            let records = store.fetch_all()?;
            emit_records(cli, &records)?;
        }
        Commands::Search { keyword } => {
            let records = store.fetch_all()?;
            let hits = substring_search(&records, keyword);
            emit_records(cli, &hits)?;
        }
        Commands::Fuzzy {
            keyword,
            field,
            threshold,
        } => {
            let records = store.fetch_all()?;
            let hits = FuzzySearch::new().search(&records, keyword, field.as_deref(), *threshold)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                print!("{}", render::scored_records_table(&hits));
            }
        }
        Commands::Filter { criteria } => {
            let criteria = parse_criteria(criteria)?;
            let records = store.fetch_all()?;
            let hits = filter(&records, &criteria)?;
            emit_records(cli, &hits)?;
        }
        Commands::Chart { by, top } => {
            let records = store.fetch_all()?;
            let groups = top_n(&records, by, *top)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else {
                print!("{}", render::counts_table(&groups));
            }
        }
        Commands::Summary { by } => {
            let records = store.fetch_all()?;
            let shares = proportion_summary(&records, by)?;
            let universities = top_n(&records, "top_university", Some(1))?;

            let label = by.replace('_', " ");
            let mut sentences = Vec::new();
            sentences.extend(leading_share_sentence(&label, &shares));
            sentences.extend(busiest_entity_sentence("university", &universities));

            if cli.json {
                let body = serde_json::json!({ "shares": shares, "sentences": sentences });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print!("{}", render::shares_table(&shares));
                for sentence in &sentences {
                    println!("{sentence}");
                }
            }
        }
        Commands::ClosingSoon { on } => {
            let reference = on.unwrap_or_else(|| chrono::Utc::now().date_naive());
            let records = store.fetch_all()?;
            let hits = closing_soon(&records, reference);
            emit_records(cli, &hits)?;
        }
        Commands::Report { out } => {
            let records = store.fetch_all()?;
            let body = csv::records_to_csv(&records);
            match out {
                Some(path) => {
                    std::fs::write(path, &body)
                        .with_context(|| format!("writing report {}", path.display()))?;
                    println!("Wrote {} records to {}.", records.len(), path.display());
                }
                None => print!("{body}"),
            }
        }
        Commands::Edit(args) => {
            let records = store.fetch_all()?;
            let Some(existing) = records.into_iter().find(|r| r.id == args.id) else {
                println!("No record with id {}; nothing updated.", args.id);
                return Ok(());
            };
            let fields = merge_fields(existing.fields(), args);
            store.update(&args.id, &fields)?;
            println!("Updated {}.", args.id);
        }
        Commands::Delete { id } => {
            store.delete(id)?;
            println!("Deleted {id} (if it existed).");
        }
        Commands::Reset { yes } => {
            if !*yes {
                bail!("reset wipes every record; re-run with --yes to confirm");
            }
            store.reset()?;
            println!("Catalog reset.");
        }
        Commands::ImportRemote { url } => {
            let items = remote::fetch(url)?;
            let fetched = items.len();
            let existing = store.fetch_all()?;
            let records = remote::into_records(items, remote::next_serial(&existing));
            let inserted = store.insert(&records)?;
            println!("Imported {inserted} of {fetched} remote scholarships.");
        }
    }
    Ok(())
}

fn emit_records(cli: &Cli, records: &[ScholarshipRecord]) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(records)?);
    } else if records.is_empty() {
        println!("No records.");
    } else {
        print!("{}", render::records_table(records));
    }
    Ok(())
}

/// Parse repeated `attr=v1,v2` constraints into engine criteria.
fn parse_criteria(raw: &[String]) -> Result<Criteria> {
    let mut criteria = Criteria::new();
    for constraint in raw {
        let Some((attr, values)) = constraint.split_once('=') else {
            bail!("bad --where constraint {constraint:?}: expected ATTR=V1,V2");
        };
        let accepted: &mut BTreeSet<String> = criteria.entry(attr.to_string()).or_default();
        accepted.extend(
            values
                .split(',')
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        );
    }
    Ok(criteria)
}

fn merge_fields(mut fields: RecordFields, args: &EditArgs) -> RecordFields {
    if let Some(v) = &args.continent {
        fields.continent = v.clone();
    }
    if let Some(v) = &args.origin_country {
        fields.origin_country = v.clone();
    }
    if let Some(v) = &args.institution {
        fields.institution_name = v.clone();
    }
    if let Some(v) = &args.top_university {
        fields.top_university = Some(v.clone());
    }
    if let Some(v) = &args.program_level {
        fields.program_level = v.clone();
    }
    if let Some(v) = &args.scholarship_type {
        fields.scholarship_type = v.clone();
    }
    if let Some(v) = &args.requirements {
        fields.requirements = v.clone();
    }
    if let Some(v) = &args.benefit {
        fields.benefit = v.clone();
    }
    if let Some(v) = &args.window {
        fields.application_window = v.clone();
    }
    if let Some(v) = &args.link {
        fields.link = v.clone();
    }
    fields
}
