//! JsonBase CLI
//!
//! Host application that drives an entity registry against a data directory.
//! The registry is not persisted, so every command except `create` first
//! re-declares (attaches) the entity it works on.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use jsonbase::{Config, EntityRegistry, Exporter, JsonBaseError, Record, WriteMode};
use serde_json::{json, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// JsonBase CLI
#[derive(Parser, Debug)]
#[command(name = "jsonbase-cli")]
#[command(about = "CLI for the JsonBase embedded document store")]
#[command(version)]
struct Args {
    /// Data directory holding the entity files
    #[arg(short, long, default_value = "./jsonbase_data")]
    data_dir: String,

    /// Entity schema file (JSON). Every command declares its entity with it
    #[arg(short, long, global = true)]
    schema: Option<PathBuf>,

    /// Rewrite files in place instead of temp file + rename
    #[arg(long)]
    in_place: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new entity and its empty file
    Create {
        /// Entity name (kebab-case)
        entity: String,
    },

    /// Insert a record
    Insert {
        entity: String,

        /// Record as a JSON object
        record: String,
    },

    /// Print records, optionally one by id and/or projected
    Find {
        entity: String,

        /// Only the record with this id
        #[arg(long)]
        id: Option<String>,

        /// Comma-separated field whitelist
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,
    },

    /// Merge a JSON payload into a record
    Update {
        entity: String,

        id: String,

        /// Payload as a JSON object
        payload: String,
    },

    /// Delete a record by id
    Delete { entity: String, id: String },

    /// Print the number of records
    Count { entity: String },

    /// Print every record restricted to the given fields
    Export {
        entity: String,

        /// Comma-separated field whitelist
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,
    },

    /// Delete the entity file
    Drop { entity: String },
}

fn main() {
    // Logs go to stderr so stdout stays parseable JSON
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,jsonbase=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("JsonBase CLI v{}", jsonbase::VERSION);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> jsonbase::Result<()> {
    let write_mode = if args.in_place {
        WriteMode::InPlace
    } else {
        WriteMode::Atomic
    };

    let config = Config::builder()
        .source_dir(&args.data_dir)
        .write_mode(write_mode)
        .build();
    let mut registry = EntityRegistry::new(config)?;

    match args.command {
        Commands::Create { entity } => {
            let model = registry.create(&entity, load_schema(args.schema.as_deref())?)?;
            println!("{}", model.file_path().display());
        }
        Commands::Insert { entity, record } => {
            let model = registry.attach(&entity, load_schema(args.schema.as_deref())?)?;
            let stored = model.insert(parse_record(&record)?)?;
            print_json(&Value::Object(stored))?;
        }
        Commands::Find { entity, id, fields } => {
            let model = registry.attach(&entity, load_schema(args.schema.as_deref())?)?;
            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
            let records = model.find(id.as_deref(), &fields)?;
            print_records(records)?;
        }
        Commands::Update {
            entity,
            id,
            payload,
        } => {
            let model = registry.attach(&entity, load_schema(args.schema.as_deref())?)?;
            let updated = model.update(&id, parse_record(&payload)?)?;
            print_json(&Value::Object(updated))?;
        }
        Commands::Delete { entity, id } => {
            let model = registry.attach(&entity, load_schema(args.schema.as_deref())?)?;
            let removed = model.delete(&id)?;
            print_json(&json!({ "deleted": removed }))?;
        }
        Commands::Count { entity } => {
            let model = registry.attach(&entity, load_schema(args.schema.as_deref())?)?;
            println!("{}", model.count()?);
        }
        Commands::Export { entity, fields } => {
            registry.attach(&entity, load_schema(args.schema.as_deref())?)?;
            let projection = json!(fields);
            let records = Exporter::new(&registry).export_data(&entity, &projection)?;
            print_records(records)?;
        }
        Commands::Drop { entity } => {
            registry.attach(&entity, load_schema(args.schema.as_deref())?)?;
            registry.drop_entity(&entity)?;
            print_json(&json!({ "dropped": entity }))?;
        }
    }

    Ok(())
}

/// Entity schema from `--schema`, which every command requires
fn load_schema(path: Option<&Path>) -> jsonbase::Result<Value> {
    let path = path.ok_or_else(|| {
        JsonBaseError::Config("--schema <FILE> is required to declare the entity".to_string())
    })?;
    read_json(path)
}

fn read_json(path: &Path) -> jsonbase::Result<Value> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn parse_record(text: &str) -> jsonbase::Result<Record> {
    jsonbase::to_record(serde_json::from_str(text)?)
}

fn print_records(records: Vec<Record>) -> jsonbase::Result<()> {
    let array = Value::Array(records.into_iter().map(Value::Object).collect());
    print_json(&array)
}

fn print_json(value: &Value) -> jsonbase::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
