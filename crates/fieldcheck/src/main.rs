use clap::{Parser, Subcommand};
use fieldcheck_lib::report::{self, EXIT_CONFIG, EXIT_STORE};
use fieldcheck_lib::{
    load_record, load_rule_spec, MemoryStore, RuleRegistry, StoreConfig, StoreError,
    ValidationEngine,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(
    name = "fieldcheck",
    about = "Rule-string driven field validation",
    version,
    long_about = "Validate a record against per-field rule strings such as \"required|max:40\".\n\nExamples:\n  fieldcheck validate --record user.json --rules rules.yml\n  fieldcheck validate --record user.json --rules rules.yml --fixtures store.json\n  fieldcheck --debug validate --record user.json --rules rules.yml --json\n  fieldcheck rules"
)]
struct Fieldcheck {
    #[command(subcommand)]
    command: Commands,

    /// Run in verbose mode with detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run in debug mode with every rule evaluation logged
    #[arg(short, long, global = true)]
    debug: bool,

    /// Log threshold (debug, info, warn, error); overrides --verbose/--debug
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<logging::LogLevel>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a record against a rule specification
    Validate {
        /// Record file (.json, .yaml or .yml)
        #[arg(long)]
        record: PathBuf,

        /// Rule specification file mapping fields to rule strings
        #[arg(long)]
        rules: PathBuf,

        /// Answer lookups from a local JSON fixture instead of DynamoDB
        #[arg(long)]
        fixtures: Option<PathBuf>,

        /// DynamoDB region (overrides FIELDCHECK_REGION)
        #[arg(long)]
        region: Option<String>,

        /// DynamoDB endpoint, e.g. DynamoDB Local (overrides FIELDCHECK_ENDPOINT)
        #[arg(long)]
        endpoint: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available rules
    Rules,
}

// Wire up the process-wide lookup store. No store is not an error here:
// only `exists`/`unique` need one, and they report it themselves.
fn init_store(
    fixtures: Option<&Path>,
    region: Option<String>,
    endpoint: Option<String>,
) -> Result<(), i32> {
    if let Some(path) = fixtures {
        let store = MemoryStore::from_fixture_file(path).map_err(|e| {
            eprintln!("Failed to load fixtures from {}: {}", path.display(), e);
            EXIT_CONFIG
        })?;
        logging::info(&format!("Using fixture store from {}", path.display()));
        return fieldcheck_lib::init_with_store(Arc::new(store)).map_err(|e| {
            eprintln!("{}", e);
            EXIT_CONFIG
        });
    }

    let mut config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(StoreError::InvalidConfig(reason)) => {
            logging::warning(&format!(
                "No lookup store configured ({}); exists/unique rules will be rejected",
                reason
            ));
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", e);
            return Err(EXIT_CONFIG);
        }
    };

    if let Some(region) = region {
        config = config.with_region(region);
    }
    if let Some(endpoint) = endpoint {
        config = config.with_endpoint(endpoint);
    }

    fieldcheck_lib::init(config).map_err(|e| {
        eprintln!("Failed to initialize lookup store: {}", e);
        EXIT_STORE
    })
}

async fn run_validate(
    record: &Path,
    rules: &Path,
    fixtures: Option<&Path>,
    region: Option<String>,
    endpoint: Option<String>,
    json: bool,
) -> i32 {
    let record = match load_record(record) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("Failed to load record {}: {}", record.display(), e);
            return EXIT_CONFIG;
        }
    };
    let rules = match load_rule_spec(rules) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("Failed to load rules {}: {}", rules.display(), e);
            return EXIT_CONFIG;
        }
    };

    if let Err(code) = init_store(fixtures, region, endpoint) {
        return code;
    }

    let outcome = if fieldcheck_lib::is_initialized() {
        fieldcheck_lib::validate(&record, &rules).await
    } else {
        ValidationEngine::default().validate(&record, &rules).await
    };

    match outcome {
        Ok(result) => {
            if json {
                match report::render_json(&result) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Failed to serialize result: {}", e);
                        return EXIT_CONFIG;
                    }
                }
            } else {
                println!("{}", report::render_text(&result).trim_end());
            }
            report::exit_code(&result)
        }
        Err(e) => {
            eprintln!("{}", e);
            report::error_exit_code(&e)
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Fieldcheck::parse();

    // Set log level based on command line flags
    if let Some(level) = cli.log_level {
        logging::set_log_level(level);
        if level == logging::LogLevel::Debug {
            logging::install_log_bridge();
        }
    } else if cli.debug {
        logging::set_log_level(logging::LogLevel::Debug);
        logging::install_log_bridge();
        logging::debug("Debug mode enabled - showing detailed logs");
    } else if cli.verbose {
        logging::set_log_level(logging::LogLevel::Info);
        logging::info("Verbose mode enabled");
    } else {
        logging::set_log_level(logging::LogLevel::Warning);
    }

    let code = match cli.command {
        Commands::Validate {
            record,
            rules,
            fixtures,
            region,
            endpoint,
            json,
        } => {
            run_validate(
                &record,
                &rules,
                fixtures.as_deref(),
                region,
                endpoint,
                json,
            )
            .await
        }
        Commands::Rules => {
            for name in RuleRegistry::with_builtins().names() {
                println!("{}", name);
            }
            0
        }
    };

    std::process::exit(code);
}
