mod check;
mod config;
mod error;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use acl::{Access, AccessControl, Catalog, DerivedPredicate, EntityType, Permission, Role};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use check::{CheckRequest, load_identity, run_check};
use config::Config;
use error::Result;

const CONFIG_FILE: &str = "aclctl.toml";

#[derive(Parser)]
#[command(name = "aclctl")]
#[command(about = "Inspect and evaluate back-office access control", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./aclctl.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List roles with their labels
    Roles,
    /// List permissions, or the default permissions of one role
    Permissions {
        /// Show the catalog defaults for this role
        #[arg(short, long)]
        role: Option<Role>,
    },
    /// Evaluate access for an identity snapshot
    Check {
        /// Identity snapshot (JSON: role, permissions, entity_type)
        #[arg(short, long)]
        identity: PathBuf,
        /// Required permission (repeatable, all must be held)
        #[arg(short, long = "permission")]
        permissions: Vec<Permission>,
        /// Require any one of the permissions instead of all
        #[arg(long)]
        any: bool,
        /// Accepted role (repeatable, any one matches)
        #[arg(short, long = "role")]
        roles: Vec<Role>,
        /// Accepted entity type (repeatable, any one matches)
        #[arg(short, long = "entity-type")]
        entity_types: Vec<EntityType>,
    },
    /// Show every derived predicate for an identity snapshot
    Predicates {
        /// Identity snapshot (JSON: role, permissions, entity_type)
        #[arg(short, long)]
        identity: PathBuf,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.log.level);
    let catalog = config.catalog()?;

    match cli.command {
        Commands::Roles => cmd_roles(&catalog),
        Commands::Permissions { role } => cmd_permissions(&catalog, role),
        Commands::Check {
            identity,
            permissions,
            any,
            roles,
            entity_types,
        } => {
            let request = CheckRequest {
                permissions,
                any,
                roles,
                entity_types,
            };
            return cmd_check(&catalog, &identity, &request);
        }
        Commands::Predicates { identity } => cmd_predicates(&catalog, &identity)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_roles(catalog: &Catalog) {
    println!("{:<20}  {:<26}  PERMISSIONS", "ROLE", "LABEL");
    println!("{}", "-".repeat(60));

    for (role, definition) in catalog.roles() {
        println!(
            "{:<20}  {:<26}  {}",
            role,
            definition.label,
            definition.permissions.len()
        );
    }
}

fn cmd_permissions(catalog: &Catalog, role: Option<Role>) {
    let permissions = match role {
        Some(role) => {
            let defaults = catalog.default_permissions(role);
            println!("{} ({role}): {} permissions\n", catalog.role_label(role), defaults.len());
            defaults.sorted()
        }
        None => Permission::ALL.to_vec(),
    };

    if permissions.is_empty() {
        println!("No permissions.");
        return;
    }

    for permission in permissions {
        println!(
            "{:<28}  {}",
            permission,
            catalog.permission_label(permission)
        );
    }
}

fn cmd_check(catalog: &Catalog, path: &Path, request: &CheckRequest) -> Result<ExitCode> {
    let verdict = run_check(catalog, path, request)?;
    println!("{}", verdict.as_str());
    Ok(ExitCode::from(verdict.exit_code()))
}

fn cmd_predicates(catalog: &Catalog, path: &Path) -> Result<()> {
    let access = AccessControl::with_identity(load_identity(path, catalog)?);

    let role = access
        .role()
        .map(|r| format!("{r} ({})", catalog.role_label(r)))
        .unwrap_or_else(|| "none".to_string());
    let entity_type = access
        .entity_type()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "none".to_string());
    println!("Role: {role}");
    println!("Entity type: {entity_type}\n");

    for predicate in DerivedPredicate::ALL {
        let roles: Vec<_> = predicate.roles().iter().map(|r| r.as_str()).collect();
        println!(
            "{:<20}  {:<5}  [{}]",
            predicate,
            access.is(*predicate),
            roles.join(", ")
        );
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None if Path::new(CONFIG_FILE).exists() => Ok(Config::load(CONFIG_FILE)?),
        None => Ok(Config::default()),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
