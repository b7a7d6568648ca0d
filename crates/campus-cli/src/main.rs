use std::path::PathBuf;

use campus_cli::report::{self, CheckResult};
use campus_config::AuthzConfig;
use campus_core::{PermissionRegistry, Role};
use campus_observability::init_console_logging;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "campus-cli")]
#[command(about = "Campus CLI - Inspect and audit the role permission matrix", long_about = None)]
struct Cli {
    /// JSON permission table to use instead of PERMISSION_TABLE_PATH or the built-in table
    #[arg(short = 't', long, global = true)]
    table: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List roles with their permission counts
    Roles,
    /// List permissions, for one role or the whole catalogue
    Permissions {
        /// Role identifier (e.g. "teacher")
        #[arg(short = 'r', long)]
        role: Option<String>,
    },
    /// Check whether a role holds a permission (exit 0 granted, 1 denied, 2 unknown)
    Check {
        /// Role identifier
        role: String,
        /// Permission identifier (e.g. "gradebook:view")
        permission: String,
    },
    /// Validate the table and report permissions held only by super-admin
    Audit,
    /// Print the table as JSON, in the format PERMISSION_TABLE_PATH accepts
    Export {
        /// Pretty-print the JSON
        #[arg(short = 'p', long)]
        pretty: bool,
    },
}

fn main() {
    dotenv().ok();
    init_console_logging("warn");

    let cli = Cli::parse();

    let mut config = AuthzConfig::from_env();
    if let Some(path) = cli.table {
        config.table_path = Some(path);
    }

    let registry = match config.build_registry() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("❌ Invalid permission table: {}", e);
            std::process::exit(2);
        }
    };

    match cli.command {
        Commands::Roles => print!("{}", report::roles_report(&registry)),
        Commands::Permissions { role } => handle_permissions(&registry, role),
        Commands::Check { role, permission } => handle_check(&registry, &role, &permission),
        Commands::Audit => handle_audit(&registry, &config),
        Commands::Export { pretty } => match report::export(&registry, pretty) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("❌ Failed to export table: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn handle_permissions(registry: &PermissionRegistry, role: Option<String>) {
    let role = match role.map(|r| r.parse::<Role>()).transpose() {
        Ok(role) => role,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };

    print!("{}", report::permissions_report(registry, role));
}

fn handle_check(registry: &PermissionRegistry, role: &str, permission: &str) {
    let result = report::check(registry, role, permission);
    match &result {
        CheckResult::Granted => println!("granted"),
        CheckResult::Denied => println!("denied"),
        CheckResult::Invalid(e) => eprintln!("❌ {}", e),
    }
    std::process::exit(result.exit_code());
}

fn handle_audit(registry: &PermissionRegistry, config: &AuthzConfig) {
    match &config.table_path {
        Some(path) => println!("✅ Table {} is valid", path.display()),
        None => println!("✅ Built-in table is valid"),
    }
    print!("{}", report::audit(registry));
}
