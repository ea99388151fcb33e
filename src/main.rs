//! Staffing cost calculator
//!
//! Estimates what a team costs in different countries and proposes
//! alternative geographic staffing mixes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rusqlite::Connection;

use staffing_calculator::allocation::{parse_allocation, price_allocation};
use staffing_calculator::calculator::compare_locations;
use staffing_calculator::scenarios::ScenarioReport;
use staffing_calculator::{
    EmploymentType, Policy, ReferenceCatalog, StaffingRequest, analyze, calculate_employee_cost, db,
    logging,
};

#[derive(Parser)]
#[command(name = "staffing-calculator")]
#[command(about = "Workforce cost calculator and geographic staffing scenario planner")]
struct Cli {
    /// SQLite catalog file; the built-in catalog is used when omitted
    #[arg(short, long, env = "STAFFING_DB")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate staffing scenarios and insights for a role
    Calc {
        /// Job role ID (e.g., "software-engineer")
        role: String,

        /// Primary location ID (e.g., "usa")
        location: String,

        /// Number of people to staff
        headcount: u32,

        /// Optimization policy: cost-focused, balanced or quality-focused
        #[arg(short, long, default_value = "balanced")]
        policy: Policy,

        /// Employment type for the cost breakdown: employee or contractor
        #[arg(short, long, default_value = "employee")]
        employment_type: EmploymentType,

        /// Also show the cost breakdown and the per-location comparison
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the cost breakdown for a role at one location
    Cost {
        role: String,
        location: String,

        #[arg(short = 'n', long, default_value = "1")]
        headcount: u32,

        #[arg(short, long, default_value = "employee")]
        employment_type: EmploymentType,
    },

    /// Compare the per-head cost of a role across all locations
    Compare {
        role: String,

        #[arg(short, long, default_value = "employee")]
        employment_type: EmploymentType,
    },

    /// Price a custom split (e.g., "india=60,poland=40") against the current location
    Custom {
        role: String,

        /// Current (baseline) location ID
        location: String,

        headcount: u32,

        /// Comma-separated location=percent pairs
        allocation: String,
    },

    /// List all job roles in the catalog
    ListRoles,

    /// List all locations in the catalog
    ListLocations,

    /// Initialize empty database with schema
    Init,

    /// Write the built-in catalog into the database
    LoadSample,
}

fn open_database(path: Option<&Path>) -> Result<Connection> {
    let Some(path) = path else {
        bail!("this command needs a catalog file; pass --database <PATH>");
    };
    let conn = Connection::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    db::init_schema(&conn)?;
    Ok(conn)
}

fn load_catalog(path: Option<&Path>) -> Result<ReferenceCatalog> {
    match path {
        Some(_) => {
            let conn = open_database(path)?;
            db::load_catalog(&conn)
        }
        None => Ok(ReferenceCatalog::builtin()),
    }
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            open_database(cli.database.as_deref())?;
            if let Some(path) = &cli.database {
                println!("Database initialized at: {}", path.display());
            }
        }

        Commands::LoadSample => {
            let mut conn = open_database(cli.database.as_deref())?;
            let catalog = ReferenceCatalog::builtin();
            db::store_catalog(&mut conn, &catalog)?;
            println!(
                "Loaded {} roles and {} locations",
                catalog.roles().len(),
                catalog.locations().len()
            );
        }

        Commands::Calc {
            role,
            location,
            headcount,
            policy,
            employment_type,
            verbose,
        } => {
            let catalog = load_catalog(cli.database.as_deref())?;
            let request = StaffingRequest {
                role_id: role,
                location_id: location,
                headcount,
                policy,
                employment_type,
            };
            let analysis = analyze(&catalog, &request)?;

            println!(
                "{} x{} from {} ({} policy)\n",
                catalog.role_name(&request.role_id),
                request.headcount,
                catalog.location_name(&request.location_id),
                request.policy
            );
            for scenario in analysis.scenarios.values() {
                println!("{}", ScenarioReport { scenario, catalog: &catalog });
            }

            println!("{}", analysis.summary);
            println!("Insights:");
            for insight in &analysis.insights {
                println!("{}\n", insight);
            }

            if verbose {
                println!(
                    "=== Cost per head at {} ({}) ===",
                    catalog.location_name(&request.location_id),
                    request.employment_type
                );
                println!("{}\n", analysis.breakdown);
                println!("{}", analysis.comparison);
            }
        }

        Commands::Cost {
            role,
            location,
            headcount,
            employment_type,
        } => {
            let catalog = load_catalog(cli.database.as_deref())?;
            let cost = calculate_employee_cost(&catalog, &role, &location, headcount, employment_type)?;
            println!(
                "{} in {} ({})",
                catalog.role_name(&role),
                catalog.location_name(&location),
                employment_type
            );
            println!("{}", cost);
        }

        Commands::Compare { role, employment_type } => {
            let catalog = load_catalog(cli.database.as_deref())?;
            let comparison = compare_locations(&catalog, &role, employment_type)?;
            print!("{}", comparison);
        }

        Commands::Custom {
            role,
            location,
            headcount,
            allocation,
        } => {
            let catalog = load_catalog(cli.database.as_deref())?;
            let shares = parse_allocation(&allocation)?;

            // Baseline is the current strategy: everyone at the given location
            let baseline =
                calculate_employee_cost(&catalog, &role, &location, headcount, EmploymentType::Employee)?
                    .total_annual_cost;

            let total_percent: u32 = shares.iter().map(|s| s.percent).sum();
            if total_percent != 100 {
                println!("Note: shares add up to {}%, not 100%\n", total_percent);
            }

            let result = price_allocation(&catalog, &role, headcount, &shares, baseline)?;
            print!("{}", result);
        }

        Commands::ListRoles => {
            let catalog = load_catalog(cli.database.as_deref())?;
            println!("{:<20} {:<20} {:>10} {:>12}", "ID", "Role", "Multiplier", "Base salary");
            println!("{}", "-".repeat(65));
            for role in catalog.roles() {
                let salary = catalog.base_salary(&role.id)?;
                println!(
                    "{:<20} {:<20} {:>10.2} {:>12.0}",
                    role.id, role.name, role.cost_multiplier, salary
                );
            }
        }

        Commands::ListLocations => {
            let catalog = load_catalog(cli.database.as_deref())?;
            println!(
                "{:<14} {:<14} {:>10} {:>8} {:>9} {:>8}",
                "ID", "Location", "Cost idx", "Social", "Benefits", "Premium"
            );
            println!("{}", "-".repeat(68));
            for loc in catalog.locations() {
                println!(
                    "{:<14} {:<14} {:>10.2} {:>8.2} {:>9.2} {:>8.2}",
                    loc.id,
                    loc.name,
                    loc.cost_index,
                    loc.social_charge_rate,
                    loc.benefits_rate,
                    loc.contractor_premium
                );
            }
        }
    }

    Ok(())
}
