use clap::{Parser, Subcommand};
use rf_config::{ConfigError, EngineConfig, FluidModelDef};
use rf_core::timing::{self, closure_timing};
use rf_core::units::k;
use rf_fluids::{BalancePolicy, FluidError, FluidModel, SpeciesComposition, build_fluid_model};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Property evaluation failed: {0}")]
    Fluid(#[from] FluidError),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "rf-cli")]
#[command(about = "ReactFlow CLI - reacting-mixture property closure", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an engine configuration file
    Validate {
        /// Path to the configuration (YAML or JSON)
        config_path: PathBuf,
    },
    /// Evaluate the full closure at a temperature and composition
    State {
        /// Path to the configuration (YAML or JSON)
        config_path: PathBuf,
        /// Temperature in kelvin
        #[arg(long)]
        temperature: f64,
        /// Transported mass fractions, comma separated (all but the balance species)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        fractions: Vec<f64>,
    },
    /// Recover temperature from specific enthalpy
    Invert {
        /// Path to the configuration (YAML or JSON)
        config_path: PathBuf,
        /// Specific enthalpy in J/kg
        #[arg(long, allow_hyphen_values = true)]
        enthalpy: f64,
        /// Transported mass fractions, comma separated (all but the balance species)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        fractions: Vec<f64>,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing (honours RUST_LOG)
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::State {
            config_path,
            temperature,
            fractions,
        } => cmd_state(&config_path, temperature, &fractions),
        Commands::Invert {
            config_path,
            enthalpy,
            fractions,
        } => cmd_invert(&config_path, enthalpy, &fractions),
    }
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let config = rf_config::load(config_path)?;
    // Construction resolves the mechanism and species as well.
    build_fluid_model(&config)?;
    println!("✓ Configuration is valid");
    print_config_summary(&config);
    Ok(())
}

fn cmd_state(config_path: &Path, temperature: f64, fractions: &[f64]) -> CliResult<()> {
    let config = rf_config::load(config_path)?;
    let mut model = build_fluid_model(&config)?;

    model.set_state(k(temperature), fractions)?;

    println!("Model: {} ({})", config.name, model.name());
    print_composition(model.species(), fractions)?;
    println!("  {}", model.thermo().summary());
    println!("  Viscosity:        {:.6e} Pa·s", model.viscosity().value);
    println!("  Conductivity:     {:.6e} W/(m·K)", model.conductivity());
    println!("  Heat release:     {:.6e} W/m³", model.heat_release());

    println!("  Species           D [m²/s]        ω̇ [kg/(m³·s)]");
    for ((name, d), w) in model
        .species()
        .iter()
        .zip(model.mass_diffusivity())
        .zip(model.source_terms())
    {
        println!("    {:<14} {:>14.6e}  {:>14.6e}", name, d, w);
    }

    let enthalpy_diff = model.enthalpy_diffusivity()?;
    let grad_diff = model.grad_enthalpy_diffusivity()?;
    if !enthalpy_diff.is_empty() {
        println!("  Enthalpy diffusion (value, gradient):");
        for ((name, v), g) in model.species().iter().zip(&enthalpy_diff).zip(&grad_diff) {
            println!("    {:<14} {:>14.6e}  {:>14.6e}", name, v, g);
        }
    }

    print_timing_summary();
    Ok(())
}

fn cmd_invert(config_path: &Path, enthalpy: f64, fractions: &[f64]) -> CliResult<()> {
    let config = rf_config::load(config_path)?;
    let mut model = build_fluid_model(&config)?;

    let solution = model.temperature_from_enthalpy(enthalpy, fractions)?;

    println!("Model: {} ({})", config.name, model.name());
    print_composition(model.species(), fractions)?;
    println!("  Enthalpy:    {:.6e} J/kg", enthalpy);
    println!("  Temperature: {:.6} K", solution.temperature.value);
    println!("  Iterations:  {}", solution.iterations);
    println!("  Outcome:     {:?}", solution.outcome);

    print_timing_summary();
    Ok(())
}

fn print_composition(species: &[String], fractions: &[f64]) -> CliResult<()> {
    let composition =
        SpeciesComposition::from_transported(species.to_vec(), fractions, BalancePolicy::Propagate)?;
    println!("  Composition: {}", composition);
    Ok(())
}

fn print_config_summary(config: &EngineConfig) {
    match &config.model {
        FluidModelDef::ReactingMixture(def) => {
            println!("  Reacting mixture on mechanism '{}'", def.mechanism);
            println!(
                "  {} species (balance: {}), transport: {}",
                def.species.len(),
                def.species.last().map(String::as_str).unwrap_or("-"),
                def.transport_model.key()
            );
            println!("  Operating pressure: {} Pa", def.operating_pressure_pa);
        }
        FluidModelDef::IdealGas(def) => {
            println!(
                "  Ideal gas: R = {} J/(kg·K), cp = {} J/(kg·K)",
                def.gas_constant, def.cp
            );
            println!("  Operating pressure: {} Pa", def.operating_pressure_pa);
        }
    }
}

fn print_timing_summary() {
    if timing::is_enabled() {
        println!("\n{}", closure_timing::summary());
    }
}
