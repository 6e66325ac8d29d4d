use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wl_core::Real;
use wl_economy::{Economy, EconomyParams, PriceVector, fingerprint};
use wl_solver::{
    EquilibriumSolver, Scenario, SolveProgressEvent, SolverConfig, SolverError, SolverResult,
};

#[derive(Parser)]
#[command(name = "wl-cli")]
#[command(about = "Walras CLI - tâtonnement equilibrium for random exchange economies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for market-clearing prices
    Solve {
        #[command(flatten)]
        params: ParamArgs,
        /// Print the result as JSON instead of progress lines
        #[arg(long)]
        json: bool,
    },
    /// Summarize the generated economy without solving
    Inspect {
        #[command(flatten)]
        params: ParamArgs,
    },
}

#[derive(Args)]
struct ParamArgs {
    /// Scenario YAML file; explicit flags override its values
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Number of agents (N)
    #[arg(long)]
    agents: Option<usize>,
    /// Number of goods (J), numeraire included
    #[arg(long)]
    goods: Option<usize>,
    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
    /// Convergence tolerance on aggregate excess demand
    #[arg(long)]
    eps: Option<Real>,
    /// Price adjustment step
    #[arg(long)]
    kappa: Option<Real>,
    /// Iteration cap
    #[arg(long)]
    max_iter: Option<usize>,
}

impl ParamArgs {
    fn resolve(&self) -> SolverResult<Scenario> {
        let base = match &self.scenario {
            Some(path) => load_scenario(path)?,
            None => Scenario::default(),
        };

        let economy = EconomyParams {
            num_agents: self.agents.unwrap_or(base.economy.num_agents),
            num_goods: self.goods.unwrap_or(base.economy.num_goods),
            seed: self.seed.unwrap_or(base.economy.seed),
        };
        let solver = SolverConfig {
            eps: self.eps.unwrap_or(base.solver.eps),
            kappa: self.kappa.unwrap_or(base.solver.kappa),
            max_iterations: self.max_iter.unwrap_or(base.solver.max_iterations),
            ..base.solver
        };

        let scenario = Scenario { economy, solver };
        scenario.validate()?;
        Ok(scenario)
    }
}

fn main() -> SolverResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { params, json } => cmd_solve(&params.resolve()?, json),
        Commands::Inspect { params } => cmd_inspect(&params.resolve()?),
    }
}

fn load_scenario(path: &Path) -> SolverResult<Scenario> {
    tracing::info!(path = %path.display(), "loading scenario");
    Scenario::load_yaml(path)
}

fn cmd_solve(scenario: &Scenario, json: bool) -> SolverResult<()> {
    let mut solver = EquilibriumSolver::from_scenario(scenario)?;

    let equilibrium = if json {
        solver.solve()?
    } else {
        println!(
            "Solving economy: N = {}, J = {}, seed = {}",
            scenario.economy.num_agents, scenario.economy.num_goods, scenario.economy.seed
        );
        solver.solve_with_progress(&mut |event| render_progress(&event))?
    };

    if json {
        let text = serde_json::to_string_pretty(&equilibrium)
            .map_err(|e| SolverError::Io(std::io::Error::other(e)))?;
        println!("{text}");
        return Ok(());
    }

    if equilibrium.converged() {
        println!("✓ Converged after {} iterations", equilibrium.iterations);
    } else {
        println!(
            "✗ Stopped at the iteration cap ({}) without converging",
            equilibrium.iterations
        );
    }
    println!("  Prices: {}", format_prices(&equilibrium.prices));
    for (i, z) in equilibrium.excess_demands.iter().enumerate() {
        println!("  Z[{i}] = {z:14.8}");
    }
    Ok(())
}

fn render_progress(event: &SolveProgressEvent) {
    match event {
        SolveProgressEvent::Iteration {
            iteration,
            prices,
            aggregate_excess,
        }
        | SolveProgressEvent::Finished {
            iteration,
            prices,
            aggregate_excess,
            ..
        } => println!(
            "{:3}: ps = {} -> excess demand -> {:14.8}",
            iteration,
            format_prices(prices),
            aggregate_excess
        ),
        SolveProgressEvent::Elided { .. } => println!("   ..."),
    }
}

fn cmd_inspect(scenario: &Scenario) -> SolverResult<()> {
    let economy = Economy::generate(scenario.economy)?;

    println!(
        "Economy: N = {}, J = {}, seed = {}",
        economy.num_agents(),
        economy.num_goods(),
        economy.params().seed
    );
    println!("  Fingerprint: {}", fingerprint(&economy));
    println!("  Initial prices: {}", format_prices(economy.initial_prices()));

    let worst_row_error = economy
        .alphas()
        .row_iter()
        .map(|row| (row.sum() - 1.0).abs())
        .fold(0.0, Real::max);
    println!("  Max |sum(alpha) - 1|: {worst_row_error:.3e}");

    println!("  Good   beta   mean endowment   mean alpha");
    for j in 0..economy.num_goods() {
        println!(
            "  {:>4}  {:5.3}  {:15.6}  {:11.6}",
            j,
            economy.betas()[j],
            economy.endowments().column(j).mean(),
            economy.alphas().column(j).mean()
        );
    }
    Ok(())
}

fn format_prices(prices: &PriceVector) -> String {
    let entries: Vec<String> = prices.iter().map(|p| format!("{p:.8}")).collect();
    format!("[{}]", entries.join(" "))
}
