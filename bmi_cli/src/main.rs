use bmi_core::*;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

mod server;
mod session;

#[derive(Parser)]
#[command(name = "bmi")]
#[command(about = "Body Mass Index calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Load configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute BMI, category and healthy weight range (default)
    Calc {
        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,

        /// Height in centimetres
        #[arg(long)]
        height: Option<f64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Solve for one variable from the other two
    Solve {
        /// Variable to solve for (weight, height, bmi)
        #[arg(long = "for")]
        target: Variable,

        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,

        /// Height in centimetres
        #[arg(long)]
        height: Option<f64>,

        /// Body Mass Index
        #[arg(long)]
        bmi: Option<f64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session reading edit commands from stdin
    Session,

    /// Show or toggle dark mode
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Serve the health endpoint
    Serve {
        /// Address to listen on (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum ThemeAction {
    /// Print the active theme (default)
    Show,
    /// Flip dark mode and remember the choice
    Toggle,
}

fn main() -> Result<()> {
    bmi_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?.with_env_overrides(),
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Some(Commands::Calc {
            weight,
            height,
            json,
        }) => cmd_calc(&config, &data_dir, weight, height, json),
        Some(Commands::Solve {
            target,
            weight,
            height,
            bmi,
            json,
        }) => cmd_solve(&config, &data_dir, target, weight, height, bmi, json),
        Some(Commands::Session) => {
            let theme = load_theme(&config, &data_dir);
            let stdin = io::stdin();
            session::run(
                Calculator::from_config(&config),
                theme,
                stdin.lock(),
                io::stdout(),
            )
        }
        Some(Commands::Theme { action }) => {
            cmd_theme(&config, &data_dir, action.unwrap_or(ThemeAction::Show))
        }
        Some(Commands::Serve { bind }) => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            cmd_serve(&config, &bind)
        }
        None => cmd_calc(&config, &data_dir, None, None, false),
    }
}

fn cmd_calc(
    config: &Config,
    data_dir: &Path,
    weight: Option<f64>,
    height: Option<f64>,
    json: bool,
) -> Result<()> {
    let mut calc = Calculator::from_config(config);
    calc.select_target(Variable::Bmi);

    if let Some(weight) = weight {
        calc.slide(Variable::Weight, weight)?;
    }
    if let Some(height) = height {
        calc.slide(Variable::Height, height)?;
    }

    report(calc.state(), load_theme(config, data_dir), json);
    Ok(())
}

fn cmd_solve(
    config: &Config,
    data_dir: &Path,
    target: Variable,
    weight: Option<f64>,
    height: Option<f64>,
    bmi: Option<f64>,
    json: bool,
) -> Result<()> {
    let mut calc = Calculator::from_config(config);
    calc.select_target(target);

    for (field, value) in [
        (Variable::Weight, weight),
        (Variable::Height, height),
        (Variable::Bmi, bmi),
    ] {
        if let Some(value) = value {
            calc.slide(field, value)?;
        }
    }

    report(calc.state(), load_theme(config, data_dir), json);
    Ok(())
}

fn cmd_theme(config: &Config, data_dir: &Path, action: ThemeAction) -> Result<()> {
    let path = Preferences::path_in(data_dir);
    let prefs = match action {
        ThemeAction::Show => Preferences::load(&path)?,
        ThemeAction::Toggle => {
            Preferences::toggle_dark_mode(&path, config.appearance.prefer_dark)?
        }
    };

    let theme = prefs.theme(config.appearance.prefer_dark);
    let source = if prefs.dark_mode.is_some() {
        "saved preference"
    } else {
        "system preference"
    };
    println!("Theme: {} ({})", theme.name(), source);
    Ok(())
}

fn cmd_serve(config: &Config, bind: &str) -> Result<()> {
    let monitor = HealthMonitor::new(&config.app);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(bind, monitor))
}

fn load_theme(config: &Config, data_dir: &Path) -> Theme {
    match Preferences::load(&Preferences::path_in(data_dir)) {
        Ok(prefs) => prefs.theme(config.appearance.prefer_dark),
        Err(e) => {
            tracing::warn!("Failed to load preferences: {}", e);
            Theme::from_dark(config.appearance.prefer_dark)
        }
    }
}

fn report(state: &Measurement, theme: Theme, as_json: bool) {
    if as_json {
        let category = state.category();
        let range = state.healthy_weight_range();
        let value = json!({
            "weight": state.weight,
            "height": state.height,
            "bmi": state.bmi,
            "target": state.target,
            "category": category,
            "category_name": category.name(),
            "category_range": category.range_label(),
            "healthy_weight": { "min": range.min, "max": range.max },
        });
        println!("{}", value);
    } else {
        display_state(state, theme, io::stdout().is_terminal());
    }
}

fn display_state(state: &Measurement, theme: Theme, color: bool) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  BMI CALCULATOR");
    println!("╰─────────────────────────────────────────╯");
    println!();
    for variable in Variable::ALL {
        println!("  {}", session::field_line(state, variable));
    }
    println!();

    let category = state.category();
    let name = if color {
        theme.paint(category)
    } else {
        category.name().to_string()
    };
    println!("  Category: {} ({})", name, category.range_label());

    let range = state.healthy_weight_range();
    println!(
        "  Healthy weight: {:.1} - {:.1} kg",
        range.min, range.max
    );
    println!();
}
