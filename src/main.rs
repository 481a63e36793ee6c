use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info, warn};

use support_finder::config::Config;
use support_finder::questionnaire::Questionnaire;
use support_finder::screens::{help_message, ScreenId};
use support_finder::taxonomy::SectionContent;
use support_finder::{metrics, Action, Dataset, FinderError, Organisation, SelectedKeywords, Taxonomy};

#[derive(Parser)]
#[command(name = "support_finder")]
#[command(about = "Find support organisations by category, demographic and region")]
#[command(version = "0.1.0")]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Print a Prometheus snapshot of selection/filter metrics before exiting
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the directory by keywords (all must match)
    Filter {
        /// Keywords such as "Dakar" or "Health"
        keywords: Vec<String>,
        /// Print matching records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply checkbox actions (+Health, -Women, +Health/Disease) then filter
    Select {
        /// Keywords already selected before the actions run
        #[arg(long = "from", value_delimiter = ',')]
        initial: Vec<String>,
        /// Print matching records as JSON
        #[arg(long)]
        json: bool,
        #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
        actions: Vec<String>,
    },
    /// Show the filter sections with checkbox state for a selection
    Taxonomy {
        /// Selected keywords (comma-separated)
        #[arg(long, value_delimiter = ',')]
        selected: Vec<String>,
    },
    /// Show the header title and help text for a screen route
    Help {
        /// Route name, e.g. LocationScreen
        route: String,
    },
    /// Walk through the questionnaire on stdin, then list matching organisations
    Survey,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenv::dotenv().ok();
    let loaded = Config::load();
    let log_dir = match &loaded {
        Ok(config) => config.logging.dir.clone(),
        Err(_) => Config::default().logging_dir_with_env(),
    };
    let _log_guard = support_finder::logging::init_logging(&log_dir);

    let config = loaded
        .map_err(|e| {
            error!("Failed to load configuration: {}", e);
            e
        })
        .context("loading configuration")?;
    match &config.source {
        Some(path) => debug!(path = %path.display(), "Loaded configuration file"),
        None => debug!("No config file found, using defaults"),
    }

    if cli.print_metrics {
        metrics::init_metrics();
    }

    let taxonomy = config.load_taxonomy().context("loading taxonomy")?;
    let keyword_filter = config.keyword_filter()?;

    match cli.command {
        Commands::Filter { keywords, json } => {
            let dataset = load_dataset(&config)?;
            let results = keyword_filter.apply(dataset.organisations(), &keywords);
            print_results(&results, json)?;
        }
        Commands::Select { initial, json, actions } => {
            let mut selection: SelectedKeywords = initial.into_iter().collect();
            for input in &actions {
                let action = Action::parse(input, &taxonomy)?;
                selection = selection.apply(&taxonomy, &action);
            }
            println!("Selected: {}", selection);

            let dataset = load_dataset(&config)?;
            let results = keyword_filter.apply(dataset.organisations(), selection.iter());
            print_results(&results, json)?;
        }
        Commands::Taxonomy { selected } => {
            let selection: SelectedKeywords = selected.into_iter().collect();
            print_taxonomy(&taxonomy, &selection);
        }
        Commands::Help { route } => {
            let screen = ScreenId::from_route_name(&route);
            if screen.is_none() {
                warn!(%route, "Unknown route, showing fallback help");
            }
            if let Some(screen) = screen {
                println!("{}", screen.header_title());
            }
            println!("{}", help_message(screen));
        }
        Commands::Survey => {
            let selection = run_survey(&taxonomy)?;
            println!("Selected: {}", selection);

            let dataset = load_dataset(&config)?;
            let results = keyword_filter.apply(dataset.organisations(), selection.iter());
            print_results(&results, false)?;
        }
    }

    if cli.print_metrics {
        match metrics::render() {
            Some(snapshot) => println!("\n{}", snapshot),
            None => warn!("Metrics recorder not installed, nothing to print"),
        }
    }
    Ok(())
}

fn load_dataset(config: &Config) -> Result<Dataset> {
    Dataset::load(&config.dataset.path)
        .with_context(|| format!("loading dataset from {}", config.dataset.path.display()))
}

fn print_results(results: &[&Organisation], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    println!("\n{} organisation(s) found", results.len());
    for org in results {
        let category = org.main_category.as_deref().unwrap_or("-");
        let region = org.region.as_deref().unwrap_or("-");
        println!("   - {} ({}, {})", org.display_name(), category, region);
    }
    Ok(())
}

fn print_taxonomy(taxonomy: &Taxonomy, selection: &SelectedKeywords) {
    let mark = |checked: bool| if checked { "[x]" } else { "[ ]" };

    for section in &taxonomy.sections {
        println!("{}", section.title);
        match &section.content {
            SectionContent::Categories { categories } => {
                for category in categories {
                    println!("   {} {}", mark(selection.is_main_checked(category)), category.title);
                    for child in &category.children {
                        let checked = selection.is_sub_checked(category, child);
                        println!("      {} {}", mark(checked), child);
                    }
                }
            }
            SectionContent::Keywords { keywords } => {
                for keyword in keywords {
                    println!("   {} {}", mark(selection.contains(keyword)), keyword);
                }
            }
        }
    }
}

fn run_survey(taxonomy: &Taxonomy) -> Result<SelectedKeywords> {
    let questionnaire = Questionnaire::from_taxonomy(taxonomy);
    let mut session = questionnaire.start();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(step) = session.current_step() {
        println!("\n{}", step.screen.header_title());
        for (index, option) in step.options.iter().enumerate() {
            println!("   {}. {}", index + 1, option);
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            anyhow::bail!("questionnaire aborted before completion");
        };
        let line = line?;

        if let Ok(choice) = line.trim().parse::<usize>() {
            if choice >= 1 {
                if let Err(e) = session.select(choice - 1) {
                    println!("{}", e);
                    continue;
                }
            }
        }

        match session.advance() {
            Ok(()) => {}
            Err(FinderError::NoOptionSelected { message, .. }) => println!("Info: {}", message),
            Err(e) => return Err(e.into()),
        }
    }

    info!(answers = session.answers().len(), "Survey finished");
    Ok(session.into_selection())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_hyphen_prefixed_actions_are_positional() {
        let cli = Cli::try_parse_from(["support_finder", "select", "-Women", "+Health/Disease"]).unwrap();

        match cli.command {
            Commands::Select { initial, json, actions } => {
                assert!(initial.is_empty());
                assert!(!json);
                assert_eq!(actions, vec!["-Women", "+Health/Disease"]);
            }
            _ => panic!("expected select"),
        }
    }

    #[test]
    fn test_help_subcommand_takes_route() {
        let cli = Cli::try_parse_from(["support_finder", "help", "LocationScreen"]).unwrap();
        assert!(matches!(cli.command, Commands::Help { route } if route == "LocationScreen"));
    }

    #[test]
    fn test_select_with_initial_keywords() {
        let cli = Cli::try_parse_from([
            "support_finder",
            "--print-metrics",
            "select",
            "--from",
            "Dakar,Women",
            "+Legal",
        ])
        .unwrap();

        assert!(cli.print_metrics);
        match cli.command {
            Commands::Select { initial, actions, .. } => {
                assert_eq!(initial, vec!["Dakar", "Women"]);
                assert_eq!(actions, vec!["+Legal"]);
            }
            _ => panic!("expected select"),
        }
    }
}
