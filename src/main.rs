use clap::{CommandFactory, Parser};
use geoqa::cli::{Cli, Commands};
use geoqa::commands;
use geoqa::config::Config;
use geoqa::knowledge::QaEntry;
use geoqa::matcher::MatchKind;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("geoqa=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load()?;
    let dataset = cli.dataset.unwrap_or_else(|| config.dataset_path());

    match command {
        Commands::Ask { question, explain } => {
            let found = commands::ask(&dataset, config.matcher_options(), &question)?;
            println!("{}", found.answer);

            if explain {
                let how = match found.kind {
                    MatchKind::Exact => "exact".to_string(),
                    MatchKind::Fuzzy { similarity } => format!("fuzzy (similarity {similarity:.2})"),
                    MatchKind::Keyword { score } => format!("keyword (score {score})"),
                    MatchKind::Fallback => "fallback".to_string(),
                };
                println!("match: {how}");
                if let Some(matched) = found.matched_question {
                    println!("matched question: {matched}");
                }
            }
        }
        Commands::Add {
            question,
            answer,
            category,
            difficulty,
        } => {
            let entry = commands::add(
                &dataset,
                QaEntry {
                    question,
                    answer,
                    category,
                    difficulty,
                },
            )?;
            println!("Added: {} [{}]", entry.question, entry.category);
        }
        Commands::List { category } => {
            let entries = commands::list(&dataset, category.as_deref())?;
            for entry in &entries {
                println!("[{}] {}", entry.category, entry.question);
            }
            println!("{} question(s)", entries.len());
        }
        Commands::Categories => {
            for category in commands::categories(&dataset)? {
                println!("{category}");
            }
        }
        Commands::Stats => {
            let stats = commands::stats(&dataset)?;
            println!("Dataset: {}", dataset.display());
            println!("Entries: {}", stats.total_entries);
            println!("Distinct questions: {}", stats.distinct_questions);
            for (category, count) in &stats.categories {
                println!("  {category}: {count}");
            }
        }
    }

    Ok(())
}
