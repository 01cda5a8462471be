mod api;
mod classify;
mod config;
mod i18n;
mod models;
mod search;
mod state;
mod tui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::sync::mpsc;

use api::{ApiClient, DEFAULT_API_URL};
use config::{Preferences, Theme};
use i18n::{Labels, Lang};
use search::Searcher;
use state::SearchState;

#[derive(Parser)]
#[command(name = "cegcheck")]
#[command(about = "Hungarian company checker - official NAV taxpayer lookup and company search")]
struct Cli {
    /// Base URL of the company-information API
    #[arg(long, global = true, env = "CEGCHECK_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a company by tax number or name and print the results
    Check {
        /// Tax number (8+ digits, hyphens and spaces allowed) or company name
        query: String,

        /// Override the configured language for this run
        #[arg(short, long)]
        lang: Option<Lang>,
    },

    /// Interactive search screen
    Tui,

    /// Show or change persisted preferences
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the current preferences
    Show,

    /// Set the display language
    Lang {
        /// hu or en
        value: Lang,
    },

    /// Set the color theme
    Theme {
        /// light or dark
        value: Theme,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut prefs = Preferences::load()?;
    let base_url = cli
        .api_url
        .or_else(|| prefs.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    match cli.command {
        Commands::Check { query, lang } => {
            let labels = lang.unwrap_or(prefs.lang).labels();
            let client = Arc::new(ApiClient::new(&base_url));
            run_check(client, labels, &query).await;
        }

        Commands::Tui => {
            let client = Arc::new(ApiClient::new(&base_url));
            tui::run(client, &prefs)?;
        }

        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                println!("lang:    {}", prefs.lang);
                println!("theme:   {}", prefs.theme);
                println!(
                    "api-url: {}",
                    prefs.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
                );
            }
            ConfigCommands::Lang { value } => {
                prefs.lang = value;
                prefs.save()?;
                println!("Language set to {}", value);
            }
            ConfigCommands::Theme { value } => {
                prefs.theme = value;
                prefs.save()?;
                println!("Theme set to {}", value);
            }
        },
    }

    Ok(())
}

/// One-shot lookup: submit once, wait for both slices, print everything.
async fn run_check(client: Arc<ApiClient>, labels: &'static Labels, query: &str) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut searcher = Searcher::new(client, tx);

    let Some(submitted) = searcher.submit(query) else {
        eprintln!("Query too short - enter at least 2 characters.");
        return;
    };

    let mut state = SearchState::default();
    state.begin(submitted);

    if state.nav_pending() {
        eprintln!("{}", labels.nav_querying);
    }

    while state.searching() {
        match rx.recv().await {
            Some(update) => {
                state.apply(update);
            }
            None => break,
        }
    }

    print_results(&state, labels);
}

fn print_results(state: &SearchState, labels: &Labels) {
    if let Some(nav) = state.nav_result() {
        println!("=== {} ===", labels.nav_official_header);
        if let Some(name) = &nav.taxpayer_name {
            println!("{}", name);
        }
        if let Some(short) = nav.distinct_short_name() {
            println!("({})", short);
        }
        if let Some(detail) = &nav.tax_number_detail {
            println!("{}: {}", labels.label_tax_number, detail.formatted());
            if let Some(vat) = detail.is_vat_payer() {
                let answer = if vat { labels.vat_yes } else { labels.vat_no };
                println!("{}: {}", labels.label_vat_payer, answer);
            }
        }
        if let Some(address) = &nav.taxpayer_address_formatted {
            println!("{}: {}", labels.label_seat, address);
        }
        if let Some(inc) = &nav.incorporation {
            println!("{}: {}", labels.label_type, labels.incorporation(inc));
        }
        println!();
    }

    if let Some(err) = state.nav_error() {
        println!("! {}", err.message(labels));
        println!();
    }

    let companies = state.db_results();
    if !companies.is_empty() {
        println!("{}:", labels.local_db_results);
        println!(
            "{:<8} {:<36} {:<14} {:<12} {}",
            "ID", "NAME", "STATUS", "FORM", "SEAT"
        );
        println!("{}", "-".repeat(90));
        for c in companies {
            println!(
                "{:<8} {:<36} {:<14} {:<12} {}",
                c.id,
                truncate(&c.name, 34),
                truncate(&c.status, 12),
                truncate(c.legal_form.as_deref().unwrap_or("-"), 10),
                c.registered_seat.as_deref().unwrap_or("-"),
            );
        }
    }

    if state.no_results() {
        println!("{}", labels.no_results_title);
        println!("{}", labels.no_results_desc);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
