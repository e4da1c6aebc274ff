use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use issue_triage::catalog;
use issue_triage::prelude::*;
use issue_triage::view::parse_selector;
use issue_triage::{Lexicon, Page};
use std::path::PathBuf;

/// Theme and priority triage over a batch of GitHub issues
#[derive(Parser, Debug)]
#[command(name = "issue-triage")]
#[command(about = "Classify, filter and rank a batch of GitHub issues")]
#[command(version)]
struct Args {
    /// Issue batch, JSON array or JSON Lines (default: ISSUE_TRIAGE_DATA env var, or data/issues.jsonl)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// YAML lexicon overriding the built-in keywords
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(clap::Args, Debug)]
struct IssuesArgs {
    /// Case-insensitive match against title, summary, author or number
    #[arg(short, long, default_value = "")]
    search: String,

    /// Theme id, or "all"
    #[arg(long, default_value = "all")]
    theme: String,

    /// P0, P1, P2, or "all"
    #[arg(long, default_value = "all")]
    priority: String,

    /// open, closed, or "all"
    #[arg(long, default_value = "all")]
    state: String,

    /// number, title, theme, priority, state or createdAt
    #[arg(long, default_value = "number")]
    sort: String,

    /// Sort order: ASC or DESC
    #[arg(long, default_value = "DESC", value_parser = ["ASC", "DESC"])]
    order: String,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page
    #[arg(long, default_value_t = issue_triage::PAGE_SIZE)]
    page_size: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one page of the issue table
    Issues(IssuesArgs),

    /// Print headline counts
    Summary,

    /// Print the theme catalog with live classified counts
    Themes,

    /// Print the curated top-issue ranking
    Top,

    /// Print the user stories
    Stories,

    /// Classify a single title and summary
    Classify {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        summary: String,
    },
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  issues    Show one page of the issue table");
    println!("  summary   Print headline counts");
    println!("  themes    Print the theme catalog with live classified counts");
    println!("  top       Print the curated top-issue ranking");
    println!("  stories   Print the user stories");
    println!("  classify  Classify a single title and summary");
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn get_data_path(data: Option<PathBuf>) -> PathBuf {
    // Flag first, then environment variable, then default
    data.or_else(|| std::env::var("ISSUE_TRIAGE_DATA").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data").join("issues.jsonl"))
}

fn load_dashboard(args: &Args, page_size: usize) -> anyhow::Result<Dashboard> {
    let data_path = get_data_path(args.data.clone());
    let mut builder = ConfigBuilder::new(&data_path).page_size(page_size);
    if let Some(lexicon) = &args.lexicon {
        builder = builder.lexicon_path(lexicon);
    }
    let config = builder.build()?;

    Dashboard::from_config(&config)
        .with_context(|| format!("Failed to load issues from {}", data_path.display()))
}

fn load_lexicon(args: &Args) -> anyhow::Result<Lexicon> {
    match &args.lexicon {
        Some(path) => Lexicon::load(path)
            .with_context(|| format!("Failed to load lexicon {}", path.display())),
        None => Ok(Lexicon::default()),
    }
}

fn print_table(page: &Page<'_>) {
    for row in &page.rows {
        let marker = if row.pinned { "*" } else { " " };
        println!(
            "{}{:>6}  {}  {:<6}  {:<20}  {}",
            marker, row.issue.number, row.issue.priority, row.issue.state, row.issue.theme, row.issue.title
        );
        if row.divider_after {
            println!("{}", "-".repeat(72));
        }
    }
    println!(
        "Page {} of {} ({} issues)",
        if page.total_pages == 0 { 0 } else { page.page + 1 },
        page.total_pages,
        page.total_matches
    );
}

fn run_issues_command(args: &Args, issues: &IssuesArgs) -> anyhow::Result<()> {
    let IssuesArgs {
        search,
        theme,
        priority,
        state,
        sort,
        order,
        page,
        page_size,
        format,
    } = issues;

    let mut view = ViewState::new();
    view.set_search(search.as_str());
    view.set_theme(parse_selector(theme)?);
    view.set_priority(parse_selector(priority)?);
    view.set_state(parse_selector(state)?);
    view.set_sort(sort.parse()?, SortOrder::from(order.as_str()));

    // Out-of-range pages clamp to the last page
    let view = view.with_page(page.saturating_sub(1));

    let dashboard = load_dashboard(args, *page_size)?;
    let page = dashboard.page(&view);
    match format {
        OutputFormat::Json => {
            for row in &page.rows {
                println!("{}", serde_json::to_string(row)?);
            }
        }
        OutputFormat::Table => print_table(&page),
    }

    Ok(())
}

fn run_classify_command(args: &Args, title: &str, summary: &str) -> anyhow::Result<()> {
    let classifier = IssueClassifier::new(load_lexicon(args)?);
    let (theme, priority) = classifier.classify(title, summary);
    let scores: serde_json::Map<String, serde_json::Value> = classifier
        .theme_classifier()
        .scores(title, summary)
        .into_iter()
        .map(|(theme, score)| (theme.to_string(), score.into()))
        .collect();

    let output = serde_json::json!({
        "theme": theme,
        "priority": priority,
        "scores": scores,
    });
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match &args.command {
        Some(Command::Issues(issues)) => run_issues_command(&args, issues),
        Some(Command::Summary) => {
            let dashboard = load_dashboard(&args, issue_triage::PAGE_SIZE)?;
            println!("{}", serde_json::to_string(&dashboard.summary())?);
            Ok(())
        }
        Some(Command::Themes) => {
            let dashboard = load_dashboard(&args, issue_triage::PAGE_SIZE)?;
            for row in dashboard.themes() {
                println!("{}", serde_json::to_string(&row)?);
            }
            Ok(())
        }
        Some(Command::Top) => {
            for entry in catalog::top_issues() {
                println!("{}", serde_json::to_string(&entry)?);
            }
            Ok(())
        }
        Some(Command::Stories) => {
            for story in catalog::user_stories() {
                println!("{}", serde_json::to_string(&story)?);
            }
            Ok(())
        }
        Some(Command::Classify { title, summary }) => run_classify_command(&args, title, summary),
        None => {
            print_available_commands();
            Ok(())
        }
    }
}
