use clap::{Parser, Subcommand};
use serde::Serialize;

use cdroot::client::navigator::Phase;
use cdroot::client::{
    Address, History, HttpTransport, MemoryView, Navigator, PopOutcome, Region, SessionHistory,
    View,
};

#[derive(Parser)]
#[command(name = "cdroot-cli")]
#[command(about = "Headless client for a cdroot site", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Address bar to start from, e.g. "?page=blog&filter=tech"
    #[arg(short, long, default_value = "")]
    at: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the page the address names
    Show,
    /// Go to the next blog page
    Next,
    /// Go to the previous blog page
    Prev,
    /// Toggle a category in the blog filter
    Toggle { category: String },
    /// Open a page or article by name
    Open { page: String },
    /// Press the back button
    Back,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    address: String,
    phase: Phase,
    page_number: i64,
    filter: Option<&'a str>,
    left_app: bool,
    main: &'a str,
    categories: &'a str,
    entries: &'a str,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cdroot=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let transport = HttpTransport::new(&cli.url);
    let history = SessionHistory::new(Address::parse(&cli.at));
    let mut nav = Navigator::new(transport, MemoryView::new(), history);
    nav.start().await;

    let mut left_app = false;
    match cli.command {
        Commands::Show => {}
        Commands::Next => nav.next_page().await,
        Commands::Prev => nav.prev_page().await,
        Commands::Toggle { category } => nav.toggle_category(&category).await,
        Commands::Open { page } => nav.navigate(&page).await,
        Commands::Back => left_app = nav.back().await == PopOutcome::Left,
    }

    let view = nav.view();
    let snapshot = Snapshot {
        address: nav.history().location().to_query(),
        phase: nav.phase(),
        page_number: view.page_number(),
        filter: nav.filter(),
        left_app,
        main: view.html(Region::Main),
        categories: view.html(Region::Categories),
        entries: view.html(Region::Entries),
    };
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
