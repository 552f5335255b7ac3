use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use vitrine::{
    config::{ContactConfig, ContentIndex, SiteConfig},
    contact::{self, ContactForm},
    fetch::SiteFetcher,
    page,
};

#[derive(Parser)]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prerender components and listings into a page
    Render {
        #[clap(short, long, env = "VITRINE_CONFIG")]
        config: PathBuf,
        #[clap(short, long)]
        page: PathBuf,
        /// Overrides `page_url` from the configuration
        #[clap(long)]
        page_url: Option<String>,
        /// Content index file, replacing the one in the configuration
        #[clap(long)]
        index: Option<PathBuf>,
        /// Defaults to stdout
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate and submit a contact form message
    Contact {
        #[clap(long, env = "VITRINE_CONFIG")]
        config: Option<PathBuf>,
        #[clap(long)]
        name: String,
        #[clap(long)]
        email: String,
        #[clap(long)]
        notes: String,
    },
}

async fn render(
    config: PathBuf,
    page_path: PathBuf,
    page_url: Option<String>,
    index: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut site = SiteConfig::load(&config)
        .await
        .with_context(|| format!("load config from {}", config.display()))?;
    if let Some(url) = page_url {
        site.set_page_url(&url)?;
    }
    if let Some(index) = index {
        site.content_index = Some(
            ContentIndex::load(&index)
                .await
                .with_context(|| format!("load content index from {}", index.display()))?,
        );
    }
    let source = tokio::fs::read_to_string(&page_path)
        .await
        .with_context(|| format!("read page {}", page_path.display()))?;

    let html = page::render_page(&source, &site, SiteFetcher::default()).await;

    match output {
        Some(output) => {
            tokio::fs::write(&output, html)
                .await
                .with_context(|| format!("write page {}", output.display()))?;
            info!(output = %output.display(), "written");
        }
        None => println!("{html}"),
    }
    Ok(())
}

async fn submit_contact(config: Option<PathBuf>, form: ContactForm) -> anyhow::Result<()> {
    let settings = match config {
        Some(config) => {
            SiteConfig::load(&config)
                .await
                .with_context(|| format!("load config from {}", config.display()))?
                .contact
        }
        None => ContactConfig::default(),
    };
    let submission = form.validate()?;
    eprintln!("{}", contact::SENDING);
    let receipt = contact::submit(
        submission,
        Duration::from_millis(settings.submit_delay_ms),
    )
    .await;
    println!("{}", receipt.message);
    println!("{}", serde_json::to_string_pretty(&receipt.submission)?);
    Ok(())
}

async fn run(opts: Opts) -> anyhow::Result<()> {
    match opts.command {
        Command::Render {
            config,
            page,
            page_url,
            index,
            output,
        } => render(config, page, page_url, index, output).await,
        Command::Contact {
            config,
            name,
            email,
            notes,
        } => submit_contact(config, ContactForm { name, email, notes }).await,
    }
}

#[tokio::main]
async fn main() {
    let opts = Opts::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    if let Err(e) = run(opts).await {
        error!(?e, "critical error");
        std::process::exit(1);
    }
}
