use clap::{Parser, Subcommand};
use parish_site::loader::{ContentState, FileSource, HttpSource};
use parish_site::{config, content, generate, output};
use std::path::PathBuf;

/// Where to take override content from.
#[derive(clap::Args, Clone)]
struct SourceArgs {
    /// Content endpoint URL (overrides content.endpoint from the config)
    #[arg(long, conflicts_with_all = ["content_file", "offline"])]
    endpoint: Option<String>,

    /// Read override content from a local JSON file instead of the endpoint
    #[arg(long, conflicts_with = "offline")]
    content_file: Option<PathBuf>,

    /// Skip the endpoint and use the bundled default content
    #[arg(long)]
    offline: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "parish-site")]
#[command(about = "Single-page website generator for a parish community")]
#[command(long_about = "\
Single-page website generator for a parish community

The page content (hero, mass schedules, sacrament costs, prayer times,
parish life photos, contact details) ships with the binary. At build time
an endpoint may override any part of it:

  GET http://localhost:4000/api/content
  {
    \"hero\": { \"chip\": \"Misas · Bautizos · Bodas\" },
    \"costs\": [{ \"label\": \"Bautizo\", \"price\": \"$900 MXN\" }]
  }

Merge rules:
  hero, contact, community titles   each field overrides independently
  schedules, costs, prayers, photos a non-empty list replaces the default list

If the endpoint is unreachable, answers with an error status, or sends
something that is not a JSON object, the bundled content is used.

Run 'parish-site gen-config' to generate a documented site.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site configuration file
    #[arg(long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load content and write the page
    Build(SourceArgs),
    /// Load content and print the effective document as JSON
    Fetch(SourceArgs),
    /// Print the bundled default content as JSON
    Defaults,
    /// Validate the config and list the bundled content
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Build(source) => {
            let site_config = resolve_config(&cli.config, &source)?;
            println!("==> Loading content from {}", describe_source(&source, &site_config));
            let state = load_content(&source, &site_config);
            output::print_content_output(&state);

            println!("==> Generating page → {}", cli.output.display());
            let site = generate::generate(&state, &site_config, &cli.output)?;
            output::print_generate_output(&site);

            println!("==> Build complete: {}", site.index.display());
        }
        Command::Fetch(source) => {
            let site_config = resolve_config(&cli.config, &source)?;
            let state = load_content(&source, &site_config);
            eprintln!("{}", output::format_origin(&state));
            println!("{}", serde_json::to_string_pretty(&*state.document())?);
        }
        Command::Defaults => {
            println!("{}", serde_json::to_string_pretty(content::default_content())?);
        }
        Command::Check => {
            let site_config = config::load_config(&cli.config)?;
            println!("==> Config OK: {}", cli.config.display());
            println!("Endpoint: {}", site_config.content.endpoint);
            for line in output::format_document(content::default_content()) {
                println!("{}", line);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `site.toml` and apply the `--endpoint` override before validation.
fn resolve_config(
    path: &std::path::Path,
    source: &SourceArgs,
) -> Result<config::SiteConfig, config::ConfigError> {
    let mut site_config = config::load_config(path)?;
    if let Some(endpoint) = &source.endpoint {
        site_config.content.endpoint = endpoint.clone();
        site_config.validate()?;
    }
    Ok(site_config)
}

fn describe_source(source: &SourceArgs, site_config: &config::SiteConfig) -> String {
    if source.offline {
        "bundled defaults (offline)".to_string()
    } else if let Some(path) = &source.content_file {
        path.display().to_string()
    } else {
        site_config.content.endpoint.clone()
    }
}

/// Run the single content load. Never fails; errors fall back to defaults.
fn load_content(source: &SourceArgs, site_config: &config::SiteConfig) -> ContentState {
    let mut state = ContentState::new();
    if source.offline {
        state.settle_offline();
    } else if let Some(path) = &source.content_file {
        state.load(&FileSource::new(path));
    } else {
        state.load(&HttpSource::new(
            site_config.content.endpoint.as_str(),
            site_config.content.timeout(),
        ));
    }
    state
}
