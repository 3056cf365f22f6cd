use clap::{Parser, Subcommand};
use site_content::assemble::{ContentStore, DirectoryRecord};
use site_content::config::{self, ContentConfig};
use site_content::output;
use site_content::search;
use site_content::settings::SettingsCache;
use site_content::site::SiteContent;
use site_content::types::{CaseStudy, ContentKind, Insight, Persona, Resource, Service};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "site-content")]
#[command(about = "Load, validate and inspect the marketing site's CMS content")]
#[command(long_about = "\
Load, validate and inspect the marketing site's CMS content

Content comes from a file-based CMS. Anything missing, malformed or
incomplete is replaced by built-in default content, so the site always
renders; problems are reported in the log and by 'check'.

Content structure:

  content/
  ├── pages/home.yml               # Homepage hero, statistics, testimonials
  ├── pages/about.yml              # Mission, values, team
  ├── settings/general.yml         # Site name, contact details, social links
  ├── services/                    # One file per service
  │   ├── 010-web-development.md   # Front-matter + markdown body (010 = sort order)
  │   └── cloud-infrastructure.md
  ├── case-studies/
  ├── insights/
  ├── personas/
  └── resources/
      └── checklist.yml            # Pure YAML works too; 'body' holds markdown

Field resolution (first available wins):
  Slug:    front-matter slug → file name without NNN- prefix
  Order:   front-matter order → NNN- prefix → 999
  Excerpt: front-matter excerpt → placeholder built from the title

Run 'site-content gen-config' to generate a documented content.toml.")]
#[command(version)]
struct Cli {
    /// Config file (optional; stock defaults apply when absent)
    #[arg(long, default_value = "content.toml", global = true)]
    config: PathBuf,

    /// Content directory (overrides content_root)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Public site URL for structured data (overrides site_url)
    #[arg(long, env = "SITE_URL", global = true)]
    site_url: Option<String>,

    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble all content and report what came from the CMS
    Check,
    /// Write the assembled content to <output>/content.json
    Build {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Print one record or collection as JSON
    Show {
        /// Content type: homepage, about, settings, services, case-studies, insights, personas, resources
        #[arg(value_parser = parse_kind)]
        kind: ContentKind,
        /// Item slug (collections only; omit to list every item)
        slug: Option<String>,
    },
    /// Search services, case studies, insights and resources
    Search {
        query: String,
    },
    /// Print a stock content.toml with all options documented
    GenConfig,
}

fn parse_kind(name: &str) -> Result<ContentKind, String> {
    ContentKind::parse(name).ok_or_else(|| format!("unknown content type '{name}'"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        config: config_path,
        root,
        site_url,
        verbose,
        quiet,
        command,
    } = Cli::parse();
    init_logging(verbose, quiet);

    let open_store = || -> Result<ContentStore, config::ConfigError> {
        let config = resolve_config(&config_path, root.as_ref(), site_url.as_deref())?;
        Ok(ContentStore::new(config))
    };

    match command {
        Command::Check => {
            let store = open_store()?;
            println!("==> Checking {}", store.config().content_root.display());
            let site = SiteContent::assemble(&store, &SettingsCache::new(&store));
            output::print_check_report(&site.report());
            enforce_strict(&site, store.config())?;
        }
        Command::Build { output: out_dir } => {
            let store = open_store()?;
            let site = SiteContent::assemble(&store, &SettingsCache::new(&store));
            enforce_strict(&site, store.config())?;
            let manifest = site.manifest(&store.config().site_url);
            std::fs::create_dir_all(&out_dir)?;
            let path = out_dir.join("content.json");
            std::fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
            output::print_build_summary(&manifest, &path);
        }
        Command::Show { kind, slug } => {
            let store = open_store()?;
            println!("{}", show(&store, kind, slug.as_deref())?);
        }
        Command::Search { query } => {
            let store = open_store()?;
            let site = SiteContent::assemble(&store, &SettingsCache::new(&store));
            output::print_search_hits(&query, &search::search(&site, &query));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Set up `tracing` output on stderr.
///
/// `RUST_LOG` wins; otherwise `--quiet` means warn, `--verbose` debug,
/// and the default is info.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load `content.toml` and apply command-line overrides.
fn resolve_config(
    path: &Path,
    root: Option<&PathBuf>,
    site_url: Option<&str>,
) -> Result<ContentConfig, config::ConfigError> {
    let mut config = config::load_config(path)?;
    if let Some(root) = root {
        config.content_root = root.clone();
    }
    if let Some(url) = site_url {
        config.site_url = url.to_string();
    }
    config.validate()?;
    Ok(config)
}

/// Fail when strict mode is on and any content file could not be parsed.
fn enforce_strict(
    site: &SiteContent,
    config: &ContentConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if !config.loading.strict_parse_errors {
        return Ok(());
    }
    let failures = site.parse_failures();
    if failures.is_empty() {
        return Ok(());
    }
    for failure in &failures {
        eprintln!("    {failure}");
    }
    Err(format!(
        "{} content file(s) failed to parse (loading.strict_parse_errors = true)",
        failures.len()
    )
    .into())
}

fn show(
    store: &ContentStore,
    kind: ContentKind,
    slug: Option<&str>,
) -> Result<String, serde_json::Error> {
    match kind {
        ContentKind::Homepage => serde_json::to_string_pretty(&store.homepage().value),
        ContentKind::About => serde_json::to_string_pretty(&store.about().value),
        ContentKind::Settings => serde_json::to_string_pretty(&store.settings().value),
        ContentKind::Service => show_collection::<Service>(store, slug),
        ContentKind::CaseStudy => show_collection::<CaseStudy>(store, slug),
        ContentKind::Insight => show_collection::<Insight>(store, slug),
        ContentKind::Persona => show_collection::<Persona>(store, slug),
        ContentKind::Resource => show_collection::<Resource>(store, slug),
    }
}

fn show_collection<T: DirectoryRecord>(
    store: &ContentStore,
    slug: Option<&str>,
) -> Result<String, serde_json::Error> {
    match slug {
        Some(slug) => serde_json::to_string_pretty(&store.item::<T>(slug).value),
        None => serde_json::to_string_pretty(&store.collection::<T>().items),
    }
}
