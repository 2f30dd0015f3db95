use clap::Parser;
use clap::error::ErrorKind;
use notice_press::archive::Archiver;
use notice_press::catalog::Catalog;
use notice_press::{config, output, site};
use tracing_subscriber::EnvFilter;

const USAGE_HINT: &str = "Use --help for usage information";

#[derive(Parser)]
#[command(name = "notice-press")]
#[command(about = "Version manager for multilingual legal notices")]
#[command(long_about = "\
Version manager for multilingual legal notices

Archives every notice's latest.md into an immutable v<version>/notice.md
snapshot, records the version in metadata.json, then builds the site.

Notice structure:

  notices/
  └── app1/
      ├── metadata.json            # name, description, main_language, languages
      ├── it/
      │   ├── latest.md            # front matter: version: \"1.1\"
      │   └── v1.0/notice.md       # archived snapshot (never rewritten)
      └── en/
          └── latest.md

Examples:
  notice-press --process-all
  notice-press --check-status")]
#[command(disable_version_flag = true)]
struct Cli {
    /// Process all notices and archive versions, then build the site
    #[arg(long)]
    process_all: bool,

    /// Check translation status for all notices
    #[arg(long)]
    check_status: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            e.print()?;
            return Ok(());
        }
        Err(_) => {
            println!("{USAGE_HINT}");
            return Ok(());
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = std::env::current_dir()?;
    let site_config = config::load_config(&root)?;
    let notices = site_config.notices_path(&root);

    if cli.process_all {
        let builder = site::builder_for(&site_config, &root);
        Archiver::new(notices).process_all(builder.as_ref(), output::print_archive_report)?;
    } else if cli.check_status {
        let catalog = Catalog::load(&notices);
        output::print_status_report(&catalog.status_report());
    } else {
        println!("{USAGE_HINT}");
    }

    Ok(())
}
