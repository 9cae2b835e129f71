mod app;
mod renderer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use folio_core::content::{builtin_site, parse_site};
use folio_core::model::Site;
use tracing_subscriber::EnvFilter;

/// Browse a portfolio page in the terminal, or export it as SVG.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    /// Site content JSON (defaults to the built-in portfolio)
    content: Option<PathBuf>,

    /// Write a static SVG snapshot of the page here instead of opening the viewer
    #[arg(long, value_name = "PATH")]
    svg: Option<PathBuf>,

    /// Page width in pixels for the SVG export
    #[arg(long, value_name = "PX", default_value_t = 1280.0)]
    width: f64,

    /// Use the dark palette for the SVG export
    #[arg(long)]
    dark: bool,
}

fn load(path: Option<&PathBuf>) -> Result<Site> {
    let Some(path) = path else {
        return Ok(builtin_site());
    };
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let site = parse_site(&data).with_context(|| format!("parsing {}", path.display()))?;
    tracing::info!(path = %path.display(), sections = site.sections.len(), "loaded content");
    Ok(site)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let site = load(cli.content.as_ref())?;

    if let Some(out) = cli.svg {
        let (layout, commands) = folio_core::views::render_static(&site, cli.width);
        let svg = folio_core::svg::render_svg(&commands, layout.width, layout.height, cli.dark);
        std::fs::write(&out, svg).with_context(|| format!("writing {}", out.display()))?;
        eprintln!("wrote {}", out.display());
        return Ok(());
    }

    let mut app = app::TuiApp::new(site);
    renderer::render_tui(&mut app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn svg_export_flags() {
        let cli = Cli::try_parse_from([
            "folio", "site.json", "--svg", "out.svg", "--width", "800", "--dark",
        ])
        .expect("valid arguments");
        assert_eq!(cli.content, Some(PathBuf::from("site.json")));
        assert_eq!(cli.svg, Some(PathBuf::from("out.svg")));
        assert_eq!(cli.width, 800.0);
        assert!(cli.dark);
    }

    #[test]
    fn viewer_defaults() {
        let cli = Cli::try_parse_from(["folio"]).expect("no arguments needed");
        assert_eq!(cli.content, None);
        assert_eq!(cli.svg, None);
        assert_eq!(cli.width, 1280.0);
        assert!(!cli.dark);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Cli::try_parse_from(["folio", "--width", "wide", "--svg", "o.svg"]).is_err());
        assert!(Cli::try_parse_from(["folio", "--bogus"]).is_err());
        assert!(Cli::try_parse_from(["folio", "--svg"]).is_err());
    }
}
