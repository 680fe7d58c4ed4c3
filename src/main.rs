use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cfg = tui_patterns::config::Config::parse();
    tui_patterns::app::run(cfg)
}
