use clap::Parser;
use holdkit::cli::{Cli, Command};
use holdkit::{commands, init_logging, Size, Vec2, ViewportState, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    init_logging(level)?;
    tracing::debug!("holdkit {} (built {})", VERSION, BUILD_DATE);

    let config = commands::load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Command::Rectify {
            corners,
            width,
            height,
        } => serde_json::to_string_pretty(&commands::rectify(&corners, width, height)?)?,
        Command::Outline { holds, cluster } => serde_json::to_string_pretty(
            &commands::outline(&holds, cluster.as_deref(), &config)?,
        )?,
        Command::Hit {
            holds,
            x,
            y,
            scale,
            tx,
            ty,
            content,
        } => serde_json::to_string_pretty(&commands::hit(
            &holds,
            Vec2::new(x, y),
            ViewportState::new(scale, tx, ty),
            Size::from(content),
            &config,
        )?)?,
    };

    println!("{}", output);
    Ok(())
}
