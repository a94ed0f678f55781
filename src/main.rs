use clap::Parser;
use enterprise_dashboard::cli::commands::Cli;
use enterprise_dashboard::cli::handlers;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => handlers::prepare(cli.data_dir.as_deref())
            .and_then(|(dir, config)| enterprise_dashboard::tui::run(&dir, config)),
        Some(_) => handlers::dispatch(cli),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
