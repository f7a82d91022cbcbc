//! Mazefinder: watch BFS, DFS and A* explore a grid maze in the terminal.

use std::error::Error;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use clap::Parser;
use mazefinder_core::NoopObserver;
use mazefinder_lib::command::DEMO_SCRIPT;
use mazefinder_lib::{Command, Report, Sandbox, SandboxConfig, TermObserver, parse_script};
use rand::Rng;

fn main() -> Result<(), Box<dyn Error>> {
    let config = SandboxConfig::parse();
    init_logging(&config)?;

    let script = read_script(config.script.as_deref())?;
    let commands = parse_script(&script)?;
    let sandbox = Sandbox::new(config.size, config.rng())?;
    log::info!("mazefinder: {} commands on a {}x{} grid", commands.len(), config.size, config.size);

    if config.headless {
        run_headless(sandbox, &commands);
        Ok(())
    } else {
        run_terminal(sandbox, &commands, &config)
    }
}

fn init_logging(config: &SandboxConfig) -> Result<(), Box<dyn Error>> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.default_log_filter()),
    );
    if let Some(path) = &config.log_file {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.init();
    Ok(())
}

fn read_script(path: Option<&Path>) -> io::Result<String> {
    match path {
        None => Ok(DEMO_SCRIPT.to_string()),
        Some(p) if p == Path::new("-") => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        Some(p) => fs::read_to_string(p),
    }
}

fn run_headless<R: Rng>(mut sandbox: Sandbox<R>, commands: &[Command]) {
    let mut shown_last = false;
    for &cmd in commands {
        match sandbox.apply(cmd, &mut NoopObserver) {
            Ok(report) => {
                shown_last = matches!(report, Report::Shown(_));
                println!("{report}");
            }
            Err(err) => {
                shown_last = false;
                log::warn!("{cmd}: {err}");
                println!("{cmd}: {err}");
            }
        }
    }
    if !shown_last {
        print!("{}", sandbox.grid().to_ascii());
    }
}

fn run_terminal<R: Rng>(
    mut sandbox: Sandbox<R>,
    commands: &[Command],
    config: &SandboxConfig,
) -> Result<(), Box<dyn Error>> {
    let mut term = TermObserver::stdout(config.size, config.step_delay());
    term.init()?;
    sandbox.repaint(&mut term);
    for &cmd in commands {
        term.status(&format!("{cmd} ..."));
        let line = match sandbox.apply(cmd, &mut term) {
            Ok(Report::Shown(_)) => continue,
            Ok(report) => report.to_string(),
            Err(err) => {
                log::warn!("{cmd}: {err}");
                format!("{cmd}: {err}")
            }
        };
        term.status(&line);
    }
    term.status("done, press any key");
    let waited = term.wait_for_key();
    term.close()?;
    waited?;
    Ok(())
}
