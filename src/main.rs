use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::Result;
use par_jump::app::{App, RunOutcome};
use par_jump::cli;
use par_jump::input::KeyReader;
use par_jump::jump::JumpOutcome;
use par_jump_tmux::TmuxClient;
use signal_hook::consts::{SIGINT, SIGTERM};

fn main() -> Result<()> {
    let options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    par_jump::debug::init_log_bridge(options.log_level);

    log::info!("Starting par-jump");

    // Interrupts while waiting for a key end the wait, so the overlay is restored
    let interrupted = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&interrupted))?;
    }

    let reader = KeyReader::new(options.config.input_timeout).with_interrupt_flag(interrupted);
    let app = App::new(options.config, reader);
    let mut host = TmuxClient::new();

    match app.run(&mut host) {
        Ok(RunOutcome::Jumped(JumpOutcome::Printed(command))) => {
            // no newline: the plugin runs this line as-is
            let mut stdout = std::io::stdout();
            stdout.write_all(command.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
        Ok(outcome) => {
            log::info!("done: {:?}", outcome);
            Ok(())
        }
        Err(e) if e.is_cancel() => {
            log::info!("cancelled: {}", e);
            Ok(())
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("par-jump: error: {e:#}");
            std::process::exit(1);
        }
    }
}
