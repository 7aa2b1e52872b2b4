//! Binary entrypoint for docknum: global hotkeys for the applications in the Dock.
use std::{
    io::{self, BufRead, IsTerminal},
    process,
    time::Duration,
};

use clap::Parser;
use config::{Settings, TimingOverrides};
use tracing::error;

#[cfg(target_os = "macos")]
mod app;
mod error;
#[cfg(target_os = "macos")]
mod services;

use error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "docknum",
    about = "Launch or switch to Dock applications with modifier+number hotkeys",
    version
)]
/// Command-line interface for the `docknum` binary.
struct Cli {
    /// Modifier held with every hotkey: control, command or option
    modifier: Option<String>,

    /// Finder handling: "ignore", or a slot 1-10 to pin Finder to
    finder: Option<String>,

    /// Combo shortcut, e.g. "5:Notes,Reminders" or "e:Mail,Calendar"
    combo: Option<String>,

    /// Rebuild the slot mapping from the Dock every N seconds (0 disables)
    #[arg(long, value_name = "SECS", default_value_t = 0)]
    refresh_secs: u64,

    /// Do not show the Accessibility prompt or wait for Enter when untrusted
    #[arg(long)]
    no_prompt: bool,

    /// Logging controls
    #[command(flatten)]
    log: logging::LogArgs,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings::resolve(
            self.modifier.as_deref(),
            self.finder.as_deref(),
            self.combo.as_deref(),
        )
        .with_timing(TimingOverrides::from_env())
    }

    fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_secs > 0).then(|| Duration::from_secs(self.refresh_secs))
    }
}

/// Report missing Accessibility trust and optionally wait for the user.
fn check_accessibility(no_prompt: bool) {
    let trusted = if no_prompt {
        permissions::accessibility_ok()
    } else {
        permissions::accessibility_prompt()
    };
    if trusted {
        return;
    }
    println!("⚠️  Accessibility permissions are required!");
    println!(
        "Please grant accessibility permissions in System Settings > Privacy & Security > Accessibility"
    );
    let stdin = io::stdin();
    if !no_prompt && stdin.is_terminal() {
        println!("Press Enter to continue anyway...");
        let mut line = String::new();
        if let Err(e) = stdin.lock().read_line(&mut line) {
            error!(error = %e, "stdin_read_failed");
        }
    }
}

#[cfg(target_os = "macos")]
fn run(cli: &Cli) -> Result<()> {
    check_accessibility(cli.no_prompt);
    app::run(cli.settings(), cli.refresh_interval())
}

#[cfg(not(target_os = "macos"))]
fn run(cli: &Cli) -> Result<()> {
    check_accessibility(cli.no_prompt);
    tracing::debug!(settings = ?cli.settings(), refresh = ?cli.refresh_interval(), "settings_resolved");
    Err(error::Error::UnsupportedPlatform)
}

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log);

    if let Err(e) = run(&cli) {
        error!(error = %e, "docknum_failed");
        eprintln!("docknum: {e}");
        process::exit(1);
    }
}
