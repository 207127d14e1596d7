//! Command-line argument parsing.
//!
//! Hand-rolled parsing over an action enum: the surface is small enough
//! (two subcommands and four flags) that a parser dependency would outweigh
//! the code it replaces. Unknown arguments fall through to help with a
//! non-zero exit rather than guessing.

/// The parsed intent of a command line.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the display loop
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Print today's computed schedule and exit
    ScheduleCommand {
        json: bool,
        config_dir: Option<String>,
    },
    /// Run against a simulated clock
    SimulateCommand {
        debug_enabled: bool,
        start: String,
        end: String,
        multiplier: f64,
        config_dir: Option<String>,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit non-zero
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured action.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut debug_enabled = false;
        let mut json = false;
        let mut config_dir: Option<String> = None;
        let mut subcommand: Option<String> = None;
        let mut positionals: Vec<String> = Vec::new();

        let mut i = 0;
        while i < args_vec.len() {
            let arg = args_vec[i].as_str();
            match arg {
                "-h" | "--help" => return ParsedArgs { action: CliAction::ShowHelp },
                "-V" | "--version" => return ParsedArgs { action: CliAction::ShowVersion },
                "-d" | "--debug" => debug_enabled = true,
                "--json" => json = true,
                "-c" | "--config" => {
                    i += 1;
                    match args_vec.get(i) {
                        Some(dir) => config_dir = Some(dir.clone()),
                        None => return ParsedArgs { action: CliAction::ShowHelpDueToError },
                    }
                }
                _ if arg.starts_with('-') => {
                    return ParsedArgs { action: CliAction::ShowHelpDueToError };
                }
                _ if subcommand.is_none() => subcommand = Some(arg.to_string()),
                _ => positionals.push(arg.to_string()),
            }
            i += 1;
        }

        let action = match subcommand.as_deref() {
            None => CliAction::Run {
                debug_enabled,
                config_dir,
            },
            Some("schedule") => CliAction::ScheduleCommand { json, config_dir },
            Some("simulate") => {
                if positionals.len() < 2 {
                    return ParsedArgs { action: CliAction::ShowHelpDueToError };
                }
                let multiplier = match positionals.get(2) {
                    Some(raw) => match raw.parse::<f64>() {
                        Ok(value) if value >= 0.0 => value,
                        _ => return ParsedArgs { action: CliAction::ShowHelpDueToError },
                    },
                    // Default: one simulated hour per real second
                    None => 3600.0,
                };
                CliAction::SimulateCommand {
                    debug_enabled,
                    start: positionals[0].clone(),
                    end: positionals[1].clone(),
                    multiplier,
                    config_dir,
                }
            }
            Some(_) => CliAction::ShowHelpDueToError,
        };

        ParsedArgs { action }
    }
}

/// Print usage information.
pub fn display_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!("salatr v{version} — unattended prayer-time display driver");
    println!();
    println!("USAGE:");
    println!("    salatr [OPTIONS]                       Run the display loop");
    println!("    salatr schedule [--json]               Print today's schedule");
    println!("    salatr simulate <START> <END> [MULT]   Replay a time span");
    println!();
    println!("OPTIONS:");
    println!("    -d, --debug          Verbose per-tick logging");
    println!("    -c, --config <DIR>   Use DIR instead of the default config directory");
    println!("    -h, --help           Show this help");
    println!("    -V, --version        Show the version");
    println!();
    println!("SIMULATE:");
    println!("    START and END use \"YYYY-MM-DD HH:MM:SS\" (quote the space).");
    println!("    MULT is simulated seconds per real second; 0 fast-forwards.");
    println!("    Defaults to 3600 (one simulated hour per second).");
}

/// Print the version line.
pub fn display_version() {
    println!("salatr v{}", env!("CARGO_PKG_VERSION"));
}
