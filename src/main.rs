use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, Command};

use pulse_vital::commands;

fn build_cli() -> Command {
    Command::new("pulse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pulse Vital client: live vital signs, history and device pairing")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Show debug logs (RUST_LOG also works)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("home")
                .about("Summary of the latest readings with alerts and a recommendation")
                .arg(
                    Arg::new("limit")
                        .short('n')
                        .long("limit")
                        .help("Number of readings to summarize")
                        .value_parser(value_parser!(u32).range(1..)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the aggregate snapshot as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("live")
                .about("Poll the sensor continuously until Ctrl+C")
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("MS")
                        .help("Refresh interval in milliseconds (default: 3000)")
                        .value_parser(value_parser!(u64).range(100..)),
                )
                .arg(
                    Arg::new("limit")
                        .short('n')
                        .long("limit")
                        .help("Number of readings fetched per refresh")
                        .value_parser(value_parser!(u32).range(1..)),
                ),
        )
        .subcommand(
            Command::new("history")
                .about("Statistics and charts over a time range")
                .arg(
                    Arg::new("range")
                        .help("today, 7d, 30d or custom")
                        .index(1)
                        .default_value("today"),
                )
                .arg(
                    Arg::new("limit")
                        .short('n')
                        .long("limit")
                        .help("Number of readings for the custom range")
                        .value_parser(value_parser!(u32).range(1..)),
                )
                .arg(
                    Arg::new("points")
                        .short('p')
                        .long("points")
                        .help("Maximum points drawn per chart")
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("pair")
                .about("Pair with a sensor device")
                .arg(
                    Arg::new("device")
                        .help("Device id to pair with")
                        .index(1),
                )
                .arg(
                    Arg::new("select")
                        .short('s')
                        .long("select")
                        .value_name("N")
                        .help("Pick a device from the nearby list by number")
                        .value_parser(value_parser!(u32).range(1..)),
                )
                .arg(
                    Arg::new("list")
                        .short('l')
                        .long("list")
                        .help("List nearby devices")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("account")
                .about("Local account (use 'pulse account --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("register")
                        .about("Create the local account")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("age").long("age"))
                        .arg(Arg::new("password").long("password")),
                )
                .subcommand(
                    Command::new("login")
                        .about("Check your credentials")
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("password").long("password")),
                )
                .subcommand(
                    Command::new("forgot")
                        .about("Reset your password")
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("password").long("password"))
                        .arg(Arg::new("confirm").long("confirm")),
                )
                .subcommand(Command::new("profile").about("Show your profile"))
                .subcommand(Command::new("logout").about("Remove the local account")),
        )
        .subcommand(
            Command::new("emergency")
                .about("Emergency contact (use 'pulse emergency --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("set")
                        .about("Save the emergency contact")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("relationship").long("relationship"))
                        .arg(Arg::new("phone").long("phone")),
                )
                .subcommand(Command::new("show").about("Show the emergency contact"))
                .subcommand(Command::new("clear").about("Remove the emergency contact")),
        )
        .subcommand(
            Command::new("config")
                .about("Client configuration (use 'pulse config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("get")
                        .about("Show one or all configuration values")
                        .arg(Arg::new("key").index(1)),
                )
                .subcommand(
                    Command::new("set")
                        .about("Set a configuration value")
                        .arg(Arg::new("key").required(true).index(1))
                        .arg(Arg::new("value").required(true).index(2)),
                )
                .subcommand(Command::new("reset").about("Restore the default configuration"))
                .subcommand(Command::new("path").about("Print the configuration file path")),
        )
        .subcommand(Command::new("version").about("Shows version information"))
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    pulse_vital::init_logging(matches.get_flag("verbose"));

    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("home", sub_matches)) => commands::home(sub_matches)?,
        Some(("live", sub_matches)) => commands::live(sub_matches)?,
        Some(("history", sub_matches)) => commands::history(sub_matches)?,
        Some(("pair", sub_matches)) => commands::pair(sub_matches)?,
        Some(("account", sub_matches)) => commands::account::handle_account(sub_matches)?,
        Some(("emergency", sub_matches)) => commands::emergency::handle_emergency(sub_matches)?,
        Some(("config", sub_matches)) => commands::config::handle_config(sub_matches)?,
        Some(("version", _)) => commands::version()?,
        _ => {
            println!("Welcome to Pulse Vital!");
            println!("Use 'pulse --help' for more information.");
        }
    }

    Ok(())
}
