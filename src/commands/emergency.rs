use anyhow::{ensure, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::validation::is_valid_phone;
use crate::core::{EmergencyContact, LocalStore};
use crate::ui::prompt_text;

pub fn handle_emergency(matches: &ArgMatches) -> Result<()> {
    let store = LocalStore::open_default()?;

    match matches.subcommand() {
        Some(("set", sub)) => {
            let contact = EmergencyContact {
                name: prompt_text("Name", sub.get_one::<String>("name"))?.trim().to_string(),
                relationship: prompt_text("Relationship", sub.get_one::<String>("relationship"))?
                    .trim()
                    .to_string(),
                phone: prompt_text("Phone", sub.get_one::<String>("phone"))?.trim().to_string(),
            };
            ensure!(
                !contact.name.is_empty() && !contact.relationship.is_empty(),
                "Name and relationship are required"
            );
            ensure!(is_valid_phone(&contact.phone), "'{}' is not a valid phone number", contact.phone);

            store.save_emergency_contact(&contact)?;
            println!("{}", format!("✓ Emergency contact saved: {}", contact.name).green());
        }
        Some(("show", _)) => match store.get_emergency_contact()? {
            Some(contact) => {
                println!("{}", "Emergency contact".red().bold());
                println!("  {} ({})", contact.name.bold(), contact.relationship);
                println!("  {}", contact.phone);
            }
            None => println!("{}", "No emergency contact saved".dimmed()),
        },
        Some(("clear", _)) => {
            if store.clear_emergency_contact()? {
                println!("{}", "Emergency contact removed".green());
            } else {
                println!("{}", "No emergency contact saved".dimmed());
            }
        }
        _ => println!("Use 'pulse emergency --help' for more information."),
    }
    Ok(())
}
