use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::account::{login, register, reset_password, Registration};
use crate::core::{Config, LocalStore};
use crate::ui::{prompt_password, prompt_text};

pub fn handle_account(matches: &ArgMatches) -> Result<()> {
    let store = LocalStore::open_default()?;

    match matches.subcommand() {
        Some(("register", sub)) => handle_register(&store, sub),
        Some(("login", sub)) => handle_login(&store, sub),
        Some(("forgot", sub)) => handle_forgot(&store, sub),
        Some(("profile", _)) => handle_profile(&store),
        Some(("logout", _)) => handle_logout(&store),
        _ => {
            println!("Use 'pulse account --help' for more information.");
            Ok(())
        }
    }
}

fn handle_register(store: &LocalStore, matches: &ArgMatches) -> Result<()> {
    let form = Registration {
        name: prompt_text("Name", matches.get_one::<String>("name"))?,
        email: prompt_text("Email", matches.get_one::<String>("email"))?,
        age: prompt_text("Age", matches.get_one::<String>("age"))?,
        password: prompt_password("Password", matches.get_one::<String>("password"), true)?,
    };

    let user = register(store, &form).context("Registration failed")?;
    println!(
        "{}",
        format!("✓ Account created for {}", user.email).green().bold()
    );
    println!("{}", "Next: pair your sensor with 'pulse pair --list'".dimmed());
    Ok(())
}

fn handle_login(store: &LocalStore, matches: &ArgMatches) -> Result<()> {
    let email = prompt_text("Email", matches.get_one::<String>("email"))?;
    let password = prompt_password("Password", matches.get_one::<String>("password"), false)?;

    let user = login(store, &email, &password)?;
    println!("{}", format!("Welcome back, {}", user.name).green().bold());
    Ok(())
}

fn handle_forgot(store: &LocalStore, matches: &ArgMatches) -> Result<()> {
    let email = prompt_text("Email", matches.get_one::<String>("email"))?;
    let new_password = prompt_password("New password", matches.get_one::<String>("password"), false)?;
    let confirm = prompt_password("Confirm password", matches.get_one::<String>("confirm"), false)?;

    reset_password(store, &email, &new_password, &confirm)?;
    println!("{}", "✓ Your password was updated".green().bold());
    Ok(())
}

fn handle_profile(store: &LocalStore) -> Result<()> {
    let config = Config::load()?;
    let Some(user) = store.get_user()? else {
        println!("{}", "No account registered on this device".yellow());
        return Ok(());
    };

    println!("{}", "Profile".cyan().bold());
    println!("  {:<10} {}", "Name".dimmed(), user.name);
    println!("  {:<10} {}", "Email".dimmed(), user.email);
    if let Some(age) = user.age {
        println!("  {:<10} {}", "Age".dimmed(), age);
    }
    println!("  {:<10} {}", "Device".dimmed(), config.device_id);

    match store.get_emergency_contact()? {
        Some(contact) => println!(
            "  {:<10} {} ({}) · {}",
            "Emergency".dimmed(),
            contact.name,
            contact.relationship,
            contact.phone
        ),
        None => println!("  {:<10} {}", "Emergency".dimmed(), "not set".dimmed()),
    }
    Ok(())
}

fn handle_logout(store: &LocalStore) -> Result<()> {
    if store.clear_user()? {
        println!("{}", "Signed out and removed the local account".green());
    } else {
        println!("{}", "No account to remove".dimmed());
    }
    Ok(())
}
