mod cli;
mod output;

use std::time::SystemTime;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cachesweep::providers::{self, register_all};
use cachesweep::registry::{execute, InMemoryRegistry, RegisteredCleaner};
use cachesweep::{utils, CleanerProvider, HostConfig, ProviderContext};

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = HostConfig::load_or_default(cli.config.as_deref())?;
    config.apply_overrides(&cli.params)?;
    if let Some(hours) = cli_min_age(&cli.command) {
        config.min_age_hours = hours;
    }

    output::print_banner();
    match cli.command {
        Command::Providers => {
            for provider in providers::all_providers() {
                output::print_provider_row(
                    provider.name(),
                    provider.label(),
                    &provider.enabled_parameter(),
                );
            }
            Ok(())
        }
        Command::Scan { provider } => {
            scan(&config, provider.as_deref())?;
            output::print_dry_run_footer();
            Ok(())
        }
        Command::Clean {
            confirm, provider, ..
        } => {
            if !confirm {
                output::print_no_confirm_warning();
                scan(&config, provider.as_deref())?;
                output::print_dry_run_footer();
                return Ok(());
            }
            clean(&config, provider.as_deref())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cli_min_age(command: &Command) -> Option<u64> {
    match command {
        Command::Clean { min_age_hours, .. } => *min_age_hours,
        _ => None,
    }
}

fn selected_providers(name: Option<&str>) -> Result<Vec<Box<dyn CleanerProvider>>> {
    match name {
        None => Ok(providers::all_providers()),
        Some(name) => match providers::find_provider(name) {
            Some(p) => Ok(vec![p]),
            None => bail!(
                "unknown provider '{name}'. Available: {}",
                providers::provider_names().join(", ")
            ),
        },
    }
}

fn register(config: &HostConfig, provider: Option<&str>) -> Result<(ProviderContext, InMemoryRegistry)> {
    let selected = selected_providers(provider)?;
    let ctx = config.context(SystemTime::now());
    let mut registry = InMemoryRegistry::new();
    register_all(&selected, &ctx, &mut registry);
    info!("Registered {} cleaners", registry.len());
    Ok((ctx, registry))
}

fn cleaner_size(cleaner: &RegisteredCleaner) -> u64 {
    cleaner
        .action
        .targets()
        .iter()
        .map(|p| utils::entry_size(p))
        .sum()
}

fn scan(config: &HostConfig, provider: Option<&str>) -> Result<()> {
    let (ctx, registry) = register(config, provider)?;
    if registry.is_empty() {
        output::print_info("Nothing to clean.");
        return Ok(());
    }

    let mut grand_total = 0u64;
    for selected in selected_providers(provider)? {
        let entries: Vec<&RegisteredCleaner> = registry
            .entries()
            .iter()
            .filter(|e| e.provider == Some(selected.name()))
            .collect();
        if entries.is_empty() {
            continue;
        }

        output::print_scan_header(selected.label());
        let mut total = 0u64;
        for entry in entries {
            let size = cleaner_size(entry);
            total += size;
            output::print_scan_entry(
                &utils::display_path(&entry.anchor, ctx.home()),
                entry.action.kind(),
                &utils::format_size(size),
                &utils::format_age(entry.timestamp, ctx.now()),
            );
        }
        output::print_provider_total(selected.label(), &utils::format_size(total));
        grand_total += total;
    }
    output::print_grand_total(&utils::format_size(grand_total));
    Ok(())
}

fn clean(config: &HostConfig, provider: Option<&str>) -> Result<()> {
    let (ctx, registry) = register(config, provider)?;
    let cutoff = ctx
        .now()
        .checked_sub(config.min_age())
        .unwrap_or(SystemTime::UNIX_EPOCH);
    let eligible = registry.eligible(cutoff);
    debug!(
        "{} of {} cleaners are eligible",
        eligible.len(),
        registry.len()
    );
    if eligible.is_empty() {
        output::print_info("Nothing to clean.");
        return Ok(());
    }

    let sizes: Vec<u64> = eligible.iter().map(|c| cleaner_size(c)).collect();
    let results = execute(eligible);

    let mut freed = 0u64;
    for ((cleaner, report), size) in results.iter().zip(sizes) {
        let path = utils::display_path(&cleaner.anchor, ctx.home());
        if report.failures.is_empty() {
            freed += size;
            output::print_deleted(&path, &utils::format_size(size));
        }
        for failure in &report.failures {
            output::print_delete_error(&path, &failure.to_string());
        }
    }
    output::print_clean_complete(&utils::format_size(freed));
    Ok(())
}
