use colored::Colorize;

pub fn print_banner() {
    println!(
        "{}",
        format!("cachesweep - build-agent cache cleaners v{}", env!("CARGO_PKG_VERSION"))
            .bold()
            .cyan()
    );
    println!();
}

pub fn print_provider_row(name: &str, label: &str, parameter: &str) {
    println!("  {:<18} {:<36} {}", name.bold(), label, parameter.dimmed());
}

pub fn print_scan_header(label: &str) {
    println!("{}", format!("=== {label} ===").bold().white());
}

pub fn print_scan_entry(path: &str, kind: &str, size: &str, age: &str) {
    println!(
        "  {}  {}  {}  {}",
        path.dimmed(),
        format!("[{kind}]").blue(),
        size.yellow(),
        age.dimmed()
    );
}

pub fn print_provider_total(label: &str, total: &str) {
    println!("  {} {}", format!("{label} total:").bold(), total.green());
    println!();
}

pub fn print_grand_total(total: &str) {
    println!(
        "  {:<30} {}",
        "Total reclaimable:".bold(),
        total.green().bold()
    );
    println!();
}

pub fn print_info(msg: &str) {
    println!("{} {}", "Info:".cyan().bold(), msg);
}

pub fn print_dry_run_footer() {
    println!(
        "{}",
        "This was a dry run. Run `cachesweep clean --confirm` to delete."
            .yellow()
            .bold()
    );
}

pub fn print_clean_complete(freed: &str) {
    println!(
        "{} {}",
        "Cleaned!".green().bold(),
        format!("{freed} freed.").green()
    );
}

pub fn print_deleted(path: &str, size: &str) {
    println!("  {} {}  {}", "Deleted".red(), path.dimmed(), size.yellow());
}

pub fn print_delete_error(path: &str, err: &str) {
    println!("  {} {}: {}", "Failed".red().bold(), path.dimmed(), err.red());
}

pub fn print_no_confirm_warning() {
    println!(
        "{}",
        "No --confirm flag provided. Running as dry-run scan."
            .yellow()
            .bold()
    );
    println!();
}
