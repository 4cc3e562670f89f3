//! Pretty terminal output with colors and badges.

use colored::Colorize;

// === Startup ===

pub fn print_banner() {
    println!();
    println!("{}", "╔═══════════════════════════════════════════════════════════╗".cyan());
    println!("{}", "║                                                           ║".cyan());
    println!(
        "║     {}                                         ║",
        "jwtmint v0.1.0".bold().white()
    );
    println!("║     {}                    ║", "HS256 claim tokens, signed".dimmed());
    println!("{}", "║                                                           ║".cyan());
    println!("{}", "╚═══════════════════════════════════════════════════════════╝".cyan());
    println!();
}

pub fn print_startup(addr: &str, cookie_name: &str) {
    println!("{} {}", "✓".green().bold(), "Server ready".white().bold());
    println!("  {} {}", "→".dimmed(), format!("http://{}", addr).cyan().underline());
    println!("  {} {}", "cookie:".dimmed(), cookie_name.white());
    println!();
    println!("{}", "Endpoints:".white().bold());
    println!("  {} {}    {}", "POST".yellow(), "/token".white(), "Issue signed token".dimmed());
    println!("  {} {}   {}", "POST".yellow(), "/verify".white(), "Verify token from body".dimmed());
    println!(
        "  {} {}   {}",
        "GET ".green(),
        "/verify".white(),
        "Verify token from cookie".dimmed()
    );
    println!("  {} {}  {}", "GET ".green(), "/metrics".white(), "Telemetry".dimmed());
    println!("  {} {}   {}", "GET ".green(), "/health".white(), "Health check".dimmed());
    println!();
}

// === Badges ===

fn badge(text: &str, fg: colored::Color, bg: colored::Color) -> colored::ColoredString {
    format!(" {} ", text).color(fg).on_color(bg).bold()
}

// === Core Events ===

pub fn log_issue(claim_count: usize, expires: Option<&str>) {
    println!(
        "{} {} {} {}",
        badge("ISSUE", colored::Color::Black, colored::Color::Green),
        format!("claims:{}", claim_count).white(),
        "exp:".dimmed(),
        expires.unwrap_or("never").cyan()
    );
}

pub fn log_verify(source: &str, time_us: u128) {
    println!(
        "{} {} {} {}",
        badge("OK", colored::Color::Black, colored::Color::Blue),
        format!("from:{}", source).white(),
        format!("{}μs", time_us).green(),
        "✓".green().bold()
    );
}

pub fn log_reject(reason: &str) {
    println!("{} {}", badge("DENY", colored::Color::White, colored::Color::Red), reason.red());
}
