use colored::*;

/// Returns the Ventalytics ASCII art logo
pub fn get_logo() -> String {
    let logo = r#"
  ██╗   ██╗███████╗███╗   ██╗████████╗ █████╗
  ██║   ██║██╔════╝████╗  ██║╚══██╔══╝██╔══██╗
  ██║   ██║█████╗  ██╔██╗ ██║   ██║   ███████║
  ╚██╗ ██╔╝██╔══╝  ██║╚██╗██║   ██║   ██╔══██║
   ╚████╔╝ ███████╗██║ ╚████║   ██║   ██║  ██║
    ╚═══╝  ╚══════╝╚═╝  ╚═══╝   ╚═╝   ╚═╝  ╚═╝
  ██╗  ██╗   ██╗████████╗██╗ ██████╗███████╗
  ██║  ╚██╗ ██╔╝╚══██╔══╝██║██╔════╝██╔════╝
  ██║   ╚████╔╝    ██║   ██║██║     ███████╗
  ██║    ╚██╔╝     ██║   ██║██║     ╚════██║
  ███████╗██║      ██║   ██║╚██████╗███████║
  ╚══════╝╚═╝      ╚═╝   ╚═╝ ╚═════╝╚══════╝
    "#;

    logo.to_string()
}

/// Returns a colored version of the logo
pub fn get_colored_logo() -> ColoredString {
    get_logo().bright_cyan()
}

/// Returns the compact version of the logo
pub fn get_compact_logo() -> String {
    let logo = r#"
  _  _ ____ _  _ ___ ____ _    _   _ ___ _ ____ ____
  |  | |___ |\ |  |  |__| |     \_/   |  | |    [__
   \/  |___ | \|  |  |  | |___   |    |  | |___ ___]
    "#;

    logo.to_string()
}

/// Returns a colored version of the compact logo
pub fn get_compact_colored_logo() -> ColoredString {
    get_compact_logo().bright_cyan()
}

/// Display version information with the ASCII art logo
pub fn display_version() {
    println!("{}", get_colored_logo());
    println!("Ventalytics CLI version {}", env!("CARGO_PKG_VERSION"));
    println!("A Rust-based sales analytics and reminders engine");
    println!("Repository: {}", env!("CARGO_PKG_REPOSITORY"));
}

/// Display the compact banner above a report
pub fn print_report_header() {
    println!("{}", get_compact_colored_logo());
}
