// Templatizer CLI Entry Point

use templatizer_cli::{output, router::CommandRouter, VerbosityLevel};

fn main() {
    if let Err(e) = CommandRouter::route() {
        output::print_error(&e.user_message());
        if VerbosityLevel::current() == VerbosityLevel::Verbose {
            eprintln!("{}", e.technical_details());
        }
        std::process::exit(1);
    }
}
