use colored::Colorize;

fn main() {
    if let Err(err) = mcabber_history::run() {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}
