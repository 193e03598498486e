fn main() {
    if let Err(error) = stackline_cli::run() {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}
