fn main() {
    if let Err(err) = buildbuddy::cli::main() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
