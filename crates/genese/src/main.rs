fn main() {
    std::process::exit(genese_cli::run_cli(std::env::args().collect()));
}
