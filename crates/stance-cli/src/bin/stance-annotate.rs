fn main() {
    stance_cli::set_version(env!("CARGO_PKG_VERSION"));
    std::process::exit(stance_cli::run_annotate_from_env());
}
