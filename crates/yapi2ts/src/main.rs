//! yapi2ts binary.

fn main() {
    yapi2ts_cli::init_tracing();
    let code = yapi2ts_cli::run_cli(std::env::args().collect());
    std::process::exit(code);
}
