#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = vtree_demo::run_from_env() {
        eprintln!("vtree-demo: {error}");
        std::process::exit(1);
    }
}
