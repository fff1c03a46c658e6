use std::process;

fn main() {
    if let Err(e) = molt::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
