fn main() {
    if let Err(e) = material_selector::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
