fn main() {
    if let Err(err) = handwash_monitor_lib::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
