fn main() {
    if let Err(err) = maplabel::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
