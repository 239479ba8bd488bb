fn main() {
    optics_ordering::cli::run();
}
