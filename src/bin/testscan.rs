fn main() {
    testscan::cli::run();
}
