fn main() {
    slimtable::cli::run();
}
