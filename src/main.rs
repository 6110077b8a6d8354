fn main() {
    snapwiz::run_cli();
}
