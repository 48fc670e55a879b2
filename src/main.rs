fn main() {
    fmcli::cli::main();
}
