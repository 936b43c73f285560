fn main() {
    // The engine library also builds on the host for `cargo test`; only the
    // ESP-IDF target needs the linker environment from esp-idf-sys.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
