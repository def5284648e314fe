fn main() {
    // The ESP-IDF link environment only exists when targeting the device.
    // Host builds (lib + tests) skip it entirely.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
