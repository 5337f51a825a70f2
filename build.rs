fn main() {
    // Emit the ESP-IDF link environment only when building for the target;
    // host-side library and test builds skip it entirely.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
