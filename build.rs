fn main() {
    println!("cargo:rerun-if-env-changed=VITALINK_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=VITALINK_WIFI_PASSWORD");
    println!("cargo:rerun-if-env-changed=VITALINK_BROKER_URL");
    println!("cargo:rerun-if-env-changed=VITALINK_BROKER_USER");
    println!("cargo:rerun-if-env-changed=VITALINK_BROKER_PASSWORD");
    println!("cargo:rerun-if-env-changed=VITALINK_CONFIG_JSON");

    // ESP-IDF link arguments are only needed for flash builds.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
