fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Stamped into `printbench::BUILD_DATE`
    let stamp = chrono::Utc::now().format("%Y-%m-%dT%H:%MZ");
    println!("cargo:rustc-env=BUILD_DATE={}", stamp);
}
