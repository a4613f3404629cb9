use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=SSHKEYCHAIN_VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let version = std::env::var("SSHKEYCHAIN_VERSION").unwrap_or_else(|_| "dev".to_string());
    println!("cargo:rustc-env=SSHKEYCHAIN_VERSION={version}");
    println!("cargo:rustc-env=SSHKEYCHAIN_BUILD_HASH={}", build_hash());
}

fn build_hash() -> String {
    Command::new("git")
        .args(["rev-parse", "--short=10", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
