use std::env;
use std::process::Command;

fn main() {
    for path in ["build.rs", ".git/HEAD", ".git/refs"] {
        println!("cargo:rerun-if-changed={path}");
    }

    let hash = command_stdout("git", &["rev-parse", "--short", "HEAD"])
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    let status = match command_stdout("git", &["status", "--porcelain"]) {
        Some(changes) if changes.is_empty() => "clean",
        Some(_) => "dirty",
        None => "unknown",
    };
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown-target".to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown-profile".to_string());
    let rustc = command_stdout("rustc", &["--version"]).unwrap_or_else(|| "unknown".to_string());

    export("HASH", &hash);
    export("STATUS", status);
    export("TIMESTAMP", &timestamp);
    export("TARGET", &target);
    export("PROFILE", &profile);
    export("RUSTC", &rustc);
}

fn export(suffix: &str, value: &str) {
    println!("cargo:rustc-env=SPENDWISE_BUILD_{suffix}={value}");
}

fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
