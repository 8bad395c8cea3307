use std::{env, env::VarError};

// An explicit allow-list, so that secrets (access token, SMTP password) can never leak into a terminal scrollback
const DISPLAY_ENVS: [&str; 14] = [
    "RUST_LOG",
    "CPG_HOST",
    "CPG_PORT",
    "CPG_DATABASE_URL",
    "CPG_MP_API_URL",
    "CPG_MP_NOTIFICATION_URL",
    "CPG_MP_SUCCESS_URL",
    "CPG_MP_FAILURE_URL",
    "CPG_MP_PENDING_URL",
    "CPG_SMTP_ENABLED",
    "CPG_SMTP_HOST",
    "CPG_SMTP_PORT",
    "CPG_SMTP_USERNAME",
    "CPG_SMTP_SENDER",
];

/// The server is configured entirely through environment variables, so any command-line argument just prints the
/// help text. Returns true if the process should exit instead of starting the server.
pub fn print_help_if_requested() -> bool {
    if env::args().nth(1).is_none() {
        return false;
    }
    println!("\n{}\n", include_str!("./cli-help.txt"));
    print_environment();
    true
}

fn print_environment() {
    println!("Current environment values (EXCLUDING variables that contain secrets):");
    for name in DISPLAY_ENVS {
        let val = env::var(name).unwrap_or_else(|e| match e {
            VarError::NotPresent => "Not set".into(),
            VarError::NotUnicode(v) => format!("Invalid value: {}", v.to_string_lossy()),
        });
        println!("  {name:<27} {val}");
    }
}
