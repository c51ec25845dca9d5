//! Password hashing utility for the Graphiti Admin API
//!
//! Generates the Argon2id hash that goes into the `password_hash` field of
//! `credentials.yaml`, so the admin password never has to be stored or
//! transmitted in plaintext.
//!
//! Usage:
//!   cargo run --bin hash-password
//!   cargo run --bin hash-password "MySecurePassword123!"

use std::env;
use std::io::{self, Write};

use graphiti_admin_api::auth::hash_password;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let password = if let Some(pwd) = env::args().nth(1) {
        // Password provided as argument
        pwd
    } else {
        // Read password from stdin (more secure - doesn't show in process list)
        print!("Enter password to hash: ");
        io::stdout().flush()?;

        let mut password = String::new();
        io::stdin().read_line(&mut password)?;
        password.trim().to_string()
    };

    if password.is_empty() {
        eprintln!("Error: Password cannot be empty");
        std::process::exit(1);
    }

    if password.len() < 12 {
        eprintln!("Warning: Password is less than 12 characters. Consider using a longer password.");
    }

    let password_hash = hash_password(&password)?;

    println!("\n===========================================");
    println!("Password Hash (Argon2id):");
    println!("===========================================");
    println!("{password_hash}");
    println!("===========================================\n");

    println!("Usage:");
    println!("Put the hash into the credentials.yaml next to your config file:");
    println!("\nusername: admin");
    println!("password_hash: \"{password_hash}\"");

    Ok(())
}
