use std::io::{self, BufRead, Write};
use std::process;

use crate::scene::{MassMode, SceneConfig, MASS_MAX, MASS_MIN, MAX_BODIES, MIN_BODIES};

/// Read the simulation configuration from the console, re-asking until every
/// answer is usable.
pub fn read_config() -> SceneConfig {
    println!("=== Simulation Configuration ===");

    let num_bodies = ask(
        &format!("Enter number of bodies ({MIN_BODIES}-{MAX_BODIES}): "),
        |line| match line.parse::<usize>() {
            Ok(n) if (MIN_BODIES..=MAX_BODIES).contains(&n) => Ok(n),
            Ok(_) => Err(format!(
                "Number of bodies must be between {MIN_BODIES} and {MAX_BODIES}!"
            )),
            Err(_) => Err("Please enter an integer!".to_string()),
        },
    );

    let random = ask("Generate random masses? (y/n): ", |line| {
        match line.to_ascii_lowercase().as_str() {
            "y" => Ok(true),
            "n" => Ok(false),
            _ => Err("Please choose y (yes) or n (no)!".to_string()),
        }
    });

    let masses = if random {
        MassMode::Random
    } else {
        println!("\nEnter masses for each body:");

        let mut masses = Vec::with_capacity(num_bodies);
        for i in 0..num_bodies {
            masses.push(ask(
                &format!("Mass of body {} ({MASS_MIN}-{MASS_MAX}): ", i + 1),
                |line| match line.parse::<f32>() {
                    Ok(mass) if (MASS_MIN..=MASS_MAX).contains(&mass) => Ok(mass),
                    Ok(_) => Err(format!("Mass must be between {MASS_MIN} and {MASS_MAX}!")),
                    Err(_) => Err("Please enter a valid number!".to_string()),
                },
            ));
        }

        MassMode::Explicit(masses)
    };

    SceneConfig { num_bodies, masses }
}

fn ask<T>(question: &str, parse: impl Fn(&str) -> Result<T, String>) -> T {
    let stdin = io::stdin();

    loop {
        print!("{question}");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => {
                eprintln!("stdin closed, exiting");
                process::exit(1);
            }
            Ok(_) => {}
        }

        match parse(line.trim()) {
            Ok(value) => return value,
            Err(message) => println!("{message}"),
        }
    }
}
