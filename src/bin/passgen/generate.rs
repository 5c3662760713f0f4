use std::io::{self, Write};

use anyhow::Context;
use serde::Serialize;

use passgen::{ClassSet, Generated, PasswordEngine, RetryPolicy, Secret, StrengthLabel};

use crate::ProgError;

pub(crate) struct Request {
    pub classes: ClassSet,
    pub length: usize,
    pub retry: RetryPolicy,
}

impl Request {
    fn engine(&self) -> PasswordEngine {
        PasswordEngine::new(self.classes, self.length).with_retry_policy(self.retry)
    }
}

#[derive(Serialize)]
struct GeneratedJson<'a> {
    password: &'a Secret,
    strength: StrengthLabel,
}

#[derive(Serialize)]
struct RatingJson {
    length: usize,
    classes: usize,
    score: u32,
    strength: StrengthLabel,
}

/// Generate a single password, turning the infeasible sentinel into an error for display.
pub(crate) fn generate_one(request: &Request) -> Result<Secret, ProgError> {
    let mut rng = rand::thread_rng();
    match request.engine().generate(&mut rng) {
        Generated::Password(secret) => Ok(secret),
        Generated::Infeasible => Err(ProgError::Infeasible {
            classes: request.classes.count(),
            length: request.length,
        }),
    }
}

pub(crate) fn generate(
    request: &Request,
    count: usize,
    copy: bool,
    json: bool,
) -> Result<(), ProgError> {
    let passwords = (0..count)
        .map(|_| generate_one(request))
        .collect::<Result<Vec<_>, _>>()?;
    let strength = request.engine().rate();

    {
        let mut stdout = io::stdout().lock();
        for password in passwords.iter() {
            if json {
                let item = GeneratedJson { password, strength };
                serde_json::to_writer(&mut stdout, &item)
                    .context("failed to write password as JSON to stdout")?;
                writeln!(stdout).context("failed to write to stdout")?;
            } else {
                writeln!(stdout, "{}", password.as_str()).context("failed to write to stdout")?;
            }
        }
    }
    if !json {
        eprintln!("Strength: {}", strength);
    }

    if copy {
        let joined = passwords
            .iter()
            .map(Secret::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        crate::clipboard::send_to_clipboard(joined.as_bytes())?;
        eprintln!("Copied to the clipboard.");
    }
    Ok(())
}

pub(crate) fn rate(classes: &ClassSet, length: usize, json: bool) -> Result<(), ProgError> {
    let rating = RatingJson {
        length,
        classes: classes.count(),
        score: passgen::strength::score(classes, length),
        strength: passgen::strength::rate(classes, length),
    };
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer(&mut stdout, &rating)
            .context("failed to write rating as JSON to stdout")?;
        writeln!(stdout).context("failed to write to stdout")?;
    } else {
        writeln!(stdout, "{}", rating.strength).context("failed to write to stdout")?;
    }
    Ok(())
}
