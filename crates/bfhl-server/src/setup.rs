// Interactive `bfhl setup`: prompt for identity details and persist them.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use bfhl_core::identity::{is_valid_birth_date, is_valid_email, normalize_full_name};
use bfhl_core::UserInfo;
use thiserror::Error;
use tracing::info;

use crate::config::{self, Config, ConfigError, ServerConfig};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("all fields are required (missing {field})")]
    MissingField { field: &'static str },

    #[error("birth date must be in DDMMYYYY format (8 digits), got {value:?}")]
    InvalidBirthDate { value: String },

    #[error("please enter a valid email address, got {value:?}")]
    InvalidEmail { value: String },

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Ask for the four identity fields on `input`, echoing prompts to `output`.
///
/// The full name is lower-cased and its words joined with underscores.
/// Every field is required; the birth date and email are checked before
/// anything is returned.
pub fn prompt_identity<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<UserInfo, SetupError> {
    let full_name = normalize_full_name(&ask(
        input,
        output,
        "Enter your full name (e.g., John Doe): ",
    )?);
    let birth_date = ask(
        input,
        output,
        "Enter your birth date (DDMMYYYY format, e.g., 17091999): ",
    )?;
    let email = ask(input, output, "Enter your email address: ")?;
    let roll_number = ask(input, output, "Enter your college roll number: ")?;

    let fields = [
        ("full name", &full_name),
        ("birth date", &birth_date),
        ("email", &email),
        ("roll number", &roll_number),
    ];
    if let Some(&(field, _)) = fields.iter().find(|(_, v)| v.is_empty()) {
        return Err(SetupError::MissingField { field });
    }

    if !is_valid_birth_date(&birth_date) {
        return Err(SetupError::InvalidBirthDate { value: birth_date });
    }
    if !is_valid_email(&email) {
        return Err(SetupError::InvalidEmail { value: email });
    }

    Ok(UserInfo {
        full_name,
        birth_date,
        email,
        roll_number,
    })
}

/// Run the full setup flow: prompt, write `config/bfhl.toml` under
/// `base_dir` (keeping any existing `[server]` section), and print a summary.
pub fn run<R: BufRead, W: Write>(
    base_dir: &Path,
    input: &mut R,
    output: &mut W,
) -> Result<PathBuf, SetupError> {
    writeln!(output, "BFHL API setup - enter your details")?;
    writeln!(output)?;

    let identity = prompt_identity(input, output)?;

    let server = match config::read_config_file(base_dir) {
        Ok(existing) => existing.server,
        Err(_) => ServerConfig::default(),
    };
    let config = Config { server, identity };
    let path = config::write_config(base_dir, &config)?;
    info!("Identity written to {}", path.display());

    let id = &config.identity;
    writeln!(output)?;
    writeln!(output, "Configuration saved to {}", path.display())?;
    writeln!(output, "  Name:        {}", id.full_name)?;
    writeln!(output, "  Birth Date:  {}", id.birth_date)?;
    writeln!(output, "  Email:       {}", id.email)?;
    writeln!(output, "  Roll Number: {}", id.roll_number)?;
    writeln!(output, "  User ID:     {}", id.user_id())?;
    writeln!(output)?;
    writeln!(output, "Start the server with: bfhl serve")?;

    Ok(path)
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> std::io::Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
