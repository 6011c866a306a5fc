use parley_types::validators::{validate_email, validate_phone};
use parley_types::{PasswordLoginRequest, RegisterRequest, ResetPasswordRequest, UpdateUserInfo};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "parley.toml";

pub const USAGE: &str = "\
usage: parley-console [--config <path>] <command>

commands:
  register-code <phone>
  reset-code <phone>
  register <phone> <code> <password>
  login <phone> <password>
  reset-password <phone> <code> <password>
  info
  update-info [--username <name>] [--email <email>] [--avatar <url>]
  logout";

#[derive(Debug, Error, PartialEq)]
pub enum CliError {
    #[error("{0}\n\n{USAGE}")]
    Usage(String),
    #[error("invalid mobile number: {0}")]
    InvalidPhone(String),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

#[derive(Debug, PartialEq)]
pub enum Command {
    RegisterCode { phone: String },
    ResetCode { phone: String },
    Register(RegisterRequest),
    Login(PasswordLoginRequest),
    ResetPassword(ResetPasswordRequest),
    Info,
    UpdateInfo(UpdateUserInfo),
    Logout,
}

#[derive(Debug, PartialEq)]
pub struct Invocation {
    pub config_path: String,
    pub command: Command,
}

pub fn parse(args: &[String]) -> Result<Invocation, CliError> {
    let mut configPath = DEFAULT_CONFIG_PATH.to_string();
    let mut rest = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            configPath = iter
                .next()
                .cloned()
                .ok_or_else(|| CliError::Usage("--config needs a path".into()))?;
        } else {
            rest.push(arg.as_str());
        }
    }

    let Some((name, operands)) = rest.split_first() else {
        return Err(CliError::Usage("missing command".into()));
    };

    let command = match (*name, operands) {
        ("register-code", [phone]) => Command::RegisterCode {
            phone: checked_phone(phone)?,
        },
        ("reset-code", [phone]) => Command::ResetCode {
            phone: checked_phone(phone)?,
        },
        ("register", [phone, code, password]) => Command::Register(RegisterRequest {
            phone: checked_phone(phone)?,
            code: code.to_string(),
            password: password.to_string(),
        }),
        ("login", [phone, password]) => Command::Login(PasswordLoginRequest {
            phone: checked_phone(phone)?,
            password: password.to_string(),
        }),
        ("reset-password", [phone, code, password]) => {
            Command::ResetPassword(ResetPasswordRequest {
                phone: checked_phone(phone)?,
                code: code.to_string(),
                password: password.to_string(),
            })
        }
        ("info", []) => Command::Info,
        ("update-info", flags) => Command::UpdateInfo(parse_update(flags)?),
        ("logout", []) => Command::Logout,
        (other, _) => {
            return Err(CliError::Usage(format!(
                "unknown command or wrong arguments: {other}"
            )))
        }
    };

    Ok(Invocation {
        config_path: configPath,
        command,
    })
}

fn checked_phone(phone: &str) -> Result<String, CliError> {
    if !validate_phone(phone) {
        return Err(CliError::InvalidPhone(phone.to_string()));
    }
    Ok(phone.to_string())
}

fn parse_update(flags: &[&str]) -> Result<UpdateUserInfo, CliError> {
    let mut update = UpdateUserInfo::default();
    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .map(|value| value.to_string())
            .ok_or_else(|| CliError::Usage(format!("{flag} needs a value")))?;
        match *flag {
            "--username" => update.username = Some(value),
            "--email" => {
                if !validate_email(&value) {
                    return Err(CliError::InvalidEmail(value));
                }
                update.email = Some(value);
            }
            "--avatar" => update.avatar = Some(value),
            other => return Err(CliError::Usage(format!("unknown flag {other}"))),
        }
    }
    if update.is_empty() {
        return Err(CliError::Usage("update-info needs at least one field".into()));
    }
    Ok(update)
}
