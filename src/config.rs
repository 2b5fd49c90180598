use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::leave::LeavePolicy;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub access_token_ttl: usize,
    pub log_dir: String,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_register_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    pub leave_policy: LeavePolicy,
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

fn or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let defaults = LeavePolicy::default();

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            access_token_ttl: or_default("ACCESS_TOKEN_TTL", 900)?, // 15 min
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),

            rate_login_per_min: or_default("RATE_LOGIN_PER_MIN", 60)?,
            rate_register_per_min: or_default("RATE_REGISTER_PER_MIN", 30)?,
            rate_protected_per_min: or_default("RATE_PROTECTED_PER_MIN", 1000)?,

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            leave_policy: LeavePolicy {
                seniority_days: or_default("LEAVE_SENIORITY_DAYS", defaults.seniority_days)?,
                junior_entitlement: or_default(
                    "LEAVE_JUNIOR_ENTITLEMENT",
                    defaults.junior_entitlement,
                )?,
                senior_entitlement: or_default(
                    "LEAVE_SENIOR_ENTITLEMENT",
                    defaults.senior_entitlement,
                )?,
                long_leave_days: or_default("LEAVE_LONG_LEAVE_DAYS", defaults.long_leave_days)?,
                junior_monthly_casual_days: or_default(
                    "LEAVE_JUNIOR_MONTHLY_CASUAL_DAYS",
                    defaults.junior_monthly_casual_days,
                )?,
            },
        })
    }
}
