use std::fmt;

use anyhow::{Result, bail};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Local,
    Development,
    Production,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Stage::Local => "Local",
            Stage::Development => "Development",
            Stage::Production => "Production",
        };
        write!(f, "{}", stage)
    }
}

impl Stage {
    pub fn try_from(stage: &str) -> Result<Self> {
        match stage.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Stage::Local),
            "development" | "dev" => Ok(Stage::Development),
            "production" | "prod" => Ok(Stage::Production),
            _ => bail!("Invalid stage: {stage}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_stages() {
        assert_eq!(Stage::try_from("Production").unwrap(), Stage::Production);
        assert_eq!(Stage::try_from(" dev ").unwrap(), Stage::Development);
        assert_eq!(Stage::try_from("local").unwrap(), Stage::Local);
    }

    #[test]
    fn unknown_stage_falls_back_to_local() {
        assert!(Stage::try_from("staging").is_err());
        assert_eq!(Stage::try_from("").unwrap_or_default(), Stage::Local);
    }
}
