// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::fmt::FmtToken;
use crate::style_ser;
use color_eyre::Result;
use decicalc_core::types::PRECISION;
use decicalc_core::{AngleMode, IntegralMode, Session};
use eyre::{eyre, WrapErr};
use nu_ansi_term::{Color, Style};
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs::read_to_string;
use std::io::ErrorKind;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;

pub fn config_toml_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| eyre!("Could not find config directory"))?;
    path.push("decicalc");
    path.push("config.toml");
    Ok(path)
}

pub fn history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|mut path| {
        path.push("decicalc");
        path.push("history.txt");
        path
    })
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub calc: Calc,
    pub session: SessionConfig,
    pub display: Display,
    pub colors: Colors,
    pub themes: HashMap<String, Theme>,
    // Hack because none of ansi-term's functionality is const safe.
    #[serde(skip)]
    default_theme: Theme,
    #[serde(skip)]
    disabled_theme: Theme,
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Calc {
    /// Which prompt to render when run interactively.
    pub prompt: String,
}

/// Starting modes of each new session.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub angle_mode: AngleMode,
    pub integral_mode: IntegralMode,
    /// Panel count for the quadrature rules.
    pub divisions: NonZeroU32,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    Scientific,
    Engineering,
}

impl Notation {
    pub fn name(&self) -> &'static str {
        match *self {
            Notation::Scientific => "scientific",
            Notation::Engineering => "engineering",
        }
    }
}

impl FromStr for Notation {
    type Err = decicalc_core::ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.trim().to_ascii_lowercase()[..] {
            "scientific" | "sci" => Ok(Notation::Scientific),
            "engineering" | "eng" => Ok(Notation::Engineering),
            _ => Err(decicalc_core::ErrorKind::InvalidMode),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.name())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Display {
    /// Significant digits shown for results. Evaluation itself always
    /// runs at full precision.
    pub digits: u64,
    pub notation: Notation,
}

impl Display {
    /// Largest digit count that still means something.
    pub const MAX_DIGITS: u64 = PRECISION;

    /// The configured digit count, kept within `1..=MAX_DIGITS`.
    pub fn digits(&self) -> u64 {
        self.digits.max(1).min(Display::MAX_DIGITS)
    }
}

/// Parses a digit count for display rounding.
pub fn parse_digits(text: &str) -> Result<u64, decicalc_core::ErrorKind> {
    match text.trim().parse::<u64>() {
        Ok(digits) if (1..=Display::MAX_DIGITS).contains(&digits) => Ok(digits),
        _ => Err(decicalc_core::ErrorKind::InvalidMode),
    }
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Colors {
    /// Whether support for colored output should be enabled.
    pub enabled: Option<bool>,
    /// The name of the current theme.
    pub theme: String,
}

#[derive(Serialize, Deserialize, Default, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    #[serde(with = "style_ser")]
    plain: Style,
    #[serde(with = "style_ser")]
    result: Style,
    #[serde(with = "style_ser")]
    error: Style,
    #[serde(with = "style_ser")]
    user_input: Style,
    #[serde(with = "style_ser")]
    prop_name: Style,
}

impl Theme {
    pub fn get_style(&self, token: FmtToken) -> Style {
        match token {
            FmtToken::Plain => self.plain,
            FmtToken::Result => self.result,
            FmtToken::Error => self.error,
            FmtToken::UserInput => self.user_input,
            FmtToken::PropName => self.prop_name,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            calc: Default::default(),
            session: Default::default(),
            display: Default::default(),
            colors: Default::default(),
            themes: Default::default(),
            default_theme: Theme {
                plain: Style::default(),
                result: Style::new().bold(),
                error: Style::new().fg(Color::Red),
                user_input: Style::new().bold(),
                prop_name: Style::new().fg(Color::Cyan),
            },
            disabled_theme: Theme::default(),
        }
    }
}

impl Default for Calc {
    fn default() -> Self {
        Calc {
            prompt: "> ".to_owned(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        let session = Session::new();
        SessionConfig {
            angle_mode: session.angle_mode(),
            integral_mode: session.integral_mode(),
            divisions: session.divisions(),
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Display {
            digits: 6,
            notation: Notation::Scientific,
        }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Colors {
            enabled: None,
            theme: "default".to_owned(),
        }
    }
}

impl Config {
    pub fn get_theme(&self) -> &Theme {
        let default_enable_colors = env::var("NO_COLOR") == Err(env::VarError::NotPresent);
        let colors_enabled = self.colors.enabled.unwrap_or(default_enable_colors);

        if colors_enabled {
            let name = &self.colors.theme;
            let theme = self.themes.get(name);
            theme.unwrap_or(&self.default_theme)
        } else {
            &self.disabled_theme
        }
    }

    /// A fresh session with the configured modes.
    pub fn new_session(&self) -> Session {
        let mut session = Session::new();
        session.set_angle_mode(self.session.angle_mode);
        session.set_integral_mode(self.session.integral_mode);
        session.set_divisions(self.session.divisions);
        session
    }
}

pub fn read_config(override_path: Option<&str>) -> Result<Config> {
    let path = if let Some(path) = override_path {
        PathBuf::from(path)
    } else {
        config_toml_path()?
    };
    match read_to_string(path) {
        // Hard fail if the file has invalid TOML.
        Ok(result) => toml::from_str(&result).wrap_err("While parsing config.toml"),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            if let Some(override_path) = override_path {
                // Hard fail if user-provided config path doesn't exist
                Err(eyre!(err).wrap_err(format!(
                    "Failed to read provided config file `{}`",
                    override_path
                )))
            } else {
                // Use default config if it doesn't exist.
                Ok(Config::default())
            }
        }
        // Hard fail for other IO errors (e.g. permissions).
        Err(err) => Err(eyre!(err).wrap_err("Failed to read config.toml")),
    }
}
