// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serde adapter for terminal styles, written as words:
//! `"bold red on black"`, `"italic #00ff88"`, `"underline rgb(1,2,3)"`.

use std::borrow::Cow;

use nu_ansi_term::{Color, Style};
use serde::{de::Error, Deserialize, Deserializer, Serializer};

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("purple", Color::Purple),
    ("magenta", Color::Magenta),
    ("cyan", Color::Cyan),
    ("white", Color::White),
    ("dark_gray", Color::DarkGray),
    ("light_red", Color::LightRed),
    ("light_green", Color::LightGreen),
    ("light_yellow", Color::LightYellow),
    ("light_blue", Color::LightBlue),
    ("light_purple", Color::LightPurple),
    ("light_magenta", Color::LightMagenta),
    ("light_cyan", Color::LightCyan),
    ("light_gray", Color::LightGray),
    ("default", Color::Default),
];

fn parse_hex(input: &str) -> Option<Color> {
    if input.len() != 6 || !input.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&input[at..at + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn parse_rgb(input: &str) -> Option<Color> {
    let mut channels = input.split(',').map(|num| num.trim().parse::<u8>());
    match (channels.next(), channels.next(), channels.next(), channels.next()) {
        (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) => Some(Color::Rgb(r, g, b)),
        _ => None,
    }
}

/// Parses one color word: a name, an ANSI palette index, `#rrggbb`, or
/// `rgb(r,g,b)`.
pub fn parse_color(input: &str) -> Option<Color> {
    let input = input.to_ascii_lowercase();
    if let Some((_, color)) = NAMED_COLORS.iter().find(|(name, _)| *name == input) {
        return Some(*color);
    }
    if let Ok(index) = input.parse::<u8>() {
        return Some(Color::Fixed(index));
    }
    if let Some(hex) = input.strip_prefix('#') {
        return parse_hex(hex);
    }
    input
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
        .and_then(parse_rgb)
}

/// Parses a whole style. Words are separated by whitespace; a color
/// following `on` sets the background.
pub fn parse_style(input: &str) -> Result<Style, String> {
    let mut style = Style::new();
    let mut background = false;
    for word in input.split_whitespace() {
        match &word.to_ascii_lowercase()[..] {
            "bold" => style = style.bold(),
            "italic" => style = style.italic(),
            "dimmed" | "dim" => style = style.dimmed(),
            "underline" | "under" => style = style.underline(),
            "blink" => style = style.blink(),
            "reverse" => style = style.reverse(),
            "strikethrough" | "strike" => style = style.strikethrough(),
            "hidden" | "none" => style = style.hidden(),
            "plain" => (),
            "on" => {
                background = true;
                continue;
            }
            _ => {
                let color = parse_color(word).ok_or_else(|| format!("unknown style `{}`", word))?;
                if background {
                    style = style.on(color);
                } else {
                    style = style.fg(color);
                }
            }
        }
        background = false;
    }
    if background {
        return Err("expected a color after `on`".to_owned());
    }
    Ok(style)
}

pub fn deserialize<'de, D>(des: D) -> Result<Style, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(des)?;
    parse_style(&text).map_err(D::Error::custom)
}

fn color_name(color: Color) -> Cow<'static, str> {
    match color {
        Color::Fixed(index) => index.to_string().into(),
        Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b).into(),
        other => NAMED_COLORS
            .iter()
            .find(|(_, color)| *color == other)
            .map(|(name, _)| Cow::Borrowed(*name))
            .unwrap_or(Cow::Borrowed("default")),
    }
}

/// Writes a style back in the same word syntax.
pub fn style_to_string(style: &Style) -> String {
    let flags = [
        (style.is_bold, "bold"),
        (style.is_italic, "italic"),
        (style.is_dimmed, "dimmed"),
        (style.is_underline, "underline"),
        (style.is_blink, "blink"),
        (style.is_reverse, "reverse"),
        (style.is_strikethrough, "strikethrough"),
        (style.is_hidden, "hidden"),
    ];
    let mut words: Vec<Cow<'static, str>> = flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| Cow::Borrowed(*name))
        .collect();
    if let Some(fg) = style.foreground {
        words.push(color_name(fg));
    }
    if let Some(bg) = style.background {
        words.push("on".into());
        words.push(color_name(bg));
    }
    if words.is_empty() {
        words.push("plain".into());
    }
    words.join(" ")
}

pub fn serialize<S>(style: &Style, ser: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    ser.serialize_str(&style_to_string(style))
}
