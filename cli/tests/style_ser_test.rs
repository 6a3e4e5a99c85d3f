// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use nu_ansi_term::Color::*;
use nu_ansi_term::Style;
use serde_derive::{Deserialize, Serialize};

use decicalc::style_ser::{parse_color, parse_style};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Wrap {
    #[serde(with = "decicalc::style_ser")]
    style: Style,
}

#[test]
fn roundtrip() {
    fn check(style: Style) {
        let style = Wrap { style };
        let toml_str = toml::to_string(&style).unwrap();
        let des = toml::from_str::<Wrap>(&toml_str).unwrap();
        assert_eq!(style, des, "{}", toml_str);
    }

    let tests = [
        Black,
        Red,
        Green,
        Yellow,
        Blue,
        Purple,
        Magenta,
        Cyan,
        White,
        DarkGray,
        LightRed,
        LightGreen,
        LightYellow,
        LightBlue,
        LightPurple,
        LightMagenta,
        LightCyan,
        LightGray,
        nu_ansi_term::Color::Default,
        Fixed(0),
        Fixed(255),
        Rgb(0, 0, 0),
        Rgb(255, 255, 255),
        Rgb(1, 2, 3),
    ];
    for test in tests.iter() {
        check(Style::new().fg(*test));
        check(Style::new().on(*test));
        check(Style::new().fg(*test).on(*test));
    }
    check(Style::new().fg(Red).on(Black).dimmed().underline());
    check(Style::new().bold().italic().reverse().strikethrough());
    check(Style::new());
}

#[test]
fn parse_colors() {
    assert_eq!(parse_color("black"), Some(Black));
    assert_eq!(parse_color("Red"), Some(Red));
    assert_eq!(parse_color("#123456"), Some(Rgb(0x12, 0x34, 0x56)));
    assert_eq!(parse_color("rgb(1, 2, 3)"), Some(Rgb(1, 2, 3)));
    assert_eq!(parse_color("200"), Some(Fixed(200)));
    assert_eq!(parse_color(""), None);
    assert_eq!(parse_color("asdf"), None);
    assert_eq!(parse_color("#123"), None);
    assert_eq!(parse_color("#1234"), None);
    assert_eq!(parse_color("#123456789"), None);
    assert_eq!(parse_color("#abc"), None);
    assert_eq!(parse_color("rgb(1,2)"), None);
    assert_eq!(parse_color("rgb(1,2,3,4)"), None);
    assert_eq!(parse_color("256"), None);
}

#[test]
fn parse_styles() {
    assert_eq!(parse_style("bold red"), Ok(Style::new().bold().fg(Red)));
    assert_eq!(
        parse_style("  italic  on   #00ff88 "),
        Ok(Style::new().italic().on(Rgb(0, 255, 136)))
    );
    assert_eq!(parse_style("plain"), Ok(Style::new()));
    assert_eq!(parse_style(""), Ok(Style::new()));
    assert!(parse_style("bold on").is_err());
    assert!(parse_style("shiny").is_err());
}
