use std::fmt;

use serde::Deserialize;

/// Display color of one host series, parsed from a CSS base color name or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct HostColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0x00, 0x00, 0x00)),
    ("blue", (0x00, 0x00, 0xff)),
    ("brown", (0xa5, 0x2a, 0x2a)),
    ("cyan", (0x00, 0xff, 0xff)),
    ("gray", (0x80, 0x80, 0x80)),
    ("green", (0x00, 0x80, 0x00)),
    ("grey", (0x80, 0x80, 0x80)),
    ("lime", (0x00, 0xff, 0x00)),
    ("magenta", (0xff, 0x00, 0xff)),
    ("maroon", (0x80, 0x00, 0x00)),
    ("navy", (0x00, 0x00, 0x80)),
    ("olive", (0x80, 0x80, 0x00)),
    ("orange", (0xff, 0xa5, 0x00)),
    ("pink", (0xff, 0xc0, 0xcb)),
    ("purple", (0x80, 0x00, 0x80)),
    ("red", (0xff, 0x00, 0x00)),
    ("teal", (0x00, 0x80, 0x80)),
    ("yellow", (0xff, 0xff, 0x00)),
];

impl HostColor {
    pub fn parse(input: &str) -> Option<Self> {
        let value = input.trim().to_lowercase();
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex);
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == value)
            .map(|(_, (r, g, b))| Self {
                r: *r,
                g: *g,
                b: *b,
            })
    }
}

fn parse_hex(hex: &str) -> Option<HostColor> {
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
    };

    match hex.len() {
        6 => Some(HostColor {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        }),
        3 => Some(HostColor {
            r: channel(0..1)? * 0x11,
            g: channel(1..2)? * 0x11,
            b: channel(2..3)? * 0x11,
        }),
        _ => None,
    }
}

impl TryFrom<String> for HostColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| {
            format!(
                "unknown color `{}` (expected a base color name or #rrggbb)",
                value
            )
        })
    }
}

impl fmt::Display for HostColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
