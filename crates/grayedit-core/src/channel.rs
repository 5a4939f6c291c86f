//! Channel selection for histogram and tone-curve operations.

use crate::CoreError;
use std::fmt;
use std::str::FromStr;

/// A channel, or the pooled RGB triple, of an RGBA buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Channel {
    /// Red samples.
    Red,
    /// Green samples.
    Green,
    /// Blue samples.
    Blue,
    /// Alpha samples.
    Alpha,
    /// Red, green and blue together.
    #[default]
    Rgb,
}

impl Channel {
    /// All selectable channels.
    pub const ALL: [Channel; 5] = [
        Channel::Red,
        Channel::Green,
        Channel::Blue,
        Channel::Alpha,
        Channel::Rgb,
    ];

    /// Sample offsets within a pixel covered by this channel.
    pub fn offsets(self) -> &'static [usize] {
        match self {
            Channel::Red => &[0],
            Channel::Green => &[1],
            Channel::Blue => &[2],
            Channel::Alpha => &[3],
            Channel::Rgb => &[0, 1, 2],
        }
    }

    /// Lowercase name used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
            Channel::Alpha => "alpha",
            Channel::Rgb => "rgb",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Channel::Red),
            "green" | "g" => Ok(Channel::Green),
            "blue" | "b" => Ok(Channel::Blue),
            "alpha" | "a" => Ok(Channel::Alpha),
            "rgb" => Ok(Channel::Rgb),
            _ => Err(CoreError::UnknownChannel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for ch in Channel::ALL {
            assert_eq!(ch.name().parse::<Channel>().unwrap(), ch);
        }
        assert_eq!("G".parse::<Channel>().unwrap(), Channel::Green);
        assert!("luma".parse::<Channel>().is_err());
    }

    #[test]
    fn test_offsets() {
        assert_eq!(Channel::Rgb.offsets(), &[0, 1, 2]);
        assert_eq!(Channel::Alpha.offsets(), &[3]);
    }
}
