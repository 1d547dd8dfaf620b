use ratatui::style::Color;

/// Colour palette used by rendering code (Catppuccin Mocha).
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// Canvas background.
    pub base: Color,
    /// Darkest shade, used for text on bright buttons.
    pub crust: Color,
    /// Button and panel background.
    pub surface2: Color,
    /// Borders and captions.
    pub overlay1: Color,
    /// Primary text.
    pub text: Color,
    /// Low-emphasis text.
    pub subtext0: Color,
    /// Interactive accent (buttons, active language).
    pub sapphire: Color,
    /// Headings.
    pub mauve: Color,
    /// Selected building.
    pub yellow: Color,
    /// Unselected buildings.
    pub white: Color,
    /// Rotation active.
    pub green: Color,
}

const MOCHA: Theme = Theme {
    base: Color::Rgb(0x1e, 0x1e, 0x2e),
    crust: Color::Rgb(0x11, 0x11, 0x1b),
    surface2: Color::Rgb(0x58, 0x5b, 0x70),
    overlay1: Color::Rgb(0x7f, 0x84, 0x9c),
    text: Color::Rgb(0xcd, 0xd6, 0xf4),
    subtext0: Color::Rgb(0xa6, 0xad, 0xc8),
    sapphire: Color::Rgb(0x74, 0xc7, 0xec),
    mauve: Color::Rgb(0xcb, 0xa6, 0xf7),
    yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
    white: Color::Rgb(0xf5, 0xf5, 0xf5),
    green: Color::Rgb(0xa6, 0xe3, 0xa1),
};

/// Return the active palette.
#[must_use]
pub const fn theme() -> Theme {
    MOCHA
}
