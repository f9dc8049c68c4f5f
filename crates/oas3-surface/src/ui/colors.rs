use std::io::IsTerminal;

use clap::builder::styling::{Ansi256Color, AnsiColor, Color as ClapColor, RgbColor, Style, Styles};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy)]
pub enum Theme {
  Dark,
  Light,
}

/// One role of the palette, resolved per theme.
#[derive(Clone, Copy)]
struct Swatch {
  dark: Color,
  light: Color,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
  Color::Rgb { r, g, b }
}

const TIMESTAMP: Swatch = Swatch {
  dark: rgb(118, 166, 166),
  light: rgb(92, 62, 38),
};
const PRIMARY: Swatch = Swatch {
  dark: rgb(191, 126, 4),
  light: rgb(70, 42, 25),
};
const ACCENT: Swatch = Swatch {
  dark: rgb(166, 84, 55),
  light: rgb(211, 99, 70),
};
const INFO: Swatch = Swatch {
  dark: rgb(118, 166, 166),
  light: rgb(40, 111, 170),
};
const SUCCESS: Swatch = Swatch {
  dark: rgb(118, 166, 166),
  light: rgb(34, 142, 90),
};
const LABEL: Swatch = Swatch {
  dark: rgb(217, 164, 4),
  light: rgb(176, 103, 66),
};
const VALUE: Swatch = Swatch {
  dark: rgb(242, 211, 56),
  light: rgb(199, 146, 76),
};

pub struct Colors {
  enabled: bool,
  theme: Theme,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn pick(&self, swatch: Swatch) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    match self.theme {
      Theme::Dark => swatch.dark,
      Theme::Light => swatch.light,
    }
  }

  pub const fn timestamp(&self) -> Color {
    self.pick(TIMESTAMP)
  }

  pub const fn primary(&self) -> Color {
    self.pick(PRIMARY)
  }

  pub const fn accent(&self) -> Color {
    self.pick(ACCENT)
  }

  pub const fn info(&self) -> Color {
    self.pick(INFO)
  }

  pub const fn success(&self) -> Color {
    self.pick(SUCCESS)
  }

  pub const fn label(&self) -> Color {
    self.pick(LABEL)
  }

  pub const fn value(&self) -> Color {
    self.pick(VALUE)
  }

  /// Same palette role, converted for table cells.
  pub const fn cell(color: Color) -> ComfyColor {
    match color {
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(val) => ComfyColor::AnsiValue(val),
      _ => ComfyColor::Reset,
    }
  }

  const fn to_clap(color: Color) -> Option<ClapColor> {
    match color {
      Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
      Color::AnsiValue(val) => Some(ClapColor::Ansi256(Ansi256Color(val))),
      Color::Reset => None,
      _ => Some(ClapColor::Ansi(AnsiColor::White)),
    }
  }

  pub const fn clap_styles() -> Styles {
    let colors = Self::new(true, Theme::Dark);

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(Self::to_clap(colors.label())))
      .usage(Style::new().bold().fg_color(Self::to_clap(colors.label())))
      .literal(Style::new().fg_color(Self::to_clap(colors.success())))
      .placeholder(Style::new().fg_color(Self::to_clap(colors.info())))
      .error(Style::new().bold().fg_color(Self::to_clap(colors.accent())))
      .valid(Style::new().fg_color(Self::to_clap(colors.success())))
      .invalid(Style::new().bold().fg_color(Self::to_clap(colors.accent())))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => theme_from_env(std::env::var("COLORFGBG").ok().as_deref()),
  }
}

/// `COLORFGBG` carries `fg;bg`; background palette indexes of 8 and above are light.
fn theme_from_env(colorfgbg: Option<&str>) -> Theme {
  if let Some(value) = colorfgbg
    && let Some(bg) = value.split(';').next_back()
    && let Ok(bg_num) = bg.parse::<u8>()
    && bg_num >= 8
  {
    return Theme::Light;
  }
  Theme::Dark
}
