use color_eyre::eyre::eyre;
use color_eyre::Result;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use supports_color::Stream;
use tracing_subscriber::EnvFilter;

pub const CONFIG_FILE: &str = "config.toml";
const CONFIG_VERSION: &str = "0.1";

/// Manages config directory and config file operations
#[derive(Clone)]
pub struct ConfigManager {
    pub(crate) config_dir: PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager with a custom config directory (primarily for testing)
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Create a new ConfigManager for the given app name
    pub fn new(app_name: &str) -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| eyre!("Could not determine config directory"))?
            .join(app_name);

        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self, path: &str) -> PathBuf {
        self.config_dir.join(path)
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Default configuration as a TOML template.
    /// Every field is commented out so the built-in defaults stay in effect until uncommented.
    pub fn generate_default_config(&self) -> Result<String> {
        let toml_str = toml::to_string_pretty(&AppConfig::default())
            .map_err(|e| eyre!("Failed to serialize default config: {}", e))?;
        Ok(Self::comment_all_fields(&toml_str, &Self::collect_all_comments()))
    }

    fn collect_all_comments() -> HashMap<String, String> {
        let sections: [(&str, &[(&str, &str)]); 6] = [
            ("", APP_COMMENTS),
            ("server", SERVER_COMMENTS),
            ("export", EXPORT_COMMENTS),
            ("logging", LOGGING_COMMENTS),
            ("theme.colors", COLOR_COMMENTS),
            ("debug", DEBUG_COMMENTS),
        ];
        let mut comments = HashMap::new();
        for (section, fields) in sections {
            for (field, comment) in fields {
                let key = if section.is_empty() {
                    field.to_string()
                } else {
                    format!("{}.{}", section, field)
                };
                comments.insert(key, comment.to_string());
            }
        }
        comments
    }

    fn comment_all_fields(toml: &str, comments: &HashMap<String, String>) -> String {
        let mut result = String::new();
        result.push_str("# plotpick configuration file\n");
        result
            .push_str("# This file uses TOML format. See https://toml.io/ for syntax reference.\n");
        result.push('\n');

        let mut current_section = String::new();
        let mut seen_fields = HashSet::new();

        for line in toml.lines() {
            if let Some(section) = Self::extract_section_name(line) {
                if let Some((_, header)) = SECTION_HEADERS.iter().find(|(s, _)| *s == section) {
                    result.push_str(header);
                    result.push('\n');
                }
                result.push_str("# ");
                result.push_str(line);
                result.push('\n');
                current_section = section;
                continue;
            }

            match Self::extract_field_path(line, &current_section) {
                Some(field_path) => {
                    push_comment(&mut result, comments.get(&field_path));
                    result.push_str("# ");
                    result.push_str(line);
                    result.push('\n');
                    seen_fields.insert(field_path);
                }
                None => {
                    result.push_str(line);
                    result.push('\n');
                }
            }
        }

        Self::add_missing_option_fields(result, comments, &seen_fields)
    }

    /// `None` fields are skipped by the serializer; list them as `# field = null`.
    fn add_missing_option_fields(
        mut result: String,
        comments: &HashMap<String, String>,
        seen_fields: &HashSet<String>,
    ) -> String {
        for field_path in OPTION_FIELDS {
            if seen_fields.contains(*field_path) {
                continue;
            }
            let Some((section, field_name)) = field_path.rsplit_once('.') else {
                continue;
            };
            let section_header = format!("# [{}]\n", section);
            let mut new_content = String::new();
            push_comment(&mut new_content, comments.get(*field_path));
            new_content.push_str(&format!("# {} = null\n", field_name));
            match result.find(&section_header) {
                Some(pos) => result.insert_str(pos + section_header.len(), &new_content),
                None => {
                    // A table whose fields are all `None` may not be serialized at all
                    result.push('\n');
                    result.push_str(&section_header);
                    result.push_str(&new_content);
                }
            }
        }
        result
    }

    /// Section name from a header line like `[server]` or `[theme.colors]`
    fn extract_section_name(line: &str) -> Option<String> {
        let trimmed = line.trim();
        trimmed
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .map(str::to_string)
    }

    fn extract_field_path(line: &str, current_section: &str) -> Option<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('[') {
            return None;
        }
        let (field_name, _) = trimmed.split_once('=')?;
        let field_name = field_name.trim();
        if current_section.is_empty() {
            Some(field_name.to_string())
        } else {
            Some(format!("{}.{}", current_section, field_name))
        }
    }

    /// Write the default template to `config.toml`, refusing to overwrite unless `force`.
    pub fn write_default_config(&self, force: bool) -> Result<PathBuf> {
        let config_path = self.config_path(CONFIG_FILE);

        if config_path.exists() && !force {
            return Err(eyre!(
                "Config file already exists at {}. Use --force to overwrite.",
                config_path.display()
            ));
        }

        self.ensure_config_dir()?;
        std::fs::write(&config_path, self.generate_default_config()?)?;

        Ok(config_path)
    }
}

fn push_comment(out: &mut String, comment: Option<&String>) {
    if let Some(comment) = comment {
        for comment_line in comment.lines() {
            out.push_str("# ");
            out.push_str(comment_line);
            out.push('\n');
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration format version (for future compatibility)
    pub version: String,
    pub server: ServerConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
    pub theme: ThemeConfig,
    pub debug: DebugConfig,
}

const APP_COMMENTS: &[(&str, &str)] = &[(
    "version",
    "Configuration format version (for future compatibility)",
)];

const SECTION_HEADERS: &[(&str, &str)] = &[
    (
        "server",
        "# ============================================================================\n# Chart Server\n# ============================================================================",
    ),
    (
        "export",
        "# ============================================================================\n# Image Export\n# ============================================================================",
    ),
    (
        "logging",
        "# ============================================================================\n# Logging\n# ============================================================================\n# RUST_LOG and --log-level take precedence over the level set here.",
    ),
    (
        "theme",
        "# ============================================================================\n# Color Theme\n# ============================================================================",
    ),
    (
        "theme.colors",
        "# Supported formats:\n#   - Named colors: \"red\", \"blue\", \"bright_red\", \"dark_gray\", etc. (case-insensitive)\n#   - Hex colors: \"#ff0000\"\n#   - Indexed colors: \"indexed(0-255)\"\n# Set NO_COLOR to disable colors entirely",
    ),
    (
        "debug",
        "# ============================================================================\n# Debug Settings\n# ============================================================================",
    ),
];

/// Fields that serialize to nothing when `None`.
const OPTION_FIELDS: &[&str] = &["server.timeout_secs", "export.image_dir", "logging.file"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub catalog_path: String,
    pub generate_path: String,
    /// Request timeout; `None` waits for the server indefinitely.
    pub timeout_secs: Option<u64>,
}

const SERVER_COMMENTS: &[(&str, &str)] = &[
    ("base_url", "Base URL of the chart server"),
    (
        "catalog_path",
        "Endpoint that returns the possible graphs for an uploaded dataset",
    ),
    (
        "generate_path",
        "Endpoint that renders the selected graphs",
    ),
    (
        "timeout_secs",
        "Request timeout in seconds\nWhen unset, requests wait for the server indefinitely",
    ),
];

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            catalog_path: "/data_visualization/visualize/".to_string(),
            generate_path: "/data_visualization/generate_graph".to_string(),
            timeout_secs: None,
        }
    }
}

impl ServerConfig {
    pub fn merge(&mut self, other: Self) {
        let default = ServerConfig::default();
        if other.base_url != default.base_url {
            self.base_url = other.base_url;
        }
        if other.catalog_path != default.catalog_path {
            self.catalog_path = other.catalog_path;
        }
        if other.generate_path != default.generate_path {
            self.generate_path = other.generate_path;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory chart images are saved to from the terminal UI.
    pub image_dir: Option<PathBuf>,
}

const EXPORT_COMMENTS: &[(&str, &str)] = &[(
    "image_dir",
    "Directory the save-images key writes charts to\nDefaults to ./plotpick-charts when unset",
)];

impl ExportConfig {
    pub fn merge(&mut self, other: Self) {
        if other.image_dir.is_some() {
            self.image_dir = other.image_dir;
        }
    }

    pub fn image_dir_or_default(&self) -> PathBuf {
        self.image_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("plotpick-charts"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. "info" or "plotpick=debug".
    pub level: String,
    /// Log file for the terminal UI. Unset = plotpick.log in the cache directory.
    pub file: Option<PathBuf>,
}

const LOGGING_COMMENTS: &[(&str, &str)] = &[
    (
        "level",
        "Log filter directive (trace, debug, info, warn, error or module=level)",
    ),
    (
        "file",
        "Log file used by the terminal UI\nDefaults to plotpick.log in the cache directory when unset",
    ),
];

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn merge(&mut self, other: Self) {
        if other.level != LoggingConfig::default().level {
            self.level = other.level;
        }
        if other.file.is_some() {
            self.file = other.file;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub colors: ColorConfig,
}

impl ThemeConfig {
    pub fn merge(&mut self, other: Self) {
        self.colors.merge(other.colors);
    }
}

/// Color settings for the terminal UI.
///
/// Values are named colors ("cyan"), hex ("#ff0000"), indexed ("indexed(236)")
/// or the special values "default" and "reversed".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub keybind_hints: String,
    pub keybind_labels: String,
    pub throbber: String,
    pub success: String,
    pub error: String,
    pub warning: String,
    pub dimmed: String,
    pub background: String,
    pub surface: String,
    pub controls_bg: String,
    pub text_primary: String,
    pub text_secondary: String,
    pub text_inverse: String,
    pub pane_border: String,
    pub pane_border_focused: String,
    pub list_selected: String,
    pub chart_title: String,
    pub modal_border_active: String,
    pub modal_border_error: String,
    pub cursor_focused: String,
}

const COLOR_COMMENTS: &[(&str, &str)] = &[
    ("keybind_hints", "Keybind hints in modals and the control bar"),
    ("keybind_labels", "Action labels in controls bar"),
    ("throbber", "Busy indicator (spinner) while a request is in flight"),
    ("success", "Success messages"),
    ("error", "Error messages and failed chart cards"),
    ("warning", "Warnings, empty selection slots"),
    ("dimmed", "Dimmed elements, placeholders"),
    ("background", "Main background"),
    ("surface", "Modal/surface backgrounds"),
    ("controls_bg", "Controls bar background"),
    ("text_primary", "Primary text"),
    ("text_secondary", "Secondary text, axis lines on chart cards"),
    ("text_inverse", "Text on light backgrounds"),
    ("pane_border", "Border of unfocused panes"),
    ("pane_border_focused", "Border of the focused pane"),
    ("list_selected", "Highlighted list row"),
    ("chart_title", "Chart card titles"),
    ("modal_border_active", "Active modal elements"),
    ("modal_border_error", "Error modal borders"),
    (
        "cursor_focused",
        "Cursor color when text input is focused\nText under cursor uses reverse of this color",
    ),
];

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            keybind_hints: "cyan".to_string(),
            keybind_labels: "indexed(252)".to_string(),
            throbber: "cyan".to_string(),
            success: "green".to_string(),
            error: "red".to_string(),
            warning: "yellow".to_string(),
            dimmed: "dark_gray".to_string(),
            background: "default".to_string(),
            surface: "default".to_string(),
            controls_bg: "indexed(235)".to_string(),
            text_primary: "default".to_string(),
            text_secondary: "indexed(245)".to_string(),
            text_inverse: "black".to_string(),
            pane_border: "indexed(238)".to_string(),
            pane_border_focused: "cyan".to_string(),
            list_selected: "reversed".to_string(),
            chart_title: "magenta".to_string(),
            modal_border_active: "yellow".to_string(),
            modal_border_error: "red".to_string(),
            cursor_focused: "default".to_string(),
        }
    }
}

impl ColorConfig {
    /// Every color setting with its config key, in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 20] {
        [
            ("keybind_hints", self.keybind_hints.as_str()),
            ("keybind_labels", self.keybind_labels.as_str()),
            ("throbber", self.throbber.as_str()),
            ("success", self.success.as_str()),
            ("error", self.error.as_str()),
            ("warning", self.warning.as_str()),
            ("dimmed", self.dimmed.as_str()),
            ("background", self.background.as_str()),
            ("surface", self.surface.as_str()),
            ("controls_bg", self.controls_bg.as_str()),
            ("text_primary", self.text_primary.as_str()),
            ("text_secondary", self.text_secondary.as_str()),
            ("text_inverse", self.text_inverse.as_str()),
            ("pane_border", self.pane_border.as_str()),
            ("pane_border_focused", self.pane_border_focused.as_str()),
            ("list_selected", self.list_selected.as_str()),
            ("chart_title", self.chart_title.as_str()),
            ("modal_border_active", self.modal_border_active.as_str()),
            ("modal_border_error", self.modal_border_error.as_str()),
            ("cursor_focused", self.cursor_focused.as_str()),
        ]
    }

    fn validate(&self, parser: &ColorParser) -> Result<()> {
        for (name, value) in self.entries() {
            parser.parse(value).map_err(|e| {
                eyre!(
                    "theme.colors.{}: {}. Use a valid color name (e.g. red, cyan, bright_red), \
                     hex (#rrggbb), or indexed(0-255)",
                    name,
                    e
                )
            })?;
        }
        Ok(())
    }

    pub fn merge(&mut self, other: Self) {
        let default = ColorConfig::default();
        macro_rules! take_if_set {
            ($($field:ident),* $(,)?) => {
                $(
                    if other.$field != default.$field {
                        self.$field = other.$field;
                    }
                )*
            };
        }
        take_if_set!(
            keybind_hints,
            keybind_labels,
            throbber,
            success,
            error,
            warning,
            dimmed,
            background,
            surface,
            controls_bg,
            text_primary,
            text_secondary,
            text_inverse,
            pane_border,
            pane_border_focused,
            list_selected,
            chart_title,
            modal_border_active,
            modal_border_error,
            cursor_focused,
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub enabled: bool,
}

const DEBUG_COMMENTS: &[(&str, &str)] = &[(
    "enabled",
    "Show the debug row (phase, last request, timings) by default",
)];

impl DebugConfig {
    pub fn merge(&mut self, other: Self) {
        if other.enabled {
            self.enabled = true;
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            server: ServerConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
            theme: ThemeConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from all layers (default → user)
    pub fn load(app_name: &str) -> Result<Self> {
        Self::load_with(&ConfigManager::new(app_name)?)
    }

    /// Load using an explicit config directory.
    pub fn load_with(manager: &ConfigManager) -> Result<Self> {
        let config_path = manager.config_path(CONFIG_FILE);
        let mut config = AppConfig::default();
        if let Some(user_config) = Self::load_user_config(&config_path)? {
            config.merge(user_config);
        }

        config.validate().map_err(|e| {
            eyre!(
                "Invalid configuration in {}: {}",
                config_path.display(),
                e
            )
        })?;

        Ok(config)
    }

    fn load_user_config(config_path: &Path) -> Result<Option<AppConfig>> {
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|e| {
            eyre!(
                "Failed to read config file at {}: {}",
                config_path.display(),
                e
            )
        })?;

        toml::from_str(&content).map(Some).map_err(|e| {
            eyre!(
                "Failed to parse config file at {}: {}",
                config_path.display(),
                e
            )
        })
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: AppConfig) {
        if other.version != AppConfig::default().version {
            self.version = other.version;
        }
        self.server.merge(other.server);
        self.export.merge(other.export);
        self.logging.merge(other.logging);
        self.theme.merge(other.theme);
        self.debug.merge(other.debug);
    }

    pub fn validate(&self) -> Result<()> {
        if !self.version.starts_with(CONFIG_VERSION) {
            return Err(eyre!(
                "Unsupported config version: {}. Expected {}.x",
                self.version,
                CONFIG_VERSION
            ));
        }

        let base = &self.server.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(eyre!(
                "server.base_url must start with http:// or https://, got {}",
                base
            ));
        }

        if self.server.timeout_secs == Some(0) {
            return Err(eyre!("server.timeout_secs must be greater than 0 when set"));
        }

        EnvFilter::try_new(&self.logging.level)
            .map_err(|e| eyre!("logging.level '{}': {}", self.logging.level, e))?;

        self.theme.colors.validate(&ColorParser::new())?;

        Ok(())
    }
}

/// Color parser with terminal capability detection
pub struct ColorParser {
    supports_true_color: bool,
    supports_256: bool,
    no_color: bool,
}

impl ColorParser {
    pub fn new() -> Self {
        let no_color = std::env::var("NO_COLOR").is_ok();
        let support = supports_color::on(Stream::Stdout);

        Self {
            supports_true_color: support.as_ref().map(|s| s.has_16m).unwrap_or(false),
            supports_256: support.as_ref().map(|s| s.has_256).unwrap_or(false),
            no_color,
        }
    }

    /// Parser with fixed capabilities, independent of the current terminal.
    pub fn with_capabilities(supports_true_color: bool, supports_256: bool) -> Self {
        Self {
            supports_true_color,
            supports_256,
            no_color: false,
        }
    }

    /// Parse a color string (hex, indexed or named) into a terminal color
    pub fn parse(&self, s: &str) -> Result<Color> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();

        let color = if trimmed.starts_with('#') {
            let (r, g, b) = parse_hex(trimmed)?;
            self.convert_rgb_to_terminal_color(r, g, b)
        } else if let Some(num_str) = lower
            .strip_prefix("indexed(")
            .and_then(|s| s.strip_suffix(')'))
        {
            let num = num_str.trim().parse::<u8>().map_err(|_| {
                eyre!(
                    "Invalid indexed color: '{}'. Expected format: indexed(0-255)",
                    trimmed
                )
            })?;
            Color::Indexed(num)
        } else {
            named_color(&lower).ok_or_else(|| {
                eyre!(
                    "Unknown color name: '{}'. Supported: basic ANSI colors (red, blue, etc.), \
                     bright variants (bright_red, etc.), or hex colors (#ff0000)",
                    trimmed
                )
            })?
        };

        // Still validated above so a bad config is reported even with NO_COLOR set
        if self.no_color {
            return Ok(Color::Reset);
        }
        Ok(color)
    }

    fn convert_rgb_to_terminal_color(&self, r: u8, g: u8, b: u8) -> Color {
        if self.supports_true_color {
            Color::Rgb(r, g, b)
        } else if self.supports_256 {
            Color::Indexed(rgb_to_256_color(r, g, b))
        } else {
            rgb_to_basic_ansi(r, g, b)
        }
    }
}

impl Default for ColorParser {
    fn default() -> Self {
        Self::new()
    }
}

fn named_color(lower: &str) -> Option<Color> {
    let color = match lower.replace(' ', "_").as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "bright_black" | "gray" | "grey" | "dark_gray" | "dark_grey" => Color::Indexed(8),
        "bright_red" => Color::Indexed(9),
        "bright_green" => Color::Indexed(10),
        "bright_yellow" => Color::Indexed(11),
        "bright_blue" => Color::Indexed(12),
        "bright_magenta" => Color::Indexed(13),
        "bright_cyan" => Color::Indexed(14),
        "bright_white" => Color::Indexed(15),
        "light_gray" | "light_grey" => Color::Indexed(7),
        // Special values; "reversed" is applied as a modifier when rendering
        "reset" | "default" | "none" | "reversed" => Color::Reset,
        _ => return None,
    };
    Some(color)
}

fn parse_hex(s: &str) -> Result<(u8, u8, u8)> {
    let hex = s
        .strip_prefix('#')
        .filter(|h| h.len() == 6 && h.is_ascii())
        .ok_or_else(|| {
            eyre!(
                "Invalid hex color format: '{}'. Expected format: #rrggbb",
                s
            )
        })?;
    let component = |range: std::ops::Range<usize>, name: &str| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| eyre!("Invalid {} component in hex color: {}", name, s))
    };
    Ok((
        component(0..2, "red")?,
        component(2..4, "green")?,
        component(4..6, "blue")?,
    ))
}

/// Nearest entry of the xterm 256-color palette
pub fn rgb_to_256_color(r: u8, g: u8, b: u8) -> u8 {
    let max_diff = r.max(g).max(b) as i16 - r.min(g).min(b) as i16;
    if max_diff < 10 {
        // Grayscale ramp (232-255)
        let gray = (r as u16 + g as u16 + b as u16) / 3;
        return match gray {
            0..=7 => 16,
            248.. => 231,
            _ => 232 + ((gray - 8) * 24 / 240) as u8,
        };
    }

    // 6x6x6 color cube (16-231)
    let idx = |c: u8| (c as u16 * 5 / 255) as u8;
    16 + 36 * idx(r) + 6 * idx(g) + idx(b)
}

/// Nearest of the 8 basic ANSI colors
pub fn rgb_to_basic_ansi(r: u8, g: u8, b: u8) -> Color {
    let max_diff = r.max(g).max(b) as i16 - r.min(g).min(b) as i16;
    if max_diff < 30 {
        let avg = (r as u16 + g as u16 + b as u16) / 3;
        return if avg < 64 { Color::Black } else { Color::White };
    }

    match (r > 128, g > 128, b > 128) {
        (false, false, false) => Color::Black,
        (true, false, false) => Color::Red,
        (false, true, false) => Color::Green,
        (true, true, false) => Color::Yellow,
        (false, false, true) => Color::Blue,
        (true, false, true) => Color::Magenta,
        (false, true, true) => Color::Cyan,
        (true, true, true) => Color::White,
    }
}

/// Theme containing parsed colors ready for use
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub colors: HashMap<String, Color>,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Result<Self> {
        Self::from_config_with(config, &ColorParser::new())
    }

    pub fn from_config_with(config: &ThemeConfig, parser: &ColorParser) -> Result<Self> {
        let colors = config
            .colors
            .entries()
            .into_iter()
            .map(|(name, value)| Ok((name.to_string(), parser.parse(value)?)))
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Self { colors })
    }

    /// Color by name, `Reset` if unknown
    pub fn get(&self, name: &str) -> Color {
        self.colors.get(name).copied().unwrap_or(Color::Reset)
    }

    pub fn get_optional(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }
}
