use backdrop::SceneSettings;
use clap::{ArgAction, Parser};

/// `backdrop_viewer` - animated starfield, floating solids and wireframe globe.
///
/// Renders the decorative backdrop in a native window. The camera drifts
/// towards the mouse pointer.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Initial window width in logical pixels.
    #[arg(long, env = "BACKDROP_WIDTH", default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in logical pixels.
    #[arg(long, env = "BACKDROP_HEIGHT", default_value_t = 720)]
    pub height: u32,

    /// Seed for the scene layout. A fresh layout is drawn on every start
    /// when omitted.
    #[arg(long, env = "BACKDROP_SEED")]
    pub seed: Option<u64>,

    /// Number of floating bodies.
    #[arg(long, env = "BACKDROP_BODIES", default_value_t = 15)]
    pub bodies: usize,

    /// Number of points in the starfield.
    #[arg(long, env = "BACKDROP_PARTICLES", default_value_t = 2000)]
    pub particles: usize,

    /// Upper bound on drawing-buffer pixels per logical pixel.
    ///
    /// High-density displays are rendered at most at this ratio to keep the
    /// fill rate down.
    #[arg(long, env = "BACKDROP_MAX_PIXEL_RATIO", default_value_t = 2.0)]
    pub max_pixel_ratio: f64,

    /// Disable 4x multisample antialiasing.
    #[arg(long = "no-antialias", action = ArgAction::SetFalse)]
    pub antialias: bool,

    /// Clear to an opaque background instead of a transparent one.
    #[arg(long, env = "BACKDROP_OPAQUE")]
    pub opaque: bool,
}

impl Config {
    /// Scene settings with the configured counts and stock everything else.
    pub fn scene_settings(&self) -> SceneSettings {
        let mut settings = SceneSettings::default();
        settings.bodies.count = self.bodies;
        settings.particles.count = self.particles;
        settings
    }

    pub fn sample_count(&self) -> u32 {
        if self.antialias {
            4
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["backdrop_viewer"]).unwrap();
        assert_eq!((config.width, config.height), (1280, 720));
        assert_eq!(config.seed, None);
        assert!(config.antialias);
        assert!(!config.opaque);
        assert_eq!(config.sample_count(), 4);

        let settings = config.scene_settings();
        assert_eq!(settings.bodies.count, 15);
        assert_eq!(settings.particles.count, 2000);
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "backdrop_viewer",
            "--seed",
            "9",
            "--bodies",
            "3",
            "--no-antialias",
            "--opaque",
        ])
        .unwrap();

        assert_eq!(config.seed, Some(9));
        assert_eq!(config.scene_settings().bodies.count, 3);
        assert_eq!(config.sample_count(), 1);
        assert!(config.opaque);
    }
}
