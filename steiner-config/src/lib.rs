//! Declarative configuration for the Steiner shell.
//!
//! The config file uses the KDL document language. Every section and every
//! value is optional; omitted values fall back to the defaults below, so an
//! empty (or missing) config file is valid.
//!
//! ```kdl
//! compiler "skuldc" "--batch"
//!
//! layout {
//!     explorer-width 250
//!     document-width 700
//!     analysis-width 250
//!     top-height 620
//!     console-height 180
//!     visibility-floor 20
//! }
//! ```

use std::path::Path;

use miette::{Context, IntoDiagnostic};
use tracing::debug;

#[derive(knuffel::Decode, Debug, Clone, PartialEq, Default)]
pub struct Config {
    #[knuffel(child, default)]
    pub compiler: Compiler,
    #[knuffel(child, default)]
    pub layout: Layout,
}

/// How to invoke the external Skuld compiler.
///
/// The node's arguments are the base command; the phase flag and the source
/// path are appended to it. The `SKULD_COMPILER_CMD` environment variable
/// takes precedence when set.
#[derive(knuffel::Decode, Debug, Clone, PartialEq, Default)]
pub struct Compiler {
    #[knuffel(arguments)]
    pub command: Vec<String>,
}

/// Default proportional sizes for the split layout.
///
/// Sizes are abstract weights, not pixels; the host toolkit distributes its
/// pixel budget proportionally to them.
#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct Layout {
    #[knuffel(child, unwrap(argument), default = Self::default().explorer_width)]
    pub explorer_width: u32,
    #[knuffel(child, unwrap(argument), default = Self::default().document_width)]
    pub document_width: u32,
    #[knuffel(child, unwrap(argument), default = Self::default().analysis_width)]
    pub analysis_width: u32,
    #[knuffel(child, unwrap(argument), default = Self::default().top_height)]
    pub top_height: u32,
    #[knuffel(child, unwrap(argument), default = Self::default().console_height)]
    pub console_height: u32,
    /// Restored slot sizes at or below this weight are bumped to the slot's
    /// default, so a panel never reappears as an unusable sliver.
    #[knuffel(child, unwrap(argument), default = Self::default().visibility_floor)]
    pub visibility_floor: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            explorer_width: 250,
            document_width: 700,
            analysis_width: 250,
            top_height: 620,
            console_height: 180,
            visibility_floor: 20,
        }
    }
}

impl Config {
    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        knuffel::parse(filename, text)
    }

    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "config.kdl".to_owned());

        let config = Self::parse(&filename, &contents)?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[track_caller]
    fn do_parse(text: &str) -> Config {
        Config::parse("test.kdl", text)
            .map_err(miette::Report::new)
            .unwrap()
    }

    #[test]
    fn empty_config_is_valid() {
        assert_eq!(do_parse(""), Config::default());
    }

    #[test]
    fn parse_full() {
        let parsed = do_parse(
            r##"
            compiler "skuldc" "--batch"

            layout {
                explorer-width 300
                document-width 800
                analysis-width 200
                top-height 640
                console-height 160
                visibility-floor 30
            }
            "##,
        );

        assert_eq!(
            parsed,
            Config {
                compiler: Compiler {
                    command: vec!["skuldc".to_owned(), "--batch".to_owned()],
                },
                layout: Layout {
                    explorer_width: 300,
                    document_width: 800,
                    analysis_width: 200,
                    top_height: 640,
                    console_height: 160,
                    visibility_floor: 30,
                },
            },
        );
    }

    #[test]
    fn partial_layout_keeps_other_defaults() {
        let parsed = do_parse(
            r#"
            layout {
                console-height 240
            }
            "#,
        );

        assert_eq!(
            parsed.layout,
            Layout {
                console_height: 240,
                ..Default::default()
            },
        );
    }

    #[test]
    fn bad_value_is_an_error() {
        assert!(Config::parse(
            "test.kdl",
            r#"
            layout {
                explorer-width "wide"
            }
            "#,
        )
        .is_err());
    }
}
