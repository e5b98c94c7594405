use crate::{
    export::{self, ExportFormat, ImageSummary},
    image::Image,
    resource::{self, IMAGES},
    settings::Settings,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::info;
use std::{io::Write, path::PathBuf};

#[derive(Debug, Parser)]
#[command(name = "respack")]
#[command(about = "Inspect and export the compiled-in icon resources")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every embedded resource
    List {
        /// Print a JSON array instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the descriptor of one resource
    Show { name: String },
    /// Print the icon chosen for a requested edge length
    Pick { size: usize },
    /// Check the size and format invariants of the catalog
    Verify,
    /// Write resources to disk
    Export {
        /// Resources to export, all of them when empty
        names: Vec<String>,
        #[arg(long)]
        out: Option<PathBuf>,
        /// raw or png
        #[arg(long)]
        format: Option<ExportFormat>,
    },
    /// Write a default settings file
    InitConfig {
        /// Defaults to the platform config directory
        #[arg(long)]
        path: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
}

/// Runs `command`. Settings are only loaded by commands that need them.
pub fn run(
    command: Command, load_settings: impl FnOnce() -> Result<Settings>, out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::List { json } => {
            let summaries: Vec<ImageSummary> =
                IMAGES.iter().map(|image| ImageSummary::from(*image)).collect();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&summaries)?)?;
            } else {
                for summary in &summaries {
                    writeln!(out, "{summary}")?;
                }
            }
        }
        Command::Show { name } => {
            let image = lookup(&name)?;
            writeln!(out, "name:   {}", image.name())?;
            writeln!(out, "format: {}", image.format())?;
            writeln!(out, "width:  {}", image.width())?;
            writeln!(out, "height: {}", image.height())?;
            writeln!(out, "bytes:  {}", image.bytes().len())?;
        }
        Command::Pick { size } => {
            writeln!(out, "{}", resource::icon_for_size(size).name())?;
        }
        Command::Verify => {
            let problems = export::verify_catalog(&IMAGES);
            if !problems.is_empty() {
                bail!("{} catalog problem(s):\n{}", problems.len(), problems.join("\n"));
            }
            writeln!(out, "{} resources ok", IMAGES.len())?;
        }
        Command::Export {
            names,
            out: dir,
            format,
        } => {
            let settings = load_settings()?;
            let dir = dir.unwrap_or(settings.export_dir);
            let format = format.unwrap_or(settings.export_format);
            let images = if names.is_empty() {
                IMAGES.to_vec()
            } else {
                names.iter().map(|name| lookup(name)).collect::<Result<Vec<_>>>()?
            };

            for image in images {
                let path = export::export_image(image, &dir, format)?;
                info!("Exported {} ({format:?})", image.name());
                writeln!(out, "{}", path.display())?;
            }
        }
        Command::InitConfig { path, force } => {
            let Some(path) = path.or_else(Settings::default_path) else {
                bail!("no config directory on this platform, pass --path");
            };
            if path.exists() && !force {
                bail!("{} already exists, pass --force to overwrite", path.display());
            }
            Settings::default().save_to(&path)?;
            info!("Wrote default settings to {}", path.display());
            writeln!(out, "{}", path.display())?;
        }
    }
    Ok(())
}

fn lookup(name: &str) -> Result<&'static Image<'static>> {
    resource::find_image(name)
        .with_context(|| format!("no embedded resource named '{name}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_export_arguments() {
        let cli = Cli::parse_from([
            "respack",
            "export",
            "app_icon_16",
            "app_icon_32",
            "--format",
            "png",
            "--out",
            "dist",
        ]);
        match cli.command {
            Command::Export { names, out, format } => {
                assert_eq!(names, vec!["app_icon_16", "app_icon_32"]);
                assert_eq!(out, Some(PathBuf::from("dist")));
                assert_eq!(format, Some(ExportFormat::Png));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_export_format() {
        assert!(Cli::try_parse_from(["respack", "export", "--format", "gif"]).is_err());
    }

    #[test]
    fn show_unknown_name_fails() {
        let mut out = Vec::new();
        let err = run(
            Command::Show {
                name: "app_icon_20".to_string(),
            },
            || Ok(Settings::default()),
            &mut out,
        )
        .unwrap_err();
        assert!(err.to_string().contains("app_icon_20"));
    }

    #[test]
    fn read_only_commands_ignore_broken_settings() {
        let broken = || -> Result<Settings> { anyhow::bail!("invalid RESPACK_EXPORT_FORMAT") };
        for command in [
            Command::List { json: false },
            Command::Show {
                name: "app_icon_16".to_string(),
            },
            Command::Pick { size: 16 },
            Command::Verify,
        ] {
            let mut out = Vec::new();
            run(command, broken, &mut out).unwrap();
            assert!(!out.is_empty());
        }

        let mut out = Vec::new();
        let export = Command::Export {
            names: Vec::new(),
            out: None,
            format: None,
        };
        assert!(run(export, broken, &mut out).is_err());
    }

    #[test]
    fn init_config_writes_defaults_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("respack").join("settings.json");
        let init = |force| Command::InitConfig {
            path: Some(path.clone()),
            force,
        };

        let mut out = Vec::new();
        run(init(false), || Ok(Settings::default()), &mut out).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());

        assert!(run(init(false), || Ok(Settings::default()), &mut out).is_err());
        run(init(true), || Ok(Settings::default()), &mut out).unwrap();
    }

    #[test]
    fn pick_prints_chosen_name() {
        let mut out = Vec::new();
        run(Command::Pick { size: 40 }, || Ok(Settings::default()), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "app_icon_48\n");
    }
}
