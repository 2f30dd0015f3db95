//! The site-build step that runs after archiving.
//!
//! [`SiteBuilder`] is the seam between archiving and whatever turns the
//! notice tree into HTML. Two implementations ship:
//!
//! - [`Generator`](crate::generate::Generator): the built-in maud renderer,
//!   used when `build.command` is empty.
//! - [`CommandBuilder`]: runs an external generator (for example
//!   `["npx", "@11ty/eleventy"]`) in the site root and fails on a non-zero
//!   exit status.
//!
//! A build failure is the one fatal error of `--process-all`.

use crate::config::SiteConfig;
use crate::generate::{GenerateError, Generator};
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Failed to start build command `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("Build command `{command}` failed: {status}")]
    Failed { command: String, status: String },
    #[error("Site generation failed: {0}")]
    Generate(#[from] GenerateError),
}

pub trait SiteBuilder {
    /// Build the site. Blocks until done.
    fn build(&self) -> Result<(), BuildError>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

/// Runs an external build command.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl CommandBuilder {
    /// `command[0]` is the program, the rest its arguments.
    ///
    /// Returns `None` for an empty command.
    pub fn new(command: &[String], working_dir: &Path) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            working_dir: working_dir.to_path_buf(),
        })
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl SiteBuilder for CommandBuilder {
    fn build(&self) -> Result<(), BuildError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .status()
            .map_err(|source| BuildError::Spawn {
                command: self.command_line(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(BuildError::Failed {
                command: self.command_line(),
                status: status.to_string(),
            })
        }
    }

    fn describe(&self) -> String {
        self.command_line()
    }
}

/// Pick the builder the config asks for.
pub fn builder_for(config: &SiteConfig, site_root: &Path) -> Box<dyn SiteBuilder> {
    match CommandBuilder::new(&config.build.command, site_root) {
        Some(command) => Box::new(command),
        None => Box::new(Generator::new(config.clone(), site_root)),
    }
}
