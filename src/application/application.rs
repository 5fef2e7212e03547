use std::path::Path;

use asciitree::{
    codec::{self, Format, TextFormat},
    config::{self, EditorConfig},
    ext::{read_text, BestEffortPathExt},
    session::EditorSession,
    share::{self, ChannelSink, ShareToken},
    tree::SequentialIdAllocator,
};
use colored::Colorize;
use snafu::prelude::*;
use supports_color::Stream;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::cli::Command;

pub struct Application;

impl Application {
    pub async fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        colored::control::set_override(supports_color::on(Stream::Stderr).is_some());

        let config = EditorConfig::read(&runtime_config.root)
            .await
            .context(ConfigSnafu)?;
        debug!("Loaded config: {:?}", config);

        let output = Self::execute(&runtime_config.command, config).await?;
        print!("{output}");
        Ok(())
    }

    /// Runs one command and returns what it prints on success.
    pub async fn execute(command: &Command, config: EditorConfig) -> Result<String, ApplicationError> {
        match command {
            Command::Convert { file, from, to } => {
                let mut session = EditorSession::new(Vec::new(), config, SequentialIdAllocator::new());
                Self::load(&mut session, file, *from).await?;
                info!("Converted {} from {} to {}", file.best_effort_path_display(), from, to);
                Ok(match to {
                    Format::Ascii => session.ascii(),
                    Format::Markdown => session.markdown(),
                })
            }
            Command::Validate { file, format } => {
                let text = Self::read_input(file).await?;
                let report = format.codec(&config).validate(&text);
                ensure!(
                    report.valid,
                    InvalidDocumentSnafu {
                        file_path: file.best_effort_path_display(),
                        errors: report.errors,
                    }
                );
                info!("{} is a valid {} document", file.best_effort_path_display(), format);
                Ok(format!("{} {}\n", "Valid".green().bold(), file.display()))
            }
            Command::Share { file, format } => {
                let (sink, mut receiver) = ChannelSink::channel();
                let mut session =
                    EditorSession::new(Vec::new(), config, SequentialIdAllocator::new()).with_sink(sink);
                Self::load(&mut session, file, *format).await?;
                let token = ChannelSink::latest(&mut receiver).context(NothingSharedSnafu)?;
                Ok(format!("{token}\n"))
            }
            Command::Unshare { token, to } => {
                let forest = ShareToken::decode(token).context(ShareSnafu)?;
                info!("Unpacked {} root node(s)", forest.len());
                Ok(to.codec(&config).generate(&forest))
            }
        }
    }

    async fn read_input(file: &Path) -> Result<String, ApplicationError> {
        read_text(file).await.context(ReadInputSnafu {
            file_path: file.best_effort_path_display(),
        })
    }

    async fn load(
        session: &mut EditorSession,
        file: &Path,
        format: Format,
    ) -> Result<(), ApplicationError> {
        let text = Self::read_input(file).await?;
        let loaded = match format {
            Format::Ascii => session.import_ascii(&text),
            Format::Markdown => session.apply_markdown(&text),
        };
        loaded.context(ParseSnafu {
            file_path: file.best_effort_path_display(),
        })
    }
}

fn list_errors(errors: &[codec::ParseError]) -> String {
    errors
        .iter()
        .map(|error| {
            format!(
                "  {}  {} {:?}",
                error.location.to_string().dimmed(),
                error.kind.to_string().red().bold(),
                error.token
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: config::ConfigError },
    #[snafu(display("Failed to read {}", file_path))]
    ReadInputError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("{} could not be parsed", file_path))]
    ParseError {
        file_path: String,
        source: codec::ParseError,
    },
    #[snafu(display("{} has {} error(s):\n{}", file_path, errors.len(), list_errors(errors)))]
    InvalidDocument {
        file_path: String,
        errors: Vec<codec::ParseError>,
    },
    #[snafu(display("Failed to process the share token"))]
    ShareError { source: share::ShareError },
    #[snafu(display("The document produced no share token"))]
    NothingShared,
}
