use anyhow::{Context, Result};
use std::{
    io::{stdin, stdout, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, error, info, warn};

use crate::{settings::AppConfig, ux::menu};
use qrgen_core::{
    constants::MAX_SUFFIX,
    generate_plain, generate_with_logo,
    naming::unique_filename_within,
    types::{GenerationRequest, LogoOverlayRequest, Payload},
};

/// Line-oriented console used by the shell.
pub trait Prompter {
    /// Show `prompt` and read one line without its line terminator. `None` once input is closed.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;
    fn say(&mut self, message: &str) -> Result<()>;
}

pub struct StdioPrompter;
impl Prompter for StdioPrompter {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        stdout().flush().context("Failed to flush stdout")?;
        let mut line = String::new();
        let read = stdin()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, message: &str) -> Result<()> {
        let mut out = stdout().lock();
        writeln!(out, "{message}").context("Failed to write to stdout")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Plain,
    Logo,
}

/// A fully resolved request waiting for confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingJob {
    Plain(GenerationRequest),
    Logo(LogoOverlayRequest),
}

impl PendingJob {
    pub fn mode(&self) -> Mode {
        match self {
            PendingJob::Plain(_) => Mode::Plain,
            PendingJob::Logo(_) => Mode::Logo,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShellState {
    Menu,
    CollectInput(Mode),
    Confirm(PendingJob),
    Execute(PendingJob),
    Exit,
}

pub struct Shell<'a> {
    config: &'a AppConfig,
    prompter: &'a mut dyn Prompter,
    max_suffix: u32,
}

impl<'a> Shell<'a> {
    pub fn new(config: &'a AppConfig, prompter: &'a mut dyn Prompter) -> Self {
        Self {
            config,
            prompter,
            max_suffix: MAX_SUFFIX,
        }
    }

    /// Loop until the user exits or input is closed. Only console failures are returned.
    pub fn run(&mut self) -> Result<()> {
        let mut state = ShellState::Menu;
        loop {
            state = match state {
                ShellState::Exit => {
                    debug!("Leaving the menu");
                    return Ok(());
                }
                state => self.step(state)?,
            };
        }
    }

    pub fn step(&mut self, state: ShellState) -> Result<ShellState> {
        match state {
            ShellState::Menu => self.menu(),
            ShellState::CollectInput(mode) => self.collect_input(mode),
            ShellState::Confirm(job) => self.confirm(job),
            ShellState::Execute(job) => self.execute(job),
            ShellState::Exit => Ok(ShellState::Exit),
        }
    }

    fn menu(&mut self) -> Result<ShellState> {
        self.prompter.say(&menu::render_menu())?;
        let Some(choice) = self.prompter.ask(menu::CHOICE_PROMPT)? else {
            return Ok(ShellState::Exit);
        };
        Ok(match choice.as_str() {
            "1" => ShellState::CollectInput(Mode::Plain),
            "2" => ShellState::CollectInput(Mode::Logo),
            "3" => ShellState::Exit,
            other => {
                debug!(choice = other, "Invalid menu choice");
                self.prompter.say(menu::INVALID_CHOICE)?;
                ShellState::Menu
            }
        })
    }

    fn collect_input(&mut self, mode: Mode) -> Result<ShellState> {
        let defaults = &self.config.defaults;

        let Some(text) = self.prompter.ask(menu::PAYLOAD_PROMPT)? else {
            return Ok(ShellState::Exit);
        };
        let payload = Payload::new(&text).unwrap_or_else(|_| defaults.payload.clone());

        let logo_path = if mode == Mode::Logo {
            let Some(logo) = self.prompter.ask(menu::LOGO_PROMPT)? else {
                return Ok(ShellState::Exit);
            };
            Some(or_default(&logo, &defaults.logo_path))
        } else {
            None
        };

        let Some(dir) = self.prompter.ask(menu::OUTPUT_DIR_PROMPT)? else {
            return Ok(ShellState::Exit);
        };
        let output_dir = or_default(&dir, &defaults.output_directory);

        let named = unique_filename_within(&output_dir, payload.as_str(), self.max_suffix);
        let output_path = match named {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "No output file name available");
                self.prompter.say(&format!("Could not pick a file name: {e}"))?;
                return Ok(ShellState::Menu);
            }
        };

        let profile = &self.config.profile;
        let job = match logo_path {
            Some(logo_path) => PendingJob::Logo(LogoOverlayRequest::new(
                payload,
                output_path,
                logo_path,
                profile,
            )),
            None => PendingJob::Plain(GenerationRequest::plain(payload, output_path, profile)),
        };
        Ok(ShellState::Confirm(job))
    }

    fn confirm(&mut self, job: PendingJob) -> Result<ShellState> {
        self.prompter.say(&menu::render_summary(&job))?;
        let Some(answer) = self.prompter.ask(menu::CONFIRM_PROMPT)? else {
            return Ok(ShellState::Exit);
        };
        if menu::is_affirmative(&answer) {
            Ok(ShellState::Execute(job))
        } else {
            info!(mode = ?job.mode(), "Generation cancelled by the user");
            self.prompter.say(menu::CANCELLED)?;
            Ok(ShellState::Menu)
        }
    }

    fn execute(&mut self, job: PendingJob) -> Result<ShellState> {
        let result = match &job {
            PendingJob::Plain(request) => generate_plain(request),
            PendingJob::Logo(request) => generate_with_logo(request),
        };
        match result {
            Ok(path) => {
                self.prompter.say(&format!(
                    "QR code generated successfully: {}",
                    path.display()
                ))?;
            }
            Err(e) => {
                error!(error = %e, mode = ?job.mode(), "QR code generation failed");
                self.prompter.say(&menu::failure_message(&e))?;
            }
        }
        Ok(ShellState::Menu)
    }
}

fn or_default(input: &str, default: &Path) -> PathBuf {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    }
}
