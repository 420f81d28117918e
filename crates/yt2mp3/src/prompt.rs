use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{Input, theme::ColorfulTheme};
use yt2mp3_core::{Prompt, Yt2Mp3Error, Yt2Mp3Result};

/// `dialoguer` prompts on a terminal, plain line reads when stdin is piped.
pub struct TerminalPrompt {
    theme: ColorfulTheme,
    interactive: bool,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            interactive: io::stdin().is_terminal(),
        }
    }

    fn read_line(&self, label: &str) -> Yt2Mp3Result<String> {
        print!("{label}: ");
        io::stdout()
            .flush()
            .map_err(|err| Yt2Mp3Error::Prompt(format!("failed to flush stdout: {err}")))?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|err| Yt2Mp3Error::Prompt(format!("failed to read stdin: {err}")))?;
        if read == 0 {
            return Err(Yt2Mp3Error::Prompt("input closed".to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&mut self, label: &str) -> Yt2Mp3Result<String> {
        if !self.interactive {
            return self.read_line(label);
        }
        Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
            .map_err(|err| Yt2Mp3Error::Prompt(format!("input failed: {err}")))
    }

    fn ask_with_default(&mut self, label: &str, default: &str) -> Yt2Mp3Result<String> {
        if !self.interactive {
            return self.read_line(label);
        }
        Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .with_initial_text(default)
            .allow_empty(true)
            .interact_text()
            .map_err(|err| Yt2Mp3Error::Prompt(format!("input failed: {err}")))
    }
}
