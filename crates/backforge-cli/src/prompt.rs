//! Interactive prompts for choices missing from flags and config.
//!
//! With the `interactive` feature off every prompt answers `None`, and the
//! caller falls back to defaults.

use crate::error::{CliError, CliResult};

/// Asks the user for missing choices, or declines when prompting is off.
#[derive(Debug, Clone, Copy)]
pub struct Prompter {
    enabled: bool,
}

impl Prompter {
    /// Prompting is on only when requested and compiled in.
    pub fn new(requested: bool) -> Self {
        Self {
            enabled: requested && cfg!(feature = "interactive"),
        }
    }

    pub fn text(&self, prompt: &str) -> CliResult<Option<String>> {
        if !self.enabled {
            return Ok(None);
        }
        input_text(prompt).map(Some)
    }

    /// Pick one of `items`; the first item is preselected.
    pub fn select<T: Copy>(
        &self,
        prompt: &str,
        items: &[T],
        label: fn(&T) -> &'static str,
    ) -> CliResult<Option<T>> {
        if !self.enabled {
            return Ok(None);
        }
        let labels: Vec<&str> = items.iter().map(label).collect();
        match select_index(prompt, &labels)? {
            Some(index) => Ok(items.get(index).copied()),
            None => Err(CliError::Cancelled),
        }
    }

    /// Pick any subset of `items`; nothing is preselected.
    pub fn multi_select<T: Copy>(
        &self,
        prompt: &str,
        items: &[T],
        label: fn(&T) -> &'static str,
    ) -> CliResult<Option<Vec<T>>> {
        if !self.enabled {
            return Ok(None);
        }
        let labels: Vec<&str> = items.iter().map(label).collect();
        match multi_select_indices(prompt, &labels)? {
            Some(indices) => Ok(Some(
                indices
                    .into_iter()
                    .filter_map(|i| items.get(i).copied())
                    .collect(),
            )),
            None => Err(CliError::Cancelled),
        }
    }
}

#[cfg(feature = "interactive")]
fn prompt_error(err: dialoguer::Error) -> CliError {
    CliError::Prompt {
        message: err.to_string(),
    }
}

#[cfg(feature = "interactive")]
fn input_text(prompt: &str) -> CliResult<String> {
    use dialoguer::{Input, theme::ColorfulTheme};

    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()
        .map_err(prompt_error)
}

#[cfg(feature = "interactive")]
fn select_index(prompt: &str, labels: &[&str]) -> CliResult<Option<usize>> {
    use dialoguer::{FuzzySelect, theme::ColorfulTheme};

    FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(labels)
        .default(0)
        .interact_opt()
        .map_err(prompt_error)
}

#[cfg(feature = "interactive")]
fn multi_select_indices(prompt: &str, labels: &[&str]) -> CliResult<Option<Vec<usize>>> {
    use dialoguer::{MultiSelect, theme::ColorfulTheme};

    MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{prompt} (space to toggle, enter to confirm)"))
        .items(labels)
        .interact_opt()
        .map_err(prompt_error)
}

#[cfg(not(feature = "interactive"))]
fn input_text(_prompt: &str) -> CliResult<String> {
    Err(CliError::Prompt {
        message: "interactive support is not compiled in".into(),
    })
}

#[cfg(not(feature = "interactive"))]
fn select_index(_prompt: &str, _labels: &[&str]) -> CliResult<Option<usize>> {
    Ok(None)
}

#[cfg(not(feature = "interactive"))]
fn multi_select_indices(_prompt: &str, _labels: &[&str]) -> CliResult<Option<Vec<usize>>> {
    Ok(None)
}
