use crate::utils::error::Result;
use std::io::{BufRead, IsTerminal, Write};

const PROMPT: &str = "Please enter your NASA API key and press enter/return.\n\
If you don't have a key, just press enter/return and \"DEMO_KEY\"\n\
with limited access will be used: ";

/// Reads one line with the API key. An empty line means "use DEMO_KEY".
///
/// The returned string still needs to go through `CredentialValidator::resolve`.
pub fn prompt_for_api_key<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<String> {
    output.write_all(PROMPT.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Picks the raw API key from config, falling back to an interactive prompt
/// when stdin is a terminal and prompting is allowed.
pub fn acquire_api_key(configured: Option<&str>, allow_prompt: bool) -> Result<String> {
    if let Some(key) = configured {
        return Ok(key.to_string());
    }

    let stdin = std::io::stdin();
    if allow_prompt && stdin.is_terminal() {
        return prompt_for_api_key(stdin.lock(), std::io::stderr());
    }

    Ok(String::new())
}
