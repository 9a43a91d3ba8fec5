//! Delete command implementation.

use kvconf_client::ConfigClient;
use std::io::{self, BufRead, Write};

/// Runs the delete command.
///
/// Asks for confirmation on stdin unless `yes` is set.
pub async fn run(
    client: &ConfigClient,
    key: &str,
    yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        let prompt = format!("Delete '{key}' from {}?", client.base_url());
        if !confirm(&mut io::stdin().lock(), &mut io::stdout(), &prompt)? {
            println!("Aborted");
            return Ok(());
        }
    }

    let ack = client.delete(key).await?;
    println!("{}", ack.message);
    Ok(())
}

/// Writes `prompt` and reads a yes/no answer. Anything but `y`/`yes` is no.
fn confirm(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> io::Result<bool> {
    write!(output, "{prompt} [y/N]: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(text: &str) -> bool {
        let mut output = Vec::new();
        let result = confirm(&mut text.as_bytes(), &mut output, "Delete 'k'?").unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "Delete 'k'? [y/N]: ");
        result
    }

    #[test]
    fn accepts_yes() {
        assert!(answer("y\n"));
        assert!(answer("YES\n"));
    }

    #[test]
    fn defaults_to_no() {
        assert!(!answer("\n"));
        assert!(!answer("n\n"));
        assert!(!answer(""));
        assert!(!answer("sure\n"));
    }
}
