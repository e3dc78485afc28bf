use crate::config::Config;
use crate::error::Result;
use crate::utils::path::resolve_user_path;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Directory given on the command line, or the configured registry directory.
pub fn registry_dir(config: &Config, dir: Option<&Path>) -> PathBuf {
    dir.map(Path::to_path_buf)
        .unwrap_or_else(|| config.registry_dir())
}

/// Ask where generated records should go.
///
/// Re-prompts on invalid input. Returns `None` when the user cancels or
/// input ends.
pub fn prompt_output_dir<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    registry_dir: &Path,
) -> Result<Option<PathBuf>> {
    writeln!(output)?;
    writeln!(output, "Where should the agent records be generated?")?;
    writeln!(output, "1. Current directory (./)")?;
    writeln!(output, "2. Registry directory ({})", registry_dir.display())?;
    writeln!(output, "3. Custom directory")?;
    writeln!(output, "4. Cancel")?;

    loop {
        write!(output, "\nChoose an option (1-4): ")?;
        output.flush()?;

        let Some(choice) = read_trimmed(input)? else {
            return Ok(None);
        };

        match choice.as_str() {
            "1" => return Ok(Some(PathBuf::from("."))),
            "2" => return Ok(Some(registry_dir.to_path_buf())),
            "3" => {
                write!(output, "Directory path: ")?;
                output.flush()?;
                let Some(path) = read_trimmed(input)? else {
                    return Ok(None);
                };
                if path.is_empty() {
                    writeln!(output, "Invalid path. Try again.")?;
                    continue;
                }
                return Ok(Some(resolve_user_path(&path)));
            }
            "4" => return Ok(None),
            _ => writeln!(output, "Invalid option. Choose 1, 2, 3 or 4.")?,
        }
    }
}

fn read_trimmed<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
