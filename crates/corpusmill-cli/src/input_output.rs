use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

fn squash_standard_io(path: Option<&str>) -> Option<&str> {
    match path {
        Some("-") => None,
        other => other,
    }
}

/// Open a writer; `None` or "-" is stdout.
pub fn open_output(path: Option<&str>) -> Result<Box<dyn Write>, Box<dyn std::error::Error>> {
    Ok(match squash_standard_io(path) {
        Some(p) => {
            if let Some(parent) = Path::new(p).parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            Box::new(BufWriter::new(File::create(p)?))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    })
}

/// Output argument group.
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Optional output file; "-" may be used to indicate stdout.
    #[clap(long, default_value = None)]
    pub output: Option<String>,
}

impl OutputArgs {
    /// Open a writer for the output.
    pub fn open_writer(&self) -> Result<Box<dyn Write>, Box<dyn std::error::Error>> {
        open_output(self.output.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squash_standard_io() {
        assert_eq!(squash_standard_io(None), None);
        assert_eq!(squash_standard_io(Some("-")), None);
        assert_eq!(squash_standard_io(Some("out.txt")), Some("out.txt"));
    }

    #[test]
    fn test_open_output_creates_parents() {
        let dir = tempdir::TempDir::new("cli_output").unwrap();
        let path = dir.path().join("nested").join("out.txt");
        let mut writer = open_output(path.to_str()).unwrap();
        writer.write_all(b"ok\n").unwrap();
        writer.flush().unwrap();
        drop(writer);
        assert_eq!(std::fs::read_to_string(path).unwrap(), "ok\n");
    }
}
