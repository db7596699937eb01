use crate::utils::error::Result;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Where the CLI writes its result: a file (parents created) or stdout.
#[derive(Debug, Clone)]
pub struct LocalOutput {
    path: Option<String>,
}

impl LocalOutput {
    pub fn new(path: Option<String>) -> Self {
        Self { path }
    }

    pub fn write(&self, data: &[u8]) -> Result<String> {
        match &self.path {
            Some(path) => {
                let full_path = Path::new(path);
                if let Some(parent) = full_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(full_path, data)?;
                Ok(path.clone())
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(data)?;
                stdout.flush()?;
                Ok("<stdout>".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out/nested/bill.svg");
        let output = LocalOutput::new(Some(path.to_string_lossy().to_string()));

        let written = output.write(b"<svg/>").unwrap();
        assert!(written.ends_with("bill.svg"));
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
    }
}
