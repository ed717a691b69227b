use crate::error::Result;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read the raw report from a file, or from stdin when no path is given
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            ::log::debug!("Reading report from {}", path.display());
            Ok(fs::read_to_string(path)?)
        }
        None => {
            ::log::debug!("Reading report from stdin");
            let mut contents = String::new();
            io::stdin().read_to_string(&mut contents)?;
            Ok(contents)
        }
    }
}
